use serde::Serialize;

use crate::{
    Conversion, DecodeSentence, Derivation,
    sentences::{FixMode, SelectionMode},
};

/// GSA - GPS DOP and active satellites
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsa_gps_dop_and_active_satellites>
///
/// ```text
///         1 2 3                        14 15  16  17
///         | | |                         |  |   |   |
///  $--GSA,a,a,x,x,x,x,x,x,x,x,x,x,x,x,x,x,x.x,x.x,x.x*hh<CR><LF>
/// ```
///
/// Fields 3 to 14 hold the PRNs of the satellites used in the solution; unused
/// channels are empty.
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPGSA")]
pub struct GSA {
    /// Selection Mode
    #[nmea(index(1))]
    pub selection_mode: Option<SelectionMode>,
    /// Fix Mode
    #[nmea(index(2))]
    pub fix_mode: Option<FixMode>,
    /// Position dilution of precision
    #[nmea(index(15), convert(Conversion::Float))]
    pub pdop: Option<f32>,
    /// Horizontal dilution of precision
    #[nmea(index(16), convert(Conversion::Float))]
    pub hdop: Option<f32>,
    /// Vertical dilution of precision
    #[nmea(index(17), convert(Conversion::Float))]
    pub vdop: Option<f32>,
    /// PRNs of the satellites used for the fix, in channel order
    #[nmea(derive(Derivation::list(3, 12, Conversion::Integer)))]
    pub fix_satellites_prns: heapless::Vec<u8, 12>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Diagnostic, FieldFormatError, FieldSequence, decode_as};

    #[test]
    fn test_gsa_decoding() {
        let fields =
            FieldSequence::tokenize("GPGSA,A,2,29,19,28,,,,,,,,,,23.4,12.1,20.0");
        let (gsa, diagnostics) = decode_as::<GSA>(&fields);

        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(gsa.selection_mode, Some(SelectionMode::Automatic));
        assert_eq!(gsa.fix_mode, Some(FixMode::Fix2D));
        assert_eq!(gsa.fix_satellites_prns, [29, 19, 28]);
        assert_eq!(gsa.pdop, Some(23.4));
        assert_eq!(gsa.hdop, Some(12.1));
        assert_eq!(gsa.vdop, Some(20.0));
    }

    #[test]
    fn test_gsa_truncated() {
        // Ten fields instead of seventeen
        let fields = FieldSequence::tokenize("GPGSA,A,3,29,24,18,14,22,27,,");
        let (gsa, diagnostics) = decode_as::<GSA>(&fields);

        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(gsa.fix_mode, Some(FixMode::Fix3D));
        assert_eq!(gsa.fix_satellites_prns, [29, 24, 18, 14, 22, 27]);
        assert_eq!(gsa.pdop, None);
        assert_eq!(gsa.hdop, None);
        assert_eq!(gsa.vdop, None);
    }

    #[test]
    fn test_gsa_bad_prn() {
        let fields = FieldSequence::tokenize("GPGSA,M,3,29,x4,18,,,,,,,,,,1.5,0.9,1.2");
        let (gsa, diagnostics) = decode_as::<GSA>(&fields);

        assert_eq!(gsa.selection_mode, Some(SelectionMode::Manual));
        assert_eq!(gsa.fix_satellites_prns, [29, 18]);
        assert_eq!(gsa.hdop, Some(0.9));

        let diagnostics = diagnostics.into_vec();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].name(), "fix_satellites_prns");
    }

    #[test]
    fn test_gsa_prn_out_of_range() {
        let fields = FieldSequence::tokenize("GPGSA,A,3,29,300,18,,,,,,,,,,1.5,0.9,1.2");
        let (gsa, diagnostics) = decode_as::<GSA>(&fields);

        assert_eq!(gsa.fix_satellites_prns, [29, 18]);
        assert_eq!(gsa.pdop, Some(1.5));
        assert_eq!(
            diagnostics.into_vec(),
            [Diagnostic::FieldFormat(FieldFormatError {
                tag: "GPGSA".to_owned(),
                index: 4,
                name: "fix_satellites_prns",
                text: "300".to_owned(),
                expected: "an integer in 0..=255",
            })]
        );
    }
}
