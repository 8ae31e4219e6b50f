use serde::Serialize;

use crate::{Conversion, DecodeSentence};

/// VTG - Track made good and Ground speed
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_vtg_track_made_good_and_ground_speed>
///
/// ```text
///          1  2  3  4  5  6  7  8
///          |  |  |  |  |  |  |  |
///  $--VTG,x.x,T,x.x,M,x.x,N,x.x,K*hh<CR><LF>
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPVTG")]
pub struct VTG {
    /// Course over ground, degrees True
    #[nmea(index(1), convert(Conversion::Float))]
    pub course_over_ground_true: Option<f64>,
    #[nmea(index(2))]
    pub true_reference: Option<String>,
    /// Course over ground, degrees Magnetic
    #[nmea(index(3), convert(Conversion::Float))]
    pub course_over_ground_magnetic: Option<f64>,
    #[nmea(index(4))]
    pub magnetic_reference: Option<String>,
    /// Speed over ground in knots
    #[nmea(index(5), convert(Conversion::Float))]
    pub speed_over_ground_knots: Option<f64>,
    #[nmea(index(6))]
    pub knots_units: Option<String>,
    /// Speed over ground in kilometers per hour
    #[nmea(index(7), convert(Conversion::Float))]
    pub speed_over_ground_kph: Option<f64>,
    #[nmea(index(8))]
    pub kph_units: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldSequence, decode_as};

    #[test]
    fn test_vtg_decoding() {
        let fields = FieldSequence::tokenize("GPVTG,054.7,T,034.4,M,005.5,N,010.2,K");
        let (vtg, diagnostics) = decode_as::<VTG>(&fields);

        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(vtg.course_over_ground_true, Some(54.7));
        assert_eq!(vtg.true_reference.as_deref(), Some("T"));
        assert_eq!(vtg.course_over_ground_magnetic, Some(34.4));
        assert_eq!(vtg.speed_over_ground_knots, Some(5.5));
        assert_eq!(vtg.speed_over_ground_kph, Some(10.2));
        assert_eq!(vtg.kph_units.as_deref(), Some("K"));
    }

    #[test]
    fn test_vtg_empty_magnetic() {
        let fields = FieldSequence::tokenize("GPVTG,59.53,T,,M,0.14,N,0.3,K");
        let (vtg, diagnostics) = decode_as::<VTG>(&fields);

        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(vtg.course_over_ground_true, Some(59.53));
        assert_eq!(vtg.course_over_ground_magnetic, None);
        assert_eq!(vtg.magnetic_reference.as_deref(), Some("M"));
        assert_eq!(vtg.speed_over_ground_knots, Some(0.14));
    }
}
