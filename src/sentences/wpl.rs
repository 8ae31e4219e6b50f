use serde::Serialize;

use crate::{Conversion, DecodeSentence, Derivation, conversion::Angle};

/// WPL - Waypoint Location
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_wpl_waypoint_location>
///
/// ```text
///         1       2 3        4 5
///         |       | |        | |
///  $--WPL,llll.ll,a,yyyyy.yy,a,c--c*hh<CR><LF>
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPWPL")]
pub struct WPL {
    #[nmea(index(1), convert(Conversion::Latitude))]
    pub latitude_angle: Option<Angle>,
    #[nmea(index(2))]
    pub latitude_hemisphere: Option<String>,
    #[nmea(index(3), convert(Conversion::Longitude))]
    pub longitude_angle: Option<Angle>,
    #[nmea(index(4))]
    pub longitude_hemisphere: Option<String>,
    /// Waypoint identifier
    #[nmea(index(5))]
    pub name: Option<String>,
    /// Latitude in degrees
    #[nmea(derive(Derivation::latitude(1, 2)))]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[nmea(derive(Derivation::longitude(3, 4)))]
    pub longitude: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldSequence, decode_as};

    #[test]
    fn test_wpl_decoding() {
        let cases = [
            ("GPWPL,5128.62,N,00027.58,W,EGLL", 51.477, -0.459_666, "EGLL"),
            ("GPWPL,4917.16,N,12310.64,W,003", 49.286, -123.177_333, "003"),
        ];

        for (body, latitude, longitude, name) in cases {
            let (wpl, diagnostics) = decode_as::<WPL>(&FieldSequence::tokenize(body));

            assert!(diagnostics.is_empty(), "Failed: {body:?}\n\t{diagnostics}");
            assert!((wpl.latitude.unwrap() - latitude).abs() < 1e-6, "Failed: {body:?}");
            assert!((wpl.longitude.unwrap() - longitude).abs() < 1e-6, "Failed: {body:?}");
            assert_eq!(wpl.name.as_deref(), Some(name));
        }
    }

    #[test]
    fn test_wpl_lowercase_hemisphere() {
        let (wpl, diagnostics) =
            decode_as::<WPL>(&FieldSequence::tokenize("GPWPL,5128.62,s,00027.58,e,EGLL"));

        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert!(wpl.latitude.unwrap() < 0.0);
        assert!(wpl.longitude.unwrap() > 0.0);
    }
}
