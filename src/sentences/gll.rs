use serde::Serialize;

use crate::{
    Conversion, DecodeSentence, Derivation,
    conversion::{Angle, UtcTime},
    sentences::Status,
};

/// GLL - Geographic Position - Latitude/Longitude
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gll_geographic_position_latitudelongitude>
///
/// ```text
///         1       2 3        4 5         6
///         |       | |        | |         |
///  $--GLL,ddmm.mm,a,dddmm.mm,a,hhmmss.ss,A*hh<CR><LF>
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPGLL")]
pub struct GLL {
    #[nmea(index(1), convert(Conversion::Latitude))]
    pub latitude_angle: Option<Angle>,
    #[nmea(index(2))]
    pub latitude_hemisphere: Option<String>,
    #[nmea(index(3), convert(Conversion::Longitude))]
    pub longitude_angle: Option<Angle>,
    #[nmea(index(4))]
    pub longitude_hemisphere: Option<String>,
    /// Fix time in UTC
    #[nmea(index(5), convert(Conversion::UtcTime))]
    pub fix_time: Option<UtcTime>,
    /// Status Mode Indicator
    #[nmea(index(6))]
    pub status: Option<Status>,
    /// Latitude in degrees
    #[nmea(derive(Derivation::latitude(1, 2)))]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[nmea(derive(Derivation::longitude(3, 4)))]
    pub longitude: Option<f64>,
}

impl GLL {
    /// Whether the talker flagged the position as valid.
    pub fn is_valid(&self) -> bool {
        self.status == Some(Status::Valid)
    }
}
