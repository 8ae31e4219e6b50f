use serde::Serialize;

use crate::{
    Conversion, DecodeSentence, Derivation,
    conversion::{Angle, UtcDate, UtcTime},
    sentences::Status,
};

/// RMC - Recommended Minimum Navigation Information
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rmc_recommended_minimum_navigation_information>
///
/// ```text
///         1         2 3       4 5        6  7   8   9    10 11
///         |         | |       | |        |  |   |   |    |  |
///  $--RMC,hhmmss.ss,A,ddmm.mm,a,dddmm.mm,a,x.x,x.x,xxxx,x.x,a*hh<CR><LF>
/// ```
///
/// Field 9 is the fix date in `DDMMYY` order.
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPRMC")]
pub struct RMC {
    /// Fix time in UTC
    #[nmea(index(1), convert(Conversion::UtcTime))]
    pub fix_time: Option<UtcTime>,
    /// Status Mode Indicator
    #[nmea(index(2))]
    pub status: Option<Status>,
    #[nmea(index(3), convert(Conversion::Latitude))]
    pub latitude_angle: Option<Angle>,
    #[nmea(index(4))]
    pub latitude_hemisphere: Option<String>,
    #[nmea(index(5), convert(Conversion::Longitude))]
    pub longitude_angle: Option<Angle>,
    #[nmea(index(6))]
    pub longitude_hemisphere: Option<String>,
    /// Speed over ground in knots
    #[nmea(index(7), convert(Conversion::Float))]
    pub speed_over_ground: Option<f64>,
    /// Course over ground in degrees
    #[nmea(index(8), convert(Conversion::Float))]
    pub course_over_ground: Option<f64>,
    /// Fix date in UTC
    #[nmea(index(9), convert(Conversion::FixDate))]
    pub fix_date: Option<UtcDate>,
    /// Magnetic variation in degrees
    #[nmea(index(10), convert(Conversion::Float))]
    pub magnetic_variation: Option<f64>,
    #[nmea(index(11))]
    pub magnetic_variation_direction: Option<String>,
    /// Latitude in degrees
    #[nmea(derive(Derivation::latitude(3, 4)))]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[nmea(derive(Derivation::longitude(5, 6)))]
    pub longitude: Option<f64>,
    /// Fix date and time in UTC
    #[nmea(derive(Derivation::timestamp(1, 9)))]
    pub timestamp: Option<time::PrimitiveDateTime>,
}
