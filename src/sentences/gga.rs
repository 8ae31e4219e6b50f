use serde::Serialize;

use crate::{
    Conversion, DecodeSentence, Derivation,
    conversion::{Angle, UtcTime},
    sentences::Quality,
};

/// GGA - Global Positioning System Fix Data
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gga_global_positioning_system_fix_data>
///
/// ```text
///                                                      11
///         1         2       3 4        5 6 7  8   9  10 |  12 13  14
///         |         |       | |        | | |  |   |   | |   | |   |
///  $--GGA,hhmmss.ss,ddmm.mm,a,dddmm.mm,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx*hh<CR><LF>
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPGGA")]
pub struct GGA {
    /// Fix time in UTC
    #[nmea(index(1), convert(Conversion::UtcTime))]
    pub fix_time: Option<UtcTime>,
    #[nmea(index(2), convert(Conversion::Latitude))]
    pub latitude_angle: Option<Angle>,
    #[nmea(index(3))]
    pub latitude_hemisphere: Option<String>,
    #[nmea(index(4), convert(Conversion::Longitude))]
    pub longitude_angle: Option<Angle>,
    #[nmea(index(5))]
    pub longitude_hemisphere: Option<String>,
    /// Quality of the GPS fix
    #[nmea(index(6))]
    pub fix_quality: Option<Quality>,
    /// Number of satellites in use
    #[nmea(index(7), convert(Conversion::Integer))]
    pub satellites_in_use: Option<u8>,
    /// Horizontal dilution of precision
    #[nmea(index(8), convert(Conversion::Float))]
    pub hdop: Option<f32>,
    /// Altitude above mean sea level
    #[nmea(index(9), convert(Conversion::Float))]
    pub altitude: Option<f64>,
    #[nmea(index(10))]
    pub altitude_units: Option<String>,
    /// Geoidal separation, WGS-84 ellipsoid minus mean sea level
    #[nmea(index(11), convert(Conversion::Float))]
    pub geoidal_separation: Option<f64>,
    #[nmea(index(12))]
    pub geoidal_separation_units: Option<String>,
    /// Age of differential GPS data in seconds
    #[nmea(index(13), convert(Conversion::Float))]
    pub age_of_differential: Option<f64>,
    /// Differential reference station ID
    #[nmea(index(14))]
    pub differential_station_id: Option<String>,
    /// Latitude in degrees
    #[nmea(derive(Derivation::latitude(2, 3)))]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[nmea(derive(Derivation::longitude(4, 5)))]
    pub longitude: Option<f64>,
}
