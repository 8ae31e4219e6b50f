use serde::Serialize;

use crate::{
    Conversion, DecodeSentence,
    sentences::{Status, Steer},
};

/// XTE - Cross-Track Error, Measured
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_xte_cross_track_error_measured>
///
/// ```text
///         1 2 3   4 5
///         | | |   | |
///  $--XTE,A,A,x.x,a,N*hh<CR><LF>
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPXTE")]
pub struct XTE {
    /// General warning flag, V when the data is not usable
    #[nmea(index(1))]
    pub status: Option<Status>,
    /// Cycle lock warning flag, unused outside Loran-C
    #[nmea(index(2))]
    pub cycle_lock: Option<Status>,
    /// Cross-track error distance
    #[nmea(index(3), convert(Conversion::Float))]
    pub distance: Option<f64>,
    /// Direction to steer to correct the error
    #[nmea(index(4))]
    pub steer: Option<Steer>,
    /// Distance units, N for nautical miles
    #[nmea(index(5))]
    pub units: Option<String>,
}
