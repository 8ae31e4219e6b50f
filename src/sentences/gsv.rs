use serde::Serialize;

use crate::{Conversion, DecodeSentence, Derivation, sentences::Satellite};

/// GSV - Satellites in View
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_gsv_satellites_in_view>
///
/// ```text
///         1 2 3 4 5 6 7     n
///         | | | | | | |     |
///  $--GSV,x,x,x,x,x,x,x,...,x*hh<CR><LF>
/// ```
///
/// Up to four satellites follow field 3, four fields each: PRN, elevation,
/// azimuth and SNR.
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPGSV")]
pub struct GSV {
    /// Total number of GSV sentences to be transmitted in this group
    #[nmea(index(1), convert(Conversion::Integer))]
    pub total_messages: Option<u8>,
    /// Sentence number of this GSV message within current group
    #[nmea(index(2), convert(Conversion::Integer))]
    pub message_number: Option<u8>,
    /// Total number of satellites in view
    #[nmea(index(3), convert(Conversion::Integer))]
    pub satellites_in_view: Option<u8>,
    /// Satellite information
    #[nmea(derive(Derivation::groups(4, 4, 4, Conversion::Integer)))]
    pub satellites: heapless::Vec<Satellite, 4>,
}
