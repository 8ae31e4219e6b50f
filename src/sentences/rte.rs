use serde::Serialize;

use crate::{Conversion, DecodeSentence, Derivation, sentences::RouteMode};

/// RTE - Routes
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_rte_routes>
///
/// ```text
///         1   2   3 4    5           x    n
///         |   |   | |    |           |    |
///  $--RTE,x.x,x.x,a,c--c,c--c, ..... c--c*hh<CR><LF>
/// ```
///
/// A long route spans several sentences; every field from 5 on names a waypoint.
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPRTE")]
pub struct RTE {
    /// Total number of sentences carrying the route
    #[nmea(index(1), convert(Conversion::Integer))]
    pub total_sentences: Option<u8>,
    /// Number of this sentence within the route
    #[nmea(index(2), convert(Conversion::Integer))]
    pub sentence_number: Option<u8>,
    #[nmea(index(3))]
    pub mode: Option<RouteMode>,
    /// Name or number of the route
    #[nmea(index(4))]
    pub route_id: Option<String>,
    /// Waypoint identifiers in route order
    #[nmea(derive(Derivation::rest(5, Conversion::Text)))]
    pub waypoints: Vec<String>,
}
