//! # Sentence Registry
//!
//! The closed set of supported sentence types and the decoder dispatching on the tag.
//!
//! Each supported type is a struct deriving [`DecodeSentence`]; its descriptor is
//! the single source of the fields it reads and the attributes it derives. The
//! registry is a static table built from those descriptors. A tag missing from it
//! decodes to [`SentenceData::Unknown`], which keeps the raw fields and nothing else.
//!
//! | Variant | Tag     | Sentence                                   |
//! |---------|---------|--------------------------------------------|
//! | `RMC`   | `GPRMC` | Recommended Minimum Navigation Information |
//! | `GGA`   | `GPGGA` | Global Positioning System Fix Data         |
//! | `GLL`   | `GPGLL` | Geographic Position - Latitude/Longitude   |
//! | `GSA`   | `GPGSA` | GPS DOP and active satellites              |
//! | `GSV`   | `GPGSV` | Satellites in View                         |
//! | `VTG`   | `GPVTG` | Track made good and Ground speed           |
//! | `ZDA`   | `GPZDA` | Time & Date                                |
//! | `XTE`   | `GPXTE` | Cross-Track Error, Measured                |
//! | `WPL`   | `GPWPL` | Waypoint Location                          |
//! | `RTE`   | `GPRTE` | Routes                                     |

mod gga;
mod gll;
mod gsa;
mod gsv;
mod rmc;
mod rte;
mod vtg;
mod wpl;
mod xte;
mod zda;

pub use gga::GGA;
pub use gll::GLL;
pub use gsa::GSA;
pub use gsv::GSV;
pub use rmc::RMC;
pub use rte::RTE;
pub use vtg::VTG;
pub use wpl::WPL;
pub use xte::XTE;
pub use zda::ZDA;

use nom::{Parser, branch::alt, character::complete::char, combinator::all_consuming};
use serde::Serialize;

use crate::{
    DecodeContext, DecodeSentence, Diagnostics, FieldSequence, FromValue, RawRecord,
    SentenceTypeDescriptor, ValidationError, Value, conversion::optional_item, framing,
};

macro_rules! parsable_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $char:literal => $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Parses the one-character form of the flag.
            pub fn parse(i: &str) -> Option<Self> {
                let result: nom::IResult<&str, Self> = all_consuming(alt(($(
                    char($char).map(|_| Self::$variant),
                )*)))
                .parse(i);

                result.ok().map(|(_, flag)| flag)
            }

            /// The character transmitted for the flag.
            pub const fn as_char(self) -> char {
                match self {
                    $(Self::$variant => $char,)*
                }
            }
        }

        impl FromValue for $name {
            const EXPECTED: &'static str = concat!("a ", stringify!($name), " flag");

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::Text(text) => Self::parse(&text),
                    _ => None,
                }
            }
        }
    };
}

parsable_enum! {
    /// Status Mode Indicator
    pub enum Status {
        /// A - Valid
        'A' => Valid,
        /// V - Invalid
        'V' => Invalid,
    }
}

parsable_enum! {
    /// Quality of the GPS fix
    pub enum Quality {
        /// 0 - Fix not available
        '0' => NoFix,
        /// 1 - GPS fix
        '1' => GPSFix,
        /// 2 - Differential GPS fix
        '2' => DGPSFix,
        /// 3 - PPS fix
        '3' => PPSFix,
        /// 4 - Real Time Kinematic
        '4' => RTK,
        /// 5 - Float RTK
        '5' => FloatRTK,
        /// 6 - estimated (dead reckoning)
        '6' => Estimated,
        /// 7 - Manual input mode
        '7' => Manual,
        /// 8 - Simulation mode
        '8' => Simulation,
    }
}

parsable_enum! {
    /// Selection Mode
    pub enum SelectionMode {
        /// A - Automatic, 2D/3D
        'A' => Automatic,
        /// M - Manual, forced to operate in 2D or 3D
        'M' => Manual,
    }
}

parsable_enum! {
    /// Fix Mode
    pub enum FixMode {
        /// 1 - No fix
        '1' => NoFix,
        /// 2 - 2D Fix
        '2' => Fix2D,
        /// 3 - 3D Fix
        '3' => Fix3D,
    }
}

parsable_enum! {
    /// Direction to steer
    pub enum Steer {
        /// L - Left
        'L' => Left,
        /// R - Right
        'R' => Right,
    }
}

parsable_enum! {
    /// Route Mode
    pub enum RouteMode {
        /// c - Complete route, the current active route
        'c' => Complete,
        /// w - Working route, starting with the destination waypoint
        'w' => Working,
    }
}

/// Satellite information used in [`GSV`] sentences
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Satellite {
    pub prn: u8,
    pub elevation: Option<u8>,
    pub azimuth: Option<u16>,
    pub snr: Option<u8>,
}

/// Reads a group of four integers; the PRN is required.
impl FromValue for Satellite {
    const EXPECTED: &'static str = "a satellite (PRN, elevation, azimuth, SNR)";

    fn from_value(value: Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };
        let [prn, elevation, azimuth, snr]: [Option<Value>; 4] = items.try_into().ok()?;

        Some(Self {
            prn: u8::from_value(prn?)?,
            elevation: optional_item(elevation)?,
            azimuth: optional_item(azimuth)?,
            snr: optional_item(snr)?,
        })
    }

    fn misfit(value: &Value) -> Option<(usize, &'static str)> {
        let Value::List(items) = value else {
            return Some((0, Self::EXPECTED));
        };
        if items.len() != 4 {
            return Some((0, Self::EXPECTED));
        }

        let members: [fn(&Value) -> Option<(usize, &'static str)>; 4] =
            [u8::misfit, u8::misfit, u16::misfit, u8::misfit];
        items
            .iter()
            .zip(members)
            .enumerate()
            .find_map(|(offset, (item, misfit))| match item {
                Some(item) => misfit(item).map(|(_, expected)| (offset, expected)),
                None if offset == 0 => Some((0, "a satellite PRN")),
                None => None,
            })
    }
}

/// One row of the registry.
struct RegistryEntry {
    descriptor: &'static SentenceTypeDescriptor,
    decode: fn(&mut DecodeContext<'_>) -> SentenceData,
}

fn decode_entry<T>(context: &mut DecodeContext<'_>) -> SentenceData
where
    T: DecodeSentence + Into<SentenceData>,
{
    T::decode_with(context).into()
}

macro_rules! sentence_registry {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident
        ),* $(,)?
    ) => {
        /// The typed attributes of a decoded sentence.
        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub enum SentenceData {
            $(
                $(#[$meta])*
                $variant($variant),
            )*
            /// A tag outside the registry; only the raw fields are kept.
            Unknown,
        }

        $(
            impl From<$variant> for SentenceData {
                fn from(sentence: $variant) -> Self {
                    Self::$variant(sentence)
                }
            }
        )*

        impl SentenceData {
            /// The descriptor of the decoded type, [`None`] for [`SentenceData::Unknown`].
            pub fn descriptor(&self) -> Option<&'static SentenceTypeDescriptor> {
                match self {
                    $(Self::$variant(_) => Some(&<$variant as DecodeSentence>::DESCRIPTOR),)*
                    Self::Unknown => None,
                }
            }
        }

        static REGISTRY: &[RegistryEntry] = &[
            $(
                RegistryEntry {
                    descriptor: &<$variant as DecodeSentence>::DESCRIPTOR,
                    decode: decode_entry::<$variant>,
                },
            )*
        ];
    };
}

sentence_registry! {
    /// Recommended Minimum Navigation Information
    RMC,
    /// Global Positioning System Fix Data
    GGA,
    /// Geographic Position - Latitude/Longitude
    GLL,
    /// GPS DOP and active satellites
    GSA,
    /// Satellites in View
    GSV,
    /// Track made good and Ground speed
    VTG,
    /// Time & Date - UTC, day, month, year and local time zone
    ZDA,
    /// Cross-Track Error, Measured
    XTE,
    /// Waypoint Location
    WPL,
    /// Routes
    RTE,
}

/// Looks up the descriptor registered for `tag`. Tags match exactly.
///
/// ```rust
/// use nmea0183_capture::sentences::lookup;
///
/// let descriptor = lookup("GPWPL").unwrap();
/// assert_eq!(descriptor.names().last(), Some("longitude"));
/// assert!(lookup("GPDBT").is_none());
/// assert!(lookup("gpwpl").is_none());
/// ```
pub fn lookup(tag: &str) -> Option<&'static SentenceTypeDescriptor> {
    REGISTRY
        .iter()
        .find(|entry| entry.descriptor.tag == tag)
        .map(|entry| entry.descriptor)
}

/// Every registered descriptor, in registry order.
pub fn descriptors() -> impl Iterator<Item = &'static SentenceTypeDescriptor> {
    REGISTRY.iter().map(|entry| entry.descriptor)
}

/// A decoded sentence: its raw fields and the attributes derived from them.
///
/// Both are fixed at construction; the attributes are a pure function of the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    fields: FieldSequence,
    data: SentenceData,
}

impl Sentence {
    pub fn tag(&self) -> &str {
        self.fields.tag()
    }

    /// The field sequence as received, tag included.
    pub fn fields(&self) -> &FieldSequence {
        &self.fields
    }

    pub fn data(&self) -> &SentenceData {
        &self.data
    }

    pub fn into_parts(self) -> (FieldSequence, SentenceData) {
        (self.fields, self.data)
    }

    pub fn descriptor(&self) -> Option<&'static SentenceTypeDescriptor> {
        self.data.descriptor()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.data, SentenceData::Unknown)
    }

    /// Every attribute of the sentence as a [`Value`], raw fields first.
    ///
    /// An attribute is absent here exactly when it is absent from [`data`](Self::data).
    /// Empty for an unknown sentence.
    pub fn attributes(&self) -> Vec<(&'static str, Option<Value>)> {
        self.descriptor()
            .map(|descriptor| descriptor.values(&self.fields).0)
            .unwrap_or_default()
    }

    /// One attribute by name; [`None`] when absent or not an attribute of this type.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes()
            .into_iter()
            .find(|(attribute, _)| *attribute == name)
            .and_then(|(_, value)| value)
    }
}

/// The result of decoding one field sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub sentence: Sentence,
    /// Fields and derived attributes that failed to convert.
    pub diagnostics: Diagnostics,
}

/// Decodes a field sequence through the registry.
///
/// Never fails: a malformed field only leaves its own attributes absent and is
/// listed in [`Decoded::diagnostics`].
///
/// ```rust
/// use nmea0183_capture::{FieldSequence, SentenceData, decode};
///
/// let decoded = decode(FieldSequence::tokenize("GPWPL,5128.62,N,00027.58,W,EGLL"));
/// let SentenceData::WPL(wpl) = decoded.sentence.data() else {
///     panic!("not a waypoint");
/// };
/// assert!((wpl.latitude.unwrap() - 51.477).abs() < 1e-9);
/// assert!((wpl.longitude.unwrap() + 0.459_666).abs() < 1e-6);
/// assert!(decoded.diagnostics.is_empty());
/// ```
pub fn decode(fields: FieldSequence) -> Decoded {
    let (data, diagnostics) = match REGISTRY
        .iter()
        .find(|entry| entry.descriptor.tag == fields.tag())
    {
        Some(entry) => {
            let mut context = DecodeContext::new(&fields);
            let data = (entry.decode)(&mut context);
            (data, context.finish())
        }
        None => (SentenceData::Unknown, Diagnostics::new()),
    };

    Decoded {
        sentence: Sentence { fields, data },
        diagnostics,
    }
}

/// Validates a raw record with the default [`Validator`](crate::Validator) and decodes it.
pub fn decode_record(record: impl Into<RawRecord>) -> Result<Decoded, ValidationError> {
    framing::validate(record).map(decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        assert_eq!(Status::parse("A"), Some(Status::Valid));
        assert_eq!(Status::parse("V"), Some(Status::Invalid));
        assert_eq!(Status::parse("K"), None);
        assert_eq!(Status::parse("AV"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn test_quality() {
        assert_eq!(Quality::parse("0"), Some(Quality::NoFix));
        assert_eq!(Quality::parse("1"), Some(Quality::GPSFix));
        assert_eq!(Quality::parse("2"), Some(Quality::DGPSFix));
        assert_eq!(Quality::parse("6"), Some(Quality::Estimated));
        assert_eq!(Quality::parse("8"), Some(Quality::Simulation));
        assert_eq!(Quality::parse("9"), None);
    }

    #[test]
    fn test_modes() {
        assert_eq!(SelectionMode::parse("A"), Some(SelectionMode::Automatic));
        assert_eq!(SelectionMode::parse("M"), Some(SelectionMode::Manual));
        assert_eq!(SelectionMode::parse("X"), None);

        assert_eq!(FixMode::parse("1"), Some(FixMode::NoFix));
        assert_eq!(FixMode::parse("2"), Some(FixMode::Fix2D));
        assert_eq!(FixMode::parse("3"), Some(FixMode::Fix3D));
        assert_eq!(FixMode::parse("4"), None);

        assert_eq!(RouteMode::parse("c"), Some(RouteMode::Complete));
        assert_eq!(RouteMode::parse("W"), None);
        assert_eq!(Steer::Right.as_char(), 'R');
    }

    #[test]
    fn test_flag_from_value() {
        assert_eq!(
            Steer::from_value(Value::Text("L".to_owned())),
            Some(Steer::Left)
        );
        assert_eq!(Steer::from_value(Value::Integer(1)), None);
    }

    #[test]
    fn test_satellite_from_value() {
        let group = |items: [Option<i64>; 4]| {
            Value::List(items.into_iter().map(|item| item.map(Value::Integer)).collect())
        };

        assert_eq!(
            Satellite::from_value(group([Some(5), Some(45), None, Some(38)])),
            Some(Satellite {
                prn: 5,
                elevation: Some(45),
                azimuth: None,
                snr: Some(38),
            })
        );
        assert_eq!(Satellite::from_value(group([None, Some(45), None, None])), None);
        assert_eq!(
            Satellite::from_value(group([Some(5), Some(450), None, None])),
            None
        );
        assert_eq!(Satellite::from_value(Value::List(vec![])), None);
    }

    #[test]
    fn test_satellite_misfit() {
        let group = |items: [Option<i64>; 4]| {
            Value::List(items.into_iter().map(|item| item.map(Value::Integer)).collect())
        };

        assert_eq!(Satellite::misfit(&group([Some(5), Some(45), None, Some(38)])), None);
        assert_eq!(
            Satellite::misfit(&group([Some(5), Some(450), None, None])),
            Some((1, u8::EXPECTED))
        );
        assert_eq!(
            Satellite::misfit(&group([Some(5), None, Some(70_000), None])),
            Some((2, u16::EXPECTED))
        );
        assert_eq!(
            Satellite::misfit(&group([None, Some(45), None, None])),
            Some((0, "a satellite PRN"))
        );
        assert_eq!(
            Satellite::misfit(&Value::List(vec![])),
            Some((0, Satellite::EXPECTED))
        );
    }

    #[test]
    fn test_registry() {
        let tags: Vec<_> = descriptors().map(|descriptor| descriptor.tag).collect();
        assert_eq!(
            tags,
            [
                "GPRMC", "GPGGA", "GPGLL", "GPGSA", "GPGSV", "GPVTG", "GPZDA", "GPXTE", "GPWPL",
                "GPRTE"
            ]
        );

        for descriptor in descriptors() {
            assert_eq!(lookup(descriptor.tag), Some(descriptor));
        }
    }

    #[test]
    fn test_descriptor_fields_in_range() {
        for descriptor in descriptors() {
            let mut names: Vec<_> = descriptor.names().collect();
            let count = names.len();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), count, "Duplicate names: {}", descriptor.tag);

            for spec in descriptor.fields {
                assert!(spec.index >= 1, "{} {}", descriptor.tag, spec.name);
            }
        }
    }

    #[test]
    fn test_unknown() {
        let decoded = decode(FieldSequence::tokenize("GPDBT,12.3,f,3.7,M,2.0,F"));
        assert!(decoded.sentence.is_unknown());
        assert_eq!(decoded.sentence.tag(), "GPDBT");
        assert_eq!(decoded.sentence.fields().len(), 7);
        assert_eq!(decoded.sentence.descriptor(), None);
        assert!(decoded.sentence.attributes().is_empty());
        assert!(decoded.diagnostics.is_empty());
    }

    #[test]
    fn test_attribute_view() {
        let decoded = decode(FieldSequence::tokenize("GPWPL,4917.16,N,12310.64,W,003"));
        let sentence = decoded.sentence;

        assert_eq!(
            sentence.attribute("name"),
            Some(Value::Text("003".to_owned()))
        );
        assert!(matches!(
            sentence.attribute("longitude"),
            Some(Value::Float(longitude)) if (longitude + 123.177_333).abs() < 1e-6
        ));
        assert_eq!(sentence.attribute("altitude"), None);
        assert_eq!(sentence.attributes().len(), 7);
    }

    #[test]
    fn test_attribute_view_agrees_with_data() {
        let bodies = [
            "GPRMC,123519,K,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W",
            "GPGSA,A,3,29,300,18,,,,,,,,,,1.5,0.9,1.2",
            "GPGSV,1,1,02,01,40,083,46,02,450,120,41",
            "GPZDA,201530.00,04,07,2002,-01,-128",
            "GPXTE,A,A,0.67,Q,N",
        ];

        for body in bodies {
            let fields = FieldSequence::tokenize(body);
            let decoded = decode(fields.clone());
            let descriptor = decoded.sentence.descriptor().unwrap();

            let (_, diagnostics) = descriptor.values(&fields);
            assert!(!decoded.diagnostics.is_empty(), "{body}");
            assert_eq!(diagnostics, decoded.diagnostics, "{body}");
        }

        let decoded = decode(FieldSequence::tokenize(bodies[0]));
        let SentenceData::RMC(rmc) = decoded.sentence.data() else {
            panic!("Expected RMC");
        };
        assert_eq!(rmc.status, None);
        assert_eq!(decoded.sentence.attribute("status"), None);
        assert_eq!(
            decoded.sentence.attribute("speed_over_ground"),
            Some(Value::Float(22.4))
        );
    }

    #[test]
    fn test_decode_record() {
        let decoded = decode_record("$GPWPL,5128.62,N,00027.58,W,EGLL*59").unwrap();
        assert_eq!(decoded.sentence.tag(), "GPWPL");

        assert!(decode_record("$GPWPL,5128.62,N,00027.58,W,EGLL*00").is_err());
    }
}
