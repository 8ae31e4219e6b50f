//! # Field Conversions
//!
//! Stateless functions turning one raw field into a typed value.
//!
//! Every conversion treats the empty field as absence and returns `Ok(None)`.
//! Non-empty text that does not parse is a [`ConversionError`]; the decoder reports
//! it and leaves only that attribute absent.

use nom::{
    Parser,
    bytes::complete::take,
    character::complete::{i64 as integer_digits, u8 as u8_digits, u16 as u16_digits},
    combinator::all_consuming,
    number::complete::double,
};
use serde::Serialize;

use crate::ConversionError;

mod value;

pub(crate) use value::optional_item;
pub use value::{FromValue, Value};

/// Runs `parser` over the whole of a non-empty field.
fn convert<'a, O, P>(
    field: &'a str,
    expected: &'static str,
    parser: P,
) -> Result<Option<O>, ConversionError>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    if field.is_empty() {
        return Ok(None);
    }

    all_consuming(parser)
        .parse(field)
        .map(|(_, value)| Some(value))
        .map_err(|_| ConversionError::new(field, expected))
}

/// Takes exactly `count` characters and parses all of them with `parser`.
fn digits<'a, O, P>(
    count: usize,
    parser: P,
) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    take(count).and_then(all_consuming(parser))
}

/// Returns the field text unchanged.
pub fn text(field: &str) -> Option<String> {
    (!field.is_empty()).then(|| field.to_owned())
}

/// Parses a signed decimal integer.
///
/// ```rust
/// use nmea0183_capture::conversion::integer;
///
/// assert_eq!(integer("08"), Ok(Some(8)));
/// assert_eq!(integer(""), Ok(None));
/// assert!(integer("8.5").is_err());
/// ```
pub fn integer(field: &str) -> Result<Option<i64>, ConversionError> {
    convert(field, "an integer", integer_digits)
}

/// Parses a decimal number.
pub fn float(field: &str) -> Result<Option<f64>, ConversionError> {
    convert(field, "a number", double)
}

/// Which of the two coordinate axes an [`Angle`] measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Axis {
    /// `DDMM.MMMM`, hemisphere `N` or `S`
    Latitude,
    /// `DDDMM.MMMM`, hemisphere `E` or `W`
    Longitude,
}

impl Axis {
    /// Width of the whole-degrees part.
    pub const fn degree_digits(self) -> usize {
        match self {
            Self::Latitude => 2,
            Self::Longitude => 3,
        }
    }

    /// Sign of a hemisphere letter on this axis, matched case-insensitively.
    pub fn sign(self, hemisphere: &str) -> Option<f64> {
        let (positive, negative) = match self {
            Self::Latitude => ("N", "S"),
            Self::Longitude => ("E", "W"),
        };

        if hemisphere.eq_ignore_ascii_case(positive) {
            Some(1.0)
        } else if hemisphere.eq_ignore_ascii_case(negative) {
            Some(-1.0)
        } else {
            None
        }
    }

    pub fn hemispheres(self) -> &'static str {
        match self {
            Self::Latitude => "N/S",
            Self::Longitude => "E/W",
        }
    }
}

/// An unsigned angle as whole degrees and decimal minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Angle {
    pub degrees: u16,
    pub minutes: f64,
}

impl Angle {
    /// The angle in decimal degrees.
    pub fn to_degrees(self) -> f64 {
        self.degrees as f64 + self.minutes / 60.0
    }
}

/// Parses an angle, `DDMM.MMMM` for latitude or `DDDMM.MMMM` for longitude.
///
/// ```rust
/// use nmea0183_capture::conversion::{Angle, Axis, angle};
///
/// assert_eq!(
///     angle("2543.7024", Axis::Latitude),
///     Ok(Some(Angle { degrees: 25, minutes: 43.7024 }))
/// );
/// assert_eq!(
///     angle("08014.5267", Axis::Longitude),
///     Ok(Some(Angle { degrees: 80, minutes: 14.5267 }))
/// );
/// assert_eq!(angle("", Axis::Latitude), Ok(None));
/// ```
pub fn angle(field: &str, axis: Axis) -> Result<Option<Angle>, ConversionError> {
    let expected = match axis {
        Axis::Latitude => "a latitude (DDMM.MMMM)",
        Axis::Longitude => "a longitude (DDDMM.MMMM)",
    };

    convert(
        field,
        expected,
        (digits(axis.degree_digits(), u16_digits), double)
            .map(|(degrees, minutes)| Angle { degrees, minutes }),
    )
}

pub fn latitude(field: &str) -> Result<Option<Angle>, ConversionError> {
    angle(field, Axis::Latitude)
}

pub fn longitude(field: &str) -> Result<Option<Angle>, ConversionError> {
    angle(field, Axis::Longitude)
}

/// A time of day as transmitted, `HHMMSS[.sss]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtcTime {
    pub hour: u8,
    pub minute: u8,
    pub second: f64,
}

impl UtcTime {
    /// Converts to a [`time::Time`], truncating below the millisecond.
    pub fn to_time(self) -> Result<time::Time, time::error::ComponentRange> {
        let second = self.second.trunc();
        let milliseconds = (self.second.fract() * 1000.0) as u16;

        time::Time::from_hms_milli(self.hour, self.minute, second as u8, milliseconds)
    }
}

/// Parses `HHMMSS[.sss]`.
///
/// ```rust
/// use nmea0183_capture::conversion::{UtcTime, utc_time};
///
/// assert_eq!(
///     utc_time("123456.000"),
///     Ok(Some(UtcTime { hour: 12, minute: 34, second: 56.0 }))
/// );
/// ```
pub fn utc_time(field: &str) -> Result<Option<UtcTime>, ConversionError> {
    convert(
        field,
        "a time (HHMMSS.sss)",
        (digits(2, u8_digits), digits(2, u8_digits), double).map(|(hour, minute, second)| {
            UtcTime {
                hour,
                minute,
                second,
            }
        }),
    )
}

/// A calendar date as transmitted, with a two-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UtcDate {
    pub month: u8,
    pub day: u8,
    pub year: u8,
}

impl UtcDate {
    /// The full year; `83..=99` are taken as the 1900s and everything else as the 2000s.
    pub fn full_year(self) -> i32 {
        match self.year {
            83..=99 => 1900 + self.year as i32,
            _ => 2000 + self.year as i32,
        }
    }

    pub fn to_date(self) -> Result<time::Date, time::error::ComponentRange> {
        let month = time::Month::try_from(self.month)?;
        time::Date::from_calendar_date(self.full_year(), month, self.day)
    }
}

/// Parses a date in `MMDDYY` order.
///
/// ```rust
/// use nmea0183_capture::conversion::{UtcDate, utc_date};
///
/// assert_eq!(
///     utc_date("091056"),
///     Ok(Some(UtcDate { month: 9, day: 10, year: 56 }))
/// );
/// ```
pub fn utc_date(field: &str) -> Result<Option<UtcDate>, ConversionError> {
    convert(
        field,
        "a date (MMDDYY)",
        (digits(2, u8_digits), digits(2, u8_digits), u8_digits)
            .map(|(month, day, year)| UtcDate { month, day, year }),
    )
}

/// Parses a fix date in `DDMMYY` order, the order `RMC` transmits.
///
/// ```rust
/// use nmea0183_capture::conversion::{UtcDate, fix_date};
///
/// assert_eq!(
///     fix_date("230394"),
///     Ok(Some(UtcDate { month: 3, day: 23, year: 94 }))
/// );
/// ```
pub fn fix_date(field: &str) -> Result<Option<UtcDate>, ConversionError> {
    convert(
        field,
        "a date (DDMMYY)",
        (digits(2, u8_digits), digits(2, u8_digits), u8_digits)
            .map(|(day, month, year)| UtcDate { month, day, year }),
    )
}

/// Combines an angle and its hemisphere letter into signed decimal degrees.
///
/// Absence of either input yields absence. `S` and `W` are negative.
///
/// ```rust
/// use nmea0183_capture::conversion::{Angle, Axis, signed_coordinate};
///
/// let angle = Angle { degrees: 51, minutes: 28.62 };
/// let latitude = signed_coordinate(Some(angle), "N", Axis::Latitude).unwrap().unwrap();
/// assert!((latitude - 51.477).abs() < 1e-9);
///
/// assert_eq!(signed_coordinate(None, "N", Axis::Latitude), Ok(None));
/// assert_eq!(signed_coordinate(Some(angle), "", Axis::Latitude), Ok(None));
/// assert!(signed_coordinate(Some(angle), "E", Axis::Latitude).is_err());
/// ```
pub fn signed_coordinate(
    angle: Option<Angle>,
    hemisphere: &str,
    axis: Axis,
) -> Result<Option<f64>, ConversionError> {
    let Some(angle) = angle else {
        return Ok(None);
    };
    if hemisphere.is_empty() {
        return Ok(None);
    }

    let sign = axis
        .sign(hemisphere)
        .ok_or_else(|| ConversionError::new(hemisphere, axis.hemispheres()))?;

    Ok(Some(sign * angle.to_degrees()))
}

/// The conversion applied to one raw field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conversion {
    #[default]
    Text,
    Integer,
    Float,
    Latitude,
    Longitude,
    UtcTime,
    /// `MMDDYY`
    UtcDate,
    /// `DDMMYY`
    FixDate,
}

impl Conversion {
    /// Converts a field, wrapping the result in a [`Value`].
    pub fn apply(self, field: &str) -> Result<Option<Value>, ConversionError> {
        Ok(match self {
            Self::Text => text(field).map(Value::Text),
            Self::Integer => integer(field)?.map(Value::Integer),
            Self::Float => float(field)?.map(Value::Float),
            Self::Latitude => latitude(field)?.map(Value::Angle),
            Self::Longitude => longitude(field)?.map(Value::Angle),
            Self::UtcTime => utc_time(field)?.map(Value::Time),
            Self::UtcDate => utc_date(field)?.map(Value::Date),
            Self::FixDate => fix_date(field)?.map(Value::Date),
        })
    }

    pub const fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Latitude => Self::Latitude,
            Axis::Longitude => Self::Longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text() {
        assert_eq!(text("EGLL"), Some("EGLL".to_owned()));
        assert_eq!(text(""), None);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(integer("123"), Ok(Some(123)));
        assert_eq!(integer("-3"), Ok(Some(-3)));
        assert_eq!(integer(""), Ok(None));
        assert_eq!(float("123.45"), Ok(Some(123.45)));
        assert_eq!(float("005.5"), Ok(Some(5.5)));
        assert_eq!(float(""), Ok(None));

        let error = integer("12a").unwrap_err();
        assert_eq!(error.text, "12a");
        assert!(float("1.2.3").is_err());
        assert!(float("abc").is_err());
    }

    #[test]
    fn test_angle() {
        assert_eq!(
            latitude("2543.7024"),
            Ok(Some(Angle {
                degrees: 25,
                minutes: 43.7024
            }))
        );
        assert_eq!(
            longitude("08014.5267"),
            Ok(Some(Angle {
                degrees: 80,
                minutes: 14.5267
            }))
        );
        assert_eq!(latitude(""), Ok(None));

        let cases = ["2", "N", "2A43.7", "25x", "25"];
        for &input in &cases {
            let result = latitude(input);
            assert!(result.is_err(), "Failed: {input:?}\n\t{result:?}");
        }
    }

    #[test]
    fn test_utc_time() {
        assert_eq!(
            utc_time("123456.000"),
            Ok(Some(UtcTime {
                hour: 12,
                minute: 34,
                second: 56.0
            }))
        );
        assert_eq!(
            utc_time("162254.25"),
            Ok(Some(UtcTime {
                hour: 16,
                minute: 22,
                second: 54.25
            }))
        );
        assert_eq!(utc_time(""), Ok(None));
        assert!(utc_time("1234").is_err());
        assert!(utc_time("12h456").is_err());
    }

    #[test]
    fn test_dates() {
        assert_eq!(
            utc_date("091056"),
            Ok(Some(UtcDate {
                month: 9,
                day: 10,
                year: 56
            }))
        );
        assert_eq!(
            fix_date("110706"),
            Ok(Some(UtcDate {
                month: 7,
                day: 11,
                year: 6
            }))
        );
        assert_eq!(utc_date(""), Ok(None));
        assert!(utc_date("0910").is_err());
        assert!(fix_date("1107xx").is_err());
    }

    #[test]
    fn test_full_year() {
        let date = |year| UtcDate {
            month: 1,
            day: 1,
            year,
        };
        assert_eq!(date(94).full_year(), 1994);
        assert_eq!(date(83).full_year(), 1983);
        assert_eq!(date(6).full_year(), 2006);
        assert_eq!(date(82).full_year(), 2082);
    }

    #[test]
    fn test_to_time() {
        let fix = UtcTime {
            hour: 16,
            minute: 22,
            second: 54.5,
        };
        assert_eq!(fix.to_time(), time::Time::from_hms_milli(16, 22, 54, 500));

        let fix = UtcTime {
            hour: 25,
            minute: 0,
            second: 0.0,
        };
        assert!(fix.to_time().is_err());
    }

    #[test]
    fn test_signed_coordinate() {
        let angle = Angle {
            degrees: 0,
            minutes: 27.58,
        };
        let longitude = signed_coordinate(Some(angle), "W", Axis::Longitude)
            .unwrap()
            .unwrap();
        assert!((longitude + 0.459_666_666).abs() < 1e-6);

        let longitude = signed_coordinate(Some(angle), "e", Axis::Longitude)
            .unwrap()
            .unwrap();
        assert!(longitude > 0.0);

        let error = signed_coordinate(Some(angle), "N", Axis::Longitude).unwrap_err();
        assert_eq!(error.expected, "E/W");
    }

    #[test]
    fn test_conversion_apply() {
        assert_eq!(
            Conversion::Integer.apply("08"),
            Ok(Some(Value::Integer(8)))
        );
        assert_eq!(Conversion::Float.apply(""), Ok(None));
        assert_eq!(
            Conversion::Text.apply("A"),
            Ok(Some(Value::Text("A".to_owned())))
        );
        assert!(Conversion::UtcTime.apply("noon").is_err());
    }
}
