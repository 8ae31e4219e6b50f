//! # Sentence Framing
//!
//! This module validates the outer structure of a record: `$HHH,D1,D2,...,Dn*CC\r\n`.
//!
//! The validator is configurable to handle variations in:
//! - Checksum requirements (optional or required)
//! - Line ending requirements (stripped if present, required or forbidden)
//!
//! A record that passes is split into a [`FieldSequence`]; one that fails is reported
//! as a [`ValidationError`] and left for the caller to skip or abort on.

use nom::{
    Parser,
    bytes::complete::{tag, take_until, take_while_m_n},
    character::complete::one_of,
    combinator::all_consuming,
    number::complete::hex_u32,
    sequence::terminated,
};

use crate::{ChecksumError, FieldSequence, FramingError, RawRecord, ValidationError};

/// Defines how the validator should handle sentence checksums.
///
/// A sentence can end with a checksum in the format `*CC` where CC is a two-digit
/// hexadecimal value representing the XOR of all bytes between the sentinel and the
/// `*` delimiter.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum ChecksumMode {
    /// Checksum is optional but will be verified if present.
    ///
    /// - If no checksum is present (`*CC` missing), the record is accepted unverified
    /// - If a checksum is present, it must be valid or the record is rejected
    #[default]
    Optional,

    /// Checksum is required and must be present.
    ///
    /// Use this mode when data integrity is critical.
    Required,
}

/// Defines how the validator should handle a trailing CRLF.
///
/// Serial talkers end every sentence with `\r\n`, but line readers usually strip it.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum LineEndingMode {
    /// Any trailing `\r` and `\n` characters are stripped.
    #[default]
    Optional,

    /// CRLF line ending is required and must be present.
    Required,

    /// CRLF line ending is forbidden and must not be present.
    Forbidden,
}

/// Builds a configured [`Validator`].
///
/// # Examples
///
/// ```rust
/// use nmea0183_capture::{ChecksumMode, LineEndingMode, ValidatorBuilder};
///
/// // Strict: checksum and CRLF both required
/// let strict = ValidatorBuilder::new()
///     .checksum_mode(ChecksumMode::Required)
///     .line_ending_mode(LineEndingMode::Required)
///     .build();
/// assert!(strict.validate("$GPXTE,A,A,0.67,L,N*6F\r\n").is_ok());
/// assert!(strict.validate("$GPXTE,A,A,0.67,L,N*6F").is_err()); // (missing CRLF)
/// assert!(strict.validate("$GPXTE,A,A,0.67,L,N\r\n").is_err()); // (missing checksum)
///
/// // Lenient: checksum optional, CRLF stripped when present
/// let lenient = ValidatorBuilder::new().build();
/// assert!(lenient.validate("$GPXTE,A,A,0.67,L,N*6F\r\n").is_ok());
/// assert!(lenient.validate("$GPXTE,A,A,0.67,L,N").is_ok());
/// assert!(lenient.validate("$GPXTE,A,A,0.67,L,N*99").is_err()); // (invalid checksum)
/// ```
#[must_use]
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidatorBuilder {
    /// Checksum mode for the validator.
    checksum_mode: ChecksumMode,

    /// Line ending mode for the validator.
    line_ending_mode: LineEndingMode,
}

impl ValidatorBuilder {
    /// Creates a new builder with default settings.
    ///
    /// The default settings are:
    /// - Checksum mode: [`ChecksumMode::Optional`]
    /// - Line ending mode: [`LineEndingMode::Optional`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the checksum mode for the validator.
    pub fn checksum_mode(mut self, mode: ChecksumMode) -> Self {
        self.checksum_mode = mode;
        self
    }

    /// Sets the line ending mode for the validator.
    pub fn line_ending_mode(mut self, mode: LineEndingMode) -> Self {
        self.line_ending_mode = mode;
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            checksum_mode: self.checksum_mode,
            line_ending_mode: self.line_ending_mode,
        }
    }
}

/// A sentence body with sentinel, checksum and line ending removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedBody<'a> {
    /// The text between the sentinel and the `*` delimiter.
    pub content: &'a str,
    /// The sentinel, `$` or `!`.
    pub sentinel: char,
    /// The verified checksum, [`None`] if the record carried none.
    pub checksum: Option<u8>,
}

impl ValidatedBody<'_> {
    pub fn tokenize(&self) -> FieldSequence {
        FieldSequence::tokenize(self.content)
    }
}

/// Checks framing and checksum of raw records.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Validator {
    checksum_mode: ChecksumMode,
    line_ending_mode: LineEndingMode,
}

impl Validator {
    pub fn checksum_mode(&self) -> ChecksumMode {
        self.checksum_mode
    }

    pub fn line_ending_mode(&self) -> LineEndingMode {
        self.line_ending_mode
    }

    /// Validates a record and splits it into fields.
    pub fn validate(&self, record: impl Into<RawRecord>) -> Result<FieldSequence, ValidationError> {
        let record = record.into();
        self.validate_body(&record).map(|body| body.tokenize())
    }

    /// Validates a record without splitting it.
    ///
    /// The record must:
    /// * be ASCII-only
    /// * end in a line ending as the [`LineEndingMode`] demands
    /// * start with `$` or `!`
    /// * carry a checksum as the [`ChecksumMode`] demands; the checksum follows the
    ///   last `*` and must equal the XOR of every byte before it
    /// * have a non-empty type tag
    pub fn validate_body<'a>(
        &self,
        record: &'a RawRecord,
    ) -> Result<ValidatedBody<'a>, ValidationError> {
        let bytes = record.as_bytes();
        if bytes.is_empty() {
            return Err(FramingError::Empty.into());
        }
        if !bytes.is_ascii() {
            return Err(FramingError::NonAscii.into());
        }
        let text = std::str::from_utf8(bytes).map_err(|_| FramingError::NonAscii)?;

        let text = line_ending(self.line_ending_mode, text)?;
        let (remainder, sentinel) = sentinel(text)?;

        let (content, checksum_text) = match remainder.rsplit_once('*') {
            Some((content, suffix)) if !suffix.is_empty() => (content, Some(suffix)),
            Some((content, _)) => (content, None),
            None => (remainder, None),
        };

        let checksum = match checksum_text {
            Some(text) => {
                let found = checksum_field(text)?;
                let computed = checksum(content.as_bytes());
                if computed != found {
                    return Err(ChecksumError::Mismatch { computed, found }.into());
                }
                Some(found)
            }
            None if self.checksum_mode == ChecksumMode::Required => {
                return Err(ChecksumError::Missing.into());
            }
            None => None,
        };

        if content.split(',').next().is_none_or(str::is_empty) {
            return Err(FramingError::MissingTag.into());
        }

        Ok(ValidatedBody {
            content,
            sentinel,
            checksum,
        })
    }
}

/// Validates a record with the default [`Validator`].
///
/// ```rust
/// use nmea0183_capture::{ValidationError, validate};
///
/// let fields = validate("$GPGLL,2542.9243,N,08013.6310,W,162823.000,A*29").unwrap();
/// assert_eq!(fields.tag(), "GPGLL");
/// assert_eq!(fields.len(), 7);
///
/// let error = validate("$GPGLL,2542.9243,N,08013.6310,W,162823.000,A*00").unwrap_err();
/// assert!(matches!(error, ValidationError::Checksum(_)));
/// ```
pub fn validate(record: impl Into<RawRecord>) -> Result<FieldSequence, ValidationError> {
    Validator::default().validate(record)
}

/// Strips or checks the trailing line ending.
fn line_ending(mode: LineEndingMode, i: &str) -> Result<&str, FramingError> {
    let terminated: nom::IResult<&str, &str> =
        terminated(take_until("\r\n"), all_consuming(tag("\r\n"))).parse(i);

    match (mode, terminated) {
        (LineEndingMode::Optional, _) => Ok(i.trim_end_matches(['\r', '\n'])),
        (LineEndingMode::Required, Ok((_, data))) => Ok(data),
        (LineEndingMode::Required, Err(_)) => Err(FramingError::MissingLineEnding),
        (LineEndingMode::Forbidden, Ok(_)) => Err(FramingError::UnexpectedLineEnding),
        (LineEndingMode::Forbidden, Err(_)) => Ok(i),
    }
}

fn sentinel(i: &str) -> Result<(&str, char), FramingError> {
    let result: nom::IResult<&str, char> = one_of("$!").parse(i);
    result.map_err(|_| match i.chars().next() {
        Some(found) => FramingError::MissingSentinel { found },
        None => FramingError::Empty,
    })
}

/// Parses the two hexadecimal digits after `*`.
fn checksum_field(i: &str) -> Result<u8, ChecksumError> {
    let result: nom::IResult<&str, u32> =
        all_consuming(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()))
            .and_then(hex_u32)
            .parse(i);

    result
        .map(|(_, cc)| cc as u8)
        .map_err(|_| ChecksumError::Malformed { text: i.to_owned() })
}

/// Calculates the NMEA 0183 checksum of a sentence body.
///
/// The checksum is the XOR of every byte between the `$` or `!` sentinel and the `*`
/// delimiter, both excluded.
///
/// ```rust
/// use nmea0183_capture::checksum;
///
/// assert_eq!(checksum(b"GPGLL,2542.9243,N,08013.6310,W,162823.000,A"), 0x29);
/// ```
pub fn checksum(body: &[u8]) -> u8 {
    body.iter()
        .fold(0u8, |accumulated_xor, &byte| accumulated_xor ^ byte)
}
