//! # Error Types
//!
//! This module defines the error types used throughout the capture pipeline.
//!
//! Errors fall in two groups. Record-level errors ([`ValidationError`],
//! [`InterchangeError`], [`CaptureError`]) reject a whole record or call. Field-level
//! problems never fail a decode: they are collected as [`Diagnostic`]s and returned
//! next to the decoded sentence, leaving only the affected attribute absent.

use std::fmt;

use thiserror::Error;

/// The record could not be accepted as an NMEA 0183 sentence.
///
/// Both kinds discard the record; the capture loop reports them and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The record is not framed like a sentence.
    #[error("framing error: {0}")]
    Framing(#[from] FramingError),
    /// The record carries a checksum that does not verify.
    #[error("checksum error: {0}")]
    Checksum(#[from] ChecksumError),
}

/// Errors in the outer structure of a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// The record holds no bytes at all.
    #[error("empty record")]
    Empty,
    /// The record contains non-ASCII bytes.
    ///
    /// NMEA sentences must be ASCII-only for the checksum to be meaningful.
    #[error("record contains non-ASCII bytes")]
    NonAscii,
    /// The record does not begin with `$` or `!`.
    #[error("expected `$` or `!` sentinel, found {found:?}")]
    MissingSentinel {
        /// The first character of the record.
        found: char,
    },
    /// The sentence body has no type tag.
    #[error("sentence has no type tag")]
    MissingTag,
    /// A trailing `\r\n` was required but not present.
    #[error("missing CRLF line ending")]
    MissingLineEnding,
    /// A trailing `\r\n` was present but forbidden.
    #[error("unexpected CRLF line ending")]
    UnexpectedLineEnding,
}

/// Errors in the `*hh` checksum suffix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecksumError {
    /// The checksum of the sentence was incorrect.
    #[error("calculated checksum {computed:02X} does not match {found:02X}")]
    Mismatch {
        /// The checksum calculated from the sentence body
        computed: u8,
        /// The checksum found in the sentence
        found: u8,
    },
    /// The text after `*` is not exactly two hexadecimal digits.
    #[error("malformed checksum {text:?}")]
    Malformed {
        /// The suffix as received.
        text: String,
    },
    /// No checksum was present although one is required.
    #[error("checksum required but missing")]
    Missing,
}

/// A single field could not be converted.
///
/// Returned by the functions in [`conversion`](crate::conversion). The decoder
/// wraps it into a [`FieldFormatError`] that also names the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read {text:?} as {expected}")]
pub struct ConversionError {
    /// The offending field text.
    pub text: String,
    /// What the field should have held.
    pub expected: &'static str,
}

impl ConversionError {
    pub(crate) fn new(text: &str, expected: &'static str) -> Self {
        Self {
            text: text.to_owned(),
            expected,
        }
    }
}

/// A non-empty field held text that does not fit its attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{tag} field {index} ({name}): cannot read {text:?} as {expected}")]
pub struct FieldFormatError {
    /// Type tag of the sentence.
    pub tag: String,
    /// Index of the field within the sentence, the tag being field 0.
    pub index: usize,
    /// Semantic name of the attribute.
    pub name: &'static str,
    /// The offending field text.
    pub text: String,
    /// What the field should have held.
    pub expected: &'static str,
}

/// The inputs of a derived attribute parsed but do not combine into a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{tag} {name}: {reason}")]
pub struct DerivationError {
    /// Type tag of the sentence.
    pub tag: String,
    /// Semantic name of the derived attribute.
    pub name: &'static str,
    /// Why the value could not be formed.
    pub reason: String,
}

/// A problem found while decoding a sentence.
///
/// Diagnostics never abort a decode; the attribute concerned is left absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error(transparent)]
    FieldFormat(#[from] FieldFormatError),
    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

impl Diagnostic {
    /// Name of the attribute the diagnostic concerns.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FieldFormat(error) => error.name,
            Self::Derivation(error) => error.name,
        }
    }
}

/// The ordered list of diagnostics produced by one decode.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, diagnostic: impl Into<Diagnostic>) {
        self.0.push(diagnostic.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Returns the diagnostics concerning the attribute `name`.
    pub fn for_attribute<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.0.iter().filter(move |diagnostic| diagnostic.name() == name)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, diagnostic) in self.0.iter().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Saving or loading the interchange form failed.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// The text is not a well-formed record or list of records.
    ///
    /// This covers missing or unexpected members.
    #[error("malformed interchange text: {0}")]
    Json(#[from] serde_json::Error),
    /// The tag is empty or holds a `,` or `*`.
    #[error("invalid sentence tag {tag:?}")]
    InvalidTag {
        /// The tag as found.
        tag: String,
    },
    /// A raw field holds a `,`, which would split it on the wire.
    #[error("{tag} field {index} contains a field separator")]
    Separator {
        /// Type tag of the offending record.
        tag: String,
        /// Index of the offending field, the tag being field 0.
        index: usize,
    },
    /// A tag or raw field contains a non-ASCII character.
    #[error("{tag} field {index} contains non-ASCII characters")]
    NonAscii {
        /// Type tag of the offending record.
        tag: String,
        /// Index of the offending field, the tag being field 0.
        index: usize,
    },
}

/// Reading from a capture source failed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The talker produced nothing within the read timeout.
    #[error("timed out waiting for the talker")]
    Timeout,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A record could not be taken from the capture loop.
///
/// The loop keeps going after any of these; dropping it is the only way to stop.
#[derive(Debug, Error)]
pub enum CaptureError<E> {
    /// The source reported an error.
    #[error("source error: {0}")]
    Source(E),
    /// The record was rejected by the validator.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
