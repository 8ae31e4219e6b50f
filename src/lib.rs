//! # NMEA 0183 Capture
//!
//! This library validates, decodes and replays NMEA 0183 sentences of the form
//! `$TTTTT,D1,D2,...,Dn*CC\r\n` as produced by GPS receivers and other marine talkers.
//!
//! The pipeline runs in three steps:
//! - [`validate`] checks the framing and the optional `*hh` checksum of a raw record
//!   and splits the body into a [`FieldSequence`]
//! - [`decode`] looks the tag up in the [`sentences`] registry and produces a
//!   [`Sentence`]: the raw fields plus typed attributes, with per-field
//!   [`Diagnostics`] instead of failures
//! - [`interchange`] saves decoded sentences as JSON and loads them back through the
//!   same decoder
//!
//! [`capture`] drives the pipeline over any record source, one record at a time.
//!
//! ## Usage
//!
//! ```rust
//! use nmea0183_capture::{SentenceData, decode_record};
//!
//! let decoded = decode_record("$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47")
//!     .unwrap();
//! assert!(decoded.diagnostics.is_empty());
//!
//! let SentenceData::GGA(gga) = decoded.sentence.data() else {
//!     panic!("Expected GGA");
//! };
//! assert_eq!(gga.satellites_in_use, Some(8));
//! assert!((gga.latitude.unwrap() - 48.1173).abs() < 1e-9);
//! ```

extern crate self as nmea0183_capture;

pub mod capture;
pub mod conversion;
mod descriptor;
pub mod error;
mod fields;
mod framing;
pub mod interchange;
pub mod sentences;

pub use capture::{
    Capture, CaptureBuilder, CaptureStats, DEFAULT_BACKGROUND, LineSource,
};
pub use conversion::{Conversion, FromValue, Value};
pub use descriptor::{
    DecodeContext, DecodeSentence, Derivation, DerivedSpec, FieldSpec, Fit,
    SentenceTypeDescriptor, decode_as,
};
pub use error::{
    CaptureError, ChecksumError, ConversionError, DerivationError, Diagnostic, Diagnostics,
    FieldFormatError, FramingError, InterchangeError, SourceError, ValidationError,
};
pub use fields::{FieldSequence, RawRecord};
pub use framing::{
    ChecksumMode, LineEndingMode, ValidatedBody, Validator, ValidatorBuilder, checksum, validate,
};
pub use sentences::{Decoded, Sentence, SentenceData, decode, decode_record};

pub use nmea0183_capture_derive::DecodeSentence;

#[cfg(doctest)]
#[doc = include_str!("../README.md")]
struct README;
