//! # Raw Records and Field Sequences
//!
//! A [`RawRecord`] is one line as it came from the talker. Once validated, its body
//! is split on `,` into a [`FieldSequence`], the verbatim text every decoded
//! [`Sentence`](crate::Sentence) keeps.

use std::fmt;

use crate::framing::checksum;

/// One record exactly as received, sentinel included.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct RawRecord(Vec<u8>);

impl RawRecord {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for RawRecord {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for RawRecord {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for RawRecord {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&[u8]> for RawRecord {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<Vec<u8>> for RawRecord {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

/// The ordered, 0-indexed raw fields of a sentence body.
///
/// Field 0 is the type tag. Fields are never renumbered: an empty field and an
/// index past the end both read as the empty string, which every conversion treats
/// as absence.
///
/// ```rust
/// use nmea0183_capture::FieldSequence;
///
/// let fields = FieldSequence::tokenize("GPWPL,5128.62,N,00027.58,W,EGLL");
/// assert_eq!(fields.tag(), "GPWPL");
/// assert_eq!(fields.get(5), "EGLL");
/// assert_eq!(fields.get(17), "");
/// assert_eq!(fields.to_string(), "$GPWPL,5128.62,N,00027.58,W,EGLL*59");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldSequence {
    fields: Vec<String>,
}

impl FieldSequence {
    /// Splits a validated body on `,`.
    pub fn tokenize(body: &str) -> Self {
        Self {
            fields: body.split(',').map(str::to_owned).collect(),
        }
    }

    /// Rebuilds a sequence from a tag and its data fields.
    pub fn from_parts<I, S>(tag: impl Into<String>, data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = vec![tag.into()];
        fields.extend(data.into_iter().map(Into::into));
        Self { fields }
    }

    pub fn tag(&self) -> &str {
        self.get(0)
    }

    /// Returns field `index`, or `""` when the sentence is shorter.
    pub fn get(&self, index: usize) -> &str {
        self.fields.get(index).map_or("", String::as_str)
    }

    /// The fields after the tag.
    pub fn data(&self) -> &[String] {
        self.fields.get(1..).unwrap_or_default()
    }

    /// Number of fields, the tag included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// The body as it is covered by the checksum.
    pub fn body(&self) -> String {
        self.fields.join(",")
    }

    /// XOR checksum of [`body`](Self::body).
    pub fn checksum(&self) -> u8 {
        checksum(self.body().as_bytes())
    }
}

/// Writes the wire form `$body*hh`.
impl fmt::Display for FieldSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.body();
        write!(f, "${body}*{:02X}", checksum(body.as_bytes()))
    }
}
