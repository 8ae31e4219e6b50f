//! # Interchange Codec
//!
//! JSON form of decoded sentences. A sentence is written as its tag and its raw
//! data fields, nothing else:
//!
//! ```json
//! {"tag": "GPWPL", "fields": ["5128.62", "N", "00027.58", "W", "EGLL"]}
//! ```
//!
//! A capture is a list of such objects in arrival order. Reading one back runs the
//! decoder again, so the typed attributes always come from the current rules.
//!
//! ```rust
//! use nmea0183_capture::{decode_record, interchange};
//!
//! let decoded = decode_record("$GPWPL,5128.62,N,00027.58,W,EGLL*59").unwrap();
//!
//! let text = interchange::to_string(&decoded.sentence).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"tag":"GPWPL","fields":["5128.62","N","00027.58","W","EGLL"]}"#
//! );
//!
//! let replayed = interchange::from_str(&text).unwrap();
//! assert_eq!(replayed, decoded);
//! ```

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::{Decoded, FieldSequence, InterchangeError, Sentence, decode};

/// The serialized form of one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub tag: String,
    /// Raw data fields, the tag excluded.
    pub fields: Vec<String>,
}

impl Record {
    /// Takes the tag and raw fields of `sentence`.
    ///
    /// Fails when the tag or a field could not be written back on the wire as is.
    pub fn from_sentence(sentence: &Sentence) -> Result<Self, InterchangeError> {
        let fields = sentence.fields();
        check_fields(fields.tag(), fields.iter())?;

        Ok(Self {
            tag: fields.tag().to_owned(),
            fields: fields.data().to_vec(),
        })
    }

    /// Rebuilds the field sequence.
    ///
    /// Fails on an empty tag, a tag holding `,` or `*`, a field holding `,`, or a
    /// character outside ASCII.
    pub fn into_fields(self) -> Result<FieldSequence, InterchangeError> {
        let fields = std::iter::once(&self.tag).chain(&self.fields);
        check_fields(&self.tag, fields.map(String::as_str))?;

        Ok(FieldSequence::from_parts(self.tag, self.fields))
    }

    /// Rebuilds the field sequence and decodes it.
    pub fn decode(self) -> Result<Decoded, InterchangeError> {
        self.into_fields().map(decode)
    }
}

/// `fields` starts with the tag, field 0.
fn check_fields<'a>(
    tag: &str,
    fields: impl IntoIterator<Item = &'a str>,
) -> Result<(), InterchangeError> {
    if tag.is_empty() || tag.contains([',', '*']) {
        return Err(InterchangeError::InvalidTag {
            tag: tag.to_owned(),
        });
    }

    for (index, field) in fields.into_iter().enumerate() {
        if !field.is_ascii() {
            return Err(InterchangeError::NonAscii {
                tag: tag.to_owned(),
                index,
            });
        }
        if field.contains(',') {
            return Err(InterchangeError::Separator {
                tag: tag.to_owned(),
                index,
            });
        }
    }

    Ok(())
}

fn records<'a>(
    sentences: impl IntoIterator<Item = &'a Sentence>,
) -> Result<Vec<Record>, InterchangeError> {
    sentences.into_iter().map(Record::from_sentence).collect()
}

/// Serializes one sentence.
pub fn to_string(sentence: &Sentence) -> Result<String, InterchangeError> {
    Ok(serde_json::to_string(&Record::from_sentence(sentence)?)?)
}

/// Serializes sentences as a list, in iteration order.
pub fn to_string_all<'a>(
    sentences: impl IntoIterator<Item = &'a Sentence>,
) -> Result<String, InterchangeError> {
    Ok(serde_json::to_string(&records(sentences)?)?)
}

/// Serializes sentences as an indented list, in iteration order.
pub fn to_string_pretty_all<'a>(
    sentences: impl IntoIterator<Item = &'a Sentence>,
) -> Result<String, InterchangeError> {
    Ok(serde_json::to_string_pretty(&records(sentences)?)?)
}

/// Writes sentences as a list.
///
/// Nothing is written when a sentence cannot be serialized.
pub fn to_writer_all<'a, W: Write>(
    writer: W,
    sentences: impl IntoIterator<Item = &'a Sentence>,
) -> Result<(), InterchangeError> {
    Ok(serde_json::to_writer(writer, &records(sentences)?)?)
}

/// Reads one sentence and decodes it.
pub fn from_str(text: &str) -> Result<Decoded, InterchangeError> {
    serde_json::from_str::<Record>(text)?.decode()
}

/// Reads a list of sentences and decodes them in order.
///
/// The whole load fails on the first malformed record.
pub fn from_str_all(text: &str) -> Result<Vec<Decoded>, InterchangeError> {
    serde_json::from_str::<Vec<Record>>(text)?
        .into_iter()
        .map(Record::decode)
        .collect()
}

/// Reads a list of sentences from `reader` and decodes them in order.
pub fn from_reader_all<R: Read>(reader: R) -> Result<Vec<Decoded>, InterchangeError> {
    serde_json::from_reader::<_, Vec<Record>>(reader)?
        .into_iter()
        .map(Record::decode)
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    One(Record),
    Many(Vec<Record>),
}

/// What [`load`] found.
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded {
    One(Decoded),
    Many(Vec<Decoded>),
}

impl Loaded {
    /// The decoded sentences in order, however many there were.
    pub fn into_vec(self) -> Vec<Decoded> {
        match self {
            Self::One(decoded) => vec![decoded],
            Self::Many(decoded) => decoded,
        }
    }
}

/// Reads either a single sentence or a list of them.
pub fn load(text: &str) -> Result<Loaded, InterchangeError> {
    match serde_json::from_str::<Payload>(text)? {
        Payload::One(record) => record.decode().map(Loaded::One),
        Payload::Many(records) => records
            .into_iter()
            .map(Record::decode)
            .collect::<Result<_, _>>()
            .map(Loaded::Many),
    }
}
