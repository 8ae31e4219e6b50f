//! # Capture
//!
//! Adapters between a record source and the decoder.
//!
//! A source is any iterator of `Result<record, error>`. [`LineSource`] turns a
//! [`BufRead`] (a serial port, a file, a socket) into one. [`Capture`] pulls records
//! one at a time, validates and decodes each before asking for the next, and keeps
//! going after any failure; the caller stops by dropping it.
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use nmea0183_capture::{CaptureBuilder, DEFAULT_BACKGROUND, LineSource};
//!
//! let input = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n\
//!              \r\n\
//!              $GPWPL,5128.62,N,00027.58,W,EGLL*59\r\n";
//!
//! let mut capture = CaptureBuilder::new(LineSource::new(Cursor::new(input)))
//!     .background(DEFAULT_BACKGROUND.iter().copied())
//!     .build();
//!
//! let decoded = capture.next().unwrap().unwrap();
//! assert_eq!(decoded.sentence.tag(), "GPWPL");
//! assert!(capture.next().is_none());
//!
//! let stats = capture.stats();
//! assert_eq!((stats.records, stats.retries, stats.ignored, stats.captured), (2, 1, 1, 1));
//! ```

use std::{
    collections::BTreeMap,
    io::{BufRead, ErrorKind},
};

use crate::{CaptureError, Decoded, RawRecord, SourceError, Validator, decode};

/// Tags of the periodic sentences a talker repeats every cycle.
pub const DEFAULT_BACKGROUND: &[&str] = &[
    "GPRMC", "GPGGA", "GPGLL", "GPGSA", "GPGSV", "GPVTG", "GPZDA", "GPXTE",
];

/// Reads newline-terminated records from a [`BufRead`].
///
/// Line endings are stripped. A read that times out yields [`SourceError::Timeout`]
/// and the next call reads again; end of input ends the iteration.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<RawRecord, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(line.last(), Some(b'\r' | b'\n')) {
                    line.pop();
                }
                Some(Ok(RawRecord::new(line)))
            }
            Err(error) if matches!(error.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => {
                Some(Err(SourceError::Timeout))
            }
            Err(error) => Some(Err(error.into())),
        }
    }
}

/// Counters kept by a [`Capture`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CaptureStats {
    /// Non-empty records taken from the source.
    pub records: usize,
    /// Empty records, read again.
    pub retries: usize,
    /// Errors reported by the source.
    pub source_errors: usize,
    /// Records failing framing or checksum validation.
    pub rejected: usize,
    /// Valid records with a background tag.
    pub ignored: usize,
    /// Records decoded and yielded.
    pub captured: usize,
    /// Valid records per tag, background included.
    pub tags: BTreeMap<String, usize>,
}

/// Builds a [`Capture`] over a record source.
#[must_use]
#[derive(Debug)]
pub struct CaptureBuilder<I> {
    source: I,
    validator: Validator,
    background: Vec<String>,
}

impl<I> CaptureBuilder<I> {
    /// A capture with the default [`Validator`] and no background filter.
    pub fn new(source: I) -> Self {
        Self {
            source,
            validator: Validator::default(),
            background: Vec::new(),
        }
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Tags that are validated and counted but not decoded or yielded.
    pub fn background<T: Into<String>>(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.background = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Capture<I> {
        Capture {
            source: self.source,
            validator: self.validator,
            background: self.background,
            stats: CaptureStats::default(),
        }
    }
}

/// Decodes records from a source, strictly in arrival order.
///
/// Yields one item per non-empty, non-background record, and one per source error.
#[derive(Debug)]
pub struct Capture<I> {
    source: I,
    validator: Validator,
    background: Vec<String>,
    stats: CaptureStats,
}

impl<I> Capture<I> {
    pub fn stats(&self) -> &CaptureStats {
        &self.stats
    }

    pub fn into_stats(self) -> CaptureStats {
        self.stats
    }

    fn is_background(&self, tag: &str) -> bool {
        self.background.iter().any(|background| background == tag)
    }
}

impl<I, R, E> Iterator for Capture<I>
where
    I: Iterator<Item = Result<R, E>>,
    R: Into<RawRecord>,
{
    type Item = Result<Decoded, CaptureError<E>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record: RawRecord = match self.source.next()? {
                Ok(record) => record.into(),
                Err(error) => {
                    self.stats.source_errors += 1;
                    return Some(Err(CaptureError::Source(error)));
                }
            };

            if record.is_empty() {
                self.stats.retries += 1;
                continue;
            }
            self.stats.records += 1;

            let fields = match self.validator.validate(record) {
                Ok(fields) => fields,
                Err(error) => {
                    self.stats.rejected += 1;
                    return Some(Err(error.into()));
                }
            };

            *self.stats.tags.entry(fields.tag().to_owned()).or_default() += 1;
            if self.is_background(fields.tag()) {
                self.stats.ignored += 1;
                continue;
            }

            self.stats.captured += 1;
            return Some(Ok(decode(fields)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor, Read};

    use super::*;
    use crate::{ChecksumError, FramingError, ValidationError};

    #[test]
    fn test_line_source() {
        let input = "$GPWPL,5128.62,N,00027.58,W,EGLL*59\r\n\n$GPDBT,12.3,f,3.7,M,2.0,F*30";
        let records: Vec<_> = LineSource::new(Cursor::new(input))
            .map(|record| record.unwrap().into_bytes())
            .collect();

        assert_eq!(
            records,
            [
                b"$GPWPL,5128.62,N,00027.58,W,EGLL*59".to_vec(),
                Vec::new(),
                b"$GPDBT,12.3,f,3.7,M,2.0,F*30".to_vec(),
            ]
        );
    }

    /// Times out once before every line.
    struct SlowTalker {
        lines: Vec<&'static [u8]>,
        ready: bool,
    }

    impl Read for SlowTalker {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.lines.is_empty() {
                return Ok(0);
            }
            if !self.ready {
                self.ready = true;
                return Err(ErrorKind::TimedOut.into());
            }

            self.ready = false;
            let line = self.lines.remove(0);
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn test_line_source_timeout() {
        let talker = SlowTalker {
            lines: vec![b"$GPXTE,A,A,0.67,L,N*6F\r\n", b"$GPWPL,5128.62,N,00027.58,W,EGLL*59\r\n"],
            ready: false,
        };
        let items: Vec<_> = LineSource::new(BufReader::new(talker)).collect();

        assert_eq!(items.len(), 4);
        assert!(matches!(items[0], Err(SourceError::Timeout)));
        assert!(matches!(&items[1], Ok(record) if record.as_bytes() == b"$GPXTE,A,A,0.67,L,N*6F"));
        assert!(matches!(items[2], Err(SourceError::Timeout)));
        assert!(items[3].is_ok());
    }

    #[test]
    fn test_capture_continues_after_errors() {
        let input = [
            "$GPGLL,2542.9243,N,08013.6310,W,162823.000,A*29",
            "",
            "$GPGLL,2542.9243,N,08013.6310,W,162823.000,A*00",
            "42.9243,N,08013.6310,W",
            "$GPDBT,12.3,f,3.7,M,2.0,F*30",
            "",
            "$GPWPL,5128.62,N,00027.58,W,EGLL*59",
        ];
        let source = input.into_iter().map(Ok::<_, SourceError>);
        let mut capture = CaptureBuilder::new(source).background(["GPGLL"]).build();

        assert!(matches!(
            capture.next(),
            Some(Err(CaptureError::Validation(ValidationError::Checksum(
                ChecksumError::Mismatch {
                    computed: 0x29,
                    found: 0
                }
            ))))
        ));
        assert!(matches!(
            capture.next(),
            Some(Err(CaptureError::Validation(ValidationError::Framing(
                FramingError::MissingSentinel { found: '4' }
            ))))
        ));

        let unknown = capture.next().unwrap().unwrap();
        assert!(unknown.sentence.is_unknown());
        assert_eq!(unknown.sentence.tag(), "GPDBT");

        let waypoint = capture.next().unwrap().unwrap();
        assert_eq!(waypoint.sentence.tag(), "GPWPL");
        assert!(capture.next().is_none());

        let stats = capture.into_stats();
        assert_eq!(stats.records, 5);
        assert_eq!(stats.retries, 2);
        assert_eq!(stats.rejected, 2);
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.captured, 2);
        assert_eq!(stats.tags.get("GPGLL"), Some(&1));
        assert_eq!(stats.tags.get("GPDBT"), Some(&1));
    }

    #[test]
    fn test_capture_source_errors() {
        let source = vec![
            Err(SourceError::Timeout),
            Ok("$GPXTE,A,A,0.67,L,N*6F"),
            Err(SourceError::Timeout),
        ];
        let mut capture = CaptureBuilder::new(source.into_iter()).build();

        assert!(matches!(
            capture.next(),
            Some(Err(CaptureError::Source(SourceError::Timeout)))
        ));
        assert_eq!(capture.next().unwrap().unwrap().sentence.tag(), "GPXTE");
        assert!(matches!(capture.next(), Some(Err(CaptureError::Source(_)))));
        assert!(capture.next().is_none());
        assert_eq!(capture.stats().source_errors, 2);
    }

    #[test]
    fn test_capture_strict_validator() {
        let validator = crate::ValidatorBuilder::new()
            .checksum_mode(crate::ChecksumMode::Required)
            .build();
        let source = ["$GPXTE,A,A,0.67,L,N", "$GPXTE,A,A,0.67,L,N*6F"]
            .into_iter()
            .map(Ok::<_, SourceError>);
        let results: Vec<_> = CaptureBuilder::new(source).validator(validator).build().collect();

        assert!(matches!(
            results[0],
            Err(CaptureError::Validation(ValidationError::Checksum(ChecksumError::Missing)))
        ));
        assert!(results[1].is_ok());
    }
}
