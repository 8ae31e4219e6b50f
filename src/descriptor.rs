//! # Sentence Descriptors
//!
//! A [`SentenceTypeDescriptor`] is the static description of one sentence type: its
//! tag, the raw fields it reads and the attributes it derives from two or more of
//! them. The [`DecodeSentence`] derive macro builds one per sentence struct; the
//! [`DecodeContext`] applies it to a [`FieldSequence`] and collects diagnostics.

use crate::{
    Conversion, DerivationError, Diagnostics, FieldFormatError, FieldSequence, FromValue, Value,
    conversion::{Angle, Axis, UtcDate, UtcTime, signed_coordinate},
};

/// The checks of the Rust type an attribute is read into.
///
/// Built with [`Fit::of`]; the decoder and [`SentenceTypeDescriptor::values`] both
/// apply it, so an attribute is absent in the same cases either way.
#[derive(Debug, Clone, Copy)]
pub struct Fit {
    value: fn(&Value) -> Option<(usize, &'static str)>,
    item: fn(&Value) -> Option<(usize, &'static str)>,
}

impl Fit {
    /// Accepts every value.
    pub const ANY: Self = Self::of::<Value>();

    pub const fn of<T: FromValue>() -> Self {
        Self {
            value: T::misfit,
            item: T::item_misfit,
        }
    }
}

impl PartialEq for Fit {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::fn_addr_eq(self.value, other.value)
            && std::ptr::fn_addr_eq(self.item, other.item)
    }
}

impl Eq for Fit {}

/// One raw field of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Position in the field sequence, the tag being field 0.
    pub index: usize,
    pub name: &'static str,
    pub conversion: Conversion,
    pub fit: Fit,
}

impl FieldSpec {
    pub const fn new(index: usize, name: &'static str, conversion: Conversion) -> Self {
        Self {
            index,
            name,
            conversion,
            fit: Fit::ANY,
        }
    }

    pub const fn with_fit(self, fit: Fit) -> Self {
        Self { fit, ..self }
    }
}

/// How a derived attribute combines raw fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// Signed decimal degrees from an angle field and a hemisphere field.
    SignedCoordinate {
        axis: Axis,
        angle: usize,
        hemisphere: usize,
    },
    /// A UTC timestamp from an `HHMMSS.sss` field and a `DDMMYY` field.
    Timestamp { time: usize, date: usize },
    /// A calendar date from separate day, month and four-digit year fields.
    CalendarDate {
        day: usize,
        month: usize,
        year: usize,
    },
    /// An offset from separate hours and minutes fields.
    ///
    /// A negative hours field makes the minutes negative too.
    UtcOffset { hours: usize, minutes: usize },
    /// Consecutive fields starting at `from`; `count` of them, or up to the end.
    List {
        from: usize,
        count: Option<usize>,
        conversion: Conversion,
    },
    /// Up to `count` groups of `width` consecutive fields starting at `from`.
    ///
    /// A group whose fields are all empty is skipped.
    Groups {
        from: usize,
        width: usize,
        count: usize,
        conversion: Conversion,
    },
}

impl Derivation {
    pub const fn latitude(angle: usize, hemisphere: usize) -> Self {
        Self::SignedCoordinate {
            axis: Axis::Latitude,
            angle,
            hemisphere,
        }
    }

    pub const fn longitude(angle: usize, hemisphere: usize) -> Self {
        Self::SignedCoordinate {
            axis: Axis::Longitude,
            angle,
            hemisphere,
        }
    }

    pub const fn timestamp(time: usize, date: usize) -> Self {
        Self::Timestamp { time, date }
    }

    pub const fn calendar_date(day: usize, month: usize, year: usize) -> Self {
        Self::CalendarDate { day, month, year }
    }

    pub const fn utc_offset(hours: usize, minutes: usize) -> Self {
        Self::UtcOffset { hours, minutes }
    }

    pub const fn list(from: usize, count: usize, conversion: Conversion) -> Self {
        Self::List {
            from,
            count: Some(count),
            conversion,
        }
    }

    /// Every field from `from` to the end of the sentence.
    pub const fn rest(from: usize, conversion: Conversion) -> Self {
        Self::List {
            from,
            count: None,
            conversion,
        }
    }

    pub const fn groups(from: usize, width: usize, count: usize, conversion: Conversion) -> Self {
        Self::Groups {
            from,
            width,
            count,
            conversion,
        }
    }
}

/// One derived attribute of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedSpec {
    pub name: &'static str,
    pub derivation: Derivation,
    pub fit: Fit,
}

impl DerivedSpec {
    pub const fn new(name: &'static str, derivation: Derivation) -> Self {
        Self {
            name,
            derivation,
            fit: Fit::ANY,
        }
    }

    pub const fn with_fit(self, fit: Fit) -> Self {
        Self { fit, ..self }
    }
}

/// Static metadata of one sentence type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceTypeDescriptor {
    pub tag: &'static str,
    /// Raw fields in declaration order.
    pub fields: &'static [FieldSpec],
    /// Derived attributes in declaration order.
    pub derived: &'static [DerivedSpec],
}

impl SentenceTypeDescriptor {
    /// Names of every attribute, raw fields first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        let (fields, derived): (&'static [FieldSpec], &'static [DerivedSpec]) =
            (self.fields, self.derived);

        let fields = fields.iter().map(|spec| spec.name);
        fields.chain(derived.iter().map(|spec| spec.name))
    }

    /// Converts every attribute of `fields` into a [`Value`], raw fields first.
    pub fn values(&self, fields: &FieldSequence) -> (Vec<(&'static str, Option<Value>)>, Diagnostics) {
        let mut context = DecodeContext::new(fields);
        let mut values: Vec<_> = self
            .fields
            .iter()
            .map(|spec| (spec.name, context.read_field(spec)))
            .collect();
        values.extend(
            self.derived
                .iter()
                .map(|spec| (spec.name, context.read_derived(spec))),
        );

        (values, context.finish())
    }
}

/// A sentence struct decodable through its descriptor.
///
/// Implemented by `#[derive(DecodeSentence)]`:
///
/// ```rust
/// use nmea0183_capture::{Conversion, DecodeSentence, Derivation, FieldSequence, decode_as};
///
/// #[derive(Debug, DecodeSentence)]
/// #[nmea(tag = "PXWPT")]
/// struct Waypoint {
///     #[nmea(index(1), convert(Conversion::Latitude))]
///     latitude_source: Option<nmea0183_capture::conversion::Angle>,
///     #[nmea(index(2))]
///     latitude_hemisphere: Option<String>,
///     #[nmea(derive(Derivation::latitude(1, 2)))]
///     latitude: Option<f64>,
/// }
///
/// let fields = FieldSequence::tokenize("PXWPT,3845.363,S");
/// let (waypoint, diagnostics) = decode_as::<Waypoint>(&fields);
/// assert!(diagnostics.is_empty());
/// assert!((waypoint.latitude.unwrap() + 38.75605).abs() < 1e-4);
/// ```
pub trait DecodeSentence: Sized {
    const DESCRIPTOR: SentenceTypeDescriptor;

    /// Builds the sentence, reading raw fields before derived ones.
    fn decode_with(context: &mut DecodeContext<'_>) -> Self;
}

/// Decodes `fields` as `T`, whatever their tag.
pub fn decode_as<T: DecodeSentence>(fields: &FieldSequence) -> (T, Diagnostics) {
    let mut context = DecodeContext::new(fields);
    let sentence = T::decode_with(&mut context);
    (sentence, context.finish())
}

/// State of one decode call.
///
/// A field that fails to convert is reported once, however many attributes read it.
pub struct DecodeContext<'a> {
    fields: &'a FieldSequence,
    diagnostics: Diagnostics,
    reported: Vec<usize>,
}

impl<'a> DecodeContext<'a> {
    pub fn new(fields: &'a FieldSequence) -> Self {
        Self {
            fields,
            diagnostics: Diagnostics::new(),
            reported: Vec::new(),
        }
    }

    pub fn fields(&self) -> &'a FieldSequence {
        self.fields
    }

    /// Reads a raw field attribute.
    pub fn field<T: FromValue>(&mut self, spec: &FieldSpec) -> Option<T> {
        let value = self.read_field(spec)?;

        match T::from_value(value) {
            Some(value) => Some(value),
            None => {
                self.report_field(spec.index, spec.name, T::EXPECTED);
                None
            }
        }
    }

    /// Evaluates a derived attribute.
    pub fn derived<T: FromValue>(&mut self, spec: &DerivedSpec) -> Option<T> {
        let value = self.read_derived(spec)?;

        match T::from_value(value) {
            Some(value) => Some(value),
            None => {
                self.report_derivation(spec.name, format!("expected {}", T::EXPECTED));
                None
            }
        }
    }

    /// Returns the diagnostics collected so far.
    pub fn finish(self) -> Diagnostics {
        self.diagnostics
    }

    /// Converts a raw field and checks it against the attribute's [`Fit`].
    fn read_field(&mut self, spec: &FieldSpec) -> Option<Value> {
        let value = self.convert(spec.index, spec.name, spec.conversion)?;

        match (spec.fit.value)(&value) {
            Some((_, expected)) => {
                self.report_field(spec.index, spec.name, expected);
                None
            }
            None => Some(value),
        }
    }

    /// Evaluates a derivation and checks it against the attribute's [`Fit`].
    fn read_derived(&mut self, spec: &DerivedSpec) -> Option<Value> {
        let value = self.evaluate(spec.name, spec.derivation, spec.fit)?;

        match (spec.fit.value)(&value) {
            Some((_, expected)) => {
                self.report_derivation(spec.name, format!("expected {expected}"));
                None
            }
            None => Some(value),
        }
    }

    /// Converts one list item; an item that does not fit is reported and dropped.
    fn item(
        &mut self,
        index: usize,
        name: &'static str,
        conversion: Conversion,
        fit: Fit,
    ) -> Option<Value> {
        let value = self.convert(index, name, conversion)?;

        match (fit.item)(&value) {
            Some((_, expected)) => {
                self.report_field(index, name, expected);
                None
            }
            None => Some(value),
        }
    }

    fn convert(&mut self, index: usize, name: &'static str, conversion: Conversion) -> Option<Value> {
        let text = self.fields.get(index);
        match conversion.apply(text) {
            Ok(value) => value,
            Err(error) => {
                self.report_field(index, name, error.expected);
                None
            }
        }
    }

    fn report_field(&mut self, index: usize, name: &'static str, expected: &'static str) {
        if self.reported.contains(&index) {
            return;
        }
        self.reported.push(index);

        self.diagnostics.push(FieldFormatError {
            tag: self.fields.tag().to_owned(),
            index,
            name,
            text: self.fields.get(index).to_owned(),
            expected,
        });
    }

    fn report_derivation(&mut self, name: &'static str, reason: impl Into<String>) {
        self.diagnostics.push(DerivationError {
            tag: self.fields.tag().to_owned(),
            name,
            reason: reason.into(),
        });
    }

    fn evaluate(&mut self, name: &'static str, derivation: Derivation, fit: Fit) -> Option<Value> {
        match derivation {
            Derivation::SignedCoordinate {
                axis,
                angle,
                hemisphere,
            } => {
                let angle = self
                    .convert(angle, name, Conversion::for_axis(axis))
                    .and_then(Angle::from_value);
                let letter = self.fields.get(hemisphere);

                match signed_coordinate(angle, letter, axis) {
                    Ok(value) => value.map(Value::Float),
                    Err(error) => {
                        self.report_field(hemisphere, name, error.expected);
                        None
                    }
                }
            }
            Derivation::Timestamp { time, date } => {
                let clock = self
                    .convert(time, name, Conversion::UtcTime)
                    .and_then(UtcTime::from_value)?;
                let calendar = self
                    .convert(date, name, Conversion::FixDate)
                    .and_then(UtcDate::from_value)?;

                let timestamp = clock.to_time().and_then(|clock| {
                    Ok(time::PrimitiveDateTime::new(calendar.to_date()?, clock))
                });
                self.checked(name, timestamp.map(Value::Timestamp))
            }
            Derivation::CalendarDate { day, month, year } => {
                let day = self.component::<u8>(day, name)?;
                let month = self.component::<u8>(month, name)?;
                let year = self.component::<i32>(year, name)?;

                let date = time::Month::try_from(month)
                    .and_then(|month| time::Date::from_calendar_date(year, month, day));
                self.checked(name, date.map(Value::CalendarDate))
            }
            Derivation::UtcOffset { hours, minutes } => {
                let negative = self.fields.get(hours).starts_with('-');
                let hours = self.component::<i8>(hours, name)?;
                let minutes = self.component::<i8>(minutes, name).unwrap_or(0);
                let minutes = if negative {
                    -minutes.saturating_abs()
                } else {
                    minutes
                };

                let offset = time::UtcOffset::from_hms(hours, minutes, 0);
                self.checked(name, offset.map(Value::Offset))
            }
            Derivation::List {
                from,
                count,
                conversion,
            } => {
                let end = count.map_or(self.fields.len(), |count| from + count);
                let items = (from..end)
                    .map(|index| self.item(index, name, conversion, fit))
                    .collect();

                Some(Value::List(items))
            }
            Derivation::Groups {
                from,
                width,
                count,
                conversion,
            } => {
                let mut groups = Vec::new();
                for group in 0..count {
                    let start = from + group * width;
                    if start >= self.fields.len() {
                        break;
                    }

                    let items: Vec<_> = (start..start + width)
                        .map(|index| self.convert(index, name, conversion))
                        .collect();
                    if items.iter().all(Option::is_none) {
                        continue;
                    }

                    let group = Value::List(items);
                    match (fit.item)(&group) {
                        Some((offset, expected)) => {
                            self.report_field(start + offset, name, expected)
                        }
                        None => groups.push(Some(group)),
                    }
                }

                Some(Value::List(groups))
            }
        }
    }

    /// Reads one integer input of a derivation.
    fn component<T: FromValue>(&mut self, index: usize, name: &'static str) -> Option<T> {
        let value = self.convert(index, name, Conversion::Integer)?;

        match T::from_value(value) {
            Some(value) => Some(value),
            None => {
                self.report_field(index, name, T::EXPECTED);
                None
            }
        }
    }

    fn checked(
        &mut self,
        name: &'static str,
        value: Result<Value, time::error::ComponentRange>,
    ) -> Option<Value> {
        match value {
            Ok(value) => Some(value),
            Err(error) => {
                self.report_derivation(name, error.to_string());
                None
            }
        }
    }
}
