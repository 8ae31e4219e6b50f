use super::{Angle, UtcDate, UtcTime};

/// A converted field or derived attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Angle(Angle),
    Time(UtcTime),
    Date(UtcDate),
    Timestamp(time::PrimitiveDateTime),
    CalendarDate(time::Date),
    Offset(time::UtcOffset),
    /// Positional items; an empty field is [`None`].
    List(Vec<Option<Value>>),
}

/// Types an attribute can be read into from a [`Value`].
///
/// [`from_value`](FromValue::from_value) returns [`None`] when the value does not
/// fit, for instance an integer out of range or an unknown flag letter. The decoder
/// reports that as a diagnostic naming [`EXPECTED`](FromValue::EXPECTED).
pub trait FromValue: Sized {
    /// Describes the accepted values.
    const EXPECTED: &'static str;

    fn from_value(value: Value) -> Option<Self>;

    /// Finds the part of `value` that does not fit.
    ///
    /// Returns the offset of the offending field within the fields `value` was
    /// read from, and what was expected there.
    fn misfit(value: &Value) -> Option<(usize, &'static str)> {
        match Self::from_value(value.clone()) {
            Some(_) => None,
            None => Some((0, Self::EXPECTED)),
        }
    }

    /// [`misfit`](FromValue::misfit) of one item, for list types.
    ///
    /// The decoder drops items that do not fit and keeps the rest.
    fn item_misfit(item: &Value) -> Option<(usize, &'static str)> {
        let _ = item;
        None
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: Value) -> Option<Self> {
        Some(value)
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "text";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

macro_rules! integer_from_value {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::Integer(value) => <$ty>::try_from(value).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

integer_from_value! {
    u8 => "an integer in 0..=255",
    u16 => "an integer in 0..=65535",
    u32 => "a non-negative integer",
    i8 => "an integer in -128..=127",
    i32 => "a 32-bit integer",
    i64 => "an integer",
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(value) => Some(value),
            Value::Integer(value) => Some(value as f64),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const EXPECTED: &'static str = "a number";

    fn from_value(value: Value) -> Option<Self> {
        f64::from_value(value).map(|value| value as f32)
    }
}

macro_rules! variant_from_value {
    ($($ty:ty => $variant:ident, $expected:literal);* $(;)?) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

variant_from_value! {
    Angle => Angle, "an angle";
    UtcTime => Time, "a time of day";
    UtcDate => Date, "a date";
    time::PrimitiveDateTime => Timestamp, "a date and time";
    time::Date => CalendarDate, "a calendar date";
    time::UtcOffset => Offset, "a UTC offset";
}

/// Reads an optional list item; a present item must fit.
pub(crate) fn optional_item<T: FromValue>(item: Option<Value>) -> Option<Option<T>> {
    match item {
        Some(value) => T::from_value(value).map(Some),
        None => Some(None),
    }
}

/// Present items in order; empty positions are skipped.
impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "a list";

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) => items.into_iter().flatten().map(T::from_value).collect(),
            _ => None,
        }
    }

    fn item_misfit(item: &Value) -> Option<(usize, &'static str)> {
        T::misfit(item)
    }
}

/// Present items in order; more than `N` of them do not fit.
impl<T: FromValue, const N: usize> FromValue for heapless::Vec<T, N> {
    const EXPECTED: &'static str = "a bounded list";

    fn from_value(value: Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };

        let mut elems = heapless::Vec::new();
        for item in items.into_iter().flatten() {
            elems.push(T::from_value(item)?).ok()?;
        }
        Some(elems)
    }

    fn item_misfit(item: &Value) -> Option<(usize, &'static str)> {
        T::misfit(item)
    }
}
