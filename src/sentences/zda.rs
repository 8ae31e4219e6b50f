use serde::Serialize;

use crate::{Conversion, DecodeSentence, Derivation, conversion::UtcTime};

/// ZDA - Time & Date - UTC, day, month, year and local time zone
///
/// <https://gpsd.gitlab.io/gpsd/NMEA.html#_zda_time_date_utc_day_month_year_and_local_time_zone>
///
/// ```text
///         1         2  3  4    5  6
///         |         |  |  |    |  |
///  $--ZDA,hhmmss.ss,xx,xx,xxxx,xx,xx*hh<CR><LF>
/// ```
///
/// Fields 5 and 6 give the local zone offset; a negative hours field makes the
/// minutes negative too.
#[derive(Debug, Clone, PartialEq, Serialize, DecodeSentence)]
#[nmea(tag = "GPZDA")]
pub struct ZDA {
    /// Time in UTC
    #[nmea(index(1), convert(Conversion::UtcTime))]
    pub time: Option<UtcTime>,
    #[nmea(index(2), convert(Conversion::Integer))]
    pub day: Option<u8>,
    #[nmea(index(3), convert(Conversion::Integer))]
    pub month: Option<u8>,
    #[nmea(index(4), convert(Conversion::Integer))]
    pub year: Option<u16>,
    /// Local zone hours, -13..13
    #[nmea(index(5), convert(Conversion::Integer))]
    pub utc_offset_hours: Option<i8>,
    /// Local zone minutes, 0..59
    #[nmea(index(6), convert(Conversion::Integer))]
    pub utc_offset_minutes: Option<i8>,
    /// Date in UTC
    #[nmea(derive(Derivation::calendar_date(2, 3, 4)))]
    pub date: Option<time::Date>,
    /// Local zone offset
    #[nmea(derive(Derivation::utc_offset(5, 6)))]
    pub utc_offset: Option<time::UtcOffset>,
}

impl ZDA {
    /// The transmitted instant, in UTC.
    pub fn utc_date_time(&self) -> Option<time::OffsetDateTime> {
        let clock = self.time?.to_time().ok()?;
        Some(time::PrimitiveDateTime::new(self.date?, clock).assume_utc())
    }
}

#[cfg(test)]
mod tests {
    use time::{Date, Month, Time, UtcOffset};

    use super::*;
    use crate::{Diagnostic, FieldSequence, decode_as};

    #[test]
    fn test_zda_decoding() {
        let fields = FieldSequence::tokenize("GPZDA,201530.00,04,07,2002,00,00");
        let (zda, diagnostics) = decode_as::<ZDA>(&fields);

        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(
            zda.date,
            Some(Date::from_calendar_date(2002, Month::July, 4).unwrap())
        );
        assert_eq!(zda.utc_offset, Some(UtcOffset::UTC));

        let instant = zda.utc_date_time().unwrap();
        assert_eq!(instant.time(), Time::from_hms(20, 15, 30).unwrap());
        assert_eq!(instant.offset(), UtcOffset::UTC);
    }

    #[test]
    fn test_zda_negative_offset() {
        let fields = FieldSequence::tokenize("GPZDA,123456.78,29,02,2024,-03,30");
        let (zda, diagnostics) = decode_as::<ZDA>(&fields);

        assert!(diagnostics.is_empty(), "{diagnostics}");
        assert_eq!(zda.utc_offset_hours, Some(-3));
        assert_eq!(zda.utc_offset_minutes, Some(30));
        assert_eq!(zda.utc_offset, Some(UtcOffset::from_hms(-3, -30, 0).unwrap()));
    }

    #[test]
    fn test_zda_invalid_date() {
        let fields = FieldSequence::tokenize("GPZDA,123456.78,30,02,2024,,");
        let (zda, diagnostics) = decode_as::<ZDA>(&fields);

        assert_eq!(zda.day, Some(30));
        assert_eq!(zda.date, None);
        assert_eq!(zda.utc_offset, None);
        assert_eq!(zda.utc_date_time(), None);
        assert_eq!(diagnostics.for_attribute("date").count(), 1);
    }

    #[test]
    fn test_zda_offset_minutes_out_of_range() {
        let fields = FieldSequence::tokenize("GPZDA,201530.00,04,07,2002,-01,-128");
        let (zda, diagnostics) = decode_as::<ZDA>(&fields);

        assert_eq!(zda.utc_offset_hours, Some(-1));
        assert_eq!(zda.utc_offset_minutes, Some(-128));
        assert_eq!(zda.utc_offset, None);
        assert!(zda.date.is_some());

        let diagnostics = diagnostics.into_vec();
        assert!(matches!(
            diagnostics[..],
            [Diagnostic::Derivation(ref error)] if error.name == "utc_offset"
        ));
    }
}
