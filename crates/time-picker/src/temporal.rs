use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike};

use crate::format::{FormatSpec, ParseError};

/// The picker's own time value.
///
/// Like a moment object, it carries a calendar date next to the time of day.
/// Values parsed from a time-only string are anchored to the current local
/// date; values built from a native instant keep the instant's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeValue(NaiveDateTime);

impl TimeValue {
    pub fn new(datetime: NaiveDateTime) -> Self {
        TimeValue(datetime)
    }

    /// Builds a value for today at `time`.
    pub fn today_at(time: NaiveTime) -> Self {
        TimeValue(Local::now().date_naive().and_time(time))
    }

    /// Builds a value for today at `hour:minute:second`, if those are valid.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(TimeValue::today_at)
    }

    /// Parses `text` under `format`. Malformed input is an error, never a panic.
    pub fn parse(text: &str, format: &FormatSpec) -> Result<Self, ParseError> {
        format.parse_time(text).map(TimeValue::today_at)
    }

    pub fn format(&self, format: &FormatSpec) -> String {
        format.format_time(self.0.time())
    }

    pub fn from_native(instant: DateTime<Local>) -> Self {
        TimeValue(instant.naive_local())
    }

    pub fn to_native(&self) -> DateTime<Local> {
        let local = Local.from_local_datetime(&self.0);
        local
            .earliest()
            // inside a DST gap: the wall-clock time does not exist, take the next one that does
            .or_else(|| {
                Local
                    .from_local_datetime(&(self.0 + TimeDelta::hours(1)))
                    .earliest()
            })
            .unwrap_or_else(|| Local.from_utc_datetime(&self.0))
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// Same date, different time of day.
    pub fn with_time(&self, time: NaiveTime) -> Self {
        TimeValue(self.0.date().and_time(time))
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for TimeValue {
    fn from(datetime: NaiveDateTime) -> Self {
        TimeValue(datetime)
    }
}

impl From<DateTime<Local>> for TimeValue {
    fn from(instant: DateTime<Local>) -> Self {
        TimeValue::from_native(instant)
    }
}

/// A value handed in by the host.
///
/// Strings are read with the picker's current format, native instants always
/// convert, and a [`TimeValue`] passes through as is.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeInput {
    Text(String),
    Native(DateTime<Local>),
    Value(TimeValue),
}

impl TimeInput {
    pub fn resolve(&self, format: &FormatSpec) -> Result<TimeValue, ParseError> {
        match self {
            TimeInput::Text(text) => TimeValue::parse(text, format),
            TimeInput::Native(instant) => Ok(TimeValue::from_native(*instant)),
            TimeInput::Value(value) => Ok(*value),
        }
    }
}

impl From<&str> for TimeInput {
    fn from(text: &str) -> Self {
        TimeInput::Text(text.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(text: String) -> Self {
        TimeInput::Text(text)
    }
}

impl From<DateTime<Local>> for TimeInput {
    fn from(instant: DateTime<Local>) -> Self {
        TimeInput::Native(instant)
    }
}

impl From<TimeValue> for TimeInput {
    fn from(value: TimeValue) -> Self {
        TimeInput::Value(value)
    }
}

impl From<NaiveTime> for TimeInput {
    fn from(time: NaiveTime) -> Self {
        TimeInput::Value(TimeValue::today_at(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_anchors_to_today() {
        let value = TimeValue::parse("08:30:15", &FormatSpec::default()).unwrap();
        assert_eq!(value.time(), NaiveTime::from_hms_opt(8, 30, 15).unwrap());
        assert_eq!(value.date(), Local::now().date_naive());
    }

    #[test]
    fn test_native_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let value = TimeValue::new(date.and_hms_opt(9, 15, 0).unwrap());
        let native = value.to_native();
        assert_eq!(native.naive_local(), value.naive());
        assert_eq!(TimeValue::from_native(native), value);
    }

    #[test]
    fn test_with_time_keeps_date() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let value = TimeValue::new(date.and_hms_opt(23, 0, 0).unwrap());
        let moved = value.with_time(NaiveTime::from_hms_opt(1, 2, 3).unwrap());
        assert_eq!(moved.date(), date);
        assert_eq!((moved.hour(), moved.minute(), moved.second()), (1, 2, 3));
    }

    #[test]
    fn test_resolve_inputs() {
        let format = FormatSpec::new("HH:mm");
        let text = TimeInput::from("10:45");
        assert_eq!(text.resolve(&format).unwrap().minute(), 45);
        assert!(TimeInput::from("later").resolve(&format).is_err());

        let value = TimeValue::from_hms(7, 0, 0).unwrap();
        assert_eq!(TimeInput::from(value).resolve(&format), Ok(value));
    }
}
