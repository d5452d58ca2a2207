use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serializer;

pub const HHMM: &str = "%H:%M";
pub const DATE: &str = "%Y-%m-%d";

/// Parse a strict 24-hour `HH:MM` string.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    // chrono accepts single-digit hours, the wire format does not
    if value.len() != 5 {
        return None;
    }
    NaiveTime::parse_from_str(value, HHMM).ok()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE).ok()
}

/// Drop seconds and sub-seconds, records only carry minute precision.
pub fn to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format(HHMM).to_string()
}

/// `serialize_with` helper for `HH:MM` fields.
pub fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_hhmm(*time))
}

pub fn serialize_opt_hhmm<S: Serializer>(
    time: &Option<NaiveTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) => serializer.serialize_str(&format_hhmm(*t)),
        None => serializer.serialize_none(),
    }
}
