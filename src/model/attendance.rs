use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::RecordError;
use crate::model::user::UserId;
use crate::utils::time_format::{self, serialize_hhmm};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    #[serde(rename = "On Leave")]
    #[strum(serialize = "On Leave")]
    OnLeave,
}

/// A completed work session. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", try_from = "RawAttendanceRecord")]
#[schema(example = json!({
    "id": "101",
    "userId": "2",
    "date": "2023-10-25",
    "checkIn": "08:55",
    "checkOut": "17:05",
    "status": "Present",
    "totalHours": 8.1
}))]
pub struct AttendanceRecord {
    id: String,
    #[schema(value_type = String)]
    user_id: UserId,
    #[schema(value_type = String, format = "date")]
    date: NaiveDate,
    #[serde(serialize_with = "serialize_hhmm")]
    #[schema(value_type = String, example = "09:00")]
    check_in: NaiveTime,
    #[serde(serialize_with = "serialize_hhmm")]
    #[schema(value_type = String, example = "17:00")]
    check_out: NaiveTime,
    status: AttendanceStatus,
    total_hours: f64,
}

/// Round decimal hours to two places.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

impl AttendanceRecord {
    pub fn new(
        id: impl Into<String>,
        user_id: UserId,
        date: NaiveDate,
        check_in: NaiveTime,
        check_out: NaiveTime,
        status: AttendanceStatus,
        total_hours: f64,
    ) -> Result<Self, RecordError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RecordError::EmptyId);
        }
        if user_id.as_str().trim().is_empty() {
            return Err(RecordError::EmptyUserId);
        }
        if !total_hours.is_finite() || total_hours < 0.0 {
            return Err(RecordError::InvalidHours(total_hours));
        }

        Ok(Self {
            id,
            user_id,
            date,
            check_in: time_format::to_minute(check_in),
            check_out: time_format::to_minute(check_out),
            status,
            total_hours: round_hours(total_hours),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn check_in(&self) -> NaiveTime {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveTime {
        self.check_out
    }

    pub fn status(&self) -> AttendanceStatus {
        self.status
    }

    pub fn total_hours(&self) -> f64 {
        self.total_hours
    }
}

/// Wire shape of a record coming from seed data, validated before use.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttendanceRecord {
    id: String,
    user_id: String,
    date: String,
    check_in: String,
    check_out: Option<String>,
    status: String,
    total_hours: f64,
}

impl TryFrom<RawAttendanceRecord> for AttendanceRecord {
    type Error = RecordError;

    fn try_from(raw: RawAttendanceRecord) -> Result<Self, Self::Error> {
        let date = time_format::parse_date(&raw.date)
            .ok_or_else(|| RecordError::MalformedDate(raw.date.clone()))?;
        let check_in = time_format::parse_hhmm(&raw.check_in)
            .ok_or_else(|| RecordError::MalformedTime(raw.check_in.clone()))?;
        let check_out = match raw.check_out.as_deref() {
            Some(value) => time_format::parse_hhmm(value)
                .ok_or_else(|| RecordError::MalformedTime(value.to_string()))?,
            None => return Err(RecordError::MissingCheckOut(raw.id)),
        };
        let status = AttendanceStatus::from_str(&raw.status)
            .map_err(|_| RecordError::UnknownStatus(raw.status.clone()))?;

        AttendanceRecord::new(
            raw.id,
            UserId::from(raw.user_id),
            date,
            check_in,
            check_out,
            status,
            raw.total_hours,
        )
    }
}
