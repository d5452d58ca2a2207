//! Read-only summaries over attendance records for the dashboard charts.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::HashSet;
use utoipa::ToSchema;

use crate::attendance::Ledger;
use crate::model::attendance::round_hours;
use crate::model::{AttendanceRecord, AttendanceStatus};
use crate::payroll::PayPeriod;

/// Sessions shown by the dashboard charts.
pub const RECENT_SESSIONS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HoursPoint {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Mon")]
    pub day: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PunctualityPoint {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub day: String,
    /// 100 for an on-time check-in, minus one per minute late.
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub days_present: u32,
    pub late_arrivals: u32,
    pub overtime_hours: f64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceOverview {
    pub total_employees: usize,
    pub present_today: usize,
    pub late_today: usize,
    pub on_leave: usize,
}

fn weekday(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// Hours per session for the `n` most recent sessions, oldest first.
pub fn hours_series(ledger: &Ledger, n: usize) -> Vec<HoursPoint> {
    ledger
        .recent_n(n)
        .into_iter()
        .map(|record| HoursPoint {
            date: record.date(),
            day: weekday(record.date()),
            hours: record.total_hours(),
        })
        .collect()
}

pub fn punctuality_score(check_in: NaiveTime, shift_start: NaiveTime) -> u32 {
    let minutes_late = (check_in - shift_start).num_minutes();
    if minutes_late <= 0 {
        100
    } else {
        100 - minutes_late.min(100) as u32
    }
}

pub fn punctuality_series(
    ledger: &Ledger,
    n: usize,
    shift_start: NaiveTime,
) -> Vec<PunctualityPoint> {
    ledger
        .recent_n(n)
        .into_iter()
        .map(|record| PunctualityPoint {
            date: record.date(),
            day: weekday(record.date()),
            score: punctuality_score(record.check_in(), shift_start),
        })
        .collect()
}

pub fn monthly_summary(ledger: &Ledger, period: &PayPeriod, standard_hours: f64) -> MonthlySummary {
    let mut summary = MonthlySummary {
        days_present: 0,
        late_arrivals: 0,
        overtime_hours: 0.0,
        total_hours: 0.0,
    };

    for record in ledger.iter().filter(|r| period.contains(r.date())) {
        match record.status() {
            AttendanceStatus::Present => summary.days_present += 1,
            AttendanceStatus::Late => {
                summary.days_present += 1;
                summary.late_arrivals += 1;
            }
            AttendanceStatus::Absent | AttendanceStatus::OnLeave => continue,
        }
        summary.total_hours += record.total_hours();
        summary.overtime_hours += (record.total_hours() - standard_hours).max(0.0);
    }

    summary.total_hours = round_hours(summary.total_hours);
    summary.overtime_hours = round_hours(summary.overtime_hours);
    summary
}

/// Head counts for one day across every user's records.
pub fn daily_overview<'a>(
    records: impl IntoIterator<Item = &'a AttendanceRecord>,
    date: NaiveDate,
    total_employees: usize,
) -> AttendanceOverview {
    let mut present = HashSet::new();
    let mut late = HashSet::new();
    let mut on_leave = HashSet::new();

    for record in records.into_iter().filter(|r| r.date() == date) {
        match record.status() {
            AttendanceStatus::Present => {
                present.insert(record.user_id());
            }
            AttendanceStatus::Late => {
                present.insert(record.user_id());
                late.insert(record.user_id());
            }
            AttendanceStatus::OnLeave => {
                on_leave.insert(record.user_id());
            }
            AttendanceStatus::Absent => {}
        }
    }

    AttendanceOverview {
        total_employees,
        present_today: present.len(),
        late_today: late.len(),
        on_leave: on_leave.len(),
    }
}
