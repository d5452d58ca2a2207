use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};

use crate::attendance::Ledger;
use crate::model::{
    AttendanceRecord, AttendanceStatus, DaysWorkedPolicy, Role, SalaryConfig, User, UserId,
};

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn time(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").unwrap()
}

/// A nine-to-five present record on 2023-10-`day`.
pub fn record(id: &str, user: &str, day: u32) -> AttendanceRecord {
    record_with(
        id,
        user,
        &format!("2023-10-{day:02}"),
        "09:00",
        AttendanceStatus::Present,
        8.0,
    )
}

pub fn record_with(
    id: &str,
    user: &str,
    on: &str,
    check_in: &str,
    status: AttendanceStatus,
    hours: f64,
) -> AttendanceRecord {
    AttendanceRecord::new(
        id,
        UserId::from(user),
        date(on),
        time(check_in),
        time("17:00"),
        status,
        hours,
    )
    .unwrap()
}

/// Builds a ledger so that the first argument ends up most recent.
pub fn ledger_of(records: Vec<AttendanceRecord>) -> Ledger {
    let mut ledger = Ledger::new();
    for record in records.into_iter().rev() {
        ledger.append(record);
    }
    ledger
}

pub fn salary(monthly: i64, days: i64) -> SalaryConfig {
    SalaryConfig::new(BigDecimal::from(monthly), days, DaysWorkedPolicy::PerRecord).unwrap()
}

pub fn john() -> User {
    User {
        id: UserId::from("2"),
        name: "John Doe".to_string(),
        email: "john@attendx.com".to_string(),
        role: Role::Employee,
        department: "Engineering".to_string(),
    }
}
