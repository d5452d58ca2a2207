use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt::Write;
use std::str::FromStr;

use crate::model::{SalaryConfig, User};
use crate::payroll::accrual::{Accrual, money};

const WIDTH: usize = 50;

/// Calendar month a payslip covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayPeriod {
    first_day: NaiveDate,
}

impl PayPeriod {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// e.g. `October 2026`
    pub fn label(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

impl FromStr for PayPeriod {
    type Err = chrono::ParseError;

    /// Parses `YYYY-MM`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let first_day = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")?;
        Ok(Self { first_day })
    }
}

/// `Payslip_<Name_With_Underscores>_<Month_Year>.txt`
pub fn payslip_filename(user: &User, period: &PayPeriod) -> String {
    format!(
        "Payslip_{}_{}.txt",
        user.name.replace(' ', "_"),
        period.label().replace(' ', "_")
    )
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(WIDTH)
}

fn centered(text: &str) -> String {
    format!("{text:^WIDTH$}").trim_end().to_string()
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "{label:<16}: {value}");
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", rule('-'));
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", rule('-'));
}

/// Render the plain-text payslip. Only the `Generated On` line depends on
/// anything other than the figures passed in.
pub fn render_payslip(
    user: &User,
    salary: &SalaryConfig,
    accrual: &Accrual,
    period: &PayPeriod,
    generated_at: NaiveDateTime,
) -> String {
    let daily = money(&accrual.daily_rate);
    let payable = money(&accrual.payable);
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "{}", centered("SALARY SLIP"));
    let _ = writeln!(out, "{}", rule('='));
    field(&mut out, "Pay Period", period.label());
    field(&mut out, "Generated On", generated_at.format("%Y-%m-%d %H:%M"));

    section(&mut out, "EMPLOYEE DETAILS");
    field(&mut out, "Employee Name", &user.name);
    field(&mut out, "Employee ID", &user.id);
    field(&mut out, "Department", &user.department);
    field(&mut out, "Email", &user.email);

    section(&mut out, "SALARY STRUCTURE");
    field(&mut out, "Monthly Salary", money(salary.monthly_salary()));
    field(&mut out, "Working Days", salary.total_working_days());
    field(&mut out, "Daily Rate", &daily);

    section(&mut out, "ATTENDANCE SUMMARY");
    field(&mut out, "Days Worked", accrual.days_worked);
    field(&mut out, "Total Days", accrual.total_working_days);
    field(&mut out, "Attendance", format!("{}%", accrual.attendance_percentage()));
    field(&mut out, "Remaining Days", accrual.remaining_days);

    section(&mut out, "EARNINGS");
    field(&mut out, "Formula", "Daily Rate x Days Worked");
    field(
        &mut out,
        "Calculation",
        format!("{daily} x {} = {payable}", accrual.days_worked),
    );

    let _ = writeln!(out, "{}", rule('='));
    field(&mut out, "TOTAL PAYABLE", &payable);
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "{}", centered("This is a system generated payslip."));

    out
}
