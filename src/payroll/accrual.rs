use bigdecimal::{BigDecimal, RoundingMode};
use std::collections::HashSet;

use crate::attendance::Ledger;
use crate::model::{DaysWorkedPolicy, SalaryConfig};

/// Payroll figures derived from a ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Accrual {
    pub daily_rate: BigDecimal,
    pub payable: BigDecimal,
    pub days_worked: u32,
    pub remaining_days: u32,
    pub total_working_days: u32,
}

impl Accrual {
    /// Share of the period's working days already worked, in percent.
    pub fn attendance_percentage(&self) -> BigDecimal {
        let worked = BigDecimal::from(self.days_worked) * BigDecimal::from(100);
        money(&(worked / BigDecimal::from(self.total_working_days)))
    }
}

/// Round to two decimal places, half away from zero.
pub fn money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(2, RoundingMode::HalfUp)
}

pub fn days_worked(ledger: &Ledger, policy: DaysWorkedPolicy) -> u32 {
    let count = match policy {
        DaysWorkedPolicy::PerRecord => ledger.len(),
        DaysWorkedPolicy::DistinctDates => ledger
            .iter()
            .map(|record| record.date())
            .collect::<HashSet<_>>()
            .len(),
    };
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Derive daily rate, payable amount and day counts. Pure.
pub fn compute_accrual(ledger: &Ledger, config: &SalaryConfig) -> Accrual {
    let total_working_days = config.total_working_days();
    let days_worked = days_worked(ledger, config.days_worked_policy());

    let daily_rate = config.monthly_salary() / &BigDecimal::from(total_working_days);
    let payable = &daily_rate * &BigDecimal::from(days_worked);

    Accrual {
        daily_rate,
        payable,
        days_worked,
        remaining_days: total_working_days.saturating_sub(days_worked),
        total_working_days,
    }
}
