use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::ConfigError;

/// How ledger entries translate into paid days.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DaysWorkedPolicy {
    /// One day of credit per ledger entry, even when two share a date.
    #[default]
    PerRecord,
    /// One day of credit per calendar date present in the ledger.
    DistinctDates,
}

/// Fixed salary configuration for a pay period.
///
/// Only obtainable through [`SalaryConfig::new`], so every instance has a
/// non-negative salary and at least one working day.
#[derive(Debug, Clone, PartialEq)]
pub struct SalaryConfig {
    monthly_salary: BigDecimal,
    total_working_days: u32,
    days_worked_policy: DaysWorkedPolicy,
}

impl SalaryConfig {
    pub fn new(
        monthly_salary: BigDecimal,
        total_working_days: i64,
        days_worked_policy: DaysWorkedPolicy,
    ) -> Result<Self, ConfigError> {
        if monthly_salary < BigDecimal::zero() {
            return Err(ConfigError::NegativeSalary(monthly_salary.to_string()));
        }
        let total_working_days = u32::try_from(total_working_days)
            .ok()
            .filter(|days| *days > 0)
            .ok_or(ConfigError::InvalidWorkingDays(total_working_days))?;

        Ok(Self {
            monthly_salary,
            total_working_days,
            days_worked_policy,
        })
    }

    pub fn monthly_salary(&self) -> &BigDecimal {
        &self.monthly_salary
    }

    pub fn total_working_days(&self) -> u32 {
        self.total_working_days
    }

    pub fn days_worked_policy(&self) -> DaysWorkedPolicy {
        self.days_worked_policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn zero_working_days_is_a_config_error() {
        let err = SalaryConfig::new(BigDecimal::from(4400), 0, DaysWorkedPolicy::PerRecord)
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidWorkingDays(0));
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert_eq!(
            SalaryConfig::new(BigDecimal::from(4400), -3, DaysWorkedPolicy::PerRecord),
            Err(ConfigError::InvalidWorkingDays(-3))
        );
        assert!(matches!(
            SalaryConfig::new(BigDecimal::from(-1), 22, DaysWorkedPolicy::PerRecord),
            Err(ConfigError::NegativeSalary(_))
        ));
    }

    #[test]
    fn policy_names_are_kebab_case() {
        assert_eq!(
            DaysWorkedPolicy::from_str("distinct-dates").unwrap(),
            DaysWorkedPolicy::DistinctDates
        );
        assert_eq!(DaysWorkedPolicy::PerRecord.to_string(), "per-record");
    }
}
