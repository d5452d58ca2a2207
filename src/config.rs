use bigdecimal::BigDecimal;
use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::model::{DaysWorkedPolicy, SalaryConfig};
use crate::utils::time_format;

/// Upper bound for `SESSION_IDLE_TTL_SECS`, one year.
pub const MAX_SESSION_IDLE_TTL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub api_prefix: String,

    // Rate limiting
    pub rate_protected_per_min: u32,

    // Payroll
    pub salary: SalaryConfig,

    // Reporting
    pub shift_start: NaiveTime,
    pub standard_shift_hours: f64,

    pub session_idle_ttl: Duration,
    pub seed_file: Option<PathBuf>,
    pub log_dir: String,
}

fn parse_var<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, value, e))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any variable source; `lookup` returns `None` for unset keys.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let monthly_salary: BigDecimal =
            parse_var("MONTHLY_SALARY", &var("MONTHLY_SALARY", "4400"))?;
        let total_working_days: i64 =
            parse_var("TOTAL_WORKING_DAYS", &var("TOTAL_WORKING_DAYS", "22"))?;
        let days_worked_policy: DaysWorkedPolicy =
            parse_var("DAYS_WORKED_POLICY", &var("DAYS_WORKED_POLICY", "per-record"))?;
        let salary = SalaryConfig::new(monthly_salary, total_working_days, days_worked_policy)?;

        let shift_start_raw = var("SHIFT_START", "09:00");
        let shift_start = time_format::parse_hhmm(shift_start_raw.trim()).ok_or_else(|| {
            ConfigError::invalid("SHIFT_START", shift_start_raw.as_str(), "expected HH:MM")
        })?;

        let standard_shift_hours: f64 =
            parse_var("STANDARD_SHIFT_HOURS", &var("STANDARD_SHIFT_HOURS", "8"))?;
        if !standard_shift_hours.is_finite() || standard_shift_hours < 0.0 {
            return Err(ConfigError::invalid(
                "STANDARD_SHIFT_HOURS",
                standard_shift_hours.to_string(),
                "must be a non-negative number",
            ));
        }

        let idle_ttl_secs: u64 =
            parse_var("SESSION_IDLE_TTL_SECS", &var("SESSION_IDLE_TTL_SECS", "86400"))?;
        if !(1..=MAX_SESSION_IDLE_TTL_SECS).contains(&idle_ttl_secs) {
            return Err(ConfigError::invalid(
                "SESSION_IDLE_TTL_SECS",
                idle_ttl_secs.to_string(),
                format!("must be between 1 and {MAX_SESSION_IDLE_TTL_SECS} seconds"),
            ));
        }

        Ok(Self {
            server_addr: var("SERVER_ADDR", "127.0.0.1:8080"),
            api_prefix: var("API_PREFIX", "/api"),
            rate_protected_per_min: parse_var(
                "RATE_PROTECTED_PER_MIN",
                &var("RATE_PROTECTED_PER_MIN", "1000"),
            )?,
            salary,
            shift_start,
            standard_shift_hours,
            session_idle_ttl: Duration::from_secs(idle_ttl_secs),
            seed_file: lookup("SEED_FILE")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            log_dir: var("LOG_DIR", "logs"),
        })
    }
}
