use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use moka::future::Cache;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::attendance::clock::{SessionClock, WallClock};
use crate::attendance::ledger::Ledger;
use crate::attendance::ticker::{TICK_PERIOD, Ticker};
use crate::error::ClockError;
use crate::model::{AttendanceRecord, SalaryConfig, User, UserId};
use crate::payroll::{Accrual, PayPeriod, compute_accrual, payslip_filename, render_payslip};
use crate::seed::SeedData;
use crate::utils::time_format::{self, serialize_opt_hhmm};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub active: bool,
    #[serde(serialize_with = "serialize_opt_hhmm")]
    #[schema(value_type = Option<String>, example = "09:00")]
    pub check_in: Option<NaiveTime>,
    #[schema(value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
    pub elapsed_seconds: u64,
}

/// A payslip ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct Payslip {
    pub filename: String,
    pub body: String,
}

// The clock is only ever touched for a handful of instructions, a poisoned lock
// still holds a consistent state.
fn lock(clock: &Mutex<SessionClock>) -> MutexGuard<'_, SessionClock> {
    clock.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything one user's dashboard operates on, passed explicitly.
pub struct SessionContext {
    user: User,
    salary: SalaryConfig,
    clock: Arc<Mutex<SessionClock>>,
    ledger: Ledger,
    ticker: Option<Ticker>,
}

impl SessionContext {
    pub fn new(user: User, salary: SalaryConfig, ledger: Ledger, wall: Arc<dyn WallClock>) -> Self {
        Self {
            user,
            salary,
            clock: Arc::new(Mutex::new(SessionClock::new(wall))),
            ledger,
            ticker: None,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn salary(&self) -> &SalaryConfig {
        &self.salary
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Start a session and acquire its tick schedule. Needs a tokio runtime.
    pub fn clock_in(&mut self) -> Result<NaiveTime, ClockError> {
        let check_in = lock(&self.clock).start().inspect_err(|e| {
            warn!(user_id = %self.user.id, error = %e, "Clock-in rejected");
        })?;
        self.ticker = Some(Ticker::spawn(self.clock.clone(), TICK_PERIOD));

        info!(
            user_id = %self.user.id,
            check_in = %time_format::format_hhmm(check_in),
            "Clocked in"
        );
        Ok(check_in)
    }

    /// End the running session, releasing the tick schedule before the clock
    /// stops, and record it in the ledger.
    pub fn finish_shift(&mut self) -> Result<AttendanceRecord, ClockError> {
        let mut clock = lock(&self.clock);
        if !clock.is_running() {
            warn!(user_id = %self.user.id, "Finish-shift rejected, no running session");
            return Err(ClockError::NotRunning);
        }

        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        let record = clock.stop(&self.user.id)?;
        drop(clock);

        self.ledger.append(record.clone());
        info!(
            user_id = %self.user.id,
            record_id = record.id(),
            check_in = %time_format::format_hhmm(record.check_in()),
            check_out = %time_format::format_hhmm(record.check_out()),
            total_hours = record.total_hours(),
            "Shift finished"
        );
        Ok(record)
    }

    pub fn status(&self) -> SessionStatus {
        let clock = lock(&self.clock);
        let started_at = clock.checked_in_at();
        SessionStatus {
            active: clock.is_running(),
            check_in: started_at.map(|at| time_format::to_minute(at.time())),
            date: started_at.map(|at| at.date()),
            elapsed_seconds: clock.elapsed_seconds(),
        }
    }

    pub fn accrual(&self) -> Accrual {
        compute_accrual(&self.ledger, &self.salary)
    }

    /// Payslip covering only the sessions dated inside `period`.
    pub fn payslip(&self, period: &PayPeriod, generated_at: NaiveDateTime) -> Payslip {
        let in_period = self.ledger.filtered(|record| period.contains(record.date()));
        let accrual = compute_accrual(&in_period, &self.salary);
        Payslip {
            filename: payslip_filename(&self.user, period),
            body: render_payslip(&self.user, &self.salary, &accrual, period, generated_at),
        }
    }
}

pub type SharedContext = Arc<tokio::sync::Mutex<SessionContext>>;

/// Per-user session contexts. Nothing is shared between two users' entries.
pub struct SessionRegistry {
    sessions: Cache<UserId, SharedContext>,
    seed: Arc<SeedData>,
    salary: SalaryConfig,
    wall: Arc<dyn WallClock>,
}

impl SessionRegistry {
    pub fn new(
        seed: Arc<SeedData>,
        salary: SalaryConfig,
        idle_ttl: Duration,
        wall: Arc<dyn WallClock>,
    ) -> Self {
        let sessions = Cache::builder()
            .time_to_idle(idle_ttl)
            .eviction_listener(|user_id: Arc<UserId>, context: SharedContext, cause| {
                // dropping the context drops its ticker; an open session is lost
                match context.try_lock() {
                    Ok(ctx) if ctx.status().active => warn!(
                        user_id = %user_id,
                        ?cause,
                        elapsed_seconds = ctx.status().elapsed_seconds,
                        "Discarding abandoned running session"
                    ),
                    _ => info!(user_id = %user_id, ?cause, "Session context evicted"),
                }
            })
            .build();

        Self {
            sessions,
            seed,
            salary,
            wall,
        }
    }

    pub fn directory(&self) -> &SeedData {
        &self.seed
    }

    pub fn salary(&self) -> &SalaryConfig {
        &self.salary
    }

    pub fn wall(&self) -> &Arc<dyn WallClock> {
        &self.wall
    }

    /// The user's context, created with a seeded ledger on first use.
    pub async fn context_for(&self, user: &User) -> SharedContext {
        self.sessions
            .get_with(user.id.clone(), async {
                info!(user_id = %user.id, "Opening session context");
                let ledger = Ledger::seeded(&user.id, &self.seed.attendance);
                Arc::new(tokio::sync::Mutex::new(SessionContext::new(
                    user.clone(),
                    self.salary.clone(),
                    ledger,
                    self.wall.clone(),
                )))
            })
            .await
    }

    /// Live ledgers plus the seed records of users without a live context.
    pub async fn all_records(&self) -> Vec<AttendanceRecord> {
        let live: Vec<(Arc<UserId>, SharedContext)> = self.sessions.iter().collect();

        let mut records: Vec<AttendanceRecord> = self
            .seed
            .attendance
            .iter()
            .filter(|record| !live.iter().any(|(id, _)| id.as_ref() == record.user_id()))
            .cloned()
            .collect();

        for (_, context) in live {
            let ctx = context.lock().await;
            records.extend(ctx.ledger().iter().cloned());
        }
        records
    }
}
