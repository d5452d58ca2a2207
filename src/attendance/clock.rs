use chrono::{Local, NaiveDateTime, NaiveTime};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ClockError;
use crate::model::attendance::round_hours;
use crate::model::{AttendanceRecord, AttendanceStatus, UserId};
use crate::utils::time_format;

/// Source of the current wall-clock time.
pub trait WallClock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local time zone of the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockState {
    Idle,
    Running {
        started_at: NaiveDateTime,
        elapsed_seconds: u64,
    },
}

/// Two-state attendance stopwatch for a single user.
///
/// `Idle --start--> Running --tick--> Running --stop--> Idle`. Calls made from
/// the wrong state return a [`ClockError`] and leave the state untouched.
pub struct SessionClock {
    state: ClockState,
    wall: Arc<dyn WallClock>,
}

impl SessionClock {
    pub fn new(wall: Arc<dyn WallClock>) -> Self {
        Self {
            state: ClockState::Idle,
            wall,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }

    /// Seconds accumulated by the current session, zero when idle.
    pub fn elapsed_seconds(&self) -> u64 {
        match self.state {
            ClockState::Running {
                elapsed_seconds, ..
            } => elapsed_seconds,
            ClockState::Idle => 0,
        }
    }

    /// Check-in time of the current session.
    pub fn checked_in_at(&self) -> Option<NaiveDateTime> {
        match self.state {
            ClockState::Running { started_at, .. } => Some(started_at),
            ClockState::Idle => None,
        }
    }

    pub fn start(&mut self) -> Result<NaiveTime, ClockError> {
        if self.is_running() {
            return Err(ClockError::AlreadyRunning);
        }

        let started_at = self.wall.now();
        self.state = ClockState::Running {
            started_at,
            elapsed_seconds: 0,
        };
        Ok(time_format::to_minute(started_at.time()))
    }

    pub fn tick(&mut self) -> Result<u64, ClockError> {
        match &mut self.state {
            ClockState::Running {
                elapsed_seconds, ..
            } => {
                *elapsed_seconds += 1;
                Ok(*elapsed_seconds)
            }
            ClockState::Idle => Err(ClockError::NotRunning),
        }
    }

    /// Close the session and produce its record.
    pub fn stop(&mut self, user_id: &UserId) -> Result<AttendanceRecord, ClockError> {
        let ClockState::Running {
            started_at,
            elapsed_seconds,
        } = self.state
        else {
            return Err(ClockError::NotRunning);
        };

        let checked_out_at = self.wall.now();
        let total_hours = round_hours(elapsed_seconds as f64 / 3600.0);

        let record = AttendanceRecord::new(
            Uuid::new_v4().to_string(),
            user_id.clone(),
            started_at.date(),
            started_at.time(),
            checked_out_at.time(),
            AttendanceStatus::Present,
            total_hours,
        )?;

        self.state = ClockState::Idle;
        Ok(record)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::Duration;
    use std::sync::Mutex;

    /// Manually advanced wall clock.
    pub struct ManualClock(Mutex<NaiveDateTime>);

    impl ManualClock {
        pub fn at(now: NaiveDateTime) -> Arc<Self> {
            Arc::new(Self(Mutex::new(now)))
        }

        pub fn advance(&self, seconds: i64) {
            let mut now = self.0.lock().unwrap();
            *now += Duration::seconds(seconds);
        }
    }

    impl WallClock for ManualClock {
        fn now(&self) -> NaiveDateTime {
            *self.0.lock().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;
    use chrono::NaiveDate;

    fn nine_am() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn start_captures_check_in_and_resets_elapsed() {
        let wall = ManualClock::at(nine_am());
        let mut clock = SessionClock::new(wall);

        assert!(!clock.is_running());
        let check_in = clock.start().unwrap();
        assert_eq!(time_format::format_hhmm(check_in), "09:00");
        assert!(clock.is_running());
        assert_eq!(clock.elapsed_seconds(), 0);
    }

    #[test]
    fn ticks_increase_by_exactly_one() {
        let mut clock = SessionClock::new(ManualClock::at(nine_am()));
        clock.start().unwrap();

        let mut previous = clock.elapsed_seconds();
        for _ in 0..500 {
            let next = clock.tick().unwrap();
            assert_eq!(next, previous + 1);
            previous = next;
        }
        assert_eq!(clock.elapsed_seconds(), 500);
    }

    #[test]
    fn full_shift_yields_eight_hours() {
        let wall = ManualClock::at(nine_am());
        let mut clock = SessionClock::new(wall.clone());
        let user = UserId::from("2");

        clock.start().unwrap();
        for _ in 0..28_800 {
            clock.tick().unwrap();
        }
        wall.advance(28_800);
        let record = clock.stop(&user).unwrap();

        assert_eq!(record.total_hours(), 8.0);
        assert_eq!(time_format::format_hhmm(record.check_in()), "09:00");
        assert_eq!(time_format::format_hhmm(record.check_out()), "17:00");
        assert_eq!(record.status(), AttendanceStatus::Present);
        assert_eq!(record.date(), nine_am().date());
        assert_eq!(record.user_id(), &user);
        assert!(!clock.is_running());
    }

    #[test]
    fn stop_rounds_partial_hours() {
        let mut clock = SessionClock::new(ManualClock::at(nine_am()));
        clock.start().unwrap();
        for _ in 0..5_000 {
            clock.tick().unwrap();
        }
        let record = clock.stop(&UserId::from("2")).unwrap();
        assert_eq!(record.total_hours(), round_hours(5_000.0 / 3600.0));
        assert_eq!(record.total_hours(), 1.39);
    }

    #[test]
    fn invalid_transitions_are_errors() {
        let mut clock = SessionClock::new(ManualClock::at(nine_am()));
        let user = UserId::from("2");

        assert_eq!(clock.tick(), Err(ClockError::NotRunning));
        assert_eq!(clock.stop(&user).unwrap_err(), ClockError::NotRunning);

        clock.start().unwrap();
        clock.tick().unwrap();
        assert_eq!(clock.start(), Err(ClockError::AlreadyRunning));
        // the rejected start did not reset the running session
        assert_eq!(clock.elapsed_seconds(), 1);
    }

    #[test]
    fn restart_after_stop_begins_from_zero() {
        let wall = ManualClock::at(nine_am());
        let mut clock = SessionClock::new(wall.clone());
        let user = UserId::from("2");

        clock.start().unwrap();
        clock.tick().unwrap();
        let first = clock.stop(&user).unwrap();

        wall.advance(3600);
        let check_in = clock.start().unwrap();
        assert_eq!(time_format::format_hhmm(check_in), "10:00");
        assert_eq!(clock.elapsed_seconds(), 0);
        let second = clock.stop(&user).unwrap();
        assert_ne!(first.id(), second.id());
    }
}
