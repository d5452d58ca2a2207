use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Rejected session clock transitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClockError {
    #[error("session clock is already running")]
    AlreadyRunning,

    #[error("session clock is not running")]
    NotRunning,

    #[error("invalid attendance record: {0}")]
    InvalidRecord(#[from] RecordError),
}

/// An attendance record that fails the ledger invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("record id must not be empty")]
    EmptyId,

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error("total hours must be a non-negative number, got {0}")]
    InvalidHours(f64),

    #[error("malformed date '{0}', expected YYYY-MM-DD")]
    MalformedDate(String),

    #[error("malformed time '{0}', expected HH:MM")]
    MalformedTime(String),

    #[error("unknown attendance status '{0}'")]
    UnknownStatus(String),

    #[error("record {0} has no check-out time")]
    MissingCheckOut(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("total working days per period must be greater than zero, got {0}")]
    InvalidWorkingDays(i64),

    #[error("monthly salary must not be negative, got {0}")]
    NegativeSalary(String),

    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidVar {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        ConfigError::InvalidVar {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Errors surfaced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Conflict(#[from] ClockError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Conflict(ClockError::InvalidRecord(_)) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        HttpResponse::build(status).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_errors_map_to_conflict() {
        let err = AppError::from(ClockError::AlreadyRunning);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "session clock is already running");
    }

    #[test]
    fn invalid_var_message_names_the_key() {
        let err = ConfigError::invalid("MONTHLY_SALARY", "abc", "not a number");
        assert_eq!(
            err.to_string(),
            "invalid value 'abc' for MONTHLY_SALARY: not a number"
        );
    }
}
