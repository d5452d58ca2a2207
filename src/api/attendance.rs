use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::attendance::SessionRegistry;
use crate::auth::identity::SessionUser;
use crate::error::AppError;
use crate::model::AttendanceRecord;
use crate::utils::time_format::serialize_hhmm;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClockInResponse {
    #[serde(serialize_with = "serialize_hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub check_in: NaiveTime,

    #[schema(value_type = String, format = "date", example = "2026-10-19")]
    pub date: NaiveDate,
}

/// Clock-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/clock-in",
    responses(
        (status = 200, description = "Clocked in", body = ClockInResponse),
        (status = 401, description = "Unknown or missing user"),
        (status = 409, description = "Already clocked in", body = Object, example = json!({
            "error": "session clock is already running"
        }))
    ),
    params(("X-User-Id" = String, Header, description = "Caller identity")),
    tag = "Attendance"
)]
pub async fn clock_in(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
) -> Result<impl Responder, AppError> {
    let context = registry.context_for(&caller.user).await;
    let mut ctx = context.lock().await;

    let check_in = ctx.clock_in()?;
    let date = ctx
        .status()
        .date
        .ok_or_else(|| AppError::Internal("Clock not running after clock-in".to_string()))?;

    Ok(HttpResponse::Ok().json(ClockInResponse { check_in, date }))
}

/// Finish-shift endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/finish-shift",
    responses(
        (status = 200, description = "Shift recorded", body = AttendanceRecord),
        (status = 401, description = "Unknown or missing user"),
        (status = 409, description = "No running session", body = Object, example = json!({
            "error": "session clock is not running"
        }))
    ),
    params(("X-User-Id" = String, Header, description = "Caller identity")),
    tag = "Attendance"
)]
pub async fn finish_shift(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
) -> Result<impl Responder, AppError> {
    let context = registry.context_for(&caller.user).await;
    let record = context.lock().await.finish_shift()?;

    Ok(HttpResponse::Ok().json(record))
}

#[utoipa::path(
    get,
    path = "/api/attendance/status",
    responses(
        (status = 200, body = crate::attendance::SessionStatus),
        (status = 401)
    ),
    params(("X-User-Id" = String, Header, description = "Caller identity")),
    tag = "Attendance"
)]
pub async fn status(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
) -> Result<impl Responder, AppError> {
    let context = registry.context_for(&caller.user).await;
    let status = context.lock().await.status();

    Ok(HttpResponse::Ok().json(status))
}

/// Completed sessions, most recent first
#[utoipa::path(
    get,
    path = "/api/attendance/history",
    responses(
        (status = 200, body = [AttendanceRecord]),
        (status = 401)
    ),
    params(("X-User-Id" = String, Header, description = "Caller identity")),
    tag = "Attendance"
)]
pub async fn history(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
) -> Result<impl Responder, AppError> {
    let context = registry.context_for(&caller.user).await;
    let ctx = context.lock().await;
    let records: Vec<&AttendanceRecord> = ctx.ledger().records_for_user(&caller.user.id);

    Ok(HttpResponse::Ok().json(records))
}
