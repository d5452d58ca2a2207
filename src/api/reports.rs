use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::attendance::SessionRegistry;
use crate::auth::identity::SessionUser;
use crate::config::Config;
use crate::error::AppError;
use crate::payroll::PayPeriod;
use crate::reporting::{self, RECENT_SESSIONS};
use crate::utils::time_format;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RecentQuery {
    /// Number of most recent sessions, 1 to 100
    #[schema(example = 7)]
    pub n: Option<usize>,
}

impl RecentQuery {
    fn count(&self) -> usize {
        self.n.unwrap_or(RECENT_SESSIONS).clamp(1, 100)
    }
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct MonthQuery {
    /// `YYYY-MM`, defaults to the current month
    #[schema(example = "2026-10")]
    pub month: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct OverviewQuery {
    /// `YYYY-MM-DD`, defaults to today
    #[schema(example = "2026-10-19")]
    pub date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/reports/hours",
    params(RecentQuery, ("X-User-Id" = String, Header, description = "Caller identity")),
    responses((status = 200, body = [reporting::HoursPoint]), (status = 401)),
    tag = "Reports"
)]
pub async fn hours(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
    query: web::Query<RecentQuery>,
) -> Result<impl Responder, AppError> {
    let context = registry.context_for(&caller.user).await;
    let series = reporting::hours_series(context.lock().await.ledger(), query.count());

    Ok(HttpResponse::Ok().json(series))
}

#[utoipa::path(
    get,
    path = "/api/reports/punctuality",
    params(RecentQuery, ("X-User-Id" = String, Header, description = "Caller identity")),
    responses((status = 200, body = [reporting::PunctualityPoint]), (status = 401)),
    tag = "Reports"
)]
pub async fn punctuality(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
    config: web::Data<Config>,
    query: web::Query<RecentQuery>,
) -> Result<impl Responder, AppError> {
    let context = registry.context_for(&caller.user).await;
    let series = reporting::punctuality_series(
        context.lock().await.ledger(),
        query.count(),
        config.shift_start,
    );

    Ok(HttpResponse::Ok().json(series))
}

#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    params(MonthQuery, ("X-User-Id" = String, Header, description = "Caller identity")),
    responses((status = 200, body = reporting::MonthlySummary), (status = 400), (status = 401)),
    tag = "Reports"
)]
pub async fn monthly(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
    config: web::Data<Config>,
    query: web::Query<MonthQuery>,
) -> Result<impl Responder, AppError> {
    let period = match query.month.as_deref() {
        Some(raw) => raw.parse::<PayPeriod>().map_err(|_| {
            AppError::BadRequest(format!("Invalid month '{raw}', expected YYYY-MM"))
        })?,
        None => PayPeriod::containing(registry.wall().now().date()),
    };

    let context = registry.context_for(&caller.user).await;
    let summary = reporting::monthly_summary(
        context.lock().await.ledger(),
        &period,
        config.standard_shift_hours,
    );

    Ok(HttpResponse::Ok().json(summary))
}

/// Head counts for one day across all employees
#[utoipa::path(
    get,
    path = "/api/admin/overview",
    params(OverviewQuery, ("X-User-Id" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, body = reporting::AttendanceOverview),
        (status = 400),
        (status = 401),
        (status = 403, description = "Admin only")
    ),
    tag = "Reports"
)]
pub async fn overview(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
    query: web::Query<OverviewQuery>,
) -> Result<impl Responder, AppError> {
    caller.require_admin()?;

    let date = match query.date.as_deref() {
        Some(raw) => time_format::parse_date(raw).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid date '{raw}', expected YYYY-MM-DD"))
        })?,
        None => registry.wall().now().date(),
    };

    let records = registry.all_records().await;
    let overview =
        reporting::daily_overview(&records, date, registry.directory().employee_count());

    Ok(HttpResponse::Ok().json(overview))
}
