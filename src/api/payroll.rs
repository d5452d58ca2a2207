use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::attendance::SessionRegistry;
use crate::auth::identity::SessionUser;
use crate::error::AppError;
use crate::payroll::{Accrual, PayPeriod, money};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "monthlySalary": "4400.00",
    "totalWorkingDays": 22,
    "dailyRate": "200.00",
    "daysWorked": 3,
    "remainingDays": 19,
    "payable": "600.00",
    "attendancePercentage": "13.64"
}))]
pub struct AccrualResponse {
    pub monthly_salary: String,
    pub total_working_days: u32,
    pub daily_rate: String,
    pub days_worked: u32,
    pub remaining_days: u32,
    pub payable: String,
    pub attendance_percentage: String,
}

impl AccrualResponse {
    fn new(accrual: &Accrual, monthly_salary: &bigdecimal::BigDecimal) -> Self {
        Self {
            monthly_salary: money(monthly_salary).to_string(),
            total_working_days: accrual.total_working_days,
            daily_rate: money(&accrual.daily_rate).to_string(),
            days_worked: accrual.days_worked,
            remaining_days: accrual.remaining_days,
            payable: money(&accrual.payable).to_string(),
            attendance_percentage: accrual.attendance_percentage().to_string(),
        }
    }
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PayslipQuery {
    /// Pay period as `YYYY-MM`, defaults to the current month
    #[schema(example = "2026-10")]
    pub period: Option<String>,
}

/// Payroll accrued so far from the caller's attendance
#[utoipa::path(
    get,
    path = "/api/payroll/accrual",
    responses(
        (status = 200, body = AccrualResponse),
        (status = 401)
    ),
    params(("X-User-Id" = String, Header, description = "Caller identity")),
    tag = "Payroll"
)]
pub async fn accrual(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
) -> Result<impl Responder, AppError> {
    let context = registry.context_for(&caller.user).await;
    let ctx = context.lock().await;
    let accrual = ctx.accrual();

    Ok(HttpResponse::Ok().json(AccrualResponse::new(&accrual, ctx.salary().monthly_salary())))
}

/// Download the caller's payslip as plain text
#[utoipa::path(
    get,
    path = "/api/payroll/payslip",
    params(
        PayslipQuery,
        ("X-User-Id" = String, Header, description = "Caller identity")
    ),
    responses(
        (
            status = 200,
            description = "Payslip attachment",
            content_type = "text/plain",
            body = String
        ),
        (status = 400, description = "Malformed period"),
        (status = 401)
    ),
    tag = "Payroll"
)]
pub async fn payslip(
    caller: SessionUser,
    registry: web::Data<SessionRegistry>,
    query: web::Query<PayslipQuery>,
) -> Result<impl Responder, AppError> {
    let now = registry.wall().now();
    let period = match query.period.as_deref() {
        Some(raw) => raw.parse::<PayPeriod>().map_err(|_| {
            AppError::BadRequest(format!("Invalid period '{raw}', expected YYYY-MM"))
        })?,
        None => PayPeriod::containing(now.date()),
    };

    let context = registry.context_for(&caller.user).await;
    let slip = context.lock().await.payslip(&period, now);

    tracing::info!(
        user_id = %caller.user.id,
        period = %period.label(),
        filename = %slip.filename,
        "Payslip generated"
    );

    Ok(HttpResponse::Ok()
        .insert_header(ContentType::plaintext())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(slip.filename)],
        })
        .body(slip.body))
}
