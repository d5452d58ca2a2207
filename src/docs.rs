use crate::api::attendance::ClockInResponse;
use crate::api::payroll::{AccrualResponse, PayslipQuery};
use crate::api::reports::{MonthQuery, OverviewQuery, RecentQuery};
use crate::attendance::SessionStatus;
use crate::model::{AttendanceRecord, AttendanceStatus, Role};
use crate::reporting::{AttendanceOverview, HoursPoint, MonthlySummary, PunctualityPoint};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AttendX API",
        version = "0.1.0",
        description = r#"
## AttendX

Attendance sessions and payroll accrual for employees.

### Key Features
- **Session clock**
  - Clock in, watch the live elapsed time, finish the shift
- **Attendance history**
  - Every finished shift becomes a record in the caller's ledger
- **Payroll**
  - Accrued pay from days worked, plain-text payslip download
- **Reports**
  - Hours and punctuality over recent sessions, monthly summary, daily overview for admins

### Identity
Callers are identified by the `X-User-Id` header set by the upstream gateway.
Unknown or missing ids get **401**, admin-only endpoints return **403** to employees.

---
Built with **Rust**, **Actix Web**, **Moka**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::clock_in,
        crate::api::attendance::finish_shift,
        crate::api::attendance::status,
        crate::api::attendance::history,

        crate::api::payroll::accrual,
        crate::api::payroll::payslip,

        crate::api::reports::hours,
        crate::api::reports::punctuality,
        crate::api::reports::monthly,
        crate::api::reports::overview
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            Role,
            ClockInResponse,
            SessionStatus,
            AccrualResponse,
            PayslipQuery,
            RecentQuery,
            MonthQuery,
            OverviewQuery,
            HoursPoint,
            PunctualityPoint,
            MonthlySummary,
            AttendanceOverview
        )
    ),
    tags(
        (name = "Attendance", description = "Session clock and attendance history"),
        (name = "Payroll", description = "Accrual and payslips"),
        (name = "Reports", description = "Hours, punctuality and summaries"),
    )
)]
pub struct ApiDoc;
