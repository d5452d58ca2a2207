use crate::{
    api::{attendance, payroll, reports},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::web;

fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap_or_else(|| {
            tracing::warn!(requests_per_min, "Invalid rate limit, using governor defaults");
            GovernorConfig::default()
        });
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(build_limiter(config.rate_protected_per_min))
            .service(
                web::scope("/attendance")
                    // /attendance/clock-in
                    .service(web::resource("/clock-in").route(web::post().to(attendance::clock_in)))
                    // /attendance/finish-shift
                    .service(
                        web::resource("/finish-shift")
                            .route(web::post().to(attendance::finish_shift)),
                    )
                    .service(web::resource("/status").route(web::get().to(attendance::status)))
                    .service(web::resource("/history").route(web::get().to(attendance::history))),
            )
            .service(
                web::scope("/payroll")
                    .service(web::resource("/accrual").route(web::get().to(payroll::accrual)))
                    // /payroll/payslip?period=YYYY-MM
                    .service(web::resource("/payslip").route(web::get().to(payroll::payslip))),
            )
            .service(
                web::scope("/reports")
                    .service(web::resource("/hours").route(web::get().to(reports::hours)))
                    .service(
                        web::resource("/punctuality").route(web::get().to(reports::punctuality)),
                    )
                    .service(web::resource("/monthly").route(web::get().to(reports::monthly))),
            )
            .service(
                web::scope("/admin")
                    .service(web::resource("/overview").route(web::get().to(reports::overview))),
            ),
    );
}
