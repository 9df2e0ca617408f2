use crate::{
    api::{department, employee, index::index},
    config::Config,
    error::ApiError,
};
use actix_cors::Cors;
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, web};

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Malformed bodies and ids answer in the same JSON shape as handler errors.
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| ApiError::NotFound("Resource not found").into()),
    );

    cfg.service(index);

    match build_limiter(config.rate_limit_per_min) {
        Some(limiter) => {
            cfg.service(api_scope(&config.api_prefix).wrap(limiter));
        }
        None => {
            cfg.service(api_scope(&config.api_prefix));
        }
    }
}

/// Any origin, method and header, answered with a wildcard origin.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

// Static segments are registered ahead of `/{id}` so they are never parsed as ids.
fn api_scope(prefix: &str) -> Scope {
    web::scope(prefix)
        .service(
            web::scope("/employees")
                // /employees
                .service(
                    web::resource("")
                        .route(web::get().to(employee::list_employees))
                        .route(web::post().to(employee::create_employee)),
                )
                // /employees/salary-distribution
                .service(
                    web::resource("/salary-distribution")
                        .route(web::get().to(employee::salary_distribution)),
                )
                // /employees/{id}
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(employee::get_employee))
                        .route(web::put().to(employee::update_employee))
                        .route(web::delete().to(employee::delete_employee)),
                ),
        )
        .service(
            web::scope("/departments")
                // /departments
                .service(web::resource("").route(web::get().to(department::list_departments)))
                // /departments/statistics
                .service(
                    web::resource("/statistics")
                        .route(web::get().to(department::department_statistics)),
                )
                // /departments/{id}
                .service(web::resource("/{id}").route(web::get().to(department::get_department))),
        )
}

/// Per-IP limiter; `None` when the budget is zero.
fn build_limiter(requests_per_min: u32) -> Option<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    if requests_per_min == 0 {
        return None;
    }
    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()?;
    Some(Governor::new(&cfg))
}
