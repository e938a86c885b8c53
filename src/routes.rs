use crate::{
    api::{admin, leave, reimbursement},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(web::resource("/me").route(web::get().to(handlers::me)))
            .service(
                web::scope("/leaves")
                    // /leaves
                    .service(web::resource("").route(web::post().to(leave::create_leave)))
                    // /leaves/my
                    .service(web::resource("/my").route(web::get().to(leave::my_leaves)))
                    // /leaves/team
                    .service(web::resource("/team").route(web::get().to(leave::team_leaves)))
                    // /leaves/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::patch().to(leave::approve_leave)),
                    )
                    // /leaves/{id}/reject
                    .service(
                        web::resource("/{id}/reject").route(web::patch().to(leave::reject_leave)),
                    )
                    // /leaves/{id}
                    .service(web::resource("/{id}").route(web::delete().to(leave::cancel_leave))),
            )
            .service(
                web::scope("/reimbursements")
                    // /reimbursements
                    .service(web::resource("").route(web::post().to(reimbursement::submit_claim)))
                    // /reimbursements/my
                    .service(web::resource("/my").route(web::get().to(reimbursement::my_claims)))
                    // /reimbursements/team
                    .service(
                        web::resource("/team").route(web::get().to(reimbursement::team_claims)),
                    )
                    // /reimbursements/admin/approved-unpaid
                    .service(
                        web::resource("/admin/approved-unpaid")
                            .route(web::get().to(reimbursement::approved_unpaid)),
                    )
                    // /reimbursements/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::patch().to(reimbursement::approve_claim)),
                    )
                    // /reimbursements/{id}/reject
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::patch().to(reimbursement::reject_claim)),
                    )
                    // /reimbursements/{id}/pay
                    .service(
                        web::resource("/{id}/pay").route(web::patch().to(reimbursement::pay_claim)),
                    )
                    // /reimbursements/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::delete().to(reimbursement::cancel_claim)),
                    ),
            )
            .service(
                web::scope("/admin")
                    // /admin/users
                    .service(web::resource("/users").route(web::get().to(admin::list_users)))
                    // /admin/users/{id}/role
                    .service(
                        web::resource("/users/{id}/role")
                            .route(web::patch().to(admin::update_user_role)),
                    )
                    // /admin/users/{id}/manager
                    .service(
                        web::resource("/users/{id}/manager")
                            .route(web::patch().to(admin::update_user_manager)),
                    ),
            ),
    );
}
