//! # vb-api
//!
//! The web routing layer for verse-board's public read API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod render;

use actix_web::web;

/// Configures the `/api` routes.
///
/// # Developer Note
/// The paths are flat and lowercase because existing API clients call them
/// that way; do not nest them under resource scopes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/defaultsubverses", web::get().to(handlers::default_subverses))
            .route("/bannedhostnames", web::get().to(handlers::banned_hostnames))
            .route("/top200subverses", web::get().to(handlers::top_subverses))
            .route("/frontpage", web::get().to(handlers::frontpage))
            .route("/subversefrontpage", web::get().to(handlers::subverse_frontpage))
            .route("/singlesubmission", web::get().to(handlers::single_submission))
            .route("/singlecomment", web::get().to(handlers::single_comment)),
    );
}
