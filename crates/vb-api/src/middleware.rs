//! verse-board/crates/vb-api/src/middleware.rs Middleware
//!
//! Access logging and CORS for the public API.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Returns the access log middleware.
pub fn standard_middleware() -> Logger {
    // remote-ip "request-line" status-code response-size "referrer" "user-agent" time
    Logger::default()
}

/// The API is read-only and public, so any origin may call it.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET"])
        .max_age(3600)
}
