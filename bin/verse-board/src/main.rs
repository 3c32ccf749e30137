//! # verse-board Binary
//!
//! The entry point that assembles the application based on compile-time features.

mod settings;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use vb_api::handlers::AppState;
use vb_api::middleware::{cors_policy, standard_middleware};
use vb_core::service::QueryService;
use vb_core::traits::ContentRepo;

use crate::settings::Settings;

// Feature-gated imports
#[cfg(feature = "db-sqlite")]
use vb_db_sqlite::SqliteContentRepo;

#[cfg(not(feature = "db-sqlite"))]
compile_error!("verse-board needs a storage backend; enable the `db-sqlite` feature");

#[cfg(feature = "db-sqlite")]
async fn content_repo(settings: &Settings) -> anyhow::Result<Arc<dyn ContentRepo>> {
    let repo = SqliteContentRepo::connect(&settings.database_url, settings.max_connections).await?;
    Ok(Arc::new(repo))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let settings = Settings::load()?;

    // 1. Initialize Database Implementation
    let repo = content_repo(&settings).await?;

    // 2. Wrap in AppState (dynamic dispatch keeps handlers backend-agnostic)
    let state = web::Data::new(AppState {
        queries: QueryService::new(repo).with_top_subverses_cap(settings.top_subverses_cap),
    });

    log::info!("verse-board starting on http://{}:{}", settings.host, settings.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors_policy())
            .wrap(standard_middleware())
            .configure(vb_api::configure_routes)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await?;

    Ok(())
}
