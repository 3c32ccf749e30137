//! # vb-api Handlers
//!
//! This module coordinates the flow between HTTP requests and the query service.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use vb_core::service::QueryService;

use crate::error::ApiError;
use crate::render;

/// State shared across all Actix-web workers.
pub struct AppState {
    pub queries: QueryService,
}

#[derive(Debug, Deserialize)]
pub struct SubverseQuery {
    pub subverse: String,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

type HandlerResult = Result<HttpResponse, ApiError>;

/// GET /api/defaultsubverses
pub async fn default_subverses(data: web::Data<AppState>) -> HandlerResult {
    let names = data.queries.list_default_subverses().await?;
    Ok(HttpResponse::Ok().json(names))
}

/// GET /api/bannedhostnames
pub async fn banned_hostnames(data: web::Data<AppState>) -> HandlerResult {
    let banned = data.queries.list_banned_hostnames().await?;
    let lines: Vec<String> = banned.iter().map(render::banned_hostname).collect();
    Ok(HttpResponse::Ok().json(lines))
}

/// GET /api/top200subverses
///
/// Unbounded unless a cap is configured; see `Settings::top_subverses_cap`.
pub async fn top_subverses(data: web::Data<AppState>) -> HandlerResult {
    let subverses = data.queries.list_top_subverses().await?;
    let lines: Vec<String> = subverses.iter().map(render::top_subverse).collect();
    Ok(HttpResponse::Ok().json(lines))
}

/// GET /api/frontpage
pub async fn frontpage(data: web::Data<AppState>) -> HandlerResult {
    let entries = data.queries.frontpage().await?;
    let lines: Vec<String> = entries.iter().map(render::frontpage_entry).collect();
    Ok(HttpResponse::Ok().json(lines))
}

/// GET /api/subversefrontpage?subverse=name
pub async fn subverse_frontpage(
    data: web::Data<AppState>,
    query: web::Query<SubverseQuery>,
) -> HandlerResult {
    let entries = data.queries.subverse_frontpage(&query.subverse).await?;
    let lines: Vec<String> = entries.iter().map(render::subverse_frontpage_entry).collect();
    Ok(HttpResponse::Ok().json(lines))
}

/// GET /api/singlesubmission?id=N
pub async fn single_submission(
    data: web::Data<AppState>,
    query: web::Query<IdQuery>,
) -> HandlerResult {
    let submission = data.queries.submission(query.id).await?;
    Ok(HttpResponse::Ok().json(render::SubmissionRecord::from(&submission)))
}

/// GET /api/singlecomment?id=N
pub async fn single_comment(
    data: web::Data<AppState>,
    query: web::Query<IdQuery>,
) -> HandlerResult {
    let comment = data.queries.comment(query.id).await?;
    Ok(HttpResponse::Ok().json(render::CommentRecord::from(&comment)))
}
