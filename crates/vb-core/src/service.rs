//! # QueryService
//!
//! The read operations exposed by the public API. Each call is a pure
//! projection over a [`ContentRepo`]; nothing here mutates state.

use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{BannedDomain, Comment, FrontpageEntry, Submission, Subverse};
use crate::traits::ContentRepo;

/// Number of submissions on a frontpage.
pub const FRONTPAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct QueryService {
    repo: Arc<dyn ContentRepo>,
    /// Optional cap on the top subverses listing. Unbounded when `None`.
    top_subverses_cap: Option<i64>,
}

impl QueryService {
    pub fn new(repo: Arc<dyn ContentRepo>) -> Self {
        Self {
            repo,
            top_subverses_cap: None,
        }
    }

    pub fn with_top_subverses_cap(mut self, cap: Option<i64>) -> Self {
        self.top_subverses_cap = cap;
        self
    }

    /// Names of the guest-visible default subverses, in display order.
    pub async fn list_default_subverses(&self) -> Result<Vec<String>> {
        let defaults = self.repo.default_subverses().await.map_err(store_fault)?;
        Ok(defaults.into_iter().map(|d| d.name).collect())
    }

    /// Banned hostnames in the order they were added.
    pub async fn list_banned_hostnames(&self) -> Result<Vec<BannedDomain>> {
        self.repo.banned_domains().await.map_err(store_fault)
    }

    /// Subverses ordered by subscriber count, largest first.
    pub async fn list_top_subverses(&self) -> Result<Vec<Subverse>> {
        self.repo
            .subverses_by_subscribers(self.top_subverses_cap)
            .await
            .map_err(store_fault)
    }

    /// The [`FRONTPAGE_SIZE`] best ranked submissions across the default subverses.
    pub async fn frontpage(&self) -> Result<Vec<FrontpageEntry>> {
        self.repo.frontpage(FRONTPAGE_SIZE).await.map_err(store_fault)
    }

    /// Same as [`QueryService::frontpage`] for a single subverse. An unknown
    /// name yields an empty list.
    pub async fn subverse_frontpage(&self, subverse: &str) -> Result<Vec<FrontpageEntry>> {
        log::debug!("Loading frontpage of subverse {subverse}");
        self.repo
            .subverse_frontpage(subverse, FRONTPAGE_SIZE)
            .await
            .map_err(store_fault)
    }

    /// A single submission by id, tombstoned or not.
    pub async fn submission(&self, id: i64) -> Result<Submission> {
        match self.repo.find_submission(id).await.map_err(store_fault)? {
            Some(submission) => {
                if submission.is_tombstoned() {
                    log::debug!("Submission {id} is tombstoned; served by id only");
                }
                Ok(submission)
            }
            None => {
                log::debug!("Submission {id} not found");
                Err(AppError::NotFound("Submission", id.to_string()))
            }
        }
    }

    pub async fn comment(&self, id: i64) -> Result<Comment> {
        match self.repo.find_comment(id).await.map_err(store_fault)? {
            Some(comment) => Ok(comment),
            None => {
                log::debug!("Comment {id} not found");
                Err(AppError::NotFound("Comment", id.to_string()))
            }
        }
    }
}

fn store_fault(err: anyhow::Error) -> AppError {
    log::error!("Content store query failed: {err:#}");
    AppError::from(err)
}
