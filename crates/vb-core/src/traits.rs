//! # Core Traits (Ports)
//!
//! Any storage plugin must implement these traits to be used by the binary.

use crate::models::{BannedDomain, Comment, DefaultSubverse, FrontpageEntry, Submission, Subverse};
use async_trait::async_trait;

/// Read-only access to the forum's content store.
///
/// Orderings are part of the contract; ties are broken deterministically by
/// each implementation.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ContentRepo: Send + Sync {
    /// Default subverses, ascending by display position.
    async fn default_subverses(&self) -> anyhow::Result<Vec<DefaultSubverse>>;

    /// Banned hostnames, oldest first.
    async fn banned_domains(&self) -> anyhow::Result<Vec<BannedDomain>>;

    /// Subverses by subscriber count, largest first. `None` returns all of them.
    async fn subverses_by_subscribers(&self, limit: Option<i64>) -> anyhow::Result<Vec<Subverse>>;

    /// Highest ranked non-tombstoned submissions posted to any default subverse.
    async fn frontpage(&self, limit: i64) -> anyhow::Result<Vec<FrontpageEntry>>;

    /// Highest ranked non-tombstoned submissions of one subverse. Unknown
    /// names simply match nothing.
    async fn subverse_frontpage(&self, subverse: &str, limit: i64) -> anyhow::Result<Vec<FrontpageEntry>>;

    async fn find_submission(&self, id: i64) -> anyhow::Result<Option<Submission>>;
    async fn find_comment(&self, id: i64) -> anyhow::Result<Option<Comment>>;
}
