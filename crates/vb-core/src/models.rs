//! # Domain Models
//!
//! Read-side shapes of the forum's content store. Every entity here is owned
//! and mutated elsewhere (posting, moderation, ranking jobs); this crate only
//! ever reads them.

use chrono::{DateTime, Utc};

/// Author name written over a submission when it is deleted. Tombstoned
/// submissions never appear in listings.
pub const TOMBSTONE_AUTHOR: &str = "deleted";

/// A named topical community (e.g. "pics", "news").
#[derive(Debug, Clone, PartialEq)]
pub struct Subverse {
    /// Unique name, also used as the URL slug
    pub name: String,
    pub description: Option<String>,
    pub subscribers: i64,
    pub created_at: DateTime<Utc>,
}

/// One entry of the guest-visible default community list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultSubverse {
    pub name: String,
    /// Display position; lower comes first
    pub position: i64,
}

/// Audit entry for a hostname that link submissions may not point to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannedDomain {
    pub hostname: String,
    pub reason: String,
    pub added_on: DateTime<Utc>,
    pub added_by: String,
}

/// Whether a submission is a self (text) post or a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Text,
    Link,
    /// A code this build does not know about, kept verbatim.
    Other(i64),
}

impl SubmissionKind {
    /// The integer stored in the `kind` column.
    pub fn code(self) -> i64 {
        match self {
            SubmissionKind::Text => 1,
            SubmissionKind::Link => 2,
            SubmissionKind::Other(code) => code,
        }
    }
}

impl From<i64> for SubmissionKind {
    fn from(code: i64) -> Self {
        match code {
            1 => SubmissionKind::Text,
            2 => SubmissionKind::Link,
            other => SubmissionKind::Other(other),
        }
    }
}

/// A user-posted item (link or text) within one subverse.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub kind: SubmissionKind,
    pub title: Option<String>,
    /// The URL for link submissions, or a short description
    pub link_description: Option<String>,
    pub content: Option<String>,
    pub subverse: String,
    /// Poster's name, or [`TOMBSTONE_AUTHOR`] once deleted
    pub author: String,
    pub posted_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub likes: i64,
    pub dislikes: i64,
    /// Precomputed by the ranking job; only sorted on here
    pub rank: f64,
    pub thumbnail: Option<String>,
}

impl Submission {
    pub fn is_tombstoned(&self) -> bool {
        self.author == TOMBSTONE_AUTHOR
    }
}

/// Listing projection of a submission used by the frontpage endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontpageEntry {
    pub id: i64,
    pub kind: SubmissionKind,
    pub title: Option<String>,
    pub link_description: Option<String>,
    pub subverse: String,
    pub posted_at: DateTime<Utc>,
    /// Live count of comment rows, computed at query time
    pub comment_count: i64,
    pub author: String,
}

/// A comment. Comments form a tree per submission through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub author: String,
    /// `None` for top-level comments
    pub parent_id: Option<i64>,
    pub submission_id: i64,
    pub posted_at: DateTime<Utc>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub likes: i64,
    pub dislikes: i64,
}
