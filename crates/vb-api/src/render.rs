//! # Output rendering
//!
//! The list endpoints answer with flat, human-readable strings; the single
//! entity endpoints answer with JSON records. Both shapes are kept stable for
//! existing API consumers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use vb_core::models::{BannedDomain, Comment, FrontpageEntry, Submission, Subverse};

const DATE_FORMAT: &str = "%-m/%-d/%Y %-I:%M:%S %p";

fn date(value: &DateTime<Utc>) -> String {
    value.format(DATE_FORMAT).to_string()
}

fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

pub fn banned_hostname(domain: &BannedDomain) -> String {
    format!(
        "Hostname: {}, reason: {}, added on: {}, added by: {}",
        domain.hostname,
        domain.reason,
        date(&domain.added_on),
        domain.added_by
    )
}

pub fn top_subverse(subverse: &Subverse) -> String {
    format!(
        "Name: {},Description: {},Subscribers: {},Created: {}",
        subverse.name,
        text(&subverse.description),
        subverse.subscribers,
        date(&subverse.created_at)
    )
}

pub fn frontpage_entry(entry: &FrontpageEntry) -> String {
    format!(
        "Type: {},Title: {},Link description: {},Subverse: {},Date: {},Comments: {},Author: {}",
        entry.kind.code(),
        text(&entry.title),
        text(&entry.link_description),
        entry.subverse,
        date(&entry.posted_at),
        entry.comment_count,
        entry.author
    )
}

/// Like [`frontpage_entry`] minus the subverse, which the caller already knows.
pub fn subverse_frontpage_entry(entry: &FrontpageEntry) -> String {
    format!(
        "Type: {},Title: {},Link description: {},Date: {},Comments: {},Author: {}",
        entry.kind.code(),
        text(&entry.title),
        text(&entry.link_description),
        date(&entry.posted_at),
        entry.comment_count,
        entry.author
    )
}

/// Public fields of a submission. The author is deliberately absent.
#[derive(Debug, Serialize)]
pub struct SubmissionRecord<'a> {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub last_edit_date: Option<DateTime<Utc>>,
    pub likes: i64,
    pub dislikes: i64,
    pub rank: f64,
    pub thumbnail: Option<&'a str>,
    pub subverse: &'a str,
    #[serde(rename = "type")]
    pub kind: i64,
    pub title: Option<&'a str>,
    pub link_description: Option<&'a str>,
    pub content: Option<&'a str>,
}

impl<'a> From<&'a Submission> for SubmissionRecord<'a> {
    fn from(s: &'a Submission) -> Self {
        Self {
            id: s.id,
            date: s.posted_at,
            last_edit_date: s.last_edited_at,
            likes: s.likes,
            dislikes: s.dislikes,
            rank: s.rank,
            thumbnail: s.thumbnail.as_deref(),
            subverse: &s.subverse,
            kind: s.kind.code(),
            title: s.title.as_deref(),
            link_description: s.link_description.as_deref(),
            content: s.content.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentRecord<'a> {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub last_edit_date: Option<DateTime<Utc>>,
    pub likes: i64,
    pub dislikes: i64,
    pub content: &'a str,
    pub parent_id: Option<i64>,
    pub submission_id: i64,
    pub name: &'a str,
}

impl<'a> From<&'a Comment> for CommentRecord<'a> {
    fn from(c: &'a Comment) -> Self {
        Self {
            id: c.id,
            date: c.posted_at,
            last_edit_date: c.last_edited_at,
            likes: c.likes,
            dislikes: c.dislikes,
            content: &c.content,
            parent_id: c.parent_id,
            submission_id: c.submission_id,
            name: &c.author,
        }
    }
}
