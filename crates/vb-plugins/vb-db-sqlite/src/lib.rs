//! # vb-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `vb-core` domain models.

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use vb_core::models::{
    BannedDomain, Comment, DefaultSubverse, FrontpageEntry, Submission, SubmissionKind, Subverse,
    TOMBSTONE_AUTHOR,
};
use vb_core::traits::ContentRepo;

const FRONTPAGE_COLUMNS: &str = "s.id, s.kind, s.title, s.link_description, s.subverse, s.posted_at, s.author, \
     (SELECT COUNT(*) FROM comments c WHERE c.submission_id = s.id) AS comment_count";

pub struct SqliteContentRepo {
    pool: SqlitePool,
}

impl SqliteContentRepo {
    /// Connects with a default pool size of 5.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        Self::connect(url, 5).await
    }

    /// Opens the pool and applies pending migrations.
    ///
    /// In-memory databases live and die with their connection, so they get a
    /// single connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .with_context(|| format!("invalid SQLite URL {url}"))?
            .create_if_missing(true)
            .foreign_keys(true);

        let mut pool_options = SqlitePoolOptions::new();
        if url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None::<std::time::Duration>)
                .max_lifetime(None::<std::time::Duration>);
        } else {
            pool_options = pool_options.max_connections(max_connections);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;

        log::info!("SQLite content store ready at {url}");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn row_to_frontpage_entry(row: &SqliteRow) -> Result<FrontpageEntry, sqlx::Error> {
    Ok(FrontpageEntry {
        id: row.try_get("id")?,
        kind: SubmissionKind::from(row.try_get::<i64, _>("kind")?),
        title: row.try_get("title")?,
        link_description: row.try_get("link_description")?,
        subverse: row.try_get("subverse")?,
        posted_at: row.try_get("posted_at")?,
        comment_count: row.try_get("comment_count")?,
        author: row.try_get("author")?,
    })
}

fn row_to_submission(row: &SqliteRow) -> Result<Submission, sqlx::Error> {
    Ok(Submission {
        id: row.try_get("id")?,
        kind: SubmissionKind::from(row.try_get::<i64, _>("kind")?),
        title: row.try_get("title")?,
        link_description: row.try_get("link_description")?,
        content: row.try_get("content")?,
        subverse: row.try_get("subverse")?,
        author: row.try_get("author")?,
        posted_at: row.try_get("posted_at")?,
        last_edited_at: row.try_get("last_edited_at")?,
        likes: row.try_get("likes")?,
        dislikes: row.try_get("dislikes")?,
        rank: row.try_get("rank")?,
        thumbnail: row.try_get("thumbnail")?,
    })
}

fn row_to_comment(row: &SqliteRow) -> Result<Comment, sqlx::Error> {
    Ok(Comment {
        id: row.try_get("id")?,
        content: row.try_get("content")?,
        author: row.try_get("author")?,
        parent_id: row.try_get("parent_id")?,
        submission_id: row.try_get("submission_id")?,
        posted_at: row.try_get("posted_at")?,
        last_edited_at: row.try_get("last_edited_at")?,
        likes: row.try_get("likes")?,
        dislikes: row.try_get("dislikes")?,
    })
}

#[async_trait]
impl ContentRepo for SqliteContentRepo {
    async fn default_subverses(&self) -> anyhow::Result<Vec<DefaultSubverse>> {
        let rows = sqlx::query("SELECT name, position FROM default_subverses ORDER BY position ASC, name ASC")
            .fetch_all(&self.pool)
            .await
            .context("Failed to load default subverses")?;

        rows.iter()
            .map(|row| -> anyhow::Result<DefaultSubverse> {
                Ok(DefaultSubverse {
                    name: row.try_get("name")?,
                    position: row.try_get("position")?,
                })
            })
            .collect()
    }

    async fn banned_domains(&self) -> anyhow::Result<Vec<BannedDomain>> {
        // Other writers may store SQLite's own datetime format or non-UTC
        // offsets, so order by the parsed instant rather than the raw text.
        let rows = sqlx::query(
            "SELECT hostname, reason, added_on, added_by FROM banned_domains \
             ORDER BY julianday(added_on) ASC, hostname ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load banned domains")?;

        rows.iter()
            .map(|row| -> anyhow::Result<BannedDomain> {
                Ok(BannedDomain {
                    hostname: row.try_get("hostname")?,
                    reason: row.try_get("reason")?,
                    added_on: row.try_get("added_on")?,
                    added_by: row.try_get("added_by")?,
                })
            })
            .collect()
    }

    async fn subverses_by_subscribers(&self, limit: Option<i64>) -> anyhow::Result<Vec<Subverse>> {
        // LIMIT -1 means no limit in SQLite
        let rows = sqlx::query(
            "SELECT name, description, subscribers, created_at FROM subverses \
             ORDER BY subscribers DESC, name ASC LIMIT ?",
        )
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await
        .context("Failed to load subverses")?;

        rows.iter()
            .map(|row| -> anyhow::Result<Subverse> {
                Ok(Subverse {
                    name: row.try_get("name")?,
                    description: row.try_get("description")?,
                    subscribers: row.try_get("subscribers")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect()
    }

    /// Default subverses are matched with `IN` rather than a join, so a
    /// submission shows up at most once.
    async fn frontpage(&self, limit: i64) -> anyhow::Result<Vec<FrontpageEntry>> {
        let sql = format!(
            "SELECT {FRONTPAGE_COLUMNS} FROM submissions s \
             WHERE s.author <> ? AND s.subverse IN (SELECT name FROM default_subverses) \
             ORDER BY s.rank DESC, s.id DESC LIMIT ?"
        );
        let rows = sqlx::query(&sql)
            .bind(TOMBSTONE_AUTHOR)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .context("Failed to load frontpage")?;

        Ok(rows.iter().map(row_to_frontpage_entry).collect::<Result<Vec<_>, _>>()?)
    }

    async fn subverse_frontpage(&self, subverse: &str, limit: i64) -> anyhow::Result<Vec<FrontpageEntry>> {
        let sql = format!(
            "SELECT {FRONTPAGE_COLUMNS} FROM submissions s \
             WHERE s.author <> ? AND s.subverse = ? \
             ORDER BY s.rank DESC, s.id DESC LIMIT ?"
        );
        let rows = sqlx::query(&sql)
            .bind(TOMBSTONE_AUTHOR)
            .bind(subverse)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to load frontpage of {subverse}"))?;

        Ok(rows.iter().map(row_to_frontpage_entry).collect::<Result<Vec<_>, _>>()?)
    }

    async fn find_submission(&self, id: i64) -> anyhow::Result<Option<Submission>> {
        let row = sqlx::query("SELECT * FROM submissions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to load submission {id}"))?;

        Ok(row.as_ref().map(row_to_submission).transpose()?)
    }

    async fn find_comment(&self, id: i64) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query("SELECT * FROM comments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to load comment {id}"))?;

        Ok(row.as_ref().map(row_to_comment).transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    async fn repo() -> SqliteContentRepo {
        SqliteContentRepo::new("sqlite::memory:").await.unwrap()
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 6, day, 12, 0, 0).unwrap()
    }

    async fn add_default(repo: &SqliteContentRepo, name: &str, position: i64) {
        sqlx::query("INSERT INTO default_subverses (name, position) VALUES (?, ?)")
            .bind(name).bind(position)
            .execute(&repo.pool).await.unwrap();
    }

    async fn add_submission(repo: &SqliteContentRepo, id: i64, subverse: &str, author: &str, rank: f64) {
        sqlx::query(
            "INSERT INTO submissions (id, kind, title, link_description, subverse, author, posted_at, rank) \
             VALUES (?, 2, ?, 'https://example.com', ?, ?, ?, ?)",
        )
        .bind(id).bind(format!("Submission {id}")).bind(subverse).bind(author).bind(at(1)).bind(rank)
        .execute(&repo.pool).await.unwrap();
    }

    async fn add_comment(repo: &SqliteContentRepo, id: i64, submission_id: i64, parent_id: Option<i64>) {
        sqlx::query(
            "INSERT INTO comments (id, content, author, parent_id, submission_id, posted_at, last_edited_at, likes, dislikes) \
             VALUES (?, 'first!', 'commenter', ?, ?, ?, ?, 4, 1)",
        )
        .bind(id).bind(parent_id).bind(submission_id).bind(at(2)).bind(at(3))
        .execute(&repo.pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_default_subverses_by_position() {
        let repo = repo().await;
        add_default(&repo, "a", 3).await;
        add_default(&repo, "b", 1).await;
        add_default(&repo, "c", 2).await;

        let names: Vec<_> = repo.default_subverses().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_banned_domains_chronological() {
        let repo = repo().await;
        let t1 = at(1);
        let t2 = t1 + Duration::milliseconds(250);
        for (host, when) in [("late.example", t2), ("early.example", t1)] {
            sqlx::query("INSERT INTO banned_domains (hostname, reason, added_on, added_by) VALUES (?, 'spam', ?, 'admin')")
                .bind(host).bind(when)
                .execute(&repo.pool).await.unwrap();
        }

        let banned = repo.banned_domains().await.unwrap();
        assert_eq!(banned[0].hostname, "early.example");
        assert_eq!(banned[0].added_on, t1);
        assert_eq!(banned[1].hostname, "late.example");
    }

    #[tokio::test]
    async fn test_banned_domains_chronological_across_formats() {
        let repo = repo().await;
        let rows = [
            ("utc.example", "2014-06-01T12:00:00+00:00"),
            ("naive.example", "2014-06-01 13:00:00"),
            ("offset.example", "2014-06-01T12:30:00+02:00"),
        ];
        for (host, added_on) in rows {
            sqlx::query("INSERT INTO banned_domains (hostname, reason, added_on, added_by) VALUES (?, 'spam', ?, 'admin')")
                .bind(host).bind(added_on)
                .execute(&repo.pool).await.unwrap();
        }

        let banned = repo.banned_domains().await.unwrap();
        let hosts: Vec<_> = banned.iter().map(|b| b.hostname.as_str()).collect();
        assert_eq!(hosts, vec!["offset.example", "utc.example", "naive.example"]);
        assert!(banned.windows(2).all(|w| w[0].added_on <= w[1].added_on));
        assert_eq!(banned[0].added_on, Utc.with_ymd_and_hms(2014, 6, 1, 10, 30, 0).unwrap());
    }

    #[tokio::test]
    async fn test_subverses_by_subscribers() {
        let repo = repo().await;
        for (name, subs) in [("small", 5_i64), ("big", 500), ("mid", 50)] {
            sqlx::query("INSERT INTO subverses (name, description, subscribers, created_at) VALUES (?, NULL, ?, ?)")
                .bind(name).bind(subs).bind(at(1))
                .execute(&repo.pool).await.unwrap();
        }

        let all: Vec<_> = repo.subverses_by_subscribers(None).await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(all, vec!["big", "mid", "small"]);

        let capped = repo.subverses_by_subscribers(Some(2)).await.unwrap();
        assert_eq!(capped.len(), 2);
    }

    #[tokio::test]
    async fn test_frontpage_filters_and_orders() {
        let repo = repo().await;
        add_default(&repo, "news", 1).await;
        add_default(&repo, "pics", 2).await;
        add_submission(&repo, 1, "news", "alice", 0.2).await;
        add_submission(&repo, 2, "pics", "bob", 0.9).await;
        add_submission(&repo, 3, "news", TOMBSTONE_AUTHOR, 5.0).await;
        add_submission(&repo, 4, "private", "carol", 9.0).await;
        add_comment(&repo, 10, 1, None).await;
        add_comment(&repo, 11, 1, Some(10)).await;

        let page = repo.frontpage(100).await.unwrap();
        let ids: Vec<_> = page.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(page[1].comment_count, 2);
        assert_eq!(page[0].comment_count, 0);
        assert!(page.iter().all(|e| e.author != TOMBSTONE_AUTHOR));
        assert!(page.iter().all(|e| e.subverse == "news" || e.subverse == "pics"));
    }

    #[tokio::test]
    async fn test_frontpage_limit() {
        let repo = repo().await;
        add_default(&repo, "news", 1).await;
        for id in 1..=105 {
            add_submission(&repo, id, "news", "poster", id as f64).await;
        }

        let page = repo.frontpage(100).await.unwrap();
        assert_eq!(page.len(), 100);
        assert_eq!(page[0].id, 105);
    }

    #[tokio::test]
    async fn test_subverse_frontpage() {
        let repo = repo().await;
        add_submission(&repo, 1, "rust", "ferris", 1.0).await;
        add_submission(&repo, 2, "rust", TOMBSTONE_AUTHOR, 2.0).await;
        add_submission(&repo, 3, "go", "gopher", 3.0).await;

        let page = repo.subverse_frontpage("rust", 100).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, 1);

        assert!(repo.subverse_frontpage("nonexistent-name", 100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_submission() {
        let repo = repo().await;
        add_submission(&repo, 7, "rust", TOMBSTONE_AUTHOR, 1.5).await;

        let found = repo.find_submission(7).await.unwrap().expect("submission 7");
        assert_eq!(found.id, 7);
        assert_eq!(found.kind, SubmissionKind::Link);
        assert!(found.is_tombstoned());
        assert!(repo.find_submission(8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_comment_round_trips() {
        let repo = repo().await;
        add_submission(&repo, 1, "rust", "ferris", 1.0).await;
        add_comment(&repo, 10, 1, None).await;
        add_comment(&repo, 11, 1, Some(10)).await;

        let reply = repo.find_comment(11).await.unwrap().expect("comment 11");
        assert_eq!(
            reply,
            Comment {
                id: 11,
                content: "first!".into(),
                author: "commenter".into(),
                parent_id: Some(10),
                submission_id: 1,
                posted_at: at(2),
                last_edited_at: Some(at(3)),
                likes: 4,
                dislikes: 1,
            }
        );
        assert_eq!(repo.find_comment(10).await.unwrap().unwrap().parent_id, None);
        assert_eq!(repo.find_comment(11).await.unwrap(), Some(reply));
        assert!(repo.find_comment(99).await.unwrap().is_none());
    }
}
