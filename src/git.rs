// SPDX-License-Identifier: Apache-2.0

//! Release metadata collection: three git queries and a clock read.
//!
//! Public API:
//!   - `Collector::query(q)`    → trimmed stdout of one git query, if any
//!   - `Collector::collect()`   → full `BuildDescriptor` stamped with local time
//!   - `build_time(now)`        → `YYYY-MM-DD HH:MM ±ZZZZ`
//!
//! A query that cannot be started, exits non-zero, or prints nothing yields
//! `None`. Callers cannot tell these cases apart; only the debug log can.

use crate::types::BuildDescriptor;
use chrono::{DateTime, Local, TimeZone};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// strftime pattern of the `buildTime` field.
pub const BUILD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M %z";

/// The read-only git queries gostamp runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitQuery {
    /// Most recent tag reachable from HEAD.
    LastTag,
    /// Current branch name (`HEAD` when detached).
    Branch,
    /// Abbreviated hash of the last commit.
    LastCommitId,
}

impl GitQuery {
    pub fn args(self) -> &'static [&'static str] {
        match self {
            GitQuery::LastTag => &["describe", "--abbrev=0", "--tags"],
            GitQuery::Branch => &["rev-parse", "--abbrev-ref", "HEAD"],
            GitQuery::LastCommitId => &["log", "--pretty=format:%h", "-1"],
        }
    }
}

/// Runs git queries in a working directory.
#[derive(Debug, Clone)]
pub struct Collector {
    git: PathBuf,
    dir: Option<PathBuf>,
}

impl Collector {
    pub fn new(git: impl Into<PathBuf>) -> Self {
        Self {
            git: git.into(),
            dir: None,
        }
    }

    /// Run queries in `dir` instead of the current directory.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Runs a single query and returns its trimmed stdout, or `None` if the
    /// value is unavailable for any reason.
    pub fn query(&self, query: GitQuery) -> Option<String> {
        let mut command = Command::new(&self.git);
        command.args(query.args());
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        let output = match command.output() {
            Ok(output) => output,
            Err(e) => {
                debug!(?query, git = %self.git.display(), error = %e, "git could not be started");
                return None;
            }
        };

        if !output.status.success() {
            debug!(
                ?query,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git query failed"
            );
            return None;
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            debug!(?query, "git query returned nothing");
            return None;
        }

        debug!(?query, %value, "git query");
        Some(value)
    }

    pub fn last_tag(&self) -> Option<String> {
        self.query(GitQuery::LastTag)
    }

    /// Current branch; `None` on a detached head.
    pub fn branch(&self) -> Option<String> {
        self.query(GitQuery::Branch).filter(|b| b != "HEAD")
    }

    pub fn last_commit_id(&self) -> Option<String> {
        self.query(GitQuery::LastCommitId)
    }

    /// Collects every field, stamping the current local time.
    pub fn collect(&self) -> BuildDescriptor {
        self.collect_at(&Local::now())
    }

    /// Collects every field with a caller-supplied build time.
    pub fn collect_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> BuildDescriptor
    where
        Tz::Offset: fmt::Display,
    {
        BuildDescriptor::new(
            self.last_tag(),
            self.branch(),
            self.last_commit_id(),
            build_time(now),
        )
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new("git")
    }
}

/// Formats `now` as a `buildTime` value.
pub fn build_time<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    now.format(BUILD_TIME_FORMAT).to_string()
}
