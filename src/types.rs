// SPDX-License-Identifier: Apache-2.0

//! Core types for gostamp: the Build Descriptor.
//!
//! A `BuildDescriptor` holds the release metadata gathered for one build.
//! Values are normalized at construction (trimmed, empty → absent) so the
//! command assembler never has to re-check them.

use serde::Serialize;
use std::fmt;

// =============================================================================
// Field: one slot of release metadata
// =============================================================================

/// A piece of release metadata that can be stamped into the Go binary.
///
/// The declaration order is the order flags appear on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Version,
    Branch,
    CommitId,
    BuildTime,
}

impl Field {
    /// Every field, in command-line order.
    pub const ALL: [Field; 4] = [
        Field::Version,
        Field::Branch,
        Field::CommitId,
        Field::BuildTime,
    ];

    /// Descriptor key, as used in `--describe --json` output.
    pub fn key(self) -> &'static str {
        match self {
            Field::Version => "version",
            Field::Branch => "branch",
            Field::CommitId => "commitId",
            Field::BuildTime => "buildTime",
        }
    }

    /// Name of the Go string variable the linker overrides.
    pub fn variable(self) -> &'static str {
        match self {
            Field::Version => "_version_",
            Field::Branch => "_branch_",
            Field::CommitId => "_commitId_",
            Field::BuildTime => "_buildTime_",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// BuildDescriptor
// =============================================================================

/// Release metadata collected for a single build invocation.
///
/// Guarantees:
/// - Optional values are trimmed and never empty (empty input becomes `None`)
/// - `build_time` is always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commit_id: Option<String>,
    build_time: String,
}

impl BuildDescriptor {
    pub fn new(
        version: Option<String>,
        branch: Option<String>,
        commit_id: Option<String>,
        build_time: impl Into<String>,
    ) -> Self {
        Self {
            version: normalize(version),
            branch: normalize(branch),
            commit_id: normalize(commit_id),
            build_time: build_time.into(),
        }
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    pub fn commit_id(&self) -> Option<&str> {
        self.commit_id.as_deref()
    }

    pub fn build_time(&self) -> &str {
        &self.build_time
    }

    /// Value of `field`, or `None` if it was unavailable.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Version => self.version(),
            Field::Branch => self.branch(),
            Field::CommitId => self.commit_id(),
            Field::BuildTime => Some(self.build_time()),
        }
    }

    /// Present fields with their values, in command-line order.
    pub fn entries(&self) -> Vec<(Field, &str)> {
        Field::ALL
            .iter()
            .filter_map(|&field| self.get(field).map(|value| (field, value)))
            .collect()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
