// SPDX-License-Identifier: Apache-2.0

//! Error types for gostamp.
//!
//! Git queries never fail from the caller's point of view (a failed query is
//! an absent field), so the errors left are about starting the build and
//! rendering `--describe --json` output.

use thiserror::Error;

/// Result type for gostamp operations.
pub type Result<T> = std::result::Result<T, StampError>;

#[derive(Error, Debug)]
pub enum StampError {
    /// The build tool could not be located in PATH.
    #[error("build tool '{0}' not found in PATH")]
    ToolNotFound(String),

    /// The build tool was found but could not be started.
    #[error("could not start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The descriptor could not be rendered for `--describe --json`.
    #[error("could not render build metadata: {0}")]
    Render(#[from] serde_json::Error),
}

impl StampError {
    /// Process exit code reported for this error. A tool that cannot be
    /// started gets the shell's "command not found" code.
    pub fn exit_code(&self) -> u8 {
        match self {
            StampError::ToolNotFound(_) | StampError::Spawn { .. } => 127,
            StampError::Render(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_is_reported() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StampError::from(json_err);
        assert!(err.to_string().starts_with("could not render build metadata"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_missing_tool_exit_code() {
        let err = StampError::ToolNotFound("go".into());
        assert_eq!(err.exit_code(), 127);
        assert_eq!(err.to_string(), "build tool 'go' not found in PATH");
    }
}
