// SPDX-License-Identifier: Apache-2.0

//! Command assembly: turns a `BuildDescriptor` into a `go build` invocation.
//!
//! Each present field becomes one link-time assignment,
//! `-X <package>.<variable> '<value>'`, and the assignments are joined into
//! the single `-ldflags` value. Values go in verbatim between single quotes;
//! embedded quotes are not escaped.
//!
//! The command is spawned with an explicit argument vector, never through a
//! shell. The quoted `-ldflags` value is split by the Go toolchain itself.

use crate::error::{Result, StampError};
use crate::types::{BuildDescriptor, Field};
use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Knobs for the generated invocation. The defaults reproduce
/// `go build -ldflags "-X main._version_ '...' ..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Build tool program name, as shown in the rendered command.
    pub tool: String,
    /// Go package holding the stamped variables.
    pub package: String,
    /// Forwarded as `-o <output>`.
    pub output: Option<String>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            tool: "go".to_string(),
            package: "main".to_string(),
            output: None,
        }
    }
}

/// A fully assembled build invocation.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    descriptor: BuildDescriptor,
    options: BuildOptions,
}

impl BuildCommand {
    pub fn new(descriptor: BuildDescriptor, options: BuildOptions) -> Self {
        Self {
            descriptor,
            options,
        }
    }

    pub fn descriptor(&self) -> &BuildDescriptor {
        &self.descriptor
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// One `-X` assignment per present field, in field order.
    pub fn ldflags(&self) -> Vec<String> {
        self.descriptor
            .entries()
            .into_iter()
            .map(|(field, value)| link_flag(&self.options.package, field, value))
            .collect()
    }

    /// The value passed after `-ldflags`.
    pub fn ldflags_value(&self) -> String {
        self.ldflags().join(" ")
    }

    /// Arguments after the tool name: `build -ldflags <value> [-o <output>]`.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = vec![
            "build".to_string(),
            "-ldflags".to_string(),
            self.ldflags_value(),
        ];
        if let Some(output) = &self.options.output {
            argv.push("-o".to_string());
            argv.push(output.clone());
        }
        argv
    }

    /// Runs `program` with [`argv`](Self::argv), inheriting stdio, and waits
    /// for it to exit. No timeout is applied.
    pub fn run(&self, program: &Path, dir: Option<&Path>) -> Result<ExitStatus> {
        let argv = self.argv();
        debug!(program = %program.display(), ?argv, "spawning build");

        let mut command = Command::new(program);
        command.args(&argv);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }

        command.status().map_err(|source| StampError::Spawn {
            program: program.display().to_string(),
            source,
        })
    }
}

/// Renders the invocation the way it would be typed at a shell prompt.
impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} build -ldflags \"{}\"",
            self.options.tool,
            self.ldflags_value()
        )?;
        if let Some(output) = &self.options.output {
            write!(f, " -o {}", output)?;
        }
        Ok(())
    }
}

/// A single link-time assignment: `-X main._branch_ 'main'`.
pub fn link_flag(package: &str, field: Field, value: &str) -> String {
    format!("-X {}.{} '{}'", package, field.variable(), value)
}
