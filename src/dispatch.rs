// SPDX-License-Identifier: Apache-2.0

//! Dispatcher: decides what to do with an assembled `BuildCommand`.
//!
//! The mode is chosen once at startup and never changes:
//!   - `Show`     → print the command string, never spawn the build
//!   - `Describe` → print the collected metadata, never spawn the build
//!   - `Execute`  → run the build and report success

use crate::command::BuildCommand;
use crate::error::{Result, StampError};
use crate::printer::Printer;
use crate::table;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;

/// First argument that selects show-command mode.
pub const SHOW_COMMAND_FLAG: &str = "-showcmd";

/// Printed once after the build tool exits with status 0.
pub const SUCCESS_MESSAGE: &str = "build finished.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Show,
    Describe { json: bool },
    Execute,
}

impl Mode {
    /// Only the first argument is inspected; anything else is ignored.
    /// Arguments need not be valid UTF-8.
    pub fn from_first_arg(arg: Option<&OsStr>) -> Self {
        if arg == Some(OsStr::new(SHOW_COMMAND_FLAG)) {
            Mode::Show
        } else {
            Mode::Execute
        }
    }
}

/// How a dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Shown,
    Described,
    Finished,
    /// The build tool ran and failed; carries its exit code if it had one.
    Failed(Option<i32>),
}

impl Outcome {
    /// Process exit code: 0 unless the build failed, in which case the
    /// tool's own code is passed through (1 when it was killed by a signal
    /// or the code does not fit).
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Shown | Outcome::Described | Outcome::Finished => 0,
            Outcome::Failed(code) => code
                .and_then(|c| u8::try_from(c).ok())
                .filter(|&c| c != 0)
                .unwrap_or(1),
        }
    }
}

pub fn dispatch(
    mode: Mode,
    command: &BuildCommand,
    dir: Option<&Path>,
    printer: Printer,
) -> Result<Outcome> {
    info!(?mode, "dispatching");
    match mode {
        Mode::Show => {
            println!("{command}");
            Ok(Outcome::Shown)
        }
        Mode::Describe { json: true } => {
            let rendered = serde_json::to_string_pretty(command.descriptor())?;
            println!("{rendered}");
            Ok(Outcome::Described)
        }
        Mode::Describe { json: false } => {
            printer.table(&table::descriptor_table(command));
            Ok(Outcome::Described)
        }
        Mode::Execute => execute(command, dir, printer),
    }
}

/// Echoes the command to stderr, resolves the build tool in PATH, runs it,
/// and prints the success message on exit status 0. Nothing extra is printed
/// on failure; the tool's own diagnostics already reached the terminal.
pub fn execute(command: &BuildCommand, dir: Option<&Path>, printer: Printer) -> Result<Outcome> {
    printer.echo(&command.to_string());

    let tool = &command.options().tool;
    let program = which::which(tool).map_err(|_| StampError::ToolNotFound(tool.clone()))?;

    let status = command.run(&program, dir)?;
    if status.success() {
        printer.println(SUCCESS_MESSAGE);
        Ok(Outcome::Finished)
    } else {
        info!(%status, "build failed");
        Ok(Outcome::Failed(status.code()))
    }
}
