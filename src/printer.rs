// SPDX-License-Identifier: Apache-2.0

//! Output control for gostamp.
//!
//! gostamp's own messages (the command echo, the success line, error
//! reports, the descriptor table) go through `Printer` so `--quiet` can drop them in one place.
//! The show-command output bypasses it: it is the program's result, not chatter.

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Printer {
    /// Normal CLI output with colors.
    Default,
    /// Suppress gostamp's own messages (`--quiet`).
    Silent,
}

impl Printer {
    pub fn new(quiet: bool) -> Self {
        if quiet { Self::Silent } else { Self::Default }
    }

    /// Print a plain message to stdout.
    pub fn println(&self, msg: &str) {
        if *self == Self::Default {
            println!("{msg}");
        }
    }

    /// Echo a command line to stderr before it runs.
    pub fn echo(&self, cmd: &str) {
        if *self == Self::Default {
            eprintln!("{cmd}");
        }
    }

    /// Print an error message to stderr (red `Error:` prefix).
    pub fn error(&self, msg: &str) {
        if *self == Self::Default {
            eprintln!("{} {}", "Error:".red(), msg);
        }
    }

    /// Print a comfy_table::Table to stdout.
    pub fn table(&self, table: &comfy_table::Table) {
        if *self == Self::Default {
            println!("{table}");
        }
    }
}
