// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use clap::error::ErrorKind;
use gostamp::command::{BuildCommand, BuildOptions};
use gostamp::dispatch::{self, Mode};
use gostamp::git::Collector;
use gostamp::printer::Printer;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "gostamp")]
#[command(version = env!("GOSTAMP_VERSION"))]
#[command(
    about = "Build a Go program with git release metadata stamped in",
    long_about = "Build a Go program with git release metadata stamped in.\n\n\
        Runs `go build -ldflags` with `-X main._version_`, `_branch_`, `_commitId_` \
        and `_buildTime_` taken from git and the local clock.\n\
        Pass `-showcmd` as the first argument to print the command instead of running it."
)]
struct Cli {
    /// Print the build command instead of running it (same as a leading -showcmd)
    #[arg(long)]
    showcmd: bool,

    /// Print the collected release metadata instead of building
    #[arg(long)]
    describe: bool,

    /// With --describe, print JSON instead of a table
    #[arg(long, requires = "describe")]
    json: bool,

    /// Build tool to run
    #[arg(long, env = "GOSTAMP_GO", default_value = "go")]
    go: String,

    /// git client used for the metadata queries
    #[arg(long, env = "GOSTAMP_GIT", default_value = "git")]
    git: PathBuf,

    /// Go package that declares the stamped variables
    #[arg(long, env = "GOSTAMP_PACKAGE", default_value = "main")]
    package: String,

    /// Run the queries and the build in this directory
    #[arg(short = 'C', long)]
    dir: Option<PathBuf>,

    /// Output file, forwarded as `go build -o`
    #[arg(short, long)]
    output: Option<String>,

    /// Log every git query and the spawned command to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Don't print "build finished." or error messages
    #[arg(short, long)]
    quiet: bool,
}

/// Splits the raw arguments into the dispatch mode and the parsed options.
///
/// A leading `-showcmd` selects show mode and is removed before clap sees
/// it. Arguments clap rejects are ignored: the options fall back to their
/// defaults (environment variables still apply) and the rejection is
/// returned so it can be logged once tracing is up. Arguments that are not
/// valid UTF-8 are rejected by clap and therefore ignored the same way.
fn parse_args(args: &[OsString]) -> (Mode, Cli, Option<clap::Error>) {
    let first_arg_mode = Mode::from_first_arg(args.get(1).map(OsString::as_os_str));
    let rest: Vec<&OsString> = args
        .iter()
        .enumerate()
        .filter(|&(i, _)| !(i == 1 && first_arg_mode == Mode::Show))
        .map(|(_, a)| a)
        .collect();

    let (cli, ignored) = match Cli::try_parse_from(&rest) {
        Ok(cli) => (cli, None),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let program = args.iter().take(1);
            (Cli::try_parse_from(program).unwrap_or_else(|e| e.exit()), Some(e))
        }
    };

    let mode = if first_arg_mode == Mode::Show || cli.showcmd {
        Mode::Show
    } else if cli.describe {
        Mode::Describe { json: cli.json }
    } else {
        Mode::Execute
    };

    (mode, cli, ignored)
}

/// Logs go to stderr so stdout carries only the command or the metadata.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "gostamp=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    let (mode, cli, ignored) = parse_args(&args);

    init_tracing(cli.verbose);
    if let Some(e) = ignored {
        debug!(kind = ?e.kind(), "ignoring unrecognized arguments");
    }

    let printer = Printer::new(cli.quiet);

    let mut collector = Collector::new(&cli.git);
    if let Some(dir) = &cli.dir {
        collector = collector.in_dir(dir);
    }

    let command = BuildCommand::new(
        collector.collect(),
        BuildOptions {
            tool: cli.go,
            package: cli.package,
            output: cli.output,
        },
    );

    match dispatch::dispatch(mode, &command, cli.dir.as_deref(), printer) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            printer.error(&e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
