// SPDX-License-Identifier: Apache-2.0

//! Shared helpers: throwaway git repositories and a gostamp runner.
//!
//! Every git call pins HOME and GIT_CEILING_DIRECTORIES to the temp dir so
//! neither the developer's config nor an enclosing checkout leaks in.

#![allow(dead_code)]

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

fn isolate(command: &mut Command, dir: &Path) {
    let ceiling = dir.parent().unwrap_or(dir);
    command
        .env("HOME", dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CEILING_DIRECTORIES", ceiling)
        .env_remove("GOSTAMP_GO")
        .env_remove("GOSTAMP_GIT")
        .env_remove("GOSTAMP_PACKAGE")
        .env_remove("RUST_LOG");
}

/// Runs git in `dir`, panicking on failure. Returns trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let mut command = Command::new("git");
    command
        .args(["-c", "user.name=gostamp", "-c", "user.email=gostamp@example.com"])
        .args(["-c", "commit.gpgsign=false", "-c", "tag.gpgsign=false"])
        .args(args)
        .current_dir(dir);
    isolate(&mut command, dir);
    let out = command.output().expect("failed to execute git");
    assert!(
        out.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

/// Creates a repository on `branch` with one empty commit.
pub fn init_repo(dir: &Path, branch: &str) {
    git(dir, &["init", "-q"]);
    git(dir, &["symbolic-ref", "HEAD", &format!("refs/heads/{branch}")]);
    git(dir, &["commit", "-q", "--allow-empty", "-m", "initial"]);
}

/// Short hash exactly as gostamp's commit query reports it.
pub fn head_short_hash(dir: &Path) -> String {
    git(dir, &["log", "--pretty=format:%h", "-1"])
}

/// Runs the gostamp binary in `dir` with extra environment variables.
pub fn gostamp(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();
    gostamp_os(dir, &args, envs)
}

/// Like `gostamp`, for arguments that need not be valid UTF-8.
pub fn gostamp_os(dir: &Path, args: &[&OsStr], envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_gostamp"));
    command.args(args).current_dir(dir);
    isolate(&mut command, dir);
    command.envs(envs.iter().copied());
    command.output().expect("failed to execute gostamp")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn all_output(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

/// Value of the `_buildTime_` assignment in a rendered command.
pub fn build_time_value(cmd: &str) -> Option<&str> {
    let start = cmd.find("._buildTime_ '")? + "._buildTime_ '".len();
    let len = cmd[start..].find('\'')?;
    Some(&cmd[start..start + len])
}

/// `YYYY-MM-DD HH:MM ±ZZZZ`
pub fn looks_like_build_time(value: &str) -> bool {
    let b = value.as_bytes();
    let digits = |range: std::ops::Range<usize>| range.into_iter().all(|i| b[i].is_ascii_digit());
    b.len() == 22
        && digits(0..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
        && b[10] == b' '
        && digits(11..13)
        && b[13] == b':'
        && digits(14..16)
        && b[16] == b' '
        && (b[17] == b'+' || b[17] == b'-')
        && digits(18..22)
}

/// Writes an executable stand-in for `go` that records each argument on its
/// own line in `<dir>/go-args` and exits with `code`.
#[cfg(unix)]
pub fn fake_go(dir: &Path, code: i32) -> String {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-go");
    let record = dir.join("go-args");
    std::fs::write(
        &script,
        format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nexit {}\n",
            record.display(),
            code
        ),
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script.to_string_lossy().to_string()
}
