// SPDX-License-Identifier: Apache-2.0

use std::process::Command;

fn main() {
    // Tagged checkouts report the cargo version as-is, anything else gets
    // the short commit hash appended: "0.2.2" vs "0.2.2-1f3a9c0".
    let pkg_version = env!("CARGO_PKG_VERSION");

    let on_tag = Command::new("git")
        .args(["describe", "--tags", "--exact-match", "HEAD"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    let short_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|h| !h.is_empty());

    let full_version = match short_hash {
        Some(hash) if !on_tag => format!("{}-{}", pkg_version, hash),
        _ => pkg_version.to_string(),
    };

    println!("cargo:rustc-env=GOSTAMP_VERSION={}", full_version);

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
    println!("cargo:rerun-if-changed=.git/refs/tags/");
}
