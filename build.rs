// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-env-changed=CAMVIEW_VERSION");

    // Packagers may pin the version instead of relying on git
    let version = std::env::var("CAMVIEW_VERSION")
        .ok()
        .or_else(describe_head)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// `git describe` output without the leading `v`, e.g. `0.1.0-3-gabcdef1-dirty`
fn describe_head() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty", "--match", "v*"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if described.is_empty() {
        return None;
    }

    Some(
        described
            .strip_prefix('v')
            .map(str::to_string)
            .unwrap_or(described),
    )
}
