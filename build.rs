//! Build script for TeamMate
//!
//! Embeds the git revision, build timestamp, target and profile so that
//! `teammate version` can report exactly what was built.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    let git_hash = command_output("git", &["rev-parse", "--short=8", "HEAD"]);
    let git_dirty = match Command::new("git").args(["status", "--porcelain"]).output() {
        Ok(out) if out.status.success() => (!out.stdout.is_empty()).to_string(),
        _ => "false".to_string(),
    };
    let rustc_version = command_output("rustc", &["--version"]);
    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let env_or_unknown = |key: &str| env::var(key).unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=TEAMMATE_GIT_HASH={}", git_hash);
    println!("cargo:rustc-env=TEAMMATE_GIT_DIRTY={}", git_dirty);
    println!("cargo:rustc-env=TEAMMATE_BUILD_TIMESTAMP={}", build_timestamp);
    println!("cargo:rustc-env=TEAMMATE_TARGET={}", env_or_unknown("TARGET"));
    println!("cargo:rustc-env=TEAMMATE_PROFILE={}", env_or_unknown("PROFILE"));
    println!("cargo:rustc-env=TEAMMATE_RUSTC_VERSION={}", rustc_version);
}

/// Trimmed stdout of a successful command, or "unknown"
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
