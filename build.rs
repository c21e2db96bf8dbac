//! Embeds the `skills-link` version string at compile time.
use std::process::Command;

const VERSION_VAR: &str = "SKILLS_LINK_VERSION";

/// `git describe` output for local builds, if git is available.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}

fn main() {
    // A release pipeline sets the variable; local builds describe the checkout.
    let version = std::env::var(VERSION_VAR).ok().or_else(git_describe);
    if let Some(version) = version {
        println!("cargo:rustc-env={VERSION_VAR}={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed={VERSION_VAR}");
}
