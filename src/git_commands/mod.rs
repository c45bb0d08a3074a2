pub mod git_commit;
pub mod git_push;

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result, bail};

/// Run a git command in the given working directory.
/// On failure, returns an error containing stderr output.
///
/// Arguments are passed as `OsStr` so non-UTF-8 paths reach git unchanged.
pub fn run_git<S: AsRef<OsStr>>(workdir: &Path, args: &[S]) -> Result<()> {
    run_git_stdout(workdir, args).map(|_| ())
}

/// Run a git command and return its stdout.
pub fn run_git_stdout<S: AsRef<OsStr>>(workdir: &Path, args: &[S]) -> Result<String> {
    let command_line = display_args(args);
    tracing::debug!(workdir = %workdir.display(), "git {}", command_line);

    let output = Command::new("git")
        .current_dir(workdir)
        .args(args)
        .output()
        .context("Failed to run git; is it installed and on PATH?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git {} failed:\n{}", command_line, stderr.trim_end());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn display_args<S: AsRef<OsStr>>(args: &[S]) -> String {
    args.iter()
        .map(|arg| arg.as_ref().to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "git_commands_test.rs"]
mod tests;
