use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::git_commands::{git_commit, git_push};
use crate::msg;

/// One git invocation in the publish pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitStep {
    Add(PathBuf),
    Commit(String),
    Push,
}

impl fmt::Display for GitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitStep::Add(file) => write!(f, "git add {}", file.display()),
            GitStep::Commit(message) => write!(f, "git commit -m {:?}", message),
            GitStep::Push => write!(f, "git push"),
        }
    }
}

impl GitStep {
    fn run(&self, workdir: &Path) -> Result<()> {
        match self {
            GitStep::Add(file) => git_commit::stage_files(workdir, &[file.as_path()]),
            GitStep::Commit(message) => git_commit::commit(workdir, message),
            GitStep::Push => git_push::push(workdir),
        }
    }

    fn done_message(&self) -> String {
        match self {
            GitStep::Add(file) => format!("Staged `{}`", file.display()),
            GitStep::Commit(message) => format!("Committed {:?}", message),
            GitStep::Push => "Pushed to upstream".to_string(),
        }
    }
}

/// The steps that publish an updated tracking file, in execution order.
pub fn steps(tracking_file: &Path, message: &str) -> Vec<GitStep> {
    vec![
        GitStep::Add(tracking_file.to_path_buf()),
        GitStep::Commit(message.to_string()),
        GitStep::Push,
    ]
}

/// Run `steps` in order, stopping at the first failure.
///
/// Completed steps are not undone: a failed push leaves the local commit.
pub fn run(workdir: &Path, steps: &[GitStep]) -> Result<()> {
    for (i, step) in steps.iter().enumerate() {
        tracing::debug!(step = %step, "running publish step {}/{}", i + 1, steps.len());
        step.run(workdir)
            .with_context(|| format!("Step {}/{} (`{}`) failed", i + 1, steps.len(), step))?;
        msg::success(&step.done_message());
    }
    Ok(())
}

#[cfg(test)]
#[path = "publish_test.rs"]
mod tests;
