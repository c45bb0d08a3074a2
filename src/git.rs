use std::path::Path;

use anyhow::{Context, Result, bail};
use git2::{BranchType, ErrorCode, Repository};

/// Open the `Repository` containing `dir`.
pub fn open_repo(dir: &Path) -> Result<Repository> {
    Repository::discover(dir)
        .with_context(|| format!("`{}` is not inside a git repository", dir.display()))
}

/// Return the working directory of the repository, or error if bare.
///
/// `operation` is a verb phrase used in the error message (e.g. "commit").
pub fn require_workdir<'a>(repo: &'a Repository, operation: &str) -> Result<&'a Path> {
    repo.workdir()
        .with_context(|| format!("Cannot {operation} in bare repository"))
}

/// Name of the checked-out branch, erroring on a detached HEAD.
///
/// An unborn branch is accepted: the next commit becomes its first one.
pub fn current_branch(repo: &Repository) -> Result<String> {
    let head = match repo.head() {
        Ok(head) => head,
        Err(e) if e.code() == ErrorCode::UnbornBranch => {
            let name = unborn_branch_name(repo)?;
            tracing::warn!(branch = %name, "branch has no commits yet");
            return Ok(name);
        }
        Err(e) => return Err(e).context("Failed to get HEAD reference"),
    };
    if !head.is_branch() {
        bail!("HEAD is detached\nCheck out a branch before recording");
    }

    let name = head
        .shorthand()
        .context("Could not determine current branch name")?
        .to_string();

    let has_upstream = repo
        .find_branch(&name, BranchType::Local)
        .and_then(|branch| branch.upstream())
        .is_ok();
    if !has_upstream {
        tracing::warn!(branch = %name, "branch has no upstream; `git push` may be rejected");
    }

    Ok(name)
}

fn unborn_branch_name(repo: &Repository) -> Result<String> {
    let head = repo.find_reference("HEAD")?;
    let target = head
        .symbolic_target()
        .context("HEAD does not name a branch")?;
    Ok(target.strip_prefix("refs/heads/").unwrap_or(target).to_string())
}

#[cfg(test)]
#[path = "git_test.rs"]
mod tests;
