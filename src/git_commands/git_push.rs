use std::path::Path;

use anyhow::Result;

/// Push the current branch to its configured upstream.
///
/// Wraps a bare `git push`, so remote, refspec and credentials all come from
/// the user's git configuration.
pub fn push(workdir: &Path) -> Result<()> {
    super::run_git(workdir, &["push"])
}
