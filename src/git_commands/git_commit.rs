use std::ffi::OsStr;
use std::path::Path;

use anyhow::Result;

/// Stage specific files.
///
/// Wraps `git add -- <files>`.
pub fn stage_files(workdir: &Path, files: &[&Path]) -> Result<()> {
    let mut args = vec![OsStr::new("add"), OsStr::new("--")];
    args.extend(files.iter().map(|file| file.as_os_str()));
    super::run_git(workdir, &args)
}

/// Create a commit with a message.
///
/// Wraps `git commit -m <message>`.
pub fn commit(workdir: &Path, message: &str) -> Result<()> {
    super::run_git(workdir, &["commit", "-m", message])
}
