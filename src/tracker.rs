use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Append `date` as a new line to the tracking file.
///
/// The file must already exist unless `create_missing` is set.
pub fn record_failure_day(path: &Path, date: &str, create_missing: bool) -> Result<()> {
    let mut file = match OpenOptions::new()
        .append(true)
        .create(create_missing)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => bail!(
            "Tracking file `{}` does not exist\nCreate it or pass --create",
            path.display()
        ),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open `{}`", path.display()));
        }
    };

    writeln!(file, "{}", date).with_context(|| format!("Failed to write `{}`", path.display()))?;
    tracing::debug!(path = %path.display(), date, "recorded failure day");
    Ok(())
}

/// Every recorded day, in append order.
pub fn recorded_days(path: &Path) -> Result<Vec<String>> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).with_context(|| format!("Failed to read `{}`", path.display())),
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
#[path = "tracker_test.rs"]
mod tests;
