use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::calendar;
use crate::config::{Config, Options};
use crate::git;
use crate::github::{ContributionSource, GithubClient};
use crate::msg;
use crate::publish;
use crate::tracker;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user contributed today; nothing was written.
    Contributed { date: String, count: u32 },
    /// Today was appended to the tracking file, and published if git is enabled.
    Recorded { date: String, published: bool },
    /// No contribution, but `--dry-run` left everything untouched.
    DryRun { date: String },
}

/// Check today's contributions from the current directory.
pub fn run(options: Options) -> Result<()> {
    let workdir = std::env::current_dir()?;
    let config = Config::load(options, &workdir)?;
    let client = GithubClient::new(&config)?;
    let today = Local::now().date_naive();

    execute(&config, &client, &workdir, today)?;
    Ok(())
}

/// Fetch the calendar, and record `today` when it has no contributions.
pub fn execute(
    config: &Config,
    source: &dyn ContributionSource,
    workdir: &Path,
    today: NaiveDate,
) -> Result<Outcome> {
    let response = source
        .fetch_contributions(&config.user)
        .with_context(|| format!("Failed to fetch contributions for `{}`", config.user))?;

    let (day, contributed) = if config.verify_date {
        let day = calendar::today_entry(&response, today)?;
        (day, day.is_contributed())
    } else {
        (
            calendar::first_day(&response)?,
            calendar::is_today_contributed(&response)?,
        )
    };
    let date = day.date.clone();

    if contributed {
        msg::success(&format!(
            "`{}` has {} contribution{} on {}",
            config.user,
            day.contribution_count,
            if day.contribution_count == 1 { "" } else { "s" },
            date
        ));
        return Ok(Outcome::Contributed {
            date,
            count: day.contribution_count,
        });
    }

    msg::warn(&format!("`{}` has no contributions on {}", config.user, date));

    let file_arg = config.tracking_file.display();
    let steps = if config.use_git {
        publish::steps(&config.tracking_file, &config.commit_message)
    } else {
        Vec::new()
    };

    if config.dry_run {
        msg::info(&format!("Would append {} to `{}`", date, file_arg));
        for step in &steps {
            msg::info(&format!("Would run `{}`", step));
        }
        return Ok(Outcome::DryRun { date });
    }

    // Fail before touching the file if the publish steps cannot work
    if config.use_git {
        let repo = git::open_repo(workdir)?;
        git::require_workdir(&repo, "record")?;
        git::current_branch(&repo)?;
    }

    let path = workdir.join(&config.tracking_file);
    tracker::record_failure_day(&path, &date, config.create_missing)?;
    let total = tracker::recorded_days(&path)?.len();
    msg::success(&format!(
        "Recorded {} in `{}` ({} day{} so far)",
        date,
        file_arg,
        total,
        if total == 1 { "" } else { "s" }
    ));

    publish::run(workdir, &steps)?;

    Ok(Outcome::Recorded {
        date,
        published: config.use_git,
    })
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
