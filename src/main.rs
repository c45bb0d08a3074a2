mod calendar;
mod check;
mod config;
mod git;
mod git_commands;
mod github;
mod logging;
mod msg;
mod publish;
mod tracker;

#[cfg(test)]
mod test_helpers;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use colored::control;

use crate::config::Options;

#[derive(Parser)]
#[command(
    name = "git-streak",
    version,
    about = "Record the days you made no GitHub contribution"
)]
struct Cli {
    /// GitHub login to check (defaults to $GITHUB_USER, then `git config github.user`)
    #[arg(short, long)]
    user: Option<String>,

    /// Tracking file that collects days without contributions
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    tracking_file: Option<PathBuf>,

    /// Commit message for the recorded day
    #[arg(short, long)]
    message: Option<String>,

    /// Env file holding GITHUB_API_TOKEN (defaults to ./.env)
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Only append to the tracking file; skip add, commit and push
    #[arg(long)]
    no_git: bool,

    /// Create the tracking file if it does not exist
    #[arg(long)]
    create: bool,

    /// Trust the first calendar entry without checking it is today
    #[arg(long)]
    no_verify_date: bool,

    /// Report what would happen without writing or running git
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn into_options(self) -> Options {
        Options {
            user: self.user,
            env_file: self.env_file,
            tracking_file: self.tracking_file,
            message: self.message,
            no_git: self.no_git,
            create: self.create,
            no_verify_date: self.no_verify_date,
            dry_run: self.dry_run,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color
        || std::env::var_os("NO_COLOR").is_some()
        || std::env::var_os("TERM").is_some_and(|v| v == "dumb")
        || !std::io::stdout().is_terminal()
    {
        control::set_override(false);
    }

    logging::init();

    if let Err(e) = check::run(cli.into_options()) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
