use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::git_commands;

pub const TOKEN_VAR: &str = "GITHUB_API_TOKEN";
pub const USER_VAR: &str = "GITHUB_USER";
pub const ENDPOINT_VAR: &str = "GITHUB_GRAPHQL_URL";

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";
pub const DEFAULT_TRACKING_FILE: &str = "failureDay.txt";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Added failureDay";
const DEFAULT_ENV_FILE: &str = ".env";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },
    #[error("GITHUB_API_TOKEN is not set\nAdd it to .env or export it before running")]
    MissingToken,
    #[error(
        "No GitHub user configured\nPass --user, set GITHUB_USER, or run `git config github.user <login>`"
    )]
    MissingUser,
}

/// Settings gathered from the command line before the environment is read.
#[derive(Debug, Default)]
pub struct Options {
    pub user: Option<String>,
    pub env_file: Option<PathBuf>,
    pub tracking_file: Option<PathBuf>,
    pub message: Option<String>,
    pub no_git: bool,
    pub create: bool,
    pub no_verify_date: bool,
    pub dry_run: bool,
}

/// Everything one run needs. Built once and passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub user: String,
    pub endpoint: String,
    pub tracking_file: PathBuf,
    pub commit_message: String,
    pub use_git: bool,
    pub create_missing: bool,
    pub verify_date: bool,
    pub dry_run: bool,
}

impl Config {
    /// Load the env file, then resolve every setting against `workdir`.
    pub fn load(options: Options, workdir: &Path) -> Result<Config, ConfigError> {
        load_env_file(options.env_file.as_deref(), workdir)?;
        Config::resolve(
            options,
            |name| std::env::var(name).ok(),
            || git_config_user(workdir),
        )
    }

    /// Resolve settings from `options`, an environment lookup, and a
    /// `github.user` lookup consulted only when nothing else names the user.
    ///
    /// Empty environment values count as unset.
    pub fn resolve(
        options: Options,
        env: impl Fn(&str) -> Option<String>,
        git_user: impl FnOnce() -> Option<String>,
    ) -> Result<Config, ConfigError> {
        let env = |name: &str| env(name).filter(|v| !v.trim().is_empty());

        let token = env(TOKEN_VAR).ok_or(ConfigError::MissingToken)?;

        let user = options
            .user
            .filter(|u| !u.trim().is_empty())
            .or_else(|| env(USER_VAR))
            .or_else(git_user)
            .ok_or(ConfigError::MissingUser)?;

        Ok(Config {
            token: token.trim().to_string(),
            user: user.trim().to_string(),
            endpoint: env(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            tracking_file: options
                .tracking_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRACKING_FILE)),
            commit_message: options
                .message
                .unwrap_or_else(|| DEFAULT_COMMIT_MESSAGE.to_string()),
            use_git: !options.no_git,
            create_missing: options.create,
            verify_date: !options.no_verify_date,
            dry_run: options.dry_run,
        })
    }
}

/// Load variables from the env file into the process environment.
///
/// An explicit path must load. The default `.env` may be absent as long as
/// the token is already exported.
fn load_env_file(explicit: Option<&Path>, workdir: &Path) -> Result<(), ConfigError> {
    let (path, required) = match explicit {
        Some(path) => (workdir.join(path), true),
        None => (workdir.join(DEFAULT_ENV_FILE), false),
    };

    match dotenvy::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded env file");
            Ok(())
        }
        Err(e) if !required && e.not_found() && std::env::var_os(TOKEN_VAR).is_some() => {
            tracing::debug!(path = %path.display(), "no env file, using process environment");
            Ok(())
        }
        Err(source) => Err(ConfigError::EnvFile { path, source }),
    }
}

/// Read `github.user` from git config, the convention `gh` and `hub` use.
fn git_config_user(workdir: &Path) -> Option<String> {
    let user = git_commands::run_git_stdout(workdir, &["config", "--get", "github.user"]).ok()?;
    let user = user.trim();
    (!user.is_empty()).then(|| user.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
