use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use thiserror::Error;

use crate::calendar::GithubResponse;
use crate::config::Config;

/// Longest response body excerpt kept in an error message.
const BODY_EXCERPT_LEN: usize = 300;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("Request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GitHub answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to decode GitHub response")]
    Decode(#[source] serde_json::Error),
}

/// Anything that can produce the contribution calendar for a user.
pub trait ContributionSource {
    fn fetch_contributions(&self, username: &str) -> Result<GithubResponse, GithubError>;
}

#[derive(Debug, Serialize)]
struct GraphQLRequest {
    query: String,
}

/// Blocking GraphQL client for the GitHub API.
pub struct GithubClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<GithubClient, GithubError> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            // blocking clients default to 30s; the call waits for GitHub however long it takes
            .timeout(None::<Duration>)
            .build()
            .map_err(GithubError::Client)?;

        Ok(GithubClient {
            http,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        })
    }
}

impl ContributionSource for GithubClient {
    fn fetch_contributions(&self, username: &str) -> Result<GithubResponse, GithubError> {
        let request = GraphQLRequest {
            query: contributions_query(username),
        };
        tracing::debug!(endpoint = %self.endpoint, username, "querying contribution calendar");

        let transport = |source| GithubError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("bearer {}", self.token))
            .json(&request)
            .send()
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().map_err(transport)?;
        tracing::debug!(%status, bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(GithubError::Status {
                status,
                body: excerpt(&body),
            });
        }

        decode_response(&body)
    }
}

/// The fixed calendar query for `username`.
///
/// The login is interpolated into the document rather than sent as a
/// variable, so it is escaped as a GraphQL string literal.
pub fn contributions_query(username: &str) -> String {
    format!(
        r#"
{{
  user(login: "{}") {{
    contributionsCollection {{
      contributionCalendar {{
        weeks {{
          contributionDays {{
            contributionCount
            date
          }}
        }}
      }}
    }}
  }}
}}
"#,
        escape_graphql_string(username)
    )
}

fn escape_graphql_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Decode a response body into the calendar structure.
pub fn decode_response(body: &str) -> Result<GithubResponse, GithubError> {
    serde_json::from_str(body).map_err(GithubError::Decode)
}

fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
#[path = "github_test.rs"]
mod tests;
