use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Top-level GraphQL response for the contribution calendar query.
///
/// `data` and `user` are optional because GitHub answers `null` for an
/// unknown login or a rejected token, alongside an `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubResponse {
    pub data: Option<ResponseData>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseData {
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: ContributionCalendar,
}

/// Weeks ordered as the API returns them, days ordered within each week.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContributionCalendar {
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub contribution_count: u32,
    /// `YYYY-MM-DD`
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("GitHub returned no contribution data{}", format_upstream(.0))]
    NoData(Vec<String>),
    #[error("Contribution calendar has no entry for {expected} (first entry is {found})")]
    DateMismatch { expected: NaiveDate, found: String },
}

fn format_upstream(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!(": {}", messages.join("; "))
    }
}

impl ContributionDay {
    pub fn is_contributed(&self) -> bool {
        self.contribution_count > 0
    }

    /// The parsed date, or `None` if upstream sent something that is not `YYYY-MM-DD`.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl GithubResponse {
    /// The decoded calendar, or `NoData` carrying any upstream error messages.
    pub fn calendar(&self) -> Result<&ContributionCalendar, CalendarError> {
        self.data
            .as_ref()
            .and_then(|data| data.user.as_ref())
            .map(|user| &user.contributions_collection.contribution_calendar)
            .ok_or_else(|| self.no_data())
    }

    fn no_data(&self) -> CalendarError {
        CalendarError::NoData(self.errors.iter().map(|e| e.message.clone()).collect())
    }
}

impl ContributionCalendar {
    pub fn days(&self) -> impl Iterator<Item = &ContributionDay> {
        self.weeks.iter().flat_map(|week| week.contribution_days.iter())
    }

    pub fn find_day(&self, date: NaiveDate) -> Option<&ContributionDay> {
        self.days().find(|day| day.naive_date() == Some(date))
    }
}

/// The first day of the first week, which upstream is assumed to place at "today".
pub fn first_day(response: &GithubResponse) -> Result<&ContributionDay, CalendarError> {
    response
        .calendar()?
        .weeks
        .first()
        .and_then(|week| week.contribution_days.first())
        .ok_or_else(|| response.no_data())
}

/// Whether the first calendar entry has at least one contribution.
pub fn is_today_contributed(response: &GithubResponse) -> Result<bool, CalendarError> {
    Ok(first_day(response)?.is_contributed())
}

/// Resolve the calendar entry for `today`.
///
/// Prefers `weeks[0].days[0]` when its date is `today`. Otherwise scans the
/// whole calendar, since GitHub orders weeks oldest first.
pub fn today_entry(
    response: &GithubResponse,
    today: NaiveDate,
) -> Result<&ContributionDay, CalendarError> {
    let first = first_day(response)?;
    if first.naive_date() == Some(today) {
        return Ok(first);
    }

    tracing::warn!(
        first = %first.date,
        %today,
        "first calendar entry is not today, searching the calendar"
    );

    response
        .calendar()?
        .find_day(today)
        .ok_or_else(|| CalendarError::DateMismatch {
            expected: today,
            found: first.date.clone(),
        })
}

#[cfg(test)]
#[path = "calendar_test.rs"]
mod tests;
