//! Provider adapters — one per ATS, each translating that provider's wire
//! response into canonical `Job`s.
//!
//! Contract: `fetch` performs outbound HTTP only and keeps no state between
//! calls. Any network error, non-success status, or malformed payload is an
//! `Err` the aggregator recovers from; it is never fatal to the query.
//! Multi-endpoint providers swallow per-candidate errors internally and
//! only surface the last one when every candidate is exhausted.

pub mod amazon;
pub mod ashby;
pub mod greenhouse;
pub mod http;
pub mod icims;
pub mod lever;
pub mod smartrecruiters;
pub mod teamtailor;
pub mod workday;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::models::job::{Job, Source};
use crate::sources::CompanySource;
use self::http::JobsHttp;

/// Why one provider's fetch produced nothing. Shown verbatim in coverage
/// rows; bulk mode discards it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Fetch error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("Malformed payload: {0}")]
    Malformed(String),

    #[error("No postings found")]
    NoPostings,
}

/// One fetchable source of jobs. Implemented by `CompanySource` for the
/// real providers; tests implement it with stubs so the aggregator can be
/// exercised without a network.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn company(&self) -> &str;
    fn provider(&self) -> Source;
    async fn fetch(&self, http: &JobsHttp) -> Result<Vec<Job>, FetchError>;
}

#[async_trait]
impl JobSource for CompanySource {
    fn company(&self) -> &str {
        self.name()
    }

    fn provider(&self) -> Source {
        CompanySource::provider(self)
    }

    async fn fetch(&self, http: &JobsHttp) -> Result<Vec<Job>, FetchError> {
        match self {
            CompanySource::Greenhouse { name, board_token } => {
                greenhouse::fetch(http, board_token, name).await
            }
            CompanySource::Lever { name, site } => lever::fetch(http, site, name).await,
            CompanySource::Workday {
                name,
                tenant,
                site,
                site_candidates,
                region,
            } => {
                workday::fetch(
                    http,
                    tenant,
                    site.as_deref(),
                    site_candidates,
                    region.as_deref(),
                    name,
                )
                .await
            }
            CompanySource::Amazon { name, keywords } => amazon::fetch(http, keywords, name).await,
            CompanySource::Ashby { name, slug } => ashby::fetch(http, slug, name).await,
            CompanySource::Teamtailor { name, slug } => teamtailor::fetch(http, slug, name).await,
            CompanySource::Smartrecruiters { name, company_id } => {
                smartrecruiters::fetch(http, company_id, name).await
            }
            CompanySource::Icims { name, slug } => icims::fetch(http, slug, name).await,
        }
    }
}

/// Parses the many date shapes the upstreams emit: RFC 3339, naive
/// date-times, bare dates, and US-style long dates. `None` means the
/// caller substitutes the capture time.
pub fn parse_posted_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    // Amazon emits "January 2, 2024"
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%B %e, %Y") {
        return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt));
    }
    None
}

/// Date value from a JSON field: strings go through `parse_posted_date`,
/// integers are treated as epoch milliseconds (Lever).
pub fn date_from_value(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_posted_date(s),
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// First non-empty string among several candidate fields of a JSON object.
pub fn first_string<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| value.get(k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
}

/// First candidate field holding a date, via `date_from_value`.
pub fn first_date(value: &Value, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter().find_map(|k| date_from_value(value.get(*k)))
}

/// Joins the non-empty parts of a location with ", ".
pub fn join_location(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .filter_map(|p| *p)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_posted_date_rfc3339() {
        let dt = parse_posted_date("2024-03-01T12:30:00Z").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }

    #[test]
    fn test_parse_posted_date_naive_and_bare() {
        assert!(parse_posted_date("2024-03-01T12:30:00.123").is_some());
        assert!(parse_posted_date("2024-03-01").is_some());
    }

    #[test]
    fn test_parse_posted_date_long_form() {
        let dt = parse_posted_date("January 2, 2024").unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-02");
    }

    #[test]
    fn test_parse_posted_date_garbage_is_none() {
        assert!(parse_posted_date("").is_none());
        assert!(parse_posted_date("soon").is_none());
    }

    #[test]
    fn test_date_from_value_epoch_millis() {
        let v = json!(1_700_000_000_000_i64);
        let dt = date_from_value(Some(&v)).unwrap();
        assert_eq!(dt.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_first_string_skips_empty() {
        let v = json!({"a": "", "b": "hit", "c": "later"});
        assert_eq!(first_string(&v, &["a", "b", "c"]), Some("hit"));
        assert_eq!(first_string(&v, &["missing"]), None);
    }

    #[test]
    fn test_join_location_drops_empty_parts() {
        assert_eq!(
            join_location(&[Some("Austin"), Some(""), Some("TX")]),
            "Austin, TX"
        );
        assert_eq!(join_location(&[None, None]), "");
    }
}
