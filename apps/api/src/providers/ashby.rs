//! Ashby job postings: the public API surface has shifted over time, so
//! three endpoint shapes are probed in order and the first one returning a
//! non-empty job array wins.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use super::{first_date, first_string, http::JobsHttp, join_location, FetchError};
use crate::models::job::{Job, Source};

fn endpoints(slug: &str) -> [String; 3] {
    [
        format!("https://jobs.ashbyhq.com/api/jobPosting?organizationSlug={slug}"),
        format!("https://jobs.ashbyhq.com/api/organization/{slug}/job-postings"),
        format!("https://jobs.ashbyhq.com/api/organizations/{slug}/jobs"),
    ]
}

pub async fn fetch(http: &JobsHttp, slug: &str, company: &str) -> Result<Vec<Job>, FetchError> {
    let mut last_err: Option<FetchError> = None;

    for url in endpoints(slug) {
        match http.get_json(&url).await {
            Ok(value) => {
                let jobs = map_jobs(&value, slug, company);
                if jobs.is_empty() {
                    debug!(company, url = %url, "ashby endpoint returned no postings");
                    continue;
                }
                return Ok(jobs);
            }
            Err(e) => {
                debug!(company, url = %url, "ashby endpoint failed: {e}");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or(FetchError::NoPostings))
}

fn map_jobs(value: &Value, slug: &str, company: &str) -> Vec<Job> {
    let items = value
        .get("jobPostings")
        .and_then(Value::as_array)
        .or_else(|| value.get("jobs").and_then(Value::as_array))
        .or_else(|| value.as_array());
    let Some(items) = items else {
        return Vec::new();
    };

    items.iter().map(|j| map_job(j, slug, company)).collect()
}

fn map_job(j: &Value, slug: &str, company: &str) -> Job {
    let id = first_string(j, &["id", "slug", "jobId", "uniqueId", "externalId", "shortUrl", "url"])
        .unwrap_or("")
        .to_string();
    let title = first_string(j, &["title", "jobTitle", "text"]).unwrap_or("");

    // Richest available location: direct fields, then offices, then the
    // locations array, joined with a bullet separator.
    let location = first_string(j, &["location", "locationName"])
        .map(str::to_string)
        .or_else(|| joined_offices(j))
        .or_else(|| joined_location_names(j))
        .unwrap_or_default();

    let url_path = first_string(j, &["shortUrl", "hostedUrl", "url"]).unwrap_or("");
    let url = if url_path.is_empty() {
        format!("https://jobs.ashbyhq.com/{slug}")
    } else if url_path.starts_with("http") {
        url_path.to_string()
    } else if url_path.starts_with('/') {
        format!("https://jobs.ashbyhq.com/{slug}{url_path}")
    } else {
        format!("https://jobs.ashbyhq.com/{slug}/{url_path}")
    };

    let created_at = first_date(j, &["publishedAt", "postedAt", "updatedAt", "createdAt"])
        .unwrap_or_else(Utc::now);

    Job {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: Some(location),
        url,
        department: first_string(j, &["department", "team"]).map(str::to_string),
        created_at,
        source: Source::Ashby,
    }
}

fn joined_offices(j: &Value) -> Option<String> {
    let offices = j.get("offices")?.as_array()?;
    let joined = offices
        .iter()
        .map(|o| {
            join_location(&[
                o.get("city").and_then(Value::as_str),
                o.get("region").and_then(Value::as_str),
                o.get("country").and_then(Value::as_str),
            ])
        })
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" \u{2022} ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn joined_location_names(j: &Value) -> Option<String> {
    let locations = j.get("locations")?.as_array()?;
    let joined = locations
        .iter()
        .filter_map(|l| first_string(l, &["name", "location"]))
        .collect::<Vec<_>>()
        .join(" \u{2022} ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
