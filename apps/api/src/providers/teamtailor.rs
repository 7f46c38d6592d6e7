//! Teamtailor: two endpoint path variants, and two payload dialects. Older
//! boards return a flat `jobs[]`; newer ones a JSON:API `data[]` with an
//! `attributes` wrapper. The flat shape wins when both are non-empty.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use super::{first_date, first_string, http::JobsHttp, join_location, FetchError};
use crate::models::job::{Job, Source};

fn endpoints(slug: &str) -> [String; 2] {
    [
        format!("https://{slug}.teamtailor.com/api/jobs"),
        format!("https://{slug}.teamtailor.com/api/v1/jobs"),
    ]
}

pub async fn fetch(http: &JobsHttp, slug: &str, company: &str) -> Result<Vec<Job>, FetchError> {
    let mut last_err: Option<FetchError> = None;

    for url in endpoints(slug) {
        match http.get_json(&url).await {
            Ok(value) => {
                let jobs = map_jobs(&value, slug, company);
                if jobs.is_empty() {
                    debug!(company, url = %url, "teamtailor endpoint returned no postings");
                    continue;
                }
                return Ok(jobs);
            }
            Err(e) => {
                debug!(company, url = %url, "teamtailor endpoint failed: {e}");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or(FetchError::NoPostings))
}

fn map_jobs(value: &Value, slug: &str, company: &str) -> Vec<Job> {
    let flat: Vec<Job> = value
        .get("jobs")
        .and_then(Value::as_array)
        .map(|jobs| jobs.iter().map(|j| map_flat(j, slug, company)).collect())
        .unwrap_or_default();
    if !flat.is_empty() {
        return flat;
    }

    value
        .get("data")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(|e| map_json_api(e, slug, company)).collect())
        .unwrap_or_default()
}

fn map_flat(j: &Value, slug: &str, company: &str) -> Job {
    let location = location_string(j);
    let url = first_string(j, &["url", "hostedUrl", "career_url", "link"])
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://{slug}.teamtailor.com"));

    Job {
        id: id_string(j),
        title: first_string(j, &["title", "name"]).unwrap_or("").to_string(),
        company: company.to_string(),
        location: Some(location),
        url,
        department: first_string(j, &["team", "department"]).map(str::to_string),
        created_at: first_date(j, &["published_at", "created_at", "updated_at"])
            .unwrap_or_else(Utc::now),
        source: Source::Teamtailor,
    }
}

fn map_json_api(entry: &Value, slug: &str, company: &str) -> Job {
    let empty = Value::Null;
    let a = entry.get("attributes").unwrap_or(&empty);
    let url = entry
        .get("links")
        .and_then(|l| l.get("self"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| first_string(a, &["url"]))
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://{slug}.teamtailor.com"));

    Job {
        id: id_string(entry),
        title: first_string(a, &["title", "name"]).unwrap_or("").to_string(),
        company: company.to_string(),
        location: Some(location_string(a)),
        url,
        department: first_string(a, &["team", "department"]).map(str::to_string),
        created_at: first_date(a, &["published_at", "created_at", "updated_at"])
            .unwrap_or_else(Utc::now),
        source: Source::Teamtailor,
    }
}

/// `location` may be a plain string or a `{city, country}` object; the
/// flat `city`/`state`/`country` fields fill the gap between the two.
fn location_string(j: &Value) -> String {
    if let Some(s) = j.get("location").and_then(Value::as_str) {
        if !s.is_empty() {
            return s.to_string();
        }
    }
    let flat = join_location(&[
        j.get("city").and_then(Value::as_str),
        j.get("state").and_then(Value::as_str),
        j.get("country").and_then(Value::as_str),
    ]);
    if !flat.is_empty() {
        return flat;
    }
    if let Some(loc) = j.get("location").filter(|l| l.is_object()) {
        return join_location(&[
            loc.get("city").and_then(Value::as_str),
            loc.get("country").and_then(Value::as_str),
        ]);
    }
    String::new()
}

fn id_string(j: &Value) -> String {
    match j.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
