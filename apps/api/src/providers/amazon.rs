//! Amazon's public jobs search: one request per configured keyword, with
//! results merged by synthesized job id so postings matched by several
//! keywords appear once. One keyword's failure does not abort the others.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use super::{first_date, first_string, http::JobsHttp, join_location, FetchError};
use crate::models::job::{Job, Source};

const DEFAULT_KEYWORDS: &[&str] = &["account executive", "enterprise", "strategic"];

pub async fn fetch(http: &JobsHttp, keywords: &[String], company: &str) -> Result<Vec<Job>, FetchError> {
    let keywords: Vec<String> = if keywords.is_empty() {
        DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect()
    } else {
        keywords.to_vec()
    };

    let mut merged: HashMap<String, Job> = HashMap::new();
    let mut any_ok = false;
    let mut last_err: Option<FetchError> = None;

    // Sequential on purpose: the provider contract is fan-out across
    // companies, not within one company's keyword list.
    for keyword in &keywords {
        let url = format!(
            "https://www.amazon.jobs/en/search.json?result_limit=200&offset=0&normalized_country_code=US&keywords={}",
            keyword.replace(' ', "%20")
        );
        match http.get_json(&url).await {
            Ok(value) => {
                any_ok = true;
                for job in map_jobs(&value, company) {
                    merged.insert(job.id.clone(), job);
                }
            }
            Err(e) => {
                debug!(company, keyword = %keyword, "amazon keyword query failed: {e}");
                last_err = Some(e);
            }
        }
    }

    if any_ok {
        Ok(merged.into_values().collect())
    } else {
        Err(last_err.unwrap_or(FetchError::NoPostings))
    }
}

fn map_jobs(value: &Value, company: &str) -> Vec<Job> {
    let jobs = value
        .get("jobs")
        .and_then(Value::as_array)
        .or_else(|| value.get("search_results").and_then(Value::as_array));
    let Some(jobs) = jobs else {
        return Vec::new();
    };

    jobs.iter().map(|j| map_job(j, company)).collect()
}

fn map_job(j: &Value, company: &str) -> Job {
    let title = first_string(j, &["title", "job_title"]).unwrap_or("");
    let city = first_string(j, &["city", "normalized_city"]).unwrap_or("");
    let state = first_string(j, &["state", "normalized_state"]).unwrap_or("");
    let country = first_string(j, &["country", "normalized_country"]).unwrap_or("");
    let state_or_country = if state.is_empty() { country } else { state };
    let mut location = join_location(&[Some(city), Some(state_or_country)]);
    if location.is_empty() {
        location = first_string(j, &["location"]).unwrap_or("").to_string();
    }

    let path = first_string(j, &["job_path", "job_url", "url"]).unwrap_or("");
    let url = if path.is_empty() {
        "https://www.amazon.jobs".to_string()
    } else if path.starts_with("http") {
        path.to_string()
    } else {
        format!("https://www.amazon.jobs{path}")
    };

    // First non-empty candidate id field, else title+location.
    let id = id_string(j, &["id", "job_id", "jobId", "slug", "job_path", "url"])
        .unwrap_or_else(|| format!("{title}-{location}"));

    let created_at = first_date(
        j,
        &["posted_date", "posted_date_time", "updated_time", "posting_date", "posted_at"],
    )
    .unwrap_or_else(Utc::now);

    Job {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: Some(location),
        url,
        department: None,
        created_at,
        source: Source::Amazon,
    }
}

/// Like `first_string`, but tolerates numeric ids.
fn id_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| match value.get(*k) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
