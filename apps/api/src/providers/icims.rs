//! iCIMS, best-effort: endpoints vary per tenant and many return HTML.
//! Two known JSON endpoint patterns are probed, and the jobs array may sit
//! under `jobs`, `items`, or be the top-level document itself.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use super::{first_date, first_string, http::JobsHttp, join_location, FetchError};
use crate::models::job::{Job, Source};

fn endpoints(slug: &str) -> [String; 2] {
    [
        format!("https://{slug}.icims.com/search/api/jobs?pr=0&in_iframe=1&mobile=false"),
        format!("https://{slug}.icims.com/api/jobs"),
    ]
}

pub async fn fetch(http: &JobsHttp, slug: &str, company: &str) -> Result<Vec<Job>, FetchError> {
    let mut last_err: Option<FetchError> = None;

    for url in endpoints(slug) {
        match http.get_json(&url).await {
            Ok(value) => {
                let jobs = map_jobs(&value, slug, company);
                if jobs.is_empty() {
                    debug!(company, url = %url, "icims endpoint returned no postings");
                    continue;
                }
                return Ok(jobs);
            }
            Err(e) => {
                debug!(company, url = %url, "icims endpoint failed: {e}");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or(FetchError::NoPostings))
}

fn map_jobs(value: &Value, slug: &str, company: &str) -> Vec<Job> {
    // Probe order: jobs, items, then the top-level array.
    let arr = value
        .get("jobs")
        .and_then(Value::as_array)
        .or_else(|| value.get("items").and_then(Value::as_array))
        .or_else(|| value.as_array());
    let Some(arr) = arr else {
        return Vec::new();
    };

    arr.iter().map(|j| map_job(j, slug, company)).collect()
}

fn map_job(j: &Value, slug: &str, company: &str) -> Job {
    let title = first_string(j, &["title", "jobTitle", "name"]).unwrap_or("Job");
    let location = first_string(j, &["location", "locationName", "locationText", "city"])
        .map(str::to_string)
        .unwrap_or_else(|| {
            join_location(&[
                j.get("city").and_then(Value::as_str),
                j.get("state").and_then(Value::as_str),
                j.get("country").and_then(Value::as_str),
            ])
        });

    let url = first_string(j, &["url", "hostedUrl", "applyUrl", "link", "canonicalUrl"])
        .map(str::to_string)
        .unwrap_or_else(|| format!("https://{slug}.icims.com/jobs/search?ss=1"));

    // No random fallback ids: a posting with no id at all gets a stable
    // title+location synthesis, same as the Amazon adapter.
    let id = first_string(j, &["id", "jobId", "identifier", "reqId", "url"])
        .map(str::to_string)
        .unwrap_or_else(|| format!("{title}-{location}"));

    Job {
        id,
        title: title.to_string(),
        company: company.to_string(),
        location: Some(location),
        url,
        department: first_string(j, &["department", "team"]).map(str::to_string),
        created_at: first_date(j, &["postedDate", "posted", "updatedAt", "createdAt"])
            .unwrap_or_else(Utc::now),
        source: Source::Icims,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_jobs_key_probed_first() {
        let value = json!({
            "jobs": [{ "id": "r123", "title": "Enterprise AE", "location": "Dallas, TX" }],
            "items": [{ "id": "ignored", "title": "wrong array" }]
        });
        let jobs = map_jobs(&value, "careers-acme", "Acme");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "r123");
        assert_eq!(jobs[0].source, Source::Icims);
    }

    #[test]
    fn test_items_key_probed_second() {
        let value = json!({ "items": [{ "reqId": "REQ-9", "title": "Strategic AE" }] });
        let jobs = map_jobs(&value, "careers-acme", "Acme");
        assert_eq!(jobs[0].id, "REQ-9");
    }

    #[test]
    fn test_top_level_array_probed_last() {
        let value = json!([{ "id": "1", "title": "AE", "city": "Boston", "state": "MA" }]);
        let jobs = map_jobs(&value, "careers-acme", "Acme");
        assert_eq!(jobs[0].location.as_deref(), Some("Boston"));
    }

    #[test]
    fn test_no_array_anywhere_maps_empty() {
        assert!(map_jobs(&json!({ "total": 0 }), "careers-acme", "Acme").is_empty());
    }

    #[test]
    fn test_missing_id_synthesized_deterministically() {
        let value = json!({ "jobs": [{ "title": "AE", "location": "Remote" }] });
        let jobs = map_jobs(&value, "careers-acme", "Acme");
        assert_eq!(jobs[0].id, "AE-Remote");
        assert_eq!(jobs[0].url, "https://careers-acme.icims.com/jobs/search?ss=1");
    }
}
