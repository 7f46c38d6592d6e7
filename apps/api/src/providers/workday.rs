//! Workday CXS search: POST with an empty search body, probing an ordered
//! list of candidate site slugs and stopping at the first site that
//! returns a non-empty posting list.

use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use super::{first_date, first_string, http::JobsHttp, join_location, FetchError};
use crate::models::job::{Job, Source};

/// Candidate site slugs in probe order: explicit config site, configured
/// candidates, the literals "jobs" and "careers", then the tenant itself.
/// Deduplicated preserving first occurrence.
pub fn site_candidates(site: Option<&str>, configured: &[String], tenant: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |s: &str| {
        if !s.is_empty() && !out.iter().any(|seen| seen == s) {
            out.push(s.to_string());
        }
    };
    if let Some(s) = site {
        push(s);
    }
    for s in configured {
        push(s);
    }
    push("jobs");
    push("careers");
    push(tenant);
    out
}

pub async fn fetch(
    http: &JobsHttp,
    tenant: &str,
    site: Option<&str>,
    configured_candidates: &[String],
    region: Option<&str>,
    company: &str,
) -> Result<Vec<Job>, FetchError> {
    let region = region.unwrap_or("wd1");
    let body = json!({ "appliedFacets": {}, "limit": 100, "offset": 0, "searchText": "" });
    let mut last_err: Option<FetchError> = None;

    for candidate in site_candidates(site, configured_candidates, tenant) {
        let url = format!("https://{tenant}.{region}.myworkdayjobs.com/wday/cxs/{tenant}/{candidate}/jobs");
        match http.post_json(&url, &body).await {
            Ok(value) => {
                let jobs = map_jobs(&value, tenant, region, &candidate, company);
                if jobs.is_empty() {
                    debug!(company, site = %candidate, "workday site returned no postings");
                    continue;
                }
                return Ok(jobs);
            }
            Err(e) => {
                debug!(company, site = %candidate, "workday site candidate failed: {e}");
                last_err = Some(e);
            }
        }
    }

    Err(last_err.unwrap_or(FetchError::NoPostings))
}

fn map_jobs(value: &Value, tenant: &str, region: &str, site: &str, company: &str) -> Vec<Job> {
    let postings = value
        .get("jobPostings")
        .and_then(Value::as_array)
        .or_else(|| value.get("results").and_then(Value::as_array));
    let Some(postings) = postings else {
        return Vec::new();
    };

    postings
        .iter()
        .map(|p| {
            let title = first_string(p, &["title"])
                .or_else(|| p.get("bulletFields").and_then(|b| first_string(b, &["title"])))
                .unwrap_or("Job");
            let external_path = first_string(
                p,
                &["externalPath", "externalUrlPath", "externalURL", "externalUrl", "uri"],
            )
            .unwrap_or("");
            let location = first_string(p, &["locationsText"])
                .map(str::to_string)
                .or_else(|| joined_locations(p))
                .or_else(|| first_string(p, &["location"]).map(str::to_string))
                .unwrap_or_default();
            let created_at = first_date(
                p,
                &["postedOn", "postedDate", "publicationDate", "latestUpdateDateTime", "postedDateTime"],
            )
            .unwrap_or_else(Utc::now);

            let site_root = format!("https://{tenant}.{region}.myworkdayjobs.com/en-US/{site}");
            let url = if external_path.is_empty() {
                site_root
            } else if external_path.starts_with('/') {
                format!("{site_root}{external_path}")
            } else {
                format!("{site_root}/{external_path}")
            };

            Job {
                id: if external_path.is_empty() {
                    format!("{title}-{url}")
                } else {
                    external_path.to_string()
                },
                title: title.to_string(),
                company: company.to_string(),
                location: Some(location),
                url,
                department: None,
                created_at,
                source: Source::Workday,
            }
        })
        .collect()
}

/// Workday's structured `locations[]`, each joined "city, state, country"
/// and the postings separated with a bullet.
fn joined_locations(posting: &Value) -> Option<String> {
    let locations = posting.get("locations")?.as_array()?;
    let joined = locations
        .iter()
        .map(|l| {
            join_location(&[
                l.get("city").and_then(Value::as_str),
                l.get("state").and_then(Value::as_str),
                l.get("country").and_then(Value::as_str),
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
