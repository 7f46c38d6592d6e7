//! SmartRecruiters postings API: single GET keyed by company id. The
//! `content` field is the authoritative postings array; variants carrying
//! `result`/`data` instead have been observed but are not read.

use chrono::Utc;
use serde_json::Value;

use super::{first_date, first_string, http::JobsHttp, join_location, FetchError};
use crate::models::job::{Job, Source};

pub async fn fetch(http: &JobsHttp, company_id: &str, company: &str) -> Result<Vec<Job>, FetchError> {
    let url = format!("https://api.smartrecruiters.com/v1/companies/{company_id}/postings?limit=200");
    let value = http.get_json(&url).await?;
    Ok(map_jobs(&value, company_id, company))
}

fn map_jobs(value: &Value, company_id: &str, company: &str) -> Vec<Job> {
    let Some(content) = value.get("content").and_then(Value::as_array) else {
        return Vec::new();
    };

    content
        .iter()
        .map(|j| {
            let id = first_string(j, &["id", "uuid", "identifier"]).unwrap_or("").to_string();
            let title = first_string(j, &["name", "title"]).unwrap_or("");

            // Structured location object joined into one string.
            let location = j
                .get("location")
                .map(|loc| {
                    join_location(&[
                        loc.get("city").and_then(Value::as_str),
                        loc.get("region").and_then(Value::as_str),
                        loc.get("country").and_then(Value::as_str),
                    ])
                })
                .filter(|s| !s.is_empty())
                .or_else(|| first_string(j, &["locationText"]).map(str::to_string))
                .unwrap_or_default();

            let url = first_string(j, &["applyUrl"])
                .map(str::to_string)
                .or_else(|| {
                    j.get("jobAd")
                        .and_then(|ad| ad.get("sections"))
                        .and_then(|s| s.get("company"))
                        .and_then(|c| c.get("url"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| {
                    if id.is_empty() {
                        format!("https://careers.smartrecruiters.com/{company_id}")
                    } else {
                        format!("https://jobs.smartrecruiters.com/{company_id}/{id}")
                    }
                });

            let department = department_label(j.get("department"))
                .or_else(|| department_label(j.get("function")));

            Job {
                id,
                title: title.to_string(),
                company: company.to_string(),
                location: Some(location),
                url,
                department,
                created_at: first_date(j, &["releasedDate", "createdOn", "created", "updatedOn"])
                    .unwrap_or_else(Utc::now),
                source: Source::Smartrecruiters,
            }
        })
        .collect()
}

/// Department arrives either as a bare string or as `{id, label}`.
fn department_label(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(o) => o.get("label").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps_content_array() {
        let value = json!({
            "content": [{
                "id": "744000012",
                "name": "Enterprise Account Executive",
                "location": { "city": "Chicago", "region": "IL", "country": "US" },
                "applyUrl": "https://jobs.smartrecruiters.com/Acme/744000012",
                "department": { "id": "1", "label": "Sales" },
                "releasedDate": "2024-02-03T10:00:00Z"
            }]
        });
        let jobs = map_jobs(&value, "Acme", "Acme");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "744000012");
        assert_eq!(jobs[0].location.as_deref(), Some("Chicago, IL, US"));
        assert_eq!(jobs[0].department.as_deref(), Some("Sales"));
        assert_eq!(jobs[0].source, Source::Smartrecruiters);
    }

    #[test]
    fn test_url_synthesized_from_company_and_id() {
        let value = json!({ "content": [{ "id": "99", "name": "Strategic AE" }] });
        let jobs = map_jobs(&value, "Acme", "Acme");
        assert_eq!(jobs[0].url, "https://jobs.smartrecruiters.com/Acme/99");
    }

    #[test]
    fn test_only_content_is_read() {
        // `result`/`data` variants are deliberately ignored.
        let value = json!({ "result": [{ "id": "1", "name": "AE" }] });
        assert!(map_jobs(&value, "Acme", "Acme").is_empty());
    }
}
