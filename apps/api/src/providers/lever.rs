//! Lever postings API: single GET keyed by site slug. Dates arrive as
//! epoch milliseconds.

use chrono::{TimeZone, Utc};
use serde::Deserialize;

use super::{http::JobsHttp, FetchError};
use crate::models::job::{Job, Source};

#[derive(Debug, Deserialize)]
struct Posting {
    id: String,
    text: String,
    #[serde(rename = "hostedUrl")]
    hosted_url: String,
    #[serde(rename = "createdAt")]
    created_at: Option<i64>,
    categories: Option<Categories>,
}

#[derive(Debug, Deserialize)]
struct Categories {
    location: Option<String>,
    team: Option<String>,
}

pub async fn fetch(http: &JobsHttp, site: &str, company: &str) -> Result<Vec<Job>, FetchError> {
    let url = format!("https://api.lever.co/v0/postings/{site}?mode=json");
    let value = http.get_json(&url).await?;
    let postings: Vec<Posting> =
        serde_json::from_value(value).map_err(|e| FetchError::Malformed(e.to_string()))?;
    Ok(map_jobs(postings, company))
}

fn map_jobs(postings: Vec<Posting>, company: &str) -> Vec<Job> {
    postings
        .into_iter()
        .map(|p| {
            let created_at = p
                .created_at
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                .unwrap_or_else(Utc::now);
            let (location, department) = match p.categories {
                Some(c) => (c.location, c.team),
                None => (None, None),
            };

            Job {
                id: p.id,
                title: p.text,
                company: company.to_string(),
                location,
                url: p.hosted_url,
                department,
                created_at,
                source: Source::Lever,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {
            "id": "a1b2c3",
            "text": "Strategic Account Executive",
            "hostedUrl": "https://jobs.lever.co/acme/a1b2c3",
            "createdAt": 1707555600000,
            "categories": { "location": "Remote - US", "team": "Sales" }
        },
        {
            "id": "d4e5f6",
            "text": "Enterprise AE",
            "hostedUrl": "https://jobs.lever.co/acme/d4e5f6"
        }
    ]"#;

    #[test]
    fn test_maps_postings_with_epoch_millis() {
        let postings: Vec<Posting> = serde_json::from_str(FIXTURE).unwrap();
        let jobs = map_jobs(postings, "Acme");

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].id, "a1b2c3");
        assert_eq!(jobs[0].created_at.timestamp_millis(), 1707555600000);
        assert_eq!(jobs[0].location.as_deref(), Some("Remote - US"));
        assert_eq!(jobs[0].department.as_deref(), Some("Sales"));
        assert_eq!(jobs[0].source, Source::Lever);
    }

    #[test]
    fn test_missing_created_at_becomes_now() {
        let postings: Vec<Posting> = serde_json::from_str(FIXTURE).unwrap();
        let before = Utc::now();
        let jobs = map_jobs(postings, "Acme");
        assert!(jobs[1].created_at >= before);
        assert!(jobs[1].location.is_none());
    }
}
