//! Greenhouse boards API: single GET keyed by board token.

use chrono::Utc;
use serde::Deserialize;

use super::{http::JobsHttp, parse_posted_date, FetchError};
use crate::models::job::{Job, Source};

#[derive(Debug, Deserialize)]
struct BoardResponse {
    #[serde(default)]
    jobs: Vec<BoardJob>,
}

#[derive(Debug, Deserialize)]
struct BoardJob {
    id: i64,
    title: String,
    absolute_url: String,
    location: Option<BoardLocation>,
    #[serde(default)]
    departments: Vec<BoardDepartment>,
    updated_at: Option<String>,
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BoardLocation {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BoardDepartment {
    name: Option<String>,
}

pub async fn fetch(http: &JobsHttp, board_token: &str, company: &str) -> Result<Vec<Job>, FetchError> {
    let url = format!("https://boards-api.greenhouse.io/v1/boards/{board_token}/jobs?content=true");
    let value = http.get_json(&url).await?;
    let data: BoardResponse =
        serde_json::from_value(value).map_err(|e| FetchError::Malformed(e.to_string()))?;
    Ok(map_jobs(data, company))
}

fn map_jobs(data: BoardResponse, company: &str) -> Vec<Job> {
    data.jobs
        .into_iter()
        .map(|j| {
            // Date falls back created_at -> updated_at -> capture time.
            let created_at = j
                .created_at
                .as_deref()
                .and_then(parse_posted_date)
                .or_else(|| j.updated_at.as_deref().and_then(parse_posted_date))
                .unwrap_or_else(Utc::now);

            Job {
                id: j.id.to_string(),
                title: j.title,
                company: company.to_string(),
                location: j.location.and_then(|l| l.name),
                url: j.absolute_url,
                department: j.departments.into_iter().find_map(|d| d.name),
                created_at,
                source: Source::Greenhouse,
            }
        })
        .collect()
}
