use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::models::job::{CoverageReport, Job};
use crate::pipeline::{self, clamp_days, QueryParams};
use crate::state::AppState;

/// Raw query string: every parameter is optional and advisory. Flags use
/// "1" for true; anything else is false.
#[derive(Debug, Default, Deserialize)]
pub struct JobsQuery {
    days: Option<String>,
    remote: Option<String>,
    us_or_remote_us: Option<String>,
    na_remote_ok: Option<String>,
}

impl JobsQuery {
    fn decode(&self) -> QueryParams {
        QueryParams {
            days: clamp_days(self.days.as_deref()),
            remote_only: flag(&self.remote),
            us_or_remote_us: flag(&self.us_or_remote_us),
            allow_na_remote: flag(&self.na_remote_ok),
        }
    }
}

fn flag(value: &Option<String>) -> bool {
    value.as_deref() == Some("1")
}

/// GET /api/jobs
/// Filtered job list, newest first. Results are transient; nothing is
/// cached server-side, and clients must not cache either.
pub async fn handle_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> impl IntoResponse {
    let params = query.decode();
    let jobs: Vec<Job> = pipeline::run_bulk(&state.http, state.sources.as_slice(), &params).await;
    ([(header::CACHE_CONTROL, "no-store")], Json(jobs))
}

/// GET /api/jobs/coverage
/// Per-company diagnostic with the same filters as the bulk endpoint.
pub async fn handle_coverage(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> impl IntoResponse {
    let params = query.decode();
    let report: CoverageReport =
        pipeline::run_coverage(&state.http, state.sources.as_slice(), &params).await;
    ([(header::CACHE_CONTROL, "no-store")], Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_decode_only_literal_one() {
        let query = JobsQuery {
            days: Some("30".to_string()),
            remote: Some("1".to_string()),
            us_or_remote_us: Some("true".to_string()),
            na_remote_ok: None,
        };
        let params = query.decode();
        assert_eq!(params.days, 30);
        assert!(params.remote_only);
        assert!(!params.us_or_remote_us);
        assert!(!params.allow_na_remote);
    }

    #[test]
    fn test_defaults_when_absent() {
        let params = JobsQuery::default().decode();
        assert_eq!(params.days, 7);
        assert!(!params.remote_only);
        assert!(!params.us_or_remote_us);
    }
}
