//! Query pipeline: fan out to every configured source concurrently, then
//! classifier -> recency -> residency gate -> remote-only -> sort.
//!
//! One fan-out serves both output modes. Bulk mode flattens the successes
//! and hides failures; coverage mode reports per-company outcomes with the
//! same filters applied, so the two modes always agree for the same query.

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use tracing::{info, warn};

use crate::filters::location::{is_remote_any, passes_residency_gate, GateOptions};
use crate::filters::title::is_enterprise_ae;
use crate::models::job::{CoverageReport, CoverageRow, Job, Source};
use crate::providers::http::JobsHttp;
use crate::providers::{FetchError, JobSource};

pub const DEFAULT_DAYS: i64 = 7;
pub const MIN_DAYS: i64 = 1;
pub const MAX_DAYS: i64 = 365;

/// Decoded query parameters. All advisory; invalid input falls back to
/// defaults rather than erroring.
#[derive(Debug, Clone, Copy)]
pub struct QueryParams {
    /// Recency window in days, clamped to [1, 365].
    pub days: i64,
    pub remote_only: bool,
    pub us_or_remote_us: bool,
    pub allow_na_remote: bool,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            remote_only: false,
            us_or_remote_us: false,
            allow_na_remote: false,
        }
    }
}

/// Clamps a raw `days` parameter to [1, 365], defaulting on absent or
/// non-numeric input.
pub fn clamp_days(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .map(|n| n.clamp(MIN_DAYS, MAX_DAYS))
        .unwrap_or(DEFAULT_DAYS)
}

/// Everything one source produced (or failed to produce) in one fan-out.
pub struct SourceOutcome {
    pub company: String,
    pub provider: Source,
    pub result: Result<Vec<Job>, FetchError>,
}

/// Invokes every source concurrently. One source's failure never discards
/// another's jobs: each future resolves to its own outcome slot.
pub async fn fetch_all<S: JobSource>(http: &JobsHttp, sources: &[S]) -> Vec<SourceOutcome> {
    let futures = sources.iter().map(|source| async move {
        let result = source.fetch(http).await;
        if let Err(e) = &result {
            warn!(company = source.company(), provider = %source.provider(), "source fetch failed: {e}");
        }
        SourceOutcome {
            company: source.company().to_string(),
            provider: source.provider(),
            result,
        }
    });
    join_all(futures).await
}

/// The shared filter chain. `since` is the lower bound of the recency
/// window, precomputed once per query.
fn job_matches(job: &Job, since: DateTime<Utc>, params: &QueryParams) -> bool {
    if !is_enterprise_ae(&job.title) {
        return false;
    }
    if job.created_at < since {
        return false;
    }
    if params.us_or_remote_us {
        let opts = GateOptions {
            allow_na_remote: params.allow_na_remote,
        };
        if !passes_residency_gate(job, opts) {
            return false;
        }
    }
    if params.remote_only && !is_remote_any(job.location_str()) {
        return false;
    }
    true
}

/// Bulk mode: flat filtered job list, newest first. Per-source failures
/// are invisible here; they surface only through coverage mode.
pub async fn run_bulk<S: JobSource>(
    http: &JobsHttp,
    sources: &[S],
    params: &QueryParams,
) -> Vec<Job> {
    let since = Utc::now() - Duration::days(params.days);
    let outcomes = fetch_all(http, sources).await;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let mut jobs: Vec<Job> = outcomes
        .into_iter()
        .filter_map(|o| o.result.ok())
        .flatten()
        .filter(|j| job_matches(j, since, params))
        .collect();

    jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    info!(
        matched = jobs.len(),
        failed_sources = failed,
        days = params.days,
        "aggregation complete"
    );
    jobs
}

/// Coverage mode: one row per company with the same filters applied.
/// Rows sort successes first, then matched count descending, then company
/// name ascending.
pub async fn run_coverage<S: JobSource>(
    http: &JobsHttp,
    sources: &[S],
    params: &QueryParams,
) -> CoverageReport {
    let since = Utc::now() - Duration::days(params.days);
    let outcomes = fetch_all(http, sources).await;

    let mut rows: Vec<CoverageRow> = outcomes
        .into_iter()
        .map(|o| match o.result {
            Ok(jobs) => CoverageRow {
                company: o.company,
                provider: o.provider,
                ok: true,
                fetched: jobs.len(),
                matched: jobs.iter().filter(|j| job_matches(j, since, params)).count(),
                error: None,
            },
            Err(e) => CoverageRow {
                company: o.company,
                provider: o.provider,
                ok: false,
                fetched: 0,
                matched: 0,
                error: Some(e.to_string()),
            },
        })
        .collect();

    rows.sort_by(|a, b| {
        b.ok.cmp(&a.ok)
            .then(b.matched.cmp(&a.matched))
            .then_with(|| a.company.cmp(&b.company))
    });

    CoverageReport {
        rows,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration as StdDuration;

    struct StubSource {
        company: &'static str,
        provider: Source,
        jobs: Vec<Job>,
        fail: bool,
    }

    #[async_trait]
    impl JobSource for StubSource {
        fn company(&self) -> &str {
            self.company
        }

        fn provider(&self) -> Source {
            self.provider
        }

        async fn fetch(&self, _http: &JobsHttp) -> Result<Vec<Job>, FetchError> {
            if self.fail {
                Err(FetchError::Status(503))
            } else {
                Ok(self.jobs.clone())
            }
        }
    }

    fn http() -> JobsHttp {
        JobsHttp::new(StdDuration::from_secs(1))
    }

    fn job(id: &str, title: &str, location: &str, age_days: i64, source: Source) -> Job {
        Job {
            id: id.to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            location: Some(location.to_string()),
            url: "https://example.com/jobs".to_string(),
            department: None,
            created_at: Utc::now() - Duration::days(age_days),
            source,
        }
    }

    fn ok_source(company: &'static str, provider: Source, jobs: Vec<Job>) -> StubSource {
        StubSource {
            company,
            provider,
            jobs,
            fail: false,
        }
    }

    fn failing_source(company: &'static str, provider: Source) -> StubSource {
        StubSource {
            company,
            provider,
            jobs: vec![],
            fail: true,
        }
    }

    #[test]
    fn test_clamp_days() {
        assert_eq!(clamp_days(None), 7);
        assert_eq!(clamp_days(Some("30")), 30);
        assert_eq!(clamp_days(Some("0")), 1);
        assert_eq!(clamp_days(Some("9999")), 365);
        assert_eq!(clamp_days(Some("soon")), 7);
    }

    #[tokio::test]
    async fn test_partial_failure_isolation() {
        let sources = vec![
            ok_source(
                "Good Co",
                Source::Greenhouse,
                vec![job("1", "Strategic Account Executive", "Remote (US)", 1, Source::Greenhouse)],
            ),
            failing_source("Bad Co", Source::Icims),
        ];

        let jobs = run_bulk(&http(), &sources, &QueryParams::default()).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "1");

        let report = run_coverage(&http(), &sources, &QueryParams::default()).await;
        let good = report.rows.iter().find(|r| r.company == "Good Co").unwrap();
        let bad = report.rows.iter().find(|r| r.company == "Bad Co").unwrap();
        assert!(good.ok);
        assert_eq!(good.fetched, 1);
        assert_eq!(good.matched, 1);
        assert!(!bad.ok);
        assert_eq!(bad.fetched, 0);
        assert_eq!(bad.error.as_deref(), Some("HTTP 503"));
    }

    #[tokio::test]
    async fn test_bulk_sorted_newest_first() {
        let sources = vec![ok_source(
            "Acme",
            Source::Lever,
            vec![
                job("old", "Strategic Account Executive", "NY", 5, Source::Lever),
                job("new", "Enterprise Account Executive", "CA", 1, Source::Lever),
                job("mid", "Named Account Manager", "TX", 3, Source::Lever),
            ],
        )];

        let jobs = run_bulk(&http(), &sources, &QueryParams::default()).await;
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid", "old"]);
        for pair in jobs.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[tokio::test]
    async fn test_recency_window_filters() {
        let sources = vec![ok_source(
            "Acme",
            Source::Greenhouse,
            vec![job("stale", "Strategic Account Executive", "NY", 10, Source::Greenhouse)],
        )];

        let narrow = QueryParams { days: 7, ..QueryParams::default() };
        assert!(run_bulk(&http(), &sources, &narrow).await.is_empty());

        let wide = QueryParams { days: 30, ..QueryParams::default() };
        assert_eq!(run_bulk(&http(), &sources, &wide).await.len(), 1);
    }

    #[tokio::test]
    async fn test_title_classifier_applied() {
        let sources = vec![ok_source(
            "Acme",
            Source::Ashby,
            vec![
                job("yes", "Enterprise Account Executive", "NY", 1, Source::Ashby),
                job("no-scope", "Account Executive", "NY", 1, Source::Ashby),
                job("negative", "Enterprise Account Executive (Contract)", "NY", 1, Source::Ashby),
            ],
        )];

        let jobs = run_bulk(&http(), &sources, &QueryParams::default()).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "yes");
    }

    #[tokio::test]
    async fn test_residency_gate_applied_when_requested() {
        let sources = vec![ok_source(
            "Acme",
            Source::Lever,
            vec![
                job("us", "Strategic Account Executive", "Remote (US)", 1, Source::Lever),
                job("india", "Strategic Account Executive", "Remote - India", 1, Source::Lever),
            ],
        )];

        let ungated = run_bulk(&http(), &sources, &QueryParams::default()).await;
        assert_eq!(ungated.len(), 2);

        let gated = QueryParams {
            us_or_remote_us: true,
            ..QueryParams::default()
        };
        let jobs = run_bulk(&http(), &sources, &gated).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "us");
    }

    #[tokio::test]
    async fn test_remote_only_filter() {
        let sources = vec![ok_source(
            "Acme",
            Source::Lever,
            vec![
                job("remote", "Strategic Account Executive", "Remote (US)", 1, Source::Lever),
                job("office", "Strategic Account Executive", "New York, NY", 1, Source::Lever),
            ],
        )];

        let params = QueryParams {
            remote_only: true,
            ..QueryParams::default()
        };
        let jobs = run_bulk(&http(), &sources, &params).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, "remote");
    }

    #[tokio::test]
    async fn test_coverage_sort_order() {
        let matching = |n: usize| -> Vec<Job> {
            (0..n)
                .map(|i| {
                    job(
                        &format!("j{i}"),
                        "Strategic Account Executive",
                        "Remote (US)",
                        1,
                        Source::Greenhouse,
                    )
                })
                .collect()
        };
        let sources = vec![
            failing_source("Zeta", Source::Icims),
            ok_source("Beta", Source::Greenhouse, matching(1)),
            ok_source("Alpha", Source::Greenhouse, matching(1)),
            ok_source("Gamma", Source::Greenhouse, matching(3)),
            failing_source("Eta", Source::Workday),
        ];

        let report = run_coverage(&http(), &sources, &QueryParams::default()).await;
        let companies: Vec<&str> = report.rows.iter().map(|r| r.company.as_str()).collect();
        // successes first (matched desc, then name asc), failures last (name asc)
        assert_eq!(companies, vec!["Gamma", "Alpha", "Beta", "Eta", "Zeta"]);
        assert!(report.rows.iter().take(3).all(|r| r.ok));
        assert!(report.rows.iter().skip(3).all(|r| !r.ok));
    }
}
