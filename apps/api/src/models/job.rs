//! Canonical job record — the one shape every provider adapter maps onto.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which ATS a job was fetched from. Closed set; serialized lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Greenhouse,
    Lever,
    Workday,
    Amazon,
    Ashby,
    Teamtailor,
    Smartrecruiters,
    Icims,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Greenhouse => "greenhouse",
            Source::Lever => "lever",
            Source::Workday => "workday",
            Source::Amazon => "amazon",
            Source::Ashby => "ashby",
            Source::Teamtailor => "teamtailor",
            Source::Smartrecruiters => "smartrecruiters",
            Source::Icims => "icims",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized job posting. `id` + `source` are unique within one
/// aggregation run; nothing is persisted across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Provider-supplied id, or synthesized from title + location when the
    /// upstream payload carries none.
    pub id: String,
    /// Raw title, unmodified.
    pub title: String,
    /// Operator-configured display name.
    pub company: String,
    /// Raw free-text location. Absent upstream becomes `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Posting URL. Always populated; falls back to the company careers root.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Posting date if the upstream reported one, else the capture time.
    /// Never absent, so recency filtering cannot silently drop undated jobs.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub source: Source,
}

impl Job {
    /// Location as a plain &str, treating absent as empty.
    pub fn location_str(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }
}

/// One per-company line of the coverage diagnostic. Computed fresh per
/// request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageRow {
    pub company: String,
    pub provider: Source,
    pub ok: bool,
    pub fetched: usize,
    pub matched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub rows: Vec<CoverageRow>,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&Source::Smartrecruiters).unwrap();
        assert_eq!(json, r#""smartrecruiters""#);
        let back: Source = serde_json::from_str(r#""greenhouse""#).unwrap();
        assert_eq!(back, Source::Greenhouse);
    }

    #[test]
    fn test_job_serializes_created_at_camel_case() {
        let job = Job {
            id: "1".to_string(),
            title: "Enterprise Account Executive".to_string(),
            company: "Acme".to_string(),
            location: None,
            url: "https://example.com/jobs/1".to_string(),
            department: None,
            created_at: Utc::now(),
            source: Source::Lever,
        };
        let value = serde_json::to_value(&job).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("location").is_none());
    }

    #[test]
    fn test_location_str_defaults_empty() {
        let job = Job {
            id: "1".to_string(),
            title: "t".to_string(),
            company: "c".to_string(),
            location: None,
            url: "u".to_string(),
            department: None,
            created_at: Utc::now(),
            source: Source::Ashby,
        };
        assert_eq!(job.location_str(), "");
    }
}
