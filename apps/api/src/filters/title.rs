//! Title classifier: is this an Enterprise/Strategic AE-class role?
//!
//! Waterfall, case-insensitive over a whitespace-collapsed title:
//! 1. any NEGATIVE term rejects, absolutely;
//! 2. a POSITIVE scope term is required;
//! 3. an AE-role term is required ("ae" only as a standalone token).

use once_cell::sync::Lazy;
use regex::Regex;

/// Scope terms that mark enterprise/strategic territory.
const POSITIVE: &[&str] = &[
    "enterprise",
    "strategic",
    "majors",
    "major accounts",
    "major account",
    "named",
    "named accounts",
    "key accounts",
    "global accounts",
    "large enterprise",
    "select accounts",
    "strategic accounts",
    "global account",
];

/// Role terms. "ae" is matched as a word, not a substring.
const AE_TERMS: &[&str] = &[
    "account executive",
    "ae",
    "acct exec",
    "sales executive",
    "account manager",
    "account director",
    "client executive",
    "sales representative",
    "sales rep",
];

/// Always excluded, regardless of positives. Seniority/contract and
/// SDR/BDR exclusions only.
const NEGATIVE: &[&str] = &[
    "smb",
    "mid-market",
    "mid market",
    "commercial",
    "mm ",
    "sdr",
    "bdr",
    "intern",
    "contract",
    "temporary",
    "contractor",
    "assistant",
    "co-op",
    "coop",
    "unpaid",
];

static AE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bae\b").expect("valid ae regex"));

pub fn is_enterprise_ae(title: &str) -> bool {
    let t = norm(title);

    if NEGATIVE.iter().any(|n| t.contains(n)) {
        return false;
    }

    if !POSITIVE.iter().any(|p| t.contains(p)) {
        return false;
    }

    AE_TERMS.iter().any(|k| {
        if *k == "ae" {
            AE_WORD.is_match(&t)
        } else {
            t.contains(k)
        }
    })
}

fn norm(s: &str) -> String {
    s.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ")
}
