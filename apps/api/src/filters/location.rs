//! Location-residency gate: does a job's free-text location pass the
//! US / Remote-US policy?
//!
//! Strict waterfall over the trimmed raw location, first matching rule
//! wins:
//! 1. explicit US location -> accept unconditionally;
//! 2. remote-pattern locations -> North-America carve-outs, then non-US
//!    keyword rejection, then US mention / US location / US timezone,
//!    then blank-location title/URL hints;
//! 3. everything else -> reject (blank + NA-allowed + US hints excepted).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::job::Job;

/// Gate behavior flags, decoded from the query string by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateOptions {
    /// Accept remote roles scoped to North America or "US/Canada".
    pub allow_na_remote: bool,
}

static REMOTE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(remote|anywhere|global|distributed|work from home|telecommute)\b")
        .expect("valid remote regex")
});

static US_MENTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bunited states\b|\bu\.?s\.?a?\.?\b|\bus[-\s]?only\b|\bwithin the us\b")
        .expect("valid US mention regex")
});

static NORTH_AMERICA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bnorth america\b").expect("valid north america regex"));

/// "US or Canada", "US/Canada", "United States and Canada", "USA & Canada", ...
static US_OR_CANADA_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\bus\s*/\s*canada\b",
        r"\busa\s*/\s*canada\b",
        r"\bunited states\b.*\bcanada\b",
        r"\bcanada\b.*\bunited states\b",
        r"\bus\b.*\bcanada\b",
        r"\bcanada\b.*\bus\b",
        r"\busa\b.*\bcanada\b",
        r"\bcanada\b.*\busa\b",
        r"\b(us|usa)\s*(and|&|or)\s*canada\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid US/Canada regex"))
    .collect()
});

static US_TIMEZONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(et|est|eastern time)\b|\b(ct|cst|central time)\b|\b(mt|mst|mountain time)\b|\b(pt|pst|pacific time)\b",
    )
    .expect("valid timezone regex")
});

static WASHINGTON_DC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bwashington[, ]?d\.?c\.?\b").expect("valid DC regex"));

/// State postal abbreviation as a standalone token, delimited by
/// whitespace, comma, slash, dash, or parentheses. Matched on the
/// uppercased string.
static STATE_ABBR_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = STATE_ABBR.join("|");
    Regex::new(&format!(r"(^|[\s,/\-()])({alternation})([\s,/\-()]|$)"))
        .expect("valid state abbreviation regex")
});

static TITLE_US_HINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(us|u\.s\.a?|united states)\b").expect("valid title hint regex"));

const STATE_NAMES: &[&str] = &[
    "alabama", "alaska", "arizona", "arkansas", "california", "colorado", "connecticut",
    "delaware", "florida", "georgia", "hawaii", "idaho", "illinois", "indiana", "iowa",
    "kansas", "kentucky", "louisiana", "maine", "maryland", "massachusetts", "michigan",
    "minnesota", "mississippi", "missouri", "montana", "nebraska", "nevada", "new hampshire",
    "new jersey", "new mexico", "new york", "north carolina", "north dakota", "ohio",
    "oklahoma", "oregon", "pennsylvania", "rhode island", "south carolina", "south dakota",
    "tennessee", "texas", "utah", "vermont", "virginia", "washington", "west virginia",
    "wisconsin", "wyoming", "district of columbia",
];

const STATE_ABBR: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Curated non-US country/region keywords. "north america" is last and is
/// handled separately when NA remote is allowed.
const NON_US_TERMS: &[&str] = &[
    "bangalore", "bengaluru", "india", "brazil", "canada", "mexico", "colombia", "argentina",
    "chile", "peru", "uruguay", "europe", "emea", "latam", "apac", "asia", "africa",
    "middle east", "mena", "united kingdom", "uk", "england", "scotland", "wales", "ireland",
    "london", "paris", "france", "germany", "spain", "portugal", "italy", "netherlands",
    "belgium", "austria", "switzerland", "poland", "czech", "slovakia", "slovenia", "croatia",
    "serbia", "romania", "bulgaria", "greece", "turkey", "israel", "uae", "dubai", "saudi",
    "egypt", "south africa", "nigeria", "kenya", "ghana", "morocco", "algeria", "tunisia",
    "ethiopia", "russia", "ukraine", "belarus", "georgia", "armenia", "azerbaijan", "pakistan",
    "bangladesh", "sri lanka", "nepal", "bhutan", "philippines", "indonesia", "malaysia",
    "singapore", "thailand", "vietnam", "cambodia", "laos", "hong kong", "china", "taiwan",
    "japan", "korea", "south korea", "australia", "new zealand", "americas", "global",
    "anywhere", "worldwide", "international", "north america",
];

/// Matches the remote/anywhere/global/distributed/WFH/telecommute family.
pub fn is_remote_any(raw: &str) -> bool {
    REMOTE_RE.is_match(&raw.to_lowercase())
}

fn mentions_us(raw: &str) -> bool {
    US_MENTION_RE.is_match(&raw.to_lowercase())
}

fn mentions_north_america(raw: &str) -> bool {
    NORTH_AMERICA_RE.is_match(&raw.to_lowercase())
}

fn mentions_us_or_canada(raw: &str) -> bool {
    let l = raw.to_lowercase();
    US_OR_CANADA_RES.iter().any(|re| re.is_match(&l))
}

fn contains_us_timezone(raw: &str) -> bool {
    US_TIMEZONE_RE.is_match(&raw.to_lowercase())
}

/// Explicit US location: a US mention, Washington D.C., a state name, or a
/// state postal abbreviation as a standalone token.
pub fn is_us_location(raw: &str) -> bool {
    let l = raw.to_lowercase();

    if US_MENTION_RE.is_match(&l) || WASHINGTON_DC_RE.is_match(&l) {
        return true;
    }
    if STATE_NAMES.iter().any(|n| l.contains(n)) {
        return true;
    }
    STATE_ABBR_RE.is_match(&raw.to_uppercase())
}

fn contains_non_us_keywords(raw: &str) -> bool {
    let l = raw.to_lowercase();
    NON_US_TERMS.iter().any(|t| l.contains(t))
}

fn has_us_hints(job: &Job) -> bool {
    if TITLE_US_HINT_RE.is_match(&job.title.to_lowercase()) {
        return true;
    }
    let url = job.url.to_lowercase();
    url.contains("/en-us")
        || url.contains("/us/")
        || url.contains("/us-en")
        || url.contains("united-states")
}

/// The residency gate itself. Only invoked when the US/Remote-US policy is
/// requested; callers skip it otherwise.
pub fn passes_residency_gate(job: &Job, opts: GateOptions) -> bool {
    let raw = job.location_str().trim();
    let is_remote = is_remote_any(raw);

    // Explicit US locations always pass, remote or not.
    if !raw.is_empty() && is_us_location(raw) {
        return true;
    }

    if is_remote {
        if opts.allow_na_remote {
            if mentions_north_america(raw) {
                return true;
            }
            if mentions_us_or_canada(raw) {
                return true;
            }
        }
        if contains_non_us_keywords(raw) {
            // Canada alone is tolerated when NA is allowed and the string
            // reads as a US/Canada dual mention.
            if opts.allow_na_remote
                && raw.to_lowercase().contains("canada")
                && mentions_us_or_canada(raw)
            {
                return true;
            }
            return false;
        }
        if mentions_us(raw) {
            return true;
        }
        if is_us_location(raw) {
            return true;
        }
        if contains_us_timezone(raw) {
            return true;
        }
        if raw.is_empty() && has_us_hints(job) {
            return true;
        }
        return false;
    }

    // Non-remote with blank location: accept on US hints when NA allowed.
    if raw.is_empty() && opts.allow_na_remote && has_us_hints(job) {
        return true;
    }

    false
}
