// Moderation domain models - data structures for review text filtering.
//
// These are pure domain types with no storage dependencies.
// The infra layer converts stored rows into these.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which dictionary a filter word belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Words that must never appear in a review
    Profanity,
    /// Promotional keywords (merged with the built-in advertising lexicon)
    Ad,
}

impl FilterKind {
    /// Convert to the string representation used for storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Profanity => "profanity",
            FilterKind::Ad => "ad",
        }
    }

    /// Parse from the storage representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "profanity" => Some(FilterKind::Profanity),
            "ad" => Some(FilterKind::Ad),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A moderation dictionary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterWord {
    pub id: String,
    pub word: String,
    pub kind: FilterKind,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of both dictionaries, taken right before a validation.
#[derive(Debug, Clone, Default)]
pub struct WordLists {
    pub profanity: BTreeSet<String>,
    pub ad_keywords: BTreeSet<String>,
}

/// Why a text was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    Profanity,
    Advertising,
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::Profanity => write!(f, "contains profanity"),
            RejectionReason::Advertising => write!(f, "contains advertising content"),
        }
    }
}

/// Outcome of running a text through the moderation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationVerdict {
    Accepted,
    Rejected(RejectionReason),
}

impl ModerationVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ModerationVerdict::Accepted)
    }
}

/// Pattern set driving the advertising checks.
///
/// Loaded from JSON so moderation policy can change without a rebuild.
/// Missing fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationPolicy {
    /// Permissive URL heuristic: optional scheme, domain labels, 2-6 letter TLD, optional path
    pub url_pattern: String,
    /// Digit groups of 2-4, 3-4 and 4 with optional `-`, space or `.` separators
    pub phone_pattern: String,
    /// Built-in advertising keywords, matched as substrings
    pub ad_lexicon: Vec<String>,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            url_pattern: r"(https?://)?[\da-z.-]+\.[a-z.]{2,6}[/\w .-]*/?".to_string(),
            phone_pattern: r"\d{2,4}[-\s.]?\d{3,4}[-\s.]?\d{4}".to_string(),
            ad_lexicon: [
                // promotional terms
                "광고", "홍보", "구매문의", "할인", "특가", "마감임박",
                // link fragments
                "http://", "https://", "www.", ".com", ".kr",
                // messaging apps
                "카톡", "텔레그램", "라인", "위챗",
                // contact words
                "전화번호", "연락처", "문의전화",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}
