//! Core data model for the acquisition pipeline.
//!
//! Values here are produced by one pipeline stage and handed by value to the
//! next; nothing in this module holds shared mutable state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a fetch strategy in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Article-focused fetch and strict structural extraction.
    Readability,
    /// Generic HTTP GET plus full extraction heuristic with fallbacks.
    HttpGet,
    /// Site RSS/Atom feed probe.
    FeedLookup,
    /// Full headless-browser rendering (most expensive, tried last).
    BrowserRender,
}

impl StrategyKind {
    /// Stable name used in logs and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Readability => "readability",
            StrategyKind::HttpGet => "http_get",
            StrategyKind::FeedLookup => "feed_lookup",
            StrategyKind::BrowserRender => "browser_render",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified result of one strategy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    /// Title and body obtained, body above the floor.
    Success,
    /// Remote site refused access (HTTP 401/403 or equivalent).
    Blocked,
    /// Fetch succeeded structurally but no usable text came out.
    Empty,
    /// Network, timeout, or parse failure.
    Error,
}

impl AttemptOutcome {
    /// Stable name used in logs and metrics labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptOutcome::Success => "success",
            AttemptOutcome::Blocked => "blocked",
            AttemptOutcome::Empty => "empty",
            AttemptOutcome::Error => "error",
        }
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the fetch diagnostics log.
///
/// The fetcher records exactly one attempt per strategy tried, in cascade
/// order. Attempts are never replayed; the sequence exists for diagnostics
/// and for the terminal-failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchAttempt {
    /// Which strategy ran.
    pub strategy: StrategyKind,
    /// How the attempt was classified.
    pub outcome: AttemptOutcome,
    /// Human-readable detail (status code, byte count, error text).
    pub detail: String,
}

/// A normalized article, the single output shape of both acquisition paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleContent {
    /// The URL the article came from (or was claimed to come from).
    pub source_url: String,
    /// Resolved title, never empty (a placeholder is substituted if needed).
    pub title: String,
    /// Extracted body text. Non-empty on success.
    pub body: String,
    /// True when the body ends with an explicit truncation marker.
    pub truncated: bool,
    /// Which fetch strategy produced this article, when fetched by URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<StrategyKind>,
}

impl ArticleContent {
    /// Body length in characters.
    pub fn body_chars(&self) -> usize {
        self.body.chars().count()
    }

    /// Body length in whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_kind_serializes_snake_case() {
        let json = serde_json::to_string(&StrategyKind::FeedLookup).unwrap();
        assert_eq!(json, "\"feed_lookup\"");
        let json = serde_json::to_string(&StrategyKind::BrowserRender).unwrap();
        assert_eq!(json, "\"browser_render\"");
    }

    #[test]
    fn attempt_outcome_display() {
        assert_eq!(AttemptOutcome::Blocked.to_string(), "blocked");
        assert_eq!(AttemptOutcome::Success.to_string(), "success");
    }

    #[test]
    fn article_counts() {
        let article = ArticleContent {
            source_url: "https://example.com/a".to_string(),
            title: "Title".to_string(),
            body: "one two three".to_string(),
            truncated: false,
            method: Some(StrategyKind::HttpGet),
        };
        assert_eq!(article.word_count(), 3);
        assert_eq!(article.body_chars(), 13);
    }

    #[test]
    fn article_method_omitted_when_none() {
        let article = ArticleContent {
            source_url: "https://example.com/a".to_string(),
            title: "T".to_string(),
            body: "b".to_string(),
            truncated: false,
            method: None,
        };
        let json = serde_json::to_string(&article).unwrap();
        assert!(!json.contains("method"));
    }
}
