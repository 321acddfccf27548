//! Strategy fetcher
//!
//! Given a URL, the [`StrategyFetcher`] walks an ordered cascade of
//! independent fetch strategies until one yields usable content or all are
//! exhausted. Strategies are ordered cheapest-first so an early success
//! short-circuits the expensive rungs; the first structural success wins
//! outright, with no quality comparison across strategies.
//!
//! Each attempt is classified as success, blocked, empty, or error. Blocked
//! and failed attempts advance the cascade without retrying: repeating a
//! strategy against an explicit block is pointless, and transient errors
//! are cheaper to route around than to retry.

pub mod browser;
pub mod feed;
pub mod http;

use crate::article::{ArticleContent, AttemptOutcome, FetchAttempt, StrategyKind};
use crate::error::FetchError;
use crate::metrics::global_metrics;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Classified result of one strategy attempt. Tagged variants, consumed by
/// the cascade loop; only `Success` carries an article.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Title and body obtained, body above the floor. Stops the cascade.
    Success(ArticleContent),
    /// Access denied (HTTP 401/403). Advances without retry.
    Blocked(String),
    /// Fetch succeeded but no usable text. Advances.
    Empty(String),
    /// Network, timeout, or parse failure. Advances.
    Error(String),
}

impl Outcome {
    /// The diagnostics classification of this outcome.
    pub fn kind(&self) -> AttemptOutcome {
        match self {
            Outcome::Success(_) => AttemptOutcome::Success,
            Outcome::Blocked(_) => AttemptOutcome::Blocked,
            Outcome::Empty(_) => AttemptOutcome::Empty,
            Outcome::Error(_) => AttemptOutcome::Error,
        }
    }

    /// Human-readable detail for the attempt log.
    pub fn detail(&self) -> String {
        match self {
            Outcome::Success(article) => format!("{} chars extracted", article.body_chars()),
            Outcome::Blocked(detail) | Outcome::Empty(detail) | Outcome::Error(detail) => {
                detail.clone()
            }
        }
    }
}

/// One rung of the cascade.
#[derive(Debug, Clone)]
pub enum Strategy {
    /// Article-focused fetch with strict structural extraction.
    Readability,
    /// Generic HTTP GET plus the full extraction heuristic.
    HttpGet,
    /// Probe the site's RSS/Atom feeds for the article.
    FeedLookup,
    /// Render the page in a headless browser.
    BrowserRender,
    /// Fixed-outcome strategy for cascade tests.
    #[cfg(test)]
    Scripted {
        /// Reported strategy kind.
        kind: StrategyKind,
        /// Outcome returned by every attempt.
        outcome: Outcome,
    },
}

impl Strategy {
    /// The kind reported in attempt logs and metrics.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Readability => StrategyKind::Readability,
            Strategy::HttpGet => StrategyKind::HttpGet,
            Strategy::FeedLookup => StrategyKind::FeedLookup,
            Strategy::BrowserRender => StrategyKind::BrowserRender,
            #[cfg(test)]
            Strategy::Scripted { kind, .. } => *kind,
        }
    }

    async fn attempt(&self, fetcher: &StrategyFetcher, url: &str) -> Outcome {
        match self {
            Strategy::Readability => http::readability(&fetcher.client, url).await,
            Strategy::HttpGet => {
                http::http_get(&fetcher.client, url, fetcher.config.min_body_len).await
            }
            Strategy::FeedLookup => feed::feed_lookup(&fetcher.client, url).await,
            Strategy::BrowserRender => {
                browser::browser_render(&fetcher.config, url, fetcher.config.min_body_len).await
            }
            #[cfg(test)]
            Strategy::Scripted { outcome, .. } => outcome.clone(),
        }
    }
}

/// Configuration for the strategy fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Per-attempt timeout for HTTP-based strategies (default: 20 s).
    pub timeout: Duration,
    /// Per-attempt timeout for the browser strategy (default: 60 s).
    pub browser_timeout: Duration,
    /// Minimum body length in characters for a lenient success (default: 80).
    pub min_body_len: usize,
    /// Include the browser-rendering rung (default: false).
    pub browser: bool,
    /// Path to a Chrome/Chromium executable (None = auto-detect).
    pub chrome_path: Option<String>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            browser_timeout: Duration::from_secs(60),
            min_body_len: 80,
            browser: false,
            chrome_path: None,
        }
    }
}

impl FetcherConfig {
    /// Create a new config builder.
    pub fn builder() -> FetcherConfigBuilder {
        FetcherConfigBuilder::default()
    }
}

/// Builder for [`FetcherConfig`].
#[derive(Default)]
pub struct FetcherConfigBuilder {
    config: FetcherConfig,
}

impl FetcherConfigBuilder {
    /// Set the per-attempt timeout for HTTP-based strategies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the per-attempt timeout for the browser strategy.
    pub fn browser_timeout(mut self, timeout: Duration) -> Self {
        self.config.browser_timeout = timeout;
        self
    }

    /// Set the minimum acceptable body length.
    pub fn min_body_len(mut self, len: usize) -> Self {
        self.config.min_body_len = len;
        self
    }

    /// Enable/disable the browser-rendering rung.
    pub fn browser(mut self, enabled: bool) -> Self {
        self.config.browser = enabled;
        self
    }

    /// Set the Chrome executable path.
    pub fn chrome_path<S: Into<String>>(mut self, path: S) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    /// Build the config.
    pub fn build(self) -> FetcherConfig {
        self.config
    }
}

/// Ordered multi-strategy article fetcher.
pub struct StrategyFetcher {
    client: reqwest::Client,
    config: FetcherConfig,
    strategies: Vec<Strategy>,
}

impl Default for StrategyFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyFetcher {
    /// Create a fetcher with the default cascade and config.
    pub fn new() -> Self {
        Self::with_config(FetcherConfig::default())
    }

    /// Create a fetcher with a custom config. The cascade order is fixed:
    /// readability, generic GET, feed lookup, then (if enabled) browser
    /// rendering.
    pub fn with_config(config: FetcherConfig) -> Self {
        let mut strategies = vec![Strategy::Readability, Strategy::HttpGet, Strategy::FeedLookup];
        if config.browser {
            strategies.push(Strategy::BrowserRender);
        }
        let client = build_client(&config);
        Self {
            client,
            config,
            strategies,
        }
    }

    #[cfg(test)]
    fn with_strategies(config: FetcherConfig, strategies: Vec<Strategy>) -> Self {
        let client = build_client(&config);
        Self {
            client,
            config,
            strategies,
        }
    }

    /// The fetcher configuration.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Walk the cascade for `url`.
    ///
    /// Returns the first successful article together with the attempt log,
    /// or [`FetchError::ExhaustedStrategies`] carrying one attempt per
    /// strategy tried.
    #[instrument(skip(self))]
    pub async fn fetch(
        &self,
        url: &str,
    ) -> Result<(ArticleContent, Vec<FetchAttempt>), FetchError> {
        validate_url(url)?;

        let mut attempts = Vec::with_capacity(self.strategies.len());
        for strategy in &self.strategies {
            let kind = strategy.kind();
            debug!(%url, strategy = %kind, "attempting strategy");

            let limit = if kind == StrategyKind::BrowserRender {
                self.config.browser_timeout
            } else {
                self.config.timeout
            };
            let outcome = match timeout(limit, strategy.attempt(self, url)).await {
                Ok(outcome) => outcome,
                Err(_) => Outcome::Error(format!("timed out after {}s", limit.as_secs())),
            };

            global_metrics().record_attempt(kind, outcome.kind());
            attempts.push(FetchAttempt {
                strategy: kind,
                outcome: outcome.kind(),
                detail: outcome.detail(),
            });

            match outcome {
                Outcome::Success(mut article) => {
                    article.method = Some(kind);
                    info!(
                        %url,
                        strategy = %kind,
                        chars = article.body_chars(),
                        "fetch succeeded"
                    );
                    global_metrics().record_fetch(true);
                    return Ok((article, attempts));
                }
                Outcome::Blocked(detail) => {
                    warn!(%url, strategy = %kind, %detail, "access blocked, advancing")
                }
                Outcome::Empty(detail) => {
                    debug!(%url, strategy = %kind, %detail, "no usable content, advancing")
                }
                Outcome::Error(detail) => {
                    warn!(%url, strategy = %kind, %detail, "attempt failed, advancing")
                }
            }
        }

        warn!(%url, attempts = attempts.len(), "all strategies exhausted");
        global_metrics().record_fetch(false);
        Err(FetchError::ExhaustedStrategies { attempts })
    }
}

fn validate_url(url: &str) -> Result<(), FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(FetchError::InvalidUrl(format!(
            "unsupported scheme '{scheme}' in {url}"
        ))),
    }
}

fn build_client(config: &FetcherConfig) -> reqwest::Client {
    use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};

    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .expect("HTTP client construction")
}
