//! Acquisition orchestrator
//!
//! Ties the two acquisition paths together: fetch-by-URL through the
//! strategy cascade, and direct ingestion of a transfer payload produced by
//! another process. Both paths yield the same [`ArticleContent`] shape, so
//! downstream consumers never care which path ran.

use crate::article::{ArticleContent, FetchAttempt};
use crate::error::AcquireError;
use crate::fetch::{FetcherConfig, StrategyFetcher};
use crate::metrics::global_metrics;
use crate::transfer::TransferCodec;
use tracing::{info, instrument};

/// Front door for article acquisition.
pub struct Acquirer {
    fetcher: StrategyFetcher,
    codec: TransferCodec,
}

impl Default for Acquirer {
    fn default() -> Self {
        Self::new()
    }
}

impl Acquirer {
    /// Create an acquirer with default fetcher and codec.
    pub fn new() -> Self {
        Self {
            fetcher: StrategyFetcher::new(),
            codec: TransferCodec::new(),
        }
    }

    /// Create an acquirer with a custom fetcher configuration.
    pub fn with_config(config: FetcherConfig) -> Self {
        Self {
            fetcher: StrategyFetcher::with_config(config),
            codec: TransferCodec::new(),
        }
    }

    /// The transfer codec in use.
    pub fn codec(&self) -> &TransferCodec {
        &self.codec
    }

    /// Acquire an article by fetching its URL through the cascade.
    ///
    /// On success the attempt log is returned alongside the article; on
    /// exhaustion the error carries the full log so callers can report what
    /// was tried.
    #[instrument(skip(self))]
    pub async fn acquire_by_url(
        &self,
        url: &str,
    ) -> Result<(ArticleContent, Vec<FetchAttempt>), AcquireError> {
        let (article, attempts) = self.fetcher.fetch(url).await?;
        Ok((article, attempts))
    }

    /// Acquire an article from an encoded transfer payload.
    ///
    /// Truncated payloads are accepted and flagged; malformed payloads are
    /// rejected. Payload content arrives pre-extracted, so no strategy runs.
    #[instrument(skip(self, transport), fields(transport_len = transport.len()))]
    pub fn acquire_from_transfer(&self, transport: &str) -> Result<ArticleContent, AcquireError> {
        let payload = match self.codec.decode(transport) {
            Ok(payload) => payload,
            Err(e) => {
                global_metrics().record_transfer_decode(false);
                return Err(e.into());
            }
        };
        global_metrics().record_transfer_decode(true);

        let truncated = TransferCodec::is_truncated(&payload.content);
        info!(
            url = %payload.url,
            chars = payload.content.chars().count(),
            truncated,
            "transfer payload accepted"
        );
        Ok(ArticleContent {
            source_url: payload.url,
            title: payload.title,
            body: payload.content,
            truncated,
            method: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransferError;
    use crate::transfer::{TransferPayload, TRUNCATION_NOTICE};

    #[test]
    fn transfer_path_builds_article() {
        let acquirer = Acquirer::new();
        let transport = acquirer.codec().encode(&TransferPayload {
            url: "https://example.com/story".to_string(),
            title: "Story".to_string(),
            content: "Body text of the story.".to_string(),
        });

        let article = acquirer.acquire_from_transfer(&transport).unwrap();
        assert_eq!(article.source_url, "https://example.com/story");
        assert_eq!(article.body, "Body text of the story.");
        assert!(!article.truncated);
        assert_eq!(article.method, None);
    }

    #[test]
    fn truncation_notice_sets_flag() {
        let acquirer = Acquirer::new();
        let transport = acquirer.codec().encode(&TransferPayload {
            url: "https://example.com/story".to_string(),
            title: "Story".to_string(),
            content: format!("Partial body.{TRUNCATION_NOTICE}"),
        });

        let article = acquirer.acquire_from_transfer(&transport).unwrap();
        assert!(article.truncated);
    }

    #[test]
    fn malformed_transfer_is_rejected() {
        let acquirer = Acquirer::new();
        let err = acquirer.acquire_from_transfer("%%%not-base64%%%").unwrap_err();
        assert!(matches!(
            err,
            AcquireError::Transfer(TransferError::InvalidBase64(_))
        ));
    }

    #[tokio::test]
    async fn invalid_scheme_propagates_as_fetch_error() {
        let acquirer = Acquirer::new();
        let err = acquirer.acquire_by_url("ftp://example.com/a").await.unwrap_err();
        assert!(matches!(err, AcquireError::Fetch(_)));
    }
}
