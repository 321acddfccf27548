//! # Presslift
//!
//! Article content acquisition pipeline: fetch news pages through a
//! cascade of strategies, extract readable text from the DOM, and move the
//! result between processes as a compact size-bounded payload.
//!
//! ## Architecture
//!
//! ```text
//! URL ──> StrategyFetcher ──> readability ──> http_get ──> feed_lookup ──> browser_render
//!               │                                                          (opt-in)
//!               ▼ first success
//!        ArticleContent <────────────── TransferCodec <── encoded payload
//!               │
//!               ▼
//!        HTTP surface (/acquire, /health, /metrics) or CLI
//! ```
//!
//! The cascade is ordered cheapest-first and stops at the first success;
//! there is no quality comparison across strategies and no retrying. When
//! every strategy fails, the error carries the full attempt log so callers
//! know what was tried and that manual submission is the remaining option.
//!
//! ## Example
//!
//! ```no_run
//! use presslift::acquire::Acquirer;
//!
//! # async fn run() -> Result<(), presslift::error::AcquireError> {
//! let acquirer = Acquirer::new();
//! let (article, attempts) = acquirer.acquire_by_url("https://example.com/news/story").await?;
//! println!("{} ({} chars, {} attempts)", article.title, article.body_chars(), attempts.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod acquire;
pub mod article;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod handlers;
pub mod metrics;
pub mod transfer;

pub use acquire::Acquirer;
pub use article::{ArticleContent, AttemptOutcome, FetchAttempt, StrategyKind};
pub use error::{AcquireError, Error, FetchError, Result, TransferError};
pub use extract::{extract_article, normalize, Extraction};
pub use fetch::{FetcherConfig, StrategyFetcher};
pub use transfer::{TransferCodec, TransferPayload};

/// Crate version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml.
pub const NAME: &str = env!("CARGO_PKG_NAME");
