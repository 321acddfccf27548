//! Transfer codec
//!
//! Encodes an extracted `(url, title, content)` triple into a compact,
//! URL-safe transport string bounded by a maximum length, truncating content
//! in stages rather than failing when the payload is too large. The decode
//! side rejects malformed transport strings; truncation is never an error.
//!
//! The transport string is the canonical JSON serialization of
//! [`TransferPayload`] in URL-safe base64, sized to survive delivery as a
//! single query-parameter value.

use crate::error::TransferError;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default maximum length of the encoded transport string, in characters.
///
/// Chosen to fit common query-string limits; override with
/// [`TransferCodec::with_budget`] for a different deployment target.
pub const TRANSPORT_BUDGET: usize = 2000;

/// Absolute cap on content retained by the final truncation stage.
pub const HARD_CONTENT_CAP: usize = 1000;

/// Placeholder substituted when the payload title is empty.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled article";

/// Marker appended by the first truncation stage.
pub const TRUNCATION_NOTICE: &str = "\n\n[Content truncated...]";

/// Marker appended by the heavier truncation stages.
pub const HEAVY_TRUNCATION_NOTICE: &str = "\n\n[Content truncated to fit transfer limit...]";

/// The exact structure serialized over the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPayload {
    /// Source page URL, passed through unmodified.
    pub url: String,
    /// Article title; empty titles are replaced with a placeholder.
    pub title: String,
    /// Article body text, subject to staged truncation.
    pub content: String,
}

/// Encoder/decoder for the cross-process content transfer.
#[derive(Debug, Clone)]
pub struct TransferCodec {
    budget: usize,
}

impl Default for TransferCodec {
    fn default() -> Self {
        Self {
            budget: TRANSPORT_BUDGET,
        }
    }
}

impl TransferCodec {
    /// Create a codec with the default transport budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a custom transport budget.
    pub fn with_budget(budget: usize) -> Self {
        Self { budget }
    }

    /// The configured transport budget.
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Encode a payload into a transport string no longer than the budget.
    ///
    /// Oversized content is truncated in stages (80% of the original, then
    /// 50%, then [`HARD_CONTENT_CAP`] characters), each stage appending an
    /// explicit truncation notice. The final stage is accepted
    /// unconditionally. This function never fails.
    #[instrument(skip(self, payload), fields(content_chars = payload.content.chars().count()))]
    pub fn encode(&self, payload: &TransferPayload) -> String {
        let title = if payload.title.trim().is_empty() {
            UNTITLED_PLACEHOLDER.to_string()
        } else {
            payload.title.clone()
        };

        let full = pack(&TransferPayload {
            url: payload.url.clone(),
            title: title.clone(),
            content: payload.content.clone(),
        });
        if full.len() <= self.budget {
            return full;
        }

        let chars: Vec<char> = payload.content.chars().collect();
        let stages: [(usize, &str); 2] = [
            (chars.len() * 8 / 10, TRUNCATION_NOTICE),
            (chars.len() / 2, HEAVY_TRUNCATION_NOTICE),
        ];

        for (keep, notice) in stages {
            let mut content: String = chars.iter().take(keep).collect();
            content.push_str(notice);
            let encoded = pack(&TransferPayload {
                url: payload.url.clone(),
                title: title.clone(),
                content,
            });
            debug!(keep, encoded_len = encoded.len(), "truncation stage");
            if encoded.len() <= self.budget {
                return encoded;
            }
        }

        // Final stage: absolute cap, accepted without re-checking the
        // budget. With the budgets in use this always fits.
        let mut content: String = chars.iter().take(HARD_CONTENT_CAP).collect();
        content.push_str(HEAVY_TRUNCATION_NOTICE);
        pack(&TransferPayload {
            url: payload.url.clone(),
            title,
            content,
        })
    }

    /// Decode a transport string back into a payload.
    ///
    /// Rejects strings that are not valid base64, UTF-8, or payload JSON;
    /// each failure mode maps to its own [`TransferError`] variant. A
    /// payload whose content was truncated at encode time decodes cleanly.
    #[instrument(skip(self, transport), fields(transport_len = transport.len()))]
    pub fn decode(&self, transport: &str) -> Result<TransferPayload, TransferError> {
        let trimmed = transport.trim();
        // Encoders on the other side of the transfer may use the standard
        // alphabet; accept both before rejecting.
        let bytes = URL_SAFE
            .decode(trimmed)
            .or_else(|_| STANDARD.decode(trimmed))
            .map_err(|e| TransferError::InvalidBase64(e.to_string()))?;
        let text =
            String::from_utf8(bytes).map_err(|e| TransferError::InvalidUtf8(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| TransferError::InvalidJson(e.to_string()))
    }

    /// Whether decoded content carries a truncation notice.
    pub fn is_truncated(content: &str) -> bool {
        let trimmed = content.trim_end();
        trimmed.ends_with(TRUNCATION_NOTICE.trim_start())
            || trimmed.ends_with(HEAVY_TRUNCATION_NOTICE.trim_start())
    }
}

fn pack(payload: &TransferPayload) -> String {
    // Serializing three string fields cannot fail.
    let json = serde_json::to_string(payload).expect("payload serialization is infallible");
    URL_SAFE.encode(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(content: &str) -> TransferPayload {
        TransferPayload {
            url: "https://example.com/news/story".to_string(),
            title: "A Story".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn roundtrip_when_within_budget() {
        let codec = TransferCodec::new();
        let original = payload("Short article body.");
        let transport = codec.encode(&original);
        assert!(transport.len() <= codec.budget());
        let decoded = codec.decode(&transport).unwrap();
        assert_eq!(decoded, original);
        assert!(!TransferCodec::is_truncated(&decoded.content));
    }

    #[test]
    fn oversized_content_truncates_not_fails() {
        let codec = TransferCodec::new();
        let original = payload(&"long content ".repeat(250)); // 3250 chars
        let transport = codec.encode(&original);
        assert!(transport.len() <= codec.budget());
        let decoded = codec.decode(&transport).unwrap();
        assert!(decoded.content.chars().count() < original.content.chars().count());
        assert!(TransferCodec::is_truncated(&decoded.content));
        assert_eq!(decoded.url, original.url);
        assert_eq!(decoded.title, original.title);
    }

    #[test]
    fn tiny_budget_hits_hard_cap() {
        let codec = TransferCodec::with_budget(64);
        let original = payload(&"x".repeat(10_000));
        let transport = codec.encode(&original);
        let decoded = codec.decode(&transport).unwrap();
        // Hard cap plus the notice; accepted unconditionally.
        assert!(decoded.content.starts_with(&"x".repeat(HARD_CONTENT_CAP)));
        assert!(TransferCodec::is_truncated(&decoded.content));
    }

    #[test]
    fn empty_title_gets_placeholder() {
        let codec = TransferCodec::new();
        let mut p = payload("body");
        p.title = "   ".to_string();
        let decoded = codec.decode(&codec.encode(&p)).unwrap();
        assert_eq!(decoded.title, UNTITLED_PLACEHOLDER);
    }

    #[test]
    fn unicode_content_survives() {
        let codec = TransferCodec::new();
        let original = TransferPayload {
            url: "https://example.com".to_string(),
            title: "समाचार लेख 📰".to_string(),
            content: "यह एक परीक्षण लेख है। With mixed English and emoji 🎉.".to_string(),
        };
        let decoded = codec.decode(&codec.encode(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn standard_alphabet_accepted() {
        let json = serde_json::to_string(&payload("body text")).unwrap();
        let transport = STANDARD.encode(json);
        let codec = TransferCodec::new();
        assert!(codec.decode(&transport).is_ok());
    }

    #[test]
    fn malformed_base64_rejected() {
        let codec = TransferCodec::new();
        match codec.decode("!!! definitely not base64 !!!") {
            Err(TransferError::InvalidBase64(_)) => {}
            other => panic!("expected InvalidBase64, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_rejected() {
        let codec = TransferCodec::new();
        let transport = URL_SAFE.encode("{\"url\": \"truncated mid");
        match codec.decode(&transport) {
            Err(TransferError::InvalidJson(_)) => {}
            other => panic!("expected InvalidJson, got {other:?}"),
        }
    }

    #[test]
    fn malformed_utf8_rejected() {
        let codec = TransferCodec::new();
        let transport = URL_SAFE.encode([0xff, 0xfe, 0xfd]);
        match codec.decode(&transport) {
            Err(TransferError::InvalidUtf8(_)) => {}
            other => panic!("expected InvalidUtf8, got {other:?}"),
        }
    }
}
