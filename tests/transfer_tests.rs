//! Transfer codec integration tests
//!
//! Exercises the codec with realistic article payloads: staged truncation
//! under the default budget, truncation flagged on the article, and the
//! three malformed-payload rejections kept distinct from truncation.

use presslift::error::TransferError;
use presslift::transfer::{TransferCodec, TransferPayload, TRANSPORT_BUDGET};
use pretty_assertions::assert_eq;

fn article_payload(content: String) -> TransferPayload {
    TransferPayload {
        url: "https://news.example.com/2026/08/city-council-budget-vote".to_string(),
        title: "City council approves budget after marathon session".to_string(),
        content,
    }
}

#[test]
fn short_article_roundtrips_exactly() {
    let codec = TransferCodec::new();
    let payload = article_payload(
        "The city council approved the annual budget late on Tuesday after a \
         session that ran past midnight. The vote was 7 to 2."
            .to_string(),
    );

    let transport = codec.encode(&payload);
    assert!(transport.len() <= TRANSPORT_BUDGET);
    // Transport string must survive as a single query-parameter value.
    assert!(!transport.contains('+'));
    assert!(!transport.contains('/'));

    let decoded = codec.decode(&transport).unwrap();
    assert_eq!(decoded, payload);
    assert!(!TransferCodec::is_truncated(&decoded.content));
}

#[test]
fn three_thousand_char_article_fits_default_budget() {
    let codec = TransferCodec::new();
    let sentence = "Council members debated the parks allocation for nearly an hour. ";
    let content: String = sentence.repeat(46); // ~3000 chars
    assert!(content.chars().count() >= 2900);

    let transport = codec.encode(&article_payload(content.clone()));
    assert!(transport.len() <= TRANSPORT_BUDGET);

    let decoded = codec.decode(&transport).unwrap();
    assert!(TransferCodec::is_truncated(&decoded.content));
    assert!(decoded.content.chars().count() < content.chars().count());
    // Retained content is a prefix of the original.
    let marker_start = decoded.content.rfind("\n\n[Content truncated").unwrap();
    assert!(content.starts_with(&decoded.content[..marker_start]));
}

#[test]
fn truncation_preserves_url_and_title_verbatim() {
    let codec = TransferCodec::new();
    let payload = article_payload("x".repeat(50_000));
    let decoded = codec.decode(&codec.encode(&payload)).unwrap();
    assert_eq!(decoded.url, payload.url);
    assert_eq!(decoded.title, payload.title);
    assert!(TransferCodec::is_truncated(&decoded.content));
}

#[test]
fn malformed_is_distinct_from_truncated() {
    let codec = TransferCodec::new();

    // A truncated payload decodes cleanly.
    let transport = codec.encode(&article_payload("y".repeat(10_000)));
    assert!(codec.decode(&transport).is_ok());

    // A corrupted transport string does not.
    let corrupted = format!("{}@@@@", &transport[..transport.len() - 8]);
    assert!(matches!(
        codec.decode(&corrupted),
        Err(TransferError::InvalidBase64(_))
    ));
}

#[test]
fn whitespace_around_transport_is_tolerated() {
    let codec = TransferCodec::new();
    let transport = codec.encode(&article_payload("Body text.".to_string()));
    let padded = format!("  {transport}\n");
    assert!(codec.decode(&padded).is_ok());
}

#[test]
fn custom_budget_is_honored() {
    let codec = TransferCodec::with_budget(1300);
    let transport = codec.encode(&article_payload("z".repeat(1200)));
    // 1200 chars encodes past 1300; staged truncation must bring it back.
    assert!(transport.len() <= 1300);
    let decoded = codec.decode(&transport).unwrap();
    assert!(TransferCodec::is_truncated(&decoded.content));
}
