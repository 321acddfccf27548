//! HTTP fetch strategies
//!
//! The two cheapest rungs of the cascade: an article-focused fetch with
//! strict structural extraction, and a generic GET that runs the full
//! extraction heuristic with all its fallbacks. Both present a desktop
//! browser user agent, rotated per attempt.

use crate::article::ArticleContent;
use crate::extract::{extract_article, structural_article};
use crate::fetch::Outcome;
use rand::seq::IndexedRandom;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Desktop user agents rotated across attempts. Anti-bot layers key on
/// obviously synthetic agents; these match real browser populations.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

pub(crate) fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Strict strategy: fetch and accept only a structural article container.
pub(crate) async fn readability(client: &Client, url: &str) -> Outcome {
    let html = match get_page(client, url).await {
        Ok(html) => html,
        Err(outcome) => return outcome,
    };

    match structural_article(&html) {
        Some(extraction) => Outcome::Success(ArticleContent {
            source_url: url.to_string(),
            title: extraction.title,
            body: extraction.body,
            truncated: false,
            method: None,
        }),
        None => Outcome::Empty("no structural article container above floor".to_string()),
    }
}

/// Lenient strategy: fetch and run the full extraction heuristic,
/// accepting anything above the configured floor.
pub(crate) async fn http_get(client: &Client, url: &str, floor: usize) -> Outcome {
    let html = match get_page(client, url).await {
        Ok(html) => html,
        Err(outcome) => return outcome,
    };

    let extraction = extract_article(&html);
    let chars = extraction.body.chars().count();
    if chars >= floor {
        Outcome::Success(ArticleContent {
            source_url: url.to_string(),
            title: extraction.title,
            body: extraction.body,
            truncated: false,
            method: None,
        })
    } else {
        Outcome::Empty(format!("extracted body below floor ({chars} chars)"))
    }
}

/// GET a page, classifying access-denied statuses as `Blocked` and every
/// other failure as `Error`.
async fn get_page(client: &Client, url: &str) -> Result<String, Outcome> {
    let response = match client
        .get(url)
        .header(USER_AGENT, random_user_agent())
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => return Err(Outcome::Error(format!("request failed: {e}"))),
    };

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Outcome::Blocked(format!("HTTP {status}")));
    }
    if !status.is_success() {
        return Err(Outcome::Error(format!("HTTP {status}")));
    }

    match response.text().await {
        Ok(body) => {
            debug!(%url, bytes = body.len(), "page fetched");
            Ok(body)
        }
        Err(e) => Err(Outcome::Error(format!("body read failed: {e}"))),
    }
}
