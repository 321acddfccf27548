//! Feed lookup strategy
//!
//! Probes the site's well-known RSS/Atom paths and matches the requested
//! article against feed entries by link. Feeds often carry a clean summary
//! or full text when the article page itself is paywalled or script-heavy.

use crate::article::ArticleContent;
use crate::extract::normalize;
use crate::fetch::http::random_user_agent;
use crate::fetch::Outcome;
use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Well-known feed locations probed in order.
const FEED_PATHS: &[&str] = &["/feed", "/rss", "/feeds/all.rss", "/rss.xml", "/feed.xml"];

/// Entries inspected per feed. Feeds list newest first; an article old
/// enough to fall outside this window is not worth a feed match.
const MAX_ENTRIES: usize = 10;

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RssItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    #[serde(default)]
    title: String,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href", default)]
    href: String,
}

struct FeedEntry {
    title: String,
    link: String,
    body: String,
}

/// Look the article up in the site's feeds.
pub(crate) async fn feed_lookup(client: &Client, url: &str) -> Outcome {
    let origin = match Url::parse(url) {
        Ok(parsed) => parsed.origin().ascii_serialization(),
        Err(e) => return Outcome::Error(format!("invalid URL: {e}")),
    };

    let mut probed = 0usize;
    for path in FEED_PATHS {
        let feed_url = format!("{origin}{path}");
        let xml = match fetch_feed(client, &feed_url).await {
            Some(xml) => xml,
            None => continue,
        };
        probed += 1;

        for entry in parse_entries(&xml) {
            if !links_match(&entry.link, url) {
                continue;
            }
            debug!(%feed_url, link = %entry.link, "feed entry matched");
            let body = normalize(&strip_markup(&entry.body));
            if body.is_empty() {
                return Outcome::Empty("matched feed entry has no content".to_string());
            }
            return Outcome::Success(ArticleContent {
                source_url: url.to_string(),
                title: entry.title,
                body,
                truncated: false,
                method: None,
            });
        }
    }

    if probed == 0 {
        Outcome::Empty("no feed found at well-known paths".to_string())
    } else {
        Outcome::Empty("no matching feed entry found".to_string())
    }
}

async fn fetch_feed(client: &Client, feed_url: &str) -> Option<String> {
    let response = client
        .get(feed_url)
        .header(USER_AGENT, random_user_agent())
        .send()
        .await
        .ok()?;
    if !response.status().is_success() {
        return None;
    }
    response.text().await.ok()
}

/// Parse as RSS 2.0 first, falling back to Atom.
fn parse_entries(xml: &str) -> Vec<FeedEntry> {
    if let Ok(rss) = quick_xml::de::from_str::<Rss>(xml) {
        return rss
            .channel
            .items
            .into_iter()
            .take(MAX_ENTRIES)
            .map(|item| FeedEntry {
                title: item.title,
                link: item.link,
                body: item.description.unwrap_or_default(),
            })
            .collect();
    }
    if let Ok(atom) = quick_xml::de::from_str::<AtomFeed>(xml) {
        return atom
            .entries
            .into_iter()
            .take(MAX_ENTRIES)
            .map(|entry| FeedEntry {
                title: entry.title,
                link: entry.links.first().map(|l| l.href.clone()).unwrap_or_default(),
                body: entry.content.or(entry.summary).unwrap_or_default(),
            })
            .collect();
    }
    Vec::new()
}

/// Feed links and requested URLs disagree on trailing slashes, schemes,
/// and tracking parameters; containment either way is a match.
fn links_match(entry_link: &str, requested: &str) -> bool {
    let entry = entry_link.trim_end_matches('/');
    let requested = requested.trim_end_matches('/');
    if entry.is_empty() {
        return false;
    }
    entry.contains(requested) || requested.contains(entry)
}

/// Drop HTML tags and resolve entities in feed descriptions.
fn strip_markup(text: &str) -> String {
    let tag_re = Regex::new(r"<[^>]+>").unwrap();
    let stripped = tag_re.replace_all(text, " ");
    htmlescape::decode_html(&stripped).unwrap_or_else(|_| stripped.into_owned())
}
