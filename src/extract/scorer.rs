//! DOM candidate scoring
//!
//! This module turns a raw HTML document into a `(title, body)` pair by
//! scoring likely article containers and falling back to progressively
//! cruder heuristics. It never fails: every input yields a structurally
//! valid [`Extraction`], with an empty body only when the document itself
//! has no extractable text.

use crate::extract::selectors::{
    SelectorClass, BOILERPLATE_LINE_MAX, BOILERPLATE_PREFIXES, CANDIDATE_FLOOR, MIN_PARAGRAPHS,
    PARAGRAPH_FLOOR, RAW_TEXT_CAP, STRIP_CLASS_HINTS, STRIP_TAGS, STRUCTURAL_SELECTORS,
    TITLE_META_PROPS, TITLE_PLACEHOLDER, VIABLE_FLOOR,
};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Title and body produced by the scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Resolved title, never empty (placeholder substituted if needed).
    pub title: String,
    /// Normalized body text.
    pub body: String,
}

/// A scored structural candidate. Ephemeral: produced and consumed entirely
/// within this module; the highest-score candidate becomes the body.
#[derive(Debug, Clone)]
pub struct ExtractionCandidate {
    /// Which selector category matched.
    pub selector_class: SelectorClass,
    /// Visible text of the matched element.
    pub text: String,
    /// Visible text length in characters (max-length-wins).
    pub score: usize,
}

/// Extract a `(title, body)` pair from an HTML document.
///
/// Body resolution runs three phases: structural candidates
/// (max-length-wins above [`CANDIDATE_FLOOR`]), paragraph fallback over the
/// boilerplate-stripped document, and finally capped raw page text. The
/// result is always normalized.
pub fn extract_article(html: &str) -> Extraction {
    let doc = Html::parse_document(html);
    let title = resolve_title(&doc);
    let body = resolve_body(&doc);
    debug!(
        title_chars = title.chars().count(),
        body_chars = body.chars().count(),
        "extracted article"
    );
    Extraction { title, body }
}

/// Strict variant used by the readability fetch strategy: only phase-1
/// structural candidates count, and the normalized body must still clear
/// the candidate floor. Returns `None` instead of degrading.
pub fn structural_article(html: &str) -> Option<Extraction> {
    let doc = Html::parse_document(html);
    let candidate = structural_candidate(&doc)?;
    let body = normalize(&candidate.text);
    if body.chars().count() < CANDIDATE_FLOOR {
        return None;
    }
    Some(Extraction {
        title: resolve_title(&doc),
        body,
    })
}

/// Resolve the page title: `h1`, then `og:title`, then `twitter:title`,
/// then the `<title>` element; first non-empty trimmed result wins.
fn resolve_title(doc: &Html) -> String {
    let h1 = Selector::parse("h1").unwrap();
    if let Some(el) = doc.select(&h1).next() {
        let text = collapse_inline_ws(&visible_text(el));
        if !text.is_empty() {
            return text;
        }
    }

    for prop in TITLE_META_PROPS {
        let sel = Selector::parse(&format!(
            r#"meta[property="{prop}"], meta[name="{prop}"]"#
        ))
        .unwrap();
        if let Some(content) = doc
            .select(&sel)
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            let trimmed = content.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    let title = Selector::parse("title").unwrap();
    if let Some(el) = doc.select(&title).next() {
        let text = collapse_inline_ws(&visible_text(el));
        if !text.is_empty() {
            return text;
        }
    }

    TITLE_PLACEHOLDER.to_string()
}

fn resolve_body(doc: &Html) -> String {
    let body = match structural_candidate(doc) {
        Some(candidate) => {
            debug!(
                class = ?candidate.selector_class,
                score = candidate.score,
                "structural candidate won"
            );
            candidate.text
        }
        None => paragraph_fallback(doc),
    };
    let body = normalize(&body);
    if body.chars().count() >= VIABLE_FLOOR {
        return body;
    }

    // Last resort: capped raw page text. Returning something short beats
    // returning nothing, because an empty result forces the caller into a
    // server fetch that is itself likely to be blocked.
    let raw = normalize(&visible_text(doc.root_element()));
    let capped: String = raw.chars().take(RAW_TEXT_CAP).collect();
    capped.trim().to_string()
}

/// Phase 1: evaluate every structural selector and keep the single matching
/// element with the greatest visible text length, provided it clears
/// [`CANDIDATE_FLOOR`]. Ties are broken by first encountered.
fn structural_candidate(doc: &Html) -> Option<ExtractionCandidate> {
    let mut best: Option<ExtractionCandidate> = None;
    for (class, raw_selector) in STRUCTURAL_SELECTORS {
        let Ok(selector) = Selector::parse(raw_selector) else {
            continue;
        };
        for element in doc.select(&selector) {
            let text = visible_text(element);
            let score = text.trim().chars().count();
            if score <= CANDIDATE_FLOOR {
                continue;
            }
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(ExtractionCandidate {
                    selector_class: *class,
                    text,
                    score,
                });
            }
        }
    }
    best
}

/// Phase 2: collect paragraphs from the boilerplate-stripped document. If
/// too few survive, fall back to the full stripped text.
fn paragraph_fallback(doc: &Html) -> String {
    let p = Selector::parse("p").unwrap();
    let mut paragraphs = Vec::new();
    for element in doc.select(&p) {
        if has_stripped_ancestor(element) {
            continue;
        }
        let text = collapse_inline_ws(&visible_text(element));
        if text.chars().count() <= PARAGRAPH_FLOOR {
            continue;
        }
        if starts_with_boilerplate(&text) {
            continue;
        }
        paragraphs.push(text);
    }

    if paragraphs.len() >= MIN_PARAGRAPHS {
        paragraphs.join("\n\n")
    } else {
        let body = Selector::parse("body").unwrap();
        doc.select(&body)
            .next()
            .map(visible_text)
            .unwrap_or_else(|| visible_text(doc.root_element()))
    }
}

/// Visible text of an element, skipping stripped subtrees (script, style,
/// nav, ad/social/cookie regions) and inserting newlines at block
/// boundaries.
fn visible_text(element: ElementRef<'_>) -> String {
    const BLOCK_TAGS: &[&str] = &[
        "p", "div", "br", "li", "h1", "h2", "h3", "h4", "h5", "h6", "section", "article",
        "blockquote", "tr", "ul", "ol",
    ];

    fn push_text(element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                out.push_str(&text.text);
            } else if let Some(child_el) = ElementRef::wrap(child) {
                if is_stripped_element(child_el) {
                    continue;
                }
                push_text(child_el, out);
                if BLOCK_TAGS.contains(&child_el.value().name()) {
                    out.push('\n');
                }
            }
        }
    }

    let mut out = String::new();
    push_text(element, &mut out);
    out
}

fn is_stripped_element(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if STRIP_TAGS.contains(&value.name()) {
        return true;
    }
    let class = value.attr("class").unwrap_or("").to_ascii_lowercase();
    let id = value.attr("id").unwrap_or("").to_ascii_lowercase();
    STRIP_CLASS_HINTS
        .iter()
        .any(|hint| class.contains(hint) || id.contains(hint))
}

fn has_stripped_ancestor(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(is_stripped_element)
}

fn starts_with_boilerplate(line: &str) -> bool {
    let lower = line.trim_start().to_lowercase();
    BOILERPLATE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

fn collapse_inline_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize extracted text: collapse space/tab runs, trim lines, drop
/// short boilerplate-prefixed lines, collapse 3+ newlines to two.
pub fn normalize(text: &str) -> String {
    let space_re = Regex::new(r"[ \t]{2,}").unwrap();
    let collapsed = space_re.replace_all(text, " ");

    let mut lines = Vec::new();
    for line in collapsed.lines() {
        let line = line.trim();
        if !line.is_empty()
            && line.chars().count() < BOILERPLATE_LINE_MAX
            && starts_with_boilerplate(line)
        {
            continue;
        }
        lines.push(line);
    }
    let joined = lines.join("\n");

    let newline_re = Regex::new(r"\n{3,}").unwrap();
    newline_re.replace_all(&joined, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!("<html><head><title>Doc Title</title></head><body>{body}</body></html>")
    }

    #[test]
    fn title_prefers_h1() {
        let html = r#"<html><head><title>Tab Title</title>
            <meta property="og:title" content="OG Title"></head>
            <body><h1>Headline</h1></body></html>"#;
        let extraction = extract_article(html);
        assert_eq!(extraction.title, "Headline");
    }

    #[test]
    fn title_falls_back_to_og_then_title_tag() {
        let html = r#"<html><head><title>Tab Title</title>
            <meta property="og:title" content="OG Title"></head><body></body></html>"#;
        assert_eq!(extract_article(html).title, "OG Title");

        let html = r#"<html><head><title>Tab Title</title></head><body></body></html>"#;
        assert_eq!(extract_article(html).title, "Tab Title");
    }

    #[test]
    fn title_placeholder_when_nothing_found() {
        let html = "<html><head></head><body></body></html>";
        assert_eq!(extract_article(html).title, TITLE_PLACEHOLDER);
    }

    #[test]
    fn article_beats_short_sidebar() {
        let long = "Word ".repeat(400); // 2000 chars
        let html = page(&format!(
            r#"<div class="sidebar">{}</div><article>{}</article>"#,
            "short sidebar text that is briefly present here",
            long.trim()
        ));
        let extraction = extract_article(&html);
        assert!(extraction.body.starts_with("Word Word"));
        assert!(!extraction.body.contains("sidebar"));
    }

    #[test]
    fn max_length_wins_among_candidates() {
        let shorter = "alpha ".repeat(40);
        let longer = "bravo ".repeat(200);
        let html = page(&format!(
            r#"<article>{}</article><div class="article-body">{}</div>"#,
            shorter.trim(),
            longer.trim()
        ));
        let extraction = extract_article(&html);
        assert!(extraction.body.starts_with("bravo"));
    }

    #[test]
    fn structural_candidate_strips_nested_script() {
        let filler = "Real sentence content here. ".repeat(20);
        let html = page(&format!(
            "<article>{filler}<script>var x = 'evil';</script></article>"
        ));
        let extraction = extract_article(&html);
        assert!(!extraction.body.contains("evil"));
        assert!(extraction.body.contains("Real sentence content"));
    }

    #[test]
    fn paragraph_fallback_skips_boilerplate() {
        let para = "This is a perfectly ordinary article paragraph with plenty of words in it.";
        let html = page(&format!(
            "<p>{para}</p><p>{para}</p><p>{para}</p>\
             <p>Subscribe to our newsletter today for more updates and offers!</p>"
        ));
        let extraction = extract_article(&html);
        assert!(extraction.body.contains("ordinary article paragraph"));
        assert!(!extraction.body.contains("Subscribe"));
    }

    #[test]
    fn fallback_to_stripped_text_when_few_paragraphs() {
        let text = "A block of running text without paragraph markup. ".repeat(10);
        let html = page(&format!("<div>{text}</div><nav>Home News Sport</nav>"));
        let extraction = extract_article(&html);
        assert!(extraction.body.contains("running text"));
        assert!(!extraction.body.contains("Home News Sport"));
    }

    #[test]
    fn last_resort_caps_raw_text() {
        // Short fragments only, below every floor except the raw fallback.
        let html = page("<span>tiny</span>");
        let extraction = extract_article(&html);
        assert!(extraction.body.chars().count() <= RAW_TEXT_CAP);
        assert!(extraction.body.contains("tiny"));
    }

    #[test]
    fn empty_document_yields_empty_body() {
        let extraction = extract_article("<html><body></body></html>");
        assert!(extraction.body.is_empty());
    }

    #[test]
    fn normalize_collapses_whitespace() {
        let input = "line  one\t\there\n\n\n\n\nline two\n";
        let out = normalize(input);
        assert_eq!(out, "line one here\n\nline two");
    }

    #[test]
    fn normalize_drops_short_boilerplate_lines() {
        let input = "A real line of article text that should stay.\nShare this story\nCookie settings";
        let out = normalize(input);
        assert!(out.contains("real line"));
        assert!(!out.contains("Share this"));
        assert!(!out.contains("Cookie settings"));
    }

    #[test]
    fn structural_article_returns_none_below_floor() {
        let html = page("<article>too short</article>");
        assert!(structural_article(&html).is_none());

        let filler = "Sentence with several words here. ".repeat(20);
        let html = page(&format!("<article>{filler}</article>"));
        assert!(structural_article(&html).is_some());
    }
}
