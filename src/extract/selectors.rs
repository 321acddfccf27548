//! Selector and boilerplate constants for the content scorer.
//!
//! Everything the scorer keys on lives here as ordered, immutable data so the
//! heuristic itself stays a stateless function. The lists were tuned against
//! mainstream news sites; order matters only for tie-breaking (first
//! encountered wins among equal-length candidates).

/// Broad category of a structural selector, carried on each candidate for
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorClass {
    /// Semantic HTML5 container (`article`, `main`).
    SemanticTag,
    /// ARIA role attribute.
    AriaRole,
    /// Exact class name commonly used for article bodies.
    ClassHint,
    /// Exact id commonly used for article bodies.
    IdHint,
    /// Substring match on class attribute.
    ClassSubstring,
}

/// Ordered structural selectors representing likely article containers.
///
/// All matches across all selectors compete; the longest text wins
/// (max-length-wins, not first-match-wins).
pub const STRUCTURAL_SELECTORS: &[(SelectorClass, &str)] = &[
    (SelectorClass::SemanticTag, "article"),
    (SelectorClass::AriaRole, r#"[role="article"]"#),
    (SelectorClass::AriaRole, r#"[role="main"]"#),
    (SelectorClass::SemanticTag, "main"),
    (SelectorClass::ClassHint, ".article-content"),
    (SelectorClass::ClassHint, ".article-body"),
    (SelectorClass::ClassHint, ".post-content"),
    (SelectorClass::ClassHint, ".story-body"),
    (SelectorClass::ClassHint, ".entry-content"),
    (SelectorClass::ClassHint, ".story-content"),
    (SelectorClass::ClassHint, ".main-content"),
    (SelectorClass::IdHint, "#article-content"),
    (SelectorClass::IdHint, "#story-content"),
    (SelectorClass::IdHint, "#main-content"),
    (SelectorClass::ClassSubstring, r#"[class*="article"]"#),
    (SelectorClass::ClassSubstring, r#"[class*="story"]"#),
    (SelectorClass::ClassSubstring, r#"[class*="content"]"#),
    (SelectorClass::ClassSubstring, r#"[class*="post"]"#),
];

/// Tags whose entire subtree is never article content.
pub const STRIP_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript", "form", "iframe", "head",
];

/// Class/id substrings marking ad, social, and chrome regions to strip
/// before paragraph fallback.
pub const STRIP_CLASS_HINTS: &[&str] = &[
    "advert", "promo", "social", "share", "menu", "cookie", "consent", "sidebar", "related",
    "newsletter", "comment", "breadcrumb",
];

/// Phrases that mark a short line as boilerplate rather than body text.
/// Compared case-insensitively against line starts.
pub const BOILERPLATE_PREFIXES: &[&str] = &[
    "subscribe",
    "sign up",
    "sign in",
    "log in",
    "cookie",
    "accept",
    "menu",
    "click",
    "share",
    "follow us",
    "advertisement",
    "read more",
    "skip to",
];

/// Meta properties consulted for the title, in priority order after `h1`.
pub const TITLE_META_PROPS: &[&str] = &["og:title", "twitter:title"];

/// Placeholder title when nothing on the page yields one.
pub const TITLE_PLACEHOLDER: &str = "No title found";

/// Minimum visible text length for a structural candidate to win phase 1.
pub const CANDIDATE_FLOOR: usize = 150;

/// Minimum trimmed length for a paragraph to survive the fallback pass.
pub const PARAGRAPH_FLOOR: usize = 40;

/// Minimum paragraphs that must survive before the joined-paragraph result
/// is preferred over the full stripped-document text.
pub const MIN_PARAGRAPHS: usize = 3;

/// Minimum viable body length; below this the last-resort raw text kicks in.
pub const VIABLE_FLOOR: usize = 80;

/// Hard cap on last-resort raw page text, in characters.
pub const RAW_TEXT_CAP: usize = 4000;

/// Boilerplate-prefixed lines shorter than this are dropped during
/// normalization.
pub const BOILERPLATE_LINE_MAX: usize = 60;
