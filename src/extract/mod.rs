//! Content extraction module
//!
//! DOM candidate scoring over parsed HTML: structural selectors, paragraph
//! fallback, and text normalization. Selector and boilerplate lists are
//! plain data in [`selectors`]; the scoring itself is a stateless function.

pub mod scorer;
pub mod selectors;

pub use scorer::{extract_article, normalize, structural_article, Extraction, ExtractionCandidate};
pub use selectors::SelectorClass;
