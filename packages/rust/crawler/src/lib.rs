//! Crawler for a Chapters → Articles → Sections municipal code site.
//!
//! This crate provides:
//! - [`fetch`] — HTTP fetcher with the fixed identification header
//! - [`parse`] — selector-driven link and content extraction
//! - [`builder`] — the sequential three-level tree builder

pub mod builder;
pub mod fetch;
pub mod parse;

pub use builder::{CrawlStats, ProgressReporter, SilentProgress, TreeBuilder};
pub use fetch::Fetcher;
pub use parse::{NavLink, extract_content, extract_links};

#[cfg(test)]
mod tests {
    use super::*;
    use civicode_shared::SelectorSettings;

    fn load_fixture(name: &str) -> String {
        let path = format!("../../../fixtures/html/{name}");
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }

    fn selectors() -> SelectorSettings {
        SelectorSettings::default()
    }

    // -----------------------------------------------------------------------
    // Fixture-driven extraction tests against the origin's real markup shape
    // -----------------------------------------------------------------------

    #[test]
    fn chapter_list_extraction() {
        let html = load_fixture("chapter_index.html");
        let links = extract_links(&html, &selectors().chapter_list).unwrap();

        assert_eq!(links.len(), 3);
        assert_eq!(links[0].title, "Chapter 1. General Provisions");
        assert_eq!(links[0].url, "chapter-1-general-provisions");
        assert_eq!(links[1].url, "chapter-2-zoning-districts");
        // The reserved chapter has no href but is still recorded.
        assert_eq!(links[2].title, "Chapter 3. Reserved");
        assert_eq!(links[2].url, "");
    }

    #[test]
    fn book_navigation_extraction() {
        let html = load_fixture("book_page.html");
        let links = extract_links(&html, &selectors().book_nav).unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].title, "Article 1. Purpose");
        assert_eq!(links[0].url, "article-1-purpose");
        assert_eq!(links[1].title, "Article 2. Definitions");
    }

    #[test]
    fn book_navigation_ignores_links_outside_the_menu() {
        let html = load_fixture("book_page.html");
        let links = extract_links(&html, &selectors().book_nav).unwrap();
        assert!(links.iter().all(|l| l.url != "unrelated"));
    }

    #[test]
    fn section_content_extraction() {
        let html = load_fixture("section_page.html");
        let content = extract_content(&html, &selectors().content).unwrap();

        assert!(content.contains("<h2>Sec. 1.1.1. Title</h2>"));
        assert!(content.contains("Unified Development Ordinance"));
        assert!(content.contains(r#"<img src="/files/diagram.png">"#));
        // Only the region's inner HTML, not the surrounding page chrome.
        assert!(!content.contains("text-content"));
        assert!(!content.contains("<body>"));
    }

    #[test]
    fn content_region_absent_on_index_page() {
        let html = load_fixture("chapter_index.html");
        let content = extract_content(&html, &selectors().content).unwrap();
        assert_eq!(content, "");
    }
}
