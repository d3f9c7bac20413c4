//! Selector-driven extraction of navigation links and section content.

use scraper::{Html, Selector};

use civicode_shared::{CiviCodeError, Result};

/// One entry in a navigation listing: anchor text plus origin-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Trimmed text content of the anchor.
    pub title: String,
    /// The anchor's href with any leading `/` stripped. Empty when the
    /// anchor carried no href at all.
    pub url: String,
}

/// Selectors come from runtime config, so parse them fallibly.
fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| CiviCodeError::parse(format!("invalid selector '{selector}': {e}")))
}

/// Extract `(label, relative path)` pairs in document order.
///
/// Zero matches is an empty list, not an error. An anchor without an href is
/// still emitted, with an empty url — the node is recorded even though it
/// cannot be separately re-fetched.
pub fn extract_links(html: &str, selector: &str) -> Result<Vec<NavLink>> {
    let doc = Html::parse_document(html);
    let sel = parse_selector(selector)?;

    let mut links = Vec::new();
    for el in doc.select(&sel) {
        let title = el.text().collect::<String>().trim().to_string();
        let url = el
            .value()
            .attr("href")
            .map(|href| href.trim_start_matches('/').to_string())
            .unwrap_or_default();
        links.push(NavLink { title, url });
    }

    Ok(links)
}

/// Inner HTML of the first match of the content selector, or the empty
/// string when the page has no such region.
pub fn extract_content(html: &str, selector: &str) -> Result<String> {
    let doc = Html::parse_document(html);
    let sel = parse_selector(selector)?;

    Ok(doc
        .select(&sel)
        .next()
        .map(|el| el.inner_html())
        .unwrap_or_default())
}
