//! Post-processing of captured content before display.
//!
//! Captured HTML references images via crawl-time URLs and links via
//! origin-relative paths. A rendering consumer rewrites the former to the
//! public origin and treats the latter as internal navigation.

use url::Url;

/// Rewrite `src` attributes whose value starts with `from` so they resolve
/// against `to` instead.
///
/// Idempotent: a rewritten source no longer starts with `from`, so a second
/// pass leaves it untouched. When `to` itself still begins with `from` a
/// second pass would re-match, so that case is a no-op.
pub fn rewrite_image_sources(content: &str, from: &str, to: &str) -> String {
    if from.is_empty() || to.starts_with(from) {
        return content.to_string();
    }

    content.replace(&format!("src=\"{from}"), &format!("src=\"{to}"))
}

/// Whether an anchor target inside captured content is origin-relative and
/// should be handled as internal navigation rather than a full page load.
pub fn is_internal_link(href: &str) -> bool {
    if href.is_empty() || href.starts_with("//") {
        return false;
    }
    // Absolute URLs (including mailto:/tel:) parse on their own; relative
    // paths and fragments do not.
    Url::parse(href).is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRAWL_HOST: &str = "http://localhost:5175/";
    const PUBLIC_ORIGIN: &str = "https://udo.raleighnc.gov/";

    #[test]
    fn rewrites_crawl_host_sources_to_the_public_origin() {
        let content = r#"<p>x</p><img src="http://localhost:5175/files/map.png" alt="map">"#;
        let rewritten = rewrite_image_sources(content, CRAWL_HOST, PUBLIC_ORIGIN);
        assert_eq!(
            rewritten,
            r#"<p>x</p><img src="https://udo.raleighnc.gov/files/map.png" alt="map">"#
        );
    }

    #[test]
    fn rewrite_is_idempotent() {
        let content = r#"<img src="http://localhost:5175/files/a.png"><img src="/files/b.png">"#;
        let once = rewrite_image_sources(content, CRAWL_HOST, PUBLIC_ORIGIN);
        let twice = rewrite_image_sources(&once, CRAWL_HOST, PUBLIC_ORIGIN);
        assert_eq!(once, twice);
    }

    #[test]
    fn relative_sources_can_be_absolutized_idempotently() {
        let content = r#"<img src="/files/diagram.png">"#;
        let once = rewrite_image_sources(content, "/", PUBLIC_ORIGIN);
        assert_eq!(once, r#"<img src="https://udo.raleighnc.gov/files/diagram.png">"#);
        assert_eq!(rewrite_image_sources(&once, "/", PUBLIC_ORIGIN), once);
    }

    #[test]
    fn non_image_text_is_untouched() {
        let content = r#"<p>see http://localhost:5175/files/a.png for the map</p>"#;
        assert_eq!(
            rewrite_image_sources(content, CRAWL_HOST, PUBLIC_ORIGIN),
            content
        );
    }

    #[test]
    fn looping_rewrite_target_is_a_no_op() {
        let content = r#"<img src="/files/a.png">"#;
        // `to` still starts with `from`; rewriting would stack prefixes.
        assert_eq!(rewrite_image_sources(content, "/", "/public/"), content);
    }

    #[test]
    fn origin_relative_targets_are_internal() {
        assert!(is_internal_link("zoning"));
        assert!(is_internal_link("/zoning/definitions"));
        assert!(is_internal_link("#sec-111"));
    }

    #[test]
    fn absolute_targets_are_external() {
        assert!(!is_internal_link("https://example.com/page"));
        assert!(!is_internal_link("mailto:clerk@raleighnc.gov"));
        assert!(!is_internal_link("//cdn.example.com/x"));
        assert!(!is_internal_link(""));
    }
}
