//! Domain types for the crawled municipal code tree.
//!
//! The tree is three levels deep — Chapters → Articles → Sections — and is
//! built append-only during a single crawl run. Struct field order fixes the
//! JSON key order of the output document, which is the sole contract with
//! the browsing UI.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Section
// ---------------------------------------------------------------------------

/// A leaf section: one page of the code with its captured body HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Display title, from the anchor text on the article's navigation page.
    pub title: String,
    /// Origin-relative path segment. Never starts with `/`; may be empty
    /// when the source anchor had no href (the node is still recorded).
    pub url: String,
    /// Raw inner HTML of the page's content region; empty string when the
    /// region is absent.
    pub content: String,
    /// Ordered content fragments for paginated sections (a later schema
    /// revision). When present and non-empty, consumers paginate over these;
    /// otherwise `content` is authoritative. The crawler never emits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Article / Chapter
// ---------------------------------------------------------------------------

/// A mid-level article grouping an ordered list of sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Display title, from the anchor text on the chapter page.
    pub title: String,
    /// Origin-relative path segment, unique within the parent chapter only.
    /// Collisions across chapters are permitted and disambiguated by path.
    pub url: String,
    /// Sections in document order of the article's navigation listing.
    pub sections: Vec<Section>,
}

/// A top-level chapter grouping an ordered list of articles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Display title, from the anchor text on the origin's chapter list.
    pub title: String,
    /// Origin-relative path segment, unique among chapters.
    pub url: String,
    /// Articles in document order of the chapter's navigation listing.
    pub articles: Vec<Article>,
}

// ---------------------------------------------------------------------------
// CodeTree
// ---------------------------------------------------------------------------

/// The single root object of the output document: `{ chapters: [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeTree {
    /// Chapters in document order of the origin's chapter list.
    pub chapters: Vec<Chapter>,
}
