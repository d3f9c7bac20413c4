//! Resolution of a navigation location to the section it displays.

use civicode_shared::{CodeTree, Section};

/// Resolve the section to display for a navigation location.
///
/// The final non-empty path segment is matched against `url` fields at all
/// three levels: a chapter resolves to its first article's first section, an
/// article to its first section, a section to itself. Chapters are checked
/// outermost-first, so a url reused across levels resolves at the highest
/// level that declares it. No match is "nothing selected".
pub fn resolve_section<'a>(tree: &'a CodeTree, location: &str) -> Option<&'a Section> {
    let segment = location.split('/').filter(|s| !s.is_empty()).next_back()?;

    for chapter in &tree.chapters {
        if chapter.url == segment {
            return chapter.articles.first().and_then(|a| a.sections.first());
        }
        for article in &chapter.articles {
            if article.url == segment {
                return article.sections.first();
            }
            for section in &article.sections {
                if section.url == segment {
                    return Some(section);
                }
            }
        }
    }

    None
}

/// Effective body for a section: the concatenated `pages` fragments when the
/// paginated revision is present and non-empty, the `content` field
/// otherwise.
pub fn section_content(section: &Section) -> String {
    match &section.pages {
        Some(pages) if !pages.is_empty() => pages.concat(),
        _ => section.content.clone(),
    }
}
