//! Sequential three-level tree builder with a per-request politeness delay.
//!
//! The builder walks Chapters → Articles → Sections strictly depth-first: a
//! child page is fetched only after its parent's navigation list has been
//! fully parsed, and no two requests are ever in flight at once. Insertion
//! order equals encounter order, so output is deterministic for a stable
//! origin.

use std::time::{Duration, Instant};

use tracing::{debug, info, instrument};
use url::Url;

use civicode_shared::{Article, Chapter, CiviCodeError, CodeTree, CrawlConfig, Result, Section};

use crate::fetch::Fetcher;
use crate::parse::{extract_content, extract_links};

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callbacks for long-running crawls.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new crawl phase.
    fn phase(&self, name: &str);
    /// Called once per section just before its page is fetched.
    fn section(&self, title: &str, url: &str, count: usize);
}

/// No-op reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn section(&self, _title: &str, _url: &str, _count: usize) {}
}

// ---------------------------------------------------------------------------
// CrawlStats
// ---------------------------------------------------------------------------

/// Counters for a completed crawl.
#[derive(Debug, Clone, Copy)]
pub struct CrawlStats {
    /// Chapters collected.
    pub chapters: usize,
    /// Articles collected across all chapters.
    pub articles: usize,
    /// Sections collected across all articles.
    pub sections: usize,
    /// Total wall time, delays included.
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// TreeBuilder
// ---------------------------------------------------------------------------

/// Orchestrates the fetcher and parser across the three navigation levels.
pub struct TreeBuilder {
    config: CrawlConfig,
    fetcher: Fetcher,
}

impl TreeBuilder {
    /// Create a builder, constructing the HTTP client from the config.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { config, fetcher })
    }

    /// Fetch one page, then await the blanket politeness throttle. One pause
    /// after every single request, regardless of level.
    async fn fetch_page(&self, url: &Url) -> Result<String> {
        let body = self.fetcher.fetch(url).await?;
        if self.config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.delay_ms)).await;
        }
        Ok(body)
    }

    /// Join a stored origin-relative path back onto the origin. An empty
    /// path resolves to the origin page itself.
    fn absolute(&self, relative: &str) -> Result<Url> {
        self.config.origin.join(relative).map_err(|e| {
            CiviCodeError::parse(format!("cannot join '{relative}' onto origin: {e}"))
        })
    }

    /// Crawl the full Chapters → Articles → Sections hierarchy.
    ///
    /// The first fetch or parse error anywhere aborts the whole run and is
    /// propagated with its URL context; no partial tree escapes the builder,
    /// which is what keeps the output document all-or-nothing.
    #[instrument(skip_all, fields(origin = %self.config.origin))]
    pub async fn crawl(&self, progress: &dyn ProgressReporter) -> Result<(CodeTree, CrawlStats)> {
        let start = Instant::now();
        info!(delay_ms = self.config.delay_ms, "starting crawl");

        let mut chapters: Vec<Chapter> = Vec::new();
        let mut article_count = 0usize;
        let mut section_count = 0usize;

        progress.phase("Fetching chapter list");
        let index = self.fetch_page(&self.config.origin).await?;

        for chapter_link in extract_links(&index, &self.config.selectors.chapter_list)? {
            debug!(title = %chapter_link.title, url = %chapter_link.url, "entering chapter");
            let chapter_page = self.fetch_page(&self.absolute(&chapter_link.url)?).await?;

            let mut articles: Vec<Article> = Vec::new();
            for article_link in extract_links(&chapter_page, &self.config.selectors.book_nav)? {
                let article_page = self.fetch_page(&self.absolute(&article_link.url)?).await?;

                let mut sections: Vec<Section> = Vec::new();
                for section_link in extract_links(&article_page, &self.config.selectors.book_nav)?
                {
                    section_count += 1;
                    progress.section(&section_link.title, &section_link.url, section_count);
                    debug!(title = %section_link.title, url = %section_link.url, "processing section");

                    let section_page =
                        self.fetch_page(&self.absolute(&section_link.url)?).await?;
                    let content =
                        extract_content(&section_page, &self.config.selectors.content)?;

                    sections.push(Section {
                        title: section_link.title,
                        url: section_link.url,
                        content,
                        pages: None,
                    });
                }

                article_count += 1;
                articles.push(Article {
                    title: article_link.title,
                    url: article_link.url,
                    sections,
                });
            }

            chapters.push(Chapter {
                title: chapter_link.title,
                url: chapter_link.url,
                articles,
            });
        }

        let stats = CrawlStats {
            chapters: chapters.len(),
            articles: article_count,
            sections: section_count,
            elapsed: start.elapsed(),
        };

        info!(
            chapters = stats.chapters,
            articles = stats.articles,
            sections = stats.sections,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "crawl completed"
        );

        Ok((CodeTree { chapters }, stats))
    }
}

#[cfg(test)]
mod builder_tests {
    use super::*;
    use civicode_shared::AppConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX: &str = r#"<html><body>
        <div class="item-list"><ul>
            <li><a href="/zoning">Zoning</a></li>
        </ul></div>
    </body></html>"#;

    const ZONING: &str = r#"<html><body>
        <nav class="book-navigation"><ul class="book-navigation__menu">
            <li><a href="/definitions">Definitions</a></li>
        </ul></nav>
    </body></html>"#;

    const DEFINITIONS: &str = r#"<html><body>
        <nav class="book-navigation"><ul class="book-navigation__menu">
            <li><a href="/a">A</a></li>
            <li><a href="/b">B</a></li>
        </ul></nav>
    </body></html>"#;

    const SECTION_A: &str =
        r#"<html><body><div class="text-content"><p>Alpha</p></div></body></html>"#;
    const SECTION_B: &str =
        r#"<html><body><div class="text-content"><p>Beta</p></div></body></html>"#;

    async fn mount(server: &MockServer, at: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(at))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    async fn mount_site(server: &MockServer) {
        mount(server, "/", INDEX).await;
        mount(server, "/zoning", ZONING).await;
        mount(server, "/definitions", DEFINITIONS).await;
        mount(server, "/a", SECTION_A).await;
        mount(server, "/b", SECTION_B).await;
    }

    fn builder_for(server: &MockServer, delay_ms: u64) -> TreeBuilder {
        let mut app = AppConfig::default();
        app.crawl.origin = server.uri();
        app.crawl.delay_ms = delay_ms;
        let config = CrawlConfig::from_config(&app).expect("valid test config");
        TreeBuilder::new(config).expect("client builds")
    }

    #[tokio::test]
    async fn crawls_the_three_level_hierarchy() {
        let server = MockServer::start().await;
        mount_site(&server).await;

        let builder = builder_for(&server, 0);
        let (tree, stats) = builder.crawl(&SilentProgress).await.unwrap();

        assert_eq!(tree.chapters.len(), 1);
        let chapter = &tree.chapters[0];
        assert_eq!(chapter.title, "Zoning");
        assert_eq!(chapter.url, "zoning");

        assert_eq!(chapter.articles.len(), 1);
        let article = &chapter.articles[0];
        assert_eq!(article.title, "Definitions");
        assert_eq!(article.url, "definitions");

        // Sections in document order, content captured verbatim.
        assert_eq!(article.sections.len(), 2);
        assert_eq!(article.sections[0].title, "A");
        assert_eq!(article.sections[0].url, "a");
        assert_eq!(article.sections[0].content, "<p>Alpha</p>");
        assert_eq!(article.sections[1].title, "B");
        assert_eq!(article.sections[1].url, "b");
        assert_eq!(article.sections[1].content, "<p>Beta</p>");

        assert_eq!(stats.chapters, 1);
        assert_eq!(stats.articles, 1);
        assert_eq!(stats.sections, 2);
    }

    #[tokio::test]
    async fn output_is_deterministic_across_runs() {
        let server = MockServer::start().await;
        mount_site(&server).await;

        let builder = builder_for(&server, 0);
        let (first, _) = builder.crawl(&SilentProgress).await.unwrap();
        let (second, _) = builder.crawl(&SilentProgress).await.unwrap();

        let a = serde_json::to_string_pretty(&first).unwrap();
        let b = serde_json::to_string_pretty(&second).unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn extracted_urls_never_leak_separators_or_hosts() {
        let server = MockServer::start().await;
        mount_site(&server).await;

        let builder = builder_for(&server, 0);
        let (tree, _) = builder.crawl(&SilentProgress).await.unwrap();

        for chapter in &tree.chapters {
            assert!(!chapter.url.starts_with('/') && !chapter.url.contains("://"));
            for article in &chapter.articles {
                assert!(!article.url.starts_with('/') && !article.url.contains("://"));
                for section in &article.sections {
                    assert!(!section.url.starts_with('/') && !section.url.contains("://"));
                }
            }
        }
    }

    #[tokio::test]
    async fn empty_navigation_list_is_zero_children_not_an_error() {
        let server = MockServer::start().await;
        mount(&server, "/", INDEX).await;
        // Chapter page with no book navigation at all.
        mount(&server, "/zoning", "<html><body><p>coming soon</p></body></html>").await;

        let builder = builder_for(&server, 0);
        let (tree, _) = builder.crawl(&SilentProgress).await.unwrap();

        assert_eq!(tree.chapters.len(), 1);
        assert!(tree.chapters[0].articles.is_empty());
    }

    #[tokio::test]
    async fn one_broken_section_aborts_the_whole_run() {
        let server = MockServer::start().await;
        mount(&server, "/", INDEX).await;
        mount(&server, "/zoning", ZONING).await;
        mount(&server, "/definitions", DEFINITIONS).await;
        mount(&server, "/a", SECTION_A).await;
        Mock::given(method("GET"))
            .and(path("/b"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let builder = builder_for(&server, 0);
        let err = builder.crawl(&SilentProgress).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("/b"), "error should name the failing URL: {msg}");
        assert!(msg.contains("500"), "error should carry the status: {msg}");
    }

    #[tokio::test]
    async fn failed_run_leaves_a_previous_document_untouched() {
        let server = MockServer::start().await;
        mount(&server, "/", INDEX).await;
        Mock::given(method("GET"))
            .and(path("/zoning"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("civicode.json");
        std::fs::write(&out, "{\"chapters\":[]}").unwrap();

        let builder = builder_for(&server, 0);
        let result = builder.crawl(&SilentProgress).await;

        // Mirror the pipeline: the serializer runs only on a complete tree.
        if let Ok((tree, _)) = result {
            civicode_output::write_tree(&tree, &out).unwrap();
            panic!("crawl should have failed");
        }

        assert_eq!(std::fs::read_to_string(&out).unwrap(), "{\"chapters\":[]}");
    }

    #[tokio::test]
    async fn politeness_delay_is_awaited_after_every_fetch() {
        let server = MockServer::start().await;
        mount_site(&server).await;

        // Five pages at 20 ms each puts a hard floor under the wall time.
        let builder = builder_for(&server, 20);
        let (_, stats) = builder.crawl(&SilentProgress).await.unwrap();
        assert!(
            stats.elapsed >= Duration::from_millis(100),
            "elapsed {:?} is below the five-delay floor",
            stats.elapsed
        );
    }
}
