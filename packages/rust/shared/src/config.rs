//! Application configuration for CiviCode.
//!
//! User config lives at `~/.civicode/civicode.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CiviCodeError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "civicode.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".civicode";

// ---------------------------------------------------------------------------
// Config structs (matching civicode.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Crawl settings.
    #[serde(default)]
    pub crawl: CrawlSettings,

    /// CSS selectors for the origin's known markup.
    #[serde(default)]
    pub selectors: SelectorSettings,

    /// Output settings.
    #[serde(default)]
    pub output: OutputSettings,
}

/// `[crawl]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlSettings {
    /// Origin of the municipal code site to crawl.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Politeness delay in ms, awaited after every request regardless of level.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Identification header attached to every request. The origin rejects
    /// or alters responses without a browser-like value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            delay_ms: default_delay_ms(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_origin() -> String {
    "https://udo.raleighnc.gov".into()
}
fn default_delay_ms() -> u64 {
    50
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3"
        .into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[selectors]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorSettings {
    /// Chapter listing on the origin page.
    #[serde(default = "default_chapter_list")]
    pub chapter_list: String,

    /// Book-navigation menu used for both article and section listings.
    #[serde(default = "default_book_nav")]
    pub book_nav: String,

    /// Content region on leaf section pages.
    #[serde(default = "default_content")]
    pub content: String,
}

impl Default for SelectorSettings {
    fn default() -> Self {
        Self {
            chapter_list: default_chapter_list(),
            book_nav: default_book_nav(),
            content: default_content(),
        }
    }
}

fn default_chapter_list() -> String {
    ".item-list li a".into()
}
fn default_book_nav() -> String {
    ".book-navigation .book-navigation__menu li a".into()
}
fn default_content() -> String {
    ".text-content".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Path of the output document, overwritten whole on every run.
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    "public/civicode.json".into()
}

// ---------------------------------------------------------------------------
// Crawl config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime crawl configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Parsed origin URL; all relative paths are joined onto this.
    pub origin: Url,
    /// Politeness delay in ms after every request.
    pub delay_ms: u64,
    /// User-Agent header value.
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// CSS selectors for the three navigation/content regions.
    pub selectors: SelectorSettings,
}

impl CrawlConfig {
    /// Build the runtime crawl config, validating the origin URL.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let origin = Url::parse(&config.crawl.origin).map_err(|e| {
            CiviCodeError::config(format!("invalid origin '{}': {e}", config.crawl.origin))
        })?;

        Ok(Self {
            origin,
            delay_ms: config.crawl.delay_ms,
            user_agent: config.crawl.user_agent.clone(),
            timeout_secs: config.crawl.timeout_secs,
            selectors: config.selectors.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.civicode/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CiviCodeError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.civicode/civicode.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| CiviCodeError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| CiviCodeError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| CiviCodeError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| CiviCodeError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| CiviCodeError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
