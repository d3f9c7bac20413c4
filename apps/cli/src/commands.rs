//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

use civicode_crawler::{ProgressReporter, TreeBuilder};
use civicode_shared::{CrawlConfig, config_file_path, init_config, load_config};
use civicode_viewer::{load_tree, resolve_section, rewrite_image_sources, section_content};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// CiviCode — one municipal code website, one browsable JSON document.
#[derive(Parser)]
#[command(
    name = "civicode",
    version,
    about = "Crawl a municipal code site into a single browsable JSON document.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Crawl the configured origin and write the output document.
    Crawl {
        /// Origin to crawl (overrides config).
        #[arg(long)]
        origin: Option<String>,

        /// Output file path (overrides config).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Politeness delay in ms between requests (overrides config).
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Resolve and print a section from a previously crawled document.
    Show {
        /// Navigation location or bare path segment (e.g. "definitions").
        location: String,

        /// Document to read (overrides config).
        #[arg(long)]
        doc: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "civicode=info",
        1 => "civicode=debug",
        _ => "civicode=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Crawl {
            origin,
            out,
            delay_ms,
        } => cmd_crawl(origin.as_deref(), out, delay_ms).await,
        Command::Show { location, doc } => cmd_show(&location, doc).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// crawl
// ---------------------------------------------------------------------------

async fn cmd_crawl(
    origin: Option<&str>,
    out: Option<PathBuf>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let mut config = load_config()?;
    if let Some(origin) = origin {
        config.crawl.origin = origin.to_string();
    }
    if let Some(delay_ms) = delay_ms {
        config.crawl.delay_ms = delay_ms;
    }
    let out_path = out.unwrap_or_else(|| PathBuf::from(&config.output.path));

    let crawl_config = CrawlConfig::from_config(&config)?;
    info!(
        origin = %crawl_config.origin,
        delay_ms = crawl_config.delay_ms,
        out = %out_path.display(),
        "starting crawl"
    );

    let builder = TreeBuilder::new(crawl_config)?;
    let reporter = CliProgress::new();

    // Any failure along the traversal aborts here, before the serializer is
    // reached — a previous output document stays untouched.
    let (tree, stats) = match builder.crawl(&reporter).await {
        Ok(ok) => ok,
        Err(e) => {
            reporter.finish();
            error!(error = %e, "crawl aborted, no output written");
            return Err(e.into());
        }
    };
    reporter.finish();

    civicode_output::write_tree(&tree, &out_path)?;

    println!();
    println!("  Crawl finished.");
    println!("  Chapters: {}", stats.chapters);
    println!("  Articles: {}", stats.articles);
    println!("  Sections: {}", stats.sections);
    println!("  Output:   {}", out_path.display());
    println!("  Time:     {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("static template is valid")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn section(&self, title: &str, url: &str, count: usize) {
        self.spinner
            .set_message(format!("Section {count}: {title} ({url})"));
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

async fn cmd_show(location: &str, doc: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let path = doc.unwrap_or_else(|| PathBuf::from(&config.output.path));

    let Some(tree) = load_tree(&path) else {
        println!(
            "No crawled document at {} — run `civicode crawl` first.",
            path.display()
        );
        return Ok(());
    };

    match resolve_section(&tree, location) {
        Some(section) => {
            let origin = format!("{}/", config.crawl.origin.trim_end_matches('/'));
            let content = rewrite_image_sources(&section_content(section), "/", &origin);
            println!("{}", section.title);
            println!();
            println!("{content}");
        }
        None => println!("Nothing matches '{location}' at any level."),
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    println!("# {}", config_file_path()?.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
