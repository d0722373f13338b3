use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};

use crate::config::Config;
use crate::error::AppError;
use crate::utils::articles::CrawlTarget;

/// Crawl the article list of an mp.weixin.qq.com account into a CSV file.
#[derive(Debug, Parser)]
#[command(name = "mp-crawler", version, about)]
#[command(group(ArgGroup::new("target").required(true).args(["search_text", "fakeid"])))]
pub struct Cli {
    /// Account name or id to search for; the first hit is crawled
    #[arg(short = 't', long = "search-text")]
    pub search_text: Option<String>,

    /// Internal account id, skips the search
    #[arg(short = 'f', long = "fakeid")]
    pub fakeid: Option<String>,

    /// Stop after this many articles
    #[arg(short = 'c', long = "max-count", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_count: Option<u64>,

    /// Cookie file, overrides MP_COOKIE_FILE
    #[arg(long = "cookie-file")]
    pub cookie_file: Option<String>,

    /// Output directory, overrides MP_OUTPUT_DIR
    #[arg(short = 'o', long = "output-dir")]
    pub output_dir: Option<String>,

    /// Pause between pages in milliseconds, overrides MP_PAGE_DELAY_MS
    #[arg(long = "delay-ms")]
    pub delay_ms: Option<u64>,

    /// Page cap, 0 disables it. Overrides MP_MAX_PAGES
    #[arg(long = "max-pages")]
    pub max_pages: Option<u32>,

    /// Retries per page on transient failures, overrides MP_MAX_RETRIES
    #[arg(long = "retries")]
    pub retries: Option<u32>,
}

impl Cli {
    pub fn target(&self) -> Result<CrawlTarget, AppError> {
        match (&self.search_text, &self.fakeid) {
            (Some(text), None) => non_empty("--search-text", text).map(CrawlTarget::Search),
            (None, Some(id)) => non_empty("--fakeid", id).map(CrawlTarget::Fakeid),
            _ => Err(AppError::Usage(
                "exactly one of --search-text or --fakeid is required".to_string(),
            )),
        }
    }

    /// [`Cli::target`] as a clap validation error, so a bad target exits
    /// with the usage status like any other argument error.
    pub fn validated_target(&self) -> Result<CrawlTarget, clap::Error> {
        self.target()
            .map_err(|e| Cli::command().error(ErrorKind::ValueValidation, e))
    }

    /// Copies the flags that were given onto `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(path) = &self.cookie_file {
            config.credentials.cookie_file = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.crawl.output_dir = dir.clone();
        }
        if let Some(delay) = self.delay_ms {
            config.crawl.page_delay_ms = delay;
        }
        if let Some(pages) = self.max_pages {
            config.crawl.max_pages = pages;
        }
        if let Some(retries) = self.retries {
            config.crawl.max_retries = retries;
        }
    }
}

fn non_empty(flag: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Usage(format!("{flag} must not be empty")));
    }
    Ok(value.to_string())
}
