use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_COOKIE_FILE, DEFAULT_MAX_PAGES, DEFAULT_OUTPUT_PATTERN,
    DEFAULT_PAGE_DELAY_MS, DEFAULT_PAGE_SIZE, DEFAULT_REST_TIMEOUT, DEFAULT_RETRY_BACKOFF_MS,
    DEFAULT_SEARCH_COUNT, DEFAULT_USER_AGENT,
};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;
use std::time::Duration;
use tracing::error;

#[derive(Debug, Deserialize, Clone)]
pub struct CredentialsConfig {
    /// Flat file holding the browser cookies, `name=value; name=value`.
    pub cookie_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub credentials: CredentialsConfig,
    pub rest_api: RestApiConfig,
    pub crawl: CrawlConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RestApiConfig {
    pub base_url: String,
    pub timeout: u64,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CrawlConfig {
    pub page_size: u32,
    pub search_count: u32,
    pub page_delay_ms: u64,
    /// Upper bound on list requests per run, 0 disables it.
    pub max_pages: u32,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    pub output_dir: String,
    pub output_pattern: String,
}

impl CrawlConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl fmt::Display for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"cookie_file\":\"{}\"}}", self.cookie_file)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"rest_api\":{},\"crawl\":{}}}",
            self.credentials, self.rest_api, self.crawl
        )
    }
}

impl fmt::Display for RestApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"base_url\":\"{}\",\"timeout\":{},\"user_agent\":\"{}\"}}",
            self.base_url, self.timeout, self.user_agent
        )
    }
}

impl fmt::Display for CrawlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"page_size\":{},\"search_count\":{},\"page_delay_ms\":{},\"max_pages\":{},\"max_retries\":{},\"retry_backoff_ms\":{},\"output_dir\":\"{}\",\"output_pattern\":\"{}\"}}",
            self.page_size,
            self.search_count,
            self.page_delay_ms,
            self.max_pages,
            self.max_retries,
            self.retry_backoff_ms,
            self.output_dir,
            self.output_pattern
        )
    }
}

pub fn get_env_or_default<T: FromStr>(env_var: &str, default: T) -> T
where
    <T as FromStr>::Err: Debug,
{
    match env::var(env_var) {
        Ok(val) => val.parse::<T>().unwrap_or_else(|_| {
            error!("Failed to parse {}: {}, using default", env_var, val);
            default
        }),
        Err(_) => default,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Config {
            credentials: CredentialsConfig {
                cookie_file: get_env_or_default(
                    "MP_COOKIE_FILE",
                    String::from(DEFAULT_COOKIE_FILE),
                ),
            },
            rest_api: RestApiConfig {
                base_url: get_env_or_default("MP_REST_BASE_URL", String::from(DEFAULT_BASE_URL)),
                timeout: get_env_or_default("MP_REST_TIMEOUT", DEFAULT_REST_TIMEOUT),
                user_agent: get_env_or_default("MP_USER_AGENT", String::from(DEFAULT_USER_AGENT)),
            },
            crawl: CrawlConfig {
                page_size: get_env_or_default("MP_PAGE_SIZE", DEFAULT_PAGE_SIZE),
                search_count: get_env_or_default("MP_SEARCH_COUNT", DEFAULT_SEARCH_COUNT),
                page_delay_ms: get_env_or_default("MP_PAGE_DELAY_MS", DEFAULT_PAGE_DELAY_MS),
                max_pages: get_env_or_default("MP_MAX_PAGES", DEFAULT_MAX_PAGES),
                max_retries: get_env_or_default("MP_MAX_RETRIES", 0),
                retry_backoff_ms: get_env_or_default(
                    "MP_RETRY_BACKOFF_MS",
                    DEFAULT_RETRY_BACKOFF_MS,
                ),
                output_dir: get_env_or_default("MP_OUTPUT_DIR", String::from(".")),
                output_pattern: get_env_or_default(
                    "MP_OUTPUT_PATTERN",
                    String::from(DEFAULT_OUTPUT_PATTERN),
                ),
            },
        }
    }
}
