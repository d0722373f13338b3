// src/utils/articles.rs
//
// End to end crawl of one account for the mp.weixin.qq.com client

use chrono::Utc;
use std::fs;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{
    application::models::account::AccountDescriptor,
    application::models::cursor::PaginationCursor,
    application::services::account_service::{AccountService, AccountServiceImpl},
    application::services::article_service::{ArticleService, ArticleServiceImpl},
    config::Config,
    error::AppError,
    session::auth::MpAuth,
    session::cookies::SessionCredentials,
    session::interface::MpAuthenticator,
    storage::csv_writer::CsvArticleWriter,
    storage::status::{write_status, CrawlSummary},
    storage::utils::{output_path, status_path},
    transport::http_client::{MpHttpClient, MpHttpClientImpl},
};

/// What to crawl: an account found through search, or a known `fakeid`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlTarget {
    Search(String),
    Fakeid(String),
}

/// Crawl an account's article list into a CSV file
///
/// This function handles the entire process of:
/// 1. Loading the cookies and exchanging them for a session token
/// 2. Resolving the account (skipped when a `fakeid` is given)
/// 3. Paging through the article list into `{name}_articles.csv`
/// 4. Writing the run status next to the CSV
///
/// # Arguments
///
/// * `cfg` - The configuration object
/// * `target` - Search text or `fakeid` of the account
/// * `max_count` - Optional cap on the number of articles
///
/// # Returns
///
/// * `Result<CrawlSummary, AppError>` - Summary of a completed run, or the first error
///
/// # Example
///
/// ```no_run
/// use mp_crawler::config::Config;
/// use mp_crawler::utils::articles::{fetch_and_store_articles, CrawlTarget};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let cfg = Config::new();
///     let target = CrawlTarget::Search("rustlang".to_string());
///
///     let summary = fetch_and_store_articles(&cfg, &target, Some(20)).await?;
///     println!("Wrote {} articles to {}", summary.emitted, summary.output);
///
///     Ok(())
/// }
/// ```
pub async fn fetch_and_store_articles(
    cfg: &Config,
    target: &CrawlTarget,
    max_count: Option<u64>,
) -> Result<CrawlSummary, AppError> {
    let credentials = SessionCredentials::load(&cfg.credentials.cookie_file)?;
    let client = Arc::new(MpHttpClientImpl::new(&cfg.rest_api)?);
    crawl_with_client(cfg, client, credentials, target, max_count).await
}

/// Same as [`fetch_and_store_articles`] over an existing client and cookie set.
pub async fn crawl_with_client<T: MpHttpClient + 'static>(
    cfg: &Config,
    client: Arc<T>,
    credentials: SessionCredentials,
    target: &CrawlTarget,
    max_count: Option<u64>,
) -> Result<CrawlSummary, AppError> {
    let config = Arc::new(cfg.clone());
    fs::create_dir_all(&cfg.crawl.output_dir)?;

    info!("Requesting session token");
    let auth = MpAuth::new(client.clone());
    let session = auth.login(credentials).await?;

    let account = match target {
        CrawlTarget::Fakeid(id) => AccountDescriptor::from_internal_id(id),
        CrawlTarget::Search(query) => {
            info!("Requesting account info");
            AccountServiceImpl::new(config.clone(), client.clone())
                .resolve(&session, query)
                .await?
        }
    };

    let path = output_path(&cfg.crawl.output_dir, &cfg.crawl.output_pattern, &account.name);
    let mut writer = CsvArticleWriter::create(&path)?;

    let service = ArticleServiceImpl::new(config, client);
    let mut cursor = PaginationCursor::new(cfg.crawl.page_size, max_count);
    let started_at = Utc::now();
    let result = service
        .crawl(&session, &account, &mut cursor, &mut writer)
        .await;
    debug!("{} rows written to {}", writer.rows_written(), path.display());

    let summary = CrawlSummary::new(&account, &path, &cursor, started_at, result.as_ref().err());
    let status = write_status(&status_path(&path), &summary);

    match (result, status) {
        (Err(e), status) => {
            if let Err(status_err) = status {
                error!("Failed to write run status: {}", status_err);
            }
            Err(e)
        }
        (Ok(()), Err(status_err)) => Err(status_err),
        (Ok(()), Ok(())) => {
            info!(
                "Wrote {} articles of {} to {}",
                summary.emitted, account, summary.output
            );
            Ok(summary)
        }
    }
}
