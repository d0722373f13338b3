use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::models::account::AccountDescriptor,
    application::models::article::{AppMsgListResponse, AppMsgQuery, ArticlePage},
    application::models::cursor::PaginationCursor,
    config::Config,
    constants::{LIST_ACTION, LIST_ENDPOINT, LIST_TYPE, MAX_RETRY_BACKOFF},
    error::AppError,
    session::interface::MpSession,
    storage::sink::ArticleSink,
    transport::http_client::MpHttpClient,
};

/// Paginated walk over an account's published articles.
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// One page of the list endpoint starting at `begin`.
    async fn fetch_page(
        &self,
        session: &MpSession,
        account: &AccountDescriptor,
        begin: u32,
    ) -> Result<ArticlePage, AppError>;

    /// Drives `cursor` until the stop condition and streams every article
    /// into `sink`. On error the cursor is left in the failed state with the
    /// counters of what was already written.
    async fn crawl(
        &self,
        session: &MpSession,
        account: &AccountDescriptor,
        cursor: &mut PaginationCursor,
        sink: &mut dyn ArticleSink,
    ) -> Result<(), AppError>;
}

pub struct ArticleServiceImpl<T: MpHttpClient> {
    config: Arc<Config>,
    client: Arc<T>,
}

impl<T: MpHttpClient> ArticleServiceImpl<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        Self { config, client }
    }

    /// `retry_backoff * 2^attempt`, capped at [`MAX_RETRY_BACKOFF`].
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.config
            .crawl
            .retry_backoff()
            .checked_mul(factor)
            .map_or(MAX_RETRY_BACKOFF, |delay| delay.min(MAX_RETRY_BACKOFF))
    }
}

impl<T: MpHttpClient + 'static> ArticleServiceImpl<T> {
    /// `fetch_page` with bounded exponential backoff on transient failures.
    async fn fetch_page_with_retry(
        &self,
        session: &MpSession,
        account: &AccountDescriptor,
        begin: u32,
    ) -> Result<ArticlePage, AppError> {
        let max_retries = self.config.crawl.max_retries;
        let mut attempt = 0;

        loop {
            match self.fetch_page(session, account, begin).await {
                Ok(page) => return Ok(page),
                Err(e) if e.is_transient() && attempt < max_retries => {
                    let delay = self.backoff(attempt);
                    attempt += 1;
                    warn!(
                        "Page at begin={} failed ({}), retry {}/{} in {:?}",
                        begin, e, attempt, max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e @ (AppError::Api { .. } | AppError::ListRequest { .. })) => return Err(e),
                Err(e) => {
                    return Err(AppError::ListRequest {
                        begin,
                        reason: e.to_string(),
                    })
                }
            }
        }
    }

    async fn run(
        &self,
        session: &MpSession,
        account: &AccountDescriptor,
        cursor: &mut PaginationCursor,
        sink: &mut dyn ArticleSink,
    ) -> Result<(), AppError> {
        let max_pages = self.config.crawl.max_pages;
        let delay = self.config.crawl.page_delay();

        if cursor.max_count == Some(0) {
            cursor.finish();
            return Ok(());
        }

        loop {
            if max_pages > 0 && cursor.pages >= max_pages {
                warn!(
                    "Stopping after {} pages, {} of {:?} articles emitted",
                    cursor.pages, cursor.emitted, cursor.total
                );
                return Err(AppError::TooManyPages(max_pages));
            }

            let page = self
                .fetch_page_with_retry(session, account, cursor.offset)
                .await?;
            cursor.observe_total(page.total);

            for article in &page.articles {
                debug!("{}", article.title);
                sink.write_article(article)?;
                cursor.record_article();
                if cursor.limit_reached() {
                    break;
                }
            }
            cursor.advance();

            if cursor.limit_reached() {
                cursor.finish();
                return Ok(());
            }
            if page.articles.is_empty() {
                warn!(
                    "Empty page at begin={} with {} of {} articles emitted, stopping",
                    page.begin, cursor.emitted, page.total
                );
                cursor.finish();
                return Ok(());
            }

            debug!(
                "{} of {} articles emitted, next page at begin={}",
                cursor.emitted, page.total, cursor.offset
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[async_trait]
impl<T: MpHttpClient + 'static> ArticleService for ArticleServiceImpl<T> {
    async fn fetch_page(
        &self,
        session: &MpSession,
        account: &AccountDescriptor,
        begin: u32,
    ) -> Result<ArticlePage, AppError> {
        let query = AppMsgQuery {
            action: LIST_ACTION,
            kind: LIST_TYPE,
            fakeid: &account.internal_id,
            begin,
            count: self.config.crawl.page_size,
            query: "",
        };
        let response: AppMsgListResponse = self.client.request(LIST_ENDPOINT, session, &query).await?;

        if let Some(base_resp) = &response.base_resp {
            base_resp.check()?;
        }
        let total = response.app_msg_cnt.ok_or_else(|| AppError::ListRequest {
            begin,
            reason: "response has no app_msg_cnt".to_string(),
        })?;

        debug!(
            "Page at begin={} holds {} articles, total {}",
            begin,
            response.app_msg_list.len(),
            total
        );
        Ok(ArticlePage {
            begin,
            total,
            articles: response.app_msg_list,
        })
    }

    #[instrument(skip(self, session, account, cursor, sink), fields(account = %account))]
    async fn crawl(
        &self,
        session: &MpSession,
        account: &AccountDescriptor,
        cursor: &mut PaginationCursor,
        sink: &mut dyn ArticleSink,
    ) -> Result<(), AppError> {
        info!("Requesting article list of {}", account);

        let result = self.run(session, account, cursor, sink).await;
        match &result {
            Ok(()) => info!(
                "Crawl finished: {} articles over {} pages (total {:?})",
                cursor.emitted, cursor.pages, cursor.total
            ),
            Err(e) => {
                cursor.fail();
                warn!(
                    "Crawl failed after {} articles over {} pages: {}",
                    cursor.emitted, cursor.pages, e
                );
            }
        }
        result
    }
}
