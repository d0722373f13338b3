use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    application::models::account::{AccountDescriptor, AccountEntry, SearchBizQuery, SearchBizResponse},
    application::services::selection::{FirstMatch, SelectionPolicy},
    config::Config,
    constants::{SEARCH_ACTION, SEARCH_ENDPOINT},
    error::AppError,
    session::interface::MpSession,
    transport::http_client::MpHttpClient,
};

/// Account lookup through the platform's search endpoint.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Raw search hits for `query`, best match first.
    async fn search(&self, session: &MpSession, query: &str) -> Result<Vec<AccountEntry>, AppError>;

    /// Resolves `query` to a single account using the configured selection policy.
    async fn resolve(&self, session: &MpSession, query: &str) -> Result<AccountDescriptor, AppError>;
}

pub struct AccountServiceImpl<T: MpHttpClient> {
    config: Arc<Config>,
    client: Arc<T>,
    policy: Box<dyn SelectionPolicy>,
}

impl<T: MpHttpClient> AccountServiceImpl<T> {
    pub fn new(config: Arc<Config>, client: Arc<T>) -> Self {
        Self::with_policy(config, client, Box::new(FirstMatch))
    }

    pub fn with_policy(config: Arc<Config>, client: Arc<T>, policy: Box<dyn SelectionPolicy>) -> Self {
        Self {
            config,
            client,
            policy,
        }
    }
}

#[async_trait]
impl<T: MpHttpClient + 'static> AccountService for AccountServiceImpl<T> {
    async fn search(&self, session: &MpSession, query: &str) -> Result<Vec<AccountEntry>, AppError> {
        info!("Searching account {:?}", query);

        let search_query = SearchBizQuery {
            action: SEARCH_ACTION,
            query,
            begin: 0,
            count: self.config.crawl.search_count,
        };
        let response: SearchBizResponse = self
            .client
            .request(SEARCH_ENDPOINT, session, &search_query)
            .await?;

        if let Some(base_resp) = &response.base_resp {
            base_resp.check()?;
        }

        let list = response.list.unwrap_or_default();
        debug!(
            "Search returned {} accounts (total {:?})",
            list.len(),
            response.total
        );
        Ok(list)
    }

    async fn resolve(&self, session: &MpSession, query: &str) -> Result<AccountDescriptor, AppError> {
        let candidates = self.search(session, query).await?;
        if candidates.len() > 1 {
            debug!(
                "{} accounts match {:?}, selecting with {:?}",
                candidates.len(),
                query,
                self.policy
            );
        }

        match self.policy.select(query, &candidates) {
            Some(entry) => {
                let account = AccountDescriptor::from(entry);
                info!("Resolved {:?} to {} [{}]", query, account, account.internal_id);
                Ok(account)
            }
            None => {
                warn!("No account found for {:?}", query);
                Err(AppError::AccountNotFound(query.to_string()))
            }
        }
    }
}
