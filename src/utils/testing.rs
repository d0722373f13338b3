use crate::config::{Config, CrawlConfig, CredentialsConfig, RestApiConfig};
use crate::error::{AppError, AuthError};
use crate::session::cookies::SessionCredentials;
use crate::session::interface::MpSession;
use crate::transport::http_client::MpHttpClient;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::Mutex;

/// Configuration pointing at a mock server, without delays or retries.
pub(crate) fn create_test_config(server_url: &str) -> Config {
    Config {
        credentials: CredentialsConfig {
            cookie_file: "raw_cookie.txt".to_string(),
        },
        rest_api: RestApiConfig {
            base_url: server_url.to_string(),
            timeout: 5,
            user_agent: "test-agent".to_string(),
        },
        crawl: CrawlConfig {
            page_size: 5,
            search_count: 5,
            page_delay_ms: 0,
            max_pages: 100,
            max_retries: 0,
            retry_backoff_ms: 0,
            output_dir: ".".to_string(),
            output_pattern: "{name}_articles.csv".to_string(),
        },
    }
}

/// In-memory `MpHttpClient` replaying canned bodies (or error statuses) in
/// order and recording every endpoint query it was given.
pub(crate) struct ScriptedClient {
    landing: String,
    responses: Mutex<VecDeque<Result<String, StatusCode>>>,
    queries: Mutex<Vec<serde_json::Value>>,
}

impl ScriptedClient {
    pub(crate) fn new(responses: Vec<Result<String, StatusCode>>) -> Self {
        Self::with_landing("https://mp.weixin.qq.com/cgi-bin/home?token=1", responses)
    }

    pub(crate) fn with_landing(landing: &str, responses: Vec<Result<String, StatusCode>>) -> Self {
        Self {
            landing: landing.to_string(),
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn queries(&self) -> Vec<serde_json::Value> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MpHttpClient for ScriptedClient {
    async fn landing_url(&self, _credentials: &SessionCredentials) -> Result<String, AuthError> {
        Ok(self.landing.clone())
    }

    async fn request<Q, R>(&self, _path: &str, _session: &MpSession, query: &Q) -> Result<R, AppError>
    where
        Q: Serialize + Debug + Send + Sync,
        R: DeserializeOwned + Debug + Send,
    {
        self.queries
            .lock()
            .unwrap()
            .push(serde_json::to_value(query)?);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted client ran out of responses");
        match next {
            Ok(body) => Ok(serde_json::from_str(&body)?),
            Err(status) => Err(AppError::Unexpected(status)),
        }
    }
}
