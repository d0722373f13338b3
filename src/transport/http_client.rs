use crate::config::RestApiConfig;
use crate::constants::{FORMAT_JSON, LANG};
use crate::error::{AppError, AuthError};
use crate::session::cookies::SessionCredentials;
use crate::session::interface::MpSession;
use async_trait::async_trait;
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Query parameters every API call carries besides its own.
#[derive(Debug, Serialize)]
struct CommonParams<'a> {
    token: &'a str,
    lang: &'a str,
    f: &'a str,
    ajax: u8,
    /// Cache buster.
    random: f64,
}

#[async_trait]
pub trait MpHttpClient: Send + Sync {
    /// Requests the landing page with nothing but the cookies attached and
    /// returns the URL the redirects end on.
    async fn landing_url(&self, credentials: &SessionCredentials) -> Result<String, AuthError>;

    /// Authenticated GET against an API endpoint, decoding the JSON body.
    async fn request<Q, R>(&self, path: &str, session: &MpSession, query: &Q) -> Result<R, AppError>
    where
        Q: Serialize + Debug + Send + Sync,
        R: DeserializeOwned + Debug + Send;
}

/// Represents the HTTP client for the platform's JSON endpoints.
#[derive(Debug)]
pub struct MpHttpClientImpl {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl MpHttpClientImpl {
    /// Creates a new client from the REST section of the configuration.
    ///
    /// Redirects are followed (reqwest's default policy), which is what the
    /// landing page relies on to expose the session token.
    pub fn new(rest_api: &RestApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(rest_api.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: rest_api.base_url.trim_end_matches('/').to_string(),
            user_agent: rest_api.user_agent.clone(),
        })
    }

    async fn handle_response<T: DeserializeOwned + Debug>(response: Response) -> Result<T, AppError> {
        let status = response.status();
        let body_text = response.text().await?;

        debug!("Response Status: {}", status);
        debug!("Response Body: {}", body_text);

        if status.is_success() {
            let body: T = serde_json::from_str(&body_text)?;
            Ok(body)
        } else {
            error!(
                "API request failed. Status: {}, Body: {}",
                status, body_text
            );
            Err(AppError::Unexpected(status))
        }
    }
}

#[async_trait]
impl MpHttpClient for MpHttpClientImpl {
    #[instrument(skip(self, credentials))]
    async fn landing_url(&self, credentials: &SessionCredentials) -> Result<String, AuthError> {
        debug!("Sending GET request to {}", self.base_url);

        let response = self
            .client
            .get(&self.base_url)
            .header(header::COOKIE, credentials.cookie_header())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!("Landing page request failed. Status: {}", status);
            return Err(AuthError::Unexpected(status));
        }

        let url = response.url().to_string();
        debug!("Landing page resolved to {}", url);
        Ok(url)
    }

    #[instrument(skip(self, session))]
    async fn request<Q, R>(&self, path: &str, session: &MpSession, query: &Q) -> Result<R, AppError>
    where
        Q: Serialize + Debug + Send + Sync,
        R: DeserializeOwned + Debug + Send,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Sending GET request to {}", url);

        let common = CommonParams {
            token: &session.token,
            lang: LANG,
            f: FORMAT_JSON,
            ajax: 1,
            random: rand::random::<f64>(),
        };

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::COOKIE, session.credentials.cookie_header())
            .query(&common)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send GET request: {:?}", e);
                AppError::Network(e)
            })?;

        Self::handle_response(response).await
    }
}

impl fmt::Display for MpHttpClientImpl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{\"base_url\":\"{}\"}}", self.base_url)
    }
}
