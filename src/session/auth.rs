use crate::error::AuthError;
use crate::session::cookies::SessionCredentials;
use crate::session::interface::{MpAuthenticator, MpSession};
use crate::transport::http_client::MpHttpClient;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"token=(\d+)").expect("token pattern is a valid regex"));

/// Session bootstrap: trades the browser cookies for the numeric token the
/// platform embeds in the landing page redirect.
pub struct MpAuth<T: MpHttpClient> {
    client: Arc<T>,
}

impl<T: MpHttpClient> MpAuth<T> {
    pub fn new(client: Arc<T>) -> Self {
        Self { client }
    }

    /// First `token=<digits>` occurrence of the url.
    pub fn extract_token(&self, url: &str) -> Option<String> {
        TOKEN_RE
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[async_trait]
impl<T: MpHttpClient + 'static> MpAuthenticator for MpAuth<T> {
    #[instrument(skip(self, credentials))]
    async fn login(&self, credentials: SessionCredentials) -> Result<MpSession, AuthError> {
        debug!("Requesting session token with {} cookies", credentials.len());

        let url = self.client.landing_url(&credentials).await?;
        let token = match self.extract_token(&url) {
            Some(token) => token,
            None => {
                error!("No session token in landing url {}", url);
                return Err(AuthError::TokenNotFound(url));
            }
        };

        info!("Session token acquired");
        Ok(MpSession::new(credentials, token))
    }
}
