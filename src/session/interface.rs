use crate::error::AuthError;
use crate::session::cookies::SessionCredentials;
use std::fmt;

/// Authenticated context shared by every API call of a run.
#[derive(Debug, Clone)]
pub struct MpSession {
    pub credentials: SessionCredentials,
    pub token: String,
}

impl MpSession {
    pub fn new(credentials: SessionCredentials, token: impl Into<String>) -> Self {
        Self {
            credentials,
            token: token.into(),
        }
    }
}

impl fmt::Display for MpSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"credentials\":{},\"token\":\"{}\"}}",
            self.credentials, self.token
        )
    }
}

#[async_trait::async_trait]
pub trait MpAuthenticator: Send + Sync {
    async fn login(&self, credentials: SessionCredentials) -> Result<MpSession, AuthError>;
}
