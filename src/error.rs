/******************************************************************************
    Author: Joaquín Béjar García
    Email: jb@taunais.com
    Date: 14/10/26
 ******************************************************************************/
use reqwest::StatusCode;
use std::fmt::{Display, Formatter};
use std::{fmt, io};

/// Failures of the session bootstrap: reading the cookie file and mining the token.
#[derive(Debug)]
pub enum AuthError {
    Network(reqwest::Error),
    Io(io::Error),
    MalformedCredentials(String),
    TokenNotFound(String),
    Unexpected(StatusCode),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Network(e) => write!(f, "network error: {e}"),
            AuthError::Io(e) => write!(f, "io error: {e}"),
            AuthError::MalformedCredentials(entry) => {
                write!(f, "malformed credentials: entry {entry:?} has no '='")
            }
            AuthError::TokenNotFound(url) => write!(f, "session token not found in url: {url}"),
            AuthError::Unexpected(s) => write!(f, "unexpected http status: {s}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Network(e)
    }
}
impl From<io::Error> for AuthError {
    fn from(e: io::Error) -> Self {
        AuthError::Io(e)
    }
}

#[derive(Debug)]
pub enum AppError {
    Auth(AuthError),
    Network(reqwest::Error),
    Io(io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    Unexpected(StatusCode),
    Api { ret: i64, message: String },
    AccountNotFound(String),
    ListRequest { begin: u32, reason: String },
    TooManyPages(u32),
    Usage(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Auth(e) => write!(f, "auth error: {e}"),
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Io(e) => write!(f, "io error: {e}"),
            AppError::Json(e) => write!(f, "json error: {e}"),
            AppError::Csv(e) => write!(f, "csv error: {e}"),
            AppError::Unexpected(s) => write!(f, "unexpected http status: {s}"),
            AppError::Api { ret, message } => write!(f, "api error {ret}: {message}"),
            AppError::AccountNotFound(query) => write!(f, "no account found for {query:?}"),
            AppError::ListRequest { begin, reason } => {
                write!(f, "article list request failed at begin={begin}: {reason}")
            }
            AppError::TooManyPages(limit) => {
                write!(f, "gave up after {limit} pages without reaching the reported total")
            }
            AppError::Usage(msg) => write!(f, "usage error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}
impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Io(e)
    }
}
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}
impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Csv(e)
    }
}
impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl AppError {
    /// Failures worth another attempt: connection level errors, 5xx and 429.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            AppError::Unexpected(s) => s.is_server_error() || *s == StatusCode::TOO_MANY_REQUESTS,
            _ => false,
        }
    }
}
