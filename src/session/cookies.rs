/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use crate::error::AuthError;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Cookie jar copied out of a logged-in browser session.
///
/// Entries keep the order of the source file so the `Cookie` header is sent
/// back exactly as the browser had it. A repeated name overwrites the earlier
/// value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    cookies: Vec<(String, String)>,
}

impl SessionCredentials {
    /// Parses `name1=value1; name2=value2; ...`.
    ///
    /// Empty entries (a trailing `;` or newline) are skipped. Only the first
    /// `=` separates name from value, so values may contain `=`.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let mut cookies: Vec<(String, String)> = Vec::new();

        for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, value) = entry
                .split_once('=')
                .ok_or_else(|| AuthError::MalformedCredentials(entry.to_string()))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(AuthError::MalformedCredentials(entry.to_string()));
            }

            match cookies.iter_mut().find(|(n, _)| n == name) {
                Some(existing) => existing.1 = value.to_string(),
                None => cookies.push((name.to_string(), value.to_string())),
            }
        }

        if cookies.is_empty() {
            return Err(AuthError::MalformedCredentials(raw.trim().to_string()));
        }

        Ok(Self { cookies })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AuthError> {
        let path = path.as_ref();
        debug!("Reading cookies from {}", path.display());
        let raw = fs::read_to_string(path)?;
        let credentials = Self::parse(&raw)?;
        debug!("Loaded {} cookies", credentials.len());
        Ok(credentials)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.iter().map(|(n, _)| n.as_str())
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(n, v)| format!("{n}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .cookies
            .iter()
            .map(|(n, _)| format!("\"{n}\":\"[REDACTED]\""))
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{{{entries}}}")
    }
}
