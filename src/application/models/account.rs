/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use serde::{Deserialize, Serialize};
use std::fmt;

use super::common::BaseResp;

/// Account whose articles are crawled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDescriptor {
    /// Display name, also used to name the output file.
    pub name: String,
    /// Public alias (the account's WeChat id), may be empty.
    pub public_id: String,
    /// `fakeid` expected by the list endpoint.
    pub internal_id: String,
}

impl AccountDescriptor {
    /// Descriptor for a caller supplied `fakeid`; no lookup happens, so the id
    /// doubles as name and alias.
    pub fn from_internal_id(id: &str) -> Self {
        Self {
            name: id.to_string(),
            public_id: id.to_string(),
            internal_id: id.to_string(),
        }
    }
}

impl From<&AccountEntry> for AccountDescriptor {
    fn from(entry: &AccountEntry) -> Self {
        Self {
            name: entry.nickname.clone(),
            public_id: entry.alias.clone().unwrap_or_default(),
            internal_id: entry.fakeid.clone(),
        }
    }
}

impl fmt::Display for AccountDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.public_id)
    }
}

/// One hit of the account search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AccountEntry {
    pub nickname: String,
    #[serde(default)]
    pub alias: Option<String>,
    pub fakeid: String,
}

/// Response of `/cgi-bin/searchbiz`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBizResponse {
    #[serde(default)]
    pub list: Option<Vec<AccountEntry>>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub base_resp: Option<BaseResp>,
}

/// Endpoint specific query of `/cgi-bin/searchbiz`.
#[derive(Debug, Serialize)]
pub struct SearchBizQuery<'a> {
    pub action: &'a str,
    pub query: &'a str,
    pub begin: u32,
    pub count: u32,
}
