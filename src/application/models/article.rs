use serde::{Deserialize, Serialize};

use super::common::BaseResp;

/// Unit of output: one row of the CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub link: String,
}

/// Response of `/cgi-bin/appmsg`
#[derive(Debug, Clone, Deserialize)]
pub struct AppMsgListResponse {
    /// Total number of articles the account has, as reported by the server.
    #[serde(default)]
    pub app_msg_cnt: Option<u64>,
    #[serde(default)]
    pub app_msg_list: Vec<ArticleRecord>,
    #[serde(default)]
    pub base_resp: Option<BaseResp>,
}

/// Endpoint specific query of `/cgi-bin/appmsg`.
#[derive(Debug, Serialize)]
pub struct AppMsgQuery<'a> {
    pub action: &'a str,
    #[serde(rename = "type")]
    pub kind: u32,
    pub fakeid: &'a str,
    pub begin: u32,
    pub count: u32,
    pub query: &'a str,
}

/// One decoded page of the article list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePage {
    pub begin: u32,
    pub total: u64,
    pub articles: Vec<ArticleRecord>,
}
