/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::time::Duration;

pub(crate) const DEFAULT_BASE_URL: &str = "https://mp.weixin.qq.com";
pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:53.0) Gecko/20100101 Firefox/53.0";
pub(crate) const DEFAULT_COOKIE_FILE: &str = "raw_cookie.txt";
pub(crate) const DEFAULT_OUTPUT_PATTERN: &str = "{name}_articles.csv";

pub(crate) const SEARCH_ENDPOINT: &str = "/cgi-bin/searchbiz";
pub(crate) const LIST_ENDPOINT: &str = "/cgi-bin/appmsg";

pub(crate) const SEARCH_ACTION: &str = "search_biz";
pub(crate) const LIST_ACTION: &str = "list_ex";
/// Article type filter of the list endpoint (regular published messages).
pub(crate) const LIST_TYPE: u32 = 9;
pub(crate) const LANG: &str = "zh_CN";
pub(crate) const FORMAT_JSON: &str = "json";

pub(crate) const DEFAULT_PAGE_SIZE: u32 = 5;
pub(crate) const DEFAULT_SEARCH_COUNT: u32 = 5;
pub(crate) const DEFAULT_PAGE_DELAY_MS: u64 = 1000;
pub(crate) const DEFAULT_MAX_PAGES: u32 = 1000;
pub(crate) const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;
pub(crate) const MAX_RETRY_BACKOFF: Duration = Duration::from_secs(60);
pub(crate) const DEFAULT_REST_TIMEOUT: u64 = 30;

pub(crate) const STATUS_SUFFIX: &str = ".status.json";
