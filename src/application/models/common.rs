use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Status block the platform attaches to every JSON response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseResp {
    #[serde(default)]
    pub ret: i64,
    #[serde(default)]
    pub err_msg: Option<String>,
}

impl BaseResp {
    /// `ret == 0` means success; anything else (e.g. `200013`, frequency
    /// control) is surfaced as an API error.
    pub fn check(&self) -> Result<(), AppError> {
        if self.ret == 0 {
            return Ok(());
        }
        Err(AppError::Api {
            ret: self.ret,
            message: self.err_msg.clone().unwrap_or_default(),
        })
    }
}
