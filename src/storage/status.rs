use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::application::models::account::AccountDescriptor;
use crate::application::models::cursor::{CrawlState, PaginationCursor};
use crate::error::AppError;

/// Outcome of a run, persisted next to the CSV so a truncated file can be
/// told apart from a complete one.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub account: AccountDescriptor,
    pub output: String,
    pub emitted: u64,
    pub pages: u32,
    pub total: Option<u64>,
    pub state: CrawlState,
    pub complete: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl CrawlSummary {
    pub fn new(
        account: &AccountDescriptor,
        output: &Path,
        cursor: &PaginationCursor,
        started_at: DateTime<Utc>,
        error: Option<&AppError>,
    ) -> Self {
        Self {
            account: account.clone(),
            output: output.display().to_string(),
            emitted: cursor.emitted,
            pages: cursor.pages,
            total: cursor.total,
            state: cursor.state,
            complete: error.is_none() && cursor.is_complete(),
            started_at,
            finished_at: Utc::now(),
            error: error.map(ToString::to_string),
        }
    }
}

pub fn write_status(path: &Path, summary: &CrawlSummary) -> Result<(), AppError> {
    debug!("Writing run status to {}", path.display());
    write_summary(File::create(path)?, summary)
}

fn write_summary<W: Write>(inner: W, summary: &CrawlSummary) -> Result<(), AppError> {
    let mut writer = BufWriter::new(inner);
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writer.flush()?;
    Ok(())
}
