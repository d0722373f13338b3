/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/
use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::application::models::article::ArticleRecord;
use crate::error::AppError;
use crate::storage::sink::ArticleSink;

/// Streams articles into a `title,link` CSV, flushing after every row so a
/// run that dies half way leaves every row it fetched on disk.
pub struct CsvArticleWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl CsvArticleWriter<File> {
    /// Creates (or truncates) `path` and writes the header.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        debug!("Writing articles to {}", path.display());
        let file = File::create(path)?;
        Self::from_writer(file)
    }
}

impl<W: Write> CsvArticleWriter<W> {
    pub fn from_writer(inner: W) -> Result<Self, AppError> {
        let mut writer = csv::Writer::from_writer(inner);
        writer.write_record(["title", "link"])?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn into_inner(self) -> Result<W, AppError> {
        self.writer
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))
    }
}

impl<W: Write + Send> ArticleSink for CsvArticleWriter<W> {
    fn write_article(&mut self, article: &ArticleRecord) -> Result<(), AppError> {
        self.writer
            .write_record([article.title.as_str(), article.link.as_str()])?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }
}
