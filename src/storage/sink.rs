use crate::application::models::article::ArticleRecord;
use crate::error::AppError;

/// Destination of the crawled articles, written one record at a time.
#[cfg_attr(test, mockall::automock)]
pub trait ArticleSink: Send {
    fn write_article(&mut self, article: &ArticleRecord) -> Result<(), AppError>;
}

impl ArticleSink for Vec<ArticleRecord> {
    fn write_article(&mut self, article: &ArticleRecord) -> Result<(), AppError> {
        self.push(article.clone());
        Ok(())
    }
}
