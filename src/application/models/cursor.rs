use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Lifecycle of one paginated crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlState {
    Fetching,
    Done,
    Failed,
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlState::Fetching => write!(f, "fetching"),
            CrawlState::Done => write!(f, "done"),
            CrawlState::Failed => write!(f, "failed"),
        }
    }
}

/// Offset based cursor over the article list.
///
/// `total` is unknown until the first page arrives and is refreshed from
/// every later page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationCursor {
    pub offset: u32,
    pub page_size: u32,
    pub emitted: u64,
    pub total: Option<u64>,
    pub max_count: Option<u64>,
    pub pages: u32,
    pub state: CrawlState,
}

impl PaginationCursor {
    pub fn new(page_size: u32, max_count: Option<u64>) -> Self {
        Self {
            offset: 0,
            page_size,
            emitted: 0,
            total: None,
            max_count,
            pages: 0,
            state: CrawlState::Fetching,
        }
    }

    pub fn observe_total(&mut self, total: u64) {
        if let Some(previous) = self.total {
            if previous != total {
                warn!(
                    "Reported article count changed from {} to {} at offset {}",
                    previous, total, self.offset
                );
            }
        }
        self.total = Some(total);
    }

    pub fn record_article(&mut self) {
        self.emitted += 1;
    }

    /// True once the caller's cap or the server's total has been reached.
    pub fn limit_reached(&self) -> bool {
        let max_hit = self.max_count.is_some_and(|max| self.emitted >= max);
        let total_hit = self.total.is_some_and(|total| self.emitted >= total);
        max_hit || total_hit
    }

    pub fn advance(&mut self) {
        self.offset += self.page_size;
        self.pages += 1;
    }

    pub fn finish(&mut self) {
        self.state = CrawlState::Done;
    }

    pub fn fail(&mut self) {
        self.state = CrawlState::Failed;
    }

    /// Done through the stop condition, as opposed to a short read.
    pub fn is_complete(&self) -> bool {
        self.state == CrawlState::Done && self.limit_reached()
    }
}

#[cfg(test)]
mod tests_cursor {
    use super::*;

    #[test]
    fn test_new_cursor() {
        let cursor = PaginationCursor::new(5, None);
        assert_eq!(cursor.offset, 0);
        assert_eq!(cursor.total, None);
        assert_eq!(cursor.state, CrawlState::Fetching);
        assert!(!cursor.limit_reached());
    }

    #[test]
    fn test_limit_from_total() {
        let mut cursor = PaginationCursor::new(5, None);
        cursor.observe_total(2);
        cursor.record_article();
        assert!(!cursor.limit_reached());
        cursor.record_article();
        assert!(cursor.limit_reached());
    }

    #[test]
    fn test_limit_from_max_count_wins_when_smaller() {
        let mut cursor = PaginationCursor::new(5, Some(1));
        cursor.observe_total(10);
        cursor.record_article();
        assert!(cursor.limit_reached());
    }

    #[test]
    fn test_zero_total_is_reached_immediately() {
        let mut cursor = PaginationCursor::new(5, None);
        cursor.observe_total(0);
        assert!(cursor.limit_reached());
    }

    #[test]
    fn test_advance_moves_by_page_size() {
        let mut cursor = PaginationCursor::new(5, None);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.offset, 10);
        assert_eq!(cursor.pages, 2);
    }

    #[test]
    fn test_complete_requires_limit() {
        let mut cursor = PaginationCursor::new(5, None);
        cursor.observe_total(3);
        cursor.finish();
        assert_eq!(cursor.state, CrawlState::Done);
        assert!(!cursor.is_complete());

        cursor.emitted = 3;
        assert!(cursor.is_complete());
    }

    #[test]
    fn test_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&CrawlState::Failed).unwrap(),
            "\"failed\""
        );
    }
}
