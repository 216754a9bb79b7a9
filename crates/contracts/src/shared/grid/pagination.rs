//! Pagination controller: count/page fetch coordination and page clamping
//!
//! The controller never performs I/O itself. Every state change that needs
//! data hands out a [`PageQuery`] tagged with a ticket; the caller runs it
//! against a [`DataSource`] and reports back through
//! [`PaginationController::complete`]. Only the most recently issued ticket is
//! accepted, so a slow response for an old page size or filter can never
//! overwrite a newer result.

use super::data_source::{ColumnFilter, DataSource, PageFilter};
use super::error::TransportError;
use super::record::RecordEntity;

/// Page window and totals. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_records: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_records: 0,
        }
    }

    /// `ceil(total_records / page_size)`, 0 when there are no records
    pub fn total_pages(&self) -> usize {
        self.total_records.div_ceil(self.page_size)
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    Error,
}

/// One count+page fetch the caller must execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub ticket: u64,
    pub filter: PageFilter,
}

/// Result of a successful count+page pair
#[derive(Debug, Clone, PartialEq)]
pub struct PageData {
    pub total_records: usize,
    pub rows: Vec<RecordEntity>,
}

/// What the controller did with a reported outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Rows and totals now reflect the response
    Applied,
    /// The count shrank below the current page; run this corrective query
    Refetch(PageQuery),
    /// The response belongs to a superseded query and was dropped
    Stale,
    /// The fetch failed; previous rows and totals are kept
    Failed(TransportError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationController {
    /// Window and totals of the rows on screen
    state: PaginationState,
    status: LoadStatus,
    rows: Vec<RecordEntity>,
    /// Filters the rows on screen were fetched with
    filters: Vec<ColumnFilter>,
    /// What the next query asks for; reset to the shown window when a fetch fails
    target: PageFilter,
    last_ticket: u64,
    pending: Option<u64>,
    error: Option<String>,
}

impl PaginationController {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: PaginationState::new(page_size),
            status: LoadStatus::Idle,
            rows: Vec::new(),
            filters: Vec::new(),
            target: PageFilter::new(1, page_size),
            last_ticket: 0,
            pending: None,
            error: None,
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn rows(&self) -> &[RecordEntity] {
        &self.rows
    }

    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    /// Message of the last failed fetch, cleared by the next successful one
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn shown(&self) -> PageFilter {
        PageFilter::new(self.state.current_page, self.state.page_size)
            .with_filters(self.filters.clone())
    }

    fn issue(&mut self) -> PageQuery {
        self.last_ticket += 1;
        self.pending = Some(self.last_ticket);
        self.status = LoadStatus::Loading;
        PageQuery {
            ticket: self.last_ticket,
            filter: self.target.clone(),
        }
    }

    /// Initial load
    pub fn mount(&mut self) -> PageQuery {
        self.issue()
    }

    /// Reload the current page, e.g. after a create, update or delete
    pub fn refresh(&mut self) -> PageQuery {
        self.issue()
    }

    /// Moves to `page` (clamped into range). `None` when nothing changes.
    pub fn set_page(&mut self, page: usize) -> Option<PageQuery> {
        let total_pages = self.state.total_pages();
        let mut page = page.max(1);
        if total_pages >= 1 {
            page = page.min(total_pages);
        }
        if page == self.target.page {
            return None;
        }
        self.target.page = page;
        Some(self.issue())
    }

    /// New page size; starts over at page 1
    pub fn set_page_size(&mut self, page_size: usize) -> Option<PageQuery> {
        let page_size = page_size.max(1);
        if page_size == self.target.page_size {
            return None;
        }
        self.target.page_size = page_size;
        self.target.page = 1;
        Some(self.issue())
    }

    /// New column filters; starts over at page 1
    pub fn set_filters(&mut self, filters: Vec<ColumnFilter>) -> PageQuery {
        self.target.filters = filters;
        self.target.page = 1;
        self.issue()
    }

    /// Reports the outcome of `query`.
    ///
    /// Page, size and filters of the query become visible only together with
    /// its rows. A failure keeps what is shown and points later queries back at it.
    pub fn complete(
        &mut self,
        query: &PageQuery,
        outcome: Result<PageData, TransportError>,
    ) -> Completion {
        if self.pending != Some(query.ticket) {
            log::debug!(
                "dropping stale page response (ticket {}, page {}, size {})",
                query.ticket,
                query.filter.page,
                query.filter.page_size
            );
            return Completion::Stale;
        }

        let data = match outcome {
            Ok(data) => data,
            Err(e) => {
                log::error!("page fetch failed: {}", e);
                self.pending = None;
                self.status = LoadStatus::Error;
                self.error = Some(e.to_string());
                self.target = self.shown();
                return Completion::Failed(e);
            }
        };

        let page_size = query.filter.page_size;
        let total_pages = data.total_records.div_ceil(page_size);

        if total_pages >= 1 && query.filter.page > total_pages {
            log::info!(
                "page {} is past the last page {}, reloading",
                query.filter.page,
                total_pages
            );
            self.target.page = total_pages;
            return Completion::Refetch(self.issue());
        }

        self.state = PaginationState {
            current_page: if total_pages == 0 { 1 } else { query.filter.page },
            page_size,
            total_records: data.total_records,
        };
        self.filters = query.filter.filters.clone();
        self.target = self.shown();
        self.rows = data.rows;
        self.pending = None;
        self.status = LoadStatus::Loaded;
        self.error = None;
        Completion::Applied
    }
}

/// Runs the count then the page request of one query
pub async fn fetch_page<D>(source: &D, filter: &PageFilter) -> Result<PageData, TransportError>
where
    D: DataSource + ?Sized,
{
    let total_records = source.select_count(filter).await?;
    let rows = source.select_page(filter).await?;
    Ok(PageData {
        total_records,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::grid::record::FieldValue;

    fn rows(n: usize) -> Vec<RecordEntity> {
        (0..n)
            .map(|i| [("id", FieldValue::from(format!("r-{i}")))].into_iter().collect())
            .collect()
    }

    fn loaded(total: usize, page_rows: usize) -> Result<PageData, TransportError> {
        Ok(PageData {
            total_records: total,
            rows: rows(page_rows),
        })
    }

    #[test]
    fn test_total_pages() {
        let mut s = PaginationState::new(10);
        assert_eq!(s.total_pages(), 0);
        s.total_records = 23;
        assert_eq!(s.total_pages(), 3);
        s.total_records = 20;
        assert_eq!(s.total_pages(), 2);
        assert_eq!(PaginationState::new(0).page_size, 1);
    }

    #[test]
    fn test_mount_loads_first_page() {
        let mut c = PaginationController::new(10);
        assert_eq!(c.status(), LoadStatus::Idle);
        let q = c.mount();
        assert_eq!(q.filter.page, 1);
        assert!(c.is_loading());
        assert_eq!(c.complete(&q, loaded(23, 10)), Completion::Applied);
        assert_eq!(c.status(), LoadStatus::Loaded);
        assert_eq!(c.rows().len(), 10);
        assert_eq!(c.state().total_pages(), 3);
    }

    #[test]
    fn test_clamp_after_shrinking_count() {
        let mut c = PaginationController::new(10);
        let q = c.mount();
        c.complete(&q, loaded(23, 10));
        let q = c.set_page(3).unwrap();
        c.complete(&q, loaded(23, 3));
        assert_eq!(c.state().current_page, 3);

        // a delete brings the total down to 20
        let q = c.refresh();
        let corrective = match c.complete(&q, loaded(20, 0)) {
            Completion::Refetch(next) => next,
            other => panic!("expected refetch, got {other:?}"),
        };
        assert_eq!(corrective.filter.page, 2);
        assert!(c.is_loading());

        assert_eq!(c.complete(&corrective, loaded(20, 10)), Completion::Applied);
        assert_eq!(c.state().current_page, 2);
        assert_eq!(c.rows().len(), 10);
    }

    #[test]
    fn test_empty_result_resets_to_first_page() {
        let mut c = PaginationController::new(10);
        let q = c.mount();
        c.complete(&q, loaded(15, 10));
        let q = c.set_page(2).unwrap();
        assert_eq!(c.complete(&q, loaded(0, 0)), Completion::Applied);
        assert_eq!(c.state().current_page, 1);
        assert_eq!(c.state().total_pages(), 0);
        assert!(c.rows().is_empty());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut c = PaginationController::new(10);
        let first = c.mount();
        let second = c.set_page_size(20).unwrap();
        assert_eq!(second.filter.page, 1);
        assert_eq!(second.filter.page_size, 20);

        // newer response lands first, the old one after it
        assert_eq!(c.complete(&second, loaded(30, 20)), Completion::Applied);
        assert_eq!(c.complete(&first, loaded(30, 10)), Completion::Stale);

        assert_eq!(c.rows().len(), 20);
        assert_eq!(c.state().page_size, 20);
    }

    #[test]
    fn test_superseded_response_arriving_first_is_discarded() {
        let mut c = PaginationController::new(10);
        let first = c.mount();
        let second = c.set_page_size(20).unwrap();
        assert_eq!(c.complete(&first, loaded(30, 10)), Completion::Stale);
        assert!(c.is_loading());
        assert_eq!(c.complete(&second, loaded(30, 20)), Completion::Applied);
        assert_eq!(c.rows().len(), 20);
    }

    #[test]
    fn test_failure_keeps_stale_data() {
        let mut c = PaginationController::new(10);
        let q = c.mount();
        c.complete(&q, loaded(23, 10));
        let q = c.set_page(2).unwrap();
        let outcome = c.complete(&q, Err(TransportError::Network("offline".into())));
        assert!(matches!(outcome, Completion::Failed(_)));
        assert_eq!(c.status(), LoadStatus::Error);
        assert_eq!(c.rows().len(), 10);
        assert_eq!(c.state().total_records, 23);
        assert_eq!(c.state().current_page, 1);
        assert_eq!(c.error(), Some("request failed: offline"));

        // the retry asks for what is on screen, not the failed target
        let q = c.refresh();
        assert_eq!(q.filter.page, 1);
        c.complete(&q, loaded(23, 10));
        assert!(c.error().is_none());
    }

    #[test]
    fn test_failed_size_and_filter_change_roll_back() {
        let mut c = PaginationController::new(10);
        let q = c.mount();
        c.complete(&q, loaded(40, 10));
        let q = c.set_page(3).unwrap();
        c.complete(&q, loaded(40, 10));

        let q = c.set_page_size(20).unwrap();
        c.complete(&q, Err(TransportError::Network("offline".into())));
        assert_eq!(c.state().page_size, 10);
        assert_eq!(c.state().current_page, 3);

        let q = c.set_filters(vec![ColumnFilter::new("OriginalText", "hi")]);
        assert_eq!(q.filter.page_size, 10);
        c.complete(&q, Err(TransportError::Network("offline".into())));
        assert!(c.filters().is_empty());
        assert_eq!(c.state().current_page, 3);

        let q = c.refresh();
        assert_eq!(q.filter, PageFilter::new(3, 10));
    }

    #[test]
    fn test_set_page_is_clamped_and_idempotent() {
        let mut c = PaginationController::new(10);
        let q = c.mount();
        c.complete(&q, loaded(23, 10));
        assert!(c.set_page(1).is_none());
        assert_eq!(c.set_page(9).unwrap().filter.page, 3);
        assert!(c.set_page_size(10).is_none());
    }

    #[test]
    fn test_filters_reset_page() {
        let mut c = PaginationController::new(10);
        let q = c.mount();
        c.complete(&q, loaded(40, 10));
        c.set_page(3);
        let q = c.set_filters(vec![ColumnFilter::new("CreatedByUserId", "u-1")]);
        assert_eq!(q.filter.page, 1);
        assert_eq!(q.filter.filters.len(), 1);
        assert!(c.filters().is_empty());

        c.complete(&q, loaded(5, 5));
        assert_eq!(c.filters().len(), 1);
        assert_eq!(c.state().current_page, 1);
    }
}
