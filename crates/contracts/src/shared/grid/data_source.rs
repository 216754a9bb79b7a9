//! Data source contract every grid screen plugs into
//!
//! The grid and its pagination only ever talk to a [`DataSource`]; which
//! backend, routes or DTOs sit behind it is the screen's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::TransportError;
use super::record::RecordEntity;

/// Server-side column filter, sent JSON-encoded as `filterByColumns`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFilter {
    pub column_name: String,
    pub filter_value: String,
}

impl ColumnFilter {
    pub fn new(column_name: &str, filter_value: impl Into<String>) -> Self {
        Self {
            column_name: column_name.to_string(),
            filter_value: filter_value.into(),
        }
    }

    /// Filter on a record field; the backend names columns in PascalCase
    /// (`originalText` -> `OriginalText`)
    pub fn for_field(field: &str, filter_value: impl Into<String>) -> Self {
        let mut chars = field.chars();
        let column_name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self {
            column_name,
            filter_value: filter_value.into(),
        }
    }
}

/// Page window plus optional column filters (pages are 1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFilter {
    pub page: usize,
    pub page_size: usize,
    pub filters: Vec<ColumnFilter>,
}

impl PageFilter {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            filters: Vec::new(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<ColumnFilter>) -> Self {
        self.filters = filters;
        self
    }

    /// Zero-based index of the first row on this page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

/// Asynchronous CRUD capability set of one entity type.
///
/// Futures are not `Send`: the engine runs on a single cooperative thread
/// (the browser event loop).
#[async_trait(?Send)]
pub trait DataSource {
    /// Rows of one page, in server order
    async fn select_page(&self, filter: &PageFilter) -> Result<Vec<RecordEntity>, TransportError>;

    /// Total rows matching the filter (page window ignored)
    async fn select_count(&self, filter: &PageFilter) -> Result<usize, TransportError>;

    /// Persists a draft. Implementations must not submit an `id`.
    async fn create(&self, draft: RecordEntity) -> Result<RecordEntity, TransportError>;

    /// Persists an edited record, `id` included
    async fn update(&self, record: RecordEntity) -> Result<RecordEntity, TransportError>;

    async fn delete(&self, id: &str) -> Result<(), TransportError>;

    /// Blank draft with schema defaults and static values applied
    fn new_entity(&self) -> RecordEntity;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_filter_clamps_to_one() {
        let f = PageFilter::new(0, 0);
        assert_eq!((f.page, f.page_size), (1, 1));
        assert_eq!(PageFilter::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_filter_for_field_uses_backend_column_name() {
        assert_eq!(ColumnFilter::for_field("originalText", "hi").column_name, "OriginalText");
        assert_eq!(ColumnFilter::for_field("", "x").column_name, "");
    }

    #[test]
    fn test_column_filter_wire_shape() {
        let json = serde_json::to_string(&[ColumnFilter::new("CreatedByUserId", "u-1")]).unwrap();
        assert_eq!(json, r#"[{"columnName":"CreatedByUserId","filterValue":"u-1"}]"#);
    }
}
