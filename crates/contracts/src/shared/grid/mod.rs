//! Schema-driven data grid engine
//!
//! A screen describes its entity with a [`GridSchema`] and plugs a
//! [`DataSource`] in; the engine derives table columns and mode-specific forms,
//! validates required fields and coordinates paging across mutations.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::shared::grid::{GridSchema, GridSession, PaginationController};
//!
//! let schema = Arc::new(GridSchema::from_json(SCHEMA_JSON)?);
//! let session = GridSession::new(schema, data_source, controller);
//! session.mount().await;
//!
//! let mut form = session.open_create();
//! form.change("originalText", "hello");
//! if let Ok(submission) = form.save() {
//!     session.commit(submission).await?;
//! }
//! ```
//!
//! Everything here is plain Rust with no browser dependency; the frontend only
//! renders what these types describe.

mod config;
mod data_source;
mod endpoint;
mod error;
mod form;
mod mode_resolver;
mod pagination;
mod record;
mod schema;
mod session;
mod sort;
mod transport;
mod widget;

pub use config::{load_config, ApiSection, GridConfig, GridSection, DEFAULT_CONFIG};
pub use data_source::{ColumnFilter, DataSource, PageFilter};
pub use endpoint::{parse_count, EndpointDataSource, EntityRoutes};
pub use error::{GridError, SchemaError, TransportError, ValidationError};
pub use form::{DynamicForm, FormStatus, FormSubmission};
pub use mode_resolver::{required_columns, resolve, resolve_columns, ResolvedColumn};
pub use pagination::{
    fetch_page, Completion, LoadStatus, PageData, PageQuery, PaginationController,
    PaginationState,
};
pub use record::{FieldValue, RecordEntity};
pub use schema::{
    ColumnDescriptor, GridSchema, Mode, ModeRule, SortHint, WidgetKind, WidgetSpec,
    DEFAULT_DATE_PATTERN, DEFAULT_INPUT_TYPE,
};
pub use session::{ControllerCell, GridSession, PendingDelete};
pub use sort::{sort_rows, SortDirection, SortState};
pub use transport::{AjaxConfig, HttpMethod, Payload, Transport};
pub use widget::{
    coerce_change, dispatch, dropdown_options, format_for_pattern, pattern_has_time,
    pattern_to_chrono, select_option, DropdownOption, FieldControl, WidgetControl,
};
