//! Headless grid: wires a schema, a data source and a pagination controller
//! into the user-facing flows (browse, create, edit, delete).
//!
//! Each flow is sequential: a mutation's refresh starts only after the
//! mutation has completed. Independent flows may overlap; the controller's
//! ticket check sorts out which response wins.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use super::data_source::{ColumnFilter, DataSource};
use super::error::GridError;
use super::form::{DynamicForm, FormSubmission};
use super::mode_resolver::{resolve, ResolvedColumn};
use super::pagination::{fetch_page, Completion, PageQuery, PaginationController};
use super::record::RecordEntity;
use super::schema::{GridSchema, Mode};

/// Shared owner of the controller. Returns `None` once the owner is gone
/// (e.g. the screen was unmounted), in which case responses are dropped.
pub trait ControllerCell {
    fn with_controller<R>(&self, f: impl FnOnce(&mut PaginationController) -> R) -> Option<R>;
}

impl ControllerCell for Rc<RefCell<PaginationController>> {
    fn with_controller<R>(&self, f: impl FnOnce(&mut PaginationController) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Row awaiting delete confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    /// First visible column value, for the confirmation text
    pub label: String,
}

#[derive(Clone)]
pub struct GridSession<C> {
    schema: Arc<GridSchema>,
    source: Rc<dyn DataSource>,
    controller: C,
}

impl<C: ControllerCell> GridSession<C> {
    pub fn new(schema: Arc<GridSchema>, source: Rc<dyn DataSource>, controller: C) -> Self {
        Self {
            schema,
            source,
            controller,
        }
    }

    pub fn schema(&self) -> &Arc<GridSchema> {
        &self.schema
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Table columns: the retrieve-mode view of the schema
    pub fn display_columns(&self) -> Vec<ResolvedColumn> {
        resolve(&self.schema, Mode::Retrieve)
    }

    /// Executes `query` and any corrective query the clamp asks for
    async fn run(&self, query: Option<PageQuery>) {
        let mut next = query;
        while let Some(query) = next.take() {
            log::debug!(
                "loading page {} (size {}, ticket {})",
                query.filter.page,
                query.filter.page_size,
                query.ticket
            );
            let outcome = fetch_page(self.source.as_ref(), &query.filter).await;
            let completion = self.controller.with_controller(|c| c.complete(&query, outcome));
            if let Some(Completion::Refetch(corrective)) = completion {
                next = Some(corrective);
            }
        }
    }

    pub async fn mount(&self) {
        let query = self.controller.with_controller(|c| c.mount());
        self.run(query).await;
    }

    pub async fn refresh(&self) {
        let query = self.controller.with_controller(|c| c.refresh());
        self.run(query).await;
    }

    pub async fn change_page(&self, page: usize) {
        let query = self.controller.with_controller(|c| c.set_page(page)).flatten();
        self.run(query).await;
    }

    pub async fn change_page_size(&self, page_size: usize) {
        let query = self
            .controller
            .with_controller(|c| c.set_page_size(page_size))
            .flatten();
        self.run(query).await;
    }

    pub async fn apply_filters(&self, filters: Vec<ColumnFilter>) {
        let query = self.controller.with_controller(|c| c.set_filters(filters));
        self.run(query).await;
    }

    /// Create form seeded with a fresh draft
    pub fn open_create(&self) -> DynamicForm {
        DynamicForm::open_create(self.schema.clone(), &self.source.new_entity())
    }

    /// Update form seeded with a copy of `row`
    pub fn open_edit(&self, row: &RecordEntity) -> DynamicForm {
        DynamicForm::open_update(self.schema.clone(), row)
    }

    /// Sends a saved form to the data source, then reloads the current page.
    ///
    /// Drafts lose their `id` before submission. A transport failure is
    /// returned as is and triggers no reload.
    pub async fn commit(&self, submission: FormSubmission) -> Result<RecordEntity, GridError> {
        let result = match submission.mode {
            Mode::Create => self.source.create(submission.record.without_id()).await,
            Mode::Update | Mode::Retrieve => self.source.update(submission.record).await,
        };

        match result {
            Ok(saved) => {
                log::info!("{} succeeded", submission.mode);
                self.refresh().await;
                Ok(saved)
            }
            Err(e) => {
                log::error!("{} failed: {}", submission.mode, e);
                Err(e.into())
            }
        }
    }

    /// First step of a delete. Rows without an identity cannot be deleted.
    pub fn request_delete(&self, row: &RecordEntity) -> Option<PendingDelete> {
        let id = row.id()?;
        let label = self
            .display_columns()
            .first()
            .map(|c| row.text(&c.field))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| id.clone());
        Some(PendingDelete { id, label })
    }

    /// Confirmed delete followed by a reload of the current page
    pub async fn confirm_delete(&self, pending: PendingDelete) -> Result<(), GridError> {
        match self.source.delete(&pending.id).await {
            Ok(()) => {
                log::info!("deleted record {}", pending.id);
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                log::error!("delete of {} failed: {}", pending.id, e);
                Err(e.into())
            }
        }
    }
}
