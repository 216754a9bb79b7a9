use contracts::shared::grid::{ControllerCell, PaginationController};
use leptos::prelude::*;

/// Pagination controller behind a signal, so every transition re-renders the grid
#[derive(Clone, Copy)]
pub struct GridState(RwSignal<PaginationController>);

impl GridState {
    pub fn new(page_size: usize) -> Self {
        Self(RwSignal::new(PaginationController::new(page_size)))
    }

    pub fn signal(&self) -> RwSignal<PaginationController> {
        self.0
    }
}

impl ControllerCell for GridState {
    // None once the owning component is gone; late responses are dropped
    fn with_controller<R>(&self, f: impl FnOnce(&mut PaginationController) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}
