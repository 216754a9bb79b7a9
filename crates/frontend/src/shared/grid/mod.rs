//! Leptos rendering of the schema-driven grid
//!
//! All decisions live in `contracts::shared::grid`; these components only turn
//! controller state into DOM and user events back into session calls.

pub mod confirm_dialog;
pub mod dynamic_form;
pub mod grid_view;
pub mod state;
pub mod widget_control;

pub use confirm_dialog::ConfirmDialog;
pub use dynamic_form::DynamicFormModal;
pub use grid_view::GridView;
pub use state::GridState;
pub use widget_control::WidgetControlView;
