//! Dynamic form engine: working copy of one record edited through schema-driven controls

use std::sync::Arc;

use super::error::ValidationError;
use super::mode_resolver::{resolve, ResolvedColumn};
use super::record::{FieldValue, RecordEntity};
use super::schema::{GridSchema, Mode, WidgetSpec};
use super::widget::{self, FieldControl};

/// Lifecycle of a form instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Open,
    Saved,
    Cancelled,
}

/// What a successful save hands back to the caller
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
    pub mode: Mode,
    pub record: RecordEntity,
}

/// Form state for one record instance in create or update mode.
///
/// The working copy is taken when the form opens and is never shared with the
/// grid's rows; nothing reaches the data store until the caller acts on the
/// [`FormSubmission`] returned by [`DynamicForm::save`].
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicForm {
    schema: Arc<GridSchema>,
    mode: Mode,
    columns: Vec<ResolvedColumn>,
    working: RecordEntity,
    error: Option<String>,
    status: FormStatus,
}

impl DynamicForm {
    pub fn open(schema: Arc<GridSchema>, mode: Mode, record: &RecordEntity) -> Self {
        let columns = resolve(&schema, mode);
        let mut working = record.clone();

        // Static values (e.g. the current user id) fill fields the record leaves empty
        for col in &columns {
            let Some(value) = col.widget.as_ref().and_then(|w| w.static_value.as_ref()) else {
                continue;
            };
            if working.value(&col.field).is_blank() {
                working.set(col.field.clone(), value.clone());
            }
        }

        Self {
            schema,
            mode,
            columns,
            working,
            error: None,
            status: FormStatus::Open,
        }
    }

    pub fn open_create(schema: Arc<GridSchema>, draft: &RecordEntity) -> Self {
        Self::open(schema, Mode::Create, draft)
    }

    pub fn open_update(schema: Arc<GridSchema>, record: &RecordEntity) -> Self {
        Self::open(schema, Mode::Update, record)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn schema(&self) -> &GridSchema {
        &self.schema
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_open(&self) -> bool {
        self.status == FormStatus::Open
    }

    pub fn record(&self) -> &RecordEntity {
        &self.working
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn columns(&self) -> &[ResolvedColumn] {
        &self.columns
    }

    /// Controls to render, in schema order
    pub fn controls(&self) -> Vec<FieldControl> {
        self.columns
            .iter()
            .filter_map(|col| widget::dispatch(col, &self.working.value(&col.field)))
            .collect()
    }

    /// Merges a value into the working copy. No validation happens here.
    pub fn set_field(&mut self, field: &str, value: impl Into<FieldValue>) {
        self.working.set(field, value);
    }

    /// Raw value reported by a control. Fields without an editable widget in
    /// this mode are left untouched and `false` is returned.
    pub fn change(&mut self, field: &str, raw: &str) -> bool {
        let Some(spec) = self.widget_for(field) else {
            return false;
        };
        let value = widget::coerce_change(spec, raw);
        self.working.set(field, value);
        true
    }

    /// Picks a dropdown entry by position
    pub fn select_option(&mut self, field: &str, index: usize) -> bool {
        let Some(value) = self
            .widget_for(field)
            .and_then(|spec| widget::select_option(spec, index))
        else {
            return false;
        };
        self.working.set(field, value);
        true
    }

    fn widget_for(&self, field: &str) -> Option<&WidgetSpec> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .and_then(|c| c.widget.as_ref())
    }

    /// Titles of required fields whose value coerces to an empty string
    pub fn missing_required(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.required && self.working.value(&c.field).is_blank())
            .map(|c| c.display_title().to_string())
            .collect()
    }

    /// Validates required fields and closes the form.
    ///
    /// On failure the form stays open and its error slot is replaced with the
    /// message; the caller must not contact the data store.
    pub fn save(&mut self) -> Result<FormSubmission, ValidationError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            let err = ValidationError { missing };
            log::warn!("{} form rejected: {}", self.mode, err);
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.error = None;
        self.status = FormStatus::Saved;
        Ok(FormSubmission {
            mode: self.mode,
            record: self.working.clone(),
        })
    }

    /// Discards the working copy. No confirmation.
    pub fn cancel(&mut self) {
        self.working = RecordEntity::new();
        self.error = None;
        self.status = FormStatus::Cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::grid::schema::{ColumnDescriptor, ModeRule};
    use crate::shared::grid::widget::WidgetControl;
    use serde_json::json;

    fn schema() -> Arc<GridSchema> {
        Arc::new(
            GridSchema::new(vec![
                ColumnDescriptor::new("id", "")
                    .form(ModeRule::editable(WidgetSpec::input("hidden")).visible(false)),
                ColumnDescriptor::new("originalText", "Original Text")
                    .form(ModeRule::editable(WidgetSpec::input("text")).required()),
                ColumnDescriptor::new("toLanguage", "To Language").form(
                    ModeRule::editable(WidgetSpec::dropdown(
                        vec![
                            json!({ "language_name": "English", "language_code": "en" }),
                            json!({ "language_name": "Chinese", "language_code": "zh" }),
                        ],
                        "language_name",
                        "language_code",
                    ))
                    .required(),
                ),
                ColumnDescriptor::new("priority", "Priority")
                    .form(ModeRule::editable(WidgetSpec::input("number"))),
                ColumnDescriptor::new("createdByUserId", "").form(
                    ModeRule::editable(WidgetSpec::input("hidden").with_static_value("u-7"))
                        .required(),
                ),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_save_reports_missing_titles_and_stays_open() {
        let s = schema();
        let mut form = DynamicForm::open_create(s.clone(), &s.blank_entity());

        let err = form.save().unwrap_err();
        assert_eq!(err.missing, ["Original Text", "To Language"]);
        assert!(form.is_open());
        assert_eq!(
            form.error(),
            Some("Please fill in the following required fields: Original Text, To Language")
        );
    }

    #[test]
    fn test_error_slot_is_replaced() {
        let s = schema();
        let mut form = DynamicForm::open_create(s.clone(), &s.blank_entity());
        form.save().unwrap_err();
        form.change("originalText", "hello");
        form.save().unwrap_err();
        assert_eq!(
            form.error(),
            Some("Please fill in the following required fields: To Language")
        );
    }

    #[test]
    fn test_save_closes_and_returns_working_copy() {
        let s = schema();
        let mut form = DynamicForm::open_create(s.clone(), &s.blank_entity());
        form.change("originalText", "hello");
        assert!(form.select_option("toLanguage", 1));
        form.change("priority", "3");

        let submission = form.save().unwrap();
        assert_eq!(form.status(), FormStatus::Saved);
        assert_eq!(submission.mode, Mode::Create);
        assert_eq!(submission.record.text("toLanguage"), "zh");
        assert_eq!(submission.record.value("priority"), FieldValue::Number(3.0));
        assert_eq!(submission.record.text("createdByUserId"), "u-7");
        assert!(submission.record.is_draft());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_working_copy_is_independent() {
        let s = schema();
        let original: RecordEntity = [
            ("id", "r-1"),
            ("originalText", "before"),
            ("toLanguage", "en"),
            ("createdByUserId", "u-1"),
        ]
        .into_iter()
        .collect();
        let mut form = DynamicForm::open_update(s, &original);
        form.change("originalText", "after");

        assert_eq!(original.text("originalText"), "before");
        assert_eq!(form.record().text("originalText"), "after");
        // existing owner is not overwritten by the static value
        assert_eq!(form.record().text("createdByUserId"), "u-1");
    }

    #[test]
    fn test_change_ignores_fields_without_widget() {
        let s = schema();
        let mut form = DynamicForm::open_create(s.clone(), &s.blank_entity());
        assert!(!form.change("createdAtUtc", "2024-01-01"));
        assert!(!form.record().contains("createdAtUtc"));
    }

    #[test]
    fn test_controls_follow_mode_visibility() {
        let s = schema();
        let form = DynamicForm::open_create(s.clone(), &s.blank_entity());
        let fields: Vec<_> = form.controls().into_iter().map(|c| c.field).collect();
        assert_eq!(fields, ["originalText", "toLanguage", "priority", "createdByUserId"]);

        let hidden = form
            .controls()
            .into_iter()
            .find(|c| c.field == "createdByUserId")
            .unwrap();
        assert!(hidden.is_hidden());
        assert_eq!(
            hidden.control,
            WidgetControl::Input {
                input_type: "hidden".into(),
                value: "u-7".into()
            }
        );
    }

    #[test]
    fn test_cancel_discards() {
        let s = schema();
        let mut form = DynamicForm::open_create(s.clone(), &s.blank_entity());
        form.change("originalText", "draft");
        form.cancel();
        assert_eq!(form.status(), FormStatus::Cancelled);
        assert!(form.record().is_empty());
    }
}
