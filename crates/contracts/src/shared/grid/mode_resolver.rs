//! Mode resolution: which columns a mode shows and with what constraints

use super::schema::{ColumnDescriptor, GridSchema, Mode, SortHint, WidgetSpec};

/// Column after its rule for one mode has been applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColumn {
    pub field: String,
    pub title: String,
    pub sort_hint: Option<SortHint>,
    pub required: bool,
    /// `None`: static display, never an editable control
    pub widget: Option<WidgetSpec>,
}

impl ResolvedColumn {
    pub fn is_editable(&self) -> bool {
        self.widget.is_some()
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.field
        } else {
            &self.title
        }
    }
}

/// Ordered, visible subset of `schema` for `mode`.
///
/// A column is kept iff it has a rule for `mode` and that rule is visible.
/// Pure: identical inputs always give identical output.
pub fn resolve(schema: &GridSchema, mode: Mode) -> Vec<ResolvedColumn> {
    resolve_columns(schema.columns(), mode)
}

pub fn resolve_columns(columns: &[ColumnDescriptor], mode: Mode) -> Vec<ResolvedColumn> {
    columns
        .iter()
        .filter_map(|col| {
            let rule = col.rule(mode).filter(|r| r.visible)?;
            Some(ResolvedColumn {
                field: col.field.clone(),
                title: col.title.clone(),
                sort_hint: col.sort_hint,
                required: rule.required,
                widget: rule.widget.clone(),
            })
        })
        .collect()
}

/// Resolved columns that must be filled in before a save in `mode`
pub fn required_columns(schema: &GridSchema, mode: Mode) -> Vec<ResolvedColumn> {
    resolve(schema, mode)
        .into_iter()
        .filter(|c| c.required)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::grid::schema::ModeRule;

    fn schema() -> GridSchema {
        GridSchema::new(vec![
            ColumnDescriptor::new("id", "")
                .mode(Mode::Retrieve, ModeRule::hidden())
                .form(ModeRule::editable(WidgetSpec::input("hidden")).visible(false)),
            ColumnDescriptor::new("originalText", "Original Text")
                .sort(SortHint::String)
                .mode(Mode::Retrieve, ModeRule::display())
                .form(ModeRule::editable(WidgetSpec::input("text")).required()),
            ColumnDescriptor::new("note", "Note").mode(Mode::Update, ModeRule::display()),
            ColumnDescriptor::new("dayUtc", "Date (UTC)")
                .mode(Mode::Retrieve, ModeRule::display())
                .mode(Mode::Create, ModeRule::editable(WidgetSpec::datepicker("YYYY-MM-DD"))),
        ])
        .unwrap()
    }

    fn fields(cols: &[ResolvedColumn]) -> Vec<&str> {
        cols.iter().map(|c| c.field.as_str()).collect()
    }

    #[test]
    fn test_resolve_keeps_schema_order_and_visibility() {
        let s = schema();
        assert_eq!(fields(&resolve(&s, Mode::Retrieve)), ["originalText", "dayUtc"]);
        assert_eq!(fields(&resolve(&s, Mode::Create)), ["originalText", "dayUtc"]);
        assert_eq!(fields(&resolve(&s, Mode::Update)), ["originalText", "note"]);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let s = schema();
        for mode in Mode::ALL {
            assert_eq!(resolve(&s, mode), resolve(&s, mode));
        }
    }

    #[test]
    fn test_resolved_constraints() {
        let s = schema();
        let update = resolve(&s, Mode::Update);
        assert!(update[0].required);
        assert!(update[0].is_editable());
        assert!(!update[1].required);
        assert!(!update[1].is_editable());
        assert_eq!(update[1].display_title(), "Note");
    }

    #[test]
    fn test_required_columns() {
        let s = schema();
        assert_eq!(fields(&required_columns(&s, Mode::Create)), ["originalText"]);
        assert!(required_columns(&s, Mode::Retrieve).is_empty());
    }
}
