//! Column schema: the declarative description a screen hands to the grid engine
//!
//! Every column carries one rule per [`Mode`]. A rule says whether the column is
//! shown in that mode, whether it must be filled in before save and which
//! widget edits it. Schemas are checked once, when loaded; a malformed schema
//! never reaches the renderer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::error::SchemaError;
use super::record::{FieldValue, RecordEntity};

pub const DEFAULT_DATE_PATTERN: &str = "YYYY-MM-DD";
pub const DEFAULT_INPUT_TYPE: &str = "text";

// ============================================================================
// Mode
// ============================================================================

/// Screen mode a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Create,
    Update,
    Retrieve,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Create, Mode::Update, Mode::Retrieve];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Retrieve => "retrieve",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Modes that open an edit form
    pub fn is_form(&self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-side sort hint for a column header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortHint {
    String,
    Number,
}

// ============================================================================
// Widgets
// ============================================================================

/// Editable control a column renders as.
///
/// `Unknown` keeps the declared name so newer schemas still load; such a
/// column renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WidgetKind {
    Input,
    Dropdownlist,
    Datepicker,
    Unknown(String),
}

impl WidgetKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Input => "Input",
            Self::Dropdownlist => "Dropdownlist",
            Self::Datepicker => "Datepicker",
            Self::Unknown(name) => name,
        }
    }
}

impl From<String> for WidgetKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Input" => Self::Input,
            "Dropdownlist" => Self::Dropdownlist,
            "Datepicker" => Self::Datepicker,
            _ => Self::Unknown(s),
        }
    }
}

impl From<WidgetKind> for String {
    fn from(kind: WidgetKind) -> Self {
        kind.as_str().to_string()
    }
}

fn default_input_type() -> String {
    DEFAULT_INPUT_TYPE.to_string()
}

fn default_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Widget declaration for one column in one mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSpec {
    pub component: WidgetKind,
    /// Input type for `Input` ("text", "number", "hidden", ...)
    #[serde(default = "default_input_type", rename = "type", alias = "inputType")]
    pub input_type: String,
    /// Label/value entries for `Dropdownlist`
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Vec::is_empty")]
    pub data_source: Vec<Value>,
    /// Key of the label inside each `data_source` entry
    #[serde(default)]
    pub data_text_field: String,
    /// Key of the persisted value inside each `data_source` entry
    #[serde(default)]
    pub data_text_value: String,
    /// Date/time format for `Datepicker`
    #[serde(default = "default_pattern")]
    pub pattern: String,
    /// Fixed value seeded into the field instead of user input
    #[serde(default, rename = "value", alias = "staticValue", skip_serializing_if = "Option::is_none")]
    pub static_value: Option<FieldValue>,
}

impl WidgetSpec {
    fn with_component(component: WidgetKind) -> Self {
        Self {
            component,
            input_type: default_input_type(),
            data_source: Vec::new(),
            data_text_field: String::new(),
            data_text_value: String::new(),
            pattern: default_pattern(),
            static_value: None,
        }
    }

    pub fn input(input_type: &str) -> Self {
        Self {
            input_type: input_type.to_string(),
            ..Self::with_component(WidgetKind::Input)
        }
    }

    pub fn dropdown(data_source: Vec<Value>, text_field: &str, value_field: &str) -> Self {
        Self {
            data_source,
            data_text_field: text_field.to_string(),
            data_text_value: value_field.to_string(),
            ..Self::with_component(WidgetKind::Dropdownlist)
        }
    }

    pub fn datepicker(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            ..Self::with_component(WidgetKind::Datepicker)
        }
    }

    pub fn with_static_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.static_value = Some(value.into());
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.component == WidgetKind::Input && self.input_type == "number"
    }

    pub fn is_hidden(&self) -> bool {
        self.component == WidgetKind::Input && self.input_type == "hidden"
    }

    /// Value a blank draft starts with for this widget
    pub fn default_value(&self) -> FieldValue {
        match &self.static_value {
            Some(v) => v.clone(),
            None if self.is_numeric() => FieldValue::Number(0.0),
            None => FieldValue::Text(String::new()),
        }
    }
}

// ============================================================================
// Rules and columns
// ============================================================================

/// Per-mode rule of a column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeRule {
    pub visible: bool,
    #[serde(default)]
    pub required: bool,
    /// Absent: shown as static text even when visible
    #[serde(default, alias = "ele", alias = "type", skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetSpec>,
}

impl ModeRule {
    /// Not shown in this mode
    pub fn hidden() -> Self {
        Self {
            visible: false,
            required: false,
            widget: None,
        }
    }

    /// Shown as static text
    pub fn display() -> Self {
        Self {
            visible: true,
            required: false,
            widget: None,
        }
    }

    /// Shown and edited through `widget`
    pub fn editable(widget: WidgetSpec) -> Self {
        Self {
            visible: true,
            required: false,
            widget: Some(widget),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Static description of one entity field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub title: String,
    pub field: String,
    #[serde(rename = "sorter", skip_serializing_if = "Option::is_none")]
    pub sort_hint: Option<SortHint>,
    #[serde(rename = "mode")]
    pub modes: BTreeMap<Mode, ModeRule>,
}

impl ColumnDescriptor {
    pub fn new(field: &str, title: &str) -> Self {
        Self {
            title: title.to_string(),
            field: field.to_string(),
            sort_hint: None,
            modes: BTreeMap::new(),
        }
    }

    pub fn sort(mut self, hint: SortHint) -> Self {
        self.sort_hint = Some(hint);
        self
    }

    pub fn mode(mut self, mode: Mode, rule: ModeRule) -> Self {
        self.modes.insert(mode, rule);
        self
    }

    /// Same rule for both form modes
    pub fn form(self, rule: ModeRule) -> Self {
        self.mode(Mode::Create, rule.clone()).mode(Mode::Update, rule)
    }

    pub fn rule(&self, mode: Mode) -> Option<&ModeRule> {
        self.modes.get(&mode)
    }

    /// Title used in messages; hidden columns often have none
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.field
        } else {
            &self.title
        }
    }
}

/// Wire shape of a column, accepted as written by screen authors
#[derive(Debug, Deserialize)]
struct RawColumnDescriptor {
    #[serde(default)]
    title: String,
    #[serde(default)]
    field: String,
    #[serde(default, alias = "sortHint")]
    sorter: Option<SortHint>,
    #[serde(default, alias = "modes")]
    mode: BTreeMap<String, ModeRule>,
}

impl TryFrom<RawColumnDescriptor> for ColumnDescriptor {
    type Error = SchemaError;

    fn try_from(raw: RawColumnDescriptor) -> Result<Self, Self::Error> {
        let mut modes = BTreeMap::new();
        for (key, rule) in raw.mode {
            let mode = Mode::parse(&key).ok_or_else(|| SchemaError::UnknownMode {
                field: raw.field.clone(),
                mode: key.clone(),
            })?;
            modes.insert(mode, rule);
        }
        Ok(Self {
            title: raw.title,
            field: raw.field,
            sort_hint: raw.sorter,
            modes,
        })
    }
}

// ============================================================================
// Schema
// ============================================================================

/// Validated, ordered set of columns for one entity screen
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GridSchema {
    columns: Vec<ColumnDescriptor>,
}

impl GridSchema {
    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self, SchemaError> {
        validate(&columns)?;
        Ok(Self { columns })
    }

    /// Loads a JSON array of column descriptors
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let raw: Vec<RawColumnDescriptor> =
            serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
        let columns = raw
            .into_iter()
            .map(ColumnDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(columns)
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Fresh draft: every column at its declared default, identity empty
    pub fn blank_entity(&self) -> RecordEntity {
        self.columns
            .iter()
            .map(|col| {
                let widget = [Mode::Create, Mode::Update]
                    .into_iter()
                    .find_map(|m| col.rule(m).and_then(|r| r.widget.as_ref()));
                let value = match widget {
                    _ if col.field == RecordEntity::ID_FIELD => FieldValue::Text(String::new()),
                    Some(w) => w.default_value(),
                    None => FieldValue::Text(String::new()),
                };
                (col.field.clone(), value)
            })
            .collect()
    }

    /// Table text for `value`; date columns use their form widget's pattern
    pub fn display_text(&self, field: &str, value: &FieldValue) -> String {
        let text = value.as_text();
        let pattern = self.column(field).and_then(|col| {
            Mode::ALL
                .iter()
                .filter_map(|mode| col.rule(*mode)?.widget.as_ref())
                .find(|w| w.component == WidgetKind::Datepicker)
                .map(|w| w.pattern.as_str())
        });
        match pattern {
            Some(pattern) => super::widget::format_for_pattern(&text, pattern),
            None => text,
        }
    }
}

fn validate(columns: &[ColumnDescriptor]) -> Result<(), SchemaError> {
    if columns.is_empty() {
        return Err(SchemaError::Empty);
    }

    let mut seen = HashSet::new();
    for (index, col) in columns.iter().enumerate() {
        if col.field.trim().is_empty() {
            return Err(SchemaError::EmptyFieldKey { index });
        }
        if !seen.insert(col.field.as_str()) {
            return Err(SchemaError::DuplicateField {
                field: col.field.clone(),
            });
        }
        for (mode, rule) in &col.modes {
            // A required field nobody can edit could never be saved
            let editable = matches!(
                rule.widget.as_ref().map(|w| &w.component),
                Some(WidgetKind::Input | WidgetKind::Dropdownlist | WidgetKind::Datepicker)
            );
            if mode.is_form() && rule.required && !editable {
                return Err(SchemaError::RequiredWithoutWidget {
                    field: col.field.clone(),
                    mode: *mode,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_column(field: &str, title: &str) -> ColumnDescriptor {
        ColumnDescriptor::new(field, title)
            .sort(SortHint::String)
            .mode(Mode::Retrieve, ModeRule::display())
            .form(ModeRule::editable(WidgetSpec::input("text")).required())
    }

    #[test]
    fn test_display_text_formats_dates() {
        let day = ColumnDescriptor::new("dayUtc", "Day")
            .mode(Mode::Retrieve, ModeRule::display())
            .form(ModeRule::editable(WidgetSpec::datepicker("DD.MM.YYYY")).required());
        let schema = GridSchema::new(vec![day, text_column("name", "Name")]).unwrap();

        let stamp = FieldValue::Text("2024-03-15T00:00:00Z".into());
        assert_eq!(schema.display_text("dayUtc", &stamp), "15.03.2024");
        assert_eq!(schema.display_text("name", &stamp), "2024-03-15T00:00:00Z");
    }

    #[test]
    fn test_rejects_duplicate_fields() {
        let err = GridSchema::new(vec![text_column("a", "A"), text_column("a", "A2")]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField { field: "a".into() });
    }

    #[test]
    fn test_rejects_required_without_widget() {
        let col = ColumnDescriptor::new("note", "Note")
            .mode(Mode::Update, ModeRule::display().required());
        let err = GridSchema::new(vec![col]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::RequiredWithoutWidget {
                field: "note".into(),
                mode: Mode::Update
            }
        );
    }

    #[test]
    fn test_required_in_retrieve_mode_is_allowed_without_widget() {
        let col = ColumnDescriptor::new("id", "")
            .mode(Mode::Retrieve, ModeRule::hidden().required());
        assert!(GridSchema::new(vec![col]).is_ok());
    }

    #[test]
    fn test_rejects_required_unknown_widget() {
        let mut widget = WidgetSpec::input("text");
        widget.component = WidgetKind::Unknown("RichText".into());
        let col = ColumnDescriptor::new("body", "Body")
            .mode(Mode::Create, ModeRule::editable(widget).required());
        assert!(matches!(
            GridSchema::new(vec![col]),
            Err(SchemaError::RequiredWithoutWidget { .. })
        ));
    }

    #[test]
    fn test_from_json_accepts_descriptor_keys() {
        let json = json!([
            {
                "title": "From Language",
                "field": "fromLanguage",
                "sorter": "string",
                "value": null,
                "mode": {
                    "retrieve": { "visible": true, "required": true },
                    "create": {
                        "visible": true,
                        "required": true,
                        "ele": {
                            "component": "Dropdownlist",
                            "type": "text",
                            "dataSource": [{ "language_name": "English", "language_code": "en" }],
                            "dataTextField": "language_name",
                            "dataTextValue": "language_code"
                        }
                    }
                }
            },
            {
                "title": "Date (UTC)",
                "field": "dayUtc",
                "mode": {
                    "update": { "visible": true, "ele": { "component": "Datepicker" } }
                }
            }
        ])
        .to_string();

        let schema = GridSchema::from_json(&json).unwrap();
        let lang = schema.column("fromLanguage").unwrap();
        assert_eq!(lang.sort_hint, Some(SortHint::String));
        let widget = lang.rule(Mode::Create).unwrap().widget.as_ref().unwrap();
        assert_eq!(widget.component, WidgetKind::Dropdownlist);
        assert_eq!(widget.data_text_value, "language_code");

        let date = schema.column("dayUtc").unwrap();
        let picker = date.rule(Mode::Update).unwrap().widget.as_ref().unwrap();
        assert_eq!(picker.pattern, DEFAULT_DATE_PATTERN);
        assert!(date.rule(Mode::Create).is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_mode() {
        let json = r#"[{ "title": "A", "field": "a", "mode": { "retreive": { "visible": true } } }]"#;
        assert_eq!(
            GridSchema::from_json(json).unwrap_err(),
            SchemaError::UnknownMode {
                field: "a".into(),
                mode: "retreive".into()
            }
        );
    }

    #[test]
    fn test_from_json_keeps_unknown_component() {
        let json = r#"[{ "field": "a", "mode": { "create": { "visible": true, "ele": { "component": "Slider" } } } }]"#;
        let schema = GridSchema::from_json(json).unwrap();
        let widget = schema.columns()[0].rule(Mode::Create).unwrap().widget.clone().unwrap();
        assert_eq!(widget.component, WidgetKind::Unknown("Slider".into()));
    }

    #[test]
    fn test_blank_entity_defaults() {
        let schema = GridSchema::new(vec![
            ColumnDescriptor::new("id", "")
                .form(ModeRule::editable(WidgetSpec::input("hidden")).visible(false)),
            text_column("originalText", "Original Text"),
            ColumnDescriptor::new("priority", "Priority")
                .form(ModeRule::editable(WidgetSpec::input("number"))),
            ColumnDescriptor::new("createdByUserId", "")
                .form(ModeRule::editable(WidgetSpec::input("hidden").with_static_value("u-42"))),
            ColumnDescriptor::new("createdAtUtc", "").mode(Mode::Retrieve, ModeRule::hidden()),
        ])
        .unwrap();

        let draft = schema.blank_entity();
        assert!(draft.is_draft());
        assert_eq!(draft.value("originalText"), FieldValue::Text(String::new()));
        assert_eq!(draft.value("priority"), FieldValue::Number(0.0));
        assert_eq!(draft.text("createdByUserId"), "u-42");
        assert_eq!(draft.value("createdAtUtc"), FieldValue::Text(String::new()));
        assert_eq!(draft.len(), 5);
    }
}
