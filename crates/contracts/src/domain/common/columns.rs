use serde_json::{json, Value};

use crate::shared::grid::{ColumnDescriptor, Mode, ModeRule, SortHint, WidgetSpec};

pub const LANGUAGE_TEXT_FIELD: &str = "language_name";
pub const LANGUAGE_VALUE_FIELD: &str = "language_code";

/// Dropdown entries for English plus Chinese under `chinese_code`
/// (the two translation backends disagree on the code: `zh` vs `tw`)
pub fn language_options(chinese_code: &str) -> Vec<Value> {
    vec![
        json!({
            "id": "072d2631-534e-974b-b4c7-bf889a3bad77",
            LANGUAGE_TEXT_FIELD: "English",
            LANGUAGE_VALUE_FIELD: "en",
        }),
        json!({
            "id": "987d2631-534e-974b-b4c7-bf889a3bad77",
            LANGUAGE_TEXT_FIELD: "Chinese",
            LANGUAGE_VALUE_FIELD: chinese_code,
        }),
    ]
}

/// Record identity: never shown, carried through forms as a hidden input
pub fn hidden_id() -> ColumnDescriptor {
    ColumnDescriptor::new("id", "")
        .sort(SortHint::String)
        .mode(Mode::Retrieve, ModeRule::hidden())
        .form(ModeRule::editable(WidgetSpec::input("hidden")).visible(false))
}

/// Required free-text column shown in the table
pub fn text_field(field: &str, title: &str) -> ColumnDescriptor {
    ColumnDescriptor::new(field, title)
        .sort(SortHint::String)
        .mode(Mode::Retrieve, ModeRule::display())
        .form(ModeRule::editable(WidgetSpec::input("text")).required())
}

/// Required numeric column shown in the table
pub fn number_field(field: &str, title: &str) -> ColumnDescriptor {
    ColumnDescriptor::new(field, title)
        .sort(SortHint::Number)
        .mode(Mode::Retrieve, ModeRule::display())
        .form(ModeRule::editable(WidgetSpec::input("number")).required())
}

pub fn language(field: &str, title: &str, options: &[Value]) -> ColumnDescriptor {
    let widget = WidgetSpec::dropdown(options.to_vec(), LANGUAGE_TEXT_FIELD, LANGUAGE_VALUE_FIELD);
    ColumnDescriptor::new(field, title)
        .sort(SortHint::String)
        .mode(Mode::Retrieve, ModeRule::display())
        .form(ModeRule::editable(widget).required())
}

pub fn day_utc(title: &str) -> ColumnDescriptor {
    ColumnDescriptor::new("dayUtc", title)
        .sort(SortHint::String)
        .mode(Mode::Retrieve, ModeRule::display())
        .form(ModeRule::editable(WidgetSpec::datepicker("YYYY-MM-DD")).required())
}

/// Server-stamped creation time, round-tripped untouched
pub fn audit_timestamp() -> ColumnDescriptor {
    ColumnDescriptor::new("createdAtUtc", "")
        .mode(Mode::Retrieve, ModeRule::hidden())
        .form(ModeRule::editable(WidgetSpec::input("hidden")))
}

/// Owning user, stamped from the signed-in session
pub fn owner(user_id: &str) -> ColumnDescriptor {
    ColumnDescriptor::new("createdByUserId", "")
        .sort(SortHint::String)
        .mode(Mode::Retrieve, ModeRule::hidden())
        .form(ModeRule::editable(WidgetSpec::input("hidden").with_static_value(user_id)).required())
}
