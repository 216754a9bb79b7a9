//! Widget dispatch: resolved column + current value -> concrete control description
//!
//! The frontend turns a [`FieldControl`] into DOM; everything that decides *what*
//! is shown and *what is stored* on change lives here so it can be tested
//! without a browser.

use std::fmt::{self, Write};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::mode_resolver::ResolvedColumn;
use super::record::FieldValue;
use super::schema::{WidgetKind, WidgetSpec};

/// One entry of a dropdown after label/value keys are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// Control to render for one field
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetControl {
    Input {
        input_type: String,
        value: String,
    },
    Dropdown {
        options: Vec<DropdownOption>,
        selected: String,
    },
    DatePicker {
        pattern: String,
        /// Current value formatted for the pattern when it parses as a date
        value: String,
    },
    /// Visible but not editable in this mode
    Display {
        value: String,
    },
}

impl WidgetControl {
    /// Text the control shows for the current value
    pub fn value(&self) -> &str {
        match self {
            Self::Input { value, .. } | Self::DatePicker { value, .. } | Self::Display { value } => value,
            Self::Dropdown { selected, .. } => selected,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldControl {
    pub field: String,
    pub label: String,
    pub required: bool,
    pub control: WidgetControl,
}

impl FieldControl {
    pub fn is_hidden(&self) -> bool {
        matches!(&self.control, WidgetControl::Input { input_type, .. } if input_type == "hidden")
    }
}

/// Picks the control for `column`. Unrecognized widget components render nothing.
pub fn dispatch(column: &ResolvedColumn, value: &FieldValue) -> Option<FieldControl> {
    let control = match &column.widget {
        None => WidgetControl::Display {
            value: value.as_text(),
        },
        Some(widget) => match &widget.component {
            WidgetKind::Input => WidgetControl::Input {
                input_type: widget.input_type.clone(),
                value: value.as_text(),
            },
            WidgetKind::Dropdownlist => WidgetControl::Dropdown {
                options: dropdown_options(widget),
                selected: value.as_text(),
            },
            WidgetKind::Datepicker => WidgetControl::DatePicker {
                pattern: widget.pattern.clone(),
                value: format_for_pattern(&value.as_text(), &widget.pattern),
            },
            WidgetKind::Unknown(name) => {
                log::debug!("no control for component '{}' on field '{}'", name, column.field);
                return None;
            }
        },
    };

    Some(FieldControl {
        field: column.field.clone(),
        label: column.title.clone(),
        required: column.required,
        control,
    })
}

/// Value stored when the control for `widget` reports `raw`.
///
/// Number inputs coerce here and nowhere else: a parsable value is stored as a
/// number, a blank one as null, anything else verbatim. Dates are not checked
/// against their pattern.
pub fn coerce_change(widget: &WidgetSpec, raw: &str) -> FieldValue {
    if widget.is_numeric() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FieldValue::Null;
        }
        return trimmed
            .parse::<f64>()
            .map(FieldValue::Number)
            .unwrap_or_else(|_| FieldValue::Text(raw.to_string()));
    }
    FieldValue::Text(raw.to_string())
}

/// Stored value for picking the `index`-th dropdown entry: the value key, never the label
pub fn select_option(widget: &WidgetSpec, index: usize) -> Option<FieldValue> {
    dropdown_options(widget)
        .into_iter()
        .nth(index)
        .map(|opt| FieldValue::Text(opt.value))
}

pub fn dropdown_options(widget: &WidgetSpec) -> Vec<DropdownOption> {
    widget
        .data_source
        .iter()
        .map(|entry| DropdownOption {
            label: entry_text(entry, &widget.data_text_field),
            value: entry_text(entry, &widget.data_text_value),
        })
        .collect()
}

fn entry_text(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Converts a `YYYY-MM-DD HH:mm:ss` style pattern to a chrono format string
pub fn pattern_to_chrono(pattern: &str) -> String {
    const TOKENS: [(&str, &str); 7] = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;
    'outer: while !rest.is_empty() {
        for (token, fmt) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(fmt);
                rest = tail;
                continue 'outer;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            if c == '%' {
                out.push_str("%%");
            } else {
                out.push(c);
            }
        }
        rest = chars.as_str();
    }
    out
}

/// True when the pattern carries a time of day
pub fn pattern_has_time(pattern: &str) -> bool {
    pattern.contains("HH") || pattern.contains("mm") || pattern.contains("ss")
}

// chrono reports a format item the value cannot supply as a fmt error
fn render(item: impl fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", item).ok()?;
    Some(out)
}

/// Re-formats a server date/timestamp for display with `pattern`.
/// Strings that do not parse come back unchanged.
pub fn format_for_pattern(raw: &str, pattern: &str) -> String {
    let chrono_fmt = pattern_to_chrono(pattern);
    let formatted = if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        render(dt.naive_utc().format(&chrono_fmt))
    } else if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        render(dt.format(&chrono_fmt))
    } else if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if pattern_has_time(pattern) {
            None
        } else {
            render(d.format(&chrono_fmt))
        }
    } else {
        None
    };
    formatted.unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn languages() -> WidgetSpec {
        WidgetSpec::dropdown(
            vec![
                json!({ "language_name": "English", "language_code": "en" }),
                json!({ "language_name": "Chinese", "language_code": "zh" }),
            ],
            "language_name",
            "language_code",
        )
    }

    fn column(widget: Option<WidgetSpec>) -> ResolvedColumn {
        ResolvedColumn {
            field: "fromLanguage".into(),
            title: "From Language".into(),
            sort_hint: None,
            required: true,
            widget,
        }
    }

    #[test]
    fn test_dropdown_stores_value_not_label() {
        let widget = languages();
        assert_eq!(select_option(&widget, 1), Some(FieldValue::Text("zh".into())));
        assert_eq!(select_option(&widget, 2), None);

        let control = dispatch(&column(Some(widget)), &FieldValue::from("zh")).unwrap();
        match control.control {
            WidgetControl::Dropdown { options, selected } => {
                assert_eq!(options[1].label, "Chinese");
                assert_eq!(options[1].value, "zh");
                assert_eq!(selected, "zh");
            }
            other => panic!("unexpected control: {other:?}"),
        }
    }

    #[test]
    fn test_missing_widget_renders_display() {
        let control = dispatch(&column(None), &FieldValue::from("en")).unwrap();
        assert_eq!(control.control, WidgetControl::Display { value: "en".into() });
        assert_eq!(control.control.value(), "en");
    }

    #[test]
    fn test_unknown_component_renders_nothing() {
        let mut widget = WidgetSpec::input("text");
        widget.component = WidgetKind::Unknown("ColorPicker".into());
        assert!(dispatch(&column(Some(widget)), &FieldValue::Null).is_none());
    }

    #[test]
    fn test_input_change_is_verbatim_for_text() {
        let widget = WidgetSpec::input("text");
        assert_eq!(coerce_change(&widget, " 12 "), FieldValue::Text(" 12 ".into()));
    }

    #[test]
    fn test_number_input_coerces_once() {
        let widget = WidgetSpec::input("number");
        assert_eq!(coerce_change(&widget, "12"), FieldValue::Number(12.0));
        assert_eq!(coerce_change(&widget, "1.5"), FieldValue::Number(1.5));
        assert_eq!(coerce_change(&widget, ""), FieldValue::Null);
        assert_eq!(coerce_change(&widget, "12a"), FieldValue::Text("12a".into()));
    }

    #[test]
    fn test_datepicker_passes_malformed_strings_through() {
        let widget = WidgetSpec::datepicker("YYYY-MM-DD");
        assert_eq!(coerce_change(&widget, "31/02/x"), FieldValue::Text("31/02/x".into()));
    }

    #[test]
    fn test_pattern_conversion() {
        assert_eq!(pattern_to_chrono("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(pattern_to_chrono("DD.MM.YY HH:mm"), "%d.%m.%y %H:%M");
        assert!(!pattern_has_time("YYYY-MM-DD"));
        assert!(pattern_has_time("YYYY-MM-DD HH:mm:ss"));
    }

    #[test]
    fn test_format_for_pattern() {
        assert_eq!(format_for_pattern("2024-03-15T10:20:00Z", "YYYY-MM-DD"), "2024-03-15");
        assert_eq!(format_for_pattern("2024-03-15T10:20:00", "DD.MM.YYYY HH:mm"), "15.03.2024 10:20");
        assert_eq!(format_for_pattern("2024-03-15", "DD/MM/YYYY"), "15/03/2024");
        assert_eq!(format_for_pattern("not a date", "YYYY-MM-DD"), "not a date");
        assert_eq!(format_for_pattern("", "YYYY-MM-DD"), "");
    }

    #[test]
    fn test_seconds_only_pattern_keeps_plain_dates() {
        assert!(pattern_has_time("YYYY-MM-DD ss"));
        assert_eq!(format_for_pattern("2024-03-15", "YYYY-MM-DD ss"), "2024-03-15");
        assert_eq!(
            format_for_pattern("2024-03-15T10:20:05Z", "YYYY-MM-DD ss"),
            "2024-03-15 05"
        );
    }
}
