//! Client-side ordering of the rows already on screen

use std::cmp::Ordering;

use super::record::RecordEntity;
use super::schema::SortHint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Active header sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub hint: SortHint,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: same field flips direction, another field starts ascending
    pub fn toggle(current: Option<&SortState>, field: &str, hint: SortHint) -> SortState {
        match current {
            Some(s) if s.field == field => SortState {
                direction: s.direction.toggle(),
                ..s.clone()
            },
            _ => SortState {
                field: field.to_string(),
                hint,
                direction: SortDirection::Asc,
            },
        }
    }
}

/// Stable in-place sort of `rows`.
///
/// Strings compare case-insensitively. Numbers compare numerically and values
/// that do not parse go last in either direction.
pub fn sort_rows(rows: &mut [RecordEntity], sort: &SortState) {
    rows.sort_by(|a, b| compare(a, b, sort));
}

fn compare(a: &RecordEntity, b: &RecordEntity, sort: &SortState) -> Ordering {
    match sort.hint {
        SortHint::String => {
            let ord = a
                .text(&sort.field)
                .to_lowercase()
                .cmp(&b.text(&sort.field).to_lowercase());
            directed(ord, sort.direction)
        }
        SortHint::Number => {
            match (a.value(&sort.field).as_number(), b.value(&sort.field).as_number()) {
                (Some(x), Some(y)) => directed(x.total_cmp(&y), sort.direction),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
    }
}

fn directed(ord: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::grid::record::FieldValue;

    fn rows(values: &[FieldValue]) -> Vec<RecordEntity> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| [("id", FieldValue::from(i as i64)), ("v", v.clone())].into_iter().collect())
            .collect()
    }

    fn column(rows: &[RecordEntity]) -> Vec<String> {
        rows.iter().map(|r| r.text("v")).collect()
    }

    #[test]
    fn test_toggle_flips_same_field() {
        let first = SortState::toggle(None, "v", SortHint::String);
        assert_eq!(first.direction, SortDirection::Asc);
        let second = SortState::toggle(Some(&first), "v", SortHint::String);
        assert_eq!(second.direction, SortDirection::Desc);
        let other = SortState::toggle(Some(&second), "w", SortHint::Number);
        assert_eq!((other.field.as_str(), other.direction), ("w", SortDirection::Asc));
    }

    #[test]
    fn test_strings_ignore_case() {
        let mut r = rows(&["banana".into(), "Apple".into(), "cherry".into()]);
        sort_rows(&mut r, &SortState::toggle(None, "v", SortHint::String));
        assert_eq!(column(&r), ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_numbers_sort_numerically_with_junk_last() {
        let values = [
            FieldValue::Number(10.0),
            FieldValue::Text("n/a".into()),
            FieldValue::Text("9".into()),
            FieldValue::Number(100.0),
        ];
        let asc = SortState::toggle(None, "v", SortHint::Number);
        let mut r = rows(&values);
        sort_rows(&mut r, &asc);
        assert_eq!(column(&r), ["9", "10", "100", "n/a"]);

        let desc = SortState::toggle(Some(&asc), "v", SortHint::Number);
        sort_rows(&mut r, &desc);
        assert_eq!(column(&r), ["100", "10", "9", "n/a"]);
    }
}
