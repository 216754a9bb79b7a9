use contracts::shared::grid::{dispatch, FieldValue, ResolvedColumn, WidgetControl};
use leptos::prelude::*;

use crate::shared::components::date_input::DateInput;
use crate::shared::components::ui::{FieldLabel, Input, Select};

/// One form field. The control kind is fixed when the form opens; the shown
/// value follows `value` so typing never rebuilds the element.
#[component]
pub fn WidgetControlView(
    column: ResolvedColumn,
    #[prop(into)] value: Signal<FieldValue>,
    /// Raw text from the control; coercion happens in the form
    on_change: Callback<String>,
) -> impl IntoView {
    let Some(initial) = dispatch(&column, &value.get_untracked()) else {
        log::warn!("field '{}' has no renderable widget", column.field);
        return ().into_any();
    };

    let id = format!("field-{}", column.field);
    let label = column.display_title().to_string();
    let required = initial.required;
    let current = {
        let column = column.clone();
        Signal::derive(move || {
            dispatch(&column, &value.get())
                .map(|c| c.control.value().to_string())
                .unwrap_or_default()
        })
    };

    if initial.is_hidden() {
        return view! { <input type="hidden" id=id prop:value=current /> }.into_any();
    }

    match initial.control {
        WidgetControl::Input { input_type, .. } => view! {
            <Input
                label=label
                value=current
                on_input=on_change
                input_type=input_type
                required=required
                id=id
            />
        }
        .into_any(),
        WidgetControl::Dropdown { options, .. } => {
            let options: Vec<(String, String)> =
                options.into_iter().map(|o| (o.value, o.label)).collect();
            view! {
                <Select
                    label=label
                    value=current
                    on_change=on_change
                    options=options
                    required=required
                    id=id
                />
            }
            .into_any()
        }
        WidgetControl::DatePicker { pattern, .. } => view! {
            <div class="form__group">
                <FieldLabel text=label for_id=id.clone() required=required />
                <DateInput value=current on_change=on_change pattern=pattern id=id required=required />
            </div>
        }
        .into_any(),
        WidgetControl::Display { .. } => view! {
            <div class="form__group">
                <FieldLabel text=label />
                <div class="form__static">{current}</div>
            </div>
        }
        .into_any(),
    }
}
