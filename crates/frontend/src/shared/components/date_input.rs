use contracts::shared::grid::DEFAULT_DATE_PATTERN;
use leptos::prelude::*;

/// DateInput component
///
/// The default `YYYY-MM-DD` pattern gets the browser's native date picker;
/// any other pattern falls back to a text input showing the pattern as a hint.
/// The typed string is passed on as is.
#[component]
pub fn DateInput(
    /// The date value, already formatted for `pattern`
    #[prop(into)]
    value: Signal<String>,
    /// Callback when the date changes
    on_change: Callback<String>,
    /// Display pattern, e.g. "YYYY-MM-DD" or "DD.MM.YYYY HH:mm"
    #[prop(optional, into)]
    pattern: Option<String>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let pattern = pattern.unwrap_or_else(|| DEFAULT_DATE_PATTERN.to_string());
    let native = pattern == DEFAULT_DATE_PATTERN;

    view! {
        <input
            id=id.unwrap_or_default()
            class="form__input form__input--date"
            type={if native { "date" } else { "text" }}
            placeholder=pattern
            required=required
            prop:value=value
            on:input=move |ev| {
                on_change.run(event_target_value(&ev));
            }
        />
    }
}
