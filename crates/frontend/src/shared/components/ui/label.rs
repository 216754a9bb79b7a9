use leptos::prelude::*;

/// Form label; required fields get a trailing marker
#[component]
pub fn FieldLabel(
    #[prop(into)] text: String,
    #[prop(optional, into)] for_id: String,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <label class="form__label" for=for_id>
            {text}
            {required.then(|| view! { <span class="form__required">" *"</span> })}
        </label>
    }
}
