use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

/// Grid toolbar: filter toggle and pager on one line, filter fields folded below
#[component]
pub fn FilterPanel(
    expanded: RwSignal<bool>,
    /// Filters currently applied to the rows
    #[prop(into)]
    active_count: Signal<usize>,
    #[prop(into)] pager: ChildrenFn,
    #[prop(into)] fields: ChildrenFn,
    #[prop(optional, into)] tags: Option<ChildrenFn>,
) -> impl IntoView {
    let chevron = move || icon(if expanded.get() { "chevron-down" } else { "chevron-right" });

    view! {
        <section class="grid-toolbar">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <button
                    class="grid-toolbar__toggle"
                    aria-expanded=move || expanded.get().to_string()
                    on:click=move |_| expanded.update(|e| *e = !*e)
                >
                    {chevron}
                    {icon("filter")}
                    " Filter"
                    {move || match active_count.get() {
                        0 => None,
                        n => Some(view! {
                            <Badge appearance=BadgeAppearance::Filled color=BadgeColor::Brand>{n}</Badge>
                        }),
                    }}
                </button>
                {pager()}
            </Flex>
            <Show when=move || expanded.get()>
                <div class="grid-toolbar__fields">{fields()}</div>
            </Show>
            {tags.map(|tags| view! { <div class="grid-toolbar__tags">{tags()}</div> })}
        </section>
    }
}

/// Applied filter shown as a removable chip
#[component]
pub fn FilterTag(#[prop(into)] label: String, on_remove: Callback<()>) -> impl IntoView {
    view! {
        <span class="grid-toolbar__tag">
            {label}
            <button
                class="grid-toolbar__tag-remove"
                aria-label="Remove filter"
                on:click=move |_| on_remove.run(())
            >
                {icon("x")}
            </button>
        </span>
    }
}
