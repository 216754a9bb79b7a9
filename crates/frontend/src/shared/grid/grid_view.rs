use std::rc::Rc;
use std::sync::Arc;

use contracts::shared::grid::{
    sort_rows, ColumnFilter, DataSource, FormSubmission, GridSchema, GridSession, PendingDelete,
    SortState,
};
use leptos::children::ToChildren;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::confirm_dialog::ConfirmDialog;
use super::dynamic_form::DynamicFormModal;
use super::state::GridState;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::{Input, Select};
use crate::shared::config::use_grid_config;
use crate::shared::icons::icon;

fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

/// Paged, sortable table over one [`DataSource`] with create/edit/delete.
#[component]
pub fn GridView(
    #[prop(into)] title: String,
    schema: Arc<GridSchema>,
    source: Rc<dyn DataSource>,
    /// Requests in flight, maintained by the transport hooks
    #[prop(optional)]
    loading: Option<RwSignal<usize>>,
) -> impl IntoView {
    let config = use_grid_config();
    let loading = loading.unwrap_or_else(|| RwSignal::new(0));
    let state = GridState::new(config.default_page_size());
    let controller = state.signal();
    let session = StoredValue::new_local(GridSession::new(schema.clone(), source, state));
    let columns = session.with_value(|s| s.display_columns());
    let column_span = (columns.len() + 1).to_string();

    let form = RwSignal::new(None);
    let pending = RwSignal::new(None::<PendingDelete>);
    let sort = RwSignal::new(None::<SortState>);
    let action_error = RwSignal::new(None::<String>);
    let filters_expanded = RwSignal::new(false);
    let filter_field = RwSignal::new(String::new());
    let filter_value = RwSignal::new(String::new());

    let rows = Memo::new(move |_| {
        let mut rows = controller.with(|c| c.rows().to_vec());
        if let Some(order) = sort.get() {
            sort_rows(&mut rows, &order);
        }
        rows
    });
    let page = Memo::new(move |_| controller.with(|c| c.state()));
    let busy = Signal::derive(move || controller.with(|c| c.is_loading()));
    let active_filters = Signal::derive(move || controller.with(|c| c.filters().len()));
    let load_error = Signal::derive(move || {
        controller.with(|c| c.error().map(|e| format!("Could not load records: {}", e)))
    });

    let refresh = move || {
        let session = session.get_value();
        spawn_local(async move { session.refresh().await });
    };

    // Load on mount
    {
        let session = session.get_value();
        spawn_local(async move { session.mount().await });
    }

    let on_page_change = Callback::new(move |target: usize| {
        let session = session.get_value();
        spawn_local(async move { session.change_page(target).await });
    });
    let on_page_size_change = Callback::new(move |size: usize| {
        let session = session.get_value();
        spawn_local(async move { session.change_page_size(size).await });
    });

    let apply_filters = move |filters: Vec<ColumnFilter>| {
        let session = session.get_value();
        spawn_local(async move { session.apply_filters(filters).await });
    };
    let apply_filter_form = move |_| {
        let field = filter_field.get_untracked();
        let value = filter_value.get_untracked();
        if field.is_empty() || value.trim().is_empty() {
            apply_filters(Vec::new());
        } else {
            apply_filters(vec![ColumnFilter::for_field(&field, value.trim())]);
        }
    };
    let clear_filters = move || {
        filter_value.set(String::new());
        apply_filters(Vec::new());
    };

    let on_save = Callback::new(move |submission: FormSubmission| {
        let session = session.get_value();
        spawn_local(async move {
            match session.commit(submission).await {
                Ok(_) => action_error.set(None),
                Err(e) => {
                    action_error.set(Some(e.to_string()));
                    alert(&format!("Save failed: {}", e));
                }
            }
        });
    });
    let on_delete = Callback::new(move |target: PendingDelete| {
        let session = session.get_value();
        spawn_local(async move {
            match session.confirm_delete(target).await {
                Ok(()) => action_error.set(None),
                Err(e) => {
                    action_error.set(Some(e.to_string()));
                    alert(&format!("Delete failed: {}", e));
                }
            }
        });
    });

    let open_create = move |_| {
        form.set(Some(session.with_value(|s| s.open_create())));
    };

    let filter_options: Vec<(String, String)> = columns
        .iter()
        .filter(|c| c.sort_hint.is_some())
        .map(|c| (c.field.clone(), c.display_title().to_string()))
        .collect();
    let page_size_options = config.page_size_options();

    let header_cells = columns
        .iter()
        .map(|column| {
            let field = column.field.clone();
            let hint = column.sort_hint;
            let marker_field = field.clone();
            let marker = move || {
                sort.with(|s| {
                    s.as_ref()
                        .filter(|s| s.field == marker_field)
                        .map(|s| s.direction.arrow())
                        .unwrap_or("")
                })
            };
            let class = if hint.is_some() { "grid__th grid__th--sortable" } else { "grid__th" };
            let title = column.display_title().to_string();
            view! {
                <TableHeaderCell
                    attr:class=class
                    on:click=move |_| {
                        if let Some(hint) = hint {
                            sort.update(|s| *s = Some(SortState::toggle(s.as_ref(), &field, hint)));
                        }
                    }
                >
                    {title}
                    " "
                    {marker}
                </TableHeaderCell>
            }
        })
        .collect_view();

    view! {
        <div class="grid">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center attr:class="grid__header">
                <Flex align=FlexAlign::Center gap=FlexGap::Small>
                    <h2 class="grid__title">{title}</h2>
                    {move || (loading.get() > 0).then(|| view! {
                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>"Loading..."</Badge>
                    })}
                </Flex>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=open_create>
                        {icon("plus")}
                        " Add"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| refresh() disabled=busy>
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </Space>
            </Flex>

            {move || action_error.get().or_else(|| load_error.get()).map(|err| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{err}</span>
                </div>
            })}

            <FilterPanel
                expanded=filters_expanded
                active_count=active_filters
                pager=ChildrenFn::to_children(move || view! {
                    <PaginationControls
                        current_page=Signal::derive(move || page.get().current_page)
                        total_pages=Signal::derive(move || page.get().total_pages())
                        total_count=Signal::derive(move || page.get().total_records)
                        page_size=Signal::derive(move || page.get().page_size)
                        on_page_change=on_page_change
                        on_page_size_change=on_page_size_change
                        page_size_options=page_size_options.clone()
                        busy=busy
                    />
                })
                fields=ChildrenFn::to_children(move || { let filter_options = filter_options.clone(); view! {
                    <Flex align=FlexAlign::End gap=FlexGap::Small>
                        <Select
                            label="Column"
                            value=filter_field
                            on_change=Callback::new(move |v: String| filter_field.set(v))
                            options=filter_options
                        />
                        <Input
                            label="Contains"
                            value=filter_value
                            on_input=Callback::new(move |v: String| filter_value.set(v))
                        />
                        <Button appearance=ButtonAppearance::Primary on_click=apply_filter_form>
                            "Apply"
                        </Button>
                    </Flex>
                }})
                tags=ChildrenFn::to_children(move || view! {
                    {move || controller.with(|c| c.filters().to_vec()).into_iter().map(|f| {
                        let label = format!("{}: {}", f.column_name, f.filter_value);
                        view! { <FilterTag label=label on_remove=Callback::new(move |_| clear_filters()) /> }
                    }).collect_view()}
                })
            />

            <Table attr:class="grid__table">
                <TableHeader>
                    <TableRow>
                        {header_cells}
                        <TableHeaderCell attr:class="grid__th grid__th--actions">"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let rows = rows.get();
                        if rows.is_empty() {
                            let column_span = column_span.clone();
                            return view! {
                                <TableRow>
                                    <TableCell attr:colspan=column_span attr:class="grid__empty">
                                        "No records"
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any();
                        }
                        let schema = schema.clone();
                        let columns = columns.clone();
                        rows.into_iter()
                            .map(|row| {
                                let cells = columns
                                    .iter()
                                    .map(|c| {
                                        let text = schema.display_text(&c.field, &row.value(&c.field));
                                        view! { <TableCell>{text}</TableCell> }
                                    })
                                    .collect_view();
                                let edit_row = row.clone();
                                let delete_row = row;
                                view! {
                                    <TableRow>
                                        {cells}
                                        <TableCell attr:class="grid__actions">
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| {
                                                    form.set(Some(session.with_value(|s| s.open_edit(&edit_row))));
                                                }
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| {
                                                    match session.with_value(|s| s.request_delete(&delete_row)) {
                                                        Some(target) => pending.set(Some(target)),
                                                        None => alert("This record has not been saved yet."),
                                                    }
                                                }
                                            >
                                                {icon("delete")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </TableBody>
            </Table>

            <DynamicFormModal form=form on_save=on_save />
            <ConfirmDialog pending=pending on_confirm=on_delete />
        </div>
    }
}
