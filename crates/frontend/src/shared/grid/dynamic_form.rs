use contracts::shared::grid::{DynamicForm, FieldValue, FormSubmission, Mode};
use leptos::prelude::*;
use thaw::*;

use super::widget_control::WidgetControlView;
use crate::shared::modal_frame::ModalFrame;

/// Create/update modal over an open [`DynamicForm`].
///
/// `form` is `Some` while the modal is shown. A successful save closes it and
/// hands the submission to `on_save`; a validation failure keeps it open with
/// the message inline.
#[component]
pub fn DynamicFormModal(
    form: RwSignal<Option<DynamicForm>>,
    on_save: Callback<FormSubmission>,
) -> impl IntoView {
    // Mode and controls change only when a form opens, not on every keystroke
    let layout = Memo::new(move |_| {
        form.with(|f| f.as_ref().map(|f| (f.mode(), f.columns().to_vec())))
    });
    let error = Signal::derive(move || {
        form.with(|f| f.as_ref().and_then(|f| f.error().map(str::to_string)))
    });

    let close = Callback::new(move |_| {
        form.update(|f| {
            if let Some(f) = f {
                f.cancel();
            }
        });
        form.set(None);
    });

    let save = move || {
        let outcome = form.try_update(|f| f.as_mut().map(|f| f.save())).flatten();
        match outcome {
            Some(Ok(submission)) => {
                form.set(None);
                on_save.run(submission);
            }
            Some(Err(e)) => log::debug!("form not saved: {}", e),
            None => {}
        }
    };

    view! {
        {move || layout.get().map(|(mode, columns)| {
            let title = match mode {
                Mode::Create => "Add record",
                _ => "Edit record",
            };
            view! {
                <ModalFrame title=title.to_string() on_close=close modal_class="modal--form">
                    <div class="dynamic-form">
                        {move || error.get().map(|err| view! {
                            <div class="warning-box warning-box--error">
                                <span class="warning-box__icon">"⚠"</span>
                                <span class="warning-box__text">{err}</span>
                            </div>
                        })}
                        {columns
                            .into_iter()
                            .map(|column| {
                                let read_field = column.field.clone();
                                let value = Signal::derive(move || {
                                    form.with(|f| {
                                        f.as_ref()
                                            .map(|f| f.record().value(&read_field))
                                            .unwrap_or(FieldValue::Null)
                                    })
                                });
                                let write_field = column.field.clone();
                                let on_change = Callback::new(move |raw: String| {
                                    form.update(|f| {
                                        if let Some(f) = f {
                                            f.change(&write_field, &raw);
                                        }
                                    });
                                });
                                view! { <WidgetControlView column=column value=value on_change=on_change /> }
                            })
                            .collect_view()}
                        <div class="dynamic-form__actions">
                            <Button appearance=ButtonAppearance::Primary on_click=move |_| save()>
                                "Save"
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                                "Cancel"
                            </Button>
                        </div>
                    </div>
                </ModalFrame>
            }
        })}
    }
}
