use contracts::shared::grid::PendingDelete;
use leptos::prelude::*;
use thaw::*;

use crate::shared::modal_frame::ModalFrame;

/// Delete confirmation. Cancelling sends nothing.
#[component]
pub fn ConfirmDialog(
    pending: RwSignal<Option<PendingDelete>>,
    on_confirm: Callback<PendingDelete>,
) -> impl IntoView {
    let cancel = Callback::new(move |_| pending.set(None));

    view! {
        {move || pending.get().map(|target| {
            let message = format!("Delete \"{}\"? This cannot be undone.", target.label);
            view! {
                <ModalFrame title="Delete record".to_string() on_close=cancel modal_class="modal--confirm">
                    <p class="confirm-dialog__text">{message}</p>
                    <div class="confirm-dialog__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| {
                                pending.set(None);
                                on_confirm.run(target.clone());
                            }
                        >
                            "Delete"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| cancel.run(())>
                            "Cancel"
                        </Button>
                    </div>
                </ModalFrame>
            }
        })}
    }
}
