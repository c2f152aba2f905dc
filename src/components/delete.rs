use crate::prelude::*;

use crate::{
    components::{
        modal::{CloseModalButton, FormModal},
        svg::{AlertCircle, Delete, DrawSvg},
    },
    utils::CCStr,
};

/// Deletion dialog. The delete button is only enabled once the operator ticked
/// the acknowledgment box.
#[component]
pub fn ConfirmDeleteModal(
    is_open: Signal<bool>,
    subject: CCStr,
    deleting: ReadOnlySignal<bool>,
    on_confirm: EventHandler<()>,
) -> Element {
    let mut acknowledge = use_signal(|| false);

    // Every opening starts unticked
    use_effect(move || {
        if !is_open() {
            acknowledge.set(false);
        }
    });

    rsx! {
        FormModal { is_open, title: CCStr::from("Delete user"),
            AlertDeleteAck { acknowledge,
                p {
                    "You are about to delete "
                    span { class: "font-bold", {subject} }
                    ". This cannot be undone."
                }
            }
            div { class: "modal-actions",
                CloseModalButton { signal: is_open }
                button {
                    class: "btn btn-error",
                    disabled: !acknowledge() || deleting(),
                    onclick: move |_| on_confirm.call(()),
                    if deleting() {
                        span { class: "loading loading-spinner" }
                    } else {
                        DrawSvg::<Delete> {}
                    }
                    "Delete"
                }
            }
        }
    }
}

#[component]
fn AlertDeleteAck(acknowledge: Signal<bool>, children: Element) -> Element {
    rsx! {
        div { class: "alert alert-error",
            DrawSvg::<AlertCircle> {}
            div { {children} }
        }
        label { class: "label ack-label",
            input {
                r#type: "checkbox",
                class: "checkbox",
                checked: acknowledge(),
                onchange: move |evt| *acknowledge.write() = evt.checked(),
            }
            span { class: "font-bold", "I understand that this user will be permanently removed." }
        }
    }
}
