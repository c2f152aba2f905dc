use crate::prelude::*;

use crate::{
    components::{
        misc::Teleport,
        svg::{Cancel, Close, DrawSvg},
    },
    utils::CCStr,
};

/// Dialog drawn above the application.
///
/// A non-persistent modal closes on a click outside its box. Escape always
/// closes it.
#[component]
pub fn Modal(
    is_open: Signal<bool>,
    #[props(default = false)] persistent: bool,
    children: Element,
) -> Element {
    let mut classes = use_signal(String::new);

    rsx! {
        Teleport {
            if is_open() {
                div {
                    class: "modal modal-open",
                    role: "dialog",
                    tabindex: "-1",
                    onmounted: move |evt| async move {
                        let _ = evt.set_focus(true).await;
                    },
                    onkeydown: move |evt| {
                        if evt.key() == Key::Escape {
                            *is_open.write() = false;
                        }
                    },
                    onclick: move |_| {
                        if persistent {
                            spawn(async move {
                                let orig_len = classes.read().len();
                                *classes.write() += " animate-scalebump";
                                tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
                                classes.write().truncate(orig_len);
                            });
                        } else {
                            *is_open.write() = false;
                        }
                    },
                    div {
                        class: "modal-box{classes}",
                        onclick: move |event| {
                            event.stop_propagation();
                        },
                        {children}
                    }
                }
            }
        }
    }
}

/// Modal with a title bar, closed only through its buttons or Escape.
#[component]
pub fn FormModal(is_open: Signal<bool>, title: CCStr, children: Element) -> Element {
    rsx! {
        Modal { is_open, persistent: true,
            ModalHeader { is_open, title }
            {children}
        }
    }
}

#[component]
pub fn InfoModal(is_open: Signal<bool>, title: CCStr, children: Element) -> Element {
    rsx! {
        Modal { is_open, persistent: false,
            ModalHeader { is_open, title }
            {children}
        }
    }
}

#[component]
pub fn CloseModalButton(mut signal: Signal<bool>) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "btn btn-outline",
            onclick: move |_| *signal.write() = false,
            DrawSvg::<Cancel> {}
            "Cancel"
        }
    }
}

#[component]
fn ModalHeader(mut is_open: Signal<bool>, title: CCStr) -> Element {
    rsx! {
        div { class: "modal-header",
            h2 { {title} }
            button {
                r#type: "button",
                class: "btn btn-circle btn-outline btn-sm",
                onclick: move |_| *is_open.write() = false,
                DrawSvg::<Close> {}
            }
        }
    }
}
