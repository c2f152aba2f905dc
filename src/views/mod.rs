use crate::prelude::*;

use crate::utils::CCStr;

pub mod app_config;
pub mod audit;
pub mod dashboard;
pub mod main_layout;
pub mod tutorial;
pub mod users;

#[component]
fn TitledView(title: CCStr, subtitle: CCStr, right: Option<Element>, children: Element) -> Element {
    rsx! {
        div { class: "view-title",
            div {
                h1 { {title} }
                h2 { {subtitle} }
            }
            div { class: "view-title-right", {right} }
        }
        div { class: "view-separator" }
        {children}
    }
}

/// Card with a heading, used by the dashboards.
#[component]
fn Panel(title: &'static str, #[props(default)] class: Option<&'static str>, children: Element) -> Element {
    rsx! {
        section { class: "card panel {class.unwrap_or_default()}",
            h3 { class: "panel-title", {title} }
            {children}
        }
    }
}
