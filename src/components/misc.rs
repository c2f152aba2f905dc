use crate::prelude::*;

use crate::utils::{percent, CCStr};

/// Moves its children under the application root so that they escape any
/// clipping or stacking context of their parents.
#[component]
pub fn Teleport(children: Element) -> Element {
    let id = use_hook(uuid::Uuid::new_v4);

    log::debug!("Teleport {id} Rendered");

    use_effect(move || {
        document::eval(&format!(
            r#"
            const div_to_tp = document.getElementById("{id}");
            const div_app = document.getElementById("app");
            div_app.append(div_to_tp);
        "#
        ));
    });

    use_drop(move || {
        log::debug!("Teleport {id} Dropped");
        document::eval(&format!(
            r#"
            const div_to_tp = document.getElementById("{id}");
            const div_orig_parent = document.getElementById("parent_{id}");
            if (div_to_tp && div_orig_parent) {{ div_orig_parent.append(div_to_tp); }}
        "#
        ));
    });

    rsx! {
        div { id: "parent_{id}", class: "fixed",
            div { id: "{id}", {children} }
        }
    }
}

/// Width, in percent of the largest entry, of every bar of a [BarList].
pub fn bar_widths(entries: &[(CCStr, u64)]) -> Vec<u8> {
    let max = entries.iter().map(|(_, v)| *v).max().unwrap_or(0);
    entries.iter().map(|(_, v)| percent(*v, max)).collect()
}

/// Horizontal bar chart drawn with plain CSS.
#[component]
pub fn BarList(entries: Vec<(CCStr, u64)>, #[props(default)] empty_text: Option<CCStr>) -> Element {
    let widths = bar_widths(&entries);
    rsx! {
        if entries.is_empty() {
            div { class: "text-muted",
                {empty_text.unwrap_or_else(|| CCStr::from(crate::pagination::NO_RECORDS))}
            }
        } else {
            ul { class: "bar-list",
                for ((label , value) , width) in entries.into_iter().zip(widths) {
                    li { key: "{label}",
                        span { class: "bar-label", {label.clone()} }
                        span { class: "bar-track",
                            span { class: "bar-fill", style: "width: {width}%" }
                        }
                        span { class: "bar-value", "{value}" }
                    }
                }
            }
        }
    }
}

/// Headline number with a caption.
#[component]
pub fn StatCard(
    title: &'static str,
    value: LoadedComponentInput<u64>,
    #[props(default)] class: Option<&'static str>,
) -> Element {
    rsx! {
        div { class: "card stat-card {class.unwrap_or_default()}",
            div { class: "stat-title", {title} }
            div { class: "stat-value",
                LoadedComponent::<u64> { input: value }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_are_relative_to_the_largest_entry() {
        let entries = vec![
            (CCStr::from("FR"), 50),
            (CCStr::from("US"), 100),
            (CCStr::from("DE"), 0),
        ];
        assert_eq!(bar_widths(&entries), vec![50, 100, 0]);
        assert!(bar_widths(&[]).is_empty());
        assert_eq!(bar_widths(&[(CCStr::from("x"), 0)]), vec![0]);
    }
}
