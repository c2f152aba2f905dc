use dioxus::prelude::*;

/// Dresses a placeholder for the loading and error states.
pub trait Loader {
    fn load(children: Element) -> Element;
    fn error(children: Element) -> Element;
}

/// Animated block keeping the size of the hidden placeholder.
pub struct SkeletonLoader;
impl Loader for SkeletonLoader {
    #[inline(always)]
    fn load(children: Element) -> Element {
        rsx! {
            span { class: "skeleton",
                span { class: "invisible", {children} }
            }
        }
    }
    #[inline(always)]
    fn error(children: Element) -> Element {
        rsx! {
            span { class: "skeleton-error",
                span { class: "skeleton-error-label", "ERROR" }
                span { class: "invisible", {children} }
            }
        }
    }
}

/// Leaves the placeholder untouched, for containers whose children load on their own.
pub struct TransparentLoader;
impl Loader for TransparentLoader {
    #[inline(always)]
    fn load(children: Element) -> Element {
        children
    }
    #[inline(always)]
    fn error(children: Element) -> Element {
        children
    }
}
