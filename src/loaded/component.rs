use dioxus::prelude::*;

use crate::utils::CCStr;

use super::{element::LoadedElement, loaders::Loader};

/// Loading state of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedComponentInput<T: LoadedElement> {
    Loading,
    LoadedSuccess(T),
    LoadedError(CCStr),
}

/// Draws `input` as the real element, or as its dressed placeholder.
#[component]
pub fn LoadedComponent<T: LoadedElement>(input: LoadedComponentInput<T>) -> Element {
    match input {
        LoadedComponentInput::Loading => {
            T::Loader::load(T::place_holder().element(super::mapper::Loading))
        }
        LoadedComponentInput::LoadedSuccess(c) => c.element(super::mapper::LoadedSuccess),
        LoadedComponentInput::LoadedError(e) => {
            log::error!("{e}");
            T::Loader::error(T::place_holder().element(super::mapper::LoadedError(e)))
        }
    }
}

/// Static children that still take part in a loading state.
#[component]
pub fn StaticLoadedComponent(input: LoadedComponentInput<()>, children: Element) -> Element {
    match input {
        LoadedComponentInput::Loading => <() as LoadedElement>::Loader::load(children),
        LoadedComponentInput::LoadedSuccess(_) => children,
        LoadedComponentInput::LoadedError(e) => {
            log::error!("{e}");
            <() as LoadedElement>::Loader::error(children)
        }
    }
}
