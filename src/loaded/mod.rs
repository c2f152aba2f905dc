//! Declarative loading states for UI elements.
//!
//! A [LoadedElement](element::LoadedElement) knows how to draw itself and
//! how to draw a placeholder. [LoadedComponent](component::LoadedComponent)
//! picks one or the other from a
//! [LoadedComponentInput](component::LoadedComponentInput), wrapping the
//! placeholder with the element's [Loader](loaders::Loader) while data is
//! on its way or after it failed. Nested elements follow their parent's
//! state through a [LoadedComponentInputMapper](mapper::LoadedComponentInputMapper).

pub mod component;
mod converters;
mod element;
pub mod loaders;
pub mod mapper;

pub mod prelude {
    pub use super::component::{LoadedComponent, LoadedComponentInput, StaticLoadedComponent};
    pub use super::element::LoadedElement;
    pub use super::loaders::{SkeletonLoader, TransparentLoader};
    pub use super::mapper::LoadedComponentInputMapper;
}
