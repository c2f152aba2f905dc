use dioxus::prelude::*;

use super::{component::LoadedComponent, loaders, mapper::LoadedComponentInputMapper};

/// Something that can be drawn either for real or as a loading placeholder.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct RoleBadge(CCStr);
///
/// impl LoadedElement for RoleBadge {
///     type Loader = SkeletonLoader;
///
///     fn element<M: LoadedComponentInputMapper>(self, _m: M) -> Element {
///         rsx! { span { class: "badge", {self.0} } }
///     }
///
///     fn place_holder() -> Self {
///         Self(CCStr::from("viewer"))
///     }
/// }
/// ```
pub trait LoadedElement: Clone + PartialEq + 'static {
    /// How the placeholder is dressed while loading or after an error
    type Loader: loaders::Loader;

    /// Draws the element. Nested elements must go through `m` so that they
    /// follow the loading state of their parent.
    fn element<M: LoadedComponentInputMapper>(self, m: M) -> Element;

    /// A stand-in value with a realistic size.
    fn place_holder() -> Self;
}

impl LoadedElement for () {
    type Loader = loaders::SkeletonLoader;
    #[inline(always)]
    fn element<M: LoadedComponentInputMapper>(self, _m: M) -> Element {
        rsx! {}
    }

    fn place_holder() -> Self {}
}

macro_rules! loaded_str {
    ($t:ty ) => {
        impl LoadedElement for $t {
            type Loader = loaders::SkeletonLoader;
            #[inline(always)]
            fn element<M: LoadedComponentInputMapper>(self, _m: M) -> Element {
                rsx! {
                    {self}
                }
            }

            fn place_holder() -> Self {
                "Loading...".into()
            }
        }
    };
}
loaded_str!(crate::utils::CCStr);
loaded_str!(&'static str);

macro_rules! loaded_numbers {
    ($t:ty, $place_holder:expr ) => {
        impl LoadedElement for $t {
            type Loader = loaders::SkeletonLoader;
            #[inline(always)]
            fn element<M: LoadedComponentInputMapper>(self, _m: M) -> Element {
                rsx! {
                    "{self}"
                }
            }

            fn place_holder() -> Self {
                $place_holder
            }
        }
    };
}
loaded_numbers!(u8, 100);
loaded_numbers!(u32, 1234);
loaded_numbers!(u64, 1234);
loaded_numbers!(usize, 1234);

impl<T: LoadedElement> LoadedElement for Vec<T> {
    type Loader = loaders::TransparentLoader;
    #[inline(always)]
    fn element<M: LoadedComponentInputMapper>(self, m: M) -> Element {
        rsx! {
            for item in self {
                LoadedComponent::<T> { input: m.map(item) }
            }
        }
    }

    fn place_holder() -> Self {
        (0..3).map(|_| T::place_holder()).collect()
    }
}
