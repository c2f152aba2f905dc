use dioxus::prelude::*;

use super::{component::LoadedComponentInput, element::LoadedElement};

impl<T: LoadedElement> From<T> for LoadedComponentInput<T> {
    #[inline(always)]
    fn from(value: T) -> Self {
        Self::LoadedSuccess(value)
    }
}

impl<T: LoadedElement, E: core::fmt::Display> From<Result<T, E>> for LoadedComponentInput<T> {
    #[inline(always)]
    fn from(value: Result<T, E>) -> Self {
        match value {
            Ok(t) => Self::LoadedSuccess(t),
            Err(e) => Self::LoadedError(e.to_string().into()),
        }
    }
}

/// `None` means the value is still loading.
impl<T: LoadedElement, U: Into<LoadedComponentInput<T>>> From<Option<U>>
    for LoadedComponentInput<T>
{
    #[inline(always)]
    fn from(value: Option<U>) -> Self {
        match value {
            Some(u) => u.into(),
            None => Self::Loading,
        }
    }
}

impl<T: LoadedElement> LoadedComponentInput<T> {
    /// Reads a fallible [Resource] and converts its value with `f` once it is there.
    pub fn from_resource<U: 'static, E: core::fmt::Display + 'static>(
        resource: &Resource<Result<U, E>>,
        f: impl FnOnce(&U) -> T,
    ) -> Self {
        match &*resource.read() {
            None => Self::Loading,
            Some(Ok(u)) => Self::LoadedSuccess(f(u)),
            Some(Err(e)) => Self::LoadedError(e.to_string().into()),
        }
    }
}
