use crate::utils::CCStr;

use super::{component::LoadedComponentInput, element::LoadedElement};

/// Propagates the loading state of a parent element to its children.
pub trait LoadedComponentInputMapper {
    /// Wraps a child value according to the parent state.
    fn map<T: LoadedElement>(&self, t: T) -> LoadedComponentInput<T>;

    /// Same as [map](Self::map) for a child that already carries its own state.
    fn lc_map<T: LoadedElement>(&self, t: LoadedComponentInput<T>) -> LoadedComponentInput<T>;
}

/// Parent is loading, so are the children.
pub struct Loading;
impl LoadedComponentInputMapper for Loading {
    #[inline(always)]
    fn map<T: LoadedElement>(&self, _t: T) -> LoadedComponentInput<T> {
        LoadedComponentInput::Loading
    }

    #[inline(always)]
    fn lc_map<T: LoadedElement>(&self, _t: LoadedComponentInput<T>) -> LoadedComponentInput<T> {
        LoadedComponentInput::Loading
    }
}

/// Parent failed, children show the same error.
pub struct LoadedError(pub CCStr);
impl LoadedComponentInputMapper for LoadedError {
    #[inline(always)]
    fn map<T: LoadedElement>(&self, _t: T) -> LoadedComponentInput<T> {
        LoadedComponentInput::LoadedError(self.0.clone())
    }

    #[inline(always)]
    fn lc_map<T: LoadedElement>(&self, _t: LoadedComponentInput<T>) -> LoadedComponentInput<T> {
        LoadedComponentInput::LoadedError(self.0.clone())
    }
}

/// Parent is loaded, children keep their own state.
pub struct LoadedSuccess;
impl LoadedComponentInputMapper for LoadedSuccess {
    #[inline(always)]
    fn map<T: LoadedElement>(&self, t: T) -> LoadedComponentInput<T> {
        LoadedComponentInput::LoadedSuccess(t)
    }

    #[inline(always)]
    fn lc_map<T: LoadedElement>(&self, t: LoadedComponentInput<T>) -> LoadedComponentInput<T> {
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mappers_follow_parent_state() {
        let child = CCStr::from("bob");
        assert_eq!(Loading.map(child.clone()), LoadedComponentInput::Loading);
        assert_eq!(
            LoadedSuccess.map(child.clone()),
            LoadedComponentInput::LoadedSuccess(child.clone())
        );
        assert_eq!(
            LoadedError("boom".into()).lc_map(LoadedComponentInput::LoadedSuccess(child)),
            LoadedComponentInput::LoadedError("boom".into())
        );
        assert_eq!(
            LoadedSuccess.lc_map(LoadedComponentInput::<CCStr>::Loading),
            LoadedComponentInput::Loading
        );
    }
}
