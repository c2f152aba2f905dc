use crate::prelude::*;

use crate::{api::ActionKind, utils::CCStr};

/// Role of a user, colored by privilege.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleBadge(pub CCStr);

impl RoleBadge {
    fn class(&self) -> &'static str {
        match self.0.to_ascii_lowercase().as_str() {
            "root" => "badge-error",
            "admin" => "badge-warning",
            "editor" => "badge-info",
            _ => "badge-neutral",
        }
    }
}

impl LoadedElement for RoleBadge {
    type Loader = SkeletonLoader;
    #[inline(always)]
    fn element<M: LoadedComponentInputMapper>(self, _m: M) -> Element {
        rsx! {
            span { class: "badge {self.class()}", {self.0.clone()} }
        }
    }

    fn place_holder() -> Self {
        Self(CCStr::from("viewer"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBadge(pub bool);

impl LoadedElement for ActiveBadge {
    type Loader = SkeletonLoader;
    #[inline(always)]
    fn element<M: LoadedComponentInputMapper>(self, _m: M) -> Element {
        rsx! {
            if self.0 {
                span { class: "badge badge-success", "Active" }
            } else {
                span { class: "badge badge-ghost", "Inactive" }
            }
        }
    }

    fn place_holder() -> Self {
        Self(true)
    }
}

/// Audit action type, colored by its [ActionKind].
#[derive(Debug, Clone, PartialEq)]
pub struct ActionBadge(pub CCStr);

impl LoadedElement for ActionBadge {
    type Loader = SkeletonLoader;
    #[inline(always)]
    fn element<M: LoadedComponentInputMapper>(self, _m: M) -> Element {
        let class = ActionKind::of(&self.0).css_class();
        rsx! {
            span { class: "badge {class}", {self.0} }
        }
    }

    fn place_holder() -> Self {
        Self(CCStr::from("update_user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_colors_follow_privilege() {
        assert_eq!(RoleBadge("Root".into()).class(), "badge-error");
        assert_eq!(RoleBadge("admin".into()).class(), "badge-warning");
        assert_eq!(RoleBadge("viewer".into()).class(), "badge-neutral");
        assert_eq!(RoleBadge("unknown".into()).class(), "badge-neutral");
    }
}
