use crate::prelude::*;

mod svgs;
pub use svgs::*;
// Explicit so it wins over the router `History` trait from the prelude glob.
pub use svgs::History;

/// Icons are drawn on a 24x24 grid and scaled by CSS.
const VIEW_BOX: &str = "0 0 24 24";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSize {
    /// Inline with table rows and small buttons
    Small,
    #[default]
    Regular,
}

impl IconSize {
    fn class(self) -> &'static str {
        match self {
            Self::Small => "icon icon-sm",
            Self::Regular => "icon",
        }
    }
}

/// An MDI icon, identified by its path data.
pub trait DrawableSvg: 'static {
    const PATH: &'static str;
}

#[derive(Props, Clone, PartialEq)]
pub struct DrawSvgProps {
    #[props(default)]
    pub size: IconSize,
}

/// Draws the icon `S` in the current text color.
#[allow(non_snake_case)]
pub fn DrawSvg<S: DrawableSvg>(DrawSvgProps { size }: DrawSvgProps) -> Element {
    rsx! {
        svg {
            xmlns: "http://www.w3.org/2000/svg",
            view_box: VIEW_BOX,
            class: size.class(),
            path { d: S::PATH }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_icons_keep_the_base_class() {
        assert_eq!(IconSize::default(), IconSize::Regular);
        assert!(IconSize::Small.class().split(' ').any(|c| c == "icon"));
        assert!(Close::PATH.starts_with('M'));
    }
}
