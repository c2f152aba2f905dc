/// When a pager is worth drawing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerPolicy {
    /// The pager is hidden while the page count is at or below this value
    pub hide_at_or_below: u64,
}

impl Default for PagerPolicy {
    fn default() -> Self {
        Self {
            hide_at_or_below: 1,
        }
    }
}

impl PagerPolicy {
    pub const fn hide_at_or_below(pages: u64) -> Self {
        Self {
            hide_at_or_below: pages,
        }
    }
}

/// Navigation request coming from the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNav {
    Previous,
    Next,
    Goto(u64),
}

/// Drawable state of the Previous/Next pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerView {
    pub page: u64,
    pub total_pages: u64,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PagerView {
    /// Returns `None` when `policy` says nothing should be drawn.
    ///
    /// A `busy` pager (fetch in flight) has both buttons disabled.
    pub fn render(policy: PagerPolicy, page: u64, total_pages: u64, busy: bool) -> Option<Self> {
        if total_pages <= policy.hide_at_or_below {
            return None;
        }
        Some(Self {
            page,
            total_pages,
            prev_enabled: !busy && page > 1,
            next_enabled: !busy && page < total_pages,
        })
    }

    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }

    /// Page a navigation request leads to, or `None` if it falls out of range
    /// or the corresponding button is disabled.
    pub fn target(&self, nav: PageNav) -> Option<u64> {
        match nav {
            PageNav::Previous => self.prev_enabled.then(|| self.page - 1),
            PageNav::Next => self.next_enabled.then(|| self.page + 1),
            PageNav::Goto(n) => (1..=self.total_pages).contains(&n).then_some(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_at_or_below_threshold() {
        let default = PagerPolicy::default();
        assert!(PagerView::render(default, 1, 1, false).is_none());
        assert!(PagerView::render(default, 1, 2, false).is_some());

        let audit = PagerPolicy::hide_at_or_below(5);
        for pages in 1..=5 {
            assert!(PagerView::render(audit, 1, pages, false).is_none());
        }
        assert!(PagerView::render(audit, 1, 6, false).is_some());
    }

    #[test]
    fn boundaries_disable_buttons() {
        let first = PagerView::render(PagerPolicy::default(), 1, 5, false).unwrap();
        assert!(!first.prev_enabled);
        assert!(first.next_enabled);
        assert_eq!(first.indicator(), "Page 1 of 5");

        let last = PagerView::render(PagerPolicy::default(), 5, 5, false).unwrap();
        assert!(last.prev_enabled);
        assert!(!last.next_enabled);
        assert_eq!(last.indicator(), "Page 5 of 5");
    }

    #[test]
    fn busy_pager_is_disabled() {
        let pager = PagerView::render(PagerPolicy::default(), 3, 5, true).unwrap();
        assert!(!pager.prev_enabled);
        assert!(!pager.next_enabled);
        assert_eq!(pager.target(PageNav::Next), None);
    }

    #[test]
    fn out_of_range_targets_are_rejected() {
        let pager = PagerView::render(PagerPolicy::default(), 5, 5, false).unwrap();
        assert_eq!(pager.target(PageNav::Next), None);
        assert_eq!(pager.target(PageNav::Previous), Some(4));
        assert_eq!(pager.target(PageNav::Goto(0)), None);
        assert_eq!(pager.target(PageNav::Goto(6)), None);
        assert_eq!(pager.target(PageNav::Goto(2)), Some(2));
    }
}
