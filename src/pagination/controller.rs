use super::{
    FetchResult, PageNav, PageQuery, PageState, PagerPolicy, PagerView, TableBody, TableError,
};

/// Lifecycle of a table: Idle, then Loading and Rendered or Error on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Rendered,
    Error,
}

/// Everything a view needs to draw a table at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSnapshot<R> {
    pub state: PageState,
    pub phase: Phase,
    pub body: TableBody<R>,
    pub pager: Option<PagerView>,
}

impl<R> TableSnapshot<R> {
    pub fn new(per_page: u64) -> Self {
        Self {
            state: PageState::new(per_page),
            phase: Phase::Idle,
            body: TableBody::Loading,
            pager: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Loading)
    }

    /// One-based inclusive range of the records on display.
    pub fn shown_range(&self) -> Option<(u64, u64)> {
        self.state.shown_range(self.body.records().len())
    }
}

/// A fetch the controller asked for, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub seq: u64,
    pub query: PageQuery,
}

/// What happened to a fetch answer handed to [TableController::apply].
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// A newer request was issued since, the answer was dropped
    Stale,
    Rendered,
    Failed(TableError),
    /// The total shrank below the current page; the clamped page must be fetched
    Refetch(Ticket),
}

/// Synchronous core of a paginated table.
///
/// Owns the [PageState] and the last rendered body, and tags every fetch
/// with a monotonically increasing sequence number so that only the answer
/// to the latest request is ever applied.
#[derive(Debug)]
pub struct TableController<R> {
    state: PageState,
    policy: PagerPolicy,
    phase: Phase,
    body: TableBody<R>,
    seq: u64,
}

impl<R: Clone> TableController<R> {
    pub fn new(per_page: u64, policy: PagerPolicy) -> Self {
        Self {
            state: PageState::new(per_page),
            policy,
            phase: Phase::Idle,
            body: TableBody::Loading,
            seq: 0,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Drops whatever is in flight and shows the loading placeholders.
    fn invalidate(&mut self) {
        self.seq += 1;
        self.phase = Phase::Loading;
        self.body = TableBody::Loading;
    }

    /// Starts a new fetch of the current page, superseding any in-flight one.
    pub fn issue(&mut self) -> Ticket {
        self.invalidate();
        Ticket {
            seq: self.seq,
            query: self.state.query(),
        }
    }

    /// Clamps `n` into the valid page range and fetches that page.
    pub fn set_page(&mut self, n: i64) -> Ticket {
        self.state.set_page(n);
        self.issue()
    }

    /// Follows a pager button. Disabled or out-of-range targets are ignored.
    pub fn navigate(&mut self, nav: PageNav) -> Option<Ticket> {
        let target = self.pager()?.target(nav)?;
        Some(self.set_page(target as i64))
    }

    /// Updates one filter and rewinds to the first page.
    ///
    /// Returns whether the rows on display no longer match the state. In that
    /// case any in-flight answer is already stale and the caller must issue a
    /// fetch, which is left to it so that it can be debounced.
    pub fn set_filter(&mut self, key: &str, value: &str) -> Result<bool, TableError> {
        let page = self.state.page();
        let changed = self.state.set_filter(key, value)?;
        let outdated = changed || self.state.page() != page;
        if outdated {
            self.invalidate();
        }
        Ok(outdated)
    }

    pub fn apply(
        &mut self,
        seq: u64,
        result: Result<FetchResult<R>, TableError>,
    ) -> ApplyOutcome {
        if seq != self.seq {
            return ApplyOutcome::Stale;
        }
        match result {
            Ok(FetchResult { items, total }) => {
                if self.state.set_total(total) {
                    return ApplyOutcome::Refetch(self.issue());
                }
                self.body = TableBody::from_items(items);
                self.phase = Phase::Rendered;
                ApplyOutcome::Rendered
            }
            Err(e) => {
                // The last known total is kept so the pager stays usable
                self.body = TableBody::Error(e.to_string().into());
                self.phase = Phase::Error;
                ApplyOutcome::Failed(e)
            }
        }
    }

    pub fn pager(&self) -> Option<PagerView> {
        PagerView::render(
            self.policy,
            self.state.page(),
            self.state.total_pages(),
            self.phase == Phase::Loading,
        )
    }

    pub fn snapshot(&self) -> TableSnapshot<R> {
        TableSnapshot {
            state: self.state.clone(),
            phase: self.phase,
            body: self.body.clone(),
            pager: self.pager(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(query: &PageQuery, total: u64) -> FetchResult<u64> {
        let start = query.offset();
        let end = (start + query.per_page).min(total);
        FetchResult::new(((start + 1)..=end).collect(), total)
    }

    fn loaded(total: u64) -> TableController<u64> {
        let mut ctrl = TableController::new(10, PagerPolicy::default());
        let ticket = ctrl.issue();
        assert_eq!(
            ctrl.apply(ticket.seq, Ok(page_of(&ticket.query, total))),
            ApplyOutcome::Rendered
        );
        ctrl
    }

    #[test]
    fn forty_seven_items_in_five_pages() {
        let mut ctrl = loaded(47);
        assert_eq!(ctrl.state().total_pages(), 5);

        let ticket = ctrl.set_page(5);
        assert_eq!(ticket.query.page, 5);
        assert!(ctrl.pager().is_some_and(|p| !p.next_enabled && !p.prev_enabled));
        ctrl.apply(ticket.seq, Ok(page_of(&ticket.query, 47)));

        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.body.records(), &[41, 42, 43, 44, 45, 46, 47]);
        assert_eq!(snapshot.shown_range(), Some((41, 47)));
        let pager = snapshot.pager.unwrap();
        assert!(!pager.next_enabled);
        assert!(pager.prev_enabled);

        assert_eq!(ctrl.set_page(0).query.page, 1);
    }

    #[test]
    fn only_latest_answer_is_applied() {
        let mut ctrl = loaded(47);
        let second = ctrl.set_page(2);
        let third = ctrl.set_page(3);

        assert_eq!(
            ctrl.apply(third.seq, Ok(page_of(&third.query, 47))),
            ApplyOutcome::Rendered
        );
        assert_eq!(
            ctrl.apply(second.seq, Ok(page_of(&second.query, 47))),
            ApplyOutcome::Stale
        );
        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.state.page(), 3);
        assert_eq!(snapshot.body.records().first(), Some(&21));
    }

    #[test]
    fn failure_keeps_total_and_pager_usable() {
        let mut ctrl = loaded(47);
        let ticket = ctrl.set_page(3);
        let outcome = ctrl.apply(
            ticket.seq,
            Err(TableError::Network("connection refused".into())),
        );
        assert!(matches!(outcome, ApplyOutcome::Failed(TableError::Network(_))));

        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.phase, Phase::Error);
        assert_eq!(snapshot.body.rows().len(), 1);
        assert_eq!(snapshot.state.total(), 47);
        let pager = snapshot.pager.unwrap();
        assert!(pager.prev_enabled);
        assert!(pager.next_enabled);
    }

    #[test]
    fn shrinking_total_triggers_refetch_of_clamped_page() {
        let mut ctrl = loaded(47);
        let ticket = ctrl.set_page(5);
        let ApplyOutcome::Refetch(again) = ctrl.apply(ticket.seq, Ok(page_of(&ticket.query, 12)))
        else {
            panic!("expected a refetch");
        };
        assert_eq!(again.query.page, 2);
        assert_eq!(ctrl.phase(), Phase::Loading);
        assert_eq!(
            ctrl.apply(again.seq, Ok(page_of(&again.query, 12))),
            ApplyOutcome::Rendered
        );
        assert_eq!(ctrl.snapshot().body.records(), &[11, 12]);
    }

    #[test]
    fn navigation_is_ignored_while_loading_or_at_bounds() {
        let mut ctrl = loaded(47);
        assert!(ctrl.navigate(PageNav::Previous).is_none());
        let ticket = ctrl.navigate(PageNav::Next).unwrap();
        assert_eq!(ticket.query.page, 2);
        assert!(ctrl.navigate(PageNav::Next).is_none());
        ctrl.apply(ticket.seq, Ok(page_of(&ticket.query, 47)));
        assert_eq!(ctrl.navigate(PageNav::Goto(5)).unwrap().query.page, 5);
    }

    #[test]
    fn filter_change_drops_answer_in_flight() {
        let mut ctrl = loaded(47);
        let third = ctrl.set_page(3);

        assert_eq!(ctrl.set_filter("search", "bob"), Ok(true));
        assert_eq!(ctrl.phase(), Phase::Loading);
        assert!(ctrl.pager().is_some_and(|p| !p.prev_enabled && !p.next_enabled));
        assert_eq!(
            ctrl.apply(third.seq, Ok(page_of(&third.query, 47))),
            ApplyOutcome::Stale
        );
        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.state.page(), 1);
        assert_eq!(snapshot.body, TableBody::Loading);
        assert_eq!(snapshot.shown_range(), None);

        let ticket = ctrl.issue();
        assert_eq!(ticket.query.filters.get("search").map(String::as_str), Some("bob"));
        ctrl.apply(ticket.seq, Ok(page_of(&ticket.query, 47)));
        assert_eq!(ctrl.snapshot().body.records().first(), Some(&1));
    }

    #[test]
    fn repeated_filter_value_keeps_rendered_page() {
        let mut ctrl = loaded(47);
        assert_eq!(ctrl.set_filter("role", "editor"), Ok(true));
        let ticket = ctrl.issue();
        ctrl.apply(ticket.seq, Ok(page_of(&ticket.query, 47)));

        assert_eq!(ctrl.set_filter("role", " editor "), Ok(false));
        assert_eq!(ctrl.phase(), Phase::Rendered);
        assert_eq!(ctrl.snapshot().shown_range(), Some((1, 10)));

        // Same value but away from the first page: the rewind needs a fetch
        let ticket = ctrl.set_page(2);
        ctrl.apply(ticket.seq, Ok(page_of(&ticket.query, 47)));
        assert_eq!(ctrl.set_filter("role", "editor"), Ok(true));
        assert_eq!(ctrl.state().page(), 1);
        assert_eq!(ctrl.phase(), Phase::Loading);
    }

    #[test]
    fn empty_collection_renders_message_without_pager() {
        let ctrl = loaded(0);
        let snapshot = ctrl.snapshot();
        assert_eq!(snapshot.body, TableBody::Empty);
        assert_eq!(snapshot.pager, None);
        assert_eq!(snapshot.shown_range(), None);
    }
}
