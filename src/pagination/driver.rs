use std::{pin::Pin, time::Duration};

use futures_util::{
    future::LocalBoxFuture,
    stream::{FuturesUnordered, Stream, StreamExt},
    FutureExt,
};
use tokio::time::Sleep;

use super::{
    ApplyOutcome, DataFetcher, FetchResult, PageNav, PagerPolicy, TableController, TableError,
    TableSnapshot, Ticket,
};

/// Delay applied to filter changes before a fetch is issued.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// User input a table reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableCommand {
    SetPage(i64),
    Navigate(PageNav),
    SetFilter { key: String, value: String },
    Reload,
}

impl TableCommand {
    pub fn filter(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetFilter {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Receives what the driver produces.
pub trait TableSink<R> {
    fn publish(&mut self, snapshot: TableSnapshot<R>);
    fn report_error(&mut self, _error: &TableError) {}
}

type InFlight<R> = FuturesUnordered<LocalBoxFuture<'static, (u64, Result<FetchResult<R>, TableError>)>>;

/// Event loop of one table view.
///
/// Turns [TableCommand]s into [TableController] mutations, runs the fetches
/// concurrently and pushes every new [TableSnapshot] to the sink. Filter
/// changes are debounced, page changes are fetched right away and cancel a
/// pending debounce. The loop ends when the command stream does.
pub struct TableDriver<F: DataFetcher, S> {
    fetcher: F,
    controller: TableController<F::Record>,
    sink: S,
    debounce: Duration,
}

impl<F, S> TableDriver<F, S>
where
    F: DataFetcher,
    S: TableSink<F::Record>,
{
    pub fn new(fetcher: F, per_page: u64, policy: PagerPolicy, sink: S) -> Self {
        Self {
            fetcher,
            controller: TableController::new(per_page, policy),
            sink,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub async fn run(self, commands: impl Stream<Item = TableCommand>) {
        let Self {
            fetcher,
            mut controller,
            mut sink,
            debounce,
        } = self;
        let mut commands = std::pin::pin!(commands);
        let mut in_flight: InFlight<F::Record> = FuturesUnordered::new();
        let mut debounce_timer: Option<Pin<Box<Sleep>>> = None;

        log::debug!("TableDriver - start");
        launch(&fetcher, controller.issue(), &mut in_flight);
        sink.publish(controller.snapshot());

        loop {
            tokio::select! {
                cmd = commands.next() => {
                    let Some(cmd) = cmd else {
                        break;
                    };
                    log::debug!("TableDriver - Processing command {cmd:?}");
                    let ticket = match cmd {
                        TableCommand::SetPage(n) => Some(controller.set_page(n)),
                        TableCommand::Navigate(nav) => controller.navigate(nav),
                        TableCommand::Reload => Some(controller.issue()),
                        TableCommand::SetFilter { key, value } => {
                            match controller.set_filter(&key, &value) {
                                Ok(true) => {
                                    debounce_timer = Some(Box::pin(tokio::time::sleep(debounce)));
                                    sink.publish(controller.snapshot());
                                }
                                Ok(false) => {
                                    log::debug!("TableDriver - Filter {key} unchanged");
                                }
                                Err(e) => {
                                    log::warn!("TableDriver - Filter rejected: {e}");
                                    sink.report_error(&e);
                                }
                            }
                            None
                        }
                    };
                    if let Some(ticket) = ticket {
                        debounce_timer = None;
                        launch(&fetcher, ticket, &mut in_flight);
                        sink.publish(controller.snapshot());
                    }
                }
                () = debounce_elapsed(&mut debounce_timer) => {
                    debounce_timer = None;
                    launch(&fetcher, controller.issue(), &mut in_flight);
                    sink.publish(controller.snapshot());
                }
                Some((seq, result)) = in_flight.next() => {
                    match controller.apply(seq, result) {
                        ApplyOutcome::Stale => {
                            log::debug!("TableDriver - Dropping stale answer #{seq}");
                        }
                        ApplyOutcome::Rendered => sink.publish(controller.snapshot()),
                        ApplyOutcome::Failed(e) => {
                            log::error!("TableDriver - Fetch #{seq} failed: {e}");
                            sink.report_error(&e);
                            sink.publish(controller.snapshot());
                        }
                        ApplyOutcome::Refetch(ticket) => {
                            launch(&fetcher, ticket, &mut in_flight);
                            sink.publish(controller.snapshot());
                        }
                    }
                }
            }
        }
        log::debug!("TableDriver - finished");
    }
}

fn launch<F: DataFetcher>(fetcher: &F, ticket: Ticket, in_flight: &mut InFlight<F::Record>) {
    let Ticket { seq, query } = ticket;
    log::debug!("TableDriver - Fetch #{seq} {query:?}");
    let fetch = fetcher.fetch(query);
    in_flight.push(async move { (seq, fetch.await) }.boxed_local());
}

/// Resolves when the armed timer fires, never when there is none.
async fn debounce_elapsed(timer: &mut Option<Pin<Box<Sleep>>>) {
    match timer {
        Some(sleep) => sleep.as_mut().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::HashMap,
        future::Future,
        rc::Rc,
    };

    use tokio::{
        sync::mpsc,
        time::{sleep, Instant},
    };

    use super::*;
    use crate::pagination::{BodyRow, PageQuery, Phase};

    #[derive(Clone, Default)]
    struct ScriptedFetcher {
        total: Rc<Cell<u64>>,
        fail: Rc<Cell<bool>>,
        delays: Rc<RefCell<HashMap<u64, Duration>>>,
        queries: Rc<RefCell<Vec<(Instant, PageQuery)>>>,
    }

    impl ScriptedFetcher {
        fn with_total(total: u64) -> Self {
            let fetcher = Self::default();
            fetcher.total.set(total);
            fetcher
        }
        fn delay(&self, page: u64, ms: u64) {
            self.delays
                .borrow_mut()
                .insert(page, Duration::from_millis(ms));
        }
        fn queries(&self) -> Vec<PageQuery> {
            self.queries.borrow().iter().map(|(_, q)| q.clone()).collect()
        }
    }

    impl DataFetcher for ScriptedFetcher {
        type Record = u64;

        fn fetch(
            &self,
            query: PageQuery,
        ) -> impl Future<Output = Result<FetchResult<u64>, TableError>> + 'static {
            self.queries
                .borrow_mut()
                .push((Instant::now(), query.clone()));
            let delay = self
                .delays
                .borrow()
                .get(&query.page)
                .copied()
                .unwrap_or(Duration::from_millis(10));
            let total = self.total.get();
            let fail = self.fail.get();
            async move {
                sleep(delay).await;
                if fail {
                    return Err(TableError::Network("connection refused".into()));
                }
                let start = query.offset();
                let end = (start + query.per_page).min(total);
                Ok(FetchResult::new(((start + 1)..=end).collect(), total))
            }
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        snapshots: Rc<RefCell<Vec<TableSnapshot<u64>>>>,
        errors: Rc<RefCell<Vec<TableError>>>,
    }

    impl Recorder {
        fn last(&self) -> TableSnapshot<u64> {
            self.snapshots.borrow().last().cloned().unwrap()
        }
    }

    impl TableSink<u64> for Recorder {
        fn publish(&mut self, snapshot: TableSnapshot<u64>) {
            self.snapshots.borrow_mut().push(snapshot);
        }
        fn report_error(&mut self, error: &TableError) {
            self.errors.borrow_mut().push(error.clone());
        }
    }

    /// Runs a driver over `fetcher` while `script` sends commands, then closes the stream.
    async fn drive<Fut>(
        fetcher: ScriptedFetcher,
        script: impl FnOnce(mpsc::UnboundedSender<TableCommand>) -> Fut,
    ) -> Recorder
    where
        Fut: Future<Output = ()>,
    {
        let recorder = Recorder::default();
        let (tx, rx) = mpsc::unbounded_channel();
        let commands = futures_util::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|cmd| (cmd, rx))
        });
        let driver = TableDriver::new(fetcher, 10, PagerPolicy::default(), recorder.clone());
        tokio::join!(driver.run(commands), async move {
            script(tx.clone()).await;
            // Let pending fetches land before the stream closes
            sleep(Duration::from_secs(2)).await;
            drop(tx);
        });
        recorder
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_order_answers_keep_latest_request() {
        let fetcher = ScriptedFetcher::with_total(47);
        fetcher.delay(2, 500);
        fetcher.delay(3, 50);

        let recorder = drive(fetcher.clone(), |tx| async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(TableCommand::SetPage(2)).unwrap();
            tx.send(TableCommand::SetPage(3)).unwrap();
        })
        .await;

        let pages: Vec<_> = fetcher.queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 2, 3]);
        let last = recorder.last();
        assert_eq!(last.state.page(), 3);
        assert_eq!(last.phase, Phase::Rendered);
        assert_eq!(last.body.records(), &(21..=30).collect::<Vec<_>>()[..]);
        assert!(recorder
            .snapshots
            .borrow()
            .iter()
            .all(|s| s.phase != Phase::Rendered || s.state.page() != 2));
    }

    #[tokio::test(start_paused = true)]
    async fn filter_changes_are_debounced() {
        let fetcher = ScriptedFetcher::with_total(47);

        let recorder = drive(fetcher.clone(), |tx| async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(TableCommand::SetPage(4)).unwrap();
            sleep(Duration::from_millis(100)).await;
            for value in ["a", "al", "ali"] {
                tx.send(TableCommand::filter("search", value)).unwrap();
                sleep(Duration::from_millis(100)).await;
            }
        })
        .await;

        let recorded = fetcher.queries.borrow().clone();
        assert_eq!(recorded.len(), 3);
        let (issued_at, query) = &recorded[2];
        assert_eq!(query.page, 1);
        assert_eq!(query.filters.get("search").map(String::as_str), Some("ali"));
        // 100 + 100 + 2 * 100 ms of typing, then the full debounce window
        let typing_ended = recorded[1].0 + Duration::from_millis(300);
        assert!(*issued_at >= typing_ended + DEFAULT_DEBOUNCE);
        assert_eq!(recorder.last().state.page(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn page_change_cancels_pending_debounce() {
        let fetcher = ScriptedFetcher::with_total(47);

        drive(fetcher.clone(), |tx| async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(TableCommand::filter("role", "editor")).unwrap();
            tx.send(TableCommand::SetPage(2)).unwrap();
        })
        .await;

        let queries = fetcher.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[1].page, 2);
        assert_eq!(
            queries[1].filters.get("role").map(String::as_str),
            Some("editor")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn filter_change_discards_slow_page_answer() {
        let fetcher = ScriptedFetcher::with_total(47);
        fetcher.delay(3, 100);

        let recorder = drive(fetcher.clone(), |tx| async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(TableCommand::SetPage(3)).unwrap();
            sleep(Duration::from_millis(10)).await;
            tx.send(TableCommand::filter("search", "bob")).unwrap();
        })
        .await;

        let pages: Vec<_> = fetcher.queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 3, 1]);
        let snapshots = recorder.snapshots.borrow();
        let filtered: Vec<_> = snapshots
            .iter()
            .filter(|s| s.state.filter("search") == Some("bob"))
            .collect();
        assert!(filtered
            .iter()
            .filter(|s| s.phase == Phase::Rendered)
            .all(|s| s.body.records().first() == Some(&1)));
        let waiting = filtered[0];
        assert_eq!(waiting.phase, Phase::Loading);
        assert!(waiting
            .pager
            .is_some_and(|p| !p.prev_enabled && !p.next_enabled));
        let last = snapshots.last().unwrap();
        assert_eq!(last.phase, Phase::Rendered);
        assert_eq!(last.shown_range(), Some((1, 10)));
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_filter_does_not_refetch() {
        let fetcher = ScriptedFetcher::with_total(47);

        drive(fetcher.clone(), |tx| async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(TableCommand::filter("role", "editor")).unwrap();
            sleep(Duration::from_millis(500)).await;
            tx.send(TableCommand::filter("role", "editor")).unwrap();
        })
        .await;

        assert_eq!(fetcher.queries().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn last_page_of_forty_seven() {
        let fetcher = ScriptedFetcher::with_total(47);

        let recorder = drive(fetcher.clone(), |tx| async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(TableCommand::SetPage(5)).unwrap();
        })
        .await;

        let last = recorder.last();
        assert_eq!(last.state.total_pages(), 5);
        assert_eq!(last.body.records(), &[41, 42, 43, 44, 45, 46, 47]);
        let pager = last.pager.unwrap();
        assert_eq!(pager.indicator(), "Page 5 of 5");
        assert!(!pager.next_enabled);
        assert!(pager.prev_enabled);

        let recorder = drive(fetcher.clone(), |tx| async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(TableCommand::SetPage(0)).unwrap();
        })
        .await;
        assert_eq!(recorder.last().state.page(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn network_error_leaves_table_interactive() {
        let fetcher = ScriptedFetcher::with_total(47);

        let recorder = drive(fetcher.clone(), |tx| {
            let fail = fetcher.fail.clone();
            async move {
                sleep(Duration::from_millis(100)).await;
                fail.set(true);
                tx.send(TableCommand::SetPage(3)).unwrap();
            }
        })
        .await;

        let last = recorder.last();
        assert_eq!(last.phase, Phase::Error);
        assert_eq!(
            last.body.rows(),
            vec![BodyRow::Message {
                text: "network error: connection refused",
                is_error: true
            }]
        );
        let pager = last.pager.unwrap();
        assert!(pager.prev_enabled);
        assert!(pager.next_enabled);
        assert_eq!(recorder.errors.borrow().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_filter_is_reported_without_fetching() {
        let fetcher = ScriptedFetcher::with_total(47);

        let recorder = drive(fetcher.clone(), |tx| async move {
            sleep(Duration::from_millis(100)).await;
            tx.send(TableCommand::filter("page", "3")).unwrap();
        })
        .await;

        assert_eq!(fetcher.queries().len(), 1);
        assert!(matches!(
            recorder.errors.borrow()[..],
            [TableError::Validation(_)]
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn shrunk_collection_is_refetched_on_clamped_page() {
        let fetcher = ScriptedFetcher::with_total(47);

        let recorder = drive(fetcher.clone(), |tx| {
            let total = fetcher.total.clone();
            async move {
                sleep(Duration::from_millis(100)).await;
                tx.send(TableCommand::SetPage(5)).unwrap();
                sleep(Duration::from_millis(100)).await;
                total.set(12);
                tx.send(TableCommand::Reload).unwrap();
            }
        })
        .await;

        let pages: Vec<_> = fetcher.queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![1, 5, 5, 2]);
        assert_eq!(recorder.last().body.records(), &[11, 12]);
    }
}
