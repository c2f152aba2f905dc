use std::{cell::Cell, rc::Rc};

use crate::prelude::*;

use crate::{
    pagination::{
        DataFetcher, PagerPolicy, TableCommand, TableDriver, TableError, TableSink, TableSnapshot,
    },
    utils::log_error,
};

/// Handles of a table view: what to draw, and where to send user input.
pub struct PaginatedTable<R: 'static> {
    pub snapshot: Signal<TableSnapshot<R>>,
    pub commands: Coroutine<TableCommand>,
}
impl<R: 'static> Clone for PaginatedTable<R> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<R: 'static> Copy for PaginatedTable<R> {}
impl<R: 'static> PartialEq for PaginatedTable<R> {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot == other.snapshot && self.commands == other.commands
    }
}

struct SignalSink<R: 'static>(Signal<TableSnapshot<R>>);

impl<R: 'static> TableSink<R> for SignalSink<R> {
    fn publish(&mut self, snapshot: TableSnapshot<R>) {
        self.0.set(snapshot);
    }

    fn report_error(&mut self, error: &TableError) {
        alert_error(log_error(error));
    }
}

/// Runs a [TableDriver] for the lifetime of the calling component.
///
/// The first page is fetched right away. The driver, and any fetch or
/// debounce it has pending, is dropped with the component.
pub fn use_paginated_table<F>(
    fetcher: F,
    per_page: u64,
    policy: PagerPolicy,
) -> PaginatedTable<F::Record>
where
    F: DataFetcher + Clone,
{
    let snapshot = use_signal(|| TableSnapshot::new(per_page));
    let commands = use_coroutine(move |rx: UnboundedReceiver<TableCommand>| {
        let fetcher = fetcher.clone();
        async move {
            TableDriver::new(fetcher, per_page, policy, SignalSink(snapshot))
                .run(rx)
                .await
        }
    });

    // The first page is already on its way, reload only on later changes
    let connection = super::resources::use_connection_settings();
    let first_run = use_hook(|| Rc::new(Cell::new(true)));
    use_effect(move || {
        connection.read();
        if !first_run.replace(false) {
            log::debug!("PaginatedTable - connection settings changed, reloading");
            commands.send(TableCommand::Reload);
        }
    });

    use_drop(|| log::debug!("PaginatedTable Dropped"));
    PaginatedTable { snapshot, commands }
}
