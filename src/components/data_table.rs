use crate::prelude::*;

use crate::{
    components::svg::{ChevronLeft, ChevronRight, DrawSvg, IconSize},
    pagination::{BodyRow, PageNav, PagerView, TableCommand},
    utils::CCStr,
};

/// A record that can be listed in a [DataTable].
pub trait TableRecord: Clone + PartialEq + 'static {
    /// Column titles, in display order
    const HEADERS: &'static [&'static str];

    /// Identity of the record, unique within a page
    fn key(&self) -> CCStr;
}

/// Table body and pager of a [PaginatedTable].
///
/// `row` maps a record and its one-based number across pages to the cells of
/// its line. It must draw exactly one `td` per header.
#[component]
pub fn DataTable<R: TableRecord>(
    table: PaginatedTable<R>,
    row: Callback<(u64, R), Element>,
) -> Element {
    let snapshot = (table.snapshot)();
    let columns = R::HEADERS.len();
    let offset = snapshot.state.offset();

    let lines = snapshot
        .body
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, line)| match line {
            BodyRow::Record { index, record } => rsx! {
                tr { key: "{record.key()}", {row.call((offset + index as u64 + 1, record.clone()))} }
            },
            BodyRow::Placeholder => rsx! {
                tr { key: "placeholder-{i}",
                    for c in 0..columns {
                        td { key: "{c}",
                            StaticLoadedComponent { input: LoadedComponentInput::Loading, "Loading..." }
                        }
                    }
                }
            },
            BodyRow::Message { text, is_error } => rsx! {
                tr { key: "message",
                    td {
                        colspan: "{columns}",
                        class: "table-message",
                        class: if is_error { "text-error" },
                        {text}
                    }
                }
            },
        })
        .collect::<Vec<_>>();

    rsx! {
        div { class: "table-wrapper",
            table { class: "table",
                thead {
                    tr {
                        for header in R::HEADERS.iter() {
                            th { key: "{header}", {*header} }
                        }
                    }
                }
                tbody {
                    for line in lines {
                        {line}
                    }
                }
            }
        }
        Pager { pager: snapshot.pager, commands: table.commands }
    }
}

/// "Showing a–b of N noun" line of a table.
#[component]
pub fn TableSummary<R: TableRecord>(table: PaginatedTable<R>, noun: &'static str) -> Element {
    let snapshot = table.snapshot.read();
    let text = match snapshot.shown_range() {
        Some((first, last)) => {
            format!("Showing {first}–{last} of {} {noun}", snapshot.state.total())
        }
        None if snapshot.is_loading() || snapshot.body.is_error() => String::new(),
        None => format!("No {noun}"),
    };
    rsx! {
        div { class: "table-summary", {text} }
    }
}

/// Previous/Next controls and page indicator. Draws nothing for `None`.
#[component]
pub fn Pager(pager: Option<PagerView>, commands: Coroutine<TableCommand>) -> Element {
    let Some(pager) = pager else {
        return rsx! {};
    };
    rsx! {
        div { class: "pager",
            button {
                class: "btn btn-outline btn-sm",
                disabled: !pager.prev_enabled,
                onclick: move |_| commands.send(TableCommand::Navigate(PageNav::Previous)),
                DrawSvg::<ChevronLeft> { size: IconSize::Small }
                "Previous"
            }
            span { class: "pager-indicator", {pager.indicator()} }
            button {
                class: "btn btn-outline btn-sm",
                disabled: !pager.next_enabled,
                onclick: move |_| commands.send(TableCommand::Navigate(PageNav::Next)),
                "Next"
                DrawSvg::<ChevronRight> { size: IconSize::Small }
            }
        }
    }
}
