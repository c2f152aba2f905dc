//! Generic paginated, filterable tables.
//!
//! [PageState] tracks where a view stands, a [DataFetcher] brings one page of
//! records, [TableBody] and [PagerView] describe what to draw, the
//! [TableController] ties them together with request sequencing and the
//! [TableDriver] runs the whole thing as an async event loop. Nothing here
//! depends on the UI toolkit.

mod body;
mod controller;
mod driver;
mod fetcher;
mod pager;
mod state;

pub use body::{BodyRow, TableBody, NO_RECORDS};
pub use controller::{ApplyOutcome, Phase, TableController, TableSnapshot, Ticket};
pub use driver::{TableCommand, TableDriver, TableSink, DEFAULT_DEBOUNCE};
pub use fetcher::{DataFetcher, FetchResult, TableError};
pub use pager::{PageNav, PagerPolicy, PagerView};
pub use state::{total_pages, Filters, PageQuery, PageState};
