mod fetchers;
mod resources;
mod table;

pub mod prelude {
    pub use super::fetchers::{InactiveUsersFetcher, LoginHistoryFetcher, UsersFetcher};
    pub use super::resources::FResource;
    pub use super::table::PaginatedTable;
    pub mod helper_hooks {
        pub use super::super::resources::use_api_resource;
        pub use super::super::table::use_paginated_table;
    }
}
