use std::time::Duration;

pub mod auth;
pub mod debounce;
pub mod domain;
pub mod fetch;
pub mod models;
pub mod pagination;
pub mod query;
pub mod routes;
pub mod selection;
pub mod services;
pub mod table;

/// Endpoint serving the paginated orders collection.
pub const ORDERS_ENDPOINT: &str = "/orders";

/// Stability window applied to search input before it reaches the query key.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(800);

/// Page sizes offered by the rows-per-page control. `PaginationState` does
/// not validate page sizes itself; callers are expected to pick from here.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [5, 10, 25];

/// Rows per page used until the user picks another option.
pub const DEFAULT_PAGE_SIZE: usize = 10;
