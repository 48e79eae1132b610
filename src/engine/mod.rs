//! Query evaluation over the record store.
//!
//! - [`query`]: the query model (search term, type, date range, sort, page)
//! - [`pipeline`]: pure filter/sort/paginate functions

pub mod pipeline;
pub mod query;

pub use pipeline::{apply, filter_and_sort, paginate, total_pages, Page, PAGE_SIZE};
pub use query::{DateRange, Query, SortDirection, SortKey, SortSpec};
