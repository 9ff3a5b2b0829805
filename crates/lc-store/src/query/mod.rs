//! Query helpers for browsing the catalog.
//!
//! - [`adhoc`]: ad-hoc SQL queries, table listing, row counts

pub mod adhoc;

pub use adhoc::{execute_query, list_tables, query_frame, table_row_count, QueryResult};
