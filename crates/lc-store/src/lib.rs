//! Catalog store for labcat.
//!
//! Provides a DuckDB-backed catalog of materials, panels, samples,
//! measurements, datasets, and registrations. Each entity table has a
//! `<singular>_metadata` companion of key/value/type rows; readers pivot that
//! metadata into wide frames, joiners combine frames across relations, and
//! loaders insert an entity with its metadata and links in one transaction.

pub mod connection;
pub mod ddl;
pub mod delete;
pub mod error;
pub mod frame;
pub mod join;
pub mod lookup;
pub mod migration;
pub mod query;
pub mod read;
pub(crate) mod row_helpers;
pub mod write;

#[cfg(test)]
mod test_support;

pub use connection::CatalogDb;
pub use delete::delete_rows;
pub use error::{CatalogError, CatalogResult};
pub use frame::{Cell, Frame};
pub use join::{
    join_many_to_many, join_parent, join_with_multiple_parents, join_with_parent, ParentLink,
};
pub use lookup::{find_id, find_ids_by_name};
pub use read::{read_entity, read_entity_with_metadata, read_entity_with_metadata_as};
pub use write::{insert_row, load_entity, Attributes};
