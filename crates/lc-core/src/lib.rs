//! lc-core - Core library for labcat
//!
//! This crate provides the naming conventions that tie entity tables to their
//! metadata and foreign-key columns, entity schema descriptors, the typed
//! metadata model, the measurement file probe contract, and configuration
//! parsing shared by the store and the CLI.

pub mod config;
pub mod entity;
pub mod error;
pub mod metadata;
pub mod naming;
pub mod probe;
pub mod table_name;

pub use config::{Config, DatabaseConfig, PivotStyle, ReaderConfig};
pub use entity::{schema_for, Entity, EntitySchema, Relation};
pub use error::{CoreError, CoreResult};
pub use metadata::{MetadataEntry, MetadataValue, TypeTag};
pub use probe::{FileInfo, FileProbe, ManualProbe};
pub use table_name::{is_valid_identifier, validate_identifier, TableName};
