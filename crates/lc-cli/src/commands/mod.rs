//! CLI command implementations

pub(crate) mod add;
pub(crate) mod common;
pub(crate) mod delete;
pub(crate) mod find;
pub(crate) mod init;
pub(crate) mod join;
pub(crate) mod query;
pub(crate) mod relation;
pub(crate) mod show;
pub(crate) mod tables;
