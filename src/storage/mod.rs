//! In-memory storage: catalog of databases, databases of tables, tables of rows

pub mod catalog;
pub mod database;
pub mod table;

pub use catalog::{Catalog, DEFAULT_DATABASE};
