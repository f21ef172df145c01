//! SQL processing module
//!
//! This module provides:
//! - `parser`: SQL lexer and parser
//! - `types`: SQL data types, values and literal conversion
//! - `schema`: Table and column schema definitions
//! - `predicate`: WHERE clause compilation
//! - `executor`: Statement execution against the catalog
//! - `engine`: Sessions running statement lists

pub mod parser;
pub mod types;
pub mod schema;
pub mod predicate;
pub mod executor;
pub mod engine;
