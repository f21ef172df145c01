//! minisql - an in-memory relational database in Rust
//!
//! This crate provides a small SQL database with:
//! - SQL parsing (lexer, parser, AST)
//! - A catalog of databases holding typed, in-memory tables
//! - Statement execution with single-column WHERE filters and ORDER BY
//! - A line-oriented console

pub mod config;
pub mod console;
pub mod error;
pub mod formatter;
pub mod sql;
pub mod storage;
