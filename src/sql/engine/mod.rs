use tracing::debug;

use crate::{error::Result, storage::Catalog};

use super::{
    executor::{self, ResultSet},
    parser::Parser,
};

/// SQL session for executing statements
///
/// Borrows the catalog for its lifetime. Statements of one input run left to
/// right, each finished before the next is parsed.
pub struct Session<'a> {
    catalog: &'a mut Catalog,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }

    /// Executes every `;` separated statement of the input
    ///
    /// Stops at the first parse or execution error. Statements that ran
    /// before it keep their effects.
    pub fn execute(&mut self, sql: &str) -> Result<Vec<ResultSet>> {
        let mut parser = Parser::new(sql);
        let mut results = Vec::new();
        while let Some(stmt) = parser.next_statement()? {
            debug!(database = %self.catalog.current_database(), "executing {:?}", stmt);
            results.push(executor::execute(self.catalog, stmt)?);
        }
        Ok(results)
    }

    /// Executes a single statement, rejecting input that holds more than one
    pub fn execute_statement(&mut self, sql: &str) -> Result<ResultSet> {
        executor::execute(self.catalog, Parser::new(sql).parse()?)
    }
}
