use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    sql::{
        parser::ast::{Consts, Expression, OrderDirection, SelectItem},
        schema::Column,
        types::Row,
    },
    storage::table::Table,
};

/// A named set of tables
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    name: String,
    tables: HashMap<String, Table>,
}

impl Database {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tables: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Table names in sorted order
    pub fn table_names(&self) -> Vec<String> {
        let mut names = self.tables.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Creates a table, replacing any existing table of that name
    pub fn create_table(&mut self, name: &str, columns: Vec<Column>) -> Result<()> {
        let table = Table::new(name, columns)?;
        self.tables.insert(name.to_string(), table);
        Ok(())
    }

    /// Drops a table, returns false if there was none
    pub fn drop_table(&mut self, name: &str) -> bool {
        self.tables.remove(name).is_some()
    }

    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    fn get_table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    pub fn insert(
        &mut self,
        table: &str,
        columns: &[String],
        values: &[Vec<Consts>],
    ) -> Result<usize> {
        self.get_table_mut(table)?.insert(columns, values)
    }

    pub fn delete(&mut self, table: &str, where_clause: Option<&Expression>) -> Result<usize> {
        self.get_table_mut(table)?.delete(where_clause)
    }

    pub fn update(
        &mut self,
        table: &str,
        set: &[(String, Consts)],
        where_clause: Option<&Expression>,
    ) -> Result<usize> {
        self.get_table_mut(table)?.update(set, where_clause)
    }

    pub fn select(
        &self,
        table: &str,
        select: &[SelectItem],
        where_clause: Option<&Expression>,
        order_by: &[(String, OrderDirection)],
    ) -> Result<(Vec<String>, Vec<Row>)> {
        self.get_table(table)?.select(select, where_clause, order_by)
    }
}
