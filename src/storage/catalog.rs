use std::collections::HashMap;

use tracing::info;

use crate::{
    error::{Error, Result},
    sql::{
        parser::ast::{Consts, Expression, OrderDirection, SelectItem, TableRef},
        schema::Column,
        types::Row,
    },
    storage::database::Database,
};

/// Name of the database every catalog starts with
pub const DEFAULT_DATABASE: &str = "default";

/// Registry of databases plus the session's active database
///
/// Unqualified table references resolve against the active database. The
/// active name is not checked when set, so it may point at a database that
/// does not exist; the lookup fails when a statement needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    databases: HashMap<String, Database>,
    current: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        let mut databases = HashMap::new();
        databases.insert(DEFAULT_DATABASE.to_string(), Database::new(DEFAULT_DATABASE));
        Self {
            databases,
            current: DEFAULT_DATABASE.to_string(),
        }
    }

    pub fn current_database(&self) -> &str {
        &self.current
    }

    /// Database names in sorted order
    pub fn database_names(&self) -> Vec<String> {
        let mut names = self.databases.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn contains_database(&self, name: &str) -> bool {
        self.databases.contains_key(name)
    }

    pub fn use_database(&mut self, name: &str) {
        info!(database = name, "switching database");
        self.current = name.to_string();
    }

    /// Creates an empty database, replacing any existing one of that name
    pub fn create_database(&mut self, name: &str) {
        info!(database = name, "creating database");
        self.databases.insert(name.to_string(), Database::new(name));
    }

    /// Drops a database if present; the active pointer is left as is
    pub fn drop_database(&mut self, name: &str) -> bool {
        let dropped = self.databases.remove(name).is_some();
        if dropped {
            info!(database = name, "dropped database");
        }
        dropped
    }

    /// Resolves the qualifier, or the active database when there is none
    pub fn database(&self, qualifier: Option<&str>) -> Result<&Database> {
        let name = qualifier.unwrap_or(self.current.as_str());
        self.databases
            .get(name)
            .ok_or_else(|| Error::DatabaseNotFound(name.to_string()))
    }

    pub fn database_mut(&mut self, qualifier: Option<&str>) -> Result<&mut Database> {
        let name = qualifier.unwrap_or(self.current.as_str());
        self.databases
            .get_mut(name)
            .ok_or_else(|| Error::DatabaseNotFound(name.to_string()))
    }

    /// Creates a table in the referenced database, replacing an existing one
    pub fn create_table(&mut self, table: &TableRef, columns: Vec<Column>) -> Result<()> {
        self.database_mut(table.schema.as_deref())?
            .create_table(&table.name, columns)?;
        info!(table = %table, "created table");
        Ok(())
    }

    pub fn contains_table(&self, table: &TableRef) -> Result<bool> {
        Ok(self
            .database(table.schema.as_deref())?
            .contains_table(&table.name))
    }

    /// Drops each table in order, returns how many existed
    pub fn drop_tables(&mut self, tables: &[TableRef]) -> Result<usize> {
        let mut dropped = 0;
        for table in tables {
            if self.database_mut(table.schema.as_deref())?.drop_table(&table.name) {
                info!(table = %table, "dropped table");
                dropped += 1;
            }
        }
        Ok(dropped)
    }

    pub fn insert(
        &mut self,
        table: &TableRef,
        columns: &[String],
        values: &[Vec<Consts>],
    ) -> Result<usize> {
        self.database_mut(table.schema.as_deref())?
            .insert(&table.name, columns, values)
    }

    pub fn delete(&mut self, table: &TableRef, where_clause: Option<&Expression>) -> Result<usize> {
        self.database_mut(table.schema.as_deref())?
            .delete(&table.name, where_clause)
    }

    pub fn update(
        &mut self,
        table: &TableRef,
        set: &[(String, Consts)],
        where_clause: Option<&Expression>,
    ) -> Result<usize> {
        self.database_mut(table.schema.as_deref())?
            .update(&table.name, set, where_clause)
    }

    pub fn select(
        &self,
        table: &TableRef,
        select: &[SelectItem],
        where_clause: Option<&Expression>,
        order_by: &[(String, OrderDirection)],
    ) -> Result<(Vec<String>, Vec<Row>)> {
        self.database(table.schema.as_deref())?
            .select(&table.name, select, where_clause, order_by)
    }
}
