use tracing::info;

use crate::{
    error::Result,
    sql::{executor::ResultSet, parser::ast::TableRef, schema::Column},
    storage::Catalog,
};

use super::Executor;

/// CREATE DATABASE executor
pub struct CreateDatabase {
    name: String,
    if_not_exists: bool,
}

impl CreateDatabase {
    pub fn new(name: String, if_not_exists: bool) -> Box<Self> {
        Box::new(Self {
            name,
            if_not_exists,
        })
    }
}

impl Executor for CreateDatabase {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        if self.if_not_exists && catalog.contains_database(&self.name) {
            info!(database = %self.name, "database already exists");
        } else {
            catalog.create_database(&self.name);
        }
        Ok(ResultSet::CreateDatabase { name: self.name })
    }
}

/// DROP DATABASE executor
pub struct DropDatabase {
    name: String,
}

impl DropDatabase {
    pub fn new(name: String) -> Box<Self> {
        Box::new(Self { name })
    }
}

impl Executor for DropDatabase {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        catalog.drop_database(&self.name);
        Ok(ResultSet::DropDatabase { name: self.name })
    }
}

/// USE executor
pub struct UseDatabase {
    name: String,
}

impl UseDatabase {
    pub fn new(name: String) -> Box<Self> {
        Box::new(Self { name })
    }
}

impl Executor for UseDatabase {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        catalog.use_database(&self.name);
        Ok(ResultSet::UseDatabase { name: self.name })
    }
}

/// CREATE TABLE executor
pub struct CreateTable {
    table: TableRef,
    columns: Vec<Column>,
    if_not_exists: bool,
}

impl CreateTable {
    pub fn new(table: TableRef, columns: Vec<Column>, if_not_exists: bool) -> Box<Self> {
        Box::new(Self {
            table,
            columns,
            if_not_exists,
        })
    }
}

impl Executor for CreateTable {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        if self.if_not_exists && catalog.contains_table(&self.table)? {
            info!(table = %self.table, "table already exists");
        } else {
            catalog.create_table(&self.table, self.columns)?;
        }
        Ok(ResultSet::CreateTable {
            table_name: self.table.name,
        })
    }
}

/// DROP TABLE executor
pub struct DropTable {
    tables: Vec<TableRef>,
}

impl DropTable {
    pub fn new(tables: Vec<TableRef>) -> Box<Self> {
        Box::new(Self { tables })
    }
}

impl Executor for DropTable {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        let count = catalog.drop_tables(&self.tables)?;
        Ok(ResultSet::DropTable { count })
    }
}
