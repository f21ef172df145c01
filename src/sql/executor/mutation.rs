use crate::{
    error::Result,
    sql::{
        executor::ResultSet,
        parser::ast::{Consts, Expression, TableRef},
    },
    storage::Catalog,
};

use super::Executor;

/// INSERT executor
pub struct Insert {
    table: TableRef,
    columns: Vec<String>,
    values: Vec<Vec<Consts>>,
}

impl Insert {
    pub fn new(table: TableRef, columns: Vec<String>, values: Vec<Vec<Consts>>) -> Box<Self> {
        Box::new(Self {
            table,
            columns,
            values,
        })
    }
}

impl Executor for Insert {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        let count = catalog.insert(&self.table, &self.columns, &self.values)?;
        Ok(ResultSet::Insert { count })
    }
}

/// UPDATE executor
pub struct Update {
    table: TableRef,
    set: Vec<(String, Consts)>,
    where_clause: Option<Expression>,
}

impl Update {
    pub fn new(
        table: TableRef,
        set: Vec<(String, Consts)>,
        where_clause: Option<Expression>,
    ) -> Box<Self> {
        Box::new(Self {
            table,
            set,
            where_clause,
        })
    }
}

impl Executor for Update {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        let count = catalog.update(&self.table, &self.set, self.where_clause.as_ref())?;
        Ok(ResultSet::Update { count })
    }
}

/// DELETE executor
pub struct Delete {
    table: TableRef,
    where_clause: Option<Expression>,
}

impl Delete {
    pub fn new(table: TableRef, where_clause: Option<Expression>) -> Box<Self> {
        Box::new(Self {
            table,
            where_clause,
        })
    }
}

impl Executor for Delete {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        let count = catalog.delete(&self.table, self.where_clause.as_ref())?;
        Ok(ResultSet::Delete { count })
    }
}
