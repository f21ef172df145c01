use crate::{
    error::Result,
    sql::{
        executor::ResultSet,
        parser::ast::{Expression, OrderDirection, SelectItem, TableRef},
    },
    storage::Catalog,
};

use super::Executor;

/// SELECT executor: filter, ORDER BY and projection against one table
pub struct Select {
    select: Vec<SelectItem>,
    from: TableRef,
    where_clause: Option<Expression>,
    order_by: Vec<(String, OrderDirection)>,
}

impl Select {
    pub fn new(
        select: Vec<SelectItem>,
        from: TableRef,
        where_clause: Option<Expression>,
        order_by: Vec<(String, OrderDirection)>,
    ) -> Box<Self> {
        Box::new(Self {
            select,
            from,
            where_clause,
            order_by,
        })
    }
}

impl Executor for Select {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet> {
        let (columns, rows) = catalog.select(
            &self.from,
            &self.select,
            self.where_clause.as_ref(),
            &self.order_by,
        )?;
        Ok(ResultSet::Select { columns, rows })
    }
}
