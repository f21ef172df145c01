use std::cmp::Ordering;

use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::{
        parser::ast::{Consts, Expression, OrderDirection, SelectItem},
        predicate::Predicate,
        schema::{Column, Schema},
        types::{Row, Value},
    },
};

/// A named table: schema plus rows in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: &str, columns: Vec<Column>) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            schema: Schema::new(name, columns)?,
            rows: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Inserts one row per values clause, returns the number inserted
    ///
    /// An empty column list targets every column in schema order. Each literal
    /// is converted with the declared type of the column it is written to and
    /// columns left out stay NULL. Every row is built before any is stored.
    pub fn insert(&mut self, columns: &[String], values: &[Vec<Consts>]) -> Result<usize> {
        let targets = if columns.is_empty() {
            (0..self.schema.len()).collect::<Vec<_>>()
        } else {
            columns
                .iter()
                .map(|c| self.schema.get_col_index(c))
                .collect::<Result<Vec<_>>>()?
        };

        let mut rows = Vec::with_capacity(values.len());
        for literals in values {
            if literals.len() != targets.len() {
                return Err(Error::ValueCountMismatch {
                    columns: targets.len(),
                    values: literals.len(),
                });
            }
            let mut row = Row::nulls(self.schema.len());
            for (&index, literal) in targets.iter().zip(literals) {
                row.set(index, self.schema.column(index).datatype.convert(literal.raw())?);
            }
            rows.push(row);
        }

        let count = rows.len();
        self.rows.extend(rows);
        debug!(table = %self.name, count, "inserted rows");
        Ok(count)
    }

    /// Removes every row matching the WHERE clause, returns how many
    pub fn delete(&mut self, where_clause: Option<&Expression>) -> Result<usize> {
        let predicate = Predicate::compile(where_clause, &self.schema)?;
        let matched = self.evaluate(&predicate)?;

        let before = self.rows.len();
        let mut matched = matched.into_iter();
        self.rows.retain(|_| !matched.next().unwrap_or(false));
        let count = before - self.rows.len();

        debug!(table = %self.name, count, "deleted rows");
        Ok(count)
    }

    /// Overwrites columns of every matching row, returns how many rows matched
    ///
    /// Set items apply in order, so a later assignment to the same column wins.
    pub fn update(
        &mut self,
        set: &[(String, Consts)],
        where_clause: Option<&Expression>,
    ) -> Result<usize> {
        let predicate = Predicate::compile(where_clause, &self.schema)?;
        let assignments = set
            .iter()
            .map(|(column, literal)| -> Result<(usize, Value)> {
                let index = self.schema.get_col_index(column)?;
                let value = self.schema.column(index).datatype.convert(literal.raw())?;
                Ok((index, value))
            })
            .collect::<Result<Vec<_>>>()?;
        let matched = self.evaluate(&predicate)?;

        let mut count = 0;
        for (row, _) in self.rows.iter_mut().zip(matched).filter(|(_, m)| *m) {
            for (index, value) in &assignments {
                row.set(*index, value.clone());
            }
            count += 1;
        }

        debug!(table = %self.name, count, "updated rows");
        Ok(count)
    }

    /// Filters, sorts and projects the table
    ///
    /// Sorting happens on full rows before projection, so ORDER BY may name
    /// columns that are not selected. The sort is stable and without ORDER BY
    /// rows come back in insertion order.
    pub fn select(
        &self,
        select: &[SelectItem],
        where_clause: Option<&Expression>,
        order_by: &[(String, OrderDirection)],
    ) -> Result<(Vec<String>, Vec<Row>)> {
        let mut projection = Vec::new();
        for item in select {
            match item {
                SelectItem::Wildcard => projection.extend(0..self.schema.len()),
                SelectItem::Column(name) => projection.push(self.schema.get_col_index(name)?),
            }
        }
        let predicate = Predicate::compile(where_clause, &self.schema)?;
        let order = order_by
            .iter()
            .map(|(column, direction)| -> Result<(usize, OrderDirection)> {
                Ok((self.schema.get_col_index(column)?, *direction))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::new();
        for row in &self.rows {
            if predicate.matches(row)? {
                rows.push(row);
            }
        }

        // Multi-column sort: the first key that is not Equal decides
        let mut error = None;
        rows.sort_by(|row1, row2| {
            for (index, direction) in &order {
                match row1[*index].compare(&row2[*index]) {
                    Ok(Ordering::Equal) => {}
                    Ok(o) => {
                        return match direction {
                            OrderDirection::Asc => o,
                            OrderDirection::Desc => o.reverse(),
                        };
                    }
                    Err(err) => {
                        error.get_or_insert(err);
                        return Ordering::Equal;
                    }
                }
            }
            Ordering::Equal
        });
        if let Some(err) = error {
            return Err(err);
        }

        let columns = projection
            .iter()
            .map(|&i| self.schema.column(i).name.clone())
            .collect();
        let rows = rows.into_iter().map(|row| row.project(&projection)).collect::<Vec<_>>();
        debug!(table = %self.name, count = rows.len(), "selected rows");
        Ok((columns, rows))
    }

    /// Evaluates the predicate on every row up front
    fn evaluate(&self, predicate: &Predicate) -> Result<Vec<bool>> {
        self.rows.iter().map(|row| predicate.matches(row)).collect()
    }
}
