use std::cmp::Ordering;

use crate::{
    error::{Error, Result},
    sql::{
        parser::ast::{Expression, Operator},
        schema::Schema,
        types::{Row, Value},
    },
};

/// Comparison operators a WHERE clause may use
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

impl Comparison {
    fn from_operator(op: Operator) -> Result<Self> {
        Ok(match op {
            Operator::Equal => Comparison::Equal,
            Operator::NotEqual => Comparison::NotEqual,
            Operator::GreaterThan => Comparison::GreaterThan,
            Operator::GreaterThanOrEqual => Comparison::GreaterThanOrEqual,
            Operator::LessThan => Comparison::LessThan,
            Operator::LessThanOrEqual => Comparison::LessThanOrEqual,
            op => return Err(Error::UnsupportedOperator(op.to_string())),
        })
    }

    /// Whether `row_value <op> literal` holds given their ordering
    pub fn test(&self, ordering: Ordering) -> bool {
        match self {
            Comparison::Equal => ordering == Ordering::Equal,
            Comparison::NotEqual => ordering != Ordering::Equal,
            Comparison::GreaterThan => ordering == Ordering::Greater,
            Comparison::GreaterThanOrEqual => ordering != Ordering::Less,
            Comparison::LessThan => ordering == Ordering::Less,
            Comparison::LessThanOrEqual => ordering != Ordering::Greater,
        }
    }
}

/// Row filter compiled from a WHERE clause
///
/// Holds the schema index of the tested column and the literal already
/// converted to that column's type. Without a condition every row matches.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    index: usize,
    condition: Option<(Comparison, Value)>,
}

impl Predicate {
    /// Predicate that accepts every row
    pub fn always() -> Self {
        Self {
            index: 0,
            condition: None,
        }
    }

    /// Compiles an optional WHERE expression against a table schema
    ///
    /// Only `<column> <op> <literal>` is accepted. Checks run in order:
    /// expression shape, column lookup, literal conversion, then operator.
    pub fn compile(expr: Option<&Expression>, schema: &Schema) -> Result<Self> {
        let Some(expr) = expr else {
            return Ok(Self::always());
        };
        let Expression::Operation(op, left, right) = expr else {
            return Err(Error::UnsupportedPredicate(expr.to_string()));
        };
        let (Expression::Field(column), Expression::Consts(literal)) = (&**left, &**right) else {
            return Err(Error::UnsupportedPredicate(expr.to_string()));
        };

        let index = schema.get_col_index(column)?;
        let value = schema.column(index).datatype.convert(literal.raw())?;
        let comparison = Comparison::from_operator(*op)?;

        Ok(Self {
            index,
            condition: Some((comparison, value)),
        })
    }

    /// Schema index of the tested column
    pub fn index(&self) -> usize {
        self.index
    }

    /// Tests a row; a NULL on either side never matches
    pub fn matches(&self, row: &Row) -> Result<bool> {
        let Some((comparison, literal)) = &self.condition else {
            return Ok(true);
        };
        let value = &row[self.index];
        if value.is_null() || literal.is_null() {
            return Ok(false);
        }
        Ok(comparison.test(value.compare(literal)?))
    }
}
