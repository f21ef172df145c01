use std::{cmp::Ordering, fmt::Display, ops::Index, slice};

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

mod convert;

pub use convert::convert;

/// Supported SQL data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Float,
    Double,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    String,
}

impl DataType {
    /// Resolves a declared type name (case-insensitive)
    ///
    /// Names that are not recognized fall back to `String`, so `varchar`,
    /// `text` and friends all store the literal as-is.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "tinyint" => DataType::TinyInt,
            "smallint" | "short" => DataType::SmallInt,
            "int" | "integer" => DataType::Integer,
            "bigint" | "long" => DataType::BigInt,
            "float" => DataType::Float,
            "double" => DataType::Double,
            "decimal" | "numeric" => DataType::Decimal,
            "boolean" | "bool" => DataType::Boolean,
            "date" => DataType::Date,
            "timestamp" | "datetime" => DataType::Timestamp,
            _ => DataType::String,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, DataType::String)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DataType::TinyInt => "TINYINT",
            DataType::SmallInt => "SMALLINT",
            DataType::Integer => "INTEGER",
            DataType::BigInt => "BIGINT",
            DataType::Float => "FLOAT",
            DataType::Double => "DOUBLE",
            DataType::Decimal => "DECIMAL",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Timestamp => "TIMESTAMP",
            DataType::String => "VARCHAR",
        })
    }
}

/// Runtime value stored in a row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
    Boolean(bool),
    Date(NaiveDate),
    /// Milliseconds since the Unix epoch
    Timestamp(i64),
    String(String),
}

impl Value {
    /// Returns the data type of the value, or None if it's Null
    pub fn datatype(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::TinyInt(_) => Some(DataType::TinyInt),
            Self::SmallInt(_) => Some(DataType::SmallInt),
            Self::Integer(_) => Some(DataType::Integer),
            Self::BigInt(_) => Some(DataType::BigInt),
            Self::Float(_) => Some(DataType::Float),
            Self::Double(_) => Some(DataType::Double),
            Self::Decimal(_) => Some(DataType::Decimal),
            Self::Boolean(_) => Some(DataType::Boolean),
            Self::Date(_) => Some(DataType::Date),
            Self::Timestamp(_) => Some(DataType::Timestamp),
            Self::String(_) => Some(DataType::String),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Total ordering between two values of the same kind
    ///
    /// NULL sorts before everything else. Values of different kinds are not
    /// comparable and produce `Error::TypeMismatch`; nothing is coerced.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        Ok(match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::TinyInt(a), Value::TinyInt(b)) => a.cmp(b),
            (Value::SmallInt(a), Value::SmallInt(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::BigInt(a), Value::BigInt(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (a, b) => return Err(Error::TypeMismatch(a.describe(), b.describe())),
        })
    }

    fn describe(&self) -> String {
        match self.datatype() {
            Some(datatype) => format!("{} {}", datatype, self),
            None => self.to_string(),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) if *b => write!(f, "TRUE"),
            Value::Boolean(_) => write!(f, "FALSE"),
            Value::TinyInt(v) => write!(f, "{}", v),
            Value::SmallInt(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::BigInt(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::Timestamp(millis) => match DateTime::from_timestamp_millis(*millis) {
                Some(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.3f")),
                None => write!(f, "{}", millis),
            },
            Value::String(v) => write!(f, "{}", v),
        }
    }
}

/// A row is a fixed-width vector of values
///
/// Table rows are created with [`Row::nulls`] at the schema width and only
/// ever written slot by slot, so their width cannot drift.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Row(Vec<Value>);

impl Row {
    pub fn nulls(width: usize) -> Self {
        Row(vec![Value::Null; width])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrites one slot; `index` must come from the owning schema
    pub fn set(&mut self, index: usize, value: Value) {
        self.0[index] = value;
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Picks the given slots in order (repeats allowed)
    pub fn project(&self, indexes: &[usize]) -> Row {
        indexes.iter().map(|&i| self.0[i].clone()).collect()
    }
}

impl Index<usize> for Row {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        &self.0[index]
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Row(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    use super::{DataType, Row, Value};
    use crate::error::{Error, Result};

    #[test]
    fn test_datatype_from_name() {
        assert_eq!(DataType::from_name("INT"), DataType::Integer);
        assert_eq!(DataType::from_name("Integer"), DataType::Integer);
        assert_eq!(DataType::from_name("bigint"), DataType::BigInt);
        assert_eq!(DataType::from_name("short"), DataType::SmallInt);
        assert_eq!(DataType::from_name("Timestamp"), DataType::Timestamp);
        assert_eq!(DataType::from_name("varchar"), DataType::String);
        assert_eq!(DataType::from_name("geometry"), DataType::String);
    }

    #[test]
    fn test_compare_same_kind() -> Result<()> {
        assert_eq!(Value::Integer(1).compare(&Value::Integer(2))?, Ordering::Less);
        assert_eq!(Value::Double(2.5).compare(&Value::Double(2.5))?, Ordering::Equal);
        assert_eq!(
            Value::String("b".into()).compare(&Value::String("a".into()))?,
            Ordering::Greater
        );
        let d1 = NaiveDate::from_ymd_opt(2023, 5, 29).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2023, 5, 30).unwrap();
        assert_eq!(Value::Date(d1).compare(&Value::Date(d2))?, Ordering::Less);
        let decimal = |s: &str| Value::Decimal(s.parse::<BigDecimal>().unwrap());
        assert_eq!(decimal("10.50").compare(&decimal("10.5"))?, Ordering::Equal);
        assert_eq!(
            decimal("123456789012345678901234567890.1")
                .compare(&decimal("123456789012345678901234567890.01"))?,
            Ordering::Greater
        );
        Ok(())
    }

    #[test]
    fn test_compare_null_sorts_first() -> Result<()> {
        assert_eq!(Value::Null.compare(&Value::Integer(i32::MIN))?, Ordering::Less);
        assert_eq!(Value::BigInt(0).compare(&Value::Null)?, Ordering::Greater);
        assert_eq!(Value::Null.compare(&Value::Null)?, Ordering::Equal);
        Ok(())
    }

    #[test]
    fn test_compare_mismatched_kinds_fails() {
        let err = Value::Integer(1).compare(&Value::BigInt(1)).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch("INTEGER 1".to_string(), "BIGINT 1".to_string())
        );
        assert!(Value::String("1".into()).compare(&Value::Integer(1)).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Boolean(true).to_string(), "TRUE");
        assert_eq!(Value::Timestamp(0).to_string(), "1970-01-01 00:00:00.000");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()).to_string(),
            "2024-02-29"
        );
    }

    #[test]
    fn test_row_project() {
        let row = Row::from(vec![
            Value::Integer(1),
            Value::String("a".into()),
            Value::Boolean(false),
        ]);
        assert_eq!(
            row.project(&[2, 0, 0]),
            Row::from(vec![Value::Boolean(false), Value::Integer(1), Value::Integer(1)])
        );
        assert_eq!(Row::nulls(3).len(), 3);
        assert!(Row::nulls(3).iter().all(Value::is_null));
    }
}
