use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    sql::types::DataType,
};

/// Column schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub datatype: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            datatype,
        }
    }
}

/// Ordered column list of a table plus its name lookup
///
/// The lookup maps every column name to its position, so it is a bijection
/// onto `0..len()`. Both are fixed once the table is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    table: String,
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate column names
    pub fn new(table: &str, columns: Vec<Column>) -> Result<Self> {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if index.insert(column.name.clone(), i).is_some() {
                return Err(Error::DuplicateColumn {
                    table: table.to_string(),
                    column: column.name.clone(),
                });
            }
        }
        Ok(Self {
            table: table.to_string(),
            columns,
            index,
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    /// Returns the column index for a given column name
    pub fn get_col_index(&self, col_name: &str) -> Result<usize> {
        self.index
            .get(col_name)
            .copied()
            .ok_or_else(|| Error::UnknownColumn {
                table: self.table.clone(),
                column: col_name.to_string(),
            })
    }

    /// Declared type of the named column
    pub fn get_col_type(&self, col_name: &str) -> Result<DataType> {
        Ok(self.columns[self.get_col_index(col_name)?].datatype)
    }
}
