use thiserror::Error;

use crate::sql::types::DataType;

/// Custom Result type for minisql operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for minisql
///
/// Every variant is fatal to the statement that raised it. The session stops
/// executing the remaining statements of the line.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// SQL text could not be tokenized or parsed
    #[error("parse error {0}")]
    Parse(String),
    /// The front end recognized the statement but the engine has no such kind
    #[error("unsupported statement {0}")]
    UnsupportedStatement(String),
    #[error("database {0} does not exist")]
    DatabaseNotFound(String),
    #[error("table {0} does not exist")]
    TableNotFound(String),
    #[error("no such column named {column} in table {table}")]
    UnknownColumn { table: String, column: String },
    #[error("duplicate column {column} in table {table}")]
    DuplicateColumn { table: String, column: String },
    /// Literal does not fit the declared column type
    #[error("cannot convert '{literal}' to {datatype}: {reason}")]
    Conversion {
        datatype: DataType,
        literal: String,
        reason: String,
    },
    /// WHERE clause is not a single `<column> <op> <literal>` comparison
    #[error("unsupported where condition: {0}")]
    UnsupportedPredicate(String),
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),
    /// Two values of different kinds were compared
    #[error("cannot compare {0} with {1}")]
    TypeMismatch(String, String),
    #[error("{columns} columns but {values} values in insert")]
    ValueCountMismatch { columns: usize, values: usize },
}

impl Error {
    pub(crate) fn conversion(datatype: DataType, literal: &str, reason: impl ToString) -> Self {
        Error::Conversion {
            datatype,
            literal: literal.to_string(),
            reason: reason.to_string(),
        }
    }
}
