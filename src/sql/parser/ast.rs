use std::fmt::Display;

use crate::sql::schema::Column;

/// Abstract Syntax Tree (AST) node definitions for SQL statements
///
/// One variant per statement kind the engine executes. Every field the
/// dispatcher forwards to the catalog is already structured here, so nothing
/// past the parser ever looks at SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateDatabase {
        name: String,
        if_not_exists: bool,
    },
    DropDatabase {
        name: String,
    },
    CreateTable {
        table: TableRef,
        columns: Vec<Column>,
        if_not_exists: bool,
    },
    /// DROP TABLE t1, t2, ...
    DropTable {
        tables: Vec<TableRef>,
    },
    /// INSERT statement; an empty column list means every column in schema order
    Insert {
        table: TableRef,
        columns: Vec<String>,
        values: Vec<Vec<Consts>>,
    },
    Delete {
        table: TableRef,
        where_clause: Option<Expression>,
    },
    /// UPDATE statement; set items apply in order
    Update {
        table: TableRef,
        set: Vec<(String, Consts)>,
        where_clause: Option<Expression>,
    },
    Select {
        select: Vec<SelectItem>,
        from: TableRef,
        where_clause: Option<Expression>,
        order_by: Vec<(String, OrderDirection)>,
    },
    /// USE statement
    Use {
        name: String,
    },
}

/// Table reference with an optional database qualifier (`db.table`)
#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }
}

impl Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Item of a SELECT list
#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    /// `*`, every column in schema order
    Wildcard,
    Column(String),
}

/// Sort direction (ascending or descending)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

/// Expression types (column refs, constants, operations, function calls)
///
/// The parser accepts more than the engine evaluates; WHERE compilation
/// rejects every shape but `<column> <op> <literal>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Column reference
    Field(String),
    /// Constant value
    Consts(Consts),
    /// Binary operation
    Operation(Operator, Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    /// Parenthesized expression
    Nested(Box<Expression>),
    /// Function call, e.g. `lower(name)`
    Function(String, Vec<Expression>),
}

impl Expression {
    pub fn operation(op: Operator, left: Expression, right: Expression) -> Self {
        Expression::Operation(op, Box::new(left), Box::new(right))
    }
}

/// Implements From trait to convert Consts into Expression
impl From<Consts> for Expression {
    fn from(value: Consts) -> Self {
        Self::Consts(value)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Field(name) => write!(f, "{}", name),
            Expression::Consts(c) => write!(f, "{}", c),
            Expression::Operation(op, l, r) => write!(f, "{} {} {}", l, op, r),
            Expression::Not(e) => write!(f, "NOT {}", e),
            Expression::Nested(e) => write!(f, "({})", e),
            Expression::Function(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Constant values in SQL statements
///
/// Literals stay raw text until they meet a column: the declared type of that
/// column decides how they are converted.
#[derive(Debug, Clone, PartialEq)]
pub enum Consts {
    Null,
    Boolean(bool),
    Number(String),
    String(String),
}

impl Consts {
    /// Raw literal text handed to the value converter, None for NULL
    pub fn raw(&self) -> Option<&str> {
        match self {
            Consts::Null => None,
            Consts::Boolean(true) => Some("true"),
            Consts::Boolean(false) => Some("false"),
            Consts::Number(n) => Some(n.as_str()),
            Consts::String(s) => Some(s.as_str()),
        }
    }
}

impl Display for Consts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Consts::Null => write!(f, "NULL"),
            Consts::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Consts::Number(n) => write!(f, "{}", n),
            Consts::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    And,
    Or,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Like => "LIKE",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
        })
    }
}
