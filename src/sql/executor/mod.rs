use std::fmt::Display;

use serde::Serialize;

use crate::{
    error::Result,
    sql::{
        executor::{
            mutation::{Delete, Insert, Update},
            query::Select,
            schema::{CreateDatabase, CreateTable, DropDatabase, DropTable, UseDatabase},
        },
        parser::ast::Statement,
        types::Row,
    },
    storage::Catalog,
};

mod mutation;
mod query;
mod schema;

/// SQL executor trait
pub trait Executor {
    fn execute(self: Box<Self>, catalog: &mut Catalog) -> Result<ResultSet>;
}

impl dyn Executor {
    /// Builds the executor for a statement, one per statement kind
    pub fn build(stmt: Statement) -> Box<dyn Executor> {
        match stmt {
            Statement::CreateDatabase {
                name,
                if_not_exists,
            } => CreateDatabase::new(name, if_not_exists),
            Statement::DropDatabase { name } => DropDatabase::new(name),
            Statement::Use { name } => UseDatabase::new(name),
            Statement::CreateTable {
                table,
                columns,
                if_not_exists,
            } => CreateTable::new(table, columns, if_not_exists),
            Statement::DropTable { tables } => DropTable::new(tables),
            Statement::Insert {
                table,
                columns,
                values,
            } => Insert::new(table, columns, values),
            Statement::Delete {
                table,
                where_clause,
            } => Delete::new(table, where_clause),
            Statement::Update {
                table,
                set,
                where_clause,
            } => Update::new(table, set, where_clause),
            Statement::Select {
                select,
                from,
                where_clause,
                order_by,
            } => Select::new(select, from, where_clause, order_by),
        }
    }
}

/// Executes one statement against the catalog
pub fn execute(catalog: &mut Catalog, stmt: Statement) -> Result<ResultSet> {
    <dyn Executor>::build(stmt).execute(catalog)
}

/// Execution result set
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultSet {
    CreateDatabase { name: String },
    DropDatabase { name: String },
    UseDatabase { name: String },
    CreateTable { table_name: String },
    DropTable { count: usize },
    Insert { count: usize },
    Delete { count: usize },
    Update { count: usize },
    Select { columns: Vec<String>, rows: Vec<Row> },
}

impl Display for ResultSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultSet::CreateDatabase { name } => write!(f, "CREATE DATABASE {}", name),
            ResultSet::DropDatabase { name } => write!(f, "DROP DATABASE {}", name),
            ResultSet::UseDatabase { name } => write!(f, "USE {}", name),
            ResultSet::CreateTable { table_name } => write!(f, "CREATE TABLE {}", table_name),
            ResultSet::DropTable { count } => write!(f, "DROP TABLE {}", count),
            ResultSet::Insert { count } => write!(f, "INSERT {}", count),
            ResultSet::Delete { count } => write!(f, "DELETE {}", count),
            ResultSet::Update { count } => write!(f, "UPDATE {}", count),
            ResultSet::Select { rows, .. } => write!(f, "SELECT {}", rows.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ResultSet, execute};
    use crate::{
        error::{Error, Result},
        sql::{
            parser::Parser,
            types::{Row, Value},
        },
        storage::Catalog,
    };

    fn run(catalog: &mut Catalog, sql: &str) -> Result<ResultSet> {
        execute(catalog, Parser::new(sql).parse()?)
    }

    #[test]
    fn test_execute_dispatch() -> Result<()> {
        let mut catalog = Catalog::new();
        assert_eq!(
            run(&mut catalog, "create database shop")?,
            ResultSet::CreateDatabase {
                name: "shop".to_string()
            }
        );
        run(&mut catalog, "use shop")?;
        assert_eq!(
            run(&mut catalog, "create table t (id int, name varchar(10))")?,
            ResultSet::CreateTable {
                table_name: "t".to_string()
            }
        );
        assert_eq!(
            run(&mut catalog, "insert into t values (1, 'a'), (2, 'b')")?,
            ResultSet::Insert { count: 2 }
        );
        assert_eq!(
            run(&mut catalog, "update t set name = 'c' where id > 1")?,
            ResultSet::Update { count: 1 }
        );
        assert_eq!(
            run(&mut catalog, "select name from default.t"),
            Err(Error::TableNotFound("t".to_string()))
        );
        assert_eq!(
            run(&mut catalog, "select name from t order by id desc")?,
            ResultSet::Select {
                columns: vec!["name".to_string()],
                rows: vec![
                    Row::from(vec![Value::String("c".to_string())]),
                    Row::from(vec![Value::String("a".to_string())]),
                ],
            }
        );
        assert_eq!(
            run(&mut catalog, "delete from t")?,
            ResultSet::Delete { count: 2 }
        );
        assert_eq!(
            run(&mut catalog, "drop table t, t")?,
            ResultSet::DropTable { count: 1 }
        );
        Ok(())
    }

    #[test]
    fn test_execute_if_not_exists() -> Result<()> {
        let mut catalog = Catalog::new();
        run(&mut catalog, "create table t (id int)")?;
        run(&mut catalog, "insert into t values (1)")?;

        run(&mut catalog, "create table if not exists t (id int)")?;
        let ResultSet::Select { rows, .. } = run(&mut catalog, "select * from t")? else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 1);

        // Without IF NOT EXISTS the table is replaced
        run(&mut catalog, "create table t (id int)")?;
        let ResultSet::Select { rows, .. } = run(&mut catalog, "select * from t")? else {
            panic!("expected rows");
        };
        assert!(rows.is_empty());

        run(&mut catalog, "create database if not exists default")?;
        assert!(catalog.contains_database("default"));
        assert_eq!(catalog.database(None)?.table_names(), vec!["t"]);
        Ok(())
    }

    #[test]
    fn test_result_set_display() {
        assert_eq!(ResultSet::Insert { count: 3 }.to_string(), "INSERT 3");
        assert_eq!(
            ResultSet::UseDatabase {
                name: "shop".to_string()
            }
            .to_string(),
            "USE shop"
        );
    }
}
