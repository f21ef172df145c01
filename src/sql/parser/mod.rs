use std::iter::Peekable;

use crate::error::{Error, Result};
use crate::sql::parser::ast::{Consts, Expression, Operator, OrderDirection, SelectItem, TableRef};
use crate::sql::parser::lexer::{Keyword, Lexer, Token};
use crate::sql::schema::Column;
use crate::sql::types::DataType;

pub mod ast;
mod lexer;

/// SQL Parser - Converts tokens into Abstract Syntax Tree (AST)
pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given SQL input
    pub fn new(input: &'a str) -> Self {
        Parser {
            lexer: Lexer::new(input).peekable(),
        }
    }

    /// Parses the input as exactly one statement (trailing semicolon optional)
    pub fn parse(&mut self) -> Result<ast::Statement> {
        let stmt = self.parse_statement()?;
        self.next_if_token(Token::Semicolon);
        // No tokens allowed after semicolon
        if let Some(token) = self.peek()? {
            return Err(Error::Parse(format!("[Parser] Unexpected token {}", token)));
        }
        Ok(stmt)
    }

    /// Parses the next statement of a `;` separated list
    ///
    /// Returns `None` once the input is exhausted. Empty statements are
    /// skipped. Statements are parsed lazily so a caller can execute one
    /// before the next is even read.
    pub fn next_statement(&mut self) -> Result<Option<ast::Statement>> {
        while self.next_if_token(Token::Semicolon).is_some() {}
        if self.peek()?.is_none() {
            return Ok(None);
        }
        let stmt = self.parse_statement()?;
        match self.peek()? {
            None => {}
            Some(Token::Semicolon) => {
                self.next_token()?;
            }
            Some(token) => {
                return Err(Error::Parse(format!("[Parser] Unexpected token {}", token)));
            }
        }
        Ok(Some(stmt))
    }

    /// Parses a statement based on the first token
    fn parse_statement(&mut self) -> Result<ast::Statement> {
        match self.peek()? {
            Some(Token::Keyword(Keyword::Create)) => self.parse_create(),
            Some(Token::Keyword(Keyword::Drop)) => self.parse_drop(),
            Some(Token::Keyword(Keyword::Select)) => self.parse_select(),
            Some(Token::Keyword(Keyword::Insert)) => self.parse_insert(),
            Some(Token::Keyword(Keyword::Update)) => self.parse_update(),
            Some(Token::Keyword(Keyword::Delete)) => self.parse_delete(),
            Some(Token::Keyword(Keyword::Use)) => self.parse_use(),
            Some(Token::Keyword(k)) => Err(Error::UnsupportedStatement(k.to_string())),
            Some(Token::Ident(word)) => Err(Error::UnsupportedStatement(word.to_uppercase())),
            Some(t) => Err(Error::Parse(format!("[Parser] Unexpected token {}", t))),
            None => Err(Error::Parse("[Parser] Unexpected end of input".to_string())),
        }
    }

    /// Parses CREATE DATABASE / CREATE TABLE
    fn parse_create(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Create))?;
        match self.next_token()? {
            Token::Keyword(Keyword::Database) | Token::Keyword(Keyword::Schema) => {
                let if_not_exists = self.parse_if_not_exists()?;
                Ok(ast::Statement::CreateDatabase {
                    name: self.next_ident()?,
                    if_not_exists,
                })
            }
            Token::Keyword(Keyword::Table) => self.parse_create_table(),
            token => Err(Error::UnsupportedStatement(format!(
                "CREATE {}",
                token.to_string().to_uppercase()
            ))),
        }
    }

    /// Parses CREATE TABLE statement
    fn parse_create_table(&mut self) -> Result<ast::Statement> {
        let if_not_exists = self.parse_if_not_exists()?;
        let table = self.parse_table_ref()?;
        self.next_expect(Token::OpenParen)?;

        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_column()?);
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        self.next_expect(Token::CloseParen)?;
        Ok(ast::Statement::CreateTable {
            table,
            columns,
            if_not_exists,
        })
    }

    /// Parses column definition in CREATE TABLE: `name type[(n[, m])]`
    fn parse_column(&mut self) -> Result<Column> {
        let name = self.next_ident()?;
        let datatype = DataType::from_name(&self.next_ident()?);

        // Length and precision arguments such as VARCHAR(100) carry no meaning here
        if self.next_if_token(Token::OpenParen).is_some() {
            loop {
                match self.next_token()? {
                    Token::Number(_) | Token::Comma => {}
                    Token::CloseParen => break,
                    token => {
                        return Err(Error::Parse(format!("[Parser] Unexpected token {}", token)));
                    }
                }
            }
        }
        Ok(Column::new(name, datatype))
    }

    /// Parses DROP DATABASE / DROP TABLE
    fn parse_drop(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Drop))?;
        match self.next_token()? {
            Token::Keyword(Keyword::Database) | Token::Keyword(Keyword::Schema) => {
                self.parse_if_exists()?;
                Ok(ast::Statement::DropDatabase {
                    name: self.next_ident()?,
                })
            }
            Token::Keyword(Keyword::Table) => {
                self.parse_if_exists()?;
                let mut tables = Vec::new();
                loop {
                    tables.push(self.parse_table_ref()?);
                    if self.next_if_token(Token::Comma).is_none() {
                        break;
                    }
                }
                Ok(ast::Statement::DropTable { tables })
            }
            token => Err(Error::UnsupportedStatement(format!(
                "DROP {}",
                token.to_string().to_uppercase()
            ))),
        }
    }

    /// Parses SELECT statement
    fn parse_select(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Select))?;

        let mut select = Vec::new();
        loop {
            if self.next_if_token(Token::Asterisk).is_some() {
                select.push(SelectItem::Wildcard);
            } else {
                select.push(SelectItem::Column(self.next_ident()?));
            }
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }

        self.next_expect(Token::Keyword(Keyword::From))?;
        let from = self.parse_table_ref()?;
        let where_clause = self.parse_where_clause()?;
        let order_by = self.parse_order_clause()?;

        Ok(ast::Statement::Select {
            select,
            from,
            where_clause,
            order_by,
        })
    }

    /// Parses INSERT statement
    fn parse_insert(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Insert))?;
        self.next_expect(Token::Keyword(Keyword::Into))?;

        let table = self.parse_table_ref()?;

        // Check if specific columns are specified
        let mut columns = Vec::new();
        if self.next_if_token(Token::OpenParen).is_some() {
            loop {
                columns.push(self.next_ident()?);
                match self.next_token()? {
                    Token::CloseParen => break,
                    Token::Comma => {}
                    token => {
                        return Err(Error::Parse(format!("[Parser] Unexpected token {}", token)));
                    }
                }
            }
        }

        self.next_expect(Token::Keyword(Keyword::Values))?;
        // Parse multiple value rows: INSERT INTO tbl VALUES (1,2),(3,4);
        let mut values = Vec::new();
        loop {
            self.next_expect(Token::OpenParen)?;
            let mut literals = Vec::new();
            loop {
                literals.push(self.parse_consts()?);
                match self.next_token()? {
                    Token::CloseParen => break,
                    Token::Comma => {}
                    token => {
                        return Err(Error::Parse(format!("[Parser] Unexpected token {}", token)));
                    }
                }
            }
            values.push(literals);
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        Ok(ast::Statement::Insert {
            table,
            columns,
            values,
        })
    }

    /// Parses UPDATE statement
    fn parse_update(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Update))?;
        let table = self.parse_table_ref()?;
        self.next_expect(Token::Keyword(Keyword::Set))?;

        // Repeated columns are kept; the last assignment wins when applied
        let mut set = Vec::new();
        loop {
            let col = self.next_ident()?;
            self.next_expect(Token::Equal)?;
            set.push((col, self.parse_consts()?));
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        Ok(ast::Statement::Update {
            table,
            set,
            where_clause: self.parse_where_clause()?,
        })
    }

    /// Parses DELETE statement
    fn parse_delete(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Delete))?;
        self.next_expect(Token::Keyword(Keyword::From))?;
        Ok(ast::Statement::Delete {
            table: self.parse_table_ref()?,
            where_clause: self.parse_where_clause()?,
        })
    }

    /// Parses USE statement
    fn parse_use(&mut self) -> Result<ast::Statement> {
        self.next_expect(Token::Keyword(Keyword::Use))?;
        Ok(ast::Statement::Use {
            name: self.next_ident()?,
        })
    }

    /// Parses `[schema.]name`
    fn parse_table_ref(&mut self) -> Result<TableRef> {
        let name = self.next_ident()?;
        if self.next_if_token(Token::Period).is_some() {
            return Ok(TableRef::qualified(name, self.next_ident()?));
        }
        Ok(TableRef::new(name))
    }

    fn parse_if_not_exists(&mut self) -> Result<bool> {
        if self.next_if_token(Token::Keyword(Keyword::If)).is_none() {
            return Ok(false);
        }
        self.next_expect(Token::Keyword(Keyword::Not))?;
        self.next_expect(Token::Keyword(Keyword::Exists))?;
        Ok(true)
    }

    fn parse_if_exists(&mut self) -> Result<bool> {
        if self.next_if_token(Token::Keyword(Keyword::If)).is_none() {
            return Ok(false);
        }
        self.next_expect(Token::Keyword(Keyword::Exists))?;
        Ok(true)
    }

    /// Parses a literal value
    fn parse_consts(&mut self) -> Result<Consts> {
        Ok(match self.next_token()? {
            Token::Number(n) => Consts::Number(n),
            Token::Minus => match self.next_token()? {
                Token::Number(n) => Consts::Number(format!("-{}", n)),
                t => {
                    return Err(Error::Parse(format!(
                        "[Parser] Expected number after -, got {}",
                        t
                    )));
                }
            },
            Token::String(s) => Consts::String(s),
            Token::Keyword(Keyword::True) => Consts::Boolean(true),
            Token::Keyword(Keyword::False) => Consts::Boolean(false),
            Token::Keyword(Keyword::Null) => Consts::Null,
            t => {
                return Err(Error::Parse(format!(
                    "[Parser] Unexpected expression token {}",
                    t
                )));
            }
        })
    }

    /// Parses an optional WHERE clause
    fn parse_where_clause(&mut self) -> Result<Option<Expression>> {
        if self.next_if_token(Token::Keyword(Keyword::Where)).is_none() {
            return Ok(None);
        }
        Ok(Some(self.parse_expression()?))
    }

    /// Parses an optional ORDER BY clause
    fn parse_order_clause(&mut self) -> Result<Vec<(String, OrderDirection)>> {
        let mut orders = Vec::new();
        if self.next_if_token(Token::Keyword(Keyword::Order)).is_none() {
            return Ok(orders);
        }
        self.next_expect(Token::Keyword(Keyword::By))?;

        loop {
            let col = self.next_ident()?;
            let direction = match self.next_if(|t| {
                matches!(t, Token::Keyword(Keyword::Asc) | Token::Keyword(Keyword::Desc))
            }) {
                Some(Token::Keyword(Keyword::Desc)) => OrderDirection::Desc,
                _ => OrderDirection::Asc,
            };
            orders.push((col, direction));
            if self.next_if_token(Token::Comma).is_none() {
                break;
            }
        }
        Ok(orders)
    }

    /// Parses an expression
    ///
    /// Precedence, loosest first: OR, AND, NOT, comparison, `+ -`, `* /`.
    fn parse_expression(&mut self) -> Result<Expression> {
        let mut left = self.parse_and()?;
        while self.next_if_token(Token::Keyword(Keyword::Or)).is_some() {
            let right = self.parse_and()?;
            left = Expression::operation(Operator::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut left = self.parse_not()?;
        while self.next_if_token(Token::Keyword(Keyword::And)).is_some() {
            let right = self.parse_not()?;
            left = Expression::operation(Operator::And, left, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expression> {
        if self.next_if_token(Token::Keyword(Keyword::Not)).is_some() {
            return Ok(Expression::Not(Box::new(self.parse_not()?)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let left = self.parse_additive()?;
        let op = match self.peek()? {
            Some(Token::Equal) => Operator::Equal,
            Some(Token::NotEqual) => Operator::NotEqual,
            Some(Token::GreaterThan) => Operator::GreaterThan,
            Some(Token::GreaterThanOrEqual) => Operator::GreaterThanOrEqual,
            Some(Token::LessThan) => Operator::LessThan,
            Some(Token::LessThanOrEqual) => Operator::LessThanOrEqual,
            Some(Token::Keyword(Keyword::Like)) => Operator::Like,
            _ => return Ok(left),
        };
        self.next_token()?;
        let right = self.parse_additive()?;
        Ok(Expression::operation(op, left, right))
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek()? {
                Some(Token::Plus) => Operator::Add,
                Some(Token::Minus) => Operator::Subtract,
                _ => return Ok(left),
            };
            self.next_token()?;
            let right = self.parse_multiplicative()?;
            left = Expression::operation(op, left, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut left = self.parse_primary()?;
        loop {
            let op = match self.peek()? {
                Some(Token::Asterisk) => Operator::Multiply,
                Some(Token::Slash) => Operator::Divide,
                _ => return Ok(left),
            };
            self.next_token()?;
            let right = self.parse_primary()?;
            left = Expression::operation(op, left, right);
        }
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match self.peek()? {
            Some(Token::OpenParen) => {
                self.next_token()?;
                let inner = self.parse_expression()?;
                self.next_expect(Token::CloseParen)?;
                Ok(Expression::Nested(Box::new(inner)))
            }
            Some(Token::Ident(_)) => {
                let name = self.next_ident()?;
                if self.next_if_token(Token::OpenParen).is_none() {
                    return Ok(Expression::Field(name));
                }
                let mut args = Vec::new();
                if self.next_if_token(Token::CloseParen).is_none() {
                    loop {
                        args.push(self.parse_expression()?);
                        match self.next_token()? {
                            Token::CloseParen => break,
                            Token::Comma => {}
                            token => {
                                return Err(Error::Parse(format!(
                                    "[Parser] Unexpected token {}",
                                    token
                                )));
                            }
                        }
                    }
                }
                Ok(Expression::Function(name, args))
            }
            _ => Ok(self.parse_consts()?.into()),
        }
    }

    /// Peeks at the next token
    fn peek(&mut self) -> Result<Option<Token>> {
        self.lexer.peek().cloned().transpose()
    }

    /// Consumes and returns the next token
    fn next_token(&mut self) -> Result<Token> {
        self.lexer
            .next()
            .unwrap_or_else(|| Err(Error::Parse("[Parser] Unexpected end of input".to_string())))
    }

    /// Expects and consumes an identifier
    fn next_ident(&mut self) -> Result<String> {
        match self.next_token()? {
            Token::Ident(ident) => Ok(ident),
            token => Err(Error::Parse(format!(
                "[Parser] Expected ident, got token {}",
                token
            ))),
        }
    }

    /// Expects a specific token, returns error if different
    fn next_expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next_token()?;
        if token != expect {
            return Err(Error::Parse(format!(
                "[Parser] Expected token {}, got {}",
                expect, token
            )));
        }
        Ok(())
    }

    /// Consumes next token if it satisfies the predicate
    fn next_if<F: Fn(&Token) -> bool>(&mut self, predicate: F) -> Option<Token> {
        self.peek().unwrap_or(None).filter(|t| predicate(t))?;
        self.next_token().ok()
    }

    /// Consumes next token if it matches the given token
    fn next_if_token(&mut self, token: Token) -> Option<Token> {
        self.next_if(|t| t == &token)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{Error, Result},
        sql::{
            parser::ast::{
                self, Consts, Expression, Operator, OrderDirection, SelectItem, TableRef,
            },
            schema::Column,
            types::DataType,
        },
    };

    use super::Parser;

    #[test]
    fn test_parser_create_table() -> Result<()> {
        let sql1 = "
            create table tbl1 (
                a int,
                b float,
                c varchar(20),
                d decimal(10, 2)
            );
        ";
        let stmt1 = Parser::new(sql1).parse()?;

        let sql2 = "
        create            table tbl1 (
            a INT     ,
            b float,
            c   varchar ( 20 ),
            d       DECIMAL(10,2)
        )
        ";
        let stmt2 = Parser::new(sql2).parse()?;
        assert_eq!(stmt1, stmt2);
        assert_eq!(
            stmt1,
            ast::Statement::CreateTable {
                table: TableRef::new("tbl1"),
                columns: vec![
                    Column::new("a", DataType::Integer),
                    Column::new("b", DataType::Float),
                    Column::new("c", DataType::String),
                    Column::new("d", DataType::Decimal),
                ],
                if_not_exists: false,
            }
        );

        let sql3 = "create table tbl1 (a int, b float) extra";
        assert!(Parser::new(sql3).parse().is_err());
        Ok(())
    }

    #[test]
    fn test_parser_database_statements() -> Result<()> {
        assert_eq!(
            Parser::new("CREATE DATABASE IF NOT EXISTS test;").parse()?,
            ast::Statement::CreateDatabase {
                name: "test".to_string(),
                if_not_exists: true
            }
        );
        assert_eq!(
            Parser::new("drop database if exists test").parse()?,
            ast::Statement::DropDatabase {
                name: "test".to_string()
            }
        );
        assert_eq!(
            Parser::new("USE test;").parse()?,
            ast::Statement::Use {
                name: "test".to_string()
            }
        );
        assert_eq!(
            Parser::new("drop table a, other.b;").parse()?,
            ast::Statement::DropTable {
                tables: vec![TableRef::new("a"), TableRef::qualified("other", "b")]
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_insert() -> Result<()> {
        let sql1 = "insert into tbl1 values (1, -2, 3.5, 'a', true, null);";
        let stmt1 = Parser::new(sql1).parse()?;
        assert_eq!(
            stmt1,
            ast::Statement::Insert {
                table: TableRef::new("tbl1"),
                columns: vec![],
                values: vec![vec![
                    Consts::Number("1".to_string()),
                    Consts::Number("-2".to_string()),
                    Consts::Number("3.5".to_string()),
                    Consts::String("a".to_string()),
                    Consts::Boolean(true),
                    Consts::Null,
                ]],
            }
        );

        let sql2 = "insert into db.tbl2 (c1, c2, c3) values (3, 'a', true),(4, 'b', false);";
        let stmt2 = Parser::new(sql2).parse()?;
        assert_eq!(
            stmt2,
            ast::Statement::Insert {
                table: TableRef::qualified("db", "tbl2"),
                columns: vec!["c1".to_string(), "c2".to_string(), "c3".to_string()],
                values: vec![
                    vec![
                        Consts::Number("3".to_string()),
                        Consts::String("a".to_string()),
                        Consts::Boolean(true),
                    ],
                    vec![
                        Consts::Number("4".to_string()),
                        Consts::String("b".to_string()),
                        Consts::Boolean(false),
                    ],
                ],
            }
        );

        Ok(())
    }

    #[test]
    fn test_parser_update_and_delete() -> Result<()> {
        let stmt = Parser::new("UPDATE t SET name = 'z', name = 'y' WHERE id >= 2;").parse()?;
        assert_eq!(
            stmt,
            ast::Statement::Update {
                table: TableRef::new("t"),
                set: vec![
                    ("name".to_string(), Consts::String("z".to_string())),
                    ("name".to_string(), Consts::String("y".to_string())),
                ],
                where_clause: Some(Expression::operation(
                    Operator::GreaterThanOrEqual,
                    Expression::Field("id".to_string()),
                    Consts::Number("2".to_string()).into(),
                )),
            }
        );

        let stmt = Parser::new("delete from t").parse()?;
        assert_eq!(
            stmt,
            ast::Statement::Delete {
                table: TableRef::new("t"),
                where_clause: None,
            }
        );
        Ok(())
    }

    #[test]
    fn test_parser_select() -> Result<()> {
        let sql = "select name, *, id from tbl1 where id <> 3 order by id desc, name;";
        let stmt = Parser::new(sql).parse()?;
        assert_eq!(
            stmt,
            ast::Statement::Select {
                select: vec![
                    SelectItem::Column("name".to_string()),
                    SelectItem::Wildcard,
                    SelectItem::Column("id".to_string()),
                ],
                from: TableRef::new("tbl1"),
                where_clause: Some(Expression::operation(
                    Operator::NotEqual,
                    Expression::Field("id".to_string()),
                    Consts::Number("3".to_string()).into(),
                )),
                order_by: vec![
                    ("id".to_string(), OrderDirection::Desc),
                    ("name".to_string(), OrderDirection::Asc),
                ],
            }
        );
        Ok(())
    }

    fn where_of(sql: &str) -> Result<Option<Expression>> {
        match Parser::new(sql).parse()? {
            ast::Statement::Select { where_clause, .. } => Ok(where_clause),
            _ => panic!("expected select"),
        }
    }

    #[test]
    fn test_parser_where_precedence() -> Result<()> {
        let expr = where_of("select * from t where a = 1 or not b > 2 and (c < 3)")?;
        assert_eq!(
            expr.map(|e| e.to_string()),
            Some("a = 1 OR NOT b > 2 AND (c < 3)".to_string())
        );

        let Some(Expression::Operation(Operator::Or, _, right)) =
            where_of("select * from t where a = 1 or b = 2 and c = 3")?
        else {
            panic!("expected OR at the root");
        };
        assert!(matches!(*right, Expression::Operation(Operator::And, _, _)));

        let expr = where_of("select * from t where lower(name) = 'a' + -1")?;
        assert_eq!(
            expr,
            Some(Expression::operation(
                Operator::Equal,
                Expression::Function(
                    "lower".to_string(),
                    vec![Expression::Field("name".to_string())]
                ),
                Expression::operation(
                    Operator::Add,
                    Consts::String("a".to_string()).into(),
                    Consts::Number("-1".to_string()).into(),
                ),
            ))
        );
        Ok(())
    }

    #[test]
    fn test_parser_statement_list() -> Result<()> {
        let mut parser = Parser::new("use a;; select * from t; ");
        assert!(matches!(parser.next_statement()?, Some(ast::Statement::Use { .. })));
        assert!(matches!(parser.next_statement()?, Some(ast::Statement::Select { .. })));
        assert_eq!(parser.next_statement()?, None);
        Ok(())
    }

    #[test]
    fn test_parser_unsupported_statement() {
        assert_eq!(
            Parser::new("ALTER TABLE t ADD c int").parse(),
            Err(Error::UnsupportedStatement("ALTER".to_string()))
        );
        assert_eq!(
            Parser::new("create index i on t (a)").parse(),
            Err(Error::UnsupportedStatement("CREATE INDEX".to_string()))
        );
        assert!(matches!(
            Parser::new("select from t").parse(),
            Err(Error::Parse(_))
        ));
    }
}
