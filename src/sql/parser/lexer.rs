//! SQL Lexer - Tokenizes SQL input text into a stream of tokens

use std::{fmt::Display, iter::Peekable, str::Chars};

use crate::error::{Error, Result};

/// Represents a single lexical token in the SQL input
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// SQL reserved keyword
    Keyword(Keyword),
    /// Identifier such as table name, column name or type name
    Ident(String),
    /// String literal
    String(String),
    /// Numeric literal (integer or decimal)
    Number(String),
    OpenParen,
    CloseParen,
    Comma,
    Semicolon,
    Period,
    Asterisk,
    Plus,
    Minus,
    Slash,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Token::Keyword(keyword) => keyword.to_str(),
            Token::Ident(ident) => ident,
            Token::String(v) => v,
            Token::Number(n) => n,
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Period => ".",
            Token::Asterisk => "*",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Slash => "/",
            Token::Equal => "=",
            Token::NotEqual => "!=",
            Token::LessThan => "<",
            Token::LessThanOrEqual => "<=",
            Token::GreaterThan => ">",
            Token::GreaterThanOrEqual => ">=",
        })
    }
}

/// SQL reserved keywords
///
/// Type names are deliberately not keywords: the parser reads them as plain
/// identifiers and resolves them with `DataType::from_name`.
#[derive(Debug, Clone, PartialEq)]
pub enum Keyword {
    // DDL keywords
    Create,
    Drop,
    Database,
    Schema,
    Table,
    If,
    Exists,
    // DML keywords
    Select,
    From,
    Insert,
    Into,
    Values,
    Delete,
    Update,
    Set,
    Where,
    Order,
    By,
    Asc,
    Desc,
    Use,
    // Expression keywords
    And,
    Or,
    Not,
    Like,
    // Literal keywords
    True,
    False,
    Null,
}

impl Keyword {
    /// Attempts to parse a string as a keyword (case-insensitive)
    pub fn from_str(ident: &str) -> Option<Keyword> {
        Some(match ident.to_uppercase().as_ref() {
            "CREATE" => Keyword::Create,
            "DROP" => Keyword::Drop,
            "DATABASE" => Keyword::Database,
            "SCHEMA" => Keyword::Schema,
            "TABLE" => Keyword::Table,
            "IF" => Keyword::If,
            "EXISTS" => Keyword::Exists,
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "INSERT" => Keyword::Insert,
            "INTO" => Keyword::Into,
            "VALUES" => Keyword::Values,
            "DELETE" => Keyword::Delete,
            "UPDATE" => Keyword::Update,
            "SET" => Keyword::Set,
            "WHERE" => Keyword::Where,
            "ORDER" => Keyword::Order,
            "BY" => Keyword::By,
            "ASC" => Keyword::Asc,
            "DESC" => Keyword::Desc,
            "USE" => Keyword::Use,
            "AND" => Keyword::And,
            "OR" => Keyword::Or,
            "NOT" => Keyword::Not,
            "LIKE" => Keyword::Like,
            "TRUE" => Keyword::True,
            "FALSE" => Keyword::False,
            "NULL" => Keyword::Null,
            _ => return None,
        })
    }

    /// Returns the uppercase string representation of the keyword
    pub fn to_str(&self) -> &str {
        match self {
            Keyword::Create => "CREATE",
            Keyword::Drop => "DROP",
            Keyword::Database => "DATABASE",
            Keyword::Schema => "SCHEMA",
            Keyword::Table => "TABLE",
            Keyword::If => "IF",
            Keyword::Exists => "EXISTS",
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Insert => "INSERT",
            Keyword::Into => "INTO",
            Keyword::Values => "VALUES",
            Keyword::Delete => "DELETE",
            Keyword::Update => "UPDATE",
            Keyword::Set => "SET",
            Keyword::Where => "WHERE",
            Keyword::Order => "ORDER",
            Keyword::By => "BY",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Use => "USE",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::Like => "LIKE",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::Null => "NULL",
        }
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

/// SQL lexical analyzer (lexer/tokenizer)
pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => self
                .iter
                .peek()
                .map(|c| Err(Error::Parse(format!("[Lexer] Unexpected character {}", c)))),
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given SQL text
    pub fn new(sql_text: &'a str) -> Self {
        Self {
            iter: sql_text.chars().peekable(),
        }
    }

    /// Consumes the next character if it satisfies the predicate
    fn next_if<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<char> {
        self.iter.peek().filter(|&c| predicate(*c))?;
        self.iter.next()
    }

    /// Consumes consecutive characters while they satisfy the predicate
    fn next_while<F: Fn(char) -> bool>(&mut self, predicate: F) -> Option<String> {
        let mut value = String::new();
        while let Some(c) = self.next_if(&predicate) {
            value.push(c);
        }
        Some(value).filter(|v| !v.is_empty())
    }

    /// Peeks and consumes if the character maps to a token (for single-char tokens)
    fn next_if_token<F: Fn(char) -> Option<Token>>(&mut self, predicate: F) -> Option<Token> {
        let token = self.iter.peek().and_then(|c| predicate(*c))?;
        self.iter.next();
        Some(token)
    }

    /// Removes whitespace from the input stream
    fn erase_whitespace(&mut self) {
        self.next_while(|c| c.is_whitespace());
    }

    /// Scans and returns the next token
    fn scan(&mut self) -> Result<Option<Token>> {
        self.erase_whitespace();
        match self.iter.peek() {
            Some('\'') => self.scan_string(),
            Some('"') | Some('`') => self.scan_quoted_ident(),
            Some(c) if c.is_ascii_digit() => Ok(self.scan_number()),
            Some(c) if c.is_alphabetic() || *c == '_' => Ok(self.scan_ident()),
            Some(_) => self.scan_symbol(),
            None => Ok(None),
        }
    }

    /// Scans a string literal (enclosed in single quotes, `''` escapes a quote)
    fn scan_string(&mut self) -> Result<Option<Token>> {
        self.iter.next();
        let mut val = String::new();

        loop {
            match self.iter.next() {
                Some('\'') if self.next_if(|c| c == '\'').is_some() => val.push('\''),
                Some('\'') => break,
                Some(c) => val.push(c),
                None => return Err(Error::Parse("[Lexer] Unexpected end of string".to_string())),
            }
        }
        Ok(Some(Token::String(val)))
    }

    /// Scans a `"quoted"` or `` `quoted` `` identifier, keeping its case
    fn scan_quoted_ident(&mut self) -> Result<Option<Token>> {
        let Some(quote) = self.iter.next() else {
            return Ok(None);
        };
        let mut val = String::new();
        loop {
            match self.iter.next() {
                Some(c) if c == quote => break,
                Some(c) => val.push(c),
                None => {
                    return Err(Error::Parse(
                        "[Lexer] Unexpected end of quoted identifier".to_string(),
                    ));
                }
            }
        }
        Ok(Some(Token::Ident(val)))
    }

    /// Scans a numeric literal (integer or decimal)
    fn scan_number(&mut self) -> Option<Token> {
        let mut val = self.next_while(|c| c.is_ascii_digit())?;
        if let Some(sep) = self.next_if(|c| c == '.') {
            val.push(sep);
            while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
                val.push(c);
            }
        }
        Some(Token::Number(val))
    }

    /// Scans an identifier or keyword
    fn scan_ident(&mut self) -> Option<Token> {
        let mut val = self.next_if(|c| c.is_alphabetic() || c == '_')?.to_string();
        while let Some(c) = self.next_if(|c| c.is_alphanumeric() || c == '_') {
            val.push(c);
        }
        // Returns Keyword if matched, otherwise returns as a regular Ident
        Some(Keyword::from_str(&val).map_or(Token::Ident(val.to_lowercase()), Token::Keyword))
    }

    /// Scans an operator or punctuation token, skipping `--` comments
    fn scan_symbol(&mut self) -> Result<Option<Token>> {
        let single = self.next_if_token(|c| match c {
            '*' => Some(Token::Asterisk),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            ',' => Some(Token::Comma),
            ';' => Some(Token::Semicolon),
            '.' => Some(Token::Period),
            '+' => Some(Token::Plus),
            '/' => Some(Token::Slash),
            '=' => Some(Token::Equal),
            _ => None,
        });
        if single.is_some() {
            return Ok(single);
        }

        let token = match self.iter.peek() {
            Some('-') => {
                self.iter.next();
                if self.next_if(|c| c == '-').is_some() {
                    self.next_while(|c| c != '\n');
                    return self.scan();
                }
                Token::Minus
            }
            Some('<') => {
                self.iter.next();
                if self.next_if(|c| c == '=').is_some() {
                    Token::LessThanOrEqual
                } else if self.next_if(|c| c == '>').is_some() {
                    Token::NotEqual
                } else {
                    Token::LessThan
                }
            }
            Some('>') => {
                self.iter.next();
                if self.next_if(|c| c == '=').is_some() {
                    Token::GreaterThanOrEqual
                } else {
                    Token::GreaterThan
                }
            }
            Some('!') => {
                self.iter.next();
                if self.next_if(|c| c == '=').is_none() {
                    return Err(Error::Parse("[Lexer] Unexpected character !".to_string()));
                }
                Token::NotEqual
            }
            _ => return Ok(None),
        };
        Ok(Some(token))
    }
}

#[cfg(test)]
mod tests {
    use super::Lexer;
    use crate::{
        error::Result,
        sql::parser::lexer::{Keyword, Token},
    };

    #[test]
    fn test_lexer_create_table() -> Result<()> {
        let tokens1 = Lexer::new(
            "CREATE table IF NOT EXISTS shop.tbl
                (
                    id1 int,
                    Name varchar(20)
                );
                ",
        )
        .collect::<Result<Vec<_>>>()?;

        assert_eq!(
            tokens1,
            vec![
                Token::Keyword(Keyword::Create),
                Token::Keyword(Keyword::Table),
                Token::Keyword(Keyword::If),
                Token::Keyword(Keyword::Not),
                Token::Keyword(Keyword::Exists),
                Token::Ident("shop".to_string()),
                Token::Period,
                Token::Ident("tbl".to_string()),
                Token::OpenParen,
                Token::Ident("id1".to_string()),
                Token::Ident("int".to_string()),
                Token::Comma,
                Token::Ident("name".to_string()),
                Token::Ident("varchar".to_string()),
                Token::OpenParen,
                Token::Number("20".to_string()),
                Token::CloseParen,
                Token::CloseParen,
                Token::Semicolon
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_insert_into() -> Result<()> {
        let tokens1 = Lexer::new("insert into tbl values (1, -2, 'it''s', true, null, 4.55);")
            .collect::<Result<Vec<_>>>()?;

        assert_eq!(
            tokens1,
            vec![
                Token::Keyword(Keyword::Insert),
                Token::Keyword(Keyword::Into),
                Token::Ident("tbl".to_string()),
                Token::Keyword(Keyword::Values),
                Token::OpenParen,
                Token::Number("1".to_string()),
                Token::Comma,
                Token::Minus,
                Token::Number("2".to_string()),
                Token::Comma,
                Token::String("it's".to_string()),
                Token::Comma,
                Token::Keyword(Keyword::True),
                Token::Comma,
                Token::Keyword(Keyword::Null),
                Token::Comma,
                Token::Number("4.55".to_string()),
                Token::CloseParen,
                Token::Semicolon,
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_operators() -> Result<()> {
        let tokens = Lexer::new("a = 1 != <> < <= > >= -- trailing comment\n`Mixed` \"Case\"")
            .collect::<Result<Vec<_>>>()?;

        assert_eq!(
            tokens,
            vec![
                Token::Ident("a".to_string()),
                Token::Equal,
                Token::Number("1".to_string()),
                Token::NotEqual,
                Token::NotEqual,
                Token::LessThan,
                Token::LessThanOrEqual,
                Token::GreaterThan,
                Token::GreaterThanOrEqual,
                Token::Ident("Mixed".to_string()),
                Token::Ident("Case".to_string()),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_lexer_rejects_unknown_character() {
        let result = Lexer::new("select # from t").collect::<Result<Vec<_>>>();
        assert!(result.is_err());
        assert!(Lexer::new("'open").collect::<Result<Vec<_>>>().is_err());
    }
}
