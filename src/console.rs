//! Line-oriented console driving a session

use std::io::Write;

use anyhow::Result;
use tracing::warn;

use crate::{
    config::ConsoleConfig,
    formatter::format_result,
    sql::engine::Session,
    storage::Catalog,
};

/// What the caller should do after a line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Feeds whole input lines to a session and renders the results
pub struct Console<'a> {
    session: Session<'a>,
    config: ConsoleConfig,
}

impl<'a> Console<'a> {
    pub fn new(catalog: &'a mut Catalog, config: ConsoleConfig) -> Self {
        Self {
            session: Session::new(catalog),
            config,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Handles one input line
    ///
    /// A line that is exactly the sentinel ends the session. A failing statement ends it too, unless
    /// `keep_going` is set, in which case the error is reported on stderr and
    /// the next line is read.
    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        if line == self.config.sentinel {
            return Ok(Flow::Exit);
        }
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        match self.session.execute(line) {
            Ok(results) => {
                for result in &results {
                    writeln!(out, "{}", format_result(result, self.config.output))?;
                }
                Ok(Flow::Continue)
            }
            Err(err) if self.config.keep_going => {
                warn!(%err, "statement failed");
                eprintln!("Error: {}", err);
                Ok(Flow::Continue)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Handles lines until the sentinel or the end of input
    pub fn run_lines<'l, W, I>(&mut self, lines: I, out: &mut W) -> Result<()>
    where
        W: Write,
        I: IntoIterator<Item = &'l str>,
    {
        for line in lines {
            if self.handle_line(line, out)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Console, Flow};
    use crate::{
        config::ConsoleConfig,
        error::Error,
        formatter::OutputFormat,
        storage::Catalog,
    };

    fn raw_config() -> ConsoleConfig {
        ConsoleConfig {
            output: OutputFormat::Raw,
            ..ConsoleConfig::default()
        }
    }

    #[test]
    fn test_console_stops_at_sentinel() -> anyhow::Result<()> {
        let mut catalog = Catalog::new();
        let mut console = Console::new(&mut catalog, raw_config());
        let mut out = Vec::new();
        console.run_lines(
            [
                "create table t (id int, name varchar)",
                "",
                "insert into t values (1, 'a'); select name from t",
                "exit",
                "insert into t values (2, 'b')",
            ],
            &mut out,
        )?;
        assert_eq!(
            String::from_utf8(out)?,
            "CREATE TABLE t\nINSERT 1\nname\na\n"
        );
        assert_eq!(catalog.database(None)?.get_table("t")?.rows().len(), 1);
        Ok(())
    }

    #[test]
    fn test_console_error_ends_session() {
        let mut catalog = Catalog::new();
        let mut console = Console::new(&mut catalog, raw_config());
        let mut out = Vec::new();
        let err = console
            .run_lines(["select * from t", "create table t (id int)"], &mut out)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::TableNotFound("t".to_string()))
        );
        assert!(catalog.database(None).unwrap().table_names().is_empty());
    }

    #[test]
    fn test_console_keep_going() -> anyhow::Result<()> {
        let mut catalog = Catalog::new();
        let config = ConsoleConfig {
            keep_going: true,
            ..raw_config()
        };
        let mut console = Console::new(&mut catalog, config);
        let mut out = Vec::new();
        assert_eq!(console.handle_line("select * from t", &mut out)?, Flow::Continue);
        assert_eq!(console.handle_line("create table t (id int)", &mut out)?, Flow::Continue);
        assert_eq!(console.handle_line("exit", &mut out)?, Flow::Exit);
        assert_eq!(String::from_utf8(out)?, "CREATE TABLE t\n");
        Ok(())
    }

    #[test]
    fn test_console_sentinel_is_exact() {
        let mut catalog = Catalog::new();
        let mut console = Console::new(&mut catalog, raw_config());
        let mut out = Vec::new();
        for line in ["EXIT", " exit"] {
            let err = console.handle_line(line, &mut out).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<Error>(),
                Some(Error::UnsupportedStatement(_))
            ));
        }
        assert_eq!(console.handle_line("exit", &mut out).unwrap(), Flow::Exit);
    }
}
