//! minisql console
//!
//! # Usage
//!
//! ```bash
//! # Start the interactive console, `exit` ends it
//! minisql
//!
//! # Execute a single line and exit
//! minisql -c "CREATE TABLE t (id INT); INSERT INTO t VALUES (1); SELECT * FROM t"
//!
//! # Execute every line of a file
//! minisql -f script.sql -o json
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use minisql::config::ConsoleConfig;
use minisql::console::{Console, Flow};
use minisql::formatter::OutputFormat;
use minisql::storage::Catalog;

/// In-memory SQL console
#[derive(Parser, Debug)]
#[command(name = "minisql", version, about = "In-memory SQL console")]
struct Args {
    /// Execute a single line of SQL and exit
    #[arg(short = 'c', long)]
    command: Option<String>,

    /// Execute SQL lines from file and exit
    #[arg(short = 'f', long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output format, overrides the configuration file
    #[arg(short = 'o', long, value_enum)]
    output: Option<OutputFormatArg>,

    /// Configuration file path
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Report failing lines and continue with the next one
    #[arg(long)]
    keep_going: bool,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Output format argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    /// Display results in a formatted table
    Table,
    /// Display results as JSON
    Json,
    /// Display raw tab separated values
    Raw,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Raw => OutputFormat::Raw,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose);

    let config = load_config(&args)?;
    let mut catalog = Catalog::new();
    let mut console = Console::new(&mut catalog, config);
    let mut stdout = io::stdout().lock();

    if let Some(command) = &args.command {
        info!("Executing command: {}", command);
        console.handle_line(command, &mut stdout)?;
        Ok(())
    } else if let Some(file) = &args.file {
        info!("Executing file: {}", file.display());
        let content = std::fs::read_to_string(file)?;
        console.run_lines(content.lines(), &mut stdout)
    } else {
        drop(stdout);
        run_repl(&mut console)
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("minisql=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("minisql=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn load_config(args: &Args) -> Result<ConsoleConfig> {
    let mut config = ConsoleConfig::load(args.config.as_deref())?;

    // Override with command line arguments
    if let Some(output) = args.output {
        config.output = output.into();
    }
    if args.keep_going {
        config.keep_going = true;
    }

    Ok(config)
}

/// Runs the interactive loop until the sentinel or end of input
fn run_repl(console: &mut Console<'_>) -> Result<()> {
    let rl_config = Config::builder()
        .history_ignore_space(true)
        .max_history_size(console.config().history_size)?
        .build();
    let mut editor = DefaultEditor::with_config(rl_config)?;
    let prompt = console.config().prompt.clone();

    loop {
        match editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                if console.handle_line(&line, &mut io::stdout())? == Flow::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                error!("Readline error: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
