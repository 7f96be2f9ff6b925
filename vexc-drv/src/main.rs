//! vexc - a preprocessor for the embedded vector-math mini-language.
//!
//! Reads a host source file line by line, passing bytes through verbatim
//! except where an unescaped escape character marks the start of an
//! embedded expression; that expression is compiled via `vexc_lex` /
//! `vexc_sym` / `vexc_par` and the rendered replacement is written in its
//! place.

mod config;
mod error;

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Config;
use error::{DriverError, Result};
use vexc_lex::{Lexer, Token};
use vexc_sym::{Symbol, SymbolTable};

/// Compiles embedded vector-math expressions inside a host source file.
#[derive(Parser, Debug)]
#[command(name = "vexc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles embedded vector-math expressions in a host file", long_about = None)]
struct Cli {
    /// Input file to process
    #[arg(default_value = "main.c")]
    path: PathBuf,

    /// Character that escapes into an embedded expression
    #[arg(long)]
    escape: Option<char>,

    /// Terminator emitted when an expression has no trailing punctuation
    #[arg(long)]
    eol_default: Option<char>,

    /// Path to a symbol table TOML file (defaults to the built-in table)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Path to a configuration file
    #[arg(short, long, env = "VEXC_CONFIG")]
    config: Option<PathBuf>,

    /// Print each token as it is lexed
    #[arg(long)]
    dump_tokens: bool,

    /// Print each resolved symbol node as it is parsed
    #[arg(long)]
    dump_symbols: bool,

    /// Suppress host-text passthrough; emit only compiled expressions
    #[arg(long)]
    parse_only: bool,

    /// Enable verbose logging
    #[arg(short, long, env = "VEXC_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, env = "VEXC_NO_COLOR")]
    no_color: bool,
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| DriverError::Config(format!("failed to initialize logging: {e}")))?;

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    if let Some(escape) = cli.escape {
        config.escape = escape;
    }
    if let Some(eol_default) = cli.eol_default {
        config.eol_default = eol_default;
    }
    if let Some(table) = &cli.table {
        config.symbol_table = Some(table.clone());
    }
    config.dump_tokens |= cli.dump_tokens;
    config.dump_symbols |= cli.dump_symbols;
    config.parse_only |= cli.parse_only;
    config.verbose |= cli.verbose;

    if config.escape == config.eol_default {
        return Err(DriverError::Config(
            "escape character and default terminator must differ".to_string(),
        ));
    }

    Ok(config)
}

fn load_table(config: &Config) -> Result<SymbolTable> {
    match &config.symbol_table {
        Some(path) => Ok(SymbolTable::load(path)?),
        None => Ok(SymbolTable::builtin_defaults()),
    }
}

/// Drives one line of host text: passes bytes through verbatim, tracking
/// whether the cursor is inside a string or char literal, and compiles the
/// remainder of the line at the first unescaped, non-literal occurrence of
/// `escape`. The rest of the line is dropped once that happens, matching a
/// single-escape-per-line contract.
fn process_line(
    line: &str,
    line_no: u32,
    escape: char,
    table: &SymbolTable,
    config: &Config,
    path: &str,
    out: &mut impl Write,
    had_error: &mut bool,
) -> Result<()> {
    let mut in_string = false;
    let mut in_char = false;

    for (byte_offset, ch) in line.char_indices() {
        if ch == '"' {
            in_string = !in_string;
        } else if ch == '\'' {
            in_char = !in_char;
        }

        if ch == escape && !in_string && !in_char {
            let rest = &line[byte_offset + ch.len_utf8()..];
            let col = (byte_offset + ch.len_utf8()) as u32;
            tracing::debug!(line = line_no, "compiling embedded expression");

            if config.dump_tokens {
                dump_tokens(rest, line_no, col);
            }
            if config.dump_symbols {
                dump_symbols(rest, line_no, col, table);
            }

            let mut lexer = Lexer::new(rest, line_no, col);
            match vexc_par::compile(&mut lexer, table) {
                Ok(rendered) => {
                    out.write_all(rendered.as_bytes())?;
                    if config.parse_only {
                        out.write_all(b"\n")?;
                    }
                }
                Err(source) => {
                    *had_error = true;
                    tracing::error!(line = line_no, "{source}");
                    return Err(DriverError::Compile { path: path.to_string(), line: line_no, source });
                }
            }
            return Ok(());
        }

        if !config.parse_only {
            let mut buf = [0u8; 4];
            out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
        }
    }

    Ok(())
}

/// Debug aid behind `--dump-tokens`: lexes `rest` independently of the real
/// compile pass and logs each token as it comes off the cursor.
fn dump_tokens(rest: &str, line_no: u32, col: u32) {
    let mut lexer = Lexer::new(rest, line_no, col);
    loop {
        match lexer.next_token() {
            Ok(token @ Token::Eol { .. }) => {
                tracing::debug!(line = line_no, ?token, "token");
                break;
            }
            Ok(token) => tracing::debug!(line = line_no, ?token, "token"),
            Err(err) => {
                tracing::debug!(line = line_no, %err, "token lex error");
                break;
            }
        }
    }
}

/// Debug aid behind `--dump-symbols`: parses `rest` independently of the
/// real compile pass and logs the resolved symbol tree.
fn dump_symbols(rest: &str, line_no: u32, col: u32, table: &SymbolTable) {
    let mut lexer = Lexer::new(rest, line_no, col);
    let mut eol = None;
    let mut root = Symbol::root();
    match vexc_par::parse_sym(&mut root, &mut lexer, table, &mut eol) {
        Ok(()) => tracing::debug!(line = line_no, symbols = ?root, "parsed"),
        Err(err) => tracing::debug!(line = line_no, %err, "symbol parse error"),
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let config = resolve_config(cli)?;
    let table = load_table(&config)?;

    let file = File::open(&cli.path)?;
    let reader = BufReader::new(file);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let path = cli.path.display().to_string();

    let mut had_error = false;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = (idx + 1) as u32;
        match process_line(&line, line_no, config.escape, &table, &config, &path, &mut out, &mut had_error) {
            Ok(()) => {}
            Err(DriverError::Compile { .. }) => {
                // Already logged; keep processing the rest of the file.
            }
            Err(other) => return Err(other),
        }
        if !config.parse_only {
            out.write_all(b"\n")?;
        }
    }

    Ok(!had_error)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if init_logging(cli.verbose, cli.no_color).is_err() {
        eprintln!("failed to initialize logging");
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_from(args: &[&str]) -> Cli {
        let mut full = vec!["vexc"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn defaults_to_main_c() {
        let cli = cli_from(&[]);
        assert_eq!(cli.path, PathBuf::from("main.c"));
    }

    #[test]
    fn accepts_explicit_path() {
        let cli = cli_from(&["other.c"]);
        assert_eq!(cli.path, PathBuf::from("other.c"));
    }

    #[test]
    fn escape_override_flows_into_config() {
        let cli = cli_from(&["--escape", "@"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.escape, '@');
    }

    #[test]
    fn colliding_escape_and_eol_is_rejected() {
        let cli = cli_from(&["--escape", ";", "--eol-default", ";"]);
        assert!(resolve_config(&cli).is_err());
    }

    #[test]
    fn process_line_passes_through_text_without_escape() {
        let table = SymbolTable::builtin_defaults();
        let config = Config::default();
        let mut out = Vec::new();
        let mut had_error = false;
        process_line("int x = 1;", 1, '$', &table, &config, "t.c", &mut out, &mut had_error).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "int x = 1;");
    }

    #[test]
    fn process_line_compiles_after_escape() {
        let table = SymbolTable::builtin_defaults();
        let config = Config::default();
        let mut out = Vec::new();
        let mut had_error = false;
        process_line("float v = $* 2 3", 1, '$', &table, &config, "t.c", &mut out, &mut had_error).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "float v = (2 * 3);");
    }

    #[test]
    fn process_line_ignores_escape_inside_string_literal() {
        let table = SymbolTable::builtin_defaults();
        let config = Config::default();
        let mut out = Vec::new();
        let mut had_error = false;
        process_line(r#"puts("$not code");"#, 1, '$', &table, &config, "t.c", &mut out, &mut had_error).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r#"puts("$not code");"#);
    }
}
