//! Error handling for the vexc-drv CLI.
//!
//! A structured error type using `thiserror`, matching the convention used
//! throughout the compiler crates this driver sits on top of.

use thiserror::Error;

use vexc_sym::TableError;
use vexc_util::CompileError;

/// Top-level error for the vexc-drv binary.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The symbol table could not be loaded.
    #[error("symbol table error: {0}")]
    Table(#[from] TableError),

    /// An escape-expression failed to compile.
    #[error("{path}:{line}: {source}")]
    Compile { path: String, line: u32, #[source] source: CompileError },

    /// A filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DriverError>;
