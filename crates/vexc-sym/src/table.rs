//! Loading and lookup for the symbol table.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::symbol::{Symbol, SymbolKind};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("reading symbol table {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },
    #[error("parsing symbol table {path}: {source}")]
    Parse { path: String, #[source] source: toml::de::Error },
}

/// On-disk shape of a symbol table file: a flat list of rows, partitioned
/// at load time into the two key spaces the resolver looks up against.
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default)]
    symbols: Vec<Symbol>,
}

/// A loaded, read-only symbol table.
///
/// Entries are few enough that linear scan is the right lookup strategy —
/// the same call this pack's compilers make for their own small,
/// load-once tables.
#[derive(Debug, Default)]
pub struct SymbolTable {
    operators: Vec<Symbol>,
    identifiers: Vec<Symbol>,
}

impl SymbolTable {
    pub fn from_rows(rows: Vec<Symbol>) -> Self {
        let mut operators = Vec::new();
        let mut identifiers = Vec::new();
        for row in rows {
            if row.builtin {
                operators.push(row);
            } else {
                identifiers.push(row);
            }
        }
        Self { operators, identifiers }
    }

    pub fn load(path: &Path) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| TableError::Read { path: path.display().to_string(), source })?;
        let file: TableFile = toml::from_str(&text)
            .map_err(|source| TableError::Parse { path: path.display().to_string(), source })?;
        Ok(Self::from_rows(file.symbols))
    }

    /// Looks up a built-in Function entry by its operator character.
    pub fn find_op(&self, ch: char) -> Option<&Symbol> {
        self.operators.iter().find(|sym| {
            matches!(sym.kind, SymbolKind::Function) && sym.key.chars().next() == Some(ch)
        })
    }

    /// Looks up a non-built-in Function, Constant, or Macro entry by exact
    /// spelling match.
    pub fn find_iden(&self, name: &str) -> Option<&Symbol> {
        self.identifiers.iter().find(|sym| {
            matches!(sym.kind, SymbolKind::Function | SymbolKind::Constant | SymbolKind::Macro)
                && sym.key == name
        })
    }

    /// A small built-in table covering the arithmetic operators and
    /// vector-math helpers used throughout the worked examples, so the
    /// driver has something to compile against before a user supplies
    /// their own table.
    pub fn builtin_defaults() -> Self {
        Self::from_rows(default_rows())
    }
}

fn binary_op(ch: char, out_n: [&str; 4]) -> Symbol {
    Symbol {
        kind: SymbolKind::Function,
        builtin: true,
        key: ch.to_string(),
        poly: true,
        out_n: out_n.map(str::to_string),
        n_param: 2,
        params: vec![0, 0],
        ..Default::default()
    }
}

fn unary_op(ch: char, out_n: [&str; 4]) -> Symbol {
    Symbol {
        kind: SymbolKind::Function,
        builtin: true,
        key: ch.to_string(),
        poly: true,
        out_n: out_n.map(str::to_string),
        n_param: 1,
        params: vec![0],
        ..Default::default()
    }
}

fn func(name: &str, params: &[u8], out: &str, n: u8) -> Symbol {
    Symbol {
        kind: SymbolKind::Function,
        key: name.to_string(),
        poly: false,
        out: out.to_string(),
        n_param: params.len() as u8,
        params: params.to_vec(),
        n,
        ..Default::default()
    }
}

fn poly_func(name: &str, params: &[u8], out_n: [&str; 4]) -> Symbol {
    Symbol {
        kind: SymbolKind::Function,
        key: name.to_string(),
        poly: true,
        out_n: out_n.map(str::to_string),
        n_param: params.len() as u8,
        params: params.to_vec(),
        ..Default::default()
    }
}

fn default_rows() -> Vec<Symbol> {
    vec![
        binary_op('+', ["+", "add2", "add3", "add4"]),
        binary_op('-', ["-", "sub2", "sub3", "sub4"]),
        binary_op('*', ["*", "mul2", "mul3", "mul4"]),
        binary_op('/', ["/", "div2", "div3", "div4"]),
        // `find_op` matches the first row for a given character, so unary
        // negation is bound to a distinct operator spelling rather than
        // overloading '-' a second time, which would make the unary row
        // unreachable.
        unary_op('~', ["-", "neg2", "neg3", "neg4"]),
        // dot, norm and len take generic-arity vector arguments but always
        // produce a scalar; `n` is declared up front so unification's
        // default "return arity follows internal arity" rule doesn't
        // clobber it once the argument pins n_int.
        func("dot", &[0, 0], "dot", 1),
        func("cross", &[3, 3], "cross", 3),
        func("sin", &[1], "sin", 1),
        func("cos", &[1], "cos", 1),
        func("norm", &[0], "norm", 1),
        func("len", &[0], "len", 1),
        func("app", &[4, 3], "quat_apply", 3),
        poly_func("mix", &[0, 0, 1], ["mix", "mix2", "mix3", "mix4"]),
        Symbol {
            kind: SymbolKind::Constant,
            key: "up".into(),
            poly: true,
            out_n: ["1.0", "up2", "up3", "up4"].map(str::to_string),
            ..Default::default()
        },
        Symbol {
            kind: SymbolKind::Constant,
            key: "zero".into(),
            poly: true,
            out_n: ["0.0", "zero2", "zero3", "zero4"].map(str::to_string),
            ..Default::default()
        },
        Symbol {
            kind: SymbolKind::Macro,
            key: "config.speed".into(),
            out: "CONFIG_SPEED".into(),
            n: 1,
            ..Default::default()
        },
        Symbol {
            kind: SymbolKind::Macro,
            key: "config.damp".into(),
            out: "CONFIG_DAMP".into(),
            n: 1,
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_builtin_operator_by_char() {
        let table = SymbolTable::builtin_defaults();
        let plus = table.find_op('+').expect("plus exists");
        assert!(plus.builtin);
        assert_eq!(plus.n_param, 2);
    }

    #[test]
    fn finds_identifier_function_by_exact_spelling() {
        let table = SymbolTable::builtin_defaults();
        assert!(table.find_iden("dot").is_some());
        assert!(table.find_iden("do").is_none());
        assert!(table.find_iden("dots").is_none());
    }

    #[test]
    fn missing_operator_is_none() {
        let table = SymbolTable::builtin_defaults();
        assert!(table.find_op('^').is_none());
    }

    #[test]
    fn load_from_toml_partitions_by_builtin_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.toml");
        std::fs::write(
            &path,
            r#"
            [[symbols]]
            kind = "function"
            builtin = true
            key = "+"
            poly = true
            out_n = ["+", "add2", "add3", "add4"]
            n_param = 2
            params = [0, 0]

            [[symbols]]
            kind = "function"
            key = "dot"
            out = "dot"
            n_param = 2
            params = [0, 0]
            "#,
        )
        .unwrap();

        let table = SymbolTable::load(&path).unwrap();
        assert!(table.find_op('+').is_some());
        assert!(table.find_iden("dot").is_some());
    }
}
