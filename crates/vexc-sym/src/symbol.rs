//! The unified symbol-table-row / parse-tree-node record.
//!
//! The source this crate's table format is modeled on overlays every
//! shape behind one discriminant; here that's a Rust sum type in
//! spirit only — `Symbol` stays a single struct with a `kind` tag,
//! because a node is produced by *copying* a table row and then
//! mutating fields that don't apply to every kind (`args`, `elem`,
//! `n_int`). Splitting it into a true per-kind enum would mean
//! reconstructing the whole node every time parsing narrows its type,
//! which is exactly the cloning step the design already calls for at
//! resolution time.

use serde::{Deserialize, Serialize};

use vexc_util::Span;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    #[default]
    None,
    Function,
    Constant,
    Macro,
    Variable,
    Literal,
    Vector,
    VectorTail,
}

/// Four rendering templates indexed by element-count 1..=4.
pub type PolyTemplates = [String; 4];

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: SymbolKind,

    /// `true` when keyed by an operator character rather than an identifier.
    #[serde(default)]
    pub builtin: bool,

    /// The operator character (as a one-char string) or identifier spelling
    /// this symbol was resolved from. Empty for Literal and Vector nodes.
    #[serde(default)]
    pub key: String,

    /// Inferred or declared element-count of the value this node produces.
    /// `0` means unknown / to be inferred.
    #[serde(default)]
    pub n: u8,

    /// `true` when the symbol has per-arity rendering templates.
    #[serde(default)]
    pub poly: bool,

    /// Single rendering template, for non-polymorphic Function/Constant/Macro/Variable.
    #[serde(default)]
    pub out: String,

    /// Per-arity rendering templates for polymorphic symbols, index 0 = n=1.
    #[serde(default)]
    pub out_n: PolyTemplates,

    /// Number of argument slots, for Function.
    #[serde(default)]
    pub n_param: u8,

    /// Declared element-count of each parameter slot (0 = generic).
    #[serde(default)]
    pub params: Vec<u8>,

    /// The function's internal element-count, unified across generic
    /// params and return.
    #[serde(default)]
    pub n_int: u8,

    /// Child nodes for each argument. Empty on table rows; filled in by
    /// the parser.
    #[serde(skip)]
    pub args: Vec<Symbol>,

    /// Child nodes for each vector element. Empty on table rows; filled
    /// in by the parser.
    #[serde(skip)]
    pub elem: Vec<Symbol>,

    /// The literal's source text, verbatim, for Literal nodes.
    #[serde(default)]
    pub real: String,

    #[serde(skip)]
    pub span: Span,
}

impl Symbol {
    pub fn out_for(&self, n: u8) -> Option<&str> {
        if n == 0 {
            return None;
        }
        self.out_n.get((n - 1) as usize).map(String::as_str)
    }

    /// A synthesized node for an identifier with no table entry.
    pub fn variable(spelling: &str, arity_hint: u8, span: Span) -> Self {
        Self {
            kind: SymbolKind::Variable,
            key: spelling.to_string(),
            out: spelling.to_string(),
            n: arity_hint,
            span,
            ..Default::default()
        }
    }

    /// A Literal node from a lexed real-literal token.
    pub fn literal(text: &str, span: Span) -> Self {
        Self { kind: SymbolKind::Literal, real: text.to_string(), n: 1, span, ..Default::default() }
    }

    /// The synthetic root node the parser seeds every top-level parse with.
    pub fn root() -> Self {
        Self { kind: SymbolKind::Vector, ..Default::default() }
    }

    /// The empty Vector node a `[` token resolves to; elements are filled
    /// in by the parser.
    pub fn vector_open(span: Span) -> Self {
        Self { kind: SymbolKind::Vector, span, ..Default::default() }
    }

    pub fn vector_tail(span: Span) -> Self {
        Self { kind: SymbolKind::VectorTail, span, ..Default::default() }
    }

    pub fn none(span: Span) -> Self {
        Self { kind: SymbolKind::None, span, ..Default::default() }
    }
}
