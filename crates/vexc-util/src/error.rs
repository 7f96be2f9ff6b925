//! Diagnostic taxonomy for the embedded-expression compiler.
//!
//! Every variant here is fatal: the compiler reports one diagnostic to
//! stderr and aborts. There is no recovery and no warning level, matching
//! the single-shot nature of a preprocessor invocation.

use thiserror::Error;

use crate::span::Span;

/// A fatal compile error, tagged with the span of the offending token.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct CompileError {
    pub span: Span,
    pub kind: CompileErrorKind,
}

impl CompileError {
    pub fn new(span: Span, kind: CompileErrorKind) -> Self {
        Self { span, kind }
    }
}

/// The distinct ways an escape-expression can fail to compile.
#[derive(Debug, Error)]
pub enum CompileErrorKind {
    /// A byte fell outside every recognized lexer class.
    #[error("bad character {found:?}")]
    LexBadChar { found: char },

    /// An operator character has no built-in Function entry.
    #[error("unknown operator {op:?}")]
    UnknownOperator { op: char },

    /// A vector literal accumulated more than 4 elements.
    #[error("vector literal exceeds 4 elements")]
    VectorOverflow,

    /// A vector element's element-count was still 0 after parsing.
    #[error("vector element {index} has unknown element-count")]
    VectorElementArityUnknown { index: usize },

    /// A function parameter and its argument disagree on element-count.
    #[error(
        "argument {param_index} of {function} has element-count {arg_n}, \
         expected {param_n}"
    )]
    ArityMismatch {
        function: String,
        param_index: usize,
        param_n: u8,
        arg_n: u8,
    },

    /// A polymorphic function or constant has no evidence pinning its arity.
    #[error("element-count of {name} could not be inferred")]
    InferenceFailure { name: String },

    /// Text followed an expression without a recognized separator.
    #[error("{name:?} is not a recognized function")]
    UnexpectedTrailer { name: String },

    /// A real literal had more than one decimal point, or failed to parse.
    #[error("malformed real literal {text:?}")]
    LiteralMalformed { text: String },
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offending_spelling() {
        let err = CompileError::new(
            Span::DUMMY,
            CompileErrorKind::UnknownOperator { op: '~' },
        );
        assert_eq!(err.to_string(), "unknown operator '~'");
    }

    #[test]
    fn arity_mismatch_names_function_and_index() {
        let err = CompileErrorKind::ArityMismatch {
            function: "dot".to_string(),
            param_index: 1,
            param_n: 3,
            arg_n: 2,
        };
        assert!(err.to_string().contains("dot"));
        assert!(err.to_string().contains('1'));
    }
}
