//! Resolving a lexed token into a fresh parse-tree node.

use vexc_lex::{Lexer, Token};
use vexc_sym::{Symbol, SymbolTable};
use vexc_util::{CompileError, CompileErrorKind, CompileResult};

/// Pulls one token from `lexer` and resolves it against `table`.
///
/// The first end-of-expression token seen during a top-level parse
/// records its terminator in `*eol`; later ones within the same
/// expression leave it untouched, per the one terminator-per-expression
/// rule the continuation driver relies on.
pub fn symbolize(
    lexer: &mut Lexer,
    table: &SymbolTable,
    eol: &mut Option<char>,
) -> CompileResult<Symbol> {
    let token = lexer.next_token()?;
    match token {
        Token::Op { ch, arity, span } => {
            let found = table
                .find_op(ch)
                .ok_or_else(|| CompileError::new(span, CompileErrorKind::UnknownOperator { op: ch }))?;
            Ok(with_arity_override(found.clone(), arity, span))
        }
        Token::Ident { text, arity, span } => match table.find_iden(&text) {
            Some(found) => Ok(with_arity_override(found.clone(), arity, span)),
            None => Ok(Symbol::variable(&text, arity, span)),
        },
        Token::Real { text, span } => Ok(Symbol::literal(&text, span)),
        Token::VecOpen { span } => Ok(Symbol::vector_open(span)),
        Token::VecClose { span } => Ok(Symbol::vector_tail(span)),
        Token::Eol { terminator, span } => {
            if eol.is_none() {
                *eol = Some(terminator);
            }
            Ok(Symbol::none(span))
        }
    }
}

/// A resolved node is a copy of its table row, with a token-carried arity
/// suffix adopted as both `n` and `n_int` when the row itself declared
/// none. This is what makes `axis'3` a per-use type declaration rather
/// than a property of the symbol `axis` everywhere it appears.
fn with_arity_override(mut sym: Symbol, arity: u8, span: vexc_util::Span) -> Symbol {
    sym.span = span;
    if sym.n == 0 && arity != 0 {
        sym.n = arity;
        sym.n_int = arity;
    }
    sym
}
