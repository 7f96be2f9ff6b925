//! Recursive-descent arity inference over a resolved symbol tree.

use vexc_lex::Lexer;
use vexc_sym::{Symbol, SymbolKind, SymbolTable};
use vexc_util::{CompileError, CompileErrorKind, CompileResult};

use crate::symbolize::symbolize;
use crate::unify::unify;

/// Fills in `node`'s argument or element slots, recursing into each one
/// and unifying arities as it goes.
///
/// Constants, Macros, Variables and Literals are already fully resolved by
/// [`symbolize`] and need no further work here.
pub fn parse_sym(
    node: &mut Symbol,
    lexer: &mut Lexer,
    table: &SymbolTable,
    eol: &mut Option<char>,
) -> CompileResult<()> {
    match node.kind {
        SymbolKind::Function => parse_function(node, lexer, table, eol),
        SymbolKind::Vector => parse_vector(node, lexer, table, eol),
        _ => Ok(()),
    }
}

fn parse_function(
    node: &mut Symbol,
    lexer: &mut Lexer,
    table: &SymbolTable,
    eol: &mut Option<char>,
) -> CompileResult<()> {
    let n_param = node.n_param as usize;
    node.args = Vec::with_capacity(n_param);

    for i in 0..n_param {
        let mut arg = symbolize(lexer, table, eol)?;
        parse_sym(&mut arg, lexer, table, eol)?;
        unify(node, i, &mut arg)?;
        node.args.push(arg);
    }

    if node.n_int == 0 && node.params.iter().any(|&p| p == 0) {
        return Err(CompileError::new(
            node.span,
            CompileErrorKind::InferenceFailure { name: node.key.clone() },
        ));
    }

    if node.n_int != 0 {
        for (i, arg) in node.args.iter_mut().enumerate() {
            if node.params[i] == 0 {
                node.params[i] = node.n_int;
            }
            if arg.n == 0 {
                arg.n = node.n_int;
            }
        }
    }

    Ok(())
}

fn parse_vector(
    node: &mut Symbol,
    lexer: &mut Lexer,
    table: &SymbolTable,
    eol: &mut Option<char>,
) -> CompileResult<()> {
    let mut total: u16 = 0;

    loop {
        let mut child = symbolize(lexer, table, eol)?;
        if matches!(child.kind, SymbolKind::None | SymbolKind::VectorTail) {
            break;
        }

        parse_sym(&mut child, lexer, table, eol)?;

        if child.n == 0 {
            return Err(CompileError::new(
                child.span,
                CompileErrorKind::VectorElementArityUnknown { index: node.elem.len() },
            ));
        }

        total += child.n as u16;
        if total > 4 {
            return Err(CompileError::new(child.span, CompileErrorKind::VectorOverflow));
        }

        node.elem.push(child);
    }

    node.n = total as u8;
    Ok(())
}
