//! The punctuation-driven continuation grammar that chains further
//! top-level expressions onto a parsed-and-translated root.
//!
//! Each top-level parse is seeded as a synthetic Vector node (see
//! [`Symbol::root`]); its own element loop naturally absorbs both "one
//! full expression" (ending with exactly one element) and a bare
//! multi-scalar implicit vector (ending with more than one). What this
//! module adds on top is the separate grammar of *separators between*
//! such top-level parses: a comma or semicolon just re-enters with that
//! character echoed back, a colon is echoed with surrounding spaces, and
//! running out of input with nothing left to chain renders a default
//! statement terminator.

use vexc_lex::Lexer;
use vexc_sym::{Symbol, SymbolKind, SymbolTable};
use vexc_util::{CompileError, CompileErrorKind, CompileResult};

use crate::parser::parse_sym;
use crate::symbolize::symbolize;
use crate::translate::translate;

/// Compiles one full escape-expression, including every chained
/// continuation, into its rendered target-language text.
pub fn compile(lexer: &mut Lexer, table: &SymbolTable) -> CompileResult<String> {
    let mut out = String::new();
    drive(lexer, table, &mut out)?;
    Ok(out)
}

fn drive(lexer: &mut Lexer, table: &SymbolTable, out: &mut String) -> CompileResult<()> {
    let mut eol = None;
    let mut root = Symbol::root();
    parse_sym(&mut root, lexer, table, &mut eol)?;
    let name = translate(&root, out)?;
    let eol = eol.unwrap_or('\0');

    let mark = lexer.mark();
    let mut lookahead_eol = None;
    let next = symbolize(lexer, table, &mut lookahead_eol)?;
    let more_follows = next.kind != SymbolKind::None;
    lexer.rewind_to(mark);

    if more_follows {
        match eol {
            ':' => {
                out.push_str(" : ");
                drive(lexer, table, out)
            }
            '\0' => Err(CompileError::new(root.span, CompileErrorKind::UnexpectedTrailer { name })),
            other => {
                out.push(other);
                out.push(' ');
                drive(lexer, table, out)
            }
        }
    } else {
        match eol {
            '\0' | '\n' => {
                out.push(';');
                Ok(())
            }
            ':' => {
                out.push_str(" :");
                Ok(())
            }
            other => {
                out.push(other);
                Ok(())
            }
        }
    }
}
