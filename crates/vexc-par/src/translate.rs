//! Rendering a resolved, arity-complete symbol tree into target-language text.

use vexc_sym::{Symbol, SymbolKind};
use vexc_util::{CompileError, CompileErrorKind, CompileResult};

/// Appends `node`'s rendering onto `out` and returns a short name for it,
/// used by the continuation driver to name the culprit in an
/// [`CompileErrorKind::UnexpectedTrailer`] diagnostic.
pub fn translate(node: &Symbol, out: &mut String) -> CompileResult<String> {
    match node.kind {
        SymbolKind::Function => translate_function(node, out),
        SymbolKind::Constant => translate_constant(node, out),
        SymbolKind::Macro => {
            out.push_str(&node.out);
            Ok(node.key.clone())
        }
        SymbolKind::Variable => {
            out.push_str(&node.out);
            Ok(node.key.clone())
        }
        SymbolKind::Literal => {
            out.push_str(&node.real);
            Ok(node.real.clone())
        }
        SymbolKind::Vector => translate_vector(node, out),
        SymbolKind::None | SymbolKind::VectorTail => Ok(String::new()),
    }
}

fn stem_for(node: &Symbol, arity: u8) -> CompileResult<String> {
    if !node.poly {
        return Ok(node.out.clone());
    }
    node.out_for(arity)
        .map(str::to_string)
        .ok_or_else(|| CompileError::new(node.span, CompileErrorKind::InferenceFailure { name: node.key.clone() }))
}

fn translate_function(node: &Symbol, out: &mut String) -> CompileResult<String> {
    let stem = stem_for(node, node.n_int)?;

    let mut rendered = Vec::with_capacity(node.args.len());
    for arg in &node.args {
        let mut buf = String::new();
        translate(arg, &mut buf)?;
        rendered.push(buf);
    }

    if node.builtin && node.n_int == 1 && node.n_param == 2 {
        out.push('(');
        out.push_str(&rendered[0]);
        out.push(' ');
        out.push_str(&stem);
        out.push(' ');
        out.push_str(&rendered[1]);
        out.push(')');
    } else if node.builtin && node.n_int == 1 && node.n_param == 1 {
        out.push('(');
        out.push_str(&stem);
        out.push_str(&rendered[0]);
        out.push(')');
    } else {
        out.push_str(&stem);
        out.push('(');
        out.push_str(&rendered.join(", "));
        out.push(')');
    }

    Ok(node.key.clone())
}

fn translate_constant(node: &Symbol, out: &mut String) -> CompileResult<String> {
    let text = stem_for(node, node.n)?;
    out.push_str(&text);
    Ok(node.key.clone())
}

/// Vector-literal prefixes as rendered by the host the table descriptors
/// target: `n=2` keeps the historical `ff` spelling, `n=3`/`n=4` spell out
/// their width.
fn vector_prefix(n: u8) -> CompileResult<&'static str> {
    match n {
        2 => Ok("(ff) { "),
        3 => Ok("(v3) { "),
        4 => Ok("(v4) { "),
        _ => Err(CompileError::new(vexc_util::Span::DUMMY, CompileErrorKind::VectorOverflow)),
    }
}

fn translate_vector(node: &Symbol, out: &mut String) -> CompileResult<String> {
    if node.elem.len() == 1 {
        return translate(&node.elem[0], out);
    }

    let prefix = vector_prefix(node.n)?;
    let mut rendered = Vec::with_capacity(node.elem.len());
    for child in &node.elem {
        let mut buf = String::new();
        translate(child, &mut buf)?;
        rendered.push(buf);
    }

    let text = format!("{prefix}{} }}", rendered.join(", "));
    out.push_str(&text);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_sym;
    use vexc_lex::Lexer;
    use vexc_sym::SymbolTable;

    fn compile(src: &str) -> String {
        let table = SymbolTable::builtin_defaults();
        let mut lexer = Lexer::new(src, 1, 0);
        let mut eol = None;
        let mut root = Symbol::root();
        parse_sym(&mut root, &mut lexer, &table, &mut eol).unwrap();
        let mut out = String::new();
        translate(&root, &mut out).unwrap();
        out
    }

    #[test]
    fn scalar_builtin_binary_op_renders_infix() {
        assert_eq!(compile("* 2 3"), "(2 * 3)");
    }

    #[test]
    fn scalar_builtin_unary_op_renders_prefix() {
        assert_eq!(compile("~ 5"), "(-5)");
    }

    #[test]
    fn vector_width_builtin_renders_as_stem_call() {
        assert_eq!(
            compile("+ [1 2 3] [4 5 6]"),
            "add3((v3) { 1, 2, 3 }, (v3) { 4, 5, 6 })"
        );
    }

    #[test]
    fn two_wide_vector_literal_uses_ff_prefix() {
        assert_eq!(compile("[1 2]"), "(ff) { 1, 2 }");
    }

    #[test]
    fn non_builtin_function_call_renders_stem_and_parens() {
        assert_eq!(
            compile("dot up'3 + [1 2 3] [4 5 6]"),
            "dot(up3, add3((v3) { 1, 2, 3 }, (v3) { 4, 5, 6 }))"
        );
    }

    #[test]
    fn single_child_vector_drops_its_braces() {
        assert_eq!(compile("dot up'3 up'3"), "dot(up3, up3)");
    }
}
