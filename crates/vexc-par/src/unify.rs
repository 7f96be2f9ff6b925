//! Bidirectional element-count unification between a function's parameter
//! slots and its argument nodes.

use vexc_sym::Symbol;
use vexc_util::{CompileError, CompileErrorKind, CompileResult};

/// Reconciles the element-count of argument `i` against `func`'s parameter
/// slot `i`, applying the four rules in order:
///
/// 1. A slot still generic inherits the function's already-pinned internal
///    arity (a later argument of an already-resolved polymorphic call).
/// 2. A now-fixed slot checked against a resolved argument must agree.
/// 3. A now-fixed slot narrows an unresolved argument to match.
/// 4. A still-generic slot widens the function's internal arity (and its
///    declared return arity, if that was itself unset) from a resolved
///    argument — the first evidence any generic call gets.
///
/// Leaves both sides at `0` when neither has evidence yet; the caller
/// back-fills those once the whole argument list has been walked.
pub fn unify(func: &mut Symbol, i: usize, arg: &mut Symbol) -> CompileResult<()> {
    if func.params[i] == 0 && func.n_int != 0 {
        func.params[i] = func.n_int;
    }

    if func.params[i] != 0 && arg.n != 0 {
        if func.params[i] != arg.n {
            return Err(CompileError::new(
                arg.span,
                CompileErrorKind::ArityMismatch {
                    function: func.key.clone(),
                    param_index: i,
                    param_n: func.params[i],
                    arg_n: arg.n,
                },
            ));
        }
    } else if func.params[i] != 0 && arg.n == 0 {
        arg.n = func.params[i];
    } else if func.params[i] == 0 && arg.n != 0 {
        func.params[i] = arg.n;
        func.n_int = arg.n;
        if func.n == 0 {
            func.n = func.n_int;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexc_sym::SymbolKind;
    use vexc_util::Span;

    fn func_sym(params: &[u8]) -> Symbol {
        Symbol {
            kind: SymbolKind::Function,
            key: "dot".into(),
            n_param: params.len() as u8,
            params: params.to_vec(),
            ..Default::default()
        }
    }

    fn arg_sym(n: u8) -> Symbol {
        Symbol { n, span: Span::DUMMY, ..Default::default() }
    }

    #[test]
    fn fixed_slot_narrows_unresolved_argument() {
        let mut func = func_sym(&[3]);
        let mut arg = arg_sym(0);
        unify(&mut func, 0, &mut arg).unwrap();
        assert_eq!(arg.n, 3);
    }

    #[test]
    fn fixed_slot_rejects_mismatched_argument() {
        let mut func = func_sym(&[3]);
        let mut arg = arg_sym(2);
        let err = unify(&mut func, 0, &mut arg).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::ArityMismatch { .. }));
    }

    #[test]
    fn generic_slot_widens_function_from_resolved_argument() {
        let mut func = func_sym(&[0, 0]);
        let mut arg = arg_sym(3);
        unify(&mut func, 0, &mut arg).unwrap();
        assert_eq!(func.n_int, 3);
        assert_eq!(func.params[0], 3);
        assert_eq!(func.n, 3);
    }

    #[test]
    fn widening_does_not_override_an_already_declared_return_arity() {
        let mut func = func_sym(&[0, 0]);
        func.n = 1;
        let mut arg = arg_sym(3);
        unify(&mut func, 0, &mut arg).unwrap();
        assert_eq!(func.n_int, 3);
        assert_eq!(func.n, 1);
    }

    #[test]
    fn generic_slot_inherits_from_already_pinned_function() {
        let mut func = func_sym(&[0, 0]);
        func.n_int = 3;
        let mut arg = arg_sym(0);
        unify(&mut func, 1, &mut arg).unwrap();
        assert_eq!(func.params[1], 3);
        assert_eq!(arg.n, 3);
    }

    #[test]
    fn generic_slot_rejects_conflicting_argument_against_pinned_function() {
        let mut func = func_sym(&[0, 0]);
        func.n_int = 3;
        let mut arg = arg_sym(2);
        let err = unify(&mut func, 1, &mut arg).unwrap_err();
        assert!(matches!(err.kind, CompileErrorKind::ArityMismatch { .. }));
    }

    #[test]
    fn both_unresolved_leaves_inference_for_backfill() {
        let mut func = func_sym(&[0, 0]);
        let mut arg = arg_sym(0);
        unify(&mut func, 0, &mut arg).unwrap();
        assert_eq!(func.n_int, 0);
        assert_eq!(arg.n, 0);
    }
}
