//! Rewriting every call site of one translation unit.
//!
//! The walker counts each reference to the formatting package, rewrites the
//! ones it can, and leaves the rest exactly as they were. The per-unit
//! [`Ledger`] is owned by the walker, so updates are serialized by
//! construction.

use log::{debug, trace};
use quote::ToTokens;
use syn::{
    Expr,
    visit_mut::{self, VisitMut},
};

use crate::error::RewriteError;
use crate::ledger::{ImportDelta, Ledger};
use crate::parsing::{CallSite, references_format_package};
use crate::rewrite_call;
use crate::typeinfo::TypeLookup;

/// Summary of one unit after all its call sites were processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitOutcome {
    pub rewritten: usize,
    pub skipped: usize,
    pub imports: ImportDelta,
}

/// A source file reduced to what the rewriter touches.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationUnit {
    pub imports: Vec<String>,
    pub body: Vec<Expr>,
}

/// Walks the expressions of one unit, replacing rewritable calls in place.
pub struct UnitRewriter<'a, T: ?Sized> {
    types: &'a T,
    ledger: Ledger,
    rewritten: usize,
    skipped: usize,
}

impl<'a, T: TypeLookup + ?Sized> UnitRewriter<'a, T> {
    pub fn new<S: AsRef<str>>(imports: &[S], types: &'a T) -> Self {
        Self {
            types,
            ledger: Ledger::new(imports),
            rewritten: 0,
            skipped: 0,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn finish(self) -> UnitOutcome {
        let outcome = UnitOutcome {
            rewritten: self.rewritten,
            skipped: self.skipped,
            imports: self.ledger.finalize(),
        };
        debug!(
            "unit done: {} rewritten, {} skipped, {} fmt use(s) left, {:?}",
            outcome.rewritten,
            outcome.skipped,
            self.ledger.remaining_uses(),
            outcome.imports
        );
        outcome
    }
}

impl<T: TypeLookup + ?Sized> VisitMut for UnitRewriter<'_, T> {
    fn visit_expr_mut(&mut self, expr: &mut Expr) {
        if references_format_package(expr) {
            self.ledger.on_formatting_call_seen();

            match CallSite::from_expr(expr).and_then(|call| rewrite_call(&call, self.types)) {
                Ok(result) => {
                    trace!(
                        "rewrote {} into {}",
                        expr.to_token_stream(),
                        result.expr.to_token_stream()
                    );
                    self.ledger
                        .on_rewrite_succeeded(result.introduces_numeric_dependency);
                    self.rewritten += 1;
                    *expr = result.expr;
                    // The replacement may itself be a nested call, e.g. `%s` of a
                    // Sprintf result collapses to the inner call.
                    return self.visit_expr_mut(expr);
                }
                Err(RewriteError::NotACandidate) => {}
                Err(err) => {
                    debug!("skipping {}: {err}", expr.to_token_stream());
                    self.skipped += 1;
                }
            }
        }

        visit_mut::visit_expr_mut(self, expr);
    }
}

/// Rewrites a whole unit and applies the resulting import edits.
pub fn rewrite_unit<T: TypeLookup + ?Sized>(unit: &mut TranslationUnit, types: &T) -> UnitOutcome {
    let mut rewriter = UnitRewriter::new(&unit.imports, types);
    for expr in &mut unit.body {
        rewriter.visit_expr_mut(expr);
    }
    let outcome = rewriter.finish();
    outcome.imports.apply(&mut unit.imports);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typeinfo::{TypeDescriptor, TypeTable};
    use crate::types::BasicType;
    use syn::parse_quote;

    fn unit(imports: &[&str], body: Vec<Expr>) -> TranslationUnit {
        TranslationUnit {
            imports: imports.iter().map(|s| s.to_string()).collect(),
            body,
        }
    }

    #[test]
    fn test_all_calls_rewritten() {
        let mut types = TypeTable::new();
        types.insert(parse_quote!(i64), TypeDescriptor::basic(BasicType::Int64));

        let mut file = unit(
            &["fmt"],
            vec![
                parse_quote!(fmt.Sprintf("High %d!", i64)),
                parse_quote!(fmt.Sprintf("%s, %s", "a", "b")),
            ],
        );
        let outcome = rewrite_unit(&mut file, &types);

        assert_eq!(outcome.rewritten, 2);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(file.imports, vec!["strconv".to_owned()]);

        let first: Expr = parse_quote!("High " + strconv.FormatInt(i64, 10) + "!");
        let second: Expr = parse_quote!("a" + ", " + "b");
        assert_eq!(file.body, vec![first, second]);
    }

    #[test]
    fn test_other_fmt_use_keeps_import() {
        let types = TypeTable::new();
        let mut file = unit(
            &["fmt"],
            vec![
                parse_quote!(fmt.Sprintf("%s!", "hi")),
                parse_quote!(fmt.Println("done")),
            ],
        );
        let outcome = rewrite_unit(&mut file, &types);

        assert_eq!(outcome.rewritten, 1);
        assert_eq!(outcome.skipped, 0);
        assert!(outcome.imports.is_empty());
        assert_eq!(file.imports, vec!["fmt".to_owned()]);
    }

    #[test]
    fn test_skipped_call_is_untouched() {
        let types = TypeTable::new();
        let original: Expr = parse_quote!(fmt.Sprintf("%v", thing));
        let mut file = unit(&["fmt"], vec![original.clone()]);
        let outcome = rewrite_unit(&mut file, &types);

        assert_eq!(outcome.rewritten, 0);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.imports.is_empty());
        assert_eq!(file.body, vec![original]);
        assert_eq!(file.imports, vec!["fmt".to_owned()]);
    }

    #[test]
    fn test_nested_calls() {
        let mut types = TypeTable::new();
        let inner: Expr = parse_quote!(fmt.Sprintf("%d", n));
        types.insert(parse_quote!(n), TypeDescriptor::basic(BasicType::Int));
        types.insert(inner.clone(), TypeDescriptor::basic(BasicType::String));

        let mut file = unit(&["fmt"], vec![parse_quote!(fmt.Sprintf("%s", #inner))]);
        let outcome = rewrite_unit(&mut file, &types);

        assert_eq!(outcome.rewritten, 2);
        let expected: Expr = parse_quote!(strconv.Itoa(n));
        assert_eq!(file.body, vec![expected]);
        assert_eq!(file.imports, vec!["strconv".to_owned()]);
    }

    #[test]
    fn test_call_inside_larger_expression() {
        let types = TypeTable::new();
        let mut file = unit(
            &["fmt", "strings"],
            vec![parse_quote!(strings.ToUpper(fmt.Sprintf("%s world", "hello")))],
        );
        rewrite_unit(&mut file, &types);

        let expected: Expr = parse_quote!(strings.ToUpper("hello" + " world"));
        assert_eq!(file.body, vec![expected]);
        assert_eq!(file.imports, vec!["strings".to_owned()]);
    }
}
