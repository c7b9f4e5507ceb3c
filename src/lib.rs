//! Rewrites `fmt.Sprintf` calls into plain string concatenation.
//!
//! A call such as `fmt.Sprintf("High %d!", n)` formats its arguments at
//! runtime through reflection. When every placeholder can be rendered by a
//! cheap, statically known conversion, the call can be replaced by
//! `"High " + strconv.Itoa(n) + "!"` with identical output.
//!
//! # Architecture
//!
//! A call site goes through four stages:
//! 1. **Tokenization**: the template is split into literal and placeholder
//!    segments (`format`)
//! 2. **Resolution**: each placeholder is matched with its argument's static
//!    type and a conversion is chosen (`resolver`, `capability`)
//! 3. **Code Generation**: segments are folded into one `+` expression
//!    (`codegen`)
//! 4. **Bookkeeping**: successful rewrites are tallied per translation unit to
//!    decide which imports to add or drop (`ledger`, `unit`)
//!
//! The implementation is organized into focused modules:
//! - `constants`: Resource limits and facility names
//! - `types`: Core type definitions
//! - `typeinfo`: Type descriptors and the [`TypeLookup`] seam
//! - `parsing`: Call site recognition
//! - `format`: Template tokenization
//! - `codegen`: Expression building
//!
//! # Safety of Rewrites
//!
//! A rewrite that changes program output is worse than no rewrite, so every
//! stage bails out on anything it does not fully understand:
//!
//! - Only `%s`, `%d` and `%f` are recognized. `%%`, `%[1]d`, width, precision
//!   and flags all leave the call alone
//! - The number of placeholders must equal the number of arguments
//! - Every argument needs a known static type with a supported conversion
//! - `%s` follows fmt's own priority: `Error()` first, then `String()`, then
//!   the raw string value
//!
//! No partial rewrite is ever produced. A skipped call is indistinguishable
//! from one that was never looked at.
//!
//! # Known Limitations
//!
//! - **Literal templates only**: the template must be a string literal.
//! - **Package name**: the formatting package is matched by the identifier
//!   `fmt`. Renamed imports are not followed.

#![forbid(unsafe_code)]
#![allow(clippy::needless_return)]
#![doc = include_str!("../README.md")]

// ============================================================================
// Module Organization
// ============================================================================

mod capability;
mod codegen;
mod constants;
mod error;
mod format;
mod ledger;
mod parsing;
mod resolver;
mod typeinfo;
mod types;
mod unit;

// ============================================================================
// Re-exports for Public API
// ============================================================================

pub use capability::{CATALOG, CapabilityCatalog, has_capability};
pub use codegen::{RewriteResult, apply_transformation, build_expression};
pub use constants::{
    FORMAT_FUNCTION, FORMAT_PACKAGE, MAX_SEGMENTS, MAX_TEMPLATE_LEN, NUMERIC_PACKAGE,
};
pub use error::{RewriteError, TemplateError};
pub use format::{Template, tokenize_template};
pub use ledger::{ImportDelta, Ledger};
pub use parsing::{CallSite, references_format_package};
pub use resolver::{resolve, resolve_arguments};
pub use typeinfo::{MethodSignature, TypeDescriptor, TypeLookup, TypeTable};
pub use types::{
    BasicType, Capability, FloatPrecision, FloatStyle, NumericConversion, Placeholder, Segment,
    StrconvOp, Transformation, VerbKind,
};
pub use unit::{TranslationUnit, UnitOutcome, UnitRewriter, rewrite_unit};

use syn::Expr;

// ============================================================================
// Entry Points
// ============================================================================

/// Rewrites one recognized call site.
///
/// Checks, in order: the template parses, it has at least one placeholder,
/// placeholder and argument counts match, and every argument resolves. Types
/// are only looked up once the counts are known to match.
///
/// # Examples
///
/// ```
/// use syn::{Expr, parse_quote};
/// use unsprintf::{CallSite, TypeTable, rewrite_call};
///
/// let call = CallSite::from_expr(&parse_quote!(fmt.Sprintf("High %d!", 5))).unwrap();
/// let result = rewrite_call(&call, &TypeTable::new()).unwrap();
///
/// let expected: Expr = parse_quote!("High " + strconv.Itoa(5) + "!");
/// assert_eq!(result.expr, expected);
/// assert!(result.introduces_numeric_dependency);
/// ```
pub fn rewrite_call<T: TypeLookup + ?Sized>(
    call: &CallSite,
    types: &T,
) -> Result<RewriteResult, RewriteError> {
    let template = tokenize_template(&call.template_text())?;

    let placeholders = template.placeholder_count();
    if placeholders == 0 {
        return Err(RewriteError::NoPlaceholders);
    }
    if placeholders != call.args.len() {
        return Err(RewriteError::ArityMismatch {
            placeholders,
            arguments: call.args.len(),
        });
    }

    let transformations = resolve_arguments(&template, &call.args, types)?;
    build_expression(&template, &call.args, &transformations)
}

/// Recognizes and rewrites a `fmt.Sprintf` call expression.
///
/// Returns `None` for anything that is not rewritable, including expressions
/// that are not `fmt.Sprintf` calls at all.
pub fn rewrite_expr<T: TypeLookup + ?Sized>(expr: &Expr, types: &T) -> Option<RewriteResult> {
    match CallSite::from_expr(expr).and_then(|call| rewrite_call(&call, types)) {
        Ok(result) => Some(result),
        Err(RewriteError::NotACandidate) => None,
        Err(err) => {
            log::debug!("not rewriting call: {err}");
            None
        }
    }
}
