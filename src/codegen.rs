//! Building the replacement expression.

use proc_macro2::{Literal, Span, TokenStream};
use quote::quote;
use syn::{
    Expr, ExprBinary, ExprLit, ExprMethodCall, ExprParen, Ident, Lit, LitStr, parse_quote,
    punctuated::Punctuated, token,
};

use crate::constants::{DECIMAL_BASE, FLOAT_BIT_SIZE, NUMERIC_PACKAGE};
use crate::error::RewriteError;
use crate::format::Template;
use crate::types::{BasicType, FloatPrecision, NumericConversion, Segment, StrconvOp, Transformation};

/// A replacement for one call site.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteResult {
    /// Expression equivalent to the original call.
    pub expr: Expr,

    /// Set when `expr` calls into the numeric package.
    pub introduces_numeric_dependency: bool,
}

/// Fold segments into a left-associative `+` chain.
///
/// Literal segments become string literals, placeholder segments become
/// their argument with its transformation applied. A template made of a
/// single placeholder yields the bare transformed argument.
pub fn build_expression(
    template: &Template,
    args: &[Expr],
    transformations: &[Transformation],
) -> Result<RewriteResult, RewriteError> {
    let placeholders = template.placeholder_count();
    if placeholders == 0 {
        return Err(RewriteError::NoPlaceholders);
    }
    if placeholders != args.len() || placeholders != transformations.len() {
        return Err(RewriteError::ArityMismatch {
            placeholders,
            arguments: args.len(),
        });
    }

    let collapse = template.segments().len() == 1;
    let mut values = args.iter().zip(transformations);
    let mut introduces_numeric_dependency = false;
    let mut sum: Option<Expr> = None;

    for segment in template.segments() {
        let leaf = match segment {
            Segment::Literal(text) => string_literal(text),
            Segment::Placeholder(_) => {
                // Arity was checked above, so there is a value for every placeholder.
                let Some((arg, transformation)) = values.next() else {
                    return Err(RewriteError::ArityMismatch {
                        placeholders,
                        arguments: args.len(),
                    });
                };
                introduces_numeric_dependency |= transformation.needs_numeric_library();
                apply_transformation(arg, transformation)
            }
        };
        let leaf = if collapse { leaf } else { operand(leaf) };

        sum = Some(match sum {
            None => leaf,
            Some(left) => concat(left, leaf),
        });
    }

    let expr = sum.ok_or(RewriteError::NoPlaceholders)?;
    Ok(RewriteResult {
        expr,
        introduces_numeric_dependency,
    })
}

/// Applies one transformation to one argument.
pub fn apply_transformation(arg: &Expr, transformation: &Transformation) -> Expr {
    match *transformation {
        Transformation::NoOp => arg.clone(),
        Transformation::RenderViaCapability(capability) => {
            method_call(operand(arg.clone()), capability.method_name())
        }
        Transformation::ConvertTo(basic) => conversion(basic, arg.clone()),
        Transformation::NumericConvert(numeric) => strconv_call(arg.clone(), numeric),
    }
}

fn string_literal(text: &str) -> Expr {
    Expr::Lit(ExprLit {
        attrs: Vec::new(),
        lit: Lit::Str(LitStr::new(text, Span::call_site())),
    })
}

fn concat(left: Expr, right: Expr) -> Expr {
    Expr::Binary(ExprBinary {
        attrs: Vec::new(),
        left: Box::new(left),
        op: syn::BinOp::Add(token::Plus::default()),
        right: Box::new(right),
    })
}

/// Parenthesizes anything that could bind differently once placed next to
/// `.` or `+`.
fn operand(expr: Expr) -> Expr {
    match expr {
        Expr::Lit(_)
        | Expr::Path(_)
        | Expr::Call(_)
        | Expr::MethodCall(_)
        | Expr::Field(_)
        | Expr::Index(_)
        | Expr::Paren(_)
        | Expr::Macro(_) => expr,
        other => Expr::Paren(ExprParen {
            attrs: Vec::new(),
            paren_token: token::Paren::default(),
            expr: Box::new(other),
        }),
    }
}

fn method_call(receiver: Expr, name: &str) -> Expr {
    Expr::MethodCall(ExprMethodCall {
        attrs: Vec::new(),
        receiver: Box::new(receiver),
        dot_token: token::Dot::default(),
        method: Ident::new(name, Span::call_site()),
        turbofish: None,
        paren_token: token::Paren::default(),
        args: Punctuated::new(),
    })
}

/// `T(value)`
fn conversion(basic: BasicType, value: Expr) -> Expr {
    let ty = Ident::new(basic.name(), Span::call_site());
    parse_quote!(#ty(#value))
}

fn strconv_call(value: Expr, numeric: NumericConversion) -> Expr {
    let value = match numeric.cast {
        Some(basic) => conversion(basic, value),
        None => value,
    };
    let package = Ident::new(NUMERIC_PACKAGE, Span::call_site());
    let function = Ident::new(numeric.op.function_name(), Span::call_site());

    match numeric.op {
        StrconvOp::Itoa => parse_quote!(#package.#function(#value)),
        StrconvOp::FormatInt | StrconvOp::FormatUint => {
            let base = Literal::u32_unsuffixed(DECIMAL_BASE);
            parse_quote!(#package.#function(#value, #base))
        }
        StrconvOp::FormatFloat { style, precision } => {
            let style = Literal::character(style.as_char());
            let precision = precision_tokens(precision);
            let bits = Literal::u32_unsuffixed(FLOAT_BIT_SIZE);
            parse_quote!(#package.#function(#value, #style, #precision, #bits))
        }
    }
}

fn precision_tokens(precision: FloatPrecision) -> TokenStream {
    match precision {
        FloatPrecision::Shortest => quote!(-1),
    }
}
