//! Recognizing rewritable call sites.

use quote::ToTokens;
use syn::{
    Expr, ExprMethodCall, ExprPath, LitStr,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token::Comma,
};

use crate::constants::{FORMAT_FUNCTION, FORMAT_PACKAGE};
use crate::error::RewriteError;

/// A `fmt.Sprintf` call: template literal plus value arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSite {
    pub template: LitStr,
    pub args: Vec<Expr>,
}

/// Argument list of the call: `"template", args...`
impl Parse for CallSite {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let template: LitStr = input.parse()?;
        if !template.suffix().is_empty() {
            return Err(syn::Error::new(
                template.span(),
                "template literal must not have a suffix",
            ));
        }

        let args = if input.is_empty() {
            Punctuated::<Expr, Comma>::new()
        } else {
            input.parse::<Comma>()?;
            Punctuated::parse_terminated(input)?
        };

        Ok(Self {
            template,
            args: args.into_iter().collect(),
        })
    }
}

impl CallSite {
    /// Recognizes `fmt.Sprintf("...", args...)`.
    pub fn from_expr(expr: &Expr) -> Result<Self, RewriteError> {
        let call = format_call(expr, FORMAT_FUNCTION).ok_or(RewriteError::NotACandidate)?;
        let site: CallSite = syn::parse2(call.args.to_token_stream())
            .map_err(|_| RewriteError::NotATemplateLiteral)?;
        if site.args.is_empty() {
            return Err(RewriteError::MissingArguments);
        }
        Ok(site)
    }

    /// The template with escapes resolved.
    pub fn template_text(&self) -> String {
        self.template.value()
    }
}

/// True for `fmt.Anything(...)` and `fmt.Anything` used as a value.
pub fn references_format_package(expr: &Expr) -> bool {
    match expr {
        Expr::MethodCall(call) => is_format_package(&call.receiver),
        Expr::Field(field) => is_format_package(&field.base),
        _ => false,
    }
}

fn format_call<'a>(expr: &'a Expr, function: &str) -> Option<&'a ExprMethodCall> {
    match expr {
        Expr::MethodCall(call)
            if call.method == function
                && call.turbofish.is_none()
                && is_format_package(&call.receiver) =>
        {
            Some(call)
        }
        _ => None,
    }
}

fn is_format_package(expr: &Expr) -> bool {
    match expr {
        Expr::Path(ExprPath {
            qself: None, path, ..
        }) => path.is_ident(FORMAT_PACKAGE),
        _ => false,
    }
}
