//! Reasons a call site is left untouched.
//!
//! None of these are fatal. Every variant means "skip this call site", and the
//! caller is expected to treat them all the same way.

use thiserror::Error;

use crate::types::VerbKind;

/// Why a template could not be split into segments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template is empty")]
    Empty,

    #[error("template too long ({len} bytes). Maximum allowed: {max} bytes")]
    TooLong { len: usize, max: usize },

    #[error("template has more than {max} segments")]
    TooManySegments { max: usize },

    #[error("escaped '%%' at byte {offset} is not supported")]
    EscapedPercent { offset: usize },

    #[error("indexed directive {directive:?} at byte {offset} is not supported")]
    Indexed { directive: Box<str>, offset: usize },

    #[error("unsupported directive {directive:?} at byte {offset}")]
    UnknownVerb { directive: Box<str>, offset: usize },

    #[error("'%' at byte {offset} is not followed by a verb")]
    DanglingPercent { offset: usize },
}

/// Why a call site was not rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewriteError {
    #[error("expression is not a fmt.Sprintf call")]
    NotACandidate,

    #[error("first argument is not a plain string literal")]
    NotATemplateLiteral,

    #[error("call has no value arguments")]
    MissingArguments,

    #[error("malformed template: {0}")]
    Template(#[from] TemplateError),

    #[error("template has no placeholders")]
    NoPlaceholders,

    #[error("template has {placeholders} placeholder(s) but {arguments} argument(s) were supplied")]
    ArityMismatch { placeholders: usize, arguments: usize },

    #[error("no type information for argument #{index}")]
    UnknownType { index: usize },

    #[error("verb {verb} cannot render argument #{index} of type {type_name}")]
    Unresolvable {
        verb: VerbKind,
        index: usize,
        type_name: Box<str>,
    },
}
