use nom::{
    IResult, Parser,
    bytes::complete::{take_till1, take_while},
    character::complete::{anychar, char},
    combinator::recognize,
};

use crate::error::TemplateError;
use crate::types::VerbKind;

const INTRODUCER: char = '%';

/// A run of text containing no directive introducer.
pub(super) fn literal_text(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == INTRODUCER).parse(input)
}

/// A whole directive: the introducer, any flags, width, precision or index
/// brackets, then exactly one verb character.
pub(super) fn directive(input: &str) -> IResult<&str, &str> {
    recognize((char(INTRODUCER), take_while(is_modifier), anychar)).parse(input)
}

fn is_modifier(c: char) -> bool {
    matches!(c, '+' | '-' | '#' | ' ' | '0'..='9' | '.' | '*' | '[' | ']')
}

/// Maps directive text to a supported verb. Only exact matches are accepted.
pub(super) fn classify(directive: &str, offset: usize) -> Result<VerbKind, TemplateError> {
    if directive == "%%" {
        return Err(TemplateError::EscapedPercent { offset });
    }
    if let Some(verb) = VerbKind::from_directive(directive) {
        return Ok(verb);
    }
    if directive.contains('[') {
        return Err(TemplateError::Indexed {
            directive: directive.into(),
            offset,
        });
    }
    Err(TemplateError::UnknownVerb {
        directive: directive.into(),
        offset,
    })
}
