//! Template tokenization.
//!
//! A template is split once into literal and placeholder segments. Segment
//! order and byte offsets are stable, so concatenating the text of every
//! segment gives back the template exactly.

use crate::constants::{MAX_SEGMENTS, MAX_TEMPLATE_LEN, SEGMENTS_INITIAL_CAPACITY};
use crate::error::TemplateError;
use crate::types::{Placeholder, Segment};

mod template_parser;

/// A decoded template and its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: Box<str>,
    segments: Vec<Segment>,
}

impl Template {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            Segment::Literal(_) => None,
        })
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders().count()
    }

    /// Text a segment was parsed from.
    pub fn segment_text<'a>(&'a self, segment: &'a Segment) -> &'a str {
        match segment {
            Segment::Literal(text) => text,
            Segment::Placeholder(placeholder) => &self.source[placeholder.span.clone()],
        }
    }

    /// Concatenates the text of all segments in order.
    pub fn reconstruct(&self) -> String {
        let mut text = String::with_capacity(self.source.len());
        for segment in &self.segments {
            text.push_str(self.segment_text(segment));
        }
        text
    }
}

/// Split a decoded template into segments.
///
/// Enforces `MAX_TEMPLATE_LEN` and `MAX_SEGMENTS`. Any directive other than
/// `%s`, `%d` and `%f` rejects the whole template.
pub fn tokenize_template(template: &str) -> Result<Template, TemplateError> {
    if template.is_empty() {
        return Err(TemplateError::Empty);
    }
    if template.len() > MAX_TEMPLATE_LEN {
        return Err(TemplateError::TooLong {
            len: template.len(),
            max: MAX_TEMPLATE_LEN,
        });
    }

    let mut segments = Vec::with_capacity(SEGMENTS_INITIAL_CAPACITY);
    let mut remaining = template;

    while !remaining.is_empty() {
        if segments.len() >= MAX_SEGMENTS {
            return Err(TemplateError::TooManySegments { max: MAX_SEGMENTS });
        }
        let offset = template.len() - remaining.len();

        if let Ok((rest, text)) = template_parser::literal_text(remaining) {
            segments.push(Segment::Literal(text.into()));
            remaining = rest;
            continue;
        }

        let (rest, directive) = template_parser::directive(remaining)
            .map_err(|_| TemplateError::DanglingPercent { offset })?;
        let verb = template_parser::classify(directive, offset)?;
        segments.push(Segment::Placeholder(Placeholder {
            verb,
            span: offset..offset + directive.len(),
        }));
        remaining = rest;
    }

    return Ok(Template {
        source: template.into(),
        segments,
    });
}
