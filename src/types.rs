//! Core types shared by the template parser, the resolver and the builder.

use std::fmt;
use std::ops::Range;

/// A placeholder form the rewriter knows how to replace.
///
/// Anything else found in a template is rejected by the parser, so this set
/// is closed: adding a verb means adding a variant and handling it at every
/// `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbKind {
    /// `%s`
    Str,
    /// `%d`
    Int,
    /// `%f`
    Float,
}

impl VerbKind {
    /// Every supported verb, in the order they are tried.
    pub const ALL: [VerbKind; 3] = [VerbKind::Str, VerbKind::Int, VerbKind::Float];

    /// The directive text as it appears in a template.
    pub const fn directive(self) -> &'static str {
        match self {
            VerbKind::Str => "%s",
            VerbKind::Int => "%d",
            VerbKind::Float => "%f",
        }
    }

    /// Looks up the verb written exactly as `directive`.
    pub fn from_directive(directive: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.directive() == directive)
    }
}

impl fmt::Display for VerbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive())
    }
}

/// A placeholder in a template with its byte range in the decoded template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub verb: VerbKind,
    pub span: Range<usize>,
}

/// One piece of a parsed template.
///
/// Uses `Box<str>` for literal text since segments never change after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied verbatim into the output.
    Literal(Box<str>),

    /// A value to be converted to text.
    Placeholder(Placeholder),
}

impl Segment {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Segment::Placeholder(_))
    }
}

/// Built-in self-rendering behavior a type may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `String() string`, the `fmt.Stringer` contract.
    Display,
    /// `Error() string`, the `error` contract.
    Error,
}

impl Capability {
    /// Name of the method that renders the value.
    pub const fn method_name(self) -> &'static str {
        match self {
            Capability::Display => "String",
            Capability::Error => "Error",
        }
    }
}

/// Predeclared types the resolver can reason about.
///
/// `byte` and `rune` are aliases and map to `Uint8` and `Int32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    String,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Float32,
    Float64,
}

impl BasicType {
    pub const fn name(self) -> &'static str {
        match self {
            BasicType::String => "string",
            BasicType::Int => "int",
            BasicType::Int8 => "int8",
            BasicType::Int16 => "int16",
            BasicType::Int32 => "int32",
            BasicType::Int64 => "int64",
            BasicType::Uint => "uint",
            BasicType::Uint8 => "uint8",
            BasicType::Uint16 => "uint16",
            BasicType::Uint32 => "uint32",
            BasicType::Uint64 => "uint64",
            BasicType::Float32 => "float32",
            BasicType::Float64 => "float64",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let basic = match name {
            "string" => BasicType::String,
            "int" => BasicType::Int,
            "int8" => BasicType::Int8,
            "int16" => BasicType::Int16,
            "int32" | "rune" => BasicType::Int32,
            "int64" => BasicType::Int64,
            "uint" => BasicType::Uint,
            "uint8" | "byte" => BasicType::Uint8,
            "uint16" => BasicType::Uint16,
            "uint32" => BasicType::Uint32,
            "uint64" => BasicType::Uint64,
            "float32" => BasicType::Float32,
            "float64" => BasicType::Float64,
            _ => return None,
        };
        Some(basic)
    }
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `strconv` routine used to render a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrconvOp {
    /// `strconv.Itoa(x)`
    Itoa,
    /// `strconv.FormatInt(x, 10)`
    FormatInt,
    /// `strconv.FormatUint(x, 10)`
    FormatUint,
    /// `strconv.FormatFloat(x, fmt, prec, 64)`
    FormatFloat {
        style: FloatStyle,
        precision: FloatPrecision,
    },
}

impl StrconvOp {
    pub const fn function_name(self) -> &'static str {
        match self {
            StrconvOp::Itoa => "Itoa",
            StrconvOp::FormatInt => "FormatInt",
            StrconvOp::FormatUint => "FormatUint",
            StrconvOp::FormatFloat { .. } => "FormatFloat",
        }
    }
}

/// Textual style argument of `strconv.FormatFloat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatStyle {
    /// `'f'`: `-ddd.dddd`, no exponent.
    Fixed,
}

impl FloatStyle {
    pub const fn as_char(self) -> char {
        match self {
            FloatStyle::Fixed => 'f',
        }
    }
}

/// Precision argument of `strconv.FormatFloat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatPrecision {
    /// `-1`: the fewest digits that parse back to the same value.
    Shortest,
}

/// A numeric conversion, optionally preceded by a cast to the width the
/// `strconv` routine expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericConversion {
    pub op: StrconvOp,
    pub cast: Option<BasicType>,
}

/// How one argument is turned into text for one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformation {
    /// The argument already is a `string`.
    NoOp,

    /// Call the type's own rendering method.
    RenderViaCapability(Capability),

    /// Convert to a predeclared type, e.g. `string(x)` for `type name string`.
    ConvertTo(BasicType),

    /// Render a number through `strconv`.
    NumericConvert(NumericConversion),
}

impl Transformation {
    /// Whether applying this transformation requires the numeric package.
    pub fn needs_numeric_library(&self) -> bool {
        match self {
            Transformation::NumericConvert(_) => true,
            Transformation::NoOp
            | Transformation::RenderViaCapability(_)
            | Transformation::ConvertTo(_) => false,
        }
    }
}
