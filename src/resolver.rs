//! Choosing how each argument is turned into text.
//!
//! Resolution is a pure function of the verb and the argument's static type.
//! `None` means the pair is not supported and the whole call must be skipped.

use syn::Expr;

use crate::capability::has_capability;
use crate::error::RewriteError;
use crate::format::Template;
use crate::typeinfo::{TypeDescriptor, TypeLookup};
use crate::types::{
    BasicType, Capability, FloatPrecision, FloatStyle, NumericConversion, StrconvOp,
    Transformation, VerbKind,
};

const FORMATTER_METHOD: &str = "Format";
const FORMATTER_SIGNATURE: &str = "func(fmt.State, rune)";

/// Picks the transformation for `verb` applied to a value of type `ty`.
pub fn resolve(verb: VerbKind, ty: &TypeDescriptor) -> Option<Transformation> {
    // A Format method takes over every verb.
    if ty.has_method(FORMATTER_METHOD, FORMATTER_SIGNATURE) {
        return None;
    }
    match verb {
        VerbKind::Str => resolve_string(ty),
        VerbKind::Int => resolve_integer(ty),
        VerbKind::Float => resolve_float(ty),
    }
}

/// Resolves every placeholder of `template` against its argument.
///
/// The placeholder and argument counts must already match. Stops at the first
/// argument that has no known type or no supported transformation.
pub fn resolve_arguments<T: TypeLookup + ?Sized>(
    template: &Template,
    args: &[Expr],
    types: &T,
) -> Result<Vec<Transformation>, RewriteError> {
    template
        .placeholders()
        .zip(args)
        .enumerate()
        .map(|(index, (placeholder, arg))| {
            let ty = types
                .type_of(arg)
                .ok_or(RewriteError::UnknownType { index })?;
            resolve(placeholder.verb, ty).ok_or_else(|| RewriteError::Unresolvable {
                verb: placeholder.verb,
                index,
                type_name: ty.name().into(),
            })
        })
        .collect()
}

// `%s` prefers Error() over String() over the raw value, same as fmt does at
// runtime. Do not reorder.
fn resolve_string(ty: &TypeDescriptor) -> Option<Transformation> {
    if has_capability(ty, Capability::Error) {
        return Some(Transformation::RenderViaCapability(Capability::Error));
    }
    if has_capability(ty, Capability::Display) {
        return Some(Transformation::RenderViaCapability(Capability::Display));
    }
    match ty.underlying() {
        Some(BasicType::String) if ty.is_exactly(BasicType::String) => Some(Transformation::NoOp),
        Some(BasicType::String) => Some(Transformation::ConvertTo(BasicType::String)),
        _ => None,
    }
}

fn resolve_integer(ty: &TypeDescriptor) -> Option<Transformation> {
    let basic = ty.underlying()?;
    let (op, native) = match basic {
        BasicType::Int => (StrconvOp::Itoa, BasicType::Int),
        BasicType::Int8 | BasicType::Int16 | BasicType::Int32 | BasicType::Int64 => {
            (StrconvOp::FormatInt, BasicType::Int64)
        }
        BasicType::Uint
        | BasicType::Uint8
        | BasicType::Uint16
        | BasicType::Uint32
        | BasicType::Uint64 => (StrconvOp::FormatUint, BasicType::Uint64),
        BasicType::String | BasicType::Float32 | BasicType::Float64 => return None,
    };
    Some(numeric(op, native, ty))
}

fn resolve_float(ty: &TypeDescriptor) -> Option<Transformation> {
    match ty.underlying()? {
        BasicType::Float32 | BasicType::Float64 => {}
        _ => return None,
    }
    let op = StrconvOp::FormatFloat {
        style: FloatStyle::Fixed,
        precision: FloatPrecision::Shortest,
    };
    Some(numeric(op, BasicType::Float64, ty))
}

/// Casts to `native` unless the value already has exactly that type.
fn numeric(op: StrconvOp, native: BasicType, ty: &TypeDescriptor) -> Transformation {
    let cast = (!ty.is_exactly(native)).then_some(native);
    Transformation::NumericConvert(NumericConversion { op, cast })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(basic: BasicType) -> TypeDescriptor {
        TypeDescriptor::basic(basic)
    }

    fn convert(op: StrconvOp, cast: Option<BasicType>) -> Option<Transformation> {
        Some(Transformation::NumericConvert(NumericConversion { op, cast }))
    }

    const SHORTEST_FIXED: StrconvOp = StrconvOp::FormatFloat {
        style: FloatStyle::Fixed,
        precision: FloatPrecision::Shortest,
    };

    #[test]
    fn test_resolve_arguments_reports_first_failure() {
        use crate::format::tokenize_template;
        use crate::typeinfo::TypeTable;
        use syn::parse_quote;

        let template = tokenize_template("%s %d %f").unwrap();
        let mut types = TypeTable::new();
        types.insert(parse_quote!(flag), TypeDescriptor::named("bool"));

        let args: Vec<Expr> = vec![parse_quote!("a"), parse_quote!(5), parse_quote!(2.5)];
        assert_eq!(
            resolve_arguments(&template, &args, &types).unwrap().len(),
            3
        );

        let args: Vec<Expr> = vec![parse_quote!("a"), parse_quote!(flag), parse_quote!(unknown)];
        assert_eq!(
            resolve_arguments(&template, &args, &types),
            Err(RewriteError::Unresolvable {
                verb: VerbKind::Int,
                index: 1,
                type_name: "bool".into(),
            })
        );

        let args: Vec<Expr> = vec![parse_quote!("a"), parse_quote!(5), parse_quote!(unknown)];
        assert_eq!(
            resolve_arguments(&template, &args, &types),
            Err(RewriteError::UnknownType { index: 2 })
        );
    }

    #[test]
    fn test_string_priority() {
        let both = TypeDescriptor::named("main.stringerError")
            .with_underlying(BasicType::String)
            .with_method("String", "func() string")
            .with_method("Error", "func() string");
        assert_eq!(
            resolve(VerbKind::Str, &both),
            Some(Transformation::RenderViaCapability(Capability::Error))
        );

        let error_over_value = TypeDescriptor::named("main.stringError")
            .with_underlying(BasicType::String)
            .with_method("Error", "func() string");
        assert_eq!(
            resolve(VerbKind::Str, &error_over_value),
            Some(Transformation::RenderViaCapability(Capability::Error))
        );

        let stringer = TypeDescriptor::named("main.stringStringer")
            .with_underlying(BasicType::String)
            .with_method("String", "func() string");
        assert_eq!(
            resolve(VerbKind::Str, &stringer),
            Some(Transformation::RenderViaCapability(Capability::Display))
        );
    }

    #[test]
    fn test_plain_and_wrapped_strings() {
        assert_eq!(
            resolve(VerbKind::Str, &basic(BasicType::String)),
            Some(Transformation::NoOp)
        );
        let wrapped = TypeDescriptor::named("main.wrappedString").with_underlying(BasicType::String);
        assert_eq!(
            resolve(VerbKind::Str, &wrapped),
            Some(Transformation::ConvertTo(BasicType::String))
        );
        assert_eq!(resolve(VerbKind::Str, &basic(BasicType::Int)), None);
        assert_eq!(resolve(VerbKind::Str, &TypeDescriptor::named("bool")), None);
        assert_eq!(
            resolve(VerbKind::Str, &TypeDescriptor::named("string")),
            Some(Transformation::NoOp)
        );
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(
            resolve(VerbKind::Int, &basic(BasicType::Int)),
            convert(StrconvOp::Itoa, None)
        );
        assert_eq!(
            resolve(VerbKind::Int, &basic(BasicType::Int64)),
            convert(StrconvOp::FormatInt, None)
        );
        for narrow in [BasicType::Int8, BasicType::Int16, BasicType::Int32] {
            assert_eq!(
                resolve(VerbKind::Int, &basic(narrow)),
                convert(StrconvOp::FormatInt, Some(BasicType::Int64))
            );
        }
        assert_eq!(
            resolve(VerbKind::Int, &basic(BasicType::Uint64)),
            convert(StrconvOp::FormatUint, None)
        );
        for narrow in [
            BasicType::Uint,
            BasicType::Uint8,
            BasicType::Uint16,
            BasicType::Uint32,
        ] {
            assert_eq!(
                resolve(VerbKind::Int, &basic(narrow)),
                convert(StrconvOp::FormatUint, Some(BasicType::Uint64))
            );
        }
    }

    #[test]
    fn test_named_integers_are_cast_to_native_width() {
        let age = TypeDescriptor::named("main.Age").with_underlying(BasicType::Int);
        assert_eq!(
            resolve(VerbKind::Int, &age),
            convert(StrconvOp::Itoa, Some(BasicType::Int))
        );
        let id = TypeDescriptor::named("main.ID").with_underlying(BasicType::Uint64);
        assert_eq!(
            resolve(VerbKind::Int, &id),
            convert(StrconvOp::FormatUint, Some(BasicType::Uint64))
        );
    }

    #[test]
    fn test_integer_rejects_non_integers() {
        assert_eq!(resolve(VerbKind::Int, &basic(BasicType::Float64)), None);
        assert_eq!(resolve(VerbKind::Int, &basic(BasicType::String)), None);
        assert_eq!(resolve(VerbKind::Int, &TypeDescriptor::named("uintptr")), None);
    }

    #[test]
    fn test_floats() {
        assert_eq!(
            resolve(VerbKind::Float, &basic(BasicType::Float64)),
            convert(SHORTEST_FIXED, None)
        );
        assert_eq!(
            resolve(VerbKind::Float, &basic(BasicType::Float32)),
            convert(SHORTEST_FIXED, Some(BasicType::Float64))
        );
        assert_eq!(resolve(VerbKind::Float, &basic(BasicType::Int)), None);
    }

    #[test]
    fn test_custom_formatter_is_never_rewritten() {
        let formatted = TypeDescriptor::named("main.Money")
            .with_underlying(BasicType::Int64)
            .with_method("String", "func() string")
            .with_method("Format", "func(fmt.State, rune)");
        for verb in VerbKind::ALL {
            assert_eq!(resolve(verb, &formatted), None);
        }
    }

    #[test]
    fn test_capabilities_do_not_apply_to_numeric_verbs() {
        let stringer_int = TypeDescriptor::named("main.Level")
            .with_underlying(BasicType::Int)
            .with_method("String", "func() string");
        assert_eq!(
            resolve(VerbKind::Int, &stringer_int),
            convert(StrconvOp::Itoa, Some(BasicType::Int))
        );
    }
}
