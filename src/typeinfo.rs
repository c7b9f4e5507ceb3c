//! Static type facts about argument expressions.
//!
//! The rewriter never infers types itself. Whatever drives it supplies a
//! [`TypeLookup`] that answers "what is the static type of this expression".

use std::collections::HashMap;

use syn::{Expr, ExprLit, ExprUnary, Lit, UnOp};

use crate::types::BasicType;

/// A method in a type's method set, e.g. `String` with `func() string`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: Box<str>,
    pub signature: Box<str>,
}

/// What the rewriter needs to know about the static type of one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: Box<str>,
    underlying: Option<BasicType>,
    methods: Vec<MethodSignature>,
}

impl TypeDescriptor {
    /// A type known by name. Predeclared names such as `string` or `byte`
    /// get their basic underlying type; any other name has none until set
    /// with [`TypeDescriptor::with_underlying`].
    pub fn named(name: impl Into<Box<str>>) -> Self {
        let name = name.into();
        Self {
            underlying: BasicType::from_name(&name),
            name,
            methods: Vec::new(),
        }
    }

    /// A predeclared type such as `int8` or `string`.
    pub fn basic(basic: BasicType) -> Self {
        Self {
            name: basic.name().into(),
            underlying: Some(basic),
            methods: Vec::new(),
        }
    }

    /// The predeclared `error` interface.
    pub fn error_interface() -> Self {
        Self::named("error").with_method("Error", "func() string")
    }

    pub fn with_underlying(mut self, basic: BasicType) -> Self {
        self.underlying = Some(basic);
        self
    }

    pub fn with_method(mut self, name: &str, signature: &str) -> Self {
        self.methods.push(MethodSignature {
            name: name.into(),
            signature: signature.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn underlying(&self) -> Option<BasicType> {
        self.underlying
    }

    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    /// True when this is the predeclared type itself rather than a type
    /// defined on top of it.
    pub fn is_exactly(&self, basic: BasicType) -> bool {
        self.underlying == Some(basic) && BasicType::from_name(&self.name) == Some(basic)
    }

    pub fn has_method(&self, name: &str, signature: &str) -> bool {
        self.methods
            .iter()
            .any(|method| &*method.name == name && &*method.signature == signature)
    }
}

/// Source of static type information for argument expressions.
pub trait TypeLookup {
    fn type_of(&self, expr: &Expr) -> Option<&TypeDescriptor>;
}

impl TypeLookup for HashMap<Expr, TypeDescriptor> {
    fn type_of(&self, expr: &Expr) -> Option<&TypeDescriptor> {
        self.get(expr)
    }
}

/// Explicit expression types plus the default types of untyped constants.
///
/// Literals passed to a variadic `...any` parameter take their default type,
/// so `"x"` is a `string`, `5` an `int`, `3.14` a `float64` and `'a'` a `rune`.
#[derive(Debug, Clone)]
pub struct TypeTable {
    explicit: HashMap<Expr, TypeDescriptor>,
    string_constant: TypeDescriptor,
    int_constant: TypeDescriptor,
    float_constant: TypeDescriptor,
    rune_constant: TypeDescriptor,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    pub fn new() -> Self {
        Self {
            explicit: HashMap::new(),
            string_constant: TypeDescriptor::basic(BasicType::String),
            int_constant: TypeDescriptor::basic(BasicType::Int),
            float_constant: TypeDescriptor::basic(BasicType::Float64),
            rune_constant: TypeDescriptor::named("rune").with_underlying(BasicType::Int32),
        }
    }

    /// Records the type of `expr`, replacing any previous entry.
    pub fn insert(&mut self, expr: Expr, descriptor: TypeDescriptor) -> &mut Self {
        self.explicit.insert(expr, descriptor);
        self
    }

    fn constant_type(&self, expr: &Expr) -> Option<&TypeDescriptor> {
        match expr {
            Expr::Lit(ExprLit { lit, .. }) => match lit {
                Lit::Str(_) => Some(&self.string_constant),
                Lit::Int(_) => Some(&self.int_constant),
                Lit::Float(_) => Some(&self.float_constant),
                Lit::Char(_) => Some(&self.rune_constant),
                _ => None,
            },
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr,
                ..
            }) => match &**expr {
                Expr::Lit(ExprLit {
                    lit: Lit::Int(_) | Lit::Float(_),
                    ..
                }) => self.constant_type(expr),
                _ => None,
            },
            Expr::Paren(paren) => self.constant_type(&paren.expr),
            _ => None,
        }
    }
}

impl TypeLookup for TypeTable {
    fn type_of(&self, expr: &Expr) -> Option<&TypeDescriptor> {
        self.explicit
            .get(expr)
            .or_else(|| self.constant_type(expr))
    }
}
