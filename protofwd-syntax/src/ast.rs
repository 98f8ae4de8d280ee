//! Top-level declaration tree of a Go source file.

use std::fmt;

use crate::span::Span;

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Name in the `package` clause.
    pub package: Ident,
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Iterate over the generic (`import`/`const`/`var`/`type`) declarations.
    pub fn gen_decls(&self) -> impl Iterator<Item = &GenDecl> {
        self.decls.iter().filter_map(|decl| match decl {
            Decl::Gen(gen_decl) => Some(gen_decl),
            Decl::Func(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Gen(GenDecl),
    Func(FuncDecl),
}

/// Keyword introducing a generic declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKeyword {
    Import,
    Const,
    Var,
    Type,
}

impl DeclKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKeyword::Import => "import",
            DeclKeyword::Const => "const",
            DeclKeyword::Var => "var",
            DeclKeyword::Type => "type",
        }
    }
}

impl fmt::Display for DeclKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `import`, `const`, `var` or `type` declaration, grouped (`const ( ... )`) or not.
#[derive(Debug, Clone, PartialEq)]
pub struct GenDecl {
    pub keyword: DeclKeyword,
    pub grouped: bool,
    pub specs: Vec<Spec>,
    pub span: Span,
}

/// Function or method declaration. Only its name is retained.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Ident,
    /// Span of the receiver list for methods.
    pub receiver: Option<Span>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spec {
    Import(ImportSpec),
    Type(TypeSpec),
    Value(ValueSpec),
}

impl Spec {
    /// Human-readable name of the spec form.
    pub fn form(&self) -> &'static str {
        match self {
            Spec::Import(_) => "import spec",
            Spec::Type(_) => "type spec",
            Spec::Value(_) => "value spec",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    /// Local name (`.` or `_` included) when given.
    pub name: Option<Ident>,
    /// Unquoted import path.
    pub path: String,
    pub span: Span,
}

/// `type Name Type` or, when `alias` is set, `type Name = Type`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Ident,
    pub alias: bool,
    pub ty: Expr,
}

/// `Names [Type] [= Values]` inside a `const` or `var` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSpec {
    pub names: Vec<Ident>,
    pub ty: Option<Expr>,
    pub values: Vec<Expr>,
}

/// An expression (or type expression), reduced to its outermost shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub span: Span,
    pub shape: ExprShape,
}

impl Expr {
    /// Whether the outermost node is a selector `X.Name`.
    pub fn is_selector(&self) -> bool {
        matches!(self.shape, ExprShape::Selector { .. })
    }

    /// Get the source text of the expression
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprShape {
    /// A bare identifier (`Widget`, `int32`).
    Ident(String),
    /// A selector; `qualifier` is the source text of the operand (`pkgb` in `pkgb.Widget`).
    Selector { qualifier: String, name: String },
    /// Any other expression: literals, calls, composite and type literals, operators.
    Other,
}
