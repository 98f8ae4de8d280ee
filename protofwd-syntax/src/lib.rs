//! Syntax introspection of generated Go source.
//!
//! The parser only understands the top-level structure of a Go file: the
//! `package` clause, generic declarations (`import`, `const`, `var`, `type`)
//! with their specs, and function declarations. Function bodies and composite
//! expressions are skipped by bracket matching; each defining expression is
//! reduced to an [`ExprShape`] that tells a bare identifier, a qualified
//! selector (`pkg.Name`) and anything else apart.
//!
//! # Example
//!
//! ```
//! use protofwd_syntax::{Decl, Spec, parse_file};
//!
//! let file = parse_file("package pkga\n\ntype Widget = pkgb.Widget\n").unwrap();
//! assert_eq!(file.package.name, "pkga");
//!
//! let Decl::Gen(decl) = &file.decls[0] else { panic!("expected a type declaration") };
//! let Spec::Type(spec) = &decl.specs[0] else { panic!("expected a type spec") };
//! assert!(spec.alias);
//! assert!(spec.ty.is_selector());
//! ```

mod ast;
mod lexer;
mod parser;
mod span;
mod token;

pub use ast::{
    Decl, DeclKeyword, Expr, ExprShape, FuncDecl, GenDecl, Ident, ImportSpec, SourceFile, Spec,
    TypeSpec, ValueSpec,
};
pub use lexer::{Lexer, LexerError};
pub use parser::{ParseError, ParseResult, Parser};
pub use span::Span;
pub use token::{Token, TokenKind};

/// Parse Go source text into its top-level declarations.
pub fn parse_file(source: &str) -> ParseResult<SourceFile> {
    Parser::new(source)?.parse_file()
}
