//! Public-import forwarding.
//!
//! When `a.proto` publicly imports `b.proto`, every exported top-level
//! declaration of B's generated file is re-declared in A's generated file as
//! an alias:
//!
//! ```text
//! // Symbols defined in public import of b.proto.
//!
//! type Widget = pkgb.Widget
//! const Color_RED = pkgb.Color_RED
//! ```
//!
//! B's declarations are found by generating B in detached mode and parsing
//! the result. Declarations that are themselves aliases into another package
//! (B's own forwards) are not forwarded again, so alias chains stay one level
//! deep.

use protofwd_core::is_exported;
use protofwd_descriptor::SchemaFile;
use protofwd_syntax::{DeclKeyword, ExprShape, SourceFile, Spec, parse_file};
use tracing::{debug, trace};

use crate::error::GenerateError;
use crate::file::GeneratedFile;
use crate::generator::{EmitContext, Generator};

/// A top-level name declared by a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub keyword: DeclKeyword,
    pub name: String,
    /// Shape of the defining expression: the type of a type spec, the
    /// positional value of a const/var name, `None` when there is no value.
    pub shape: Option<ExprShape>,
}

impl Declaration {
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    /// Whether the definition is a bare `pkg.Name` reference.
    pub fn is_qualified_reference(&self) -> bool {
        matches!(self.shape, Some(ExprShape::Selector { .. }))
    }
}

/// Outcome of the forwarding filter for one declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Forward,
    Unexported,
    /// The schema-descriptor singleton, which every file declares for itself.
    DescriptorIdent,
    /// Already an alias into another package.
    QualifiedReference,
}

impl Verdict {
    /// Decide whether `decl` gets a forwarding alias.
    pub fn of(decl: &Declaration, descriptor_name: &str) -> Self {
        if !decl.is_exported() {
            Verdict::Unexported
        } else if decl.name == descriptor_name {
            Verdict::DescriptorIdent
        } else if decl.is_qualified_reference() {
            Verdict::QualifiedReference
        } else {
            Verdict::Forward
        }
    }
}

/// A spec whose form does not fit its declaration keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnrecognizedSpec {
    pub keyword: DeclKeyword,
    pub form: &'static str,
}

/// List the names declared by the `const`, `var` and `type` declarations of
/// a file, in source order. Import specs and functions are skipped.
pub fn collect_declarations(file: &SourceFile) -> Result<Vec<Declaration>, UnrecognizedSpec> {
    let mut declarations = Vec::new();

    for decl in file.gen_decls() {
        for spec in &decl.specs {
            match (decl.keyword, spec) {
                (DeclKeyword::Import, Spec::Import(_)) => {}
                (DeclKeyword::Type, Spec::Type(spec)) => declarations.push(Declaration {
                    keyword: decl.keyword,
                    name: spec.name.name.clone(),
                    shape: Some(spec.ty.shape.clone()),
                }),
                (DeclKeyword::Const | DeclKeyword::Var, Spec::Value(spec)) => {
                    for (i, name) in spec.names.iter().enumerate() {
                        declarations.push(Declaration {
                            keyword: decl.keyword,
                            name: name.name.clone(),
                            shape: spec.values.get(i).map(|value| value.shape.clone()),
                        });
                    }
                }
                (keyword, spec) => {
                    return Err(UnrecognizedSpec {
                        keyword,
                        form: spec.form(),
                    });
                }
            }
        }
    }

    Ok(declarations)
}

/// Writes the forwarding block of one public import.
pub(crate) struct PublicImportForwarder<'g> {
    generator: &'g Generator,
}

impl<'g> PublicImportForwarder<'g> {
    pub(crate) fn new(generator: &'g Generator) -> Self {
        Self { generator }
    }

    pub(crate) fn forward(
        &self,
        importer: &mut GeneratedFile,
        target: &SchemaFile,
        ctx: &mut EmitContext<'_>,
    ) -> Result<(), GenerateError> {
        let chain = ctx.chain.with(&target.path);
        if ctx.chain.contains(&target.path) {
            return Err(GenerateError::Cycle {
                file: target.path.clone(),
                chain,
            });
        }

        let content = {
            let mut nested = EmitContext {
                chain: chain.clone(),
                detached: true,
                diagnostics: &mut *ctx.diagnostics,
            };
            let mut probe = self.generator.emit(target, &mut nested)?;
            probe.materialize()?
        };

        let source = parse_file(&content)
            .map_err(|error| GenerateError::syntax(&target.path, &chain, &content, error))?;
        let declarations = collect_declarations(&source).map_err(|spec| {
            GenerateError::UnrecognizedDeclaration {
                file: target.path.clone(),
                chain: chain.clone(),
                keyword: spec.keyword,
                form: spec.form,
            }
        })?;

        let descriptor = target.descriptor_ident();
        importer.line(format!(
            "// Symbols defined in public import of {}.",
            target.path
        ));
        importer.blank();

        let mut forwarded = 0usize;
        for decl in &declarations {
            let verdict = Verdict::of(decl, &descriptor.name);
            trace!(
                importer = importer.source(),
                target = %target.path,
                name = %decl.name,
                ?verdict,
                "forwarding decision"
            );
            if verdict != Verdict::Forward {
                continue;
            }

            let alias = importer.qualified(&target.go_import_path.ident(decl.name.as_str()));
            importer.line(format!("{} {} = {}", decl.keyword, decl.name, alias));
            forwarded += 1;
        }
        importer.blank();

        debug!(
            importer = importer.source(),
            target = %target.path,
            forwarded,
            considered = declarations.len(),
            "forwarded public import"
        );
        Ok(())
    }
}
