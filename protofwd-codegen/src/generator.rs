//! Generation driver.

use protofwd_descriptor::{DescriptorSet, SchemaFile};
use tracing::debug;

use crate::body::{BodyTemplate, SkeletonBody};
use crate::diagnostic::Diagnostic;
use crate::error::{GenerateError, ImportChain};
use crate::file::GeneratedFile;
use crate::header::HeaderGenerator;
use crate::options::Options;
use crate::output::{GenerateOutput, OutputFile, OutputSet};
use crate::resolve::ImportResolver;

/// State threaded through the emission of one file and, recursively, the
/// detached emission of its public imports.
pub(crate) struct EmitContext<'d> {
    /// Files from the root down to the one being emitted
    pub(crate) chain: ImportChain,
    /// Set while probing a public import; detached output is never registered
    pub(crate) detached: bool,
    pub(crate) diagnostics: &'d mut Vec<Diagnostic>,
}

/// Generates one Go file per schema file of a descriptor set.
///
/// # Example
///
/// ```
/// use protofwd_codegen::{Generator, Options};
/// use protofwd_descriptor::{DescriptorSet, GoImportPath, GoPackageName, ImportEdge, SchemaFile};
///
/// let set = DescriptorSet::new()
///     .with_file(
///         SchemaFile::new("a.proto", GoImportPath::new("example.com/pkga"), GoPackageName::new("pkga"))
///             .with_import(ImportEdge::public("b.proto")),
///     )
///     .with_file(
///         SchemaFile::new("b.proto", GoImportPath::new("example.com/pkgb"), GoPackageName::new("pkgb"))
///             .with_message("Widget"),
///     );
///
/// let output = Generator::new(set, Options::default()).run().unwrap();
/// let a = output.file("a.generated.go").unwrap();
/// assert!(a.content.contains("type Widget = pkgb.Widget\n"));
/// ```
pub struct Generator {
    set: DescriptorSet,
    options: Options,
    body: Box<dyn BodyTemplate>,
}

impl Generator {
    /// Create a generator writing [`SkeletonBody`] declarations.
    pub fn new(set: DescriptorSet, options: Options) -> Self {
        let body = Box::new(SkeletonBody::new(&options.runtime));
        Self { set, options, body }
    }

    /// Replace the template writing per-file declarations.
    pub fn with_body(mut self, body: impl BodyTemplate + 'static) -> Self {
        self.body = Box::new(body);
        self
    }

    pub fn descriptor_set(&self) -> &DescriptorSet {
        &self.set
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Generate every file marked for generation, in descriptor set order.
    pub fn run(&self) -> Result<GenerateOutput, GenerateError> {
        let mut outputs = OutputSet::new();
        let mut diagnostics = Vec::new();

        for file in self.set.files_to_generate() {
            let output = self.generate_root(file, &mut diagnostics)?;
            if !outputs.register(output)? {
                debug!(file = %file.path, "output already registered");
            }
        }

        debug!(
            files = outputs.len(),
            diagnostics = diagnostics.len(),
            "generation finished"
        );
        Ok(GenerateOutput {
            files: outputs.into_files(),
            supported_features: self.options.supported_features,
            diagnostics,
        })
    }

    /// Generate every file without keeping the output.
    ///
    /// Unlike [`Generator::run`], a failing file does not stop the pass: each
    /// failure becomes an error diagnostic located at the failing root file.
    pub fn check(&self) -> Vec<Diagnostic> {
        let mut outputs = OutputSet::new();
        let mut diagnostics = Vec::new();

        for file in self.set.files_to_generate() {
            let result = self
                .generate_root(file, &mut diagnostics)
                .and_then(|output| outputs.register(output));
            if let Err(err) = result {
                debug!(file = %file.path, error = %err, "check failed");
                diagnostics.push(Diagnostic::error("generate", err.to_string()).at(&file.path));
            }
        }

        diagnostics
    }

    /// Generate and materialize a single file.
    ///
    /// Diagnostics are only logged; use [`Generator::run`] to collect them.
    pub fn generate_file(&self, file: &SchemaFile) -> Result<OutputFile, GenerateError> {
        self.generate_root(file, &mut Vec::new())
    }

    fn generate_root(
        &self,
        file: &SchemaFile,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<OutputFile, GenerateError> {
        let mut ctx = EmitContext {
            chain: ImportChain::new(&file.path),
            detached: false,
            diagnostics,
        };
        let mut g = self.emit(file, &mut ctx)?;
        let content = g.materialize()?;

        Ok(OutputFile {
            filename: g.filename().to_string(),
            source: file.path.clone(),
            content,
        })
    }

    /// Run full emission of `file` into a fresh buffer.
    pub(crate) fn emit(
        &self,
        file: &SchemaFile,
        ctx: &mut EmitContext<'_>,
    ) -> Result<GeneratedFile, GenerateError> {
        debug!(
            file = %file.path,
            chain = %ctx.chain,
            detached = ctx.detached,
            "emitting file"
        );

        let mut g = GeneratedFile::open(
            self.options.output_filename(file),
            file,
            ctx.chain.clone(),
        );
        if ctx.detached {
            g.mark_detached();
        }

        let header = HeaderGenerator::new(&self.options, self.set.compiler_version());
        header.write_header(&mut g, file);
        header.write_package(&mut g, file);
        header.write_version_assertions(&mut g);

        ImportResolver::new(self).resolve(file, &mut g, ctx)?;

        self.body.write_body(&mut g, file);
        Ok(g)
    }
}
