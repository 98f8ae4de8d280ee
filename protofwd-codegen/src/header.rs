//! Banner, version markers and version assertions.

use protofwd_core::CompilerVersion;
use protofwd_descriptor::{CommentAnchor, Comments, SchemaFile};

use crate::file::GeneratedFile;
use crate::options::Options;

/// Name the generator reports in the banner and version block.
pub const GENERATOR_NAME: &str = "protoc-gen-protofwd";

/// Writes everything a generated file starts with.
#[derive(Debug, Clone, Copy)]
pub struct HeaderGenerator<'a> {
    options: &'a Options,
    compiler_version: Option<&'a CompilerVersion>,
}

impl<'a> HeaderGenerator<'a> {
    pub fn new(options: &'a Options, compiler_version: Option<&'a CompilerVersion>) -> Self {
        Self {
            options,
            compiler_version,
        }
    }

    /// Banner, version markers and provenance line, followed by a blank line.
    pub fn write_header(&self, g: &mut GeneratedFile, file: &SchemaFile) {
        write_standalone_comments(g, file.comments.get(CommentAnchor::Syntax));

        g.line(format!("// Code generated by {}. DO NOT EDIT.", GENERATOR_NAME));
        if self.options.generate_version_markers {
            g.line("// versions:");
            g.line(format!("// \t{} {}", GENERATOR_NAME, self.tool_version()));
            g.line(format!("// \tprotoc          {}", self.compiler_version()));
        }

        if file.deprecated {
            g.line(format!("// {} is a deprecated file.", file.path));
        } else {
            g.line(format!("// source: {}", file.path));
        }
        g.blank();
    }

    /// The `package` clause with its leading comments.
    pub fn write_package(&self, g: &mut GeneratedFile, file: &SchemaFile) {
        write_standalone_comments(g, file.comments.get(CommentAnchor::Package));
        g.line(format!("package {}", file.go_package_name));
        g.blank();
    }

    /// Static check that the runtime library supports this generator version.
    ///
    /// Compilation of the generated code fails when `gen_version` falls
    /// outside the runtime's `[MinVersion, MaxVersion]` window.
    pub fn write_version_assertions(&self, g: &mut GeneratedFile) {
        if !self.options.generate_version_markers {
            return;
        }

        let runtime = &self.options.runtime;
        let enforce = g.qualified(&runtime.protoimpl.ident("EnforceVersion"));
        let min = g.qualified(&runtime.protoimpl.ident("MinVersion"));
        let max = g.qualified(&runtime.protoimpl.ident("MaxVersion"));

        g.line("const (").indent();
        g.line("// Verify that this generated code is sufficiently up-to-date.");
        g.line(format!("_ = {}({} - {})", enforce, runtime.gen_version, min));
        g.line("// Verify that runtime/protoimpl is sufficiently up-to-date.");
        g.line(format!("_ = {}({} - {})", enforce, max, runtime.gen_version));
        g.dedent().line(")");
        g.blank();
    }

    /// Tool version as printed, always with a leading `v`.
    pub fn tool_version(&self) -> String {
        let version = &self.options.tool_version;
        if version.starts_with('v') {
            version.clone()
        } else {
            format!("v{}", version)
        }
    }

    /// Compiler version as printed, `(unknown)` when the input did not carry one.
    pub fn compiler_version(&self) -> String {
        self.compiler_version
            .map_or_else(|| "(unknown)".to_string(), ToString::to_string)
    }
}

/// Detached comments, then the leading comment, each followed by a blank line.
fn write_standalone_comments(g: &mut GeneratedFile, comments: &Comments) {
    for comment in &comments.leading_detached {
        g.comment(comment).blank();
    }
    if let Some(comment) = comments.leading.as_deref().filter(|c| !c.is_empty()) {
        g.comment(comment).blank();
    }
}
