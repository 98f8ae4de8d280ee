use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for descriptor loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the descriptor set source and its filename so error factory
/// functions don't need both passed around.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the filename.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a duplicate file error.
    pub fn duplicate_file_error(
        &self,
        path: impl Into<String>,
        first_span: impl Into<SourceSpan>,
        second_span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::DuplicateFile {
            src: self.named_source(),
            first_span: first_span.into(),
            second_span: second_span.into(),
            path: path.into(),
        })
    }

    /// Create an error for an import marked both weak and public.
    pub fn weak_public_import_error(
        &self,
        file: impl Into<String>,
        import: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::WeakPublicImport {
            src: self.named_source(),
            span: span.into(),
            file: file.into(),
            import: import.into(),
        })
    }

    /// Create an invalid `go_package` error.
    pub fn invalid_go_package_error(
        &self,
        value: impl Into<String>,
        reason: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidGoPackage {
            src: self.named_source(),
            span: span.into(),
            value: value.into(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the descriptor set with --descriptors <path>"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse descriptor set")]
    #[diagnostic(code(protofwd::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("duplicate file '{path}'")]
    #[diagnostic(
        code(protofwd::duplicate_file),
        help("every schema file must appear exactly once in the descriptor set")
    )]
    DuplicateFile {
        #[source_code]
        src: NamedSource<String>,
        #[label("first declared here")]
        first_span: SourceSpan,
        #[label("declared again here")]
        second_span: SourceSpan,
        path: String,
    },

    #[error("import of '{import}' in '{file}' is both weak and public")]
    #[diagnostic(
        code(protofwd::weak_public_import),
        help("a public import re-exports its target and cannot be weak")
    )]
    WeakPublicImport {
        #[source_code]
        src: NamedSource<String>,
        #[label("weak public import")]
        span: SourceSpan,
        file: String,
        import: String,
    },

    #[error("invalid go_package '{value}'")]
    #[diagnostic(code(protofwd::invalid_go_package), help("{reason}"))]
    InvalidGoPackage {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid go_package")]
        span: SourceSpan,
        value: String,
        reason: String,
    },
}
