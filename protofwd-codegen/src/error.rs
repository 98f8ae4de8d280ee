//! Fatal generation errors.

use std::fmt;

use protofwd_syntax::{DeclKeyword, ParseError};
use thiserror::Error;

/// Schema paths from the file being generated down to the file where an
/// error occurred, following public imports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportChain(Vec<String>);

impl ImportChain {
    /// A chain holding only the root file.
    pub fn new(root: impl Into<String>) -> Self {
        Self(vec![root.into()])
    }

    /// The chain extended by one public import.
    pub fn with(&self, path: impl Into<String>) -> Self {
        let mut paths = self.0.clone();
        paths.push(path.into());
        Self(paths)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|p| p == path)
    }

    pub fn paths(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ImportChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

/// Errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generated source for {file} does not parse at {line}:{column}: {source} (import chain: {chain})")]
    Syntax {
        file: String,
        chain: ImportChain,
        line: usize,
        column: usize,
        #[source]
        source: ParseError,
    },

    #[error("public import cycle: {chain}")]
    Cycle { file: String, chain: ImportChain },

    #[error(
        "can't generate forward for {form} in {keyword} declaration of {file} (import chain: {chain})"
    )]
    UnrecognizedDeclaration {
        file: String,
        chain: ImportChain,
        keyword: DeclKeyword,
        form: &'static str,
    },

    #[error("{file} and {first} both generate {filename}")]
    DuplicateOutput {
        file: String,
        chain: ImportChain,
        /// Schema file that claimed the filename first.
        first: String,
        filename: String,
    },
}

impl GenerateError {
    /// Syntax error in `text`, the generated source of `file`.
    pub(crate) fn syntax(file: &str, chain: &ImportChain, text: &str, source: ParseError) -> Self {
        let (line, column) = source.span().line_col(text);
        GenerateError::Syntax {
            file: file.to_string(),
            chain: chain.clone(),
            line,
            column,
            source,
        }
    }

    /// Schema file the error is about.
    pub fn file(&self) -> &str {
        match self {
            GenerateError::Syntax { file, .. }
            | GenerateError::Cycle { file, .. }
            | GenerateError::UnrecognizedDeclaration { file, .. }
            | GenerateError::DuplicateOutput { file, .. } => file,
        }
    }

    /// Public-import chain that led to the file.
    pub fn chain(&self) -> &ImportChain {
        match self {
            GenerateError::Syntax { chain, .. }
            | GenerateError::Cycle { chain, .. }
            | GenerateError::UnrecognizedDeclaration { chain, .. }
            | GenerateError::DuplicateOutput { chain, .. } => chain,
        }
    }
}
