//! Result of a generation run.

use std::path::Path;

use eyre::Result;
use indexmap::IndexMap;
use protofwd_core::{File, Overwrite, WriteResult};
use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::error::{GenerateError, ImportChain};
use crate::options::Features;

/// A generated file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputFile {
    /// Path relative to the output directory.
    pub filename: String,
    /// Schema file it was generated from.
    pub source: String,
    pub content: String,
}

impl OutputFile {
    /// Write the file below `base`, creating parent directories as needed.
    pub fn write(&self, base: impl AsRef<Path>) -> Result<WriteResult> {
        self.write_with(base, Overwrite::Always)
    }

    /// Write the file below `base` with an explicit overwrite rule.
    pub fn write_with(&self, base: impl AsRef<Path>, overwrite: Overwrite) -> Result<WriteResult> {
        File::new(base.as_ref().join(&self.filename), self.content.as_str())
            .with_overwrite(overwrite)
            .write()
    }
}

/// Output files of one run keyed by schema file path.
///
/// Registering the same schema file twice keeps the first file. Two schema
/// files whose outputs share a filename are an error.
#[derive(Debug, Clone, Default)]
pub struct OutputSet {
    files: IndexMap<String, OutputFile>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; returns false when its schema file is already registered.
    pub fn register(&mut self, file: OutputFile) -> Result<bool, GenerateError> {
        if self.files.contains_key(&file.source) {
            return Ok(false);
        }
        if let Some(taken) = self.get(&file.filename) {
            return Err(GenerateError::DuplicateOutput {
                chain: ImportChain::new(&file.source),
                first: taken.source.clone(),
                file: file.source,
                filename: file.filename,
            });
        }
        self.files.insert(file.source.clone(), file);
        Ok(true)
    }

    /// Find a registered file by output filename.
    pub fn get(&self, filename: &str) -> Option<&OutputFile> {
        self.files.values().find(|f| f.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files in registration order.
    pub fn into_files(self) -> Vec<OutputFile> {
        self.files.into_values().collect()
    }
}

/// Everything a run hands back to its caller.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    pub files: Vec<OutputFile>,
    pub supported_features: Features,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateOutput {
    /// Find a generated file by filename.
    pub fn file(&self, filename: &str) -> Option<&OutputFile> {
        self.files.iter().find(|f| f.filename == filename)
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Write every file below `base`.
    pub fn write_all(
        &self,
        base: impl AsRef<Path>,
        overwrite: Overwrite,
    ) -> Result<Vec<(&OutputFile, WriteResult)>> {
        let base = base.as_ref();
        self.files
            .iter()
            .map(|file| -> Result<_> { Ok((file, file.write_with(base, overwrite)?)) })
            .collect()
    }
}
