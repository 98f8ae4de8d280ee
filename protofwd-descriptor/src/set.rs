//! The loaded descriptor set of one generation run.

use std::path::Path;

use indexmap::IndexMap;
use protofwd_core::CompilerVersion;

use crate::{Error, Result, SchemaFile, parse};

/// Every schema file known to a run, keyed by path in load order.
#[derive(Debug, Clone, Default)]
pub struct DescriptorSet {
    files: IndexMap<String, SchemaFile>,
    compiler_version: Option<CompilerVersion>,
}

impl DescriptorSet {
    /// Create an empty descriptor set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version of the schema compiler that produced the set.
    pub fn with_compiler_version(mut self, version: CompilerVersion) -> Self {
        self.compiler_version = Some(version);
        self
    }

    /// Add a file, returning the file previously registered under the same path.
    pub fn insert(&mut self, file: SchemaFile) -> Option<SchemaFile> {
        self.files.insert(file.path.clone(), file)
    }

    /// Add a file (builder form).
    pub fn with_file(mut self, file: SchemaFile) -> Self {
        self.insert(file);
        self
    }

    /// Look up a file by path.
    pub fn get(&self, path: &str) -> Option<&SchemaFile> {
        self.files.get(path)
    }

    /// Iterate over all files in load order.
    pub fn files(&self) -> impl Iterator<Item = &SchemaFile> {
        self.files.values()
    }

    /// Iterate over the files that produce output.
    pub fn files_to_generate(&self) -> impl Iterator<Item = &SchemaFile> {
        self.files.values().filter(|f| f.generate)
    }

    pub fn compiler_version(&self) -> Option<&CompilerVersion> {
        self.compiler_version.as_ref()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Load a descriptor set from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse::parse_descriptor_set(&content, &path.display().to_string())
    }

    /// Load a descriptor set from TOML source with a filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse::parse_descriptor_set(content, filename)
    }
}

impl std::str::FromStr for DescriptorSet {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse::parse_descriptor_set(s, "descriptors.toml")
    }
}
