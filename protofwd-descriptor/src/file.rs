//! Schema file descriptors.

use protofwd_core::{go_sanitized, trim_proto_extension};

use crate::{GoIdent, GoImportPath, GoPackageName};

/// A directed import edge from one schema file to another.
///
/// An edge is never both weak and public: the constructors are the only way
/// to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    path: String,
    weak: bool,
    public: bool,
}

impl ImportEdge {
    /// A regular import.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            weak: false,
            public: false,
        }
    }

    /// A public import, whose exported declarations are forwarded.
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            public: true,
            ..Self::new(path)
        }
    }

    /// A weak import, which is referenced but need not be linked.
    pub fn weak(path: impl Into<String>) -> Self {
        Self {
            weak: true,
            ..Self::new(path)
        }
    }

    /// Path of the imported schema file.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }

    pub fn is_public(&self) -> bool {
        self.public
    }
}

/// Location a standalone comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAnchor {
    /// The `syntax` statement at the top of the schema file.
    Syntax,
    /// The `package` statement.
    Package,
}

/// Comments attached to one source location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    /// Comment blocks separated from the statement by a blank line.
    pub leading_detached: Vec<String>,
    /// Comment block directly preceding the statement.
    pub leading: Option<String>,
}

impl Comments {
    pub fn is_empty(&self) -> bool {
        self.leading_detached.is_empty() && self.leading.is_none()
    }
}

/// Source-location comment table of a schema file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceComments {
    pub syntax: Comments,
    pub package: Comments,
}

impl SourceComments {
    pub fn get(&self, anchor: CommentAnchor) -> &Comments {
        match anchor {
            CommentAnchor::Syntax => &self.syntax,
            CommentAnchor::Package => &self.package,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub number: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    pub values: Vec<EnumValue>,
}

/// One input schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    /// Logical path of the schema file (e.g., "foo/bar.proto").
    pub path: String,
    /// Output-module identity.
    pub go_import_path: GoImportPath,
    /// Name of the `package` clause of the generated file.
    pub go_package_name: GoPackageName,
    /// Imports in declaration order.
    pub imports: Vec<ImportEdge>,
    pub deprecated: bool,
    /// Whether an output file is produced for this file.
    pub generate: bool,
    /// Top-level message names.
    pub messages: Vec<String>,
    /// Top-level enums.
    pub enums: Vec<EnumDescriptor>,
    pub comments: SourceComments,
}

impl SchemaFile {
    /// Create a schema file with no imports or declarations, marked for generation.
    pub fn new(
        path: impl Into<String>,
        go_import_path: GoImportPath,
        go_package_name: GoPackageName,
    ) -> Self {
        Self {
            path: path.into(),
            go_import_path,
            go_package_name,
            imports: Vec::new(),
            deprecated: false,
            generate: true,
            messages: Vec::new(),
            enums: Vec::new(),
            comments: SourceComments::default(),
        }
    }

    /// Add an import edge.
    pub fn with_import(mut self, import: ImportEdge) -> Self {
        self.imports.push(import);
        self
    }

    /// Add a top-level message.
    pub fn with_message(mut self, name: impl Into<String>) -> Self {
        self.messages.push(name.into());
        self
    }

    /// Add a top-level enum.
    pub fn with_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.enums.push(descriptor);
        self
    }

    /// Mark the file as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Keep the file resolvable as an import without generating output for it.
    pub fn dependency_only(mut self) -> Self {
        self.generate = false;
        self
    }

    /// Path without the `.proto` extension, the base of every generated filename.
    pub fn generated_filename_prefix(&self) -> &str {
        trim_proto_extension(&self.path)
    }

    /// Identifier of the file's schema-descriptor singleton (e.g., `File_b_widget_proto`).
    pub fn descriptor_ident(&self) -> GoIdent {
        self.go_import_path
            .ident(format!("File_{}", go_sanitized(&self.path)))
    }
}
