//! Descriptor model consumed by the protofwd generator.
//!
//! A [`DescriptorSet`] is the pre-built, read-only input of one generation
//! run: every loaded [`SchemaFile`] keyed by its path, plus the version of the
//! schema compiler that produced them.
//!
//! ```text
//! descriptors.toml → protofwd-descriptor (loading) → protofwd-codegen
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod go_package;
mod parse;
mod set;

pub use error::{Error, Result, SourceContext};
pub use file::{
    CommentAnchor, Comments, EnumDescriptor, EnumValue, ImportEdge, SchemaFile, SourceComments,
};
pub use go_package::{GoIdent, GoImportPath, GoPackageName, parse_go_package};
pub use set::DescriptorSet;
