//! Core utilities and types for the protofwd generator.
//!
//! This crate provides fundamental types and utilities used across
//! the protofwd crates.

mod file;
mod go;
mod version;

// File operations
pub use file::{File, Overwrite, WriteResult};
// Go naming helpers
pub use go::{clean_package_name, go_sanitized, is_exported, is_go_keyword, trim_proto_extension};
pub use version::{CompilerVersion, Version};
