//! Descriptor set parsing from TOML.
//!
//! ```toml
//! compiler_version = "3.21.12"
//!
//! [[file]]
//! path = "a.proto"
//! go_package = "example.com/pkga;pkga"
//! messages = ["Order"]
//!
//! [[file.imports]]
//! path = "b.proto"
//! public = true
//! ```

use std::collections::HashMap;

use protofwd_core::CompilerVersion;
use serde::Deserialize;
use toml::Spanned;

use crate::{
    Comments, DescriptorSet, EnumDescriptor, EnumValue, ImportEdge, Result, SchemaFile,
    SourceComments, error::SourceContext, parse_go_package,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSet {
    compiler_version: Option<CompilerVersion>,
    #[serde(default, rename = "file")]
    files: Vec<RawFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFile {
    path: Spanned<String>,
    go_package: Spanned<String>,
    #[serde(default)]
    deprecated: bool,
    #[serde(default = "default_generate")]
    generate: bool,
    #[serde(default)]
    imports: Vec<Spanned<RawImport>>,
    #[serde(default)]
    messages: Vec<String>,
    #[serde(default)]
    enums: Vec<RawEnum>,
    #[serde(default)]
    comments: RawComments,
}

fn default_generate() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawImport {
    path: String,
    #[serde(default)]
    weak: bool,
    #[serde(default)]
    public: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnum {
    name: String,
    #[serde(default)]
    values: Vec<RawEnumValue>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnumValue {
    name: String,
    number: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawComments {
    syntax: Option<RawComment>,
    package: Option<RawComment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawComment {
    #[serde(default)]
    leading_detached: Vec<String>,
    leading: Option<String>,
}

impl From<RawComment> for Comments {
    fn from(raw: RawComment) -> Self {
        Self {
            leading_detached: raw.leading_detached,
            leading: raw.leading,
        }
    }
}

/// Parse a descriptor set from content with the given filename for error reporting.
pub fn parse_descriptor_set(content: &str, filename: &str) -> Result<DescriptorSet> {
    let ctx = SourceContext::new(content, filename);
    let raw: RawSet = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;

    let mut set = DescriptorSet::new();
    if let Some(version) = raw.compiler_version {
        set = set.with_compiler_version(version);
    }

    let mut seen: HashMap<String, std::ops::Range<usize>> = HashMap::new();
    for raw_file in raw.files {
        let path_span = raw_file.path.span();
        let path = raw_file.path.get_ref().clone();
        if let Some(first) = seen.get(&path) {
            return Err(ctx.duplicate_file_error(path, first.clone(), path_span));
        }
        seen.insert(path, path_span);

        set.insert(lower_file(&ctx, raw_file)?);
    }

    Ok(set)
}

fn lower_file(ctx: &SourceContext, raw: RawFile) -> Result<SchemaFile> {
    let path = raw.path.into_inner();

    let go_package_span = raw.go_package.span();
    let go_package = raw.go_package.into_inner();
    let (import_path, package_name) = parse_go_package(&go_package)
        .map_err(|reason| ctx.invalid_go_package_error(&go_package, reason, go_package_span))?;

    let mut imports = Vec::with_capacity(raw.imports.len());
    for spanned in raw.imports {
        let span = spanned.span();
        let import = spanned.into_inner();
        let edge = match (import.weak, import.public) {
            (true, true) => {
                return Err(ctx.weak_public_import_error(&path, import.path, span));
            }
            (true, false) => ImportEdge::weak(import.path),
            (false, true) => ImportEdge::public(import.path),
            (false, false) => ImportEdge::new(import.path),
        };
        imports.push(edge);
    }

    let enums = raw
        .enums
        .into_iter()
        .map(|e| EnumDescriptor {
            name: e.name,
            values: e
                .values
                .into_iter()
                .map(|v| EnumValue {
                    name: v.name,
                    number: v.number,
                })
                .collect(),
        })
        .collect();

    let comments = SourceComments {
        syntax: raw.comments.syntax.map(Comments::from).unwrap_or_default(),
        package: raw.comments.package.map(Comments::from).unwrap_or_default(),
    };

    Ok(SchemaFile {
        path,
        go_import_path: import_path,
        go_package_name: package_name,
        imports,
        deprecated: raw.deprecated,
        generate: raw.generate,
        messages: raw.messages,
        enums,
        comments,
    })
}
