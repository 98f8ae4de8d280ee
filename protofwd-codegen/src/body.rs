//! Declarations written after the import-derived sections.
//!
//! Per-message and per-field code generation lives outside this crate; a
//! [`BodyTemplate`] is the seam where it plugs in.

use protofwd_descriptor::{GoImportPath, SchemaFile};

use crate::file::GeneratedFile;
use crate::options::RuntimeLibrary;

/// Writes the declarations of one schema file into its generated file.
pub trait BodyTemplate {
    fn write_body(&self, g: &mut GeneratedFile, file: &SchemaFile);
}

impl<F> BodyTemplate for F
where
    F: Fn(&mut GeneratedFile, &SchemaFile),
{
    fn write_body(&self, g: &mut GeneratedFile, file: &SchemaFile) {
        self(g, file)
    }
}

/// One placeholder declaration per top-level message and enum, plus the
/// file descriptor variable.
///
/// ```text
/// type Widget struct{}
///
/// type Color int32
///
/// const (
/// 	Color_RED   Color = 0
/// 	Color_GREEN Color = 1
/// )
///
/// var File_b_proto protoreflect.FileDescriptor
/// ```
#[derive(Debug, Clone)]
pub struct SkeletonBody {
    protoreflect: GoImportPath,
}

impl SkeletonBody {
    pub fn new(runtime: &RuntimeLibrary) -> Self {
        Self {
            protoreflect: runtime.protoreflect.clone(),
        }
    }
}

impl BodyTemplate for SkeletonBody {
    fn write_body(&self, g: &mut GeneratedFile, file: &SchemaFile) {
        for message in &file.messages {
            g.line(format!("type {} struct{{}}", message)).blank();
        }

        for descriptor in &file.enums {
            g.line(format!("type {} int32", descriptor.name)).blank();
            if descriptor.values.is_empty() {
                continue;
            }

            let names: Vec<String> = descriptor
                .values
                .iter()
                .map(|value| format!("{}_{}", descriptor.name, value.name))
                .collect();
            let width = names.iter().map(String::len).max().unwrap_or(0);

            g.line("const (").indent();
            for (name, value) in names.iter().zip(&descriptor.values) {
                g.line(format!(
                    "{:<width$} {} = {}",
                    name,
                    descriptor.name,
                    value.number,
                    width = width
                ));
            }
            g.dedent().line(")").blank();
        }

        let file_descriptor = g.qualified(&self.protoreflect.ident("FileDescriptor"));
        g.line(format!(
            "var {} {}",
            file.descriptor_ident().name,
            file_descriptor
        ))
        .blank();
    }
}
