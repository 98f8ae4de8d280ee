//! Generation options.

use std::ops::BitOr;

use protofwd_descriptor::{GoImportPath, SchemaFile};
use serde::Serialize;

/// Generator version baked into the version assertions.
pub const GEN_VERSION: u32 = 20;

/// Optional language features the generator advertises to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Features(u64);

impl Features {
    pub const NONE: Self = Self(0);
    /// `optional` fields in proto3 files.
    pub const PROTO3_OPTIONAL: Self = Self(1);

    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, other: Features) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Features {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Runtime packages referenced by generated code.
///
/// Kept configurable for build environments that vendor or relocate the
/// protobuf runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeLibrary {
    /// Package providing `EnforceVersion`, `MinVersion` and `MaxVersion`.
    pub protoimpl: GoImportPath,
    /// Package providing `FileDescriptor`.
    pub protoreflect: GoImportPath,
    pub gen_version: u32,
}

impl Default for RuntimeLibrary {
    fn default() -> Self {
        Self {
            protoimpl: GoImportPath::new("google.golang.org/protobuf/runtime/protoimpl"),
            protoreflect: GoImportPath::new("google.golang.org/protobuf/reflect/protoreflect"),
            gen_version: GEN_VERSION,
        }
    }
}

/// Options of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Emit the `// versions:` comment and the version assertion block.
    pub generate_version_markers: bool,
    /// Reported to the host; no effect on the generated files.
    pub supported_features: Features,
    /// Inserted between the file stem and the extension.
    pub filename_suffix: String,
    pub file_extension: String,
    pub runtime: RuntimeLibrary,
    /// Version printed in the `// versions:` block.
    pub tool_version: String,
}

impl Options {
    /// Output filename of a schema file, e.g. `b/widget.proto` -> `b/widget.generated.go`.
    pub fn output_filename(&self, file: &SchemaFile) -> String {
        let prefix = file.generated_filename_prefix();
        if self.filename_suffix.is_empty() {
            format!("{}.{}", prefix, self.file_extension)
        } else {
            format!(
                "{}.{}.{}",
                prefix, self.filename_suffix, self.file_extension
            )
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            generate_version_markers: true,
            supported_features: Features::PROTO3_OPTIONAL,
            filename_suffix: "generated".to_string(),
            file_extension: "go".to_string(),
            runtime: RuntimeLibrary::default(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use protofwd_descriptor::GoPackageName;

    use super::*;

    fn schema(path: &str) -> SchemaFile {
        SchemaFile::new(
            path,
            GoImportPath::new("example.com/pkgb"),
            GoPackageName::new("pkgb"),
        )
    }

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert!(options.generate_version_markers);
        assert_eq!(options.supported_features, Features::PROTO3_OPTIONAL);
        assert_eq!(options.runtime.gen_version, 20);
        assert_eq!(
            options.runtime.protoimpl.as_str(),
            "google.golang.org/protobuf/runtime/protoimpl"
        );
    }

    #[test]
    fn test_output_filename() {
        let options = Options::default();
        assert_eq!(
            options.output_filename(&schema("b/widget.proto")),
            "b/widget.generated.go"
        );

        let options = Options {
            filename_suffix: String::new(),
            ..Options::default()
        };
        assert_eq!(options.output_filename(&schema("b.proto")), "b.go");
    }

    #[test]
    fn test_features() {
        let features = Features::NONE | Features::PROTO3_OPTIONAL;
        assert!(features.contains(Features::PROTO3_OPTIONAL));
        assert!(!Features::NONE.contains(Features::PROTO3_OPTIONAL));
        assert_eq!(Features::from_bits(3).bits(), 3);
    }
}
