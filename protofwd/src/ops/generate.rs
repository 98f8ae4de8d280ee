//! Generate operation - Go code generation from a descriptor set.

use std::path::Path;

use eyre::{Context, Result};
use protofwd_codegen::{Generator, Options, Severity};
use protofwd_core::{Overwrite, WriteResult};
use protofwd_descriptor::DescriptorSet;
use tracing::debug;

use crate::reports::{
    FileStatus, GenerateReport, GenerationResult, PreviewResult, WrittenFile, WrittenResult,
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Descriptor set the files are generated from.
    pub descriptors: &'a Path,
    /// Output directory for generated code.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// How existing files are treated.
    pub overwrite: Overwrite,
}

/// Execute the generate operation.
pub fn generate(set: DescriptorSet, options: Options, opts: GenerateOptions) -> Result<GenerateReport> {
    let output = Generator::new(set, options)
        .run()
        .wrap_err("Failed to generate code")?;

    let warnings = output
        .diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .map(|d| match &d.location {
            Some(loc) => format!("{}\n  --> {}", d.message, loc),
            None => d.message.clone(),
        })
        .collect();

    let result = if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: output.files.clone(),
        })
    } else {
        let files = output
            .write_all(opts.output_dir, opts.overwrite)
            .wrap_err_with(|| format!("Failed to write to {}", opts.output_dir.display()))?
            .into_iter()
            .map(|(file, result)| {
                debug!(file = %file.filename, ?result, "wrote output file");
                WrittenFile {
                    filename: file.filename.clone(),
                    source: file.source.clone(),
                    status: match result {
                        WriteResult::Written => FileStatus::Written,
                        WriteResult::Unchanged => FileStatus::Unchanged,
                    },
                }
            })
            .collect();

        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            files,
        })
    };

    Ok(GenerateReport {
        descriptors: opts.descriptors.to_path_buf(),
        supported_features: output.supported_features.bits(),
        warnings,
        result,
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, str::FromStr};

    use tempfile::TempDir;

    use super::*;

    const SET: &str = r#"
[[file]]
path = "a.proto"
go_package = "example.com/pkga"

[[file.imports]]
path = "b/widget.proto"
public = true

[[file]]
path = "b/widget.proto"
go_package = "example.com/pkgb"
messages = ["Widget"]
"#;

    fn opts<'a>(output_dir: &'a Path, dry_run: bool, overwrite: Overwrite) -> GenerateOptions<'a> {
        GenerateOptions {
            descriptors: Path::new("descriptors.toml"),
            output_dir,
            dry_run,
            overwrite,
        }
    }

    #[test]
    fn test_generate_writes_files() {
        let temp_dir = TempDir::new().unwrap();
        let set = DescriptorSet::from_str(SET).unwrap();

        let report = generate(
            set,
            Options::default(),
            opts(temp_dir.path(), false, Overwrite::Always),
        )
        .unwrap();

        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written files");
        };
        assert_eq!(written.files.len(), 2);
        assert_eq!(written.files[1].filename, "b/widget.generated.go");

        let a = fs::read_to_string(temp_dir.path().join("a.generated.go")).unwrap();
        assert!(a.contains("type Widget = pkgb.Widget\n"));
        assert!(temp_dir.path().join("b/widget.generated.go").exists());
    }

    #[test]
    fn test_generate_if_changed_reports_unchanged() {
        let temp_dir = TempDir::new().unwrap();

        let run = || {
            generate(
                DescriptorSet::from_str(SET).unwrap(),
                Options::default(),
                opts(temp_dir.path(), false, Overwrite::IfChanged),
            )
            .unwrap()
        };
        let statuses = |report: &GenerateReport| -> Vec<FileStatus> {
            match &report.result {
                GenerationResult::Written(written) => {
                    written.files.iter().map(|f| f.status).collect()
                }
                GenerationResult::Preview(_) => panic!("expected written files"),
            }
        };

        let first = run();
        assert!(statuses(&first).iter().all(|s| *s == FileStatus::Written));

        let second = run();
        assert!(statuses(&second).iter().all(|s| *s == FileStatus::Unchanged));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let set = DescriptorSet::from_str(SET).unwrap();

        let report = generate(
            set,
            Options::default(),
            opts(temp_dir.path(), true, Overwrite::Always),
        )
        .unwrap();

        let GenerationResult::Preview(preview) = &report.result else {
            panic!("expected a preview");
        };
        assert_eq!(preview.files.len(), 2);
        assert!(!temp_dir.path().join("a.generated.go").exists());
    }
}
