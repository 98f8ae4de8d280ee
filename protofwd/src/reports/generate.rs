//! Generate command report data structures.

use std::path::PathBuf;

use protofwd_codegen::OutputFile;
use serde::Serialize;

use super::output::{Output, Report};

/// Report data from code generation.
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    /// Descriptor set the files were generated from.
    pub descriptors: PathBuf,
    /// Feature bits the generator supports.
    pub supported_features: u64,
    /// Warning messages from the run.
    pub warnings: Vec<String>,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug, Serialize)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    pub files: Vec<WrittenFile>,
}

#[derive(Debug, Serialize)]
pub struct WrittenFile {
    pub filename: String,
    pub source: String,
    pub status: FileStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Written,
    Unchanged,
}

/// Result of a dry-run preview.
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<OutputFile>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.key_value("Generated", &written.output_dir.display().to_string());
        out.section(&format!("Files ({})", written.files.len()));
        for file in &written.files {
            match file.status {
                FileStatus::Written => out.added_item(&file.filename),
                FileStatus::Unchanged => out.unchanged_item(&file.filename),
            }
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.filename);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    fn written() -> GenerateReport {
        GenerateReport {
            descriptors: PathBuf::from("descriptors.toml"),
            supported_features: 1,
            warnings: vec!["import \"x.proto\" is not in the descriptor set".to_string()],
            result: GenerationResult::Written(WrittenResult {
                output_dir: PathBuf::from("out"),
                files: vec![
                    WrittenFile {
                        filename: "a.generated.go".to_string(),
                        source: "a.proto".to_string(),
                        status: FileStatus::Written,
                    },
                    WrittenFile {
                        filename: "b.generated.go".to_string(),
                        source: "b.proto".to_string(),
                        status: FileStatus::Unchanged,
                    },
                ],
            }),
        }
    }

    #[test]
    fn test_render_written() {
        let mut out = RecordingOutput::default();
        written().render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "warning: import \"x.proto\" is not in the descriptor set",
                "Generated: out",
                "Files (2):",
                "  + a.generated.go",
                "  = b.generated.go",
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(written()).unwrap();

        assert_eq!(json["supported_features"], 1);
        assert_eq!(json["result"]["mode"], "written");
        assert_eq!(json["result"]["files"][1]["status"], "unchanged");
    }

    #[test]
    fn test_render_preview() {
        let report = GenerateReport {
            result: GenerationResult::Preview(PreviewResult {
                files: vec![OutputFile {
                    filename: "a.generated.go".to_string(),
                    source: "a.proto".to_string(),
                    content: "package pkga\n".to_string(),
                }],
            }),
            warnings: Vec::new(),
            ..written()
        };
        let mut out = RecordingOutput::default();
        report.render(&mut out);

        assert_eq!(out.lines[0], "── a.generated.go ──");
        assert_eq!(out.lines[1], "package pkga\n");
        assert_eq!(out.lines[3], "1 files would be generated");
    }
}
