//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from descriptor set validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the descriptor set.
    pub descriptors: PathBuf,
    /// Number of files marked for generation.
    pub file_count: usize,
    /// Error messages.
    pub errors: Vec<String>,
    /// Warning messages.
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }

        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.warnings.is_empty() || !self.errors.is_empty() {
            out.newline();
        }

        if self.is_valid() {
            out.preformatted(&format!(
                "✓ {} is valid ({} file{})",
                self.descriptors.display(),
                self.file_count,
                if self.file_count == 1 { "" } else { "s" }
            ));
        }
    }
}
