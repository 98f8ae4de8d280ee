//! Check operation - descriptor set validation.

use std::path::Path;

use protofwd_codegen::{Generator, Options, Severity};
use protofwd_descriptor::DescriptorSet;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Generates every file in memory and collects the resulting diagnostics.
pub fn check(set: &DescriptorSet, descriptors: &Path) -> CheckReport {
    let file_count = set.files_to_generate().count();
    let diagnostics = Generator::new(set.clone(), Options::default()).check();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in &diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Error => errors.push(msg),
            Severity::Warning => warnings.push(msg),
        }
    }

    CheckReport {
        descriptors: descriptors.to_path_buf(),
        file_count,
        errors,
        warnings,
    }
}
