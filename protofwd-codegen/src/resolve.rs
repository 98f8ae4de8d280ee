//! Import resolution for one schema file.

use protofwd_descriptor::SchemaFile;
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::error::GenerateError;
use crate::file::GeneratedFile;
use crate::forward::PublicImportForwarder;
use crate::generator::{EmitContext, Generator};

/// Walks the imports of a schema file in declaration order.
///
/// For each import:
/// 1. targets missing from the descriptor set are skipped (partial builds),
/// 2. targets generated into the same Go package need no import,
/// 3. every other non-weak target is imported, referenced or not,
/// 4. public targets additionally get a forwarding block.
pub(crate) struct ImportResolver<'g> {
    generator: &'g Generator,
}

impl<'g> ImportResolver<'g> {
    pub(crate) fn new(generator: &'g Generator) -> Self {
        Self { generator }
    }

    pub(crate) fn resolve(
        &self,
        file: &SchemaFile,
        g: &mut GeneratedFile,
        ctx: &mut EmitContext<'_>,
    ) -> Result<(), GenerateError> {
        for edge in &file.imports {
            let Some(target) = self.generator.descriptor_set().get(edge.path()) else {
                if ctx.detached {
                    debug!(file = %file.path, import = edge.path(), "skipping missing dependency");
                } else {
                    warn!(file = %file.path, import = edge.path(), "skipping missing dependency");
                    ctx.diagnostics.push(
                        Diagnostic::warning(
                            "resolve",
                            format!("import {:?} is not in the descriptor set", edge.path()),
                        )
                        .at(&file.path),
                    );
                }
                continue;
            };

            if target.go_import_path == file.go_import_path {
                debug!(file = %file.path, import = edge.path(), "same Go package, no import");
                continue;
            }

            if !edge.is_weak() {
                g.import(&target.go_import_path);
            }

            if edge.is_public() {
                PublicImportForwarder::new(self.generator).forward(g, target, ctx)?;
            }
        }

        Ok(())
    }
}
