//! Output buffer bound to one schema file.

use protofwd_descriptor::{GoIdent, GoImportPath, SchemaFile};
use protofwd_syntax::parse_file;

use crate::builder::CodeBuilder;
use crate::error::{GenerateError, ImportChain};
use crate::imports::ImportSet;

/// The generated Go file for one schema file.
///
/// Lines are appended with [`GeneratedFile::line`] and friends. Imports are
/// not written inline: they are collected in an [`ImportSet`] and inserted
/// after the `package` clause by [`GeneratedFile::materialize`].
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    filename: String,
    source: String,
    import_path: GoImportPath,
    chain: ImportChain,
    imports: ImportSet,
    code: CodeBuilder,
    detached: bool,
    materialized: bool,
}

impl GeneratedFile {
    /// Open an empty buffer for `file`, reached through `chain`.
    pub fn open(filename: impl Into<String>, file: &SchemaFile, chain: ImportChain) -> Self {
        Self {
            filename: filename.into(),
            source: file.path.clone(),
            import_path: file.go_import_path.clone(),
            chain,
            imports: ImportSet::new(file.go_import_path.clone(), &file.go_package_name),
            code: CodeBuilder::go(),
            detached: false,
            materialized: false,
        }
    }

    /// Output filename (e.g., `b/widget.generated.go`).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Path of the schema file this buffer is generated from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn import_path(&self) -> &GoImportPath {
        &self.import_path
    }

    pub fn chain(&self) -> &ImportChain {
        &self.chain
    }

    pub fn imports(&self) -> &ImportSet {
        &self.imports
    }

    /// Exclude this buffer from the run's output; it can still be materialized.
    pub fn mark_detached(&mut self) {
        self.detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn is_materialized(&self) -> bool {
        self.materialized
    }

    /// Append a line at the current indentation.
    pub fn line(&mut self, s: impl AsRef<str>) -> &mut Self {
        self.code.push_line(s.as_ref());
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.code.push_blank();
        self
    }

    /// Append `//` comment lines.
    pub fn comment(&mut self, text: &str) -> &mut Self {
        self.code.push_comment(text);
        self
    }

    pub fn indent(&mut self) -> &mut Self {
        self.code.push_indent();
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.code.push_dedent();
        self
    }

    /// Import a package even if nothing in it is referenced.
    pub fn import(&mut self, path: &GoImportPath) -> &mut Self {
        self.imports.import(path);
        self
    }

    /// Render an identifier as seen from this file (e.g., `pkgb.Widget`).
    pub fn qualified(&mut self, ident: &GoIdent) -> String {
        self.imports.qualify(ident)
    }

    /// Render the final text of the file.
    ///
    /// The buffer is parsed to locate the `package` clause, and the import
    /// block is inserted right after it. Trailing blank lines are dropped.
    pub fn materialize(&mut self) -> Result<String, GenerateError> {
        let source = self.code.as_str();
        let parsed = parse_file(source)
            .map_err(|error| GenerateError::syntax(&self.source, &self.chain, source, error))?;

        let package_end = parsed.package.span.end;
        let line_end = source[package_end..]
            .find('\n')
            .map_or(source.len(), |offset| package_end + offset + 1);
        let (head, rest) = source.split_at(line_end);
        let rest = rest.strip_prefix('\n').unwrap_or(rest);

        let mut content = String::with_capacity(source.len() + 256);
        content.push_str(head);
        if !head.ends_with('\n') {
            content.push('\n');
        }
        let imports = self.imports.render();
        if !imports.is_empty() {
            content.push('\n');
            content.push_str(&imports);
        }
        if !rest.is_empty() {
            content.push('\n');
            content.push_str(rest);
        }

        let trimmed = content.trim_end_matches('\n').len();
        content.truncate(trimmed);
        content.push('\n');

        self.materialized = true;
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use protofwd_descriptor::GoPackageName;
    use protofwd_syntax::ParseError;

    use super::*;

    fn open() -> GeneratedFile {
        let file = SchemaFile::new(
            "a.proto",
            GoImportPath::new("example.com/pkga"),
            GoPackageName::new("pkga"),
        );
        GeneratedFile::open("a.generated.go", &file, ImportChain::new("a.proto"))
    }

    #[test]
    fn test_imports_inserted_after_package_clause() {
        let mut g = open();
        g.line("// source: a.proto").blank();
        g.line("package pkga").blank();
        let widget = g.qualified(&GoImportPath::new("example.com/pkgb").ident("Widget"));
        g.line(format!("type Widget = {}", widget)).blank();

        assert_eq!(
            g.materialize().unwrap(),
            "// source: a.proto\n\npackage pkga\n\nimport (\n\tpkgb \"example.com/pkgb\"\n)\n\ntype Widget = pkgb.Widget\n"
        );
        assert!(g.is_materialized());
    }

    #[test]
    fn test_no_import_block_without_imports() {
        let mut g = open();
        g.line("package pkga").blank().blank();
        assert_eq!(g.materialize().unwrap(), "package pkga\n");
    }

    #[test]
    fn test_import_block_at_end_of_file() {
        let mut g = open();
        g.line("package pkga");
        g.import(&GoImportPath::new("example.com/pkgc"));
        assert_eq!(
            g.materialize().unwrap(),
            "package pkga\n\nimport (\n\t_ \"example.com/pkgc\"\n)\n"
        );
    }

    #[test]
    fn test_materialize_is_repeatable() {
        let mut g = open();
        g.line("package pkga").blank().line("type T int");
        let first = g.materialize().unwrap();
        assert_eq!(g.materialize().unwrap(), first);
    }

    #[test]
    fn test_syntax_error_names_file_and_position() {
        let mut g = open();
        g.line("package pkga").blank().line("type = broken");
        match g.materialize() {
            Err(GenerateError::Syntax {
                file,
                chain,
                line,
                column,
                source,
            }) => {
                assert_eq!(file, "a.proto");
                assert_eq!(chain.to_string(), "a.proto");
                assert_eq!((line, column), (3, 6));
                assert!(matches!(source, ParseError::UnexpectedToken { .. }));
            }
            other => panic!("expected a syntax error, got {:?}", other),
        }
        assert!(!g.is_materialized());
    }

    #[test]
    fn test_detached_flag() {
        let mut g = open();
        assert!(!g.is_detached());
        g.mark_detached();
        assert!(g.is_detached());
        assert_eq!(g.filename(), "a.generated.go");
        assert_eq!(g.source(), "a.proto");
    }
}
