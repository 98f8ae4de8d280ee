//! Import bookkeeping for one generated Go file.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use protofwd_core::clean_package_name;
use protofwd_descriptor::{GoIdent, GoImportPath, GoPackageName};

use crate::builder::CodeBuilder;

/// One line of the rendered import block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    /// Local package name, `_` for link-only imports.
    pub name: String,
    pub path: GoImportPath,
}

/// Tracks the packages a generated file refers to.
///
/// Packages referenced through [`ImportSet::qualify`] get a local name;
/// packages added with [`ImportSet::import`] and never referenced are
/// imported for their side effects only (`_ "path"`).
///
/// # Example
///
/// ```
/// use protofwd_codegen::ImportSet;
/// use protofwd_descriptor::{GoImportPath, GoPackageName};
///
/// let own = GoImportPath::new("example.com/pkga");
/// let mut imports = ImportSet::new(own, &GoPackageName::new("pkga"));
///
/// let widget = GoImportPath::new("example.com/pkgb").ident("Widget");
/// assert_eq!(imports.qualify(&widget), "pkgb.Widget");
/// ```
#[derive(Debug, Clone)]
pub struct ImportSet {
    own: GoImportPath,
    /// Import path -> local package name, in first-use order
    packages: IndexMap<GoImportPath, String>,
    used_names: HashSet<String>,
    manual: IndexSet<GoImportPath>,
}

impl ImportSet {
    /// Create an import set for a file in package `own`.
    ///
    /// The file's own package name is reserved so that no import shadows it.
    pub fn new(own: GoImportPath, own_package: &GoPackageName) -> Self {
        let mut used_names = HashSet::new();
        used_names.insert(own_package.as_str().to_string());
        Self {
            own,
            packages: IndexMap::new(),
            used_names,
            manual: IndexSet::new(),
        }
    }

    /// Render an identifier as seen from this file, importing its package if needed.
    pub fn qualify(&mut self, ident: &GoIdent) -> String {
        if ident.import_path == self.own {
            return ident.name.clone();
        }
        format!("{}.{}", self.package_name(&ident.import_path), ident.name)
    }

    fn package_name(&mut self, path: &GoImportPath) -> String {
        if let Some(name) = self.packages.get(path) {
            return name.clone();
        }

        let base = clean_package_name(path.base());
        let mut name = base.clone();
        let mut suffix = 1;
        while self.used_names.contains(&name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }

        self.used_names.insert(name.clone());
        self.packages.insert(path.clone(), name.clone());
        name
    }

    /// Import a package whether or not any of its identifiers are referenced.
    pub fn import(&mut self, path: &GoImportPath) {
        if *path != self.own {
            self.manual.insert(path.clone());
        }
    }

    /// Local name of a referenced package.
    pub fn local_name(&self, path: &GoImportPath) -> Option<&str> {
        self.packages.get(path).map(String::as_str)
    }

    /// Check if the package is imported, referenced or not.
    pub fn contains(&self, path: &GoImportPath) -> bool {
        self.packages.contains_key(path) || self.manual.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty() && self.manual.is_empty()
    }

    /// All imports sorted by import path.
    pub fn lines(&self) -> Vec<ImportLine> {
        let referenced = self.packages.iter().map(|(path, name)| ImportLine {
            name: name.clone(),
            path: path.clone(),
        });
        let link_only = self
            .manual
            .iter()
            .filter(|path| !self.packages.contains_key(*path))
            .map(|path| ImportLine {
                name: "_".to_string(),
                path: path.clone(),
            });

        let mut lines: Vec<ImportLine> = referenced.chain(link_only).collect();
        lines.sort_by(|a, b| a.path.cmp(&b.path));
        lines
    }

    /// Render the `import ( ... )` block; nothing when there are no imports.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return String::new();
        }

        let mut builder = CodeBuilder::go();
        builder.push_block("import (", ")", |b| {
            for line in self.lines() {
                b.push_line(&format!("{} {}", line.name, line.path));
            }
        });
        builder.build()
    }
}
