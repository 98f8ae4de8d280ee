//! Go import paths and package names.

use std::fmt;

use protofwd_core::clean_package_name;
use serde::Serialize;

/// Import path of a generated Go package (the output-module identity of a schema file).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GoImportPath(String);

impl GoImportPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last element of the import path (e.g., "example.com/foo/pkgb" -> "pkgb")
    pub fn base(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Reference a Go identifier declared in this package.
    pub fn ident(&self, name: impl Into<String>) -> GoIdent {
        GoIdent {
            import_path: self.clone(),
            name: name.into(),
        }
    }
}

impl fmt::Display for GoImportPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Name used in the `package` clause of a generated Go file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GoPackageName(String);

impl GoPackageName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GoPackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A Go identifier qualified by the package that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GoIdent {
    pub import_path: GoImportPath,
    pub name: String,
}

/// Split a `go_package` option of the form `"import/path;name"`.
///
/// When the package name is omitted it is derived from the last element of
/// the import path. Returns the reason when the option is unusable.
pub fn parse_go_package(value: &str) -> Result<(GoImportPath, GoPackageName), &'static str> {
    let (path, name) = match value.split_once(';') {
        Some((path, name)) => (path, Some(name)),
        None => (value, None),
    };

    if path.is_empty() {
        return Err("the import path must not be empty");
    }

    let import_path = GoImportPath::new(path);
    let name = match name {
        Some("") => return Err("the package name after ';' must not be empty"),
        Some(name) => GoPackageName::new(name),
        None => GoPackageName::new(clean_package_name(import_path.base())),
    };
    Ok((import_path, name))
}
