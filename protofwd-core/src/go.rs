//! Naming rules of the Go target language.

use std::sync::LazyLock;

use regex::Regex;

/// Runes a Go identifier may not contain: anything but letters (`L`) and
/// decimal digits (`Nd`). Same classes as the identifier token of
/// `protofwd-syntax`.
static NON_IDENT_RUNE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{Nd}]").expect("static pattern"));

static LETTER_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}").expect("static pattern"));

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Check if a name is a Go keyword
pub fn is_go_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Check if a Go identifier is exported (its first rune is an uppercase letter)
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Sanitize a string into a valid Go identifier.
///
/// Every rune that is not a letter or decimal digit becomes `_`, and the
/// result is prefixed with `_` when it collides with a keyword or does not
/// start with a letter (e.g., "b/widget.proto" -> "b_widget_proto",
/// "1x" -> "_1x", "v²" -> "v_").
pub fn go_sanitized(s: &str) -> String {
    let sanitized = NON_IDENT_RUNE.replace_all(s, "_").into_owned();

    if is_go_keyword(&sanitized) || !LETTER_START.is_match(&sanitized) {
        format!("_{}", sanitized)
    } else {
        sanitized
    }
}

/// Derive a Go package name from an arbitrary string (usually an import path base)
pub fn clean_package_name(name: &str) -> String {
    go_sanitized(name)
}

/// Strip the `.proto` (or `.protodevel`) extension from a schema path
pub fn trim_proto_extension(path: &str) -> &str {
    path.strip_suffix(".proto")
        .or_else(|| path.strip_suffix(".protodevel"))
        .unwrap_or(path)
}
