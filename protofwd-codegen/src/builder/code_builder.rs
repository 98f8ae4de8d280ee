//! Append-only code buffer with indentation tracking.

use super::Indent;

/// Builder for line-oriented source text.
///
/// Lines are only ever appended; the buffer is read back as a whole with
/// [`CodeBuilder::as_str`] or [`CodeBuilder::build`].
///
/// # Example
///
/// ```
/// use protofwd_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::go();
/// builder
///     .push_line("const (")
///     .push_indent()
///     .push_line("A = 1")
///     .push_dedent()
///     .push_line(")");
///
/// assert_eq!(builder.build(), "const (\n\tA = 1\n)\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with tab indentation.
    pub fn go() -> Self {
        Self::new(Indent::GO)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a comment, one `//` line per line of `text`.
    ///
    /// Text is used verbatim after the slashes, so schema comments keep their
    /// leading space (`" Foo"` becomes `// Foo`). A single trailing newline is
    /// ignored.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        let text = text.strip_suffix('\n').unwrap_or(text);
        for line in text.split('\n') {
            self.write_indent();
            self.buffer.push_str("//");
            self.buffer.push_str(line);
            self.buffer.push('\n');
        }
        self
    }

    /// Add `header`, the lines written by `f` one level deeper, then `close`.
    pub fn push_block<F>(&mut self, header: &str, close: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.push_line(header).push_indent();
        f(self);
        self.push_dedent().push_line(close)
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::go()
    }
}
