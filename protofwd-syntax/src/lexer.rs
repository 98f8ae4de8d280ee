//! Lexer for Go source.
//!
//! Wraps the `logos` generated lexer and applies Go's automatic semicolon
//! insertion: a newline (or a block comment spanning lines) becomes a
//! `Semicolon` token when the preceding token could end a statement, and is
//! dropped otherwise. A final `Semicolon` is inserted before end of input
//! under the same rule.

use logos::Logos;
use thiserror::Error;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    #[error("unexpected character at offset {0}")]
    UnexpectedChar(usize),
}

/// The lexer for Go source
pub struct Lexer<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, TokenKind>,
    last: Option<TokenKind>,
    finished: bool,
    errors: Vec<LexerError>,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            inner: TokenKind::lexer(source),
            last: None,
            finished: false,
            errors: Vec::new(),
        }
    }

    /// Get the source code
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Get any errors that occurred during lexing
    pub fn errors(&self) -> &[LexerError] {
        &self.errors
    }

    fn ends_statement(&self) -> bool {
        self.last.is_some_and(|kind| kind.inserts_semicolon())
    }

    fn emit(&mut self, kind: TokenKind, span: Span) -> Token {
        self.last = Some(kind);
        Token::new(kind, span)
    }

    /// Get the next token; returns `Eof` forever once input is exhausted
    pub fn next_token(&mut self) -> Token {
        let end = self.source.len();
        if self.finished {
            return Token::new(TokenKind::Eof, Span::point(end));
        }

        loop {
            match self.inner.next() {
                Some(Ok(kind)) => {
                    let range = self.inner.span();
                    let span = Span::new(range.start, range.end);
                    let is_line_break = match kind {
                        TokenKind::Newline => true,
                        TokenKind::BlockComment => span.text(self.source).contains('\n'),
                        _ => return self.emit(kind, span),
                    };
                    if is_line_break && self.ends_statement() {
                        return self.emit(TokenKind::Semicolon, span);
                    }
                }
                Some(Err(())) => {
                    // Skip invalid characters and record the error
                    let range = self.inner.span();
                    self.errors.push(LexerError::UnexpectedChar(range.start));
                }
                None => {
                    if self.ends_statement() {
                        return self.emit(TokenKind::Semicolon, Span::point(end));
                    }
                    self.finished = true;
                    return Token::new(TokenKind::Eof, Span::point(end));
                }
            }
        }
    }

    /// Collect all tokens (ending with `Eof`) into a vector
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexerError>) {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        (tokens, self.errors)
    }
}
