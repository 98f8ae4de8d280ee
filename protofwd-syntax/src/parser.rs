//! Parser for the top-level structure of Go source.
//!
//! A recursive descent parser over the token stream. Expressions are not
//! parsed into trees: their tokens are collected up to the end of the spec
//! (balanced brackets skipped as a unit) and classified into an [`ExprShape`].

use thiserror::Error;

use crate::ast::{
    Decl, DeclKeyword, Expr, ExprShape, FuncDecl, GenDecl, Ident, ImportSpec, SourceFile, Spec,
    TypeSpec, ValueSpec,
};
use crate::lexer::{Lexer, LexerError};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lexer(#[from] LexerError),

    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: TokenKind,
        span: Span,
    },

    #[error("unexpected end of file: expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("mismatched closing {found}")]
    Unbalanced { found: TokenKind, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lexer(LexerError::UnexpectedChar(pos)) => Span::point(*pos),
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::UnexpectedEof { span, .. } => *span,
            ParseError::Unbalanced { span, .. } => *span,
        }
    }
}

/// Parse result
pub type ParseResult<T> = Result<T, ParseError>;

/// The parser for Go source
pub struct Parser<'src> {
    source: &'src str,
    /// Always ends with an `Eof` token
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Create a new parser, failing on the first lexer error
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let (tokens, errors) = Lexer::new(source).tokenize();
        if let Some(error) = errors.into_iter().next() {
            return Err(error.into());
        }
        Ok(Self {
            source,
            tokens,
            pos: 0,
        })
    }

    /// Get the source code
    pub fn source(&self) -> &'src str {
        self.source
    }

    fn current(&self) -> Token {
        self.tokens[self.pos]
    }

    fn previous(&self) -> Token {
        self.tokens[self.pos.saturating_sub(1)]
    }

    /// Peek at the nth token ahead (0 = current)
    fn peek_nth(&self, n: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)]
    }

    /// Advance to the next token, never past `Eof`
    fn advance(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume token if it matches
    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume token if it matches, otherwise error
    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.to_string()))
        }
    }

    fn unexpected(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            ParseError::UnexpectedEof {
                expected: expected.into(),
                span: token.span,
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.into(),
                found: token.kind,
                span: token.span,
            }
        }
    }

    fn text(&self, token: &Token) -> &'src str {
        token.text(self.source)
    }

    fn skip_terminators(&mut self) {
        while self.consume(TokenKind::Semicolon) {}
    }

    fn expect_terminator(&mut self) -> ParseResult<()> {
        if self.consume(TokenKind::Semicolon) || self.is_at_end() {
            Ok(())
        } else {
            Err(self.unexpected(TokenKind::Semicolon.to_string()))
        }
    }

    // ============ Top-level parsing ============

    /// Parse a whole source file
    pub fn parse_file(&mut self) -> ParseResult<SourceFile> {
        self.skip_terminators();
        self.expect(TokenKind::Package)?;
        let package = self.parse_ident()?;
        self.expect_terminator()?;

        let mut decls = Vec::new();
        loop {
            self.skip_terminators();
            if self.is_at_end() {
                break;
            }
            decls.push(self.parse_decl()?);
            self.expect_terminator()?;
        }

        Ok(SourceFile { package, decls })
    }

    fn parse_decl(&mut self) -> ParseResult<Decl> {
        let keyword = match self.current().kind {
            TokenKind::Import => DeclKeyword::Import,
            TokenKind::Const => DeclKeyword::Const,
            TokenKind::Var => DeclKeyword::Var,
            TokenKind::Type => DeclKeyword::Type,
            TokenKind::Func => return self.parse_func().map(Decl::Func),
            _ => return Err(self.unexpected("declaration")),
        };
        self.parse_gen_decl(keyword).map(Decl::Gen)
    }

    fn parse_gen_decl(&mut self, keyword: DeclKeyword) -> ParseResult<GenDecl> {
        let start = self.advance().span;
        let mut specs = Vec::new();

        let grouped = self.consume(TokenKind::LParen);
        if grouped {
            loop {
                self.skip_terminators();
                if self.consume(TokenKind::RParen) {
                    break;
                }
                if self.is_at_end() {
                    return Err(self.unexpected(TokenKind::RParen.to_string()));
                }
                specs.push(self.parse_spec(keyword)?);
                if !self.check(TokenKind::RParen) && !self.consume(TokenKind::Semicolon) {
                    return Err(self.unexpected("';' or ')'"));
                }
            }
        } else {
            specs.push(self.parse_spec(keyword)?);
        }

        Ok(GenDecl {
            keyword,
            grouped,
            specs,
            span: start.merge(self.previous().span),
        })
    }

    fn parse_spec(&mut self, keyword: DeclKeyword) -> ParseResult<Spec> {
        match keyword {
            DeclKeyword::Import => self.parse_import_spec().map(Spec::Import),
            DeclKeyword::Type => self.parse_type_spec().map(Spec::Type),
            DeclKeyword::Const | DeclKeyword::Var => self.parse_value_spec().map(Spec::Value),
        }
    }

    fn parse_ident(&mut self) -> ParseResult<Ident> {
        let token = self.expect(TokenKind::Ident)?;
        Ok(Ident {
            name: self.text(&token).to_string(),
            span: token.span,
        })
    }

    fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let start = self.current().span;
        let name = if self.check(TokenKind::Ident) {
            Some(self.parse_ident()?)
        } else if self.check(TokenKind::Dot) {
            let dot = self.advance();
            Some(Ident {
                name: ".".to_string(),
                span: dot.span,
            })
        } else {
            None
        };

        let path = match self.current().kind {
            TokenKind::String | TokenKind::RawString => self.advance(),
            _ => return Err(self.unexpected("import path")),
        };
        let quoted = self.text(&path);

        Ok(ImportSpec {
            name,
            path: quoted[1..quoted.len() - 1].to_string(),
            span: start.merge(path.span),
        })
    }

    fn parse_type_spec(&mut self) -> ParseResult<TypeSpec> {
        let name = self.parse_ident()?;
        if self.check(TokenKind::LBracket) && self.at_type_parameters() {
            self.skip_group()?;
        }
        let alias = self.consume(TokenKind::Assign);
        let ty = self.parse_expr(&[])?;
        Ok(TypeSpec { name, alias, ty })
    }

    /// Tell `type T[P any] ...` apart from the array type in `type T [N]int`.
    fn at_type_parameters(&self) -> bool {
        self.peek_nth(1).kind == TokenKind::Ident
            && matches!(
                self.peek_nth(2).kind,
                TokenKind::Ident | TokenKind::Comma | TokenKind::Interface
            )
    }

    fn parse_value_spec(&mut self) -> ParseResult<ValueSpec> {
        let mut names = vec![self.parse_ident()?];
        while self.consume(TokenKind::Comma) {
            names.push(self.parse_ident()?);
        }

        let ty = if self.check(TokenKind::Assign) || self.at_spec_end() {
            None
        } else {
            Some(self.parse_expr(&[TokenKind::Assign])?)
        };

        let mut values = Vec::new();
        if self.consume(TokenKind::Assign) {
            values.push(self.parse_expr(&[TokenKind::Comma])?);
            while self.consume(TokenKind::Comma) {
                values.push(self.parse_expr(&[TokenKind::Comma])?);
            }
        }

        Ok(ValueSpec { names, ty, values })
    }

    fn at_spec_end(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Semicolon | TokenKind::RParen | TokenKind::Eof
        )
    }

    fn parse_func(&mut self) -> ParseResult<FuncDecl> {
        let start = self.advance().span;
        let receiver = if self.check(TokenKind::LParen) {
            Some(self.skip_group()?)
        } else {
            None
        };
        let name = self.parse_ident()?;

        // Signature up to the body, or up to the terminator for body-less declarations
        loop {
            match self.current().kind {
                TokenKind::Semicolon | TokenKind::Eof => break,
                TokenKind::LBrace => {
                    let in_type_literal = matches!(
                        self.previous().kind,
                        TokenKind::Struct | TokenKind::Interface
                    );
                    self.skip_group()?;
                    if !in_type_literal {
                        break;
                    }
                }
                kind if kind.is_open() => {
                    self.skip_group()?;
                }
                kind if kind.is_close() => return Err(self.unexpected("function body")),
                _ => {
                    self.advance();
                }
            }
        }

        Ok(FuncDecl {
            name,
            receiver,
            span: start.merge(self.previous().span),
        })
    }

    // ============ Expressions ============

    /// Consume a bracketed group starting at the current open token
    fn skip_group(&mut self) -> ParseResult<Span> {
        let open = self.advance();
        let mut stack = vec![open.kind];

        while let Some(&top) = stack.last() {
            let token = self.advance();
            match token.kind {
                TokenKind::Eof => {
                    return Err(ParseError::UnexpectedEof {
                        expected: closing(top).to_string(),
                        span: token.span,
                    });
                }
                kind if kind.is_open() => stack.push(kind),
                kind if kind.is_close() => {
                    if kind != closing(top) {
                        return Err(ParseError::Unbalanced {
                            found: kind,
                            span: token.span,
                        });
                    }
                    stack.pop();
                    if stack.is_empty() {
                        return Ok(open.span.merge(token.span));
                    }
                }
                _ => {}
            }
        }

        Ok(open.span)
    }

    /// Collect an expression up to the end of the spec or a depth-0 `stop` token
    fn parse_expr(&mut self, stop: &[TokenKind]) -> ParseResult<Expr> {
        let start = self.pos;
        loop {
            let kind = self.current().kind;
            if matches!(kind, TokenKind::Semicolon | TokenKind::Eof)
                || kind.is_close()
                || stop.contains(&kind)
            {
                break;
            }
            if kind.is_open() {
                self.skip_group()?;
            } else {
                self.advance();
            }
        }

        let tokens = &self.tokens[start..self.pos];
        let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
            return Err(self.unexpected("expression"));
        };
        Ok(Expr {
            span: first.span.merge(last.span),
            shape: self.classify(tokens),
        })
    }

    /// Reduce a balanced token sequence to the shape of its outermost node
    fn classify(&self, tokens: &[Token]) -> ExprShape {
        let mut i = match tokens[0].kind {
            TokenKind::Ident => 1,
            TokenKind::LParen => group_end(tokens, 0),
            kind if kind.is_literal() => 1,
            // Type literals, unary and pointer operators
            _ => return ExprShape::Other,
        };

        let mut shape = if i == 1 && tokens[0].kind == TokenKind::Ident {
            ExprShape::Ident(self.text(&tokens[0]).to_string())
        } else {
            ExprShape::Other
        };

        while i < tokens.len() {
            match tokens[i].kind {
                TokenKind::Dot => match tokens.get(i + 1) {
                    Some(name) if name.kind == TokenKind::Ident => {
                        let qualifier = Span::new(tokens[0].span.start, tokens[i - 1].span.end);
                        shape = ExprShape::Selector {
                            qualifier: qualifier.text(self.source).to_string(),
                            name: self.text(name).to_string(),
                        };
                        i += 2;
                    }
                    // Type assertion `x.(T)`
                    Some(open) if open.kind == TokenKind::LParen => {
                        shape = ExprShape::Other;
                        i = group_end(tokens, i + 1);
                    }
                    _ => return ExprShape::Other,
                },
                // Calls, index expressions and composite literals
                kind if kind.is_open() => {
                    shape = ExprShape::Other;
                    i = group_end(tokens, i);
                }
                // Binary operators and anything else
                _ => return ExprShape::Other,
            }
        }

        shape
    }
}

fn closing(open: TokenKind) -> TokenKind {
    match open {
        TokenKind::LParen => TokenKind::RParen,
        TokenKind::LBracket => TokenKind::RBracket,
        _ => TokenKind::RBrace,
    }
}

/// Index just past the group opened at `start`
fn group_end(tokens: &[Token], start: usize) -> usize {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(start) {
        if token.kind.is_open() {
            depth += 1;
        } else if token.kind.is_close() {
            depth -= 1;
            if depth == 0 {
                return i + 1;
            }
        }
    }
    tokens.len()
}
