//! Cursor operators shared by every grammar rule: `Current`, `Lookahead`,
//! `CurrentEquals`, `Expected`, `Optional`, `Choice`, `AnchorPoint`.
//!
//! These mirror a recursive-descent parser's usual `at`/`eat`/`expect`/
//! `error_recover` family, but read directly from a flat `&[Token]` by
//! index instead of building a tree: this grammar's output *is* the token
//! list plus the symbol table, not a parse tree.

use crate::diagnostics::{Diagnostic, DiagnosticCode, Reporter, Severity};
use crate::token::{Token, TokenContext, TokenKind};

use super::Analyzer;

/// What `AnchorPoint` resynchronizes on: either a fixed set of lexemes or a
/// context tag. Context tags generalize better than enumerating every
/// keyword at each call site, per the design rationale this follows.
pub enum Anchor<'m> {
    Lexemes(&'m [&'m str]),
    Context(TokenContext),
}

impl<'a> Analyzer<'a> {
    pub fn current(&self) -> &Token {
        self.lookahead(0)
    }

    /// No bounds failure: clamps to the last token (always EOF).
    pub fn lookahead(&self, k: isize) -> &Token {
        let target = self.pos as isize + k;
        let clamped = target.clamp(0, self.tokens.len() as isize - 1);
        &self.tokens[clamped as usize]
    }

    pub fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    fn advance(&mut self) -> &Token {
        let token = &self.tokens[self.pos];
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Case-insensitive lexeme equality against one or more literals.
    pub fn current_equals(&self, literals: &[&str]) -> bool {
        literals.iter().any(|literal| self.current().lexeme_eq(literal))
    }

    pub fn current_is_kind(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    pub fn current_is_context(&self, context: TokenContext) -> bool {
        self.current().context == context
    }

    /// Must match `literal`; on mismatch, emit a diagnostic anchored at the
    /// previous token and do not consume. Returns the consumed token's
    /// lexeme on success.
    pub fn expected(&mut self, literal: &str, code: DiagnosticCode) -> Option<String> {
        if self.current().lexeme_eq(literal) {
            Some(self.advance().lexeme.to_string())
        } else {
            self.emit_expected(code, literal);
            None
        }
    }

    fn emit_expected(&mut self, code: DiagnosticCode, expected: &str) {
        let anchor = self.lookahead(-1);
        let diagnostic = Diagnostic::new(code, anchor.file, anchor.position)
            .with_severity(Severity::Error)
            .with_note(format!("expected '{expected}'"));
        self.report(diagnostic);
    }

    /// Consume if matching; otherwise a no-op (not an error).
    pub fn optional(&mut self, literal: &str) -> bool {
        if self.current().lexeme_eq(literal) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect one of several alternatives; on mismatch, emit a structured
    /// error naming all of them. Returns the matched alternative.
    pub fn choice<'m>(&mut self, alternatives: &[&'m str], code: DiagnosticCode) -> Option<&'m str> {
        for &alternative in alternatives {
            if self.current().lexeme_eq(alternative) {
                self.advance();
                return Some(alternative);
            }
        }
        let joined = alternatives.join(", ");
        let anchor = self.lookahead(-1);
        let diagnostic = Diagnostic::new(code, anchor.file, anchor.position)
            .with_severity(Severity::Error)
            .with_note(format!("expected one of: {joined}"));
        self.report(diagnostic);
        None
    }

    /// Advance until a token whose lexeme or context matches the anchor
    /// set, or EOF. Used after a fatal clause/statement error to resume at
    /// the next plausible boundary.
    pub fn anchor_point(&mut self, anchor: Anchor<'_>) {
        while !self.at_eof() {
            let matched = match &anchor {
                Anchor::Lexemes(literals) => self.current_equals(literals),
                Anchor::Context(context) => self.current_is_context(*context),
            };
            if matched {
                return;
            }
            self.advance();
        }
    }

    /// Consume the current token unconditionally (used by statement
    /// operand scanners that accept "anything until the next boundary").
    pub fn bump(&mut self) -> Token {
        self.advance().clone()
    }

    pub fn consume_matching(&mut self, literal: &str) -> bool {
        self.optional(literal)
    }
}
