//! The token record and its classification tags.
//!
//! A [`Token`] is a value type, not a tree node: the canonical intermediate
//! representation of the whole pipeline is an ordered `Vec<Token>`, mutated
//! in place by copybook expansion and walked by index by the analyzer.

use smol_str::SmolStr;

use crate::base::{FileIndex, Position};

/// What a token *is*, independent of where it appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Reserved,
    Identifier,
    Numeric,
    String,
    National,
    Boolean,
    HexString,
    Symbol,
    FigurativeLiteral,
    IntrinsicFunction,
    Device,
    Eof,
}

/// What a token is used *for* in this dialect's grammar, assigned by the
/// context map during classification. `None` means no special role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenContext {
    #[default]
    None,
    IsClause,
    IsStatement,
    IsDevice,
    IsFigurative,
    IsSymbol,
    IsEof,
}

/// One lexical unit of the normalized source stream.
///
/// Equality follows the dialect's own rules, not a derived field-by-field
/// comparison: reserved words and identifiers compare case-insensitively,
/// literals compare case-sensitively. See [`Token::lexeme_eq`].
#[derive(Debug, Clone)]
pub struct Token {
    pub lexeme: SmolStr,
    pub kind: TokenKind,
    pub context: TokenContext,
    pub position: Position,
    pub file: FileIndex,
}

impl Token {
    pub fn new(
        lexeme: impl Into<SmolStr>,
        kind: TokenKind,
        context: TokenContext,
        position: Position,
        file: FileIndex,
    ) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            context,
            position,
            file,
        }
    }

    /// The single EOF token appended once the entry-point stream (including
    /// any spliced-in copybooks) is exhausted.
    pub fn eof(file: FileIndex) -> Self {
        Self::new("", TokenKind::Eof, TokenContext::IsEof, Position::EOF, file)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Whether this token's kind compares case-insensitively by lexeme.
    /// Reserved words, identifiers, intrinsic names, and figurative literals
    /// are folded; string/national/boolean/hex literals and raw symbols are
    /// not (symbols have a fixed, already-canonical spelling).
    fn is_case_insensitive(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Reserved
                | TokenKind::Identifier
                | TokenKind::IntrinsicFunction
                | TokenKind::FigurativeLiteral
        )
    }

    /// Lexeme equality under this token's own case-sensitivity rule.
    pub fn lexeme_eq(&self, other: &str) -> bool {
        if self.is_case_insensitive() {
            self.lexeme.eq_ignore_ascii_case(other)
        } else {
            self.lexeme.as_str() == other
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.context == other.context && self.lexeme_eq(&other.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_compare_case_insensitively() {
        let a = Token::new(
            "MOVE",
            TokenKind::Reserved,
            TokenContext::IsStatement,
            Position::new(1, 8),
            FileIndex::ENTRY_POINT,
        );
        let b = Token::new(
            "move",
            TokenKind::Reserved,
            TokenContext::IsStatement,
            Position::new(2, 1),
            FileIndex::ENTRY_POINT,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn string_literals_compare_case_sensitively() {
        let a = Token::new(
            "\"Hi\"",
            TokenKind::String,
            TokenContext::None,
            Position::new(1, 1),
            FileIndex::ENTRY_POINT,
        );
        let b = Token::new(
            "\"HI\"",
            TokenKind::String,
            TokenContext::None,
            Position::new(1, 1),
            FileIndex::ENTRY_POINT,
        );
        assert_ne!(a, b);
    }

    #[test]
    fn eof_token_has_sentinel_position() {
        let eof = Token::eof(FileIndex::ENTRY_POINT);
        assert!(eof.is_eof());
        assert_eq!(eof.position, Position::EOF);
    }
}
