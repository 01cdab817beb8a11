//! Converts one normalized line into tokens, classifying each identifier-
//! shaped lexeme against the vocabulary tables.

use smol_str::SmolStr;

use crate::base::{FileIndex, Position};
use crate::diagnostics::{Diagnostic, DiagnosticCode, Reporter, Severity};
use crate::token::{Token, TokenContext, TokenKind};
use crate::vocab;

/// Multi-character symbols must be matched before their single-character
/// prefixes (`**` before `*`, `>>` before `>`, and so on).
const MULTI_CHAR_SYMBOLS: &[&str] = &["**", ">>", "<>", ">=", "<=", "::"];
const SINGLE_CHAR_SYMBOLS: &[char] = &[
    '+', '-', '*', '=', '/', '$', ',', ';', '.', '(', ')', '>', '<', '&', '_',
];

pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Self
    }

    /// Lex one normalized line, appending tokens to `tokens`.
    pub fn lex_line(
        &self,
        line: &[u8],
        line_number: u32,
        file: FileIndex,
        tokens: &mut Vec<Token>,
        reporter: &mut dyn Reporter,
    ) {
        let text = String::from_utf8_lossy(line);
        let chars: Vec<char> = text.chars().collect();
        let mut column = 0usize;

        while column < chars.len() {
            let c = chars[column];

            if c.is_whitespace() {
                column += 1;
                continue;
            }

            if matches!(c, '"' | '\'') {
                column = self.lex_string_literal(
                    &chars, column, line_number, file, tokens, reporter, None,
                );
                continue;
            }

            if matches!(c, 'N' | 'n' | 'B' | 'b' | 'X' | 'x')
                && chars.get(column + 1).is_some_and(|&next| next == '"' || next == '\'')
            {
                let prefix = c.to_ascii_uppercase();
                column = self.lex_string_literal(
                    &chars,
                    column + 1,
                    line_number,
                    file,
                    tokens,
                    reporter,
                    Some(prefix),
                );
                continue;
            }

            if c.is_ascii_digit() || ((c == '+' || c == '-') && starts_numeric(&chars, column)) {
                column = self.lex_numeric_literal(&chars, column, line_number, file, tokens);
                continue;
            }

            if c.is_alphabetic() {
                column = self.lex_word(&chars, column, line_number, file, tokens);
                continue;
            }

            if let Some((symbol, width)) = match_symbol(&chars, column) {
                tokens.push(Token::new(
                    symbol,
                    TokenKind::Symbol,
                    TokenContext::IsSymbol,
                    Position::new(line_number as i32, (column + 1) as i32),
                    file,
                ));
                column += width;
                continue;
            }

            reporter.report(
                Diagnostic::new(
                    DiagnosticCode::InvalidCharacter,
                    file,
                    Position::new(line_number as i32, (column + 1) as i32),
                )
                .with_severity(Severity::Recovery)
                .with_note(format!("unrecognized character '{c}'")),
            );
            column += 1;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn lex_string_literal(
        &self,
        chars: &[char],
        start: usize,
        line_number: u32,
        file: FileIndex,
        tokens: &mut Vec<Token>,
        reporter: &mut dyn Reporter,
        prefix: Option<char>,
    ) -> usize {
        let quote = chars[start];
        let mut end = start + 1;
        let mut terminated = false;
        while end < chars.len() {
            if chars[end] == quote {
                if chars.get(end + 1) == Some(&quote) {
                    end += 2;
                    continue;
                }
                terminated = true;
                end += 1;
                break;
            }
            end += 1;
        }

        let lexeme_start = prefix.map(|_| start - 1).unwrap_or(start);
        let lexeme: String = chars[lexeme_start..end].iter().collect();
        let kind = match prefix {
            Some('N') => TokenKind::National,
            Some('B') => TokenKind::Boolean,
            Some('X') => TokenKind::HexString,
            _ => TokenKind::String,
        };

        if !terminated {
            reporter.report(
                Diagnostic::new(
                    DiagnosticCode::UnterminatedStringLiteral,
                    file,
                    Position::new(line_number as i32, (lexeme_start + 1) as i32),
                )
                .with_severity(Severity::Recovery),
            );
        }

        tokens.push(Token::new(
            lexeme,
            kind,
            TokenContext::None,
            Position::new(line_number as i32, (lexeme_start + 1) as i32),
            file,
        ));
        end
    }

    fn lex_numeric_literal(
        &self,
        chars: &[char],
        start: usize,
        line_number: u32,
        file: FileIndex,
        tokens: &mut Vec<Token>,
    ) -> usize {
        let mut end = start;
        if matches!(chars[end], '+' | '-') {
            end += 1;
        }
        while chars.get(end).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
        }
        if chars.get(end) == Some(&'.') && chars.get(end + 1).is_some_and(|c| c.is_ascii_digit()) {
            end += 1;
            while chars.get(end).is_some_and(|c| c.is_ascii_digit()) {
                end += 1;
            }
        }
        if matches!(chars.get(end), Some('E') | Some('e')) {
            let mut exponent_end = end + 1;
            if matches!(chars.get(exponent_end), Some('+') | Some('-')) {
                exponent_end += 1;
            }
            let digits_start = exponent_end;
            while chars.get(exponent_end).is_some_and(|c| c.is_ascii_digit()) {
                exponent_end += 1;
            }
            if exponent_end > digits_start {
                end = exponent_end;
            }
        }

        let lexeme: String = chars[start..end].iter().collect();
        tokens.push(Token::new(
            lexeme,
            TokenKind::Numeric,
            TokenContext::None,
            Position::new(line_number as i32, (start + 1) as i32),
            file,
        ));
        end
    }

    fn lex_word(
        &self,
        chars: &[char],
        start: usize,
        line_number: u32,
        file: FileIndex,
        tokens: &mut Vec<Token>,
    ) -> usize {
        let mut end = start + 1;
        while chars
            .get(end)
            .is_some_and(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        {
            end += 1;
        }

        let lexeme: String = chars[start..end].iter().collect();
        let (kind, context) = classify(&lexeme);
        tokens.push(Token::new(
            lexeme,
            kind,
            context,
            Position::new(line_number as i32, (start + 1) as i32),
            file,
        ));
        end
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Reserved set -> context map -> intrinsic set -> figurative map -> plain
/// identifier, in that priority order.
fn classify(lexeme: &str) -> (TokenKind, TokenContext) {
    if vocab::is_reserved(lexeme) {
        let context = vocab::context_of(lexeme).unwrap_or(TokenContext::None);
        return (TokenKind::Reserved, context);
    }
    if vocab::is_intrinsic(lexeme) {
        return (TokenKind::IntrinsicFunction, TokenContext::None);
    }
    if vocab::figurative_canonical(lexeme).is_some() {
        return (TokenKind::FigurativeLiteral, TokenContext::IsFigurative);
    }
    (TokenKind::Identifier, TokenContext::None)
}

fn starts_numeric(chars: &[char], column: usize) -> bool {
    chars.get(column + 1).is_some_and(|c| c.is_ascii_digit())
}

fn match_symbol(chars: &[char], column: usize) -> Option<(SmolStr, usize)> {
    for candidate in MULTI_CHAR_SYMBOLS {
        let width = candidate.chars().count();
        if chars[column..].iter().take(width).eq(candidate.chars().collect::<Vec<_>>().iter()) {
            return Some((SmolStr::new(candidate), width));
        }
    }
    let c = chars[column];
    if SINGLE_CHAR_SYMBOLS.contains(&c) {
        return Some((SmolStr::new(c.to_string()), 1));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingReporter;

    fn lex(line: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut reporter = CollectingReporter::new();
        Lexer::new().lex_line(line.as_bytes(), 1, FileIndex::ENTRY_POINT, &mut tokens, &mut reporter);
        tokens
    }

    #[test]
    fn reserved_word_is_classified_reserved() {
        let tokens = lex("MOVE");
        assert_eq!(tokens[0].kind, TokenKind::Reserved);
        assert_eq!(tokens[0].context, TokenContext::IsStatement);
    }

    #[test]
    fn unknown_word_is_identifier() {
        let tokens = lex("CUSTOMER-NAME");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn string_literal_round_trips_quotes() {
        let tokens = lex("\"Hi\"");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"Hi\"");
    }

    #[test]
    fn unterminated_string_emits_diagnostic() {
        let mut tokens = Vec::new();
        let mut reporter = CollectingReporter::new();
        Lexer::new().lex_line(b"\"oops", 1, FileIndex::ENTRY_POINT, &mut tokens, &mut reporter);
        assert_eq!(reporter.diagnostics().len(), 1);
    }

    #[test]
    fn numeric_literal_with_decimal_and_exponent() {
        let tokens = lex("-12.5E+3");
        assert_eq!(tokens[0].kind, TokenKind::Numeric);
        assert_eq!(tokens[0].lexeme, "-12.5E+3");
    }

    #[test]
    fn double_star_is_one_symbol_token() {
        let tokens = lex("A ** B");
        assert_eq!(tokens[1].lexeme, "**");
    }

    #[test]
    fn national_prefix_is_tagged_national() {
        let tokens = lex("N\"X\"");
        assert_eq!(tokens[0].kind, TokenKind::National);
    }
}
