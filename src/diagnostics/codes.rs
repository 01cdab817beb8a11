//! Numeric diagnostic codes.
//!
//! Codes follow a category-prefixed numbering: 1xx lexical, 2xx structural/
//! separator, 3xx declaration/data-division, 4xx procedure-division, 5xx
//! source-unit/identification. The three codes named explicitly in the
//! analyzer's contract — 25 (missing separator period), 30 (duplicate
//! root-level definition), 105 (missing USING phrase name) — keep those
//! exact numbers; the rest of the table extends the same family.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // 1xx: lexical
    InvalidCharacter,
    UnterminatedStringLiteral,
    InvalidNumericLiteral,

    // 2xx: structural / separator
    MissingSeparatorPeriod,
    UnexpectedToken,
    MissingKeyword,

    // 3xx: declaration / data division
    DuplicateRootLevelDefinition,
    DuplicateSymbol,
    LevelNumberOutOfSequence,
    ClauseConflict,
    MissingRequiredClause,
    DuplicateFileControlEntry,

    // 4xx: procedure division
    MissingUsingPhraseName,
    MissingReturningPhrase,
    StatementsInPrototype,

    // 5xx: source unit / identification
    IdentificationModifierConflict,
    MissingOrWrongEndMarker,
}

impl DiagnosticCode {
    pub fn number(self) -> u32 {
        match self {
            Self::InvalidCharacter => 10,
            Self::UnterminatedStringLiteral => 11,
            Self::InvalidNumericLiteral => 12,

            Self::MissingSeparatorPeriod => 25,
            Self::UnexpectedToken => 26,
            Self::MissingKeyword => 27,

            Self::DuplicateRootLevelDefinition => 30,
            Self::DuplicateSymbol => 31,
            Self::LevelNumberOutOfSequence => 32,
            Self::ClauseConflict => 33,
            Self::MissingRequiredClause => 34,
            Self::DuplicateFileControlEntry => 35,

            Self::MissingUsingPhraseName => 105,
            Self::MissingReturningPhrase => 106,
            Self::StatementsInPrototype => 107,

            Self::IdentificationModifierConflict => 150,
            Self::MissingOrWrongEndMarker => 151,
        }
    }

    pub fn default_headline(self) -> &'static str {
        match self {
            Self::InvalidCharacter => "invalid character in source",
            Self::UnterminatedStringLiteral => "unterminated string literal",
            Self::InvalidNumericLiteral => "invalid numeric literal",

            Self::MissingSeparatorPeriod => "missing separator period",
            Self::UnexpectedToken => "unexpected token",
            Self::MissingKeyword => "missing required keyword",

            Self::DuplicateRootLevelDefinition => "duplicate root-level definition",
            Self::DuplicateSymbol => "duplicate symbol definition",
            Self::LevelNumberOutOfSequence => "level number out of sequence",
            Self::ClauseConflict => "conflicting data-division clauses",
            Self::MissingRequiredClause => "missing required clause",
            Self::DuplicateFileControlEntry => "duplicate file-control entry",

            Self::MissingUsingPhraseName => "missing USING phrase name",
            Self::MissingReturningPhrase => "FUNCTION-ID without RETURNING",
            Self::StatementsInPrototype => "statements not allowed in a prototype",

            Self::IdentificationModifierConflict => "conflicting identification-division modifiers",
            Self::MissingOrWrongEndMarker => "missing or wrong-kind END marker",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_codes_keep_their_numbers() {
        assert_eq!(DiagnosticCode::MissingSeparatorPeriod.number(), 25);
        assert_eq!(DiagnosticCode::DuplicateRootLevelDefinition.number(), 30);
        assert_eq!(DiagnosticCode::MissingUsingPhraseName.number(), 105);
    }
}
