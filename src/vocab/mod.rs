//! Process-wide vocabulary tables: reserved words, context-tagged keywords,
//! intrinsic function names, and figurative literals.
//!
//! All three tables are built once, behind a [`std::sync::LazyLock`], and
//! never mutated afterward — membership tests are ordinary `HashSet`/
//! `HashMap` lookups against an ASCII-case-folded view of the lexeme, per
//! the "hash map keyed by an ASCII-case-folded lexeme, initialized once"
//! design note that governs this whole module.

use std::sync::LazyLock;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::token::TokenContext;

/// Reserved words that carry no special statement/clause/device/figurative
/// role beyond being reserved (division/section headers, connective words,
/// level-adjacent keywords, etc).
const RESERVED_WORDS: &[&str] = &[
    "IDENTIFICATION", "DIVISION", "PROGRAM-ID", "FUNCTION-ID", "CLASS-ID",
    "INTERFACE-ID", "METHOD-ID", "OBJECT", "FACTORY", "ENVIRONMENT",
    "CONFIGURATION", "SECTION", "REPOSITORY", "INPUT-OUTPUT", "FILE-CONTROL",
    "I-O-CONTROL", "DATA", "WORKING-STORAGE", "LOCAL-STORAGE", "LINKAGE",
    "FILE", "REPORT", "SCREEN", "PROCEDURE", "DECLARATIVES",
    "END-DECLARATIVES", "USING", "RETURNING", "BY", "REFERENCE", "VALUE",
    "OPTIONAL", "AS", "IS", "ARE", "PROTOTYPE", "COMMON", "INITIAL",
    "RECURSIVE", "FINAL", "INHERITS", "FROM", "SELECT", "ASSIGN", "TO",
    "ORGANIZATION", "ACCESS", "MODE", "RECORD", "KEY", "STATUS", "EXPANDS",
    "PICTURE", "PIC", "USAGE", "OCCURS", "TIMES", "DEPENDING", "ON",
    "ASCENDING", "DESCENDING", "INDEXED", "REDEFINES", "RENAMES", "THROUGH",
    "THRU", "TYPEDEF", "STRONG", "EXTERNAL", "GLOBAL", "DYNAMIC", "LENGTH",
    "LIMIT", "BLANK", "WHEN", "ZERO", "ZEROS", "ZEROES", "JUSTIFIED",
    "RIGHT", "SYNCHRONIZED", "SYNC", "ALIGNED", "ANY", "BASED",
    "GROUP-USAGE", "BIT", "NATIONAL", "PROPERTY", "GET", "SET", "NO",
    "CONSTANT", "SAME", "TYPE", "END-PROGRAM", "END-FUNCTION", "END-CLASS",
    "END-INTERFACE", "END-METHOD", "END-FACTORY", "END-OBJECT", "PROGRAM",
    "FUNCTION", "CLASS", "INTERFACE", "METHOD", "NOT", "AND", "OR", "IF",
    "ELSE", "END-IF", "THEN", "EVALUATE", "WHEN-OTHER", "END-EVALUATE",
    "ALSO", "OTHER", "PERFORM", "END-PERFORM", "UNTIL", "VARYING", "TEST",
    "BEFORE", "AFTER", "STOP", "RUN", "GOBACK", "CALL", "END-CALL",
    "INVOKE", "END-INVOKE", "DISPLAY", "ACCEPT", "MOVE", "ADD", "SUBTRACT",
    "COMPUTE", "GIVING", "ROUNDED", "READ", "END-READ", "WRITE", "END-WRITE",
    "INTO", "AT", "END", "INVALID", "NEXT", "SIZE", "ERROR", "OVERFLOW",

    // SPECIAL-NAMES / environment-division configuration.
    "SPECIAL-NAMES", "CURRENCY", "SIGN", "DECIMAL-POINT", "COMMA",
    "ALPHABET", "SYMBOLIC", "ORDER", "LOCALE", "CURSOR", "CRT",
    "SCREEN-CONTROL", "LOCK", "COLLATING", "SEQUENCE", "SWITCH", "OFF",
    "UPSI", "SOURCE-COMPUTER", "OBJECT-COMPUTER", "MEMORY", "SEGMENT-LIMIT",
    "WITH", "DEBUGGING", "MODE", "CLASS-CONTROL",

    // FD / record-description clauses.
    "FD", "SD", "RD", "CD", "LABEL", "RECORDS", "STANDARD", "OMITTED",
    "BLOCK", "CONTAINS", "CHARACTERS", "RECORDING", "LINAGE", "FOOTING",
    "LINES", "TOP", "BOTTOM", "CODE-SET", "VALUE-OF", "DATA-RECORDS",
    "RECORD-AREA",

    // Sort/merge and sequential/relative/indexed access.
    "SORT", "MERGE", "SORT-MERGE", "RELEASE", "RETURN", "END-RETURN",
    "INPUT", "OUTPUT", "I-O", "EXTEND", "SEQUENTIAL", "RANDOM", "RELATIVE",
    "ALTERNATE", "DUPLICATES", "FILE-ID",

    // Procedure-division statements not already listed.
    "MULTIPLY", "DIVIDE", "END-MULTIPLY", "END-DIVIDE", "END-ADD",
    "END-SUBTRACT", "END-COMPUTE", "END-STRING", "END-UNSTRING",
    "END-SEARCH", "STRING", "UNSTRING", "DELIMITED", "DELIMITER", "COUNT",
    "TALLYING", "REPLACING", "INITIALIZE", "FILLER", "INSPECT",
    "CONVERTING", "LEADING", "TRAILING", "FIRST", "EXAMINE", "TRANSFORM",
    "OPEN", "CLOSE", "REWIND", "REEL", "UNIT", "FOR", "REMOVAL", "DISABLE",
    "ENABLE", "PURGE", "RECEIVE", "SEND", "MESSAGE", "TERMINAL", "CANCEL",
    "CHAIN", "COMMIT", "ROLLBACK", "VALIDATE", "RESUME", "RETRY", "JSON",
    "XML", "PARSE", "GENERATE", "ENCODING", "NAME", "ATTRIBUTES",
    "VALIDATING", "SUPPRESS", "REWRITE", "DELETE",

    // Relational/class conditions.
    "GREATER", "LESS", "THAN", "EQUAL", "POSITIVE", "NEGATIVE", "NUMERIC",
    "ALPHABETIC", "ALPHABETIC-LOWER", "ALPHABETIC-UPPER", "CONDITION",

    // SCREEN SECTION.
    "AUTO", "BACKGROUND-COLOR", "FOREGROUND-COLOR", "BELL", "BLINK",
    "ERASE", "FULL", "HIGHLIGHT", "LOWLIGHT", "PROMPT", "REQUIRED",
    "SECURE", "UNDERLINE", "LINE", "COLUMN", "COL", "PLUS", "REVERSE-VIDEO",

    // REPORT WRITER.
    "REPORTS", "PAGE", "HEADING", "LAST", "DETAIL", "CONTROL", "SUM",
    "INITIATE", "TERMINATE", "PRESENT", "ABSENT", "GROUP",

    // CALL/linkage operands and USAGE storage types.
    "CONTENT", "ADDRESS", "OF", "IN", "NATIONAL-EDITED", "ALPHANUMERIC",
    "ALPHANUMERIC-EDITED", "NUMERIC-EDITED", "BOOLEAN", "OBJECT-REFERENCE",
    "DATA-POINTER", "FUNCTION-POINTER", "PROGRAM-POINTER", "POINTER",
    "INDEX", "BINARY", "BINARY-CHAR", "BINARY-SHORT", "BINARY-LONG",
    "BINARY-DOUBLE", "PACKED-DECIMAL", "COMP", "COMPUTATIONAL", "COMP-1", "COMP-2",
    "COMP-3", "COMP-4", "COMP-5", "FLOAT-SHORT", "FLOAT-LONG",
    "FLOAT-EXTENDED", "MESSAGE-TAG", "SELF", "SUPER", "NULLS",
];

/// Keywords tagged with a COBOL grammar role beyond "reserved". Each entry
/// here is still reserved (it also counts as a reserved-word hit); the
/// context map additionally records *what kind* of reserved word it is.
const CONTEXT_WORDS: &[(&str, TokenContext)] = &[
    // Clauses (DATA DIVISION)
    ("PICTURE", TokenContext::IsClause),
    ("PIC", TokenContext::IsClause),
    ("USAGE", TokenContext::IsClause),
    ("VALUE", TokenContext::IsClause),
    ("OCCURS", TokenContext::IsClause),
    ("REDEFINES", TokenContext::IsClause),
    ("RENAMES", TokenContext::IsClause),
    ("TYPEDEF", TokenContext::IsClause),
    ("EXTERNAL", TokenContext::IsClause),
    ("GLOBAL", TokenContext::IsClause),
    ("DYNAMIC", TokenContext::IsClause),
    ("BLANK", TokenContext::IsClause),
    ("JUSTIFIED", TokenContext::IsClause),
    ("SYNCHRONIZED", TokenContext::IsClause),
    ("SYNC", TokenContext::IsClause),
    ("ALIGNED", TokenContext::IsClause),
    ("GROUP-USAGE", TokenContext::IsClause),
    ("PROPERTY", TokenContext::IsClause),
    ("BASED", TokenContext::IsClause),
    ("ANY", TokenContext::IsClause),
    ("CONSTANT", TokenContext::IsClause),
    ("SAME", TokenContext::IsClause),
    ("TYPE", TokenContext::IsClause),
    ("SIGN", TokenContext::IsClause),
    ("LOCK", TokenContext::IsClause),
    ("LINAGE", TokenContext::IsClause),
    ("CODE-SET", TokenContext::IsClause),
    // Statements (PROCEDURE DIVISION)
    ("DISPLAY", TokenContext::IsStatement),
    ("ACCEPT", TokenContext::IsStatement),
    ("MOVE", TokenContext::IsStatement),
    ("ADD", TokenContext::IsStatement),
    ("SUBTRACT", TokenContext::IsStatement),
    ("MULTIPLY", TokenContext::IsStatement),
    ("DIVIDE", TokenContext::IsStatement),
    ("COMPUTE", TokenContext::IsStatement),
    ("IF", TokenContext::IsStatement),
    ("EVALUATE", TokenContext::IsStatement),
    ("PERFORM", TokenContext::IsStatement),
    ("CALL", TokenContext::IsStatement),
    ("INVOKE", TokenContext::IsStatement),
    ("READ", TokenContext::IsStatement),
    ("WRITE", TokenContext::IsStatement),
    ("REWRITE", TokenContext::IsStatement),
    ("DELETE", TokenContext::IsStatement),
    ("OPEN", TokenContext::IsStatement),
    ("CLOSE", TokenContext::IsStatement),
    ("STOP", TokenContext::IsStatement),
    ("GOBACK", TokenContext::IsStatement),
    ("EXIT", TokenContext::IsStatement),
    ("CONTINUE", TokenContext::IsStatement),
    ("INITIALIZE", TokenContext::IsStatement),
    ("SET", TokenContext::IsStatement),
    ("STRING", TokenContext::IsStatement),
    ("UNSTRING", TokenContext::IsStatement),
    ("SEARCH", TokenContext::IsStatement),
    ("SORT", TokenContext::IsStatement),
    ("MERGE", TokenContext::IsStatement),
    ("RAISE", TokenContext::IsStatement),
    ("ALLOCATE", TokenContext::IsStatement),
    ("FREE", TokenContext::IsStatement),
    ("INSPECT", TokenContext::IsStatement),
    ("CANCEL", TokenContext::IsStatement),
    ("CHAIN", TokenContext::IsStatement),
    ("COMMIT", TokenContext::IsStatement),
    ("ROLLBACK", TokenContext::IsStatement),
    ("VALIDATE", TokenContext::IsStatement),
    ("RECEIVE", TokenContext::IsStatement),
    ("SEND", TokenContext::IsStatement),
    ("DISABLE", TokenContext::IsStatement),
    ("ENABLE", TokenContext::IsStatement),
    ("PURGE", TokenContext::IsStatement),
    ("INITIATE", TokenContext::IsStatement),
    ("TERMINATE", TokenContext::IsStatement),
    // Devices
    ("CONSOLE", TokenContext::IsDevice),
    ("SYSIN", TokenContext::IsDevice),
    ("SYSOUT", TokenContext::IsDevice),
    ("SYSPUNCH", TokenContext::IsDevice),
    ("PRINTER", TokenContext::IsDevice),
    ("DISPLAY-1", TokenContext::IsDevice),
    ("ENVIRONMENT-NAME", TokenContext::IsDevice),
    ("ENVIRONMENT-VALUE", TokenContext::IsDevice),
    ("ARGUMENT-NUMBER", TokenContext::IsDevice),
    ("ARGUMENT-VALUE", TokenContext::IsDevice),
    ("C01", TokenContext::IsDevice),
    ("C02", TokenContext::IsDevice),
    ("C03", TokenContext::IsDevice),
    ("CSP", TokenContext::IsDevice),
    ("S01", TokenContext::IsDevice),
    ("S02", TokenContext::IsDevice),
];

/// Intrinsic (COBOL `FUNCTION`) names.
const INTRINSIC_FUNCTIONS: &[&str] = &[
    "ABS", "ACOS", "ANNUITY", "ASIN", "ATAN", "BYTE-LENGTH", "CHAR",
    "CHAR-NATIONAL", "COMBINED-DATETIME", "CONCATENATE", "COS", "CURRENT-DATE",
    "DATE-OF-INTEGER", "DATE-TO-YYYYMMDD", "DAY-OF-INTEGER", "DAY-TO-YYYYDDD",
    "EXCEPTION-FILE", "EXCEPTION-LOCATION", "EXCEPTION-STATEMENT",
    "EXCEPTION-STATUS", "EXP", "EXP10", "FACTORIAL", "FRACTION-PART",
    "INTEGER", "INTEGER-OF-DATE", "INTEGER-OF-DAY", "INTEGER-PART", "LENGTH",
    "LOCALE-DATE", "LOCALE-TIME", "LOG", "LOG10", "LOWER-CASE", "MAX",
    "MEAN", "MEDIAN", "MIDRANGE", "MIN", "MOD", "NUMVAL", "NUMVAL-C",
    "NUMVAL-F", "ORD", "ORD-MAX", "ORD-MIN", "PRESENT-VALUE", "RANDOM",
    "RANGE", "REM", "REVERSE", "SIN", "SQRT", "STANDARD-DEVIATION", "SUM",
    "TAN", "TEST-DATE-YYYYMMDD", "TEST-DAY-YYYYDDD", "TRIM", "UPPER-CASE",
    "VARIANCE", "WHEN-COMPILED", "YEAR-TO-YYYY",

    // 2014-standard additions: Unicode/national, module introspection,
    // formatted-datetime, and locale/monetary facilities.
    "BOOLEAN-OF-INTEGER", "CONTENT-OF", "CONVERT", "DISPLAY-OF", "E",
    "FORMATTED-CURRENT-DATE", "FORMATTED-DATE", "FORMATTED-DATETIME",
    "FORMATTED-TIME", "HIGHEST-ALGEBRAIC", "INTEGER-OF-FORMATTED-DATE",
    "LOCALE-COMPARE", "LOWEST-ALGEBRAIC", "MODULE-CALLER-ID", "MODULE-DATE",
    "MODULE-FORMATTED-DATE", "MODULE-ID", "MODULE-PATH", "MODULE-SOURCE",
    "MODULE-TIME", "MONETARY-DECIMAL-POINT", "MONETARY-THOUSANDS-SEPARATOR",
    "NATIONAL-OF", "NUMERIC-DECIMAL-POINT", "NUMERIC-THOUSANDS-SEPARATOR",
    "PI", "SECONDS-FROM-FORMATTED-TIME", "SECONDS-PAST-MIDNIGHT",
    "STANDARD-COMPARE", "SUBSTITUTE", "SUBSTITUTE-CASE",
    "TEST-FORMATTED-DATETIME", "TEST-NUMVAL", "TEST-NUMVAL-C",
    "TEST-NUMVAL-F", "ULENGTH", "UPOS", "USUBSTR", "USUPPLEMENTARY",
    "UVALID", "UWIDTH", "XML-ENCODE",
];

/// Figurative literal names, mapped to a canonical spelling (COBOL allows
/// several spellings of the same constant, e.g. ZERO/ZEROS/ZEROES).
const FIGURATIVE_LITERALS: &[(&str, &str)] = &[
    ("ZERO", "ZERO"),
    ("ZEROS", "ZERO"),
    ("ZEROES", "ZERO"),
    ("SPACE", "SPACE"),
    ("SPACES", "SPACE"),
    ("HIGH-VALUE", "HIGH-VALUE"),
    ("HIGH-VALUES", "HIGH-VALUE"),
    ("LOW-VALUE", "LOW-VALUE"),
    ("LOW-VALUES", "LOW-VALUE"),
    ("QUOTE", "QUOTE"),
    ("QUOTES", "QUOTE"),
    ("ALL", "ALL"),
    ("NULL", "NULL"),
    ("NULLS", "NULL"),
];

static RESERVED_SET: LazyLock<FxHashSet<&'static str>> = LazyLock::new(|| {
    let mut set: FxHashSet<&'static str> = RESERVED_WORDS.iter().copied().collect();
    set.extend(CONTEXT_WORDS.iter().map(|(word, _)| *word));
    set
});

static CONTEXT_MAP: LazyLock<FxHashMap<&'static str, TokenContext>> =
    LazyLock::new(|| CONTEXT_WORDS.iter().copied().collect());

static INTRINSIC_SET: LazyLock<FxHashSet<&'static str>> =
    LazyLock::new(|| INTRINSIC_FUNCTIONS.iter().copied().collect());

static FIGURATIVE_MAP: LazyLock<FxHashMap<&'static str, &'static str>> =
    LazyLock::new(|| FIGURATIVE_LITERALS.iter().copied().collect());

/// Case-insensitively test whether `word` is a COBOL reserved word.
pub fn is_reserved(word: &str) -> bool {
    lookup_case_insensitive(&RESERVED_SET, word).is_some()
}

/// Look up `word`'s grammar-context tag, if it carries one.
pub fn context_of(word: &str) -> Option<TokenContext> {
    let upper = word.to_ascii_uppercase();
    CONTEXT_MAP.get(upper.as_str()).copied()
}

/// Case-insensitively test whether `word` is an intrinsic function name.
pub fn is_intrinsic(word: &str) -> bool {
    lookup_case_insensitive(&INTRINSIC_SET, word).is_some()
}

/// Look up `word`'s canonical figurative-literal spelling, if it is one.
pub fn figurative_canonical(word: &str) -> Option<&'static str> {
    let upper = word.to_ascii_uppercase();
    FIGURATIVE_MAP.get(upper.as_str()).copied()
}

fn lookup_case_insensitive(set: &FxHashSet<&'static str>, word: &str) -> Option<&'static str> {
    let upper = word.to_ascii_uppercase();
    set.get(upper.as_str()).copied()
}
