//! Property-style tests for the compiler's cross-cutting invariants,
//! exercised over representative inputs with `rstest`. Parametrized
//! representative cases, not generative/`proptest`-style inputs.

use std::collections::HashMap;
use std::path::Path;

use cobol_frontend::base::FileIndex;
use cobol_frontend::copybook::{CopybookExpander, FileProvider, FileProviderError};
use cobol_frontend::diagnostics::CollectingReporter;
use cobol_frontend::format::{CompileOptions, FormatNormalizer};
use cobol_frontend::lexer::Lexer;
use cobol_frontend::symtab::{SourceUnitKind, SourceUnitSignature, SymbolTable};
use cobol_frontend::token::{Token, TokenContext, TokenKind};
use cobol_frontend::vocab;
use cobol_frontend::{compile, CompileRequest};
use rstest::rstest;

struct MapProvider(HashMap<&'static str, &'static str>);
impl FileProvider for MapProvider {
    fn read(&self, path: &Path) -> Result<Vec<u8>, FileProviderError> {
        path.to_str()
            .and_then(|name| self.0.get(name))
            .map(|text| text.as_bytes().to_vec())
            .ok_or_else(|| FileProviderError { path: path.to_path_buf(), message: "not found".into() })
    }
}

fn lex_one_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut reporter = CollectingReporter::new();
    Lexer::new().lex_line(line.as_bytes(), 1, FileIndex::ENTRY_POINT, &mut tokens, &mut reporter);
    tokens
}

// 1. EOF singleton: every compilation's token list ends in exactly one EOF.
#[rstest]
#[case("       IDENTIFICATION DIVISION.\n       PROGRAM-ID. A.\n       END PROGRAM A.\n")]
#[case("       IDENTIFICATION DIVISION.\n       PROGRAM-ID. B.\n")]
#[case("")]
#[case("this is not even close to cobol\n")]
fn eof_is_a_singleton_at_the_end(#[case] source: &'static str) {
    let provider = MapProvider(HashMap::from([("main.cob", source)]));
    let mut reporter = CollectingReporter::new();
    let outcome = compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");

    assert_eq!(outcome.tokens.iter().filter(|t| t.is_eof()).count(), 1);
    assert!(outcome.tokens.last().unwrap().is_eof());
}

// 2. Reserved classification stability: every reserved lexeme classifies
// as Reserved, with the context map's tag (or None).
#[rstest]
#[case("DISPLAY", TokenContext::IsStatement)]
#[case("MOVE", TokenContext::IsStatement)]
#[case("PICTURE", TokenContext::IsClause)]
#[case("OCCURS", TokenContext::IsClause)]
#[case("PROGRAM-ID", TokenContext::None)]
#[case("END-IF", TokenContext::None)]
fn reserved_words_classify_with_their_context_tag(#[case] word: &str, #[case] expected: TokenContext) {
    let tokens = lex_one_line(word);
    assert_eq!(tokens[0].kind, TokenKind::Reserved);
    assert_eq!(tokens[0].context, expected);
}

// 3. Case insensitivity: a reserved/identifier-legal string and its
// uppercase form classify identically.
#[rstest]
#[case("move")]
#[case("Display")]
#[case("customer-name")]
#[case("picture")]
fn lexing_is_case_insensitive_for_reserved_and_identifier_text(#[case] lower: &str) {
    let upper = lower.to_ascii_uppercase();
    let lower_tokens = lex_one_line(lower);
    let upper_tokens = lex_one_line(&upper);
    assert_eq!(lower_tokens[0].kind, upper_tokens[0].kind);
    assert_eq!(lower_tokens[0].context, upper_tokens[0].context);
}

// 4. Copybook idempotence: expanding a token list with no COPY in it
// leaves it unchanged.
#[test]
fn copybook_expansion_is_idempotent_when_nothing_to_expand() {
    struct NoProvider;
    impl FileProvider for NoProvider {
        fn read(&self, path: &Path) -> Result<Vec<u8>, FileProviderError> {
            Err(FileProviderError { path: path.to_path_buf(), message: "never called".into() })
        }
    }

    let mut tokens = lex_one_line("DISPLAY \"X\"");
    let before = tokens.clone_lexemes();
    let provider = NoProvider;
    let mut options = CompileOptions::new("main.cob".into());
    let mut reporter = CollectingReporter::new();
    CopybookExpander::new(&provider).expand(&mut tokens, &mut options, &mut reporter);
    assert_eq!(tokens.clone_lexemes(), before);
}

trait CloneLexemes {
    fn clone_lexemes(&self) -> Vec<String>;
}
impl CloneLexemes for Vec<Token> {
    fn clone_lexemes(&self) -> Vec<String> {
        self.iter().map(|t| t.lexeme.to_string()).collect()
    }
}

// 5. Level-stack discipline: after any record entry closes, the level
// stack is empty (covered directly against `AnalyzerState` in
// `analyzer::state::tests`; here we assert the externally observable
// consequence — a well-formed multi-level record compiles without a
// level-sequence diagnostic).
#[test]
fn a_well_nested_record_closes_its_level_stack_without_diagnostics() {
    let source = concat!(
        "       IDENTIFICATION DIVISION.\n",
        "       PROGRAM-ID. LVL.\n",
        "       DATA DIVISION.\n",
        "       WORKING-STORAGE SECTION.\n",
        "       01 REC.\n",
        "           05 CHILD-A PIC 9(2).\n",
        "           05 CHILD-B.\n",
        "               10 GRANDCHILD PIC X(1).\n",
        "       01 SECOND-REC PIC 9(1).\n",
        "       PROCEDURE DIVISION.\n",
        "           STOP RUN.\n",
        "       END PROGRAM LVL.\n",
    );
    let provider = MapProvider(HashMap::from([("main.cob", source)]));
    let mut reporter = CollectingReporter::new();
    compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");
    assert!(reporter
        .diagnostics()
        .iter()
        .all(|d| d.code != cobol_frontend::diagnostics::DiagnosticCode::LevelNumberOutOfSequence));
}

// 6. Signature uniqueness: a second `add_global` under the same
// fully-qualified name never succeeds.
#[test]
fn duplicate_global_signatures_never_both_succeed() {
    let mut table = SymbolTable::new();
    assert!(table
        .add_global("X".into(), SourceUnitSignature::new("X", SourceUnitKind::Program))
        .is_ok());
    assert!(table
        .add_global("X".into(), SourceUnitSignature::new("X", SourceUnitKind::Program))
        .is_err());
    assert_eq!(table.globals_len(), 1);
}

// 7. Format-detection determinism: detecting the same first non-blank
// line twice yields the same decision.
#[rstest]
#[case("       IDENTIFICATION DIVISION.")]
#[case(">>SOURCE FORMAT IS FREE")]
#[case("      * a comment line")]
#[case("random free-form text with no markers")]
fn format_detection_is_deterministic(#[case] line: &str) {
    let first = FormatNormalizer::detect(line.as_bytes());
    let second = FormatNormalizer::detect(line.as_bytes());
    assert_eq!(first, second);
}

#[test]
fn intrinsic_and_figurative_lookups_are_also_case_insensitive() {
    assert!(vocab::is_intrinsic("upper-case") && vocab::is_intrinsic("UPPER-CASE"));
    assert_eq!(vocab::figurative_canonical("zeroes"), vocab::figurative_canonical("ZEROES"));
}
