//! Round-trip scenarios exercising the analyzer end to end: a clean
//! compile, recoverable diagnostics, fixed/free formatting, copybook
//! expansion, and a clause conflict that still registers its item.

use std::collections::HashMap;
use std::path::Path;

use cobol_frontend::copybook::{FileProvider, FileProviderError};
use cobol_frontend::diagnostics::{CollectingReporter, DiagnosticCode};
use cobol_frontend::{compile, CompileRequest};

struct MapProvider(HashMap<&'static str, &'static str>);

impl FileProvider for MapProvider {
    fn read(&self, path: &Path) -> Result<Vec<u8>, FileProviderError> {
        path.to_str()
            .and_then(|name| self.0.get(name))
            .map(|text| text.as_bytes().to_vec())
            .ok_or_else(|| FileProviderError {
                path: path.to_path_buf(),
                message: "not found".into(),
            })
    }
}

fn provider_with(files: &[(&'static str, &'static str)]) -> MapProvider {
    MapProvider(files.iter().copied().collect())
}

/// A trivial program compiles with zero diagnostics, one Program
/// signature, and a token list ending `... END PROGRAM HELLO . EOF`.
#[test]
fn trivial_program_compiles_cleanly() {
    let source = concat!(
        "       IDENTIFICATION DIVISION.\n",
        "       PROGRAM-ID. HELLO.\n",
        "       PROCEDURE DIVISION.\n",
        "           DISPLAY \"Hi\".\n",
        "           STOP RUN.\n",
        "       END PROGRAM HELLO.\n",
    );
    let provider = provider_with(&[("main.cob", source)]);
    let mut reporter = CollectingReporter::new();
    let outcome = compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");

    assert_eq!(reporter.diagnostics().len(), 0, "{:?}", reporter.diagnostics());
    assert_eq!(outcome.symbols.globals_len(), 1);
    assert!(outcome.symbols.contains_global("HELLO"));

    let tail: Vec<&str> = outcome
        .tokens
        .iter()
        .rev()
        .take(4)
        .map(|t| t.lexeme.as_str())
        .collect();
    // Reversed: EOF, HELLO, PROGRAM, END
    assert_eq!(tail, vec!["", "HELLO", "PROGRAM", "END"]);
    assert!(outcome.tokens.last().unwrap().is_eof());
}

/// A duplicate root-level data item reports one diagnostic and the
/// analyzer keeps going rather than aborting the compile.
#[test]
fn duplicate_data_item_is_recoverable() {
    let source = concat!(
        "       IDENTIFICATION DIVISION.\n",
        "       PROGRAM-ID. DUP.\n",
        "       DATA DIVISION.\n",
        "       WORKING-STORAGE SECTION.\n",
        "       01 X PIC 9(4).\n",
        "       01 X PIC 9(4).\n",
        "       PROCEDURE DIVISION.\n",
        "           STOP RUN.\n",
        "       END PROGRAM DUP.\n",
    );
    let provider = provider_with(&[("main.cob", source)]);
    let mut reporter = CollectingReporter::new();
    let outcome = compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");

    let duplicates: Vec<_> = reporter
        .diagnostics()
        .iter()
        .filter(|d| d.code == DiagnosticCode::DuplicateRootLevelDefinition)
        .collect();
    assert_eq!(duplicates.len(), 1);
    // The analyzer kept going: the END marker and program registration
    // still succeeded.
    assert!(outcome.symbols.contains_global("DUP"));
}

/// A fixed-format comment line (`*` in column 7) is fully blanked; no
/// tokens are emitted for it, and a following normal line is unaffected.
#[test]
fn fixed_format_comment_line_is_blanked() {
    let source = concat!(
        "       IDENTIFICATION DIVISION.\n",
        "      * this whole line is a comment and MOVE should not appear\n",
        "       PROGRAM-ID. CMT.\n",
        "       END PROGRAM CMT.\n",
    );
    let provider = provider_with(&[("main.cob", source)]);
    let mut reporter = CollectingReporter::new();
    let outcome = compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");

    assert!(!outcome.tokens.iter().any(|t| t.lexeme_eq("MOVE")));
    assert!(outcome.symbols.contains_global("CMT"));
}

/// A `>>SOURCE FORMAT IS FREE` directive switches subsequent lines to
/// free rules (no margin truncation); `*>` still terminates a line.
#[test]
fn source_format_directive_switches_to_free() {
    let source = concat!(
        ">>SOURCE FORMAT IS FREE\n",
        "IDENTIFICATION DIVISION.\n",
        "PROGRAM-ID. FREEFMT.\n",
        "PROCEDURE DIVISION.\n",
        "    DISPLAY \"ok\" *> trailing comment that must be truncated\n",
        "    STOP RUN.\n",
        "END PROGRAM FREEFMT.\n",
    );
    let provider = provider_with(&[("main.cob", source)]);
    let mut reporter = CollectingReporter::new();
    let outcome = compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");

    assert!(outcome.symbols.contains_global("FREEFMT"));
    assert!(!outcome.tokens.iter().any(|t| t.lexeme_eq("trailing")));
}

/// `COPY BOOK1.` between two statements expands in place: the final
/// token list replaces the COPY statement with the copybook's tokens,
/// preserving the surrounding order.
#[test]
fn copy_expansion_preserves_surrounding_order() {
    let source = concat!(
        "       IDENTIFICATION DIVISION.\n",
        "       PROGRAM-ID. CPY.\n",
        "       PROCEDURE DIVISION.\n",
        "           DISPLAY \"before\".\n",
        "           COPY BOOK1.\n",
        "           DISPLAY \"after\".\n",
        "       END PROGRAM CPY.\n",
    );
    let provider = provider_with(&[
        ("main.cob", source),
        ("BOOK1.cob", "       MOVE 1 TO X.\n"),
    ]);
    let mut reporter = CollectingReporter::new();
    let outcome = compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");

    assert!(!outcome.tokens.iter().any(|t| t.lexeme_eq("COPY")));
    let before = outcome.tokens.iter().position(|t| t.lexeme.as_str() == "\"before\"").unwrap();
    let mv = outcome.tokens.iter().position(|t| t.lexeme_eq("MOVE")).unwrap();
    let after = outcome.tokens.iter().position(|t| t.lexeme.as_str() == "\"after\"").unwrap();
    assert!(before < mv && mv < after);
}

/// A PICTURE clause on a USAGE INDEX item reports one clause conflict;
/// the data item is still registered.
#[test]
fn picture_usage_conflict_is_reported_but_item_is_still_registered() {
    let source = concat!(
        "       IDENTIFICATION DIVISION.\n",
        "       PROGRAM-ID. CONFLICT.\n",
        "       DATA DIVISION.\n",
        "       WORKING-STORAGE SECTION.\n",
        "       01 REC.\n",
        "           05 P USAGE INDEX PIC 9(4).\n",
        "       PROCEDURE DIVISION.\n",
        "           STOP RUN.\n",
        "       END PROGRAM CONFLICT.\n",
    );
    let provider = provider_with(&[("main.cob", source)]);
    let mut reporter = CollectingReporter::new();
    let outcome = compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");

    let conflicts: Vec<_> = reporter
        .diagnostics()
        .iter()
        .filter(|d| d.code == DiagnosticCode::ClauseConflict)
        .collect();
    assert_eq!(conflicts.len(), 1);
    assert!(outcome.symbols.has_local("P"));
}

/// A `CLASS-ID` with `INHERITS FROM`/`USING` modifiers records both lists
/// on the registered signature rather than discarding the parsed names.
#[test]
fn class_id_inherits_and_using_are_recorded_on_the_signature() {
    let source = concat!(
        "       IDENTIFICATION DIVISION.\n",
        "       CLASS-ID. DERIVED INHERITS FROM BASE USING CONTEXT-1 CONTEXT-2.\n",
        "       END CLASS DERIVED.\n",
    );
    let provider = provider_with(&[("main.cob", source)]);
    let mut reporter = CollectingReporter::new();
    let outcome = compile(CompileRequest::new("main.cob"), &provider, &mut reporter).expect("compiles");

    let signature = outcome.symbols.global("DERIVED").expect("DERIVED is registered");
    let inherits_from: Vec<&str> = signature.inherits_from.iter().map(|s| s.as_str()).collect();
    let using: Vec<&str> = signature.using.iter().map(|s| s.as_str()).collect();
    assert_eq!(inherits_from, vec!["BASE"]);
    assert_eq!(using, vec!["CONTEXT-1", "CONTEXT-2"]);
}

#[test]
fn missing_entry_point_is_fatal() {
    let provider = provider_with(&[]);
    let mut reporter = CollectingReporter::new();
    let result = compile(CompileRequest::new("main.cob"), &provider, &mut reporter);
    assert!(result.is_err());
}
