//! ENVIRONMENT DIVISION: optional CONFIGURATION SECTION → REPOSITORY, and
//! optional INPUT-OUTPUT SECTION → FILE-CONTROL (`SELECT` entries) and
//! I-O-CONTROL.

use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};

use super::cursor::Anchor;
use super::state::Scope;
use super::Analyzer;

const DIVISION_BOUNDARY: &[&str] = &[
    "DATA", "PROCEDURE", "END", "FACTORY", "OBJECT", "METHOD-ID",
];

pub fn parse(analyzer: &mut Analyzer<'_>) {
    if !analyzer.current_equals(&["ENVIRONMENT"]) {
        return;
    }
    analyzer.bump();
    analyzer.expected("DIVISION", DiagnosticCode::MissingKeyword);
    analyzer.optional(".");
    analyzer.state.scope = Scope::EnvironmentDivision;

    if analyzer.current_equals(&["CONFIGURATION"]) {
        analyzer.bump();
        analyzer.optional("SECTION");
        analyzer.optional(".");
        parse_repository(analyzer);
    }

    if analyzer.current_equals(&["INPUT-OUTPUT"]) {
        analyzer.bump();
        analyzer.optional("SECTION");
        analyzer.optional(".");
        if analyzer.current_equals(&["FILE-CONTROL"]) {
            analyzer.bump();
            analyzer.optional(".");
            analyzer.state.scope = Scope::FileControl;
            parse_file_control(analyzer);
        }
        if analyzer.current_equals(&["I-O-CONTROL"]) {
            analyzer.bump();
            analyzer.optional(".");
            analyzer.anchor_point(Anchor::Lexemes(DIVISION_BOUNDARY));
        }
    }
}

fn parse_repository(analyzer: &mut Analyzer<'_>) {
    if !analyzer.current_equals(&["REPOSITORY"]) {
        return;
    }
    analyzer.bump();
    analyzer.optional(".");
    analyzer.state.scope = Scope::Repository;

    while analyzer.current_equals(&["CLASS", "INTERFACE", "FUNCTION", "PROGRAM", "PROPERTY"]) {
        analyzer.bump();
        analyzer.bump();
        if analyzer.optional("AS") {
            analyzer.bump();
        }
        if analyzer.optional("EXPANDS") {
            analyzer.bump();
            analyzer.optional("USING");
            while !analyzer.current_equals(&[".", "CLASS", "INTERFACE", "FUNCTION", "PROGRAM", "PROPERTY"])
                && !analyzer.at_eof()
            {
                analyzer.bump();
            }
        }
        analyzer.optional(".");
    }
}

fn parse_file_control(analyzer: &mut Analyzer<'_>) {
    while analyzer.current_equals(&["SELECT"]) {
        analyzer.bump();
        let file_name = analyzer.bump().lexeme.to_string();

        let duplicate = !analyzer.state.resolution_mode
            && analyzer
                .symbols()
                .global(&qualified_unit_name(analyzer))
                .is_some_and(|signature| signature.file_entries.contains_key(file_name.as_str()));

        analyzer.expected("ASSIGN", DiagnosticCode::MissingKeyword);
        analyzer.optional("TO");
        let assignment = analyzer.bump().lexeme.to_string();

        while !analyzer.current_equals(&[".", "SELECT"]) && !analyzer.at_eof() {
            analyzer.bump();
        }
        analyzer.optional(".");

        if duplicate {
            let anchor = analyzer.lookahead(-1).clone();
            analyzer.report(
                Diagnostic::new(DiagnosticCode::DuplicateFileControlEntry, anchor.file, anchor.position)
                    .with_severity(Severity::Error)
                    .with_headline(format!("file '{file_name}' already selected in this unit")),
            );
        } else if !analyzer.state.resolution_mode {
            let qualified = qualified_unit_name(analyzer);
            if let Some(signature) = analyzer.symbols_mut().global_mut(&qualified) {
                signature.file_entries.insert(file_name.into(), assignment.into());
            }
        }
    }
}

fn qualified_unit_name(analyzer: &Analyzer<'_>) -> String {
    analyzer.state.qualified_current_unit_name()
}
