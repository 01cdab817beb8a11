//! PROCEDURE DIVISION: the optional `USING`/`RETURNING` header and the
//! statement-body dispatch.

use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use crate::symtab::{Param, SourceUnitKind};

use super::cursor::Anchor;
use super::state::Scope;
use super::Analyzer;

const STATEMENT_BOUNDARY: &[&str] = &["END", "FACTORY", "OBJECT", "METHOD-ID"];

pub fn parse(analyzer: &mut Analyzer<'_>, unit_kind: SourceUnitKind) {
    if !analyzer.current_equals(&["PROCEDURE"]) {
        if unit_kind == SourceUnitKind::Function {
            report_missing_returning(analyzer);
        }
        return;
    }
    analyzer.bump();
    analyzer.expected("DIVISION", DiagnosticCode::MissingKeyword);
    analyzer.state.scope = Scope::ProcedureDivision;

    let mut params = Vec::new();
    let mut returning = None;
    if analyzer.optional("USING") {
        params = parse_using_phrase(analyzer);
    }
    if analyzer.optional("RETURNING") {
        returning = Some(analyzer.bump().lexeme.to_string());
    } else if unit_kind == SourceUnitKind::Function {
        report_missing_returning(analyzer);
    }
    analyzer.optional(".");

    if !analyzer.state.resolution_mode {
        let qualified = analyzer.state.qualified_current_unit_name();
        if let Some(signature) = analyzer.symbols_mut().global_mut(&qualified) {
            signature.params = params;
            signature.returning = returning.map(Into::into);
        }
    }

    if analyzer.optional("DECLARATIVES") {
        analyzer.anchor_point(Anchor::Lexemes(&["END-DECLARATIVES"]));
        analyzer.optional("END-DECLARATIVES");
        analyzer.optional(".");
    }

    parse_statement_sequence(analyzer);
}

fn report_missing_returning(analyzer: &mut Analyzer<'_>) {
    let anchor = analyzer.current().clone();
    analyzer.report(
        Diagnostic::new(DiagnosticCode::MissingReturningPhrase, anchor.file, anchor.position)
            .with_severity(Severity::Error),
    );
}

fn parse_using_phrase(analyzer: &mut Analyzer<'_>) -> Vec<Param> {
    let mut params = Vec::new();
    let mut by_reference = true;
    loop {
        if analyzer.optional("BY") {
            if let Some(mode) = analyzer.choice(&["REFERENCE", "VALUE"], DiagnosticCode::MissingKeyword) {
                by_reference = mode.eq_ignore_ascii_case("REFERENCE");
            }
        }
        if analyzer.current_equals(&["RETURNING", "."]) || analyzer.at_eof() {
            break;
        }
        let optional = analyzer.optional("OPTIONAL");
        if !analyzer.current_is_kind(crate::token::TokenKind::Identifier)
            && !analyzer.current_is_kind(crate::token::TokenKind::Reserved)
        {
            let anchor = analyzer.current().clone();
            analyzer.report(
                Diagnostic::new(DiagnosticCode::MissingUsingPhraseName, anchor.file, anchor.position)
                    .with_severity(Severity::Error),
            );
            break;
        }
        let identifier = analyzer.bump().lexeme.to_string();
        params.push(Param { identifier: identifier.into(), by_reference, optional });
    }
    params
}

const STATEMENT_KEYWORDS: &[(&str, Option<&str>)] = &[
    ("DISPLAY", None),
    ("ACCEPT", None),
    ("MOVE", None),
    ("ADD", None),
    ("SUBTRACT", None),
    ("COMPUTE", None),
    ("IF", Some("END-IF")),
    ("EVALUATE", Some("END-EVALUATE")),
    ("PERFORM", Some("END-PERFORM")),
    ("CALL", Some("END-CALL")),
    ("INVOKE", Some("END-INVOKE")),
    ("READ", Some("END-READ")),
    ("WRITE", Some("END-WRITE")),
    ("STOP", None),
    ("GOBACK", None),
    ("EXIT", None),
];

fn parse_statement_sequence(analyzer: &mut Analyzer<'_>) {
    while !analyzer.at_eof() && !analyzer.current_equals(STATEMENT_BOUNDARY) {
        if analyzer.current_equals(&["."]) {
            analyzer.bump();
            continue;
        }
        if !parse_one_statement(analyzer) {
            // A paragraph/section name or anything else that is not a
            // recognized statement: treat as a label and move on.
            analyzer.bump();
        }
    }
}

/// Matches the statement keyword, parses its operands permissively up to
/// the next statement-context token or separator period, and consumes its
/// `END-xxx` terminator if the statement has one. Returns `false` if the
/// current token is not a recognized statement keyword.
fn parse_one_statement(analyzer: &mut Analyzer<'_>) -> bool {
    let Some(&(keyword, terminator)) = STATEMENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| analyzer.current_equals(&[keyword]))
    else {
        return false;
    };

    analyzer.bump();

    if keyword == "IF" {
        parse_if_body(analyzer);
        return true;
    }

    parse_operands(analyzer);

    if let Some(terminator) = terminator {
        if !analyzer.optional(terminator) {
            analyzer.optional(".");
        }
    } else {
        analyzer.optional(".");
    }
    true
}

/// Operands are consumed permissively: anything that is not itself a new
/// statement keyword, a separator period, or a scope terminator.
fn parse_operands(analyzer: &mut Analyzer<'_>) {
    while !analyzer.at_eof()
        && !analyzer.current_equals(&["."])
        && !analyzer.current_is_context(crate::token::TokenContext::IsStatement)
        && !is_end_terminator(analyzer)
        && !analyzer.current_equals(STATEMENT_BOUNDARY)
    {
        analyzer.bump();
    }
}

fn is_end_terminator(analyzer: &Analyzer<'_>) -> bool {
    analyzer.current().lexeme.starts_with("END-")
}

fn parse_if_body(analyzer: &mut Analyzer<'_>) {
    parse_condition(analyzer);
    analyzer.optional("THEN");
    parse_statement_sequence_until(analyzer, &["ELSE", "END-IF"]);
    if analyzer.optional("ELSE") {
        parse_statement_sequence_until(analyzer, &["END-IF"]);
    }
    if !analyzer.optional("END-IF") {
        analyzer.optional(".");
    }
}

fn parse_condition(analyzer: &mut Analyzer<'_>) {
    while !analyzer.at_eof() && !analyzer.current_equals(&["THEN", "."]) {
        analyzer.bump();
    }
}

fn parse_statement_sequence_until(analyzer: &mut Analyzer<'_>, boundary: &[&str]) {
    while !analyzer.at_eof() && !analyzer.current_equals(boundary) && !analyzer.current_equals(STATEMENT_BOUNDARY) {
        if analyzer.current_equals(&["."]) {
            analyzer.bump();
            continue;
        }
        if !parse_one_statement(analyzer) {
            analyzer.bump();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingReporter;
    use crate::symtab::SymbolTable;

    fn tokens_from(line: &str) -> Vec<crate::token::Token> {
        let mut tokens = Vec::new();
        let mut reporter = CollectingReporter::new();
        crate::lexer::Lexer::new().lex_line(
            line.as_bytes(),
            1,
            crate::base::FileIndex::ENTRY_POINT,
            &mut tokens,
            &mut reporter,
        );
        tokens.push(crate::token::Token::eof(crate::base::FileIndex::ENTRY_POINT));
        tokens
    }

    #[test]
    fn display_statement_is_consumed_to_its_period() {
        let tokens = tokens_from("DISPLAY \"Hi\" . STOP RUN .");
        let mut symbols = SymbolTable::new();
        let mut reporter = CollectingReporter::new();
        let mut analyzer = Analyzer::new(&tokens, &mut symbols, &mut reporter);
        parse_statement_sequence(&mut analyzer);
        assert!(analyzer.at_eof());
        assert_eq!(reporter.diagnostics().len(), 0);
    }
}
