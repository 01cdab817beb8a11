//! Top-level rule and IDENTIFICATION DIVISION: the mandatory `-ID`
//! paragraph, its modifiers, and the dispatch into ENVIRONMENT/DATA/
//! PROCEDURE divisions (or, for classes, nested FACTORY/OBJECT/METHOD-ID
//! units).

use smol_str::SmolStr;

use crate::diagnostics::{DiagnosticCode, Severity};
use crate::symtab::{SignatureFlags, SourceUnitKind, SourceUnitSignature};

use super::cursor::Anchor;
use super::state::Scope;
use super::{data_division, environment_division, procedure_division, Analyzer};

const ID_PARAGRAPH_KEYWORDS: &[&str] = &[
    "PROGRAM-ID",
    "FUNCTION-ID",
    "CLASS-ID",
    "INTERFACE-ID",
    "METHOD-ID",
    "FACTORY",
    "OBJECT",
];

fn kind_for_keyword(keyword: &str, getter: bool, setter: bool) -> SourceUnitKind {
    match keyword.to_ascii_uppercase().as_str() {
        "PROGRAM-ID" => SourceUnitKind::Program,
        "FUNCTION-ID" => SourceUnitKind::Function,
        "CLASS-ID" => SourceUnitKind::Class,
        "INTERFACE-ID" => SourceUnitKind::Interface,
        "FACTORY" => SourceUnitKind::Factory,
        "OBJECT" => SourceUnitKind::Object,
        "METHOD-ID" if getter => SourceUnitKind::MethodGetter,
        "METHOD-ID" if setter => SourceUnitKind::MethodSetter,
        _ => SourceUnitKind::Method,
    }
}

fn scope_for_kind(kind: SourceUnitKind) -> Scope {
    match kind {
        SourceUnitKind::Program | SourceUnitKind::ProgramPrototype => Scope::ProgramId,
        SourceUnitKind::Function | SourceUnitKind::FunctionPrototype => Scope::FunctionId,
        SourceUnitKind::Class => Scope::ClassId,
        SourceUnitKind::Interface => Scope::InterfaceId,
        _ => Scope::MethodId,
    }
}

fn end_keyword_for_kind(kind: SourceUnitKind) -> &'static str {
    match kind {
        SourceUnitKind::Program | SourceUnitKind::ProgramPrototype => "PROGRAM",
        SourceUnitKind::Function | SourceUnitKind::FunctionPrototype => "FUNCTION",
        SourceUnitKind::Class => "CLASS",
        SourceUnitKind::Interface => "INTERFACE",
        SourceUnitKind::Factory => "FACTORY",
        SourceUnitKind::Object => "OBJECT",
        SourceUnitKind::Method
        | SourceUnitKind::MethodPrototype
        | SourceUnitKind::MethodGetter
        | SourceUnitKind::MethodSetter => "METHOD",
    }
}

/// Parses one top-level or nested source unit: the `-ID` paragraph through
/// its matching `END` marker.
pub fn parse_source_unit(analyzer: &mut Analyzer<'_>) {
    if analyzer.optional("IDENTIFICATION") {
        analyzer.optional("DIVISION");
        analyzer.optional(".");
    }

    let Some(keyword) = analyzer.choice(ID_PARAGRAPH_KEYWORDS, DiagnosticCode::MissingKeyword) else {
        analyzer.anchor_point(Anchor::Lexemes(ID_PARAGRAPH_KEYWORDS));
        return;
    };
    analyzer.optional(".");

    let name = analyzer.bump().lexeme.to_string();
    let getter = analyzer.current_equals(&["GET"]);
    let setter = analyzer.current_equals(&["SET"]);
    if getter || setter {
        analyzer.bump();
    }
    let kind = kind_for_keyword(keyword, getter, setter);
    let qualified_name = qualify(analyzer, &name);

    analyzer.state.push_unit(SmolStr::new(&name), kind);
    analyzer.state.scope = scope_for_kind(kind);

    let modifiers = parse_modifiers(analyzer, kind);
    let flags = modifiers.flags;
    let mut kind = kind;
    if flags.prototype {
        kind = match kind {
            SourceUnitKind::Program => SourceUnitKind::ProgramPrototype,
            SourceUnitKind::Function => SourceUnitKind::FunctionPrototype,
            SourceUnitKind::Method => SourceUnitKind::MethodPrototype,
            other => other,
        };
        *analyzer.state.unit_kinds.last_mut().unwrap() = kind;
    }

    if !analyzer.state.resolution_mode {
        let mut signature = SourceUnitSignature::new(name.clone(), kind);
        signature.flags = flags;
        signature.inherits_from = modifiers.inherits_from;
        signature.using = modifiers.using;
        if analyzer.symbols_mut().add_global(qualified_name, signature).is_err() {
            let anchor = analyzer.current().clone();
            analyzer.report(
                crate::diagnostics::Diagnostic::new(
                    DiagnosticCode::DuplicateRootLevelDefinition,
                    anchor.file,
                    anchor.position,
                )
                .with_severity(Severity::Error)
                .with_headline(format!("'{name}' is already defined")),
            );
        }
    }

    analyzer.optional(".");

    environment_division::parse(analyzer);
    data_division::parse(analyzer);

    match kind {
        SourceUnitKind::Class => parse_factory_object_body(analyzer),
        SourceUnitKind::Interface => parse_interface_procedures(analyzer),
        _ if kind.is_prototype() => {
            if is_statement_like(analyzer) {
                let anchor = analyzer.current().clone();
                analyzer.report(
                    crate::diagnostics::Diagnostic::new(
                        DiagnosticCode::StatementsInPrototype,
                        anchor.file,
                        anchor.position,
                    )
                    .with_severity(Severity::Error),
                );
                analyzer.anchor_point(Anchor::Lexemes(&["END"]));
            }
        }
        _ => procedure_division::parse(analyzer, kind),
    }

    parse_end_marker(analyzer, &name);
    analyzer.state.pop_unit();
}

fn qualify(analyzer: &Analyzer<'_>, name: &str) -> String {
    match analyzer.state.current_unit_name() {
        Some(parent) => format!("{parent}->{name}"),
        None => name.to_string(),
    }
}

fn is_statement_like(analyzer: &Analyzer<'_>) -> bool {
    analyzer.current_is_context(crate::token::TokenContext::IsStatement)
        || analyzer.current_equals(&["PROCEDURE"])
}

/// The modifiers an `-ID` paragraph can carry: `AS "external-name"`,
/// `IS PROTOTYPE`, `IS COMMON`/`INITIAL`/`RECURSIVE`, `INHERITS FROM`,
/// `USING`, and `IS FINAL`.
struct ParsedModifiers {
    flags: SignatureFlags,
    inherits_from: Vec<SmolStr>,
    using: Vec<SmolStr>,
}

fn parse_modifiers(analyzer: &mut Analyzer<'_>, _kind: SourceUnitKind) -> ParsedModifiers {
    let mut flags = SignatureFlags::default();
    let mut inherits_from = Vec::new();
    let mut using = Vec::new();
    loop {
        if analyzer.optional("AS") {
            analyzer.bump();
        } else if analyzer.current_equals(&["IS"]) && is_prototype_ahead(analyzer) {
            analyzer.bump();
            analyzer.bump();
            flags.prototype = true;
        } else if analyzer.current_equals(&["IS"]) && is_common_initial_recursive_ahead(analyzer) {
            analyzer.bump();
            match analyzer.bump().lexeme.to_ascii_uppercase().as_str() {
                "COMMON" => flags.common = true,
                "INITIAL" => flags.initial = true,
                "RECURSIVE" => flags.recursive = true,
                _ => {}
            }
        } else if analyzer.current_equals(&["IS"]) && analyzer.lookahead(1).lexeme_eq("FINAL") {
            analyzer.bump();
            analyzer.bump();
            flags.is_final = true;
        } else if analyzer.optional("INHERITS") {
            analyzer.optional("FROM");
            while is_modifier_name(analyzer) {
                inherits_from.push(analyzer.bump().lexeme.clone());
            }
        } else if analyzer.optional("USING") {
            while is_modifier_name(analyzer) {
                using.push(analyzer.bump().lexeme.clone());
            }
        } else {
            break;
        }
    }

    if flags.prototype && (flags.common || flags.initial || flags.recursive) {
        emit_modifier_conflict(analyzer, "PROTOTYPE is mutually exclusive with COMMON/INITIAL/RECURSIVE");
    }
    if flags.initial && flags.recursive {
        emit_modifier_conflict(analyzer, "INITIAL and RECURSIVE are mutually exclusive");
    }
    ParsedModifiers { flags, inherits_from, using }
}

/// A name belonging to an `INHERITS FROM`/`USING` list: an identifier, not
/// the start of the next modifier or the paragraph's closing period.
fn is_modifier_name(analyzer: &Analyzer<'_>) -> bool {
    analyzer.current_is_kind(crate::token::TokenKind::Identifier)
}

fn emit_modifier_conflict(analyzer: &mut Analyzer<'_>, note: &str) {
    let anchor = analyzer.lookahead(-1).clone();
    analyzer.report(
        crate::diagnostics::Diagnostic::new(
            DiagnosticCode::IdentificationModifierConflict,
            anchor.file,
            anchor.position,
        )
        .with_severity(Severity::Error)
        .with_note(note),
    );
}

fn is_prototype_ahead(analyzer: &Analyzer<'_>) -> bool {
    analyzer.lookahead(1).lexeme_eq("PROTOTYPE")
}

fn is_common_initial_recursive_ahead(analyzer: &Analyzer<'_>) -> bool {
    let next = &analyzer.lookahead(1).lexeme;
    next.eq_ignore_ascii_case("COMMON")
        || next.eq_ignore_ascii_case("INITIAL")
        || next.eq_ignore_ascii_case("RECURSIVE")
}

fn parse_factory_object_body(analyzer: &mut Analyzer<'_>) {
    while analyzer.current_equals(&["FACTORY", "OBJECT", "METHOD-ID"]) {
        parse_source_unit(analyzer);
    }
}

fn parse_interface_procedures(analyzer: &mut Analyzer<'_>) {
    while analyzer.current_equals(&["METHOD-ID"]) {
        parse_source_unit(analyzer);
    }
}

fn parse_end_marker(analyzer: &mut Analyzer<'_>, expected_name: &str) {
    if analyzer.at_eof() {
        return;
    }
    if !analyzer.current_equals(&["END"]) {
        let anchor = analyzer.current().clone();
        analyzer.report(
            crate::diagnostics::Diagnostic::new(
                DiagnosticCode::MissingOrWrongEndMarker,
                anchor.file,
                anchor.position,
            )
            .with_severity(Severity::Error)
            .with_headline(format!("missing END marker for '{expected_name}'")),
        );
        return;
    }
    analyzer.bump();
    let kind = analyzer.state.current_unit_kind().unwrap_or(SourceUnitKind::Program);
    let expected_keyword = end_keyword_for_kind(kind);
    if !analyzer.optional(expected_keyword) {
        let anchor = analyzer.current().clone();
        analyzer.report(
            crate::diagnostics::Diagnostic::new(
                DiagnosticCode::MissingOrWrongEndMarker,
                anchor.file,
                anchor.position,
            )
            .with_severity(Severity::Error)
            .with_headline(format!("expected END {expected_keyword}")),
        );
    }
    if !analyzer.current_equals(&["."]) {
        analyzer.bump();
    }
    analyzer.optional(".");
}
