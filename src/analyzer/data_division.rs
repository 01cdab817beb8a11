//! DATA DIVISION: WORKING-STORAGE/LOCAL-STORAGE/LINKAGE sections, each a
//! sequence of level-numbered entries, with clause parsing and the
//! cross-cutting clause-combination checks run once an entry closes.

use smol_str::SmolStr;

use crate::base::Position;
use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use crate::symtab::{ClauseBits, DataEntry, Section, UsageType};

use super::cursor::Anchor;
use super::state::{LevelOutcome, Scope};
use super::Analyzer;

const SECTION_BOUNDARY: &[&str] = &[
    "WORKING-STORAGE", "LOCAL-STORAGE", "LINKAGE", "PROCEDURE", "END",
    "FACTORY", "OBJECT", "METHOD-ID",
];

pub fn parse(analyzer: &mut Analyzer<'_>) {
    if !analyzer.current_equals(&["DATA"]) {
        return;
    }
    analyzer.bump();
    analyzer.expected("DIVISION", DiagnosticCode::MissingKeyword);
    analyzer.optional(".");
    analyzer.state.scope = Scope::DataDivision;

    parse_section(analyzer, "WORKING-STORAGE", Scope::WorkingStorage, Section::WorkingStorage);
    parse_section(analyzer, "LOCAL-STORAGE", Scope::LocalStorage, Section::LocalStorage);
    parse_section(analyzer, "LINKAGE", Scope::LinkageSection, Section::Linkage);
}

fn parse_section(analyzer: &mut Analyzer<'_>, keyword: &str, scope: Scope, section: Section) {
    if !analyzer.current_equals(&[keyword]) {
        return;
    }
    analyzer.bump();
    analyzer.optional("SECTION");
    analyzer.optional(".");
    analyzer.state.scope = scope;
    analyzer.state.clear_level_stack();

    let mut root_level_names: Vec<String> = Vec::new();
    let mut parent_stack: Vec<usize> = Vec::new();
    while is_level_number(analyzer) {
        parse_entry(analyzer, section, &mut root_level_names, &mut parent_stack);
    }
    analyzer.state.clear_level_stack();
}

fn is_level_number(analyzer: &Analyzer<'_>) -> bool {
    analyzer.current().lexeme.chars().all(|c| c.is_ascii_digit()) && !analyzer.current().lexeme.is_empty()
}

fn parse_entry(
    analyzer: &mut Analyzer<'_>,
    section: Section,
    root_level_names: &mut Vec<String>,
    parent_stack: &mut Vec<usize>,
) {
    let level_token = analyzer.bump();
    let level: u8 = level_token.lexeme.parse().unwrap_or(1);

    let name = analyzer.bump().lexeme.to_string();
    let is_constant = analyzer.current_equals(&["CONSTANT"]);

    let outcome = analyzer.state.check_level_number(level);
    if outcome == LevelOutcome::OutOfSequence {
        let anchor = level_token.clone();
        analyzer.report(
            Diagnostic::new(DiagnosticCode::LevelNumberOutOfSequence, anchor.file, anchor.position)
                .with_severity(Severity::Error)
                .with_headline(format!("level {level} is out of sequence")),
        );
    }

    // Mirrors `check_level_number`'s own stack: truncate the parallel index
    // stack down to the ancestry depth it just settled on, then its new top
    // is this entry's parent. A 77 item never touches either stack.
    let parent = if outcome == LevelOutcome::Standalone {
        None
    } else {
        let ancestry_depth = analyzer.state.level_stack.len().saturating_sub(1);
        parent_stack.truncate(ancestry_depth);
        parent_stack.last().copied()
    };

    // Root-level entries (01/77) cannot be disambiguated by `OF`
    // qualification — a second one with the same name in the same section
    // is a duplicate, not a legitimate re-occurrence under a different
    // parent, so uniqueness is enforced here rather than left to the
    // locals map's ordinary multi-occurrence rule.
    if matches!(level, 1 | 77) {
        if root_level_names.iter().any(|existing| existing.eq_ignore_ascii_case(&name)) {
            analyzer.report(
                Diagnostic::new(
                    DiagnosticCode::DuplicateRootLevelDefinition,
                    level_token.file,
                    level_token.position,
                )
                .with_severity(Severity::Error)
                .with_headline(format!("'{name}' is already defined at the root level")),
            );
        } else {
            root_level_names.push(name.clone());
        }
    }

    let mut entry = DataEntry::new(name.clone(), level, section);
    entry.is_constant = is_constant;
    entry.parent = parent;

    parse_clauses(analyzer, &mut entry);

    // A group item is one with neither a PICTURE nor a PICTURE-exempt
    // USAGE of its own: it derives its layout entirely from its children.
    entry.is_group = !is_constant
        && !entry.has_clause(ClauseBits::PICTURE)
        && !entry.usage.forbids_picture();

    validate_clause_combinations(analyzer, &entry, &level_token.position);

    if !analyzer.state.resolution_mode {
        let position = level_token.position;
        let file = level_token.file;
        analyzer.symbols_mut().add_local(
            name,
            crate::symtab::LocalRef {
                qualifier: analyzer.state.current_unit_name().map(|n| n.to_string()),
                file,
                position,
            },
        );
    }
    let entry_index = analyzer.state.data_entries.len();
    analyzer.state.data_entries.push(entry);

    if outcome != LevelOutcome::Standalone {
        parent_stack.push(entry_index);
    }
}

fn parse_clauses(analyzer: &mut Analyzer<'_>, entry: &mut DataEntry) {
    loop {
        let token_index = analyzer.current().position.line as usize;
        if analyzer.current_equals(&["."]) || analyzer.at_eof() {
            break;
        }
        if is_level_number(analyzer) {
            break;
        }

        if analyzer.current_equals(&["PICTURE", "PIC"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::PICTURE, token_index);
            skip_parenthesized_length(analyzer);
        } else if analyzer.current_equals(&["USAGE"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::USAGE, token_index);
            entry.usage = parse_usage(analyzer);
        } else if analyzer.current_equals(&["VALUE"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::VALUE, token_index);
            analyzer.bump();
        } else if analyzer.current_equals(&["OCCURS"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::OCCURS, token_index);
            analyzer.bump();
            analyzer.optional("TIMES");
            if analyzer.optional("DEPENDING") {
                analyzer.optional("ON");
                analyzer.bump();
            }
            analyzer.optional("ASCENDING");
            analyzer.optional("DESCENDING");
            if analyzer.optional("KEY") {
                analyzer.optional("IS");
                analyzer.bump();
            }
            if analyzer.optional("INDEXED") {
                analyzer.optional("BY");
                analyzer.bump();
            }
        } else if analyzer.current_equals(&["REDEFINES"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::REDEFINES, token_index);
            analyzer.bump();
        } else if analyzer.current_equals(&["RENAMES"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::RENAMES, token_index);
            analyzer.bump();
            if analyzer.optional("THRU") || analyzer.optional("THROUGH") {
                analyzer.bump();
            }
        } else if analyzer.current_equals(&["TYPEDEF"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::TYPEDEF, token_index);
            analyzer.optional("STRONG");
        } else if analyzer.current_equals(&["EXTERNAL"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::EXTERNAL, token_index);
            if analyzer.optional("AS") {
                entry.external_name = Some(SmolStr::from(analyzer.bump().lexeme.as_str()));
            }
        } else if analyzer.current_equals(&["GLOBAL"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::GLOBAL, token_index);
        } else if analyzer.current_equals(&["DYNAMIC"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::DYNAMIC_LENGTH, token_index);
            analyzer.optional("LENGTH");
            if analyzer.optional("LIMIT") {
                analyzer.bump();
            }
        } else if analyzer.current_equals(&["BLANK"]) {
            analyzer.bump();
            analyzer.optional("WHEN");
            analyzer.optional("ZERO");
            entry.declare_clause(ClauseBits::BLANK_WHEN_ZERO, token_index);
        } else if analyzer.current_equals(&["JUSTIFIED"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::JUSTIFIED, token_index);
            analyzer.optional("RIGHT");
        } else if analyzer.current_equals(&["SYNCHRONIZED", "SYNC"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::SYNCHRONIZED, token_index);
        } else if analyzer.current_equals(&["ALIGNED"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::ALIGNED, token_index);
        } else if analyzer.current_equals(&["ANY"]) {
            analyzer.bump();
            analyzer.optional("LENGTH");
            entry.declare_clause(ClauseBits::ANY_LENGTH, token_index);
        } else if analyzer.current_equals(&["BASED"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::BASED, token_index);
        } else if analyzer.current_equals(&["GROUP-USAGE"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::GROUP_USAGE, token_index);
            analyzer.choice(&["BIT", "NATIONAL"], DiagnosticCode::MissingKeyword);
        } else if analyzer.current_equals(&["PROPERTY"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::PROPERTY, token_index);
            if analyzer.optional("NO") {
                analyzer.choice(&["GET", "SET"], DiagnosticCode::MissingKeyword);
            }
            if analyzer.current_equals(&["IS"]) && analyzer.lookahead(1).lexeme_eq("FINAL") {
                analyzer.bump();
                analyzer.bump();
            }
        } else if analyzer.current_equals(&["CONSTANT"]) {
            analyzer.bump();
            analyzer.optional("RECORD");
            entry.declare_clause(ClauseBits::CONSTANT_RECORD, token_index);
        } else if analyzer.current_equals(&["SAME"]) {
            analyzer.bump();
            analyzer.optional("AS");
            entry.declare_clause(ClauseBits::SAME_AS, token_index);
            analyzer.bump();
        } else if analyzer.current_equals(&["TYPE"]) {
            analyzer.bump();
            entry.declare_clause(ClauseBits::TYPE, token_index);
            analyzer.bump();
        } else {
            // Unrecognized token inside the entry: recover at the next
            // clause-context token or the terminating period.
            let anchor = analyzer.current().clone();
            analyzer.report(
                Diagnostic::new(DiagnosticCode::UnexpectedToken, anchor.file, anchor.position)
                    .with_severity(Severity::Recovery),
            );
            analyzer.anchor_point(Anchor::Context(crate::token::TokenContext::IsClause));
            if analyzer.current_equals(&["."]) {
                break;
            }
        }
    }
    analyzer.optional(".");
}

/// Consumes a PICTURE clause's payload: the picture-character string plus
/// any length parentheses, stopping at the next clause keyword or period.
/// `V9(m)` decimal-point groups are just another run of the same tokens.
fn skip_parenthesized_length(analyzer: &mut Analyzer<'_>) {
    loop {
        if analyzer.current_equals(&["."]) || analyzer.at_eof() {
            return;
        }
        if analyzer.current_is_context(crate::token::TokenContext::IsClause) {
            return;
        }
        if analyzer.optional("(") {
            while !analyzer.current_equals(&[")"]) && !analyzer.at_eof() {
                analyzer.bump();
            }
            analyzer.optional(")");
            continue;
        }
        let lexeme = analyzer.current().lexeme.clone();
        let is_picture_fragment = lexeme.chars().all(|c| {
            matches!(c.to_ascii_uppercase(), '9' | 'X' | 'A' | 'S' | 'V' | 'P' | 'Z' | '-' | '+' | '.')
        });
        if is_picture_fragment && !lexeme.is_empty() {
            analyzer.bump();
            continue;
        }
        return;
    }
}

fn parse_usage(analyzer: &mut Analyzer<'_>) -> UsageType {
    analyzer.optional("IS");
    let word = analyzer.bump().lexeme.to_ascii_uppercase();
    match word.as_str() {
        "DISPLAY" => UsageType::Display,
        "BINARY" => UsageType::Binary,
        "BINARY-CHAR" => UsageType::BinaryChar,
        "BINARY-SHORT" => UsageType::BinaryShort,
        "BINARY-LONG" => UsageType::BinaryLong,
        "BINARY-DOUBLE" => UsageType::BinaryDouble,
        "PACKED-DECIMAL" => UsageType::Packed,
        "COMP" | "COMPUTATIONAL" => UsageType::Comp,
        "COMP-1" => UsageType::Comp1,
        "COMP-2" => UsageType::Comp2,
        "COMP-3" => UsageType::Comp3,
        "COMP-4" => UsageType::Comp4,
        "COMP-5" => UsageType::Comp5,
        "FLOAT-SHORT" => UsageType::FloatShort,
        "FLOAT-LONG" => UsageType::FloatLong,
        "FLOAT-EXTENDED" => UsageType::FloatExtended,
        "INDEX" => UsageType::Index,
        "MESSAGE-TAG" => UsageType::MessageTag,
        "OBJECT" | "OBJECT-REFERENCE" => UsageType::ObjectReference,
        "POINTER" | "DATA-POINTER" => UsageType::DataPointer,
        "FUNCTION-POINTER" => UsageType::FunctionPointer,
        "PROGRAM-POINTER" => UsageType::ProgramPointer,
        "NATIONAL" => UsageType::National,
        _ => UsageType::Display,
    }
}

fn validate_clause_combinations(analyzer: &mut Analyzer<'_>, entry: &DataEntry, position: &Position) {
    let has_picture = entry.has_clause(ClauseBits::PICTURE);
    let has_value = entry.has_clause(ClauseBits::VALUE);
    let has_redefines = entry.has_clause(ClauseBits::REDEFINES);
    let has_renames = entry.has_clause(ClauseBits::RENAMES);

    if entry.usage.forbids_picture() && has_picture {
        report_conflict(analyzer, position, &format!("PICTURE is forbidden with USAGE {:?}", entry.usage));
    }
    if entry.usage.forbids_value() && has_value {
        report_conflict(analyzer, position, &format!("VALUE is forbidden with USAGE {:?}", entry.usage));
    }
    if has_renames && has_picture {
        report_conflict(analyzer, position, "PICTURE is forbidden on a RENAMES entry");
    }
    if entry.is_group && has_picture && !has_redefines {
        report_conflict(analyzer, position, "PICTURE is forbidden on a group item");
    }
    if !entry.is_group
        && !has_picture
        && !entry.usage.forbids_picture()
        && !has_value
        && !entry.is_constant
    {
        report_missing_picture(analyzer, position);
    }
}

fn report_conflict(analyzer: &mut Analyzer<'_>, position: &Position, note: &str) {
    let file = analyzer.lookahead(0).file;
    analyzer.report(
        Diagnostic::new(DiagnosticCode::ClauseConflict, file, *position)
            .with_severity(Severity::Error)
            .with_note(note.to_string()),
    );
}

fn report_missing_picture(analyzer: &mut Analyzer<'_>, position: &Position) {
    let file = analyzer.lookahead(0).file;
    analyzer.report(
        Diagnostic::new(DiagnosticCode::MissingRequiredClause, file, *position)
            .with_severity(Severity::Recovery)
            .with_note("elementary item requires a PICTURE clause unless VALUE supplies a literal"),
    );
}
