//! The public entry point: wires source reading, format normalization,
//! directive handling, lexing, copybook expansion, and analysis into one
//! pass over an entry-point file, its workspace siblings, and whatever
//! copybooks they pull in.
//!
//! Concurrency is explicitly out of scope here: one [`compile`] call walks
//! its token stream start to finish on the calling thread. Tokens appear in
//! the output in the order they occur in the concatenated entry-point-
//! then-workspace-files stream, with copybook splices preserving the
//! original program-order position of the `COPY` statement.

use std::path::PathBuf;

use crate::analyzer::Analyzer;
use crate::copybook::{CopybookExpander, FileProvider};
use crate::diagnostics::Reporter;
use crate::directives::DirectiveHandler;
use crate::error::CompileError;
use crate::format::{CompileOptions, FormatNormalizer};
use crate::lexer::Lexer;
use crate::source::SourceReader;
use crate::symtab::SymbolTable;
use crate::token::Token;

/// What a caller hands to [`compile`]: the entry-point path plus any other
/// workspace source files to compile alongside it (e.g. every `*.cob` a
/// workspace enumeration turned up), all relative to whatever root
/// `FileProvider` resolves against.
#[derive(Debug, Clone)]
pub struct CompileRequest {
    pub entry_point: PathBuf,
    pub workspace_files: Vec<PathBuf>,
}

impl CompileRequest {
    pub fn new(entry_point: impl Into<PathBuf>) -> Self {
        Self { entry_point: entry_point.into(), workspace_files: Vec::new() }
    }

    pub fn with_workspace_files(mut self, files: impl IntoIterator<Item = PathBuf>) -> Self {
        self.workspace_files = files.into_iter().collect();
        self
    }
}

/// Everything a successful (or partially successful — diagnostics do not
/// stop analysis) compilation produces.
#[derive(Debug)]
pub struct CompileOutcome {
    pub tokens: Vec<Token>,
    pub symbols: SymbolTable,
}

impl CompileOutcome {
    /// `true` if the reporter recorded no `Error`-or-worse diagnostic.
    /// Callers that need the count itself should keep their own
    /// `Reporter` and ask it directly — this only answers "did it fail".
    pub fn is_successful(&self, reporter: &dyn Reporter) -> bool {
        reporter.error_count() == 0
    }
}

/// Run the full front-end pipeline against `request.entry_point` and its
/// `workspace_files`, reading source bytes (and any copybooks they `COPY`)
/// through `provider` and sending every diagnostic to `reporter`. Missing
/// entry point or an unreadable entry file is fatal; an unreadable
/// workspace file is reported as a recoverable diagnostic and skipped, so
/// one bad file in a large workspace enumeration does not abort everything.
pub fn compile(
    request: CompileRequest,
    provider: &dyn FileProvider,
    reporter: &mut dyn Reporter,
) -> Result<CompileOutcome, CompileError> {
    let source = provider.read(&request.entry_point).map_err(|source| CompileError::FileProvider {
        path: request.entry_point.clone(),
        source,
    })?;

    let mut options = CompileOptions::new(request.entry_point.clone());
    let entry_file = options.file_index(&request.entry_point);

    let mut tokens = lex_source(&source, entry_file, &mut options, reporter);

    for workspace_file in &request.workspace_files {
        match provider.read(workspace_file) {
            Ok(bytes) => {
                let file = options.file_index(workspace_file);
                tokens.extend(lex_source(&bytes, file, &mut options, reporter));
            }
            Err(source) => {
                tracing::warn!(path = %workspace_file.display(), %source, "workspace file read failed");
                report_unreadable_workspace_file(workspace_file, reporter);
            }
        }
    }

    let expander = CopybookExpander::new(provider);
    expander.expand(&mut tokens, &mut options, reporter);
    tokens.push(Token::eof(entry_file));

    let mut symbols = SymbolTable::new();
    let mut analyzer = Analyzer::new(&tokens, &mut symbols, reporter);
    analyzer.analyze();

    Ok(CompileOutcome { tokens, symbols })
}

fn report_unreadable_workspace_file(path: &std::path::Path, reporter: &mut dyn Reporter) {
    use crate::base::Position;
    use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};
    reporter.report(
        Diagnostic::new(DiagnosticCode::UnexpectedToken, crate::base::FileIndex::ENTRY_POINT, Position::new(0, 0))
            .with_severity(Severity::Recovery)
            .with_headline(format!("workspace file '{}' could not be read", path.display())),
    );
}

/// Reads one file's logical lines through the normalizer and directive
/// handler before lexing each into `tokens`.
fn lex_source(
    bytes: &[u8],
    file: crate::base::FileIndex,
    options: &mut CompileOptions,
    reporter: &mut dyn Reporter,
) -> Vec<Token> {
    let mut normalizer = FormatNormalizer::new();
    let directives = DirectiveHandler::new();
    let lexer = Lexer::new();
    let mut tokens = Vec::new();

    for (line_number, line) in SourceReader::new(bytes) {
        let normalized = normalizer.normalize(line, options);
        if directives.scan(&normalized, options) {
            continue;
        }
        lexer.lex_line(&normalized, line_number, file, &mut tokens, reporter);
    }

    tokens
}
