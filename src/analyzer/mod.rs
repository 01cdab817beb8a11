//! The recursive-descent analyzer: a single forward index over the token
//! list, small negative lookahead, and the cursor operators every grammar
//! rule is built from.

mod cursor;
mod data_division;
mod environment_division;
mod identification_division;
mod procedure_division;
mod state;

pub use cursor::Anchor;
pub use state::{AnalyzerState, LevelOutcome, Scope};

use crate::diagnostics::{Diagnostic, Reporter};
use crate::token::Token;
use crate::symtab::SymbolTable;

pub struct Analyzer<'a> {
    tokens: &'a [Token],
    pos: usize,
    pub state: AnalyzerState,
    symbols: &'a mut SymbolTable,
    reporter: &'a mut dyn Reporter,
}

impl<'a> Analyzer<'a> {
    pub fn new(tokens: &'a [Token], symbols: &'a mut SymbolTable, reporter: &'a mut dyn Reporter) -> Self {
        Self {
            tokens,
            pos: 0,
            state: AnalyzerState::new(),
            symbols,
            reporter,
        }
    }

    pub fn with_resolution_mode(mut self, resolution_mode: bool) -> Self {
        self.state.resolution_mode = resolution_mode;
        self
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        self.symbols
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.state.error_count += 1;
        }
        self.reporter.report(diagnostic);
    }

    pub fn error_count(&self) -> usize {
        self.state.error_count
    }

    /// Top-level rule: iterate source-unit definitions until EOF. When one
    /// file's tokens are exhausted but EOF has not been reached, advance
    /// the file-index pointer used for diagnostics and continue — the
    /// token stream itself is already one concatenated, ordered sequence.
    pub fn analyze(&mut self) {
        while !self.at_eof() {
            let start_pos = self.pos;
            self.state.file_index = self.current().file.index();
            identification_division::parse_source_unit(self);

            if self.pos == start_pos {
                // No rule consumed a token: force progress so a completely
                // unrecognized leading token cannot loop forever.
                self.bump();
            }
        }
    }
}
