//! Analyzer state: the stacks a recursive-descent pass over nested COBOL
//! source units naturally needs. Modeled as an explicit, owned object (not
//! ambient globals) so a unit test can construct a scoped analyzer.

use smol_str::SmolStr;

use crate::symtab::{DataEntry, SourceUnitKind};

/// Section/paragraph context, tracked so clause and statement rules can ask
/// "am I in WORKING-STORAGE" without threading an extra parameter through
/// every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    TopLevel,
    ProgramId,
    FunctionId,
    ClassId,
    InterfaceId,
    MethodId,
    EnvironmentDivision,
    Repository,
    DataDivision,
    WorkingStorage,
    LocalStorage,
    LinkageSection,
    FileControl,
    ProcedureDivision,
}

#[derive(Debug, Default)]
pub struct AnalyzerState {
    pub unit_names: Vec<SmolStr>,
    pub unit_kinds: Vec<SourceUnitKind>,
    pub level_stack: Vec<u8>,
    pub scope: Scope,
    pub file_index: usize,
    pub error_count: usize,
    /// Every DATA DIVISION entry parsed so far, across every unit. The
    /// symbol table's locals map holds name -> reference lists pointing
    /// back at source positions; the entries themselves (clause bitset,
    /// usage, parent index) live here.
    pub data_entries: Vec<DataEntry>,
    /// When set, symbol-table mutations are skipped so a forward-reference
    /// resolution pass can walk the grammar without double-registering.
    pub resolution_mode: bool,
}

impl AnalyzerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_unit(&mut self, name: SmolStr, kind: SourceUnitKind) {
        self.unit_names.push(name);
        self.unit_kinds.push(kind);
    }

    pub fn pop_unit(&mut self) -> Option<(SmolStr, SourceUnitKind)> {
        let name = self.unit_names.pop()?;
        let kind = self.unit_kinds.pop()?;
        Some((name, kind))
    }

    pub fn current_unit_name(&self) -> Option<&SmolStr> {
        self.unit_names.last()
    }

    /// The fully-qualified name under which the current unit's signature
    /// was registered in the symbol table: `parent->name` for a nested
    /// unit (method/factory/object), or a bare name at the top level. Must
    /// match `identification_division::qualify`'s computation, which runs
    /// once before the unit is pushed.
    pub fn qualified_current_unit_name(&self) -> String {
        match self.unit_names.len() {
            0 => String::new(),
            1 => self.unit_names[0].to_string(),
            n => format!("{}->{}", self.unit_names[n - 2], self.unit_names[n - 1]),
        }
    }

    pub fn current_unit_kind(&self) -> Option<SourceUnitKind> {
        self.unit_kinds.last().copied()
    }

    /// `CheckLevelNumber`: 01 pushes; 2-49 push if greater than top, else
    /// pop until equal (a non-matching pop is the caller's error to raise);
    /// 77 never touches the stack.
    pub fn check_level_number(&mut self, level: u8) -> LevelOutcome {
        if level == 77 {
            return LevelOutcome::Standalone;
        }
        if level == 1 {
            self.level_stack.clear();
            self.level_stack.push(level);
            return LevelOutcome::Pushed;
        }
        match self.level_stack.last().copied() {
            None => {
                self.level_stack.push(level);
                LevelOutcome::Pushed
            }
            Some(top) if level > top => {
                self.level_stack.push(level);
                LevelOutcome::Pushed
            }
            Some(top) if level < top => {
                while self.level_stack.last().is_some_and(|&t| t > level) {
                    self.level_stack.pop();
                }
                if self.level_stack.last().copied() == Some(level) {
                    LevelOutcome::Popped
                } else {
                    self.level_stack.push(level);
                    LevelOutcome::OutOfSequence
                }
            }
            // level == top: a sibling at the same depth (05 CHILD-A then
            // 05 CHILD-B under the same 01). The stack already holds the
            // right ancestry; nothing to push or pop.
            Some(_) => LevelOutcome::Sibling,
        }
    }

    pub fn clear_level_stack(&mut self) {
        self.level_stack.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    Pushed,
    Popped,
    /// Same level as the current stack top: a sibling under the same parent.
    Sibling,
    Standalone,
    OutOfSequence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_77_never_touches_the_stack() {
        let mut state = AnalyzerState::new();
        state.check_level_number(1);
        state.check_level_number(77);
        assert_eq!(state.level_stack, vec![1]);
    }

    #[test]
    fn level_stack_is_empty_after_a_full_record_closes() {
        let mut state = AnalyzerState::new();
        state.check_level_number(1);
        state.check_level_number(5);
        state.check_level_number(10);
        state.clear_level_stack();
        assert!(state.level_stack.is_empty());
    }

    #[test]
    fn descending_level_pops_back_to_the_matching_ancestor() {
        let mut state = AnalyzerState::new();
        state.check_level_number(1);
        state.check_level_number(5);
        state.check_level_number(10);
        let outcome = state.check_level_number(5);
        assert_eq!(outcome, LevelOutcome::Popped);
        assert_eq!(state.level_stack, vec![1, 5]);
    }

    #[test]
    fn non_matching_descent_is_out_of_sequence() {
        let mut state = AnalyzerState::new();
        state.check_level_number(1);
        state.check_level_number(10);
        let outcome = state.check_level_number(7);
        assert_eq!(outcome, LevelOutcome::OutOfSequence);
    }

    #[test]
    fn two_equal_level_siblings_are_not_out_of_sequence() {
        let mut state = AnalyzerState::new();
        state.check_level_number(1);
        let first_child = state.check_level_number(5);
        let second_child = state.check_level_number(5);
        assert_eq!(first_child, LevelOutcome::Pushed);
        assert_eq!(second_child, LevelOutcome::Sibling);
        assert_eq!(state.level_stack, vec![1, 5]);
    }
}
