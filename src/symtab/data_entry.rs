//! `DataEntry`: one DATA DIVISION item's symbol-table record.

use smol_str::SmolStr;

use super::clause_bits::ClauseBits;

/// The DATA DIVISION section a data entry was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    WorkingStorage,
    LocalStorage,
    Linkage,
    File,
    Report,
    Screen,
}

/// The ~20 COBOL USAGE variants. `PointerFamily` members and `Index`/
/// `MessageTag`/`ObjectReference` forbid PICTURE and (for the pointer-like
/// subset) VALUE; see `ClauseConflict` checks in `crate::analyzer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UsageType {
    #[default]
    Display,
    Binary,
    BinaryChar,
    BinaryShort,
    BinaryLong,
    BinaryDouble,
    Packed,
    Comp,
    Comp1,
    Comp2,
    Comp3,
    Comp4,
    Comp5,
    FloatShort,
    FloatLong,
    FloatExtended,
    Index,
    MessageTag,
    ObjectReference,
    DataPointer,
    FunctionPointer,
    ProgramPointer,
    National,
}

impl UsageType {
    /// USAGEs in this set forbid PICTURE outright.
    pub fn forbids_picture(self) -> bool {
        matches!(
            self,
            Self::Index
                | Self::MessageTag
                | Self::ObjectReference
                | Self::DataPointer
                | Self::FunctionPointer
                | Self::ProgramPointer
                | Self::BinaryChar
                | Self::BinaryShort
                | Self::BinaryLong
                | Self::BinaryDouble
                | Self::FloatShort
                | Self::FloatLong
                | Self::FloatExtended
        )
    }

    /// USAGEs in this (narrower) set forbid VALUE as well.
    pub fn forbids_value(self) -> bool {
        matches!(
            self,
            Self::Index
                | Self::MessageTag
                | Self::ObjectReference
                | Self::DataPointer
                | Self::FunctionPointer
                | Self::ProgramPointer
        )
    }
}

/// Points back into the token buffer at the token index where a clause
/// began, so its full payload (e.g. `TYPEDEF STRONG` vs plain `TYPEDEF`)
/// can be re-scanned on demand rather than copied eagerly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseDeclaration {
    pub clause: ClauseBits,
    pub token_index: usize,
}

/// One DATA DIVISION entry: a level-number item, a record header, a
/// constant, or a 66/88 item.
#[derive(Debug, Clone)]
pub struct DataEntry {
    pub name: SmolStr,
    pub external_name: Option<SmolStr>,
    pub level_number: u8,
    pub section: Section,
    pub usage: UsageType,
    pub is_group: bool,
    pub is_constant: bool,
    /// Index into `AnalyzerState::data_entries` of this entry's immediate
    /// parent (the nearest preceding entry at a shallower level). Not an
    /// owning reference — entries live in one flat `Vec<DataEntry>` for the
    /// whole compilation, so a plain index is the natural back-reference.
    /// `None` for a 01/77 root-level item.
    pub parent: Option<usize>,
    pub clauses: ClauseBits,
    pub clause_declarations: Vec<ClauseDeclaration>,
}

impl DataEntry {
    pub fn new(name: impl Into<SmolStr>, level_number: u8, section: Section) -> Self {
        Self {
            name: name.into(),
            external_name: None,
            level_number,
            section,
            usage: UsageType::default(),
            is_group: false,
            is_constant: false,
            parent: None,
            clauses: ClauseBits::empty(),
            clause_declarations: Vec::new(),
        }
    }

    pub fn declare_clause(&mut self, clause: ClauseBits, token_index: usize) {
        self.clauses.set(clause);
        self.clause_declarations.push(ClauseDeclaration { clause, token_index });
    }

    pub fn has_clause(&self, clause: ClauseBits) -> bool {
        self.clauses.contains(clause)
    }

    pub fn clause_token_index(&self, clause: ClauseBits) -> Option<usize> {
        self.clause_declarations
            .iter()
            .find(|declaration| declaration.clause == clause)
            .map(|declaration| declaration.token_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaring_a_clause_sets_its_bit_and_records_its_token() {
        let mut entry = DataEntry::new("X", 5, Section::WorkingStorage);
        entry.declare_clause(ClauseBits::PICTURE, 12);
        assert!(entry.has_clause(ClauseBits::PICTURE));
        assert_eq!(entry.clause_token_index(ClauseBits::PICTURE), Some(12));
        assert!(!entry.has_clause(ClauseBits::OCCURS));
    }

    #[test]
    fn index_usage_forbids_picture_and_value() {
        assert!(UsageType::Index.forbids_picture());
        assert!(UsageType::Index.forbids_value());
        assert!(!UsageType::Display.forbids_picture());
    }

    #[test]
    fn binary_short_forbids_picture_but_not_value() {
        assert!(UsageType::BinaryShort.forbids_picture());
        assert!(!UsageType::BinaryShort.forbids_value());
    }
}
