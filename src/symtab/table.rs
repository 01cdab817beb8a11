//! Two cooperating maps: a uniqueness-enforced global signature registry,
//! and a locals map that keeps every reference under a simple name (COBOL's
//! `OF` qualification means the same simple name legally recurs).

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::base::{FileIndex, Position};

use super::signature::SourceUnitSignature;

/// One recorded occurrence of a locally-scoped name (a data item, a
/// paragraph, a file-control entry — anything that is not itself a
/// globally unique source-unit signature).
#[derive(Debug, Clone)]
pub struct LocalRef {
    pub qualifier: Option<String>,
    pub file: FileIndex,
    pub position: Position,
}

/// Globals (unit signatures, uniqueness enforced) and locals (ordered
/// per-name reference lists) kept as a pair of flat maps — no lexical
/// scope chain, since this dialect's qualification (`OF`) is resolved by
/// the caller walking `fetch_all`, not by a scope-chain walk.
#[derive(Debug, Default)]
pub struct SymbolTable {
    globals: FxHashMap<String, SourceUnitSignature>,
    locals: IndexMap<String, Vec<LocalRef>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source-unit signature under its fully-qualified name.
    /// Returns `Err` (without mutating the table) if the name is already
    /// registered — duplicate registration is an error, never a silent
    /// overwrite.
    pub fn add_global(&mut self, qualified_name: String, signature: SourceUnitSignature) -> Result<(), ()> {
        if self.globals.contains_key(&qualified_name) {
            tracing::debug!(name = %qualified_name, "duplicate global signature rejected");
            return Err(());
        }
        self.globals.insert(qualified_name, signature);
        Ok(())
    }

    pub fn contains_global(&self, qualified_name: &str) -> bool {
        self.globals.contains_key(qualified_name)
    }

    pub fn global(&self, qualified_name: &str) -> Option<&SourceUnitSignature> {
        self.globals.get(qualified_name)
    }

    pub fn global_mut(&mut self, qualified_name: &str) -> Option<&mut SourceUnitSignature> {
        self.globals.get_mut(qualified_name)
    }

    pub fn globals_len(&self) -> usize {
        self.globals.len()
    }

    /// Append a reference under `name`. Does not enforce uniqueness — a
    /// simple name may legally recur (COBOL `OF` qualification).
    pub fn add_local(&mut self, name: String, reference: LocalRef) {
        self.locals.entry(name).or_default().push(reference);
    }

    pub fn has_local(&self, name: &str) -> bool {
        self.locals.contains_key(name)
    }

    pub fn fetch_first(&self, name: &str) -> Option<&LocalRef> {
        self.locals.get(name).and_then(|refs| refs.first())
    }

    pub fn fetch_all(&self, name: &str) -> &[LocalRef] {
        self.locals.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.globals.clear();
        self.locals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symtab::{SourceUnitKind, SourceUnitSignature};

    #[test]
    fn duplicate_global_registration_fails() {
        let mut table = SymbolTable::new();
        assert!(table
            .add_global("HELLO".into(), SourceUnitSignature::new("HELLO", SourceUnitKind::Program))
            .is_ok());
        assert!(table
            .add_global("HELLO".into(), SourceUnitSignature::new("HELLO", SourceUnitKind::Program))
            .is_err());
        assert_eq!(table.globals_len(), 1);
    }

    #[test]
    fn locals_preserve_insertion_order_under_one_name() {
        let mut table = SymbolTable::new();
        table.add_local(
            "X".into(),
            LocalRef { qualifier: Some("A".into()), file: FileIndex::ENTRY_POINT, position: Position::new(1, 1) },
        );
        table.add_local(
            "X".into(),
            LocalRef { qualifier: Some("B".into()), file: FileIndex::ENTRY_POINT, position: Position::new(2, 1) },
        );
        let all = table.fetch_all("X");
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].qualifier.as_deref(), Some("A"));
        assert_eq!(all[1].qualifier.as_deref(), Some("B"));
    }

    #[test]
    fn clear_empties_both_maps() {
        let mut table = SymbolTable::new();
        table.add_local("X".into(), LocalRef { qualifier: None, file: FileIndex::ENTRY_POINT, position: Position::new(1, 1) });
        table.clear();
        assert!(!table.has_local("X"));
    }
}
