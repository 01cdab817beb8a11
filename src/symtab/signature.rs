//! `SourceUnitSignature`: the globally-registered shape of one source unit
//! (program, function, class, interface, method, factory, or object).

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceUnitKind {
    Program,
    ProgramPrototype,
    Function,
    FunctionPrototype,
    Class,
    Interface,
    Factory,
    Object,
    Method,
    MethodPrototype,
    MethodGetter,
    MethodSetter,
}

impl SourceUnitKind {
    pub fn is_prototype(self) -> bool {
        matches!(
            self,
            Self::ProgramPrototype | Self::FunctionPrototype | Self::MethodPrototype
        )
    }
}

/// One entry of a PROCEDURE DIVISION `USING` phrase.
#[derive(Debug, Clone)]
pub struct Param {
    pub identifier: SmolStr,
    pub by_reference: bool,
    pub optional: bool,
}

/// Flags carried by an `-ID` paragraph's modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignatureFlags {
    pub common: bool,
    pub initial: bool,
    pub recursive: bool,
    pub is_final: bool,
    pub prototype: bool,
}

#[derive(Debug, Clone)]
pub struct SourceUnitSignature {
    pub name: SmolStr,
    pub kind: SourceUnitKind,
    pub params: Vec<Param>,
    pub returning: Option<SmolStr>,
    pub flags: SignatureFlags,
    pub inherits_from: Vec<SmolStr>,
    pub using: Vec<SmolStr>,
    /// SELECT-clause file-control entries, keyed by file name.
    pub file_entries: FxHashMap<SmolStr, SmolStr>,
}

impl SourceUnitSignature {
    pub fn new(name: impl Into<SmolStr>, kind: SourceUnitKind) -> Self {
        Self {
            name: name.into(),
            kind,
            params: Vec::new(),
            returning: None,
            flags: SignatureFlags::default(),
            inherits_from: Vec::new(),
            using: Vec::new(),
            file_entries: FxHashMap::default(),
        }
    }
}
