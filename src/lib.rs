//! # cobol_frontend
//!
//! Front-end compiler pipeline for a Standard COBOL 202x dialect: a
//! preprocessor, a lexer/classifier, and a recursive-descent analyzer that
//! together turn source bytes into a validated token stream and a populated
//! symbol table. Code generation is an external collaborator; this crate
//! stops at tokens + symbols + diagnostics.
//!
//! ## Module structure (dependency order, leaves first)
//!
//! ```text
//! pipeline   → public entry point; wires every stage together
//!   ↑
//! analyzer   → recursive-descent grammar, clause validation, symbols
//! copybook   → COPY splicing, FileProvider trait
//! symtab     → DataEntry, SourceUnitSignature, SymbolTable
//! lexer      → classifies normalized text into tokens
//! directives → >>SOURCE FORMAT handling
//! format     → CompileOptions, fixed/free normalization
//! source     → bytes -> logical lines
//! diagnostics → Diagnostic, Reporter, DiagnosticCode
//! error      → CompileError (fatal class)
//! token      → Token, TokenKind, TokenContext
//! vocab      → reserved/context/intrinsic/figurative tables
//! base       → Position, Span, FileIndex
//! ```
//!
//! Callers provide source bytes through [`copybook::FileProvider`] and get
//! back an ordered token list, a [`symtab::SymbolTable`], and a diagnostic
//! stream through [`diagnostics::Reporter`] — see [`pipeline::compile`].

/// Foundation types: source positions, spans, file indices.
pub mod base;

/// Process-wide vocabulary tables: reserved words, context map, intrinsics,
/// figurative literals.
pub mod vocab;

/// The token record and its classification tags.
pub mod token;

/// Fatal, pipeline-terminating errors.
pub mod error;

/// Structured diagnostics and the reporter interface.
pub mod diagnostics;

/// Turns a byte stream into logical lines.
pub mod source;

/// Compile options and fixed/free source-format normalization.
pub mod format;

/// Compiler directive handling (`>>` lines).
pub mod directives;

/// Converts normalized lines into classified tokens.
pub mod lexer;

/// `COPY` statement expansion and the `FileProvider` interface.
pub mod copybook;

/// The symbol table and its constituent records.
pub mod symtab;

/// The recursive-descent analyzer over the token stream.
pub mod analyzer;

/// The crate's public entry point: wires every stage together.
pub mod pipeline;

pub use base::{FileIndex, Position, Span};
pub use diagnostics::{CollectingReporter, Diagnostic, Reporter, Severity};
pub use error::CompileError;
pub use pipeline::{compile, CompileOutcome, CompileRequest};
pub use symtab::SymbolTable;
pub use token::{Token, TokenContext, TokenKind};
