//! Fatal, pipeline-terminating errors.
//!
//! Everything short of these is a [`crate::diagnostics::Diagnostic`] —
//! reported through the [`crate::diagnostics::Reporter`] interface and
//! survived by the analyzer. `CompileError` is reserved for the three
//! conditions that end a compilation before the analyzer can even start, or
//! that signal a broken invariant the analyzer itself should never produce.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that terminate a compilation immediately.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("entry point {0} was not found among the known source files")]
    MissingEntryPoint(PathBuf),

    #[error("could not read {path}: {source}")]
    FileProvider {
        path: PathBuf,
        #[source]
        source: crate::copybook::FileProviderError,
    },

    #[error("internal invariant violated: {0}")]
    Internal(String),
}
