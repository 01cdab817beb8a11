//! Foundation types shared by every later stage.
//!
//! This module has no dependencies on anything else in the crate: it
//! provides the source-position record and the file-index newtype that a
//! [`crate::token::Token`] carries.

mod position;

pub use position::{FileIndex, Position, Span};
