//! Compiler directive handling (`>>` lines).
//!
//! Only `>>SOURCE [FORMAT] [IS] FREE|FIXED` has an effect; every other
//! directive is recognized as a directive token but left alone — unknown
//! directives are preserved as-is and never fail compilation. The
//! preprocessor must normalize a line *then* scan it for directives
//! affecting the *next* line: sequencing is the caller's responsibility
//! (see `pipeline::compile`), not this module's.

use crate::format::{CompileOptions, SourceFormat};

/// Scans one normalized line for a directive and applies its effect.
pub struct DirectiveHandler;

impl DirectiveHandler {
    pub fn new() -> Self {
        Self
    }

    /// If `line` contains a recognized directive, apply it to `options` and
    /// return `true`. Lines with no directive, or with an unrecognized one,
    /// return `false` and leave `options` untouched.
    pub fn scan(&self, line: &[u8], options: &mut CompileOptions) -> bool {
        let text = String::from_utf8_lossy(line);
        let trimmed = text.trim_start();
        if !trimmed.starts_with(">>") {
            return false;
        }

        let words: Vec<&str> = trimmed
            .trim_start_matches(">>")
            .split(|c: char| c.is_whitespace())
            .filter(|word| !word.is_empty())
            .collect();

        let Some(&first) = words.first() else {
            return false;
        };
        if !first.eq_ignore_ascii_case("SOURCE") {
            return false;
        }

        let mut rest = &words[1..];
        if rest.first().is_some_and(|w| w.eq_ignore_ascii_case("FORMAT")) {
            rest = &rest[1..];
        }
        if rest.first().is_some_and(|w| w.eq_ignore_ascii_case("IS")) {
            rest = &rest[1..];
        }

        match rest.first() {
            Some(word) if word.eq_ignore_ascii_case("FREE") => {
                tracing::debug!("directive >>SOURCE FORMAT IS FREE");
                options.format = SourceFormat::Free;
                true
            }
            Some(word) if word.eq_ignore_ascii_case("FIXED") => {
                tracing::debug!("directive >>SOURCE FORMAT IS FIXED");
                options.format = SourceFormat::Fixed;
                true
            }
            _ => false,
        }
    }
}

impl Default for DirectiveHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_format_free_directive_mutates_options() {
        let handler = DirectiveHandler::new();
        let mut options = CompileOptions::new("main.cob".into());
        assert!(handler.scan(b">>SOURCE FORMAT IS FREE", &mut options));
        assert_eq!(options.format, SourceFormat::Free);
    }

    #[test]
    fn source_format_without_optional_words_still_matches() {
        let handler = DirectiveHandler::new();
        let mut options = CompileOptions::new("main.cob".into());
        assert!(handler.scan(b">>SOURCE FIXED", &mut options));
        assert_eq!(options.format, SourceFormat::Fixed);
    }

    #[test]
    fn unknown_directive_is_preserved_without_failing() {
        let handler = DirectiveHandler::new();
        let mut options = CompileOptions::new("main.cob".into());
        let before = options.format;
        assert!(!handler.scan(b">>IF SOMETHING", &mut options));
        assert_eq!(options.format, before);
    }

    #[test]
    fn non_directive_line_returns_false() {
        let handler = DirectiveHandler::new();
        let mut options = CompileOptions::new("main.cob".into());
        assert!(!handler.scan(b"       DISPLAY 1.", &mut options));
    }
}
