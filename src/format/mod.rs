//! Compile options and fixed/free source-format normalization.

use std::path::PathBuf;

/// Source layout in effect for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SourceFormat {
    #[default]
    Auto,
    Fixed,
    Free,
}

/// Process-wide compile configuration. Mutable only during preprocessing —
/// the lexer, copybook expander, and analyzer treat it as read-only.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub format: SourceFormat,
    pub column_length: usize,
    pub entry_point: PathBuf,
    pub known_files: Vec<PathBuf>,
}

impl CompileOptions {
    pub fn new(entry_point: PathBuf) -> Self {
        Self {
            format: SourceFormat::Auto,
            column_length: 80,
            known_files: vec![entry_point.clone()],
            entry_point,
        }
    }

    /// Register `path` as a known file if it is not already tracked, and
    /// return its index for tagging tokens.
    pub fn file_index(&mut self, path: &std::path::Path) -> crate::base::FileIndex {
        if let Some(existing) = self.known_files.iter().position(|known| known == path) {
            return crate::base::FileIndex::new(existing as u32);
        }
        self.known_files.push(path.to_path_buf());
        crate::base::FileIndex::new((self.known_files.len() - 1) as u32)
    }
}

/// Applies fixed/free layout rules to one logical line at a time, carrying
/// the auto-detection state (decided or not) across lines of a single
/// compilation unit.
pub struct FormatNormalizer {
    decided: bool,
}

impl FormatNormalizer {
    pub fn new() -> Self {
        Self { decided: false }
    }

    /// Normalize one logical line in place against `options`, mutating
    /// `options.format` the first time auto-detection decides.
    pub fn normalize(&mut self, line: &[u8], options: &mut CompileOptions) -> Vec<u8> {
        if options.format == SourceFormat::Auto && !self.decided {
            if let Some(detected) = Self::detect(line) {
                tracing::debug!(?detected, "source format decided");
                options.format = detected;
                self.decided = true;
            }
        }

        match effective_format(options.format) {
            SourceFormat::Free => Self::normalize_free(line),
            _ => Self::normalize_fixed(line, options.column_length),
        }
    }

    /// First non-blank-line detection rule from the directive-free
    /// auto-detection algorithm. Blank lines return `None` (undecided).
    pub fn detect(line: &[u8]) -> Option<SourceFormat> {
        if line.iter().all(|&b| b == b' ' || b == b'\t') {
            return None;
        }

        let trimmed_start = line
            .iter()
            .position(|&b| b != b' ' && b != b'\t')
            .unwrap_or(0);
        let trimmed = &line[trimmed_start..];
        if trimmed.starts_with(b"*>") || trimmed.starts_with(b">>") {
            return Some(SourceFormat::Free);
        }

        let cols_1_6_visible = line
            .iter()
            .take(6)
            .any(|&b| b != b' ');
        let col7 = line.get(6).copied();
        let col7_fixed_marker = matches!(col7, Some(b'*') | Some(b'-') | Some(b'/') | Some(b' '));
        let cols_8_9_directive = line.get(7..9) == Some(b">>".as_slice());

        if cols_1_6_visible || col7_fixed_marker || cols_8_9_directive {
            return Some(SourceFormat::Fixed);
        }

        None
    }

    fn normalize_fixed(line: &[u8], column_length: usize) -> Vec<u8> {
        let mut buffer = line.to_vec();

        if let Some(comment_start) = find_subslice(&buffer, b"*>") {
            buffer.truncate(comment_start);
        }

        if buffer.len() >= 7 && buffer[6] == b'*' {
            buffer.iter_mut().for_each(|b| *b = b' ');
        }

        for byte in buffer.iter_mut().take(6.min(buffer.len())) {
            *byte = b' ';
        }

        if buffer.len() > column_length {
            buffer.truncate(column_length);
        }

        buffer
    }

    fn normalize_free(line: &[u8]) -> Vec<u8> {
        let mut buffer = line.to_vec();
        if let Some(comment_start) = find_subslice(&buffer, b"*>") {
            buffer.truncate(comment_start);
        }
        buffer
    }
}

impl Default for FormatNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn effective_format(format: SourceFormat) -> SourceFormat {
    match format {
        SourceFormat::Auto => SourceFormat::Fixed,
        other => other,
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_comment_line_is_fully_blanked() {
        let mut options = CompileOptions::new("main.cob".into());
        options.format = SourceFormat::Fixed;
        let mut normalizer = FormatNormalizer::new();
        let input = b"      * a full line comment";
        let output = normalizer.normalize(input, &mut options);
        assert!(output.iter().all(|&b| b == b' '));
    }

    #[test]
    fn fixed_format_truncates_past_column_length() {
        let mut options = CompileOptions::new("main.cob".into());
        options.format = SourceFormat::Fixed;
        options.column_length = 10;
        let mut normalizer = FormatNormalizer::new();
        let input = b"      ABCDEFGHIJKLMNOP";
        let output = normalizer.normalize(input, &mut options);
        assert_eq!(output.len(), 10);
    }

    #[test]
    fn free_format_only_truncates_inline_comment() {
        let mut options = CompileOptions::new("main.cob".into());
        options.format = SourceFormat::Free;
        let mut normalizer = FormatNormalizer::new();
        let input = b"DISPLAY 1 *> trailing comment";
        let output = normalizer.normalize(input, &mut options);
        assert_eq!(output, b"DISPLAY 1 ");
    }

    #[test]
    fn blank_lines_do_not_decide_auto_format() {
        let mut options = CompileOptions::new("main.cob".into());
        let mut normalizer = FormatNormalizer::new();
        normalizer.normalize(b"      ", &mut options);
        assert_eq!(options.format, SourceFormat::Auto);
    }

    #[test]
    fn auto_detection_is_deterministic() {
        let line = b"       IDENTIFICATION DIVISION.";
        assert_eq!(FormatNormalizer::detect(line), FormatNormalizer::detect(line));
    }

    #[test]
    fn free_marker_at_line_start_detects_free() {
        assert_eq!(FormatNormalizer::detect(b">>SOURCE FORMAT FREE"), Some(SourceFormat::Free));
    }
}
