//! Locates `COPY name` statements and splices the copybook's tokens into
//! the token stream in place, one pass, restarting at the splice point so
//! nested `COPY`s are expanded on a later iteration.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::base::FileIndex;
use crate::diagnostics::Reporter;
use crate::format::{CompileOptions, FormatNormalizer};
use crate::lexer::Lexer;
use crate::source::SourceReader;
use crate::token::Token;

/// The external collaborator that turns a relative path into bytes.
/// Implementations may read from disk, memory, a VFS, or a test fixture —
/// the core never opens a file itself.
pub trait FileProvider {
    fn read(&self, path: &Path) -> Result<Vec<u8>, FileProviderError>;
}

#[derive(Debug, Error)]
#[error("{path}: {message}")]
pub struct FileProviderError {
    pub path: PathBuf,
    pub message: String,
}

/// Expands `COPY` statements in a token list.
pub struct CopybookExpander<'a> {
    provider: &'a dyn FileProvider,
}

impl<'a> CopybookExpander<'a> {
    pub fn new(provider: &'a dyn FileProvider) -> Self {
        Self { provider }
    }

    /// Run the single expansion pass described in the module doc comment.
    /// Errors reading a named copybook are reported through `reporter` as
    /// recoverable diagnostics; the `COPY` statement tokens are simply
    /// dropped rather than spliced in that case, so analysis can continue.
    pub fn expand(
        &self,
        tokens: &mut Vec<Token>,
        options: &mut CompileOptions,
        reporter: &mut dyn Reporter,
    ) {
        let mut index = 0;
        while index < tokens.len() {
            if !tokens[index].lexeme_eq("COPY") {
                index += 1;
                continue;
            }

            let statement_start = index;
            let Some(name_token) = tokens.get(index + 1) else {
                index += 1;
                continue;
            };
            let copybook_name = name_token.lexeme.to_string();

            let mut end = index + 2;
            while end < tokens.len() && !tokens[end].lexeme_eq(".") {
                end += 1;
            }
            if end < tokens.len() {
                end += 1; // consume the terminating period
            }

            match self.load_copybook(&copybook_name, options, reporter) {
                Some(expanded) => {
                    tokens.splice(statement_start..end, expanded);
                }
                None => {
                    tokens.drain(statement_start..end);
                }
            }

            index = statement_start;
        }
    }

    fn load_copybook(
        &self,
        name: &str,
        options: &mut CompileOptions,
        reporter: &mut dyn Reporter,
    ) -> Option<Vec<Token>> {
        let path = copybook_path(name);
        let bytes = match self.provider.read(&path) {
            Ok(bytes) => bytes,
            Err(error) => {
                tracing::warn!(%error, "copybook read failed");
                self.report_missing_copybook(name, reporter);
                return None;
            }
        };

        let file = options.file_index(&path);
        Some(lex_copybook_bytes(&bytes, file))
    }

    fn report_missing_copybook(&self, name: &str, reporter: &mut dyn Reporter) {
        use crate::base::Position;
        use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};
        reporter.report(
            Diagnostic::new(
                DiagnosticCode::UnexpectedToken,
                FileIndex::ENTRY_POINT,
                Position::new(0, 0),
            )
            .with_severity(Severity::Recovery)
            .with_headline(format!("copybook '{name}' could not be read")),
        );
    }
}

/// The analyzer matches `COPY name` case-insensitively; resolving that name
/// to an on-disk path is left to OS filename semantics, so no case folding
/// happens here.
fn copybook_path(name: &str) -> PathBuf {
    PathBuf::from(format!("{name}.cob"))
}

fn lex_copybook_bytes(bytes: &[u8], file: FileIndex) -> Vec<Token> {
    let mut normalizer = FormatNormalizer::new();
    let lexer = Lexer::new();
    let mut local_options = CompileOptions::new(PathBuf::new());
    let mut tokens = Vec::new();
    let mut sink = crate::diagnostics::CollectingReporter::new();
    for (line_number, line) in SourceReader::new(bytes) {
        let normalized = normalizer.normalize(line, &mut local_options);
        lexer.lex_line(&normalized, line_number, file, &mut tokens, &mut sink);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Position;
    use crate::diagnostics::CollectingReporter;
    use crate::token::{TokenContext, TokenKind};

    struct FixedProvider;
    impl FileProvider for FixedProvider {
        fn read(&self, path: &Path) -> Result<Vec<u8>, FileProviderError> {
            if path == Path::new("BOOK1.cob") {
                Ok(b"       MOVE 1 TO X.".to_vec())
            } else {
                Err(FileProviderError {
                    path: path.to_path_buf(),
                    message: "not found".into(),
                })
            }
        }
    }

    fn token(lexeme: &str) -> Token {
        Token::new(
            lexeme,
            TokenKind::Reserved,
            TokenContext::None,
            Position::new(1, 1),
            FileIndex::ENTRY_POINT,
        )
    }

    #[test]
    fn copybook_statement_is_replaced_preserving_surrounding_order() {
        let mut tokens = vec![
            token("DISPLAY"),
            token("COPY"),
            token("BOOK1"),
            token("."),
            token("STOP"),
        ];
        let provider = FixedProvider;
        let mut options = CompileOptions::new("main.cob".into());
        let mut reporter = CollectingReporter::new();
        CopybookExpander::new(&provider).expand(&mut tokens, &mut options, &mut reporter);

        assert!(!tokens.iter().any(|t| t.lexeme_eq("COPY")));
        assert_eq!(tokens.first().unwrap().lexeme, "DISPLAY");
        assert_eq!(tokens.last().unwrap().lexeme, "STOP");
    }

    #[test]
    fn idempotent_when_no_copy_present() {
        let mut tokens = vec![token("DISPLAY"), token("STOP")];
        let before = tokens.len();
        let provider = FixedProvider;
        let mut options = CompileOptions::new("main.cob".into());
        let mut reporter = CollectingReporter::new();
        CopybookExpander::new(&provider).expand(&mut tokens, &mut options, &mut reporter);
        assert_eq!(tokens.len(), before);
    }

    #[test]
    fn missing_copybook_reports_and_drops_statement() {
        let mut tokens = vec![token("COPY"), token("MISSING"), token(".")];
        let provider = FixedProvider;
        let mut options = CompileOptions::new("main.cob".into());
        let mut reporter = CollectingReporter::new();
        CopybookExpander::new(&provider).expand(&mut tokens, &mut options, &mut reporter);
        assert!(tokens.is_empty());
        assert_eq!(reporter.diagnostics().len(), 1);
    }
}
