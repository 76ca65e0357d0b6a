use std::path::PathBuf;

use thiserror::Error;

use crate::diagnostic::Diagnostic;

/// Errors raised while building or querying the AST.
///
/// `UserArgument` and `FileNotFound` abort compilation of the unit and are
/// surfaced to the user. `IncludeFileLoop` is recoverable: the include
/// directive that receives it prunes the offending file argument and
/// continues. `TypeMismatch` is a programmer error and is never recovered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    UserArgument(String),

    #[error("\"{file}\" could not be found in source path ({})", source_path.display())]
    FileNotFound { file: String, source_path: PathBuf },

    #[error("\"{file}\" is already being included")]
    IncludeFileLoop { file: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

impl Error {
    /// Convert to a user-facing diagnostic for rendering by the driver.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Error::UserArgument(msg) => Diagnostic::error(msg.clone()),
            Error::FileNotFound { .. } => Diagnostic::error(self.to_string())
                .with_help("check that the file exists under the configured source path".to_string()),
            Error::IncludeFileLoop { file } => Diagnostic::error(self.to_string())
                .with_note(format!("\"{}\" was dropped from the include list", file)),
            Error::TypeMismatch { .. } => Diagnostic::error(self.to_string()),
        }
    }
}
