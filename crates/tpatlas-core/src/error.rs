use thiserror::Error;

#[derive(Debug, Error)]
pub enum TpAtlasError {
    #[error("Rename pattern '{pattern}' failed for '{id}': {reason}")]
    RenamePattern {
        pattern: String,
        id: String,
        reason: String,
    },
    #[error("Animation '{animation}' contains image '{image}' that does not exist in file '{document}'")]
    DanglingAnimationReference {
        animation: String,
        image: String,
        document: String,
    },
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Frame iterator misuse: {0}")]
    IteratorState(String),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Machine-readable error classification, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    RenamePattern,
    DanglingAnimationReference,
    /// Never produced as an `Err`; see `FrameStep::Missing`.
    MissingFrameReference,
    MalformedDocument,
    InvalidConfig,
    IteratorState,
    Serialization,
}

impl TpAtlasError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RenamePattern { .. } => ErrorKind::RenamePattern,
            Self::DanglingAnimationReference { .. } => ErrorKind::DanglingAnimationReference,
            Self::MalformedDocument(_) => ErrorKind::MalformedDocument,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
            Self::IteratorState(_) => ErrorKind::IteratorState,
            Self::Json(_) => ErrorKind::Serialization,
        }
    }

    /// Source document named by the error, if any.
    pub fn document(&self) -> Option<&str> {
        match self {
            Self::DanglingAnimationReference { document, .. } => Some(document),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::RenamePattern => "rename-pattern",
            Self::DanglingAnimationReference => "dangling-animation-reference",
            Self::MissingFrameReference => "missing-frame-reference",
            Self::MalformedDocument => "malformed-document",
            Self::InvalidConfig => "invalid-config",
            Self::IteratorState => "iterator-state",
            Self::Serialization => "serialization",
        };
        f.write_str(s)
    }
}

pub type Result<T> = std::result::Result<T, TpAtlasError>;
