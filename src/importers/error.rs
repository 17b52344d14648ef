use std::{fmt, io, path::PathBuf};

use thiserror::Error;

use crate::gfx::resources::backend::BackendError;

/// Attribute list a face index points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::TexCoord => "texture coordinate",
            AttributeKind::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Reasons an import fails. Any of them aborts the whole import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("unsupported model format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line}: cannot parse '{token}'")]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{path}:{line}: material '{name}' was never declared")]
    UnknownMaterial {
        path: PathBuf,
        line: usize,
        name: String,
    },

    #[error("{path}:{line}: {kind} index {index} is out of range ({available} defined)")]
    IndexOutOfRange {
        path: PathBuf,
        line: usize,
        kind: AttributeKind,
        index: i64,
        available: usize,
    },

    #[error("{path}:{line}: '{directive}' is missing an operand")]
    MissingOperand {
        path: PathBuf,
        line: usize,
        directive: String,
    },

    #[error("{path}:{line}: face needs at least 3 vertices, found {count}")]
    DegenerateFace {
        path: PathBuf,
        line: usize,
        count: usize,
    },

    #[error("{path}:{line}: face has {count} vertices and triangulation is disabled")]
    NonTriangularFace {
        path: PathBuf,
        line: usize,
        count: usize,
    },

    #[error("{path}:{line}: failed to load texture {texture}")]
    Texture {
        path: PathBuf,
        line: usize,
        texture: PathBuf,
        #[source]
        source: BackendError,
    },

    #[error("failed to upload imported geometry")]
    Backend(#[from] BackendError),
}

impl ImportError {
    /// 1-based line the error was found on, if it came from the file contents.
    pub fn line(&self) -> Option<usize> {
        match self {
            ImportError::Parse { line, .. }
            | ImportError::UnknownMaterial { line, .. }
            | ImportError::IndexOutOfRange { line, .. }
            | ImportError::MissingOperand { line, .. }
            | ImportError::DegenerateFace { line, .. }
            | ImportError::NonTriangularFace { line, .. }
            | ImportError::Texture { line, .. } => Some(*line),
            ImportError::UnsupportedFormat { .. }
            | ImportError::Io { .. }
            | ImportError::Backend(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_file_and_line() {
        let err = ImportError::IndexOutOfRange {
            path: PathBuf::from("cube.obj"),
            line: 12,
            kind: AttributeKind::TexCoord,
            index: 9,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "cube.obj:12: texture coordinate index 9 is out of range (4 defined)"
        );
        assert_eq!(err.line(), Some(12));

        let err = ImportError::UnsupportedFormat {
            path: PathBuf::from("scene.fbx"),
        };
        assert_eq!(err.to_string(), "unsupported model format: scene.fbx");
        assert_eq!(err.line(), None);
    }
}
