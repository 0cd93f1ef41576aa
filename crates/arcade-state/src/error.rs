//! Error types for state decoding and storage.

use thiserror::Error;

/// Error categories reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: JSON value has the wrong shape
    TypeMismatch,
    /// E002: Token is not a member of the enum
    InvalidEnumToken,
    /// E003: `__version` has no registered decoder
    UnsupportedVersion,
    /// E004: ID reference does not resolve, or an ID is declared twice
    Reference,
    /// E005: Raw input is not JSON
    MalformedJson,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::TypeMismatch => "E001",
            ErrorCode::InvalidEnumToken => "E002",
            ErrorCode::UnsupportedVersion => "E003",
            ErrorCode::Reference => "E004",
            ErrorCode::MalformedJson => "E005",
        }
    }
}

/// Error while turning a JSON value into a typed entity.
///
/// Every variant carries the property path of the offending value, e.g.
/// `sCPDesignerState(v2).sCPConfig(v2).sControlSets[2].controlIds[0]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("[E001] {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("[E002] {path}: invalid {enum_name} value: {token}")]
    InvalidEnumToken {
        path: String,
        enum_name: &'static str,
        token: String,
    },

    #[error("[E003] {path}: unsupported version: {version}")]
    UnsupportedVersion { path: String, version: String },

    #[error("[E004] {path}: '{id}' is not a valid {kind} ID")]
    DanglingReference {
        path: String,
        kind: &'static str,
        id: String,
    },

    #[error("[E004] {path}: duplicate {kind} ID '{id}'")]
    DuplicateId {
        path: String,
        kind: &'static str,
        id: String,
    },

    #[error("[E005] {context} is not valid JSON: {message}")]
    MalformedJson { context: String, message: String },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            DecodeError::InvalidEnumToken { .. } => ErrorCode::InvalidEnumToken,
            DecodeError::UnsupportedVersion { .. } => ErrorCode::UnsupportedVersion,
            DecodeError::DanglingReference { .. } | DecodeError::DuplicateId { .. } => {
                ErrorCode::Reference
            }
            DecodeError::MalformedJson { .. } => ErrorCode::MalformedJson,
        }
    }

    /// Returns the property path (or input context) the error refers to.
    pub fn path(&self) -> &str {
        match self {
            DecodeError::TypeMismatch { path, .. }
            | DecodeError::InvalidEnumToken { path, .. }
            | DecodeError::UnsupportedVersion { path, .. }
            | DecodeError::DanglingReference { path, .. }
            | DecodeError::DuplicateId { path, .. } => path,
            DecodeError::MalformedJson { context, .. } => context,
        }
    }
}

/// Error while constructing a configuration in code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("duplicate {kind} ID '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    #[error("{kind} handle {index} out of bounds (size: {size})")]
    HandleOutOfBounds {
        kind: &'static str,
        index: usize,
        size: usize,
    },
}

/// Error raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path} is corrupt: {message}")]
    Corrupt { path: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DecodeError::UnsupportedVersion {
            path: "sState".to_string(),
            version: "999".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnsupportedVersion);
        assert_eq!(err.code().code(), "E003");

        let err = DecodeError::DuplicateId {
            path: "cfg.sControls[1].id".to_string(),
            kind: "Control",
            id: "c1".to_string(),
        };
        assert_eq!(err.code().code(), "E004");
    }

    #[test]
    fn test_display_includes_path() {
        let err = DecodeError::DanglingReference {
            path: "cfg.sControlSets[0].controlIds[0]".to_string(),
            kind: "Control",
            id: "nonexistent".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("controlIds[0]"));
        assert!(msg.contains("nonexistent"));
        assert_eq!(err.path(), "cfg.sControlSets[0].controlIds[0]");
    }
}
