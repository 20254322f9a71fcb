//! Error types shared across the mcsl workspace.
//!
//! Organized by subsystem: schema declaration, per-callback variable
//! access, and callback failure. Engine and statistics errors live in
//! their own crates and wrap these where needed.

use std::error::Error;
use std::fmt;

use crate::value::ValueKind;

/// Errors detected while validating a variable declaration list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchemaError {
    /// A variable name is the empty string.
    EmptyName {
        /// Position of the offending declaration.
        index: usize,
    },
    /// Two declarations share a name.
    DuplicateName {
        /// The repeated name.
        name: String,
    },
    /// A name collides with a reserved accessor identifier.
    ReservedName {
        /// The reserved name that was declared.
        name: String,
    },
    /// A default value's kind differs from the declared kind.
    DefaultKindMismatch {
        /// The variable whose default is wrong.
        name: String,
        /// The declared kind.
        declared: ValueKind,
        /// The kind of the supplied default.
        found: ValueKind,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { index } => write!(f, "variable {index} has an empty name"),
            Self::DuplicateName { name } => write!(f, "variable '{name}' is declared twice"),
            Self::ReservedName { name } => {
                write!(f, "'{name}' is a reserved name and cannot be a variable")
            }
            Self::DefaultKindMismatch {
                name,
                declared,
                found,
            } => write!(
                f,
                "default for '{name}' is {found}, but the variable is declared {declared}"
            ),
        }
    }
}

impl Error for SchemaError {}

/// Errors from reading or writing trajectory state inside a callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessError {
    /// The name is not declared in the schema.
    UnknownVariable {
        /// The name that was looked up.
        name: String,
    },
    /// A value's kind differs from the variable's declared kind.
    ///
    /// On a write, the current value is left unchanged.
    TypeMismatch {
        /// The variable being accessed.
        name: String,
        /// The declared kind.
        expected: ValueKind,
        /// The kind that was supplied or requested.
        found: ValueKind,
    },
    /// `past(n)` was asked for a step that is not available.
    ///
    /// Valid offsets satisfy `1 <= n < steps_taken`.
    PastOutOfRange {
        /// The requested offset.
        n: usize,
        /// Steps completed when the call was made.
        steps_taken: usize,
    },
    /// An auxiliary name is reserved or declared in the schema.
    AuxiliaryNameConflict {
        /// The conflicting name.
        name: String,
    },
    /// No auxiliary value is stored under this name.
    UnknownAuxiliary {
        /// The name that was looked up.
        name: String,
    },
    /// The stored auxiliary value is not of the requested Rust type.
    AuxiliaryTypeMismatch {
        /// The auxiliary name.
        name: String,
        /// The requested type, from `std::any::type_name`.
        requested: &'static str,
    },
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVariable { name } => write!(f, "variable '{name}' does not exist"),
            Self::TypeMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "variable '{name}' is {expected}, but a {found} value was used"
            ),
            Self::PastOutOfRange { n, steps_taken } => write!(
                f,
                "past({n}) is out of range: need 1 <= n < {steps_taken} (steps taken)"
            ),
            Self::AuxiliaryNameConflict { name } => write!(
                f,
                "'{name}' is reserved or declared as a variable and cannot hold an auxiliary value"
            ),
            Self::UnknownAuxiliary { name } => {
                write!(f, "no auxiliary value named '{name}'")
            }
            Self::AuxiliaryTypeMismatch { name, requested } => {
                write!(f, "auxiliary value '{name}' is not a {requested}")
            }
        }
    }
}

impl Error for AccessError {}

/// Error returned by a begin or step callback.
///
/// Access errors convert via `From`, so callbacks can use `?` on
/// context operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackError {
    /// A context read or write failed.
    Access(AccessError),
    /// The callback reported its own failure.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl CallbackError {
    /// Build a [`CallbackError::Failed`] from any displayable reason.
    pub fn failed(reason: impl fmt::Display) -> Self {
        Self::Failed {
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for CallbackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access(e) => write!(f, "access error: {e}"),
            Self::Failed { reason } => write!(f, "callback failed: {reason}"),
        }
    }
}

impl Error for CallbackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Access(e) => Some(e),
            Self::Failed { .. } => None,
        }
    }
}

impl From<AccessError> for CallbackError {
    fn from(e: AccessError) -> Self {
        Self::Access(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_error_chains_access_source() {
        let err: CallbackError = AccessError::UnknownVariable { name: "y".into() }.into();
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("variable 'y' does not exist"));
        assert!(CallbackError::failed("boom").source().is_none());
    }

    #[test]
    fn past_range_message_names_bounds() {
        let msg = AccessError::PastOutOfRange {
            n: 3,
            steps_taken: 3,
        }
        .to_string();
        assert!(msg.contains("past(3)"));
        assert!(msg.contains("n < 3"));
    }
}
