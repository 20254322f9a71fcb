//! Errors from building tables and computing statistics.

use std::error::Error;
use std::fmt;

use mcsl_core::ValueKind;

/// Errors from the statistics layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatsError {
    /// The variable is not declared in the schema.
    UnknownVariable {
        /// The name that was looked up.
        name: String,
    },
    /// The variable's kind has no numeric reading.
    UnsupportedType {
        /// The variable.
        name: String,
        /// Its declared kind.
        kind: ValueKind,
    },
    /// A histogram was requested with zero bins.
    InvalidBins {
        /// The requested bin count.
        bins: usize,
    },
    /// A trajectory has no recorded history (the ensemble has not run).
    NoHistory {
        /// The trajectory index.
        trajectory: usize,
    },
    /// A trajectory recorded fewer or more steps than the ensemble's
    /// step count, typically after an aborted run.
    RaggedHistory {
        /// The trajectory index.
        trajectory: usize,
        /// Steps it recorded.
        len: usize,
        /// Steps expected.
        expected: usize,
    },
    /// Rows passed to a table constructor have different lengths or
    /// the table would be empty.
    MalformedTable {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVariable { name } => write!(f, "variable '{name}' does not exist"),
            Self::UnsupportedType { name, kind } => {
                write!(f, "variable '{name}' is {kind}; statistics need a numeric kind")
            }
            Self::InvalidBins { bins } => write!(f, "bin count {bins} must be at least 1"),
            Self::NoHistory { trajectory } => {
                write!(f, "trajectory {trajectory} has no recorded history")
            }
            Self::RaggedHistory {
                trajectory,
                len,
                expected,
            } => write!(
                f,
                "trajectory {trajectory} recorded {len} steps, expected {expected}"
            ),
            Self::MalformedTable { reason } => write!(f, "malformed table: {reason}"),
        }
    }
}

impl Error for StatsError {}
