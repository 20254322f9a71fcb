//! Core types and traits for the mcsl Monte Carlo simulation framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the mcsl workspace:
//! variable values and kinds, the validated variable schema, error
//! types, and the [`HistorySource`] trait that decouples statistics
//! from the engine that produced the history.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod schema;
pub mod traits;
pub mod value;

pub use error::{AccessError, CallbackError, SchemaError};
pub use schema::{is_reserved, VariableDef, VariableSchema, RESERVED_NAMES};
pub use traits::HistorySource;
pub use value::{FromValue, Value, ValueKind};
