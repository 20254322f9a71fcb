//! Weighted discrete choice and Markov chain helpers for mcsl simulations.
//!
//! These helpers are independent of the engine. Callbacks typically
//! build them in the begin callback, park them in the trajectory's
//! auxiliary store, and draw from them with the trajectory's own
//! random stream.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod discrete;
pub mod error;
pub mod markov;

pub use discrete::DiscreteRandomVariable;
pub use error::RandomError;
pub use markov::SimpleMarkovChain;
