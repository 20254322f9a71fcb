//! Errors from building random helpers.

use std::error::Error;
use std::fmt;

/// Construction errors for [`DiscreteRandomVariable`](crate::DiscreteRandomVariable)
/// and [`SimpleMarkovChain`](crate::SimpleMarkovChain).
#[derive(Clone, Debug, PartialEq)]
pub enum RandomError {
    /// No outcomes were supplied.
    EmptyAlphabet,
    /// A weight is negative, NaN or infinite.
    InvalidWeight {
        /// Position of the offending weight.
        index: usize,
        /// The weight.
        weight: f64,
    },
    /// Every weight is zero.
    AllWeightsZero,
    /// The weighted sampler rejected the weights.
    Sampler {
        /// Description from the sampler.
        reason: String,
    },
    /// A Markov chain was given no states.
    NoStates,
    /// A state appears twice in the state list.
    DuplicateState {
        /// Position of the repeated state.
        index: usize,
    },
    /// A transition endpoint or the initial state is not in the state list.
    UnknownState {
        /// Where the unknown state appeared.
        context: &'static str,
    },
}

impl fmt::Display for RandomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAlphabet => write!(f, "alphabet is empty"),
            Self::InvalidWeight { index, weight } => {
                write!(f, "weight {index} is {weight}; weights must be finite and >= 0")
            }
            Self::AllWeightsZero => write!(f, "all weights are zero"),
            Self::Sampler { reason } => write!(f, "weighted sampler: {reason}"),
            Self::NoStates => write!(f, "markov chain has no states"),
            Self::DuplicateState { index } => write!(f, "state {index} is listed twice"),
            Self::UnknownState { context } => write!(f, "unknown state in {context}"),
        }
    }
}

impl Error for RandomError {}
