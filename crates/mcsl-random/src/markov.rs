//! Markov chains with constant transition probabilities.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::discrete::sampler;
use crate::error::RandomError;

/// A Markov chain whose transition weights never change.
///
/// Each state's outgoing weights are normalized into a sampler once, at
/// construction. A state with no outgoing weight is absorbing.
#[derive(Clone, Debug)]
pub struct SimpleMarkovChain<S> {
    states: Vec<S>,
    /// `rows[i]` samples the next state index from state `i`.
    rows: Vec<Option<WeightedIndex<f64>>>,
    current: usize,
}

impl<S: PartialEq> SimpleMarkovChain<S> {
    /// Build a chain from its states, `(from, to, weight)` transitions
    /// and initial state.
    ///
    /// If several transitions share the same `(from, to)` pair the first
    /// one wins.
    ///
    /// # Errors
    ///
    /// [`RandomError::NoStates`], [`RandomError::DuplicateState`],
    /// [`RandomError::UnknownState`] for endpoints or an initial state
    /// outside `states`, and [`RandomError::InvalidWeight`] for negative
    /// or non-finite weights.
    pub fn new(
        states: Vec<S>,
        transitions: Vec<(S, S, f64)>,
        initial: S,
    ) -> Result<Self, RandomError> {
        if states.is_empty() {
            return Err(RandomError::NoStates);
        }
        for (index, state) in states.iter().enumerate() {
            if states[..index].contains(state) {
                return Err(RandomError::DuplicateState { index });
            }
        }
        let position = |s: &S| states.iter().position(|x| x == s);

        let n = states.len();
        let mut weights = vec![vec![None::<f64>; n]; n];
        for (index, (from, to, weight)) in transitions.iter().enumerate() {
            let from = position(from).ok_or(RandomError::UnknownState {
                context: "transition source",
            })?;
            let to = position(to).ok_or(RandomError::UnknownState {
                context: "transition target",
            })?;
            if !weight.is_finite() || *weight < 0.0 {
                return Err(RandomError::InvalidWeight {
                    index,
                    weight: *weight,
                });
            }
            if weights[from][to].is_none() {
                weights[from][to] = Some(*weight);
            }
        }
        let current = position(&initial).ok_or(RandomError::UnknownState {
            context: "initial state",
        })?;

        let mut rows = Vec::with_capacity(n);
        for row in weights {
            let row: Vec<f64> = row.into_iter().map(|w| w.unwrap_or(0.0)).collect();
            if row.iter().all(|&w| w == 0.0) {
                rows.push(None);
            } else {
                rows.push(Some(sampler(&row)?));
            }
        }

        Ok(Self {
            states,
            rows,
            current,
        })
    }
}

impl<S> SimpleMarkovChain<S> {
    /// The current state.
    pub fn state(&self) -> &S {
        &self.states[self.current]
    }

    /// All states, in construction order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Take one random transition and return the new state.
    pub fn forward<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &S {
        if let Some(row) = &self.rows[self.current] {
            self.current = row.sample(rng);
        }
        self.state()
    }
}
