//! Weighted discrete random variables.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

use crate::error::RandomError;

/// Check weights are finite and nonnegative with at least one positive.
pub(crate) fn check_weights(weights: &[f64]) -> Result<(), RandomError> {
    for (index, &weight) in weights.iter().enumerate() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(RandomError::InvalidWeight { index, weight });
        }
    }
    if weights.iter().all(|&w| w == 0.0) {
        return Err(RandomError::AllWeightsZero);
    }
    Ok(())
}

pub(crate) fn sampler(weights: &[f64]) -> Result<WeightedIndex<f64>, RandomError> {
    check_weights(weights)?;
    WeightedIndex::new(weights.iter().copied()).map_err(|e| RandomError::Sampler {
        reason: e.to_string(),
    })
}

/// A finite set of outcomes, each drawn with probability proportional
/// to its weight.
///
/// ```
/// use mcsl_random::DiscreteRandomVariable;
/// use rand::SeedableRng;
///
/// let coin = DiscreteRandomVariable::new([(-1, 1.0), (1, 1.0)]).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
/// let step = *coin.evaluate(&mut rng);
/// assert!(step == -1 || step == 1);
/// ```
#[derive(Clone, Debug)]
pub struct DiscreteRandomVariable<T> {
    alphabet: Vec<T>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
}

impl<T> DiscreteRandomVariable<T> {
    /// Build from `(outcome, weight)` pairs.
    ///
    /// # Errors
    ///
    /// [`RandomError::EmptyAlphabet`] for no pairs,
    /// [`RandomError::InvalidWeight`] for a negative or non-finite weight,
    /// [`RandomError::AllWeightsZero`] if no outcome can be drawn.
    pub fn new(pairs: impl IntoIterator<Item = (T, f64)>) -> Result<Self, RandomError> {
        let (alphabet, weights): (Vec<T>, Vec<f64>) = pairs.into_iter().unzip();
        if alphabet.is_empty() {
            return Err(RandomError::EmptyAlphabet);
        }
        let index = sampler(&weights)?;
        Ok(Self {
            alphabet,
            weights,
            index,
        })
    }

    /// Draw one outcome.
    pub fn evaluate<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.alphabet[self.index.sample(rng)]
    }

    /// Possible outcomes, in construction order.
    pub fn alphabet(&self) -> &[T] {
        &self.alphabet
    }

    /// Weights, aligned with [`alphabet()`](Self::alphabet).
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Normalized probability of each outcome.
    pub fn probabilities(&self) -> Vec<f64> {
        let total: f64 = self.weights.iter().sum();
        self.weights.iter().map(|w| w / total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn rejects_bad_weights() {
        assert_eq!(
            DiscreteRandomVariable::<u8>::new([]).unwrap_err(),
            RandomError::EmptyAlphabet
        );
        assert_eq!(
            DiscreteRandomVariable::new([('a', 1.0), ('b', -0.5)]).unwrap_err(),
            RandomError::InvalidWeight {
                index: 1,
                weight: -0.5
            }
        );
        assert!(matches!(
            DiscreteRandomVariable::new([('a', f64::NAN)]).unwrap_err(),
            RandomError::InvalidWeight { index: 0, .. }
        ));
        assert_eq!(
            DiscreteRandomVariable::new([('a', 0.0), ('b', 0.0)]).unwrap_err(),
            RandomError::AllWeightsZero
        );
    }

    #[test]
    fn zero_weight_outcome_never_drawn() {
        let rv = DiscreteRandomVariable::new([("never", 0.0), ("always", 2.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            assert_eq!(*rv.evaluate(&mut rng), "always");
        }
    }

    #[test]
    fn frequencies_follow_weights() {
        let rv = DiscreteRandomVariable::new([(0usize, 1.0), (1, 3.0)]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut counts = [0usize; 2];
        for _ in 0..20_000 {
            counts[*rv.evaluate(&mut rng)] += 1;
        }
        let share = counts[1] as f64 / 20_000.0;
        assert!((share - 0.75).abs() < 0.02, "share = {share}");
        assert_eq!(rv.probabilities(), vec![0.25, 0.75]);
    }

    proptest! {
        #[test]
        fn draws_stay_in_alphabet(weights in proptest::collection::vec(0.0f64..10.0, 1..8), seed: u64) {
            prop_assume!(weights.iter().any(|&w| w > 0.0));
            let rv = DiscreteRandomVariable::new(weights.iter().copied().enumerate()).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..32 {
                let i = *rv.evaluate(&mut rng);
                prop_assert!(i < weights.len());
                prop_assert!(weights[i] > 0.0);
            }
        }
    }
}
