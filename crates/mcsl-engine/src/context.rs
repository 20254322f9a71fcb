//! Execution context passed to begin and step callbacks.
//!
//! [`TrajectoryContext`] provides split-borrow access to one trajectory:
//! kind-checked reads and writes of the current variable values,
//! read-only [`PastSnapshot`]s of completed steps, the untracked
//! auxiliary store, and the trajectory's own random stream.

use std::any::Any;

use mcsl_core::schema::is_reserved;
use mcsl_core::{AccessError, FromValue, Value, VariableSchema};
use rand_chacha::ChaCha8Rng;

use crate::auxiliary::AuxStore;

/// View of one trajectory for the duration of a single callback.
///
/// Constructed fresh by the runner for every invocation and dropped
/// when the callback returns. Both access styles, the typed
/// [`get`](Self::get)/[`set`](Self::set) pair and the dynamic
/// [`get_state`](Self::get_state)/[`set_state`](Self::set_state) pair,
/// run through the same kind check.
///
/// Only the runner builds contexts, so state and history always have
/// one entry per schema variable:
///
/// ```compile_fail
/// use mcsl_core::{VariableDef, VariableSchema};
/// use mcsl_engine::{AuxStore, TrajectoryContext};
/// use rand::SeedableRng;
///
/// let schema = VariableSchema::new(vec![VariableDef::integer("x", 0)]).unwrap();
/// let mut state = Vec::new();
/// let history = Vec::new();
/// let mut aux = AuxStore::new();
/// let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
/// let _ = TrajectoryContext::new(&schema, &mut state, &history, &mut aux, &mut rng, 0);
/// ```
pub struct TrajectoryContext<'a> {
    schema: &'a VariableSchema,
    state: &'a mut [Value],
    history: &'a [Vec<Value>],
    aux: &'a mut AuxStore,
    rng: &'a mut ChaCha8Rng,
    steps_taken: usize,
}

impl<'a> TrajectoryContext<'a> {
    /// Construct a context over a trajectory's parts.
    ///
    /// `state` holds one value per schema variable and `history` one
    /// column per schema variable, each `steps_taken` long.
    pub(crate) fn new(
        schema: &'a VariableSchema,
        state: &'a mut [Value],
        history: &'a [Vec<Value>],
        aux: &'a mut AuxStore,
        rng: &'a mut ChaCha8Rng,
        steps_taken: usize,
    ) -> Self {
        debug_assert_eq!(state.len(), schema.len());
        debug_assert_eq!(history.len(), schema.len());
        Self {
            schema,
            state,
            history,
            aux,
            rng,
            steps_taken,
        }
    }

    /// The schema this trajectory runs under.
    pub fn schema(&self) -> &VariableSchema {
        self.schema
    }

    /// Number of steps completed before this callback started.
    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    fn index_of(&self, name: &str) -> Result<usize, AccessError> {
        self.schema
            .index_of(name)
            .ok_or_else(|| AccessError::UnknownVariable { name: name.into() })
    }

    fn check_kind(
        &self,
        index: usize,
        name: &str,
        found: mcsl_core::ValueKind,
    ) -> Result<(), AccessError> {
        let expected = self.state[index].kind();
        if expected == found {
            Ok(())
        } else {
            Err(AccessError::TypeMismatch {
                name: name.into(),
                expected,
                found,
            })
        }
    }

    // ── Dynamic access ─────────────────────────────────────────────

    /// Current value of a schema variable.
    pub fn get_state(&self, name: &str) -> Result<&Value, AccessError> {
        let index = self.index_of(name)?;
        Ok(&self.state[index])
    }

    /// Replace the current value of a schema variable.
    ///
    /// # Errors
    ///
    /// [`AccessError::UnknownVariable`] if `name` is not declared,
    /// [`AccessError::TypeMismatch`] if `value` has another kind. The
    /// current value is unchanged on error.
    pub fn set_state(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        let index = self.index_of(name)?;
        self.check_kind(index, name, value.kind())?;
        self.state[index] = value;
        Ok(())
    }

    // ── Typed access ───────────────────────────────────────────────

    /// Current value of a schema variable as a Rust type.
    ///
    /// `T` must be the exact type for the declared kind (`i64`, `f64`,
    /// `bool` or `String`); nothing is coerced.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, AccessError> {
        let index = self.index_of(name)?;
        self.check_kind(index, name, T::KIND)?;
        T::from_value(&self.state[index]).ok_or_else(|| AccessError::TypeMismatch {
            name: name.into(),
            expected: self.state[index].kind(),
            found: T::KIND,
        })
    }

    /// Write a schema variable from any type convertible into [`Value`].
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), AccessError> {
        self.set_state(name, value.into())
    }

    /// Read, transform and write back a schema variable.
    ///
    /// Returns the value written.
    pub fn update<T, F>(&mut self, name: &str, f: F) -> Result<T, AccessError>
    where
        T: FromValue + Into<Value> + Clone,
        F: FnOnce(T) -> T,
    {
        let next = f(self.get::<T>(name)?);
        self.set_state(name, next.clone().into())?;
        Ok(next)
    }

    // ── Past snapshots ─────────────────────────────────────────────

    /// Read-only snapshot of every schema variable `n` completed steps back.
    ///
    /// `past(1)` is the most recently completed step. Valid offsets
    /// satisfy `1 <= n < steps_taken`, so no snapshot is available in
    /// the begin callback or during the first two steps.
    pub fn past(&self, n: usize) -> Result<PastSnapshot<'a>, AccessError> {
        if n < 1 || n >= self.steps_taken {
            return Err(AccessError::PastOutOfRange {
                n,
                steps_taken: self.steps_taken,
            });
        }
        let row = self.steps_taken - n;
        let values = self.history.iter().map(|column| column[row].clone()).collect();
        Ok(PastSnapshot {
            schema: self.schema,
            values,
            steps_back: n,
        })
    }

    // ── Auxiliary values ───────────────────────────────────────────

    fn check_aux_name(&self, name: &str) -> Result<(), AccessError> {
        if is_reserved(name) || self.schema.contains(name) {
            Err(AccessError::AuxiliaryNameConflict { name: name.into() })
        } else {
            Ok(())
        }
    }

    /// Store an untracked value on the trajectory.
    ///
    /// The name must be neither reserved nor a schema variable.
    pub fn set_aux<T: Any + Send>(&mut self, name: &str, value: T) -> Result<(), AccessError> {
        self.check_aux_name(name)?;
        self.aux.insert(name, value);
        Ok(())
    }

    /// Borrow an auxiliary value.
    pub fn aux<T: Any>(&self, name: &str) -> Result<&T, AccessError> {
        self.aux.get(name)
    }

    /// Mutably borrow an auxiliary value.
    pub fn aux_mut<T: Any>(&mut self, name: &str) -> Result<&mut T, AccessError> {
        self.aux.get_mut(name)
    }

    /// Mutably borrow an auxiliary value together with the random stream.
    ///
    /// Lets a stored helper draw from the trajectory's generator without
    /// fighting the borrow of the context.
    pub fn aux_with_rng<T: Any>(
        &mut self,
        name: &str,
    ) -> Result<(&mut T, &mut ChaCha8Rng), AccessError> {
        let value = self.aux.get_mut(name)?;
        Ok((value, &mut *self.rng))
    }

    /// Whether an auxiliary value is stored under `name`.
    pub fn has_aux(&self, name: &str) -> bool {
        self.aux.contains(name)
    }

    /// The trajectory's private random stream.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        self.rng
    }
}

/// Immutable values of every schema variable at one completed step.
///
/// Built fresh by each [`TrajectoryContext::past`] call. There are no
/// mutators.
#[derive(Clone, Debug, PartialEq)]
pub struct PastSnapshot<'a> {
    schema: &'a VariableSchema,
    values: Vec<Value>,
    steps_back: usize,
}

impl PastSnapshot<'_> {
    /// How many steps back this snapshot was taken from.
    pub fn steps_back(&self) -> usize {
        self.steps_back
    }

    /// Recorded value of a schema variable.
    pub fn get_state(&self, name: &str) -> Result<&Value, AccessError> {
        self.schema
            .index_of(name)
            .map(|i| &self.values[i])
            .ok_or_else(|| AccessError::UnknownVariable { name: name.into() })
    }

    /// Recorded value of a schema variable as a Rust type.
    pub fn get<T: FromValue>(&self, name: &str) -> Result<T, AccessError> {
        let value = self.get_state(name)?;
        T::from_value(value).ok_or_else(|| AccessError::TypeMismatch {
            name: name.into(),
            expected: value.kind(),
            found: T::KIND,
        })
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema.names().zip(self.values.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcsl_core::{ValueKind, VariableDef};
    use rand::SeedableRng;

    struct Parts {
        schema: VariableSchema,
        state: Vec<Value>,
        history: Vec<Vec<Value>>,
        aux: AuxStore,
        rng: ChaCha8Rng,
    }

    fn parts(recorded: &[i64]) -> Parts {
        let schema = VariableSchema::new(vec![
            VariableDef::integer("x", 0),
            VariableDef::real("y", 0.5),
        ])
        .unwrap();
        let history = vec![
            recorded.iter().map(|&v| Value::Integer(v)).collect(),
            recorded.iter().map(|&v| Value::Real(v as f64 / 2.0)).collect(),
        ];
        Parts {
            state: schema.defaults(),
            schema,
            history,
            aux: AuxStore::new(),
            rng: ChaCha8Rng::seed_from_u64(0),
        }
    }

    fn ctx<'a>(p: &'a mut Parts, steps_taken: usize) -> TrajectoryContext<'a> {
        TrajectoryContext::new(
            &p.schema,
            &mut p.state,
            &p.history,
            &mut p.aux,
            &mut p.rng,
            steps_taken,
        )
    }

    #[test]
    fn write_then_read_returns_value() {
        let mut p = parts(&[]);
        let mut c = ctx(&mut p, 0);
        c.set("x", 41).unwrap();
        assert_eq!(c.get::<i64>("x").unwrap(), 41);
        assert_eq!(c.update::<i64, _>("x", |x| x + 1).unwrap(), 42);
        assert_eq!(c.get_state("x").unwrap(), &Value::Integer(42));
    }

    #[test]
    fn typed_and_dynamic_writes_share_kind_check() {
        let mut p = parts(&[]);
        let mut c = ctx(&mut p, 0);
        let typed = c.set("x", 1.5).unwrap_err();
        let dynamic = c.set_state("x", Value::Real(1.5)).unwrap_err();
        assert_eq!(typed, dynamic);
        assert_eq!(
            typed,
            AccessError::TypeMismatch {
                name: "x".into(),
                expected: ValueKind::Integer,
                found: ValueKind::Real,
            }
        );
        assert_eq!(c.get::<i64>("x").unwrap(), 0, "value unchanged after failed write");
    }

    #[test]
    fn typed_read_does_not_coerce() {
        let mut p = parts(&[]);
        let c = ctx(&mut p, 0);
        assert!(matches!(
            c.get::<f64>("x"),
            Err(AccessError::TypeMismatch { .. })
        ));
        assert_eq!(c.get::<f64>("y").unwrap(), 0.5);
    }

    #[test]
    fn unknown_variable_is_reported() {
        let mut p = parts(&[]);
        let mut c = ctx(&mut p, 0);
        let expected = AccessError::UnknownVariable { name: "z".into() };
        assert_eq!(c.get_state("z").unwrap_err(), expected);
        assert_eq!(c.set("z", 1).unwrap_err(), expected);
    }

    #[test]
    fn past_boundaries() {
        let mut p = parts(&[10, 11, 12, 13]);
        let c = ctx(&mut p, 4);
        assert_eq!(c.past(1).unwrap().get::<i64>("x").unwrap(), 13);
        assert_eq!(c.past(3).unwrap().get::<i64>("x").unwrap(), 11);
        assert_eq!(c.past(3).unwrap().get::<f64>("y").unwrap(), 5.5);
        for n in [0, 4, 5] {
            assert_eq!(
                c.past(n).unwrap_err(),
                AccessError::PastOutOfRange { n, steps_taken: 4 }
            );
        }
    }

    #[test]
    fn past_unavailable_before_two_steps() {
        let mut p = parts(&[7]);
        let c = ctx(&mut p, 1);
        assert!(c.past(1).is_err());
        let mut p = parts(&[]);
        let c = ctx(&mut p, 0);
        assert!(c.past(1).is_err());
    }

    #[test]
    fn past_snapshot_iterates_in_declaration_order() {
        let mut p = parts(&[2, 4, 6]);
        let c = ctx(&mut p, 3);
        let snap = c.past(2).unwrap();
        assert_eq!(snap.steps_back(), 2);
        let pairs: Vec<_> = snap.iter().map(|(n, v)| (n.to_owned(), v.clone())).collect();
        assert_eq!(
            pairs,
            vec![
                ("x".to_owned(), Value::Integer(4)),
                ("y".to_owned(), Value::Real(2.0)),
            ]
        );
    }

    #[test]
    fn aux_names_cannot_shadow_variables_or_reserved() {
        let mut p = parts(&[]);
        let mut c = ctx(&mut p, 0);
        for name in ["x", "past", "getstate", "setstate"] {
            assert_eq!(
                c.set_aux(name, 1_u8).unwrap_err(),
                AccessError::AuxiliaryNameConflict { name: name.into() }
            );
        }
        c.set_aux("counter", 3_u32).unwrap();
        *c.aux_mut::<u32>("counter").unwrap() += 1;
        assert_eq!(*c.aux::<u32>("counter").unwrap(), 4);
        assert!(c.has_aux("counter"));
    }

    #[test]
    fn aux_with_rng_splits_borrows() {
        use rand::Rng;
        let mut p = parts(&[]);
        let mut c = ctx(&mut p, 0);
        c.set_aux("draws", Vec::<u32>::new()).unwrap();
        let (draws, rng) = c.aux_with_rng::<Vec<u32>>("draws").unwrap();
        draws.push(rng.random_range(0..10));
        assert_eq!(c.aux::<Vec<u32>>("draws").unwrap().len(), 1);
    }
}
