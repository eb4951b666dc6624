//! Computational basis measurement with state collapse
//!
//! This module provides:
//! - Partial (single-axis) measurement with collapse and renormalization
//! - Full-register measurement, collapsing or non-destructive
//! - Multi-shot sampling via the alias method for O(1) draws after O(2^n) setup
//!
//! Every sampling call draws from exactly one caller-supplied [`Rng`].
//! Destructive operations take `&mut StateTensor`; non-destructive sampling
//! takes `&StateTensor` and leaves the amplitudes bit-identical.

use crate::basis::BasisState;
use crate::error::{Result, StateError};
use crate::state_tensor::StateTensor;
use ndarray::Axis;
use num_complex::Complex64;
use rand::Rng;
use std::collections::HashMap;
use std::fmt;

/// Unnormalized marginal weights `[w0, w1]` of one axis
///
/// `w_b` is the sum of squared magnitudes over every entry whose coordinate
/// along `axis` equals `b`.
///
/// # Errors
/// Returns `InvalidTargetIndex` if `axis` is out of range
pub fn marginal_weights(state: &StateTensor, axis: usize) -> Result<[f64; 2]> {
    if axis >= state.num_qubits() {
        return Err(StateError::invalid_target(axis, state.num_qubits()));
    }
    let view = state.view()?;
    let weight = |bit: usize| -> f64 {
        view.index_axis(Axis(axis), bit)
            .iter()
            .map(|a| a.norm_sqr())
            .sum()
    };
    Ok([weight(0), weight(1)])
}

impl StateTensor {
    /// Measure one axis and collapse the state
    ///
    /// The outcome is 0 iff `random_value < p0`, where `p0` is the normalized
    /// marginal probability of reading 0. Entries inconsistent with the
    /// outcome are zeroed and the whole tensor is renormalized.
    ///
    /// # Arguments
    /// * `axis` - Axis (qubit) to measure
    /// * `random_value` - Uniform value in [0, 1)
    ///
    /// # Errors
    /// - `InvalidTargetIndex` if `axis` is out of range
    /// - `InvalidState` if both marginals are zero
    ///
    /// # Example
    /// ```
    /// use qtensor_state::StateTensor;
    ///
    /// let mut state = StateTensor::zero(2).unwrap();
    /// assert_eq!(state.measure_qubit(0, 0.5).unwrap(), 0);
    /// ```
    pub fn measure_qubit(&mut self, axis: usize, random_value: f64) -> Result<u8> {
        let [w0, w1] = marginal_weights(self, axis)?;
        let total = w0 + w1;
        if total == 0.0 || !total.is_finite() {
            return Err(StateError::InvalidState { norm: total.sqrt() });
        }
        let p0 = w0 / total;
        let outcome: u8 = if random_value < p0 { 0 } else { 1 };

        self.view_mut()?
            .index_axis_mut(Axis(axis), usize::from(1 - outcome))
            .fill(Complex64::new(0.0, 0.0));
        self.normalize()?;

        tracing::debug!(axis, outcome, p0, "partial measurement");
        Ok(outcome)
    }

    /// Sample a basis state without touching the amplitudes
    ///
    /// Probabilities are the squared magnitudes renormalized by their sum, so
    /// unnormalized tensors are sampled correctly.
    ///
    /// # Errors
    /// Returns `InvalidState` for a zero tensor
    pub fn sample_basis(&self, random_value: f64) -> Result<BasisState> {
        let total = self.norm_sqr();
        if total == 0.0 || !total.is_finite() {
            return Err(StateError::InvalidState { norm: total.sqrt() });
        }
        let threshold = random_value * total;

        let mut cumulative = 0.0;
        let mut last_nonzero = 0;
        for (index, amp) in self.amplitudes().iter().enumerate() {
            let weight = amp.norm_sqr();
            if weight == 0.0 {
                continue;
            }
            cumulative += weight;
            last_nonzero = index;
            if threshold < cumulative {
                return Ok(BasisState::from_index(index, self.num_qubits()));
            }
        }
        // Rounding left the threshold past the final partial sum
        Ok(BasisState::from_index(last_nonzero, self.num_qubits()))
    }

    /// Measure all qubits and collapse to the sampled basis state
    ///
    /// # Errors
    /// Returns `InvalidState` for a zero tensor
    pub fn measure_all(&mut self, random_value: f64) -> Result<BasisState> {
        let outcome = self.sample_basis(random_value)?;
        let index = outcome.to_index();
        for (idx, amp) in self.amplitudes_mut().iter_mut().enumerate() {
            *amp = if idx == index {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(0.0, 0.0)
            };
        }
        tracing::debug!(outcome = %outcome, "full measurement");
        Ok(outcome)
    }
}

/// Measure one axis, collapsing the state (destructive)
pub fn measure<R: Rng + ?Sized>(state: &mut StateTensor, axis: usize, rng: &mut R) -> Result<u8> {
    state.measure_qubit(axis, rng.gen::<f64>())
}

/// Measure every axis
///
/// With `collapse` the register is left in the sampled basis state; without
/// it the register is not modified.
pub fn measure_all<R: Rng + ?Sized>(
    state: &mut StateTensor,
    collapse: bool,
    rng: &mut R,
) -> Result<BasisState> {
    let random_value = rng.gen::<f64>();
    if collapse {
        state.measure_all(random_value)
    } else {
        state.sample_basis(random_value)
    }
}

/// Sample a full basis state without modifying the register
pub fn sample<R: Rng + ?Sized>(state: &StateTensor, rng: &mut R) -> Result<BasisState> {
    state.sample_basis(rng.gen::<f64>())
}

/// Draw `shots` non-destructive full measurements
///
/// Builds an alias table once, then samples each shot in O(1).
pub fn sample_counts<R: Rng + ?Sized>(
    state: &StateTensor,
    shots: usize,
    rng: &mut R,
) -> Result<SamplingResult> {
    let mut result = SamplingResult::new(state.num_qubits(), shots);
    if shots == 0 {
        return Ok(result);
    }

    let alias_table = AliasTable::new(&state.probabilities())?;
    for _ in 0..shots {
        let index = alias_table.sample(rng);
        result.add_outcome(BasisState::from_index(index, state.num_qubits()));
    }
    Ok(result)
}

/// A measurement stage that can terminate a circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measurement {
    /// Partial measurement of one axis (always collapses)
    Qubit(usize),

    /// Full-register measurement
    All { collapse: bool },
}

impl Measurement {
    /// Perform this measurement on a register
    pub fn perform<R: Rng + ?Sized>(
        &self,
        state: &mut StateTensor,
        rng: &mut R,
    ) -> Result<MeasurementOutcome> {
        match *self {
            Measurement::Qubit(axis) => measure(state, axis, rng).map(MeasurementOutcome::Bit),
            Measurement::All { collapse } => {
                measure_all(state, collapse, rng).map(MeasurementOutcome::Basis)
            }
        }
    }
}

/// Classical result of a measurement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MeasurementOutcome {
    /// Single bit from a partial measurement
    Bit(u8),

    /// Full multi-index from a register measurement
    Basis(BasisState),
}

impl MeasurementOutcome {
    /// The bit, if this was a partial measurement
    pub fn bit(&self) -> Option<u8> {
        match self {
            MeasurementOutcome::Bit(bit) => Some(*bit),
            MeasurementOutcome::Basis(_) => None,
        }
    }

    /// The basis state, if this was a full measurement
    pub fn basis(&self) -> Option<&BasisState> {
        match self {
            MeasurementOutcome::Bit(_) => None,
            MeasurementOutcome::Basis(basis) => Some(basis),
        }
    }
}

impl fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementOutcome::Bit(bit) => write!(f, "{}", bit),
            MeasurementOutcome::Basis(basis) => write!(f, "{}", basis),
        }
    }
}

/// Counts from multiple measurement shots
#[derive(Debug, Clone)]
pub struct SamplingResult {
    /// Map from basis state to count
    pub counts: HashMap<BasisState, usize>,

    /// Total number of shots
    pub shots: usize,

    num_qubits: usize,
}

impl SamplingResult {
    /// Create an empty sampling result
    pub fn new(num_qubits: usize, shots: usize) -> Self {
        Self {
            counts: HashMap::new(),
            shots,
            num_qubits,
        }
    }

    /// Record one outcome
    pub fn add_outcome(&mut self, outcome: BasisState) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Count for a basis state
    pub fn get_count(&self, outcome: &BasisState) -> usize {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Observed frequency of a basis state
    pub fn get_probability(&self, outcome: &BasisState) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        self.get_count(outcome) as f64 / self.shots as f64
    }

    /// All outcomes sorted by count (descending), ties by basis order
    pub fn sorted_outcomes(&self) -> Vec<(BasisState, usize)> {
        let mut outcomes: Vec<_> = self
            .counts
            .iter()
            .map(|(basis, &count)| (basis.clone(), count))
            .collect();
        outcomes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        outcomes
    }

    /// Counts keyed by bitstring, e.g. `"011"`
    pub fn to_bitstring_counts(&self) -> HashMap<String, usize> {
        self.counts
            .iter()
            .map(|(basis, &count)| (basis.as_bitstring(), count))
            .collect()
    }

    /// Number of qubits in each outcome
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }
}

/// Alias table for O(1) sampling from a discrete distribution
///
/// Walker, A. J. (1977). "An Efficient Method for Generating Discrete Random
/// Variables with General Distributions"
struct AliasTable {
    prob: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasTable {
    /// Build from unnormalized weights
    fn new(weights: &[f64]) -> Result<Self> {
        let n = weights.len();
        let total: f64 = weights.iter().sum();
        if n == 0 || total == 0.0 || !total.is_finite() {
            return Err(StateError::InvalidState { norm: total.sqrt() });
        }

        let mut prob = vec![0.0; n];
        let mut alias = vec![0; n];
        let mut scaled: Vec<f64> = weights.iter().map(|&w| w * n as f64 / total).collect();

        let mut small = Vec::new();
        let mut large = Vec::new();
        for (i, &p) in scaled.iter().enumerate() {
            if p < 1.0 {
                small.push(i);
            } else {
                large.push(i);
            }
        }

        while !small.is_empty() && !large.is_empty() {
            let (Some(s), Some(l)) = (small.pop(), large.pop()) else {
                break;
            };
            prob[s] = scaled[s];
            alias[s] = l;
            scaled[l] = (scaled[l] + scaled[s]) - 1.0;
            if scaled[l] < 1.0 {
                small.push(l);
            } else {
                large.push(l);
            }
        }

        // Leftovers are 1 up to rounding
        for i in large.into_iter().chain(small) {
            prob[i] = 1.0;
        }

        Ok(Self { prob, alias })
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let i = rng.gen_range(0..self.prob.len());
        if rng.gen::<f64>() < self.prob[i] {
            i
        } else {
            self.alias[i]
        }
    }
}
