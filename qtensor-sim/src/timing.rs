//! Wall-clock timing of random gate applications
//!
//! For each register size in a range, repeatedly applies randomly chosen
//! catalog gates to random distinct axes of a random register and records
//! the average time per run. The report serializes to
//! `{"x": [qubits..], "y": [seconds..]}`.

use crate::error::{Result, SimulatorError};
use qtensor_gates::standard;
use qtensor_gates::{GateOp, Operator};
use qtensor_state::{StateError, StateTensor, MAX_QUBITS};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

/// Parameters of a timing sweep
///
/// A gate application holds one scratch copy of the register next to it, so
/// an `n`-qubit run peaks at about `2 · 16 · 2^n` bytes (32 GiB at 30 qubits).
/// Narrow the range with [`with_range`](Self::with_range) on smaller hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// First register size (inclusive)
    pub start_qubits: usize,
    /// Last register size (inclusive)
    pub end_qubits: usize,
    /// Timed runs per register size
    pub repeat: usize,
    /// Gates applied per timed run
    pub gates_per_run: usize,
    /// Seed for registers and gate choice; OS entropy if absent
    pub seed: Option<u64>,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            start_qubits: 20,
            end_qubits: 30,
            repeat: 10,
            gates_per_run: 1,
            seed: None,
        }
    }
}

impl TimingConfig {
    pub fn with_range(mut self, start_qubits: usize, end_qubits: usize) -> Self {
        self.start_qubits = start_qubits;
        self.end_qubits = end_qubits;
        self
    }

    pub fn with_repeat(mut self, repeat: usize) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_gates_per_run(mut self, gates_per_run: usize) -> Self {
        self.gates_per_run = gates_per_run;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_qubits == 0 || self.start_qubits > self.end_qubits {
            return Err(SimulatorError::InvalidConfig(format!(
                "qubit range {}..={} is empty",
                self.start_qubits, self.end_qubits
            )));
        }
        if self.end_qubits > MAX_QUBITS {
            return Err(SimulatorError::TooManyQubits {
                num_qubits: self.end_qubits,
                max_qubits: MAX_QUBITS,
            });
        }
        if self.repeat == 0 || self.gates_per_run == 0 {
            return Err(SimulatorError::InvalidConfig(
                "repeat and gates_per_run must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Average seconds per run (`y`) for each register size (`x`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    pub x: Vec<usize>,
    pub y: Vec<f64>,
}

impl TimingReport {
    /// Write the report as JSON, creating parent directories as needed
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Read a report previously written by [`write_json`](Self::write_json)
    pub fn read_json(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// A catalog gate on random distinct axes of an `num_qubits` register
///
/// # Errors
/// Returns `InvalidDimension` for an empty register
pub fn random_gate<R: Rng + ?Sized>(
    num_qubits: usize,
    rng: &mut R,
) -> qtensor_state::Result<GateOp> {
    if num_qubits == 0 {
        return Err(StateError::InvalidDimension {
            num_qubits,
            max: MAX_QUBITS,
        });
    }
    let arity_limit = num_qubits.min(3);
    let axes = index::sample(rng, num_qubits, arity_limit).into_vec();
    let (a, b, c) = (axes[0], axes.get(1).copied(), axes.get(2).copied());

    let mut candidates: Vec<GateOp> = vec![
        standard::x(a),
        standard::y(a),
        standard::z(a),
        standard::r(a, rng.gen_range(0.0..std::f64::consts::TAU)),
        standard::s(a),
        standard::t(a),
        standard::h(a),
        standard::snot(a),
    ];
    if let Some(b) = b {
        candidates.extend([
            standard::swap(a, b),
            standard::cnot(a, b),
            standard::cy(a, b),
            standard::cz(a, b),
        ]);
    }
    if let (Some(b), Some(c)) = (b, c) {
        candidates.extend([standard::ccnot(a, b, c), standard::cswap(a, b, c)]);
    }
    let pick = rng.gen_range(0..candidates.len());
    Ok(candidates.swap_remove(pick))
}

/// Time random gate applications over the configured qubit range
pub fn run_timing(config: &TimingConfig) -> Result<TimingReport> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut report = TimingReport::default();
    for num_qubits in config.start_qubits..=config.end_qubits {
        let mut state = StateTensor::random(num_qubits, &mut rng)?;
        let mut total_seconds = 0.0;

        for _ in 0..config.repeat {
            let gates: Vec<GateOp> = (0..config.gates_per_run)
                .map(|_| random_gate(num_qubits, &mut rng))
                .collect::<qtensor_state::Result<_>>()?;
            let start = Instant::now();
            for gate in &gates {
                gate.apply_to(&mut state)?;
            }
            total_seconds += start.elapsed().as_secs_f64();
        }

        let average = total_seconds / config.repeat as f64;
        tracing::debug!(num_qubits, average, "timed register size");
        report.x.push(num_qubits);
        report.y.push(average);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TimingConfig::default();
        assert_eq!(config.start_qubits, 20);
        assert_eq!(config.end_qubits, 30);
        assert_eq!(config.repeat, 10);
        assert_eq!(config.gates_per_run, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_ranges() {
        assert!(TimingConfig::default().with_range(5, 4).validate().is_err());
        assert!(TimingConfig::default().with_range(0, 4).validate().is_err());
        assert!(matches!(
            TimingConfig::default().with_range(2, 31).validate(),
            Err(SimulatorError::TooManyQubits { .. })
        ));
        assert!(TimingConfig::default().with_repeat(0).validate().is_err());
    }

    #[test]
    fn test_random_gate_fits_register() {
        let mut rng = StdRng::seed_from_u64(3);
        for num_qubits in 1..=4 {
            for _ in 0..50 {
                let gate = random_gate(num_qubits, &mut rng).unwrap();
                let targets = gate.targets();
                assert!(targets.len() <= num_qubits);
                assert!(targets.iter().all(|&t| t < num_qubits));
                let mut state = StateTensor::zero(num_qubits).unwrap();
                gate.apply_to(&mut state).unwrap();
                assert!(state.is_normalized(1e-9));
            }
        }
    }

    #[test]
    fn test_random_gate_empty_register() {
        let mut rng = StdRng::seed_from_u64(4);
        assert!(matches!(
            random_gate(0, &mut rng),
            Err(StateError::InvalidDimension { num_qubits: 0, .. })
        ));
    }

    #[test]
    fn test_run_timing_small_range() {
        let config = TimingConfig::default()
            .with_range(2, 5)
            .with_repeat(3)
            .with_gates_per_run(4)
            .with_seed(11);
        let report = run_timing(&config).unwrap();
        assert_eq!(report.x, vec![2, 3, 4, 5]);
        assert_eq!(report.y.len(), 4);
        assert!(report.y.iter().all(|&t| t >= 0.0));
    }
}
