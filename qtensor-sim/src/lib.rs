//! Circuit execution for qtensor
//!
//! This crate ties the state tensor and the gate catalog together:
//!
//! - [`Circuit`] and [`MeasuredCircuit`]: ordered operator sequences with an
//!   optional terminal measurement
//! - [`Simulator`]: owns the configuration and a seeded random source
//! - [`timing`]: wall-clock sweep of random gate applications
//!
//! # Example
//!
//! ```
//! use qtensor_gates::standard::{cnot, h};
//! use qtensor_sim::{Circuit, Simulator, SimulatorConfig};
//! use qtensor_state::Measurement;
//!
//! let circuit = Circuit::from_gates([h(0), cnot(0, 1)])
//!     .measure(Measurement::All { collapse: true });
//!
//! let mut simulator = Simulator::new(SimulatorConfig::new().with_seed(1)).unwrap();
//! let mut state = simulator.zero_state(3).unwrap();
//! let outcome = simulator.run_measured(&circuit, &mut state).unwrap();
//! let bits = outcome.basis().unwrap().bits();
//! assert_eq!(bits[0], bits[1]);
//! assert_eq!(bits[2], 0);
//! ```

pub mod circuit;
pub mod config;
pub mod error;
pub mod simulator;
pub mod timing;

pub use circuit::{bell_state, Circuit, MeasuredCircuit};
pub use config::SimulatorConfig;
pub use error::{Result, SimulatorError};
pub use simulator::Simulator;
pub use timing::{run_timing, TimingConfig, TimingReport};
