/// Prepare a Bell pair, print its amplitudes and sample it
///
/// Run with: RUST_LOG=debug cargo run --example bell_state

use qtensor_sim::{bell_state, Simulator, SimulatorConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> qtensor_sim::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut simulator = Simulator::new(SimulatorConfig::debug())?;
    let mut state = simulator.zero_state(3)?;
    let circuit = bell_state(0, 1);
    simulator.run(&circuit, &mut state)?;

    println!("=== Bell state {} on 3 qubits ===\n", circuit);
    print!("{}", state.ket_table());
    println!("\nDominant state: {}", state.dominant_state());

    let shots = 1000;
    let counts = simulator.sample_counts(&state, shots)?;
    println!("\nCounts over {} shots:", shots);
    for (basis, count) in counts.sorted_outcomes() {
        println!("  {}  {:>5}  ({:.3})", basis, count, count as f64 / shots as f64);
    }

    let collapsed = simulator.measure_all(&mut state, true)?;
    println!("\nCollapsed to {}", collapsed);
    print!("{}", state.ket_table());

    Ok(())
}
