/// Time random gate applications and write `outputs/timing.json`
///
/// Run with: cargo run --example timing --release -- [start] [end] [repeat]

use qtensor_sim::{run_timing, TimingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> qtensor_sim::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let args: Vec<usize> = std::env::args()
        .skip(1)
        .filter_map(|arg| arg.parse().ok())
        .collect();
    let defaults = TimingConfig::default();
    let config = TimingConfig::default()
        .with_range(
            args.first().copied().unwrap_or(defaults.start_qubits),
            args.get(1).copied().unwrap_or(defaults.end_qubits),
        )
        .with_repeat(args.get(2).copied().unwrap_or(defaults.repeat));

    let report = run_timing(&config)?;
    for (qubits, seconds) in report.x.iter().zip(report.y.iter()) {
        println!("{:>3} qubits  {:.6} s", qubits, seconds);
    }

    let path = "outputs/timing.json";
    report.write_json(path)?;
    println!("\nWrote {}", path);
    Ok(())
}
