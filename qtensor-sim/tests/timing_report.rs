//! Timing harness output

use approx::assert_relative_eq;
use qtensor_sim::{run_timing, TimingConfig, TimingReport};
use tempfile::tempdir;

#[test]
fn test_report_round_trips_through_json() {
    let config = TimingConfig::default()
        .with_range(3, 6)
        .with_repeat(2)
        .with_seed(8);
    let report = run_timing(&config).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("timing.json");
    report.write_json(&path).unwrap();

    let loaded = TimingReport::read_json(&path).unwrap();
    assert_eq!(loaded.x, vec![3, 4, 5, 6]);
    for (read, written) in loaded.y.iter().zip(report.y.iter()) {
        assert_relative_eq!(*read, *written, max_relative = 1e-12);
    }
}

#[test]
fn test_report_json_shape() {
    let report = TimingReport {
        x: vec![20, 21],
        y: vec![0.5, 1.25],
    };
    let dir = tempdir().unwrap();
    let path = dir.path().join("timing.json");
    report.write_json(&path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["x"], serde_json::json!([20, 21]));
    assert_eq!(value["y"], serde_json::json!([0.5, 1.25]));
}

#[test]
fn test_read_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = TimingReport::read_json(dir.path().join("missing.json"));
    assert!(matches!(result, Err(qtensor_sim::SimulatorError::Io(_))));
}
