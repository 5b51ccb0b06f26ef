#![cfg(unix)]

use std::fs;
use std::path::Path;

use fib_benchmark::core::{
    collect_external_samples, collect_in_process_samples, collect_samples, run_with_config,
};
use fib_benchmark::core::{BenchmarkConfig, ExternalCommand};
use fib_benchmark::stats::DescriptiveStatistics;
use fib_benchmark::ui::report::format_report;
use fib_benchmark::BenchError;

/// The stub is run through `sh` so the test never execs a freshly written file
fn stub(dir: &Path, body: &str) -> ExternalCommand {
    let script = dir.join("fibonacci.sh");
    fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    ExternalCommand {
        label: "Volta".to_string(),
        program: "/bin/sh".into(),
        args: vec![script.display().to_string()],
    }
}

#[test]
fn sleeping_stub_produces_one_sample_per_run() {
    let dir = tempfile::tempdir().unwrap();
    let command = stub(dir.path(), "sleep 0.01\nexit 0");

    let external = collect_external_samples(&command, 5).unwrap();
    assert_eq!(external.len(), 5);
    for &t in &external.samples {
        assert!(t >= 0.009, "sample {} shorter than the stub sleeps", t);
        assert!(t < 5.0, "sample {} unreasonably long", t);
    }

    let stats = DescriptiveStatistics::from_samples(&external.samples).unwrap();
    assert!(stats.mean > 0.0);
    assert!(stats.min <= stats.mean && stats.mean <= stats.max);

    let in_process = collect_in_process_samples("Rust", 20, 5).unwrap();
    assert_eq!(in_process.len(), 5);

    colored::control::set_override(false);
    let report = format_report(&external, &in_process).unwrap();
    assert!(report.contains("Volta (external executable):"));
    assert!(report.contains("x faster than Rust!"));
}

#[test]
fn non_zero_exit_status_is_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    let command = stub(dir.path(), "echo noise >&2\nexit 3");

    let external = collect_external_samples(&command, 3).unwrap();
    assert_eq!(external.len(), 3);
    assert!(external.samples.iter().all(|&t| t >= 0.0));
}

#[test]
fn missing_executable_aborts_collection() {
    let dir = tempfile::tempdir().unwrap();
    let command = ExternalCommand::new("Volta", dir.path().join("fibonacci"));

    match collect_external_samples(&command, 3) {
        Err(BenchError::Launch { program, .. }) => assert!(program.ends_with("fibonacci")),
        other => panic!("expected a launch error, got {:?}", other),
    }
}

#[test]
fn configured_pipeline_collects_both_sequences() {
    let dir = tempfile::tempdir().unwrap();
    let command = stub(dir.path(), "exit 0");

    let config = BenchmarkConfig {
        external_command: command.program.display().to_string(),
        external_args: command.args.clone(),
        external_runs: 2,
        in_process_runs: 4,
        fibonacci_input: 10,
        show_chart: false,
        ..BenchmarkConfig::default()
    };

    let (external, in_process) = collect_samples(&config).unwrap();
    assert_eq!(external.len(), 2);
    assert_eq!(external.label, "Volta");
    assert_eq!(in_process.len(), 4);
    assert_eq!(in_process.label, "Rust");
}

#[test]
fn full_run_writes_the_chart() {
    let dir = tempfile::tempdir().unwrap();
    let command = stub(dir.path(), "sleep 0.01\nexit 0");
    let output = dir.path().join("fibonacci_benchmark.png");

    let config = BenchmarkConfig {
        external_command: command.program.display().to_string(),
        external_args: command.args.clone(),
        external_runs: 5,
        in_process_runs: 5,
        fibonacci_input: 20,
        output_path: output.display().to_string(),
        show_chart: false,
        ..BenchmarkConfig::default()
    };

    run_with_config(&config).unwrap();
    let image = fs::read(&output).unwrap();
    assert!(image.starts_with(b"\x89PNG"));
}
