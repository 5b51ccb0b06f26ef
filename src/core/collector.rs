//! Sample collectors
//!
//! Both collectors run strictly one sample at a time on the calling thread
//! and bracket each unit of work with two `Instant` readings.

use std::hint::black_box;
use std::process::{Command, Stdio};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use crate::core::config::ExternalCommand;
use crate::core::fibonacci::fibonacci;
use crate::error::{BenchError, Result};
use crate::stats::TimingSequence;

fn run_progress_bar(runs: usize, label: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new(runs as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")?
            .progress_chars("##-"),
    );
    pb.set_message(format!("{} runs", label));
    Ok(pb)
}

fn report_run(pb: &ProgressBar, label: &str, run: usize, runs: usize, secs: f64) {
    pb.suspend(|| println!("{} run {}/{}: {:.4}s", label, run, runs, secs));
    pb.inc(1);
}

/// Launch the external program `runs` times and time each launch-and-wait.
///
/// Output is captured and dropped. A non-zero exit status is not an error;
/// failing to start the program is.
pub fn collect_external_samples(command: &ExternalCommand, runs: usize) -> Result<TimingSequence> {
    let mut times = TimingSequence::with_capacity(command.label.as_str(), runs);
    let pb = run_progress_bar(runs, &command.label)?;

    for run in 1..=runs {
        let start = Instant::now();
        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output();
        let elapsed = start.elapsed();

        let output = match output {
            Ok(output) => output,
            Err(source) => {
                pb.abandon();
                return Err(BenchError::Launch {
                    program: command.program.display().to_string(),
                    source,
                });
            }
        };
        if !output.status.success() {
            log::debug!("{} run {} exited with {}", command.label, run, output.status);
        }

        let secs = times.record(elapsed);
        report_run(&pb, &command.label, run, runs, secs);
    }
    pb.finish_and_clear();

    Ok(times)
}

/// Call the naive recursive `fibonacci(n)` `runs` times, timing each call
pub fn collect_in_process_samples(label: &str, n: u32, runs: usize) -> Result<TimingSequence> {
    let mut times = TimingSequence::with_capacity(label, runs);
    let pb = run_progress_bar(runs, label)?;

    for run in 1..=runs {
        let start = Instant::now();
        let result = fibonacci(black_box(n));
        let elapsed = start.elapsed();
        black_box(result);

        let secs = times.record(elapsed);
        report_run(&pb, label, run, runs, secs);
    }
    pb.finish_and_clear();

    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_process_returns_one_sample_per_run() {
        let times = collect_in_process_samples("Rust", 15, 3).unwrap();
        assert_eq!(times.len(), 3);
        assert_eq!(times.label, "Rust");
        assert!(times.samples.iter().all(|&t| t >= 0.0));
    }

    #[test]
    fn in_process_zero_runs_is_empty() {
        let times = collect_in_process_samples("Rust", 40, 0).unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn external_zero_runs_never_launches() {
        let command = ExternalCommand::new("Missing", "./definitely-not-here");
        let times = collect_external_samples(&command, 0).unwrap();
        assert!(times.is_empty());
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let command = ExternalCommand::new("Missing", "./definitely-not-here");
        let err = collect_external_samples(&command, 2).unwrap_err();
        assert!(matches!(err, BenchError::Launch { .. }));
        assert!(err.to_string().contains("definitely-not-here"));
    }
}
