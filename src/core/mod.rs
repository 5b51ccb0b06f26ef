pub mod collector;
pub mod config;
pub mod fibonacci;

use std::env;
use std::path::{Path, PathBuf};

use colored::*;

use crate::error::Result;
use crate::VERSION;
use crate::stats::TimingSequence;
use crate::ui::chart::{render_charts, ChartOptions};
use crate::ui::report::print_report;
use crate::utils::helpers::{cpu_description, os_description};

pub use collector::{collect_external_samples, collect_in_process_samples};
pub use config::{BenchmarkConfig, ExternalCommand, CONFIG_FILE};
pub use fibonacci::fibonacci;

// ============================================================================
// BANNER
// ============================================================================

fn print_banner(config: &BenchmarkConfig) -> Result<()> {
    let separator = "=".repeat(60);

    println!("\n{}", separator);
    println!("{:^60}", format!("FIBONACCI BENCHMARK v{}", VERSION).bold().cyan());
    println!("{}\n", separator);

    println!("{}", "System Information".bold().yellow());
    println!("━━━━━━━━━━━━━━━━━━━");
    println!("Working directory: {}", env::current_dir()?.display());
    println!("OS:                {}", os_description());
    println!("CPU:               {}", cpu_description().unwrap_or_else(|| "Unknown".to_string()));
    println!();

    println!("{}", "Benchmark Parameters".bold().yellow());
    println!("━━━━━━━━━━━━━━━━━━━━");
    let mut command_line = config.external_command.clone();
    for arg in &config.external_args {
        command_line.push(' ');
        command_line.push_str(arg);
    }
    println!("▸ {} command: {}", config.external_label, command_line);
    println!("▸ {} runs: {}", config.external_label, config.external_runs);
    println!(
        "▸ {} runs: {} (fib({}))",
        config.in_process_label, config.in_process_runs, config.fibonacci_input
    );
    println!("▸ Output: {}", config.output_path);

    Ok(())
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run both collectors back to back and return (external, in-process)
pub fn collect_samples(config: &BenchmarkConfig) -> Result<(TimingSequence, TimingSequence)> {
    println!("\n{} Running {} benchmarks...", "[1/2]".bold().cyan(), config.external_label);
    log::info!("collecting {} external samples", config.external_runs);
    let external = collect_external_samples(&config.external_command(), config.external_runs)?;

    println!("\n{} Running {} benchmarks...", "[2/2]".bold().cyan(), config.in_process_label);
    log::info!(
        "collecting {} in-process samples of fib({})",
        config.in_process_runs, config.fibonacci_input
    );
    let in_process = collect_in_process_samples(
        &config.in_process_label,
        config.fibonacci_input,
        config.in_process_runs,
    )?;

    Ok((external, in_process))
}

/// Full run for an explicit configuration: collect, report, chart
pub fn run_with_config(config: &BenchmarkConfig) -> Result<()> {
    print_banner(config)?;

    let (external, in_process) = collect_samples(config)?;
    print_report(&external, &in_process)?;

    let options = ChartOptions {
        output_path: PathBuf::from(&config.output_path),
        histogram_bins: config.histogram_bins,
        show: config.show_chart,
    };
    render_charts(&external, &in_process, &options)?;

    Ok(())
}

/// Entry point: load `benchmark.json` from the working directory (if any)
/// and run the full benchmark
pub fn run_benchmark() -> Result<()> {
    let config = BenchmarkConfig::load(Path::new(CONFIG_FILE))?;
    run_with_config(&config)
}
