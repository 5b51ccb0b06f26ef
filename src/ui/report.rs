//! Statistics reporter

use std::fmt::Write;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

use crate::error::Result;
use crate::stats::{speedup, DescriptiveStatistics, TimingSequence};

const WIDTH: usize = 60;

fn write_block(out: &mut String, heading: &str, stats: &DescriptiveStatistics) {
    let _ = writeln!(out, "\n{}", heading.bold().yellow());
    let _ = writeln!(out, "  Mean:   {:.4}s", stats.mean);
    let _ = writeln!(out, "  Median: {:.4}s", stats.median);
    let _ = writeln!(out, "  Std:    {:.4}s", stats.stdev);
    let _ = writeln!(out, "  Min:    {:.4}s", stats.min);
    let _ = writeln!(out, "  Max:    {:.4}s", stats.max);
}

fn comparison_table(
    external: (&str, &DescriptiveStatistics),
    in_process: (&str, &DescriptiveStatistics),
) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Statistic"), Cell::new(external.0), Cell::new(in_process.0)]);

    let rows: [(&str, fn(&DescriptiveStatistics) -> f64); 5] = [
        ("Mean", |s: &DescriptiveStatistics| s.mean),
        ("Median", |s: &DescriptiveStatistics| s.median),
        ("Std", |s: &DescriptiveStatistics| s.stdev),
        ("Min", |s: &DescriptiveStatistics| s.min),
        ("Max", |s: &DescriptiveStatistics| s.max),
    ];
    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.4}s", value(external.1))).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}s", value(in_process.1))).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Runs"),
        Cell::new(external.1.count).set_alignment(CellAlignment::Right),
        Cell::new(in_process.1.count).set_alignment(CellAlignment::Right),
    ]);
    table
}

/// Build the full textual comparison of both sequences
pub fn format_report(external: &TimingSequence, in_process: &TimingSequence) -> Result<String> {
    let external_stats = external.statistics()?;
    let in_process_stats = in_process.statistics()?;
    let ratio = speedup(external_stats.mean, in_process_stats.mean);
    if !ratio.is_finite() {
        log::warn!(
            "speedup is {} (external mean {:.6}s)",
            ratio, external_stats.mean
        );
    }

    let separator = "=".repeat(WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", separator);
    let _ = writeln!(out, "{:^60}", "BENCHMARK RESULTS".bold().cyan());
    let _ = writeln!(out, "{}", separator);

    write_block(&mut out, &format!("{} (external executable):", external.label), &external_stats);
    write_block(&mut out, &format!("{} (naive recursive, in-process):", in_process.label), &in_process_stats);

    let table = comparison_table(
        (external.label.as_str(), &external_stats),
        (in_process.label.as_str(), &in_process_stats),
    );
    let _ = writeln!(out, "\n{}", table);

    let _ = writeln!(out, "\n{}", separator);
    let _ = writeln!(
        out,
        "{}",
        format!("{} is {:.2}x faster than {}!", external.label, ratio, in_process.label).bold().green()
    );
    let _ = writeln!(out, "{}\n", separator);

    Ok(out)
}

/// Print the comparison report to standard output
pub fn print_report(external: &TimingSequence, in_process: &TimingSequence) -> Result<()> {
    print!("{}", format_report(external, in_process)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(label: &str, samples: &[f64]) -> TimingSequence {
        TimingSequence {
            label: label.to_string(),
            samples: samples.to_vec(),
        }
    }

    #[test]
    fn report_lists_statistics_and_speedup() {
        colored::control::set_override(false);
        let external = sequence("Volta", &[1.0, 2.0, 3.0, 2.0]);
        let in_process = sequence("Rust", &[8.0, 8.0, 8.0, 8.0]);
        let report = format_report(&external, &in_process).unwrap();

        assert!(report.contains("BENCHMARK RESULTS"));
        assert!(report.contains("Volta (external executable):"));
        assert!(report.contains("Rust (naive recursive, in-process):"));
        assert!(report.contains("  Mean:   2.0000s"));
        assert!(report.contains("  Max:    8.0000s"));
        assert!(report.contains("Volta is 4.00x faster than Rust!"));
    }

    #[test]
    fn report_of_empty_sequence_fails() {
        let external = sequence("Volta", &[]);
        let in_process = sequence("Rust", &[1.0]);
        assert!(format_report(&external, &in_process).is_err());
    }

    #[test]
    fn zero_external_mean_reports_infinite_speedup() {
        colored::control::set_override(false);
        let external = sequence("Volta", &[0.0, 0.0]);
        let in_process = sequence("Rust", &[1.0, 1.0]);
        let report = format_report(&external, &in_process).unwrap();
        assert!(report.contains("Volta is infx faster than Rust!"));
    }
}
