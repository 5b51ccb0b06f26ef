//! Chart renderer
//!
//! Draws the 2x2 comparison figure: box plots, per-run time series and one
//! histogram per backend. The figure is 14x10 inches at 300 DPI.

use std::error::Error;
use std::ops::Range;
use std::path::PathBuf;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::{BenchError, Result};
use crate::stats::descriptive_statistics::{quantile, sorted_copy};
use crate::stats::TimingSequence;
use crate::utils::helpers::open_in_viewer;

const FIGURE_INCHES: (u32, u32) = (14, 10);
const DPI: u32 = 300;

const EXTERNAL_COLOR: RGBColor = BLUE;
const IN_PROCESS_COLOR: RGBColor = RGBColor(255, 165, 0);

const CAPTION_FONT: u32 = 56;
const LABEL_FONT: u32 = 34;
const DESC_FONT: u32 = 40;

// Label text starts LEGEND_AREA pixels after the swatch origin
const LEGEND_SWATCH: i32 = 20;
const LEGEND_AREA: i32 = 40;

type DrawResult<T> = std::result::Result<T, Box<dyn Error>>;

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub output_path: PathBuf,
    pub histogram_bins: usize,
    pub show: bool,
}

/// Equal-width histogram over `[min, max]`, last bin closed on the right
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn from_samples(samples: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (mut low, mut high) = finite_bounds(samples).unwrap_or((0.0, 1.0));
        if low == high {
            low -= 0.5;
            high += 0.5;
        }
        let width = (high - low) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| low + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &x in samples.iter().filter(|x| x.is_finite()) {
            let idx = ((x - low) / width).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Self { edges, counts }
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    fn range(&self) -> Range<f64> {
        self.edges[0]..self.edges[self.edges.len() - 1]
    }
}

/// Box-and-whisker summary with 1.5 IQR whiskers
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub fliers: Vec<f64>,
}

impl BoxSummary {
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let sorted = sorted_copy(samples);
        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let (inside, fliers): (Vec<f64>, Vec<f64>) = sorted.iter()
            .partition(|&&x| x >= low_fence && x <= high_fence);
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Some(Self { q1, median, q3, lower_whisker, upper_whisker, fliers })
    }
}

fn finite_bounds(samples: &[f64]) -> Option<(f64, f64)> {
    samples.iter()
        .copied()
        .filter(|x| x.is_finite())
        .fold(None, |acc, x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
}

/// Value axis covering every sample with 5% headroom, never below zero
fn time_axis(sequences: &[&TimingSequence]) -> Range<f64> {
    let all: Vec<f64> = sequences.iter().flat_map(|s| s.samples.iter().copied()).collect();
    let (low, high) = finite_bounds(&all).unwrap_or((0.0, 1.0));
    let pad = if high > low { (high - low) * 0.05 } else { high.abs().max(1e-3) * 0.5 };
    (low - pad).max(0.0)..high + pad
}

/// Render the figure to `options.output_path`, then optionally open it
pub fn render_charts(
    external: &TimingSequence,
    in_process: &TimingSequence,
    options: &ChartOptions,
) -> Result<()> {
    draw_figure(external, in_process, options).map_err(|e| BenchError::Chart(e.to_string()))?;
    log::info!("chart written to {}", options.output_path.display());
    println!("\nGraph saved as '{}'", options.output_path.display());

    if options.show {
        open_in_viewer(&options.output_path)?;
    }
    Ok(())
}

fn draw_figure(
    external: &TimingSequence,
    in_process: &TimingSequence,
    options: &ChartOptions,
) -> DrawResult<()> {
    let size = (FIGURE_INCHES.0 * DPI, FIGURE_INCHES.1 * DPI);
    let root = BitMapBackend::new(&options.output_path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(20, 20, 20, 20);
    let panels = root.split_evenly((2, 2));

    let time_range = time_axis(&[external, in_process]);
    draw_box_panel(&panels[0], external, in_process, time_range.clone())?;
    draw_series_panel(&panels[1], external, in_process, time_range)?;
    draw_histogram_panel(&panels[2], external, options.histogram_bins, EXTERNAL_COLOR)?;
    draw_histogram_panel(&panels[3], in_process, options.histogram_bins, IN_PROCESS_COLOR)?;

    root.present()?;
    Ok(())
}

fn draw_box_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    external: &TimingSequence,
    in_process: &TimingSequence,
    y_range: Range<f64>,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption("Execution Time Distribution", ("sans-serif", CAPTION_FONT))
        .margin(30)
        .x_label_area_size(110)
        .y_label_area_size(170)
        .build_cartesian_2d(-0.5f64..1.5f64, y_range)?;

    let labels = [external.label.as_str(), in_process.label.as_str()];
    let x_formatter = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() < 1e-6 && (0.0..=1.0).contains(&idx) {
            labels[idx as usize].to_string()
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(3)
        .x_label_formatter(&x_formatter)
        .y_desc("Time (seconds)")
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.05))
        .label_style(("sans-serif", LABEL_FONT))
        .axis_desc_style(("sans-serif", DESC_FONT))
        .draw()?;

    let half = 0.25;
    for (x, sequence, color) in [(0.0, external, EXTERNAL_COLOR), (1.0, in_process, IN_PROCESS_COLOR)] {
        let Some(summary) = BoxSummary::from_samples(&sequence.samples) else {
            continue;
        };

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x - half, summary.q1), (x + half, summary.q3)],
                color.mix(0.3).filled(),
            )))?
            .label(sequence.label.as_str())
            .legend(move |(lx, ly)| Rectangle::new([(lx, ly - 12), (lx + LEGEND_SWATCH, ly + 12)], color.filled()));
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x - half, summary.q1), (x + half, summary.q3)],
            color.stroke_width(4),
        )))?;

        let cap = half / 2.0;
        chart.draw_series(
            [
                vec![(x - half, summary.median), (x + half, summary.median)],
                vec![(x, summary.q3), (x, summary.upper_whisker)],
                vec![(x, summary.q1), (x, summary.lower_whisker)],
                vec![(x - cap, summary.upper_whisker), (x + cap, summary.upper_whisker)],
                vec![(x - cap, summary.lower_whisker), (x + cap, summary.lower_whisker)],
            ]
            .into_iter()
            .map(|points| PathElement::new(points, BLACK.stroke_width(4))),
        )?;
        chart.draw_series(
            summary.fliers.iter().map(|&v| Circle::new((x, v), 10, BLACK.stroke_width(3))),
        )?;
    }

    chart
        .configure_series_labels()
        .legend_area_size(LEGEND_AREA)
        .label_font(("sans-serif", LABEL_FONT))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn draw_series_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    external: &TimingSequence,
    in_process: &TimingSequence,
    y_range: Range<f64>,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let longest = external.len().max(in_process.len());
    let x_end = longest.saturating_sub(1).max(1) as f64;

    let mut chart = ChartBuilder::on(area)
        .caption("Execution Time per Run", ("sans-serif", CAPTION_FONT))
        .margin(30)
        .x_label_area_size(110)
        .y_label_area_size(170)
        .build_cartesian_2d(0f64..x_end, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Run Number")
        .y_desc("Time (seconds)")
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.05))
        .label_style(("sans-serif", LABEL_FONT))
        .axis_desc_style(("sans-serif", DESC_FONT))
        .draw()?;

    for (sequence, color) in [(external, EXTERNAL_COLOR), (in_process, IN_PROCESS_COLOR)] {
        let points = sequence.samples.iter().enumerate().map(|(i, &t)| (i as f64, t));
        chart
            .draw_series(LineSeries::new(points, color.mix(0.7).stroke_width(3)))?
            .label(sequence.label.as_str())
            .legend(move |(lx, ly)| PathElement::new(vec![(lx, ly), (lx + LEGEND_SWATCH, ly)], color.stroke_width(4)));
    }

    chart
        .configure_series_labels()
        .legend_area_size(LEGEND_AREA)
        .label_font(("sans-serif", LABEL_FONT))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

fn draw_histogram_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    sequence: &TimingSequence,
    bins: usize,
    color: RGBColor,
) -> DrawResult<()>
where
    DB::ErrorType: 'static,
{
    let histogram = Histogram::from_samples(&sequence.samples, bins);
    let y_end = (histogram.max_count() as f64 * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{} Time Distribution", sequence.label), ("sans-serif", CAPTION_FONT))
        .margin(30)
        .x_label_area_size(110)
        .y_label_area_size(170)
        .build_cartesian_2d(histogram.range(), 0f64..y_end)?;

    chart
        .configure_mesh()
        .x_desc("Time (seconds)")
        .y_desc("Frequency")
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.05))
        .label_style(("sans-serif", LABEL_FONT))
        .axis_desc_style(("sans-serif", DESC_FONT))
        .draw()?;

    let bars = histogram.edges.windows(2).zip(histogram.counts.iter()).map(|(edge, &count)| {
        Rectangle::new([(edge[0], 0.0), (edge[1], count as f64)], color.mix(0.7).filled())
    });
    chart
        .draw_series(bars)?
        .label(sequence.label.as_str())
        .legend(move |(lx, ly)| Rectangle::new([(lx, ly - 12), (lx + LEGEND_SWATCH, ly + 12)], color.mix(0.7).filled()));

    chart
        .configure_series_labels()
        .legend_area_size(LEGEND_AREA)
        .label_font(("sans-serif", LABEL_FONT))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}
