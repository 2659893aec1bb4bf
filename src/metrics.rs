use crate::document::TextRun;
use crate::script::{self, ScriptCounts};

/// Edge extents and script tallies for one grouped line.
#[derive(Debug, Clone, Copy)]
pub struct LineMetrics {
    pub left_edge: f64,
    pub right_edge: f64,
    pub scripts: ScriptCounts,
}

/// Fold a line into its metrics: min left edge, max right edge, and the
/// accumulated character tally of every run on the line.
pub fn collect(line: &[&TextRun]) -> LineMetrics {
    let (mut left_edge, mut right_edge) = match line.first() {
        Some(first) => (first.bbox[0], first.bbox[2]),
        None => (0.0, 0.0),
    };

    let mut scripts = ScriptCounts::default();
    for run in line {
        left_edge = left_edge.min(run.bbox[0]);
        right_edge = right_edge.max(run.bbox[2]);
        scripts.add(script::count_script_chars(run.text.as_bytes()));
    }

    LineMetrics {
        left_edge,
        right_edge,
        scripts,
    }
}

/// Population variance: squared deviations over the full count, not n-1.
/// Fewer than two samples carry no spread and yield 0.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64
}
