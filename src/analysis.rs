use crate::detect::Tunables;
use crate::document::TextRun;
use crate::lines;
use crate::metrics::{self, LineMetrics};
use crate::verdict::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Document-wide accumulator for both direction signals. Built fresh per
/// document, folded over its pages, consumed once by the verdict.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DirectionAnalysis {
    pub left_variance_sum: f64,
    pub right_variance_sum: f64,
    pub total_rtl_chars: u64,
    pub total_ltr_chars: u64,
    pub ltr_votes: u32,
    pub rtl_votes: u32,
}

/// What a single page contributed, kept for reporting. Variances and the
/// vote are absent on pages below the line floor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageStats {
    pub line_count: usize,
    pub rtl_chars: u64,
    pub ltr_chars: u64,
    pub left_variance: Option<f64>,
    pub right_variance: Option<f64>,
    pub vote: Option<Direction>,
}

/// Fold one page into the document analysis.
///
/// Script tallies have no floor: every grouped line's characters count.
/// Alignment variance and the page vote only count once the page has at
/// least `min_lines_per_page` lines, below that the statistics are noise.
pub fn analyze_page(
    analysis: &mut DirectionAnalysis,
    runs: &[TextRun],
    tunables: &Tunables,
) -> PageStats {
    let grouped = lines::group_into_lines(runs, tunables.line_proximity);
    let line_metrics: Vec<LineMetrics> =
        grouped.iter().map(|line| metrics::collect(line)).collect();

    let mut stats = PageStats {
        line_count: grouped.len(),
        rtl_chars: 0,
        ltr_chars: 0,
        left_variance: None,
        right_variance: None,
        vote: None,
    };

    for m in &line_metrics {
        stats.rtl_chars += m.scripts.rtl;
        stats.ltr_chars += m.scripts.ltr;
    }
    analysis.total_rtl_chars += stats.rtl_chars;
    analysis.total_ltr_chars += stats.ltr_chars;

    if grouped.len() < tunables.min_lines_per_page {
        return stats;
    }

    let left: Vec<f64> = line_metrics.iter().map(|m| m.left_edge).collect();
    let right: Vec<f64> = line_metrics.iter().map(|m| m.right_edge).collect();
    let left_variance = metrics::population_variance(&left);
    let right_variance = metrics::population_variance(&right);

    analysis.left_variance_sum += left_variance;
    analysis.right_variance_sum += right_variance;

    // A markedly tighter left edge reads as left-aligned text, and vice
    // versa. Comparable spread on both edges casts no vote.
    let vote = if left_variance < right_variance * tunables.alignment_vote_factor {
        analysis.ltr_votes += 1;
        Some(Direction::Ltr)
    } else if right_variance < left_variance * tunables.alignment_vote_factor {
        analysis.rtl_votes += 1;
        Some(Direction::Rtl)
    } else {
        None
    };

    debug!(
        lines = grouped.len(),
        left_variance, right_variance, ?vote,
        "page alignment"
    );

    stats.left_variance = Some(left_variance);
    stats.right_variance = Some(right_variance);
    stats.vote = vote;
    stats
}
