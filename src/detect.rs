use crate::analysis::{self, DirectionAnalysis};
use crate::document::Page;
use crate::verdict::{self, Direction};
use tracing::debug;

/// Empirical thresholds driving the inference. The defaults are the values
/// the decision rules were tuned against; treat them as knobs, not derived
/// quantities.
#[derive(Debug, Clone)]
pub struct Tunables {
    /// Perpendicular-axis distance (page units) within which two runs share
    /// a line.
    pub line_proximity: f64,
    /// Minimum grouped lines before a page's alignment statistics count.
    pub min_lines_per_page: usize,
    /// One edge's variance must stay under this fraction of the other's for
    /// the page to cast an alignment vote.
    pub alignment_vote_factor: f64,
    /// RTL share of the page votes at or above which alignment calls RTL.
    pub rtl_vote_share: f64,
    /// RTL share of the page votes at or below which alignment calls LTR.
    pub ltr_vote_share: f64,
    /// Variance-sum ratio applied when the page votes are inconclusive.
    pub variance_fallback_factor: f64,
    /// RTL characters must outnumber LTR by more than this factor for the
    /// content signal to call RTL.
    pub script_dominance_factor: f64,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            line_proximity: 5.0,
            min_lines_per_page: 3,
            alignment_vote_factor: 0.7,
            rtl_vote_share: 0.6,
            ltr_vote_share: 0.4,
            variance_fallback_factor: 0.8,
            script_dominance_factor: 2.0,
        }
    }
}

/// Fold every page into a fresh document-wide analysis. Page order does not
/// affect the outcome; the accumulator is commutative over pages.
pub fn analyze_document(pages: &[Page], tunables: &Tunables) -> DirectionAnalysis {
    let mut analysis = DirectionAnalysis::default();
    for page in pages {
        analysis::analyze_page(&mut analysis, &page.runs, tunables);
    }
    analysis
}

/// Infer the dominant reading direction of a document.
///
/// Total over any input: no pages, no runs, no qualifying lines and no
/// directional characters all resolve to LTR.
pub fn detect_direction(pages: &[Page], tunables: &Tunables) -> Direction {
    let analysis = analyze_document(pages, tunables);
    let direction = verdict::combine(&analysis, tunables);
    debug!(
        ?direction,
        ltr_votes = analysis.ltr_votes,
        rtl_votes = analysis.rtl_votes,
        rtl_chars = analysis.total_rtl_chars,
        ltr_chars = analysis.total_ltr_chars,
        "direction inferred"
    );
    direction
}
