use crate::analysis::DirectionAnalysis;
use crate::detect::Tunables;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Final reading-direction verdict. The integer codes follow the composer
/// convention downstream: 0 selects left-to-right glyph ordering, 1
/// right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    pub fn code(self) -> u8 {
        match self {
            Direction::Ltr => 0,
            Direction::Rtl => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "LTR",
            Direction::Rtl => "RTL",
        }
    }
}

/// Direction implied by edge alignment: the page votes decide when a clear
/// majority exists, aggregate variance breaks the tie, and LTR stands when
/// nothing separates the two edges.
pub fn alignment_direction(analysis: &DirectionAnalysis, tunables: &Tunables) -> Direction {
    let votes = analysis.ltr_votes + analysis.rtl_votes;
    if votes > 0 {
        let rtl_share = analysis.rtl_votes as f64 / votes as f64;
        if rtl_share >= tunables.rtl_vote_share {
            return Direction::Rtl;
        }
        if rtl_share <= tunables.ltr_vote_share {
            return Direction::Ltr;
        }
    }

    if analysis.left_variance_sum < analysis.right_variance_sum * tunables.variance_fallback_factor
    {
        Direction::Ltr
    } else if analysis.right_variance_sum
        < analysis.left_variance_sum * tunables.variance_fallback_factor
    {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

/// Direction implied by script membership alone. RTL documents routinely
/// embed Latin terms and numerals, so RTL characters must outnumber LTR by
/// the dominance factor before the content signal calls RTL.
pub fn content_direction(analysis: &DirectionAnalysis, tunables: &Tunables) -> Direction {
    if analysis.total_rtl_chars + analysis.total_ltr_chars == 0 {
        return Direction::Ltr;
    }
    if analysis.total_rtl_chars as f64
        > analysis.total_ltr_chars as f64 * tunables.script_dominance_factor
    {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

/// Merge the two signals. Layout geometry is the stronger direction
/// indicator, so alignment wins any disagreement.
pub fn combine(analysis: &DirectionAnalysis, tunables: &Tunables) -> Direction {
    let alignment = alignment_direction(analysis, tunables);
    let content = content_direction(analysis, tunables);
    if content != alignment {
        debug!(?alignment, ?content, "signals disagree, alignment wins");
    }
    alignment
}
