use crate::document::TextRun;
use std::cmp::Ordering;

/// Text-run orientation derived from the glyph transform.
///
/// The variants are ordered; the line builder sorts runs by orientation
/// before anything else, so the declaration order is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Orientation {
    Horizontal,
    Rotated90,
    Rotated180,
    Other,
}

impl Orientation {
    /// Classify a `[a, b, c, d]` transform. Rules are checked in order and
    /// the first match wins; anything unmatched (rotated 270, skew, mirror,
    /// degenerate, NaN) is `Other`, so every transform lands in exactly one
    /// variant.
    pub fn classify(matrix: &[f64; 4]) -> Orientation {
        let [a, b, c, d] = *matrix;
        // 1 0 0 1 = upright horizontal text
        if a > 0.0 && d > 0.0 {
            Orientation::Horizontal
        // 0 1 -1 0 = rotated 90 degrees
        } else if b > 0.0 && c < 0.0 {
            Orientation::Rotated90
        // -1 0 0 -1 = rotated 180 degrees
        } else if a < 0.0 && d < 0.0 {
            Orientation::Rotated180
        } else {
            Orientation::Other
        }
    }
}

/// Reading order within one orientation band. Runs further apart than
/// `proximity` on the line-stacking axis order by that axis; runs within it
/// sit on the same visual line and order along the flow axis.
fn cmp_within_orientation(
    a: &TextRun,
    b: &TextRun,
    orientation: Orientation,
    proximity: f64,
) -> Ordering {
    match orientation {
        Orientation::Horizontal => {
            if (a.bbox[1] - b.bbox[1]).abs() > proximity {
                // Top of page first.
                b.bbox[1].total_cmp(&a.bbox[1])
            } else {
                a.bbox[0].total_cmp(&b.bbox[0])
            }
        }
        Orientation::Rotated90 => {
            if (a.bbox[0] - b.bbox[0]).abs() > proximity {
                a.bbox[0].total_cmp(&b.bbox[0])
            } else {
                a.bbox[1].total_cmp(&b.bbox[1])
            }
        }
        Orientation::Rotated180 => {
            if (a.bbox[1] - b.bbox[1]).abs() > proximity {
                a.bbox[1].total_cmp(&b.bbox[1])
            } else {
                b.bbox[0].total_cmp(&a.bbox[0])
            }
        }
        Orientation::Other => {
            if (a.bbox[0] - b.bbox[0]).abs() > proximity {
                b.bbox[0].total_cmp(&a.bbox[0])
            } else {
                b.bbox[1].total_cmp(&a.bbox[1])
            }
        }
    }
}

/// Whether `b` continues the line ending in `a`: same orientation, and the
/// perpendicular-axis positions within `proximity` of each other.
fn same_line(a: &TextRun, b: &TextRun, proximity: f64) -> bool {
    let orientation = Orientation::classify(&a.matrix);
    if orientation != Orientation::classify(&b.matrix) {
        return false;
    }
    match orientation {
        Orientation::Horizontal | Orientation::Rotated180 => {
            (a.bbox[1] - b.bbox[1]).abs() <= proximity
        }
        Orientation::Rotated90 | Orientation::Other => {
            (a.bbox[0] - b.bbox[0]).abs() <= proximity
        }
    }
}

/// Order a page's runs into reading order and group them into visual lines.
///
/// An empty page yields no lines; a lone run yields one one-element line.
pub fn group_into_lines<'a>(runs: &'a [TextRun], proximity: f64) -> Vec<Vec<&'a TextRun>> {
    let mut sorted: Vec<&TextRun> = runs.iter().collect();
    sorted.sort_by(|a, b| {
        let oa = Orientation::classify(&a.matrix);
        let ob = Orientation::classify(&b.matrix);
        oa.cmp(&ob)
            .then_with(|| cmp_within_orientation(a, b, oa, proximity))
    });

    let mut lines: Vec<Vec<&TextRun>> = Vec::new();
    let mut current: Vec<&TextRun> = Vec::new();
    for run in sorted {
        if let Some(last) = current.last() {
            if !same_line(last, run, proximity) {
                lines.push(std::mem::take(&mut current));
            }
        }
        current.push(run);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
