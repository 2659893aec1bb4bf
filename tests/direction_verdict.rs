use bidi_scan::analysis::DirectionAnalysis;
use bidi_scan::detect::{analyze_document, detect_direction, Tunables};
use bidi_scan::document::{Page, TextRun};
use bidi_scan::verdict::{alignment_direction, combine, content_direction, Direction};

fn run_at(left: f64, y: f64, right: f64, text: &str) -> TextRun {
    TextRun {
        bbox: [left, y, right, y + 10.0],
        matrix: [1.0, 0.0, 0.0, 1.0],
        text: text.into(),
    }
}

fn page(runs: Vec<TextRun>) -> Page {
    Page { runs }
}

/// Four lines, tightly aligned on the left edge, ragged on the right.
fn left_aligned_page(text: &str) -> Page {
    page(vec![
        run_at(10.0, 700.0, 100.0, text),
        run_at(10.05, 680.0, 200.0, text),
        run_at(9.95, 660.0, 300.0, text),
        run_at(10.0, 640.0, 400.0, text),
    ])
}

/// Four lines, ragged on the left edge, tightly aligned on the right.
fn right_aligned_page(text: &str) -> Page {
    page(vec![
        run_at(10.0, 700.0, 400.0, text),
        run_at(110.0, 680.0, 400.05, text),
        run_at(210.0, 660.0, 399.95, text),
        run_at(310.0, 640.0, 400.0, text),
    ])
}

#[test]
fn empty_document_is_ltr() {
    let direction = detect_direction(&[], &Tunables::default());
    assert_eq!(direction, Direction::Ltr);
    assert_eq!(direction.code(), 0);
}

#[test]
fn pages_without_runs_are_ltr() {
    let pages = vec![page(vec![]), page(vec![])];
    assert_eq!(detect_direction(&pages, &Tunables::default()), Direction::Ltr);
}

#[test]
fn left_aligned_page_votes_ltr() {
    let tunables = Tunables::default();
    let pages = vec![left_aligned_page("text")];
    let analysis = analyze_document(&pages, &tunables);
    assert_eq!(analysis.ltr_votes, 1);
    assert_eq!(analysis.rtl_votes, 0);
    assert_eq!(detect_direction(&pages, &tunables), Direction::Ltr);
}

#[test]
fn right_aligned_page_votes_rtl() {
    let tunables = Tunables::default();
    let pages = vec![right_aligned_page("text")];
    let analysis = analyze_document(&pages, &tunables);
    assert_eq!(analysis.rtl_votes, 1);
    assert_eq!(analysis.ltr_votes, 0);
    assert_eq!(detect_direction(&pages, &tunables), Direction::Rtl);
}

#[test]
fn sub_floor_page_casts_no_vote_but_still_tallies_scripts() {
    let tunables = Tunables::default();
    // Two lines: below the three-line floor.
    let pages = vec![page(vec![
        run_at(10.0, 700.0, 100.0, "سلام"),
        run_at(10.0, 650.0, 300.0, "سلام"),
    ])];
    let analysis = analyze_document(&pages, &tunables);
    assert_eq!(analysis.ltr_votes + analysis.rtl_votes, 0);
    assert_eq!(analysis.left_variance_sum, 0.0);
    assert_eq!(analysis.right_variance_sum, 0.0);
    // Script counting has no per-page floor.
    assert_eq!(analysis.total_rtl_chars, 8);
}

#[test]
fn right_aligned_arabic_document_is_rtl() {
    let tunables = Tunables::default();
    let pages = vec![right_aligned_page("السلام عليكم")];
    let analysis = analyze_document(&pages, &tunables);
    assert_eq!(content_direction(&analysis, &tunables), Direction::Rtl);
    assert_eq!(alignment_direction(&analysis, &tunables), Direction::Rtl);
    assert_eq!(detect_direction(&pages, &tunables), Direction::Rtl);
}

#[test]
fn alignment_wins_when_signals_disagree() {
    let tunables = Tunables::default();
    // Left-aligned layout carrying overwhelmingly RTL text.
    let pages = vec![left_aligned_page("السلام عليكم")];
    let analysis = analyze_document(&pages, &tunables);
    assert_eq!(content_direction(&analysis, &tunables), Direction::Rtl);
    assert_eq!(alignment_direction(&analysis, &tunables), Direction::Ltr);
    assert_eq!(detect_direction(&pages, &tunables), Direction::Ltr);
}

#[test]
fn split_votes_fall_back_to_aggregate_variance() {
    let tunables = Tunables::default();
    // Page A votes LTR with a modest right-edge spread; page B votes RTL
    // with a much wider left-edge spread. One vote each falls through to
    // the variance sums, which favor the right edge.
    let page_a = page(vec![
        run_at(10.0, 700.0, 100.0, ""),
        run_at(10.0, 680.0, 120.0, ""),
        run_at(10.0, 660.0, 140.0, ""),
        run_at(10.0, 640.0, 160.0, ""),
    ]);
    let page_b = page(vec![
        run_at(100.0, 700.0, 400.0, ""),
        run_at(120.0, 680.0, 400.0, ""),
        run_at(140.0, 660.0, 400.0, ""),
        run_at(200.0, 640.0, 400.0, ""),
    ]);
    let pages = vec![page_a, page_b];
    let analysis = analyze_document(&pages, &tunables);
    assert_eq!(analysis.ltr_votes, 1);
    assert_eq!(analysis.rtl_votes, 1);
    assert_eq!(detect_direction(&pages, &tunables), Direction::Rtl);
}

#[test]
fn content_vote_needs_better_than_two_to_one() {
    let tunables = Tunables::default();

    let mut analysis = DirectionAnalysis::default();
    analysis.total_rtl_chars = 4;
    analysis.total_ltr_chars = 2;
    // Exactly 2:1 is not enough.
    assert_eq!(content_direction(&analysis, &tunables), Direction::Ltr);

    analysis.total_rtl_chars = 5;
    assert_eq!(content_direction(&analysis, &tunables), Direction::Rtl);

    analysis.total_rtl_chars = 0;
    analysis.total_ltr_chars = 0;
    assert_eq!(content_direction(&analysis, &tunables), Direction::Ltr);
}

#[test]
fn ambiguous_analysis_defaults_ltr() {
    let tunables = Tunables::default();
    let analysis = DirectionAnalysis::default();
    assert_eq!(alignment_direction(&analysis, &tunables), Direction::Ltr);
    assert_eq!(combine(&analysis, &tunables), Direction::Ltr);
}

#[test]
fn detection_is_deterministic() {
    let tunables = Tunables::default();
    let pages = vec![
        right_aligned_page("السلام عليكم"),
        left_aligned_page("hello world"),
        page(vec![run_at(10.0, 700.0, 100.0, "lone")]),
    ];
    let first = detect_direction(&pages, &tunables);
    let second = detect_direction(&pages, &tunables);
    assert_eq!(first, second);
}
