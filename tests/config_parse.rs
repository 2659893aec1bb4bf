use bidi_scan::config::Config;
use bidi_scan::detect::Tunables;
use bidi_scan::verdict::Direction;

#[test]
fn parse_example_config() {
    let raw = include_str!("../bidi-scan.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.detection.forced_direction, "AUTO");
    assert_eq!(cfg.detection.line_proximity, 5.0);
    assert_eq!(cfg.detection.min_lines_per_page, 3);
    assert!(!cfg.paths.out_dir.is_empty());
}

#[test]
fn default_config_matches_engine_defaults() {
    let cfg = Config::default();
    let from_cfg = cfg.detection.tunables();
    let engine = Tunables::default();
    assert_eq!(from_cfg.line_proximity, engine.line_proximity);
    assert_eq!(from_cfg.min_lines_per_page, engine.min_lines_per_page);
    assert_eq!(from_cfg.alignment_vote_factor, engine.alignment_vote_factor);
    assert_eq!(from_cfg.rtl_vote_share, engine.rtl_vote_share);
    assert_eq!(from_cfg.ltr_vote_share, engine.ltr_vote_share);
    assert_eq!(
        from_cfg.variance_fallback_factor,
        engine.variance_fallback_factor
    );
    assert_eq!(
        from_cfg.script_dominance_factor,
        engine.script_dominance_factor
    );
}

#[test]
fn forced_direction_parsing() {
    let mut cfg = Config::default();
    assert_eq!(cfg.detection.forced(), None);

    cfg.detection.forced_direction = "RTL".into();
    assert_eq!(cfg.detection.forced(), Some(Direction::Rtl));

    cfg.detection.forced_direction = "LTR".into();
    assert_eq!(cfg.detection.forced(), Some(Direction::Ltr));

    cfg.detection.forced_direction = "sideways".into();
    assert_eq!(cfg.detection.forced(), None);
}
