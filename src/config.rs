use crate::detect::Tunables;
use crate::verdict::Direction;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detection: Detection,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// A stable, normalization-friendly string for hashing.
    pub fn normalized_for_hash(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detection: Default::default(),
            limits: Default::default(),
            paths: Default::default(),
            output: Default::default(),
            logging: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    /// "AUTO" infers from the document; "LTR"/"RTL" skip inference.
    pub forced_direction: String,
    pub line_proximity: f64,
    pub min_lines_per_page: usize,
    pub alignment_vote_factor: f64,
    pub rtl_vote_share: f64,
    pub ltr_vote_share: f64,
    pub variance_fallback_factor: f64,
    pub script_dominance_factor: f64,
}
impl Default for Detection {
    fn default() -> Self {
        let t = Tunables::default();
        Self {
            forced_direction: "AUTO".into(),
            line_proximity: t.line_proximity,
            min_lines_per_page: t.min_lines_per_page,
            alignment_vote_factor: t.alignment_vote_factor,
            rtl_vote_share: t.rtl_vote_share,
            ltr_vote_share: t.ltr_vote_share,
            variance_fallback_factor: t.variance_fallback_factor,
            script_dominance_factor: t.script_dominance_factor,
        }
    }
}
impl Detection {
    pub fn tunables(&self) -> Tunables {
        Tunables {
            line_proximity: self.line_proximity,
            min_lines_per_page: self.min_lines_per_page,
            alignment_vote_factor: self.alignment_vote_factor,
            rtl_vote_share: self.rtl_vote_share,
            ltr_vote_share: self.ltr_vote_share,
            variance_fallback_factor: self.variance_fallback_factor,
            script_dominance_factor: self.script_dominance_factor,
        }
    }

    /// Anything other than "LTR"/"RTL" means auto-detect.
    pub fn forced(&self) -> Option<Direction> {
        match self.forced_direction.as_str() {
            "LTR" => Some(Direction::Ltr),
            "RTL" => Some(Direction::Rtl),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub max_input_file_bytes: u64,
    pub max_input_pages: u32,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_file_bytes: 512 * 1024 * 1024,
            max_input_pages: 20000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    pub out_dir: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            out_dir: "out".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
    pub write_report_json: bool,
    pub write_index_json: bool,
    pub report_filename: String,
    pub print_summary: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            write_report_json: true,
            write_index_json: true,
            report_filename: "direction.json".into(),
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: true,
            file_path: "".into(),
        }
    }
}
