use crate::config::Config;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A positioned fragment of already-decoded document text, as produced by
/// an upstream layout extractor.
///
/// `bbox` is `[left, bottom, right, top]` in page space. `matrix` holds the
/// four affine coefficients `[a, b, c, d]` of the glyph-run transform;
/// translation plays no part in orientation and is not carried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    pub bbox: [f64; 4],
    pub matrix: [f64; 4],
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

/// One extracted document: pages of positioned runs, in page order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    pub fn load(cfg: &Config, path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)
            .with_context(|| format!("stat input: {}", path.display()))?;
        if meta.len() > cfg.limits.max_input_file_bytes {
            anyhow::bail!("input exceeds max_input_file_bytes: {}", meta.len());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading run dump: {}", path.display()))?;
        let doc: Document =
            serde_json::from_str(&raw).with_context(|| "parsing run dump JSON")?;

        if doc.pages.len() > cfg.limits.max_input_pages as usize {
            anyhow::bail!("input exceeds max_input_pages: {}", doc.pages.len());
        }

        Ok(doc)
    }

    pub fn run_count(&self) -> usize {
        self.pages.iter().map(|p| p.runs.len()).sum()
    }
}
