use crate::analysis::{DirectionAnalysis, PageStats};
use crate::verdict::Direction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionReport {
    pub input: InputInfo,
    pub page_count: usize,
    pub run_count: usize,
    pub pages: Vec<PageStats>,
    pub analysis: DirectionAnalysis,
    pub decision: Decision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    pub path: String,
    pub file_bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub alignment: Direction,
    pub content: Direction,
    pub direction: Direction,
    pub code: u8,
    pub forced: bool,
}
