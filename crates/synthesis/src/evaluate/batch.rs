//! Batch scoring of a directory of predicted masks

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{evaluate_paths, is_mask_file};
use crate::error::{Result, SynthesisError};

/// Score of one predicted/ground-truth pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskScore {
    pub predicted: PathBuf,
    pub ground_truth: PathBuf,
    pub score: f64,
}

/// Summary statistics over a batch of scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl BatchSummary {
    /// Summarize scores, or None when there are none
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let count = scores.len();
        let mean = scores.iter().sum::<f64>() / count as f64;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count as f64;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            count,
            mean,
            std: variance.sqrt(),
            min,
            max,
        })
    }
}

/// Per-mask scores plus their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub scores: Vec<MaskScore>,
    pub summary: BatchSummary,
}

impl BatchReport {
    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Mask files in a directory, sorted by path
pub(crate) fn list_masks(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| Some(entry.ok()?.path()))
        .filter(|path| path.is_file() && is_mask_file(path))
        .collect();
    paths.sort();
    Ok(paths)
}

fn stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

/// Score every predicted mask that has a ground truth with the same stem
///
/// An empty batch is an error: it almost always means a wrong directory.
pub fn evaluate_dirs(
    predicted_dir: impl AsRef<Path>,
    ground_truth_dir: impl AsRef<Path>,
) -> Result<BatchReport> {
    let (predicted_dir, ground_truth_dir) = (predicted_dir.as_ref(), ground_truth_dir.as_ref());

    let truths: HashMap<String, PathBuf> = list_masks(ground_truth_dir)?
        .into_iter()
        .filter_map(|path| Some((stem(&path)?, path)))
        .collect();

    let mut scores = Vec::new();
    for predicted in list_masks(predicted_dir)? {
        let Some(ground_truth) = stem(&predicted).and_then(|s| truths.get(&s)) else {
            warn!("No ground truth for {:?}, skipping", predicted);
            continue;
        };

        let score = evaluate_paths(&predicted, ground_truth)?;
        debug!("{:?}: {:.4}", predicted, score);
        scores.push(MaskScore {
            predicted,
            ground_truth: ground_truth.clone(),
            score,
        });
    }

    let values: Vec<f64> = scores.iter().map(|s| s.score).collect();
    let summary = BatchSummary::from_scores(&values)
        .ok_or_else(|| SynthesisError::EmptyBatch(predicted_dir.to_path_buf()))?;

    info!(
        "Evaluated {} masks in {:?}: mean={:.4}, std={:.4}, min={:.4}, max={:.4}",
        summary.count, predicted_dir, summary.mean, summary.std, summary.min, summary.max
    );

    Ok(BatchReport { scores, summary })
}
