//! Parameter sweep evaluation
//!
//! A sweep directory holds one subdirectory per trial (one parameter
//! configuration of a hair detector). Each trial is scored against the same
//! ground truth directory and the trials are ranked by mean Jaccard.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::batch::{BatchSummary, evaluate_dirs};
use crate::error::{Result, SynthesisError};

/// Outcome of a single trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Trial directory name
    pub name: String,
    pub path: PathBuf,
    pub summary: BatchSummary,
}

/// Ranked trials, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub trials: Vec<TrialResult>,
}

impl SweepReport {
    /// The trial with the highest mean score
    pub fn best(&self) -> Option<&TrialResult> {
        self.trials.first()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Score every trial subdirectory of `trials_dir` against `ground_truth_dir`
///
/// Trials without any matched masks are skipped; if no trial remains the
/// sweep fails with `EmptyBatch`.
pub fn evaluate_sweep(
    trials_dir: impl AsRef<Path>,
    ground_truth_dir: impl AsRef<Path>,
) -> Result<SweepReport> {
    let (trials_dir, ground_truth_dir) = (trials_dir.as_ref(), ground_truth_dir.as_ref());

    let mut trial_dirs: Vec<PathBuf> = fs::read_dir(trials_dir)?
        .filter_map(|entry| Some(entry.ok()?.path()))
        .filter(|path| path.is_dir())
        .collect();
    trial_dirs.sort();

    let mut trials = Vec::new();
    for path in trial_dirs {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match evaluate_dirs(&path, ground_truth_dir) {
            Ok(report) => trials.push(TrialResult {
                name,
                path,
                summary: report.summary,
            }),
            Err(SynthesisError::EmptyBatch(_)) => {
                warn!("Trial {:?} has no masks to evaluate, skipping", name);
            }
            Err(e) => return Err(e),
        }
    }

    if trials.is_empty() {
        return Err(SynthesisError::EmptyBatch(trials_dir.to_path_buf()));
    }

    // stable sort keeps directory order among ties
    trials.sort_by(|a, b| b.summary.mean.total_cmp(&a.summary.mean));

    let report = SweepReport { trials };
    if let Some(best) = report.best() {
        info!(
            "Best of {} trials: {} (mean={:.4}, std={:.4})",
            report.trials.len(),
            best.name,
            best.summary.mean,
            best.summary.std
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluate::test_support::scratch_dir;
    use image::{GrayImage, Luma};

    #[test]
    fn test_sweep_ranks_trials() {
        let root = scratch_dir("sweep-rank");
        let truth = root.join("truth");
        let trials = root.join("trials");
        for dir in ["trial-000", "trial-001", "trial-002"] {
            fs::create_dir_all(trials.join(dir)).unwrap();
        }
        fs::create_dir_all(&truth).unwrap();

        let truth_mask = GrayImage::from_raw(4, 1, vec![0, 0, 255, 255]).unwrap();
        truth_mask.save(truth.join("img.png")).unwrap();

        // exact match
        truth_mask.save(trials.join("trial-001/img.png")).unwrap();
        // one pixel wrong
        GrayImage::from_raw(4, 1, vec![0, 0, 255, 0])
            .unwrap()
            .save(trials.join("trial-000/img.png"))
            .unwrap();
        // trial-002 stays empty and is skipped

        let report = evaluate_sweep(&trials, &truth).unwrap();
        assert_eq!(report.trials.len(), 2);

        let best = report.best().unwrap();
        assert_eq!(best.name, "trial-001");
        assert_eq!(best.summary.mean, 1.0);
        assert_eq!(report.trials[1].name, "trial-000");

        let json = report.to_json().unwrap();
        assert!(json.contains("trial-001"));
    }

    #[test]
    fn test_sweep_without_trials_is_error() {
        let root = scratch_dir("sweep-empty");
        let truth = root.join("truth");
        fs::create_dir_all(&truth).unwrap();
        GrayImage::from_pixel(2, 2, Luma([255]))
            .save(truth.join("x.png"))
            .unwrap();

        assert!(matches!(
            evaluate_sweep(&root.join("truth"), &truth),
            Err(SynthesisError::EmptyBatch(_))
        ));
    }
}
