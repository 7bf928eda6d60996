//! Jaccard scoring of predicted masks against ground truth
//!
//! Masks are flattened to per-pixel label vectors and scored with the
//! micro-averaged Jaccard index: true positives, false positives and false
//! negatives are summed over every label before taking the ratio. For
//! per-pixel labels this reduces to `agree / (agree + 2 * disagree)`.

mod batch;
mod sweep;

use std::path::Path;

use image::GrayImage;
use tracing::debug;

use crate::error::{Result, SynthesisError};

pub use batch::{BatchReport, BatchSummary, MaskScore, evaluate_dirs};
pub use sweep::{SweepReport, TrialResult, evaluate_sweep};

/// File extensions treated as mask images
pub const MASK_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Micro-averaged Jaccard index between two masks of equal size
///
/// Returns 0.0 for empty masks.
pub fn jaccard_score(predicted: &GrayImage, ground_truth: &GrayImage) -> Result<f64> {
    if predicted.dimensions() != ground_truth.dimensions() {
        return Err(SynthesisError::mismatch(
            predicted.dimensions(),
            ground_truth.dimensions(),
        ));
    }

    let agree = predicted
        .as_raw()
        .iter()
        .zip(ground_truth.as_raw())
        .filter(|(p, g)| p == g)
        .count();
    let disagree = predicted.as_raw().len() - agree;

    // every disagreeing pixel is a false positive for one label and a false
    // negative for another
    let denominator = agree + 2 * disagree;
    if denominator == 0 {
        return Ok(0.0);
    }
    Ok(agree as f64 / denominator as f64)
}

/// Load two mask files and score them
pub fn evaluate_paths(predicted: impl AsRef<Path>, ground_truth: impl AsRef<Path>) -> Result<f64> {
    let (predicted, ground_truth) = (predicted.as_ref(), ground_truth.as_ref());
    debug!("evaluate_paths: {:?} vs {:?}", predicted, ground_truth);

    let predicted_mask = image::open(predicted)?.into_luma8();
    let truth_mask = image::open(ground_truth)?.into_luma8();
    jaccard_score(&predicted_mask, &truth_mask)
}

/// Whether a path has one of the mask image extensions
pub(crate) fn is_mask_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MASK_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}


#[cfg(test)]
mod tests {
    use super::test_support::scratch_dir;
    use super::*;
    use image::Luma;

    fn checker(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, y| {
            Luma([if (x + y) % 2 == 0 { 255 } else { 0 }])
        })
    }

    #[test]
    fn test_identical_masks_score_one() {
        let mask = checker(10, 7);
        assert_eq!(jaccard_score(&mask, &mask).unwrap(), 1.0);
    }

    #[test]
    fn test_inverted_full_masks_score_zero() {
        let set = GrayImage::from_pixel(6, 6, Luma([255]));
        let clear = GrayImage::new(6, 6);
        assert_eq!(jaccard_score(&set, &clear).unwrap(), 0.0);
    }

    #[test]
    fn test_micro_average() {
        // 3 agreeing pixels, 1 disagreeing -> 3 / (3 + 2)
        let truth = GrayImage::from_raw(4, 1, vec![0, 0, 255, 255]).unwrap();
        let predicted = GrayImage::from_raw(4, 1, vec![0, 0, 255, 0]).unwrap();
        let score = jaccard_score(&predicted, &truth).unwrap();
        assert!((score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_size_mismatch() {
        let a = GrayImage::new(3, 3);
        let b = GrayImage::new(3, 4);
        assert!(matches!(
            jaccard_score(&a, &b),
            Err(SynthesisError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_evaluate_paths() {
        let dir = scratch_dir("evaluate-paths");
        let mask = checker(12, 9);
        let path = dir.join("mask.png");
        mask.save(&path).unwrap();

        assert_eq!(evaluate_paths(&path, &path).unwrap(), 1.0);
    }

    #[test]
    fn test_evaluate_missing_file() {
        let dir = scratch_dir("evaluate-missing");
        let result = evaluate_paths(dir.join("nope.png"), dir.join("nope.png"));
        assert!(result.is_err());
    }

    #[test]
    fn test_is_mask_file() {
        assert!(is_mask_file(Path::new("a/b.PNG")));
        assert!(is_mask_file(Path::new("c.tiff")));
        assert!(!is_mask_file(Path::new("notes.txt")));
        assert!(!is_mask_file(Path::new("no_extension")));
    }
}
