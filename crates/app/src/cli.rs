//! Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (hairline.toml). Falls back to $HAIRLINE_CONFIG.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a synthetic hair mask
    Generate(GenerateArgs),
    /// Generate a mask sized to a photo and composite colored hair into it
    Impose(ImposeArgs),
    /// Jaccard index between one predicted mask and its ground truth
    Evaluate(EvaluateArgs),
    /// Jaccard statistics over a directory of predicted masks
    Batch(BatchArgs),
    /// Rank parameter-sweep trial directories by mean Jaccard index
    Sweep(SweepArgs),
}

/// Stroke style flags shared by every generating command
#[derive(Args, Debug, Default)]
pub struct StyleArgs {
    /// Standard deviation of the curvature around its mean (0 = fixed)
    #[arg(long)]
    pub jitter: Option<f32>,

    /// Minimum stroke thickness in pixels
    #[arg(long)]
    pub min_thickness: Option<u32>,

    /// Maximum stroke thickness in pixels
    #[arg(long)]
    pub max_thickness: Option<u32>,

    /// Render hairs with a fading root instead of a solid polyline
    #[arg(long, default_value_t = false)]
    pub faded_root: bool,

    /// Fraction of each hair covered by the root fade
    #[arg(long, requires = "faded_root")]
    pub fade_fraction: Option<f32>,

    /// Mean of the additive Gaussian noise
    #[arg(long, requires = "noise_std")]
    pub noise_mean: Option<f32>,

    /// Standard deviation of the additive Gaussian noise
    #[arg(long)]
    pub noise_std: Option<f32>,

    /// Seed for reproducible masks
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory that receives the output images
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Ask whether (and under which name) to save the mask
    #[arg(long, default_value_t = false)]
    pub prompt: bool,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Canvas width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of hairs to draw
    #[arg(short = 'n', long)]
    pub num_hairs: Option<u32>,

    /// Mean curvature as a fraction of the chord length
    #[arg(long, allow_hyphen_values = true)]
    pub curvature: Option<f32>,

    /// File name for the saved mask (without directory)
    #[arg(long, default_value = "hair_mask")]
    pub name: String,

    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(Args, Debug)]
pub struct ImposeArgs {
    /// Photo to draw hair onto
    pub image_path: PathBuf,

    /// Number of hairs to draw
    pub num_hairs: u32,

    /// Mean curvature as a fraction of the chord length
    #[arg(allow_hyphen_values = true)]
    pub curvature: f32,

    /// Palette name (e.g. dark_brown, blonde) or r,g,b triple
    pub hair_color: String,

    /// Blend factor in [0, 1]
    pub alpha: Option<f32>,

    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Predicted mask image
    pub predicted: PathBuf,

    /// Ground truth mask image
    pub ground_truth: PathBuf,

    /// Also write the result line to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Directory of predicted masks
    pub predicted_dir: PathBuf,

    /// Directory of ground truth masks (matched by file stem)
    pub ground_truth_dir: PathBuf,

    /// Write the full JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Directory containing one subdirectory of masks per trial
    pub trials_dir: PathBuf,

    /// Directory of ground truth masks (matched by file stem)
    pub ground_truth_dir: PathBuf,

    /// Write the full JSON report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}
