//! Hairline - synthetic dermoscopic hair masks from the command line

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use hairline_config::{CompositeConfig, CurvatureConfig, HairlineConfig};
use synthesis::{evaluate_dirs, evaluate_paths, evaluate_sweep};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod prompt;

use cli::{BatchArgs, Cli, Command, EvaluateArgs, GenerateArgs, ImposeArgs, SweepArgs};
use commands::MaskSave;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Generate(args) => generate(args, config),
        Command::Impose(args) => impose(args, config),
        Command::Evaluate(args) => evaluate(args),
        Command::Batch(args) => batch(args),
        Command::Sweep(args) => sweep(args),
    }
}

fn generate(args: GenerateArgs, config: HairlineConfig) -> Result<()> {
    let output_dir = args.style.output_dir(&config);
    let mut params = config.generation;

    if let Some(width) = args.width {
        params.width = width;
    }
    if let Some(height) = args.height {
        params.height = height;
    }
    if let Some(num_hairs) = args.num_hairs {
        params.num_hairs = num_hairs;
    }
    if let Some(curvature) = args.curvature {
        params.curvature.mean = curvature;
    }
    args.style.apply(&mut params);

    let (mut stdin, mut stdout) = (io::stdin().lock(), io::stdout());
    let save = mask_save(args.style.prompt, &mut stdin, &mut stdout);
    commands::generate_mask(params, &output_dir, &args.name, save)?;
    Ok(())
}

fn impose(args: ImposeArgs, config: HairlineConfig) -> Result<()> {
    let output_dir = args.style.output_dir(&config);

    let mut params = config.generation;
    params.num_hairs = args.num_hairs;
    params.curvature = CurvatureConfig {
        mean: args.curvature,
        ..params.curvature
    };
    args.style.apply(&mut params);

    let composite_config = CompositeConfig {
        color: args.hair_color.clone(),
        alpha: args.alpha.unwrap_or(config.composite.alpha),
    };

    let (mut stdin, mut stdout) = (io::stdin().lock(), io::stdout());
    let save = mask_save(args.style.prompt, &mut stdin, &mut stdout);
    let outputs =
        commands::impose_image(&args.image_path, params, &composite_config, &output_dir, save)?;
    info!("Impose finished: {:?}", outputs);
    Ok(())
}

fn mask_save<'a>(
    prompt: bool,
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
) -> MaskSave<'a> {
    if prompt {
        MaskSave::Prompt { input, output }
    } else {
        MaskSave::Direct
    }
}

fn evaluate(args: EvaluateArgs) -> Result<()> {
    let score = evaluate_paths(&args.predicted, &args.ground_truth)?;
    let statement = format!("Jaccard Index: {score}");
    println!("{statement}");

    if let Some(report) = args.report {
        fs::write(&report, format!("{statement}\n"))
            .with_context(|| format!("Failed to write {}", report.display()))?;
    }
    Ok(())
}

fn batch(args: BatchArgs) -> Result<()> {
    let report = evaluate_dirs(&args.predicted_dir, &args.ground_truth_dir)?;
    let summary = report.summary;
    println!(
        "masks={} mean={:.4} std={:.4} min={:.4} max={:.4}",
        summary.count, summary.mean, summary.std, summary.min, summary.max
    );

    if let Some(path) = args.report {
        write_report(&path, &report.to_json()?)?;
    }
    Ok(())
}

fn sweep(args: SweepArgs) -> Result<()> {
    let report = evaluate_sweep(&args.trials_dir, &args.ground_truth_dir)?;
    for trial in &report.trials {
        println!(
            "{:<24} masks={:<4} mean={:.4} std={:.4} min={:.4} max={:.4}",
            trial.name,
            trial.summary.count,
            trial.summary.mean,
            trial.summary.std,
            trial.summary.min,
            trial.summary.max
        );
    }
    if let Some(best) = report.best() {
        println!("Best trial: {} (mean={:.4})", best.name, best.summary.mean);
    }

    if let Some(path) = args.report {
        write_report(&path, &report.to_json()?)?;
    }
    Ok(())
}

fn write_report(path: &Path, json: &str) -> Result<()> {
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote report to {:?}", path);
    Ok(())
}

