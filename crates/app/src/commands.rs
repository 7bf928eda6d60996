//! Generating commands, separated from argument parsing so they can run
//! against any output directory and input stream

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hairline_config::{CompositeConfig, GenerationParameters};
use image::{GrayImage, RgbImage};
use synthesis::{DirectorySink, HairColor, HairMaskGenerator, MaskSink, composite, cut_out};
use tracing::info;

use crate::prompt;

/// How a freshly generated mask gets saved
pub enum MaskSave<'a> {
    /// Write it under the given name
    Direct,
    /// Ask on `output` and read the answer from `input`
    Prompt {
        input: &'a mut dyn BufRead,
        output: &'a mut dyn Write,
    },
}

impl MaskSave<'_> {
    fn save(self, mask: &GrayImage, sink: &DirectorySink, name: &str) -> Result<Option<PathBuf>> {
        match self {
            MaskSave::Direct => Ok(Some(sink.persist(mask, name)?)),
            MaskSave::Prompt { input, output } => {
                let decision = prompt::prompt_save(mask, sink, input, output)?;
                info!("Save decision: {:?}", decision);
                Ok(decision.path)
            }
        }
    }
}

/// Files written by [`impose_image`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImposeOutputs {
    /// `None` when the save prompt was declined
    pub mask: Option<PathBuf>,
    pub hair: PathBuf,
    pub cutout: PathBuf,
}

/// Generate a mask and save it to `output_dir`
pub fn generate_mask(
    params: GenerationParameters,
    output_dir: &Path,
    name: &str,
    save: MaskSave<'_>,
) -> Result<Option<PathBuf>> {
    let mask = HairMaskGenerator::new(params)?.generate_default()?;
    save.save(&mask, &DirectorySink::new(output_dir), name)
}

/// Generate a mask sized to `image_path` and draw it into the photo
///
/// `params.width` and `params.height` are replaced by the photo size. Writes
/// `<stem>_mask.png`, `<stem>_hair.png` (colored hair blended in) and
/// `<stem>_cutout.png` (masked pixels blacked out).
pub fn impose_image(
    image_path: &Path,
    mut params: GenerationParameters,
    composite_config: &CompositeConfig,
    output_dir: &Path,
    save: MaskSave<'_>,
) -> Result<ImposeOutputs> {
    composite_config.validate()?;
    let color: HairColor = composite_config.color.parse()?;

    let base = image::open(image_path)
        .with_context(|| format!("Failed to open {}", image_path.display()))?
        .into_rgb8();
    (params.width, params.height) = base.dimensions();

    let mask = HairMaskGenerator::new(params)?.generate_default()?;
    let hairy = composite(&base, &mask, &color, composite_config.alpha)?;
    let bald = cut_out(&base, &mask)?;

    let stem = file_stem(image_path);
    let sink = DirectorySink::new(output_dir);
    let mask_path = save.save(&mask, &sink, &format!("{stem}_mask"))?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let hair = save_rgb(&hairy, &output_dir.join(format!("{stem}_hair.png")))?;
    let cutout = save_rgb(&bald, &output_dir.join(format!("{stem}_cutout.png")))?;

    Ok(ImposeOutputs {
        mask: mask_path,
        hair,
        cutout,
    })
}

fn save_rgb(image: &RgbImage, path: &Path) -> Result<PathBuf> {
    image
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;
    info!("Saved {:?}", path);
    Ok(path.to_path_buf())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}
