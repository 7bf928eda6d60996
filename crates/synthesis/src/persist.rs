//! Saving generated masks
//!
//! The generator is a pure function from parameters to an image; anything
//! that writes masks somewhere goes through [`MaskSink`].

use std::fs;
use std::path::{Path, PathBuf};

use image::GrayImage;
use tracing::info;

use crate::error::{Result, SynthesisError};

/// Destination for finished masks
pub trait MaskSink {
    /// Store `mask` under `name` and return where it ended up
    fn persist(&self, mask: &GrayImage, name: &str) -> Result<PathBuf>;
}

/// Writes masks as `<dir>/<name>.png`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a mask with this name would be written to
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        let file = if Path::new(name).extension().is_some_and(|ext| ext == "png") {
            name.to_string()
        } else {
            format!("{name}.png")
        };
        Ok(self.dir.join(file))
    }
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    let bad = trimmed.is_empty()
        || trimmed != name
        || name.contains(['/', '\\'])
        || name == "."
        || name == "..";
    if bad {
        return Err(SynthesisError::InvalidName(name.to_string()));
    }
    Ok(())
}

impl MaskSink for DirectorySink {
    fn persist(&self, mask: &GrayImage, name: &str) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir)?;
        mask.save(&path)?;
        info!("Saved mask to {:?}", path);
        Ok(path)
    }
}
