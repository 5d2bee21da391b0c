use anyhow::Result;
use image::GrayImage;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes intermediate detection images into numbered step directories
#[derive(Clone, Debug)]
pub struct DebugSink {
    output_dir: PathBuf,
}

impl DebugSink {
    /// The directory must be empty or non-existent
    pub fn new(output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Directory name for a step, e.g. "03_threshold_mask"
    pub fn step_dir_name(step_index: usize, step_name: &str) -> String {
        format!("{:02}_{}", step_index, step_name.to_lowercase().replace(' ', "_"))
    }

    /// Save one intermediate image as NN_step_name/01.png
    pub fn save(&self, step_index: usize, step_name: &str, image: &GrayImage) -> Result<PathBuf> {
        let step_dir = self.output_dir.join(Self::step_dir_name(step_index, step_name));
        std::fs::create_dir_all(&step_dir)?;

        let output_path = step_dir.join("01.png");
        image
            .save(&output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;

        debug!("saved debug image {}", output_path.display());
        Ok(output_path)
    }
}
