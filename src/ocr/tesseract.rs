//! OCR via the tesseract command line tool.

use std::process::Command;

use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use tempfile::NamedTempFile;

use super::TextRecognizer;

/// Recognizer backed by a `tesseract` subprocess.
pub struct TesseractOcr {
    command: String,
}

impl TesseractOcr {
    /// Creates a recognizer using the given executable, or the plain
    /// `tesseract` PATH lookup when no override is configured.
    pub fn new(command: Option<&str>) -> Self {
        Self {
            command: command.unwrap_or("tesseract").to_string(),
        }
    }

    /// Verifies the tesseract executable can be run at all, so a missing
    /// install fails up front instead of midway through a schedule.
    pub fn check_available(&self) -> Result<()> {
        let output = Command::new(&self.command)
            .arg("--version")
            .output()
            .map_err(|e| {
                anyhow!(
                    "could not run {:?}: {}\n\
                     Install tesseract-ocr (e.g. `apt install tesseract-ocr`) or set \
                     \"tesseract_cmd\" in the config file.",
                    self.command,
                    e
                )
            })?;
        if !output.status.success() {
            return Err(anyhow!(
                "{:?} --version failed: {}",
                self.command,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }
        Ok(())
    }
}

impl TextRecognizer for TesseractOcr {
    fn image_to_text(&self, image: &RgbImage) -> Result<String> {
        let file = NamedTempFile::with_suffix(".png").context("failed to create temp image")?;
        image
            .save(file.path())
            .with_context(|| format!("failed to write {}", file.path().display()))?;

        let output = Command::new(&self.command)
            .arg(file.path())
            .arg("stdout")
            .arg("-l")
            .arg("eng")
            .output()
            .with_context(|| format!("failed to run {:?}", self.command))?;

        if !output.status.success() {
            return Err(anyhow!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
