use crate::constants::GEOMETRY_EPSILON;
use crate::layout::SplitGeometry;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration of an unbooklet run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UnbookletOptions {
    // Input
    pub input_file: PathBuf,

    // Numbering
    pub scan_order: ScanOrder,

    // Geometry
    /// Format of the scanned double-wide sheets (used in landscape)
    pub sheet_size: PaperSize,
    /// Format of the reassembled pages (portrait); `None` keeps the half-sheet size
    pub output_size: Option<PaperSize>,

    // Diagnostics
    pub debug: bool,
}

impl Default for UnbookletOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            scan_order: ScanOrder::CoverFirst,
            sheet_size: PaperSize::A4,
            output_size: Some(PaperSize::A4),
            debug: false,
        }
    }
}

impl UnbookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        json::load(path).await
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        json::save(self, path).await
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        validate_size("Sheet size", self.sheet_size)?;
        if let Some(output_size) = self.output_size {
            validate_size("Output size", output_size)?;
        }
        Ok(())
    }

    /// Canvas and output sizes in points
    pub fn geometry(&self) -> SplitGeometry {
        SplitGeometry {
            canvas: self.sheet_size.dimensions_pt(Orientation::Landscape),
            output: self
                .output_size
                .map(|size| size.dimensions_pt(Orientation::Portrait)),
        }
    }
}

/// Configuration of a poster run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PosterOptions {
    pub input_file: PathBuf,
    /// Format of the input pages and of the printed tiles
    pub source_size: PaperSize,
    /// Format of the enlarged page
    pub target_size: PaperSize,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            source_size: PaperSize::A4,
            target_size: PaperSize::A2,
        }
    }
}

impl PosterOptions {
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        json::load(path).await
    }

    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        json::save(self, path).await
    }

    /// The source format must be strictly smaller than the target in both dimensions.
    pub fn validate(&self) -> Result<()> {
        validate_size("Source size", self.source_size)?;
        validate_size("Target size", self.target_size)?;

        let (source_w, source_h) = self.source_size.dimensions_mm();
        let (target_w, target_h) = self.target_size.dimensions_mm();
        if source_w >= target_w || source_h >= target_h {
            return Err(UnbookletError::Config(format!(
                "Target size {:?} must be larger than source size {:?}",
                self.target_size, self.source_size
            )));
        }
        Ok(())
    }

    /// Source and target sizes in points, portrait
    pub fn sizes_pt(&self) -> ((f32, f32), (f32, f32)) {
        (
            self.source_size.dimensions_pt(Orientation::Portrait),
            self.target_size.dimensions_pt(Orientation::Portrait),
        )
    }
}

fn validate_size(what: &str, size: PaperSize) -> Result<()> {
    let (width, height) = size.dimensions_mm();
    if !(width > GEOMETRY_EPSILON && height > GEOMETRY_EPSILON) {
        return Err(UnbookletError::Config(format!(
            "{} must have positive dimensions, got {} x {} mm",
            what, width, height
        )));
    }
    Ok(())
}

#[cfg(feature = "serde")]
mod json {
    use crate::types::{Result, UnbookletError};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use std::path::Path;

    pub(super) async fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
        let bytes = tokio::fs::read(path).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| UnbookletError::Config(format!("Failed to parse config: {}", e)))
    }

    pub(super) async fn save<T: Serialize>(value: &T, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| UnbookletError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}
