use crate::constants::mm_to_pt;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnbookletError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to process")]
    NoPages,
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Malformed page tree: {0}")]
    MalformedPageTree(String),
    #[error("Sheet {sheet}: {reason}")]
    Geometry { sheet: usize, reason: String },
    /// Logical page numbers collided or left a gap. Always a defect in the numbering.
    #[error("Internal consistency error: {0}")]
    Consistency(String),
    #[error("Sheet {index} failed during {stage}: {source}")]
    SheetFailed {
        index: usize,
        stage: Stage,
        #[source]
        source: Box<UnbookletError>,
    },
    /// Per-page failure of a poster run, where input pages are not booklet sheets
    #[error("Page {index} failed during {stage}: {source}")]
    PageFailed {
        index: usize,
        stage: Stage,
        #[source]
        source: Box<UnbookletError>,
    },
}

impl UnbookletError {
    /// Attach the sheet index and processing stage to an error.
    pub fn at_sheet(self, index: usize, stage: Stage) -> Self {
        match self {
            already @ (UnbookletError::SheetFailed { .. } | UnbookletError::PageFailed { .. }) => {
                already
            }
            other => UnbookletError::SheetFailed {
                index,
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Like [`at_sheet`](Self::at_sheet), but names a page of a poster run.
    pub fn at_page(self, index: usize, stage: Stage) -> Self {
        match self {
            UnbookletError::SheetFailed {
                index,
                stage,
                source,
            } => UnbookletError::PageFailed {
                index,
                stage,
                source,
            },
            already @ UnbookletError::PageFailed { .. } => already,
            other => UnbookletError::PageFailed {
                index,
                stage,
                source: Box::new(other),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, UnbookletError>;

/// Processing stage of a single sheet, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Read,
    Split,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Read => "read",
            Stage::Split => "split",
            Stage::Render => "render",
        };
        f.write_str(name)
    }
}

/// Order in which the sheets of a booklet were scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanOrder {
    /// Outer cover first, converging toward the center spread
    #[default]
    CoverFirst,
    /// Center spread first, diverging toward the cover (pages taken from a binder)
    CenterFirst,
}

impl ScanOrder {
    pub fn from_binder(from_binder: bool) -> Self {
        if from_binder {
            ScanOrder::CenterFirst
        } else {
            ScanOrder::CoverFirst
        }
    }

    pub fn is_from_binder(self) -> bool {
        self == ScanOrder::CenterFirst
    }
}

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A0 => (841.0, 1189.0),
            PaperSize::A1 => (594.0, 841.0),
            PaperSize::A2 => (420.0, 594.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Dimensions in points with orientation applied
    pub fn dimensions_pt(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_with_orientation(orientation);
        (mm_to_pt(w), mm_to_pt(h))
    }
}

/// Page rotation as stored in a page's `/Rotate` entry (clockwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Clockwise90,
        Rotation::Clockwise180,
        Rotation::Clockwise270,
    ];

    pub fn degrees(self) -> i32 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Normalize a `/Rotate` value. Returns `None` unless it is a multiple of 90.
    pub fn from_degrees(degrees: i64) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::None),
            90 => Some(Rotation::Clockwise90),
            180 => Some(Rotation::Clockwise180),
            270 => Some(Rotation::Clockwise270),
            _ => None,
        }
    }

    /// Whether displaying the page swaps its width and height
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }

    /// Short ASCII marker showing where the top of the content points
    pub fn symbol(self) -> &'static str {
        match self {
            Rotation::None => "^   0",
            Rotation::Clockwise90 => ">  90",
            Rotation::Clockwise180 => "v 180",
            Rotation::Clockwise270 => "< 270",
        }
    }
}

/// Statistics about an unbooklet run
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnbookletStatistics {
    /// Number of double-wide input sheets
    pub sheets: usize,
    /// Number of single output pages
    pub output_pages: usize,
    /// Sheets per rotation, indexed 0, 90, 180, 270
    pub rotations: [usize; 4],
    /// Portrait sheets with an effective rotation of 0, whether `/Rotate` is absent or
    /// explicitly 0 (likely missing metadata)
    pub missing_rotation: usize,
}

impl UnbookletStatistics {
    pub fn sheets_with_rotation(&self, rotation: Rotation) -> usize {
        self.rotations[(rotation.degrees() / 90) as usize]
    }
}
