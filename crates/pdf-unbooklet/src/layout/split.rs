//! Splitting double-wide sheets into half pages
//!
//! Every sheet is first flattened: its `/Rotate` value is folded into a
//! transform so the content appears exactly as a viewer displays it, fitted
//! onto a canonical landscape canvas. The canvas is then cut at its vertical
//! center line into a left and a right half page.

use crate::constants::GEOMETRY_EPSILON;
use crate::types::{Result, Rotation, ScanOrder, UnbookletError};
use lopdf::ObjectId;

use super::numbering::booklet_page_numbers;
use super::{Placement, Rect, Side, Transform};

/// One physical scanned double-wide page
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    /// Position in the input document (0-based)
    pub index: usize,
    /// Source page object holding the content
    pub page_id: ObjectId,
    /// Page box in unrotated content space
    pub media_box: Rect,
    /// Rotation recorded in the source page
    pub rotation: Rotation,
}

impl Sheet {
    /// Width and height as displayed, after applying the page rotation
    pub fn displayed_size(&self) -> (f32, f32) {
        if self.rotation.is_quarter_turn() {
            (self.media_box.height, self.media_box.width)
        } else {
            (self.media_box.width, self.media_box.height)
        }
    }

    /// Portrait content stored without rotation usually means the scanner
    /// dropped the orientation metadata.
    pub fn is_missing_rotation(&self) -> bool {
        self.rotation == Rotation::None && self.media_box.is_portrait()
    }
}

/// One logical output page cut from a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct HalfPage {
    /// Final reading-order position (1-based)
    pub logical_number: usize,
    /// Which half of the sheet this page was cut from
    pub side: Side,
    /// Index of the originating sheet
    pub sheet_index: usize,
    /// Rotation of the originating sheet
    pub sheet_rotation: Rotation,
    /// Where the sheet content lands on this page
    pub placement: Placement,
}

/// Canonical sizes used while splitting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitGeometry {
    /// Landscape canvas every sheet is flattened onto (points)
    pub canvas: (f32, f32),
    /// Output page size; `None` keeps the intrinsic half-page size
    pub output: Option<(f32, f32)>,
}

impl SplitGeometry {
    /// Size of one half of the canvas
    pub fn half_size(&self) -> (f32, f32) {
        (self.canvas.0 / 2.0, self.canvas.1)
    }

    /// Uniform factor applied to every half when emitting it
    pub fn output_scale(&self) -> f32 {
        let (half_width, half_height) = self.half_size();
        match self.output {
            Some((width, height)) => (width / half_width).min(height / half_height),
            None => 1.0,
        }
    }
}

/// Transform that maps a sheet's content onto the canvas as it is displayed.
///
/// The media box origin is moved to zero, the page rotation is applied the
/// way a viewer would, and the result is fitted uniformly and centered. A
/// sheet without rotation that already matches the canvas maps to the
/// identity.
pub fn flatten_rotation(sheet: &Sheet, canvas: (f32, f32)) -> Result<Transform> {
    let media_box = sheet.media_box;
    if media_box.width <= GEOMETRY_EPSILON || media_box.height <= GEOMETRY_EPSILON {
        return Err(UnbookletError::Geometry {
            sheet: sheet.index,
            reason: format!(
                "page has no usable size ({} x {})",
                media_box.width, media_box.height
            ),
        });
    }

    let (displayed_width, displayed_height) = sheet.displayed_size();
    let scale = (canvas.0 / displayed_width).min(canvas.1 / displayed_height);
    let offset_x = (canvas.0 - displayed_width * scale) / 2.0;
    let offset_y = (canvas.1 - displayed_height * scale) / 2.0;

    let transform = Transform::translate(-media_box.x, -media_box.y)
        .then(Transform::page_rotation(
            sheet.rotation,
            media_box.width,
            media_box.height,
        ))
        .then(Transform::scale(scale, scale))
        .then(Transform::translate(offset_x, offset_y));

    Ok(transform)
}

/// Placement of one half of an already flattened canvas.
pub fn half_placement(flattened: Transform, side: Side, canvas: (f32, f32)) -> Placement {
    let half_width = canvas.0 / 2.0;
    let shift = match side {
        Side::Left => 0.0,
        Side::Right => -half_width,
    };

    Placement {
        width: half_width,
        height: canvas.1,
        transform: flattened.then(Transform::translate(shift, 0.0)),
        clip: Rect::sized(half_width, canvas.1),
    }
}

/// Split one sheet into its two numbered half pages.
pub fn split_sheet(
    sheet: &Sheet,
    total_pages: usize,
    scan_order: ScanOrder,
    canvas: (f32, f32),
) -> Result<(HalfPage, HalfPage)> {
    if sheet.is_missing_rotation() {
        log::warn!("Rotation missing for sheet {}", sheet.index);
    }

    let flattened = flatten_rotation(sheet, canvas)?;
    let (left_num, right_num) = booklet_page_numbers(sheet.index, total_pages, scan_order)?;

    log::debug!(
        "{:3}:{:3}-{:3} {:3}",
        sheet.index,
        left_num,
        right_num,
        sheet.rotation.degrees()
    );

    let make_half = |logical_number, side| HalfPage {
        logical_number,
        side,
        sheet_index: sheet.index,
        sheet_rotation: sheet.rotation,
        placement: half_placement(flattened, side, canvas),
    };

    Ok((make_half(left_num, Side::Left), make_half(right_num, Side::Right)))
}
