//! Reading the physical sheets of a scanned booklet

use crate::layout::Sheet;
use crate::render::{get_media_box, get_rotate_degrees};
use crate::types::*;
use lopdf::{Document, ObjectId};

/// Read every page of `doc` as a sheet, in document order.
///
/// Failures name the offending sheet and the `read` stage.
pub fn read_sheets(doc: &Document) -> Result<Vec<Sheet>> {
    doc.get_pages()
        .into_values()
        .enumerate()
        .map(|(index, page_id)| {
            read_sheet(doc, index, page_id).map_err(|e| e.at_sheet(index, Stage::Read))
        })
        .collect()
}

fn read_sheet(doc: &Document, index: usize, page_id: ObjectId) -> Result<Sheet> {
    let media_box = get_media_box(doc, page_id)?.ok_or_else(|| UnbookletError::Geometry {
        sheet: index,
        reason: "missing or malformed MediaBox".to_string(),
    })?;

    let degrees = get_rotate_degrees(doc, page_id)?;
    let rotation = Rotation::from_degrees(degrees).ok_or_else(|| UnbookletError::Geometry {
        sheet: index,
        reason: format!("unsupported rotation of {} degrees", degrees),
    })?;

    Ok(Sheet {
        index,
        page_id,
        media_box,
        rotation,
    })
}
