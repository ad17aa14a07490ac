//! Booklet page numbering
//!
//! Maps the position of a scanned double-wide sheet to the logical page
//! numbers printed on its left and right halves.
//!
//! ## Scan Orders
//!
//! For an 8 page booklet (4 sheets):
//!
//! **Cover first** (outer sheet scanned first, converging to the center):
//! - Sheet 0: [8, 1]
//! - Sheet 1: [2, 7]
//! - Sheet 2: [6, 3]
//! - Sheet 3: [4, 5]
//!
//! **Center first** (pages taken out of a binder, center spread first):
//! - Sheet 0: [4, 5]
//! - Sheet 1: [6, 3]
//! - Sheet 2: [2, 7]
//! - Sheet 3: [8, 1]

use crate::types::{Result, ScanOrder, UnbookletError};

/// Calculate the `(left, right)` logical page numbers (1-based) of a sheet.
///
/// `total_pages` must be even and positive, and `index` must address one of
/// the `total_pages / 2` sheets.
pub fn booklet_page_numbers(
    index: usize,
    total_pages: usize,
    scan_order: ScanOrder,
) -> Result<(usize, usize)> {
    if total_pages == 0 || total_pages % 2 != 0 {
        return Err(UnbookletError::InvalidArgument(format!(
            "total pages must be even and positive, got {}",
            total_pages
        )));
    }

    let mid = total_pages / 2;
    if index >= mid {
        return Err(UnbookletError::InvalidArgument(format!(
            "sheet index {} out of range for {} pages ({} sheets)",
            index, total_pages, mid
        )));
    }

    let even = index % 2 == 0;
    let pair = match scan_order {
        ScanOrder::CoverFirst if even => (total_pages - index, index + 1),
        ScanOrder::CoverFirst => (index + 1, total_pages - index),
        ScanOrder::CenterFirst if even => (mid - index, mid + index + 1),
        ScanOrder::CenterFirst => (mid + index + 1, mid - index),
    };

    Ok(pair)
}

/// Page number pairs for every sheet of a booklet, in sheet order.
pub fn booklet_page_pairs(
    total_pages: usize,
    scan_order: ScanOrder,
) -> Result<Vec<(usize, usize)>> {
    (0..total_pages / 2)
        .map(|index| booklet_page_numbers(index, total_pages, scan_order))
        .collect()
}

