//! Document-level reassembly
//!
//! Splits every sheet, files the halves by logical page number and emits
//! them in reading order, scaled to the output format.

use crate::constants::PAGES_PER_SHEET;
use crate::progress::ProgressSink;
use crate::types::{Result, ScanOrder, Stage, UnbookletError};
use std::collections::BTreeMap;

use super::split::{HalfPage, Sheet, SplitGeometry, split_sheet};

/// Reassemble the half pages of all sheets in logical page order.
pub fn reassemble(
    sheets: &[Sheet],
    scan_order: ScanOrder,
    geometry: &SplitGeometry,
) -> Result<Vec<HalfPage>> {
    reassemble_with_progress(sheets, scan_order, geometry, &crate::progress::NoProgress)
}

/// Same as [`reassemble`], reporting one step per split sheet.
pub fn reassemble_with_progress(
    sheets: &[Sheet],
    scan_order: ScanOrder,
    geometry: &SplitGeometry,
    progress: &dyn ProgressSink,
) -> Result<Vec<HalfPage>> {
    if sheets.is_empty() {
        return Err(UnbookletError::NoPages);
    }

    let total_pages = PAGES_PER_SHEET * sheets.len();
    let mut pages: BTreeMap<usize, HalfPage> = BTreeMap::new();

    progress.set_description("Splitting pages");
    for sheet in sheets {
        let (left, right) = split_sheet(sheet, total_pages, scan_order, geometry.canvas)
            .map_err(|e| e.at_sheet(sheet.index, Stage::Split))?;
        file_half(&mut pages, left)?;
        file_half(&mut pages, right)?;
        progress.update(1);
    }

    progress.set_description("Reordering pages");
    verify_complete(&pages, total_pages)?;

    let halves = pages.into_values();
    let ordered: Vec<HalfPage> = match geometry.output {
        Some((width, height)) => halves
            .map(|mut half| {
                half.placement = half.placement.fit_to(width, height);
                half
            })
            .collect(),
        None => halves.collect(),
    };

    Ok(ordered)
}

fn file_half(pages: &mut BTreeMap<usize, HalfPage>, half: HalfPage) -> Result<()> {
    if let Some(existing) = pages.get(&half.logical_number) {
        return Err(UnbookletError::Consistency(format!(
            "logical page {} produced by sheet {} and sheet {}",
            half.logical_number, existing.sheet_index, half.sheet_index
        )));
    }
    pages.insert(half.logical_number, half);
    Ok(())
}

/// The collected page numbers must be exactly `1..=total_pages`.
fn verify_complete(pages: &BTreeMap<usize, HalfPage>, total_pages: usize) -> Result<()> {
    if let Some(missing) = (1..=total_pages).find(|n| !pages.contains_key(n)) {
        return Err(UnbookletError::Consistency(format!(
            "logical page {} missing from {} pages",
            missing, total_pages
        )));
    }
    if pages.len() != total_pages {
        return Err(UnbookletError::Consistency(format!(
            "expected {} pages, assembled {}",
            total_pages,
            pages.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Placement, Rect, Side, Transform};
    use crate::types::Rotation;

    fn sheets(count: usize) -> Vec<Sheet> {
        (0..count)
            .map(|index| Sheet {
                index,
                page_id: (index as u32 + 1, 0),
                media_box: Rect::sized(842.0, 595.0),
                rotation: Rotation::None,
            })
            .collect()
    }

    fn half(logical_number: usize, sheet_index: usize) -> HalfPage {
        HalfPage {
            logical_number,
            side: Side::Left,
            sheet_index,
            sheet_rotation: Rotation::None,
            placement: Placement {
                width: 1.0,
                height: 1.0,
                transform: Transform::IDENTITY,
                clip: Rect::sized(1.0, 1.0),
            },
        }
    }

    #[test]
    fn test_reassemble_orders_pages() {
        let geometry = SplitGeometry {
            canvas: (842.0, 595.0),
            output: None,
        };
        let pages = reassemble(&sheets(4), ScanOrder::CoverFirst, &geometry).unwrap();
        let numbers: Vec<usize> = pages.iter().map(|p| p.logical_number).collect();
        assert_eq!(numbers, (1..=8).collect::<Vec<_>>());

        // Page 1 is the right half of the first sheet
        assert_eq!(pages[0].sheet_index, 0);
        assert_eq!(pages[0].side, Side::Right);
        // Page 8 is the left half of the first sheet
        assert_eq!(pages[7].sheet_index, 0);
        assert_eq!(pages[7].side, Side::Left);
    }

    #[test]
    fn test_reassemble_scales_to_output() {
        let geometry = SplitGeometry {
            canvas: (842.0, 595.0),
            output: Some((595.0, 842.0)),
        };
        let pages = reassemble(&sheets(1), ScanOrder::CenterFirst, &geometry).unwrap();
        assert_eq!(pages.len(), 2);
        for page in &pages {
            assert_eq!(page.placement.width, 595.0);
            assert_eq!(page.placement.height, 842.0);
        }
    }

    #[test]
    fn test_reassemble_empty() {
        let geometry = SplitGeometry {
            canvas: (842.0, 595.0),
            output: None,
        };
        assert!(matches!(
            reassemble(&[], ScanOrder::CoverFirst, &geometry),
            Err(UnbookletError::NoPages)
        ));
    }

    #[test]
    fn test_reassemble_reports_sheet() {
        let mut input = sheets(2);
        input[1].media_box = Rect::sized(0.0, 0.0);
        let geometry = SplitGeometry {
            canvas: (842.0, 595.0),
            output: None,
        };
        match reassemble(&input, ScanOrder::CoverFirst, &geometry) {
            Err(UnbookletError::SheetFailed { index, stage, .. }) => {
                assert_eq!(index, 1);
                assert_eq!(stage, Stage::Split);
            }
            other => panic!("Expected SheetFailed error, got {:?}", other),
        }
    }

    #[test]
    fn test_collision_detected() {
        let mut pages = BTreeMap::new();
        file_half(&mut pages, half(3, 0)).unwrap();
        assert!(matches!(
            file_half(&mut pages, half(3, 1)),
            Err(UnbookletError::Consistency(_))
        ));
    }

    #[test]
    fn test_gap_detected() {
        let mut pages = BTreeMap::new();
        file_half(&mut pages, half(1, 0)).unwrap();
        file_half(&mut pages, half(3, 0)).unwrap();
        assert!(matches!(
            verify_complete(&pages, 4),
            Err(UnbookletError::Consistency(_))
        ));
    }
}
