use crate::constants::PAGES_PER_SHEET;
use crate::types::*;
use crate::unbooklet::read_sheets;
use lopdf::Document;

/// Calculate statistics for reassembling `document`
pub fn calculate_statistics(document: &Document) -> Result<UnbookletStatistics> {
    let sheets = read_sheets(document)?;
    if sheets.is_empty() {
        return Err(UnbookletError::NoPages);
    }

    let mut stats = UnbookletStatistics {
        sheets: sheets.len(),
        output_pages: sheets.len() * PAGES_PER_SHEET,
        ..Default::default()
    };

    for sheet in &sheets {
        stats.rotations[(sheet.rotation.degrees() / 90) as usize] += 1;
        if sheet.is_missing_rotation() {
            stats.missing_rotation += 1;
        }
    }

    Ok(stats)
}
