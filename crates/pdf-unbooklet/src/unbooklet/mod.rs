//! Booklet reassembly - turning scanned double-wide sheets back into pages
//!
//! This module orchestrates the run:
//! 1. Read the sheets of the source document
//! 2. Split and reorder them into half pages
//! 3. Render every half page to the output PDF, optionally annotated

mod io;
mod sheets;

pub use io::{load_pdf, save_pdf};
pub use sheets::read_sheets;

use crate::constants::STEPS_PER_SHEET;
use crate::layout::{HalfPage, Sheet, booklet_page_numbers, reassemble_with_progress};
use crate::options::UnbookletOptions;
use crate::progress::ProgressSink;
use crate::render::OutputBuilder;
use crate::types::*;
use lopdf::Document;
use std::sync::Arc;

/// Main unbooklet function
pub async fn unbooklet(
    source: &Document,
    options: &UnbookletOptions,
    progress: Arc<dyn ProgressSink>,
) -> Result<Document> {
    options.validate()?;

    let source = source.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || unbooklet_sync(&source, &options, progress.as_ref()))
        .await?
}

/// Blocking core of [`unbooklet`]
pub fn unbooklet_sync(
    source: &Document,
    options: &UnbookletOptions,
    progress: &dyn ProgressSink,
) -> Result<Document> {
    options.validate()?;

    let sheets = read_sheets(source)?;
    if sheets.is_empty() {
        return Err(UnbookletError::NoPages);
    }
    progress.set_total(STEPS_PER_SHEET * sheets.len());

    let halves = reassemble_with_progress(
        &sheets,
        options.scan_order,
        &options.geometry(),
        progress,
    )?;

    progress.set_description("Writing pages");
    let total_pages = halves.len();
    let mut builder = OutputBuilder::new();
    for half in &halves {
        let sheet = &sheets[half.sheet_index];
        render_half(&mut builder, source, sheet, half, total_pages, options)
            .map_err(|e| e.at_sheet(sheet.index, Stage::Render))?;
        progress.update(1);
    }

    log::info!(
        "Reassembled {} sheets into {} pages",
        sheets.len(),
        builder.page_count()
    );
    Ok(builder.finish())
}

fn render_half(
    builder: &mut OutputBuilder,
    source: &Document,
    sheet: &Sheet,
    half: &HalfPage,
    total_pages: usize,
    options: &UnbookletOptions,
) -> Result<()> {
    let xobject = builder.xobject_for(source, sheet.page_id)?;
    let annotation = if options.debug {
        Some(debug_label(half, total_pages, options)?)
    } else {
        None
    };
    builder.push_page(xobject, &half.placement, annotation.as_deref())?;
    Ok(())
}

/// `Halfpage 3 Sheet 1: 2-7 ^   0`
fn debug_label(half: &HalfPage, total_pages: usize, options: &UnbookletOptions) -> Result<String> {
    let (left, right) = booklet_page_numbers(half.sheet_index, total_pages, options.scan_order)?;
    Ok(format!(
        "Halfpage {} Sheet {}: {}-{} {}",
        half.logical_number,
        half.sheet_index,
        left,
        right,
        half.sheet_rotation.symbol()
    ))
}
