//! Poster enlargement
//!
//! Every page is flattened onto the source format, enlarged to the target
//! format and printed as a grid of source-format tiles.

use crate::layout::{flatten_rotation, poster_grid, poster_tiles};
use crate::options::PosterOptions;
use crate::progress::ProgressSink;
use crate::render::OutputBuilder;
use crate::types::*;
use crate::unbooklet::read_sheets;
use lopdf::Document;
use std::sync::Arc;

/// Enlarge every page of `source` into a tiled poster
pub async fn poster(
    source: &Document,
    options: &PosterOptions,
    progress: Arc<dyn ProgressSink>,
) -> Result<Document> {
    options.validate()?;

    let source = source.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || poster_sync(&source, &options, progress.as_ref())).await?
}

/// Blocking core of [`poster`]
pub fn poster_sync(
    source: &Document,
    options: &PosterOptions,
    progress: &dyn ProgressSink,
) -> Result<Document> {
    options.validate()?;

    // Read failures carry the page index already
    let pages = read_sheets(source).map_err(|e| e.at_page(0, Stage::Read))?;
    if pages.is_empty() {
        return Err(UnbookletError::NoPages);
    }

    let (source_size, target_size) = options.sizes_pt();
    let (cols, rows) = poster_grid(source_size, target_size);
    progress.set_total(pages.len() * cols * rows);
    progress.set_description("Tiling pages");

    let mut builder = OutputBuilder::new();
    for page in &pages {
        let flattened =
            flatten_rotation(page, source_size).map_err(|e| e.at_page(page.index, Stage::Split))?;
        let xobject = builder
            .xobject_for(source, page.page_id)
            .map_err(|e| e.at_page(page.index, Stage::Render))?;
        for tile in poster_tiles(flattened, source_size, target_size) {
            builder
                .push_page(xobject, &tile, None)
                .map_err(|e| e.at_page(page.index, Stage::Render))?;
            progress.update(1);
        }
    }

    log::info!(
        "Enlarged {} pages onto {} tiles ({} x {} per page)",
        pages.len(),
        builder.page_count(),
        cols,
        rows
    );
    Ok(builder.finish())
}
