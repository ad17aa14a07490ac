//! Poster tiling
//!
//! A page is enlarged from the source format to the target format and then
//! cut into source-format tiles, row-major from the top-left corner.

use crate::constants::GEOMETRY_EPSILON;

use super::{Placement, Rect, Transform};

/// Number of tile columns and rows needed to cover `target` with `source` sheets
pub fn poster_grid(source: (f32, f32), target: (f32, f32)) -> (usize, usize) {
    let count = |target: f32, source: f32| ((target / source) - GEOMETRY_EPSILON).ceil().max(1.0);
    (
        count(target.0, source.0) as usize,
        count(target.1, source.1) as usize,
    )
}

/// Placements of all tiles of one enlarged page.
///
/// `flattened` maps the page content onto a `source`-sized canvas. The
/// canvas is scaled uniformly to fit `target` and centered on it before
/// cutting.
pub fn poster_tiles(
    flattened: Transform,
    source: (f32, f32),
    target: (f32, f32),
) -> Vec<Placement> {
    let (source_w, source_h) = source;
    let (target_w, target_h) = target;

    let scale = (target_w / source_w).min(target_h / source_h);
    let enlarge = flattened
        .then(Transform::scale(scale, scale))
        .then(Transform::translate(
            (target_w - source_w * scale) / 2.0,
            (target_h - source_h * scale) / 2.0,
        ));

    let (cols, rows) = poster_grid(source, target);
    let mut tiles = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let x = col as f32 * source_w;
            let y = target_h - (row + 1) as f32 * source_h;
            tiles.push(Placement {
                width: source_w,
                height: source_h,
                transform: enlarge.then(Transform::translate(-x, -y)),
                clip: Rect::sized(source_w, source_h),
            });
        }
    }
    tiles
}
