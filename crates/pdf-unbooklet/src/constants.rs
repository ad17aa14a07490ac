//! Shared constants for booklet reassembly
//!
//! This module centralizes magic numbers and constants used throughout
//! the splitting and rendering process.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f32 = 72.0 / 25.4; // ≈ 2.83465

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

// =============================================================================
// Geometry
// =============================================================================

/// Tolerance for comparing lengths in points
pub const GEOMETRY_EPSILON: f32 = 0.01;

/// Number of logical pages on one double-wide sheet
pub const PAGES_PER_SHEET: usize = 2;

/// Progress steps per sheet: one split plus one write per half
pub const STEPS_PER_SHEET: usize = 3;

// =============================================================================
// Debug Overlay
// =============================================================================

/// Font size of the debug overlay text (points)
pub const DEBUG_FONT_SIZE: f32 = 18.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Fill color of the debug overlay text (RGB)
pub const DEBUG_TEXT_COLOR: (f32, f32, f32) = (0.0, 0.0, 1.0);

// =============================================================================
// Sample Booklet
// =============================================================================

/// Inner margin of the frame drawn around each half (mm)
pub const SAMPLE_FRAME_MARGIN_MM: f32 = 5.0;

/// Font size of the printed page numbers (points)
pub const SAMPLE_NUMBER_FONT_SIZE: f32 = 240.0;

/// Approximate character width ratio for Helvetica-Bold digits
pub const HELVETICA_BOLD_DIGIT_WIDTH_RATIO: f32 = 0.556;
