//! Layout data types for booklet reassembly
//!
//! These types represent the intermediate geometry between reading the
//! scanned sheets and rendering the output pages.

use crate::types::Rotation;

/// Which half of a double-wide sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

/// Affine transformation in PDF matrix form `[a b c d e f]`.
///
/// A point `(x, y)` maps to `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn translate(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotation a viewer applies to display a `width` × `height` page with the
    /// given `/Rotate` value. The result lands in the positive quadrant.
    pub fn page_rotation(rotation: Rotation, width: f32, height: f32) -> Self {
        match rotation {
            Rotation::None => Self::IDENTITY,
            Rotation::Clockwise90 => Self::new(0.0, -1.0, 1.0, 0.0, 0.0, width),
            Rotation::Clockwise180 => Self::new(-1.0, 0.0, 0.0, -1.0, width, height),
            Rotation::Clockwise270 => Self::new(0.0, 1.0, -1.0, 0.0, height, 0.0),
        }
    }

    /// Compose: apply `self` first, then `next`.
    pub fn then(self, next: Transform) -> Transform {
        Transform {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            e: self.e * next.a + self.f * next.c + next.e,
            f: self.e * next.b + self.f * next.d + next.f,
        }
    }

    /// Inverse transform, or `None` when the matrix is singular
    pub fn inverse(self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() < f32::EPSILON {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Transform {
            a,
            b,
            c,
            d,
            e: -(self.e * a + self.f * c),
            f: -(self.e * b + self.f * d),
        })
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Content stream operator setting this matrix
    pub fn to_cm(&self) -> String {
        format!(
            "{} {} {} {} {} {} cm",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }

    pub fn approx_eq(&self, other: &Transform, tolerance: f32) -> bool {
        [
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
            self.e - other.e,
            self.f - other.f,
        ]
        .iter()
        .all(|delta| delta.abs() <= tolerance)
    }
}

/// How source content appears on one output page
///
/// This is the result of all layout calculations and contains
/// everything needed to render the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Output page width in points
    pub width: f32,
    /// Output page height in points
    pub height: f32,
    /// Maps source content space onto the output page
    pub transform: Transform,
    /// Visible area on the output page
    pub clip: Rect,
}

impl Placement {
    /// Scale uniformly to fit a `width` × `height` page and center on it.
    pub fn fit_to(self, width: f32, height: f32) -> Placement {
        let scale = (width / self.width).min(height / self.height);
        let offset_x = (width - self.width * scale) / 2.0;
        let offset_y = (height - self.height * scale) / 2.0;
        let fit = Transform::scale(scale, scale).then(Transform::translate(offset_x, offset_y));

        Placement {
            width,
            height,
            transform: self.transform.then(fit),
            clip: Rect::new(
                self.clip.x * scale + offset_x,
                self.clip.y * scale + offset_y,
                self.clip.width * scale,
                self.clip.height * scale,
            ),
        }
    }
}
