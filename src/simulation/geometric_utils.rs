//! Bounding-box helpers used as the broad phase before mask collision.

use geo::{Intersects, Rect, coord};

/// Axis-aligned box of a sprite whose top-left corner is at (x, y).
pub fn sprite_rect(x: f32, y: f32, width: f32, height: f32) -> Rect<f32> {
    Rect::new(coord! { x: x, y: y }, coord! { x: x + width, y: y + height })
}

/// Whether two sprite boxes touch or overlap.
///
/// # Arguments
///
/// * `a` - First sprite box
/// * `b` - Second sprite box
pub fn rects_touch(a: &Rect<f32>, b: &Rect<f32>) -> bool {
    a.intersects(b)
}
