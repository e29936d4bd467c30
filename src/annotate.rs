//! Match rectangles and their rendering.
//!
//! The rectangle of a match at `(x, y)` for a `w×h` template covers the
//! half-open pixel ranges `[x, x + w) × [y, y + h)`. Rendering needs the
//! `image-io` feature and draws strokes inward so nothing lands outside the
//! rectangle.

/// Axis-aligned rectangle with half-open extents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column past the rectangle.
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// First row past the rectangle.
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// True when pixel `(px, py)` lies inside the rectangle.
    pub fn contains(&self, px: usize, py: usize) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// True when pixel `(px, py)` lies on a border stroke of the given thickness.
    pub fn on_border(&self, px: usize, py: usize, thickness: usize) -> bool {
        if !self.contains(px, py) || thickness == 0 {
            return false;
        }
        px < self.x + thickness
            || py < self.y + thickness
            || px + thickness >= self.right()
            || py + thickness >= self.bottom()
    }

    /// Part of the rectangle inside a `width×height` canvas, if any.
    pub fn clipped(&self, width: usize, height: usize) -> Option<Rect> {
        if self.x >= width || self.y >= height {
            return None;
        }
        Some(Rect::new(
            self.x,
            self.y,
            self.width.min(width - self.x),
            self.height.min(height - self.y),
        ))
    }

    /// Rectangle shrunk by `by` pixels on every side, if anything remains.
    pub fn shrink(&self, by: usize) -> Option<Rect> {
        let width = self.width.checked_sub(2 * by).filter(|w| *w > 0)?;
        let height = self.height.checked_sub(2 * by).filter(|h| *h > 0)?;
        Some(Rect::new(self.x + by, self.y + by, width, height))
    }
}

#[cfg(feature = "image-io")]
pub use render::draw_rect;

#[cfg(feature = "image-io")]
mod render {
    use super::Rect;
    use crate::util::{LocMatchError, LocMatchResult};
    use imageproc::drawing::{draw_hollow_rect_mut, Canvas};

    /// Draws `rect` on `canvas` as nested one-pixel outlines.
    ///
    /// A rectangle reaching past the canvas is an error; the match rectangle
    /// always fits the scene it was found in.
    pub fn draw_rect<C: Canvas>(
        canvas: &mut C,
        rect: Rect,
        color: C::Pixel,
        thickness: usize,
    ) -> LocMatchResult<()> {
        let (canvas_w, canvas_h) = canvas.dimensions();
        if rect.right() > canvas_w as usize || rect.bottom() > canvas_h as usize {
            return Err(LocMatchError::DimensionMismatch {
                template_width: rect.right(),
                template_height: rect.bottom(),
                scene_width: canvas_w as usize,
                scene_height: canvas_h as usize,
            });
        }
        for inset in 0..thickness {
            let Some(ring) = rect.shrink(inset) else {
                break;
            };
            let outline = imageproc::rect::Rect::at(ring.x as i32, ring.y as i32)
                .of_size(ring.width as u32, ring.height as u32);
            draw_hollow_rect_mut(canvas, outline, color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn rect_extents_are_half_open() {
        let rect = Rect::new(30, 40, 10, 10);
        assert_eq!((rect.right(), rect.bottom()), (40, 50));
        assert!(rect.contains(30, 40));
        assert!(rect.contains(39, 49));
        assert!(!rect.contains(40, 45));
        assert!(!rect.contains(35, 50));
    }

    #[test]
    fn border_has_requested_thickness() {
        let rect = Rect::new(0, 0, 6, 6);
        assert!(rect.on_border(1, 3, 2));
        assert!(rect.on_border(4, 3, 2));
        assert!(!rect.on_border(2, 3, 2));
        assert!(!rect.on_border(6, 3, 2));
    }

    #[test]
    fn clipped_keeps_origin_and_trims_extent() {
        let rect = Rect::new(3, 1, 10, 4);
        assert_eq!(rect.clipped(8, 8), Some(Rect::new(3, 1, 5, 4)));
        assert_eq!(rect.clipped(3, 8), None);
    }

    #[test]
    fn shrink_stops_when_empty() {
        let rect = Rect::new(2, 2, 4, 3);
        assert_eq!(rect.shrink(1), Some(Rect::new(3, 3, 2, 1)));
        assert_eq!(rect.shrink(2), None);
    }
}
