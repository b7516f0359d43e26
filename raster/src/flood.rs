//! Extraction of connected regions by scanline flood fill.
use alloc::vec;

use crate::color::Argb;
use crate::contour::Contour;
use crate::layout::Layout;
use crate::raster::{Raster, RasterMut};

impl<'data, L: Layout> Raster<'data, L> {
    /// Find the 4-connected region around a seed pixel.
    ///
    /// The region extends in all directions until `is_boundary` returns `true`, called with the
    /// coordinates and color of a pixel. Boundary pixels are not part of the region.
    ///
    /// Returns `None` for a seed outside the image and an empty contour when the seed itself is a
    /// boundary. The fill keeps its pending seeds on the heap, one per discovered span.
    pub fn find_bound<P>(&self, seed_x: i32, seed_y: i32, mut is_boundary: P) -> Option<Contour>
    where
        P: FnMut(i32, i32, Argb) -> bool,
    {
        // Dimensions are validated to fit an `i32`.
        let width = self.width() as i32;
        let height = self.height() as i32;

        if !(0..width).contains(&seed_x) || !(0..height).contains(&seed_y) {
            return None;
        }

        let mut blocked = |x: i32, y: i32| is_boundary(x, y, self.cursor(x as u32, y as u32).argb());

        let mut contour = Contour::new();
        let mut stack = vec![(seed_x, seed_y)];
        let mut spans = 0usize;

        while let Some((x, y)) = stack.pop() {
            // Seeds may be swallowed by spans found after they were pushed.
            if contour.contains(x, y) || blocked(x, y) {
                continue;
            }

            let mut rx = x;
            while rx + 1 < width && !blocked(rx + 1, y) {
                rx += 1;
            }

            let mut lx = x;
            while lx > 0 && !blocked(lx - 1, y) {
                lx -= 1;
            }

            contour.union(y, lx, rx);
            spans += 1;

            for row in [y + 1, y - 1] {
                if !(0..height).contains(&row) {
                    continue;
                }

                if contour.row(row).is_some_and(|known| known.covers(lx, rx)) {
                    continue;
                }

                // One seed per open run next to the span, at its last column.
                let mut open_until = None;
                for cx in lx..=rx {
                    if !blocked(cx, row) {
                        open_until = Some(cx);
                        if cx < rx {
                            continue;
                        }
                    }

                    if let Some(end) = open_until.take() {
                        if !contour.contains(end, row) {
                            stack.push((end, row));
                        }
                    }
                }
            }
        }

        log::debug!(
            "Region at ({}, {}) covers {} spans in {} rows",
            seed_x,
            seed_y,
            spans,
            contour.rows().count()
        );

        Some(contour)
    }
}

impl<'data, L: Layout> RasterMut<'data, L> {
    /// Find the region around a seed pixel, see [`Raster::find_bound`].
    pub fn find_bound<P>(&self, seed_x: i32, seed_y: i32, is_boundary: P) -> Option<Contour>
    where
        P: FnMut(i32, i32, Argb) -> bool,
    {
        self.as_ref().find_bound(seed_x, seed_y, is_boundary)
    }
}
