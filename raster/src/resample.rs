//! Resampling of scanlines, used for scaling and rotating images.
//!
//! Source positions are tracked as a whole pixel cursor plus a fractional part in `[0, 1)`.
//! Advancing by a step adds to the fraction and moves the cursor by each whole pixel it rolls
//! over, so a full row is resampled without recomputing positions.
use crate::color::Argb;
use crate::cursor::{Cursor, CursorMut};
use crate::layout::Layout;
use crate::math;
use crate::palette::PaletteError;
use crate::raster::{Raster, RasterMut};

/// How to sample between source pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// The source pixel to the top-left of the position.
    #[default]
    Nearest,
    /// Weighted average of the four surrounding source pixels.
    Bilinear,
}

/// Weights of the two columns and two rows of a 2×2 neighbourhood.
#[derive(Clone, Copy, Debug)]
struct Weights {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Weights {
    /// Weights for a position `(fx, fy)` within the square, both in `[0, 1)`.
    fn at(fx: f64, fy: f64) -> Self {
        Weights {
            left: 1.0 - fx,
            right: fx,
            top: 1.0 - fy,
            bottom: fy,
        }
    }

    /// Weights of a rotated source position, from its distances to the surrounding grid lines.
    ///
    /// On an axis where the position is integral both weights are zero.
    fn around(fx: f64, fy: f64) -> Self {
        Weights {
            left: math::ceil(fx) - fx,
            right: fx - math::floor(fx),
            top: math::ceil(fy) - fy,
            bottom: fy - math::floor(fy),
        }
    }

    fn is_exact(&self) -> bool {
        [self.left, self.right, self.top, self.bottom] == [0.0; 4]
    }
}

/// Weighted sum of four pixels, each channel truncated on its own.
fn bilinear(p00: Argb, p01: Argb, p10: Argb, p11: Argb, w: Weights) -> Argb {
    let mix = |c00: u8, c01: u8, c10: u8, c11: u8| {
        let sum = f64::from(c00) * w.left * w.top
            + f64::from(c01) * w.right * w.top
            + f64::from(c10) * w.left * w.bottom
            + f64::from(c11) * w.right * w.bottom;
        sum as u8
    };

    Argb {
        a: mix(p00.a, p01.a, p10.a, p11.a),
        r: mix(p00.r, p01.r, p10.r, p11.r),
        g: mix(p00.g, p01.g, p10.g, p11.g),
        b: mix(p00.b, p01.b, p10.b, p11.b),
    }
}

/// The cursor one column to the right, or the same one in the last column.
fn right_of<L: Layout>(cursor: Cursor<'_, L>, column: u32, last: u32) -> Cursor<'_, L> {
    let mut next = cursor;
    if column < last {
        next.move_next();
    }
    next
}

impl<'data, L: Layout> Raster<'data, L> {
    /// Scale a run of the row `y` into `length` destination pixels, nearest neighbour.
    ///
    /// Sampling starts at column `x` with the fractional offset `frac_x`, each destination pixel
    /// advances the source position by `step`. Use `step < 1` to enlarge and `step > 1` to
    /// shrink. The source column does not move past the last one of the image.
    ///
    /// The destination cursor is advanced past the written run.
    pub fn scan_line_nearest_resize_to<M: Layout>(
        &self,
        x: u32,
        y: u32,
        length: u32,
        frac_x: f64,
        step: f64,
        dst: &mut CursorMut<'_, M>,
    ) -> Result<(), PaletteError> {
        let last = self.width().saturating_sub(1);
        let mut src = self.cursor(x, y);
        let (mut column, mut frac) = (x, frac_x);

        for _ in 0..length {
            src.overwrite_to(dst)?;
            dst.move_next();

            frac += step;
            while frac >= 1.0 {
                frac -= 1.0;
                if column < last {
                    column += 1;
                    src.move_next();
                }
            }
        }

        Ok(())
    }

    /// Scale a run of the row `y` into `length` destination pixels, bilinear.
    ///
    /// Like [`Self::scan_line_nearest_resize_to`] but every destination pixel blends the source
    /// pixels at the columns `x` and `x + 1` of the rows `y` and `y + 1`, weighted by `frac_x`
    /// and `frac_y`. In the last column or row the same pixel serves as both neighbours.
    #[allow(clippy::too_many_arguments)]
    pub fn scan_line_bilinear_resize_to<M: Layout>(
        &self,
        x: u32,
        y: u32,
        length: u32,
        frac_x: f64,
        frac_y: f64,
        step: f64,
        dst: &mut CursorMut<'_, M>,
    ) -> Result<(), PaletteError> {
        let last_x = self.width().saturating_sub(1);
        let last_y = self.height().saturating_sub(1);

        let mut top = self.cursor(x, y);
        let mut bottom = self.cursor(x, (y + 1).min(last_y));
        let (mut column, mut frac) = (x, frac_x);

        for _ in 0..length {
            let top_right = right_of(top, column, last_x);
            let bottom_right = right_of(bottom, column, last_x);

            let color = bilinear(
                top.argb(),
                top_right.argb(),
                bottom.argb(),
                bottom_right.argb(),
                Weights::at(frac, frac_y),
            );

            dst.overwrite(color)?;
            dst.move_next();

            frac += step;
            while frac >= 1.0 {
                frac -= 1.0;
                if column < last_x {
                    column += 1;
                    top.move_next();
                    bottom.move_next();
                }
            }
        }

        Ok(())
    }

    /// Sample `length` destination pixels along a rotated line through the source.
    ///
    /// The source position starts at `(frac_x, frac_y)` and each destination pixel advances it by
    /// `(cos, -sin)`. A position is sampled only if its whole 2×2 neighbourhood lies within the
    /// image. Otherwise the destination pixel is left unchanged. Each neighbour is weighted by the
    /// distance of the position to the grid lines on the far side of it, and a position on the
    /// grid reads its pixel directly.
    ///
    /// The destination cursor is advanced past the run.
    pub fn scan_line_rotate_to<M: Layout>(
        &self,
        frac_x: f64,
        frac_y: f64,
        cos: f64,
        sin: f64,
        length: u32,
        dst: &mut CursorMut<'_, M>,
    ) -> Result<(), PaletteError> {
        let max_x = f64::from(self.width()) - 1.0;
        let max_y = f64::from(self.height()) - 1.0;
        let (mut fx, mut fy) = (frac_x, frac_y);

        for _ in 0..length {
            let a1 = math::floor(fx);
            let b1 = math::floor(fy);

            if a1 >= 0.0 && b1 >= 0.0 && a1 < max_x && b1 < max_y {
                let weights = Weights::around(fx, fy);
                let top = self.cursor(a1 as u32, b1 as u32);

                let color = if weights.is_exact() {
                    top.argb()
                } else {
                    let mut bottom = top;
                    bottom.move_next_line();
                    let (mut top_right, mut bottom_right) = (top, bottom);
                    top_right.move_next();
                    bottom_right.move_next();

                    bilinear(
                        top.argb(),
                        top_right.argb(),
                        bottom.argb(),
                        bottom_right.argb(),
                        weights,
                    )
                };

                dst.overwrite(color)?;
            }

            dst.move_next();
            fx += cos;
            fy -= sin;
        }

        Ok(())
    }

    /// Scale the whole image into `dst`.
    ///
    /// The step in each direction is the ratio of source to destination size. Every destination
    /// row restarts at the first source column.
    pub fn resize_to<M: Layout>(
        &self,
        dst: &mut RasterMut<'_, M>,
        interpolation: Interpolation,
    ) -> Result<(), PaletteError> {
        if [self.width(), self.height(), dst.width(), dst.height()].contains(&0) {
            return Ok(());
        }

        let step_x = f64::from(self.width()) / f64::from(dst.width());
        let step_y = f64::from(self.height()) / f64::from(dst.height());
        let last_y = self.height() - 1;

        for row in 0..dst.height() {
            let pos_y = f64::from(row) * step_y;
            let whole = math::floor(pos_y);
            let y = (whole as u32).min(last_y);
            let frac_y = pos_y - whole;

            let width = dst.width();
            let mut target = dst.cursor_mut(0, row);
            match interpolation {
                Interpolation::Nearest => {
                    self.scan_line_nearest_resize_to(0, y, width, 0.0, step_x, &mut target)?
                }
                Interpolation::Bilinear => self.scan_line_bilinear_resize_to(
                    0,
                    y,
                    width,
                    0.0,
                    frac_y,
                    step_x,
                    &mut target,
                )?,
            }
        }

        Ok(())
    }

    /// Rotate the whole image by `radians` into `dst`, counter-clockwise.
    ///
    /// The center of the destination is mapped onto the center of the source. Destination pixels
    /// without a complete source neighbourhood are left unchanged, so the destination should be
    /// filled with a background first.
    pub fn rotate_to<M: Layout>(
        &self,
        dst: &mut RasterMut<'_, M>,
        radians: f64,
    ) -> Result<(), PaletteError> {
        let (sin, cos) = math::sin_cos(radians);

        let src_cx = (f64::from(self.width()) - 1.0) / 2.0;
        let src_cy = (f64::from(self.height()) - 1.0) / 2.0;
        let dst_cx = (f64::from(dst.width()) - 1.0) / 2.0;
        let dst_cy = (f64::from(dst.height()) - 1.0) / 2.0;

        for row in 0..dst.height() {
            let du = -dst_cx;
            let dv = f64::from(row) - dst_cy;
            let frac_x = src_cx + du * cos + dv * sin;
            let frac_y = src_cy - du * sin + dv * cos;

            let width = dst.width();
            let mut target = dst.cursor_mut(0, row);
            self.scan_line_rotate_to(frac_x, frac_y, cos, sin, width, &mut target)?;
        }

        Ok(())
    }
}

impl<'data, L: Layout> RasterMut<'data, L> {
    /// Scale the whole image into `dst`, see [`Raster::resize_to`].
    pub fn resize_to<M: Layout>(
        &self,
        dst: &mut RasterMut<'_, M>,
        interpolation: Interpolation,
    ) -> Result<(), PaletteError> {
        self.as_ref().resize_to(dst, interpolation)
    }

    /// Rotate the whole image into `dst`, see [`Raster::rotate_to`].
    pub fn rotate_to<M: Layout>(
        &self,
        dst: &mut RasterMut<'_, M>,
        radians: f64,
    ) -> Result<(), PaletteError> {
        self.as_ref().rotate_to(dst, radians)
    }
}
