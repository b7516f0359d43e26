//! Windowed filters over a neighbourhood of pixels.
use alloc::vec;
use alloc::vec::Vec;

use crate::color::Argb;
use crate::cursor::CursorMut;
use crate::layout::Layout;
use crate::palette::PaletteError;
use crate::raster::{Raster, RasterMut};

/// The pixel window a [`Filter`] computes one output pixel from.
///
/// Holds `kernel_width` columns of `kernel_height` pixels. Columns are kept in a ring: moving the
/// window one pixel to the right replaces only the oldest column. Column `0` is the leftmost.
#[derive(Clone, Debug)]
pub struct Patch {
    width: usize,
    height: usize,
    /// The slot of the leftmost column.
    head: usize,
    /// Column-major pixels, one column per slot.
    pixels: Vec<Argb>,
}

/// Computes an output pixel from the window around it.
///
/// The window is centered on the output pixel, at column `kernel_width / 2` and row
/// `kernel_height / 2` of the patch. At the image edges the outermost pixels are repeated.
pub trait Filter {
    fn kernel_width(&self) -> usize;

    fn kernel_height(&self) -> usize;

    fn apply(&self, patch: &Patch) -> Argb;
}

/// A filter by integer weights, applied to each channel separately.
///
/// The weighted sum is divided by the divisor, offset by the bias and clamped to a channel value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Convolution {
    width: usize,
    height: usize,
    weights: Vec<i32>,
    divisor: i32,
    bias: i32,
}

impl Patch {
    fn new(width: usize, height: usize) -> Self {
        Patch {
            width,
            height,
            head: 0,
            pixels: vec![Argb::TRANSPARENT; width * height],
        }
    }

    pub fn kernel_width(&self) -> usize {
        self.width
    }

    pub fn kernel_height(&self) -> usize {
        self.height
    }

    /// The pixel in a column and row of the window.
    ///
    /// # Panics
    ///
    /// When the coordinates are outside the window.
    pub fn get(&self, column: usize, row: usize) -> Argb {
        assert!(column < self.width && row < self.height);
        let slot = (self.head + column) % self.width;
        self.pixels[slot * self.height + row]
    }

    /// Drop the leftmost column and append a new rightmost one.
    fn push_column(&mut self, column: impl IntoIterator<Item = Argb>) {
        let start = self.head * self.height;
        let slot = &mut self.pixels[start..][..self.height];
        for (pixel, color) in slot.iter_mut().zip(column) {
            *pixel = color;
        }
        self.head = (self.head + 1) % self.width;
    }
}

impl Convolution {
    /// A filter of `width` by `height` weights, in row-major order.
    ///
    /// # Panics
    ///
    /// When the number of weights does not match, the kernel is empty, or the divisor is zero.
    pub fn new(width: usize, height: usize, weights: Vec<i32>, divisor: i32) -> Self {
        assert!(width > 0 && height > 0, "Empty kernel");
        assert_eq!(weights.len(), width * height, "Kernel size mismatch");
        assert!(divisor != 0, "Zero divisor");

        Convolution {
            width,
            height,
            weights,
            divisor,
            bias: 0,
        }
    }

    /// The average over a window of `width` by `height` pixels.
    pub fn box_blur(width: usize, height: usize) -> Self {
        let count = i32::try_from(width * height).unwrap_or(i32::MAX);
        Self::new(width, height, vec![1; width * height], count)
    }

    /// Emphasize the difference of a pixel to its direct neighbours.
    pub fn sharpen() -> Self {
        #[rustfmt::skip]
        let weights = vec![
             0, -1,  0,
            -1,  5, -1,
             0, -1,  0,
        ];
        Self::new(3, 3, weights, 1)
    }

    /// Add a constant to every channel after division.
    pub fn with_bias(self, bias: i32) -> Self {
        Convolution { bias, ..self }
    }
}

impl Filter for Convolution {
    fn kernel_width(&self) -> usize {
        self.width
    }

    fn kernel_height(&self) -> usize {
        self.height
    }

    fn apply(&self, patch: &Patch) -> Argb {
        let mut sum = [0i64; 4];

        for row in 0..self.height {
            for column in 0..self.width {
                let weight = i64::from(self.weights[row * self.width + column]);
                let Argb { a, r, g, b } = patch.get(column, row);
                for (acc, channel) in sum.iter_mut().zip([a, r, g, b]) {
                    *acc += weight * i64::from(channel);
                }
            }
        }

        let [a, r, g, b] = sum.map(|acc| {
            let value = acc / i64::from(self.divisor) + i64::from(self.bias);
            value.clamp(0, 0xff) as u8
        });

        Argb { a, r, g, b }
    }
}

impl<'data, L: Layout> Raster<'data, L> {
    /// Filter `length` pixels starting at `(x, y)` into `dst`.
    ///
    /// Window coordinates are clamped to the image, replicating the edge pixels. The destination
    /// cursor is advanced past the written run.
    pub fn scan_line_filter_to<F, M>(
        &self,
        x: u32,
        y: u32,
        length: u32,
        filter: &F,
        dst: &mut CursorMut<'_, M>,
    ) -> Result<(), PaletteError>
    where
        F: Filter + ?Sized,
        M: Layout,
    {
        if self.width() == 0 || self.height() == 0 {
            return Ok(());
        }

        let (kw, kh) = (filter.kernel_width(), filter.kernel_height());
        assert!(kw > 0 && kh > 0, "Empty kernel");

        let last_x = i64::from(self.width()) - 1;
        let last_y = i64::from(self.height()) - 1;
        let left = (kw / 2) as i64;
        let top = (kh / 2) as i64;

        let rows: Vec<u32> = (0..kh as i64)
            .map(|r| (i64::from(y) - top + r).clamp(0, last_y) as u32)
            .collect();
        let rows = &rows;
        let column = move |cx: i64| {
            let cx = cx.clamp(0, last_x) as u32;
            rows.iter().map(move |&row| self.cursor(cx, row).argb())
        };

        // Seed the window of the column before `x`, so that each pixel enqueues one column.
        let mut patch = Patch::new(kw, kh);
        let first = i64::from(x) - 1 - left;
        for i in 0..kw as i64 {
            patch.push_column(column(first + i));
        }

        for i in 0..i64::from(length) {
            patch.push_column(column(i64::from(x) + i - left + kw as i64 - 1));
            dst.overwrite(filter.apply(&patch))?;
            dst.move_next();
        }

        Ok(())
    }

    /// Filter the whole image into `dst`.
    ///
    /// Only the overlapping top-left area of both images is written.
    pub fn filter_to<F, M>(&self, dst: &mut RasterMut<'_, M>, filter: &F) -> Result<(), PaletteError>
    where
        F: Filter + ?Sized,
        M: Layout,
    {
        let width = self.width().min(dst.width());
        let height = self.height().min(dst.height());

        for y in 0..height {
            let mut target = dst.cursor_mut(0, y);
            self.scan_line_filter_to(0, y, width, filter, &mut target)?;
        }

        Ok(())
    }
}

impl<'data, L: Layout> RasterMut<'data, L> {
    /// Filter the whole image into `dst`, see [`Raster::filter_to`].
    pub fn filter_to<F, M>(&self, dst: &mut RasterMut<'_, M>, filter: &F) -> Result<(), PaletteError>
    where
        F: Filter + ?Sized,
        M: Layout,
    {
        self.as_ref().filter_to(dst, filter)
    }
}
