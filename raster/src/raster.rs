//! Views of borrowed pixel memory and the operations on them.
//!
//! A [`Raster`] reads and a [`RasterMut`] reads and writes the planes of one image, with the
//! physical organization selected by the [`Layout`] parameter. Every operation is written once
//! against the cursor contract, so all layouts behave identically for the same logical pixels.
//!
//! Scanline operations take coordinates without checking them, in the same manner as cursors.
//! Whole-image operations and single pixel access check or clip their coordinates.
use crate::blend;
use crate::color::{Argb, Pixel};
use crate::contour::Contour;
use crate::cursor::{Cursor, CursorMut};
use crate::layout::{
    Indexed, Interleaved, Layout, LayoutError, Planar3, Planar4, Planes, PlanesMut, RasterLayout,
};
use crate::palette::{PaletteError, SharedPalette};

/// A read-only view of an image.
#[derive(Clone)]
pub struct Raster<'data, L> {
    layout: L,
    desc: RasterLayout,
    planes: Planes<'data>,
}

/// A writeable view of an image.
pub struct RasterMut<'data, L> {
    layout: L,
    desc: RasterLayout,
    planes: PlanesMut<'data>,
}

impl RasterLayout {
    fn assert_contains(&self, x: u32, y: u32) {
        assert!(
            x < self.width && y < self.height,
            "Coordinate ({}, {}) outside of {}x{} raster",
            x,
            y,
            self.width,
            self.height
        );
    }
}

/// Methods for all layouts.
impl<'data, L: Layout> Raster<'data, L> {
    /// View planes with a layout.
    ///
    /// Only the first `L::PLANES` planes are used and checked, all planes share the descriptor.
    pub fn new(layout: L, desc: RasterLayout, planes: Planes<'data>) -> Result<Self, LayoutError> {
        let lengths = planes.map(<[u8]>::len);
        desc.validate(layout.bits_per_pixel(), &lengths[..L::PLANES])?;
        Ok(Raster {
            layout,
            desc,
            planes,
        })
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn stride(&self) -> usize {
        self.desc.stride
    }

    pub fn descriptor(&self) -> RasterLayout {
        self.desc
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// A cursor at `(x, y)`.
    ///
    /// The coordinates are not checked, reading at a position outside the planes panics.
    pub fn cursor(&self, x: u32, y: u32) -> Cursor<'_, L> {
        let pos = self
            .layout
            .position(x as usize, y as usize, self.desc.stride);
        Cursor::new(&self.layout, self.planes, self.desc.stride, pos)
    }

    /// Read one pixel.
    ///
    /// # Panics
    ///
    /// When the coordinates are outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Argb {
        self.desc.assert_contains(x, y);
        self.cursor(x, y).argb()
    }

    /// Write `length` pixels starting at `(x, y)` into `dst`, converting between the layouts.
    ///
    /// The destination cursor is advanced past the written run.
    pub fn scan_line_overwrite_to<M: Layout>(
        &self,
        x: u32,
        y: u32,
        length: u32,
        dst: &mut CursorMut<'_, M>,
    ) -> Result<(), PaletteError> {
        let mut src = self.cursor(x, y);
        for _ in 0..length {
            src.overwrite_to(dst)?;
            src.move_next();
            dst.move_next();
        }
        Ok(())
    }

    /// Composite `length` pixels starting at `(x, y)` onto `dst`.
    ///
    /// The destination cursor is advanced past the written run.
    pub fn scan_line_overlay_to<M: Layout>(
        &self,
        x: u32,
        y: u32,
        length: u32,
        dst: &mut CursorMut<'_, M>,
    ) -> Result<(), PaletteError> {
        let mut src = self.cursor(x, y);
        for _ in 0..length {
            src.overlay_to(dst)?;
            src.move_next();
            dst.move_next();
        }
        Ok(())
    }

    /// Like [`Self::scan_line_overwrite_to`] but writes the destination back to front.
    ///
    /// The first source pixel is written at `dst`, each following one to the left of the
    /// previous. This mirrors the run horizontally.
    pub fn scan_line_reverse_overwrite_to<M: Layout>(
        &self,
        x: u32,
        y: u32,
        length: u32,
        dst: &mut CursorMut<'_, M>,
    ) -> Result<(), PaletteError> {
        let mut src = self.cursor(x, y);
        for _ in 0..length {
            src.overwrite_to(dst)?;
            src.move_next();
            dst.move_previous();
        }
        Ok(())
    }

    /// Like [`Self::scan_line_overlay_to`] but writes the destination back to front.
    pub fn scan_line_reverse_overlay_to<M: Layout>(
        &self,
        x: u32,
        y: u32,
        length: u32,
        dst: &mut CursorMut<'_, M>,
    ) -> Result<(), PaletteError> {
        let mut src = self.cursor(x, y);
        for _ in 0..length {
            src.overlay_to(dst)?;
            src.move_next();
            dst.move_previous();
        }
        Ok(())
    }

    /// Convert the pixels starting at `(x, y)` into a slice, one per element.
    pub fn scan_line_overwrite_to_slice<P: Pixel>(&self, x: u32, y: u32, dst: &mut [P]) {
        let mut src = self.cursor(x, y);
        for pixel in dst {
            *pixel = P::from_argb(src.argb());
            src.move_next();
        }
    }

    /// Composite the pixels starting at `(x, y)` onto a slice, one per element.
    pub fn scan_line_overlay_to_slice<P: Pixel>(&self, x: u32, y: u32, dst: &mut [P]) {
        let mut src = self.cursor(x, y);
        for pixel in dst {
            *pixel = P::from_argb(blend::overlay(pixel.to_argb(), src.argb(), P::ALPHA));
            src.move_next();
        }
    }

    /// Split the pixels starting at `(x, y)` into separate red, green and blue streams.
    ///
    /// # Panics
    ///
    /// When the streams differ in length.
    pub fn scan_line_overwrite_to_rgb(&self, x: u32, y: u32, r: &mut [u8], g: &mut [u8], b: &mut [u8]) {
        assert!(r.len() == g.len() && g.len() == b.len(), "Mismatched stream lengths");
        let mut src = self.cursor(x, y);
        for ((r, g), b) in r.iter_mut().zip(g).zip(b) {
            let color = src.argb();
            (*r, *g, *b) = (color.r, color.g, color.b);
            src.move_next();
        }
    }

    /// Composite the pixels starting at `(x, y)` onto opaque red, green and blue streams.
    ///
    /// # Panics
    ///
    /// When the streams differ in length.
    pub fn scan_line_overlay_to_rgb(&self, x: u32, y: u32, r: &mut [u8], g: &mut [u8], b: &mut [u8]) {
        assert!(r.len() == g.len() && g.len() == b.len(), "Mismatched stream lengths");
        let mut src = self.cursor(x, y);
        for ((r, g), b) in r.iter_mut().zip(g).zip(b) {
            let color = blend::overlay(Argb::opaque(*r, *g, *b), src.argb(), false);
            (*r, *g, *b) = (color.r, color.g, color.b);
            src.move_next();
        }
    }

    /// Split the pixels starting at `(x, y)` into separate alpha, red, green and blue streams.
    ///
    /// # Panics
    ///
    /// When the streams differ in length.
    pub fn scan_line_overwrite_to_argb(
        &self,
        x: u32,
        y: u32,
        a: &mut [u8],
        r: &mut [u8],
        g: &mut [u8],
        b: &mut [u8],
    ) {
        assert!(
            a.len() == r.len() && r.len() == g.len() && g.len() == b.len(),
            "Mismatched stream lengths"
        );
        let mut src = self.cursor(x, y);
        for (((a, r), g), b) in a.iter_mut().zip(r).zip(g).zip(b) {
            let color = src.argb();
            (*a, *r, *g, *b) = (color.a, color.r, color.g, color.b);
            src.move_next();
        }
    }

    /// Composite the pixels starting at `(x, y)` onto alpha, red, green and blue streams.
    ///
    /// # Panics
    ///
    /// When the streams differ in length.
    pub fn scan_line_overlay_to_argb(
        &self,
        x: u32,
        y: u32,
        a: &mut [u8],
        r: &mut [u8],
        g: &mut [u8],
        b: &mut [u8],
    ) {
        assert!(
            a.len() == r.len() && r.len() == g.len() && g.len() == b.len(),
            "Mismatched stream lengths"
        );
        let mut src = self.cursor(x, y);
        for (((a, r), g), b) in a.iter_mut().zip(r).zip(g).zip(b) {
            let color = blend::overlay(Argb::new(*a, *r, *g, *b), src.argb(), true);
            (*a, *r, *g, *b) = (color.a, color.r, color.g, color.b);
            src.move_next();
        }
    }

    /// Copy into another image, converting the pixel layout.
    ///
    /// Only the overlapping top-left area of both images is written.
    pub fn copy_to<M: Layout>(&self, dst: &mut RasterMut<'_, M>) -> Result<(), PaletteError> {
        let width = self.width().min(dst.width());
        let height = self.height().min(dst.height());

        for y in 0..height {
            let mut target = dst.cursor_mut(0, y);
            self.scan_line_overwrite_to(0, y, width, &mut target)?;
        }

        Ok(())
    }

    /// Copy into another image, mirrored horizontally.
    ///
    /// Only the overlapping top-left area of both images is written.
    pub fn mirror_to<M: Layout>(&self, dst: &mut RasterMut<'_, M>) -> Result<(), PaletteError> {
        let width = self.width().min(dst.width());
        let height = self.height().min(dst.height());

        if width == 0 {
            return Ok(());
        }

        for y in 0..height {
            let mut target = dst.cursor_mut(width - 1, y);
            self.scan_line_reverse_overwrite_to(0, y, width, &mut target)?;
        }

        Ok(())
    }
}

impl<'data, P: Pixel> Raster<'data, Interleaved<P>> {
    /// View a single plane of interleaved pixels.
    pub fn interleaved(desc: RasterLayout, data: &'data [u8]) -> Result<Self, LayoutError> {
        Raster::new(Interleaved::new(), desc, [data, &[], &[], &[]])
    }
}

impl<'data> Raster<'data, Planar3> {
    /// View separate red, green and blue planes.
    pub fn planar3(
        desc: RasterLayout,
        r: &'data [u8],
        g: &'data [u8],
        b: &'data [u8],
    ) -> Result<Self, LayoutError> {
        Raster::new(Planar3, desc, [r, g, b, &[]])
    }
}

impl<'data> Raster<'data, Planar4> {
    /// View separate alpha, red, green and blue planes.
    pub fn planar4(
        desc: RasterLayout,
        a: &'data [u8],
        r: &'data [u8],
        g: &'data [u8],
        b: &'data [u8],
    ) -> Result<Self, LayoutError> {
        Raster::new(Planar4, desc, [a, r, g, b])
    }
}

impl<'data> Raster<'data, Indexed> {
    /// View bit-packed indices of a palette.
    pub fn indexed(
        desc: RasterLayout,
        bits: u8,
        palette: SharedPalette,
        data: &'data [u8],
    ) -> Result<Self, LayoutError> {
        Raster::new(Indexed::new(bits, palette)?, desc, [data, &[], &[], &[]])
    }
}

/// Methods for all layouts.
impl<'data, L: Layout> RasterMut<'data, L> {
    /// View planes with a layout.
    ///
    /// Only the first `L::PLANES` planes are used and checked, all planes share the descriptor.
    pub fn new(
        layout: L,
        desc: RasterLayout,
        planes: PlanesMut<'data>,
    ) -> Result<Self, LayoutError> {
        let lengths = planes.each_ref().map(|plane| plane.len());
        desc.validate(layout.bits_per_pixel(), &lengths[..L::PLANES])?;
        Ok(RasterMut {
            layout,
            desc,
            planes,
        })
    }

    /// A read-only view of the same image.
    pub fn as_ref(&self) -> Raster<'_, L> {
        Raster {
            layout: self.layout.clone(),
            desc: self.desc,
            planes: self.planes.each_ref().map(|plane| &**plane),
        }
    }

    pub fn width(&self) -> u32 {
        self.desc.width
    }

    pub fn height(&self) -> u32 {
        self.desc.height
    }

    pub fn stride(&self) -> usize {
        self.desc.stride
    }

    pub fn descriptor(&self) -> RasterLayout {
        self.desc
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// A writing cursor at `(x, y)`.
    ///
    /// The coordinates are not checked, accessing a position outside the planes panics.
    pub fn cursor_mut(&mut self, x: u32, y: u32) -> CursorMut<'_, L> {
        let pos = self
            .layout
            .position(x as usize, y as usize, self.desc.stride);
        let planes = self.planes.each_mut().map(|plane| &mut **plane);
        CursorMut::new(&self.layout, planes, self.desc.stride, pos)
    }

    /// Read one pixel.
    ///
    /// # Panics
    ///
    /// When the coordinates are outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Argb {
        self.desc.assert_contains(x, y);
        self.as_ref().cursor(x, y).argb()
    }

    /// Replace one pixel.
    ///
    /// # Panics
    ///
    /// When the coordinates are outside the raster.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Argb) -> Result<(), PaletteError> {
        self.desc.assert_contains(x, y);
        self.cursor_mut(x, y).overwrite(color)
    }

    /// Replace `length` pixels starting at `(x, y)` with one color.
    pub fn scan_line_overwrite(
        &mut self,
        x: u32,
        y: u32,
        length: u32,
        color: Argb,
    ) -> Result<(), PaletteError> {
        let mut dst = self.cursor_mut(x, y);
        for _ in 0..length {
            dst.overwrite(color)?;
            dst.move_next();
        }
        Ok(())
    }

    /// Composite one color onto `length` pixels starting at `(x, y)`.
    ///
    /// A color with alpha `0` or `0xff` replaces the pixels instead.
    pub fn scan_line_overlay(
        &mut self,
        x: u32,
        y: u32,
        length: u32,
        color: Argb,
    ) -> Result<(), PaletteError> {
        if matches!(color.a, 0 | 0xff) {
            return self.scan_line_overwrite(x, y, length, color);
        }

        let mut dst = self.cursor_mut(x, y);
        for _ in 0..length {
            dst.overlay(color)?;
            dst.move_next();
        }
        Ok(())
    }

    /// Replace every pixel with one color.
    pub fn fill(&mut self, color: Argb) -> Result<(), PaletteError> {
        for y in 0..self.height() {
            self.scan_line_overwrite(0, y, self.width(), color)?;
        }
        Ok(())
    }

    /// Composite a rectangle of `src` onto this image with its top-left corner at `(x, y)`.
    ///
    /// Each source pixel is composited with its own alpha. The rectangle is clipped to both
    /// images.
    #[allow(clippy::too_many_arguments)]
    pub fn block_overlay<M: Layout>(
        &mut self,
        x: i32,
        y: i32,
        src: &Raster<'_, M>,
        src_x: u32,
        src_y: u32,
        width: u32,
        height: u32,
    ) -> Result<(), PaletteError> {
        let mut width = i64::from(width.min(src.width().saturating_sub(src_x)));
        let mut height = i64::from(height.min(src.height().saturating_sub(src_y)));
        let (mut x, mut y) = (i64::from(x), i64::from(y));
        let (mut src_x, mut src_y) = (i64::from(src_x), i64::from(src_y));

        if x < 0 {
            src_x -= x;
            width += x;
            x = 0;
        }

        if y < 0 {
            src_y -= y;
            height += y;
            y = 0;
        }

        width = width.min(i64::from(self.width()) - x);
        height = height.min(i64::from(self.height()) - y);

        if width <= 0 || height <= 0 {
            return Ok(());
        }

        // All values are now within the `u32` dimensions of one of the images.
        for row in 0..height {
            let mut source = src.cursor(src_x as u32, (src_y + row) as u32);
            let mut target = self.cursor_mut(x as u32, (y + row) as u32);
            for _ in 0..width {
                source.overlay_to(&mut target)?;
                source.move_next();
                target.move_next();
            }
        }

        Ok(())
    }

    /// Paint a region in one color, moved by an offset and clipped to the image.
    ///
    /// A color with alpha `0` or `0xff` replaces the pixels, any other is composited.
    pub fn contour_overlay(
        &mut self,
        contour: &Contour,
        color: Argb,
        offset_x: i32,
        offset_y: i32,
    ) -> Result<(), PaletteError> {
        if self.width() == 0 || self.height() == 0 {
            return Ok(());
        }

        let max_x = i64::from(self.width()) - 1;
        let max_y = i64::from(self.height()) - 1;

        for (key, row) in contour.rows() {
            let y = i64::from(key) + i64::from(offset_y);
            if y < 0 {
                continue;
            }

            // Rows ascend, none of the following can be inside.
            if y > max_y {
                log::trace!("Contour row {} is past the last row, done", key);
                break;
            }

            for (lo, hi) in row.runs() {
                let lo = (i64::from(lo) + i64::from(offset_x)).max(0);
                let hi = (i64::from(hi) + i64::from(offset_x)).min(max_x);

                // Runs ascend, none of the following can be inside.
                if lo > max_x {
                    break;
                }

                if hi < lo {
                    continue;
                }

                let length = (hi - lo + 1) as u32;
                self.scan_line_overlay(lo as u32, y as u32, length, color)?;
            }
        }

        Ok(())
    }
}

impl<'data, P: Pixel> RasterMut<'data, Interleaved<P>> {
    /// View a single plane of interleaved pixels.
    pub fn interleaved(desc: RasterLayout, data: &'data mut [u8]) -> Result<Self, LayoutError> {
        RasterMut::new(
            Interleaved::new(),
            desc,
            [data, Default::default(), Default::default(), Default::default()],
        )
    }
}

impl<'data> RasterMut<'data, Planar3> {
    /// View separate red, green and blue planes.
    pub fn planar3(
        desc: RasterLayout,
        r: &'data mut [u8],
        g: &'data mut [u8],
        b: &'data mut [u8],
    ) -> Result<Self, LayoutError> {
        RasterMut::new(Planar3, desc, [r, g, b, Default::default()])
    }
}

impl<'data> RasterMut<'data, Planar4> {
    /// View separate alpha, red, green and blue planes.
    pub fn planar4(
        desc: RasterLayout,
        a: &'data mut [u8],
        r: &'data mut [u8],
        g: &'data mut [u8],
        b: &'data mut [u8],
    ) -> Result<Self, LayoutError> {
        RasterMut::new(Planar4, desc, [a, r, g, b])
    }
}

impl<'data> RasterMut<'data, Indexed> {
    /// View bit-packed indices of a palette.
    pub fn indexed(
        desc: RasterLayout,
        bits: u8,
        palette: SharedPalette,
        data: &'data mut [u8],
    ) -> Result<Self, LayoutError> {
        RasterMut::new(
            Indexed::new(bits, palette)?,
            desc,
            [data, Default::default(), Default::default(), Default::default()],
        )
    }
}
