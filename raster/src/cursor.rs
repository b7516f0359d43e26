//! Movable read and write positions over pixel memory.
//!
//! A cursor is a position plus borrowed planes. It never owns memory and performs no bounds
//! checking of its own: moving anywhere is allowed, including one row or column past the image
//! which is useful to sample neighbours at the edges. Only reading or writing a pixel outside the
//! planes panics. Callers clamp coordinates themselves.
use crate::blend;
use crate::color::{Argb, Pixel};
use crate::layout::{Layout, Planes, PlanesMut, Position};
use crate::palette::PaletteError;

/// A read-only cursor.
///
/// Cheap to copy; copies move independently of each other.
pub struct Cursor<'data, L> {
    layout: &'data L,
    planes: Planes<'data>,
    stride: usize,
    pos: Position,
}

/// A cursor that can also write pixels.
///
/// Not copyable, as it holds the planes mutably. Use [`CursorMut::as_cursor`] for an independent
/// read position or [`CursorMut::reborrow`] to hand it out temporarily.
pub struct CursorMut<'data, L> {
    layout: &'data L,
    planes: PlanesMut<'data>,
    stride: usize,
    pos: Position,
}

macro_rules! cursor_moves {
    () => {
        /// The current position within the planes.
        pub fn position(&self) -> Position {
            self.pos
        }

        /// Move by `n` pixels along the row, backwards for negative `n`.
        #[inline]
        pub fn move_by(&mut self, n: isize) {
            self.layout.step(&mut self.pos, n);
        }

        #[inline]
        pub fn move_next(&mut self) {
            self.move_by(1);
        }

        #[inline]
        pub fn move_previous(&mut self) {
            self.move_by(-1);
        }

        #[inline]
        pub fn move_next_line(&mut self) {
            self.pos.offset = self.pos.offset.wrapping_add(self.stride);
        }

        #[inline]
        pub fn move_previous_line(&mut self) {
            self.pos.offset = self.pos.offset.wrapping_sub(self.stride);
        }
    };
}

impl<'data, L: Layout> Cursor<'data, L> {
    pub(crate) fn new(layout: &'data L, planes: Planes<'data>, stride: usize, pos: Position) -> Self {
        Cursor {
            layout,
            planes,
            stride,
            pos,
        }
    }

    /// Read all channels of the current pixel.
    #[inline]
    pub fn argb(&self) -> Argb {
        self.layout.load(&self.planes, self.pos)
    }

    pub fn a(&self) -> u8 {
        self.argb().a
    }

    pub fn r(&self) -> u8 {
        self.argb().r
    }

    pub fn g(&self) -> u8 {
        self.argb().g
    }

    pub fn b(&self) -> u8 {
        self.argb().b
    }

    /// Read the current pixel as a pixel of another format.
    pub fn pixel<P: Pixel>(&self) -> P {
        P::from_argb(self.argb())
    }

    cursor_moves!();

    /// Replace the pixel at `dst` with the current one, converting between layouts.
    #[inline]
    pub fn overwrite_to<M: Layout>(&self, dst: &mut CursorMut<'_, M>) -> Result<(), PaletteError> {
        dst.overwrite(self.argb())
    }

    /// Composite the current pixel onto the pixel at `dst`.
    #[inline]
    pub fn overlay_to<M: Layout>(&self, dst: &mut CursorMut<'_, M>) -> Result<(), PaletteError> {
        dst.overlay(self.argb())
    }
}

impl<'data, L: Layout> CursorMut<'data, L> {
    pub(crate) fn new(
        layout: &'data L,
        planes: PlanesMut<'data>,
        stride: usize,
        pos: Position,
    ) -> Self {
        CursorMut {
            layout,
            planes,
            stride,
            pos,
        }
    }

    /// A read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, L> {
        Cursor {
            layout: self.layout,
            planes: self.planes.each_ref().map(|plane| &**plane),
            stride: self.stride,
            pos: self.pos,
        }
    }

    /// Borrow as a cursor with a shorter lifetime, at the same position.
    ///
    /// Moves of the reborrowed cursor are not reflected in this one.
    pub fn reborrow(&mut self) -> CursorMut<'_, L> {
        CursorMut {
            layout: self.layout,
            planes: self.planes.each_mut().map(|plane| &mut **plane),
            stride: self.stride,
            pos: self.pos,
        }
    }

    #[inline]
    pub fn argb(&self) -> Argb {
        self.layout.load(&self.planes.each_ref().map(|plane| &**plane), self.pos)
    }

    pub fn a(&self) -> u8 {
        self.argb().a
    }

    pub fn r(&self) -> u8 {
        self.argb().r
    }

    pub fn g(&self) -> u8 {
        self.argb().g
    }

    pub fn b(&self) -> u8 {
        self.argb().b
    }

    cursor_moves!();

    /// Unconditionally replace all channels of the current pixel.
    ///
    /// For indexed layouts this resolves or allocates the palette entry of the color.
    #[inline]
    pub fn overwrite(&mut self, color: Argb) -> Result<(), PaletteError> {
        self.layout.store(&mut self.planes, self.pos, color)
    }

    /// Replace the current pixel with a pixel of any format.
    pub fn overwrite_pixel<P: Pixel>(&mut self, pixel: P) -> Result<(), PaletteError> {
        self.overwrite(pixel.to_argb())
    }

    /// Composite a color onto the current pixel.
    ///
    /// A fully transparent color leaves the pixel unchanged, an opaque one replaces it.
    #[inline]
    pub fn overlay(&mut self, color: Argb) -> Result<(), PaletteError> {
        match color.a {
            0 => Ok(()),
            0xff => self.overwrite(color),
            _ => {
                let dst = self.argb();
                self.overwrite(blend::overlay(dst, color, L::ALPHA))
            }
        }
    }

    pub fn overwrite_to<M: Layout>(&self, dst: &mut CursorMut<'_, M>) -> Result<(), PaletteError> {
        dst.overwrite(self.argb())
    }

    pub fn overlay_to<M: Layout>(&self, dst: &mut CursorMut<'_, M>) -> Result<(), PaletteError> {
        dst.overlay(self.argb())
    }
}

impl<L> Clone for Cursor<'_, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<L> Copy for Cursor<'_, L> {}
