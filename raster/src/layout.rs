//! Describes the memory of an image and how channels are found within it.
//!
//! The owner of the pixel memory provides a [`RasterLayout`] (dimensions and the byte stride of
//! rows) and between one and four byte planes. A [`Layout`] type then defines the physical
//! organization within those planes: where a pixel at a position is found, how its channels are
//! decoded and encoded, and how to move along a row. All four organizations share one generic
//! cursor and one set of raster operations; only this channel access differs between them.
use core::fmt;
use core::marker::PhantomData;
use core::mem::size_of;

use crate::bits::FromBits;
use crate::color::{Argb, Pixel};
use crate::palette::{PaletteError, SharedPalette};

/// Borrowed byte planes of an image. Unused slots are empty.
pub type Planes<'data> = [&'data [u8]; 4];

/// Mutably borrowed byte planes of an image. Unused slots are empty.
pub type PlanesMut<'data> = [&'data mut [u8]; 4];

/// The dimensions and row stride of pixel memory owned elsewhere.
///
/// All planes of one image share this descriptor. It is validated against the planes and the
/// bit depth of the layout when constructing a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RasterLayout {
    /// The number of pixels along the width.
    pub width: u32,
    /// The number of pixels along the height.
    pub height: u32,
    /// The number of bytes from one row to the next.
    pub stride: usize,
}

/// A position of a cursor within the planes.
///
/// For layouts with whole-byte pixels the bit offset is always zero. Indexed layouts use it for
/// the sub-byte offset of the pixel, with `0 <= bit < 8`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub bit: u8,
}

/// Channel access within one physical memory organization.
///
/// Implementations perform no bounds checks beyond those of slice indexing. A position outside
/// the planes panics on access.
pub trait Layout: Clone {
    /// Whether pixels carry their own alpha channel.
    ///
    /// Layouts without it report an alpha of `0xff` and composite with the opaque formula.
    const ALPHA: bool;

    /// The number of plane slots used, from the first.
    const PLANES: usize;

    fn bits_per_pixel(&self) -> u32;

    /// Move a position by `n` pixels along its row.
    fn step(&self, pos: &mut Position, n: isize);

    /// Decode the pixel at a position.
    fn load(&self, planes: &Planes<'_>, pos: Position) -> Argb;

    /// Encode a pixel at a position.
    ///
    /// Only fails for indexed layouts, when a new color does not fit into the palette.
    fn store(
        &self,
        planes: &mut PlanesMut<'_>,
        pos: Position,
        color: Argb,
    ) -> Result<(), PaletteError>;

    /// The position of the pixel at `(x, y)`.
    fn position(&self, x: usize, y: usize, stride: usize) -> Position {
        let mut pos = Position {
            offset: y * stride,
            bit: 0,
        };
        self.step(&mut pos, x as isize);
        pos
    }
}

/// Pixels of type `P` packed one after another in a single plane.
pub struct Interleaved<P> {
    pixel: PhantomData<P>,
}

/// Separate red, green and blue planes, one byte per channel. Always opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Planar3;

/// Separate alpha, red, green and blue planes, one byte per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Planar4;

/// Bit-packed palette indices in a single plane.
///
/// Colors are looked up in, and allocated from, the palette shared by all users of the image.
/// Pixels are always opaque; writes store the color with its alpha dropped.
#[derive(Clone, Debug)]
pub struct Indexed {
    bits: u8,
    palette: SharedPalette,
}

/// Error that occurs when a raster descriptor does not fit its memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutError {
    kind: LayoutErrorKind,
}

/// The reason for a [`LayoutError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutErrorKind {
    /// Dimensions or byte sizes overflow, or coordinates would not fit an `i32`.
    TooLarge,
    /// The stride is smaller than the bytes of one row.
    StrideTooSmall,
    /// A plane holds fewer bytes than the descriptor requires.
    PlaneTooSmall,
    /// Indexed pixels must have 1, 2, 4, or 8 bits.
    UnsupportedBitDepth,
    /// The palette holds more colors than indices can address.
    PaletteTooLarge,
}

impl RasterLayout {
    pub fn with_stride(width: u32, height: u32, stride: usize) -> Self {
        RasterLayout {
            width,
            height,
            stride,
        }
    }

    /// A descriptor without padding between rows.
    ///
    /// Rows still start on a byte boundary for depths below 8 bits.
    pub fn packed(width: u32, height: u32, bits_per_pixel: u32) -> Result<Self, LayoutError> {
        let stride = Self::bytes_for(width, bits_per_pixel).ok_or(LayoutError::TOO_LARGE)?;
        Ok(Self::with_stride(width, height, stride))
    }

    /// The bytes occupied by the pixels of one row.
    pub fn row_bytes(&self, bits_per_pixel: u32) -> Option<usize> {
        Self::bytes_for(self.width, bits_per_pixel)
    }

    /// The bytes each plane must at least hold.
    pub fn byte_len(&self, bits_per_pixel: u32) -> Option<usize> {
        if self.height == 0 {
            return Some(0);
        }

        let rows = usize::try_from(self.height - 1).ok()?;
        rows.checked_mul(self.stride)?
            .checked_add(self.row_bytes(bits_per_pixel)?)
    }

    fn bytes_for(width: u32, bits_per_pixel: u32) -> Option<usize> {
        let bits = u64::from(width).checked_mul(u64::from(bits_per_pixel))?;
        usize::try_from(bits.div_ceil(8)).ok()
    }

    /// Check the descriptor against planes of the given lengths.
    pub(crate) fn validate(
        &self,
        bits_per_pixel: u32,
        planes: &[usize],
    ) -> Result<(), LayoutError> {
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(LayoutError::TOO_LARGE);
        }

        let row = self
            .row_bytes(bits_per_pixel)
            .ok_or(LayoutError::TOO_LARGE)?;
        if self.height > 0 && self.stride < row {
            return Err(LayoutError::STRIDE_TOO_SMALL);
        }

        let len = self
            .byte_len(bits_per_pixel)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(LayoutError::TOO_LARGE)?;

        if planes.iter().any(|&plane| plane < len) {
            return Err(LayoutError::PLANE_TOO_SMALL);
        }

        Ok(())
    }
}

impl<P> Interleaved<P> {
    pub const fn new() -> Self {
        Interleaved { pixel: PhantomData }
    }
}

impl<P> Clone for Interleaved<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for Interleaved<P> {}

impl<P> Default for Interleaved<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Interleaved<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interleaved")
            .field("pixel", &core::any::type_name::<P>())
            .finish()
    }
}

impl<P: Pixel> Layout for Interleaved<P> {
    const ALPHA: bool = P::ALPHA;
    const PLANES: usize = 1;

    fn bits_per_pixel(&self) -> u32 {
        8 * size_of::<P>() as u32
    }

    #[inline]
    fn step(&self, pos: &mut Position, n: isize) {
        pos.offset = pos
            .offset
            .wrapping_add_signed(n.wrapping_mul(size_of::<P>() as isize));
    }

    #[inline]
    fn load(&self, planes: &Planes<'_>, pos: Position) -> Argb {
        let bytes = &planes[0][pos.offset..][..size_of::<P>()];
        bytemuck::pod_read_unaligned::<P>(bytes).to_argb()
    }

    #[inline]
    fn store(
        &self,
        planes: &mut PlanesMut<'_>,
        pos: Position,
        color: Argb,
    ) -> Result<(), PaletteError> {
        let pixel = P::from_argb(color);
        planes[0][pos.offset..][..size_of::<P>()].copy_from_slice(bytemuck::bytes_of(&pixel));
        Ok(())
    }
}

impl Layout for Planar3 {
    const ALPHA: bool = false;
    const PLANES: usize = 3;

    fn bits_per_pixel(&self) -> u32 {
        8
    }

    #[inline]
    fn step(&self, pos: &mut Position, n: isize) {
        pos.offset = pos.offset.wrapping_add_signed(n);
    }

    #[inline]
    fn load(&self, planes: &Planes<'_>, pos: Position) -> Argb {
        let idx = pos.offset;
        Argb::opaque(planes[0][idx], planes[1][idx], planes[2][idx])
    }

    #[inline]
    fn store(
        &self,
        planes: &mut PlanesMut<'_>,
        pos: Position,
        color: Argb,
    ) -> Result<(), PaletteError> {
        let idx = pos.offset;
        planes[0][idx] = color.r;
        planes[1][idx] = color.g;
        planes[2][idx] = color.b;
        Ok(())
    }
}

impl Layout for Planar4 {
    const ALPHA: bool = true;
    const PLANES: usize = 4;

    fn bits_per_pixel(&self) -> u32 {
        8
    }

    #[inline]
    fn step(&self, pos: &mut Position, n: isize) {
        pos.offset = pos.offset.wrapping_add_signed(n);
    }

    #[inline]
    fn load(&self, planes: &Planes<'_>, pos: Position) -> Argb {
        let idx = pos.offset;
        Argb::new(planes[0][idx], planes[1][idx], planes[2][idx], planes[3][idx])
    }

    #[inline]
    fn store(
        &self,
        planes: &mut PlanesMut<'_>,
        pos: Position,
        color: Argb,
    ) -> Result<(), PaletteError> {
        let idx = pos.offset;
        planes[0][idx] = color.a;
        planes[1][idx] = color.r;
        planes[2][idx] = color.g;
        planes[3][idx] = color.b;
        Ok(())
    }
}

impl Indexed {
    /// Indices of `bits` each, resolved with `palette`.
    pub fn new(bits: u8, palette: SharedPalette) -> Result<Self, LayoutError> {
        if !matches!(bits, 1 | 2 | 4 | 8) {
            return Err(LayoutError::UNSUPPORTED_BIT_DEPTH);
        }

        if palette.borrow().capacity() > 1 << bits {
            return Err(LayoutError::PALETTE_TOO_LARGE);
        }

        Ok(Indexed { bits, palette })
    }

    pub fn bits(&self) -> u8 {
        self.bits
    }

    pub fn palette(&self) -> &SharedPalette {
        &self.palette
    }

    fn field(&self, pos: Position) -> FromBits {
        FromBits::at(pos.bit, self.bits)
    }
}

impl Layout for Indexed {
    const ALPHA: bool = false;
    const PLANES: usize = 1;

    fn bits_per_pixel(&self) -> u32 {
        self.bits.into()
    }

    #[inline]
    fn step(&self, pos: &mut Position, n: isize) {
        let bits = isize::from(pos.bit) + n.wrapping_mul(isize::from(self.bits));
        pos.offset = pos.offset.wrapping_add_signed(bits.div_euclid(8));
        pos.bit = bits.rem_euclid(8) as u8;
    }

    #[inline]
    fn load(&self, planes: &Planes<'_>, pos: Position) -> Argb {
        let idx = self.field(pos).extract_as_lsb(planes[0][pos.offset]);
        self.palette.borrow().lookup(idx.into()).with_alpha(0xff)
    }

    #[inline]
    fn store(
        &self,
        planes: &mut PlanesMut<'_>,
        pos: Position,
        color: Argb,
    ) -> Result<(), PaletteError> {
        let idx = self
            .palette
            .borrow_mut()
            .try_get_or_add(color.with_alpha(0xff))?;
        // The palette capacity is bounded by `1 << bits`, so the index fits.
        self.field(pos)
            .insert_as_lsb(&mut planes[0][pos.offset], idx as u8);
        Ok(())
    }
}

impl LayoutError {
    const TOO_LARGE: Self = LayoutError {
        kind: LayoutErrorKind::TooLarge,
    };
    const STRIDE_TOO_SMALL: Self = LayoutError {
        kind: LayoutErrorKind::StrideTooSmall,
    };
    const PLANE_TOO_SMALL: Self = LayoutError {
        kind: LayoutErrorKind::PlaneTooSmall,
    };
    const UNSUPPORTED_BIT_DEPTH: Self = LayoutError {
        kind: LayoutErrorKind::UnsupportedBitDepth,
    };
    const PALETTE_TOO_LARGE: Self = LayoutError {
        kind: LayoutErrorKind::PaletteTooLarge,
    };

    pub fn kind(&self) -> LayoutErrorKind {
        self.kind
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            LayoutErrorKind::TooLarge => "raster dimensions are too large",
            LayoutErrorKind::StrideTooSmall => "row stride is smaller than a row of pixels",
            LayoutErrorKind::PlaneTooSmall => "plane is too small for the raster dimensions",
            LayoutErrorKind::UnsupportedBitDepth => "unsupported bit depth of indexed pixels",
            LayoutErrorKind::PaletteTooLarge => "palette exceeds the addressable indices",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Bgr24;
    use crate::palette::Palette;

    #[test]
    fn packed_stride() {
        let layout = RasterLayout::packed(9, 2, 1).unwrap();
        assert_eq!(layout.stride, 2);
        assert_eq!(layout.byte_len(1), Some(4));

        let layout = RasterLayout::packed(5, 3, 24).unwrap();
        assert_eq!(layout.stride, 15);
        assert_eq!(layout.byte_len(24), Some(45));
    }

    #[test]
    fn validation() {
        let layout = RasterLayout::with_stride(4, 2, 16);
        assert_eq!(layout.validate(32, &[32, 40]), Ok(()));
        assert_eq!(
            layout.validate(32, &[32, 31]).unwrap_err().kind(),
            LayoutErrorKind::PlaneTooSmall
        );

        let layout = RasterLayout::with_stride(4, 2, 15);
        assert_eq!(
            layout.validate(32, &[64]).unwrap_err().kind(),
            LayoutErrorKind::StrideTooSmall
        );

        let layout = RasterLayout::with_stride(u32::MAX, 1, usize::MAX);
        assert_eq!(
            layout.validate(8, &[]).unwrap_err().kind(),
            LayoutErrorKind::TooLarge
        );
    }

    #[test]
    fn indexed_steps_across_bytes() {
        let layout = Indexed::new(2, Palette::with_bits(2).into()).unwrap();
        let mut pos = layout.position(3, 1, 4);
        assert_eq!(pos, Position { offset: 4, bit: 6 });

        layout.step(&mut pos, 1);
        assert_eq!(pos, Position { offset: 5, bit: 0 });

        layout.step(&mut pos, -2);
        assert_eq!(pos, Position { offset: 4, bit: 4 });
    }

    #[test]
    fn indexed_bit_depths() {
        let palette = SharedPalette::new(Palette::with_bits(4));
        assert!(Indexed::new(3, palette.clone()).is_err());
        assert!(Indexed::new(8, palette.clone()).is_ok());
        assert_eq!(
            Indexed::new(2, palette).unwrap_err().kind(),
            LayoutErrorKind::PaletteTooLarge
        );
    }

    #[test]
    fn interleaved_position() {
        let layout = Interleaved::<Bgr24>::new();
        assert_eq!(layout.position(2, 3, 10).offset, 36);
        assert_eq!(layout.bits_per_pixel(), 24);
    }
}
