//! Pixel access, compositing and region extraction over borrowed raster memory.
//!
//! The pixel memory is owned elsewhere, e.g. by an image decoder or a window surface. This crate
//! views it through one of four physical layouts:
//!
//! - [`Interleaved`]: all channels of a pixel next to each other, in one of the [`Pixel`] formats.
//! - [`Planar3`]: separate red, green and blue planes.
//! - [`Planar4`]: separate alpha, red, green and blue planes.
//! - [`Indexed`]: bit-packed indices into a [`Palette`] shared by all views of the image.
//!
//! All operations are written once against a generic cursor, so they behave identically for the
//! same logical pixels in any layout. Compositing uses exact integer arithmetic for straight
//! (non-premultiplied) alpha.
//!
//! # Usage
//!
//! View a buffer, fill a region and read back a pixel:
//!
//! ```
//! use image_raster::{Argb, Bgra32, Interleaved, RasterLayout, RasterMut};
//!
//! let mut data = vec![0; 8 * 8 * 4];
//! let layout = RasterLayout::packed(8, 8, 32)?;
//! let mut raster = RasterMut::<Interleaved<Bgra32>>::interleaved(layout, &mut data)?;
//! raster.fill(Argb::WHITE)?;
//!
//! // Everything that is not black, around the center.
//! let region = raster
//!     .find_bound(4, 4, |_, _, color| color == Argb::BLACK)
//!     .expect("seed within the image");
//! raster.contour_overlay(&region, Argb::opaque(0xff, 0, 0), 0, 0)?;
//!
//! assert_eq!(raster.pixel(0, 0), Argb::new(0xff, 0xff, 0, 0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Indexed images allocate colors on demand, until the palette is full:
//!
//! ```
//! use image_raster::{Argb, Palette, RasterLayout, RasterMut, SharedPalette};
//!
//! let palette = SharedPalette::new(Palette::with_bits(1));
//! let mut data = vec![0; 2];
//! let layout = RasterLayout::packed(16, 1, 1)?;
//! let mut raster = RasterMut::indexed(layout, 1, palette.clone(), &mut data)?;
//!
//! raster.scan_line_overwrite(0, 0, 8, Argb::BLACK)?;
//! raster.scan_line_overwrite(8, 0, 8, Argb::WHITE)?;
//! assert!(raster.set_pixel(0, 0, Argb::opaque(0xff, 0, 0)).is_err());
//! assert_eq!(palette.borrow().len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![cfg_attr(not(doctest), no_std)]
#![deny(unsafe_code)]
extern crate alloc;

mod bits;
/// Straight alpha compositing.
pub mod blend;
mod color;
mod contour;
mod cursor;
mod filter;
mod flood;
mod layout;
mod math;
mod palette;
mod raster;
mod resample;

#[cfg(test)]
mod tests;

pub use self::color::{Argb, Bgr24, Bgra32, Pixel, Rgb24, Rgba32};
pub use self::contour::{Contour, ContourRow};
pub use self::cursor::{Cursor, CursorMut};
pub use self::filter::{Convolution, Filter, Patch};
pub use self::layout::{
    Indexed, Interleaved, Layout, LayoutError, LayoutErrorKind, Planar3, Planar4, Planes,
    PlanesMut, Position, RasterLayout,
};
pub use self::palette::{Palette, PaletteError, SharedPalette};
pub use self::raster::{Raster, RasterMut};
pub use self::resample::Interpolation;
