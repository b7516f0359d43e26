//! Bounded color tables for indexed layouts.
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Ref, RefCell, RefMut};
use core::fmt;

use crate::color::Argb;

/// An ordered table of unique colors.
///
/// The table maps indices `0..len` to colors and each contained color back to its index. It can
/// grow up to its capacity, fixed at construction from the bit depth of the indices. Colors are
/// never removed or reordered, so an index once handed out stays valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Argb>,
    index: BTreeMap<Argb, usize>,
    capacity: usize,
}

/// A palette shared by every cursor and view of one image.
///
/// Cloning the handle does not clone the table; mutation through any clone is visible to all of
/// them. There is no locking: a palette must only be written from one place at a time, which the
/// `RefCell` asserts at runtime.
#[derive(Clone, Debug)]
pub struct SharedPalette {
    inner: Rc<RefCell<Palette>>,
}

/// Error when a color can not be allocated in a full palette.
///
/// The capacity is fixed, there is no point in retrying the operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteError {
    capacity: usize,
}

impl Palette {
    /// An empty palette for indices of the given bit depth.
    ///
    /// # Panics
    ///
    /// When `bits` is not within `1..=8`.
    pub fn with_bits(bits: u8) -> Self {
        assert!((1..=8).contains(&bits), "Unsupported index depth: {}", bits);
        Palette {
            colors: Vec::new(),
            index: BTreeMap::new(),
            capacity: 1 << bits,
        }
    }

    /// A palette preloaded with colors.
    ///
    /// Duplicate colors are merged. Fails if more distinct colors are given than indices exist.
    pub fn from_colors(
        bits: u8,
        colors: impl IntoIterator<Item = Argb>,
    ) -> Result<Self, PaletteError> {
        let mut palette = Palette::with_bits(bits);
        for color in colors {
            palette.try_get_or_add(color)?;
        }
        Ok(palette)
    }

    /// The color at an index.
    ///
    /// # Panics
    ///
    /// An index outside `0..len` is a programming error.
    pub fn lookup(&self, index: usize) -> Argb {
        self.colors[index]
    }

    /// Find the index of an exactly equal color.
    pub fn index_of(&self, color: Argb) -> Option<usize> {
        self.index.get(&color).copied()
    }

    /// Get the index of a color, allocating the next free slot for a new color.
    ///
    /// The palette is left unchanged on failure.
    pub fn try_get_or_add(&mut self, color: Argb) -> Result<usize, PaletteError> {
        if let Some(idx) = self.index_of(color) {
            return Ok(idx);
        }

        if self.is_full() {
            log::warn!(
                "Palette of {} colors exhausted by {:?}",
                self.capacity,
                color
            );
            return Err(PaletteError {
                capacity: self.capacity,
            });
        }

        let idx = self.colors.len();
        self.colors.push(color);
        self.index.insert(color, idx);
        Ok(idx)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.colors.len() >= self.capacity
    }

    /// All colors, in index order.
    pub fn colors(&self) -> &[Argb] {
        &self.colors
    }
}

impl SharedPalette {
    pub fn new(palette: Palette) -> Self {
        SharedPalette {
            inner: Rc::new(RefCell::new(palette)),
        }
    }

    pub fn borrow(&self) -> Ref<'_, Palette> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Palette> {
        self.inner.borrow_mut()
    }

    /// Check if two handles refer to the same table.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Palette> for SharedPalette {
    fn from(palette: Palette) -> Self {
        SharedPalette::new(palette)
    }
}

impl PaletteError {
    /// The number of colors of the full palette.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "palette exhausted, all {} colors in use", self.capacity)
    }
}

impl core::error::Error for PaletteError {}
