/// Specifies which bits of a byte hold one packed palette index.
///
/// Bits are counted from the most significant bit of the byte, so the first pixel of a row is in
/// the high bits of the first byte. This is the order of BMP and PNG indexed images.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FromBits {
    pub(crate) begin: u8,
    pub(crate) len: u8,
}

impl FromBits {
    /// The bits of the pixel starting at bit `begin` with `len` bits per pixel.
    pub(crate) const fn at(begin: u8, len: u8) -> Self {
        debug_assert!(begin + len <= 8);
        FromBits { begin, len }
    }

    const fn mask(self) -> u8 {
        // `len` of 0 yields an empty mask, 8 a full one.
        (0xffu16 >> (8 - self.len)) as u8
    }

    const fn shift(self) -> u8 {
        8 - self.begin - self.len
    }

    /// Extract the bits, moved to the low end.
    #[inline]
    pub(crate) fn extract_as_lsb(self, byte: u8) -> u8 {
        if self.len == 0 {
            return 0;
        }

        (byte >> self.shift()) & self.mask()
    }

    /// Replace the bits with the low bits of `val`, keeping all others.
    #[inline]
    pub(crate) fn insert_as_lsb(self, byte: &mut u8, val: u8) {
        if self.len == 0 {
            return;
        }

        let mask = self.mask() << self.shift();
        *byte = (*byte & !mask) | ((val << self.shift()) & mask);
    }
}
