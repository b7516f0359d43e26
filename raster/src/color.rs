//! Pixel values and the interleaved formats that store them.
use bytemuck::{Pod, Zeroable};

/// A straight (non-premultiplied) color with 8-bit channels.
///
/// This is the common currency of all layouts. Each layout decodes its own memory into an `Argb`
/// and encodes it back. Layouts without an alpha channel report `a == 0xff`.
///
/// As a `Pixel`, the memory order is `a, r, g, b`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Pod, Zeroable)]
#[repr(C)]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A pixel type that can be stored interleaved in a single byte plane.
///
/// Implementors must be plain byte arrays (alignment `1`) so that a pixel can be read at any byte
/// offset of a row, regardless of the stride chosen by the owner of the buffer.
pub trait Pixel: Pod {
    /// Whether the format carries its own alpha channel.
    ///
    /// This selects the compositing formula used when overlaying onto the format.
    const ALPHA: bool;

    /// Decode into channels.
    fn to_argb(self) -> Argb;

    /// Encode from channels, dropping alpha if the format has none.
    fn from_argb(color: Argb) -> Self;
}

impl Argb {
    pub const TRANSPARENT: Self = Argb::new(0, 0, 0, 0);
    pub const BLACK: Self = Argb::opaque(0, 0, 0);
    pub const WHITE: Self = Argb::opaque(0xff, 0xff, 0xff);

    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Argb { a, r, g, b }
    }

    /// A color with full alpha.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Argb { a: 0xff, r, g, b }
    }

    /// The same color with a replaced alpha channel.
    pub const fn with_alpha(self, a: u8) -> Self {
        Argb { a, ..self }
    }

    pub const fn is_opaque(self) -> bool {
        self.a == 0xff
    }

    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl Pixel for Argb {
    const ALPHA: bool = true;

    fn to_argb(self) -> Argb {
        self
    }

    fn from_argb(color: Argb) -> Self {
        color
    }
}

macro_rules! pixel_formats {
    ($(
        $(#[$attr:meta])*
        $name:ident([u8; $n:literal]) { r: $r:literal, g: $g:literal, b: $b:literal $(, a: $a:literal)? };
    )*) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
            #[repr(transparent)]
            pub struct $name(pub [u8; $n]);

            impl Pixel for $name {
                const ALPHA: bool = pixel_formats!(@has_alpha $($a)?);

                fn to_argb(self) -> Argb {
                    let bytes = self.0;
                    Argb {
                        a: pixel_formats!(@alpha bytes $($a)?),
                        r: bytes[$r],
                        g: bytes[$g],
                        b: bytes[$b],
                    }
                }

                fn from_argb(color: Argb) -> Self {
                    let mut bytes = [0; $n];
                    bytes[$r] = color.r;
                    bytes[$g] = color.g;
                    bytes[$b] = color.b;
                    $(bytes[$a] = color.a;)?
                    $name(bytes)
                }
            }
        )*
    };
    (@has_alpha) => { false };
    (@has_alpha $a:literal) => { true };
    (@alpha $bytes:ident) => { 0xff };
    (@alpha $bytes:ident $a:literal) => { $bytes[$a] };
}

pixel_formats! {
    /// Blue, green, red, alpha in memory order. The common 32-bit desktop format.
    Bgra32([u8; 4]) { r: 2, g: 1, b: 0, a: 3 };
    /// Blue, green, red in memory order, no alpha.
    Bgr24([u8; 3]) { r: 2, g: 1, b: 0 };
    /// Red, green, blue, alpha in memory order.
    Rgba32([u8; 4]) { r: 0, g: 1, b: 2, a: 3 };
    /// Red, green, blue in memory order, no alpha.
    Rgb24([u8; 3]) { r: 0, g: 1, b: 2 };
}
