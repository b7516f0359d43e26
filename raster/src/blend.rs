//! Straight alpha compositing in exact integer arithmetic.
//!
//! All formats share these two formulas, selected by whether the destination stores alpha. The
//! results must be identical for every layout holding the same logical pixels, which is why they
//! live here and not with the layouts.
use crate::color::Argb;

/// Composite `src` onto `dst`.
///
/// A transparent source leaves `dst` untouched and an opaque source replaces it; only the
/// remaining cases perform blend arithmetic. With `dst_alpha` unset the destination is treated as
/// opaque and keeps its alpha value.
#[inline]
pub fn overlay(dst: Argb, src: Argb, dst_alpha: bool) -> Argb {
    match src.a {
        0 => dst,
        0xff => src,
        _ if dst_alpha => overlay_alpha(dst, src),
        _ => overlay_opaque(dst, src),
    }
}

/// Composite onto a destination with its own alpha channel.
fn overlay_alpha(dst: Argb, src: Argb) -> Argb {
    let a = u32::from(src.a);
    let ra = 0xff - a;
    let a1 = u32::from(dst.a);
    // Never zero, as `ra < 255` in this branch.
    let alpha = 65025 - ra * (0xff - a1);

    let mix = |c: u8, c1: u8| {
        let (c, c1) = (u32::from(c), u32::from(c1));
        ((c * a * 0xff + c1 * a1 * ra) / alpha) as u8
    };

    Argb {
        a: (alpha / 0xff) as u8,
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
    }
}

/// Composite onto a destination that is always opaque.
fn overlay_opaque(dst: Argb, src: Argb) -> Argb {
    let a = u32::from(src.a);
    let ra = 0xff - a;

    let mix = |c: u8, c1: u8| ((u32::from(c) * a + u32::from(c1) * ra) / 0xff) as u8;

    Argb {
        a: dst.a,
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
    }
}
