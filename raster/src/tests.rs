use alloc::vec;
use alloc::vec::Vec;

use crate::{
    Argb, Bgr24, Bgra32, Contour, Indexed, Interleaved, Interpolation, Layout, LayoutError,
    Palette, Planar3, Planar4, RasterLayout, RasterMut, Rgb24, Rgba32, SharedPalette,
};

const SAMPLES: [Argb; 5] = [
    Argb::new(0xff, 0x12, 0x34, 0x56),
    Argb::new(0x80, 0xff, 0x00, 0x7f),
    Argb::new(0x01, 0x02, 0x03, 0x04),
    Argb::new(0x00, 0xaa, 0xbb, 0xcc),
    Argb::new(0xfe, 0xff, 0xff, 0xff),
];

/// Owns the planes of one test image.
struct Image {
    desc: RasterLayout,
    planes: [Vec<u8>; 4],
}

impl Image {
    fn new(width: u32, height: u32, bits: u32) -> Result<Self, LayoutError> {
        let desc = RasterLayout::packed(width, height, bits)?;
        let len = desc.byte_len(bits).unwrap_or(0);
        Ok(Image {
            desc,
            planes: [vec![0; len], vec![0; len], vec![0; len], vec![0; len]],
        })
    }

    fn interleaved<P: crate::Pixel>(&mut self) -> RasterMut<'_, Interleaved<P>> {
        RasterMut::interleaved(self.desc, &mut self.planes[0]).unwrap()
    }

    fn planar3(&mut self) -> RasterMut<'_, Planar3> {
        let [r, g, b, _] = &mut self.planes;
        RasterMut::planar3(self.desc, r, g, b).unwrap()
    }

    fn planar4(&mut self) -> RasterMut<'_, Planar4> {
        let [a, r, g, b] = &mut self.planes;
        RasterMut::planar4(self.desc, a, r, g, b).unwrap()
    }

    fn indexed(&mut self, bits: u8, palette: SharedPalette) -> RasterMut<'_, Indexed> {
        RasterMut::indexed(self.desc, bits, palette, &mut self.planes[0]).unwrap()
    }
}

/// Write then read every sample, through a fresh cursor each time.
fn round_trip<L: Layout>(mut raster: RasterMut<'_, L>, expected: impl Fn(Argb) -> Argb) {
    for (x, &color) in SAMPLES.iter().enumerate() {
        raster.set_pixel(x as u32, 1, color).unwrap();
    }

    for (x, &color) in SAMPLES.iter().enumerate() {
        assert_eq!(raster.pixel(x as u32, 1), expected(color), "sample {}", x);
        assert_eq!(raster.as_ref().cursor(x as u32, 1).argb(), expected(color));
    }
}

#[test]
fn round_trip_all_layouts() -> Result<(), LayoutError> {
    let opaque = |color: Argb| color.with_alpha(0xff);

    round_trip(Image::new(5, 2, 32)?.interleaved::<Bgra32>(), |c| c);
    round_trip(Image::new(5, 2, 32)?.interleaved::<Rgba32>(), |c| c);
    round_trip(Image::new(5, 2, 32)?.interleaved::<Argb>(), |c| c);
    round_trip(Image::new(5, 2, 24)?.interleaved::<Bgr24>(), opaque);
    round_trip(Image::new(5, 2, 24)?.interleaved::<Rgb24>(), opaque);
    round_trip(Image::new(5, 2, 8)?.planar3(), opaque);
    round_trip(Image::new(5, 2, 8)?.planar4(), |c| c);

    let palette = SharedPalette::new(Palette::with_bits(4));
    round_trip(Image::new(5, 2, 4)?.indexed(4, palette.clone()), opaque);
    assert_eq!(palette.borrow().len(), SAMPLES.len());

    Ok(())
}

/// Overlay with alpha 0 or 255 against overwrite, in one layout.
fn overlay_identity<L: Layout>(mut raster: RasterMut<'_, L>) {
    let background = Argb::opaque(0x10, 0x20, 0x30);
    raster.fill(background).unwrap();

    for &color in &SAMPLES {
        let mut cursor = raster.cursor_mut(0, 0);
        cursor.overlay(color.with_alpha(0)).unwrap();
        assert_eq!(cursor.argb(), background);

        cursor.overlay(color.with_alpha(0xff)).unwrap();
        let overlaid = cursor.argb();
        cursor.overwrite(background).unwrap();
        cursor.overwrite(color.with_alpha(0xff)).unwrap();
        assert_eq!(cursor.argb(), overlaid);
        cursor.overwrite(background).unwrap();
    }
}

#[test]
fn overlay_identity_all_layouts() -> Result<(), LayoutError> {
    overlay_identity(Image::new(1, 1, 32)?.interleaved::<Bgra32>());
    overlay_identity(Image::new(1, 1, 24)?.interleaved::<Rgb24>());
    overlay_identity(Image::new(1, 1, 8)?.planar3());
    overlay_identity(Image::new(1, 1, 8)?.planar4());
    let palette = SharedPalette::new(Palette::with_bits(8));
    overlay_identity(Image::new(1, 1, 8)?.indexed(8, palette));
    Ok(())
}

#[test]
fn transparent_overlay_keeps_bytes() -> Result<(), LayoutError> {
    let mut planes = Image::new(3, 1, 32)?;
    planes.planes[0] = (0u8..12).collect();
    let before = planes.planes[0].clone();

    let mut raster = planes.interleaved::<Bgra32>();
    raster.cursor_mut(1, 0).overlay(Argb::new(0, 1, 2, 3)).unwrap();
    drop(raster);

    assert_eq!(planes.planes[0], before);
    Ok(())
}

#[test]
fn blend_agrees_across_layouts() -> Result<(), LayoutError> {
    let src = Argb::new(0x60, 0xf0, 0x30, 0x90);
    let dst = Argb::opaque(0x20, 0x40, 0x80);

    let mut interleaved = Image::new(1, 1, 24)?;
    let mut raster = interleaved.interleaved::<Rgb24>();
    raster.set_pixel(0, 0, dst).unwrap();
    raster.cursor_mut(0, 0).overlay(src).unwrap();
    let expected = raster.pixel(0, 0);

    let mut planar = Image::new(1, 1, 8)?;
    let mut raster = planar.planar3();
    raster.set_pixel(0, 0, dst).unwrap();
    raster.cursor_mut(0, 0).overlay(src).unwrap();
    assert_eq!(raster.pixel(0, 0), expected);

    // An opaque destination with alpha yields the same color.
    let mut alpha = Image::new(1, 1, 8)?;
    let mut raster = alpha.planar4();
    raster.set_pixel(0, 0, dst).unwrap();
    raster.cursor_mut(0, 0).overlay(src).unwrap();
    let with_alpha = raster.pixel(0, 0);
    assert_eq!(with_alpha.a, 0xff);
    assert_eq!(with_alpha, crate::blend::overlay(dst, src, true));

    Ok(())
}

#[test]
fn nearest_unit_step_copies() -> Result<(), LayoutError> {
    let mut source = Image::new(7, 3, 8)?;
    let mut src = source.planar4();
    for x in 0..7 {
        src.set_pixel(x, 2, SAMPLES[x as usize % SAMPLES.len()]).unwrap();
    }

    let mut target = Image::new(7, 1, 32)?;
    let mut dst = target.interleaved::<Bgra32>();
    let mut cursor = dst.cursor_mut(0, 0);
    src.as_ref()
        .scan_line_nearest_resize_to(0, 2, 7, 0.0, 1.0, &mut cursor)
        .unwrap();

    for x in 0..7 {
        assert_eq!(dst.pixel(x, 0), src.pixel(x, 2));
    }

    Ok(())
}

#[test]
fn resize_same_size_copies() -> Result<(), LayoutError> {
    let mut source = Image::new(4, 3, 24)?;
    let mut src = source.interleaved::<Rgb24>();
    for y in 0..3 {
        for x in 0..4 {
            src.set_pixel(x, y, Argb::opaque(x as u8 * 40, y as u8 * 40, 7))
                .unwrap();
        }
    }

    for interpolation in [Interpolation::Nearest, Interpolation::Bilinear] {
        let mut target = Image::new(4, 3, 8)?;
        let mut dst = target.planar3();
        src.resize_to(&mut dst, interpolation).unwrap();

        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(dst.pixel(x, y), src.pixel(x, y), "{:?}", interpolation);
            }
        }
    }

    Ok(())
}

#[test]
fn flood_fill_is_idempotent() -> Result<(), LayoutError> {
    let mut planes = Image::new(6, 5, 32)?;
    let mut raster = planes.interleaved::<Bgra32>();
    raster.fill(Argb::WHITE).unwrap();
    raster.scan_line_overwrite(1, 2, 4, Argb::BLACK).unwrap();
    raster.set_pixel(3, 1, Argb::BLACK).unwrap();

    let is_black = |_: i32, _: i32, color: Argb| color == Argb::BLACK;
    let first = raster.find_bound(3, 0, is_black).unwrap();
    let second = raster.find_bound(3, 0, is_black).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.area(), 30 - 5);

    Ok(())
}

#[test]
fn contour_overlay_clips_to_image() -> Result<(), LayoutError> {
    let mut contour = Contour::new();
    for y in -3..8 {
        contour.union(y, -10, 10);
    }

    let mut planes = Image::new(4, 3, 8)?;
    let mut raster = planes.planar4();
    raster.fill(Argb::TRANSPARENT).unwrap();
    raster
        .contour_overlay(&contour, Argb::opaque(1, 2, 3), 0, 0)
        .unwrap();
    drop(raster);

    // Exactly the planes of the image are painted, with nothing written past them.
    let [a, r, g, b] = &planes.planes;
    assert!(a.iter().all(|&v| v == 0xff));
    assert!(r.iter().all(|&v| v == 1));
    assert!(g.iter().all(|&v| v == 2));
    assert!(b.iter().all(|&v| v == 3));

    // Moved partially out of the image.
    let mut small = Contour::new();
    small.union(0, 0, 1);
    small.union(1, 0, 1);

    let mut planes = Image::new(4, 3, 32)?;
    let mut raster = planes.interleaved::<Rgba32>();
    raster.contour_overlay(&small, Argb::WHITE, 3, -1).unwrap();
    for y in 0..3 {
        for x in 0..4 {
            let painted = (x, y) == (3, 0);
            let expected = if painted { Argb::WHITE } else { Argb::TRANSPARENT };
            assert_eq!(raster.pixel(x, y), expected, "at ({}, {})", x, y);
        }
    }

    Ok(())
}

#[test]
fn contour_overlay_blends() -> Result<(), LayoutError> {
    let mut contour = Contour::new();
    contour.union(0, 0, 0);

    let mut planes = Image::new(2, 1, 24)?;
    let mut raster = planes.interleaved::<Bgr24>();
    raster.fill(Argb::WHITE).unwrap();
    raster
        .contour_overlay(&contour, Argb::new(128, 0xff, 0, 0), 0, 0)
        .unwrap();

    assert_eq!(raster.pixel(0, 0), Argb::opaque(0xff, 127, 127));
    assert_eq!(raster.pixel(1, 0), Argb::WHITE);

    Ok(())
}

#[test]
fn copy_between_indexed_images() -> Result<(), LayoutError> {
    let palette = SharedPalette::new(Palette::with_bits(2));
    let mut source = Image::new(5, 2, 2)?;
    let mut src = source.indexed(2, palette.clone());
    src.fill(Argb::BLACK).unwrap();
    src.scan_line_overwrite(1, 1, 3, Argb::WHITE).unwrap();

    // A second image sharing the palette sees the same colors.
    let mut target = Image::new(5, 2, 2)?;
    let mut dst = target.indexed(2, palette.clone());
    src.as_ref().copy_to(&mut dst).unwrap();
    assert_eq!(palette.borrow().len(), 2);
    assert_eq!(dst.pixel(2, 1), Argb::WHITE);
    assert_eq!(dst.pixel(0, 1), Argb::BLACK);

    let mut mirrored = Image::new(5, 2, 32)?;
    let mut mirror = mirrored.interleaved::<Bgra32>();
    dst.as_ref().mirror_to(&mut mirror).unwrap();
    assert_eq!(mirror.pixel(4, 1), Argb::BLACK);
    assert_eq!(mirror.pixel(3, 1), Argb::WHITE);
    assert_eq!(mirror.pixel(0, 1), Argb::BLACK);

    Ok(())
}
