use image::{Rgba, RgbaImage};
use image_raster::{Argb, Interleaved, LayoutError, RasterLayout, RasterMut, Rgba32};

const SZ: u32 = 257;

/// Fills the inside of a set of rings and writes the result as a png.
///
/// This example exists, in part, so that we can run `perf`.
fn main() -> Result<(), LayoutError> {
    let mut image = RgbaImage::from_pixel(SZ, SZ, Rgba([0xff, 0xff, 0xff, 0xff]));

    let layout = RasterLayout::packed(SZ, SZ, 32)?;
    let mut raster = RasterMut::<Interleaved<Rgba32>>::interleaved(layout, &mut image)?;

    // Concentric square rings, each with a gap that alternates sides.
    let black = Argb::BLACK;
    for (ring, inset) in (0..SZ / 2).step_by(8).enumerate() {
        let (lo, hi) = (inset, SZ - 1 - inset);
        let gap = if ring % 2 == 0 { lo + 1 } else { hi - 1 };
        for i in lo..=hi {
            raster.set_pixel(i, lo, black).unwrap();
            raster.set_pixel(i, hi, black).unwrap();
            if i != gap {
                raster.set_pixel(lo, i, black).unwrap();
                raster.set_pixel(hi, i, black).unwrap();
            }
        }
    }

    let center = (SZ / 2) as i32;
    let region = raster
        .find_bound(center, center, |_, _, color| color == black)
        .expect("center is inside");

    let overlay = Argb::new(0xa0, 0x20, 0x60, 0xe0);
    raster.contour_overlay(&region, overlay, 0, 0).unwrap();
    drop(raster);

    if std::env::var_os("IMAGE_RASTER_SKIP_IO").is_none() {
        let output = format!(concat!(env!("CARGO_MANIFEST_DIR"), "/../flood-fill.png"),);
        image.save(output).unwrap();
    }

    Ok(())
}
