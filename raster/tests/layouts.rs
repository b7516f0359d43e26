//! The same logical image gives the same results in every layout.
use image_raster::{
    Argb, Bgra32, Contour, Interleaved, Layout, LayoutError, Palette, RasterLayout, RasterMut,
    Rgb24, SharedPalette,
};

const MAZE: [&str; 6] = [
    "..#.....#.",
    "..#.###.#.",
    "....#.#...",
    "###.#.####",
    "..#...#...",
    "..#####.#.",
];

const WALL: Argb = Argb::opaque(0x20, 0x20, 0x80);
const FLOOR: Argb = Argb::opaque(0xf0, 0xe0, 0xd0);

fn draw<L: Layout>(raster: &mut RasterMut<'_, L>) {
    for (y, line) in MAZE.iter().enumerate() {
        for (x, tile) in line.bytes().enumerate() {
            let color = if tile == b'#' { WALL } else { FLOOR };
            raster.set_pixel(x as u32, y as u32, color).unwrap();
        }
    }
}

fn regions<L: Layout>(raster: &mut RasterMut<'_, L>) -> Vec<Contour> {
    draw(raster);
    [(0, 0), (5, 2), (9, 5), (0, 5), (2, 0)]
        .into_iter()
        .map(|(x, y)| {
            raster
                .find_bound(x, y, |_, _, color| color == WALL)
                .expect("seed is inside")
        })
        .collect()
}

fn desc(bits: u32) -> RasterLayout {
    RasterLayout::packed(10, 6, bits).unwrap()
}

#[test]
fn flood_fill_agrees() -> Result<(), LayoutError> {
    let mut bgra = vec![0; 10 * 6 * 4];
    let reference = regions(&mut RasterMut::<Interleaved<Bgra32>>::interleaved(
        desc(32),
        &mut bgra,
    )?);

    assert!(reference[4].is_empty());
    assert_eq!(reference[0], reference[1]);
    assert!(!reference[0].contains(0, 5));
    assert_eq!(reference[2].area(), 5);
    assert_eq!(reference[3].area(), 4);

    let mut rgb = vec![0; 10 * 6 * 3];
    let interleaved = regions(&mut RasterMut::<Interleaved<Rgb24>>::interleaved(
        desc(24),
        &mut rgb,
    )?);
    assert_eq!(interleaved, reference);

    let (mut r, mut g, mut b) = (vec![0; 60], vec![0; 60], vec![0; 60]);
    let planar3 = regions(&mut RasterMut::planar3(desc(8), &mut r, &mut g, &mut b)?);
    assert_eq!(planar3, reference);

    let mut a = vec![0; 60];
    let planar4 = regions(&mut RasterMut::planar4(
        desc(8),
        &mut a,
        &mut r,
        &mut g,
        &mut b,
    )?);
    assert_eq!(planar4, reference);

    for bits in [1, 2, 4, 8] {
        let palette = SharedPalette::new(Palette::with_bits(bits));
        let mut data = vec![0; desc(bits.into()).byte_len(bits.into()).unwrap()];
        let indexed = regions(&mut RasterMut::indexed(
            desc(bits.into()),
            bits,
            palette.clone(),
            &mut data,
        )?);
        assert_eq!(indexed, reference, "{} bits", bits);
        assert_eq!(palette.borrow().colors(), [FLOOR, WALL]);
    }

    Ok(())
}

#[test]
fn palette_exhaustion_is_reported() -> Result<(), LayoutError> {
    let palette = SharedPalette::new(Palette::with_bits(1));
    let mut data = vec![0; desc(1).byte_len(1).unwrap()];
    let mut raster = RasterMut::indexed(desc(1), 1, palette.clone(), &mut data)?;
    draw(&mut raster);

    let region = raster
        .find_bound(0, 0, |_, _, color| color == WALL)
        .expect("seed is inside");

    // Painting in a known color reuses the palette.
    raster.contour_overlay(&region, WALL, 0, 0).unwrap();
    assert!(palette.borrow().is_full());

    let err = raster
        .contour_overlay(&region, Argb::opaque(0xff, 0, 0), 0, 0)
        .unwrap_err();
    assert_eq!(err.capacity(), 2);
    assert_eq!(palette.borrow().len(), 2);

    // Alpha blends into a new color too, which does not fit either.
    let translucent = Argb::new(0x80, 0, 0, 0);
    assert!(raster.contour_overlay(&region, translucent, 0, 0).is_err());
    assert_eq!(raster.pixel(0, 0), WALL);

    Ok(())
}
