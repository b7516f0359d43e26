//! Benchmarks region extraction and painting of the found region.
use brunch::Bench;

use image_raster::{
    Argb, Bgra32, Interleaved, Layout, LayoutError, Palette, RasterLayout, RasterMut,
    SharedPalette,
};

#[derive(Clone, Copy, Debug)]
enum Pattern {
    /// No walls at all, one span per row.
    Open,
    /// Vertical walls with alternating gaps, a serpentine path.
    Serpentine,
    /// Every other pixel of every other row is a wall.
    Grid,
}

#[derive(Clone, Copy, Debug)]
enum Target {
    Bgra32,
    Indexed,
}

struct Fill {
    pattern: Pattern,
    target: Target,
    sz: u32,
}

const WALL: Argb = Argb::BLACK;

impl Pattern {
    fn is_wall(self, x: u32, y: u32, sz: u32) -> bool {
        match self {
            Pattern::Open => false,
            Pattern::Serpentine => {
                let gap = if (x / 2) % 2 == 0 { sz - 1 } else { 0 };
                x % 2 == 1 && y != gap
            }
            Pattern::Grid => x % 2 == 1 && y % 2 == 1,
        }
    }
}

fn draw<L: Layout>(raster: &mut RasterMut<'_, L>, pattern: Pattern) {
    let sz = raster.width();
    raster.fill(Argb::WHITE).unwrap();
    for y in 0..sz {
        for x in 0..sz {
            if pattern.is_wall(x, y, sz) {
                raster.set_pixel(x, y, WALL).unwrap();
            }
        }
    }
}

fn fill_and_paint<L: Layout>(raster: &mut RasterMut<'_, L>) {
    let region = raster
        .find_bound(0, 0, |_, _, color| color == WALL)
        .expect("seed is inside");
    raster.contour_overlay(&region, Argb::WHITE, 0, 0).unwrap();
}

impl Fill {
    fn name(&self) -> String {
        format!("fill({:?}, {:?}, {})", self.pattern, self.target, self.sz)
    }

    fn prepare(self) -> Result<Box<dyn FnMut()>, LayoutError> {
        let Fill {
            pattern,
            target,
            sz,
        } = self;

        Ok(match target {
            Target::Bgra32 => {
                let layout = RasterLayout::packed(sz, sz, 32)?;
                let mut data = vec![0; layout.byte_len(32).unwrap_or(0)];
                draw(
                    &mut RasterMut::<Interleaved<Bgra32>>::interleaved(layout, &mut data)?,
                    pattern,
                );

                Box::new(move || {
                    let mut raster =
                        RasterMut::<Interleaved<Bgra32>>::interleaved(layout, &mut data).unwrap();
                    fill_and_paint(&mut raster)
                })
            }
            Target::Indexed => {
                let layout = RasterLayout::packed(sz, sz, 1)?;
                let mut data = vec![0; layout.byte_len(1).unwrap_or(0)];
                let palette = SharedPalette::new(Palette::with_bits(1));
                draw(
                    &mut RasterMut::indexed(layout, 1, palette.clone(), &mut data)?,
                    pattern,
                );

                Box::new(move || {
                    let mut raster =
                        RasterMut::indexed(layout, 1, palette.clone(), &mut data).unwrap();
                    fill_and_paint(&mut raster)
                })
            }
        })
    }
}

fn main() {
    let fills = [
        (Pattern::Open, Target::Bgra32),
        (Pattern::Serpentine, Target::Bgra32),
        (Pattern::Grid, Target::Bgra32),
        (Pattern::Serpentine, Target::Indexed),
        (Pattern::Grid, Target::Indexed),
    ]
    .map(|(pattern, target)| Fill {
        pattern,
        target,
        sz: 256,
    });

    let mut benches = brunch::Benches::default();
    benches.extend(fills.map(|fill| {
        Bench::new(format!("raster::flood::{}", fill.name()))
            .run(fill.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}
