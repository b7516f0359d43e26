//! Benchmarks scanline compositing and conversion between layouts.
use brunch::Bench;

use image_raster::{
    Argb, Bgra32, Interleaved, Layout, LayoutError, Palette, RasterLayout, RasterMut, Rgb24,
    SharedPalette,
};

#[derive(Clone, Copy, Debug)]
enum Target {
    Bgra32,
    Rgb24,
    Planar3,
    Indexed,
}

struct Overlay {
    target: Target,
    color: Argb,
    sz: u32,
}

struct Convert {
    target: Target,
    sz: u32,
}

/// Owns the planes the benchmarked rasters view.
struct Planes {
    layout: RasterLayout,
    planes: [Vec<u8>; 3],
}

impl Planes {
    fn new(sz: u32, bits: u32) -> Result<Self, LayoutError> {
        let layout = RasterLayout::packed(sz, sz, bits)?;
        let len = layout.byte_len(bits).unwrap_or(0);
        Ok(Planes {
            layout,
            planes: [vec![0; len], vec![0; len], vec![0; len]],
        })
    }

    fn bits(target: Target) -> u32 {
        match target {
            Target::Bgra32 => 32,
            Target::Rgb24 => 24,
            Target::Planar3 | Target::Indexed => 8,
        }
    }

    /// Run `op` on a raster of the target layout.
    fn with<R>(
        &mut self,
        target: Target,
        palette: &SharedPalette,
        op: impl FnOnce(&mut dyn Paint) -> R,
    ) -> Result<R, LayoutError> {
        let layout = self.layout;
        let [first, g, b] = &mut self.planes;
        Ok(match target {
            Target::Bgra32 => op(&mut RasterMut::<Interleaved<Bgra32>>::interleaved(layout, first)?),
            Target::Rgb24 => op(&mut RasterMut::<Interleaved<Rgb24>>::interleaved(layout, first)?),
            Target::Planar3 => op(&mut RasterMut::planar3(layout, first, g, b)?),
            Target::Indexed => op(&mut RasterMut::indexed(layout, 8, palette.clone(), first)?),
        })
    }
}

/// The operations under test, for any layout.
trait Paint {
    fn overlay_all(&mut self, color: Argb);
    fn copy_from(&mut self, source: &RasterMut<'_, Interleaved<Bgra32>>);
}

impl<L: Layout> Paint for RasterMut<'_, L> {
    fn overlay_all(&mut self, color: Argb) {
        for y in 0..self.height() {
            self.scan_line_overlay(0, y, self.width(), color).unwrap();
        }
    }

    fn copy_from(&mut self, source: &RasterMut<'_, Interleaved<Bgra32>>) {
        source.as_ref().copy_to(self).unwrap();
    }
}

impl Overlay {
    fn name(&self) -> String {
        format!("overlay({:?}, {:?}, {})", self.target, self.color, self.sz)
    }

    fn prepare(self) -> Result<impl FnMut(), LayoutError> {
        let Overlay { target, color, sz } = self;
        let mut planes = Planes::new(sz, Planes::bits(target))?;
        let palette = SharedPalette::new(Palette::with_bits(8));
        // Validate the layout once, and fill with a background.
        planes.with(target, &palette, |raster| raster.overlay_all(Argb::WHITE))?;

        Ok(move || {
            planes
                .with(target, &palette, |raster| raster.overlay_all(color))
                .unwrap()
        })
    }
}

impl Convert {
    fn name(&self) -> String {
        format!("convert(Bgra32, {:?}, {})", self.target, self.sz)
    }

    fn prepare(self) -> Result<impl FnMut(), LayoutError> {
        let Convert { target, sz } = self;

        let layout = RasterLayout::packed(sz, sz, 32)?;
        let mut source = vec![0; layout.byte_len(32).unwrap_or(0)];
        let mut raster = RasterMut::<Interleaved<Bgra32>>::interleaved(layout, &mut source)?;
        for y in 0..sz {
            let color = if y % 2 == 0 { Argb::BLACK } else { Argb::WHITE };
            raster.scan_line_overwrite(0, y, sz, color).unwrap();
        }

        let mut planes = Planes::new(sz, Planes::bits(target))?;
        let palette = SharedPalette::new(Palette::with_bits(8));

        Ok(move || {
            let source = RasterMut::<Interleaved<Bgra32>>::interleaved(layout, &mut source).unwrap();
            planes
                .with(target, &palette, |raster| raster.copy_from(&source))
                .unwrap()
        })
    }
}

fn main() {
    let half_red = Argb::new(0x80, 0xff, 0, 0);
    let opaque_red = Argb::opaque(0xff, 0, 0);

    let overlays = [
        Overlay {
            target: Target::Bgra32,
            color: half_red,
            sz: 512,
        },
        Overlay {
            target: Target::Bgra32,
            color: opaque_red,
            sz: 512,
        },
        Overlay {
            target: Target::Rgb24,
            color: half_red,
            sz: 512,
        },
        Overlay {
            target: Target::Planar3,
            color: half_red,
            sz: 512,
        },
        Overlay {
            target: Target::Indexed,
            color: opaque_red,
            sz: 512,
        },
    ];

    let conversions = [
        Target::Bgra32,
        Target::Rgb24,
        Target::Planar3,
        Target::Indexed,
    ]
    .map(|target| Convert { target, sz: 512 });

    let mut benches = brunch::Benches::default();
    benches.extend(overlays.map(|overlay| {
        Bench::new(format!("raster::scanline::{}", overlay.name()))
            .run(overlay.prepare().expect("Failed to setup benchmark"))
    }));
    benches.extend(conversions.map(|convert| {
        Bench::new(format!("raster::scanline::{}", convert.name()))
            .run(convert.prepare().expect("Failed to setup benchmark"))
    }));
    benches.finish();
}
