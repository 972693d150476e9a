use crate::attractor::engine::Attractor;
use crate::foundation::core::{BoundingBox, Point3, Rgba};
use crate::foundation::error::{AttractorError, AttractorResult};

/// A rendered image.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, straight alpha.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// RGBA of the pixel at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Output settings for [`rasterize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterOpts {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Opaque background color.
    pub background: [u8; 3],
    /// Empty border on every side, in pixels.
    pub margin_px: u32,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            background: [0, 0, 0],
            margin_px: 16,
        }
    }
}

/// Splat points into an opaque frame, alpha blending each point over what is there.
///
/// `bounds` x/y is fitted to the canvas (aspect preserved, y pointing up); `z` plays no part.
/// Points with a non-finite x or y and colors with non-finite components are skipped; color
/// channels are clamped to `[0, 1]`.
pub fn rasterize(
    points: &[Point3],
    colors: &[Rgba],
    bounds: &BoundingBox,
    opts: &RasterOpts,
) -> AttractorResult<FrameRGBA> {
    if opts.width == 0 || opts.height == 0 {
        return Err(AttractorError::config("raster size must be non-zero"));
    }
    if points.len() != colors.len() {
        return Err(AttractorError::validation(format!(
            "{} points but {} colors",
            points.len(),
            colors.len()
        )));
    }

    let (w, h) = (opts.width as usize, opts.height as usize);
    let bg = opts.background.map(|c| f32::from(c) / 255.0);
    let mut accum: Vec<[f32; 3]> = vec![bg; w * h];

    if let Some(project) = Projection::fit(bounds, opts) {
        for (p, c) in points.iter().zip(colors) {
            if !p.is_finite_xy() || ![c.r, c.g, c.b, c.a].iter().all(|v| v.is_finite()) {
                continue;
            }
            let Some((px, py)) = project.apply(*p, w, h) else {
                continue;
            };
            let a = c.a.clamp(0.0, 1.0);
            let src = [c.r, c.g, c.b].map(|v| v.clamp(0.0, 1.0));
            let dst = &mut accum[py * w + px];
            for k in 0..3 {
                dst[k] = src[k] * a + dst[k] * (1.0 - a);
            }
        }
    }

    let mut data = Vec::with_capacity(w * h * 4);
    for px in &accum {
        data.extend(px.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8));
        data.push(255);
    }
    Ok(FrameRGBA {
        width: opts.width,
        height: opts.height,
        data,
    })
}

struct Projection {
    min_x: f64,
    max_y: f64,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    fn fit(bounds: &BoundingBox, opts: &RasterOpts) -> Option<Self> {
        if bounds.is_axis_empty(0) || bounds.is_axis_empty(1) {
            return None;
        }
        let (ex, ey) = (bounds.extent(0), bounds.extent(1));
        if !ex.is_finite() || !ey.is_finite() {
            return None;
        }

        // Spans are measured between pixel centers so the max edge lands on the last pixel.
        let span = |size: u32| f64::from(size.saturating_sub(2 * opts.margin_px).saturating_sub(1));
        let (span_w, span_h) = (span(opts.width), span(opts.height));
        let scale = match (ex > 0.0, ey > 0.0) {
            (true, true) => (span_w / ex).min(span_h / ey),
            (true, false) => span_w / ex,
            (false, true) => span_h / ey,
            (false, false) => 0.0,
        };

        Some(Self {
            min_x: bounds.min[0],
            max_y: bounds.max[1],
            scale,
            offset_x: (f64::from(opts.width) - ex * scale) / 2.0,
            offset_y: (f64::from(opts.height) - ey * scale) / 2.0,
        })
    }

    fn apply(&self, p: Point3, w: usize, h: usize) -> Option<(usize, usize)> {
        let [x, y, _] = p.to_f64();
        let col = ((x - self.min_x) * self.scale + self.offset_x).floor();
        let row = ((self.max_y - y) * self.scale + self.offset_y).floor();
        if col < 0.0 || row < 0.0 || col >= w as f64 || row >= h as f64 {
            return None;
        }
        Some((col as usize, row as usize))
    }
}

impl Attractor {
    /// Rasterize the realized point cloud, calculating it first if the buffers are stale.
    pub fn rasterize(&mut self, opts: &RasterOpts) -> AttractorResult<FrameRGBA> {
        self.realize()?;
        rasterize(self.points(), self.colors(), &self.bounding_box(), opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
