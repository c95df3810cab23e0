//! Software RGBA8 rasterizer.
//!
//! Good enough for headless rendering, snapshots and tests. Text is not
//! rasterized; labels are kept as [`TextAnchor`]s next to the pixel buffer.

use super::{DrawContext, Surface};
use crate::rect::Rect;
use crate::style::{StrokeStyle, TextAlign, TextStyle};
use glam::{DVec2, Vec2};
use tickscope_core::Color;

/// A text label recorded during the last frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnchor {
    pub text: String,
    pub position: Vec2,
    pub color: Color,
    pub align: TextAlign,
}

/// Pixel-buffer surface with a clip stack and alpha blending.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    clip_stack: Vec<Rect>,
    texts: Vec<TextAnchor>,
}

impl RasterSurface {
    /// Create a transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            clip_stack: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Resize, discarding the contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 rows, top to bottom.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color of one pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    /// Labels drawn since the last clear.
    pub fn texts(&self) -> &[TextAnchor] {
        &self.texts
    }

    /// Write the buffer to a PNG file.
    #[cfg(feature = "png")]
    pub fn save_png(&self, path: impl AsRef<std::path::Path>) -> image::ImageResult<()> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
    }

    fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn current_clip(&self) -> Rect {
        self.clip_stack.last().copied().unwrap_or_else(|| self.bounds())
    }

    /// Integer pixel span `[x0, x1) x [y0, y1)` covered by `rect` inside the clip.
    fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let r = rect.intersect(&self.current_clip())?;
        let x0 = r.x.floor().max(0.0) as u32;
        let y0 = r.y.floor().max(0.0) as u32;
        let x1 = (r.right().ceil().max(0.0) as u32).min(self.width);
        let y1 = (r.bottom().ceil().max(0.0) as u32).min(self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let src = color.to_rgba_u8();
        let a = src[3] as u32;
        if a == 255 {
            self.pixels[i..i + 4].copy_from_slice(&src);
            return;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let dst = self.pixels[i + c] as u32;
            self.pixels[i + c] = ((src[c] as u32 * a + dst * inv + 127) / 255) as u8;
        }
        let dst_a = self.pixels[i + 3] as u32;
        self.pixels[i + 3] = (a + (dst_a * inv + 127) / 255).min(255) as u8;
    }

    /// Stamp a square brush of `width` centered on `p`.
    fn stamp(&mut self, p: Vec2, width: f32, color: Color) {
        let half = (width * 0.5).max(0.5);
        let brush = Rect::new(p.x - half, p.y - half, half * 2.0, half * 2.0);
        if let Some((x0, y0, x1, y1)) = self.pixel_span(brush) {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.blend(x, y, color);
                }
            }
        }
    }
}

impl DrawContext for RasterSurface {
    fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba_u8();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        self.texts.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if color.is_transparent() {
            return;
        }
        if let Some((x0, y0, x1, y1)) = self.pixel_span(rect) {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.blend(x, y, color);
                }
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[Vec2], style: &StrokeStyle) {
        if points.len() < 2 || style.color.is_transparent() {
            return;
        }

        let half = (style.width * 0.5).max(0.5);
        let clip = self.current_clip();
        let bounds = Rect::new(
            clip.x - half,
            clip.y - half,
            clip.width + 2.0 * half,
            clip.height + 2.0 * half,
        );
        let cycle = style.dash.cycle_length() as f64;

        let mut travelled = 0.0f64;
        for segment in points.windows(2) {
            let (a, b) = (segment[0].as_dvec2(), segment[1].as_dvec2());
            let length = a.distance(b);
            if !length.is_finite() {
                continue;
            }

            if let Some((t0, t1)) = clip_segment(a, b, bounds) {
                let (start, end) = (a.lerp(b, t0), a.lerp(b, t1));
                let visible = (t1 - t0) * length;
                let skipped = travelled + t0 * length;
                let steps = (visible * 2.0).ceil().max(1.0) as u32;
                for step in 0..=steps {
                    let t = step as f64 / steps as f64;
                    let distance = skipped + t * visible;
                    if style.dash.is_on_at(dash_offset(distance, cycle)) {
                        self.stamp(start.lerp(end, t).as_vec2(), style.width, style.color);
                    }
                }
            }
            travelled += length;
        }
    }

    fn fill_text(&mut self, text: &str, position: Vec2, style: &TextStyle) {
        if !self.current_clip().contains(position) {
            return;
        }
        self.texts.push(TextAnchor {
            text: text.to_string(),
            position,
            color: style.color,
            align: style.align,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        let clip = rect
            .intersect(&self.current_clip())
            .unwrap_or(Rect::new(rect.x, rect.y, 0.0, 0.0));
        self.clip_stack.push(clip);
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }
}

/// Parameter range `[t0, t1]` of the segment `a -> b` inside `rect` (Liang-Barsky).
fn clip_segment(a: DVec2, b: DVec2, rect: Rect) -> Option<(f64, f64)> {
    let d = b - a;
    let edges = [
        (-d.x, a.x - rect.x as f64),
        (d.x, rect.right() as f64 - a.x),
        (-d.y, a.y - rect.y as f64),
        (d.y, rect.bottom() as f64 - a.y),
    ];

    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}

/// Position within one dash cycle, computed in `f64` so long strokes keep their phase.
fn dash_offset(distance: f64, cycle: f64) -> f32 {
    if cycle > 0.0 {
        distance.rem_euclid(cycle) as f32
    } else {
        0.0
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::DashPattern;

    #[test]
    fn test_clear_and_fill() {
        let mut surface = RasterSurface::new(8, 8);
        surface.clear(Color::WHITE);
        surface.fill_rect(Rect::new(2.0, 2.0, 2.0, 2.0), Color::RED);
        assert_eq!(surface.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(3, 3), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(4, 4), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn test_resize_discards_contents() {
        let mut surface = RasterSurface::new(4, 4);
        surface.clear(Color::RED);
        surface.resize(2, 3);
        assert_eq!(surface.size(), (2, 3));
        assert_eq!(surface.pixel(1, 2), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(2, 0), None);
    }

    #[test]
    fn test_clip_limits_fill() {
        let mut surface = RasterSurface::new(8, 8);
        surface.clear(Color::BLACK);
        surface.push_clip(Rect::new(0.0, 0.0, 4.0, 8.0));
        surface.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), Color::WHITE);
        surface.pop_clip();
        assert_eq!(surface.pixel(3, 0), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(5, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_alpha_blend() {
        let mut surface = RasterSurface::new(1, 1);
        surface.clear(Color::BLACK);
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE.with_alpha(0.5));
        let [r, _, _, a] = surface.pixel(0, 0).unwrap();
        assert!((127..=129).contains(&r));
        assert_eq!(a, 255);
    }

    #[test]
    fn test_dashed_stroke_leaves_gaps() {
        let mut surface = RasterSurface::new(40, 3);
        surface.clear(Color::BLACK);
        let style = StrokeStyle::solid(Color::WHITE, 1.0).with_dash(DashPattern::dashed(5.0, 3.0));
        surface.stroke_polyline(&[Vec2::new(0.5, 1.5), Vec2::new(39.5, 1.5)], &style);
        assert_eq!(surface.pixel(2, 1), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(6, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_offscreen_segment_is_clipped_before_stepping() {
        let mut surface = RasterSurface::new(100, 100);
        surface.clear(Color::BLACK);
        let start = std::time::Instant::now();
        surface.stroke_polyline(
            &[Vec2::new(-1.0e9, 50.5), Vec2::new(50.5, 50.5)],
            &StrokeStyle::solid(Color::WHITE, 1.0),
        );
        assert!(start.elapsed() < std::time::Duration::from_secs(1));
        assert_eq!(surface.pixel(0, 50), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(40, 50), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(60, 50), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_clipped_dash_keeps_phase() {
        let mut surface = RasterSurface::new(40, 3);
        surface.clear(Color::BLACK);
        let style = StrokeStyle::solid(Color::WHITE, 1.0).with_dash(DashPattern::dashed(5.0, 3.0));
        // 800 px off-screen, a whole number of dash cycles
        surface.stroke_polyline(&[Vec2::new(-799.5, 1.5), Vec2::new(39.5, 1.5)], &style);

        assert_eq!(surface.pixels().len(), (surface.width() * surface.height() * 4) as usize);
        assert_eq!(surface.pixel(2, 1), Some([255, 255, 255, 255]));
        assert_eq!(surface.pixel(6, 1), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(7, 1), Some([0, 0, 0, 255]));
        assert_eq!(surface.pixel(10, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_text_recorded_inside_clip_only() {
        let mut surface = RasterSurface::new(20, 20);
        surface.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        surface.fill_text("in", Vec2::new(5.0, 5.0), &TextStyle::default());
        surface.fill_text("out", Vec2::new(15.0, 15.0), &TextStyle::default());
        surface.pop_clip();
        assert_eq!(surface.texts().len(), 1);
        assert_eq!(surface.texts()[0].text, "in");
    }
}
