use anyhow::{anyhow, Result};
use tiny_skia::{Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::color::Hsla;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Round,
    Butt,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Round,
    Miter,
    Bevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Hsla,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// Abstract accumulating 2D drawing surface. The engine appends one short
/// stroked path per agent per frame and never clears: the built-up trails
/// are the artwork.
pub trait RenderSurface {
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quad_to(&mut self, control_x: f64, control_y: f64, x: f64, y: f64);
    fn stroke(&mut self, style: &StrokeStyle);
}

/// CPU raster surface backed by a tiny-skia pixmap, filled black at
/// creation (the pens' colors are tuned for a dark backdrop).
pub struct PixmapSurface {
    pixmap: Pixmap,
    path: Option<PathBuilder>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("invalid surface size {width}x{height}"))?;
        pixmap.fill(tiny_skia::Color::BLACK);
        Ok(Self {
            pixmap,
            path: None,
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }
}

impl RenderSurface for PixmapSurface {
    fn begin_path(&mut self) {
        self.path = Some(PathBuilder::new());
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if let Some(path) = self.path.as_mut() {
            path.move_to(x as f32, y as f32);
        }
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(path) = self.path.as_mut() {
            path.line_to(x as f32, y as f32);
        }
    }

    fn quad_to(&mut self, control_x: f64, control_y: f64, x: f64, y: f64) {
        if let Some(path) = self.path.as_mut() {
            path.quad_to(control_x as f32, control_y as f32, x as f32, y as f32);
        }
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        let Some(path) = self.path.take().and_then(PathBuilder::finish) else {
            return;
        };

        let [r, g, b, a] = style.color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: (style.width.max(0.0)) as f32,
            line_cap: match style.cap {
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match style.join {
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Records surface calls instead of rasterizing; used by tests that assert
/// on path structure rather than pixels.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<SurfaceOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadTo(f64, f64, f64, f64),
    Stroke(StrokeStyle),
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Stroke(_)))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(SurfaceOp::LineTo(x, y));
    }

    fn quad_to(&mut self, control_x: f64, control_y: f64, x: f64, y: f64) {
        self.ops.push(SurfaceOp::QuadTo(control_x, control_y, x, y));
    }

    fn stroke(&mut self, style: &StrokeStyle) {
        self.ops.push(SurfaceOp::Stroke(*style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixmap_surface_rejects_zero_size() {
        assert!(PixmapSurface::new(0, 64).is_err());
        assert!(PixmapSurface::new(64, 0).is_err());
    }

    #[test]
    fn stroke_marks_pixels() {
        let mut surface = PixmapSurface::new(64, 64).expect("surface");
        surface.begin_path();
        surface.move_to(8.0, 32.0);
        surface.line_to(56.0, 32.0);
        surface.stroke(&StrokeStyle {
            width: 4.0,
            color: Hsla {
                hue: 0.0,
                saturation: 100.0,
                lightness: 50.0,
                alpha: 1.0,
            },
            cap: LineCap::Round,
            join: LineJoin::Round,
        });

        let center = surface.pixmap().pixel(32, 32).expect("pixel");
        assert!(center.red() > 0, "stroke should color the center pixel");
    }

    #[test]
    fn stroke_without_path_is_a_no_op() {
        let mut surface = PixmapSurface::new(16, 16).expect("surface");
        let before = surface.pixmap().data().to_vec();
        surface.stroke(&StrokeStyle {
            width: 3.0,
            color: Hsla {
                hue: 120.0,
                saturation: 100.0,
                lightness: 50.0,
                alpha: 1.0,
            },
            cap: LineCap::Butt,
            join: LineJoin::Miter,
        });
        assert_eq!(surface.pixmap().data(), &before[..]);
    }

    #[test]
    fn recording_surface_captures_ops_in_order() {
        let mut surface = RecordingSurface::new();
        surface.begin_path();
        surface.move_to(1.0, 2.0);
        surface.quad_to(3.0, 4.0, 5.0, 6.0);
        assert_eq!(surface.ops.len(), 3);
        assert_eq!(surface.ops[1], SurfaceOp::MoveTo(1.0, 2.0));
        assert_eq!(surface.stroke_count(), 0);
    }
}
