//! Raster surface backed by a tiny-skia pixmap.

use image::{Rgba as ImageRgba, RgbaImage};
use rusttype::{point as rt_point, Font, Scale};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tiny_skia::{
    Color, FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Rect as SkRect, Stroke,
    StrokeDash, Transform,
};
use utmn_map_core::{Error, Point, Rect, Result};

use super::display_list::{DisplayList, DrawCommand, Rgba, StrokeStyle};
use super::Surface;
use crate::font_manager;
use crate::icons::{IconCache, IconLookup};

fn color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn fill_paint(c: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color(c));
    paint.anti_alias = true;
    paint
}

fn stroke(style: &StrokeStyle) -> Stroke {
    Stroke {
        width: style.width as f32,
        dash: style
            .dash
            .and_then(|[on, off]| StrokeDash::new(vec![on as f32, off as f32], 0.0)),
        ..Default::default()
    }
}

fn sk_rect(rect: &Rect) -> Option<SkRect> {
    SkRect::from_xywh(
        rect.x as f32,
        rect.y as f32,
        rect.width as f32,
        rect.height as f32,
    )
}

/// Converts a straight-alpha image into a premultiplied pixmap.
fn icon_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let (w, h) = image.dimensions();
    let size = IntSize::from_wh(w, h)?;
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for px in image.pixels() {
        let [r, g, b, a] = px.0;
        let premul = |c: u8| (c as u16 * a as u16 / 255) as u8;
        data.extend_from_slice(&[premul(r), premul(g), premul(b), a]);
    }
    Pixmap::from_vec(data, size)
}

/// Rasterises display lists.
///
/// Text uses a system font found through fontdb and is skipped when none is
/// available. Icons come from the attached [`IconCache`]; icons that are not
/// loaded yet are skipped for this frame.
pub struct PixmapSurface {
    pixmap: Pixmap,
    transform: Transform,
    clear_color: Rgba,
    icons: Option<Arc<IconCache>>,
    icon_pixmaps: HashMap<String, Pixmap>,
    font: Option<Option<&'static Font<'static>>>,
}

impl PixmapSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::other(format!("Invalid surface size {width}x{height}")))?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            clear_color: Rgba::opaque(255, 255, 255),
            icons: None,
            icon_pixmaps: HashMap::new(),
            font: None,
        })
    }

    pub fn with_icons(mut self, icons: Arc<IconCache>) -> Self {
        self.icons = Some(icons);
        self
    }

    pub fn with_clear_color(mut self, clear_color: Rgba) -> Self {
        self.clear_color = clear_color;
        self
    }

    /// Overrides font lookup; `None` disables text.
    pub fn with_font(mut self, font: Option<&'static Font<'static>>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha copy of the surface.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.pixmap.width();
        let pixels = self.pixmap.pixels();
        RgbaImage::from_fn(width, self.pixmap.height(), |x, y| {
            let c = pixels[(y * width + x) as usize].demultiply();
            ImageRgba([c.red(), c.green(), c.blue(), c.alpha()])
        })
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_rgba_image()
            .save(path)
            .map_err(|e| Error::other(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn font(&mut self) -> Option<&'static Font<'static>> {
        *self.font.get_or_insert_with(font_manager::label_font)
    }

    fn shape(&mut self, path: Option<tiny_skia::Path>, fill: Option<Rgba>, stroke_style: Option<&StrokeStyle>) {
        let Some(path) = path else {
            return;
        };
        if let Some(fill) = fill {
            self.pixmap
                .fill_path(&path, &fill_paint(fill), FillRule::Winding, self.transform, None);
        }
        if let Some(style) = stroke_style {
            self.pixmap.stroke_path(
                &path,
                &fill_paint(style.color),
                &stroke(style),
                self.transform,
                None,
            );
        }
    }

    fn polyline(points: &[Point], close: bool) -> Option<tiny_skia::Path> {
        let (first, rest) = points.split_first()?;
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if close {
            pb.close();
        }
        pb.finish()
    }

    fn text(&mut self, text: &str, center: Point, size: f64, c: Rgba) {
        let Some(font) = self.font() else {
            return;
        };
        let scale_factor = self.transform.sx;
        let mut screen = tiny_skia::Point::from_xy(center.x as f32, center.y as f32);
        self.transform.map_point(&mut screen);

        let scale = Scale::uniform(size as f32 * scale_factor);
        let v_metrics = font.v_metrics(scale);
        let width: f32 = font
            .layout(text, scale, rt_point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let origin = rt_point(
            screen.x - width / 2.0,
            screen.y + (v_metrics.ascent + v_metrics.descent) / 2.0,
        );

        let surface_w = self.pixmap.width() as i32;
        let surface_h = self.pixmap.height() as i32;
        let data = self.pixmap.data_mut();
        for glyph in font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, v| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= surface_w || py >= surface_h {
                    return;
                }
                let a = (v * c.a as f32 / 255.0).clamp(0.0, 1.0);
                if a <= 0.0 {
                    return;
                }
                let idx = ((py * surface_w + px) * 4) as usize;
                let dst = &mut data[idx..idx + 4];
                let src = [c.r, c.g, c.b];
                for i in 0..3 {
                    dst[i] = (src[i] as f32 * a + dst[i] as f32 * (1.0 - a)).round() as u8;
                }
                dst[3] = (255.0 * a + dst[3] as f32 * (1.0 - a)).round() as u8;
            });
        }
    }

    fn icon(&mut self, icon_id: &str, rect: &Rect) {
        let Some(cache) = &self.icons else {
            return;
        };
        if !self.icon_pixmaps.contains_key(icon_id) {
            let IconLookup::Ready(image) = cache.get_or_load(icon_id) else {
                return;
            };
            let Some(pixmap) = icon_pixmap(&image) else {
                return;
            };
            self.icon_pixmaps.insert(icon_id.to_string(), pixmap);
        }
        let Some(icon) = self.icon_pixmaps.get(icon_id) else {
            return;
        };
        let sx = rect.width as f32 / icon.width() as f32;
        let sy = rect.height as f32 / icon.height() as f32;
        let transform = self
            .transform
            .pre_translate(rect.x as f32, rect.y as f32)
            .pre_scale(sx, sy);
        self.pixmap
            .draw_pixmap(0, 0, icon.as_ref(), &PixmapPaint::default(), transform, None);
    }
}

impl Surface for PixmapSurface {
    fn execute(&mut self, list: &DisplayList) {
        for command in list.iter() {
            match command {
                DrawCommand::Clear => {
                    self.transform = Transform::identity();
                    self.pixmap.fill(color(self.clear_color));
                }
                DrawCommand::SetTransform {
                    offset_x,
                    offset_y,
                    scale,
                } => {
                    self.transform = Transform::from_scale(*scale as f32, *scale as f32)
                        .post_translate(*offset_x as f32, *offset_y as f32);
                }
                DrawCommand::Polygon {
                    points,
                    fill,
                    stroke,
                } => {
                    let path = Self::polyline(points, true);
                    self.shape(path, *fill, stroke.as_ref());
                }
                DrawCommand::Rect { rect, fill, stroke } => {
                    let path = sk_rect(rect).map(PathBuilder::from_rect);
                    self.shape(path, *fill, stroke.as_ref());
                }
                DrawCommand::Line { from, to, stroke } => {
                    let path = Self::polyline(&[*from, *to], false);
                    self.shape(path, None, Some(stroke));
                }
                DrawCommand::Polyline { points, stroke } => {
                    let path = Self::polyline(points, false);
                    self.shape(path, None, Some(stroke));
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    fill,
                } => {
                    let path =
                        PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32);
                    self.shape(path, Some(*fill), None);
                }
                DrawCommand::Text {
                    text,
                    center,
                    size,
                    color,
                } => self.text(text, *center, *size, *color),
                DrawCommand::Icon { icon_id, rect } => self.icon(icon_id, rect),
            }
        }
    }
}
