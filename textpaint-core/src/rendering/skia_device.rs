//! A tiny-skia based rendering device.

use std::collections::HashMap;

use log::trace;
use tiny_skia::{FillRule, Paint as SkiaPaint, PathBuilder, PixmapMut, Transform};
use ttf_parser::{Face, OutlineBuilder};

use crate::core::error::{RenderError, RenderResult};
use crate::core::font::GlyphSource;
use crate::rendering::device::Device;
use crate::rendering::graphics_state::Color;
use crate::rendering::projector::PositionedGlyph;

// --- Conversion helpers ---

fn to_skia_color(color: Color) -> tiny_skia::Color {
    let (r, g, b) = color.to_rgb8();
    tiny_skia::Color::from_rgba8(r, g, b, 255)
}

fn to_skia_transform(matrix: &[f64; 6]) -> Transform {
    Transform::from_row(
        matrix[0] as f32,
        matrix[1] as f32,
        matrix[2] as f32,
        matrix[3] as f32,
        matrix[4] as f32,
        matrix[5] as f32,
    )
}

fn map_point(ts: &Transform, x: f32, y: f32) -> (f32, f32) {
    (
        ts.sx * x + ts.kx * y + ts.tx,
        ts.ky * x + ts.sy * y + ts.ty,
    )
}

#[derive(Clone)]
struct SkiaGraphicsState {
    transform: Transform,
    color: Color,
    glyph_source: Option<GlyphSource>,
}

impl Default for SkiaGraphicsState {
    fn default() -> Self {
        SkiaGraphicsState {
            transform: Transform::identity(),
            color: Color::black(),
            glyph_source: None,
        }
    }
}

/// A device rasterizing into a tiny-skia pixmap.
///
/// The current path is kept in device space, so changing the transform
/// while a path is open does not move what was already added. Glyphs are
/// drawn from outline fonts registered with [`SkiaDevice::load_font`].
pub struct SkiaDevice<'a> {
    pixmap: PixmapMut<'a>,
    state_stack: Vec<SkiaGraphicsState>,
    path_builder: PathBuilder,
    /// Current point in device space
    current_point: Option<(f32, f32)>,
    subpath_start: Option<(f32, f32)>,
    font_cache: HashMap<String, Face<'static>>,
    anti_alias: bool,
}

struct PathConverter(PathBuilder);

impl OutlineBuilder for PathConverter {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}

impl<'a> SkiaDevice<'a> {
    pub fn new(pixmap: PixmapMut<'a>) -> Self {
        SkiaDevice {
            pixmap,
            state_stack: vec![SkiaGraphicsState::default()],
            path_builder: PathBuilder::new(),
            current_point: None,
            subpath_start: None,
            font_cache: HashMap::new(),
            anti_alias: true,
        }
    }

    /// Register font data under `name`, the face name glyph sources refer to.
    pub fn load_font(&mut self, name: &str, data: &'static [u8]) -> RenderResult<()> {
        let face = Face::parse(data, 0)
            .map_err(|e| RenderError::FontParse(format!("Failed to load font '{}': {}", name, e)))?;
        self.font_cache.insert(name.to_string(), face);
        Ok(())
    }

    pub fn set_anti_alias(&mut self, anti_alias: bool) {
        self.anti_alias = anti_alias;
    }

    /// Number of saved states not yet restored.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len() - 1
    }

    fn current_state(&self) -> &SkiaGraphicsState {
        self.state_stack
            .last()
            .expect("Graphics state stack underflow")
    }

    fn current_state_mut(&mut self) -> &mut SkiaGraphicsState {
        self.state_stack
            .last_mut()
            .expect("Graphics state stack underflow")
    }

    fn to_device_space(&self, x: f64, y: f64) -> (f32, f32) {
        map_point(&self.current_state().transform, x as f32, y as f32)
    }

    fn paint(&self) -> SkiaPaint<'static> {
        let mut paint = SkiaPaint::default();
        paint.set_color(to_skia_color(self.current_state().color));
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn clear_path(&mut self) {
        self.path_builder = PathBuilder::new();
        self.current_point = None;
        self.subpath_start = None;
    }
}

impl<'a> Device for SkiaDevice<'a> {
    fn save_state(&mut self) {
        let current_state = self.current_state().clone();
        self.state_stack.push(current_state);
    }

    fn restore_state(&mut self) {
        if self.state_stack.len() > 1 {
            self.state_stack.pop();
        }
    }

    fn concat_matrix(&mut self, matrix: &[f64; 6]) {
        let state = self.current_state_mut();
        state.transform = state.transform.pre_concat(to_skia_transform(matrix));
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        let (x, y) = self.current_point?;
        let inverse = self.current_state().transform.invert()?;
        let (ux, uy) = map_point(&inverse, x, y);
        Some((ux as f64, uy as f64))
    }

    fn begin_path(&mut self) {
        self.clear_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let (dx, dy) = self.to_device_space(x, y);
        self.path_builder.move_to(dx, dy);
        self.current_point = Some((dx, dy));
        self.subpath_start = Some((dx, dy));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.move_to(x, y);
            return;
        }
        let (dx, dy) = self.to_device_space(x, y);
        self.path_builder.line_to(dx, dy);
        self.current_point = Some((dx, dy));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        // Corners are mapped one by one so rotated transforms stay exact
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    fn close_path(&mut self) {
        if self.subpath_start.is_some() {
            self.path_builder.close();
            self.current_point = self.subpath_start;
        }
    }

    fn set_color(&mut self, color: Color) {
        self.current_state_mut().color = color;
    }

    fn fill(&mut self) -> RenderResult<()> {
        let builder = std::mem::replace(&mut self.path_builder, PathBuilder::new());
        self.clear_path();

        // A lone move-to paints nothing
        if builder.len() < 2 {
            return Ok(());
        }
        let path = builder.finish().ok_or_else(|| {
            RenderError::InvalidGeometry("path has non-finite coordinates".into())
        })?;

        let paint = self.paint();
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        Ok(())
    }

    fn set_glyph_source(&mut self, source: &GlyphSource) {
        self.current_state_mut().glyph_source = Some(source.clone());
    }

    fn show_glyphs(&mut self, glyphs: &[PositionedGlyph]) -> RenderResult<()> {
        let source = self
            .current_state()
            .glyph_source
            .clone()
            .ok_or(RenderError::NoGlyphSource)?;
        let face = self
            .font_cache
            .get(&source.face)
            .ok_or_else(|| RenderError::FontNotLoaded(source.face.clone()))?;

        let scale = (source.size / face.units_per_em() as f64) as f32;
        let transform = self.current_state().transform;
        let mut text_path_builder = PathBuilder::new();

        for glyph in glyphs {
            let Ok(id) = u16::try_from(glyph.glyph.0) else {
                trace!("skipping glyph {} outside the face's id range", glyph.glyph.0);
                continue;
            };

            let mut converter = PathConverter(PathBuilder::new());
            if face
                .outline_glyph(ttf_parser::GlyphId(id), &mut converter)
                .is_none()
            {
                continue;
            }

            let glyph_transform = Transform::from_scale(scale, -scale)
                .post_translate(glyph.x as f32, glyph.y as f32);
            if let Some(path) = converter
                .0
                .finish()
                .and_then(|p| p.transform(transform.pre_concat(glyph_transform)))
            {
                text_path_builder.push_path(&path);
            }
        }

        if let Some(path) = text_path_builder.finish() {
            let paint = self.paint();
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Pixmap;

    #[test]
    fn test_current_point_in_user_space() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let mut device = SkiaDevice::new(pixmap.as_mut());

        device.translate(2.0, 3.0);
        device.move_to(1.0, 1.0);
        assert_eq!(device.current_point(), Some((1.0, 1.0)));

        device.save_state();
        device.translate(1.0, 1.0);
        assert_eq!(device.current_point(), Some((0.0, 0.0)));
        device.restore_state();
        assert_eq!(device.save_depth(), 0);
    }

    #[test]
    fn test_missing_glyph_source() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let mut device = SkiaDevice::new(pixmap.as_mut());
        let err = device.show_glyphs(&[]).unwrap_err();
        assert!(matches!(err, RenderError::NoGlyphSource));
    }

    #[test]
    fn test_unloaded_font() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let mut device = SkiaDevice::new(pixmap.as_mut());
        device.set_glyph_source(&GlyphSource::new("Missing", 12.0));
        let err = device.show_glyphs(&[]).unwrap_err();
        assert!(matches!(err, RenderError::FontNotLoaded(name) if name == "Missing"));
    }

    #[test]
    fn test_load_font_rejects_garbage() {
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let mut device = SkiaDevice::new(pixmap.as_mut());
        assert!(matches!(
            device.load_font("bad", b"nope"),
            Err(RenderError::FontParse(_))
        ));
    }

    #[test]
    fn test_fill_rejects_non_finite_path() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        {
            let mut device = SkiaDevice::new(pixmap.as_mut());
            device.move_to(0.0, 0.0);
            device.line_to(f64::INFINITY, 2.0);
            device.line_to(0.0, 2.0);
            let err = device.fill().unwrap_err();
            assert!(matches!(err, RenderError::InvalidGeometry(_)));

            // The rejected path is gone
            assert_eq!(device.current_point(), None);
            device.fill().unwrap();
        }
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn test_fill_without_path_is_noop() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        {
            let mut device = SkiaDevice::new(pixmap.as_mut());
            device.fill().unwrap();
        }
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }
}
