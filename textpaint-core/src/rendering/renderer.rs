//! The render backend: turns layout drawing calls into device primitives.
//!
//! A [`PartRenderer`] is the capability a [`LayoutDispatcher`] drives while it
//! walks a layout. [`RenderBackend`] fulfils it by emitting into a [`Device`]
//! that is borrowed for exactly one top-level draw call.
//!
//! [`LayoutDispatcher`]: super::dispatch::LayoutDispatcher

use log::{debug, trace};

use super::device::Device;
use super::graphics_state::{Color, PartColors, RenderPart};
use super::projector::project_glyphs;
use super::squiggle::{UnderlineSpec, build_squiggle_path};
use crate::core::error::RenderResult;
use crate::core::font::Font;
use crate::core::glyph::GlyphString;
use crate::core::units::{ScaledUnit, to_device};

/// Primitive drawing operations invoked by a layout dispatcher.
///
/// All coordinates are in layout units. Each operation paints with the color
/// currently set for its render part; an unset part leaves the device paint
/// as it is.
pub trait PartRenderer {
    /// Draw `glyphs` with their origin at `(x, y)`.
    fn draw_glyphs(
        &mut self,
        font: &dyn Font,
        glyphs: &GlyphString,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()>;

    /// Fill a rectangle with the color of `part`.
    fn draw_rectangle(
        &mut self,
        part: RenderPart,
        x: ScaledUnit,
        y: ScaledUnit,
        width: ScaledUnit,
        height: ScaledUnit,
    ) -> RenderResult<()>;

    /// Fill a squiggly underline inside the given box with the underline color.
    fn draw_error_underline(
        &mut self,
        x: ScaledUnit,
        y: ScaledUnit,
        width: ScaledUnit,
        height: ScaledUnit,
    ) -> RenderResult<()>;

    fn part_colors(&self) -> &PartColors;

    fn part_colors_mut(&mut self) -> &mut PartColors;

    /// The color set for `part`, if any.
    fn color(&self, part: RenderPart) -> Option<Color> {
        self.part_colors().get(part)
    }

    /// Set or clear the color of `part`.
    fn set_color(&mut self, part: RenderPart, color: Option<Color>) {
        self.part_colors_mut().set(part, color);
    }
}

/// Renderer that emits into a borrowed [`Device`].
///
/// The backend is either unbound or bound to one device. Binding an already
/// bound backend, unbinding an unbound one, or drawing while unbound are
/// caller bugs and panic.
///
/// A backend is not meant to be shared between threads; callers serialize
/// access to it.
#[derive(Debug)]
pub struct RenderBackend<'c, D: Device + ?Sized> {
    context: Option<&'c mut D>,
    colors: PartColors,
}

impl<'c, D: Device + ?Sized> Default for RenderBackend<'c, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c, D: Device + ?Sized> RenderBackend<'c, D> {
    /// Create an unbound backend with no part colors set.
    pub fn new() -> Self {
        Self::with_colors(PartColors::default())
    }

    /// Create an unbound backend with initial part colors.
    pub fn with_colors(colors: PartColors) -> Self {
        RenderBackend {
            context: None,
            colors,
        }
    }

    /// Attach the drawing context for the current draw call.
    ///
    /// # Panics
    /// If the backend is already bound.
    pub fn bind(&mut self, context: &'c mut D) {
        assert!(
            self.context.is_none(),
            "renderer is already bound to a drawing context"
        );
        self.context = Some(context);
    }

    /// Detach and return the drawing context.
    ///
    /// # Panics
    /// If the backend is not bound.
    pub fn unbind(&mut self) -> &'c mut D {
        self.context
            .take()
            .expect("renderer is not bound to a drawing context")
    }

    pub fn is_bound(&self) -> bool {
        self.context.is_some()
    }

    fn context(&mut self) -> &mut D {
        self.context
            .as_deref_mut()
            .expect("cannot draw: renderer is not bound to a drawing context")
    }

    /// Run `draw` between a save and restore of the device state, with the
    /// color of `part` applied. The restore happens even if `draw` fails.
    fn scoped<F>(&mut self, part: RenderPart, draw: F) -> RenderResult<()>
    where
        F: FnOnce(&mut D) -> RenderResult<()>,
    {
        let color = self.colors.get(part);
        let cx = self.context();

        cx.save_state();
        if let Some(color) = color {
            cx.set_color(color);
        }
        let result = draw(&mut *cx);
        cx.restore_state();

        result
    }
}

impl<'c, D: Device + ?Sized> PartRenderer for RenderBackend<'c, D> {
    fn draw_glyphs(
        &mut self,
        font: &dyn Font,
        glyphs: &GlyphString,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()> {
        let placed = project_glyphs(glyphs, x, y);
        let source = font.glyph_source();
        trace!(
            "draw_glyphs: {} glyphs of '{}' at ({}, {})",
            placed.len(),
            source.face,
            x,
            y
        );

        self.scoped(RenderPart::Foreground, |cx| {
            cx.set_glyph_source(&source);
            cx.show_glyphs(&placed)
        })
    }

    fn draw_rectangle(
        &mut self,
        part: RenderPart,
        x: ScaledUnit,
        y: ScaledUnit,
        width: ScaledUnit,
        height: ScaledUnit,
    ) -> RenderResult<()> {
        trace!("draw_rectangle: {:?} ({}, {}) {}x{}", part, x, y, width, height);

        self.scoped(part, |cx| {
            cx.begin_path();
            cx.rect(
                to_device(x),
                to_device(y),
                to_device(width),
                to_device(height),
            );
            cx.fill()
        })
    }

    fn draw_error_underline(
        &mut self,
        x: ScaledUnit,
        y: ScaledUnit,
        width: ScaledUnit,
        height: ScaledUnit,
    ) -> RenderResult<()> {
        assert!(
            self.is_bound(),
            "cannot draw: renderer is not bound to a drawing context"
        );

        let path = build_squiggle_path(&UnderlineSpec::new(x, y, width, height));
        if path.is_empty() {
            debug!("skipping error underline with zero height at ({}, {})", x, y);
            return Ok(());
        }
        trace!(
            "draw_error_underline: ({}, {}) {}x{}, {} vertices",
            x,
            y,
            width,
            height,
            path.vertices().len()
        );

        self.scoped(RenderPart::Underline, |cx| {
            cx.begin_path();
            cx.append_path(&path);
            cx.fill()
        })
    }

    fn part_colors(&self) -> &PartColors {
        &self.colors
    }

    fn part_colors_mut(&mut self) -> &mut PartColors {
        &mut self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::font::{GlyphSource, ScaledFont};
    use crate::core::glyph::GlyphInfo;
    use crate::rendering::device::{DeviceOp, RecordingDevice};

    #[test]
    fn test_bind_unbind() {
        let mut device = RecordingDevice::new();
        let mut backend = RenderBackend::new();
        assert!(!backend.is_bound());

        backend.bind(&mut device);
        assert!(backend.is_bound());

        let device = backend.unbind();
        assert!(!backend.is_bound());
        assert!(device.operations().is_empty());
    }

    #[test]
    #[should_panic(expected = "already bound")]
    fn test_double_bind_panics() {
        let mut first = RecordingDevice::new();
        let mut second = RecordingDevice::new();
        let mut backend = RenderBackend::new();
        backend.bind(&mut first);
        backend.bind(&mut second);
    }

    #[test]
    #[should_panic(expected = "not bound")]
    fn test_unbind_while_unbound_panics() {
        let mut backend: RenderBackend<'_, RecordingDevice> = RenderBackend::new();
        backend.unbind();
    }

    #[test]
    #[should_panic(expected = "not bound")]
    fn test_draw_rectangle_while_unbound_panics() {
        let mut backend: RenderBackend<'_, RecordingDevice> = RenderBackend::new();
        let _ = backend.draw_rectangle(RenderPart::Background, 0, 0, 10, 10);
    }

    #[test]
    #[should_panic(expected = "not bound")]
    fn test_draw_error_underline_while_unbound_panics() {
        let mut backend: RenderBackend<'_, RecordingDevice> = RenderBackend::new();
        let _ = backend.draw_error_underline(0, 0, 10, 0);
    }

    #[test]
    fn test_draw_rectangle() {
        let mut device = RecordingDevice::new();
        {
            let mut backend = RenderBackend::new();
            backend.set_color(RenderPart::Background, Some(Color::blue()));
            backend.bind(&mut device);
            backend
                .draw_rectangle(RenderPart::Background, 0, 0, 1024, 1024)
                .unwrap();
            backend.unbind();
        }

        assert_eq!(
            device.operations(),
            &[
                DeviceOp::Save,
                DeviceOp::SetColor(Color::blue()),
                DeviceOp::BeginPath,
                DeviceOp::Rect(0.0, 0.0, 1.0, 1.0),
                DeviceOp::Fill(Color::blue()),
                DeviceOp::Restore,
            ]
        );
        assert_eq!(device.color(), Color::black());
    }

    #[test]
    fn test_unset_part_keeps_device_paint() {
        let mut device = RecordingDevice::new();
        device.set_color(Color::red());
        device.clear_operations();

        let mut backend = RenderBackend::new();
        backend.bind(&mut device);
        backend
            .draw_rectangle(RenderPart::Strikethrough, 0, 0, 512, 512)
            .unwrap();
        let device = backend.unbind();

        assert!(
            !device
                .operations()
                .iter()
                .any(|op| matches!(op, DeviceOp::SetColor(_)))
        );
        assert!(device.operations().contains(&DeviceOp::Fill(Color::red())));
    }

    #[test]
    fn test_draw_glyphs_batches_one_call() {
        let font = ScaledFont::new("Serif", 16.0);
        let glyphs: GlyphString = (0..3).map(|i| GlyphInfo::new(i, 600)).collect();

        let mut device = RecordingDevice::new();
        let mut backend = RenderBackend::with_colors(
            PartColors::new().with(RenderPart::Foreground, Color::red()),
        );
        backend.bind(&mut device);
        backend.draw_glyphs(&font, &glyphs, 0, 0).unwrap();
        let device = backend.unbind();

        let shows: Vec<_> = device
            .operations()
            .iter()
            .filter_map(|op| match op {
                DeviceOp::ShowGlyphs {
                    source,
                    color,
                    glyphs,
                } => Some((source, color, glyphs)),
                _ => None,
            })
            .collect();
        assert_eq!(shows.len(), 1);
        let (source, color, placed) = shows[0];
        assert_eq!(source, &GlyphSource::new("Serif", 16.0));
        assert_eq!(*color, Color::red());
        assert_eq!(placed.len(), 3);
        assert_eq!(placed[2].x, 1200.0 / 1024.0);
        assert_eq!(device.save_depth(), 0);
    }

    #[test]
    fn test_draw_error_underline_fills_squiggle() {
        let mut device = RecordingDevice::new();
        let mut backend = RenderBackend::with_colors(
            PartColors::new().with(RenderPart::Underline, Color::red()),
        );
        backend.bind(&mut device);
        backend.draw_error_underline(0, 0, 3000, 1024).unwrap();
        let device = backend.unbind();

        let ops = device.operations();
        assert_eq!(ops[0], DeviceOp::Save);
        assert_eq!(ops[1], DeviceOp::SetColor(Color::red()));
        assert_eq!(ops[2], DeviceOp::BeginPath);
        assert!(matches!(ops[3], DeviceOp::MoveTo(..)));
        let lines = ops
            .iter()
            .filter(|op| matches!(op, DeviceOp::LineTo(..)))
            .count();
        assert_eq!(lines, 11);
        assert_eq!(ops[ops.len() - 3], DeviceOp::ClosePath);
        assert_eq!(ops[ops.len() - 2], DeviceOp::Fill(Color::red()));
        assert_eq!(ops[ops.len() - 1], DeviceOp::Restore);
    }

    #[test]
    fn test_zero_height_error_underline_is_noop() {
        let mut device = RecordingDevice::new();
        let mut backend = RenderBackend::new();
        backend.bind(&mut device);
        backend.draw_error_underline(0, 0, 3000, 0).unwrap();
        let device = backend.unbind();
        assert!(device.operations().is_empty());
    }
}
