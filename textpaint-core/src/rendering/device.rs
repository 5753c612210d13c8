//! Device trait for drawing-context abstraction.
//!
//! This module defines the Device trait, the 2D drawing context the renderer
//! emits primitives into. It follows the cairo model: the device owns a stack
//! of graphics states (transform, color, glyph source), a current path built
//! in user space, and a current point.

use super::graphics_state::{
    Color, IDENTITY, concat_matrix, invert_matrix, transform_point,
};
use super::path::{Path, PathElement};
use super::projector::PositionedGlyph;
use crate::core::error::{RenderError, RenderResult};
use crate::core::font::GlyphSource;

/// A drawing context the renderer can emit into.
///
/// Coordinates passed to path and glyph operations are in user space, i.e.
/// they are mapped through the current transformation matrix by the device.
pub trait Device {
    /// Push a copy of the graphics state.
    fn save_state(&mut self);

    /// Pop the graphics state pushed by the matching `save_state`.
    fn restore_state(&mut self);

    /// Concatenate a transformation matrix to the current CTM.
    ///
    /// # Arguments
    /// * `matrix` - 6-element array [a b c d e f] representing the transform
    fn concat_matrix(&mut self, matrix: &[f64; 6]);

    /// Move the user-space origin to (tx, ty).
    fn translate(&mut self, tx: f64, ty: f64) {
        self.concat_matrix(&[1.0, 0.0, 0.0, 1.0, tx, ty]);
    }

    /// The current point in user space, if a path is in progress.
    fn current_point(&self) -> Option<(f64, f64)>;

    /// Discard the current path.
    fn begin_path(&mut self);

    /// Move the current point to (x, y) starting a new subpath.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight line segment from the current point to (x, y).
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a rectangle to the path as a closed subpath.
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Close the current subpath.
    fn close_path(&mut self);

    /// Replay a built path onto the current path.
    fn append_path(&mut self, path: &Path) {
        for element in path.elements() {
            match *element {
                PathElement::MoveTo(x, y) => self.move_to(x, y),
                PathElement::LineTo(x, y) => self.line_to(x, y),
                PathElement::ClosePath => self.close_path(),
            }
        }
    }

    /// Set the paint used by `fill` and `show_glyphs`.
    fn set_color(&mut self, color: Color);

    /// Fill the current path with the current color and clear it.
    fn fill(&mut self) -> RenderResult<()>;

    /// Select the font face and size used by `show_glyphs`.
    fn set_glyph_source(&mut self, source: &GlyphSource);

    /// Draw a batch of glyphs with the current glyph source and color.
    fn show_glyphs(&mut self, glyphs: &[PositionedGlyph]) -> RenderResult<()>;
}

/// An operation recorded by [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceOp {
    Save,
    Restore,
    ConcatMatrix([f64; 6]),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Rect(f64, f64, f64, f64),
    ClosePath,
    SetColor(Color),
    /// A fill, with the color in effect when it was issued
    Fill(Color),
    SetGlyphSource(GlyphSource),
    /// A glyph batch, with the color and source in effect when it was issued
    ShowGlyphs {
        source: GlyphSource,
        color: Color,
        glyphs: Vec<PositionedGlyph>,
    },
}

#[derive(Debug, Clone)]
struct RecordingState {
    ctm: [f64; 6],
    color: Color,
    glyph_source: Option<GlyphSource>,
}

impl Default for RecordingState {
    fn default() -> Self {
        RecordingState {
            ctm: IDENTITY,
            color: Color::black(),
            glyph_source: None,
        }
    }
}

/// A device that records drawing operations instead of rasterizing them.
///
/// It keeps enough state (transform stack, current point, color, glyph
/// source) to behave like a real context, which makes it useful for testing
/// and for inspecting what a layout draws.
#[derive(Debug)]
pub struct RecordingDevice {
    /// Graphics state stack
    state_stack: Vec<RecordingState>,
    /// Current point in device space
    current_point: Option<(f64, f64)>,
    /// Start of the current subpath in device space
    subpath_start: Option<(f64, f64)>,
    /// Recorded operations
    operations: Vec<DeviceOp>,
}

impl Default for RecordingDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDevice {
    /// Create a new recording device with an identity transform.
    pub fn new() -> Self {
        RecordingDevice {
            state_stack: vec![RecordingState::default()],
            current_point: None,
            subpath_start: None,
            operations: Vec::new(),
        }
    }

    /// Get the recorded operations.
    pub fn operations(&self) -> &[DeviceOp] {
        &self.operations
    }

    /// Clear the recorded operations.
    pub fn clear_operations(&mut self) {
        self.operations.clear();
    }

    /// The current transformation matrix.
    pub fn ctm(&self) -> [f64; 6] {
        self.current_state().ctm
    }

    /// The current paint color.
    pub fn color(&self) -> Color {
        self.current_state().color
    }

    /// Number of saved states not yet restored.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len() - 1
    }

    fn current_state(&self) -> &RecordingState {
        self.state_stack
            .last()
            .expect("Graphics state stack underflow")
    }

    fn current_state_mut(&mut self) -> &mut RecordingState {
        self.state_stack
            .last_mut()
            .expect("Graphics state stack underflow")
    }

    fn to_device_space(&self, x: f64, y: f64) -> (f64, f64) {
        transform_point(&self.current_state().ctm, x, y)
    }

    fn clear_path(&mut self) {
        self.current_point = None;
        self.subpath_start = None;
    }
}

impl Device for RecordingDevice {
    fn save_state(&mut self) {
        let current = self.current_state().clone();
        self.state_stack.push(current);
        self.operations.push(DeviceOp::Save);
    }

    fn restore_state(&mut self) {
        if self.state_stack.len() > 1 {
            self.state_stack.pop();
        }
        self.operations.push(DeviceOp::Restore);
    }

    fn concat_matrix(&mut self, matrix: &[f64; 6]) {
        let state = self.current_state_mut();
        state.ctm = concat_matrix(&state.ctm, matrix);
        self.operations.push(DeviceOp::ConcatMatrix(*matrix));
    }

    fn current_point(&self) -> Option<(f64, f64)> {
        let (x, y) = self.current_point?;
        let inverse = invert_matrix(&self.current_state().ctm)?;
        Some(transform_point(&inverse, x, y))
    }

    fn begin_path(&mut self) {
        self.clear_path();
        self.operations.push(DeviceOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let point = self.to_device_space(x, y);
        self.current_point = Some(point);
        self.subpath_start = Some(point);
        self.operations.push(DeviceOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let point = self.to_device_space(x, y);
        if self.current_point.is_none() {
            self.subpath_start = Some(point);
        }
        self.current_point = Some(point);
        self.operations.push(DeviceOp::LineTo(x, y));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let point = self.to_device_space(x, y);
        self.current_point = Some(point);
        self.subpath_start = Some(point);
        self.operations.push(DeviceOp::Rect(x, y, width, height));
    }

    fn close_path(&mut self) {
        if self.subpath_start.is_some() {
            self.current_point = self.subpath_start;
        }
        self.operations.push(DeviceOp::ClosePath);
    }

    fn set_color(&mut self, color: Color) {
        self.current_state_mut().color = color;
        self.operations.push(DeviceOp::SetColor(color));
    }

    fn fill(&mut self) -> RenderResult<()> {
        self.clear_path();
        let color = self.current_state().color;
        self.operations.push(DeviceOp::Fill(color));
        Ok(())
    }

    fn set_glyph_source(&mut self, source: &GlyphSource) {
        self.current_state_mut().glyph_source = Some(source.clone());
        self.operations.push(DeviceOp::SetGlyphSource(source.clone()));
    }

    fn show_glyphs(&mut self, glyphs: &[PositionedGlyph]) -> RenderResult<()> {
        let state = self.current_state();
        let source = state
            .glyph_source
            .clone()
            .ok_or(RenderError::NoGlyphSource)?;
        let color = state.color;
        self.operations.push(DeviceOp::ShowGlyphs {
            source,
            color,
            glyphs: glyphs.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::glyph::GlyphId;

    #[test]
    fn test_device_operations() {
        let mut device = RecordingDevice::new();

        device.begin_path();
        device.move_to(100.0, 200.0);
        device.line_to(300.0, 400.0);
        device.close_path();
        device.fill().unwrap();

        let ops = device.operations();
        assert_eq!(ops[0], DeviceOp::BeginPath);
        assert_eq!(ops[1], DeviceOp::MoveTo(100.0, 200.0));
        assert_eq!(ops[2], DeviceOp::LineTo(300.0, 400.0));
        assert_eq!(ops[3], DeviceOp::ClosePath);
        assert_eq!(ops[4], DeviceOp::Fill(Color::black()));
        assert_eq!(device.current_point(), None);
    }

    #[test]
    fn test_state_save_restore() {
        let mut device = RecordingDevice::new();

        device.save_state();
        device.translate(5.0, 7.0);
        device.set_color(Color::red());
        assert_eq!(device.ctm(), [1.0, 0.0, 0.0, 1.0, 5.0, 7.0]);
        assert_eq!(device.save_depth(), 1);
        device.restore_state();

        assert_eq!(device.ctm(), IDENTITY);
        assert_eq!(device.color(), Color::black());
        assert_eq!(device.save_depth(), 0);
    }

    #[test]
    fn test_current_point_follows_transform() {
        let mut device = RecordingDevice::new();
        device.move_to(10.0, 20.0);
        assert_eq!(device.current_point(), Some((10.0, 20.0)));

        device.translate(10.0, 20.0);
        assert_eq!(device.current_point(), Some((0.0, 0.0)));

        device.line_to(5.0, 5.0);
        assert_eq!(device.current_point(), Some((5.0, 5.0)));
    }

    #[test]
    fn test_show_glyphs_requires_source() {
        let mut device = RecordingDevice::new();
        let glyphs = [PositionedGlyph {
            glyph: GlyphId(3),
            x: 1.0,
            y: 2.0,
        }];
        assert!(matches!(
            device.show_glyphs(&glyphs),
            Err(RenderError::NoGlyphSource)
        ));

        device.set_glyph_source(&GlyphSource::new("Sans", 12.0));
        device.show_glyphs(&glyphs).unwrap();
        assert_eq!(
            device.operations().last(),
            Some(&DeviceOp::ShowGlyphs {
                source: GlyphSource::new("Sans", 12.0),
                color: Color::black(),
                glyphs: glyphs.to_vec(),
            })
        );
    }

    #[test]
    fn test_append_path() {
        let mut path = Path::new();
        path.rect(0.0, 0.0, 1.0, 1.0);

        let mut device = RecordingDevice::new();
        device.append_path(&path);
        assert_eq!(device.operations().len(), 5);
        assert_eq!(device.operations()[4], DeviceOp::ClosePath);
        assert_eq!(device.current_point(), Some((0.0, 0.0)));
    }
}
