//! Public drawing entry points.
//!
//! Each entry point draws at the device's current point: the device state is
//! saved, the origin is moved to the current point, a [`RenderBackend`] is
//! bound to the device while the dispatcher runs, and the state is restored
//! afterwards, whether or not drawing succeeded.

use log::debug;

use super::device::Device;
use super::dispatch::{DefaultDispatcher, LayoutDispatcher};
use super::graphics_state::{Color, PartColors, RenderPart};
use super::layout::{Layout, LayoutLine};
use super::renderer::{PartRenderer, RenderBackend};
use crate::core::error::RenderResult;
use crate::core::font::Font;
use crate::core::glyph::GlyphString;

/// Draws glyph strings, lines and layouts onto devices.
///
/// A painter holds the default part colors every draw starts from and the
/// dispatcher used to walk text structures.
#[derive(Debug, Clone, Default)]
pub struct TextPainter<L = DefaultDispatcher> {
    colors: PartColors,
    dispatcher: L,
}

impl TextPainter {
    /// A painter with no default colors and the default dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> TextPainterBuilder {
        TextPainterBuilder::default()
    }
}

impl<L: LayoutDispatcher> TextPainter<L> {
    /// Default part colors applied at the start of every draw.
    pub fn colors(&self) -> &PartColors {
        &self.colors
    }

    pub fn dispatcher(&self) -> &L {
        &self.dispatcher
    }

    /// Draw `glyphs` with the left end of their baseline at the current point.
    pub fn show_glyphs<D: Device + ?Sized>(
        &self,
        cx: &mut D,
        font: &dyn Font,
        glyphs: &GlyphString,
    ) -> RenderResult<()> {
        debug!("show_glyphs: {} glyphs", glyphs.len());
        self.draw_at_current_point(cx, |dispatcher, renderer| {
            dispatcher.draw_glyphs(renderer, font, glyphs, 0, 0)
        })
    }

    /// Draw `line` with the left end of its baseline at the current point.
    pub fn show_layout_line<D: Device + ?Sized>(
        &self,
        cx: &mut D,
        line: &LayoutLine,
    ) -> RenderResult<()> {
        debug!("show_layout_line: {} runs", line.runs.len());
        self.draw_at_current_point(cx, |dispatcher, renderer| {
            dispatcher.draw_layout_line(renderer, line, 0, 0)
        })
    }

    /// Draw `layout` with its top-left corner at the current point.
    pub fn show_layout<D: Device + ?Sized>(&self, cx: &mut D, layout: &Layout) -> RenderResult<()> {
        debug!("show_layout: {} lines", layout.lines.len());
        self.draw_at_current_point(cx, |dispatcher, renderer| {
            dispatcher.draw_layout(renderer, layout, 0, 0)
        })
    }

    fn draw_at_current_point<D, F>(&self, cx: &mut D, draw: F) -> RenderResult<()>
    where
        D: Device + ?Sized,
        F: FnOnce(&L, &mut dyn PartRenderer) -> RenderResult<()>,
    {
        let mut backend = RenderBackend::with_colors(self.colors);

        cx.save_state();
        let (x, y) = cx.current_point().unwrap_or((0.0, 0.0));
        cx.translate(x, y);

        backend.bind(cx);
        let result = draw(&self.dispatcher, &mut backend);
        let cx = backend.unbind();

        cx.restore_state();
        if let Err(err) = &result {
            debug!("drawing at ({}, {}) failed: {}", x, y, err);
        }
        result
    }
}

/// Builder for [`TextPainter`].
#[derive(Debug, Clone, Default)]
pub struct TextPainterBuilder<L = DefaultDispatcher> {
    colors: PartColors,
    dispatcher: L,
}

impl<L: LayoutDispatcher> TextPainterBuilder<L> {
    /// Set the default color of one part.
    pub fn color(mut self, part: RenderPart, color: Color) -> Self {
        self.colors.set(part, Some(color));
        self
    }

    /// Replace all default part colors.
    pub fn colors(mut self, colors: PartColors) -> Self {
        self.colors = colors;
        self
    }

    /// Use a different dispatcher.
    pub fn dispatcher<M: LayoutDispatcher>(self, dispatcher: M) -> TextPainterBuilder<M> {
        TextPainterBuilder {
            colors: self.colors,
            dispatcher,
        }
    }

    pub fn build(self) -> TextPainter<L> {
        TextPainter {
            colors: self.colors,
            dispatcher: self.dispatcher,
        }
    }
}

/// Draw `glyphs` at the current point of `cx` with a default painter.
pub fn show_glyphs<D: Device + ?Sized>(
    cx: &mut D,
    font: &dyn Font,
    glyphs: &GlyphString,
) -> RenderResult<()> {
    TextPainter::new().show_glyphs(cx, font, glyphs)
}

/// Draw `line` at the current point of `cx` with a default painter.
pub fn show_layout_line<D: Device + ?Sized>(cx: &mut D, line: &LayoutLine) -> RenderResult<()> {
    TextPainter::new().show_layout_line(cx, line)
}

/// Draw `layout` at the current point of `cx` with a default painter.
pub fn show_layout<D: Device + ?Sized>(cx: &mut D, layout: &Layout) -> RenderResult<()> {
    TextPainter::new().show_layout(cx, layout)
}
