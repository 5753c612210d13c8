//! Walking layouts into renderer primitives.
//!
//! A [`LayoutDispatcher`] knows the structure of glyph strings, lines and
//! layouts and breaks them down into the three primitives of a
//! [`PartRenderer`]. It only ever sees the renderer through that trait.

use super::graphics_state::{PartColors, RenderPart};
use super::layout::{GlyphItem, Layout, LayoutLine, RunStyle, Underline};
use super::renderer::PartRenderer;
use crate::core::error::RenderResult;
use crate::core::font::Font;
use crate::core::glyph::GlyphString;
use crate::core::units::ScaledUnit;

/// Breaks text structures down into renderer primitives.
///
/// Coordinates are layout units; `(x, y)` is the left end of the baseline for
/// glyphs and lines, and the top-left corner for whole layouts.
pub trait LayoutDispatcher {
    fn draw_glyphs(
        &self,
        renderer: &mut dyn PartRenderer,
        font: &dyn Font,
        glyphs: &GlyphString,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()>;

    fn draw_layout_line(
        &self,
        renderer: &mut dyn PartRenderer,
        line: &LayoutLine,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()>;

    fn draw_layout(
        &self,
        renderer: &mut dyn PartRenderer,
        layout: &Layout,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()>;
}

/// Dispatcher for the layout model in [`super::layout`].
///
/// Each run gets its background box, its glyphs, then its underline and
/// strikethrough, all placed from the run font's metrics. Run colors are
/// installed for the duration of a line and the renderer's previous colors
/// are put back afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultDispatcher;

impl DefaultDispatcher {
    fn draw_runs(
        &self,
        renderer: &mut dyn PartRenderer,
        line: &LayoutLine,
        base: &PartColors,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()> {
        let mut x_off = 0;
        for run in &line.runs {
            install_run_colors(renderer, base, &run.style);
            draw_run(renderer, run, x + x_off, y - run.style.rise)?;
            x_off += run.width();
        }
        Ok(())
    }
}

impl LayoutDispatcher for DefaultDispatcher {
    fn draw_glyphs(
        &self,
        renderer: &mut dyn PartRenderer,
        font: &dyn Font,
        glyphs: &GlyphString,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()> {
        renderer.draw_glyphs(font, glyphs, x, y)
    }

    fn draw_layout_line(
        &self,
        renderer: &mut dyn PartRenderer,
        line: &LayoutLine,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()> {
        let saved = *renderer.part_colors();
        let result = self.draw_runs(renderer, line, &saved, x, y);
        *renderer.part_colors_mut() = saved;
        result
    }

    fn draw_layout(
        &self,
        renderer: &mut dyn PartRenderer,
        layout: &Layout,
        x: ScaledUnit,
        y: ScaledUnit,
    ) -> RenderResult<()> {
        for (line, baseline) in layout.lines.iter().zip(layout.baselines()) {
            self.draw_layout_line(renderer, line, x, y + baseline)?;
        }
        Ok(())
    }
}

/// Set the part colors for one run. Unset run colors fall back to `base`;
/// decoration colors fall back to the run's foreground.
fn install_run_colors(renderer: &mut dyn PartRenderer, base: &PartColors, style: &RunStyle) {
    let foreground = style.foreground.or(base.get(RenderPart::Foreground));
    let background = style.background.or(base.get(RenderPart::Background));
    let underline = style
        .underline_color
        .or(foreground)
        .or(base.get(RenderPart::Underline));
    let strikethrough = style
        .strikethrough_color
        .or(foreground)
        .or(base.get(RenderPart::Strikethrough));

    renderer.set_color(RenderPart::Foreground, foreground);
    renderer.set_color(RenderPart::Background, background);
    renderer.set_color(RenderPart::Underline, underline);
    renderer.set_color(RenderPart::Strikethrough, strikethrough);
}

/// Draw one run with its baseline starting at `(x, y)`.
fn draw_run(
    renderer: &mut dyn PartRenderer,
    run: &GlyphItem,
    x: ScaledUnit,
    y: ScaledUnit,
) -> RenderResult<()> {
    let metrics = run.font.metrics();
    let width = run.width();
    let style = &run.style;

    if style.background.is_some() {
        renderer.draw_rectangle(
            RenderPart::Background,
            x,
            y - metrics.ascent,
            width,
            metrics.ascent + metrics.descent,
        )?;
    }

    renderer.draw_glyphs(run.font.as_ref(), &run.glyphs, x, y)?;

    let thickness = metrics.underline_thickness;
    let underline_y = y - metrics.underline_position;
    match style.underline {
        Underline::None => {}
        Underline::Single => {
            renderer.draw_rectangle(RenderPart::Underline, x, underline_y, width, thickness)?;
        }
        Underline::Double => {
            renderer.draw_rectangle(RenderPart::Underline, x, underline_y, width, thickness)?;
            renderer.draw_rectangle(
                RenderPart::Underline,
                x,
                underline_y + 2 * thickness,
                width,
                thickness,
            )?;
        }
        Underline::Low => {
            renderer.draw_rectangle(
                RenderPart::Underline,
                x,
                y + metrics.descent + thickness,
                width,
                thickness,
            )?;
        }
        Underline::Error => {
            renderer.draw_error_underline(x, underline_y, width, 3 * thickness)?;
        }
    }

    if style.strikethrough {
        renderer.draw_rectangle(
            RenderPart::Strikethrough,
            x,
            y - metrics.strikethrough_position,
            width,
            metrics.strikethrough_thickness,
        )?;
    }

    Ok(())
}
