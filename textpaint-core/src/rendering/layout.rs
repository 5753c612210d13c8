//! Shaped, positioned text ready to be drawn.
//!
//! These types carry the output of a layout engine: lines made of runs, each
//! run a glyph string in a single font and style. Line breaking and shaping
//! happen elsewhere.

use std::sync::Arc;

use super::graphics_state::Color;
use crate::core::font::Font;
use crate::core::glyph::GlyphString;
use crate::core::units::ScaledUnit;

/// Underline decoration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underline {
    #[default]
    None,
    /// A single line below the baseline
    Single,
    /// Two lines below the baseline
    Double,
    /// A single line below the descent, clear of descenders
    Low,
    /// A wavy line marking an error
    Error,
}

/// Paint and decoration attributes of a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunStyle {
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub underline: Underline,
    /// Falls back to the foreground color when unset
    pub underline_color: Option<Color>,
    pub strikethrough: bool,
    /// Falls back to the foreground color when unset
    pub strikethrough_color: Option<Color>,
    /// Baseline shift upward, for superscripts and subscripts
    pub rise: ScaledUnit,
}

impl RunStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn underline(mut self, underline: Underline) -> Self {
        self.underline = underline;
        self
    }

    pub fn underline_color(mut self, color: Color) -> Self {
        self.underline_color = Some(color);
        self
    }

    pub fn strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    pub fn strikethrough_color(mut self, color: Color) -> Self {
        self.strikethrough_color = Some(color);
        self
    }

    pub fn rise(mut self, rise: ScaledUnit) -> Self {
        self.rise = rise;
        self
    }
}

/// A run of glyphs sharing one font and style.
#[derive(Debug, Clone)]
pub struct GlyphItem {
    pub font: Arc<dyn Font>,
    pub glyphs: GlyphString,
    pub style: RunStyle,
}

impl GlyphItem {
    pub fn new(font: Arc<dyn Font>, glyphs: GlyphString) -> Self {
        GlyphItem {
            font,
            glyphs,
            style: RunStyle::default(),
        }
    }

    pub fn with_style(mut self, style: RunStyle) -> Self {
        self.style = style;
        self
    }

    /// Logical width of the run.
    pub fn width(&self) -> ScaledUnit {
        self.glyphs.width()
    }
}

/// One line of runs laid out left to right on a shared baseline.
#[derive(Debug, Clone, Default)]
pub struct LayoutLine {
    pub runs: Vec<GlyphItem>,
}

impl LayoutLine {
    pub fn new(runs: Vec<GlyphItem>) -> Self {
        LayoutLine { runs }
    }

    pub fn width(&self) -> ScaledUnit {
        self.runs.iter().map(GlyphItem::width).sum()
    }

    /// Largest ascent over the fonts of the line.
    pub fn ascent(&self) -> ScaledUnit {
        self.runs
            .iter()
            .map(|run| run.font.metrics().ascent)
            .max()
            .unwrap_or(0)
    }

    /// Largest descent over the fonts of the line.
    pub fn descent(&self) -> ScaledUnit {
        self.runs
            .iter()
            .map(|run| run.font.metrics().descent)
            .max()
            .unwrap_or(0)
    }
}

/// A paragraph of lines stacked top to bottom.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub lines: Vec<LayoutLine>,
    /// Extra space between the bottom of one line and the top of the next
    pub spacing: ScaledUnit,
}

impl Layout {
    pub fn new(lines: Vec<LayoutLine>) -> Self {
        Layout { lines, spacing: 0 }
    }

    pub fn with_spacing(mut self, spacing: ScaledUnit) -> Self {
        self.spacing = spacing;
        self
    }

    /// Baseline of each line, measured from the top of the layout.
    pub fn baselines(&self) -> Vec<ScaledUnit> {
        let mut baselines = Vec::with_capacity(self.lines.len());
        let mut top = 0;
        for line in &self.lines {
            let baseline = top + line.ascent();
            baselines.push(baseline);
            top = baseline + line.descent() + self.spacing;
        }
        baselines
    }
}
