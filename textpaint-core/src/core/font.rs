//! Font abstraction consumed by the renderer.
//!
//! The renderer never inspects glyph outlines itself. It asks a [`Font`] for
//! a [`GlyphSource`], hands that to the drawing device, and lets the device
//! resolve glyph ids. Metrics are only needed to place decorations.

use std::fmt;

use super::units::{SCALE, ScaledUnit};

/// Handle a device uses to find glyph outlines for a font.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSource {
    /// Name of a face loaded on the device
    pub face: String,
    /// Font size in device units (pixels per em)
    pub size: f64,
}

impl GlyphSource {
    pub fn new(face: impl Into<String>, size: f64) -> Self {
        GlyphSource {
            face: face.into(),
            size,
        }
    }
}

/// Vertical metrics of a font at a given size, in layout units.
///
/// Positions are measured upward from the baseline, as in font tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the line box
    pub ascent: ScaledUnit,
    /// Distance from the baseline to the bottom of the line box
    pub descent: ScaledUnit,
    /// Distance above the baseline of the top of the underline
    pub underline_position: ScaledUnit,
    pub underline_thickness: ScaledUnit,
    /// Distance above the baseline of the top of the strikethrough
    pub strikethrough_position: ScaledUnit,
    pub strikethrough_thickness: ScaledUnit,
}

impl FontMetrics {
    /// Approximate metrics proportional to a font size in device units.
    pub fn for_size(size: f64) -> Self {
        let em = size * SCALE as f64;
        let thickness = ((em / 14.0).round() as ScaledUnit).max(1);
        FontMetrics {
            ascent: (em * 0.8).round() as ScaledUnit,
            descent: (em * 0.2).round() as ScaledUnit,
            underline_position: -((em * 0.1).round() as ScaledUnit),
            underline_thickness: thickness,
            strikethrough_position: (em * 0.3).round() as ScaledUnit,
            strikethrough_thickness: thickness,
        }
    }
}

/// A font as seen by the renderer.
pub trait Font: fmt::Debug {
    /// The native handle the device uses to draw this font's glyphs.
    fn glyph_source(&self) -> GlyphSource;

    /// Vertical metrics used to position backgrounds and decorations.
    fn metrics(&self) -> FontMetrics;
}

/// A font identified by face name and size, with explicit metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledFont {
    face: String,
    size: f64,
    metrics: FontMetrics,
}

impl ScaledFont {
    /// Create a font with metrics approximated from its size.
    pub fn new(face: impl Into<String>, size: f64) -> Self {
        ScaledFont {
            face: face.into(),
            size,
            metrics: FontMetrics::for_size(size),
        }
    }

    /// Replace the metrics of this font.
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn size(&self) -> f64 {
        self.size
    }
}

impl Font for ScaledFont {
    fn glyph_source(&self) -> GlyphSource {
        GlyphSource::new(self.face.clone(), self.size)
    }

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }
}
