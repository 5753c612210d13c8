//! Shaped glyph strings as produced by a layout engine.

use super::units::ScaledUnit;

/// Index of a glyph within its font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphId(pub u32);

/// Placement of a single glyph relative to the pen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphGeometry {
    /// Horizontal advance to the next glyph
    pub width: ScaledUnit,
    /// Horizontal offset of this glyph from the pen position
    pub x_offset: ScaledUnit,
    /// Vertical offset of this glyph from the baseline (y grows downward)
    pub y_offset: ScaledUnit,
}

/// A glyph and where to put it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphInfo {
    pub glyph: GlyphId,
    pub geometry: GlyphGeometry,
}

impl GlyphInfo {
    /// A glyph with the given advance and no offsets.
    pub fn new(glyph: u32, width: ScaledUnit) -> Self {
        GlyphInfo {
            glyph: GlyphId(glyph),
            geometry: GlyphGeometry {
                width,
                ..Default::default()
            },
        }
    }

    /// Set the offsets of this glyph.
    pub fn with_offset(mut self, x_offset: ScaledUnit, y_offset: ScaledUnit) -> Self {
        self.geometry.x_offset = x_offset;
        self.geometry.y_offset = y_offset;
        self
    }
}

/// An ordered run of shaped glyphs on a single baseline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphString {
    glyphs: Vec<GlyphInfo>,
}

impl GlyphString {
    /// Create an empty glyph string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a glyph.
    pub fn push(&mut self, info: GlyphInfo) {
        self.glyphs.push(info);
    }

    /// The glyph records, in visual order.
    pub fn glyphs(&self) -> &[GlyphInfo] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Total advance of the string.
    pub fn width(&self) -> ScaledUnit {
        self.glyphs.iter().map(|g| g.geometry.width).sum()
    }
}

impl From<Vec<GlyphInfo>> for GlyphString {
    fn from(glyphs: Vec<GlyphInfo>) -> Self {
        GlyphString { glyphs }
    }
}

impl FromIterator<GlyphInfo> for GlyphString {
    fn from_iter<I: IntoIterator<Item = GlyphInfo>>(iter: I) -> Self {
        GlyphString {
            glyphs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_sums_advances() {
        let glyphs: GlyphString = [600, 400, 1024]
            .into_iter()
            .enumerate()
            .map(|(i, w)| GlyphInfo::new(i as u32, w))
            .collect();
        assert_eq!(glyphs.len(), 3);
        assert_eq!(glyphs.width(), 2024);
    }

    #[test]
    fn test_offsets_do_not_affect_width() {
        let mut glyphs = GlyphString::new();
        glyphs.push(GlyphInfo::new(7, 500).with_offset(100, -200));
        assert_eq!(glyphs.width(), 500);
        assert_eq!(glyphs.glyphs()[0].geometry.y_offset, -200);
    }

    #[test]
    fn test_empty() {
        let glyphs = GlyphString::new();
        assert!(glyphs.is_empty());
        assert_eq!(glyphs.width(), 0);
    }
}
