//! Outline fonts loaded from font files, with shaping.

use std::fmt;

use rustybuzz::{Face as BuzzFace, UnicodeBuffer};
use ttf_parser::Face;

use crate::core::error::{RenderError, RenderResult};
use crate::core::font::{Font, FontMetrics, GlyphSource};
use crate::core::glyph::{GlyphGeometry, GlyphId, GlyphInfo, GlyphString};
use crate::core::units::{ScaledUnit, from_device};

/// A TrueType/OpenType font at a fixed size.
///
/// The font is drawn by a device that has loaded the same data under the
/// same name, see [`SkiaDevice::load_font`](super::SkiaDevice::load_font).
#[derive(Clone)]
pub struct OutlineFont {
    name: String,
    size: f64,
    face: Face<'static>,
    buzz_face: BuzzFace<'static>,
}

impl fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFont")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("units_per_em", &self.face.units_per_em())
            .finish()
    }
}

impl OutlineFont {
    /// Parse `data` as a font face of `size` pixels per em.
    pub fn new(name: impl Into<String>, data: &'static [u8], size: f64) -> RenderResult<Self> {
        let face = Face::parse(data, 0).map_err(|e| RenderError::FontParse(e.to_string()))?;
        let buzz_face = BuzzFace::from_slice(data, 0)
            .ok_or_else(|| RenderError::FontParse("face cannot be used for shaping".into()))?;
        Ok(OutlineFont {
            name: name.into(),
            size,
            face,
            buzz_face,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn face(&self) -> &Face<'static> {
        &self.face
    }

    /// Convert font design units to layout units at this size.
    fn to_layout(&self, v: i32) -> ScaledUnit {
        from_device(v as f64 * self.size / self.face.units_per_em() as f64)
    }

    /// Shape `text` into a glyph string in layout units.
    pub fn shape(&self, text: &str) -> GlyphString {
        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.guess_segment_properties();
        let shaped = rustybuzz::shape(&self.buzz_face, &[], buffer);

        shaped
            .glyph_infos()
            .iter()
            .zip(shaped.glyph_positions())
            .map(|(info, pos)| GlyphInfo {
                glyph: GlyphId(info.glyph_id),
                geometry: GlyphGeometry {
                    width: self.to_layout(pos.x_advance),
                    x_offset: self.to_layout(pos.x_offset),
                    // Shaping offsets grow upward
                    y_offset: -self.to_layout(pos.y_offset),
                },
            })
            .collect()
    }
}

impl Font for OutlineFont {
    fn glyph_source(&self) -> GlyphSource {
        GlyphSource::new(self.name.clone(), self.size)
    }

    fn metrics(&self) -> FontMetrics {
        let fallback = FontMetrics::for_size(self.size);
        let underline = self.face.underline_metrics();
        let strikeout = self.face.strikeout_metrics();

        FontMetrics {
            ascent: self.to_layout(self.face.ascender() as i32),
            descent: self.to_layout(-(self.face.descender() as i32)),
            underline_position: underline
                .map(|m| self.to_layout(m.position as i32))
                .unwrap_or(fallback.underline_position),
            underline_thickness: underline
                .map(|m| self.to_layout(m.thickness as i32).max(1))
                .unwrap_or(fallback.underline_thickness),
            strikethrough_position: strikeout
                .map(|m| self.to_layout(m.position as i32))
                .unwrap_or(fallback.strikethrough_position),
            strikethrough_thickness: strikeout
                .map(|m| self.to_layout(m.thickness as i32).max(1))
                .unwrap_or(fallback.strikethrough_thickness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        let err = OutlineFont::new("broken", b"definitely not a font", 12.0).unwrap_err();
        assert!(matches!(err, RenderError::FontParse(_)));
    }
}
