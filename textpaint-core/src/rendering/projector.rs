//! Projection of glyph strings into device-space glyph placements.

use smallvec::SmallVec;

use crate::core::glyph::{GlyphId, GlyphString};
use crate::core::units::{ScaledUnit, units_to_device};

/// Runs up to this many glyphs are projected without touching the heap.
pub const MAX_STACK_GLYPHS: usize = 40;

/// A glyph at its final device-space position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionedGlyph {
    pub glyph: GlyphId,
    pub x: f64,
    pub y: f64,
}

/// Scratch storage for one projected run.
pub type GlyphBuffer = SmallVec<[PositionedGlyph; MAX_STACK_GLYPHS]>;

/// Project `glyphs` drawn with their origin at `(x, y)`.
///
/// The pen advances horizontally only; vertical offsets are applied per glyph
/// and do not accumulate. Positions are summed in 64 bits.
pub fn project_glyphs(glyphs: &GlyphString, x: ScaledUnit, y: ScaledUnit) -> GlyphBuffer {
    let mut buffer = GlyphBuffer::with_capacity(glyphs.len());
    let mut x_position = i64::from(x);

    for info in glyphs.glyphs() {
        let geometry = &info.geometry;
        buffer.push(PositionedGlyph {
            glyph: info.glyph,
            x: units_to_device((x_position + i64::from(geometry.x_offset)) as f64),
            y: units_to_device((i64::from(y) + i64::from(geometry.y_offset)) as f64),
        });
        x_position += i64::from(geometry.width);
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::glyph::GlyphInfo;

    fn run(advances: &[ScaledUnit]) -> GlyphString {
        advances
            .iter()
            .enumerate()
            .map(|(i, &w)| GlyphInfo::new(i as u32 + 1, w))
            .collect()
    }

    #[test]
    fn test_three_glyph_run() {
        let placed = project_glyphs(&run(&[600, 600, 600]), 0, 0);
        let xs: Vec<f64> = placed.iter().map(|g| g.x).collect();
        assert_eq!(xs, vec![0.0, 600.0 / 1024.0, 1200.0 / 1024.0]);
        assert!((xs[1] - 0.586).abs() < 1e-3);
        assert!((xs[2] - 1.172).abs() < 1e-3);
        assert!(placed.iter().all(|g| g.y == 0.0));
    }

    #[test]
    fn test_offsets_do_not_accumulate() {
        let glyphs: GlyphString = vec![
            GlyphInfo::new(1, 1024).with_offset(512, -1024),
            GlyphInfo::new(2, 1024),
        ]
        .into();
        let placed = project_glyphs(&glyphs, 2048, 1024);

        assert_eq!(placed[0].x, 2.5);
        assert_eq!(placed[0].y, 0.0);
        // x offset of the first glyph does not move the pen
        assert_eq!(placed[1].x, 3.0);
        assert_eq!(placed[1].y, 1.0);
    }

    #[test]
    fn test_pen_past_i32_range() {
        let x = i32::MAX - 1000;
        let placed = project_glyphs(&run(&[600, 600, 600]), x, i32::MAX);

        let xs: Vec<f64> = placed.iter().map(|g| g.x).collect();
        let start = x as f64;
        assert_eq!(
            xs,
            vec![
                start / 1024.0,
                (start + 600.0) / 1024.0,
                (start + 1200.0) / 1024.0,
            ]
        );
        assert_eq!(placed[0].y, i32::MAX as f64 / 1024.0);
    }

    #[test]
    fn test_empty_run() {
        assert!(project_glyphs(&GlyphString::new(), 100, 100).is_empty());
    }

    #[test]
    fn test_small_run_stays_inline() {
        let placed = project_glyphs(&run(&[100; MAX_STACK_GLYPHS]), 0, 0);
        assert!(!placed.spilled());
    }

    #[test]
    fn test_long_run_matches_short_runs() {
        let advances: Vec<ScaledUnit> = (0..200).map(|i| 300 + i).collect();
        let placed = project_glyphs(&run(&advances), 0, 0);
        assert_eq!(placed.len(), 200);

        let head = project_glyphs(&run(&advances[..10]), 0, 0);
        assert_eq!(&placed[..10], &head[..]);

        for (i, glyph) in placed.iter().enumerate() {
            assert_eq!(glyph.glyph, GlyphId(i as u32 + 1));
        }
    }
}
