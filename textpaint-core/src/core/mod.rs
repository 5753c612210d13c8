pub mod error;
pub mod font;
pub mod glyph;
pub mod units;

pub use error::{RenderError, RenderResult};
pub use font::{Font, FontMetrics, GlyphSource, ScaledFont};
pub use glyph::{GlyphGeometry, GlyphId, GlyphInfo, GlyphString};
pub use units::{SCALE, ScaledUnit, from_device, to_device, units_to_device};
