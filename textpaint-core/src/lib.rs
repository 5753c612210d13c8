//! # textpaint: Drawing Shaped Text onto 2D Devices
//!
//! textpaint is the render-backend half of a text stack. A layout engine
//! produces shaped runs of glyphs; textpaint walks them and emits glyph
//! batches, decoration rectangles and wavy error underlines onto a
//! cairo-like drawing device.
//!
//! ## Features
//!
//! - **Current-point drawing**: every entry point draws relative to the
//!   device's current point and leaves its graphics state untouched
//! - **Per-part colors**: foreground, background, underline and
//!   strikethrough each carry their own optional color
//! - **Error underlines**: a zig-zag squiggle snapped to whole units
//! - **Batched glyphs**: runs are projected into a stack buffer and drawn
//!   with one device call
//! - **Rasterization**: an optional tiny-skia device with outline fonts
//!
//! ## Quick Start
//!
//! ```rust
//! use textpaint_core::core::{GlyphInfo, GlyphString, ScaledFont};
//! use textpaint_core::rendering::{Device, DeviceOp, RecordingDevice, show_glyphs};
//!
//! let font = ScaledFont::new("Sans", 12.0);
//! let glyphs: GlyphString = vec![GlyphInfo::new(36, 6144), GlyphInfo::new(37, 6144)].into();
//!
//! let mut device = RecordingDevice::new();
//! device.move_to(10.0, 20.0);
//! show_glyphs(&mut device, &font, &glyphs)?;
//!
//! assert!(device
//!     .operations()
//!     .iter()
//!     .any(|op| matches!(op, DeviceOp::ShowGlyphs { glyphs, .. } if glyphs.len() == 2)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! textpaint is split into two layers:
//!
//! 1. **Core Layer**: layout units, glyph strings, fonts and errors
//! 2. **Rendering Layer**: the device trait, the render backend, the
//!    dispatcher and the public entry points
//!
//! Enable the `debug-logging` feature to trace every squiggle vertex.

pub mod core;
pub mod rendering;

// Re-export main types for convenience
pub use core::{
    Font, FontMetrics, GlyphGeometry, GlyphId, GlyphInfo, GlyphSource, GlyphString, RenderError,
    RenderResult, SCALE, ScaledFont, ScaledUnit,
};

// Re-export rendering types
pub use rendering::{
    Color, DefaultDispatcher, Device, GlyphItem, Layout, LayoutDispatcher, LayoutLine, PartColors,
    PartRenderer, RecordingDevice, RenderBackend, RenderPart, RunStyle, TextPainter, Underline,
    show_glyphs, show_layout, show_layout_line,
};

#[cfg(feature = "rendering")]
pub use rendering::{OutlineFont, SkiaDevice};
