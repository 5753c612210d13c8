//! # textpaint
//!
//! Facade over [`textpaint_core`], re-exporting its public API.
//!
//! ## Quick Start
//!
//! ```rust
//! use textpaint::{Color, RecordingDevice, RenderPart, TextPainter};
//! use textpaint::{GlyphInfo, GlyphString, ScaledFont};
//! use textpaint::rendering::Device;
//!
//! let painter = TextPainter::builder()
//!     .color(RenderPart::Foreground, Color::blue())
//!     .build();
//!
//! let font = ScaledFont::new("Sans", 12.0);
//! let glyphs: GlyphString = vec![GlyphInfo::new(36, 6144)].into();
//!
//! let mut device = RecordingDevice::new();
//! device.move_to(4.0, 16.0);
//! painter.show_glyphs(&mut device, &font, &glyphs)?;
//! assert_eq!(device.save_depth(), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use textpaint_core::*;
