//! Render backend for shaped text.
//!
//! This module turns laid-out text into drawing operations on a 2D device.
//! It is organized around a few seams:
//! - A [`Device`] trait for the drawing context (cairo-like state machine)
//! - A [`PartRenderer`] capability implemented by [`RenderBackend`]
//! - A [`LayoutDispatcher`] walking lines and runs
//! - [`TextPainter`] entry points drawing at the device's current point

pub mod device;
pub mod dispatch;
pub mod entry;
pub mod graphics_state;
pub mod layout;
pub mod path;
pub mod projector;
pub mod renderer;
pub mod squiggle;

// Re-export key types
pub use device::{Device, DeviceOp, RecordingDevice};
pub use dispatch::{DefaultDispatcher, LayoutDispatcher};
pub use entry::{TextPainter, TextPainterBuilder, show_glyphs, show_layout, show_layout_line};
pub use graphics_state::{Color, PartColors, RenderPart};
pub use layout::{GlyphItem, Layout, LayoutLine, RunStyle, Underline};
pub use path::{Path, PathBuilder, PathElement};
pub use projector::{GlyphBuffer, PositionedGlyph, project_glyphs};
pub use renderer::{PartRenderer, RenderBackend};
pub use squiggle::{Squiggle, UnderlineSpec, build_squiggle_path};

#[cfg(feature = "rendering")]
pub mod skia_device;

#[cfg(feature = "rendering")]
pub mod font;

#[cfg(feature = "rendering")]
pub use skia_device::SkiaDevice;

#[cfg(feature = "rendering")]
pub use font::OutlineFont;
