//! Geometry of the wavy "error" underline.
//!
//! The squiggle is a single closed polygon that zig-zags across its box:
//!
//! ```text
//!              H       E                H
//!     /\      /\      /\        /\      /\               -
//!   A/  \    /  \    /  \     A/  \    /  \              |
//!    \   \  /    \  /   /D     \   \  /    \             |
//!     \   \/  C   \/   /        \   \/   C  \            | height = HEIGHT_SQUARES * square
//!      \      /\  F   /          \  F   /\   \           |
//!       \    /  \    /            \    /  \   \G         |
//!        \  /    \  /              \  /    \  /          |
//!         \/      \/                \/      \/           -
//!         B                         B
//! |----|
//!   unit_width = (HEIGHT_SQUARES - 1) * square
//! ```
//!
//! The left picture has an even number of units, the right one odd. The box
//! width is snapped to a whole number of units and the squiggle is shifted by
//! the difference.

use crate::core::units::{ScaledUnit, units_to_device};

use super::path::{Path, PathBuilder};

/// Height of the squiggle band, in squares.
pub const HEIGHT_SQUARES: f64 = 2.5;

/// Bounding box requested for an error underline, in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnderlineSpec {
    pub x: ScaledUnit,
    pub y: ScaledUnit,
    pub width: ScaledUnit,
    pub height: ScaledUnit,
}

impl UnderlineSpec {
    pub fn new(x: ScaledUnit, y: ScaledUnit, width: ScaledUnit, height: ScaledUnit) -> Self {
        UnderlineSpec {
            x,
            y,
            width,
            height,
        }
    }
}

/// Snapped squiggle geometry for one underline box, in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Squiggle {
    requested_x: f64,
    requested_width: f64,
    y: f64,
    height: f64,
    square: f64,
    unit_width: f64,
    width_units: u32,
}

impl Squiggle {
    /// Lay out a squiggle in `spec`, or `None` if the box has no height.
    ///
    /// # Panics
    /// If the box has a negative width or height.
    pub fn new(spec: &UnderlineSpec) -> Option<Self> {
        assert!(
            spec.height >= 0,
            "error underline height must not be negative, got {}",
            spec.height
        );
        assert!(
            spec.width >= 0,
            "error underline width must not be negative, got {}",
            spec.width
        );

        if spec.height == 0 {
            return None;
        }

        let height = spec.height as f64;
        let width = spec.width as f64;
        let square = height / HEIGHT_SQUARES;
        let unit_width = (HEIGHT_SQUARES - 1.0) * square;
        let width_units = (((width + unit_width / 2.0) / unit_width) as u32).max(1);

        Some(Squiggle {
            requested_x: spec.x as f64,
            requested_width: width,
            y: spec.y as f64,
            height,
            square,
            unit_width,
            width_units,
        })
    }

    /// Amplitude unit of the zig-zag.
    pub fn square(&self) -> f64 {
        self.square
    }

    /// Horizontal distance between a peak and the next trough.
    pub fn unit_width(&self) -> f64 {
        self.unit_width
    }

    pub fn width_units(&self) -> u32 {
        self.width_units
    }

    /// Width actually covered by the whole units.
    pub fn snapped_width(&self) -> f64 {
        self.width_units as f64 * self.unit_width
    }

    /// Horizontal adjustment applied to the requested x.
    pub fn shift(&self) -> f64 {
        self.requested_width - self.snapped_width()
    }

    /// Left edge of the snapped squiggle.
    pub fn x(&self) -> f64 {
        self.requested_x + self.shift()
    }

    /// Outline vertices in layout units, before the closing segment.
    ///
    /// There are always `2 * width_units + 2` of them.
    pub fn vertices(&self) -> Vec<(f64, f64)> {
        let n = self.width_units as i64;
        let x = self.x();
        let square = self.square;
        let unit_width = self.unit_width;
        let y_top = self.y + self.height;
        let y_bottom = self.y;

        let mut points = Vec::with_capacity(2 * self.width_units as usize + 2);

        // Bottom of squiggle
        points.push((x - square / 2., y_top - square / 2.)); // A
        let mut i: i64 = 0;
        while i < n {
            let x_middle = x + (i + 1) as f64 * unit_width;
            let x_right = x + (i + 2) as f64 * unit_width;

            points.push((x_middle, y_bottom)); // B

            if i + 1 == n {
                // Lone trailing slope; the top pass turns around at G
            } else if i + 2 == n {
                points.push((x_right + square / 2., y_top - square / 2.)); // D
            } else {
                points.push((x_right, y_top - square)); // C
            }
            i += 2;
        }

        // Top of squiggle
        i -= 2;
        while i >= 0 {
            let x_left = x + i as f64 * unit_width;
            let x_middle = x + (i + 1) as f64 * unit_width;
            let x_right = x + (i + 2) as f64 * unit_width;

            if i + 1 == n {
                points.push((x_middle + square / 2., y_bottom + square / 2.)); // G
            } else {
                if i + 2 == n {
                    points.push((x_right, y_top)); // E
                }
                points.push((x_middle, y_bottom + square)); // F
            }

            points.push((x_left, y_top)); // H
            i -= 2;
        }

        points
    }

    /// Closed outline in device units.
    pub fn to_path(&self) -> Path {
        let mut builder = PathBuilder::new();
        for (index, (x, y)) in self.vertices().into_iter().enumerate() {
            let (dx, dy) = (units_to_device(x), units_to_device(y));

            #[cfg(feature = "debug-logging")]
            log::trace!("squiggle vertex {}: ({}, {})", index, dx, dy);

            if index == 0 {
                builder.move_to(dx, dy);
            } else {
                builder.line_to(dx, dy);
            }
        }
        builder.close();
        builder.finish()
    }
}

/// Build the closed squiggle outline for `spec` in device units.
///
/// A box with no height yields an empty path.
pub fn build_squiggle_path(spec: &UnderlineSpec) -> Path {
    match Squiggle::new(spec) {
        Some(squiggle) => squiggle.to_path(),
        None => Path::new(),
    }
}
