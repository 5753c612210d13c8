//! Fixed-point layout units and their conversion to device units.
//!
//! Layout geometry (glyph advances, offsets, decoration boxes) is expressed in
//! [`ScaledUnit`], an integer unit where [`SCALE`] units make one device unit.
//! Every conversion goes through this module so that rectangles, glyph
//! positions and underline vertices all round the same way.

/// Integer layout-space distance.
pub type ScaledUnit = i32;

/// Number of [`ScaledUnit`]s per device unit.
pub const SCALE: ScaledUnit = 1024;

/// Convert a layout distance to device units.
#[inline]
pub fn to_device(v: ScaledUnit) -> f64 {
    v as f64 / SCALE as f64
}

/// Convert a fractional layout quantity to device units.
///
/// Derived geometry such as squiggle vertices is computed in layout space but
/// is no longer integral.
#[inline]
pub fn units_to_device(v: f64) -> f64 {
    v / SCALE as f64
}

/// Convert a device distance to the nearest layout unit.
#[inline]
pub fn from_device(d: f64) -> ScaledUnit {
    (d * SCALE as f64).round() as ScaledUnit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_maps_to_zero() {
        assert_eq!(to_device(0), 0.0);
        assert_eq!(units_to_device(0.0), 0.0);
    }

    #[test]
    fn test_one_device_unit() {
        assert_eq!(to_device(SCALE), 1.0);
        assert_eq!(to_device(-SCALE), -1.0);
        assert_eq!(to_device(512), 0.5);
    }

    #[test]
    fn test_from_device_rounds() {
        assert_eq!(from_device(1.0), SCALE);
        assert_eq!(from_device(0.5), 512);
        // 0.0004 * 1024 = 0.41 rounds down
        assert_eq!(from_device(0.0004), 0);
        assert_eq!(from_device(to_device(600)), 600);
    }

    #[test]
    fn test_fractional_matches_integer() {
        assert_eq!(units_to_device(600.0), to_device(600));
    }
}
