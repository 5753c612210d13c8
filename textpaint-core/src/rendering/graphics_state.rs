//! Paint state for rendering: colors, render parts and affine matrices.

/// An RGB color with 16 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Color {
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Color { red, green, blue }
    }

    /// Create a black color
    pub const fn black() -> Self {
        Color::new(0, 0, 0)
    }

    /// Create a white color
    pub const fn white() -> Self {
        Color::new(0xffff, 0xffff, 0xffff)
    }

    /// Create a red color
    pub const fn red() -> Self {
        Color::new(0xffff, 0, 0)
    }

    /// Create a blue color
    pub const fn blue() -> Self {
        Color::new(0, 0, 0xffff)
    }

    /// Create a color from u8 values (0-255).
    ///
    /// Each byte is replicated into both halves of the channel so that 0xff
    /// maps to full intensity.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::new(r as u16 * 0x101, g as u16 * 0x101, b as u16 * 0x101)
    }

    /// Get the channels as u8 values, keeping the high byte.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.red >> 8) as u8,
            (self.green >> 8) as u8,
            (self.blue >> 8) as u8,
        )
    }
}

/// A decoration channel with its own paint color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderPart {
    /// Glyphs
    Foreground,
    /// Box behind the glyphs
    Background,
    /// Underlines, including error underlines
    Underline,
    /// Line through the glyphs
    Strikethrough,
}

impl RenderPart {
    pub const ALL: [RenderPart; 4] = [
        RenderPart::Foreground,
        RenderPart::Background,
        RenderPart::Underline,
        RenderPart::Strikethrough,
    ];

    fn index(self) -> usize {
        match self {
            RenderPart::Foreground => 0,
            RenderPart::Background => 1,
            RenderPart::Underline => 2,
            RenderPart::Strikethrough => 3,
        }
    }
}

/// The current color of each render part.
///
/// An unset part leaves whatever paint the device already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartColors {
    colors: [Option<Color>; 4],
}

impl PartColors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, part: RenderPart) -> Option<Color> {
        self.colors[part.index()]
    }

    pub fn set(&mut self, part: RenderPart, color: Option<Color>) {
        self.colors[part.index()] = color;
    }

    /// Builder-style variant of [`PartColors::set`].
    pub fn with(mut self, part: RenderPart, color: Color) -> Self {
        self.set(part, Some(color));
        self
    }
}

/// Identity transformation matrix `[a b c d e f]`.
pub const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Concatenate `m` onto `ctm`, so that `m` applies first.
///
/// Matrices are 6-element arrays `[a b c d e f]` representing
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
pub fn concat_matrix(ctm: &[f64; 6], m: &[f64; 6]) -> [f64; 6] {
    let [a, b, c, d, e, f] = *m;
    let [ctm_a, ctm_b, ctm_c, ctm_d, ctm_e, ctm_f] = *ctm;
    [
        ctm_a * a + ctm_c * b,
        ctm_b * a + ctm_d * b,
        ctm_a * c + ctm_c * d,
        ctm_b * c + ctm_d * d,
        ctm_a * e + ctm_c * f + ctm_e,
        ctm_b * e + ctm_d * f + ctm_f,
    ]
}

/// Transform a point by a matrix.
pub fn transform_point(m: &[f64; 6], x: f64, y: f64) -> (f64, f64) {
    let [a, b, c, d, e, f] = *m;
    (a * x + c * y + e, b * x + d * y + f)
}

/// Invert a matrix, or `None` if it is singular.
pub fn invert_matrix(m: &[f64; 6]) -> Option<[f64; 6]> {
    let [a, b, c, d, e, f] = *m;
    let det = a * d - b * c;
    if det == 0.0 || !det.is_finite() {
        return None;
    }
    let inv_det = 1.0 / det;
    Some([
        d * inv_det,
        -b * inv_det,
        -c * inv_det,
        a * inv_det,
        (c * f - d * e) * inv_det,
        (b * e - a * f) * inv_det,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversions() {
        assert_eq!(Color::rgb(255, 0, 128), Color::new(0xffff, 0, 0x8080));
        assert_eq!(Color::white().to_rgb8(), (255, 255, 255));
        assert_eq!(Color::black().to_rgb8(), (0, 0, 0));
        assert_eq!(Color::rgb(12, 34, 56).to_rgb8(), (12, 34, 56));
    }

    #[test]
    fn test_part_colors() {
        let mut colors = PartColors::new();
        for part in RenderPart::ALL {
            assert_eq!(colors.get(part), None);
        }

        colors.set(RenderPart::Underline, Some(Color::red()));
        assert_eq!(colors.get(RenderPart::Underline), Some(Color::red()));
        assert_eq!(colors.get(RenderPart::Foreground), None);

        colors.set(RenderPart::Underline, None);
        assert_eq!(colors.get(RenderPart::Underline), None);

        let colors = PartColors::new().with(RenderPart::Background, Color::blue());
        assert_eq!(colors.get(RenderPart::Background), Some(Color::blue()));
    }

    #[test]
    fn test_concat_matrix() {
        // Translate by (10, 20), then scale by 2x
        let ctm = concat_matrix(&IDENTITY, &[1.0, 0.0, 0.0, 1.0, 10.0, 20.0]);
        assert_eq!(ctm, [1.0, 0.0, 0.0, 1.0, 10.0, 20.0]);
        let ctm = concat_matrix(&ctm, &[2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
        assert_eq!(ctm, [2.0, 0.0, 0.0, 2.0, 10.0, 20.0]);
        assert_eq!(transform_point(&ctm, 10.0, 20.0), (30.0, 60.0));
    }

    #[test]
    fn test_invert_matrix() {
        let m = [2.0, 0.0, 0.0, 4.0, 10.0, 20.0];
        let inv = invert_matrix(&m).unwrap();
        let (x, y) = transform_point(&m, 3.0, 5.0);
        assert_eq!(transform_point(&inv, x, y), (3.0, 5.0));

        assert!(invert_matrix(&[0.0, 0.0, 0.0, 0.0, 1.0, 1.0]).is_none());
    }
}
