/// Stroke color in HSL plus straight alpha, matching how pens describe
/// themselves (hue drifts, lightness follows the lighting scalar).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Degrees; any real value, wrapped into [0, 360).
    pub hue: f64,
    /// Percent, clamped to [0, 100].
    pub saturation: f64,
    /// Percent, clamped to [0, 100].
    pub lightness: f64,
    /// Clamped to [0, 1].
    pub alpha: f64,
}

impl Hsla {
    /// Converts to 8-bit straight-alpha RGBA.
    pub fn to_rgba8(self) -> [u8; 4] {
        let hue = self.hue.rem_euclid(360.0);
        let saturation = (self.saturation / 100.0).clamp(0.0, 1.0);
        let lightness = (self.lightness / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
        let hue_prime = hue / 60.0;
        let x = chroma * (1.0 - (hue_prime.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hue_prime as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = lightness - chroma / 2.0;

        let to_byte = |channel: f64| ((channel + m).clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            to_byte(r1),
            to_byte(g1),
            to_byte(b1),
            (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}
