use std::fmt;

/// An sRGB color as used in CSS hex notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    /// Parses `#rrggbb` or the short `#rgb` form. The leading `#` is optional.
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize, width: usize| u8::from_str_radix(&hex[i..i + width], 16).ok();
        match hex.len() {
            6 => Some(Self {
                r: channel(0, 2)?,
                g: channel(2, 2)?,
                b: channel(4, 2)?,
            }),
            3 => Some(Self {
                r: channel(0, 1)? * 17,
                g: channel(1, 1)? * 17,
                b: channel(2, 1)? * 17,
            }),
            _ => None,
        }
    }

    /// Linear interpolation toward `other`; `t` is clamped to `[0, 1]`.
    pub fn blend(self, other: Rgb, t: f64) -> Rgb {
        let t = t.max(0.0).min(1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    pub fn darken(self, amount: f64) -> Rgb {
        self.blend(Self::BLACK, amount)
    }

    pub fn lighten(self, amount: f64) -> Rgb {
        self.blend(Self::WHITE, amount)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(Rgb::parse("#667eea"), Some(Rgb { r: 0x66, g: 0x7e, b: 0xea }));
        assert_eq!(Rgb::parse("FFF"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse("#abz"), None);
        assert_eq!(Rgb::parse("#12345"), None);
        assert_eq!(Rgb::parse("red"), None);
    }

    #[test]
    fn blends_linearly() {
        let theme = Rgb::parse("#667eea").unwrap();
        assert_eq!(theme.blend(Rgb::BLACK, 0.0), theme);
        assert_eq!(theme.blend(Rgb::BLACK, 1.0), Rgb::BLACK);
        assert_eq!(Rgb::BLACK.blend(Rgb::WHITE, 0.5).to_hex(), "#808080");
        assert_eq!(theme.darken(0.25).to_hex(), "#4d5fb0");
    }

    #[test]
    fn clamps_blend_factor() {
        let theme = Rgb::parse("#667eea").unwrap();
        assert_eq!(theme.lighten(2.0), Rgb::WHITE);
        assert_eq!(theme.lighten(-1.0), theme);
    }
}
