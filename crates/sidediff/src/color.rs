//! Color parsing and shading for the pane theme.

use ratatui::style::Color;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Move each channel toward black by `amount` (0.0 keeps, 1.0 is black)
    pub fn darken(self, amount: f32) -> Self {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * keep).round() as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// Parse hex color string (e.g., "#2ecc71" or "2ecc71")
pub fn parse_hex(s: &str) -> Result<Rgb, String> {
    let s = s.trim().trim_start_matches('#');
    if s.len() != 6 || !s.is_ascii() {
        return Err(format!(
            "invalid hex color: expected 6 characters, got {}",
            s.chars().count()
        ));
    }

    let r = u8::from_str_radix(&s[0..2], 16)
        .map_err(|_| format!("invalid hex color: bad red component in '{}'", s))?;
    let g = u8::from_str_radix(&s[2..4], 16)
        .map_err(|_| format!("invalid hex color: bad green component in '{}'", s))?;
    let b = u8::from_str_radix(&s[4..6], 16)
        .map_err(|_| format!("invalid hex color: bad blue component in '{}'", s))?;

    Ok(Rgb { r, g, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#2ecc71"), Ok(Rgb::new(0x2e, 0xcc, 0x71)));
        assert_eq!(parse_hex("A3BE8C"), Ok(Rgb::new(0xa3, 0xbe, 0x8c)));
        assert!(parse_hex("#fff").is_err());
        assert!(parse_hex("#gg0000").is_err());
        assert!(parse_hex("#ééé").is_err());
    }

    #[test]
    fn test_darken() {
        let rgb = Rgb::new(200, 100, 50);
        assert_eq!(rgb.darken(0.0), rgb);
        assert_eq!(rgb.darken(1.0), Rgb::new(0, 0, 0));
        assert_eq!(rgb.darken(0.5), Rgb::new(100, 50, 25));
    }
}
