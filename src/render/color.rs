//! RGB colours and the named constants the built-in widgets default to.

/// An opaque 24-bit RGB colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const LIGHT_RED: Color = Color::rgb(255, 100, 100);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const DARK_BLUE: Color = Color::rgb(0, 0, 150);
    pub const LIGHT_BLUE: Color = Color::rgb(80, 80, 255);
    pub const SKY_BLUE: Color = Color::rgb(150, 150, 255);
    pub const DARK_GREY: Color = Color::rgb(50, 50, 50);
    pub const GREY: Color = Color::rgb(100, 100, 100);
    pub const LIGHT_GREY: Color = Color::rgb(200, 200, 200);

    /// Create a colour from its components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral grey of the given darkness.
    #[inline]
    pub const fn grey(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Parse `#rrggbb` or `#rgb` hex notation.
    ///
    /// Returns `None` if the string is not a valid hex colour.
    pub fn from_hex(s: &str) -> Option<Color> {
        let hex = s.trim().strip_prefix('#')?;
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Color::rgb(r, g, b))
            }
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
                Some(Color::rgb(r * 17, g * 17, b * 17))
            }
            _ => None,
        }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_six_digits() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::from_hex("  #000000 "), Some(Color::BLACK));
    }

    #[test]
    fn hex_three_digits() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#f00"), Some(Color::RED));
    }

    #[test]
    fn hex_invalid() {
        assert_eq!(Color::from_hex("ff0000"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("#ff00"), None);
    }

    #[test]
    fn grey_and_tuple() {
        assert_eq!(Color::grey(100), Color::GREY);
        assert_eq!(Color::from((200, 200, 200)), Color::LIGHT_GREY);
    }
}
