use std::str::FromStr;

use bytemuck::{Pod, Zeroable};

use crate::Error;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Zeroable, Pod, Hash)]
#[repr(C)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Color = Color::rgba(255, 0, 0, 255);
    pub const GREEN: Color = Color::rgba(0, 255, 0, 255);
    pub const BLUE: Color = Color::rgba(0, 0, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(255, 255, 255, 0);

    /// The veil drawn over disabled widgets.
    pub const DISABLED_OVERLAY: Color = Color::rgba(0x20, 0x20, 0x20, 150);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    /// Parses an html-style color code: `"#1234AB"` or `"#1234AB80"`. The leading `#` is optional.
    pub fn hex(code: &str) -> Result<Color, Error> {
        let invalid = || Error::InvalidColor(code.to_string());

        let digits = code.strip_prefix('#').unwrap_or(code);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) || (digits.len() != 6 && digits.len() != 8) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        return Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, a));
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        return tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a);
    }

    pub(crate) fn premultiplied(self) -> tiny_skia::PremultipliedColorU8 {
        return tiny_skia::ColorU8::from_rgba(self.r, self.g, self.b, self.a).premultiply();
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex() {
        assert_eq!(Color::hex("#FF0000").unwrap(), Color::RED);
        assert_eq!(Color::hex("00ff00").unwrap(), Color::GREEN);
        assert_eq!("#673829".parse::<Color>().unwrap(), Color::rgb(0x67, 0x38, 0x29));
        assert_eq!(Color::hex("#20202096").unwrap(), Color::DISABLED_OVERLAY);

        for bad in ["", "#", "#12345", "#GGGGGG", "#1234567", "#ééé"] {
            let err = Color::hex(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidColor(_)), "{bad:?} parsed");
        }
    }
}
