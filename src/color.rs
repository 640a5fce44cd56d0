//! B/W color for monochrome e-paper panels
use embedded_graphics::pixelcolor::BinaryColor;

/// Pixel color of a monochrome panel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Color {
    /// Black pixel
    Black,
    /// White pixel
    #[default]
    White,
}

impl Color {
    /// The opposite color
    pub const fn inverse(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

/// Which bit value a panel reads as white.
///
/// This is fixed per panel family and never chosen per call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Polarity {
    /// A set bit (1) is a white pixel, 0xFF is an all-white byte
    WhiteIsSet,
    /// A set bit (1) is a black pixel, 0x00 is an all-white byte
    BlackIsSet,
}

impl Polarity {
    /// Whether the bit for `color` is set under this polarity
    pub const fn is_set(self, color: Color) -> bool {
        matches!(
            (self, color),
            (Polarity::WhiteIsSet, Color::White) | (Polarity::BlackIsSet, Color::Black)
        )
    }

    /// Byte value with all eight pixels in `color`
    pub const fn fill_byte(self, color: Color) -> u8 {
        if self.is_set(color) {
            0xFF
        } else {
            0x00
        }
    }

    /// Decode a single bit back into a color
    pub const fn color_of(self, bit_set: bool) -> Color {
        match (self, bit_set) {
            (Polarity::WhiteIsSet, true) | (Polarity::BlackIsSet, false) => Color::White,
            _ => Color::Black,
        }
    }
}

// `BinaryColor::On` is the drawn (ink) color, which is black on paper.
impl From<BinaryColor> for Color {
    fn from(b: BinaryColor) -> Color {
        match b {
            BinaryColor::On => Color::Black,
            BinaryColor::Off => Color::White,
        }
    }
}

impl From<Color> for BinaryColor {
    fn from(c: Color) -> BinaryColor {
        match c {
            Color::Black => BinaryColor::On,
            Color::White => BinaryColor::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_white() {
        assert_eq!(Color::default(), Color::White);
        assert_eq!(Color::default().inverse(), Color::Black);
    }

    #[test]
    fn fill_byte_follows_polarity() {
        assert_eq!(Polarity::WhiteIsSet.fill_byte(Color::White), 0xFF);
        assert_eq!(Polarity::WhiteIsSet.fill_byte(Color::Black), 0x00);
        assert_eq!(Polarity::BlackIsSet.fill_byte(Color::White), 0x00);
        assert_eq!(Polarity::BlackIsSet.fill_byte(Color::Black), 0xFF);
    }

    #[test]
    fn bit_decoding_matches_encoding() {
        for polarity in [Polarity::WhiteIsSet, Polarity::BlackIsSet] {
            for color in [Color::White, Color::Black] {
                assert_eq!(polarity.color_of(polarity.is_set(color)), color);
            }
        }
    }

    #[test]
    fn binary_color_on_is_black() {
        assert_eq!(Color::from(BinaryColor::On), Color::Black);
        assert_eq!(Color::from(BinaryColor::Off), Color::White);
        assert_eq!(BinaryColor::from(Color::Black), BinaryColor::On);
    }
}
