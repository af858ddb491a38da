use crate::error::ConfigError;

/// An RGB colour with one byte per channel
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub const fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }

    /// The colour components scaled into the 0.0 to 1.0 range used by PDF operators
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl From<(u8, u8, u8)> for Colour {
    fn from(c: (u8, u8, u8)) -> Self {
        Colour::new_rgb_bytes(c.0, c.1, c.2)
    }
}

impl From<[u8; 3]> for Colour {
    fn from(c: [u8; 3]) -> Self {
        let [r, g, b] = c;
        Colour::new_rgb_bytes(r, g, b)
    }
}

/// Checked construction from wider integers, failing on any channel outside 0..=255
impl TryFrom<(i32, i32, i32)> for Colour {
    type Error = ConfigError;

    fn try_from(c: (i32, i32, i32)) -> Result<Self, Self::Error> {
        let channel = |value: i32| {
            u8::try_from(value).map_err(|_| ConfigError::ColourChannelOutOfRange(value))
        };
        Ok(Colour::new_rgb_bytes(channel(c.0)?, channel(c.1)?, channel(c.2)?))
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::new_rgb_bytes(0, 0, 0);
    pub const WHITE: Colour = Colour::new_rgb_bytes(255, 255, 255);
    pub const GREY: Colour = Colour::new_rgb_bytes(128, 128, 128);
    pub const RED: Colour = Colour::new_rgb_bytes(255, 0, 0);
    pub const GREEN: Colour = Colour::new_rgb_bytes(0, 255, 0);
    pub const BLUE: Colour = Colour::new_rgb_bytes(0, 0, 255);
}
