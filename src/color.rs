//! RGB colors with saturating channel arithmetic

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// 3-channel 0-255 color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const BLUE: Rgb = Rgb(0x00, 0x00, 0xff);
    pub const GREEN: Rgb = Rgb(0x00, 0xff, 0x00);
    pub const RED: Rgb = Rgb(0xff, 0x00, 0x00);
    /// Toggled-on button body
    pub const MINT: Rgb = Rgb(0x66, 0xff, 0x66);
    /// Button label accent
    pub const VIOLET: Rgb = Rgb(0x66, 0x00, 0xff);

    /// Add `step` to every channel, clamping at 255
    pub fn lighten(self, step: u8) -> Self {
        Rgb(
            self.0.saturating_add(step),
            self.1.saturating_add(step),
            self.2.saturating_add(step),
        )
    }

    /// Subtract `step` from every channel, clamping at 0
    pub fn darken(self, step: u8) -> Self {
        Rgb(
            self.0.saturating_sub(step),
            self.1.saturating_sub(step),
            self.2.saturating_sub(step),
        )
    }

    /// CSS hex form (`#rrggbb`)
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|h| h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| Error::Color(s.to_string()))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| Error::Color(s.to_string()))
        };
        Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
