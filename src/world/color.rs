// Validated RGB colours. Templates use the `const` palette below; anything
// built at runtime goes through `Color::rgb` / `from_hex` / `named`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Rejected colour input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("rgb component out of range: ({0}, {1}, {2})")]
    OutOfRange(i32, i32, i32),

    #[error("invalid hex colour `{0}`")]
    BadHex(String),

    #[error("unknown colour name `{0}`")]
    UnknownName(String),
}

impl Color {
    pub const BLACK: Color = Color::from_u8(0, 0, 0);
    pub const WHITE: Color = Color::from_u8(255, 255, 255);
    pub const RED: Color = Color::from_u8(255, 0, 0);
    pub const BLUE: Color = Color::from_u8(0, 0, 255);
    pub const GREEN: Color = Color::from_u8(0, 128, 0);
    pub const TEAL: Color = Color::from_u8(0, 128, 128);
    pub const YELLOW: Color = Color::from_u8(255, 255, 0);
    pub const LIGHT_BLUE: Color = Color::from_u8(173, 216, 230);
    pub const DARK_GREY: Color = Color::from_u8(169, 169, 169);
    pub const GREY: Color = Color::from_u8(128, 128, 128);
    pub const LIGHT_GREY: Color = Color::from_u8(211, 211, 211);
    pub const ROYAL_BLUE: Color = Color::from_u8(65, 105, 225);
    pub const BROWN: Color = Color::from_u8(165, 42, 42);
    pub const ORANGE: Color = Color::from_u8(255, 165, 0);
    pub const SADDLE_BROWN: Color = Color::from_u8(139, 69, 19);
    pub const STONE: Color = Color::from_u8(165, 165, 165);
    pub const PERU: Color = Color::from_u8(205, 133, 63);
    pub const DARK_BLUE: Color = Color::from_u8(0, 0, 139);

    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Build from loose integer components; each must be in `0..=255`.
    pub fn rgb(r: i32, g: i32, b: i32) -> Result<Self, ColorError> {
        let ok = |c: i32| (0..=255).contains(&c);
        if !(ok(r) && ok(g) && ok(b)) {
            return Err(ColorError::OutOfRange(r, g, b));
        }
        Ok(Color::from_u8(r as u8, g as u8, b as u8))
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadHex(hex.to_owned()));
        }
        let v = u32::from_str_radix(digits, 16).map_err(|_| ColorError::BadHex(hex.to_owned()))?;
        Ok(Color::from_u32(v))
    }

    /// Look up a CSS colour name (case-insensitive); falls back to hex.
    pub fn named(name: &str) -> Result<Self, ColorError> {
        let key = name.trim().to_ascii_lowercase();
        if let Some(c) = BY_NAME.get(key.as_str()) {
            return Ok(*c);
        }
        if key.starts_with('#') {
            return Color::from_hex(&key);
        }
        Err(ColorError::UnknownName(name.to_owned()))
    }

    #[inline]
    pub const fn from_u32(v: u32) -> Self {
        Color::from_u8((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Pack as `0x00RRGGBB` (the software frame-buffer format).
    #[inline]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

static BY_NAME: Lazy<HashMap<&'static str, Color>> = Lazy::new(|| {
    HashMap::from([
        ("black", Color::BLACK),
        ("white", Color::WHITE),
        ("red", Color::RED),
        ("blue", Color::BLUE),
        ("green", Color::GREEN),
        ("teal", Color::TEAL),
        ("yellow", Color::YELLOW),
        ("lightblue", Color::LIGHT_BLUE),
        ("darkgrey", Color::DARK_GREY),
        ("grey", Color::GREY),
        ("lightgrey", Color::LIGHT_GREY),
        ("royalblue", Color::ROYAL_BLUE),
        ("brown", Color::BROWN),
        ("orange", Color::ORANGE),
        ("saddlebrown", Color::SADDLE_BROWN),
        ("peru", Color::PERU),
        ("darkblue", Color::DARK_BLUE),
    ])
});
