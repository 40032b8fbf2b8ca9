use serde::{Deserialize, Serialize};

/// An 8-bit per channel color with alpha, packable into a single `u32`
/// in ARGB order (`0xAARRGGBB`).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Self = Self::argb(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Produces a color with given alpha and RGB values. The values range from 0 to 255.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Produces a fully opaque color with given RGB values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    pub const fn from_argb_u32(packed: u32) -> Self {
        Self {
            a: (packed >> 24) as u8,
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    pub const fn to_argb_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Returns the same color with the alpha channel replaced.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Produces an opaque color for a given hue, saturation and value.
    ///
    /// Hue is given in degrees. Full hue circle extends from 0.0 to 360.0,
    /// but values from outside this range are also accepted and will be
    /// mapped onto the hue circle. For example 10.0, 370.0 and -350.0
    /// correspond to the same hue.
    ///
    /// Saturation and value are expected to be within the 0.0 to 1.0 range.
    /// If they are below 0, they will be truncated to 0, and if they are
    /// above 1, they will be truncated to 1.
    pub fn hsv(hue: f64, saturation: f64, value: f64) -> Self {
        Self::ahsv(255, hue, saturation, value)
    }

    /// Same as [`Color::hsv`], with an explicit alpha channel.
    pub fn ahsv(alpha: u8, hue: f64, saturation: f64, value: f64) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);
        let to_channel = |x: f64| (x * 255.0).round() as u8;

        if s <= 0.0 {
            let gray = to_channel(v);
            return Self::argb(alpha, gray, gray, gray);
        }

        let h = hue.rem_euclid(360.0) / 60.0;
        let sector = h.floor();
        let f = h - sector;

        let p = to_channel((1.0 - s) * v);
        let q = to_channel((1.0 - s * f) * v);
        let t = to_channel((1.0 - s * (1.0 - f)) * v);
        let v = to_channel(v);

        let (r, g, b) = match sector as i32 {
            0 | 6 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Self::argb(alpha, r, g, b)
    }

    /// Returns `(hue, saturation, value)` of this color, with hue in degrees
    /// within `[0, 360)` and saturation and value within `[0, 1]`.
    /// Alpha is ignored.
    pub fn to_hsv(self) -> (f64, f64, f64) {
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let value = max / 255.0;
        if max == 0.0 || delta == 0.0 {
            return (0.0, 0.0, value);
        }
        let saturation = delta / max;

        let hue = 60.0
            * if r == max {
                (g - b) / delta
            } else if g == max {
                2.0 + (b - r) / delta
            } else {
                4.0 + (r - g) / delta
            };

        let hue = if hue < 0.0 { hue + 360.0 } else { hue };
        (hue, saturation, value)
    }

    /// Produces an instance of Color from a hex color code. The code can start
    /// with a single hash symbol. 3-digit and 6-digit codes produce an opaque color,
    /// 8-digit codes are read as `AARRGGBB`.
    ///
    /// In case of an invalid hex code, the function will return `None`.
    pub fn from_hex_str(code: &str) -> Option<Self> {
        let code = code.strip_prefix('#').unwrap_or(code);
        if !code.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let x = u32::from_str_radix(code, 16).ok()?;

        match code.len() {
            8 => Some(Self::from_argb_u32(x)),
            6 => Some(Self::from_argb_u32(0xFF000000 | x)),
            3 => Some(Self::rgb(
                (((x & 0xF00) >> 8) * 0x11) as u8,
                (((x & 0x0F0) >> 4) * 0x11) as u8,
                ((x & 0x00F) * 0x11) as u8,
            )),
            _ => None,
        }
    }

    /// Produces an 8-digit hex code (`#aarrggbb`) representing the color
    /// stored in current instance of `Color`.
    pub fn to_hex_string(&self) -> String {
        format!("#{:08x}", self.to_argb_u32())
    }
}

impl From<u32> for Color {
    fn from(packed: u32) -> Self {
        Self::from_argb_u32(packed)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_argb_u32()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid hex color code: {0:?}")]
pub struct InvalidHexColor(String);

impl TryFrom<String> for Color {
    type Error = InvalidHexColor;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_hex_str(&code).ok_or(InvalidHexColor(code))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}
