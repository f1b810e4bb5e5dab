//! RGB color type, named palette, and perceptual distance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color spec cannot be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid color spec: {0:?}")]
pub struct ColorParseError(pub String);

/// A 24-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const SILVER: Self = Self::new(0xc0, 0xc0, 0xc0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CIELAB coordinates (D65 white point).
    #[must_use]
    pub fn to_lab(self) -> [f64; 3] {
        fn linearize(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.040_45 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        fn f(t: f64) -> f64 {
            const DELTA: f64 = 6.0 / 29.0;
            if t > DELTA.powi(3) {
                t.cbrt()
            } else {
                t / (3.0 * DELTA.powi(2)) + 4.0 / 29.0
            }
        }

        let (r, g, b) = (linearize(self.r), linearize(self.g), linearize(self.b));

        // sRGB → XYZ, normalized against D65 reference white
        let x = (0.412_456_4 * r + 0.357_576_1 * g + 0.180_437_5 * b) / 0.950_47;
        let y = 0.212_672_9 * r + 0.715_152_2 * g + 0.072_175_0 * b;
        let z = (0.019_333_9 * r + 0.119_192_0 * g + 0.950_304_1 * b) / 1.088_83;

        let (fx, fy, fz) = (f(x), f(y), f(z));
        [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
    }
}

/// CIE76 color difference: Euclidean distance in CIELAB space.
#[must_use]
pub fn delta_e(a: Rgb, b: Rgb) -> f64 {
    let (la, lb) = (a.to_lab(), b.to_lab());
    la.iter()
        .zip(lb.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Default assignment palette, tried in order.
pub const DEFAULT_PALETTE: [Rgb; 17] = [
    Rgb::new(0xff, 0x00, 0x00), // red
    Rgb::new(0x00, 0x80, 0x00), // green
    Rgb::new(0xff, 0xc0, 0xcb), // pink
    Rgb::new(0xff, 0xa5, 0x00), // orange
    Rgb::new(0x80, 0x00, 0x80), // purple
    Rgb::new(0x00, 0x00, 0x00), // black
    Rgb::new(0x00, 0x00, 0xff), // blue
    Rgb::new(0xff, 0xff, 0x00), // yellow
    Rgb::new(0xf5, 0xf5, 0xdc), // beige
    Rgb::new(0xa5, 0x2a, 0x2a), // brown
    Rgb::new(0x00, 0x80, 0x80), // teal
    Rgb::new(0x00, 0x00, 0x80), // navy
    Rgb::new(0x80, 0x00, 0x00), // maroon
    Rgb::new(0x32, 0xcd, 0x32), // limegreen
    Rgb::new(0xff, 0xff, 0xff), // white
    Rgb::new(0xff, 0x00, 0xff), // fuchsia
    Rgb::new(0xc0, 0xc0, 0xc0), // silver
];

/// CSS keyword lookup for the names the default palette uses.
fn named(name: &str) -> Option<Rgb> {
    let color = match name {
        "red" => Rgb::new(0xff, 0x00, 0x00),
        "green" => Rgb::new(0x00, 0x80, 0x00),
        "pink" => Rgb::new(0xff, 0xc0, 0xcb),
        "orange" => Rgb::new(0xff, 0xa5, 0x00),
        "purple" => Rgb::new(0x80, 0x00, 0x80),
        "black" => Rgb::BLACK,
        "blue" => Rgb::new(0x00, 0x00, 0xff),
        "yellow" => Rgb::new(0xff, 0xff, 0x00),
        "beige" => Rgb::new(0xf5, 0xf5, 0xdc),
        "brown" => Rgb::new(0xa5, 0x2a, 0x2a),
        "teal" => Rgb::new(0x00, 0x80, 0x80),
        "navy" => Rgb::new(0x00, 0x00, 0x80),
        "maroon" => Rgb::new(0x80, 0x00, 0x00),
        "limegreen" => Rgb::new(0x32, 0xcd, 0x32),
        "white" => Rgb::new(0xff, 0xff, 0xff),
        "fuchsia" => Rgb::new(0xff, 0x00, 0xff),
        "silver" => Rgb::SILVER,
        _ => return None,
    };
    Some(color)
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        if let Some(hex) = spec.strip_prefix('#') {
            let err = || ColorParseError(spec.to_string());
            // Guard before byte-indexed slicing: multibyte input must fail,
            // not panic on a char boundary.
            if !hex.is_ascii() {
                return Err(err());
            }
            let byte = |h: &str| u8::from_str_radix(h, 16).map_err(|_| err());
            return match hex.len() {
                // #rgb shorthand doubles each digit
                3 => {
                    let digit = |h: &str| byte(h).map(|d| d * 16 + d);
                    Ok(Self::new(
                        digit(&hex[0..1])?,
                        digit(&hex[1..2])?,
                        digit(&hex[2..3])?,
                    ))
                }
                6 => Ok(Self::new(
                    byte(&hex[0..2])?,
                    byte(&hex[2..4])?,
                    byte(&hex[4..6])?,
                )),
                _ => Err(err()),
            };
        }
        named(&spec.to_ascii_lowercase()).ok_or_else(|| ColorParseError(spec.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_keywords() {
        assert_eq!("#ff0000".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("#F00".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("red".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
        assert_eq!("Silver".parse::<Rgb>().unwrap(), Rgb::SILVER);
        assert!("#ff00".parse::<Rgb>().is_err());
        assert!("chartreuse-ish".parse::<Rgb>().is_err());
    }

    #[test]
    fn multibyte_hex_specs_are_rejected_not_panics() {
        // Same byte lengths as the #rgb and #rrggbb forms.
        assert!("#日".parse::<Rgb>().is_err());
        assert!("#日本".parse::<Rgb>().is_err());
        assert!("#ａｂｃ".parse::<Rgb>().is_err());
    }

    #[test]
    fn hex_roundtrip() {
        let color = Rgb::new(0x12, 0xab, 0xef);
        assert_eq!(color.hex(), "#12abef");
        assert_eq!(color.hex().parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgb::new(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let parsed: Rgb = serde_json::from_str("\"navy\"").unwrap();
        assert_eq!(parsed, Rgb::new(0, 0, 0x80));
    }

    #[test]
    fn lab_of_white_and_black() {
        let [l, a, b] = Rgb::new(255, 255, 255).to_lab();
        assert!((l - 100.0).abs() < 0.1, "white L* was {l}");
        assert!(a.abs() < 0.1 && b.abs() < 0.1);

        let [l, _, _] = Rgb::BLACK.to_lab();
        assert!(l.abs() < 0.1, "black L* was {l}");
    }

    #[test]
    fn delta_e_separates_distinct_hues() {
        let red = Rgb::new(255, 0, 0);
        let green = Rgb::new(0, 0x80, 0);
        assert!(delta_e(red, green) > 20.0);
        assert!(delta_e(red, red) < f64::EPSILON);
        // Near-identical reds are perceptually close
        assert!(delta_e(red, Rgb::new(255, 0x10, 0x10)) < 20.0);
    }

    #[test]
    fn palette_starts_with_red() {
        assert_eq!(DEFAULT_PALETTE[0], Rgb::new(255, 0, 0));
        assert_eq!(DEFAULT_PALETTE.len(), 17);
    }
}
