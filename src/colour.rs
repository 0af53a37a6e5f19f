use crate::TiangeError;
use std::str::FromStr;

/// A colour, expressed in RGB or CMYK colour spaces
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB colour; r, g, b, range from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceCMYK colour; c, m, y, and k range from 0.0 to 1.0
    CMYK { c: f32, m: f32, y: f32, k: f32 },
    /// DeviceGray colour; g ranges from 0.0 to 1.0
    Grey { g: f32 },
}

impl Colour {
    /// Create a new colour in the RGB space. r, g, and b range from 0.0 to 1.0
    pub fn new_rgb(r: f32, g: f32, b: f32) -> Colour {
        Colour::RGB { r, g, b }
    }

    /// Create a new colour in the RGB space. r, g, and b range from 0 to 255
    pub fn new_rgb_bytes(r: u8, g: u8, b: u8) -> Colour {
        Colour::RGB {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Create a new colour in the Gray space, g ranges from 0.0 to 1.0
    pub fn new_grey(g: f32) -> Colour {
        Colour::Grey { g }
    }

    /// Whether painting with this colour on paper leaves no mark
    pub fn is_white(&self) -> bool {
        match *self {
            Colour::RGB { r, g, b } => r >= 1.0 && g >= 1.0 && b >= 1.0,
            Colour::CMYK { c, m, y, k } => c <= 0.0 && m <= 0.0 && y <= 0.0 && k <= 0.0,
            Colour::Grey { g } => g >= 1.0,
        }
    }
}

impl<T: Into<f32>> From<(T, T, T)> for Colour {
    fn from(c: (T, T, T)) -> Self {
        Colour::RGB {
            r: c.0.into(),
            g: c.1.into(),
            b: c.2.into(),
        }
    }
}

/// Parses the colour names the sheet configuration understands (`red`, `black`, ...)
/// or a `#rrggbb` hex code
impl FromStr for Colour {
    type Err = TiangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if let Some(hex) = name.strip_prefix('#') {
            let byte = |i: usize| {
                hex.get(i..i + 2)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
            };
            return match (hex.len(), byte(0), byte(2), byte(4)) {
                (6, Some(r), Some(g), Some(b)) => Ok(Colour::new_rgb_bytes(r, g, b)),
                _ => Err(TiangeError::UnknownColour(s.to_string())),
            };
        }

        match name.as_str() {
            "black" => Ok(colours::BLACK),
            "white" => Ok(colours::WHITE),
            "grey" | "gray" => Ok(colours::GREY),
            "red" => Ok(colours::RED),
            "green" => Ok(colours::GREEN),
            "blue" => Ok(colours::BLUE),
            _ => Err(TiangeError::UnknownColour(s.to_string())),
        }
    }
}

/// A list of pre-defined colour constants
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    pub const WHITE: Colour = Colour::Grey { g: 1.0 };
    pub const GREY: Colour = Colour::Grey { g: 0.5 };
    pub const RED: Colour = Colour::RGB {
        r: 1.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREEN: Colour = Colour::RGB {
        r: 0.0,
        g: 1.0,
        b: 0.0,
    };
    pub const BLUE: Colour = Colour::RGB {
        r: 0.0,
        g: 0.0,
        b: 1.0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_hex() {
        assert_eq!("red".parse::<Colour>().unwrap(), colours::RED);
        assert_eq!(" Black ".parse::<Colour>().unwrap(), colours::BLACK);
        assert_eq!(
            "#ff8000".parse::<Colour>().unwrap(),
            Colour::new_rgb_bytes(255, 128, 0)
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "mauve".parse::<Colour>(),
            Err(TiangeError::UnknownColour(c)) if c == "mauve"
        ));
        assert!("#ff80".parse::<Colour>().is_err());
        assert!("#gg0000".parse::<Colour>().is_err());
    }

    #[test]
    fn white_detection() {
        assert!(colours::WHITE.is_white());
        assert!(Colour::new_rgb_bytes(255, 255, 255).is_white());
        assert!(!colours::RED.is_white());
    }
}
