//! Quantizing color scale
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Parses `#rrggbb` or `#rgb`
    fn from_str(s: &str) -> Result<Rgb, ColorError> {
        let err = || ColorError(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize, width: usize| {
            hex.get(i..i + width)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(err)
        };
        match hex.len() {
            6 => Ok(Rgb::new(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                let short = |i| channel(i, 1).map(|c| c * 0x11);
                Ok(Rgb::new(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(err()),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid color {0:?}; expected #rrggbb")]
pub struct ColorError(String);

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ScaleError {
    #[error("color scale needs at least one color")]
    EmptyPalette,
    #[error("color scale has too many colors")]
    TooManyColors,
    #[error("color scale domain must be two finite numbers, lowest first")]
    BadDomain,
}

/// The red-yellow-green diverging palette, low values red
static DEFAULT_PALETTE: [Rgb; 11] = [
    Rgb::new(0xa5, 0x00, 0x26),
    Rgb::new(0xd7, 0x30, 0x27),
    Rgb::new(0xf4, 0x6d, 0x43),
    Rgb::new(0xfd, 0xae, 0x61),
    Rgb::new(0xfe, 0xe0, 0x8b),
    Rgb::new(0xff, 0xff, 0xbf),
    Rgb::new(0xd9, 0xef, 0x8b),
    Rgb::new(0xa6, 0xd9, 0x6a),
    Rgb::new(0x66, 0xbd, 0x63),
    Rgb::new(0x1a, 0x98, 0x50),
    Rgb::new(0x00, 0x68, 0x37),
];

/// Maps a continuous domain onto a palette by cutting the domain into as many
/// equal-width bins as there are colors.  Values outside the domain take the
/// first or last color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    domain: (f64, f64),
    palette: Vec<Rgb>,
    // Invariant: `thresholds.len() == palette.len() - 1`
    thresholds: Vec<f64>,
}

impl ColorScale {
    pub fn new(domain: (f64, f64), palette: Vec<Rgb>) -> Result<ColorScale, ScaleError> {
        let (lo, hi) = domain;
        if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
            return Err(ScaleError::BadDomain);
        }
        if palette.is_empty() {
            return Err(ScaleError::EmptyPalette);
        }
        let n = u32::try_from(palette.len() - 1).map_err(|_| ScaleError::TooManyColors)?;
        let thresholds = quantize_thresholds(lo, hi, n);
        Ok(ColorScale {
            domain,
            palette,
            thresholds,
        })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn palette(&self) -> &[Rgb] {
        &self.palette
    }

    /// Returns the color for `value`, or `None` if it is NaN
    pub fn color(&self, value: f64) -> Option<Rgb> {
        if value.is_nan() {
            return None;
        }
        let i = self.thresholds.partition_point(|&t| t <= value);
        self.palette.get(i).copied()
    }
}

impl Default for ColorScale {
    fn default() -> ColorScale {
        let thresholds = quantize_thresholds(0.0, 5.0, 10);
        ColorScale {
            domain: (0.0, 5.0),
            palette: DEFAULT_PALETTE.to_vec(),
            thresholds,
        }
    }
}

/// The `n` upper bin edges splitting `[lo, hi]` into `n + 1` equal bins
fn quantize_thresholds(lo: f64, hi: f64, n: u32) -> Vec<f64> {
    let bins = f64::from(n) + 1.0;
    (0..n)
        .map(|i| {
            let i = f64::from(i);
            ((i + 1.0) * hi - (i - f64::from(n)) * lo) / bins
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!("#a50026".parse::<Rgb>(), Ok(Rgb::new(0xa5, 0x00, 0x26)));
        assert_eq!("#FFF".parse::<Rgb>(), Ok(Rgb::new(0xff, 0xff, 0xff)));
        assert_eq!(" #1a9850 ".parse::<Rgb>(), Ok(Rgb::new(0x1a, 0x98, 0x50)));
        assert!("a50026".parse::<Rgb>().is_err());
        assert!("#a5002".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert!("#+12345".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_rgb() {
        assert_eq!(Rgb::new(0xa5, 0x00, 0x26).to_string(), "#a50026");
    }

    #[test]
    fn test_default_scale() {
        let scale = ColorScale::default();
        assert_eq!(scale.domain(), (0.0, 5.0));
        assert_eq!(scale.palette().len(), 11);
        assert_eq!(
            ColorScale::new((0.0, 5.0), DEFAULT_PALETTE.to_vec()),
            Ok(scale)
        );
    }

    #[test]
    fn test_quantize() {
        let scale = ColorScale::default();
        assert_eq!(scale.color(0.0), Some(DEFAULT_PALETTE[0]));
        assert_eq!(scale.color(2.0), Some(DEFAULT_PALETTE[4]));
        assert_eq!(scale.color(3.0), Some(DEFAULT_PALETTE[6]));
        assert_eq!(scale.color(4.0), Some(DEFAULT_PALETTE[8]));
        assert_eq!(scale.color(5.0), Some(DEFAULT_PALETTE[10]));
    }

    #[test]
    fn test_quantize_clamps() {
        let scale = ColorScale::default();
        assert_eq!(scale.color(-3.0), Some(DEFAULT_PALETTE[0]));
        assert_eq!(scale.color(100.0), Some(DEFAULT_PALETTE[10]));
        assert_eq!(scale.color(f64::INFINITY), Some(DEFAULT_PALETTE[10]));
        assert_eq!(scale.color(f64::NAN), None);
    }

    #[test]
    fn test_two_colors() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);
        let scale = ColorScale::new((10.0, 20.0), vec![black, white]).unwrap();
        assert_eq!(scale.color(14.9), Some(black));
        assert_eq!(scale.color(15.0), Some(white));
    }

    #[test]
    fn test_bad_scales() {
        assert_eq!(
            ColorScale::new((0.0, 1.0), Vec::new()),
            Err(ScaleError::EmptyPalette)
        );
        assert_eq!(
            ColorScale::new((f64::NAN, 1.0), vec![Rgb::new(0, 0, 0)]),
            Err(ScaleError::BadDomain)
        );
        assert_eq!(
            ColorScale::new((5.0, 1.0), vec![Rgb::new(0, 0, 0)]),
            Err(ScaleError::BadDomain)
        );
    }
}
