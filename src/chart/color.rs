use std::{fmt::Display, str::FromStr};

use ansi_term::Colour;
use anyhow::{anyhow, bail};

/// Color as red, green and blue channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f64, pub f64, pub f64);

/// Step applied between shades of consecutive buckets.
pub const SHADE_STEP: f64 = 0.1;

pub const DEFAULT_BAR_COLOR: Rgb = Rgb(0.12, 0.47, 0.71);
pub const DEFAULT_BACKGROUND: Rgb = Rgb(0., 0., 0.);

impl Rgb {
    pub fn lighten(self, step: f64) -> Rgb {
        let channel = |v: f64| f64::min(v + step, 1.);
        Rgb(channel(self.0), channel(self.1), channel(self.2))
    }

    /// Color seen when `self` is painted with `alpha` over `background`.
    pub fn blend(self, background: Rgb, alpha: f64) -> Rgb {
        let channel = |fg: f64, bg: f64| fg * alpha + bg * (1. - alpha);
        Rgb(
            channel(self.0, background.0),
            channel(self.1, background.1),
            channel(self.2, background.2),
        )
    }

    pub fn to_ansi(self) -> Colour {
        let channel = |v: f64| (v.clamp(0., 1.) * 255.).round() as u8;
        Colour::RGB(channel(self.0), channel(self.1), channel(self.2))
    }
}

/// Shades for `count` stacked buckets, starting with `base` and getting lighter.
pub fn shades(base: Rgb, count: usize) -> Vec<Rgb> {
    std::iter::successors(Some(base), |v| Some(v.lighten(SHADE_STEP)))
        .take(count)
        .collect()
}

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    /// Accepts `#rrggbb` or three comma separated floats, `0.1,0.5,0.8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                bail!("Can't parse {s} into color, expected #rrggbb");
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16)
                    .map(|v| v as f64 / 255.)
                    .map_err(|e| anyhow!("Can't parse {s} into color {e}"))
            };
            return Ok(Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let channels = s
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()?;
        match channels[..] {
            [r, g, b] if channels.iter().all(|v| (0. ..=1.).contains(v)) => Ok(Rgb(r, g, b)),
            _ => Err(anyhow!(
                "Can't parse {s} into color, expected 3 channels between 0 and 1"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use ansi_term::Colour;

    use super::{shades, Rgb};

    fn assert_close(a: Rgb, b: Rgb) {
        let close = |x: f64, y: f64| (x - y).abs() < 1e-9;
        assert!(
            close(a.0, b.0) && close(a.1, b.1) && close(a.2, b.2),
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn lighten_clamps_channels() {
        assert_close(Rgb(0.2, 0.95, 1.).lighten(0.1), Rgb(0.3, 1., 1.));
    }

    #[test]
    fn shades_get_lighter() {
        let shades = shades(Rgb(0.5, 0.7, 0.9), 4);
        assert_eq!(shades.len(), 4);
        assert_close(shades[0], Rgb(0.5, 0.7, 0.9));
        assert_close(shades[1], Rgb(0.6, 0.8, 1.));
        assert_close(shades[3], Rgb(0.8, 1., 1.));
    }

    #[test]
    fn blend_with_background() {
        let blended = Rgb(1., 1., 1.).blend(Rgb(0., 0., 0.), 0.3);
        assert_close(blended, Rgb(0.3, 0.3, 0.3));
        assert_close(Rgb(0.2, 0.4, 0.6).blend(Rgb(1., 1., 1.), 1.), Rgb(0.2, 0.4, 0.6));
    }

    #[test]
    fn parses_hex_and_floats() {
        assert_eq!("#ff0000".parse::<Rgb>().unwrap(), Rgb(1., 0., 0.));
        assert_eq!("0.1, 0.5,1".parse::<Rgb>().unwrap(), Rgb(0.1, 0.5, 1.));
        assert!("#ff00".parse::<Rgb>().is_err());
        assert!("0.1,2,0.3".parse::<Rgb>().is_err());
        assert!("0.1,0.3".parse::<Rgb>().is_err());
    }

    #[test]
    fn converts_to_terminal_colour() {
        assert_eq!(Rgb(1., 0., 0.5).to_ansi(), Colour::RGB(255, 0, 128));
    }
}
