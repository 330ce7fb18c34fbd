//! RGB and HLS color values plus the lightness transforms used to derive
//! dark-mode colors.
//!
//! Channels stay fractional in `[0, 255]` space until they are serialized,
//! so a chain of shifts never accumulates rounding error.

const ONE_THIRD: f64 = 1.0 / 3.0;
const ONE_SIXTH: f64 = 1.0 / 6.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub const fn channels(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Channels as two-digit uppercase hex, rounded to the nearest integer and
    /// clamped to `0..=255`.
    #[must_use]
    pub fn hex_channels(self) -> [String; 3] {
        self.channels().map(hex_channel)
    }
}

/// Hue, lightness and saturation, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f64,
    pub l: f64,
    pub s: f64,
}

impl Hls {
    /// Achromatic inputs get hue 0 and saturation 0.
    #[must_use]
    pub fn from_rgb(rgb: Rgb) -> Self {
        let [r, g, b] = rgb.channels().map(|c| c / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let sum = max + min;
        let range = max - min;
        let l = sum / 2.0;

        if range == 0.0 {
            return Self { h: 0.0, l, s: 0.0 };
        }

        let s = if l <= 0.5 {
            range / sum
        } else {
            range / (2.0 - sum)
        };

        let rc = (max - r) / range;
        let gc = (max - g) / range;
        let bc = (max - b) / range;
        let h = if r == max {
            bc - gc
        } else if g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };

        Self {
            h: (h / 6.0).rem_euclid(1.0),
            l,
            s,
        }
    }

    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        if self.s == 0.0 {
            let v = self.l * 255.0;
            return Rgb::new(v, v, v);
        }

        let m2 = if self.l <= 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let m1 = 2.0 * self.l - m2;

        Rgb::new(
            hue_channel(m1, m2, self.h + ONE_THIRD) * 255.0,
            hue_channel(m1, m2, self.h) * 255.0,
            hue_channel(m1, m2, self.h - ONE_THIRD) * 255.0,
        )
    }
}

fn hue_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

/// Moves lightness by `offset`, clamped to `[0, 1]`. Hue and saturation are
/// kept as-is.
#[must_use]
pub fn shift_luminosity(rgb: Rgb, offset: f64) -> Rgb {
    let hls = Hls::from_rgb(rgb);
    Hls {
        l: (hls.l + offset).clamp(0.0, 1.0),
        ..hls
    }
    .to_rgb()
}

/// Mirrors lightness around the midpoint (`l -> 1 - l`).
#[must_use]
pub fn invert_lightness(rgb: Rgb) -> Rgb {
    let hls = Hls::from_rgb(rgb);
    Hls {
        l: 1.0 - hls.l,
        ..hls
    }
    .to_rgb()
}

#[must_use]
pub fn hex_channel(value: f64) -> String {
    let byte = value.round().clamp(0.0, 255.0) as u8;
    format!("{byte:02X}")
}
