//! Dark-mode color derivation.
//!
//! A color's dark counterpart is chosen by walking [`FAMILY_RULES`] top to
//! bottom. The first rule whose matcher accepts the token name decides the
//! outcome: either a final color, or a family base that is then adjusted for
//! the name's variant suffix and interaction state. Names no rule accepts get
//! their light color with lightness mirrored.

use crate::luminosity::{Rgb, invert_lightness, shift_luminosity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Exact(&'static str),
    Prefix(&'static str),
    /// Starts with `prefix` but not with `except`.
    PrefixExcept {
        prefix: &'static str,
        except: &'static str,
    },
}

impl Matcher {
    #[must_use]
    pub fn matches(self, name: &str) -> bool {
        match self {
            Self::Exact(exact) => name == exact,
            Self::Prefix(prefix) => name.starts_with(prefix),
            Self::PrefixExcept { prefix, except } => {
                name.starts_with(prefix) && !name.starts_with(except)
            }
        }
    }
}

/// Lightness variant encoded in a token name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Lighter,
    Light,
    Darker,
    Dark,
}

impl Variant {
    /// Checked in this order; the first applicable variant wins.
    pub const PRIORITY: [Self; 4] = [Self::Lighter, Self::Light, Self::Darker, Self::Dark];

    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Lighter => "Lighter",
            Self::Light => "Light",
            Self::Darker => "Darker",
            Self::Dark => "Dark",
        }
    }

    #[must_use]
    pub const fn offset(self) -> f64 {
        match self {
            Self::Lighter => -0.20,
            Self::Light => -0.10,
            Self::Darker => 0.15,
            Self::Dark => 0.07,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Policy {
    /// Returned unchanged, no variant or state shifts.
    Fixed(Rgb),
    /// Family base color. `flavor` marks a base that already encodes that
    /// variant, so the variant shift for it is skipped.
    Base { rgb: Rgb, flavor: Option<Variant> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub matcher: Matcher,
    pub policy: Policy,
}

const fn fixed(name: &'static str, r: f64, g: f64, b: f64) -> Rule {
    Rule {
        matcher: Matcher::Exact(name),
        policy: Policy::Fixed(Rgb::new(r, g, b)),
    }
}

const fn base(matcher: Matcher, r: f64, g: f64, b: f64, flavor: Option<Variant>) -> Rule {
    Rule {
        matcher,
        policy: Policy::Base {
            rgb: Rgb::new(r, g, b),
            flavor,
        },
    }
}

const LIGHT: Option<Variant> = Some(Variant::Light);
const DARK: Option<Variant> = Some(Variant::Dark);

pub const FAMILY_RULES: &[Rule] = &[
    // Elevated and background surfaces.
    fixed("whiteLighter", 0.0, 0.0, 0.0),
    fixed("whiteDarker", 31.0, 42.0, 55.0),
    fixed("whiteNormal", 17.0, 25.0, 39.0),
    base(Matcher::Prefix("white"), 17.0, 25.0, 39.0, None),
    base(Matcher::Prefix("inkLight"), 128.0, 152.0, 178.0, LIGHT),
    base(Matcher::Prefix("ink"), 255.0, 255.0, 255.0, None),
    base(Matcher::Prefix("product"), 0.0, 203.0, 174.0, None),
    base(Matcher::Prefix("greenDark"), 100.0, 216.0, 115.0, DARK),
    base(Matcher::Prefix("greenLight"), 37.0, 75.0, 60.0, LIGHT),
    base(Matcher::Prefix("green"), 59.0, 206.0, 78.0, None),
    base(Matcher::Prefix("blueDark"), 103.0, 187.0, 254.0, DARK),
    base(Matcher::Prefix("blueLight"), 33.0, 66.0, 95.0, LIGHT),
    base(Matcher::Prefix("blue"), 42.0, 160.0, 254.0, None),
    base(Matcher::Prefix("orangeDark"), 252.0, 179.0, 90.0, DARK),
    base(Matcher::Prefix("orangeLight"), 75.0, 66.0, 54.0, LIGHT),
    base(Matcher::Prefix("orange"), 251.0, 161.0, 50.0, None),
    base(Matcher::Prefix("redDark"), 255.0, 112.0, 112.0, DARK),
    base(Matcher::Prefix("redLight"), 76.0, 50.0, 60.0, LIGHT),
    base(Matcher::Prefix("red"), 255.0, 80.0, 80.0, None),
    base(
        Matcher::PrefixExcept {
            prefix: "cloudDark",
            except: "cloudDarker",
        },
        56.0,
        65.0,
        75.0,
        DARK,
    ),
    base(Matcher::Prefix("cloud"), 41.0, 56.0, 69.0, None),
];

/// Interaction-state suffixes and their lightness offsets, first match wins.
pub const STATE_SHIFTS: [(&str, f64); 2] = [("Hover", 0.05), ("Active", 0.10)];

#[must_use]
pub fn find_rule(name: &str) -> Option<&'static Rule> {
    FAMILY_RULES.iter().find(|rule| rule.matcher.matches(name))
}

/// Variant whose shift applies to `name`, skipping the one the base already
/// encodes.
#[must_use]
pub fn variant_for(name: &str, flavor: Option<Variant>) -> Option<Variant> {
    Variant::PRIORITY
        .into_iter()
        .find(|variant| name.contains(variant.marker()) && flavor != Some(*variant))
}

#[must_use]
pub fn state_offset(name: &str) -> Option<f64> {
    STATE_SHIFTS
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(_, offset)| *offset)
}

/// Dark-mode counterpart of the color named `name` whose light value is
/// `light`.
#[must_use]
pub fn derive_dark_color(name: &str, light: Rgb) -> Rgb {
    let Some(rule) = find_rule(name) else {
        return invert_lightness(light);
    };

    let (mut color, flavor) = match rule.policy {
        Policy::Fixed(rgb) => return rgb,
        Policy::Base { rgb, flavor } => (rgb, flavor),
    };

    if let Some(variant) = variant_for(name, flavor) {
        color = shift_luminosity(color, variant.offset());
    }
    if let Some(offset) = state_offset(name) {
        color = shift_luminosity(color, offset);
    }
    color
}
