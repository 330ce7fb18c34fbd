//! Upstream token keys and values.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::derive::derive_dark_color;
use crate::error::{Result, SyncError};
use crate::luminosity::Rgb;

/// Bare neutral name that collides with a platform built-in color.
pub const RESERVED_NAME: &str = "white";
pub const RESERVED_NAME_REPLACEMENT: &str = "whiteNormal";

static CHANNEL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("channel pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub group: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorToken {
    pub raw_key: String,
    pub group: String,
    pub name: String,
    pub description: String,
    pub light: Rgb,
    pub dark: Rgb,
}

impl ColorToken {
    /// Parses an upstream entry and derives its dark counterpart.
    pub fn parse(raw_key: &str, value: &str) -> Result<Self> {
        let ParsedKey {
            group,
            name,
            description,
        } = parse_key(raw_key)?;
        let light = parse_channels(raw_key, value)?;
        let dark = derive_dark_color(&name, light);

        Ok(Self {
            raw_key: raw_key.to_string(),
            group,
            name,
            description,
            light,
            dark,
        })
    }
}

/// Splits camel-case text into capitalized fragments.
///
/// A fragment is an uppercase letter followed by either a run of lowercase
/// letters, or by the uppercase letters of an acronym that stop before the
/// next word's capital. Anything outside a fragment (a lowercase lead word,
/// digits) is dropped.
#[must_use]
pub fn split_camel_case(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut fragments = Vec::new();
    let mut index = 0;

    while index < chars.len() {
        if !chars[index].is_ascii_uppercase() {
            index += 1;
            continue;
        }

        let start = index;
        let next = index + 1;
        let lower_run = chars[next..]
            .iter()
            .take_while(|c| c.is_ascii_lowercase())
            .count();
        if lower_run > 0 {
            index = next + lower_run;
            fragments.push(chars[start..index].iter().collect());
            continue;
        }

        let upper_run = chars[next..]
            .iter()
            .take_while(|c| c.is_ascii_uppercase())
            .count();
        let end = next + upper_run;
        let take = if end == chars.len() {
            upper_run
        } else if upper_run > 0 {
            upper_run - 1
        } else {
            // Lone capital followed by a non-letter never starts a fragment.
            index += 1;
            continue;
        };
        index = next + take;
        fragments.push(chars[start..index].iter().collect());
    }

    fragments
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn parse_key(raw_key: &str) -> Result<ParsedKey> {
    let fragments = split_camel_case(raw_key);
    let Some(group) = fragments.first().cloned() else {
        return Err(SyncError::MalformedKey {
            key: raw_key.to_string(),
        });
    };

    let mut name = lowercase_first(&fragments.concat());
    if name == RESERVED_NAME {
        name = RESERVED_NAME_REPLACEMENT.to_string();
    }

    Ok(ParsedKey {
        group,
        name,
        description: fragments.join(" "),
    })
}

/// Reads the decimal channels out of an `rgb(R, G, B)` value. Exactly three
/// digit runs are accepted.
pub fn parse_channels(raw_key: &str, value: &str) -> Result<Rgb> {
    let channels: Vec<f64> = CHANNEL_PATTERN
        .find_iter(value)
        .map(|m| m.as_str().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| malformed(raw_key, value, 0))?;

    match channels.as_slice() {
        [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
        other => Err(malformed(raw_key, value, other.len())),
    }
}

fn malformed(raw_key: &str, value: &str, found: usize) -> SyncError {
    SyncError::MalformedColor {
        key: raw_key.to_string(),
        value: value.to_string(),
        found,
    }
}
