//! Loading the raw token map from the design-token endpoint or a local copy.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::{Result, SyncError};
use crate::token::ColorToken;

pub const DEFAULT_TOKENS_URL: &str =
    "https://unpkg.com/@kiwicom/orbit-design-tokens/output/theo-spec.json";

/// Namespace marker of color tokens in the upstream document.
pub const PALETTE_PREFIX: &str = "palette";

/// Elevated and background white variants that upstream does not publish.
pub const SYNTHETIC_TOKENS: [&str; 2] = ["paletteWhiteLighter", "paletteWhiteDarker"];
pub const SYNTHETIC_VALUE: &str = "rgb(255, 255, 255)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    Remote { url: String, timeout_seconds: u64 },
    File(PathBuf),
}

/// Raw palette entries keyed by upstream key, synthetic tokens included.
pub fn load_raw_tokens(source: &TokenSource) -> Result<BTreeMap<String, String>> {
    let document = match source {
        TokenSource::Remote {
            url,
            timeout_seconds,
        } => fetch_document(url, *timeout_seconds)?,
        TokenSource::File(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
    };
    extract_palette(&document)
}

pub fn fetch_document(url: &str, timeout_seconds: u64) -> Result<Value> {
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(timeout_seconds.min(10)))
        .timeout(Duration::from_secs(timeout_seconds))
        .build()?;

    tracing::debug!(url, "fetching design tokens");
    let document = client.get(url).send()?.error_for_status()?.json::<Value>()?;
    Ok(document)
}

/// Keeps the prefixed entries of a flat JSON object and adds the synthetic
/// white variants.
pub fn extract_palette(document: &Value) -> Result<BTreeMap<String, String>> {
    let Some(entries) = document.as_object() else {
        return Err(SyncError::invalid("token document must be a JSON object"));
    };

    let mut palette = BTreeMap::new();
    for (key, value) in entries {
        if !key.starts_with(PALETTE_PREFIX) {
            continue;
        }
        let Some(text) = value.as_str() else {
            return Err(SyncError::NonStringValue { key: key.clone() });
        };
        palette.insert(key.clone(), text.to_string());
    }

    for key in SYNTHETIC_TOKENS {
        palette.insert(key.to_string(), SYNTHETIC_VALUE.to_string());
    }

    tracing::debug!(
        upstream = entries.len(),
        palette = palette.len(),
        "extracted palette entries"
    );
    Ok(palette)
}

/// Parses every entry in key order. The first malformed entry aborts.
pub fn parse_tokens(raw: &BTreeMap<String, String>) -> Result<Vec<ColorToken>> {
    raw.iter()
        .map(|(key, value)| ColorToken::parse(key, value))
        .collect()
}
