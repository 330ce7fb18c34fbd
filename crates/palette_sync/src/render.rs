//! Fixed text layouts of the generated files.

use crate::token::ColorToken;

pub const CONTENTS_FILE_NAME: &str = "Contents.json";
pub const ASSET_CATALOG_NAME: &str = "Colors.xcassets";

/// Name of the design system, used in generated doc comments.
pub const LIBRARY_NAME: &str = "Orbit";

/// Generator named in the source module header. Must match the header of the
/// committed sources, which check-only mode compares byte for byte.
pub const GENERATOR_LABEL: &str = "Automation/update_colors.py";

/// Folder-level `Contents.json` of the asset catalog and of each group.
pub const ASSET_INFO: &str = r#"{
  "info" : {
    "author" : "xcode",
    "version" : 1
  }
}
"#;

/// One generated source module wrapping every color constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceTemplate {
    pub file_name: &'static str,
    pub framework: &'static str,
    pub extended_type: &'static str,
    /// Text before and after the description in each constant's initializer.
    pub initializer: (&'static str, &'static str),
}

/// Value-type colors resolved from the asset catalog bundle.
pub const SWIFTUI_SOURCE: SourceTemplate = SourceTemplate {
    file_name: "Colors.swift",
    framework: "SwiftUI",
    extended_type: "Color",
    initializer: ("Color(\"", "\", bundle: .current)"),
};

/// Reference-type colors loaded as named resources.
pub const UIKIT_SOURCE: SourceTemplate = SourceTemplate {
    file_name: "UIColors.swift",
    framework: "UIKit",
    extended_type: "UIColor",
    initializer: ("fromResource(named: \"", "\")"),
};

pub const SOURCE_TEMPLATES: [SourceTemplate; 2] = [SWIFTUI_SOURCE, UIKIT_SOURCE];

impl SourceTemplate {
    #[must_use]
    pub fn group_header(&self, group: &str) -> String {
        format!("\n    // MARK: - {group}")
    }

    #[must_use]
    pub fn constant(&self, token: &ColorToken) -> String {
        let (open, close) = self.initializer;
        format!(
            "    /// {LIBRARY_NAME} {description} color.\n    static let {name} = {open}{description}{close}",
            description = token.description,
            name = token.name,
        )
    }

    /// Renders the whole module. `tokens` must already be in output order.
    #[must_use]
    pub fn render(&self, tokens: &[ColorToken]) -> String {
        let mut lines = Vec::with_capacity(tokens.len() * 2);
        let mut last_group: Option<&str> = None;

        for token in tokens {
            if last_group != Some(token.group.as_str()) {
                lines.push(self.group_header(&token.group));
                last_group = Some(token.group.as_str());
            }
            lines.push(self.constant(token));
        }

        format!(
            "import {framework}\n\n// Generated by '{GENERATOR_LABEL}'\npublic extension {extended_type} {{\n{body}\n}}\n",
            framework = self.framework,
            extended_type = self.extended_type,
            body = lines.join("\n"),
        )
    }
}

/// Colorset `Contents.json` with the light entry and the dark-appearance
/// entry.
#[must_use]
pub fn render_colorset(token: &ColorToken) -> String {
    let [r, g, b] = token.light.hex_channels();
    let [dr, dg, db] = token.dark.hex_channels();
    format!(
        r#"{{
  "colors" : [
    {{
      "color" : {{
        "color-space" : "srgb",
        "components" : {{
          "alpha" : "1.000",
          "blue" : "0x{b}",
          "green" : "0x{g}",
          "red" : "0x{r}"
        }}
      }},
      "idiom" : "universal"
    }},
    {{
      "appearances" : [
        {{
          "appearance" : "luminosity",
          "value" : "dark"
        }}
      ],
      "color" : {{
        "color-space" : "srgb",
        "components" : {{
          "alpha" : "1.000",
          "blue" : "0x{db}",
          "green" : "0x{dg}",
          "red" : "0x{dr}"
        }}
      }},
      "idiom" : "universal"
    }}
  ],
  "info" : {{
    "author" : "xcode",
    "version" : 1
  }}
}}
"#
    )
}
