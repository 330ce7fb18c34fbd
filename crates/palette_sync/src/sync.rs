//! Artifact computation and the two ways of applying it to an output
//! directory.
//!
//! [`compute_artifacts`] is pure: it turns the parsed tokens into the full set
//! of file contents. An [`ArtifactSink`] then either writes that set
//! ([`WriteSink`]) or compares it with what is on disk ([`CheckSink`]).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::render::{
    ASSET_CATALOG_NAME, ASSET_INFO, CONTENTS_FILE_NAME, SOURCE_TEMPLATES, render_colorset,
};
use crate::token::ColorToken;
use crate::util::{read_optional, remove_dir_if_exists, sha256_hex, write_string};

/// Exit status reported when check-only mode finds stale sources.
pub const DRIFT_EXIT_CODE: i32 = 1;

/// A generated file, addressed relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    pub path: PathBuf,
    pub contents: String,
}

impl ArtifactFile {
    fn new(path: PathBuf, contents: String) -> Self {
        Self { path, contents }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Group names in first-seen order.
    pub groups: Vec<String>,
    pub token_count: usize,
    /// Every `Contents.json` of the asset catalog, catalog root first.
    pub manifest: Vec<ArtifactFile>,
    pub sources: Vec<ArtifactFile>,
}

impl Artifacts {
    #[must_use]
    pub fn asset_root() -> PathBuf {
        PathBuf::from(ASSET_CATALOG_NAME)
    }
}

/// Builds every generated file for `tokens`. Tokens are ordered by raw key
/// first, whatever order they arrive in.
#[must_use]
pub fn compute_artifacts(tokens: &[ColorToken]) -> Artifacts {
    let mut sorted = tokens.to_vec();
    sorted.sort_by(|a, b| a.raw_key.cmp(&b.raw_key));

    let asset_root = Artifacts::asset_root();
    let mut groups: Vec<String> = Vec::new();
    let mut manifest = vec![ArtifactFile::new(
        asset_root.join(CONTENTS_FILE_NAME),
        ASSET_INFO.to_string(),
    )];

    for token in &sorted {
        let group_dir = asset_root.join(&token.group);
        if !groups.contains(&token.group) {
            manifest.push(ArtifactFile::new(
                group_dir.join(CONTENTS_FILE_NAME),
                ASSET_INFO.to_string(),
            ));
            groups.push(token.group.clone());
        }
        manifest.push(ArtifactFile::new(
            group_dir
                .join(format!("{}.colorset", token.description))
                .join(CONTENTS_FILE_NAME),
            render_colorset(token),
        ));
    }

    let sources = SOURCE_TEMPLATES
        .iter()
        .map(|template| {
            ArtifactFile::new(PathBuf::from(template.file_name), template.render(&sorted))
        })
        .collect();

    Artifacts {
        groups,
        token_count: sorted.len(),
        manifest,
        sources,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftedFile {
    pub path: PathBuf,
    pub expected_sha256: String,
    /// `None` when the file is missing.
    pub actual_sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    Generated { files_written: usize },
    UpToDate,
    Drifted { files: Vec<DriftedFile> },
}

impl SyncOutcome {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Drifted { .. } => DRIFT_EXIT_CODE,
            Self::Generated { .. } | Self::UpToDate => 0,
        }
    }

    #[must_use]
    pub fn is_drifted(&self) -> bool {
        matches!(self, Self::Drifted { .. })
    }
}

/// Where computed artifacts go.
pub trait ArtifactSink {
    fn apply(&self, output_dir: &Path, artifacts: &Artifacts) -> Result<SyncOutcome>;
}

/// Rebuilds the asset catalog from scratch and rewrites both source modules.
/// Not transactional; rerunning after a failure restores a consistent tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteSink;

impl ArtifactSink for WriteSink {
    fn apply(&self, output_dir: &Path, artifacts: &Artifacts) -> Result<SyncOutcome> {
        let asset_root = output_dir.join(Artifacts::asset_root());
        remove_dir_if_exists(&asset_root)?;

        for file in artifacts.manifest.iter().chain(&artifacts.sources) {
            write_string(&output_dir.join(&file.path), &file.contents)?;
        }

        let files_written = artifacts.manifest.len() + artifacts.sources.len();
        tracing::info!(
            output_dir = %output_dir.display(),
            files_written,
            "regenerated color artifacts"
        );
        Ok(SyncOutcome::Generated { files_written })
    }
}

/// Compares the source modules with the files on disk. Never writes. The
/// asset catalog is not compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckSink;

impl ArtifactSink for CheckSink {
    fn apply(&self, output_dir: &Path, artifacts: &Artifacts) -> Result<SyncOutcome> {
        let mut drifted = Vec::new();

        for file in &artifacts.sources {
            let actual = read_optional(&output_dir.join(&file.path))?;
            if actual.as_deref() == Some(file.contents.as_str()) {
                continue;
            }
            tracing::debug!(path = %file.path.display(), "source module drifted");
            drifted.push(DriftedFile {
                path: file.path.clone(),
                expected_sha256: sha256_hex(file.contents.as_bytes()),
                actual_sha256: actual.map(|content| sha256_hex(content.as_bytes())),
            });
        }

        tracing::info!(
            output_dir = %output_dir.display(),
            drifted = drifted.len(),
            "checked color sources"
        );
        if drifted.is_empty() {
            Ok(SyncOutcome::UpToDate)
        } else {
            Ok(SyncOutcome::Drifted { files: drifted })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::tempdir;
    use tracing_test::traced_test;

    use super::{
        ArtifactSink, CheckSink, DRIFT_EXIT_CODE, SyncOutcome, WriteSink, compute_artifacts,
    };
    use crate::token::ColorToken;

    fn tokens() -> Vec<ColorToken> {
        [
            ("paletteRedNormal", "rgb(210, 28, 28)"),
            ("paletteBlueDark", "rgb(1, 95, 181)"),
            ("paletteWhite", "rgb(255, 255, 255)"),
            ("paletteBlueNormal", "rgb(1, 118, 210)"),
        ]
        .into_iter()
        .map(|(key, value)| ColorToken::parse(key, value).expect("token"))
        .collect()
    }

    #[test]
    fn artifacts_are_sorted_by_raw_key_with_first_seen_groups() {
        let artifacts = compute_artifacts(&tokens());
        assert_eq!(artifacts.groups, ["Blue", "Red", "White"]);
        assert_eq!(artifacts.token_count, 4);

        let source = &artifacts.sources[0].contents;
        let blue_dark = source.find("blueDark").expect("blueDark");
        let blue_normal = source.find("blueNormal").expect("blueNormal");
        let red = source.find("redNormal").expect("redNormal");
        assert!(blue_dark < blue_normal && blue_normal < red);
        assert_eq!(source.matches("// MARK: - Blue").count(), 1);
        assert!(source.contains("static let whiteNormal = Color(\"White\", bundle: .current)"));
    }

    #[test]
    fn manifest_lists_root_group_and_colorset_files() {
        let artifacts = compute_artifacts(&tokens());
        let paths: Vec<PathBuf> = artifacts
            .manifest
            .iter()
            .map(|file| file.path.clone())
            .collect();

        let root = Path::new("Colors.xcassets");
        assert_eq!(paths[0], root.join("Contents.json"));
        assert!(paths.contains(&root.join("Blue/Contents.json")));
        assert!(paths.contains(&root.join("Blue/Blue Dark.colorset/Contents.json")));
        assert!(paths.contains(&root.join("White/White.colorset/Contents.json")));
        // root + 3 groups + 4 colorsets
        assert_eq!(paths.len(), 8);
    }

    #[test]
    fn sources_cover_both_color_apis() {
        let artifacts = compute_artifacts(&tokens());
        let names: Vec<PathBuf> = artifacts.sources.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            names,
            [PathBuf::from("Colors.swift"), PathBuf::from("UIColors.swift")]
        );
    }

    #[test]
    fn input_order_does_not_change_output() {
        let mut reversed = tokens();
        reversed.reverse();
        assert_eq!(compute_artifacts(&tokens()), compute_artifacts(&reversed));
    }

    #[test]
    fn group_header_is_emitted_once_per_group() {
        let tokens: Vec<ColorToken> = [
            ("paletteAaa", "rgb(1, 1, 1)"),
            ("paletteAaaBbb", "rgb(1, 1, 1)"),
            ("paletteAab", "rgb(1, 1, 1)"),
        ]
        .into_iter()
        .map(|(key, value)| ColorToken::parse(key, value).expect("token"))
        .collect();

        let artifacts = compute_artifacts(&tokens);
        assert_eq!(artifacts.groups, ["Aaa", "Aab"]);
        assert_eq!(artifacts.sources[0].contents.matches("// MARK: - Aaa").count(), 1);
    }

    #[test]
    fn write_then_check_is_up_to_date() {
        let dir = tempdir().expect("tempdir");
        let artifacts = compute_artifacts(&tokens());

        let written = WriteSink.apply(dir.path(), &artifacts).expect("write");
        assert_eq!(written, SyncOutcome::Generated { files_written: 10 });

        let checked = CheckSink.apply(dir.path(), &artifacts).expect("check");
        assert_eq!(checked, SyncOutcome::UpToDate);
        assert_eq!(checked.exit_code(), 0);
    }

    #[test]
    fn write_sink_removes_stale_colorsets() {
        let dir = tempdir().expect("tempdir");
        let stale = dir.path().join("Colors.xcassets/Old/Old.colorset");
        fs::create_dir_all(&stale).expect("stale dir");

        WriteSink
            .apply(dir.path(), &compute_artifacts(&tokens()))
            .expect("write");
        assert!(!dir.path().join("Colors.xcassets/Old").exists());
    }

    #[test]
    #[traced_test]
    fn check_reports_missing_and_modified_sources_without_writing() {
        let dir = tempdir().expect("tempdir");
        let artifacts = compute_artifacts(&tokens());
        fs::write(dir.path().join("Colors.swift"), "stale").expect("write stale");

        let outcome = CheckSink.apply(dir.path(), &artifacts).expect("check");
        let SyncOutcome::Drifted { files } = &outcome else {
            panic!("expected drift, got {outcome:?}");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("Colors.swift"));
        assert!(files[0].actual_sha256.is_some());
        assert_eq!(files[1].path, PathBuf::from("UIColors.swift"));
        assert!(files[1].actual_sha256.is_none());
        assert_eq!(outcome.exit_code(), DRIFT_EXIT_CODE);

        assert!(!dir.path().join("Colors.xcassets").exists());
        assert!(!dir.path().join("UIColors.swift").exists());
        assert!(logs_contain("source module drifted"));
    }

    #[test]
    fn check_ignores_manifest_tree() {
        let dir = tempdir().expect("tempdir");
        let artifacts = compute_artifacts(&tokens());
        WriteSink.apply(dir.path(), &artifacts).expect("write");
        fs::write(dir.path().join("Colors.xcassets/Contents.json"), "tampered").expect("tamper");

        assert_eq!(
            CheckSink.apply(dir.path(), &artifacts).expect("check"),
            SyncOutcome::UpToDate
        );
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let value = serde_json::to_value(SyncOutcome::UpToDate).expect("json");
        assert_eq!(value["status"], "up_to_date");
    }
}
