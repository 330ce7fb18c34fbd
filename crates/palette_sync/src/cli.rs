use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::{Value, json};

use crate::discover::resolve_output_dir;
use crate::error::Result;
use crate::sync::{ArtifactSink, Artifacts, CheckSink, SyncOutcome, WriteSink, compute_artifacts};
use crate::upstream::{DEFAULT_TOKENS_URL, TokenSource, load_raw_tokens, parse_tokens};
use crate::util::{OutputIntegration, now_utc_iso, output_for};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "palette_sync",
    about = "Regenerate color assets and sources from upstream design tokens",
    version
)]
pub struct Cli {
    /// Directory containing the generated color sources. Discovered from
    /// --search-root when omitted.
    pub output_dir: Option<PathBuf>,

    /// Compare generated sources with the files on disk without writing.
    #[arg(long = "check-only")]
    pub check_only: bool,

    #[arg(long, default_value = DEFAULT_TOKENS_URL)]
    pub url: String,

    /// Read the token document from a local JSON file instead of fetching it.
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long = "search-root", default_value = ".")]
    pub search_root: PathBuf,

    #[arg(long = "timeout", default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    Generate,
    CheckOnly,
}

impl SyncMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generate => "generate",
            Self::CheckOnly => "check-only",
        }
    }

    #[must_use]
    pub fn sink(self) -> &'static dyn ArtifactSink {
        match self {
            Self::Generate => &WriteSink,
            Self::CheckOnly => &CheckSink,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub output_dir: Option<PathBuf>,
    pub search_root: PathBuf,
    pub source: TokenSource,
    pub mode: SyncMode,
}

impl From<Cli> for SyncConfig {
    fn from(cli: Cli) -> Self {
        let source = match cli.input {
            Some(path) => TokenSource::File(path),
            None => TokenSource::Remote {
                url: cli.url,
                timeout_seconds: cli.timeout_seconds,
            },
        };
        Self {
            output_dir: cli.output_dir,
            search_root: cli.search_root,
            source,
            mode: if cli.check_only {
                SyncMode::CheckOnly
            } else {
                SyncMode::Generate
            },
        }
    }
}

pub fn run_from_env() -> Result<SyncOutcome> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<SyncOutcome> {
    run_sync(cli.into())
}

/// Resolves the output directory, loads and validates every token, then
/// applies the computed artifacts. Nothing on disk changes until all input
/// has been validated.
pub fn run_sync(config: SyncConfig) -> Result<SyncOutcome> {
    let integration = OutputIntegration::detect();
    let ui = output_for(&integration);

    ui.rule(Some("palette_sync"));
    let output_dir = resolve_output_dir(config.output_dir.as_deref(), &config.search_root)?;
    ui.info(&format!("output_dir={}", output_dir.display()));

    let raw = load_raw_tokens(&config.source)?;
    let tokens = parse_tokens(&raw)?;
    let artifacts = compute_artifacts(&tokens);
    ui.info(&format!(
        "tokens={} groups={}",
        artifacts.token_count,
        artifacts.groups.len()
    ));

    let outcome = config.mode.sink().apply(&output_dir, &artifacts)?;
    match &outcome {
        SyncOutcome::Generated { files_written } => {
            ui.success(&format!("wrote {files_written} files"));
        }
        SyncOutcome::UpToDate => ui.success("color sources are up to date"),
        SyncOutcome::Drifted { files } => {
            for file in files {
                ui.warning(&format!("out of date: {}", file.path.display()));
            }
        }
    }

    if integration.should_emit_json() {
        println!(
            "{}",
            summary_payload(config.mode, &output_dir, &artifacts, &outcome)
        );
    }

    Ok(outcome)
}

fn summary_payload(
    mode: SyncMode,
    output_dir: &Path,
    artifacts: &Artifacts,
    outcome: &SyncOutcome,
) -> Value {
    json!({
        "command": "palette_sync",
        "mode": mode.as_str(),
        "outcome": outcome,
        "exit_code": outcome.exit_code(),
        "tokens": artifacts.token_count,
        "groups": artifacts.groups,
        "output_dir": output_dir.display().to_string(),
        "generated_at": now_utc_iso(),
    })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::Parser;

    use super::{Cli, SyncConfig, SyncMode, run, summary_payload};
    use crate::error::SyncError;
    use crate::sync::{SyncOutcome, compute_artifacts};
    use crate::token::ColorToken;
    use crate::upstream::{DEFAULT_TOKENS_URL, TokenSource};

    #[test]
    fn defaults_select_remote_generate_mode() {
        let cli = Cli::parse_from(["palette_sync"]);
        let config = SyncConfig::from(cli);
        assert_eq!(config.mode, SyncMode::Generate);
        assert_eq!(config.output_dir, None);
        assert_eq!(config.search_root, PathBuf::from("."));
        assert_eq!(
            config.source,
            TokenSource::Remote {
                url: DEFAULT_TOKENS_URL.to_string(),
                timeout_seconds: 30,
            }
        );
    }

    #[test]
    fn positional_path_and_check_flag_are_parsed() {
        let cli = Cli::parse_from([
            "palette_sync",
            "Sources/Colors",
            "--check-only",
            "--input",
            "tokens.json",
        ]);
        let config = SyncConfig::from(cli);
        assert_eq!(config.mode, SyncMode::CheckOnly);
        assert_eq!(config.output_dir, Some(PathBuf::from("Sources/Colors")));
        assert_eq!(config.source, TokenSource::File(PathBuf::from("tokens.json")));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["palette_sync", "--timeout", "0"]).is_err());
    }

    #[test]
    fn missing_output_dir_fails_before_loading_tokens() {
        let result = run(Cli {
            output_dir: Some(PathBuf::from("/tmp/palette_sync/does-not-exist")),
            check_only: false,
            url: DEFAULT_TOKENS_URL.to_string(),
            input: Some(PathBuf::from("/tmp/palette_sync/also-missing.json")),
            search_root: PathBuf::from("."),
            timeout_seconds: 30,
        });

        match result.expect_err("missing output dir should fail") {
            SyncError::MissingPath { path } => {
                assert_eq!(path, PathBuf::from("/tmp/palette_sync/does-not-exist"));
            }
            other => panic!("expected MissingPath, got {other}"),
        }
    }

    #[test]
    fn summary_payload_contains_expected_machine_fields() {
        let tokens = vec![ColorToken::parse("paletteBlueDark", "rgb(1, 95, 181)").expect("token")];
        let artifacts = compute_artifacts(&tokens);
        let payload = summary_payload(
            SyncMode::CheckOnly,
            Path::new("/tmp/colors"),
            &artifacts,
            &SyncOutcome::UpToDate,
        );
        assert_eq!(payload["command"], "palette_sync");
        assert_eq!(payload["mode"], "check-only");
        assert_eq!(payload["outcome"]["status"], "up_to_date");
        assert_eq!(payload["exit_code"], 0);
        assert_eq!(payload["tokens"], 1);
        assert_eq!(payload["groups"][0], "Blue");
        assert_eq!(payload["output_dir"], "/tmp/colors");
        assert!(payload["generated_at"].is_string());

        let mut keys: Vec<&str> = payload
            .as_object()
            .expect("summary object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "command",
                "exit_code",
                "generated_at",
                "groups",
                "mode",
                "outcome",
                "output_dir",
                "tokens",
            ]
        );
    }
}
