#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let integration = palette_sync::util::OutputIntegration::detect();
    match palette_sync::run_from_env() {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(error) => {
            if integration.should_emit_json() {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "status": "error",
                        "error": error.to_string(),
                        "exit_code": error.exit_code(),
                    })
                );
            } else {
                eprintln!("{error}");
            }
            std::process::exit(error.exit_code());
        }
    }
}
