#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod render;

use args::{Args, Command, Format};
use clap::Parser;
use faultline_config::Config;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Initialize logging
    faultline_telemetry::init(&config.log, args.log_filter.as_deref())?;

    tracing::debug!(
        config_path = ?args.config.as_deref().map(std::path::Path::display),
        overrides = config.codes.len(),
        "building error code registry"
    );

    // Duplicate or reserved codes abort here, before any command runs
    let registry = faultline_code::build_registry(&config.codes)?;

    let output = match args.command {
        Command::Codes { format } => {
            let rows = render::rows(&registry);
            match format {
                Format::Table => render::table(&rows)?,
                Format::Markdown => render::markdown(&rows)?,
                Format::Json => render::json(&rows)? + "\n",
            }
        }
        Command::Explain { code } => render::explain(&registry, code)?,
    };

    print!("{output}");
    Ok(())
}
