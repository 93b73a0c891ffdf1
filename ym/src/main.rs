//! Yamelinno - layered YAML to installer script compiler
//!
//! CLI entry point: compiles one entry template to standard output or a file.

use std::fs;
use std::io::{self, Write};

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use yamelinno::cli::{Cli, Output};
use yamelinno::config::Config;
use yamelinno::{Pipeline, ProcessEnv, default_schema_path};

fn setup_logging(level: Option<&str>) -> Result<()> {
    // Logs go to stderr so stdout only carries the rendered document
    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context(format!("Invalid log level '{}'", level))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    debug!(?config, "yamelinno loaded config");

    let schema_path = cli
        .schema
        .clone()
        .unwrap_or_else(|| default_schema_path(&cli.input, &config.schema.file_name));

    let pipeline = Pipeline::filesystem(ProcessEnv)
        .with_template_hints(config.search.template_paths())
        .with_schema_hints(config.search.schema_paths());

    let output = pipeline
        .run(&cli.input, &schema_path)
        .context(format!("Failed to compile {}", cli.input.display()))?;

    match &cli.output {
        Output::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes()).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
        Output::File(path) => {
            fs::write(path, &output).context(format!("Failed to write {}", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green(), path.display().to_string().cyan());
        }
    }

    Ok(())
}
