//! CLI argument definitions

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Yamelinno - layered YAML to installer script compiler
#[derive(Parser, Debug)]
#[command(
    name = "yamelinno",
    about = "Compile layered YAML templates into an installer script",
    version,
    disable_version_flag = true,
    after_help = "Templates are searched in YAMELINNO_TEMPLATES and schemas in YAMELINNO_SCHEMAS (colon-separated)"
)]
pub struct Cli {
    /// Entry template to compile
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output destination
    #[arg(short, long, default_value = "stdout", help = "Output file, or 'stdout'")]
    pub output: Output,

    /// Schema file; defaults to the configured schema file next to the input
    #[arg(short, long, help = "Path to schema file")]
    pub schema: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log filter for standard error (e.g. debug, yamelinno=trace)
    #[arg(short, long, help = "Log level (default: warn, or RUST_LOG)")]
    pub log_level: Option<String>,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

/// Where the rendered document goes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Output {
    #[default]
    Stdout,
    File(PathBuf),
}

impl std::str::FromStr for Output {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("Output path cannot be empty".to_string()),
            "stdout" | "-" => Ok(Self::Stdout),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => write!(f, "stdout"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
