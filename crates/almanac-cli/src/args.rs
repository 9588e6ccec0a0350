//! Command-line argument definitions for the Almanac CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments choose the view, input/output paths,
//! configuration file, logging verbosity and the entity filter.

use clap::{Parser, ValueEnum};

use almanac::View;

/// Which layout to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Horizontal,
    Vertical,
    Combined,
}

impl From<ViewArg> for View {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Horizontal => View::Horizontal,
            ViewArg::Vertical => View::Vertical,
            ViewArg::Combined => View::Combined,
        }
    }
}

/// Command-line arguments for the Almanac timeline tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Layout to compute
    #[arg(value_enum)]
    pub view: ViewArg,

    /// Path to the input JSON table
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file [default: timeline_<view>.json]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Restrict the vertical layout to these entities (repeatable)
    #[arg(long = "select", value_name = "ENTITY")]
    pub select: Vec<String>,
}

impl Args {
    /// The output path, falling back to `timeline_<view>.json`.
    pub fn output_path(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("timeline_{}.json", View::from(self.view)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_follows_view() {
        let args = Args::parse_from(["almanac", "vertical", "events.json"]);

        assert_eq!(args.view, ViewArg::Vertical);
        assert_eq!(args.output_path(), "timeline_vertical.json");
        assert!(args.select.is_empty());
    }

    #[test]
    fn test_repeated_select() {
        let args = Args::parse_from([
            "almanac", "combined", "events.json", "-o", "out.json", "--select", "Port",
            "--select", "Customs",
        ]);

        assert_eq!(args.output_path(), "out.json");
        assert_eq!(args.select, vec!["Port", "Customs"]);
    }
}
