//! Almanac CLI library
//!
//! This module contains the core CLI logic for the Almanac timeline tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, ViewArg};

use std::fs;

use log::info;

use almanac::{AlmanacError, TimelineBuilder, View, identifier::Id, layout::EntitySelection};

/// Run the Almanac CLI application
///
/// This function reads the input table, lays out the requested view and
/// writes the JSON payload to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `AlmanacError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Table and column errors
/// - A timeline with no timed events
/// - Export errors
pub fn run(args: &Args) -> Result<(), AlmanacError> {
    let view = View::from(args.view);
    let output = args.output_path();
    info!(
        input_path = args.input,
        output_path = output,
        view:% = view;
        "Processing timeline"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let selection = if args.select.is_empty() {
        EntitySelection::All
    } else {
        EntitySelection::only(args.select.iter().map(|name| Id::new(name)))
    };

    let builder = TimelineBuilder::new(app_config);
    let json = builder.render_json(&source, view, &selection)?;

    fs::write(&output, json)?;

    info!(output_file = output; "Timeline exported successfully");

    Ok(())
}
