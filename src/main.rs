use std::env::current_dir;

use clap::Parser;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::{debug, info};

use crate::{
    cli::CLIArgs,
    configuration::{resolve_configuration, ResolutionContext, Settings},
    logging::initialize_tracing,
};

mod cli;
mod configuration;
mod logging;


pub const LOG_FILE_NAME: &str = "nicelogcat.log";


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    // Load settings.
    let settings = match cli_args.settings_file_path.as_ref() {
        Some(path) => Settings::load_from_path(path),
        None => Settings::load_from_default_path(),
    }
    .wrap_err("Failed to load settings file.")?;


    let logging_raii_guard = initialize_tracing(
        settings.logging.console_output_level_filter(),
        settings.logging.log_file_output_level_filter(),
        settings.logging.log_file_output_directory.as_ref(),
        LOG_FILE_NAME,
    )
    .wrap_err("Failed to initialize tracing.")?;

    match settings.file_path.as_ref() {
        Some(path) => info!(path = %path.display(), "Settings loaded."),
        None => info!("No settings file found, using built-in settings."),
    }


    let request = cli_args.configuration_request(settings.base_paths.base_config_directory.clone())?;

    if cli_args.list_configs {
        let available_files = request
            .available_files()
            .wrap_err("Failed to list option files.")?;

        println!("{available_files}");

        drop(logging_raii_guard);
        return Ok(());
    }

    debug!(
        files = request.file_references.len(),
        trailing_tokens = request.trailing_tokens.len(),
        "Resolving configuration."
    );


    let working_directory = current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))?;

    let resolved_configuration = resolve_configuration(
        request,
        &ResolutionContext { working_directory },
    )
    .wrap_err("Failed to resolve configuration.")?;

    let serialized_configuration = serde_json::to_string_pretty(&resolved_configuration)
        .into_diagnostic()
        .wrap_err("Failed to serialize resolved configuration.")?;

    println!("{serialized_configuration}");


    drop(logging_raii_guard);
    Ok(())
}
