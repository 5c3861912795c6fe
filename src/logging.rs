use std::{fs, path::Path};

use miette::{miette, Context, IntoDiagnostic, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};


/// Initializes a global tracing subscriber that logs to stderr
/// (stdout is reserved for the resolved configuration) and,
/// if `log_file_output_directory` is set, to `log_file_name` inside it.
///
/// The returned guard flushes the file logger when dropped,
/// so it needs to be kept alive until the program exits.
pub fn initialize_tracing<P, S>(
    console_level_filter: EnvFilter,
    log_file_level_filter: EnvFilter,
    log_file_output_directory: Option<P>,
    log_file_name: S,
) -> Result<Option<WorkerGuard>>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_level_filter);

    let Some(log_file_output_directory) = log_file_output_directory else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .into_diagnostic()
            .wrap_err("Failed to initialize tracing subscriber.")?;

        return Ok(None);
    };


    let log_file_output_directory = log_file_output_directory.as_ref();
    if !log_file_output_directory.exists() {
        fs::create_dir_all(log_file_output_directory)
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Failed to create missing log file output directory at {}.",
                    log_file_output_directory.display()
                )
            })?;
    }

    let file_appender =
        tracing_appender::rolling::never(log_file_output_directory, log_file_name.as_ref());
    let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file_writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(log_file_level_filter);


    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to initialize tracing subscriber.")?;

    Ok(Some(guard))
}
