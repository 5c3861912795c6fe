use std::{collections::HashMap, env::current_dir, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};


/// Name of the settings file looked up in the current directory
/// when `--settings-file-path` is not given.
pub const DEFAULT_SETTINGS_FILE_NAME: &str = "nicelogcat.toml";


/// Returns the default settings filepath, which is at
/// `{current directory}/nicelogcat.toml`.
///
/// Unlike an explicitly provided path, this one is allowed to not exist;
/// the caller falls back to built-in settings in that case.
pub fn get_default_settings_file_path() -> Result<PathBuf> {
    let mut settings_file_path = current_dir()
        .into_diagnostic()
        .wrap_err_with(|| miette!("Could not get the current directory."))?;
    settings_file_path.push(DEFAULT_SETTINGS_FILE_NAME);

    Ok(settings_file_path)
}

#[must_use = "function returns the modified path"]
pub fn replace_placeholders_in_path<S>(
    original_path: S,
    placeholders: HashMap<&'static str, String>,
) -> PathBuf
where
    S: Into<String>,
{
    let mut path_string: String = original_path.into();

    for (key, value) in placeholders.into_iter() {
        path_string = path_string.replace(key, &value);
    }

    PathBuf::from(path_string)
}
