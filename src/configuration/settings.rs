//! Settings of the tool itself (where option files live, how to log),
//! as opposed to the options that shape line output.

use std::fs;
use std::path::{Path, PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

pub use self::base_paths::BasePathsSettings;
use self::base_paths::UnresolvedBasePathsSettings;
pub use self::logging::LoggingSettings;
use self::logging::UnresolvedLoggingSettings;
use super::traits::ResolvableConfigurationWithContext;
use super::utilities::get_default_settings_file_path;

mod base_paths;
mod logging;



#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct UnresolvedSettings {
    /// Base paths.
    base_paths: UnresolvedBasePathsSettings,

    /// Logging-related settings.
    logging: UnresolvedLoggingSettings,
}


/// The entire settings file.
#[derive(Debug, Clone)]
pub struct Settings {
    /// This is the file path this `Settings` instance was loaded from,
    /// or `None` when the built-in settings are in use.
    pub file_path: Option<PathBuf>,

    /// Base paths
    pub base_paths: BasePathsSettings,

    /// Logging-related settings.
    pub logging: LoggingSettings,
}


pub(crate) struct SettingsOrigin {
    file_path: Option<PathBuf>,

    /// Relative paths inside the settings are resolved against this directory.
    relative_to: PathBuf,
}


impl ResolvableConfigurationWithContext for UnresolvedSettings {
    type Resolved = Settings;
    type Context = SettingsOrigin;
    type Error = miette::Report;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        let base_paths = self
            .base_paths
            .resolve(context.relative_to)
            .wrap_err("Failed to resolve base_paths table.")?;

        let logging = self
            .logging
            .resolve(base_paths.clone())
            .wrap_err("Failed to resolve logging table.")?;


        Ok(Settings {
            file_path: context.file_path,
            base_paths,
            logging,
        })
    }
}


impl Settings {
    /// Load the settings from a specific file path.
    pub fn load_from_path<S: AsRef<Path>>(settings_file_path: S) -> Result<Self> {
        // Read the settings file into memory.
        let settings_string = fs::read_to_string(settings_file_path.as_ref())
            .into_diagnostic()
            .wrap_err_with(|| {
                miette!(
                    "Could not read settings file {}.",
                    settings_file_path.as_ref().display()
                )
            })?;


        // Parse the string into the `UnresolvedSettings` structure and then resolve it.
        let unresolved_settings = toml::from_str::<UnresolvedSettings>(&settings_string)
            .into_diagnostic()
            .wrap_err("Could not load settings file!")?;


        let settings_file_path = dunce::canonicalize(settings_file_path)
            .into_diagnostic()
            .wrap_err("Could not canonicalize settings file path!")?;

        let relative_to = settings_file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let resolved_settings = unresolved_settings
            .resolve(SettingsOrigin {
                file_path: Some(settings_file_path),
                relative_to,
            })
            .wrap_err("Failed to resolve settings.")?;

        Ok(resolved_settings)
    }

    /// Load the settings from the default path (`./nicelogcat.toml`),
    /// falling back to built-in settings if there is no such file.
    pub fn load_from_default_path() -> Result<Settings> {
        let default_path = get_default_settings_file_path()
            .wrap_err_with(|| "Could not determine the default settings path.")?;

        if default_path.is_file() {
            return Settings::load_from_path(default_path);
        }

        let relative_to = default_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        UnresolvedSettings::default()
            .resolve(SettingsOrigin {
                file_path: None,
                relative_to,
            })
            .wrap_err("Failed to resolve built-in settings.")
    }
}
