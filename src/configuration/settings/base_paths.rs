use std::{collections::HashMap, path::PathBuf};

use miette::{miette, Context, IntoDiagnostic, Result};
use serde::Deserialize;

use crate::configuration::traits::ResolvableConfigurationWithContext;


#[derive(Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
pub(super) struct UnresolvedBasePathsSettings {
    pub(crate) base_config_directory: String,
}

impl Default for UnresolvedBasePathsSettings {
    fn default() -> Self {
        Self {
            base_config_directory: "configs".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BasePathsSettings {
    /// Directory that is searched first for JSON option files.
    /// It may not exist, in which case lookups simply skip it.
    pub base_config_directory: PathBuf,
}

impl ResolvableConfigurationWithContext for UnresolvedBasePathsSettings {
    type Resolved = BasePathsSettings;
    type Context = PathBuf;
    type Error = miette::Report;

    /// `context` is the directory relative paths are resolved against
    /// (the settings file's parent directory, or the working directory).
    fn resolve(self, context: Self::Context) -> Result<Self::Resolved> {
        let base_config_directory = context.join(self.base_config_directory);

        if base_config_directory.exists() && !base_config_directory.is_dir() {
            return Err(miette!(
                "Base configuration directory path exists, but is not a directory!"
            ));
        }

        if !base_config_directory.is_dir() {
            return Ok(BasePathsSettings {
                base_config_directory,
            });
        }


        let base_config_directory = dunce::canonicalize(base_config_directory)
            .into_diagnostic()
            .wrap_err("Failed to canonicalize base configuration directory path.")?;


        Ok(BasePathsSettings {
            base_config_directory,
        })
    }
}


impl BasePathsSettings {
    pub fn placeholders_map(&self) -> HashMap<&'static str, String> {
        let mut placeholders_map = HashMap::with_capacity(1);

        placeholders_map.insert(
            "{BASE_CONFIG_DIRECTORY}",
            self.base_config_directory.to_string_lossy().to_string(),
        );

        placeholders_map
    }
}
