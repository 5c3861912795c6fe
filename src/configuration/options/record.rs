use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::values::{lenient, lenient_optional_string, NestedList};
use crate::configuration::{
    errors::ConfigurationError,
    traits::ResolvableConfigurationWithContext,
};


#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UnresolvedRecordOptions {
    #[serde(deserialize_with = "lenient_optional_string")]
    dir: Option<String>,

    /// Record only when one of these keys changes value.
    keys: NestedList,

    #[serde(deserialize_with = "lenient")]
    init_recording_state: bool,

    #[serde(deserialize_with = "lenient_optional_string")]
    filename: Option<String>,

    #[serde(deserialize_with = "lenient")]
    off: bool,
}

impl Default for UnresolvedRecordOptions {
    fn default() -> Self {
        Self {
            dir: None,
            keys: NestedList::default(),
            init_recording_state: true,
            filename: None,
            off: true,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RecordOptions {
    /// Existing, canonical directory recordings are written to.
    /// Always `Some` while recording is enabled.
    pub dir: Option<PathBuf>,

    pub diff_keys: Vec<String>,

    pub init_recording_state: bool,

    pub filename: Option<String>,

    pub off: bool,
}

impl ResolvableConfigurationWithContext for UnresolvedRecordOptions {
    type Resolved = RecordOptions;
    /// Working directory, used when no record directory is given.
    type Context = PathBuf;
    type Error = ConfigurationError;

    fn resolve(self, context: Self::Context) -> Result<Self::Resolved, Self::Error> {
        if self.off {
            return Ok(RecordOptions {
                dir: None,
                diff_keys: Vec::new(),
                init_recording_state: self.init_recording_state,
                filename: self.filename,
                off: true,
            });
        }


        let directory = match self.dir.filter(|dir| !dir.is_empty()) {
            Some(dir) => context.join(dir),
            None => context,
        };

        if !directory.exists() {
            return Err(ConfigurationError::RecordDirectoryMissing { directory });
        }

        if !directory.is_dir() {
            return Err(ConfigurationError::RecordDirectoryNotADirectory { directory });
        }

        let directory = dunce::canonicalize(&directory)
            .map_err(|_| ConfigurationError::RecordDirectoryMissing { directory })?;

        debug!(directory = %directory.display(), "Recording enabled.");


        Ok(RecordOptions {
            dir: Some(directory),
            diff_keys: self.keys.flatten(),
            init_recording_state: self.init_recording_state,
            filename: self.filename,
            off: false,
        })
    }
}
