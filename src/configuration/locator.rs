//! Finding and loading JSON option files.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use super::errors::{ConfigurationError, JsonFileListing};


const JSON_SUFFIX: &str = ".json";


/// Finds an option file by path or by name.
///
/// An existing file path is returned as-is. Otherwise every search directory
/// is tried in order, first with the name verbatim and then with `.json`
/// appended. If nothing matches, the error lists every JSON file under the
/// search directories.
pub fn locate(
    name_or_path: &str,
    search_directories: &[PathBuf],
) -> Result<PathBuf, ConfigurationError> {
    let direct_path = Path::new(name_or_path);
    if direct_path.is_file() {
        return Ok(direct_path.to_path_buf());
    }

    for directory in search_directories {
        let candidate = directory.join(name_or_path);
        trace!(candidate = %candidate.display(), "Trying configuration file candidate.");

        if candidate.is_file() {
            return Ok(candidate);
        }

        let candidate_with_suffix = with_json_suffix(candidate);
        trace!(candidate = %candidate_with_suffix.display(), "Trying configuration file candidate.");

        if candidate_with_suffix.is_file() {
            return Ok(candidate_with_suffix);
        }
    }


    Err(ConfigurationError::ConfigNotFound {
        requested: name_or_path.to_string(),
        available: list_json_files(search_directories),
    })
}

fn with_json_suffix(path: PathBuf) -> PathBuf {
    let mut path = path.into_os_string();
    path.push(JSON_SUFFIX);
    PathBuf::from(path)
}


/// Every `*.json` file anywhere under the search directories, relative to the
/// directory it was found in, sorted lexicographically.
/// Directories that do not exist are skipped; entries that cannot be read
/// (e.g. symlink loops) are skipped with a warning.
pub fn list_json_files(search_directories: &[PathBuf]) -> JsonFileListing {
    let mut json_files = Vec::new();

    for directory in search_directories {
        if !directory.is_dir() {
            continue;
        }

        let entries = WalkDir::new(directory)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(error) => {
                    warn!(
                        directory = %directory.display(),
                        "Skipping unreadable entry while listing option files: {error}"
                    );
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension().is_some_and(|extension| extension == "json"));

        for entry in entries {
            let relative_path = entry
                .path()
                .strip_prefix(directory)
                .unwrap_or(entry.path());

            json_files.push(relative_path.to_string_lossy().to_string());
        }
    }

    json_files.sort();
    JsonFileListing(json_files)
}


/// Reads an option file, which has to contain a JSON object.
pub fn load_json_object(path: &Path) -> Result<Map<String, Value>, ConfigurationError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigurationError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value =
        serde_json::from_str(&contents).map_err(|source| ConfigurationError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "Loaded configuration file.");

    match value {
        Value::Object(object) => Ok(object),
        _ => Err(ConfigurationError::NotAnObject {
            origin: path.display().to_string(),
        }),
    }
}
