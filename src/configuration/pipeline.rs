//! End-to-end resolution: command-line options, option files and trailing
//! tokens in, one [`ResolvedConfig`] out.

use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::errors::{ConfigurationError, JsonFileListing};
use super::locator::{list_json_files, load_json_object, locate};
use super::merge::{merge_sources, normalize_keys};
use super::resolve::{resolve, ResolutionContext, ResolvedConfig};
use super::tokenizer::tokenize;
use super::unify::unify;


/// Everything gathered from the command line that resolution needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationRequest {
    /// Explicitly given `--group.key` options as a raw source.
    pub cli_options: Value,

    /// Option files by name or path, in the order they were given.
    pub file_references: Vec<String>,

    /// Ad-hoc `-flag value` tokens following the positional file names.
    pub trailing_tokens: Vec<String>,

    /// Searched first. Skipped if it does not exist.
    pub base_directory: Option<PathBuf>,

    /// Searched after the base directory. Every one of them has to exist.
    pub extra_directories: Vec<PathBuf>,

    /// Ignore option files and trailing tokens.
    pub no_config: bool,
}

impl Default for ConfigurationRequest {
    fn default() -> Self {
        Self {
            cli_options: Value::Object(Map::new()),
            file_references: Vec::new(),
            trailing_tokens: Vec::new(),
            base_directory: None,
            extra_directories: Vec::new(),
            no_config: false,
        }
    }
}

impl ConfigurationRequest {
    /// The base directory followed by the extra directories.
    pub fn search_directories(&self) -> Vec<PathBuf> {
        self.base_directory
            .iter()
            .chain(self.extra_directories.iter())
            .cloned()
            .collect()
    }

    fn validated_search_directories(&self) -> Result<Vec<PathBuf>, ConfigurationError> {
        if let Some(missing_directory) = self
            .extra_directories
            .iter()
            .find(|directory| !directory.is_dir())
        {
            return Err(ConfigurationError::ConfigDirectoryMissing {
                directory: missing_directory.clone(),
            });
        }

        Ok(self.search_directories())
    }

    /// Every option file visible in the search directories.
    pub fn available_files(&self) -> Result<JsonFileListing, ConfigurationError> {
        Ok(list_json_files(&self.validated_search_directories()?))
    }
}


/// Resolves a request into the final configuration.
///
/// Precedence, from lowest to highest: option files (accumulated in order),
/// trailing tokens, command-line options.
pub fn resolve_configuration(
    request: ConfigurationRequest,
    context: &ResolutionContext,
) -> Result<ResolvedConfig, ConfigurationError> {
    let cli_source = normalize_keys(request.cli_options.clone());

    let merged = if request.no_config {
        if !request.file_references.is_empty() || !request.trailing_tokens.is_empty() {
            warn!(
                files = request.file_references.len(),
                trailing_tokens = request.trailing_tokens.len(),
                "Option files and trailing arguments are ignored because of --no-cfg."
            );
        }

        merge_sources(vec![cli_source])
    } else {
        let search_directories = request.validated_search_directories()?;

        let file_source = load_file_sources(&request.file_references, &search_directories)?;
        debug!("Option files unified.");

        let trailing_source = tokenize(&request.trailing_tokens)?.into_raw_source();
        debug!("Trailing arguments tokenized.");

        merge_sources(vec![Value::Object(file_source), trailing_source, cli_source])
    };

    let Value::Object(merged) = merged else {
        return Err(ConfigurationError::NotAnObject {
            origin: "command-line options".to_string(),
        });
    };

    let resolved = resolve(merged, context)?;
    info!("Configuration resolved.");

    Ok(resolved)
}

fn load_file_sources(
    file_references: &[String],
    search_directories: &[PathBuf],
) -> Result<Map<String, Value>, ConfigurationError> {
    let mut file_sources = Vec::with_capacity(file_references.len());

    for file_reference in file_references {
        let path = locate(file_reference, search_directories)?;
        let object = load_json_object(&path)?;

        info!(path = %path.display(), "Using option file.");

        match normalize_keys(Value::Object(object)) {
            Value::Object(normalized) => file_sources.push(normalized),
            _ => {
                return Err(ConfigurationError::NotAnObject {
                    origin: path.display().to_string(),
                })
            }
        }
    }

    Ok(unify(file_sources))
}


#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::configuration::options::UNBOUNDED_PER_LINE;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn request_in(directory: &TempDir) -> ConfigurationRequest {
        ConfigurationRequest {
            cli_options: json!({}),
            base_directory: Some(directory.path().to_path_buf()),
            ..Default::default()
        }
    }

    fn write_config(directory: &TempDir, name: &str, contents: Value) {
        fs::write(directory.path().join(name), contents.to_string()).unwrap();
    }

    #[test]
    fn cli_options_alone_resolve() {
        let request = ConfigurationRequest {
            cli_options: json!({"filter": {"include": ["ERROR"]}, "layout": {"flat": true}}),
            ..Default::default()
        };

        let config = resolve_configuration(request, &ResolutionContext::default()).unwrap();

        assert_eq!(config.filter.include, vec!["ERROR"]);
        assert_eq!(config.layout.per_line, UNBOUNDED_PER_LINE);
        assert_eq!(config.line.left_of_key_value, "");
        assert_eq!(config.line.right_of_key_value, "");
    }

    #[test]
    fn option_files_accumulate_in_order() {
        let directory = TempDir::new().unwrap();
        write_config(&directory, "base.json", json!({"filter": {"include": ["ERROR"]}}));
        write_config(
            &directory,
            "radio.json",
            json!({"filter.include": ["RIL"], "layout": {"per_line": 2}}),
        );

        let request = ConfigurationRequest {
            file_references: tokens(&["base", "radio.json"]),
            ..request_in(&directory)
        };

        let config = resolve_configuration(request, &ResolutionContext::default()).unwrap();

        assert_eq!(config.filter.include, vec!["ERROR", "RIL"]);
        assert_eq!(config.layout.per_line, 2);
    }

    #[test]
    fn trailing_tokens_override_files_and_cli_overrides_both() {
        let directory = TempDir::new().unwrap();
        write_config(
            &directory,
            "base.json",
            json!({"layout": {"per_line": 2, "divider": true}, "line": {"title": "base"}}),
        );

        let request = ConfigurationRequest {
            cli_options: json!({"layout": {"per_line": 5}}),
            file_references: tokens(&["base"]),
            trailing_tokens: tokens(&["-layout.per-line", "3", "-line.title", "radio"]),
            ..request_in(&directory)
        };

        let config = resolve_configuration(request, &ResolutionContext::default()).unwrap();

        assert_eq!(config.layout.per_line, 5);
        assert!(config.layout.divider);
        assert_eq!(config.line.title.as_deref(), Some("radio"));
    }

    #[test]
    fn trailing_values_reach_text_options_as_written() {
        let request = ConfigurationRequest {
            trailing_tokens: tokens(&["-filter.include", "007", "-line.title", "1e3"]),
            ..Default::default()
        };

        let config = resolve_configuration(request, &ResolutionContext::default()).unwrap();

        assert_eq!(config.filter.include, vec!["007"]);
        assert_eq!(config.line.title.as_deref(), Some("1e3"));
    }

    #[test]
    fn trailing_values_with_quotes_are_not_lists() {
        let request = ConfigurationRequest {
            trailing_tokens: tokens(&["-line.title", "\"radio\"", "-filter.include", "a\"b,c"]),
            ..Default::default()
        };

        let config = resolve_configuration(request, &ResolutionContext::default()).unwrap();

        assert_eq!(config.line.title.as_deref(), Some("\"radio\""));
        assert_eq!(config.filter.include, vec!["a\"b", "c"]);
    }

    #[test]
    fn trailing_values_are_parsed_by_typed_options() {
        let request = ConfigurationRequest {
            trailing_tokens: tokens(&[
                "-layout.per-line",
                "3",
                "-layout.divider",
                "true",
                "-metric.off",
                "false",
                "-metric.count-interval-secs",
                "0.5",
                "-stacktrace.off",
                "false",
                "-stacktrace.num-stack-traces",
                "25",
            ]),
            ..Default::default()
        };

        let config = resolve_configuration(request, &ResolutionContext::default()).unwrap();

        assert_eq!(config.layout.per_line, 3);
        assert!(config.layout.divider);
        assert_eq!(config.metric.count_interval, Some(std::time::Duration::from_millis(500)));
        assert_eq!(config.stacktrace.lines, 25);
    }

    #[test]
    fn unparsable_trailing_number_is_a_schema_error() {
        let request = ConfigurationRequest {
            trailing_tokens: tokens(&["-layout.per-line", "many"]),
            ..Default::default()
        };

        let error = resolve_configuration(request, &ResolutionContext::default()).unwrap_err();
        assert!(matches!(error, ConfigurationError::InvalidGroup { group: "layout", .. }));
    }

    #[test]
    fn no_config_ignores_files_and_trailing_tokens() {
        let request = ConfigurationRequest {
            cli_options: json!({"layout": {"per_line": 6}}),
            file_references: tokens(&["does-not-exist"]),
            trailing_tokens: tokens(&["stray"]),
            no_config: true,
            ..Default::default()
        };

        let config = resolve_configuration(request, &ResolutionContext::default()).unwrap();
        assert_eq!(config.layout.per_line, 6);
    }

    #[test]
    fn missing_option_file_lists_alternatives() {
        let directory = TempDir::new().unwrap();
        write_config(&directory, "base.json", json!({}));

        let request = ConfigurationRequest {
            file_references: tokens(&["bsae"]),
            ..request_in(&directory)
        };

        let error = resolve_configuration(request, &ResolutionContext::default()).unwrap_err();

        let ConfigurationError::ConfigNotFound { available, .. } = error else {
            panic!("expected ConfigNotFound");
        };
        assert_eq!(available, JsonFileListing(vec!["base.json".to_string()]));
    }

    #[test]
    fn missing_extra_directory_is_rejected() {
        let request = ConfigurationRequest {
            cli_options: json!({}),
            extra_directories: vec![PathBuf::from("/this/does/not/exist")],
            ..Default::default()
        };

        let error = resolve_configuration(request, &ResolutionContext::default()).unwrap_err();
        assert!(matches!(error, ConfigurationError::ConfigDirectoryMissing { .. }));
    }

    #[test]
    fn missing_base_directory_is_skipped() {
        let extra = TempDir::new().unwrap();
        write_config(&extra, "radio.json", json!({"line": {"spacer": "tab"}}));

        let request = ConfigurationRequest {
            cli_options: json!({}),
            file_references: tokens(&["radio"]),
            base_directory: Some(PathBuf::from("/this/does/not/exist")),
            extra_directories: vec![extra.path().to_path_buf()],
            ..Default::default()
        };

        let config = resolve_configuration(request, &ResolutionContext::default()).unwrap();
        assert_eq!(config.line.spacer, "\t");
    }

    #[test]
    fn ambiguous_trailing_tokens_fail() {
        let request = ConfigurationRequest {
            cli_options: json!({}),
            trailing_tokens: tokens(&["-line.title", "a", "b"]),
            ..Default::default()
        };

        let error = resolve_configuration(request, &ResolutionContext::default()).unwrap_err();
        assert!(matches!(error, ConfigurationError::TokenizeAmbiguity { .. }));
    }

    #[test]
    fn non_object_option_file_is_a_schema_error() {
        let directory = TempDir::new().unwrap();
        write_config(&directory, "list.json", json!(["filter"]));

        let request = ConfigurationRequest {
            file_references: tokens(&["list"]),
            ..request_in(&directory)
        };

        let error = resolve_configuration(request, &ResolutionContext::default()).unwrap_err();
        assert!(matches!(error, ConfigurationError::NotAnObject { .. }));
    }

    #[test]
    fn available_files_span_all_search_directories() {
        let base = TempDir::new().unwrap();
        let extra = TempDir::new().unwrap();
        write_config(&base, "b.json", json!({}));
        write_config(&extra, "a.json", json!({}));

        let request = ConfigurationRequest {
            extra_directories: vec![extra.path().to_path_buf()],
            ..request_in(&base)
        };

        assert_eq!(
            request.available_files().unwrap(),
            JsonFileListing(vec!["a.json".to_string(), "b.json".to_string()])
        );
    }
}
