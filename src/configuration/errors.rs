use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;


/// Sorted list of every `*.json` file visible under the configuration
/// search directories, shown to the user when a lookup fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JsonFileListing(pub Vec<String>);

impl Display for JsonFileListing {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(no *.json files found in the search directories)");
        }

        write!(f, "{}", self.0.join("\n"))
    }
}


/// Everything that can go wrong while turning raw arguments and
/// configuration files into a [`ResolvedConfig`][super::resolve::ResolvedConfig].
///
/// All of these are fatal: resolution happens once at startup and is never retried.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigurationError {
    #[error("Could not find configuration file \"{requested}\".")]
    #[diagnostic(
        code(nicelogcat::config::not_found),
        help("Maybe you meant one of these?\n\n{available}")
    )]
    ConfigNotFound {
        requested: String,
        available: JsonFileListing,
    },

    #[error("Configuration directory {} does not exist.", .directory.display())]
    #[diagnostic(code(nicelogcat::config::directory_missing))]
    ConfigDirectoryMissing { directory: PathBuf },

    #[error("Failed to read configuration file {}.", .path.display())]
    #[diagnostic(code(nicelogcat::config::read))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file {} is not valid JSON.", .path.display())]
    #[diagnostic(code(nicelogcat::config::parse))]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration source {origin} must be a JSON object.")]
    #[diagnostic(code(nicelogcat::schema::not_an_object))]
    NotAnObject { origin: String },

    #[error("Unknown option group \"{name}\".")]
    #[diagnostic(
        code(nicelogcat::schema::unknown_group),
        help("Valid groups are: align, filter, highlight, layout, line, metric, record, stacktrace.")
    )]
    UnknownGroup { name: String },

    #[error("Invalid options for group \"{group}\".")]
    #[diagnostic(code(nicelogcat::schema::invalid_group))]
    InvalidGroup {
        group: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {option}: {reason}")]
    #[diagnostic(code(nicelogcat::validation::invalid_value))]
    InvalidValue { option: String, reason: String },

    #[error("Record directory {} needs to exist.", .directory.display())]
    #[diagnostic(
        code(nicelogcat::validation::record_directory_missing),
        help("Create the directory or point --record.dir at an existing one.")
    )]
    RecordDirectoryMissing { directory: PathBuf },

    #[error("Record directory {} exists, but is not a directory.", .directory.display())]
    #[diagnostic(code(nicelogcat::validation::record_directory_not_a_directory))]
    RecordDirectoryNotADirectory { directory: PathBuf },

    #[error("Ambiguous trailing argument \"{token}\" at position {position}: {reason}")]
    #[diagnostic(
        code(nicelogcat::tokenize::ambiguity),
        help("Trailing arguments must look like `-flag`, `-flag value` or `-flag value -flag value`.")
    )]
    TokenizeAmbiguity {
        token: String,
        position: usize,
        reason: &'static str,
    },
}
