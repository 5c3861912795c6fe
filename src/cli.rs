//! Command-line interface definitions for the binary.
//!
//! Every leaf option is exposed as `--<group>.<key>`, e.g. `--layout.per-line=3`.
//! Only options that are explicitly given end up in the raw command-line source,
//! so they override option files without resetting anything else.

use std::path::PathBuf;

use clap::{Args, Parser};
use miette::{Context, IntoDiagnostic, Result};
use serde::Serialize;

use crate::configuration::{split_positional, ConfigurationRequest, FilterType};



/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "nicelogcat",
    author,
    about = "Resolves nicelogcat options from the command line, JSON option files and trailing arguments.",
    version
)]
pub struct CLIArgs {
    /// This is the path to the settings file to use.
    /// If unspecified, this defaults to `./nicelogcat.toml`.
    #[arg(
        short = 's',
        long = "settings-file-path",
        help = "Path to the settings file to use. Defaults to ./nicelogcat.toml"
    )]
    pub settings_file_path: Option<PathBuf>,

    #[arg(
        long = "config",
        visible_alias = "load",
        value_name = "NAME_OR_PATH",
        help = "JSON option file to load, by path or by name (the .json suffix may be omitted). \
                Can be repeated; files are applied in order."
    )]
    pub config: Vec<String>,

    #[arg(
        long = "config-dir",
        value_name = "DIRECTORY",
        help = "Additional directory to search for option files, after the base configuration directory. \
                Can be repeated."
    )]
    pub config_dir: Vec<PathBuf>,

    #[arg(
        long = "no-cfg",
        help = "Ignore option files and trailing arguments; only use options given as flags."
    )]
    pub no_cfg: bool,

    #[arg(
        long = "list-configs",
        help = "List every option file in the search directories and exit."
    )]
    pub list_configs: bool,

    #[command(flatten)]
    pub options: OptionArguments,

    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "CONFIG_OR_FLAG",
        help = "Option file names, optionally followed by ad-hoc `-group.key value` arguments."
    )]
    pub arguments: Vec<String>,
}

impl CLIArgs {
    /// Gathers everything option resolution needs from the parsed arguments.
    ///
    /// Files given with `--config` are applied before the positional ones.
    pub fn configuration_request(
        &self,
        base_config_directory: PathBuf,
    ) -> Result<ConfigurationRequest> {
        let cli_options = serde_json::to_value(&self.options)
            .into_diagnostic()
            .wrap_err("Failed to collect command-line options.")?;

        let (positional_files, trailing_tokens) = split_positional(&self.arguments);

        let file_references = self
            .config
            .iter()
            .cloned()
            .chain(positional_files)
            .collect();


        Ok(ConfigurationRequest {
            cli_options,
            file_references,
            trailing_tokens,
            base_directory: Some(base_config_directory),
            extra_directories: self.config_dir.clone(),
            no_config: self.no_cfg,
        })
    }
}


/// One flattened set of arguments per option group.
/// Serializes into a raw source keyed by group name.
#[derive(Args, Serialize, Debug, Default)]
pub struct OptionArguments {
    #[command(flatten)]
    pub align: AlignArguments,

    #[command(flatten)]
    pub filter: FilterArguments,

    #[command(flatten)]
    pub highlight: HighlightArguments,

    #[command(flatten)]
    pub layout: LayoutArguments,

    #[command(flatten)]
    pub line: LineArguments,

    #[command(flatten)]
    pub metric: MetricArguments,

    #[command(flatten)]
    pub record: RecordArguments,

    #[command(flatten)]
    pub stacktrace: StacktraceArguments,
}


#[derive(Args, Serialize, Debug, Default)]
#[command(next_help_heading = "Align options")]
pub struct AlignArguments {
    #[arg(
        id = "align.header_occurrence_check_limit",
        long = "align.header-occurrence-check-limit",
        value_name = "LINES",
        help = "Lines sampled before the header width is fixed. Defaults to 5000."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_occurrence_check_limit: Option<u64>,

    #[arg(
        id = "align.off",
        long = "align.off",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Disable header alignment. Defaults to true."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off: Option<bool>,
}


#[derive(Args, Serialize, Debug, Default)]
#[command(next_help_heading = "Filter options")]
pub struct FilterArguments {
    #[arg(
        id = "filter.include",
        long = "filter.include",
        value_delimiter = ',',
        value_name = "PHRASE",
        help = "Only show lines containing these phrases."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[arg(
        id = "filter.include_extra",
        long = "filter.include-extra",
        value_delimiter = ',',
        value_name = "PHRASE",
        help = "Additional include phrases, appended to --filter.include."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_extra: Vec<String>,

    #[arg(
        id = "filter.include_type",
        long = "filter.include-type",
        help = "Whether a line has to contain all or any of the include phrases. Defaults to all."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_type: Option<FilterType>,

    #[arg(
        id = "filter.exclude",
        long = "filter.exclude",
        value_delimiter = ',',
        value_name = "PHRASE",
        help = "Hide lines containing these phrases."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    #[arg(
        id = "filter.exclude_type",
        long = "filter.exclude-type",
        help = "Whether a line has to contain all or any of the exclude phrases. Defaults to any."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_type: Option<FilterType>,

    #[arg(
        id = "filter.prefixes",
        long = "filter.prefixes",
        value_delimiter = ',',
        value_name = "PREFIX",
        help = "Only show lines whose message starts with one of these."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,

    #[arg(
        id = "filter.exclude_prefixes",
        long = "filter.exclude-prefixes",
        value_delimiter = ',',
        value_name = "PREFIX",
        help = "Hide lines whose message starts with one of these."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_prefixes: Vec<String>,

    #[arg(
        id = "filter.log_levels",
        long = "filter.log-levels",
        value_delimiter = ',',
        value_name = "LEVEL",
        help = "Only show these log levels (V, D, I, W, E, F or their full names)."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log_levels: Vec<String>,

    #[arg(
        id = "filter.off",
        long = "filter.off",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Disable filtering."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off: Option<bool>,
}


#[derive(Args, Serialize, Debug, Default)]
#[command(next_help_heading = "Highlight options")]
pub struct HighlightArguments {
    #[arg(
        id = "highlight.phrases",
        long = "highlight.phrases",
        value_delimiter = ',',
        value_name = "PHRASE",
        help = "Phrases to highlight."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phrases: Vec<String>,

    #[arg(
        id = "highlight.phrase_groups",
        long = "highlight.phrase-groups",
        value_name = "PHRASES",
        help = "Space-separated phrases to highlight, e.g. \"timeout refused\"."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub phrase_groups: Vec<String>,

    #[arg(
        id = "highlight.prefixes",
        long = "highlight.prefixes",
        value_delimiter = ',',
        value_name = "PREFIX",
        help = "Highlight messages starting with one of these."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub prefixes: Vec<String>,

    #[arg(
        id = "highlight.keys",
        long = "highlight.keys",
        value_delimiter = ',',
        value_name = "KEY",
        help = "Keys whose values are highlighted."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,

    #[arg(
        id = "highlight.off",
        long = "highlight.off",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Disable highlighting."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off: Option<bool>,
}


#[derive(Args, Serialize, Debug, Default)]
#[command(next_help_heading = "Layout options")]
pub struct LayoutArguments {
    #[arg(
        id = "layout.linespace",
        long = "layout.linespace",
        value_name = "LINES",
        help = "Blank lines between log lines. Defaults to 0."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linespace: Option<u32>,

    #[arg(
        id = "layout.divider",
        long = "layout.divider",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Print a divider between log lines."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divider: Option<bool>,

    #[arg(
        id = "layout.flat",
        long = "layout.flat",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Print every line flat: no per-line limit, divider or key decorations."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat: Option<bool>,

    #[arg(
        id = "layout.no_flat",
        long = "layout.no-flat",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Suppress flat mode, even if an option file enables it."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_flat: Option<bool>,

    #[arg(
        id = "layout.per_line",
        long = "layout.per-line",
        allow_hyphen_values = true,
        value_name = "COUNT",
        help = "Key-value pairs per output line; zero or less means unbounded. Defaults to 4."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_line: Option<i64>,

    #[arg(
        id = "layout.header_spacer",
        long = "layout.header-spacer",
        value_name = "SPACER",
        help = "Text between the line header and its body: \"newline\", or anything else for four spaces."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_spacer: Option<String>,

    #[arg(
        id = "layout.off",
        long = "layout.off",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Disable the layout options."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off: Option<bool>,
}


#[derive(Args, Serialize, Debug, Default)]
#[command(next_help_heading = "Line options")]
pub struct LineArguments {
    #[arg(
        id = "line.title",
        long = "line.title",
        help = "Fixed header title for every line."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[arg(
        id = "line.raw",
        long = "line.raw",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Print lines unparsed."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<bool>,

    #[arg(
        id = "line.no_date",
        long = "line.no-date",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Omit the date from the line header."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_date: Option<bool>,

    #[arg(
        id = "line.no_secs",
        long = "line.no-secs",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Omit seconds from the line header."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_secs: Option<bool>,

    #[arg(
        id = "line.show_title",
        long = "line.show-title",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Show the title in the line header."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_title: Option<bool>,

    #[arg(
        id = "line.align_head",
        long = "line.align-head",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Align line headers."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_head: Option<bool>,

    #[arg(
        id = "line.no_align_head",
        long = "line.no-align-head",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Do not align line headers."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_align_head: Option<bool>,

    #[arg(
        id = "line.align_simple",
        long = "line.align-simple",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Align line headers to a fixed width."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_simple: Option<bool>,

    #[arg(
        id = "line.random_color",
        long = "line.random-color",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Colour lines randomly by title."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_color: Option<bool>,

    #[arg(
        id = "line.random_color_background",
        long = "line.random-color-background",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Apply the random colour to the background."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_color_background: Option<bool>,

    #[arg(
        id = "line.random_color_message",
        long = "line.random-color-message",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Apply the random colour to the message."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_color_message: Option<bool>,

    #[arg(
        id = "line.no_random_color",
        long = "line.no-random-color",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Never colour lines randomly."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_random_color: Option<bool>,

    #[arg(
        id = "line.left_of_key",
        long = "line.left-of-key",
        allow_hyphen_values = true,
        value_name = "TEXT",
        help = "Printed before each key-value pair. Defaults to \"[\"."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_of_key: Option<String>,

    #[arg(
        id = "line.right_of_key",
        long = "line.right-of-key",
        allow_hyphen_values = true,
        value_name = "TEXT",
        help = "Printed after each key-value pair. Defaults to \"]\"."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_of_key: Option<String>,

    #[arg(
        id = "line.spacer",
        long = "line.spacer",
        allow_hyphen_values = true,
        value_name = "SPACER",
        help = "Separator between key-value pairs: newline, space, tab, pipe, or literal text. Defaults to space."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacer: Option<String>,

    #[arg(
        id = "line.ignore_keys",
        long = "line.ignore-keys",
        value_delimiter = ',',
        value_name = "KEY",
        help = "Keys left out of the output."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_keys: Vec<String>,

    #[arg(
        id = "line.off",
        long = "line.off",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Disable the line options."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off: Option<bool>,
}


#[derive(Args, Serialize, Debug, Default)]
#[command(next_help_heading = "Metric options")]
pub struct MetricArguments {
    #[arg(
        id = "metric.common_msgs_timeframe_secs",
        long = "metric.common-msgs-timeframe-secs",
        value_name = "SECONDS",
        help = "Window in which the most common messages are counted. Defaults to 120."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_msgs_timeframe_secs: Option<u64>,

    #[arg(
        id = "metric.count_interval_secs",
        long = "metric.count-interval-secs",
        value_name = "SECONDS",
        help = "Report the number of processed lines this often; 0 disables reporting."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count_interval_secs: Option<f64>,

    #[arg(
        id = "metric.off",
        long = "metric.off",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Disable metrics. Defaults to true."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off: Option<bool>,
}


#[derive(Args, Serialize, Debug, Default)]
#[command(next_help_heading = "Record options")]
pub struct RecordArguments {
    #[arg(
        id = "record.dir",
        long = "record.dir",
        value_name = "DIRECTORY",
        help = "Existing directory recordings are written to. Defaults to the current directory."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    #[arg(
        id = "record.filename",
        long = "record.filename",
        value_name = "NAME",
        help = "Name of the recording file."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    #[arg(
        id = "record.keys",
        long = "record.keys",
        value_delimiter = ',',
        value_name = "KEY",
        help = "Record only when one of these keys changes value."
    )]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,

    #[arg(
        id = "record.init_recording_state",
        long = "record.init-recording-state",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Whether recording starts enabled. Defaults to true."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_recording_state: Option<bool>,

    #[arg(
        id = "record.off",
        long = "record.off",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Disable recording. Defaults to true."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off: Option<bool>,
}


#[derive(Args, Serialize, Debug, Default)]
#[command(next_help_heading = "Stacktrace options")]
pub struct StacktraceArguments {
    #[arg(
        id = "stacktrace.num_stack_traces",
        long = "stacktrace.num-stack-traces",
        allow_hyphen_values = true,
        value_name = "LINES",
        help = "Stack trace lines printed per trace; zero or less means the default of 10."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_stack_traces: Option<i64>,

    #[arg(
        id = "stacktrace.prev_lines_before_stacktrace",
        long = "stacktrace.prev-lines-before-stacktrace",
        value_name = "LINES",
        help = "Lines kept from before a stack trace starts. Defaults to 4."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_lines_before_stacktrace: Option<u32>,

    #[arg(
        id = "stacktrace.off",
        long = "stacktrace.off",
        require_equals = true,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Disable stack trace detection. Defaults to true."
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub off: Option<bool>,
}
