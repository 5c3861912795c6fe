use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::errors::ConfigurationError;
use super::options::{
    AlignOptions,
    FilterOptions,
    HighlightOptions,
    LayoutOptions,
    LineOptions,
    MetricOptions,
    RecordOptions,
    StacktraceOptions,
    UnresolvedOptions,
    UNBOUNDED_PER_LINE,
};
use super::traits::{ResolvableConfiguration, ResolvableConfigurationWithContext};


/// Process state that resolution depends on, passed in explicitly
/// so that resolving the same input always yields the same output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Used as the record directory when none is configured.
    pub working_directory: PathBuf,
}


/// The fully resolved, read-only configuration handed to line processing.
/// Every group is always present.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub align: AlignOptions,
    pub filter: FilterOptions,
    pub highlight: HighlightOptions,
    pub layout: LayoutOptions,
    pub line: LineOptions,
    pub metric: MetricOptions,
    pub record: RecordOptions,
    pub stacktrace: StacktraceOptions,
}

impl ResolvedConfig {
    /// Every group at its documented default.
    pub fn defaults() -> Self {
        // PANIC SAFETY: default groups keep recording disabled and name no log levels,
        // which are the only fallible steps of resolution.
        UnresolvedOptions::default()
            .resolve(ResolutionContext::default())
            .unwrap()
    }
}


impl ResolvableConfigurationWithContext for UnresolvedOptions {
    type Resolved = ResolvedConfig;
    type Context = ResolutionContext;
    type Error = ConfigurationError;

    /// Applies the derivation rules in a fixed order; flat mode comes last
    /// because it overrides individually set layout options.
    fn resolve(self, context: Self::Context) -> Result<Self::Resolved, Self::Error> {
        // Spacer, title and ignore keys.
        let mut line = self.line.resolve()?;

        // Per-line count and header spacer.
        let mut layout = self.layout.resolve()?;

        // Include/exclude lists, prefixes and levels.
        let filter = self.filter.resolve()?;

        // Whatever is filtered for is highlighted as well.
        let mut highlight = self.highlight.resolve()?;
        if !filter.off {
            highlight.phrases.extend(filter.include.iter().cloned());
        }

        let metric = self.metric.resolve()?;
        let record = self.record.resolve(context.working_directory)?;
        let stacktrace = self.stacktrace.resolve()?;
        let align = self.align.resolve()?;


        if layout.flat {
            debug!("Flat mode overrides per-line count, divider and decorations.");

            layout.per_line = UNBOUNDED_PER_LINE;
            layout.divider = false;
            layout.header_spacer.clear();
            line.left_of_key_value.clear();
            line.right_of_key_value.clear();
        }


        Ok(ResolvedConfig {
            align,
            filter,
            highlight,
            layout,
            line,
            metric,
            record,
            stacktrace,
        })
    }
}


/// Instantiates a merged raw configuration into the option schema and resolves it.
pub fn resolve(
    merged: Map<String, Value>,
    context: &ResolutionContext,
) -> Result<ResolvedConfig, ConfigurationError> {
    UnresolvedOptions::from_merged(merged)?.resolve(context.clone())
}


#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn merged(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn resolve_value(value: Value) -> Result<ResolvedConfig, ConfigurationError> {
        resolve(merged(value), &ResolutionContext::default())
    }

    #[test]
    fn defaults_cover_every_group() {
        let defaults = ResolvedConfig::defaults();

        assert!(defaults.align.off);
        assert!(!defaults.filter.off);
        assert!(defaults.metric.off);
        assert!(defaults.record.off);
        assert!(defaults.stacktrace.off);
        assert_eq!(defaults.layout.per_line, 4);
        assert_eq!(defaults.layout.header_spacer, "\n");
        assert_eq!(defaults.line.spacer, " ");
        assert_eq!(defaults.line.left_of_key_value, "[");
        assert_eq!(defaults.stacktrace.lines, 10);
        assert_eq!(defaults.metric.count_interval, None);
        assert!(defaults.highlight.phrases.is_empty());
    }

    #[test]
    fn empty_input_resolves_to_defaults() {
        assert_eq!(resolve_value(json!({})).unwrap(), ResolvedConfig::defaults());
    }

    #[test]
    fn filters_are_folded_into_highlights() {
        let config = resolve_value(json!({
            "filter": {"include": ["ERROR"], "include_extra": ["RIL"]},
            "highlight": {"phrases": ["crash", "ERROR"], "phrase_groups": ["anr timeout"]},
        }))
        .unwrap();

        assert_eq!(config.filter.include, vec!["ERROR", "RIL"]);

        let expected: BTreeSet<String> = ["ERROR", "RIL", "anr", "crash", "timeout"]
            .into_iter()
            .map(str::to_string)
            .collect();
        assert_eq!(config.highlight.phrases, expected);
    }

    #[test]
    fn disabled_filter_is_not_highlighted() {
        let config = resolve_value(json!({
            "filter": {"include": ["ERROR"], "off": true},
        }))
        .unwrap();

        assert!(config.highlight.phrases.is_empty());
    }

    #[test]
    fn flat_mode_overrides_layout_and_decorations() {
        let config = resolve_value(json!({
            "layout": {"flat": true, "per_line": 7, "divider": true, "header_spacer": "newline"},
            "line": {"left_of_key": "<", "right_of_key": ">"},
        }))
        .unwrap();

        assert!(config.layout.flat);
        assert_eq!(config.layout.per_line, UNBOUNDED_PER_LINE);
        assert!(!config.layout.divider);
        assert_eq!(config.layout.header_spacer, "");
        assert_eq!(config.line.left_of_key_value, "");
        assert_eq!(config.line.right_of_key_value, "");
    }

    #[test]
    fn suppressed_flat_mode_keeps_layout() {
        let config = resolve_value(json!({
            "layout": {"flat": true, "no_flat": true, "per_line": 7, "divider": true},
        }))
        .unwrap();

        assert!(!config.layout.flat);
        assert_eq!(config.layout.per_line, 7);
        assert!(config.layout.divider);
        assert_eq!(config.line.left_of_key_value, "[");
    }

    #[test]
    fn resolution_is_deterministic() {
        let input = json!({
            "layout": {"flat": true},
            "highlight": {"phrase_groups": ["b a c", "a"]},
            "filter": {"include": ["z", "y"]},
        });

        let first = resolve_value(input.clone()).unwrap();
        let second = resolve_value(input).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn recording_in_missing_directory_fails() {
        let error = resolve_value(json!({
            "record": {"dir": "/nonexistent", "off": false},
        }))
        .unwrap_err();

        assert!(matches!(error, ConfigurationError::RecordDirectoryMissing { .. }));
    }

    #[test]
    fn recording_defaults_to_the_context_directory() {
        let working_directory = TempDir::new().unwrap();
        let context = ResolutionContext {
            working_directory: working_directory.path().to_path_buf(),
        };

        let config = resolve(
            merged(json!({"record": {"off": false, "keys": [["tag"]]}})),
            &context,
        )
        .unwrap();

        assert_eq!(
            config.record.dir,
            Some(dunce::canonicalize(working_directory.path()).unwrap())
        );
        assert_eq!(config.record.diff_keys, vec!["tag"]);
    }

    #[test]
    fn unknown_group_fails_resolution() {
        let error = resolve_value(json!({"colour": {}})).unwrap_err();
        assert!(matches!(error, ConfigurationError::UnknownGroup { .. }));
    }

    #[test]
    fn resolved_config_serializes_for_hand_off() {
        let serialized = serde_json::to_value(ResolvedConfig::defaults()).unwrap();

        assert_eq!(serialized["layout"]["per_line"], 4);
        assert_eq!(serialized["filter"]["include_type"], "all");
        assert!(serialized["record"]["dir"].is_null());
    }
}
