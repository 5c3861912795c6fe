//! Parser for the ad-hoc `-flag value` tokens that may follow positional
//! config-file names, e.g. `nicelogcat base radio -layout.flat -filter.include RIL`.
//!
//! Grammar (one token of lookahead):
//!
//! ```text
//! arguments := entry*
//! entry     := FLAG VALUE?        FLAG starts with '-', VALUE does not
//! ```
//!
//! A flag followed by another flag (or by nothing) is a switch (`true`).
//! A flag given a value more than once, or a value with commas in it,
//! collects a list. Lists render as double-quoted, space-separated segments,
//! e.g. `"RIL" "GSM"`.
//!
//! Values are kept as text; typed options parse them during instantiation.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde_json::{Map, Value};
use tracing::trace;

use super::errors::ConfigurationError;
use super::merge::normalize_keys;


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailingValue {
    /// Flag given without a value.
    Switch,
    Value(String),
    Values(Vec<String>),
}

impl TrailingValue {
    fn from_token(value: &str) -> Self {
        if value.contains(',') {
            TrailingValue::Values(split_list(value).collect())
        } else {
            TrailingValue::Value(value.to_string())
        }
    }

    fn into_json(self) -> Value {
        match self {
            TrailingValue::Switch => Value::Bool(true),
            TrailingValue::Value(value) => Value::String(value),
            TrailingValue::Values(values) => {
                Value::Array(values.into_iter().map(Value::String).collect())
            }
        }
    }
}

impl Display for TrailingValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TrailingValue::Switch => f.write_str("true"),
            TrailingValue::Value(value) => f.write_str(value),
            TrailingValue::Values(values) => {
                let quoted = values
                    .iter()
                    .map(|value| format!("\"{value}\""))
                    .collect::<Vec<_>>();

                f.write_str(&quoted.join(" "))
            }
        }
    }
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}


/// Tokenized trailing arguments, keyed by the flag exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrailingArguments {
    entries: BTreeMap<String, TrailingValue>,
}

impl TrailingArguments {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, flag: &str) -> Option<&TrailingValue> {
        self.entries.get(flag)
    }

    fn record_switch(&mut self, flag: &str) {
        self.entries.insert(flag.to_string(), TrailingValue::Switch);
    }

    fn record_value(&mut self, flag: &str, value: &str) {
        let entry = self
            .entries
            .entry(flag.to_string())
            .or_insert(TrailingValue::Switch);

        match entry {
            TrailingValue::Values(existing) => existing.extend(split_list(value)),
            TrailingValue::Value(existing) => {
                let values = std::iter::once(std::mem::take(existing))
                    .chain(split_list(value))
                    .collect();

                *entry = TrailingValue::Values(values);
            }
            TrailingValue::Switch => *entry = TrailingValue::from_token(value),
        }
    }

    /// Converts the arguments into a raw configuration source.
    ///
    /// Switches become `true`, lists become arrays of strings,
    /// and single values stay strings.
    pub fn into_raw_source(self) -> Value {
        let mut raw = Map::with_capacity(self.entries.len());

        for (flag, value) in self.entries {
            raw.insert(flag, value.into_json());
        }

        normalize_keys(Value::Object(raw))
    }
}


fn is_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Tokenize trailing command-line arguments.
pub fn tokenize<S: AsRef<str>>(tokens: &[S]) -> Result<TrailingArguments, ConfigurationError> {
    let mut arguments = TrailingArguments::default();
    let mut tokens = tokens
        .iter()
        .map(S::as_ref)
        .enumerate()
        .peekable();

    while let Some((position, token)) = tokens.next() {
        if !is_flag(token) {
            return Err(ConfigurationError::TokenizeAmbiguity {
                token: token.to_string(),
                position,
                reason: "value is not preceded by a flag",
            });
        }

        if token.trim_start_matches('-').is_empty() {
            return Err(ConfigurationError::TokenizeAmbiguity {
                token: token.to_string(),
                position,
                reason: "flag has no name",
            });
        }

        match tokens.next_if(|(_, next)| !is_flag(next)) {
            Some((_, value)) => arguments.record_value(token, value),
            None => arguments.record_switch(token),
        }
    }

    for (flag, value) in &arguments.entries {
        trace!(flag = %flag, value = %value, "Trailing argument.");
    }

    Ok(arguments)
}

/// Splits positional arguments into config-file references and the
/// trailing tokens, which start at the first token that looks like a flag.
pub fn split_positional(arguments: &[String]) -> (Vec<String>, Vec<String>) {
    let split_at = arguments
        .iter()
        .position(|argument| is_flag(argument))
        .unwrap_or(arguments.len());

    let (file_references, trailing_tokens) = arguments.split_at(split_at);
    (file_references.to_vec(), trailing_tokens.to_vec())
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn value(text: &str) -> Option<TrailingValue> {
        Some(TrailingValue::Value(text.to_string()))
    }

    #[test]
    fn no_tokens_yield_nothing() {
        let arguments = tokenize::<&str>(&[]).unwrap();
        assert!(arguments.is_empty());
    }

    #[test]
    fn single_flag_is_a_switch() {
        let arguments = tokenize(&["--layout.flat"]).unwrap();
        assert_eq!(arguments.get("--layout.flat"), Some(&TrailingValue::Switch));
        assert_eq!(arguments.len(), 1);
    }

    #[test]
    fn single_value_is_ambiguous() {
        let error = tokenize(&["radio"]).unwrap_err();
        assert!(matches!(
            error,
            ConfigurationError::TokenizeAmbiguity { position: 0, .. }
        ));
    }

    #[test]
    fn even_length_flag_value_pairs() {
        let arguments = tokenize(&["-layout.per-line", "3", "-line.title", "radio"]).unwrap();

        assert_eq!(arguments.get("-layout.per-line").cloned(), value("3"));
        assert_eq!(arguments.get("-line.title").cloned(), value("radio"));
    }

    #[test]
    fn odd_length_with_trailing_flag_without_value() {
        let arguments = tokenize(&["-line.title", "radio", "-layout.flat"]).unwrap();

        assert_eq!(arguments.get("-line.title").cloned(), value("radio"));
        assert_eq!(arguments.get("-layout.flat"), Some(&TrailingValue::Switch));
    }

    #[test]
    fn odd_length_ending_in_a_value() {
        let arguments = tokenize(&["-layout.flat", "-line.title", "radio"]).unwrap();

        assert_eq!(arguments.get("-layout.flat"), Some(&TrailingValue::Switch));
        assert_eq!(arguments.get("-line.title").cloned(), value("radio"));
    }

    #[test]
    fn flag_followed_by_flag_is_a_switch() {
        let arguments = tokenize(&["-a", "-b", "x"]).unwrap();

        assert_eq!(arguments.get("-a"), Some(&TrailingValue::Switch));
        assert_eq!(arguments.get("-b").cloned(), value("x"));
    }

    fn values(texts: &[&str]) -> Option<TrailingValue> {
        Some(TrailingValue::Values(texts.iter().map(|text| text.to_string()).collect()))
    }

    #[test]
    fn repeated_flag_values_are_collected() {
        let arguments =
            tokenize(&["-filter.include", "RIL", "-filter.include", "GSM"]).unwrap();

        let collected = arguments.get("-filter.include").cloned();
        assert_eq!(collected, values(&["RIL", "GSM"]));
        assert_eq!(collected.unwrap().to_string(), "\"RIL\" \"GSM\"");
    }

    #[test]
    fn comma_separated_value_is_a_list() {
        let arguments = tokenize(&["-filter.include", "a,b,c", "-filter.include", "d"]).unwrap();
        assert_eq!(arguments.get("-filter.include").cloned(), values(&["a", "b", "c", "d"]));
    }

    #[test]
    fn quotes_inside_values_are_kept_verbatim() {
        let arguments =
            tokenize(&["-line.title", "\"radio\"", "-filter.include", "a\"b,c"]).unwrap();

        assert_eq!(arguments.get("-line.title").cloned(), value("\"radio\""));
        assert_eq!(arguments.get("-filter.include").cloned(), values(&["a\"b", "c"]));
    }

    #[test]
    fn stray_value_after_a_pair_is_ambiguous() {
        let error = tokenize(&["-a", "x", "y"]).unwrap_err();
        assert!(matches!(
            error,
            ConfigurationError::TokenizeAmbiguity { position: 2, ref token, .. } if token == "y"
        ));
    }

    #[test]
    fn switch_then_value_becomes_the_value() {
        let arguments = tokenize(&["-a", "-a", "x"]).unwrap();
        assert_eq!(arguments.get("-a").cloned(), value("x"));
    }

    #[test]
    fn later_switch_overrides_earlier_value() {
        let arguments = tokenize(&["-a", "x", "-a"]).unwrap();
        assert_eq!(arguments.get("-a"), Some(&TrailingValue::Switch));
    }

    #[test]
    fn bare_dash_is_rejected() {
        assert!(tokenize(&["-"]).is_err());
        assert!(tokenize(&["--"]).is_err());
    }

    #[test]
    fn raw_source_nests_and_keeps_text() {
        let raw = tokenize(&[
            "--layout.per-line",
            "3",
            "--layout.flat",
            "--filter.include",
            "RIL,GSM",
            "--line.title",
            "1e3",
            "--metric.count-interval-secs",
            "0.5",
            "--layout.divider",
            "false",
        ])
        .unwrap()
        .into_raw_source();

        assert_eq!(
            raw,
            json!({
                "layout": {"per_line": "3", "flat": true, "divider": "false"},
                "filter": {"include": ["RIL", "GSM"]},
                "line": {"title": "1e3"},
                "metric": {"count_interval_secs": "0.5"},
            })
        );
    }

    #[test]
    fn numeric_looking_values_stay_as_written() {
        let raw = tokenize(&["-filter.include", "007"]).unwrap().into_raw_source();
        assert_eq!(raw, json!({"filter": {"include": "007"}}));
    }

    #[test]
    fn positional_arguments_split_at_first_flag() {
        let arguments: Vec<String> = ["base", "radio", "-layout.flat", "x"]
            .into_iter()
            .map(str::to_string)
            .collect();

        let (files, trailing) = split_positional(&arguments);

        assert_eq!(files, vec!["base", "radio"]);
        assert_eq!(trailing, vec!["-layout.flat", "x"]);
    }

    #[test]
    fn positional_arguments_without_flags_are_all_files() {
        let arguments = vec!["base".to_string()];
        let (files, trailing) = split_positional(&arguments);

        assert_eq!(files, vec!["base"]);
        assert!(trailing.is_empty());
    }
}
