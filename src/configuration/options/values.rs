//! Value shapes shared by several option groups.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{de, Deserialize, Deserializer, Serialize};


/// A list of strings as users actually write it: a single string,
/// a number, or arbitrarily nested arrays of those.
///
/// `"a"`, `["a", "b"]` and `[["a"], "b", [["c"]]]` are all accepted
/// and flatten depth-first.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum NestedList {
    Text(String),
    Number(serde_json::Number),
    Nested(Vec<NestedList>),
}

impl Default for NestedList {
    fn default() -> Self {
        Self::Nested(Vec::new())
    }
}

impl NestedList {
    pub fn flatten(self) -> Vec<String> {
        let mut flattened = Vec::new();
        self.flatten_into(&mut flattened);
        flattened
    }

    fn flatten_into(self, output: &mut Vec<String>) {
        match self {
            NestedList::Text(text) => output.push(text),
            NestedList::Number(number) => output.push(number.to_string()),
            NestedList::Nested(items) => {
                for item in items {
                    item.flatten_into(output);
                }
            }
        }
    }
}


/// Expands the single-element shorthand: a list with exactly one element that
/// itself holds several comma- or whitespace-separated items is split into them.
/// Any other list is returned unchanged.
pub fn explode_single_item_list(items: Vec<String>) -> Vec<String> {
    if items.len() != 1 {
        return items;
    }

    let only_item = &items[0];
    let exploded: Vec<String> = only_item
        .split(|character: char| character == ',' || character.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect();

    if exploded.len() > 1 {
        exploded
    } else {
        items
    }
}


/// Deserializes a string, also accepting numbers and booleans.
///
/// Option files may spell a title or separator as a bare JSON number,
/// e.g. `"title": 404`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringLike {
        Text(String),
        Number(serde_json::Number),
        Boolean(bool),
    }

    Ok(match StringLike::deserialize(deserializer)? {
        StringLike::Text(text) => text,
        StringLike::Number(number) => number.to_string(),
        StringLike::Boolean(boolean) => boolean.to_string(),
    })
}

/// [`lenient_string`] for optional fields; `null` stays `None`.
pub fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "lenient_string")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(text)| text))
}


/// A typed value as written in a file or on the command line, or its textual form
/// as it arrives from trailing command-line tokens.
#[derive(Deserialize)]
#[serde(untagged)]
enum ValueOrText<T> {
    Value(T),
    Text(String),
}

impl<T> ValueOrText<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn into_value<E: de::Error>(self) -> Result<T, E> {
        match self {
            ValueOrText::Value(value) => Ok(value),
            ValueOrText::Text(text) => text
                .trim()
                .parse()
                .map_err(|error| E::custom(format!("invalid value \"{text}\": {error}"))),
        }
    }
}

/// Deserializes a number or boolean, also accepting its string form
/// (`-layout.per-line 3`, `-layout.flat false`).
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    ValueOrText::<T>::deserialize(deserializer)?.into_value()
}

/// [`lenient`] for optional fields; `null` stays `None`.
pub fn lenient_optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    Option::<ValueOrText<T>>::deserialize(deserializer)?
        .map(ValueOrText::into_value)
        .transpose()
}


/// How several filter phrases combine.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Every phrase must match.
    All,
    /// A single matching phrase is enough.
    Any,
}


/// Logcat priority levels.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    #[serde(rename = "V")]
    Verbose,
    #[serde(rename = "D")]
    Debug,
    #[serde(rename = "I")]
    Info,
    #[serde(rename = "W")]
    Warn,
    #[serde(rename = "E")]
    Error,
    #[serde(rename = "F")]
    Fatal,
}

impl LogLevel {
    /// The single-letter tag logcat prints for this level.
    pub fn letter(&self) -> char {
        match self {
            LogLevel::Verbose => 'V',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warn => 'W',
            LogLevel::Error => 'E',
            LogLevel::Fatal => 'F',
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "v" | "verbose" => Ok(LogLevel::Verbose),
            "d" | "debug" => Ok(LogLevel::Debug),
            "i" | "info" => Ok(LogLevel::Info),
            "w" | "warn" | "warning" => Ok(LogLevel::Warn),
            "e" | "error" => Ok(LogLevel::Error),
            "f" | "fatal" | "a" | "assert" => Ok(LogLevel::Fatal),
            _ => Err(format!(
                "unknown log level \"{value}\" (expected one of v, d, i, w, e, f)"
            )),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
