use serde::{Deserialize, Serialize};

use super::values::{
    explode_single_item_list,
    lenient,
    lenient_optional_string,
    lenient_string,
    NestedList,
};
use crate::configuration::{errors::ConfigurationError, traits::ResolvableConfiguration};


#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UnresolvedLineOptions {
    #[serde(deserialize_with = "lenient_optional_string")]
    title: Option<String>,

    #[serde(deserialize_with = "lenient")]
    raw: bool,

    #[serde(deserialize_with = "lenient")]
    no_date: bool,

    #[serde(deserialize_with = "lenient")]
    no_secs: bool,

    #[serde(deserialize_with = "lenient")]
    show_title: bool,

    #[serde(deserialize_with = "lenient")]
    align_head: bool,

    #[serde(deserialize_with = "lenient")]
    no_align_head: bool,

    #[serde(deserialize_with = "lenient")]
    align_simple: bool,

    #[serde(deserialize_with = "lenient")]
    random_color: bool,

    #[serde(deserialize_with = "lenient")]
    random_color_background: bool,

    #[serde(deserialize_with = "lenient")]
    random_color_message: bool,

    #[serde(deserialize_with = "lenient")]
    no_random_color: bool,

    #[serde(deserialize_with = "lenient_string")]
    left_of_key: String,

    #[serde(deserialize_with = "lenient_string")]
    right_of_key: String,

    /// Symbolic (`newline`, `space`, `tab`, `pipe`) or literal separator.
    #[serde(deserialize_with = "lenient_string")]
    spacer: String,

    ignore_keys: NestedList,

    #[serde(deserialize_with = "lenient")]
    off: bool,
}

impl Default for UnresolvedLineOptions {
    fn default() -> Self {
        Self {
            title: None,
            raw: false,
            no_date: false,
            no_secs: false,
            show_title: false,
            align_head: false,
            no_align_head: false,
            align_simple: false,
            random_color: false,
            random_color_background: false,
            random_color_message: false,
            no_random_color: false,
            left_of_key: "[".to_string(),
            right_of_key: "]".to_string(),
            spacer: "space".to_string(),
            ignore_keys: NestedList::default(),
            off: false,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LineOptions {
    /// Fixed header title for every line.
    pub title: Option<String>,

    pub raw: bool,
    pub no_date: bool,
    pub no_secs: bool,
    pub show_title: bool,
    pub align_head: bool,
    pub no_align_head: bool,
    pub align_simple: bool,
    pub random_color: bool,
    pub random_color_background: bool,
    pub random_color_message: bool,
    pub no_random_color: bool,

    /// Decoration printed before each key-value pair.
    pub left_of_key_value: String,

    /// Decoration printed after each key-value pair.
    pub right_of_key_value: String,

    /// Literal separator between key-value pairs.
    pub spacer: String,

    pub ignore_keys: Vec<String>,

    pub off: bool,
}

impl ResolvableConfiguration for UnresolvedLineOptions {
    type Resolved = LineOptions;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let spacer = resolve_spacer(self.spacer);
        let title = self.title.filter(|title| !title.is_empty());
        let ignore_keys = explode_single_item_list(self.ignore_keys.flatten());

        Ok(LineOptions {
            title,
            raw: self.raw,
            no_date: self.no_date,
            no_secs: self.no_secs,
            show_title: self.show_title,
            align_head: self.align_head,
            no_align_head: self.no_align_head,
            align_simple: self.align_simple,
            random_color: self.random_color,
            random_color_background: self.random_color_background,
            random_color_message: self.random_color_message,
            no_random_color: self.no_random_color,
            left_of_key_value: self.left_of_key,
            right_of_key_value: self.right_of_key,
            spacer,
            ignore_keys,
            off: self.off,
        })
    }
}

/// Maps a symbolic spacer name to its literal text.
/// Unrecognized values are taken literally.
pub fn resolve_spacer(name: String) -> String {
    match name.as_str() {
        "newline" => "\n".to_string(),
        "space" => " ".to_string(),
        "tab" => "\t".to_string(),
        "pipe" => " | ".to_string(),
        _ => name,
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resolve(value: serde_json::Value) -> LineOptions {
        serde_json::from_value::<UnresolvedLineOptions>(value)
            .unwrap()
            .resolve()
            .unwrap()
    }

    #[test]
    fn spacer_names_map_to_literals() {
        assert_eq!(resolve_spacer("tab".to_string()), "\t");
        assert_eq!(resolve_spacer("newline".to_string()), "\n");
        assert_eq!(resolve_spacer("pipe".to_string()), " | ");
        assert_eq!(resolve_spacer("space".to_string()), " ");
    }

    #[test]
    fn unknown_spacer_passes_through() {
        assert_eq!(resolve_spacer(" ~ ".to_string()), " ~ ");
        assert_eq!(resolve_spacer("TAB".to_string()), "TAB");
        assert_eq!(resolve_spacer(String::new()), "");
    }

    #[test]
    fn empty_title_means_no_title() {
        assert_eq!(resolve(json!({ "title": "" })).title, None);
        assert_eq!(resolve(json!({ "title": "radio" })).title, Some("radio".to_string()));
    }

    #[test]
    fn numeric_title_is_kept_as_text() {
        assert_eq!(resolve(json!({ "title": 404 })).title, Some("404".to_string()));
    }

    #[test]
    fn ignore_keys_expand_shorthand() {
        let line = resolve(json!({ "ignore_keys": [["pid tid"]] }));
        assert_eq!(line.ignore_keys, vec!["pid", "tid"]);
    }

    #[test]
    fn brackets_default_to_square() {
        let line = resolve(json!({}));
        assert_eq!(line.left_of_key_value, "[");
        assert_eq!(line.right_of_key_value, "]");
        assert_eq!(line.spacer, " ");
    }
}
