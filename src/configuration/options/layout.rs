use serde::{Deserialize, Serialize};

use super::values::{lenient, lenient_string};
use crate::configuration::{errors::ConfigurationError, traits::ResolvableConfiguration};


/// `per_line` value meaning "put every key-value pair on one line".
pub const UNBOUNDED_PER_LINE: i64 = -1;


#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UnresolvedLayoutOptions {
    #[serde(deserialize_with = "lenient")]
    linespace: u32,

    #[serde(deserialize_with = "lenient")]
    divider: bool,

    #[serde(deserialize_with = "lenient")]
    flat: bool,

    /// Suppresses `flat`, e.g. when a shared config file enables it.
    #[serde(deserialize_with = "lenient")]
    no_flat: bool,

    #[serde(deserialize_with = "lenient")]
    per_line: i64,

    #[serde(deserialize_with = "lenient_string")]
    header_spacer: String,

    #[serde(deserialize_with = "lenient")]
    off: bool,
}

impl Default for UnresolvedLayoutOptions {
    fn default() -> Self {
        Self {
            linespace: 0,
            divider: false,
            flat: false,
            no_flat: false,
            per_line: 4,
            header_spacer: "newline".to_string(),
            off: false,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Blank lines printed between log lines.
    pub linespace: u32,

    pub divider: bool,

    /// Whether flat mode is in effect (`flat` requested and not suppressed).
    pub flat: bool,

    /// Key-value pairs per output line, or [`UNBOUNDED_PER_LINE`].
    pub per_line: i64,

    /// Literal text between the line header and its body.
    pub header_spacer: String,

    pub off: bool,
}

impl ResolvableConfiguration for UnresolvedLayoutOptions {
    type Resolved = LayoutOptions;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let per_line = if self.per_line > 0 {
            self.per_line
        } else {
            UNBOUNDED_PER_LINE
        };

        Ok(LayoutOptions {
            linespace: self.linespace,
            divider: self.divider,
            flat: self.flat && !self.no_flat,
            per_line,
            header_spacer: resolve_header_spacer(&self.header_spacer).to_string(),
            off: self.off,
        })
    }
}

/// Only `newline` is honoured; anything else becomes four spaces.
pub fn resolve_header_spacer(name: &str) -> &'static str {
    match name {
        "newline" => "\n",
        _ => "    ",
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resolve(value: serde_json::Value) -> LayoutOptions {
        serde_json::from_value::<UnresolvedLayoutOptions>(value)
            .unwrap()
            .resolve()
            .unwrap()
    }

    #[test]
    fn header_spacer_is_a_binary_choice() {
        assert_eq!(resolve_header_spacer("newline"), "\n");
        assert_eq!(resolve_header_spacer("tab"), "    ");
        assert_eq!(resolve_header_spacer("\n"), "    ");
    }

    #[test]
    fn non_positive_per_line_is_unbounded() {
        assert_eq!(resolve(json!({ "per_line": 0 })).per_line, UNBOUNDED_PER_LINE);
        assert_eq!(resolve(json!({ "per_line": -7 })).per_line, UNBOUNDED_PER_LINE);
        assert_eq!(resolve(json!({ "per_line": 6 })).per_line, 6);
        assert_eq!(resolve(json!({})).per_line, 4);
    }

    #[test]
    fn no_flat_suppresses_flat() {
        assert!(resolve(json!({ "flat": true })).flat);
        assert!(!resolve(json!({ "flat": true, "no_flat": true })).flat);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = serde_json::from_value::<UnresolvedLayoutOptions>(json!({ "perline": 3 }));
        assert!(result.is_err());
    }
}
