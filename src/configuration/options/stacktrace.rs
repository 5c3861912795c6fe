use serde::{Deserialize, Serialize};

use super::values::{lenient, lenient_optional};
use crate::configuration::{errors::ConfigurationError, traits::ResolvableConfiguration};


pub const DEFAULT_STACKTRACE_LINES: u32 = 10;


#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UnresolvedStacktraceOptions {
    #[serde(deserialize_with = "lenient_optional")]
    num_stack_traces: Option<i64>,

    #[serde(deserialize_with = "lenient")]
    prev_lines_before_stacktrace: u32,

    #[serde(deserialize_with = "lenient")]
    off: bool,
}

impl Default for UnresolvedStacktraceOptions {
    fn default() -> Self {
        Self {
            num_stack_traces: Some(i64::from(DEFAULT_STACKTRACE_LINES)),
            prev_lines_before_stacktrace: 4,
            off: true,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StacktraceOptions {
    /// Stack trace lines printed per detected trace; always positive.
    pub lines: u32,

    /// Lines kept from before a trace starts.
    pub prev_lines_before_stacktrace: u32,

    pub off: bool,
}

impl ResolvableConfiguration for UnresolvedStacktraceOptions {
    type Resolved = StacktraceOptions;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let lines = match self.num_stack_traces {
            Some(requested) if !self.off && requested > 0 => {
                u32::try_from(requested).unwrap_or(u32::MAX)
            }
            _ => DEFAULT_STACKTRACE_LINES,
        };

        Ok(StacktraceOptions {
            lines,
            prev_lines_before_stacktrace: self.prev_lines_before_stacktrace,
            off: self.off,
        })
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn lines_for(value: serde_json::Value) -> u32 {
        serde_json::from_value::<UnresolvedStacktraceOptions>(value)
            .unwrap()
            .resolve()
            .unwrap()
            .lines
    }

    #[test]
    fn requested_positive_count_is_kept() {
        assert_eq!(lines_for(json!({ "off": false, "num_stack_traces": 25 })), 25);
    }

    #[test]
    fn missing_or_non_positive_count_defaults_to_ten() {
        assert_eq!(lines_for(json!({ "off": false, "num_stack_traces": null })), 10);
        assert_eq!(lines_for(json!({ "off": false, "num_stack_traces": 0 })), 10);
        assert_eq!(lines_for(json!({ "off": false, "num_stack_traces": -4 })), 10);
    }

    #[test]
    fn oversized_count_is_clamped() {
        assert_eq!(
            lines_for(json!({ "off": false, "num_stack_traces": i64::MAX })),
            u32::MAX
        );
    }
}
