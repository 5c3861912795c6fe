use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::values::lenient;
use crate::configuration::{errors::ConfigurationError, traits::ResolvableConfiguration};


#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UnresolvedMetricOptions {
    #[serde(deserialize_with = "lenient")]
    common_msgs_timeframe_secs: u64,

    /// Report the number of processed lines every this many seconds.
    #[serde(deserialize_with = "lenient")]
    count_interval_secs: f64,

    #[serde(deserialize_with = "lenient")]
    off: bool,
}

impl Default for UnresolvedMetricOptions {
    fn default() -> Self {
        Self {
            common_msgs_timeframe_secs: 120,
            count_interval_secs: 0.0,
            off: true,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricOptions {
    pub common_msgs_timeframe: Duration,

    /// `Some` when periodic count reporting is enabled.
    pub count_interval: Option<Duration>,

    pub off: bool,
}

impl ResolvableConfiguration for UnresolvedMetricOptions {
    type Resolved = MetricOptions;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let count_interval = if !self.off && self.count_interval_secs > 0.0 {
            Some(
                Duration::try_from_secs_f64(self.count_interval_secs).map_err(|error| {
                    ConfigurationError::InvalidValue {
                        option: "metric.count_interval_secs".to_string(),
                        reason: error.to_string(),
                    }
                })?,
            )
        } else {
            if self.off && self.count_interval_secs > 0.0 {
                warn!(
                    seconds = self.count_interval_secs,
                    "metric.count_interval_secs is ignored while the metric group is off."
                );
            }

            None
        };

        Ok(MetricOptions {
            common_msgs_timeframe: Duration::from_secs(self.common_msgs_timeframe_secs),
            count_interval,
            off: self.off,
        })
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resolve(value: serde_json::Value) -> MetricOptions {
        serde_json::from_value::<UnresolvedMetricOptions>(value)
            .unwrap()
            .resolve()
            .unwrap()
    }

    #[test]
    fn positive_interval_enables_counting() {
        let metric = resolve(json!({ "off": false, "count_interval_secs": 2.5 }));
        assert_eq!(metric.count_interval, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn zero_or_negative_interval_disables_counting() {
        assert_eq!(resolve(json!({ "off": false, "count_interval_secs": 0 })).count_interval, None);
        assert_eq!(resolve(json!({ "off": false, "count_interval_secs": -3 })).count_interval, None);
    }

    #[test]
    fn disabled_group_never_counts() {
        assert_eq!(resolve(json!({ "count_interval_secs": 5 })).count_interval, None);
        assert_eq!(
            resolve(json!({ "off": true, "count_interval_secs": "5" })).count_interval,
            None
        );
    }
}
