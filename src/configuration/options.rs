//! The fixed option taxonomy.
//!
//! Every group exists twice: an `Unresolved*` struct that mirrors what users
//! write (and fills in defaults through serde), and a resolved struct holding
//! the values the line-processing engine works with.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub use self::align::{AlignOptions, UnresolvedAlignOptions};
pub use self::filter::{FilterOptions, UnresolvedFilterOptions};
pub use self::highlight::{HighlightOptions, UnresolvedHighlightOptions};
pub use self::layout::{LayoutOptions, UnresolvedLayoutOptions, UNBOUNDED_PER_LINE};
pub use self::line::{LineOptions, UnresolvedLineOptions};
pub use self::metric::{MetricOptions, UnresolvedMetricOptions};
pub use self::record::{RecordOptions, UnresolvedRecordOptions};
pub use self::stacktrace::{StacktraceOptions, UnresolvedStacktraceOptions, DEFAULT_STACKTRACE_LINES};
pub use self::values::{FilterType, LogLevel};
use super::errors::ConfigurationError;

mod align;
mod filter;
mod highlight;
mod layout;
mod line;
mod metric;
mod record;
mod stacktrace;
pub(crate) mod values;



/// Names of the option groups, i.e. the top-level keys of a merged configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionGroup {
    Align,
    Filter,
    Highlight,
    Layout,
    Line,
    Metric,
    Record,
    Stacktrace,
}

impl OptionGroup {
    pub const ALL: [OptionGroup; 8] = [
        OptionGroup::Align,
        OptionGroup::Filter,
        OptionGroup::Highlight,
        OptionGroup::Layout,
        OptionGroup::Line,
        OptionGroup::Metric,
        OptionGroup::Record,
        OptionGroup::Stacktrace,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OptionGroup::Align => "align",
            OptionGroup::Filter => "filter",
            OptionGroup::Highlight => "highlight",
            OptionGroup::Layout => "layout",
            OptionGroup::Line => "line",
            OptionGroup::Metric => "metric",
            OptionGroup::Record => "record",
            OptionGroup::Stacktrace => "stacktrace",
        }
    }

    /// Looks a group up by name, failing for anything outside the registry.
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        OptionGroup::ALL
            .into_iter()
            .find(|group| group.name() == name)
            .ok_or_else(|| ConfigurationError::UnknownGroup {
                name: name.to_string(),
            })
    }

    /// Builds this group's unresolved options from a raw mapping.
    /// Keys that are absent keep their defaults.
    pub fn instantiate(self, value: Value) -> Result<GroupOptions, ConfigurationError> {
        Ok(match self {
            OptionGroup::Align => GroupOptions::Align(self.deserialize(value)?),
            OptionGroup::Filter => GroupOptions::Filter(self.deserialize(value)?),
            OptionGroup::Highlight => GroupOptions::Highlight(self.deserialize(value)?),
            OptionGroup::Layout => GroupOptions::Layout(self.deserialize(value)?),
            OptionGroup::Line => GroupOptions::Line(self.deserialize(value)?),
            OptionGroup::Metric => GroupOptions::Metric(self.deserialize(value)?),
            OptionGroup::Record => GroupOptions::Record(self.deserialize(value)?),
            OptionGroup::Stacktrace => GroupOptions::Stacktrace(self.deserialize(value)?),
        })
    }

    fn deserialize<T: DeserializeOwned>(self, value: Value) -> Result<T, ConfigurationError> {
        serde_json::from_value(value).map_err(|source| ConfigurationError::InvalidGroup {
            group: self.name(),
            source,
        })
    }
}

impl FromStr for OptionGroup {
    type Err = ConfigurationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        OptionGroup::from_name(name)
    }
}

impl Display for OptionGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// Unresolved options of a single group, tagged by group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupOptions {
    Align(UnresolvedAlignOptions),
    Filter(UnresolvedFilterOptions),
    Highlight(UnresolvedHighlightOptions),
    Layout(UnresolvedLayoutOptions),
    Line(UnresolvedLineOptions),
    Metric(UnresolvedMetricOptions),
    Record(UnresolvedRecordOptions),
    Stacktrace(UnresolvedStacktraceOptions),
}


/// All groups in their unresolved form. Groups missing from the input keep their defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnresolvedOptions {
    pub align: UnresolvedAlignOptions,
    pub filter: UnresolvedFilterOptions,
    pub highlight: UnresolvedHighlightOptions,
    pub layout: UnresolvedLayoutOptions,
    pub line: UnresolvedLineOptions,
    pub metric: UnresolvedMetricOptions,
    pub record: UnresolvedRecordOptions,
    pub stacktrace: UnresolvedStacktraceOptions,
}

impl UnresolvedOptions {
    /// Instantiates every group present in a merged raw configuration.
    pub fn from_merged(merged: Map<String, Value>) -> Result<Self, ConfigurationError> {
        let mut options = UnresolvedOptions::default();

        for (name, value) in merged {
            let group = OptionGroup::from_name(&name)?;
            options.set(group.instantiate(value)?);
        }

        Ok(options)
    }

    fn set(&mut self, group_options: GroupOptions) {
        match group_options {
            GroupOptions::Align(align) => self.align = align,
            GroupOptions::Filter(filter) => self.filter = filter,
            GroupOptions::Highlight(highlight) => self.highlight = highlight,
            GroupOptions::Layout(layout) => self.layout = layout,
            GroupOptions::Line(line) => self.line = line,
            GroupOptions::Metric(metric) => self.metric = metric,
            GroupOptions::Record(record) => self.record = record,
            GroupOptions::Stacktrace(stacktrace) => self.stacktrace = stacktrace,
        }
    }
}
