use serde::{Deserialize, Serialize};

use super::values::{explode_single_item_list, lenient, FilterType, LogLevel, NestedList};
use crate::configuration::{errors::ConfigurationError, traits::ResolvableConfiguration};


#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UnresolvedFilterOptions {
    include: NestedList,

    /// Secondary include source; merged into `include` on resolution.
    include_extra: NestedList,

    include_type: FilterType,

    exclude: NestedList,

    exclude_type: FilterType,

    prefixes: NestedList,

    exclude_prefixes: NestedList,

    log_levels: NestedList,

    #[serde(deserialize_with = "lenient")]
    off: bool,
}

impl Default for UnresolvedFilterOptions {
    fn default() -> Self {
        Self {
            include: NestedList::default(),
            include_extra: NestedList::default(),
            include_type: FilterType::All,
            exclude: NestedList::default(),
            exclude_type: FilterType::Any,
            prefixes: NestedList::default(),
            exclude_prefixes: NestedList::default(),
            log_levels: NestedList::default(),
            off: false,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FilterOptions {
    /// Phrases a line has to contain (see `include_type`).
    pub include: Vec<String>,

    pub include_type: FilterType,

    /// Phrases that drop a line (see `exclude_type`).
    pub exclude: Vec<String>,

    pub exclude_type: FilterType,

    pub prefixes: Vec<String>,

    pub exclude_prefixes: Vec<String>,

    pub log_levels: Vec<LogLevel>,

    pub off: bool,
}

impl ResolvableConfiguration for UnresolvedFilterOptions {
    type Resolved = FilterOptions;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let mut include = self.include.flatten();
        include.extend(self.include_extra.flatten());

        let exclude = explode_single_item_list(self.exclude.flatten());

        let log_levels = self
            .log_levels
            .flatten()
            .iter()
            .map(|level| {
                level
                    .parse::<LogLevel>()
                    .map_err(|reason| ConfigurationError::InvalidValue {
                        option: "filter.log_levels".to_string(),
                        reason,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;


        Ok(FilterOptions {
            include,
            include_type: self.include_type,
            exclude,
            exclude_type: self.exclude_type,
            prefixes: self.prefixes.flatten(),
            exclude_prefixes: self.exclude_prefixes.flatten(),
            log_levels,
            off: self.off,
        })
    }
}
