use serde::{Deserialize, Serialize};

use super::values::lenient;
use crate::configuration::{errors::ConfigurationError, traits::ResolvableConfiguration};


#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct UnresolvedAlignOptions {
    #[serde(deserialize_with = "lenient")]
    header_occurrence_check_limit: u64,

    #[serde(deserialize_with = "lenient")]
    off: bool,
}

impl Default for UnresolvedAlignOptions {
    fn default() -> Self {
        Self {
            header_occurrence_check_limit: 5000,
            off: true,
        }
    }
}

/// Header alignment. Disabled unless explicitly switched on.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AlignOptions {
    /// How many lines are sampled before the most frequent header length is fixed.
    pub header_occurrence_check_limit: u64,

    pub off: bool,
}

impl ResolvableConfiguration for UnresolvedAlignOptions {
    type Resolved = AlignOptions;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        Ok(AlignOptions {
            header_occurrence_check_limit: self.header_occurrence_check_limit,
            off: self.off,
        })
    }
}
