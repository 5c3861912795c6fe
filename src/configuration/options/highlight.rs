use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::values::{lenient, NestedList};
use crate::configuration::{errors::ConfigurationError, traits::ResolvableConfiguration};


#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default, deny_unknown_fields)]
pub struct UnresolvedHighlightOptions {
    phrases: NestedList,

    /// Space-separated phrase groups, e.g. `"timeout refused"`.
    phrase_groups: NestedList,

    prefixes: NestedList,

    keys: NestedList,

    #[serde(deserialize_with = "lenient")]
    off: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HighlightOptions {
    /// De-duplicated; ordering carries no meaning.
    pub phrases: BTreeSet<String>,

    pub prefixes: Vec<String>,

    /// Keys whose values are highlighted.
    pub keys: Vec<String>,

    pub off: bool,
}

impl ResolvableConfiguration for UnresolvedHighlightOptions {
    type Resolved = HighlightOptions;
    type Error = ConfigurationError;

    fn resolve(self) -> Result<Self::Resolved, Self::Error> {
        let mut phrases: BTreeSet<String> = self.phrases.flatten().into_iter().collect();

        for group in self.phrase_groups.flatten() {
            phrases.extend(
                group
                    .split(' ')
                    .filter(|phrase| !phrase.is_empty())
                    .map(str::to_string),
            );
        }


        Ok(HighlightOptions {
            phrases,
            prefixes: self.prefixes.flatten(),
            keys: self.keys.flatten(),
            off: self.off,
        })
    }
}
