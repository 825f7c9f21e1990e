//! Constant substitution in raw argument lists.
//!
//! Substitution is textual: every occurrence of a constant name is replaced,
//! whether or not it stands as a whole identifier. Names are applied longest
//! first so that `NMAX` is rewritten before `N` can corrupt it.

use crate::scanning::{ConstantEntry, ConstantTable};

/// Rewrites raw argument text with the values of a constant table
#[derive(Debug, Clone)]
pub struct ConstantResolver<'a> {
    ordered: Vec<&'a ConstantEntry>,
}

impl<'a> ConstantResolver<'a> {
    pub fn new(table: &'a ConstantTable) -> Self {
        Self {
            ordered: table.by_descending_length(),
        }
    }

    pub fn resolve(&self, raw_arguments: &str) -> String {
        self.ordered
            .iter()
            .fold(raw_arguments.to_string(), |text, entry| {
                if text.contains(entry.name.as_str()) {
                    text.replace(entry.name.as_str(), &entry.value)
                } else {
                    text
                }
            })
    }
}
