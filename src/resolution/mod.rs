//! Resolution domain module - turns raw argument text into literal values
//!
//! Raw instantiation sites are rewritten with the pipeline's constant table,
//! each argument is folded when it is an arithmetic expression, and the
//! results are collapsed into a set of distinct instantiations.

pub mod expr;
pub mod folder;
pub mod resolver;
pub mod types;

pub use folder::*;
pub use resolver::*;
pub use types::*;

use tracing::debug;

use crate::core::error::Result;
use crate::scanning::{ConstantTable, RawInstantiation};

/// Resolve every raw instantiation against `constants` and deduplicate.
///
/// # Errors
///
/// Fails on the first argument that cannot be folded; nothing is returned
/// for the other sites in that case.
pub fn resolve_instantiations(
    raw: &[RawInstantiation],
    constants: &ConstantTable,
) -> Result<InstantiationSet> {
    let resolver = ConstantResolver::new(constants);
    let mut set = InstantiationSet::new();

    for site in raw {
        let substituted = resolver.resolve(&site.raw_arguments);
        let arguments = fold_arguments(&substituted)?;
        let resolved = ResolvedInstantiation::new(site.signature.name(), arguments);
        if !set.insert(resolved) {
            debug!(location = %site.location, "Duplicate instantiation collapsed");
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanning::{ConstantEntry, SourceLocation, TemplateSignature};
    use std::path::Path;

    fn site(name: &str, arguments: &str, line: usize) -> RawInstantiation {
        RawInstantiation::new(
            TemplateSignature::new(name, 1),
            arguments,
            SourceLocation::new(Path::new("use.cpp"), line),
        )
    }

    #[test]
    fn test_equivalent_arguments_collapse_to_one() {
        let constants: ConstantTable = [ConstantEntry::new("SIZE", "5")].into_iter().collect();
        let raw = vec![
            site("Action", "int,SIZE+1", 1),
            site("Action", "int,6", 2),
            site("Action", "int,3*2", 3),
            site("Action", "int,7", 4),
        ];

        let set = resolve_instantiations(&raw, &constants).unwrap();
        assert_eq!(
            set.declarations(),
            vec!["template class Action<int,6>;", "template class Action<int,7>;"]
        );
    }

    #[test]
    fn test_unfoldable_argument_aborts_resolution() {
        let raw = vec![site("Action", "int,6", 1), site("Action", "int,MISSING+1", 2)];
        assert!(resolve_instantiations(&raw, &ConstantTable::new()).is_err());
    }
}
