//! Resolved instantiations and the deduplicating set that feeds emission

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

/// A fully resolved `ClassName<arg1,arg2,...>` instantiation.
///
/// Two values are identical iff their rendered forms are.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedInstantiation {
    pub class_name: String,
    pub arguments: Vec<String>,
}

impl ResolvedInstantiation {
    pub fn new(class_name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            class_name: class_name.into(),
            arguments,
        }
    }

    /// `ClassName<arg1,arg2,...>`
    pub fn render(&self) -> String {
        format!("{}<{}>", self.class_name, self.arguments.join(","))
    }

    /// `template class ClassName<arg1,arg2,...>;`
    pub fn declaration(&self) -> String {
        format!("template class {};", self.render())
    }
}

impl fmt::Display for ResolvedInstantiation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl PartialEq for ResolvedInstantiation {
    fn eq(&self, other: &Self) -> bool {
        self.render() == other.render()
    }
}

impl Eq for ResolvedInstantiation {}

impl Hash for ResolvedInstantiation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.render().hash(state);
    }
}

impl PartialOrd for ResolvedInstantiation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResolvedInstantiation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.render().cmp(&other.render())
    }
}

/// Distinct instantiations in the order they were first inserted
#[derive(Debug, Clone, Default)]
pub struct InstantiationSet {
    ordered: Vec<ResolvedInstantiation>,
    seen: HashSet<String>,
}

impl InstantiationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an identical instantiation is already present
    pub fn insert(&mut self, instantiation: ResolvedInstantiation) -> bool {
        if !self.seen.insert(instantiation.render()) {
            return false;
        }
        self.ordered.push(instantiation);
        true
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// One explicit instantiation declaration per entry
    pub fn declarations(&self) -> Vec<String> {
        self.ordered.iter().map(|i| i.declaration()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inst(name: &str, arguments: &[&str]) -> ResolvedInstantiation {
        ResolvedInstantiation::new(name, arguments.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn test_render_and_declaration() {
        let action = inst("Action", &["int", "6"]);
        assert_eq!(action.render(), "Action<int,6>");
        assert_eq!(action.declaration(), "template class Action<int,6>;");
        assert_eq!(inst("Defaults", &[]).declaration(), "template class Defaults<>;");
    }

    #[test]
    fn test_equality_uses_rendered_form() {
        assert_eq!(inst("Map", &["std::pair<int,int>"]), inst("Map", &["std::pair<int", "int>"]));
        assert_ne!(inst("Map", &["1", "2"]), inst("Map", &["1", "3"]));
    }

    #[test]
    fn test_set_deduplicates_and_keeps_first_seen_order() {
        let mut set = InstantiationSet::new();
        assert!(set.insert(inst("MoveAction", &["4"])));
        assert!(set.insert(inst("MoveAction", &["2"])));
        assert!(!set.insert(inst("MoveAction", &["4"])));

        assert_eq!(set.len(), 2);
        assert_eq!(
            set.declarations(),
            vec!["template class MoveAction<4>;", "template class MoveAction<2>;"]
        );
    }
}
