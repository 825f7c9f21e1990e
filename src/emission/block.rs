//! Generated block rendering and splicing into the target file.
//!
//! Everything before the first line containing the marker is preserved byte
//! for byte. The marker line and everything after it belong to the
//! generator and are replaced on every run.

use tracing::debug;

use crate::resolution::InstantiationSet;

/// Second line of every generated block
pub const NOTICE: &str = "// Do not add or modify anything after these comments";

/// Separation appended before a block written for the first time
pub const FIRST_RUN_SEPARATOR: &str = "\n\n\n";

/// Rewrites the trailing generated block of a target file
#[derive(Debug, Clone)]
pub struct InstantiationEmitter {
    marker: String,
}

impl InstantiationEmitter {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The marker line, the notice, then one declaration per instantiation
    pub fn render_block(&self, instantiations: &InstantiationSet) -> String {
        let mut block = String::new();
        block.push_str(&self.marker);
        block.push('\n');
        block.push_str(NOTICE);
        block.push('\n');
        for declaration in instantiations.declarations() {
            block.push_str(&declaration);
            block.push('\n');
        }
        block
    }

    /// Content of `existing` before the marker line, if the marker is present
    pub fn preserved_prefix<'a>(&self, existing: &'a str) -> Option<&'a str> {
        let needle = self.marker.trim();
        let mut offset = 0;
        for line in existing.split_inclusive('\n') {
            if line.contains(needle) {
                return Some(&existing[..offset]);
            }
            offset += line.len();
        }
        None
    }

    /// Full new content of the target file
    pub fn emit(&self, existing: &str, instantiations: &InstantiationSet) -> String {
        let mut content = match self.preserved_prefix(existing) {
            Some(prefix) => {
                debug!("Replacing existing generated block");
                prefix.to_string()
            }
            None => {
                debug!("No generated block found, appending a new one");
                format!("{existing}{FIRST_RUN_SEPARATOR}")
            }
        };
        content.push_str(&self.render_block(instantiations));
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DEFAULT_MARKER;
    use crate::resolution::ResolvedInstantiation;

    fn set(entries: &[(&str, &[&str])]) -> InstantiationSet {
        let mut set = InstantiationSet::new();
        for (name, arguments) in entries {
            set.insert(ResolvedInstantiation::new(
                *name,
                arguments.iter().map(|a| a.to_string()).collect(),
            ));
        }
        set
    }

    #[test]
    fn test_first_run_appends_separator_and_block() {
        let emitter = InstantiationEmitter::new(DEFAULT_MARKER);
        let body = "void f() {}\n";
        let output = emitter.emit(body, &set(&[("MoveAction", &["2"])]));

        assert_eq!(
            output,
            format!(
                "void f() {{}}\n\n\n\n{DEFAULT_MARKER}\n{NOTICE}\ntemplate class MoveAction<2>;\n"
            )
        );
    }

    #[test]
    fn test_existing_block_is_replaced() {
        let emitter = InstantiationEmitter::new(DEFAULT_MARKER);
        let existing = format!(
            "int body;\r\n\n{DEFAULT_MARKER}\n{NOTICE}\ntemplate class MoveAction<9>;\ntemplate class Old<1>;\n"
        );
        let output = emitter.emit(&existing, &set(&[("MoveAction", &["2"]), ("MoveAction", &["4"])]));

        assert_eq!(
            output,
            format!(
                "int body;\r\n\n{DEFAULT_MARKER}\n{NOTICE}\ntemplate class MoveAction<2>;\ntemplate class MoveAction<4>;\n"
            )
        );
    }

    #[test]
    fn test_emit_is_idempotent() {
        let emitter = InstantiationEmitter::new(DEFAULT_MARKER);
        let instantiations = set(&[("Action", &["int", "6"])]);
        let once = emitter.emit("class body\n", &instantiations);
        let twice = emitter.emit(&once, &instantiations);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_prefix_is_preserved_for_any_block_size() {
        let emitter = InstantiationEmitter::new(DEFAULT_MARKER);
        let prefix = "// header\ntemplate<int R>\nvoid Move<R>::go() {}\n\n\n\n";
        let existing = format!("{prefix}{DEFAULT_MARKER}\n{NOTICE}\n");

        let large = set(&[("A", &["1"]), ("A", &["2"]), ("A", &["3"])]);
        let output = emitter.emit(&existing, &large);
        assert!(output.starts_with(prefix));
        assert_eq!(emitter.preserved_prefix(&output), Some(prefix));

        let empty = emitter.emit(&existing, &InstantiationSet::new());
        assert_eq!(emitter.preserved_prefix(&empty), Some(prefix));
    }

    #[test]
    fn test_custom_marker() {
        let emitter = InstantiationEmitter::new("// Generated with 'tools/templates_instantiations.py'");
        let existing = "x\n// Generated with 'tools/templates_instantiations.py'\nstale\n";
        let output = emitter.emit(existing, &InstantiationSet::new());
        assert_eq!(
            output,
            format!("x\n// Generated with 'tools/templates_instantiations.py'\n{NOTICE}\n")
        );
    }
}
