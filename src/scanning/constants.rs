//! Named constants visible to usage files.
//!
//! Three line shapes are recognised:
//!
//! - `#define NAME VALUE`, keeping only the first token of the value
//! - `using NAME = VALUE;`
//! - `const`/`constexpr` declarations, either `... NAME = VALUE;` or
//!   `... NAME { VALUE };`
//!
//! Anything else is ignored for constant purposes.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

static LAST_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\S+)\s*$").expect("valid regex"));
static BRACE_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*)\}\s*;").expect("valid regex"));

/// A macro, alias or constant definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    pub name: String,
    pub value: String,
}

impl ConstantEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Name -> value mapping scoped to one pipeline run.
///
/// Entries keep the position of their first definition; redefining a name
/// replaces its value.
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    entries: Vec<ConstantEntry>,
    index: HashMap<String, usize>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ConstantEntry) {
        match self.index.get(&entry.name) {
            Some(&position) => {
                debug!(name = %entry.name, value = %entry.value, "Redefining constant");
                self.entries[position].value = entry.value;
            }
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&position| self.entries[position].value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by descending name length, ties in definition order
    pub fn by_descending_length(&self) -> Vec<&ConstantEntry> {
        let mut ordered: Vec<&ConstantEntry> = self.entries.iter().collect();
        ordered.sort_by(|a, b| b.name.len().cmp(&a.name.len()));
        ordered
    }
}

impl FromIterator<ConstantEntry> for ConstantTable {
    fn from_iter<I: IntoIterator<Item = ConstantEntry>>(iter: I) -> Self {
        let mut table = Self::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

/// Records the constants defined on each processed line
#[derive(Debug, Default)]
pub struct ConstantCollector {
    table: ConstantTable,
}

impl ConstantCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect one comment-stripped, trimmed line
    pub fn observe(&mut self, line: &str) {
        if let Some(entry) = parse_constant(line) {
            debug!(name = %entry.name, value = %entry.value, "Collected constant");
            self.table.insert(entry);
        }
    }

    pub fn table(&self) -> &ConstantTable {
        &self.table
    }

    pub fn into_table(self) -> ConstantTable {
        self.table
    }
}

/// Parse a constant definition out of a processed line
pub fn parse_constant(line: &str) -> Option<ConstantEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.first() == Some(&"#define") {
        return parse_define(line, &tokens);
    }
    if !line.contains(';') {
        return None;
    }
    if tokens.contains(&"using") {
        let equal = line.find('=')?;
        return assignment(line, equal);
    }
    if tokens.contains(&"const") || tokens.contains(&"constexpr") {
        if let Some(equal) = line.find('=') {
            return assignment(line, equal);
        }
        let brace = line.find('{')?;
        let name = last_token(&line[..brace])?;
        let value = BRACE_VALUE.captures(&line[brace + 1..])?.get(1)?.as_str().trim();
        return entry(name, value);
    }
    None
}

fn parse_define(line: &str, tokens: &[&str]) -> Option<ConstantEntry> {
    let name = *tokens.get(1)?;
    if name.contains('(') {
        debug!(macro_name = %name, "Skipping function-like macro");
        return None;
    }
    if tokens.len() < 3 {
        warn!(macro_name = %name, "Macro defined without a value, ignoring");
        return None;
    }
    // the value is the token after the name; trailing comments and tokens are dropped
    entry(name, tokens[2])
}

/// `NAME = VALUE;` where `equal` is the position of `=`
fn assignment(line: &str, equal: usize) -> Option<ConstantEntry> {
    let name = last_token(&line[..equal])?;
    let tail = &line[equal + 1..];
    let value = tail[..tail.rfind(';')?].trim();
    entry(name, value)
}

fn last_token(text: &str) -> Option<&str> {
    LAST_TOKEN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

fn entry(name: &str, value: &str) -> Option<ConstantEntry> {
    if name.is_empty() || value.is_empty() {
        return None;
    }
    Some(ConstantEntry::new(name, value))
}
