//! Instantiation site discovery in usage files.
//!
//! Every known class name standing as a whole identifier and followed by an
//! angle-bracket argument list is an instantiation site. Names are searched
//! longest first and every matched span is consumed, so a shorter name is
//! never found again inside a longer one on the same line.

use std::ops::Range;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::scanning::constants::ConstantCollector;
use crate::scanning::source::{
    find_closing_angle, is_identifier_char, source_lines, split_top_level,
};
use crate::scanning::types::{
    RawInstantiation, SourceLocation, TemplateSignature, sort_longest_first,
};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Finds instantiations of a fixed set of template classes
#[derive(Debug, Clone)]
pub struct UsageScanner {
    signatures: Vec<TemplateSignature>,
}

impl UsageScanner {
    pub fn new(signatures: &[TemplateSignature]) -> Self {
        let mut signatures = signatures.to_vec();
        sort_longest_first(&mut signatures);
        Self { signatures }
    }

    pub fn signatures(&self) -> &[TemplateSignature] {
        &self.signatures
    }

    /// Instantiations on one processed line, in column order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientArguments`] when a site passes fewer
    /// arguments than its class requires.
    pub fn scan_line(&self, line: &str, location: &SourceLocation) -> Result<Vec<RawInstantiation>> {
        let mut consumed: Vec<Range<usize>> = Vec::new();
        let mut found: Vec<(usize, RawInstantiation)> = Vec::new();

        for signature in &self.signatures {
            let name = signature.name();
            let mut from = 0;

            while let Some(start) = find_identifier(line, name, from, &consumed) {
                let end = start + name.len();
                consumed.push(start..end);
                from = end;

                let Some(arguments) = argument_list(&line[end..]) else {
                    continue;
                };
                let arguments = normalize_arguments(arguments);
                let found_count = argument_count(&arguments);

                if found_count < signature.min_parameter_count() {
                    return Err(Error::InsufficientArguments {
                        class: name.to_string(),
                        found: found_count,
                        required: signature.min_parameter_count(),
                        location: location.to_string(),
                        line: line.to_string(),
                    });
                }

                found.push((
                    start,
                    RawInstantiation::new(signature.clone(), arguments, location.clone()),
                ));
            }
        }

        found.sort_by_key(|(column, _)| *column);
        Ok(found.into_iter().map(|(_, raw)| raw).collect())
    }
}

/// Scan one usage file, collecting its constants and instantiation sites in
/// a single pass over its lines.
pub fn scan_usage_source(
    path: &Path,
    content: &str,
    scanner: &UsageScanner,
    constants: &mut ConstantCollector,
) -> Result<Vec<RawInstantiation>> {
    let mut instantiations = Vec::new();

    for (line_number, line) in source_lines(content) {
        let location = SourceLocation::new(path, line_number);
        let on_line = scanner.scan_line(line, &location)?;
        if !on_line.is_empty() {
            debug!(%location, count = on_line.len(), "Found template instantiations");
        }
        instantiations.extend(on_line);
        constants.observe(line);
    }

    Ok(instantiations)
}

/// Next whole-identifier occurrence of `name` at or after `from` that does
/// not overlap a consumed span
fn find_identifier(line: &str, name: &str, from: usize, consumed: &[Range<usize>]) -> Option<usize> {
    let mut from = from;
    while let Some(offset) = line.get(from..)?.find(name) {
        let start = from + offset;
        let end = start + name.len();
        from = end;

        let before_ok = !line[..start].chars().next_back().is_some_and(is_identifier_char);
        let after_ok = !line[end..].chars().next().is_some_and(is_identifier_char);
        let free = !consumed.iter().any(|span| span.start < end && start < span.end);

        if before_ok && after_ok && free {
            return Some(start);
        }
    }
    None
}

/// Text between `<` and its matching `>` when `rest` opens an argument list
fn argument_list(rest: &str) -> Option<&str> {
    let inner = rest.trim_start().strip_prefix('<')?;
    let close = find_closing_angle(inner)?;
    Some(&inner[..close])
}

/// Trim every argument and collapse interior whitespace
pub fn normalize_arguments(arguments: &str) -> String {
    split_top_level(arguments)
        .into_iter()
        .map(|argument| WHITESPACE.replace_all(argument.trim(), " ").into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

/// Number of arguments in a normalized list; `<>` passes none
pub fn argument_count(arguments: &str) -> usize {
    if arguments.is_empty() {
        0
    } else {
        split_top_level(arguments).len()
    }
}
