//! Template class signature extraction from a declarations file.
//!
//! The scanner works line by line on comment-stripped text. A line holding
//! `template<...>` opens a signature whose minimum parameter count is the
//! number of parameters minus the ones with a default value. The class name
//! is taken from the same line when it continues with `class Name`, or else
//! from the next non-blank line. When that line declares no class (a
//! template function, a member template) the pending signature is dropped.

use tracing::debug;

use crate::scanning::source::{
    count_top_level_commas, find_closing_angle, is_identifier_char, source_lines,
};
use crate::scanning::types::TemplateSignature;

/// A `template<...>` marker found on a line
#[derive(Debug, Clone, PartialEq, Eq)]
struct TemplateMarker<'a> {
    min_parameter_count: usize,
    /// Text following the closed parameter list
    rest: &'a str,
}

/// Extract every template class signature, in file order.
///
/// A name declared twice (e.g. by a later specialization) keeps its first
/// signature.
pub fn scan_definitions(content: &str) -> Vec<TemplateSignature> {
    let mut signatures: Vec<TemplateSignature> = Vec::new();
    let mut pending: Option<usize> = None;

    for (line_number, line) in source_lines(content) {
        if let Some(count) = pending.take() {
            match class_name(line) {
                Some(name) => push_signature(&mut signatures, name, count),
                None => debug!(
                    line = line_number,
                    "Template marker not followed by a class, discarding"
                ),
            }
        }

        if let Some(marker) = template_marker(line) {
            match class_name(marker.rest) {
                Some(name) => push_signature(&mut signatures, name, marker.min_parameter_count),
                None => pending = Some(marker.min_parameter_count),
            }
        }
    }

    signatures
}

fn push_signature(signatures: &mut Vec<TemplateSignature>, name: &str, count: usize) {
    if signatures.iter().any(|s| s.name() == name) {
        debug!(class = %name, "Ignoring repeated template class declaration");
        return;
    }
    debug!(class = %name, min_parameters = count, "Found template class");
    signatures.push(TemplateSignature::new(name, count));
}

/// Locate `template` followed by `<` and count its required parameters
fn template_marker(line: &str) -> Option<TemplateMarker<'_>> {
    let start = find_keyword(line, "template")?;
    let after = line[start + "template".len()..].trim_start();
    let inner = after.strip_prefix('<')?;

    let (parameters, rest) = match find_closing_angle(inner) {
        Some(close) => (&inner[..close], &inner[close + 1..]),
        None => (inner, ""),
    };

    let min_parameter_count = if parameters.trim().is_empty() {
        0
    } else {
        let defaults = parameters.matches('=').count();
        (count_top_level_commas(parameters) + 1).saturating_sub(defaults)
    };

    Some(TemplateMarker {
        min_parameter_count,
        rest,
    })
}

/// Name following a `class` or `struct` keyword
fn class_name(line: &str) -> Option<&str> {
    ["class", "struct"].iter().find_map(|keyword| {
        let start = find_keyword(line, keyword)?;
        let after = &line[start + keyword.len()..];
        if !after.starts_with(char::is_whitespace) {
            return None;
        }
        let after = after.trim_start();
        let end = after
            .find(|c: char| c.is_whitespace() || matches!(c, '{' | ':' | ';' | '<'))
            .unwrap_or(after.len());
        let name = &after[..end];
        (!name.is_empty()).then_some(name)
    })
}

/// Position of `keyword` standing as a whole word
fn find_keyword(line: &str, keyword: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(offset) = line[from..].find(keyword) {
        let start = from + offset;
        let end = start + keyword.len();
        let before_ok = !line[..start].chars().next_back().is_some_and(is_identifier_char);
        let after_ok = !line[end..].chars().next().is_some_and(is_identifier_char);
        if before_ok && after_ok {
            return Some(start);
        }
        from = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_counts(content: &str) -> Vec<(String, usize)> {
        scan_definitions(content)
            .into_iter()
            .map(|s| (s.name().to_string(), s.min_parameter_count()))
            .collect()
    }

    #[test]
    fn test_two_line_declarations() {
        let content = r#"
#pragma once
template<typename T>
class SingletonAction
{
};

template<int Radius, bool Blockable>
class SelectOnGridAction : public Action
{
};
template<int Radius>
class MoveAction final : public SelectOnGridAction<Radius, true>, public SingletonAction<MoveAction<Radius>>
{
};
"#;
        assert_eq!(
            names_and_counts(content),
            vec![
                ("SingletonAction".to_string(), 1),
                ("SelectOnGridAction".to_string(), 2),
                ("MoveAction".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_single_line_declaration() {
        let content = "template<typename T, int N> class Action;\n";
        assert_eq!(names_and_counts(content), vec![("Action".to_string(), 2)]);
    }

    #[test]
    fn test_default_parameters_reduce_minimum() {
        let content = "template<typename T, int N = 4, bool B = false>\nclass Grid {};\n";
        assert_eq!(names_and_counts(content), vec![("Grid".to_string(), 1)]);
    }

    #[test]
    fn test_template_function_is_discarded() {
        let content = r#"
template<typename T>
T clamp(T value, T low, T high);

template<int Size>
class Buffer
{
    template<typename U>
    void push(U value);
};
"#;
        assert_eq!(names_and_counts(content), vec![("Buffer".to_string(), 1)]);
    }

    #[test]
    fn test_comments_and_blank_lines_between_marker_and_class() {
        let content = "template<int A, int B> // two values\n\n// the class\nclass Pair{};\n";
        assert_eq!(names_and_counts(content), vec![("Pair".to_string(), 2)]);
    }

    #[test]
    fn test_explicit_instantiation_lines_are_not_markers() {
        let content = "template class MoveAction<2>;\ntemplate<int R>\nclass Ring {};\n";
        assert_eq!(names_and_counts(content), vec![("Ring".to_string(), 1)]);
    }

    #[test]
    fn test_specialization_keeps_first_signature() {
        let content = "template<typename T, typename U>\nclass Map;\ntemplate<>\nclass Map<int, int> {};\n";
        assert_eq!(names_and_counts(content), vec![("Map".to_string(), 2)]);
    }

    #[test]
    fn test_class_keyword_inside_identifier_is_ignored() {
        assert_eq!(class_name("subclass Foo"), None);
        assert_eq!(class_name("class Foo{"), Some("Foo"));
        assert_eq!(class_name("struct Bar : Base"), Some("Bar"));
    }
}
