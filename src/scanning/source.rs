//! Line preprocessing and bracket-aware text helpers shared by the scanners

/// Strip a trailing `//` comment and surrounding whitespace
pub fn process_line(line: &str) -> &str {
    let code = match line.find("//") {
        Some(index) => &line[..index],
        None => line,
    };
    code.trim()
}

/// Processed, non-empty lines of `content` with their 1-based line numbers
pub fn source_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, process_line(line)))
        .filter(|(_, line)| !line.is_empty())
}

pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split on commas that are not nested inside `<>`, `()`, `[]` or `{}`
pub fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

pub fn count_top_level_commas(text: &str) -> usize {
    split_top_level(text).len() - 1
}

/// Byte offset of the `>` closing an angle bracket already opened.
///
/// `text` starts right after the opening `<`. Angle brackets inside
/// parentheses, brackets or braces are ignored.
pub fn find_closing_angle(text: &str) -> Option<usize> {
    let mut angle_depth = 1usize;
    let mut group_depth = 0usize;

    for (index, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => group_depth += 1,
            ')' | ']' | '}' => group_depth = group_depth.saturating_sub(1),
            '<' if group_depth == 0 => angle_depth += 1,
            '>' if group_depth == 0 => {
                angle_depth -= 1;
                if angle_depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_line_strips_comments_and_whitespace() {
        assert_eq!(process_line("  int a; // trailing"), "int a;");
        assert_eq!(process_line("// only a comment"), "");
        assert_eq!(process_line("\tMoveAction<2> m;\r"), "MoveAction<2> m;");
    }

    #[test]
    fn test_source_lines_skips_blank_lines_and_keeps_numbers() {
        let content = "first\n\n  // comment\nsecond // note\n";
        let lines: Vec<_> = source_lines(content).collect();
        assert_eq!(lines, vec![(1, "first"), (4, "second")]);
    }

    #[test]
    fn test_split_top_level_respects_nesting() {
        assert_eq!(split_top_level("int,6"), vec!["int", "6"]);
        assert_eq!(
            split_top_level("std::pair<int,int>,f(1,2),3"),
            vec!["std::pair<int,int>", "f(1,2)", "3"]
        );
        assert_eq!(split_top_level(""), vec![""]);
    }

    #[test]
    fn test_count_top_level_commas() {
        assert_eq!(count_top_level_commas("T"), 0);
        assert_eq!(count_top_level_commas("typename T, int N"), 1);
        assert_eq!(count_top_level_commas("std::map<K, V>, int"), 1);
    }

    #[test]
    fn test_find_closing_angle() {
        assert_eq!(find_closing_angle("int,6> a;"), Some(5));
        assert_eq!(find_closing_angle("std::vector<int>> v;"), Some(16));
        assert_eq!(find_closing_angle("(a>b)> x"), Some(5));
        assert_eq!(find_closing_angle("int, 6"), None);
    }
}
