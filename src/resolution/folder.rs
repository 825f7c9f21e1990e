//! Per-argument constant folding

use tracing::debug;

use crate::core::error::Result;
use crate::resolution::expr::evaluate;
use crate::scanning::source::split_top_level;

const OPERATORS: [char; 4] = ['+', '-', '*', '/'];

/// Split a resolved argument list and fold each arithmetic argument.
///
/// Arguments without an operator pass through unchanged.
///
/// # Errors
///
/// Returns [`crate::core::Error::Expression`] when an argument holds an
/// operator but is not a literal arithmetic expression.
pub fn fold_arguments(arguments: &str) -> Result<Vec<String>> {
    if arguments.is_empty() {
        return Ok(Vec::new());
    }

    split_top_level(arguments)
        .into_iter()
        .map(|argument| fold_argument(argument.trim()))
        .collect()
}

pub fn fold_argument(argument: &str) -> Result<String> {
    if !argument.contains(OPERATORS) {
        return Ok(argument.to_string());
    }
    let folded = evaluate(argument)?.to_string();
    debug!(expression = %argument, value = %folded, "Folded template argument");
    Ok(folded)
}
