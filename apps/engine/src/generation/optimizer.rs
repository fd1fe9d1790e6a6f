//! Optimizer: whitespace normalization and a guaranteed closing directive.
//! Idempotent: `optimize_prompt(optimize_prompt(x)) == optimize_prompt(x)`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::prompts::CLOSING_DIRECTIVE;

/// Three or more newlines, counting whitespace-only lines between them.
/// `[^\S\n]` is any Unicode whitespace except the newline itself.
static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[^\S\n]*\n){2,}").expect("valid newline regex"));

pub fn optimize_prompt(prompt: &str) -> String {
    let collapsed = EXCESS_NEWLINES.replace_all(prompt, "\n\n");
    let trimmed = collapsed.trim();

    if trimmed.ends_with(|c: char| matches!(c, '.' | '!' | '?')) {
        trimmed.to_string()
    } else if trimmed.is_empty() {
        CLOSING_DIRECTIVE.to_string()
    } else {
        format!("{trimmed}\n\n{CLOSING_DIRECTIVE}")
    }
}
