//! Variable-name helpers that work on plain strings, without a scanner.

use std::collections::BTreeSet;

/// `"(a, b c)"` → `["a", "b", "c"]`. One leading `(` and one trailing `)`
/// are optional.
pub fn variable_names_from_list(text: &str) -> Vec<String> {
    let s = text.trim();
    let s = s.strip_prefix('(').unwrap_or(s);
    let s = s.strip_suffix(')').unwrap_or(s);
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Identifiers used in a polynomial expression, sorted and without
/// repeats. Leading digits of a word are dropped (`3x` names `x`), and
/// words that then do not start with a letter are ignored.
pub fn variable_names_from_expression(text: &str) -> Vec<String> {
    let names: BTreeSet<&str> = text
        .split(|c: char| c.is_whitespace() || ",+-*/(){}[]^".contains(c))
        .map(|word| word.trim_start_matches(|c: char| c.is_ascii_digit()))
        .filter(|word| word.starts_with(char::is_alphabetic))
        .collect();
    names.into_iter().map(str::to_owned).collect()
}
