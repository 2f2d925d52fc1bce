//! Word inflection used when mapping scope names onto schema names.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Returns the plural form of `word`: `player` → `players`.
///
/// Only the final segment of a snake case word is inflected, so
/// `team_member` becomes `team_members`.
pub fn pluralize(word: &str) -> String {
    inflect_last_segment(word, 2)
}

/// Returns the singular form of `word`: `players` → `player`.
pub fn singularize(word: &str) -> String {
    inflect_last_segment(word, 1)
}

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

fn inflect_last_segment(word: &str, count: isize) -> String {
    match word.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => {
            format!("{head}_{}", pluralizer::pluralize(last, count, false))
        }
        _ => pluralizer::pluralize(word, count, false),
    }
}
