//! `@` mention detection, filtering and insertion.
//!
//! All functions here are pure; the editor controller calls them on every
//! keystroke and selection.

use crate::models::Person;

pub const MENTION_TRIGGER: char = '@';

/// The lowercased query after `@` when the last whitespace-delimited token is
/// a mention trigger. `Some("")` for a bare `@`.
pub fn mention_query(text: &str) -> Option<String> {
    // `split` keeps a trailing empty token, so "hi @al " has no trigger.
    let last = text.split(char::is_whitespace).last().unwrap_or("");
    last.strip_prefix(MENTION_TRIGGER).map(str::to_lowercase)
}

/// People whose display name contains `query` (case-insensitive), in
/// directory order, at most `limit` of them.
pub fn filter_candidates(users: &[Person], query: &str, limit: usize) -> Vec<Person> {
    let query = query.to_lowercase();
    users
        .iter()
        .filter(|p| p.display_name().to_lowercase().contains(&query))
        .take(limit)
        .cloned()
        .collect()
}

/// Candidates for the current text; empty when the cursor token is not a
/// mention trigger.
pub fn candidates_for(text: &str, users: &[Person], limit: usize) -> Vec<Person> {
    match mention_query(text) {
        Some(query) => filter_candidates(users, &query, limit),
        None => Vec::new(),
    }
}

/// Replace the last word of `text` with `@{name} `.
///
/// Returns `None` when the person has no display name.
pub fn insert_mention(text: &str, person: &Person) -> Option<String> {
    if !person.has_display_name() {
        return None;
    }
    // Word boundary is any whitespace, same as `mention_query`.
    let keep = text
        .char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    Some(format!(
        "{}{}{} ",
        &text[..keep],
        MENTION_TRIGGER,
        person.display_name()
    ))
}
