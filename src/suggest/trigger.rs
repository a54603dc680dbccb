use std::sync::LazyLock;

use regex::Regex;

use super::lookup::lookup;
use crate::indexer::DefinitionIndex;
use crate::models::Suggestion;

// ASCII word characters only, matching what editors treat as identifier text
static TRIGGER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)\*([A-Za-z0-9_]*)$").expect("trigger pattern is valid")
});

/// A `<word>*<filter>` request found at the end of a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger<'a> {
    /// Lowercased type key
    pub def_type: String,
    pub filter: &'a str,
    /// Full `<word>*<filter>` text, to be replaced on completion
    pub full_match: &'a str,
}

/// Find a trigger at the end of `line` (the text up to the cursor)
pub fn parse_trigger(line: &str) -> Option<Trigger<'_>> {
    let captures = TRIGGER_RE.captures(line)?;
    Some(Trigger {
        def_type: captures.get(1)?.as_str().to_lowercase(),
        filter: captures.get(2)?.as_str(),
        full_match: captures.get(0)?.as_str(),
    })
}

/// Autocomplete items for the text before the cursor
///
/// Returns nothing unless the line ends in `<word>*<filter>` and `<word>` names a type
/// present in the index.
pub fn suggestions_for_line(index: &DefinitionIndex, line: &str) -> Vec<Suggestion> {
    let Some(trigger) = parse_trigger(line) else {
        return Vec::new();
    };
    if !index.contains_type(&trigger.def_type) {
        return Vec::new();
    }

    lookup(index, &trigger.def_type, trigger.filter)
        .into_iter()
        .map(|name| Suggestion::new(&trigger.def_type, name, trigger.full_match))
        .collect()
}
