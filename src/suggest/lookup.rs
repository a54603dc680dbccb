use crate::indexer::DefinitionIndex;

/// Most names a single lookup returns
pub const MAX_SUGGESTIONS: usize = 50;

/// Names of `def_type` whose lowercase form contains the lowercase `filter`
///
/// Keeps index order and returns at most [`MAX_SUGGESTIONS`] names. An empty filter
/// matches everything.
///
/// # Examples
///
/// ```
/// use rimcomplete::indexer::DefinitionIndex;
/// use rimcomplete::suggest::lookup;
///
/// let mut index = DefinitionIndex::new();
/// for name in ["Apple", "Banana", "apricot"] {
///     index.insert("thing", name);
/// }
/// assert_eq!(lookup(&index, "thing", "a"), vec!["Apple", "Banana", "apricot"]);
/// assert_eq!(lookup(&index, "thing", "AP"), vec!["Apple", "apricot"]);
/// ```
pub fn lookup<'a>(index: &'a DefinitionIndex, def_type: &str, filter: &str) -> Vec<&'a str> {
    let needle = filter.to_lowercase();
    index
        .names(def_type)
        .iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .map(String::as_str)
        .collect()
}
