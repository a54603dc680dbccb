use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::models::{DEF_TYPES, Identifier};

/// How strictly tag and attribute names are matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    /// Prefix matching: `<ThingDef` also matches `<ThingDefs`, and `Name="` also matches
    /// inside `ParentName="`. This is what existing caches were built with.
    #[default]
    Compatible,
    /// Tag names must end at whitespace, `>` or `/`; only a whole `Name` attribute counts.
    Strict,
}

static DEF_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<defName>([^<]+)</defName>").expect("defName pattern is valid")
});

/// Precompiled per-tag patterns, same order as [`DEF_TYPES`]
struct TagPatterns {
    key: &'static str,
    open: String,
    close: String,
    name_attr: Regex,
    strict_name_attr: Regex,
}

static TAG_PATTERNS: LazyLock<Vec<TagPatterns>> = LazyLock::new(|| {
    DEF_TYPES
        .iter()
        .map(|mapping| TagPatterns {
            key: mapping.key,
            open: format!("<{}", mapping.tag),
            close: format!("</{}>", mapping.tag),
            name_attr: Regex::new(&format!(r#"<{}[^>]*Name="([^"]+)""#, mapping.tag))
                .expect("Name attribute pattern is valid"),
            strict_name_attr: Regex::new(&format!(
                r#"<{}\s(?:[^>]*\s)?Name="([^"]+)""#,
                mapping.tag
            ))
            .expect("strict Name attribute pattern is valid"),
        })
        .collect()
});

/// Extract every (type key, defName) pair from a markup document
///
/// Two independent rules contribute:
///
/// 1. Each `<defName>X</defName>` is attributed to the first recognized tag (in
///    [`DEF_TYPES`] order) whose last opening before the occurrence comes after its last
///    closing. At most one pair per occurrence.
/// 2. Each recognized opening tag carrying `Name="Y"` yields a pair for that tag's type,
///    regardless of nesting.
///
/// Pairs are returned in discovery order and may contain duplicates; deduplication
/// happens when they are merged into an index.
///
/// # Examples
///
/// ```
/// use rimcomplete::parsers::extract_definitions;
///
/// let xml = r#"<Defs><HediffDef><defName>Flu</defName></HediffDef></Defs>"#;
/// let pairs = extract_definitions(xml);
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].def_type, "hediff");
/// assert_eq!(pairs[0].name, "Flu");
/// ```
pub fn extract_definitions(text: &str) -> Vec<Identifier> {
    extract_definitions_with_mode(text, ExtractMode::Compatible)
}

/// [`extract_definitions`] with an explicit matching mode
pub fn extract_definitions_with_mode(text: &str, mode: ExtractMode) -> Vec<Identifier> {
    let mut found = Vec::new();

    let mut def_names = DEF_NAME_RE.captures_iter(text).peekable();
    if def_names.peek().is_some() {
        let occurrences: Vec<TagOccurrences> = TAG_PATTERNS
            .iter()
            .map(|patterns| TagOccurrences::collect(text, patterns, mode))
            .collect();

        for captures in def_names {
            let (Some(whole), Some(value)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            if let Some(key) = enclosing_key(&occurrences, whole.start()) {
                found.push(Identifier::new(key, value.as_str()));
            }
        }
    }

    for patterns in TAG_PATTERNS.iter() {
        let regex = match mode {
            ExtractMode::Compatible => &patterns.name_attr,
            ExtractMode::Strict => &patterns.strict_name_attr,
        };
        for captures in regex.captures_iter(text) {
            if let Some(value) = captures.get(1) {
                found.push(Identifier::new(patterns.key, value.as_str()));
            }
        }
    }

    found
}

/// `(start, end)` byte range of one tag occurrence
type Span = (usize, usize);

/// Opening and closing occurrences of one tag, in document order
struct TagOccurrences {
    key: &'static str,
    opens: Vec<Span>,
    closes: Vec<Span>,
}

impl TagOccurrences {
    fn collect(text: &str, patterns: &TagPatterns, mode: ExtractMode) -> Self {
        let (opens, closes) = match mode {
            ExtractMode::Compatible => {
                (find_spans(text, &patterns.open), find_spans(text, &patterns.close))
            }
            ExtractMode::Strict => (
                find_whole_tag_spans(text, &patterns.open),
                find_whole_tag_spans(text, &patterns.close[..patterns.close.len() - 1]),
            ),
        };
        Self { key: patterns.key, opens, closes }
    }
}

/// Type key of the first tag (in table order) still open at `position`
///
/// A tag counts as open when its last opening that ends before `position` comes after its
/// last closing that ends before `position`.
fn enclosing_key(occurrences: &[TagOccurrences], position: usize) -> Option<&'static str> {
    occurrences.iter().find_map(|tag| {
        let open = last_start_before(&tag.opens, position)?;
        // Absent closing tag sorts before any opening tag
        last_start_before(&tag.closes, position)
            .is_none_or(|close| close < open)
            .then_some(tag.key)
    })
}

/// Start of the last span lying entirely before `limit`
fn last_start_before(spans: &[Span], limit: usize) -> Option<usize> {
    let count = spans.partition_point(|&(_, end)| end <= limit);
    count.checked_sub(1).map(|index| spans[index].0)
}

fn find_spans(text: &str, needle: &str) -> Vec<Span> {
    text.match_indices(needle).map(|(start, _)| (start, start + needle.len())).collect()
}

/// Occurrences of `prefix` (e.g. `<ThingDef`) followed by whitespace, `>` or `/`
///
/// The span includes the terminating character.
fn find_whole_tag_spans(text: &str, prefix: &str) -> Vec<Span> {
    text.match_indices(prefix)
        .filter_map(|(start, _)| {
            let end = start + prefix.len();
            let next = text[end..].chars().next()?;
            (next.is_whitespace() || next == '>' || next == '/')
                .then(|| (start, end + next.len_utf8()))
        })
        .collect()
}

/// Read a markup file and extract its definitions
///
/// Never fails: an unreadable file yields no pairs. Invalid UTF-8 is decoded lossily so
/// one bad byte does not hide the rest of the document.
pub fn parse_def_file(path: &Path, mode: ExtractMode) -> Vec<Identifier> {
    match fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            let found = extract_definitions_with_mode(&text, mode);
            if found.is_empty() {
                debug!("No definitions found in {}", path.display());
            }
            found
        }
        Err(e) => {
            debug!("Skipping unreadable file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
