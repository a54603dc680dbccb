use serde::Serialize;

/// Kind label every definition suggestion carries
pub const SUGGESTION_KIND: &str = "constant";

/// One autocomplete result for the editor host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Text inserted on acceptance (the defName)
    pub text: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Category label, equal to the type key
    pub left_label: String,
    pub description: String,
    /// The `<word>*<filter>` text the suggestion replaces
    pub replacement_prefix: String,
}

impl Suggestion {
    pub fn new(def_type: &str, name: &str, replacement_prefix: &str) -> Self {
        Self {
            text: name.to_string(),
            kind: SUGGESTION_KIND,
            left_label: def_type.to_string(),
            description: format!("{}: {}", def_type, name),
            replacement_prefix: replacement_prefix.to_string(),
        }
    }
}
