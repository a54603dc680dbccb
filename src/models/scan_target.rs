use std::path::PathBuf;

/// A `Defs` directory to walk, with the name shown in progress output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget {
    pub path: PathBuf,
    pub name: String,
}

impl ScanTarget {
    pub fn new(path: PathBuf, name: impl Into<String>) -> Self {
        Self { path, name: name.into() }
    }
}
