use std::path::{Path, PathBuf};

/// Shorten a path under the home directory to `~/...` for display
///
/// Matching is by whole path components, so `/home/al` is not treated as a prefix of
/// `/home/alice`.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use rimcomplete::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Library/Caches/rimcomplete");
/// // "~/Library/Caches/rimcomplete" when the home directory is /Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    shorten_home(path, dirs::home_dir().as_deref())
}

fn shorten_home(path: &Path, home: Option<&Path>) -> String {
    let relative = home
        .filter(|home| !home.as_os_str().is_empty())
        .and_then(|home| path.strip_prefix(home).ok());

    match relative {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => PathBuf::from("~").join(rest).to_string_lossy().into_owned(),
        None => path.to_string_lossy().into_owned(),
    }
}
