//! Shared utility functions for gext crates

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Get the user's home directory
///
/// Prefers the HOME environment variable over dirs::home_dir() so that
/// tests and sandboxed sessions can redirect it.
pub fn get_home_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return Ok(PathBuf::from(home));
        }
    }

    dirs::home_dir().ok_or_else(|| Error::configuration("Could not determine home directory"))
}

/// Expand a leading `~` or `~/` against the home directory
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return get_home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(get_home_dir()?.join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}

/// Extract the version token from `gnome-shell --version` output
///
/// `"GNOME Shell 46.2\n"` becomes `"46.2"`.
pub fn parse_shell_version(output: &str) -> Option<String> {
    let token = output.split_whitespace().last()?;
    if token.chars().next()?.is_ascii_digit() {
        Some(token.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_expand_home() {
        let previous = std::env::var("HOME").ok();
        std::env::set_var("HOME", "/home/tester");
        let home_relative = expand_home("~/.local/share").unwrap();
        let bare = expand_home("~").unwrap();
        match previous {
            Some(home) => std::env::set_var("HOME", home),
            None => std::env::remove_var("HOME"),
        }

        assert_eq!(home_relative, PathBuf::from("/home/tester/.local/share"));
        assert_eq!(bare, PathBuf::from("/home/tester"));
        assert_eq!(expand_home("/opt/ext").unwrap(), PathBuf::from("/opt/ext"));
        assert_eq!(expand_home("~other/x").unwrap(), PathBuf::from("~other/x"));
    }

    #[test]
    fn test_parse_shell_version() {
        assert_eq!(
            parse_shell_version("GNOME Shell 46.2\n"),
            Some("46.2".to_string())
        );
        assert_eq!(parse_shell_version("GNOME Shell 40.0"), Some("40.0".to_string()));
        assert_eq!(parse_shell_version("command not found"), None);
        assert_eq!(parse_shell_version(""), None);
    }
}
