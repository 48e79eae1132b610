//! Path utilities for the Zellij sandbox.
//!
//! Inside the plugin sandbox the host filesystem is mounted under `/host`,
//! which points at the cwd of the last focused terminal (usually `$HOME`).

use std::path::PathBuf;

/// Sandbox view of the host directory.
pub const HOST_ROOT: &str = "/host";

/// Returns the plugin data directory, `/host/.local/share/zellij/actionboard`.
///
/// Holds the key-value state file and the trace output.
///
/// ```
/// use actionboard::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/actionboard")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("actionboard")
}

/// Location of the persisted key-value state.
#[must_use]
pub fn state_file_path() -> PathBuf {
    get_data_dir().join("state.json")
}

/// Expands a leading `~` to the sandbox host root.
///
/// ```
/// use actionboard::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/exports"), "/host/exports");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/out"), "/tmp/out");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path == "~" {
        HOST_ROOT.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{HOST_ROOT}/{rest}")
    } else {
        path.to_string()
    }
}

/// Removes the `/host` prefix so paths read as they do on the host.
///
/// ```
/// use actionboard::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/stock_actions.csv"), "~/stock_actions.csv");
/// assert_eq!(strip_host_prefix("/host"), "~");
/// assert_eq!(strip_host_prefix("/tmp/a.csv"), "/tmp/a.csv");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix(HOST_ROOT) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_file_lives_in_data_dir() {
        assert_eq!(state_file_path().parent(), Some(get_data_dir().as_path()));
        assert!(state_file_path().ends_with("state.json"));
    }

    #[test]
    fn host_prefix_must_be_a_whole_component() {
        assert_eq!(strip_host_prefix("/hostile/file"), "/hostile/file");
    }
}
