//! Path helpers for the `/host` sandbox mount.

use std::path::PathBuf;

/// Default directory for favorites and trace output.
///
/// `/host` is the cwd of the last focused terminal (usually `$HOME`), so this
/// normally lands in `~/.local/share/zellij/bookfinder`.
///
/// ```
/// use bookfinder::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/bookfinder")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("bookfinder")
}

/// Maps `~` and `~/…` onto `/host`. Other paths pass through.
///
/// ```
/// use bookfinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/mocha.toml"), "/host/themes/mocha.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/bookfinder"), "/etc/bookfinder");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

/// Drops the `/host` prefix so paths read as they do on the host.
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix("/host") {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("notes/~draft"), "notes/~draft");
        assert_eq!(expand_tilde("~user/x"), "~user/x");
    }

    #[test]
    fn strip_host_prefix_renders_home_relative() {
        assert_eq!(
            strip_host_prefix("/host/.local/share/zellij/bookfinder"),
            "~/.local/share/zellij/bookfinder"
        );
        assert_eq!(strip_host_prefix("/host"), "~");
        assert_eq!(strip_host_prefix("/hostname/x"), "/hostname/x");
        assert_eq!(strip_host_prefix("/tmp/x"), "/tmp/x");
    }

    #[test]
    fn expand_then_strip_round_trips_home_paths() {
        let host = expand_tilde("~/books");
        assert_eq!(strip_host_prefix(&host), "~/books");
    }
}
