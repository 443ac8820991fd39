use std::path::PathBuf;

/// Normalize a user-provided local path string
///
/// - Trims surrounding whitespace, including a trailing space left by shell drag-and-drop
/// - Strips one pair of matching single or double quotes
/// - Expands a leading `~` to the HOME directory when it is set
pub fn normalize_user_input_path(input: &str) -> PathBuf {
    let trimmed = input.trim();

    let unquoted = ['"', '\'']
        .iter()
        .find_map(|&quote| {
            trimmed
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        })
        .unwrap_or(trimmed);

    if let Some(rest) = unquoted.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = std::env::var_os("HOME") {
                let mut buf = PathBuf::from(home);
                let rest = rest.trim_start_matches('/');
                if !rest.is_empty() {
                    buf.push(rest);
                }
                return buf;
            }
        }
    }

    PathBuf::from(unquoted)
}
