//! UNIX-style path normalization utilities.
//!
//! Storage backends address content with string paths. These functions
//! resolve relative segments and platform separators into a canonical
//! form so that every backend sees the same spelling of a path,
//! regardless of how the caller wrote it.

/// Normalize a path by resolving `.`/`..` segments and converting
/// backslashes to forward slashes.
///
/// # Postconditions
/// - Output uses `/` exclusively
/// - No `.` segments, no empty or duplicate separators
/// - No `..` segments other than unresolvable leading ones on a
///   relative path
/// - Idempotent: normalizing a normalized path is a no-op
///
/// An absolute path can never ascend above its root prefix; a relative
/// path keeps leading `..` segments verbatim because there is no root
/// to resolve them against.
pub fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    let prefix = absolute_prefix(&path);
    let rest = &path[prefix.len()..];

    let mut tokens: Vec<&str> = Vec::new();
    for part in rest.split('/').filter(|p| !p.is_empty()) {
        match part {
            "." => {}
            ".." => match tokens.last() {
                Some(&last) if last != ".." => {
                    tokens.pop();
                }
                Some(_) => tokens.push(".."),
                None if !prefix.is_empty() => {}
                None => tokens.push(".."),
            },
            _ => tokens.push(part),
        }
    }

    format!("{}{}", prefix, tokens.join("/"))
}

/// Whether the given path is anchored to a filesystem root rather than
/// a relative location.
pub fn is_absolute(path: &str) -> bool {
    !absolute_prefix(path).is_empty()
}

/// Extract the absolute prefix of a path, lowercased.
///
/// The prefix is an optional alphabetic drive- or protocol-style label
/// followed by one or two slashes (`/`, `//`, `c:/`, `file://`).
/// Returns the empty string when the path carries no such prefix.
///
/// This is the sole authority for prefix detection; [`normalize`] and
/// [`is_absolute`] delegate here rather than re-matching.
pub fn absolute_prefix(path: &str) -> String {
    let bytes = path.as_bytes();

    let mut label = 0;
    while label < bytes.len() && bytes[label].is_ascii_alphabetic() {
        label += 1;
    }
    // The label only counts when terminated by a colon.
    let start = if label > 0 && bytes.get(label) == Some(&b':') {
        label + 1
    } else {
        0
    };

    let mut end = start;
    while end < bytes.len() && bytes[end] == b'/' && end - start < 2 {
        end += 1;
    }
    if end == start {
        return String::new();
    }

    path[..end].to_ascii_lowercase()
}

/// Directory name of a path, UNIX-style.
///
/// Backslashes are converted to slashes first; the result is the
/// portion preceding the final separator. `.`/`..` segments are left
/// untouched. A path with no separator has parent `"."`; the parent of
/// a root-level entry is `"/"`.
pub fn dirname(path: &str) -> String {
    let path = path.replace('\\', "/");
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        return if path.is_empty() {
            String::new()
        } else {
            "/".to_string()
        };
    }

    match trimmed.rfind('/') {
        None => ".".to_string(),
        Some(pos) => {
            let parent = trimmed[..pos].trim_end_matches('/');
            if parent.is_empty() {
                "/".to_string()
            } else {
                parent.to_string()
            }
        }
    }
}
