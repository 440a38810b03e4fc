//! Path resolution (pure, no I/O)
//!
//! Maps a metadata-relative application path to the final absolute path:
//! batch-script rewrite, native-executable substitution, collection-root
//! join. Total over its input domain; a bad path surfaces later as a spawn
//! error, never here.

use crate::launch::types::OsKind;
use crate::mappings::ExecMapping;

/// Replace every separator (either slash style) with the target OS's own.
pub fn normalize_separators(path: &str, os: OsKind) -> String {
    let sep = os.separator();
    path.chars()
        .map(|c| if c == '/' || c == '\\' { sep } else { c })
        .collect()
}

/// Batch scripts cannot run outside Windows or a compatibility layer;
/// collections ship a parallel Unix sibling next to each `.bat`.
fn rewrite_batch_extension(path: &str, os: OsKind) -> String {
    if !os.is_windows() && path.to_ascii_lowercase().ends_with(".bat") {
        let mut rewritten = path[..path.len() - 4].to_string();
        rewritten.push_str(".command");
        return rewritten;
    }
    path.to_string()
}

fn substitute_native(path: String, exec_mappings: &[ExecMapping], os: OsKind) -> String {
    for mapping in exec_mappings {
        if mapping.win32 != path {
            continue;
        }
        let native = match os {
            OsKind::Linux => mapping.linux.as_deref(),
            OsKind::MacOs => mapping.darwin.as_deref(),
            OsKind::Windows => None,
        };
        return match native {
            Some(native) if !native.is_empty() => native.to_string(),
            _ => path,
        };
    }
    path
}

/// Resolve a metadata-relative application path against the collection root.
pub fn resolve_app_path(
    relative: &str,
    collection_root: &str,
    exec_mappings: &[ExecMapping],
    native: bool,
    os: OsKind,
) -> String {
    let mut path = rewrite_batch_extension(relative.trim(), os);

    if native && !os.is_windows() {
        path = substitute_native(path, exec_mappings, os);
    }

    let sep = os.separator();
    let root = normalize_separators(collection_root, os);
    let root = root.trim_end_matches(sep);
    let path = normalize_separators(&path, os);
    let path = path.trim_start_matches(sep);

    if path.is_empty() {
        return root.to_string();
    }
    format!("{}{}{}", root, sep, path)
}

/// Swap the filename component of a path, keeping its separator style.
pub fn rewrite_filename(path: &str, new_name: &str) -> String {
    match path.rfind(['/', '\\']) {
        Some(idx) => format!("{}{}", &path[..idx + 1], new_name),
        None => new_name.to_string(),
    }
}
