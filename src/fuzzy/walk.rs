//! Recursive filesystem walk feeding a [`super::Finder`].

use super::Finder;
use std::path::Path;

const BLOCKED_DIRS: &[&str] = &["node_modules", "target", "dist", "build", ".git"];

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn is_blocked(name: &str) -> bool {
    is_hidden(name) || BLOCKED_DIRS.contains(&name)
}

/// Walks `root` up to `max_depth` directories deep, adding every regular file found to `finder`.
/// Hidden entries and common build-output directories are skipped. I/O errors on individual
/// entries (permission denied, broken symlinks) are recovered locally: that entry is skipped and
/// the walk continues. A `root` that cannot be opened at all yields no entries.
pub fn find_files(finder: &mut Finder, root: &Path, max_depth: usize) {
    walk(finder, root, root, max_depth);
}

fn walk(finder: &mut Finder, root: &Path, dir: &Path, depth_remaining: usize) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let name = entry.file_name();
        let Some(name_str) = name.to_str() else { continue };
        if is_blocked(name_str) {
            continue;
        }
        let Ok(file_type) = entry.file_type() else { continue };
        let path = entry.path();

        if file_type.is_dir() {
            if depth_remaining > 0 {
                walk(finder, root, &path, depth_remaining - 1);
            }
        } else if file_type.is_file() {
            let display = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            finder.add_entry(path.to_string_lossy().into_owned(), display);
        }
    }
}
