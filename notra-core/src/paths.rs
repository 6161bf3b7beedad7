//! Path helpers shared by the builder and the installer
//!
//! Nothing here reads the process working directory; callers always pass
//! the base directory explicitly.

use std::path::{Component, Path, PathBuf};

/// Resolve `target` against `cwd` unless it is already absolute
pub fn resolve(cwd: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        cwd.join(target)
    }
}

/// Append a registry path to `base` segment by segment
///
/// Root and drive prefixes are dropped, so `/a/b.ts` lands at `base/a/b.ts`
/// instead of replacing `base` the way [`Path::join`] would. `.` and `..`
/// are kept as given.
pub fn join_under(base: &Path, relative: &str) -> PathBuf {
    let mut joined = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {}
            other => joined.push(other.as_os_str()),
        }
    }
    joined
}

/// Render a path with `/` separators regardless of platform
pub fn to_posix(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => out.push('/'),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

/// `path` relative to `base`, `/`-separated
///
/// Returns `None` when `path` is not under `base`.
pub fn relative_posix(base: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(base).ok().map(to_posix)
}

/// Whether a registry path stays inside the directory it is joined onto
///
/// Absolute paths, drive prefixes, and `..` segments that climb above the
/// start all escape.
pub fn stays_within(relative: &str) -> bool {
    let mut depth: usize = 0;
    for component in Path::new(relative).components() {
        match component {
            Component::Prefix(_) | Component::RootDir => return false,
            Component::CurDir => {}
            Component::ParentDir => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            Component::Normal(_) => depth += 1,
        }
    }
    true
}
