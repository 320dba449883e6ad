use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry path.
#[derive(Clone, Debug)]
pub(crate) struct SanitizedPath {
    pub resolved: PathBuf,
}

/// Resolve a stored entry name against the extraction base.
///
/// `base` must already be canonical. The entry name is taken as stored in
/// the archive, not as a zip library would pre-clean it, and the resolved
/// path must be `base` itself or nested under it.
pub(crate) fn sanitize_entry_path(entry_name: &str, base: &Path) -> Result<SanitizedPath> {
    if entry_name.contains('\0') {
        return Err(Error::InvalidPath);
    }

    // Archives written on Windows sometimes use `\` as separator.
    let unified = entry_name.replace('\\', "/");
    let entry_path = Path::new(&unified);

    // Reject absolute paths (zip-slip protection)
    if entry_path.has_root() || entry_path.is_absolute() {
        return Err(Error::ZipSlip {
            entry: PathBuf::from(entry_name),
            resolved: normalize_path(entry_path),
        });
    }

    let resolved = normalize_path(&base.join(entry_path));

    // Ensure result doesn't escape base directory
    if !resolved.starts_with(base) {
        return Err(Error::ZipSlip {
            entry: PathBuf::from(entry_name),
            resolved,
        });
    }

    Ok(SanitizedPath { resolved })
}

/// Normalize separators and resolve `.`/`..` lexically.
fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(Component::RootDir.as_os_str()),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    result
}
