use std::path::{Component, Path};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix of per-call extraction directories.
pub const SCRATCH_PREFIX: &str = "extracted_";

/// Prefix and suffix of in-flight artifacts, hidden from listings.
pub(crate) const TEMP_PREFIX: &str = ".tmp.";
pub(crate) const TEMP_SUFFIX: &str = ".filepress";

/// A collision-free token for generated names: `<unix-millis>-<8 hex>`.
///
/// The millisecond part keeps names roughly sortable by creation time, the
/// random part keeps two calls within the same millisecond apart.
pub fn stamp() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", millis, &token[..8])
}

/// Final normal segment of a caller-supplied name.
///
/// Both `/` and `\` are treated as separators so a name written on another
/// platform cannot smuggle directory components through. Trailing
/// separators are ignored, so `"a/b.zip/"` yields `"b.zip"`. Returns `None`
/// when nothing usable remains (`""`, `".."`, `"/"`).
pub fn final_segment(name: &str) -> Option<&str> {
    let trimmed = name.trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\']).next()?;
    match Path::new(last).components().next_back() {
        Some(Component::Normal(_)) => Some(last),
        _ => None,
    }
}

pub(crate) fn is_temporary(name: &str) -> bool {
    name.starts_with(TEMP_PREFIX) && name.ends_with(TEMP_SUFFIX)
}
