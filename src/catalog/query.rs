use crate::model::ModRecord;

/// What: Decide whether a mod matches a lower-cased search needle.
///
/// Inputs:
/// - `m`: Candidate mod.
/// - `needle_lower`: Lower-cased query; whitespace is kept as typed.
///
/// Output:
/// - `true` for an empty needle, or when the latest-version name contains it.
///
/// Details:
/// - Mods without any version only match the empty query.
#[must_use]
pub fn matches_query(m: &ModRecord, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    m.name()
        .is_some_and(|name| name.to_lowercase().contains(needle_lower))
}
