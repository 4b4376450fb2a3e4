//! Mod records as served by the upstream index, and the snapshot derived from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// What: One mod as returned by the upstream index.
///
/// Inputs:
/// - Decoded from an element of `payload.data`.
///
/// Output:
/// - Held in the catalog and re-serialized unchanged by the query endpoints.
///
/// Details:
/// - Only the fields the mirror reads are typed; everything else is kept in `extra`
///   so the JSON we hand out keeps the upstream shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModRecord {
    /// Stable identifier, used as file stem and lookup key.
    pub id: String,
    /// Versions, newest first.
    #[serde(default)]
    pub versions: Vec<ModVersion>,
    /// Developer credits.
    #[serde(default)]
    pub developers: Vec<Developer>,
    /// Total downloads at fetch time.
    #[serde(default)]
    pub download_count: u64,
    /// Upstream fields not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single published version of a mod.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModVersion {
    /// Display name of the mod at this version.
    #[serde(default)]
    pub name: String,
    /// Short description; upstream may send `null`.
    #[serde(default)]
    pub description: Option<String>,
    /// Version string, e.g. `v1.2.0`.
    #[serde(default)]
    pub version: String,
    /// Upstream fields not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A credited developer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    /// Name shown to users.
    #[serde(default)]
    pub display_name: String,
    /// Upstream fields not interpreted here.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModRecord {
    /// What: Return the latest version (index 0).
    ///
    /// Output:
    /// - `Ok(&ModVersion)`; `Err(DataShape)` when the mod has no versions.
    ///
    /// # Errors
    /// - `DataShape` if `versions` is empty.
    pub fn latest(&self) -> Result<&ModVersion> {
        self.versions
            .first()
            .ok_or_else(|| Error::shape(format!("mod {} has no versions", self.id)))
    }

    /// Latest-version display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.versions.first().map(|v| v.name.as_str())
    }
}

/// What: The per-mod JSON document written to `data/<id>.json`.
///
/// Details:
/// - Field order is part of the on-disk format; serde preserves declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSnapshot {
    /// Mod id.
    pub id: String,
    /// Latest-version name.
    pub name: String,
    /// Developer display names in upstream order.
    pub developers: Vec<String>,
    /// Latest-version description.
    pub description: Option<String>,
    /// Latest-version version string.
    pub version: String,
    /// Total downloads.
    pub downloads: u64,
}

impl TryFrom<&ModRecord> for ModSnapshot {
    type Error = Error;

    fn try_from(m: &ModRecord) -> Result<Self> {
        let latest = m.latest()?;
        Ok(Self {
            id: m.id.clone(),
            name: latest.name.clone(),
            developers: m
                .developers
                .iter()
                .map(|d| d.display_name.clone())
                .collect(),
            description: latest.description.clone(),
            version: latest.version.clone(),
            downloads: m.download_count,
        })
    }
}

/// What: Check that `id` is safe to use as a file stem.
///
/// Inputs:
/// - `id`: Mod id from upstream.
///
/// Output:
/// - `Ok(())` when usable; `Err(DataShape)` otherwise.
///
/// # Errors
/// - Empty ids, `.`/`..`, and ids containing `/`, `\` or NUL.
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\', '\0']) {
        return Err(Error::shape(format!("unusable mod id {id:?}")));
    }
    Ok(())
}
