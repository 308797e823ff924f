//! JSON manifest describing one generated container.

use serde::{Deserialize, Serialize};

use iconforge_shared::{
    AttributeMap, CURRENT_SCHEMA_VERSION, ContainerIdentity, IconForgeError, IconRecord, Result,
};

/// Companion manifest written next to (or instead of) generated source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconManifest {
    pub schema_version: u32,
    pub container: ContainerIdentity,
    /// Hex SHA-256 of the generated source this manifest describes.
    pub source_sha256: String,
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub identifier: String,
    pub name: String,
    pub attributes: AttributeMap,
}

impl IconManifest {
    pub fn new(
        container: &ContainerIdentity,
        icons: &[IconRecord],
        source_sha256: impl Into<String>,
    ) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            container: container.clone(),
            source_sha256: source_sha256.into(),
            icons: icons
                .iter()
                .map(|icon| ManifestIcon {
                    identifier: icon.identifier.clone(),
                    name: icon.name.clone(),
                    attributes: icon.attributes.clone(),
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| IconForgeError::Serialization(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(json)
            .map_err(|e| IconForgeError::validation(format!("invalid icon manifest: {e}")))?;

        if manifest.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(IconForgeError::validation(format!(
                "icon manifest schema version {} is newer than supported version {CURRENT_SCHEMA_VERSION}",
                manifest.schema_version
            )));
        }
        Ok(manifest)
    }
}
