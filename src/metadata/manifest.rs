use super::core::{ActionDescriptor, ArgShape, ACTION_TAG};
use super::table::{CapabilityTable, ControllerMeta};
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// YAML file declaring controller capabilities by FQN.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControllerManifest {
    #[serde(default)]
    pub controllers: BTreeMap<String, ControllerEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControllerEntry {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub default_action: Option<String>,
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionEntry {
    pub name: String,
    /// Absent means the action declares no argument lists.
    #[serde(default)]
    pub args: Vec<ArgShape>,
    /// Extra method tags; [`ACTION_TAG`] is always added.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ControllerEntry {
    fn into_meta(self) -> ControllerMeta {
        let mut meta = ControllerMeta {
            tags: self.tags,
            ..ControllerMeta::default()
        };
        if let Some(default) = self.default_action {
            meta = meta.default_action(default);
        }
        for action in self.actions {
            let mut tags = vec![ACTION_TAG.to_string()];
            tags.extend(action.tags.into_iter().filter(|t| t != ACTION_TAG));
            meta = meta.method(ActionDescriptor {
                name: action.name,
                tags,
                arg_shapes: action.args,
                is_default: false,
            });
        }
        meta
    }
}

impl ControllerManifest {
    /// Build the capability table declared by this manifest.
    #[must_use]
    pub fn into_table(self) -> CapabilityTable {
        let mut table = CapabilityTable::new();
        for (class, entry) in self.controllers {
            table.insert(class, entry.into_meta());
        }
        table
    }
}

/// Parse a controller manifest from YAML text.
///
/// # Errors
///
/// Returns an error if the YAML does not describe a manifest.
pub fn parse_manifest(content: &str) -> anyhow::Result<CapabilityTable> {
    let manifest: ControllerManifest =
        serde_yaml::from_str(content).context("invalid controller manifest")?;
    Ok(manifest.into_table())
}

/// Load a controller manifest file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_manifest(path: impl AsRef<Path>) -> anyhow::Result<CapabilityTable> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read controller manifest {}", path.display()))?;
    parse_manifest(&content).with_context(|| format!("in {}", path.display()))
}
