//! Netplan document root

use super::interface::InterfaceConfig;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Netplan format version written for new documents
pub const FORMAT_VERSION: u32 = 2;

/// Renderer written for new documents
pub const DEFAULT_RENDERER: &str = "networkd";

/// Root of a netplan YAML file (`network:` key)
///
/// A file without the key (comments only, for instance) parses as an empty
/// version 2 network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDocument {
    #[serde(default)]
    pub network: Network,
}

/// Contents of the `network:` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,

    /// Ethernet interfaces keyed by name
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub ethernets: BTreeMap<String, InterfaceConfig>,
}

fn default_version() -> u32 {
    FORMAT_VERSION
}

impl Default for Network {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            renderer: None,
            ethernets: BTreeMap::new(),
        }
    }
}

/// `ethernets:` with no value parses as an empty mapping
fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, InterfaceConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<BTreeMap<String, InterfaceConfig>>::deserialize(deserializer)
        .map(Option::unwrap_or_default)
}

impl Default for NetworkDocument {
    fn default() -> Self {
        Self::with_renderer(DEFAULT_RENDERER)
    }
}

impl NetworkDocument {
    /// Empty document using the given renderer
    pub fn with_renderer(renderer: impl Into<String>) -> Self {
        Self {
            network: Network {
                version: FORMAT_VERSION,
                renderer: Some(renderer.into()),
                ethernets: BTreeMap::new(),
            },
        }
    }

    /// Stored config for `name`, or an unconfigured default
    pub fn interface_config(&self, name: &str) -> InterfaceConfig {
        self.network
            .ethernets
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Replace the stored config for `name`
    ///
    /// Fields of a previous entry are not merged.
    pub fn set_interface_config(&mut self, name: impl Into<String>, config: InterfaceConfig) {
        self.network.ethernets.insert(name.into(), config);
    }

    /// Names of interfaces that have a stored entry
    pub fn configured_interfaces(&self) -> impl Iterator<Item = &str> {
        self.network.ethernets.keys().map(String::as_str)
    }
}
