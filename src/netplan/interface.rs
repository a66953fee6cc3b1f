//! Per-interface addressing policy
//!
//! Gateways are read from either the deprecated `gateway4` key or a
//! `default` route, and always written back as a route.

use serde::{Deserialize, Deserializer, Serialize};

/// Route destination that marks the default gateway
pub const DEFAULT_ROUTE: &str = "default";

/// Addressing policy for one ethernet interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    /// Automatic IPv4 configuration
    #[serde(
        default,
        deserialize_with = "yaml11_bool",
        skip_serializing_if = "is_false"
    )]
    pub dhcp4: bool,

    /// Automatic IPv6 configuration (preserved, not edited)
    #[serde(
        default,
        deserialize_with = "yaml11_bool",
        skip_serializing_if = "is_false"
    )]
    pub dhcp6: bool,

    /// Addresses in CIDR notation
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,

    /// Deprecated single IPv4 gateway, read-compatible only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway4: Option<String>,

    /// Deprecated single IPv6 gateway (preserved, not edited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway6: Option<String>,

    /// Static routes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,

    /// DNS configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nameservers: Option<Nameservers>,

    /// Do not wait for this interface at boot
    #[serde(
        default,
        deserialize_with = "yaml11_bool",
        skip_serializing_if = "is_false"
    )]
    pub optional: bool,
}

/// A single routing table entry
///
/// On-link routes carry no `via`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub to: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub via: String,
}

impl Route {
    /// Default route through `via`
    pub fn default_via(via: impl Into<String>) -> Self {
        Self {
            to: DEFAULT_ROUTE.to_string(),
            via: via.into(),
        }
    }
}

/// DNS servers and search domains
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameservers {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Boolean as a YAML bool or a YAML 1.1 word (`yes`, `off`, ...)
///
/// Shipped netplan files commonly use `dhcp4: yes`, which YAML 1.2 reads as
/// a string.
fn yaml11_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Word(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Word(word) => match word.to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "y" => Ok(true),
            "false" | "no" | "off" | "n" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "invalid boolean {word:?}, expected true/false/yes/no/on/off"
            ))),
        },
    }
}

impl InterfaceConfig {
    /// DHCP-managed interface
    pub fn dhcp() -> Self {
        Self {
            dhcp4: true,
            ..Default::default()
        }
    }

    /// Statically addressed interface with a single address
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            addresses: vec![address.into()],
            ..Default::default()
        }
    }

    /// First configured address, if any
    pub fn primary_address(&self) -> Option<&str> {
        self.addresses.first().map(String::as_str)
    }

    /// First configured DNS server, if any
    pub fn primary_nameserver(&self) -> Option<&str> {
        self.dns_servers().first().map(String::as_str)
    }

    /// All configured DNS server addresses
    pub fn dns_servers(&self) -> &[String] {
        self.nameservers
            .as_ref()
            .map(|ns| ns.addresses.as_slice())
            .unwrap_or_default()
    }

    /// Resolve the gateway from `gateway4` first, then the first default route
    pub fn effective_gateway(&self) -> String {
        if let Some(gateway) = self.gateway4.as_deref().filter(|g| !g.is_empty()) {
            return gateway.to_string();
        }

        self.routes
            .iter()
            .find(|route| route.to == DEFAULT_ROUTE)
            .map(|route| route.via.clone())
            .unwrap_or_default()
    }

    /// Set the gateway using the routes representation
    ///
    /// An empty value drops `gateway4` and the entire route list, including
    /// any non-default routes. A non-empty value replaces the route list with
    /// a single default route.
    pub fn set_gateway(&mut self, gateway: &str) {
        self.gateway4 = None;

        if gateway.is_empty() {
            self.routes.clear();
            return;
        }

        self.routes = vec![Route::default_via(gateway)];
    }

    /// Set a single DNS server, replacing any previous nameserver block
    pub fn set_nameserver(&mut self, server: &str) {
        self.nameservers = if server.is_empty() {
            None
        } else {
            Some(Nameservers {
                addresses: vec![server.to_string()],
                search: Vec::new(),
            })
        };
    }

    /// One-line human readable summary
    ///
    /// The format is consumed by the interface list and `nptui list`:
    /// `DHCP (Automatic)`, `Static: <addr>  Gateway: <gw>  DNS: [<a> <b>]`
    /// or `Not configured`.
    pub fn summarize(&self) -> String {
        if self.dhcp4 {
            return "DHCP (Automatic)".to_string();
        }

        let Some(address) = self.primary_address() else {
            return "Not configured".to_string();
        };

        let mut summary = format!("Static: {}", address);

        let gateway = self.effective_gateway();
        if !gateway.is_empty() {
            summary.push_str(&format!("  Gateway: {}", gateway));
        }

        let dns = self.dns_servers();
        if !dns.is_empty() {
            summary.push_str(&format!("  DNS: [{}]", dns.join(" ")));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_round_trip() {
        let mut cfg = InterfaceConfig::default();
        cfg.set_gateway("192.168.1.1");
        assert_eq!(cfg.effective_gateway(), "192.168.1.1");
        assert_eq!(cfg.routes, vec![Route::default_via("192.168.1.1")]);
        assert!(cfg.gateway4.is_none());

        cfg.set_gateway("");
        assert_eq!(cfg.effective_gateway(), "");
        assert!(cfg.routes.is_empty());
    }

    #[test]
    fn test_legacy_gateway() {
        let cfg = InterfaceConfig {
            gateway4: Some("10.0.0.254".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.effective_gateway(), "10.0.0.254");
    }

    #[test]
    fn test_legacy_gateway_takes_precedence() {
        let cfg = InterfaceConfig {
            gateway4: Some("10.0.0.254".to_string()),
            routes: vec![Route::default_via("10.0.0.1")],
            ..Default::default()
        };
        assert_eq!(cfg.effective_gateway(), "10.0.0.254");
    }

    #[test]
    fn test_empty_legacy_gateway_falls_through() {
        let cfg = InterfaceConfig {
            gateway4: Some(String::new()),
            routes: vec![Route::default_via("10.0.0.1")],
            ..Default::default()
        };
        assert_eq!(cfg.effective_gateway(), "10.0.0.1");
    }

    #[test]
    fn test_first_default_route_wins() {
        let cfg = InterfaceConfig {
            routes: vec![
                Route {
                    to: "10.1.0.0/16".to_string(),
                    via: "10.0.0.2".to_string(),
                },
                Route::default_via("10.0.0.1"),
                Route::default_via("10.0.0.3"),
            ],
            ..Default::default()
        };
        assert_eq!(cfg.effective_gateway(), "10.0.0.1");
    }

    #[test]
    fn test_set_gateway_drops_other_routes() {
        let mut cfg = InterfaceConfig {
            gateway4: Some("10.0.0.254".to_string()),
            routes: vec![Route {
                to: "10.1.0.0/16".to_string(),
                via: "10.0.0.2".to_string(),
            }],
            ..Default::default()
        };

        cfg.set_gateway("10.0.0.1");
        assert_eq!(cfg.routes, vec![Route::default_via("10.0.0.1")]);
        assert!(cfg.gateway4.is_none());

        cfg.set_gateway("");
        assert!(cfg.routes.is_empty());
    }

    #[test]
    fn test_summarize_static() {
        let cfg = InterfaceConfig {
            addresses: vec!["10.0.0.5/24".to_string()],
            routes: vec![Route::default_via("10.0.0.1")],
            ..Default::default()
        };
        assert_eq!(cfg.summarize(), "Static: 10.0.0.5/24  Gateway: 10.0.0.1");
    }

    #[test]
    fn test_summarize_with_dns() {
        let mut cfg = InterfaceConfig::with_address("10.0.0.5/24");
        cfg.nameservers = Some(Nameservers {
            addresses: vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()],
            search: Vec::new(),
        });
        assert_eq!(cfg.summarize(), "Static: 10.0.0.5/24  DNS: [1.1.1.1 8.8.8.8]");
    }

    #[test]
    fn test_summarize_dhcp_ignores_static_fields() {
        let mut cfg = InterfaceConfig::with_address("10.0.0.5/24");
        cfg.dhcp4 = true;
        assert_eq!(cfg.summarize(), "DHCP (Automatic)");
    }

    #[test]
    fn test_summarize_not_configured() {
        assert_eq!(InterfaceConfig::default().summarize(), "Not configured");

        // Gateway alone is not enough to count as static
        let mut cfg = InterfaceConfig::default();
        cfg.set_gateway("10.0.0.1");
        assert_eq!(cfg.summarize(), "Not configured");
    }

    #[test]
    fn test_empty_nameservers_not_summarized() {
        let mut cfg = InterfaceConfig::with_address("10.0.0.5/24");
        cfg.nameservers = Some(Nameservers::default());
        assert_eq!(cfg.summarize(), "Static: 10.0.0.5/24");
    }

    #[test]
    fn test_omits_empty_fields() {
        let yaml = serde_yaml::to_string(&InterfaceConfig::dhcp()).unwrap();
        assert_eq!(yaml.trim(), "dhcp4: true");
    }

    #[test]
    fn test_route_without_via() {
        let cfg: InterfaceConfig =
            serde_yaml::from_str("routes:\n  - to: 10.1.0.0/16\n    scope: link\n").unwrap();
        assert_eq!(cfg.routes[0].to, "10.1.0.0/16");
        assert!(cfg.routes[0].via.is_empty());
        assert_eq!(cfg.effective_gateway(), "");

        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(!yaml.contains("via"));
    }

    #[test]
    fn test_yaml11_bools_written_plain() {
        let cfg: InterfaceConfig = serde_yaml::from_str("dhcp4: Yes\noptional: on\n").unwrap();
        assert!(cfg.dhcp4);
        assert!(cfg.optional);

        let yaml = serde_yaml::to_string(&cfg).unwrap();
        assert!(yaml.contains("dhcp4: true"));
        assert!(yaml.contains("optional: true"));
    }

    #[test]
    fn test_invalid_bool_word() {
        assert!(serde_yaml::from_str::<InterfaceConfig>("dhcp4: maybe\n").is_err());
    }
}
