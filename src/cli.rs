//! Command-line interface for nptui
//!
//! Uses clap with derive for type-safe CLI parsing

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// nptui - netplan interface editor
#[derive(Parser)]
#[command(name = "nptui")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path
    #[arg(short, long, default_value = crate::settings::DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    /// Netplan directory (overrides the settings file)
    #[arg(long)]
    pub netplan_dir: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Interactively edit interfaces (default)
    Edit,

    /// List interfaces with their current configuration
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the stored configuration of one interface
    Show {
        /// Interface name
        interface: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Set an interface's addressing without the interactive editor
    Set {
        /// Interface name
        interface: String,

        /// Use DHCP
        #[arg(long, conflicts_with_all = ["static_mode", "address", "gateway", "dns"])]
        dhcp: bool,

        /// Use static addressing
        #[arg(long = "static", required_unless_present = "dhcp")]
        static_mode: bool,

        /// Address in CIDR notation (e.g. 192.168.1.10/24)
        #[arg(long)]
        address: Option<String>,

        /// Default gateway
        #[arg(long)]
        gateway: Option<String>,

        /// DNS server
        #[arg(long)]
        dns: Option<String>,

        /// Apply the configuration after saving
        #[arg(long)]
        apply: bool,
    },

    /// Apply the saved configuration
    Apply,

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Generate shell completions
    pub fn generate_completion(shell: Shell) {
        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["nptui"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.settings, PathBuf::from("/etc/nptui.toml"));
    }

    #[test]
    fn test_set_static() {
        let cli = Cli::try_parse_from([
            "nptui",
            "set",
            "eth0",
            "--static",
            "--address",
            "10.0.0.5/24",
            "--gateway",
            "10.0.0.1",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Set {
                interface,
                static_mode,
                address,
                gateway,
                dns,
                ..
            }) => {
                assert_eq!(interface, "eth0");
                assert!(static_mode);
                assert_eq!(address.as_deref(), Some("10.0.0.5/24"));
                assert_eq!(gateway.as_deref(), Some("10.0.0.1"));
                assert!(dns.is_none());
            }
            _ => panic!("expected set command"),
        }
    }

    #[test]
    fn test_set_dhcp_conflicts_with_address() {
        assert!(
            Cli::try_parse_from(["nptui", "set", "eth0", "--dhcp", "--address", "10.0.0.5/24"])
                .is_err()
        );
    }

    #[test]
    fn test_set_requires_mode() {
        assert!(Cli::try_parse_from(["nptui", "set", "eth0"]).is_err());
    }
}
