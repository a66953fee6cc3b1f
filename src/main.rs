//! nptui - netplan interface editor
//!
//! Edits per-interface DHCP/static addressing in the netplan document,
//! with a state machine-controlled edit session, and triggers
//! `netplan apply`.

mod apply;
mod cli;
mod console;
mod error;
mod interfaces;
mod netplan;
mod session;
mod settings;
mod theme;

use apply::Applier;
use cli::{Cli, Commands};
use console::Console;
use error::{Error, Result};
use interfaces::{InterfaceSource, Sysfs};
use netplan::{ConfigStore, InterfaceConfig};
use serde::Serialize;
use session::{EditSession, Field, Mode};
use settings::Settings;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Edit);

    // Commands that don't require settings
    if let Commands::Completion { shell } = command {
        Cli::generate_completion(shell);
        return Ok(());
    }

    let settings = settings::load(&cli.settings)?.with_overrides(cli.netplan_dir, cli.no_color);

    match command {
        Commands::Edit => {
            require_root()?;
            let store = ConfigStore::from_settings(&settings)?;
            let source = Box::new(Sysfs::new(&settings.sysfs_net));
            let applier = Applier::from_settings(&settings);

            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            Console::new(stdin, stdout, store, source, applier)
                .theme(settings.theme())
                .run()
        }

        Commands::List { json } => list(&settings, json),

        Commands::Show { interface, json } => {
            let store = ConfigStore::from_settings(&settings)?;
            let row = InterfaceRow::new(&store, &interface);
            if json {
                println!("{}", serde_json::to_string_pretty(&row)?);
            } else {
                println!("{}: {}", row.name, row.summary);
                if store.document().network.ethernets.contains_key(&interface) {
                    print!("{}", serde_yaml::to_string(&row.config)?);
                }
            }
            Ok(())
        }

        Commands::Set {
            interface,
            dhcp,
            static_mode: _,
            address,
            gateway,
            dns,
            apply,
        } => {
            require_root()?;
            let mut store = ConfigStore::from_settings(&settings)?;

            ensure_known(&store, &Sysfs::new(&settings.sysfs_net), &interface)?;

            let mut session = EditSession::open(&store, &interface);
            let mode = if dhcp { Mode::Dhcp } else { Mode::Static };
            let address = address.unwrap_or_else(|| session.buffer(Field::Address).to_string());
            let gateway = gateway.unwrap_or_else(|| session.buffer(Field::Gateway).to_string());
            let dns = dns.unwrap_or_else(|| session.buffer(Field::Dns).to_string());
            session.fill(mode, &address, &gateway, &dns);

            let saved = session.save(&mut store)?;
            println!("{}: {}", interface, saved.summarize());
            println!("Saved {}", store.target().display());

            if apply {
                apply_config(&settings)?;
            }
            Ok(())
        }

        Commands::Apply => {
            require_root()?;
            apply_config(&settings)
        }

        Commands::Completion { .. } => Ok(()),
    }
}

/// Initialize tracing to stderr; `RUST_LOG` overrides the verbosity flag
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Writing netplan files and applying them needs root
fn require_root() -> Result<()> {
    if nix::unistd::Uid::effective().is_root() {
        Ok(())
    } else {
        Err(Error::NotPrivileged)
    }
}

/// Reject names that are neither stored in the document nor present on the
/// system; enumeration only runs for names the document does not know
fn ensure_known(store: &ConfigStore, source: &dyn InterfaceSource, name: &str) -> Result<()> {
    let configured = store
        .document()
        .configured_interfaces()
        .any(|stored| stored == name);
    if configured || source.interfaces()?.iter().any(|known| known == name) {
        Ok(())
    } else {
        Err(Error::InterfaceNotFound(name.to_string()))
    }
}

/// One interface for `list`/`show` output
#[derive(Debug, Serialize)]
struct InterfaceRow {
    name: String,
    summary: String,
    config: InterfaceConfig,
}

impl InterfaceRow {
    fn new(store: &ConfigStore, name: &str) -> Self {
        let config = store.interface_config(name);
        Self {
            name: name.to_string(),
            summary: config.summarize(),
            config,
        }
    }
}

fn list(settings: &Settings, json: bool) -> Result<()> {
    let store = ConfigStore::from_settings(settings)?;
    let names = Sysfs::new(&settings.sysfs_net).interfaces()?;
    let rows: Vec<InterfaceRow> = names
        .iter()
        .map(|name| InterfaceRow::new(&store, name))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No network interfaces found");
        return Ok(());
    }

    let width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    for row in &rows {
        println!("{:<width$}  {}", row.name, row.summary, width = width);
    }
    Ok(())
}

fn apply_config(settings: &Settings) -> Result<()> {
    let applier = Applier::from_settings(settings);
    let output = applier.apply()?;

    let combined = output.combined();
    if !combined.trim().is_empty() {
        print!("{}", combined);
    }
    println!("Configuration applied successfully!");
    Ok(())
}
