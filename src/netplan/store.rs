//! Loading and saving the netplan document
//!
//! Only the lexicographically first `*.yaml` file in the netplan directory is
//! read, while saves always overwrite one fixed file. `netplan apply` unions
//! every file in the directory, so files written by other tools keep taking
//! effect even though this editor never shows them.

use super::document::NetworkDocument;
use super::interface::InterfaceConfig;
use crate::error::{Error, Result};
use crate::settings::Settings;
use std::fs::{self, DirBuilder, OpenOptions};
use std::io::Write;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

/// Mode for a newly created netplan directory
const DIR_MODE: u32 = 0o755;

/// Mode for the written document
const FILE_MODE: u32 = 0o600;

/// List `*.yaml` files in `dir`, sorted by name
///
/// A missing directory yields an empty list.
pub fn document_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(Error::DocumentRead {
                path: dir.to_path_buf(),
                source: e,
            });
        }
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "yaml") && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

/// Load the netplan document from `dir`
///
/// Returns a fresh document using `renderer` when the directory holds no
/// YAML files. Parse failures are returned as [`Error::DocumentParse`].
pub fn load(dir: &Path, renderer: &str) -> Result<NetworkDocument> {
    let files = document_files(dir)?;

    let Some(path) = files.first() else {
        tracing::debug!(dir = %dir.display(), "no netplan files, using default document");
        return Ok(NetworkDocument::with_renderer(renderer));
    };

    if files.len() > 1 {
        tracing::debug!(
            dir = %dir.display(),
            count = files.len(),
            "multiple netplan files found, reading only the first"
        );
    }

    let content = fs::read_to_string(path).map_err(|e| Error::DocumentRead {
        path: path.clone(),
        source: e,
    })?;

    if content.trim().is_empty() {
        tracing::warn!(path = %path.display(), "netplan file is empty, using default document");
        return Ok(NetworkDocument::with_renderer(renderer));
    }

    let doc: NetworkDocument = serde_yaml::from_str(&content).map_err(|e| Error::DocumentParse {
        path: path.clone(),
        source: e,
    })?;

    tracing::info!(
        path = %path.display(),
        interfaces = doc.network.ethernets.len(),
        "loaded netplan document"
    );

    Ok(doc)
}

/// Write `doc` to `path`, creating its directory if needed
pub fn save(path: &Path, doc: &NetworkDocument) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        DirBuilder::new()
            .recursive(true)
            .mode(DIR_MODE)
            .create(dir)
            .map_err(|e| Error::DocumentWrite {
                path: dir.to_path_buf(),
                source: e,
            })?;
    }

    let yaml = serde_yaml::to_string(doc)?;

    let write = || -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(FILE_MODE)
            .open(path)?;
        // mode() only applies on creation
        file.set_permissions(fs::Permissions::from_mode(FILE_MODE))?;
        file.write_all(yaml.as_bytes())?;
        file.sync_all()
    };

    write().map_err(|e| Error::DocumentWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), "saved netplan document");
    Ok(())
}

/// Owner of the in-memory netplan document
#[derive(Debug)]
pub struct ConfigStore {
    /// Fixed file that saves overwrite
    target: PathBuf,
    /// The single in-memory document
    document: NetworkDocument,
}

impl ConfigStore {
    /// Load the document from `dir`; saves go to `dir/file_name`
    pub fn open(dir: impl Into<PathBuf>, file_name: &str, renderer: &str) -> Result<Self> {
        let dir = dir.into();
        let document = load(&dir, renderer)?;
        Ok(Self {
            target: dir.join(file_name),
            document,
        })
    }

    /// Open the store described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::open(&settings.netplan_dir, &settings.config_file, &settings.renderer)
    }

    /// File written by [`ConfigStore::save`]
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn document(&self) -> &NetworkDocument {
        &self.document
    }

    /// Stored config for `name`, or an unconfigured default
    pub fn interface_config(&self, name: &str) -> InterfaceConfig {
        self.document.interface_config(name)
    }

    /// Replace the config for `name` in memory
    pub fn set_interface_config(&mut self, name: &str, config: InterfaceConfig) {
        tracing::debug!(interface = name, summary = %config.summarize(), "set interface config");
        self.document.set_interface_config(name, config);
    }

    /// Persist the whole document to the target file
    pub fn save(&self) -> Result<()> {
        save(&self.target, &self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netplan::interface::Route;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_load_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let doc = load(tmp.path(), "networkd").unwrap();
        assert_eq!(doc.network.version, 2);
        assert!(doc.network.ethernets.is_empty());
        assert_eq!(doc.interface_config("eth0").summarize(), "Not configured");
    }

    #[test]
    fn test_load_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let doc = load(&tmp.path().join("netplan"), "networkd").unwrap();
        assert_eq!(doc, NetworkDocument::default());
    }

    #[test]
    fn test_load_reads_first_file_only() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "50-cloud-init.yaml",
            "network:\n  version: 2\n  ethernets:\n    eth1:\n      dhcp4: true\n",
        );
        write(
            tmp.path(),
            "00-installer.yaml",
            "network:\n  version: 2\n  ethernets:\n    eth0:\n      addresses: [10.0.0.5/24]\n",
        );
        write(tmp.path(), "README", "not yaml");

        let doc = load(tmp.path(), "networkd").unwrap();
        assert_eq!(doc.interface_config("eth0").summarize(), "Static: 10.0.0.5/24");
        assert!(!doc.network.ethernets.contains_key("eth1"));
    }

    #[test]
    fn test_load_parse_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "01-netcfg.yaml", "network: [unclosed");

        let err = load(tmp.path(), "networkd").unwrap_err();
        assert!(matches!(err, Error::DocumentParse { .. }));
    }

    #[test]
    fn test_load_empty_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "01-netcfg.yaml", "\n");

        let doc = load(tmp.path(), "networkd").unwrap();
        assert!(doc.network.ethernets.is_empty());
    }

    #[test]
    fn test_load_comment_only_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "00-installer.yaml", "# disabled by admin\n");

        let doc = load(tmp.path(), "networkd").unwrap();
        assert_eq!(doc.network.version, 2);
        assert!(doc.network.ethernets.is_empty());
    }

    #[test]
    fn test_save_creates_dir_and_restricts_mode() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("etc").join("netplan");

        let mut store = ConfigStore::open(&dir, "01-netcfg.yaml", "networkd").unwrap();
        let mut cfg = InterfaceConfig::with_address("10.0.0.5/24");
        cfg.set_gateway("10.0.0.1");
        store.set_interface_config("eth0", cfg);
        store.save().unwrap();

        let meta = fs::metadata(store.target()).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);

        let reloaded = ConfigStore::open(&dir, "01-netcfg.yaml", "networkd").unwrap();
        assert_eq!(
            reloaded.interface_config("eth0").routes,
            vec![Route::default_via("10.0.0.1")]
        );
    }

    #[test]
    fn test_save_tightens_existing_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "01-netcfg.yaml", "network:\n  version: 2\n");
        fs::set_permissions(
            tmp.path().join("01-netcfg.yaml"),
            fs::Permissions::from_mode(0o644),
        )
        .unwrap();

        let store = ConfigStore::open(tmp.path(), "01-netcfg.yaml", "networkd").unwrap();
        store.save().unwrap();

        let meta = fs::metadata(store.target()).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn test_save_leaves_other_files() {
        let tmp = TempDir::new().unwrap();
        let other = "network:\n  version: 2\n  ethernets:\n    eth0:\n      dhcp4: true\n";
        write(tmp.path(), "00-installer.yaml", other);

        let mut store = ConfigStore::open(tmp.path(), "01-netcfg.yaml", "networkd").unwrap();
        store.set_interface_config("eth1", InterfaceConfig::with_address("10.0.1.5/24"));
        store.save().unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("00-installer.yaml")).unwrap(),
            other
        );

        // The first file still shadows the one we wrote
        let reloaded = ConfigStore::open(tmp.path(), "01-netcfg.yaml", "networkd").unwrap();
        assert!(reloaded.interface_config("eth0").dhcp4);
        assert_eq!(reloaded.interface_config("eth1").summarize(), "Not configured");
    }
}
