//! Network interface enumeration

use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Loopback interface, never offered for editing
const LOOPBACK: &str = "lo";

/// Source of editable interface names
pub trait InterfaceSource {
    /// Non-loopback interface names
    fn interfaces(&self) -> Result<Vec<String>>;
}

/// Interfaces listed under `/sys/class/net`
#[derive(Debug, Clone)]
pub struct Sysfs {
    root: PathBuf,
}

impl Sysfs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl InterfaceSource for Sysfs {
    fn interfaces(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::Enumeration {
            path: self.root.clone(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::Enumeration {
                path: self.root.clone(),
                source: e,
            })?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name != LOOPBACK {
                names.push(name);
            }
        }
        names.sort();

        tracing::debug!(root = %self.root.display(), count = names.len(), "enumerated interfaces");
        Ok(names)
    }
}

/// Fixed interface list
impl InterfaceSource for Vec<String> {
    fn interfaces(&self) -> Result<Vec<String>> {
        Ok(self.iter().filter(|n| *n != LOOPBACK).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sysfs_skips_loopback() {
        let tmp = TempDir::new().unwrap();
        for name in ["lo", "eth1", "eth0", "wlan0"] {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }

        let names = Sysfs::new(tmp.path()).interfaces().unwrap();
        assert_eq!(names, vec!["eth0", "eth1", "wlan0"]);
    }

    #[test]
    fn test_sysfs_missing_root() {
        let tmp = TempDir::new().unwrap();
        let err = Sysfs::new(tmp.path().join("missing")).interfaces().unwrap_err();
        assert!(matches!(err, Error::Enumeration { .. }));
    }

    #[test]
    fn test_fixed_list() {
        let list = vec!["lo".to_string(), "enp3s0".to_string()];
        assert_eq!(list.interfaces().unwrap(), vec!["enp3s0"]);
    }
}
