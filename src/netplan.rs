//! Netplan document model and storage
//!
//! This module provides:
//! - Serde model of the netplan YAML document
//! - Per-interface addressing policy with legacy gateway compatibility
//! - Loading and saving the document from the netplan directory

pub mod document;
pub mod interface;
pub mod store;

pub use interface::InterfaceConfig;
pub use store::ConfigStore;
