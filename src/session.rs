//! Interface edit session
//!
//! An [`EditSession`] holds the operator's in-progress edits for a single
//! interface. It never touches the document directly: on save it builds a
//! complete replacement [`InterfaceConfig`] and hands it to the store.

pub mod field;
pub mod state;

pub use field::{Field, Mode};

use crate::error::Result;
use crate::netplan::{ConfigStore, InterfaceConfig};
use state::Focus;

/// Working copy of one interface's addressing
#[derive(Debug)]
pub struct EditSession {
    interface: String,
    mode: Mode,
    address: String,
    gateway: String,
    dns: String,
    focus: Focus,
}

impl EditSession {
    /// Start editing `interface` from its stored config
    pub fn new(interface: impl Into<String>, current: &InterfaceConfig) -> Self {
        let interface = interface.into();
        let mode = if current.dhcp4 { Mode::Dhcp } else { Mode::Static };

        tracing::debug!(interface = %interface, ?mode, "edit session started");

        Self {
            interface,
            mode,
            address: current.primary_address().unwrap_or_default().to_string(),
            gateway: current.effective_gateway(),
            dns: current.primary_nameserver().unwrap_or_default().to_string(),
            focus: Focus::new(),
        }
    }

    /// Start editing `interface` from the store's current entry
    pub fn open(store: &ConfigStore, interface: &str) -> Self {
        Self::new(interface, &store.interface_config(interface))
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Focused field
    pub fn focus(&self) -> Field {
        self.focus.field()
    }

    /// Highest focusable index in the current mode
    pub fn max_index(&self) -> usize {
        Field::max_index(self.mode)
    }

    /// Whether `field` is visible and editable in the current mode
    pub fn is_enabled(&self, field: Field) -> bool {
        field.enabled_in(self.mode)
    }

    /// Text buffer of a field (empty for the mode toggle)
    pub fn buffer(&self, field: Field) -> &str {
        match field {
            Field::Mode => "",
            Field::Address => &self.address,
            Field::Gateway => &self.gateway,
            Field::Dns => &self.dns,
        }
    }

    fn buffer_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Mode => None,
            Field::Address => Some(&mut self.address),
            Field::Gateway => Some(&mut self.gateway),
            Field::Dns => Some(&mut self.dns),
        }
    }

    /// Move focus down, clamped to the current mode's range
    pub fn focus_next(&mut self) -> Result<()> {
        let index = self.focus().index();
        if index < self.max_index() {
            self.move_focus(index + 1)?;
        }
        Ok(())
    }

    /// Move focus up, clamped at the mode toggle
    pub fn focus_prev(&mut self) -> Result<()> {
        let index = self.focus().index();
        if index > 0 {
            self.move_focus(index - 1)?;
        }
        Ok(())
    }

    /// Advance focus, wrapping from the last field back to the toggle
    pub fn focus_cycle(&mut self) -> Result<()> {
        let next = (self.focus().index() + 1) % (self.max_index() + 1);
        if next != self.focus().index() {
            self.move_focus(next)?;
        }
        Ok(())
    }

    fn move_focus(&mut self, index: usize) -> Result<()> {
        if let Some(target) = Field::from_index(index) {
            self.focus.move_to(target)?;
        }
        Ok(())
    }

    /// Flip between DHCP and static; only acts while the toggle is focused
    ///
    /// Text buffers are kept so switching back to static restores them.
    pub fn toggle_mode(&mut self) -> bool {
        if self.focus() != Field::Mode {
            return false;
        }
        self.mode = self.mode.toggled();
        tracing::debug!(interface = %self.interface, mode = ?self.mode, "mode toggled");
        true
    }

    /// Focused text buffer, if editing is allowed right now
    fn editable_buffer(&mut self) -> Option<&mut String> {
        let field = self.focus();
        if self.mode != Mode::Static || !field.is_text() {
            return None;
        }
        self.buffer_mut(field)
    }

    /// Append a character to the focused text field
    pub fn push_char(&mut self, c: char) -> bool {
        match self.editable_buffer() {
            Some(buffer) => {
                buffer.push(c);
                true
            }
            None => false,
        }
    }

    /// Remove the last character of the focused text field
    pub fn backspace(&mut self) -> bool {
        self.editable_buffer()
            .is_some_and(|buffer| buffer.pop().is_some())
    }

    /// Empty the focused text field
    pub fn clear_field(&mut self) -> bool {
        match self.editable_buffer() {
            Some(buffer) => {
                buffer.clear();
                true
            }
            None => false,
        }
    }

    /// Set every field at once (used for scripted edits)
    ///
    /// Focus returns to the mode toggle.
    pub fn fill(&mut self, mode: Mode, address: &str, gateway: &str, dns: &str) {
        self.focus = Focus::new();
        self.mode = mode;
        self.address = address.to_string();
        self.gateway = gateway.to_string();
        self.dns = dns.to_string();
    }

    /// Build the replacement config from the working copy
    pub fn build_config(&self) -> InterfaceConfig {
        match self.mode {
            Mode::Dhcp => InterfaceConfig::dhcp(),
            Mode::Static => {
                let mut config = if self.address.is_empty() {
                    InterfaceConfig::default()
                } else {
                    InterfaceConfig::with_address(self.address.as_str())
                };
                if !self.gateway.is_empty() {
                    config.set_gateway(&self.gateway);
                }
                if !self.dns.is_empty() {
                    config.set_nameserver(&self.dns);
                }
                config
            }
        }
    }

    /// Replace the interface's entry in `store` and persist the document
    ///
    /// On error the session is left intact so the operator can retry.
    pub fn save(&self, store: &mut ConfigStore) -> Result<InterfaceConfig> {
        let config = self.build_config();
        store.set_interface_config(&self.interface, config.clone());
        store.save()?;

        tracing::info!(interface = %self.interface, summary = %config.summarize(), "interface saved");
        Ok(config)
    }
}
