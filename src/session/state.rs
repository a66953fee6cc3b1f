//! Edit focus state machine
//!
//! Type-safe focus movement across the edit form using the state-machines crate.
//! Range clamping (dhcp mode pins focus to the mode toggle) is decided by the
//! session before an event is dispatched.

use super::field::Field;
use state_machines::state_machine;

state_machine! {
    name: FocusMachine,
    dynamic: true,
    initial: ChoosingMode,
    states: [ChoosingMode, EditingAddress, EditingGateway, EditingDns],
    events {
        home {
            transition: { from: [EditingAddress, EditingDns], to: ChoosingMode }
        }
        address {
            transition: { from: [ChoosingMode, EditingGateway], to: EditingAddress }
        }
        gateway {
            transition: { from: [EditingAddress, EditingDns], to: EditingGateway }
        }
        dns {
            transition: { from: EditingGateway, to: EditingDns }
        }
    }
}

/// Focus tracker backed by the dynamic state machine
pub struct Focus {
    machine: DynamicFocusMachine<()>,
}

impl Focus {
    pub fn new() -> Self {
        Self {
            machine: FocusMachine::new(()).into_dynamic(),
        }
    }

    /// Currently focused field
    pub fn field(&self) -> Field {
        match self.machine.current_state() {
            "EditingAddress" => Field::Address,
            "EditingGateway" => Field::Gateway,
            "EditingDns" => Field::Dns,
            _ => Field::Mode,
        }
    }

    /// Move focus to an adjacent field (or wrap from DNS back to the toggle)
    pub fn move_to(&mut self, target: Field) -> Result<(), state_machines::DynamicError> {
        let event = match target {
            Field::Mode => FocusMachineEvent::Home,
            Field::Address => FocusMachineEvent::Address,
            Field::Gateway => FocusMachineEvent::Gateway,
            Field::Dns => FocusMachineEvent::Dns,
        };
        self.machine.handle(event)
    }
}

impl Default for Focus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Focus")
            .field("state", &self.machine.current_state())
            .finish()
    }
}
