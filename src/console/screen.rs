//! Console screen state machine

use state_machines::state_machine;

state_machine! {
    name: ScreenMachine,
    dynamic: true,
    initial: MainMenu,
    states: [MainMenu, InterfaceList, Editing],
    events {
        browse {
            transition: { from: MainMenu, to: InterfaceList }
        }
        edit {
            transition: { from: InterfaceList, to: Editing }
        }
        cancel {
            transition: { from: Editing, to: InterfaceList }
        }
        back {
            transition: { from: InterfaceList, to: MainMenu }
        }
    }
}

/// Simple screen enum for rendering and input dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    InterfaceList,
    Editing,
}

impl Screen {
    /// Parse screen from state name
    pub fn from_str(s: &str) -> Self {
        match s {
            "InterfaceList" => Screen::InterfaceList,
            "Editing" => Screen::Editing,
            _ => Screen::MainMenu,
        }
    }
}

/// Screen tracker using dynamic dispatch
pub struct Screens {
    machine: DynamicScreenMachine<()>,
}

impl Screens {
    pub fn new() -> Self {
        Self {
            machine: ScreenMachine::new(()).into_dynamic(),
        }
    }

    /// Get current screen as enum
    pub fn current(&self) -> Screen {
        Screen::from_str(self.machine.current_state())
    }

    /// Main menu -> interface list
    pub fn browse(&mut self) -> Result<(), state_machines::DynamicError> {
        self.machine.handle(ScreenMachineEvent::Browse)
    }

    /// Interface list -> edit form
    pub fn edit(&mut self) -> Result<(), state_machines::DynamicError> {
        self.machine.handle(ScreenMachineEvent::Edit)
    }

    /// Edit form -> interface list
    pub fn cancel(&mut self) -> Result<(), state_machines::DynamicError> {
        self.machine.handle(ScreenMachineEvent::Cancel)
    }

    /// Interface list -> main menu
    pub fn back(&mut self) -> Result<(), state_machines::DynamicError> {
        self.machine.handle(ScreenMachineEvent::Back)
    }
}

impl Default for Screens {
    fn default() -> Self {
        Self::new()
    }
}
