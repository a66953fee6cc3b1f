//! Interactive console for editing interfaces
//!
//! Provides:
//! - Main menu (edit interfaces, apply, quit)
//! - Interface list with a one-line summary per interface
//! - Edit form driven by an [`EditSession`]
//!
//! Input is line based, see [`keys`].

pub mod keys;
pub mod screen;

use crate::apply::Applier;
use crate::error::Result;
use crate::interfaces::InterfaceSource;
use crate::netplan::ConfigStore;
use crate::session::{EditSession, Field, Mode};
use crate::theme::Theme;
use keys::Key;
use screen::{Screen, Screens};
use std::io::{BufRead, Write};

/// Main menu entries
const MENU: [&str; 3] = ["Edit Network Interfaces", "Apply Configuration", "Quit"];

const MENU_EDIT: usize = 0;
const MENU_APPLY: usize = 1;
const MENU_QUIT: usize = 2;

/// Whether the event loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive editor over a line-based terminal
pub struct Console<R, W> {
    input: R,
    output: W,
    store: ConfigStore,
    source: Box<dyn InterfaceSource>,
    applier: Applier,
    theme: Theme,
    screens: Screens,
    /// Row selected on the menu or interface list
    cursor: usize,
    interfaces: Vec<String>,
    session: Option<EditSession>,
    message: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over `input`/`output`
    pub fn new(
        input: R,
        output: W,
        store: ConfigStore,
        source: Box<dyn InterfaceSource>,
        applier: Applier,
    ) -> Self {
        Self {
            input,
            output,
            store,
            source,
            applier,
            theme: Theme::plain(),
            screens: Screens::new(),
            cursor: 0,
            interfaces: Vec::new(),
            session: None,
            message: String::new(),
        }
    }

    /// Set presentation theme
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.screens.current()
    }

    /// Last status message shown to the operator
    #[allow(dead_code)] // Inspection API for embedding and tests
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The store backing this console
    #[allow(dead_code)] // Inspection API for embedding and tests
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Active edit session, if any
    #[allow(dead_code)] // Inspection API for embedding and tests
    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Run until the operator quits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.render()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                tracing::debug!("input closed");
                return Ok(());
            }

            let keys = match keys::parse_line(&line) {
                Ok(keys) => keys,
                Err(word) => {
                    self.message = format!("Unknown command: {}", word);
                    continue;
                }
            };

            for key in keys {
                if self.handle(key)? == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }

    /// Dispatch one key to the current screen
    fn handle(&mut self, key: Key) -> Result<Flow> {
        match key {
            Key::Quit => return Ok(Flow::Quit),
            Key::Apply => {
                self.apply();
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        match self.screen() {
            Screen::MainMenu => self.handle_main_menu(key),
            Screen::InterfaceList => self.handle_interface_list(key),
            Screen::Editing => self.handle_edit(key),
        }
    }

    fn handle_main_menu(&mut self, key: Key) -> Result<Flow> {
        match key {
            Key::Up | Key::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            Key::Down | Key::Char('j') => {
                if self.cursor < MENU.len() - 1 {
                    self.cursor += 1;
                }
            }
            Key::Enter => match self.cursor {
                MENU_EDIT => self.open_interface_list()?,
                MENU_APPLY => self.apply(),
                MENU_QUIT => return Ok(Flow::Quit),
                _ => {}
            },
            Key::Char('q') => return Ok(Flow::Quit),
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn handle_interface_list(&mut self, key: Key) -> Result<Flow> {
        match key {
            Key::Esc | Key::Char('q') | Key::Char('b') => self.back_to_menu()?,
            Key::Up | Key::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            // The row after the last interface is "Back"
            Key::Down | Key::Char('j') => {
                if self.cursor < self.interfaces.len() {
                    self.cursor += 1;
                }
            }
            Key::Enter => match self.interfaces.get(self.cursor).cloned() {
                Some(name) => {
                    self.session = Some(EditSession::open(&self.store, &name));
                    self.screens.edit()?;
                    self.message.clear();
                }
                None => self.back_to_menu()?,
            },
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn handle_edit(&mut self, key: Key) -> Result<Flow> {
        if key == Key::Esc {
            self.cancel_edit()?;
            return Ok(Flow::Continue);
        }
        if key == Key::Save {
            self.save();
            return Ok(Flow::Continue);
        }

        let Some(session) = self.session.as_mut() else {
            return Ok(Flow::Continue);
        };

        match key {
            Key::Up => session.focus_prev()?,
            Key::Down => session.focus_next()?,
            Key::Tab => session.focus_cycle()?,
            Key::Enter => {
                session.toggle_mode();
            }
            Key::Backspace => {
                session.backspace();
            }
            Key::Clear => {
                session.clear_field();
            }
            Key::Char(c) => {
                session.push_char(c);
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    /// Enumerate interfaces and show the list; failures stay on the menu
    fn open_interface_list(&mut self) -> Result<()> {
        match self.source.interfaces() {
            Ok(interfaces) => {
                self.interfaces = interfaces;
                self.screens.browse()?;
                self.cursor = 0;
                self.message.clear();
            }
            Err(e) => {
                tracing::warn!(error = %e, "interface enumeration failed");
                self.message = format!("Error: {}", e);
            }
        }
        Ok(())
    }

    fn back_to_menu(&mut self) -> Result<()> {
        self.screens.back()?;
        self.cursor = 0;
        self.message.clear();
        Ok(())
    }

    /// Drop the working copy without touching the document
    fn cancel_edit(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            tracing::debug!(interface = session.interface(), "edit cancelled");
        }
        self.screens.cancel()?;
        self.cursor = 0;
        self.message.clear();
        Ok(())
    }

    /// Persist the session; on success restart it from the saved entry
    fn save(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        match session.save(&mut self.store) {
            Ok(_) => {
                let name = session.interface().to_string();
                self.session = Some(EditSession::open(&self.store, &name));
                self.message =
                    "Configuration saved! Use :apply to activate it or :esc to go back.".to_string();
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.message = format!("Error: {}", e);
            }
        }
    }

    fn apply(&mut self) {
        self.message = match self.applier.apply() {
            Ok(_) => "Configuration applied successfully!".to_string(),
            Err(e) => format!("Error: {}", e),
        };
    }

    fn render(&mut self) -> Result<()> {
        let view = match self.screen() {
            Screen::MainMenu => self.view_main_menu(),
            Screen::InterfaceList => self.view_interface_list(),
            Screen::Editing => self.view_edit(),
        };
        write!(self.output, "{}\n> ", view)?;
        self.output.flush()?;
        Ok(())
    }

    fn view_main_menu(&self) -> String {
        let t = &self.theme;
        let mut s = String::new();

        s.push_str(&t.title.render("Netplan TUI - Main Menu"));
        s.push_str("\n\n");

        for (i, choice) in MENU.iter().enumerate() {
            if self.cursor == i {
                s.push_str(&t.selected.render(&format!("> {}", choice)));
            } else {
                s.push_str(&t.normal.render(&format!("  {}", choice)));
            }
            s.push('\n');
        }

        if !self.message.is_empty() {
            s.push('\n');
            s.push_str(&t.label.render(&self.message));
            s.push('\n');
        }

        s.push('\n');
        s.push_str(&t.help.render(&format!(" {} ", keys::help())));
        s.push('\n');
        s
    }

    fn view_interface_list(&self) -> String {
        let t = &self.theme;
        let mut s = String::new();

        s.push_str(&t.title.render("Network Interfaces"));
        s.push_str("\n\n");

        for (i, name) in self.interfaces.iter().enumerate() {
            let status = self.store.interface_config(name).summarize();
            if self.cursor == i {
                s.push_str(&t.selected.render(&format!("> {}", name)));
                s.push_str(&format!("\n  {}\n", t.normal.render(&status)));
            } else {
                s.push_str(&t.normal.render(&format!("  {}", name)));
                s.push_str(&format!("\n  {}\n", t.disabled.render(&status)));
            }
            s.push('\n');
        }

        if self.cursor == self.interfaces.len() {
            s.push_str(&t.selected.render("> Back"));
        } else {
            s.push_str(&t.normal.render("  Back"));
        }
        s.push_str("\n\n");

        if !self.message.is_empty() {
            s.push_str(&t.label.render(&self.message));
            s.push_str("\n\n");
        }

        s.push_str(&t.help.render(&format!(" {} ", keys::help())));
        s.push('\n');
        s
    }

    fn view_edit(&self) -> String {
        let t = &self.theme;
        let mut s = String::new();

        let Some(session) = self.session.as_ref() else {
            return s;
        };

        s.push_str(&t.title.render(&format!("Configure Interface: {}", session.interface())));
        s.push_str("\n\n");

        for field in Field::ALL {
            if !session.is_enabled(field) {
                continue;
            }

            let focused = session.focus() == field;
            let value = match field {
                Field::Mode => session.mode().to_string(),
                _ => session.buffer(field).to_string(),
            };
            let cursor = if focused { ">" } else { " " };

            s.push_str(&t.label.render(&format!("{} {}: ", cursor, field.label())));
            if focused {
                s.push_str(&t.input.render(&format!(" {} ", value)));
            } else {
                s.push_str(&t.normal.render(&value));
            }
            s.push_str("\n\n");
        }

        if session.mode() == Mode::Dhcp {
            s.push_str(&t.disabled.render("  Address, gateway and DNS are assigned automatically"));
            s.push_str("\n\n");
        }

        if !self.message.is_empty() {
            s.push_str(&t.label.render(&self.message));
            s.push_str("\n\n");
        }

        s.push_str(&t.help.render(&format!(" {} ", keys::help())));
        s.push('\n');
        s
    }
}
