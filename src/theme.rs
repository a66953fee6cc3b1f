//! Console presentation styles
//!
//! Read-only after startup. Colours follow the classic 16-colour palette:
//! yellow titles and labels, green selection bar, blue input and help bars.

/// A single text style as an ANSI SGR prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style(&'static str);

impl Style {
    const NONE: Style = Style("");

    /// Wrap `text` in this style
    pub fn render(&self, text: &str) -> String {
        if self.0.is_empty() {
            text.to_string()
        } else {
            format!("\x1b[{}m{}\x1b[0m", self.0, text)
        }
    }
}

/// Styles used by the console screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Style,
    pub selected: Style,
    pub normal: Style,
    pub label: Style,
    pub input: Style,
    pub disabled: Style,
    pub help: Style,
}

impl Theme {
    /// Coloured theme
    pub fn ansi() -> Self {
        Self {
            title: Style("1;93"),
            selected: Style("1;30;102"),
            normal: Style("97"),
            label: Style("1;93"),
            input: Style("97;44"),
            disabled: Style("90"),
            help: Style("97;44"),
        }
    }

    /// Theme without escape sequences
    pub fn plain() -> Self {
        Self {
            title: Style::NONE,
            selected: Style::NONE,
            normal: Style::NONE,
            label: Style::NONE,
            input: Style::NONE,
            disabled: Style::NONE,
            help: Style::NONE,
        }
    }
}
