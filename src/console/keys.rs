//! Line input to key events
//!
//! The console reads whole lines. Words starting with `:` are commands,
//! everything else is typed character by character, and an empty line is
//! Enter.

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Tab,
    Enter,
    Backspace,
    /// Empty the focused text field
    Clear,
    Save,
    Apply,
    Esc,
    /// Leave the program from any screen
    Quit,
    Char(char),
}

/// Command words and the key they produce
const COMMANDS: &[(&str, Key)] = &[
    ("up", Key::Up),
    ("k", Key::Up),
    ("down", Key::Down),
    ("j", Key::Down),
    ("tab", Key::Tab),
    ("enter", Key::Enter),
    ("space", Key::Enter),
    ("toggle", Key::Enter),
    ("bs", Key::Backspace),
    ("backspace", Key::Backspace),
    ("clear", Key::Clear),
    ("save", Key::Save),
    ("w", Key::Save),
    ("apply", Key::Apply),
    ("esc", Key::Esc),
    ("back", Key::Esc),
    ("b", Key::Esc),
    ("quit", Key::Quit),
    ("q", Key::Quit),
];

/// Parse one input line
///
/// Returns the unknown command word on error.
pub fn parse_line(line: &str) -> Result<Vec<Key>, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(vec![Key::Enter]);
    }

    let mut keys = Vec::new();
    for word in words {
        match word.strip_prefix(':') {
            Some(command) => {
                let key = COMMANDS
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(command))
                    .map(|(_, key)| *key)
                    .ok_or_else(|| word.to_string())?;
                keys.push(key);
            }
            None => keys.extend(word.chars().map(Key::Char)),
        }
    }

    Ok(keys)
}

/// One-line help for the command words
pub fn help() -> &'static str {
    ":up/:down Navigate | Enter: Select/Toggle | text: Type | :bs :clear Edit | :save Save | :apply Apply | :esc Back | :q Quit"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_is_enter() {
        assert_eq!(parse_line("").unwrap(), vec![Key::Enter]);
        assert_eq!(parse_line("   \n").unwrap(), vec![Key::Enter]);
    }

    #[test]
    fn test_commands_and_text() {
        assert_eq!(
            parse_line(":down :clear 10.0.0.1 :save").unwrap(),
            vec![
                Key::Down,
                Key::Clear,
                Key::Char('1'),
                Key::Char('0'),
                Key::Char('.'),
                Key::Char('0'),
                Key::Char('.'),
                Key::Char('0'),
                Key::Char('.'),
                Key::Char('1'),
                Key::Save,
            ]
        );
    }

    #[test]
    fn test_command_case_insensitive() {
        assert_eq!(parse_line(":ESC").unwrap(), vec![Key::Esc]);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse_line(":reboot").unwrap_err(), ":reboot");
    }
}
