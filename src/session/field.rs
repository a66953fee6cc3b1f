//! Edit form fields

use std::fmt;

/// Addressing mode being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dhcp,
    Static,
}

impl Mode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            Mode::Dhcp => Mode::Static,
            Mode::Static => Mode::Dhcp,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Dhcp => write!(f, "DHCP"),
            Mode::Static => write!(f, "Static"),
        }
    }
}

/// One row of the edit form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// DHCP/static toggle
    Mode,
    /// Address in CIDR notation
    Address,
    /// Default gateway
    Gateway,
    /// Single DNS server
    Dns,
}

impl Field {
    /// All fields in focus order
    pub const ALL: [Field; 4] = [Field::Mode, Field::Address, Field::Gateway, Field::Dns];

    /// Focus index (0 = mode toggle)
    pub fn index(self) -> usize {
        match self {
            Field::Mode => 0,
            Field::Address => 1,
            Field::Gateway => 2,
            Field::Dns => 3,
        }
    }

    /// Field at a focus index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Form label
    pub fn label(self) -> &'static str {
        match self {
            Field::Mode => "Configuration",
            Field::Address => "IP Address/CIDR",
            Field::Gateway => "Gateway",
            Field::Dns => "DNS Server",
        }
    }

    /// Whether the field takes free text
    pub fn is_text(self) -> bool {
        !matches!(self, Field::Mode)
    }

    /// Whether the field can be focused or edited in `mode`
    pub fn enabled_in(self, mode: Mode) -> bool {
        match mode {
            Mode::Dhcp => self == Field::Mode,
            Mode::Static => true,
        }
    }

    /// Highest reachable focus index in `mode`
    pub fn max_index(mode: Mode) -> usize {
        match mode {
            Mode::Dhcp => Field::Mode.index(),
            Mode::Static => Field::Dns.index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_index(field.index()), Some(field));
        }
        assert_eq!(Field::from_index(4), None);
    }

    #[test]
    fn test_enabled_in_dhcp() {
        assert!(Field::Mode.enabled_in(Mode::Dhcp));
        assert!(!Field::Address.enabled_in(Mode::Dhcp));
        assert!(Field::Dns.enabled_in(Mode::Static));
        assert_eq!(Field::max_index(Mode::Dhcp), 0);
        assert_eq!(Field::max_index(Mode::Static), 3);
    }
}
