//! Messages received on the hacker connection.

use alloc::string::String;
use core::fmt;

use super::config::CONTROL_TOKEN;

/// A single remote line, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    /// Normalize a framed line. Returns `None` for lines that are blank after
    /// trimming, which are never shown.
    pub fn parse(line: &str) -> Option<Self> {
        let text = line.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self(String::from(text)))
        }
    }

    pub fn text(&self) -> &str {
        &self.0
    }

    /// Whether this line asks the program to stop.
    pub fn is_control(&self) -> bool {
        self.0.eq_ignore_ascii_case(CONTROL_TOKEN)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
