//! Wire command codec
//!
//! The protocol defines exactly two commands, one ASCII byte each, with no
//! framing, checksum, or acknowledgement.

use serde::{Deserialize, Serialize};

/// Single-byte actuator command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCommand {
    /// Drive LED, buzzer, and servo sweep (`b'1'`)
    Activate,
    /// Release all outputs (`b'0'`)
    Deactivate,
}

impl AlertCommand {
    /// Encode as the wire byte
    pub fn as_byte(self) -> u8 {
        match self {
            AlertCommand::Activate => b'1',
            AlertCommand::Deactivate => b'0',
        }
    }

    /// Decode a wire byte; anything other than `'0'`/`'1'` is not a command
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'1' => Some(AlertCommand::Activate),
            b'0' => Some(AlertCommand::Deactivate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_bytes() {
        assert_eq!(AlertCommand::Activate.as_byte(), 0x31);
        assert_eq!(AlertCommand::Deactivate.as_byte(), 0x30);
    }

    #[test]
    fn test_decode_rejects_unknown_bytes() {
        assert_eq!(AlertCommand::from_byte(b'1'), Some(AlertCommand::Activate));
        assert_eq!(AlertCommand::from_byte(b'0'), Some(AlertCommand::Deactivate));
        assert_eq!(AlertCommand::from_byte(b'2'), None);
        assert_eq!(AlertCommand::from_byte(0x00), None);
    }
}
