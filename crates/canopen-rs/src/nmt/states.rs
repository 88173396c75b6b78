// crates/canopen-rs/src/nmt/states.rs

use core::convert::TryFrom;
use core::fmt;

/// Defines the NMT states of a CANopen node.
///
/// The discriminants are the state codes reported in error control
/// (heartbeat) frames. (Reference: CiA 301, Section 7.3.2.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NmtState {
    /// Transient state after power-on or reset; always immediately followed
    /// by a forced transition to Pre-Operational.
    Initialisation = 0,
    /// The node does not participate in any communication except NMT and
    /// error control.
    Stopped = 4,
    /// The node is fully operational.
    Operational = 5,
    /// The node can be configured but process data exchange is not active.
    PreOperational = 127,
}

/// Defines the NMT command specifiers a node reacts to.
/// (Reference: CiA 301, Section 7.3.2.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NmtCommand {
    /// Corresponds to the NMT Start Remote Node command.
    StartNode = 0x01,
    /// Corresponds to the NMT Stop Remote Node command.
    StopNode = 0x02,
    /// Corresponds to the NMT Enter Pre-Operational command.
    EnterPreOperational = 0x80,
    /// Corresponds to the NMT Reset Node command.
    ResetNode = 0x81,
    /// Corresponds to the NMT Reset Communication command.
    ResetCommunication = 0x82,
}

/// Error type for an unrecognized NMT command specifier.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownCommandSpecifier(pub u8);

impl fmt::Display for UnknownCommandSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown NMT command specifier: {:#04X}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownCommandSpecifier {}

impl TryFrom<u8> for NmtCommand {
    type Error = UnknownCommandSpecifier;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(NmtCommand::StartNode),
            0x02 => Ok(NmtCommand::StopNode),
            0x80 => Ok(NmtCommand::EnterPreOperational),
            0x81 => Ok(NmtCommand::ResetNode),
            0x82 => Ok(NmtCommand::ResetCommunication),
            other => Err(UnknownCommandSpecifier(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_codes() {
        assert_eq!(NmtState::Initialisation as u8, 0);
        assert_eq!(NmtState::Stopped as u8, 4);
        assert_eq!(NmtState::Operational as u8, 5);
        assert_eq!(NmtState::PreOperational as u8, 127);
    }

    #[test]
    fn test_command_specifier_parsing() {
        assert_eq!(NmtCommand::try_from(0x01), Ok(NmtCommand::StartNode));
        assert_eq!(NmtCommand::try_from(0x82), Ok(NmtCommand::ResetCommunication));
        assert_eq!(
            NmtCommand::try_from(0x03),
            Err(UnknownCommandSpecifier(0x03))
        );
    }
}
