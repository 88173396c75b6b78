use core::convert::TryFrom;
use core::fmt;

// --- Primitive Types (Based on CiA 301 Section 7.1) ---
// These aliases ensure compatibility with object dictionary definitions (UNSIGNEDn)

/// Alias for INTEGER8 (8-bit signed integer)
pub type INTEGER8 = i8;
/// Alias for INTEGER16 (16-bit signed integer)
pub type INTEGER16 = i16;
/// Alias for INTEGER32 (32-bit signed integer)
pub type INTEGER32 = i32;
/// Alias for INTEGER64 (64-bit signed integer)
pub type INTEGER64 = i64;
/// Alias for UNSIGNED8 (8-bit unsigned integer)
pub type UNSIGNED8 = u8;
/// Alias for UNSIGNED16 (16-bit unsigned integer)
pub type UNSIGNED16 = u16;
/// Alias for UNSIGNED32 (32-bit unsigned integer)
pub type UNSIGNED32 = u32;
/// Alias for UNSIGNED64 (64-bit unsigned integer)
pub type UNSIGNED64 = u64;
/// Alias for REAL32 (IEEE 754 single precision float)
pub type REAL32 = f32;
/// Alias for REAL64 (IEEE 754 double precision float)
pub type REAL64 = f64;

/// Represents a CANopen Node ID, wrapping a `u8` to ensure type safety.
///
/// Valid Node IDs are in the range 1-127. Node ID 0 is reserved for NMT
/// broadcast addressing and is therefore not a valid node identity. This
/// newtype pattern prevents accidental use of invalid `u8` values where a
/// `NodeId` is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u8);

// --- Protocol Constants (CiA 301, Section 7.3.3) ---

/// COB-ID of the NMT command broadcast channel (function code 0000b).
pub const C_COB_ID_NMT: u32 = 0x000;

/// Base COB-ID of the error control (boot-up/heartbeat) channel: 0x700 + Node ID.
pub const C_COB_ID_ERROR_CONTROL_BASE: u32 = 0x700;

/// Target Node ID used by NMT commands to address every node at once.
pub const C_ADR_BROADCAST_NODE_ID: u8 = 0;

/// Maximum Node ID available for regular nodes (127).
pub const C_ADR_MAX_NODE_ID: u8 = 127;

/// Length of an NMT command frame: command specifier and target Node ID.
pub const C_NMT_COMMAND_LEN: usize = 2;

/// Error type for invalid Node ID creation.
#[derive(Debug, PartialEq, Eq)]
pub enum NodeIdError {
    /// Node ID is outside the valid range (1-127).
    InvalidRange(u8),
}

impl fmt::Display for NodeIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeIdError::InvalidRange(value) => write!(
                f,
                "Invalid NodeId value: {}. Valid range is 1-127.",
                value
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NodeIdError {}

impl TryFrom<u8> for NodeId {
    type Error = NodeIdError;

    /// Creates a `NodeId` from a `u8`, returning an error if the value is not
    /// a valid CANopen node identifier (1-127).
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=C_ADR_MAX_NODE_ID => Ok(NodeId(value)),
            _ => Err(NodeIdError::InvalidRange(value)),
        }
    }
}

impl From<NodeId> for u8 {
    /// Converts a `NodeId` back into its underlying `u8` representation.
    /// This conversion is infallible.
    fn from(node_id: NodeId) -> Self {
        node_id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
