use crate::types::NodeIdError;
use alloc::vec::Vec;
use core::array::TryFromSliceError;
use core::fmt;

/// Defines a portable, descriptive Error type for the CANopen stack.
#[derive(Debug, Clone, PartialEq)]
pub enum CanopenError {
    /// The provided buffer is too small for the operation.
    BufferTooShort,
    /// An object or variable definition is invalid (e.g., invalid access
    /// type, scaling or limits on a non-numeric datatype).
    Configuration(&'static str),
    /// A value is not a valid CANopen datatype code.
    InvalidDataType(u8),
    /// A value is not a valid NodeId.
    InvalidNodeId(u8),
    /// The requested Object Dictionary index does not exist.
    ObjectNotFound,
    /// The requested sub-index does not exist for the given object.
    SubObjectNotFound,
    /// An attempt was made to use a value with a kind the dictionary cannot
    /// represent for the target datatype.
    TypeMismatch,
    /// A multi-byte value could not be parsed from a slice.
    SliceConversion,
    /// The callback to be removed is not registered.
    CallbackNotFound,
    /// A validate callback rejected the value.
    ValidationError(&'static str),
    /// One or more observers failed after the value was already committed.
    /// Carries every failure raised by the pipeline.
    CallbackFailed(Vec<CanopenError>),
}

impl fmt::Display for CanopenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooShort => write!(f, "Buffer is too short for the datatype"),
            Self::Configuration(s) => write!(f, "Configuration error: {}", s),
            Self::InvalidDataType(v) => write!(f, "Invalid datatype code: {v:#04x}"),
            Self::InvalidNodeId(v) => write!(f, "Invalid NodeId value: {v}"),
            Self::ObjectNotFound => {
                write!(f, "The requested Object Dictionary index was not found")
            }
            Self::SubObjectNotFound => {
                write!(f, "The requested sub-index was not found for this object")
            }
            Self::TypeMismatch => {
                write!(f, "The provided value's kind does not match the object's datatype")
            }
            Self::SliceConversion => write!(f, "Failed to convert slice to a fixed-size array"),
            Self::CallbackNotFound => write!(f, "The callback is not registered"),
            Self::ValidationError(s) => write!(f, "Validation error: {}", s),
            Self::CallbackFailed(errors) => {
                write!(f, "{} observer(s) failed after the value was committed", errors.len())
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CanopenError {}

// --- From Implementations for Error Conversion ---

impl From<TryFromSliceError> for CanopenError {
    fn from(_: TryFromSliceError) -> Self {
        CanopenError::SliceConversion
    }
}

impl From<NodeIdError> for CanopenError {
    fn from(err: NodeIdError) -> Self {
        match err {
            NodeIdError::InvalidRange(val) => CanopenError::InvalidNodeId(val),
        }
    }
}

impl From<&'static str> for CanopenError {
    fn from(s: &'static str) -> Self {
        CanopenError::ValidationError(s)
    }
}

/// Hardware Abstraction Layer (HAL) for CAN frame transmission.
///
/// This trait abstracts the physical sending of CAN frames, enabling the
/// core CANopen protocol logic to remain platform-agnostic (no_std).
/// Transmission is fire-and-forget: the core never waits for, nor reacts to,
/// the outcome of a send.
pub trait CanInterface {
    /// Sends a single CAN frame with the given COB-ID and payload.
    ///
    /// `payload` is at most 8 bytes for classic CAN; the core only emits
    /// frames within that bound.
    fn send(&mut self, cob_id: u32, payload: &[u8]);
}
