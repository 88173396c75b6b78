use crate::CanopenError;
use core::convert::TryFrom;

/// Defines the CANopen datatypes supported by the Object Dictionary.
///
/// The discriminants are the standard datatype codes from the static data
/// type area of the Object Dictionary (CiA 301, Section 7.4.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataType {
    Boolean = 0x01,
    Integer8 = 0x02,
    Integer16 = 0x03,
    Integer32 = 0x04,
    Unsigned8 = 0x05,
    Unsigned16 = 0x06,
    Unsigned32 = 0x07,
    Real32 = 0x08,
    VisibleString = 0x09,
    OctetString = 0x0A,
    Domain = 0x0F,
    Real64 = 0x11,
    Integer64 = 0x15,
    Unsigned64 = 0x1B,
}

impl DataType {
    /// Whether values of this datatype are numbers (fixed-width on the wire)
    /// as opposed to raw byte sequences. This is a fixed property of each
    /// variant.
    pub fn is_numeric(self) -> bool {
        !matches!(
            self,
            DataType::VisibleString | DataType::OctetString | DataType::Domain
        )
    }

    /// Whether this datatype is an IEEE 754 floating point type.
    pub fn is_float(self) -> bool {
        matches!(self, DataType::Real32 | DataType::Real64)
    }

    /// The fixed encoded byte width of this datatype, or `None` for the
    /// unbounded byte-sequence datatypes.
    pub fn size(self) -> Option<usize> {
        match self {
            DataType::Boolean | DataType::Integer8 | DataType::Unsigned8 => Some(1),
            DataType::Integer16 | DataType::Unsigned16 => Some(2),
            DataType::Integer32 | DataType::Unsigned32 | DataType::Real32 => Some(4),
            DataType::Integer64 | DataType::Unsigned64 | DataType::Real64 => Some(8),
            DataType::VisibleString | DataType::OctetString | DataType::Domain => None,
        }
    }
}

impl TryFrom<u8> for DataType {
    type Error = CanopenError;

    /// Parses a standard datatype code (e.g., from a configuration source).
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(DataType::Boolean),
            0x02 => Ok(DataType::Integer8),
            0x03 => Ok(DataType::Integer16),
            0x04 => Ok(DataType::Integer32),
            0x05 => Ok(DataType::Unsigned8),
            0x06 => Ok(DataType::Unsigned16),
            0x07 => Ok(DataType::Unsigned32),
            0x08 => Ok(DataType::Real32),
            0x09 => Ok(DataType::VisibleString),
            0x0A => Ok(DataType::OctetString),
            0x0F => Ok(DataType::Domain),
            0x11 => Ok(DataType::Real64),
            0x15 => Ok(DataType::Integer64),
            0x1B => Ok(DataType::Unsigned64),
            _ => Err(CanopenError::InvalidDataType(value)),
        }
    }
}
