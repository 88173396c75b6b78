// crates/canopen-rs/src/od/value.rs

use super::datatype::DataType;
use crate::CanopenError;
use crate::types::{
    INTEGER8, INTEGER16, INTEGER32, INTEGER64, REAL32, REAL64, UNSIGNED8, UNSIGNED16, UNSIGNED32,
    UNSIGNED64,
};
use alloc::{string::String, vec::Vec};
use core::convert::TryInto; // Required for try_into()

/// Represents any value that can be stored in an Object Dictionary entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Integer8(INTEGER8),
    Integer16(INTEGER16),
    Integer32(INTEGER32),
    Integer64(INTEGER64),
    Unsigned8(UNSIGNED8),
    Unsigned16(UNSIGNED16),
    Unsigned32(UNSIGNED32),
    Unsigned64(UNSIGNED64),
    Real32(REAL32),
    Real64(REAL64),
    VisibleString(String), // Typically limited length
    OctetString(Vec<u8>),  // Typically limited length
    Domain(Vec<u8>),       // Large binary data
}

impl Value {
    /// Returns the datatype this value carries on the wire.
    pub fn datatype(&self) -> DataType {
        match self {
            Value::Boolean(_) => DataType::Boolean,
            Value::Integer8(_) => DataType::Integer8,
            Value::Integer16(_) => DataType::Integer16,
            Value::Integer32(_) => DataType::Integer32,
            Value::Integer64(_) => DataType::Integer64,
            Value::Unsigned8(_) => DataType::Unsigned8,
            Value::Unsigned16(_) => DataType::Unsigned16,
            Value::Unsigned32(_) => DataType::Unsigned32,
            Value::Unsigned64(_) => DataType::Unsigned64,
            Value::Real32(_) => DataType::Real32,
            Value::Real64(_) => DataType::Real64,
            Value::VisibleString(_) => DataType::VisibleString,
            Value::OctetString(_) => DataType::OctetString,
            Value::Domain(_) => DataType::Domain,
        }
    }

    /// Returns the numeric value as `f64`, or `None` for byte-sequence
    /// values. Used by the codec when a scaling factor is applied.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Boolean(v) => Some(if *v { 1.0 } else { 0.0 }),
            Value::Integer8(v) => Some(f64::from(*v)),
            Value::Integer16(v) => Some(f64::from(*v)),
            Value::Integer32(v) => Some(f64::from(*v)),
            Value::Integer64(v) => Some(*v as f64),
            Value::Unsigned8(v) => Some(f64::from(*v)),
            Value::Unsigned16(v) => Some(f64::from(*v)),
            Value::Unsigned32(v) => Some(f64::from(*v)),
            Value::Unsigned64(v) => Some(*v as f64),
            Value::Real32(v) => Some(f64::from(*v)),
            Value::Real64(v) => Some(*v),
            Value::VisibleString(_) | Value::OctetString(_) | Value::Domain(_) => None,
        }
    }

    /// The zero value of the given datatype: 0 for numeric datatypes, an
    /// empty byte sequence for the raw ones. Used as the read fallback when
    /// a variable has no stored value and no configured default.
    pub fn zero(datatype: DataType) -> Value {
        match datatype {
            DataType::Boolean => Value::Boolean(false),
            DataType::Integer8 => Value::Integer8(0),
            DataType::Integer16 => Value::Integer16(0),
            DataType::Integer32 => Value::Integer32(0),
            DataType::Integer64 => Value::Integer64(0),
            DataType::Unsigned8 => Value::Unsigned8(0),
            DataType::Unsigned16 => Value::Unsigned16(0),
            DataType::Unsigned32 => Value::Unsigned32(0),
            DataType::Unsigned64 => Value::Unsigned64(0),
            DataType::Real32 => Value::Real32(0.0),
            DataType::Real64 => Value::Real64(0.0),
            DataType::VisibleString => Value::VisibleString(String::new()),
            DataType::OctetString => Value::OctetString(Vec::new()),
            DataType::Domain => Value::Domain(Vec::new()),
        }
    }

    /// Serializes the inner value into a little-endian byte vector.
    pub fn serialize(&self) -> Vec<u8> {
        match self {
            // Fixed-size numeric types
            Value::Boolean(v) => u8::from(*v).to_le_bytes().to_vec(),
            Value::Integer8(v) => v.to_le_bytes().to_vec(),
            Value::Integer16(v) => v.to_le_bytes().to_vec(),
            Value::Integer32(v) => v.to_le_bytes().to_vec(),
            Value::Integer64(v) => v.to_le_bytes().to_vec(),
            Value::Unsigned8(v) => v.to_le_bytes().to_vec(),
            Value::Unsigned16(v) => v.to_le_bytes().to_vec(),
            Value::Unsigned32(v) => v.to_le_bytes().to_vec(),
            Value::Unsigned64(v) => v.to_le_bytes().to_vec(),
            Value::Real32(v) => v.to_le_bytes().to_vec(),
            Value::Real64(v) => v.to_le_bytes().to_vec(),

            // Byte arrays / Strings (length limits are handled elsewhere)
            Value::VisibleString(v) => v.as_bytes().to_vec(),
            Value::OctetString(v) => v.clone(),
            Value::Domain(v) => v.clone(),
        }
    }

    /// Deserializes a byte slice into a new `Value` of the given datatype.
    /// Assumes little-endian data.
    pub fn deserialize(data: &[u8], datatype: DataType) -> Result<Value, CanopenError> {
        // Helper macro to handle fixed-size deserialization
        macro_rules! deserialize_fixed {
            ($data:expr, $variant:path, $type:ty) => {{
                // Check length before trying to convert
                let expected_len = core::mem::size_of::<$type>();
                if $data.len() < expected_len {
                    Err(CanopenError::BufferTooShort)
                } else {
                    // Use try_into directly on the correctly sized sub-slice
                    match $data[..expected_len].try_into() {
                        Ok(bytes) => Ok($variant(<$type>::from_le_bytes(bytes))),
                        Err(_) => Err(CanopenError::SliceConversion),
                    }
                }
            }};
        }

        match datatype {
            DataType::Boolean => {
                if data.is_empty() {
                    Err(CanopenError::BufferTooShort)
                } else {
                    Ok(Value::Boolean(data[0] != 0))
                }
            }
            DataType::Integer8 => deserialize_fixed!(data, Value::Integer8, i8),
            DataType::Integer16 => deserialize_fixed!(data, Value::Integer16, i16),
            DataType::Integer32 => deserialize_fixed!(data, Value::Integer32, i32),
            DataType::Integer64 => deserialize_fixed!(data, Value::Integer64, i64),
            DataType::Unsigned8 => deserialize_fixed!(data, Value::Unsigned8, u8),
            DataType::Unsigned16 => deserialize_fixed!(data, Value::Unsigned16, u16),
            DataType::Unsigned32 => deserialize_fixed!(data, Value::Unsigned32, u32),
            DataType::Unsigned64 => deserialize_fixed!(data, Value::Unsigned64, u64),
            DataType::Real32 => deserialize_fixed!(data, Value::Real32, f32),
            DataType::Real64 => deserialize_fixed!(data, Value::Real64, f64),
            DataType::VisibleString => Ok(Value::VisibleString(
                // VisibleString is an ASCII subset, checked as UTF-8
                String::from_utf8(data.to_vec()).map_err(|_| CanopenError::TypeMismatch)?,
            )),
            DataType::OctetString => Ok(Value::OctetString(data.to_vec())),
            DataType::Domain => Ok(Value::Domain(data.to_vec())),
        }
    }
}
