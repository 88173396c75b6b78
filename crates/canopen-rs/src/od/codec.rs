//! Datatype codec: translates between in-memory [`Value`]s and their
//! fixed-width little-endian wire representation, applying an optional
//! engineering-unit scaling factor.
//!
//! Scaling works in raw-wire space: `pack` divides by the factor before
//! encoding, `unpack` multiplies after decoding. A scaled value leaves the
//! integer domain, so `unpack` with a factor always yields a
//! [`Value::Real64`]. Without a factor, packing a value that already carries
//! the wire datatype is an exact per-width encode.

use super::datatype::DataType;
use super::value::Value;
use crate::CanopenError;
use alloc::vec;
use alloc::vec::Vec;
use crate::types::{
    INTEGER8, INTEGER16, INTEGER32, INTEGER64, REAL32, UNSIGNED8, UNSIGNED16, UNSIGNED32,
    UNSIGNED64,
};

/// Encodes `value` for the wire.
///
/// Numeric datatypes are divided by `factor` (when present), truncated
/// towards zero for the non-float datatypes, and encoded with the datatype's
/// fixed little-endian width. Non-numeric datatypes pass through as their
/// raw byte sequence; a factor must not be set for them (enforced upstream
/// by the `Variable` constructor).
pub fn pack(datatype: DataType, value: &Value, factor: Option<f64>) -> Result<Vec<u8>, CanopenError> {
    if !datatype.is_numeric() {
        return match value {
            Value::VisibleString(s) => Ok(s.as_bytes().to_vec()),
            Value::OctetString(data) | Value::Domain(data) => Ok(data.clone()),
            _ => Err(CanopenError::TypeMismatch),
        };
    }

    // Unscaled values that already carry the wire datatype encode exactly,
    // without a round-trip through f64 (relevant for 64-bit integers).
    if factor.is_none() && value.datatype() == datatype {
        return Ok(value.serialize());
    }

    let mut scaled = value.as_f64().ok_or(CanopenError::TypeMismatch)?;
    if let Some(factor) = factor {
        scaled /= factor;
    }

    // `as` casts truncate towards zero, which is the wanted behavior for
    // the integer datatypes (no core float intrinsics needed).
    let bytes = match datatype {
        DataType::Boolean => vec![u8::from(scaled != 0.0)],
        DataType::Integer8 => (scaled as INTEGER8).to_le_bytes().to_vec(),
        DataType::Integer16 => (scaled as INTEGER16).to_le_bytes().to_vec(),
        DataType::Integer32 => (scaled as INTEGER32).to_le_bytes().to_vec(),
        DataType::Integer64 => (scaled as INTEGER64).to_le_bytes().to_vec(),
        DataType::Unsigned8 => (scaled as UNSIGNED8).to_le_bytes().to_vec(),
        DataType::Unsigned16 => (scaled as UNSIGNED16).to_le_bytes().to_vec(),
        DataType::Unsigned32 => (scaled as UNSIGNED32).to_le_bytes().to_vec(),
        DataType::Unsigned64 => (scaled as UNSIGNED64).to_le_bytes().to_vec(),
        DataType::Real32 => (scaled as REAL32).to_le_bytes().to_vec(),
        DataType::Real64 => scaled.to_le_bytes().to_vec(),
        DataType::VisibleString | DataType::OctetString | DataType::Domain => {
            return Err(CanopenError::TypeMismatch);
        }
    };
    Ok(bytes)
}

/// Decodes wire bytes into a [`Value`].
///
/// The inverse of [`pack`]: numeric datatypes decode at their fixed width
/// and are multiplied by `factor` when present (yielding a
/// [`Value::Real64`]); non-numeric datatypes pass through unchanged.
pub fn unpack(datatype: DataType, data: &[u8], factor: Option<f64>) -> Result<Value, CanopenError> {
    let value = Value::deserialize(data, datatype)?;
    match factor {
        Some(factor) if datatype.is_numeric() => {
            let raw = value.as_f64().ok_or(CanopenError::TypeMismatch)?;
            Ok(Value::Real64(raw * factor))
        }
        _ => Ok(value),
    }
}
