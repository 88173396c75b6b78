use super::codec;
use super::datatype::DataType;
use super::value::Value;
use crate::CanopenError;
use alloc::vec::Vec;
use core::str::FromStr;

/// Defines the access rights for an Object Dictionary entry.
/// (Reference: CiA 301, Section 7.4.5)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    /// read and write access
    ReadWrite,
    /// read only access
    ReadOnly,
    /// write only access
    WriteOnly,
    /// read only access, value is fixed and never mutated after init
    Const,
}

impl FromStr for AccessType {
    type Err = CanopenError;

    /// Parses the conventional EDS access strings. Anything outside the
    /// four allowed modes is a definition-time configuration error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rw" => Ok(AccessType::ReadWrite),
            "ro" => Ok(AccessType::ReadOnly),
            "wo" => Ok(AccessType::WriteOnly),
            "const" => Ok(AccessType::Const),
            _ => Err(CanopenError::Configuration("Invalid access type")),
        }
    }
}

/// One addressable leaf value of the Object Dictionary: a datatype, an
/// access mode, and optional default/scaling/range metadata.
///
/// A `Variable` only describes the value; the current value itself lives in
/// the [`ObjectDictionary`](super::ObjectDictionary) value store. Range
/// limits are metadata for write-time validate callbacks; the variable
/// itself never enforces them.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub datatype: DataType,
    pub access: AccessType,
    pub default: Option<Value>,
    pub factor: Option<f64>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub name: Option<&'static str>,
}

impl Variable {
    /// Creates a new variable definition with no default, scaling or limits.
    pub fn new(datatype: DataType, access: AccessType) -> Self {
        Self {
            datatype,
            access,
            default: None,
            factor: None,
            minimum: None,
            maximum: None,
            name: None,
        }
    }

    /// Sets the static default value, returned by reads before any write.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets a descriptive name.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the engineering-unit scaling factor.
    ///
    /// Fails fast: scaling is only defined for numeric datatypes.
    pub fn with_factor(mut self, factor: f64) -> Result<Self, CanopenError> {
        if !self.datatype.is_numeric() {
            return Err(CanopenError::Configuration(
                "Factor not available for non-numeric datatype",
            ));
        }
        self.factor = Some(factor);
        Ok(self)
    }

    /// Sets the valid value range.
    ///
    /// Fails fast: limits are only defined for numeric datatypes. The range
    /// is not enforced here — that is the job of write-time validate
    /// callbacks registered with the Object Dictionary.
    pub fn with_limits(
        mut self,
        minimum: Option<f64>,
        maximum: Option<f64>,
    ) -> Result<Self, CanopenError> {
        if !self.datatype.is_numeric() && (minimum.is_some() || maximum.is_some()) {
            return Err(CanopenError::Configuration(
                "Minimum and Maximum not available for non-numeric datatype",
            ));
        }
        self.minimum = minimum;
        self.maximum = maximum;
        Ok(self)
    }

    /// Whether reads are allowed by the access mode.
    pub fn readable(&self) -> bool {
        matches!(
            self.access,
            AccessType::ReadOnly | AccessType::ReadWrite | AccessType::Const
        )
    }

    /// Whether writes are allowed by the access mode.
    pub fn writable(&self) -> bool {
        matches!(self.access, AccessType::WriteOnly | AccessType::ReadWrite)
    }

    /// The encoded byte width, or `None` for unbounded datatypes.
    pub fn size(&self) -> Option<usize> {
        self.datatype.size()
    }

    /// Encodes `value` with this variable's datatype and scaling factor.
    pub fn pack(&self, value: &Value) -> Result<Vec<u8>, CanopenError> {
        codec::pack(self.datatype, value, self.factor)
    }

    /// Decodes wire bytes with this variable's datatype and scaling factor.
    pub fn unpack(&self, data: &[u8]) -> Result<Value, CanopenError> {
        codec::unpack(self.datatype, data, self.factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_type_parsing() {
        assert_eq!("rw".parse(), Ok(AccessType::ReadWrite));
        assert_eq!("ro".parse(), Ok(AccessType::ReadOnly));
        assert_eq!("wo".parse(), Ok(AccessType::WriteOnly));
        assert_eq!("const".parse(), Ok(AccessType::Const));
        assert_eq!(
            "rwr".parse::<AccessType>(),
            Err(CanopenError::Configuration("Invalid access type"))
        );
    }

    #[test]
    fn test_limits_rejected_for_non_numeric() {
        let result = Variable::new(DataType::OctetString, AccessType::ReadWrite)
            .with_limits(Some(0.0), Some(10.0));
        assert!(matches!(result, Err(CanopenError::Configuration(_))));

        // A single bound is rejected just the same.
        let result = Variable::new(DataType::VisibleString, AccessType::ReadOnly)
            .with_limits(None, Some(10.0));
        assert!(matches!(result, Err(CanopenError::Configuration(_))));
    }

    #[test]
    fn test_factor_rejected_for_non_numeric() {
        let result = Variable::new(DataType::Domain, AccessType::ReadWrite).with_factor(0.5);
        assert!(matches!(result, Err(CanopenError::Configuration(_))));
    }

    #[test]
    fn test_limits_accepted_for_numeric() {
        let variable = Variable::new(DataType::Integer16, AccessType::ReadWrite)
            .with_limits(Some(-100.0), Some(100.0))
            .unwrap();
        assert_eq!(variable.minimum, Some(-100.0));
        assert_eq!(variable.maximum, Some(100.0));
    }

    #[test]
    fn test_readable_writable() {
        assert!(Variable::new(DataType::Unsigned8, AccessType::ReadWrite).readable());
        assert!(Variable::new(DataType::Unsigned8, AccessType::ReadWrite).writable());
        assert!(Variable::new(DataType::Unsigned8, AccessType::Const).readable());
        assert!(!Variable::new(DataType::Unsigned8, AccessType::Const).writable());
        assert!(!Variable::new(DataType::Unsigned8, AccessType::WriteOnly).readable());
        assert!(Variable::new(DataType::Unsigned8, AccessType::WriteOnly).writable());
        assert!(!Variable::new(DataType::Unsigned8, AccessType::ReadOnly).writable());
    }

    #[test]
    fn test_pack_unpack_uses_factor() {
        let variable = Variable::new(DataType::Unsigned16, AccessType::ReadWrite)
            .with_factor(0.5)
            .unwrap();
        let bytes = variable.pack(&Value::Real64(21.0)).unwrap();
        assert_eq!(bytes, 42u16.to_le_bytes());
        let value = variable.unpack(&bytes).unwrap();
        assert_eq!(value.as_f64(), Some(21.0));
    }
}
