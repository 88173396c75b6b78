use super::datatype::DataType;
use super::value::Value;
use super::variable::{AccessType, Variable};
use crate::CanopenError;
use alloc::borrow::Cow;
use alloc::collections::BTreeMap;

/// Name of the synthesized sub-index 0 entry of records and arrays.
const HIGHEST_SUB_INDEX_NAME: &str = "Highest Sub-Index Supported";

/// Represents a single entry in the Object Dictionary.
///
/// Lookups resolve through this tagged union: a bare variable, a record of
/// distinct members, or an array replicating one member definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Variable(Variable),
    Record(Record),
    Array(Array),
}

impl Object {
    /// Resolves the variable definition addressed by `subindex`.
    ///
    /// Bare variables are single-valued, so the sub-index argument is
    /// ignored for them. Records and arrays synthesize their sub-index 0
    /// entry on the fly, which is why the result is a [`Cow`].
    pub fn sub(&self, subindex: u8) -> Result<Cow<'_, Variable>, CanopenError> {
        match self {
            Object::Variable(variable) => Ok(Cow::Borrowed(variable)),
            Object::Record(record) => record.get(subindex),
            Object::Array(array) => array.get(subindex),
        }
    }
}

impl From<Variable> for Object {
    fn from(variable: Variable) -> Self {
        Object::Variable(variable)
    }
}

impl From<Record> for Object {
    fn from(record: Record) -> Self {
        Object::Record(record)
    }
}

impl From<Array> for Object {
    fn from(array: Array) -> Self {
        Object::Array(array)
    }
}

/// A composite object grouping distinct variable definitions under one
/// 16-bit index, keyed by sub-index (1-255).
///
/// Sub-index 0 is never stored: it is synthesized as a const UNSIGNED8
/// variable reporting the highest currently registered sub-index, so it
/// stays correct as members are added.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub name: Option<&'static str>,
    variables: BTreeMap<u8, Variable>,
}

impl Record {
    /// Creates an empty record.
    pub fn new(name: Option<&'static str>) -> Self {
        Self {
            name,
            variables: BTreeMap::new(),
        }
    }

    fn highest_sub_index(&self) -> Variable {
        let highest = self.variables.keys().next_back().copied().unwrap_or(0);
        Variable::new(DataType::Unsigned8, AccessType::Const)
            .with_default(Value::Unsigned8(highest))
            .with_name(HIGHEST_SUB_INDEX_NAME)
    }

    /// Returns the member at `subindex`, or the synthesized entry for 0.
    pub fn get(&self, subindex: u8) -> Result<Cow<'_, Variable>, CanopenError> {
        if subindex == 0 {
            return Ok(Cow::Owned(self.highest_sub_index()));
        }
        self.variables
            .get(&subindex)
            .map(Cow::Borrowed)
            .ok_or(CanopenError::SubObjectNotFound)
    }

    /// Registers (or overwrites) the member at `subindex`.
    /// Sub-index 0 is reserved for the synthesized entry.
    pub fn set(&mut self, subindex: u8, variable: Variable) -> Result<(), CanopenError> {
        if subindex == 0 {
            return Err(CanopenError::Configuration(
                "Sub-index 0 is synthesized and cannot be set",
            ));
        }
        self.variables.insert(subindex, variable);
        Ok(())
    }

    /// Whether `subindex` is addressable in this record.
    pub fn contains(&self, subindex: u8) -> bool {
        subindex == 0 || self.variables.contains_key(&subindex)
    }

    /// Number of addressable sub-indices (registered members plus the
    /// synthesized sub-index 0).
    pub fn len(&self) -> usize {
        self.variables.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        // Sub-index 0 always exists.
        false
    }

    /// Iterates sub-index ascending, with the synthesized entry first.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Cow<'_, Variable>)> {
        core::iter::once((0u8, Cow::Owned(self.highest_sub_index()))).chain(
            self.variables
                .iter()
                .map(|(subindex, variable)| (*subindex, Cow::Borrowed(variable))),
        )
    }
}

/// A composite object replicating one shared variable definition across
/// sub-indices 1..=length under one 16-bit index.
///
/// Sub-index 0 is synthesized and reports the length; it is const unless
/// the array is declared mutable, in which case it is read-write. The
/// length itself is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub name: Option<&'static str>,
    variable: Variable,
    length: u8,
    mutable: bool,
}

impl Array {
    /// Creates an array of `length` elements sharing `variable`'s definition.
    pub fn new(variable: Variable, length: u8, mutable: bool, name: Option<&'static str>) -> Self {
        Self {
            name,
            variable,
            length,
            mutable,
        }
    }

    /// The number of elements (excluding the synthesized sub-index 0).
    pub fn length(&self) -> u8 {
        self.length
    }

    fn highest_sub_index(&self) -> Variable {
        let access = if self.mutable {
            AccessType::ReadWrite
        } else {
            AccessType::Const
        };
        Variable::new(DataType::Unsigned8, access)
            .with_default(Value::Unsigned8(self.length))
            .with_name(HIGHEST_SUB_INDEX_NAME)
    }

    /// Returns the element definition at `subindex`, or the synthesized
    /// entry for 0. All elements share one definition; callers distinguish
    /// them only by sub-index.
    pub fn get(&self, subindex: u8) -> Result<Cow<'_, Variable>, CanopenError> {
        if subindex == 0 {
            return Ok(Cow::Owned(self.highest_sub_index()));
        }
        if subindex > self.length {
            // Not available in array
            return Err(CanopenError::SubObjectNotFound);
        }
        Ok(Cow::Borrowed(&self.variable))
    }

    /// Whether `subindex` is addressable in this array.
    pub fn contains(&self, subindex: u8) -> bool {
        subindex <= self.length
    }

    /// Number of addressable sub-indices (elements plus the synthesized
    /// sub-index 0).
    pub fn len(&self) -> usize {
        usize::from(self.length) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates sub-index ascending, with the synthesized entry first.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Cow<'_, Variable>)> {
        core::iter::once((0u8, Cow::Owned(self.highest_sub_index())))
            .chain((1..=self.length).map(|subindex| (subindex, Cow::Borrowed(&self.variable))))
    }
}
