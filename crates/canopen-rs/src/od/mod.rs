// crates/canopen-rs/src/od/mod.rs

mod callback;
mod codec;
pub mod constants;
mod datatype;
mod object;
pub(crate) mod predefined;
mod value;
mod variable;

pub use callback::{CallbackHandler, CallbackId, FailMode, ValueCallback};
pub use datatype::DataType;
pub use object::{Array, Object, Record};
pub use value::Value;
pub use variable::{AccessType, Variable};

pub use codec::{pack, unpack};

use crate::CanopenError;
use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;
use log::trace;

/// The (index, sub-index) pair uniquely identifying one addressable value.
pub type Multiplexor = (u16, u8);

/// A callback overriding reads of one multiplexor with a live/computed
/// quantity, bypassing the stored value entirely.
pub type ReadCallback = Box<dyn FnMut() -> Value>;

/// The main Object Dictionary structure.
///
/// Composes a static schema (index to [`Object`] definition), a runtime
/// value store decoupled from the schema's static defaults, and three
/// callback pipelines keyed by multiplexor: validate (first-fail), update
/// and download (both collect-all), plus optional per-multiplexor read
/// overrides.
pub struct ObjectDictionary {
    objects: BTreeMap<u16, Object>,
    data: BTreeMap<Multiplexor, Value>,
    validate_callbacks: BTreeMap<Multiplexor, CallbackHandler>,
    update_callbacks: BTreeMap<Multiplexor, CallbackHandler>,
    download_callbacks: BTreeMap<Multiplexor, CallbackHandler>,
    read_callbacks: BTreeMap<Multiplexor, ReadCallback>,
}

impl fmt::Debug for ObjectDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDictionary")
            .field("objects", &self.objects)
            .field("data", &self.data)
            .field("read_callbacks", &self.read_callbacks.len())
            .finish()
    }
}

impl Default for ObjectDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectDictionary {
    /// Creates a new, empty OD. The application registers its schema with
    /// [`insert`](Self::insert) before any traffic is served.
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            data: BTreeMap::new(),
            validate_callbacks: BTreeMap::new(),
            update_callbacks: BTreeMap::new(),
            download_callbacks: BTreeMap::new(),
            read_callbacks: BTreeMap::new(),
        }
    }

    /// Inserts a new object into the dictionary at a given index.
    pub fn insert(&mut self, index: u16, object: impl Into<Object>) {
        self.objects.insert(index, object.into());
    }

    /// Looks up the object registered at `index`.
    pub fn lookup(&self, index: u16) -> Result<&Object, CanopenError> {
        self.objects.get(&index).ok_or(CanopenError::ObjectNotFound)
    }

    /// Mutable lookup, primarily for growing a [`Record`]'s membership
    /// after registration.
    pub fn lookup_mut(&mut self, index: u16) -> Result<&mut Object, CanopenError> {
        self.objects
            .get_mut(&index)
            .ok_or(CanopenError::ObjectNotFound)
    }

    /// Resolves the variable definition addressed by (`index`, `subindex`).
    ///
    /// Bare variables ignore the sub-index; records and arrays resolve (and
    /// possibly synthesize) their member.
    pub fn variable(&self, index: u16, subindex: u8) -> Result<Cow<'_, Variable>, CanopenError> {
        self.lookup(index)?.sub(subindex)
    }

    /// Maps an addressed value to its multiplexor, verifying the address
    /// exists. Bare variables are single-valued, so any caller-supplied
    /// sub-index collapses to 0.
    fn resolve(&self, index: u16, subindex: u8) -> Result<Multiplexor, CanopenError> {
        match self.objects.get(&index) {
            None => Err(CanopenError::ObjectNotFound),
            Some(Object::Variable(_)) => Ok((index, 0)),
            Some(object) => {
                object.sub(subindex)?;
                Ok((index, subindex))
            }
        }
    }

    /// Writes `value` to the addressed variable.
    ///
    /// WARNING: the datatype and range of `value` have to be checked before
    /// calling this function — only explicitly registered validate
    /// callbacks run here.
    ///
    /// The sequence is strictly ordered: validate callbacks (first-fail; a
    /// failure aborts the write with no state change), then the store, then
    /// update callbacks (collect-all, on every successful write), then —
    /// only when `downloaded` is set — download callbacks (collect-all).
    /// `downloaded` marks writes originating from an actual external
    /// download as opposed to an internal value change.
    ///
    /// Update/download failures are raised after every observer ran and do
    /// not undo the already-committed value.
    pub fn write(
        &mut self,
        index: u16,
        subindex: u8,
        value: Value,
        downloaded: bool,
    ) -> Result<(), CanopenError> {
        let multiplexor = self.resolve(index, subindex)?;

        if let Some(handler) = self.validate_callbacks.get_mut(&multiplexor) {
            handler.invoke(&value)?; // first-fail: abort before any side effect
        }

        trace!(
            "[OD] write {:#06X}:{} = {:?} (downloaded: {})",
            multiplexor.0, multiplexor.1, value, downloaded
        );
        self.data.insert(multiplexor, value.clone());

        if let Some(handler) = self.update_callbacks.get_mut(&multiplexor) {
            handler.invoke(&value)?;
        }

        if !downloaded {
            return Ok(());
        }

        if let Some(handler) = self.download_callbacks.get_mut(&multiplexor) {
            handler.invoke(&value)?;
        }

        Ok(())
    }

    /// Reads the addressed value.
    ///
    /// A registered read override wins unconditionally (it models a
    /// live/computed quantity). Otherwise the stored value is returned if
    /// present, then the variable's static default, then a type-appropriate
    /// zero.
    pub fn read(&mut self, index: u16, subindex: u8) -> Result<Value, CanopenError> {
        let multiplexor = self.resolve(index, subindex)?;

        if let Some(callback) = self.read_callbacks.get_mut(&multiplexor) {
            return Ok(callback());
        }

        if let Some(value) = self.data.get(&multiplexor) {
            return Ok(value.clone());
        }

        let variable = self.variable(index, multiplexor.1)?;
        Ok(match &variable.default {
            Some(value) => value.clone(),
            None => Value::zero(variable.datatype),
        })
    }

    /// Whether an explicit value is stored for exactly this multiplexor —
    /// independent of read overrides and static defaults.
    pub fn has_value(&self, index: u16, subindex: Option<u8>) -> bool {
        self.data.contains_key(&(index, subindex.unwrap_or(0)))
    }

    /// Registers a read override for one multiplexor.
    pub fn set_read_callback(&mut self, index: u16, subindex: u8, callback: ReadCallback) {
        self.read_callbacks.insert((index, subindex), callback);
    }

    /// The validate pipeline of one multiplexor, created (first-fail) on
    /// first use. Validators run before a write is committed and abort it
    /// on failure.
    pub fn validate_callbacks(&mut self, multiplexor: Multiplexor) -> &mut CallbackHandler {
        self.validate_callbacks
            .entry(multiplexor)
            .or_insert_with(|| CallbackHandler::new(FailMode::FirstFail))
    }

    /// The update pipeline of one multiplexor, created (collect-all) on
    /// first use. Observers run on every successful write.
    pub fn update_callbacks(&mut self, multiplexor: Multiplexor) -> &mut CallbackHandler {
        self.update_callbacks
            .entry(multiplexor)
            .or_insert_with(|| CallbackHandler::new(FailMode::CollectAll))
    }

    /// The download pipeline of one multiplexor, created (collect-all) on
    /// first use. Observers run only for writes flagged as downloaded.
    pub fn download_callbacks(&mut self, multiplexor: Multiplexor) -> &mut CallbackHandler {
        self.download_callbacks
            .entry(multiplexor)
            .or_insert_with(|| CallbackHandler::new(FailMode::CollectAll))
    }

    /// Iterates all top-level (index, object) pairs, ascending by index.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Object)> {
        self.objects.iter().map(|(index, object)| (*index, object))
    }

    /// Number of registered top-level objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Whether an object is registered at `index`.
    pub fn contains(&self, index: u16) -> bool {
        self.objects.contains_key(&index)
    }
}
