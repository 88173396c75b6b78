use super::value::Value;
use crate::CanopenError;
use alloc::boxed::Box;
use alloc::vec::Vec;

/// An observer invoked with the value being written.
pub type ValueCallback = Box<dyn FnMut(&Value) -> Result<(), CanopenError>>;

/// Token identifying a registered callback, used to remove it again.
/// Closures are not comparable, so removal is by token rather than by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackId(u32);

/// Failure policy of a callback pipeline.
///
/// Encoded as data rather than as distinct handler types: one shared
/// invocation routine consumes the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailMode {
    /// Stop at the first failing observer and propagate its error; later
    /// observers do not run. Used for validation, where rejecting a write
    /// must prevent any side effects.
    FirstFail,
    /// Run every observer regardless of earlier failures, then raise an
    /// aggregate error referencing all of them. Used for update/download
    /// notification, where one faulty subscriber must not silence healthy
    /// ones.
    CollectAll,
}

/// An ordered observer list with a selectable failure policy.
/// Insertion order is invocation order.
pub struct CallbackHandler {
    fail_mode: FailMode,
    callbacks: Vec<(CallbackId, ValueCallback)>,
    next_id: u32,
}

impl CallbackHandler {
    pub fn new(fail_mode: FailMode) -> Self {
        Self {
            fail_mode,
            callbacks: Vec::new(),
            next_id: 0,
        }
    }

    pub fn fail_mode(&self) -> FailMode {
        self.fail_mode
    }

    /// Appends `callback` to the list and returns its removal token.
    pub fn add(&mut self, callback: ValueCallback) -> CallbackId {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    /// Removes the callback registered under `id`.
    pub fn remove(&mut self, id: CallbackId) -> Result<(), CanopenError> {
        let position = self
            .callbacks
            .iter()
            .position(|(registered, _)| *registered == id)
            .ok_or(CanopenError::CallbackNotFound)?;
        self.callbacks.remove(position);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Invokes every observer in registration order, applying this
    /// handler's failure policy.
    pub fn invoke(&mut self, value: &Value) -> Result<(), CanopenError> {
        match self.fail_mode {
            FailMode::FirstFail => {
                for (_, callback) in &mut self.callbacks {
                    callback(value)?;
                }
                Ok(())
            }
            FailMode::CollectAll => {
                let mut failures = Vec::new();
                for (_, callback) in &mut self.callbacks {
                    if let Err(error) = callback(value) {
                        failures.push(error);
                    }
                }
                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(CanopenError::CallbackFailed(failures))
                }
            }
        }
    }
}

impl core::fmt::Debug for CallbackHandler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CallbackHandler")
            .field("fail_mode", &self.fail_mode)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}
