#![cfg_attr(not(feature = "std"), no_std)]


// 'alloc' is used for dynamic allocation (e.g., Vec<u8> in codec output)
extern crate alloc;

// --- Foundation Modules ---
pub mod types;
pub mod hal;

// --- Higher Layers ---
pub mod nmt;
pub mod od;

// --- Node Abstraction ---
pub mod node;

// --- Top-level Exports ---
pub use types::NodeId;
pub use hal::{CanInterface, CanopenError};
pub use od::{
    AccessType, Array, DataType, Object, ObjectDictionary, Record, Value, Variable,
};
pub use nmt::{NmtCommand, NmtService, NmtState};
pub use node::Node;
