// crates/canopen-rs/src/nmt/mod.rs

pub mod states;

pub use states::{NmtCommand, NmtState, UnknownCommandSpecifier};

use crate::hal::CanInterface;
use crate::types::{
    C_ADR_BROADCAST_NODE_ID, C_COB_ID_ERROR_CONTROL_BASE, C_NMT_COMMAND_LEN, NodeId,
};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::convert::TryFrom;
use log::{debug, error, info};

/// An observer invoked synchronously on every committed state transition.
pub type StateCallback = Box<dyn FnMut(NmtState)>;

/// Manages the NMT state for a CANopen node.
///
/// The service consumes the NMT broadcast channel (COB-ID 0, routed in by
/// the embedding dispatch loop) and drives the node's lifecycle:
/// Initialisation is entered only transiently and always immediately
/// followed by Pre-Operational. Timer-driven transitions (heartbeat loss
/// etc.) are the responsibility of collaborating components calling
/// [`set_state`](Self::set_state).
pub struct NmtService {
    state: NmtState,
    node_id: NodeId,
    state_callbacks: Vec<StateCallback>,
}

impl NmtService {
    /// Creates the NMT service for a node and performs the power-on
    /// sequence: Initialisation (announcing itself with a boot-up frame)
    /// followed by the forced transition to Pre-Operational.
    pub fn new(node_id: NodeId, bus: &mut dyn CanInterface) -> Self {
        let mut service = Self {
            state: NmtState::Initialisation,
            node_id,
            state_callbacks: Vec::new(),
        };
        // No observers can be registered yet, so the power-on sequence
        // reduces to the boot-up announcement and the forced transition.
        service.send_boot_up(bus);
        service.state = NmtState::PreOperational;
        service
    }

    /// The current NMT state.
    pub fn state(&self) -> NmtState {
        self.state
    }

    /// The Node ID this service answers to.
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Registers an observer invoked on every committed transition,
    /// including the transient Initialisation step during a reset.
    pub fn add_state_callback(&mut self, callback: StateCallback) {
        self.state_callbacks.push(callback);
    }

    /// Transitions to `new_state`.
    ///
    /// A transition to the current state is a no-op. Entering
    /// Initialisation sends the boot-up announcement before observers are
    /// notified; observers then run in registration order with the new
    /// state, and finally the state is committed.
    pub fn set_state(&mut self, new_state: NmtState, bus: &mut dyn CanInterface) {
        if new_state == self.state {
            return;
        }

        if new_state == NmtState::Initialisation {
            self.send_boot_up(bus);
        }

        for callback in &mut self.state_callbacks {
            callback(new_state);
        }

        debug!(
            "[NMT] Node {} transition {:?} -> {:?}",
            self.node_id, self.state, new_state
        );
        self.state = new_state;
    }

    /// Processes an inbound NMT command frame (command specifier, target
    /// Node ID).
    ///
    /// Frames addressed to neither the broadcast id nor this node are
    /// ignored without diagnostics, as are recognized commands that have no
    /// defined effect in the current state. Unrecognized command specifiers
    /// are logged and ignored.
    pub fn handle_frame(&mut self, data: &[u8], bus: &mut dyn CanInterface) {
        if data.len() < C_NMT_COMMAND_LEN {
            return;
        }
        let (cs, target) = (data[0], data[1]);

        // Target 0 addresses every node at once.
        if target != C_ADR_BROADCAST_NODE_ID && target != self.node_id.0 {
            return;
        }

        match NmtCommand::try_from(cs) {
            Ok(NmtCommand::StartNode) => {
                if matches!(self.state, NmtState::PreOperational | NmtState::Stopped) {
                    self.set_state(NmtState::Operational, bus);
                }
            }
            Ok(NmtCommand::StopNode) => {
                if matches!(self.state, NmtState::PreOperational | NmtState::Operational) {
                    self.set_state(NmtState::Stopped, bus);
                }
            }
            Ok(NmtCommand::EnterPreOperational) => {
                if matches!(self.state, NmtState::Operational | NmtState::Stopped) {
                    self.set_state(NmtState::PreOperational, bus);
                }
            }
            Ok(NmtCommand::ResetNode) | Ok(NmtCommand::ResetCommunication) => {
                // Valid from any state: transient Initialisation (with a
                // fresh boot-up announcement), then Pre-Operational.
                self.set_state(NmtState::Initialisation, bus);
                self.set_state(NmtState::PreOperational, bus);
            }
            Err(unknown) => {
                error!("[NMT] {}", unknown);
            }
        }
    }

    /// Sends the one-byte boot-up announcement on this node's error control
    /// channel.
    fn send_boot_up(&self, bus: &mut dyn CanInterface) {
        info!("[NMT] Node {} sending boot-up message", self.node_id);
        bus.send(
            C_COB_ID_ERROR_CONTROL_BASE + u32::from(self.node_id.0),
            &[0x00],
        );
    }
}
