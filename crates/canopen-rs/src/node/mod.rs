use crate::CanopenError;
use crate::hal::CanInterface;
use crate::nmt::{NmtService, NmtState};
use crate::od::{ObjectDictionary, predefined};
use crate::types::{C_COB_ID_NMT, NodeId};
use log::info;

/// Represents a complete CANopen node: the Object Dictionary, the NMT
/// service and the transport they share.
///
/// The node holds a mutable reference to the bus interface for its
/// lifetime; inbound frames are delivered by the embedding application's
/// dispatch loop through [`handle_frame`](Self::handle_frame), one at a
/// time, in delivery order.
pub struct Node<'a> {
    pub object_dictionary: ObjectDictionary,
    pub nmt: NmtService,
    node_id: NodeId,
    bus: &'a mut dyn CanInterface,
}

impl<'a> Node<'a> {
    /// Creates a new node.
    ///
    /// The caller may pass a pre-populated Object Dictionary; either way
    /// the mandatory communication profile objects (device type, error
    /// register, identity object) are registered here. The NMT service
    /// boots immediately: after construction the node is in
    /// Pre-Operational and has announced itself on the bus.
    pub fn new(
        bus: &'a mut dyn CanInterface,
        node_id: NodeId,
        od: Option<ObjectDictionary>,
    ) -> Result<Self, CanopenError> {
        info!("Creating new CANopen node {}", node_id);
        let mut object_dictionary = od.unwrap_or_default();
        predefined::populate_communication_objects(&mut object_dictionary)?;

        let nmt = NmtService::new(node_id, &mut *bus);

        Ok(Self {
            object_dictionary,
            nmt,
            node_id,
            bus,
        })
    }

    /// The Node ID of this node.
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Delivers one inbound frame to the service subscribed to its COB-ID.
    ///
    /// Only the NMT broadcast channel is consumed by this core; transfer
    /// protocol channels (SDO/PDO) belong to collaborating services.
    pub fn handle_frame(&mut self, cob_id: u32, data: &[u8]) {
        if cob_id == C_COB_ID_NMT {
            self.nmt.handle_frame(data, &mut *self.bus);
        }
    }

    /// Drives an NMT transition from a collaborating component (e.g., a
    /// heartbeat consumer reacting to a lost producer).
    pub fn set_nmt_state(&mut self, state: NmtState) {
        self.nmt.set_state(state, &mut *self.bus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::od::constants::IDX_IDENTITY_OBJECT_REC;
    use crate::od::Value;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::convert::TryInto;

    #[derive(Default)]
    struct RecordingBus {
        frames: Vec<(u32, Vec<u8>)>,
    }

    impl CanInterface for RecordingBus {
        fn send(&mut self, cob_id: u32, payload: &[u8]) {
            self.frames.push((cob_id, payload.to_vec()));
        }
    }

    #[test]
    fn test_node_boots_to_pre_operational() {
        let mut bus = RecordingBus::default();
        {
            let node = Node::new(&mut bus, 10u8.try_into().unwrap(), None).unwrap();
            assert_eq!(node.nmt.state(), NmtState::PreOperational);
            assert_eq!(node.node_id(), NodeId(10));
        }
        assert_eq!(bus.frames, vec![(0x70A, vec![0x00])]);
    }

    #[test]
    fn test_node_registers_communication_objects() {
        let mut bus = RecordingBus::default();
        let mut node = Node::new(&mut bus, 10u8.try_into().unwrap(), None).unwrap();
        assert!(node.object_dictionary.contains(0x1000));
        assert!(node.object_dictionary.contains(0x1001));
        assert_eq!(
            node.object_dictionary
                .read(IDX_IDENTITY_OBJECT_REC, 0)
                .unwrap(),
            Value::Unsigned8(4)
        );
    }

    #[test]
    fn test_nmt_frames_are_routed() {
        let mut bus = RecordingBus::default();
        let mut node = Node::new(&mut bus, 10u8.try_into().unwrap(), None).unwrap();

        node.handle_frame(C_COB_ID_NMT, &[0x01, 10]);
        assert_eq!(node.nmt.state(), NmtState::Operational);

        // Frames on other channels are not consumed by this core.
        node.handle_frame(0x60A, &[0x02, 10]);
        assert_eq!(node.nmt.state(), NmtState::Operational);
    }

    #[test]
    fn test_external_state_drive() {
        let mut bus = RecordingBus::default();
        let mut node = Node::new(&mut bus, 10u8.try_into().unwrap(), None).unwrap();
        node.set_nmt_state(NmtState::Stopped);
        assert_eq!(node.nmt.state(), NmtState::Stopped);
    }
}
