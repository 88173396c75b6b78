// crates/canopen-rs/tests/node_test.rs

#[cfg(feature = "std")]
mod tests {
    use canopen_rs::{
        AccessType, CanInterface, CanopenError, DataType, Node, NmtState, NodeId,
        ObjectDictionary, Value, Variable,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    /// A bus that records every transmitted frame. Cloning shares the
    /// underlying frame log, so tests can inspect traffic while the node
    /// holds the sending half.
    #[derive(Clone, Default)]
    struct SimulatedBus {
        frames: Rc<RefCell<Vec<(u32, Vec<u8>)>>>,
    }

    impl CanInterface for SimulatedBus {
        fn send(&mut self, cob_id: u32, payload: &[u8]) {
            self.frames.borrow_mut().push((cob_id, payload.to_vec()));
        }
    }

    fn init_logger() {
        let _ = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .try_init();
    }

    #[test]
    fn test_boot_up_and_nmt_lifecycle() {
        init_logger();

        let mut bus = SimulatedBus::default();
        let frames = Rc::clone(&bus.frames);
        let mut node = Node::new(&mut bus, NodeId(20), None).unwrap();

        // Fresh node: Pre-Operational, exactly one boot-up frame.
        assert_eq!(node.nmt.state(), NmtState::PreOperational);
        assert_eq!(*frames.borrow(), vec![(0x714, vec![0x00])]);

        let states = Rc::new(RefCell::new(Vec::new()));
        let observed = Rc::clone(&states);
        node.nmt.add_state_callback(Box::new(move |state| {
            observed.borrow_mut().push(state);
        }));

        // Start addressed to this node.
        node.handle_frame(0, &[0x01, 20]);
        assert_eq!(node.nmt.state(), NmtState::Operational);

        // Start again: no transition, no callback.
        node.handle_frame(0, &[0x01, 20]);
        assert_eq!(states.borrow().len(), 1);

        // Frame for a different node: ignored entirely.
        node.handle_frame(0, &[0x02, 21]);
        assert_eq!(node.nmt.state(), NmtState::Operational);

        // Broadcast reset communication: transient Initialisation with a
        // second boot-up frame, then Pre-Operational.
        node.handle_frame(0, &[0x82, 0]);
        assert_eq!(node.nmt.state(), NmtState::PreOperational);
        assert_eq!(
            *states.borrow(),
            vec![
                NmtState::Operational,
                NmtState::Initialisation,
                NmtState::PreOperational,
            ]
        );
        assert_eq!(frames.borrow().len(), 2);
        assert_eq!(frames.borrow()[1], (0x714, vec![0x00]));
    }

    #[test]
    fn test_dictionary_traffic_with_callbacks() {
        init_logger();

        let mut bus = SimulatedBus::default();
        let mut od = ObjectDictionary::new();
        od.insert(
            0x6000,
            Variable::new(DataType::Unsigned16, AccessType::ReadWrite)
                .with_default(Value::Unsigned16(100)),
        );
        let mut node = Node::new(&mut bus, NodeId(20), Some(od)).unwrap();
        let od = &mut node.object_dictionary;

        // Default is visible before any write, but no value is stored.
        assert_eq!(od.read(0x6000, 0).unwrap(), Value::Unsigned16(100));
        assert!(!od.has_value(0x6000, None));

        // Reject zero writes, count downloads.
        od.validate_callbacks((0x6000, 0)).add(Box::new(|value| {
            if *value == Value::Unsigned16(0) {
                Err(CanopenError::ValidationError("zero is not allowed"))
            } else {
                Ok(())
            }
        }));
        let downloads = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&downloads);
        od.download_callbacks((0x6000, 0)).add(Box::new(move |_| {
            *counter.borrow_mut() += 1;
            Ok(())
        }));

        assert!(od.write(0x6000, 0, Value::Unsigned16(0), true).is_err());
        assert!(!od.has_value(0x6000, None));
        assert_eq!(*downloads.borrow(), 0);

        od.write(0x6000, 0, Value::Unsigned16(42), true).unwrap();
        assert_eq!(od.read(0x6000, 0).unwrap(), Value::Unsigned16(42));
        assert_eq!(*downloads.borrow(), 1);

        // Internal value change: no download notification.
        od.write(0x6000, 0, Value::Unsigned16(43), false).unwrap();
        assert_eq!(*downloads.borrow(), 1);
    }

    #[test]
    fn test_live_quantity_via_read_override() {
        init_logger();

        let mut bus = SimulatedBus::default();
        let mut node = Node::new(&mut bus, NodeId(20), None).unwrap();
        let od = &mut node.object_dictionary;

        od.insert(
            0x6100,
            Variable::new(DataType::Integer32, AccessType::ReadOnly),
        );
        let temperature = Rc::new(RefCell::new(215));
        let sensor = Rc::clone(&temperature);
        od.set_read_callback(0x6100, 0, Box::new(move || Value::Integer32(*sensor.borrow())));

        assert_eq!(od.read(0x6100, 0).unwrap(), Value::Integer32(215));
        *temperature.borrow_mut() = 230;
        assert_eq!(od.read(0x6100, 0).unwrap(), Value::Integer32(230));
        // Live quantities never populate the value store.
        assert!(!od.has_value(0x6100, None));
    }
}
