//! Tests for construction, basic enqueue/dequeue and occupancy accounting

#[cfg(test)]
mod tests {
    use crate::dispatch::api::{DispatchError, Dispatcher};

    #[test]
    fn test_construction_defaults() {
        let dispatcher: Dispatcher<u32, _> = Dispatcher::new(3, 16, |port| port % 3).unwrap();

        assert_eq!(dispatcher.worker_count(), 3);
        assert_eq!(dispatcher.priority_levels(), 2);
    }

    #[test]
    fn test_construction_explicit_priority_levels() {
        let dispatcher: Dispatcher<u32, _> =
            Dispatcher::with_priorities(1, 8, |_| 0, 5).unwrap();

        assert_eq!(dispatcher.priority_levels(), 5);
    }

    #[test]
    fn test_construction_rejects_zero_workers() {
        let result: Result<Dispatcher<u32, _>, _> = Dispatcher::new(0, 16, |_| 0);

        match result {
            Err(DispatchError::Configuration { message }) => {
                assert!(message.contains("worker count"));
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_construction_rejects_zero_priority_levels() {
        let result: Result<Dispatcher<u32, _>, _> = Dispatcher::with_priorities(1, 16, |_| 0, 0);

        match result {
            Err(DispatchError::Configuration { message }) => {
                assert!(message.contains("priority level"));
            }
            _ => panic!("Expected Configuration error"),
        }
    }

    #[test]
    fn test_enqueue_dequeue_round_trip() {
        let dispatcher = Dispatcher::new(1, 16, |_| 0).unwrap();

        assert!(dispatcher.enqueue(7, 1, "payload").unwrap());

        let delivered = dispatcher.dequeue(0).unwrap();
        assert_eq!(delivered.port, 7);
        assert_eq!(delivered.priority, 1);
        assert_eq!(delivered.item, "payload");
    }

    #[test]
    fn test_fifo_within_port_and_priority() {
        let dispatcher = Dispatcher::new(1, 16, |_| 0).unwrap();

        for item in ["a", "b", "c"] {
            assert!(dispatcher.enqueue(2, 0, item).unwrap());
        }

        assert_eq!(dispatcher.dequeue(0).unwrap().item, "a");
        assert_eq!(dispatcher.dequeue(0).unwrap().item, "b");
        assert_eq!(dispatcher.dequeue(0).unwrap().item, "c");
    }

    #[test]
    fn test_enqueue_default_targets_queue_zero() {
        let dispatcher = Dispatcher::new(1, 16, |_| 0).unwrap();

        // Rotation must not redirect the default enqueue path
        dispatcher.rotate_priority(4, 1).unwrap();
        assert!(dispatcher.enqueue_default(4, 9u32).unwrap());

        assert_eq!(dispatcher.queue_size(4, 0).unwrap(), 1);
        assert_eq!(dispatcher.queue_size(4, 1).unwrap(), 0);
    }

    #[test]
    fn test_occupancy_accounting_across_granularities() {
        let dispatcher = Dispatcher::new(1, 16, |_| 0).unwrap();

        assert!(dispatcher.enqueue(1, 0, 10u32).unwrap());
        assert!(dispatcher.enqueue(1, 1, 11).unwrap());
        assert!(dispatcher.enqueue(1, 1, 12).unwrap());
        assert!(dispatcher.enqueue(2, 0, 20).unwrap());

        assert_eq!(dispatcher.queue_size(1, 0).unwrap(), 1);
        assert_eq!(dispatcher.queue_size(1, 1).unwrap(), 2);
        assert_eq!(dispatcher.port_size(1).unwrap(), 3);
        assert_eq!(dispatcher.port_size(2).unwrap(), 1);
        assert_eq!(dispatcher.worker_size(0).unwrap(), 4);

        let _ = dispatcher.dequeue(0).unwrap();
        let _ = dispatcher.dequeue(0).unwrap();

        let remaining = dispatcher.port_size(1).unwrap() + dispatcher.port_size(2).unwrap();
        assert_eq!(remaining, 2);
        assert_eq!(dispatcher.worker_size(0).unwrap(), 2);
        assert_eq!(
            dispatcher.port_size(1).unwrap(),
            dispatcher.queue_size(1, 0).unwrap() + dispatcher.queue_size(1, 1).unwrap()
        );
    }

    #[test]
    fn test_two_priority_capacity_scenario() {
        // worker_count=1, priorities=2, capacity=2, constant mapping
        let dispatcher = Dispatcher::new(1, 2, |_| 0).unwrap();
        let port = 9;

        assert!(dispatcher.enqueue(port, 0, "x").unwrap());
        assert!(dispatcher.enqueue(port, 0, "y").unwrap());
        // Priority 0 is now at capacity 2
        assert!(!dispatcher.enqueue(port, 0, "z").unwrap());
        assert_eq!(dispatcher.port_size(port).unwrap(), 2);

        let first = dispatcher.dequeue(0).unwrap();
        assert_eq!((first.port, first.priority, first.item), (port, 0, "x"));
        let second = dispatcher.dequeue(0).unwrap();
        assert_eq!((second.port, second.priority, second.item), (port, 0, "y"));

        // Nothing buffered any more; a further dequeue would block
        assert_eq!(dispatcher.worker_size(0).unwrap(), 0);
    }

    #[test]
    fn test_port_stats_snapshot() {
        let dispatcher = Dispatcher::new(1, 4, |_| 0).unwrap();

        assert!(dispatcher.enqueue(3, 1, 1u8).unwrap());
        dispatcher.set_queue_capacity(3, 0, 7).unwrap();
        dispatcher.rotate_priority(3, 1).unwrap();

        let stats = dispatcher.port_stats(3).unwrap().expect("port registered");
        assert_eq!(stats.occupancy, 1);
        assert_eq!(stats.queue_occupancies, vec![0, 1]);
        assert_eq!(stats.queue_capacities, vec![7, 4]);
        assert_eq!(stats.highest_priority, 1);
    }
}
