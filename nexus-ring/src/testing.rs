//! Shared helpers for unit tests.

use crate::link::Ring;
use crate::{BoxedRingStorage, Queue};

pub(crate) fn queue_of(storage: &mut BoxedRingStorage, input: &[&str]) -> Queue {
    let mut queue = Queue::new(storage).unwrap();
    for value in input {
        queue.insert_tail(storage, value).unwrap();
    }
    queue
}

pub(crate) fn values(storage: &BoxedRingStorage, queue: &Queue) -> Vec<String> {
    queue.iter(storage).map(str::to_owned).collect()
}

/// Walks the ring both ways and checks every `prev`/`next` pair agrees.
pub(crate) fn assert_well_formed(storage: &BoxedRingStorage, queue: &Queue) {
    let head = queue.head();
    let mut cur = head;
    let mut forward = 0;
    loop {
        let next = storage.next_of(cur);
        assert_eq!(storage.prev_of(next), cur, "prev/next disagree at {cur}");
        cur = next;
        if cur == head {
            break;
        }
        assert!(!storage.node(cur).is_sentinel(), "foreign sentinel in ring");
        forward += 1;
    }

    let mut backward = 0;
    let mut cur = storage.prev_of(head);
    while cur != head {
        backward += 1;
        cur = storage.prev_of(cur);
    }

    assert_eq!(forward, backward);
    assert_eq!(forward, queue.size(storage));
}
