//! Queues backed by `slab::Slab`.

#![cfg(feature = "slab")]

use nexus_ring::{Queue, QueueContext, SlabRingStorage, SortOrder, merge};

fn contents(storage: &SlabRingStorage, queue: &Queue<usize>) -> Vec<String> {
    queue.iter(storage).map(str::to_owned).collect()
}

#[test]
fn grows_past_initial_capacity() {
    let mut storage = SlabRingStorage::with_capacity(2);
    let mut queue: Queue<usize> = Queue::new(&mut storage).unwrap();

    for i in 0..100 {
        queue.insert_tail(&mut storage, &i.to_string()).unwrap();
    }

    assert_eq!(queue.size(&storage), 100);
    assert_eq!(queue.remove_head(&mut storage).unwrap().value(), "0");
    assert_eq!(queue.remove_tail(&mut storage).unwrap().value(), "99");
    assert_eq!(storage.len(), 99);
}

#[test]
fn sort_and_merge() {
    let mut storage = SlabRingStorage::new();
    let mut chain = Vec::new();
    for (id, values) in [["d", "b", "f"], ["e", "a", "c"]].into_iter().enumerate() {
        let mut queue: Queue<usize> = Queue::new(&mut storage).unwrap();
        for v in values {
            queue.insert_tail(&mut storage, v).unwrap();
        }
        queue.sort(&mut storage, SortOrder::Ascending);
        chain.push(QueueContext::new(&storage, queue, id));
    }

    assert_eq!(merge(&mut storage, &mut chain, SortOrder::Ascending), 6);
    assert_eq!(contents(&storage, &chain[0].queue), ["a", "b", "c", "d", "e", "f"]);
}

#[test]
fn free_releases_everything() {
    let mut storage = SlabRingStorage::new();
    let mut queue: Queue<usize> = Queue::new(&mut storage).unwrap();
    for v in ["x", "y", "z"] {
        queue.insert_head(&mut storage, v).unwrap();
    }

    queue.free(&mut storage);
    assert!(storage.is_empty());
}
