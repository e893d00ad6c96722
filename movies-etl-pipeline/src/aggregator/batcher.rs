//! Deduplicating id batcher.

use std::collections::HashSet;

use movies_etl_shared::{ChangeId, EntityId, EntityKind};

/// An ordered, deduplicated set of ids of one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub kind: EntityKind,
    pub ids: Vec<EntityId>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Accumulates changed ids into batches of at most `chunk_size`.
///
/// An id that was already accepted during the lifetime of the batcher is
/// dropped, so an entity reported by several change axes lands in exactly one
/// batch. A batcher lives for one entity kind within one beat.
#[derive(Debug)]
pub struct ChangeBatcher {
    kind: EntityKind,
    chunk_size: usize,
    seen: HashSet<ChangeId>,
    pending: Vec<EntityId>,
}

impl ChangeBatcher {
    pub fn new(kind: EntityKind, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            kind,
            chunk_size,
            seen: HashSet::new(),
            pending: Vec::with_capacity(chunk_size),
        }
    }

    /// Add an id, returning a full batch once `chunk_size` distinct ids are pending.
    pub fn push(&mut self, change: ChangeId) -> Option<Batch> {
        if change.kind != self.kind || !self.seen.insert(change) {
            return None;
        }

        self.pending.push(change.id);
        if self.pending.len() >= self.chunk_size {
            return Some(self.take());
        }
        None
    }

    /// Flush the remainder below `chunk_size`, if any.
    pub fn finish(&mut self) -> Option<Batch> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take())
        }
    }

    /// Number of distinct ids accepted so far.
    pub fn distinct(&self) -> usize {
        self.seen.len()
    }

    fn take(&mut self) -> Batch {
        let ids = std::mem::replace(&mut self.pending, Vec::with_capacity(self.chunk_size));
        Batch {
            kind: self.kind,
            ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn filmwork(id: EntityId) -> ChangeId {
        ChangeId::new(id, EntityKind::Filmwork)
    }

    #[test]
    fn test_duplicate_ids_are_emitted_once() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut batcher = ChangeBatcher::new(EntityKind::Filmwork, 10);

        for id in [a, b, a, a, b] {
            assert!(batcher.push(filmwork(id)).is_none());
        }

        let batch = batcher.finish().unwrap();
        assert_eq!(batch.ids, vec![a, b]);
        assert_eq!(batcher.distinct(), 2);
    }

    #[test]
    fn test_duplicate_after_flush_is_still_dropped() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut batcher = ChangeBatcher::new(EntityKind::Filmwork, 1);

        assert_eq!(batcher.push(filmwork(a)).map(|b| b.ids), Some(vec![a]));
        assert!(batcher.push(filmwork(a)).is_none());
        assert_eq!(batcher.push(filmwork(b)).map(|b| b.ids), Some(vec![b]));
        assert!(batcher.finish().is_none());
    }

    #[test]
    fn test_batch_boundaries() {
        let mut batcher = ChangeBatcher::new(EntityKind::Genre, 100);
        let mut batches = Vec::new();

        for _ in 0..250 {
            if let Some(batch) = batcher.push(ChangeId::new(Uuid::new_v4(), EntityKind::Genre)) {
                batches.push(batch);
            }
        }
        batches.extend(batcher.finish());

        let sizes: Vec<usize> = batches.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
    }

    #[test]
    fn test_exact_multiple_leaves_no_remainder() {
        let mut batcher = ChangeBatcher::new(EntityKind::Person, 2);
        let mut batches = 0;

        for _ in 0..4 {
            if batcher.push(ChangeId::new(Uuid::new_v4(), EntityKind::Person)).is_some() {
                batches += 1;
            }
        }

        assert_eq!(batches, 2);
        assert!(batcher.finish().is_none());
    }

    #[test]
    fn test_ids_of_other_kinds_are_ignored() {
        let mut batcher = ChangeBatcher::new(EntityKind::Genre, 1);

        assert!(batcher.push(ChangeId::new(Uuid::new_v4(), EntityKind::Person)).is_none());
        assert!(batcher.finish().is_none());
    }
}
