//! Frame receiver registry.
//!
//! Receivers inspect incoming frames in a total, stable order:
//! ascending priority, and among equal priorities, registration order.
//! Protocol layering depends on the tie-break — address resolution must
//! run before generic consumers in the same priority band.
//!
//! Unlike the link-time command and service tables, this registry is
//! mutated at runtime, including from inside a receiver callback during
//! dispatch. The walk therefore runs over a snapshot; a mid-dispatch
//! mutation affects the next frame, never the current iteration.

use alloc::sync::Arc;
use alloc::vec::Vec;

use spin::Mutex;

use ember_core::{Descriptor, Error, Result};

use crate::frame::Frame;

/// What a receiver did with a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Frame handled; stop walking the registry.
    Consumed,
    /// Not mine; offer it to the next receiver.
    Pass,
}

/// A callback registered to inspect incoming frames. The implementor
/// carries its own context; interior mutability where it keeps state.
pub trait FrameReceiver: Send + Sync {
    fn receive(&self, dev: &mut Descriptor, frame: &Frame) -> Verdict;
}

struct ReceiverEntry {
    priority: i32,
    receiver: Arc<dyn FrameReceiver>,
}

/// Priority-ordered, runtime-mutable receiver table.
pub struct ReceiverRegistry {
    entries: Mutex<Vec<ReceiverEntry>>,
}

impl ReceiverRegistry {
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Register a receiver. Insertion keeps ascending priority order
    /// and preserves registration order within a priority (stable
    /// insertion).
    pub fn register(&self, priority: i32, receiver: Arc<dyn FrameReceiver>) {
        let mut entries = self.entries.lock();
        let at = entries
            .iter()
            .position(|e| e.priority > priority)
            .unwrap_or(entries.len());
        entries.insert(at, ReceiverEntry { priority, receiver });
    }

    /// Remove the matching entry.
    ///
    /// # Errors
    ///
    /// `NotFound` if the receiver is not registered.
    pub fn unregister(&self, receiver: &Arc<dyn FrameReceiver>) -> Result<()> {
        let mut entries = self.entries.lock();
        let at = entries
            .iter()
            .position(|e| Arc::ptr_eq(&e.receiver, receiver))
            .ok_or(Error::NotFound)?;
        entries.remove(at);
        Ok(())
    }

    /// Ordered copy of the current receivers. Dispatch walks this so a
    /// register/unregister from inside a callback cannot invalidate the
    /// iteration.
    pub fn snapshot(&self) -> Vec<Arc<dyn FrameReceiver>> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.receiver.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tagged(u32);

    impl FrameReceiver for Tagged {
        fn receive(&self, _dev: &mut Descriptor, _frame: &Frame) -> Verdict {
            Verdict::Pass
        }
    }

    fn tags(registry: &ReceiverRegistry, by_tag: &[(&Arc<dyn FrameReceiver>, u32)]) -> Vec<u32> {
        registry
            .snapshot()
            .iter()
            .map(|r| {
                by_tag
                    .iter()
                    .find(|(a, _)| Arc::ptr_eq(a, r))
                    .map(|(_, t)| *t)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_priority_order_with_stable_ties() {
        let registry = ReceiverRegistry::new();
        let r5a: Arc<dyn FrameReceiver> = Arc::new(Tagged(50));
        let r1: Arc<dyn FrameReceiver> = Arc::new(Tagged(10));
        let r5b: Arc<dyn FrameReceiver> = Arc::new(Tagged(51));
        let r3: Arc<dyn FrameReceiver> = Arc::new(Tagged(30));

        registry.register(5, r5a.clone());
        registry.register(1, r1.clone());
        registry.register(5, r5b.clone());
        registry.register(3, r3.clone());

        let order = tags(
            &registry,
            &[(&r5a, 50), (&r1, 10), (&r5b, 51), (&r3, 30)],
        );
        // [5,1,5,3] registered in that order dispatches as
        // [1, 3, 5(first), 5(second)].
        assert_eq!(order, alloc::vec![10, 30, 50, 51]);
    }

    #[test]
    fn test_unregister_missing_is_not_found() {
        let registry = ReceiverRegistry::new();
        let r: Arc<dyn FrameReceiver> = Arc::new(Tagged(1));
        assert_eq!(registry.unregister(&r), Err(Error::NotFound));
        registry.register(0, r.clone());
        assert!(registry.unregister(&r).is_ok());
        assert_eq!(registry.unregister(&r), Err(Error::NotFound));
    }

    #[test]
    fn test_snapshot_is_detached_from_mutation() {
        let registry = ReceiverRegistry::new();
        let a: Arc<dyn FrameReceiver> = Arc::new(Tagged(1));
        let b: Arc<dyn FrameReceiver> = Arc::new(Tagged(2));
        registry.register(0, a.clone());
        let snap = registry.snapshot();
        registry.register(0, b);
        registry.unregister(&a).unwrap();
        assert_eq!(snap.len(), 1);
        assert!(Arc::ptr_eq(&snap[0], &a));
        assert_eq!(registry.len(), 1);
    }
}
