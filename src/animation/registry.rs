//! Per-component registry of running animation handles.
//!
//! A component registers every timer or animation it starts and cancels them
//! itself on state exit or unmount. Dropping the registry cancels whatever is
//! still registered, so an unmounted component cannot leak a running loop.

use std::fmt;

use tracing::trace;

/// Something that keeps an animation running until cancelled.
pub trait AnimationHandle {
    fn cancel(self);
}

struct Entry<H> {
    label: &'static str,
    handle: H,
}

pub struct AnimationRegistry<H: AnimationHandle> {
    owner: String,
    entries: Vec<Entry<H>>,
}

impl<H: AnimationHandle> AnimationRegistry<H> {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            entries: Vec::new(),
        }
    }

    pub fn register(&mut self, label: &'static str, handle: H) {
        trace!(owner = %self.owner, label, "Registered animation");
        self.entries.push(Entry { label, handle });
    }

    /// Cancels every registration carrying `label`.
    pub fn cancel_label(&mut self, label: &str) -> usize {
        let (matching, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.label == label);
        self.entries = rest;
        let count = matching.len();
        for entry in matching {
            entry.handle.cancel();
        }
        if count > 0 {
            trace!(owner = %self.owner, label, count, "Cancelled animations");
        }
        count
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        for entry in self.entries.drain(..) {
            entry.handle.cancel();
        }
        if count > 0 {
            trace!(owner = %self.owner, count, "Cancelled all animations");
        }
        count
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<H: AnimationHandle> Drop for AnimationRegistry<H> {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl<H: AnimationHandle> fmt::Debug for AnimationRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRegistry")
            .field("owner", &self.owner)
            .field(
                "labels",
                &self.entries.iter().map(|e| e.label).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct CancelFn(Box<dyn FnOnce()>);

    impl AnimationHandle for CancelFn {
        fn cancel(self) {
            (self.0)()
        }
    }

    fn tracked(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> CancelFn {
        let log = Rc::clone(log);
        CancelFn(Box::new(move || log.borrow_mut().push(name)))
    }

    #[test]
    fn test_cancel_label() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = AnimationRegistry::new("card-1");
        registry.register("idle", tracked(&log, "idle-1"));
        registry.register("scroll", tracked(&log, "scroll"));
        registry.register("idle", tracked(&log, "idle-2"));

        assert_eq!(registry.cancel_label("idle"), 2);
        assert_eq!(registry.cancel_label("idle"), 0);
        assert_eq!(registry.len(), 1);
        assert!(log.borrow().contains(&"idle-1"));
        assert!(log.borrow().contains(&"idle-2"));
        assert!(!log.borrow().contains(&"scroll"));
    }

    #[test]
    fn test_drop_cancels_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut registry = AnimationRegistry::new("card-2");
            registry.register("idle", tracked(&log, "idle"));
            registry.register("scroll", tracked(&log, "scroll"));
        }
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_cancel_all_is_idempotent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = AnimationRegistry::new("card-3");
        registry.register("idle", tracked(&log, "idle"));
        assert_eq!(registry.cancel_all(), 1);
        assert_eq!(registry.cancel_all(), 0);
        assert_eq!(registry.len(), 0);
        drop(registry);
        assert_eq!(log.borrow().len(), 1);
    }
}
