//! Stack of open undo frames.

use crate::error::CoreResult;
use crate::store::Store;
use crate::transaction::frame::UndoFrame;

/// Ordered stack of [`UndoFrame`]s, innermost transaction on top.
///
/// An empty stack means autocommit: mutations are immediately permanent.
#[derive(Debug, Default, Clone)]
pub struct TransactionStack {
    frames: Vec<UndoFrame>,
}

impl TransactionStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new innermost frame.
    pub fn begin_frame(&mut self) {
        self.frames.push(UndoFrame::new());
    }

    /// Records the pre-frame state of `key` in the top frame.
    ///
    /// No-op when no frame is open or the top frame already holds `key`.
    /// Returns true if a new entry was captured.
    pub fn record_first_touch(&mut self, store: &Store, key: &str) -> bool {
        match self.frames.last_mut() {
            Some(frame) => frame.record_first_touch(store, key),
            None => false,
        }
    }

    /// Undoes and discards the top frame.
    ///
    /// Returns `Ok(false)` if no frame is open.
    ///
    /// # Errors
    ///
    /// Propagates invariant violations raised while restoring the store.
    pub fn pop_and_apply(&mut self, store: &mut Store) -> CoreResult<bool> {
        let Some(frame) = self.frames.pop() else {
            return Ok(false);
        };
        frame.apply(store)?;
        Ok(true)
    }

    /// Discards every frame, leaving the store as it is.
    ///
    /// Returns false if no frame was open.
    pub fn commit_all(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.frames.clear();
        true
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns the innermost frame.
    #[must_use]
    pub fn top(&self) -> Option<&UndoFrame> {
        self.frames.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::PriorState;

    #[test]
    fn new_stack_is_autocommit() {
        let stack = TransactionStack::new();
        assert!(!stack.is_active());
        assert_eq!(stack.depth(), 0);
        assert!(stack.top().is_none());
    }

    #[test]
    fn record_without_frame_is_noop() {
        let store = Store::new();
        let mut stack = TransactionStack::new();
        assert!(!stack.record_first_touch(&store, "a"));
    }

    #[test]
    fn pop_on_empty_stack_fails() {
        let mut store = Store::new();
        let mut stack = TransactionStack::new();
        assert!(!stack.pop_and_apply(&mut store).unwrap());
    }

    #[test]
    fn commit_on_empty_stack_fails() {
        let mut stack = TransactionStack::new();
        assert!(!stack.commit_all());
    }

    #[test]
    fn record_targets_top_frame_only() {
        let mut store = Store::new();
        let mut stack = TransactionStack::new();

        stack.begin_frame();
        stack.record_first_touch(&store, "a");
        store.raw_put("a", "1").unwrap();

        stack.begin_frame();
        assert!(stack.record_first_touch(&store, "a"));
        assert_eq!(
            stack.top().and_then(|f| f.prior_state("a")),
            Some(&PriorState::HadValue("1".to_string()))
        );
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn pop_undoes_only_top_frame() {
        let mut store = Store::new();
        let mut stack = TransactionStack::new();

        stack.begin_frame();
        stack.record_first_touch(&store, "a");
        store.raw_put("a", "1").unwrap();

        stack.begin_frame();
        stack.record_first_touch(&store, "a");
        store.raw_put("a", "2").unwrap();

        assert!(stack.pop_and_apply(&mut store).unwrap());
        assert_eq!(store.get("a"), Some("1"));
        assert_eq!(stack.depth(), 1);

        assert!(stack.pop_and_apply(&mut store).unwrap());
        assert_eq!(store.get("a"), None);
        assert!(!stack.is_active());
    }

    #[test]
    fn commit_discards_all_frames() {
        let mut store = Store::new();
        let mut stack = TransactionStack::new();

        stack.begin_frame();
        stack.record_first_touch(&store, "a");
        store.raw_put("a", "1").unwrap();
        stack.begin_frame();
        stack.begin_frame();

        assert!(stack.commit_all());
        assert!(!stack.is_active());
        assert!(!stack.pop_and_apply(&mut store).unwrap());
        assert_eq!(store.get("a"), Some("1"));
    }
}
