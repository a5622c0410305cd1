//! Nested transactions backed by undo frames.
//!
//! TallyDB applies every mutation to the live [`Store`](crate::Store)
//! immediately. An open transaction only remembers how to put things back:
//! - **BEGIN** pushes an empty [`UndoFrame`]
//! - the first mutation of a key inside a frame records its [`PriorState`]
//! - **ROLLBACK** replays the top frame's prior states and pops it
//! - **COMMIT** drops every frame at once, making all levels permanent

mod frame;
mod stack;

pub use frame::{PriorState, UndoFrame};
pub use stack::TransactionStack;
