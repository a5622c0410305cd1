//! Secondary indexes over the store.
//!
//! The only index TallyDB keeps is the [`ReverseIndex`], a value → key-count
//! map that answers `NUMEQUALTO` in O(1).

mod reverse;

pub use reverse::ReverseIndex;
