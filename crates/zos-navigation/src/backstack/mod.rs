//! Backstack model
//!
//! A backstack is an ordered history of entries whose last element is the
//! current destination. It is never mutated in place: every change publishes a
//! whole new [`Backstack`] snapshot.

mod entry;
mod stack;

pub use entry::BackstackEntry;
pub use stack::Backstack;
