//! Database repositories
//!
//! Repository pattern implementations for the document store.
//! Each repository owns the persistence of one kind of record.

pub mod event;
pub mod page;

pub use event::{EventRepository, SqlxEventRepository};
pub use page::{PageRepository, SqlxPageRepository};
