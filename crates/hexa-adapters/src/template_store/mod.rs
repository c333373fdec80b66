//! Generator template stores.

mod memory;

pub use memory::InMemoryStore;
