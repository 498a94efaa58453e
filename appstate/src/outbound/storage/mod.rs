//! Adapters implementing [`crate::domain::ports::StateStorage`].

mod file;
mod memory;

pub use file::FileStateStorage;
pub use memory::InMemoryStateStorage;
