//! Database access layer: pool initialization and the paper store

mod init;
mod store;

pub use init::{init_database, init_memory_database};
pub use store::{Page, PaperStore};
