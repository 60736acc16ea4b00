//! Persistence of edited documents and audit entries
//!
//! The engine only sees the [`EditStore`] trait. Two stores ship with it:
//! - [`MemoryEditStore`]: in-process, for tests and dry runs
//! - [`FileEditStore`]: checksummed documents plus an append-only audit log
//!
//! Writes are issued only after validation passed. The two writes of one edit
//! are independent: there is no cross-write atomicity and no retry.

mod backend;
mod errors;
mod local;
mod memory;

pub use backend::EditStore;
pub use errors::{StorageError, StorageResult};
pub use local::FileEditStore;
pub use memory::MemoryEditStore;
