//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Key-value storage (LocalStorage on web, a JSON file on native)
//! - Wall-clock time (used to mint employee ids)

pub mod clock;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{KeyValueStorage, MemoryStorage};
