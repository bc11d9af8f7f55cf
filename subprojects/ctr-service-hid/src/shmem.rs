//! Shared memory layout for the HID service.

pub mod layout;
pub mod types;

pub use layout::{HID_SHARED_MEMORY_SIZE, HidSharedMemory};
pub use types::*;
