//! HID client configuration.

use crate::proto::DEFAULT_SHARED_MEMORY_ADDR;

/// Options for [`HidService::init`](crate::HidService::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HidConfig {
    /// Address to map the shared memory block at. Must be page-aligned and free.
    pub shared_memory_addr: usize,
    /// Retry with `hid:SPVR` when `hid:USER` cannot be obtained.
    pub fallback_to_spvr: bool,
}

impl Default for HidConfig {
    fn default() -> Self {
        Self {
            shared_memory_addr: DEFAULT_SHARED_MEMORY_ADDR,
            fallback_to_spvr: true,
        }
    }
}
