//! _Supervisor Call (SVC)_ codes used by this workspace.
//!
//! References:
//! - <https://www.3dbrew.org/wiki/SVC>

/// Puts the current thread to sleep for a number of nanoseconds.
pub const SLEEP_THREAD: u8 = 0x0A;

/// Clears an event's signalled status.
pub const CLEAR_EVENT: u8 = 0x19;

/// Maps a block of shared memory.
pub const MAP_MEMORY_BLOCK: u8 = 0x1F;

/// Unmaps a block of shared memory.
pub const UNMAP_MEMORY_BLOCK: u8 = 0x20;

/// Closes a handle, decrementing the reference count of the corresponding kernel object.
pub const CLOSE_HANDLE: u8 = 0x23;

/// Waits on a single synchronization object, optionally with a timeout.
pub const WAIT_SYNCHRONIZATION_1: u8 = 0x24;

/// Connects to a registered named port.
pub const CONNECT_TO_PORT: u8 = 0x2D;

/// Sends a synchronous IPC request using the thread's command buffer.
pub const SEND_SYNC_REQUEST: u8 = 0x32;

/// Breaks execution.
pub const BREAK: u8 = 0x3C;

/// Outputs a debug string to an attached debugger.
pub const OUTPUT_DEBUG_STRING: u8 = 0x3D;
