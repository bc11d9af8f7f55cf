//! IPC sessions and the per-thread command buffer.
//!
//! Every thread owns a 0x100-byte command buffer at offset `0x80` of its thread-local storage.
//! A request is written there, [`SendSyncRequest`] hands it to the server, and the reply
//! overwrites it in place.
//!
//! [`SendSyncRequest`]: crate::raw::send_sync_request

use static_assertions::const_assert_eq;

define_waitable_handle_type! {
    /// A handle to a client session kernel object.
    ///
    /// Obtained from [`Kernel::connect_to_port`] or from a service manager reply, and used to
    /// send synchronous requests to the server.
    ///
    /// [`Kernel::connect_to_port`]: crate::Kernel::connect_to_port
    pub struct SessionHandle
}

/// Offset of the command buffer inside the thread-local storage block.
pub const COMMAND_BUFFER_OFFSET: usize = 0x80;

/// A copy of the thread command buffer (64 words).
#[derive(Clone, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct CommandBuffer([u32; CommandBuffer::WORDS]);

const_assert_eq!(size_of::<CommandBuffer>(), 0x100);

impl CommandBuffer {
    /// Number of 32-bit words in the command buffer.
    pub const WORDS: usize = 64;

    /// Returns a zero-filled command buffer.
    #[inline]
    pub const fn new() -> Self {
        Self([0; Self::WORDS])
    }

    /// Returns the words of the buffer.
    #[inline]
    pub fn words(&self) -> &[u32; Self::WORDS] {
        &self.0
    }

    /// Returns the words of the buffer mutably.
    #[inline]
    pub fn words_mut(&mut self) -> &mut [u32; Self::WORDS] {
        &mut self.0
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::ops::Index<usize> for CommandBuffer {
    type Output = u32;

    fn index(&self, index: usize) -> &u32 {
        &self.0[index]
    }
}

impl core::ops::IndexMut<usize> for CommandBuffer {
    fn index_mut(&mut self, index: usize) -> &mut u32 {
        &mut self.0[index]
    }
}

impl core::fmt::Debug for CommandBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Trailing zero words are noise
        let used = self.0.iter().rposition(|w| *w != 0).map_or(0, |i| i + 1);
        let mut list = f.debug_list();
        for word in &self.0[..used] {
            list.entry(&format_args!("{word:#010x}"));
        }
        list.finish()
    }
}

/// Returns a pointer to the current thread's command buffer.
#[cfg(target_os = "horizon")]
#[inline]
pub fn thread_command_buffer() -> *mut u32 {
    // SAFETY: The command buffer lies within the thread's TLS block.
    unsafe {
        crate::raw::thread_local_storage()
            .add(COMMAND_BUFFER_OFFSET)
            .cast()
    }
}
