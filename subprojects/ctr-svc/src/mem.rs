//! Shared memory blocks.

use bitflags::bitflags;

define_handle_type! {
    /// A handle to a shared memory block kernel object.
    ///
    /// Valid from the moment a service hands it out until it is closed with
    /// [`Kernel::close_handle`](crate::Kernel::close_handle).
    pub struct MemoryBlockHandle
}

/// Size of a memory page.
pub const PAGE_SIZE: usize = 0x1000;

bitflags! {
    /// Memory permissions for [`Kernel::map_memory_block`](crate::Kernel::map_memory_block).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MemoryPermission: u32 {
        /// Readable
        const READ = 1;
        /// Writable
        const WRITE = 2;
        /// Executable
        const EXECUTE = 4;
        /// Keep whatever permission the block was created with
        const DONT_CARE = 0x1000_0000;

        /// Readable and writable
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}
