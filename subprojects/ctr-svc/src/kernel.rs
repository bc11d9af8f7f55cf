//! The kernel interface used by service clients.
//!
//! Service clients are generic over [`Kernel`] so the same request/response code runs against
//! the real supervisor calls on the console ([`Horizon`]) and against `MockKernel` in host tests.

use core::{ffi::CStr, ptr::NonNull};

use crate::{
    handle::Waitable,
    ipc::{CommandBuffer, SessionHandle},
    mem::{MemoryBlockHandle, MemoryPermission},
    raw::Handle,
    result::Result,
    sync::EventHandle,
};

/// Kernel operations needed by the service clients.
pub trait Kernel {
    /// Connects to a named port (e.g. `srv:`) and returns a client session.
    fn connect_to_port(&self, name: &CStr) -> Result<SessionHandle>;

    /// Sends `cmdbuf` as a synchronous request on `session`.
    ///
    /// On success the reply has overwritten `cmdbuf`. A failure here is a transport failure;
    /// the service's own result is the second word of the reply.
    fn send_sync_request(&self, session: SessionHandle, cmdbuf: &mut CommandBuffer) -> Result<()>;

    /// Maps a shared memory block at `addr`.
    ///
    /// # Safety
    ///
    /// `addr` must be page-aligned and the range it starts must be free for the size of the
    /// block. Nothing else may write to the range while it is mapped.
    unsafe fn map_memory_block(
        &self,
        block: MemoryBlockHandle,
        addr: NonNull<u8>,
        perm: MemoryPermission,
        other_perm: MemoryPermission,
    ) -> Result<()>;

    /// Unmaps a shared memory block previously mapped at `addr`.
    ///
    /// # Safety
    ///
    /// No reference into the mapped range may be used after this call.
    unsafe fn unmap_memory_block(&self, block: MemoryBlockHandle, addr: NonNull<u8>) -> Result<()>;

    /// Clears an event's signalled status.
    fn clear_event(&self, event: EventHandle) -> Result<()>;

    /// Waits until `object` is signalled or `timeout_ns` elapses.
    ///
    /// A negative timeout waits forever. An expired timeout is reported as an error for which
    /// [`Error::is_timeout`](crate::Error::is_timeout) is true.
    fn wait_synchronization(&self, object: &impl Waitable, timeout_ns: i64) -> Result<()>;

    /// Closes a handle.
    fn close_handle(&self, handle: Handle) -> Result<()>;
}

impl<K: Kernel + ?Sized> Kernel for &K {
    #[inline]
    fn connect_to_port(&self, name: &CStr) -> Result<SessionHandle> {
        (**self).connect_to_port(name)
    }

    #[inline]
    fn send_sync_request(&self, session: SessionHandle, cmdbuf: &mut CommandBuffer) -> Result<()> {
        (**self).send_sync_request(session, cmdbuf)
    }

    #[inline]
    unsafe fn map_memory_block(
        &self,
        block: MemoryBlockHandle,
        addr: NonNull<u8>,
        perm: MemoryPermission,
        other_perm: MemoryPermission,
    ) -> Result<()> {
        // SAFETY: Forwarded caller contract.
        unsafe { (**self).map_memory_block(block, addr, perm, other_perm) }
    }

    #[inline]
    unsafe fn unmap_memory_block(&self, block: MemoryBlockHandle, addr: NonNull<u8>) -> Result<()> {
        // SAFETY: Forwarded caller contract.
        unsafe { (**self).unmap_memory_block(block, addr) }
    }

    #[inline]
    fn clear_event(&self, event: EventHandle) -> Result<()> {
        (**self).clear_event(event)
    }

    #[inline]
    fn wait_synchronization(&self, object: &impl Waitable, timeout_ns: i64) -> Result<()> {
        (**self).wait_synchronization(object, timeout_ns)
    }

    #[inline]
    fn close_handle(&self, handle: Handle) -> Result<()> {
        (**self).close_handle(handle)
    }
}

/// The 3DS kernel, reached through supervisor calls.
#[cfg(target_os = "horizon")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Horizon;

#[cfg(target_os = "horizon")]
impl Kernel for Horizon {
    fn connect_to_port(&self, name: &CStr) -> Result<SessionHandle> {
        let mut handle = crate::raw::INVALID_HANDLE;
        // SAFETY: `handle` is valid for writes and `name` is NUL-terminated.
        let rc = unsafe { crate::raw::connect_to_port(&mut handle, name.as_ptr()) };
        // SAFETY: The kernel returned a session handle on success.
        crate::ResultCode::from_raw(rc).map(unsafe { SessionHandle::from_raw(handle) }, |e| e)
    }

    fn send_sync_request(&self, session: SessionHandle, cmdbuf: &mut CommandBuffer) -> Result<()> {
        let tls = crate::ipc::thread_command_buffer();

        // SAFETY: The thread command buffer is CommandBuffer::WORDS words long and not aliased.
        unsafe {
            core::ptr::copy_nonoverlapping(cmdbuf.words().as_ptr(), tls, CommandBuffer::WORDS);
        }

        // SAFETY: The command buffer now holds the request built by the caller.
        let rc = unsafe { crate::raw::send_sync_request(session.to_raw()) };
        crate::ResultCode::from_raw(rc).into_result()?;

        // SAFETY: The reply overwrote the thread command buffer in place.
        unsafe {
            core::ptr::copy_nonoverlapping(tls, cmdbuf.words_mut().as_mut_ptr(), CommandBuffer::WORDS);
        }

        Ok(())
    }

    unsafe fn map_memory_block(
        &self,
        block: MemoryBlockHandle,
        addr: NonNull<u8>,
        perm: MemoryPermission,
        other_perm: MemoryPermission,
    ) -> Result<()> {
        // SAFETY: Caller guarantees the target range is free and page-aligned.
        let rc = unsafe {
            crate::raw::map_memory_block(
                block.to_raw(),
                addr.as_ptr().cast(),
                perm.bits(),
                other_perm.bits(),
            )
        };
        crate::ResultCode::from_raw(rc).into_result()
    }

    unsafe fn unmap_memory_block(&self, block: MemoryBlockHandle, addr: NonNull<u8>) -> Result<()> {
        // SAFETY: Caller guarantees no references into the range remain.
        let rc = unsafe { crate::raw::unmap_memory_block(block.to_raw(), addr.as_ptr().cast()) };
        crate::ResultCode::from_raw(rc).into_result()
    }

    fn clear_event(&self, event: EventHandle) -> Result<()> {
        // SAFETY: The kernel validates the handle.
        let rc = unsafe { crate::raw::clear_event(event.to_raw()) };
        crate::ResultCode::from_raw(rc).into_result()
    }

    fn wait_synchronization(&self, object: &impl Waitable, timeout_ns: i64) -> Result<()> {
        // SAFETY: The kernel validates the handle.
        let rc = unsafe { crate::raw::wait_synchronization_1(object.raw_handle(), timeout_ns) };
        let rc = crate::ResultCode::from_raw(rc);
        if rc == crate::result::TIMEOUT {
            return Err(rc.into());
        }
        rc.into_result()
    }

    fn close_handle(&self, handle: Handle) -> Result<()> {
        // SAFETY: The kernel validates the handle.
        let rc = unsafe { crate::raw::close_handle(handle) };
        crate::ResultCode::from_raw(rc).into_result()
    }
}
