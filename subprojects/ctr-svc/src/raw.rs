//! Raw _Supervisor Call (SVC)_ API.
//!
//! The SVC wrappers follow the ARM11 calling convention used by the 3DS kernel: arguments in
//! `r0`-`r3`, result code returned in `r0`, extra outputs in `r1`+. They are only compiled for
//! the console (`target_os = "horizon"`).

#[cfg(target_os = "horizon")]
use core::ffi::{c_char, c_void};

#[cfg(target_os = "horizon")]
use crate::code::*;

//<editor-fold desc="Types and Constants">

/// A raw handle type.
///
/// Alias for `u32`.
pub type Handle = u32;

/// Invalid handle
pub const INVALID_HANDLE: Handle = 0;

/// Pseudo handle for the current thread
pub const CUR_THREAD_HANDLE: Handle = 0xFFFF8000;

/// Pseudo handle for the current process
pub const CUR_PROCESS_HANDLE: Handle = 0xFFFF8001;

/// Raw result code as returned in `r0`.
pub type RawResultCode = u32;

/// Break reasons
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    /// Panic
    Panic = 0,
    /// Assert
    Assert = 1,
    /// User
    User = 2,
    /// A CRO module was loaded
    LoadRo = 3,
    /// A CRO module was unloaded
    UnloadRo = 4,
}

//</editor-fold>

/// Puts the current thread to sleep.
///
/// `void svcSleepThread(s64 ns);`
///
/// Syscall code: [SLEEP_THREAD](crate::code::SLEEP_THREAD) (`0x0A`).
///
/// A zero duration only yields to threads of the same priority.
///
/// # Safety
///
/// Must not be called while holding a lock that the threads it yields to need.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn sleep_thread(ns: i64) {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const SLEEP_THREAD,
    );
}

/// Clears an event's signalled status.
///
/// `Result svcClearEvent(Handle handle);`
///
/// Syscall code: [CLEAR_EVENT](crate::code::CLEAR_EVENT) (`0x19`).
///
/// Ref: <https://www.3dbrew.org/wiki/SVC#ClearEvent>
///
/// # Safety
///
/// `handle` must be an event handle owned by the current process.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn clear_event(handle: Handle) -> RawResultCode {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const CLEAR_EVENT,
    );
}

/// Maps a block of shared memory into the current process.
///
/// `Result svcMapMemoryBlock(Handle memblock, u32 addr, MemPerm my_perm, MemPerm other_perm);`
///
/// Syscall code: [MAP_MEMORY_BLOCK](crate::code::MAP_MEMORY_BLOCK) (`0x1F`).
///
/// | Arg | Name | Description |
/// | --- | --- | --- |
/// | IN | _memblock_ | Memory block handle |
/// | IN | _addr_ | Address to map the block at |
/// | IN | _my_perm_ | Permissions for the current process |
/// | IN | _other_perm_ | Permissions for other processes |
///
/// Ref: <https://www.3dbrew.org/wiki/SVC#MapMemoryBlock>
///
/// # Safety
///
/// `addr` must point to an unmapped, page-aligned range large enough for the block.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn map_memory_block(
    memblock: Handle,
    addr: *mut c_void,
    my_perm: u32,
    other_perm: u32,
) -> RawResultCode {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const MAP_MEMORY_BLOCK,
    );
}

/// Unmaps a block of shared memory.
///
/// `Result svcUnmapMemoryBlock(Handle memblock, u32 addr);`
///
/// Syscall code: [UNMAP_MEMORY_BLOCK](crate::code::UNMAP_MEMORY_BLOCK) (`0x20`).
///
/// # Safety
///
/// No references into the mapped range may outlive this call.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn unmap_memory_block(memblock: Handle, addr: *mut c_void) -> RawResultCode {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const UNMAP_MEMORY_BLOCK,
    );
}

/// Closes a handle.
///
/// `Result svcCloseHandle(Handle handle);`
///
/// Syscall code: [CLOSE_HANDLE](crate::code::CLOSE_HANDLE) (`0x23`).
///
/// # Safety
///
/// The handle must not be used after this call.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn close_handle(handle: Handle) -> RawResultCode {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const CLOSE_HANDLE,
    );
}

/// Waits on a synchronization object.
///
/// `Result svcWaitSynchronization(Handle handle, s64 nanoseconds);`
///
/// Syscall code: [WAIT_SYNCHRONIZATION_1](crate::code::WAIT_SYNCHRONIZATION_1) (`0x24`).
///
/// The 64-bit timeout is passed in `r2:r3` as per AAPCS. A negative timeout waits forever.
///
/// # Safety
///
/// `handle` must be a waitable handle owned by the current process.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn wait_synchronization_1(handle: Handle, timeout_ns: i64) -> RawResultCode {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const WAIT_SYNCHRONIZATION_1,
    );
}

/// Connects to a registered named port.
///
/// `Result svcConnectToPort(volatile Handle* out, const char* portName);`
///
/// Syscall code: [CONNECT_TO_PORT](crate::code::CONNECT_TO_PORT) (`0x2D`).
///
/// # Safety
///
/// `out` must be valid for writes and `port_name` must be a NUL-terminated string.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn connect_to_port(out: *mut Handle, port_name: *const c_char) -> RawResultCode {
    core::arch::naked_asm!(
        "str r0, [sp, #-4]!", // Save the output pointer
        "svc {code}",
        "ldr r3, [sp], #4",   // Restore the output pointer
        "str r1, [r3]",       // Store the session handle returned in r1
        "bx lr",
        code = const CONNECT_TO_PORT,
    );
}

/// Sends a synchronous request on a session using the thread's command buffer.
///
/// `Result svcSendSyncRequest(Handle session);`
///
/// Syscall code: [SEND_SYNC_REQUEST](crate::code::SEND_SYNC_REQUEST) (`0x32`).
///
/// # Safety
///
/// The thread command buffer must contain a well-formed request.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn send_sync_request(session: Handle) -> RawResultCode {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const SEND_SYNC_REQUEST,
    );
}

/// Breaks execution.
///
/// `void svcBreak(UserBreakType breakReason);`
///
/// Syscall code: [BREAK](crate::code::BREAK) (`0x3C`).
///
/// # Safety
///
/// Does not return when no debugger is attached.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn break_execution(reason: BreakReason) -> RawResultCode {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const BREAK,
    );
}

/// Outputs a debug string.
///
/// `Result svcOutputDebugString(const char* str, s32 length);`
///
/// Syscall code: [OUTPUT_DEBUG_STRING](crate::code::OUTPUT_DEBUG_STRING) (`0x3D`).
///
/// # Safety
///
/// `ptr` must be valid for `len` bytes.
#[cfg(target_os = "horizon")]
#[unsafe(naked)]
pub unsafe extern "C" fn output_debug_string(ptr: *const c_char, len: i32) -> RawResultCode {
    core::arch::naked_asm!(
        "svc {code}",
        "bx lr",
        code = const OUTPUT_DEBUG_STRING,
    );
}

/// Returns the thread-local storage pointer (`CP15 c13, c0, 3`).
#[cfg(target_os = "horizon")]
#[inline]
pub fn thread_local_storage() -> *mut u8 {
    let tls: *mut u8;
    // SAFETY: Reading the user read-only thread ID register has no side effects.
    unsafe {
        core::arch::asm!(
            "mrc p15, 0, {}, c13, c0, 3",
            out(reg) tls,
            options(nomem, nostack, preserves_flags)
        );
    }
    tls
}
