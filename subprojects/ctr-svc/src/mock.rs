//! An in-memory [`Kernel`] for host tests.
//!
//! [`MockKernel`] hands out fake handles, routes requests sent on a session to a handler
//! registered under the session's service name, and records every call it receives. Any
//! operation can be made to fail once with [`MockKernel::fail`].
//!
//! Shared memory is not emulated: `map_memory_block` only records the call. Tests that read a
//! mapped block point the client at memory they own.

use core::{cell::RefCell, ffi::CStr, ptr::NonNull};
use std::{
    boxed::Box,
    collections::{BTreeMap, BTreeSet},
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    handle::Waitable,
    ipc::{CommandBuffer, SessionHandle},
    kernel::Kernel,
    mem::{MemoryBlockHandle, MemoryPermission},
    raw::Handle,
    result::{self, Error, Result},
    sync::EventHandle,
};

/// Request handler for a mocked service.
///
/// Receives the kernel (to allocate handles) and the request, which it overwrites with the
/// reply.
pub type Handler = Box<dyn FnMut(&MockKernel, &mut CommandBuffer) -> Result<()>>;

/// A kernel operation, used to select where [`MockKernel::fail`] injects an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Op {
    ConnectToPort,
    SendSyncRequest,
    MapMemoryBlock,
    UnmapMemoryBlock,
    ClearEvent,
    WaitSynchronization,
    CloseHandle,
}

/// A call recorded by [`MockKernel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ConnectToPort(String),
    SendSyncRequest {
        session: Handle,
        /// Command ID from the request header
        command: u16,
    },
    MapMemoryBlock {
        block: Handle,
        addr: usize,
        perm: MemoryPermission,
        other_perm: MemoryPermission,
    },
    UnmapMemoryBlock {
        block: Handle,
        addr: usize,
    },
    ClearEvent(Handle),
    WaitSynchronization {
        handle: Handle,
        timeout_ns: i64,
    },
    CloseHandle(Handle),
}

#[derive(Default)]
struct State {
    next_handle: Handle,
    ports: BTreeSet<String>,
    handlers: BTreeMap<String, Option<Handler>>,
    sessions: BTreeMap<Handle, String>,
    open: BTreeSet<Handle>,
    failures: BTreeMap<Op, Error>,
    calls: Vec<Call>,
}

/// A fake kernel.
///
/// Service clients own their kernel; hand them `&MockKernel`, which is a [`Kernel`] through
/// the blanket impl for references, and keep the value to inspect the recorded calls.
pub struct MockKernel {
    state: RefCell<State>,
}

impl MockKernel {
    /// First handle value handed out.
    pub const FIRST_HANDLE: Handle = 0x100;

    pub fn new() -> Self {
        Self {
            state: RefCell::new(State {
                next_handle: Self::FIRST_HANDLE,
                ..State::default()
            }),
        }
    }

    /// Makes `name` connectable through [`Kernel::connect_to_port`].
    pub fn register_port(&self, name: &str) {
        self.state.borrow_mut().ports.insert(name.to_string());
    }

    /// Installs the handler for sessions bound to `name`, replacing any previous one.
    pub fn on_request(
        &self,
        name: &str,
        handler: impl FnMut(&MockKernel, &mut CommandBuffer) -> Result<()> + 'static,
    ) {
        self.state
            .borrow_mut()
            .handlers
            .insert(name.to_string(), Some(Box::new(handler)));
    }

    /// Returns true if a handler is installed for `name`.
    pub fn has_handler(&self, name: &str) -> bool {
        self.state.borrow().handlers.contains_key(name)
    }

    /// Allocates a fresh open handle.
    pub fn alloc_handle(&self) -> Handle {
        let mut state = self.state.borrow_mut();
        let handle = state.next_handle;
        state.next_handle += 1;
        state.open.insert(handle);
        handle
    }

    /// Allocates a session handle whose requests go to the handler for `name`.
    pub fn open_session(&self, name: &str) -> Handle {
        let handle = self.alloc_handle();
        self.state
            .borrow_mut()
            .sessions
            .insert(handle, name.to_string());
        handle
    }

    /// Makes the next call of `op` fail with `err`.
    pub fn fail(&self, op: Op, err: impl Into<Error>) {
        self.state.borrow_mut().failures.insert(op, err.into());
    }

    /// Returns the calls recorded so far.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Returns the command IDs of every request sent, in order.
    pub fn commands(&self) -> Vec<u16> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::SendSyncRequest { command, .. } => Some(*command),
                _ => None,
            })
            .collect()
    }

    /// Returns the handles that are currently open.
    pub fn open_handles(&self) -> Vec<Handle> {
        self.state.borrow().open.iter().copied().collect()
    }

    /// Returns true if `handle` is open.
    pub fn is_open(&self, handle: Handle) -> bool {
        self.state.borrow().open.contains(&handle)
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn injected(&self, op: Op) -> Result<()> {
        match self.state.borrow_mut().failures.remove(&op) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn check_open(&self, handle: Handle) -> Result<()> {
        if self.is_open(handle) {
            Ok(())
        } else {
            Err(result::INVALID_HANDLE.into())
        }
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for MockKernel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MockKernel")
            .field("ports", &state.ports)
            .field("open", &state.open)
            .field("calls", &state.calls.len())
            .finish_non_exhaustive()
    }
}

impl Kernel for MockKernel {
    fn connect_to_port(&self, name: &CStr) -> Result<SessionHandle> {
        let name = name.to_string_lossy().into_owned();
        self.record(Call::ConnectToPort(name.clone()));
        self.injected(Op::ConnectToPort)?;

        if !self.state.borrow().ports.contains(&name) {
            return Err(result::NOT_FOUND.into());
        }

        let handle = self.open_session(&name);
        // SAFETY: The handle was just allocated as a session.
        Ok(unsafe { SessionHandle::from_raw(handle) })
    }

    fn send_sync_request(&self, session: SessionHandle, cmdbuf: &mut CommandBuffer) -> Result<()> {
        self.record(Call::SendSyncRequest {
            session: session.to_raw(),
            command: (cmdbuf[0] >> 16) as u16,
        });
        self.injected(Op::SendSyncRequest)?;
        self.check_open(session.to_raw())?;

        let Some(name) = self.state.borrow().sessions.get(&session.to_raw()).cloned() else {
            return Err(result::INVALID_HANDLE.into());
        };

        // The handler is taken out for the duration of the call so it can re-enter the kernel
        let taken = self
            .state
            .borrow_mut()
            .handlers
            .get_mut(&name)
            .and_then(Option::take);
        let Some(mut handler) = taken else {
            return Err(result::NOT_FOUND.into());
        };

        let res = handler(self, cmdbuf);

        if let Some(slot) = self.state.borrow_mut().handlers.get_mut(&name) {
            if slot.is_none() {
                *slot = Some(handler);
            }
        }

        res
    }

    unsafe fn map_memory_block(
        &self,
        block: MemoryBlockHandle,
        addr: NonNull<u8>,
        perm: MemoryPermission,
        other_perm: MemoryPermission,
    ) -> Result<()> {
        self.record(Call::MapMemoryBlock {
            block: block.to_raw(),
            addr: addr.as_ptr() as usize,
            perm,
            other_perm,
        });
        self.injected(Op::MapMemoryBlock)?;
        self.check_open(block.to_raw())
    }

    unsafe fn unmap_memory_block(&self, block: MemoryBlockHandle, addr: NonNull<u8>) -> Result<()> {
        self.record(Call::UnmapMemoryBlock {
            block: block.to_raw(),
            addr: addr.as_ptr() as usize,
        });
        self.injected(Op::UnmapMemoryBlock)?;
        self.check_open(block.to_raw())
    }

    fn clear_event(&self, event: EventHandle) -> Result<()> {
        self.record(Call::ClearEvent(event.to_raw()));
        self.injected(Op::ClearEvent)?;
        self.check_open(event.to_raw())
    }

    fn wait_synchronization(&self, object: &impl Waitable, timeout_ns: i64) -> Result<()> {
        let handle = object.raw_handle();
        self.record(Call::WaitSynchronization { handle, timeout_ns });
        self.injected(Op::WaitSynchronization)?;
        self.check_open(handle)
    }

    fn close_handle(&self, handle: Handle) -> Result<()> {
        self.record(Call::CloseHandle(handle));
        self.injected(Op::CloseHandle)?;

        let mut state = self.state.borrow_mut();
        if !state.open.remove(&handle) {
            return Err(result::INVALID_HANDLE.into());
        }
        state.sessions.remove(&handle);
        Ok(())
    }
}
