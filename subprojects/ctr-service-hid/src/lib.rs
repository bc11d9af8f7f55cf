//! Human Interface Device (HID) Service Implementation.
//!
//! This crate provides access to the 3DS HID service, which handles:
//! - Buttons, D-pad, circle pad and C-stick
//! - Touch screen
//! - Accelerometer
//! - Gyroscope
//!
//! The HID module writes input samples into a 0x1000-byte shared memory block, made of one ring
//! buffer per device, and signals an event for each update. [`HidService::scan_input`] takes a
//! snapshot of the latest samples, which the accessors then report until the next scan.

#![no_std]

#[cfg(test)]
extern crate std;

extern crate ctr_panic_handler; // Provide #![panic_handler]

use core::ptr::NonNull;

use ctr_service_srv::{GetServiceError, SrvService};
use ctr_svc::{
    Error, Kernel,
    ipc::SessionHandle,
    mem::{MemoryBlockHandle, MemoryPermission},
    raw::Handle,
    sync::{EventHandle, WAIT_INFINITE},
};

mod config;
mod event;
mod ipc;
mod keys;
mod manager;
mod proto;
pub mod shmem;
mod state;

#[cfg(any(test, feature = "ffi"))]
pub mod ffi;

use self::shmem::HidSharedMemory;
pub use self::{
    config::HidConfig,
    event::{HidEvent, InvalidEventError},
    ipc::{
        CommandError, DisableAccelerometerError, DisableGyroscopeError, EnableAccelerometerError,
        EnableGyroscopeError, GetGyroscopeCoefficientError, GetHandlesError, GetSoundVolumeError,
    },
    keys::Keys,
    manager::HidManager,
    proto::{DEFAULT_SHARED_MEMORY_ADDR, SERVICE_NAME, SPVR_SERVICE_NAME},
    shmem::{AccelVector, AngularRate, CirclePosition, TouchPosition},
    state::InputState,
};

/// HID service session with its mapped shared memory.
///
/// Created by [`init`](Self::init) and released by [`exit`](Self::exit).
pub struct HidService<K: Kernel> {
    kernel: K,
    session: SessionHandle,
    shmem_block: MemoryBlockHandle,
    shmem_ptr: NonNull<HidSharedMemory>,
    events: [EventHandle; HidEvent::COUNT],
    state: InputState,
}

// SAFETY: The handles are plain integers and the shared memory is only read, through volatile
// loads, by the owner of the service. The raw pointer keeps the type `!Sync`.
unsafe impl<K: Kernel + Send> Send for HidService<K> {}

impl<K: Kernel> HidService<K> {
    /// Connects to the HID service and maps its shared memory.
    ///
    /// Asks `srv` for `hid:USER`, falling back to `hid:SPVR` if allowed by `config`, fetches the
    /// shared memory block and the input events, and maps the block read-only at
    /// `config.shared_memory_addr`. On failure everything acquired so far is released.
    pub fn init<S: Kernel>(
        kernel: K,
        srv: &SrvService<S>,
        config: HidConfig,
    ) -> Result<Self, InitError> {
        let shmem_addr =
            NonNull::new(config.shared_memory_addr as *mut u8).ok_or(InitError::NullAddress)?;

        let session = match srv.get_service_handle(SERVICE_NAME) {
            Ok(session) => session,
            Err(err) if config.fallback_to_spvr => {
                log::warn!("hid: {SERVICE_NAME} unavailable ({err}), trying {SPVR_SERVICE_NAME}");
                srv.get_service_handle(SPVR_SERVICE_NAME)
                    .map_err(InitError::GetService)?
            }
            Err(err) => return Err(InitError::GetService(err)),
        };

        let handles = match ipc::get_handles(&kernel, session) {
            Ok(handles) => handles,
            Err(err) => {
                release(&kernel, &[session.to_raw()]);
                return Err(InitError::GetHandles(err));
            }
        };

        // SAFETY: The caller-provided address is reserved for the HID block.
        let mapped = unsafe {
            kernel.map_memory_block(
                handles.shared_memory,
                shmem_addr,
                MemoryPermission::READ,
                MemoryPermission::DONT_CARE,
            )
        };
        if let Err(err) = mapped {
            release(&kernel, &[handles.shared_memory.to_raw()]);
            release(&kernel, &handles.events.map(|event| event.to_raw()));
            release(&kernel, &[session.to_raw()]);
            return Err(InitError::MapSharedMemory(err));
        }

        log::debug!(
            "hid: initialized (session {:#x}, shared memory at {:#x})",
            session.to_raw(),
            config.shared_memory_addr
        );

        Ok(Self {
            kernel,
            session,
            shmem_block: handles.shared_memory,
            shmem_ptr: shmem_addr.cast(),
            events: handles.events,
            state: InputState::default(),
        })
    }

    /// Unmaps the shared memory and closes every handle.
    ///
    /// Failures are logged and do not stop the remaining releases.
    pub fn exit(self) {
        // SAFETY: `self` is consumed, so no reference into the block survives.
        let unmapped = unsafe {
            self.kernel
                .unmap_memory_block(self.shmem_block, self.shmem_ptr.cast())
        };
        if let Err(err) = unmapped {
            log::warn!("hid: failed to unmap shared memory: {err}");
        }

        release(&self.kernel, &[self.shmem_block.to_raw()]);
        release(&self.kernel, &self.events.map(|event| event.to_raw()));
        release(&self.kernel, &[self.session.to_raw()]);

        log::debug!("hid: exited");
    }

    /// Takes a snapshot of the latest input samples.
    pub fn scan_input(&mut self) {
        // SAFETY: The block stays mapped for the lifetime of `self`.
        unsafe { self.state.scan(self.shmem_ptr) };
    }

    /// Returns the snapshot taken by the last [`scan_input`](Self::scan_input).
    #[inline]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Keys held at the last scan.
    #[inline]
    pub fn keys_held(&self) -> Keys {
        self.state.held
    }

    /// Keys newly pressed at the last scan.
    #[inline]
    pub fn keys_down(&self) -> Keys {
        self.state.down
    }

    /// Keys released at the last scan.
    #[inline]
    pub fn keys_up(&self) -> Keys {
        self.state.up
    }

    #[inline]
    pub fn touch_read(&self) -> TouchPosition {
        self.state.touch
    }

    #[inline]
    pub fn circle_read(&self) -> CirclePosition {
        self.state.circle
    }

    /// Raw accelerometer sample. Only updated while the accelerometer is enabled.
    #[inline]
    pub fn accel_read(&self) -> AccelVector {
        self.state.accel
    }

    /// Raw gyroscope sample. Only updated while the gyroscope is enabled.
    #[inline]
    pub fn gyro_read(&self) -> AngularRate {
        self.state.gyro
    }

    /// Blocks until `event` is signalled.
    ///
    /// With `next_event` the event is cleared first, so only a signal raised after the call
    /// wakes the caller. Otherwise a pending signal returns at once and is then cleared.
    #[inline]
    pub fn wait_for_event(&self, event: HidEvent, next_event: bool) -> Result<(), WaitForEventError> {
        wait_event(&self.kernel, self.events[event.index()], next_event)
    }

    /// Returns the handle of `event`.
    #[inline]
    pub fn event(&self, event: HidEvent) -> EventHandle {
        self.events[event.index()]
    }

    /// Returns the underlying session handle.
    #[inline]
    pub fn session(&self) -> SessionHandle {
        self.session
    }

    /// Returns the shared memory block handle.
    #[inline]
    pub fn shared_memory_handle(&self) -> MemoryBlockHandle {
        self.shmem_block
    }

    /// Returns the mapped shared memory.
    #[inline]
    pub fn shared_memory(&self) -> NonNull<HidSharedMemory> {
        self.shmem_ptr
    }

    /// Starts accelerometer sampling.
    pub fn enable_accelerometer(&self) -> Result<(), EnableAccelerometerError> {
        ipc::enable_accelerometer(&self.kernel, self.session)?;
        log::debug!("hid: accelerometer enabled");
        Ok(())
    }

    /// Stops accelerometer sampling.
    pub fn disable_accelerometer(&self) -> Result<(), DisableAccelerometerError> {
        ipc::disable_accelerometer(&self.kernel, self.session)?;
        log::debug!("hid: accelerometer disabled");
        Ok(())
    }

    /// Starts gyroscope sampling.
    pub fn enable_gyroscope(&self) -> Result<(), EnableGyroscopeError> {
        ipc::enable_gyroscope(&self.kernel, self.session)?;
        log::debug!("hid: gyroscope enabled");
        Ok(())
    }

    /// Stops gyroscope sampling.
    pub fn disable_gyroscope(&self) -> Result<(), DisableGyroscopeError> {
        ipc::disable_gyroscope(&self.kernel, self.session)?;
        log::debug!("hid: gyroscope disabled");
        Ok(())
    }

    /// Returns the factor converting raw gyroscope samples to degrees per second.
    #[inline]
    pub fn gyroscope_raw_to_dps_coefficient(&self) -> Result<f32, GetGyroscopeCoefficientError> {
        ipc::get_gyroscope_raw_to_dps_coefficient(&self.kernel, self.session)
    }

    /// Returns the volume slider position (0-63).
    #[inline]
    pub fn sound_volume(&self) -> Result<u8, GetSoundVolumeError> {
        ipc::get_sound_volume(&self.kernel, self.session)
    }
}

impl<K: Kernel> core::fmt::Debug for HidService<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HidService")
            .field("session", &self.session)
            .field("shmem_block", &self.shmem_block)
            .field("shmem_ptr", &self.shmem_ptr)
            .field("events", &self.events)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Waits on an input event handle, clearing it before or after as `next_event` selects.
pub(crate) fn wait_event<K: Kernel>(
    kernel: &K,
    handle: EventHandle,
    next_event: bool,
) -> Result<(), WaitForEventError> {
    if next_event {
        kernel
            .clear_event(handle)
            .map_err(WaitForEventError::ClearEvent)?;
        kernel
            .wait_synchronization(&handle, WAIT_INFINITE)
            .map_err(WaitForEventError::Wait)?;
    } else {
        kernel
            .wait_synchronization(&handle, WAIT_INFINITE)
            .map_err(WaitForEventError::Wait)?;
        kernel
            .clear_event(handle)
            .map_err(WaitForEventError::ClearEvent)?;
    }

    Ok(())
}

/// Closes `handles`, logging failures.
fn release<K: Kernel>(kernel: &K, handles: &[Handle]) {
    for &handle in handles {
        if let Err(err) = kernel.close_handle(handle) {
            log::warn!("hid: failed to close handle {handle:#x}: {err}");
        }
    }
}

/// Error returned by [`HidService::init`].
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The configured shared memory address is null.
    #[error("shared memory address is null")]
    NullAddress,
    /// Neither HID service could be obtained from srv.
    #[error("failed to get service")]
    GetService(#[source] GetServiceError),
    /// Failed to get the shared memory and event handles.
    #[error("failed to get IPC handles")]
    GetHandles(#[source] GetHandlesError),
    /// Failed to map shared memory.
    #[error("failed to map shared memory")]
    MapSharedMemory(#[source] Error),
}

/// Error returned by [`HidService::wait_for_event`].
#[derive(Debug, thiserror::Error)]
pub enum WaitForEventError {
    /// Failed to clear the event.
    #[error("failed to clear event")]
    ClearEvent(#[source] Error),
    /// Failed to wait on the event.
    #[error("failed to wait for event")]
    Wait(#[source] Error),
}
