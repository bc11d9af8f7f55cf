//! Result codes and locking shared by the exports.

use core::{
    cell::UnsafeCell,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicBool, Ordering},
};

use ctr_service_srv::{ConnectError, GetServiceError, RegisterClientError};
use ctr_sf::ParseResponseError;
use ctr_svc::{
    ResultCode,
    result::{description, level, module, summary},
};

use crate::{
    CommandError, GetGyroscopeCoefficientError, GetHandlesError, GetSoundVolumeError, InitError,
};

/// Failure reported when no more specific result code is available (`0xD963FBFF`).
pub const GENERIC_ERROR: u32 = ResultCode::from_parts(
    level::PERMANENT,
    summary::INTERNAL,
    module::APPLICATION,
    description::INVALID_RESULT_VALUE,
)
.to_raw();

/// Returned by commands issued before `hidInit` (`0xD8A3FBF8`).
pub const NOT_INITIALIZED: u32 = ResultCode::from_parts(
    level::PERMANENT,
    summary::INVALID_STATE,
    module::APPLICATION,
    description::NOT_INITIALIZED,
)
.to_raw();

/// Returned when an out-parameter or the mapping address is null (`0xE0E3FBF6`).
pub const INVALID_POINTER: u32 = ResultCode::from_parts(
    level::USAGE,
    summary::INVALID_ARGUMENT,
    module::APPLICATION,
    description::INVALID_POINTER,
)
.to_raw();

/// Converts a [`ParseResponseError`] to a raw result code.
pub fn parse_response_error_to_rc(err: ParseResponseError) -> u32 {
    match err {
        ParseResponseError::ServiceError(e) => e.to_raw(),
        ParseResponseError::MissingResult
        | ParseResponseError::Truncated
        | ParseResponseError::UnknownDescriptor(_)
        | ParseResponseError::TooManyHandles => GENERIC_ERROR,
    }
}

/// Converts a srv [`ConnectError`] to a raw result code.
pub fn srv_connect_error_to_rc(err: ConnectError) -> u32 {
    match err {
        ConnectError::ConnectToPort(e) => e.to_raw(),
        ConnectError::RegisterClient(e) => match e {
            RegisterClientError::SendRequest(e) => e.to_raw(),
            RegisterClientError::ParseResponse(e) => parse_response_error_to_rc(e),
        },
    }
}

/// Converts a [`GetServiceError`] to a raw result code.
pub fn get_service_error_to_rc(err: GetServiceError) -> u32 {
    match err {
        GetServiceError::SendRequest(e) => e.to_raw(),
        GetServiceError::ParseResponse(e) => parse_response_error_to_rc(e),
        GetServiceError::MissingHandle => GENERIC_ERROR,
    }
}

/// Converts a [`CommandError`] to a raw result code.
pub fn command_error_to_rc(err: CommandError) -> u32 {
    match err {
        CommandError::SendRequest(e) => e.to_raw(),
        CommandError::ParseResponse(e) => parse_response_error_to_rc(e),
    }
}

/// Converts a [`GetHandlesError`] to a raw result code.
pub fn get_handles_error_to_rc(err: GetHandlesError) -> u32 {
    match err {
        GetHandlesError::Command(e) => command_error_to_rc(e),
        GetHandlesError::MissingHandles(_) => GENERIC_ERROR,
    }
}

/// Converts an [`InitError`] to a raw result code.
pub fn init_error_to_rc(err: InitError) -> u32 {
    match err {
        InitError::NullAddress => INVALID_POINTER,
        InitError::GetService(e) => get_service_error_to_rc(e),
        InitError::GetHandles(e) => get_handles_error_to_rc(e),
        InitError::MapSharedMemory(e) => e.to_raw(),
    }
}

pub fn get_gyroscope_coefficient_error_to_rc(err: GetGyroscopeCoefficientError) -> u32 {
    match err {
        GetGyroscopeCoefficientError::Command(e) => command_error_to_rc(e),
        GetGyroscopeCoefficientError::MissingValue => GENERIC_ERROR,
    }
}

pub fn get_sound_volume_error_to_rc(err: GetSoundVolumeError) -> u32 {
    match err {
        GetSoundVolumeError::Command(e) => command_error_to_rc(e),
        GetSoundVolumeError::MissingValue => GENERIC_ERROR,
    }
}

/// A lock that spins until the holder releases it.
///
/// Waiters sleep briefly between attempts on the console so a lower-priority holder can run.
pub struct SpinMutex<T> {
    locked: AtomicBool,
    data: UnsafeCell<T>,
}

// SAFETY: `data` is only reached through a guard, and at most one guard exists at a time.
unsafe impl<T: Send> Send for SpinMutex<T> {}
// SAFETY: See above.
unsafe impl<T: Send> Sync for SpinMutex<T> {}

impl<T> SpinMutex<T> {
    /// Creates an unlocked mutex.
    pub const fn new(data: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            data: UnsafeCell::new(data),
        }
    }

    /// Acquires the lock, blocking the current thread until it is available.
    pub fn lock(&self) -> SpinMutexGuard<'_, T> {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            backoff();
        }
        SpinMutexGuard { mutex: self }
    }

    /// Acquires the lock if it is free.
    pub fn try_lock(&self) -> Option<SpinMutexGuard<'_, T>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| SpinMutexGuard { mutex: self })
    }
}

/// Releases the lock when dropped.
pub struct SpinMutexGuard<'a, T> {
    mutex: &'a SpinMutex<T>,
}

impl<T> Deref for SpinMutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: The guard holds the lock.
        unsafe { &*self.mutex.data.get() }
    }
}

impl<T> DerefMut for SpinMutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: The guard holds the lock.
        unsafe { &mut *self.mutex.data.get() }
    }
}

impl<T> Drop for SpinMutexGuard<'_, T> {
    fn drop(&mut self) {
        self.mutex.locked.store(false, Ordering::Release);
    }
}

#[cfg(target_os = "horizon")]
fn backoff() {
    const BACKOFF_NS: i64 = 100_000;
    // SAFETY: No lock is held by the waiting thread.
    unsafe { ctr_svc::raw::sleep_thread(BACKOFF_NS) };
}

#[cfg(not(target_os = "horizon"))]
fn backoff() {
    core::hint::spin_loop();
}

#[cfg(test)]
mod tests {
    use ctr_svc::{Error, result::INVALID_HANDLE};

    use super::*;

    #[test]
    fn fallback_codes_are_failures() {
        for rc in [GENERIC_ERROR, NOT_INITIALIZED, INVALID_POINTER] {
            let rc = ResultCode::from_raw(rc);
            assert!(rc.is_failure());
            assert_eq!(rc.module(), module::APPLICATION);
        }
        assert_eq!(ResultCode::from_raw(NOT_INITIALIZED).description(), description::NOT_INITIALIZED);
    }

    #[test]
    fn service_error_code_is_passed_through() {
        let err = InitError::GetHandles(GetHandlesError::Command(CommandError::ParseResponse(
            ParseResponseError::ServiceError(Error::from(INVALID_HANDLE)),
        )));

        assert_eq!(init_error_to_rc(err), INVALID_HANDLE.to_raw());
    }

    #[test]
    fn kernel_error_code_is_passed_through() {
        let err = InitError::MapSharedMemory(Error::from(INVALID_HANDLE));

        assert_eq!(init_error_to_rc(err), INVALID_HANDLE.to_raw());
    }

    #[test]
    fn malformed_replies_map_to_generic_error() {
        assert_eq!(
            init_error_to_rc(InitError::GetService(GetServiceError::MissingHandle)),
            GENERIC_ERROR
        );
        assert_eq!(
            get_handles_error_to_rc(GetHandlesError::MissingHandles(2)),
            GENERIC_ERROR
        );
        assert_eq!(
            parse_response_error_to_rc(ParseResponseError::Truncated),
            GENERIC_ERROR
        );
        assert_eq!(
            get_sound_volume_error_to_rc(GetSoundVolumeError::MissingValue),
            GENERIC_ERROR
        );
    }

    #[test]
    fn null_address_maps_to_invalid_pointer() {
        assert_eq!(init_error_to_rc(InitError::NullAddress), INVALID_POINTER);
    }

    #[test]
    fn srv_connect_failure_keeps_kernel_code() {
        let err = ConnectError::ConnectToPort(Error::from(INVALID_HANDLE));

        assert_eq!(srv_connect_error_to_rc(err), INVALID_HANDLE.to_raw());
    }

    #[test]
    fn guard_releases_lock_on_drop() {
        let mutex = SpinMutex::new(1u32);

        {
            let mut guard = mutex.lock();
            *guard += 1;
            assert!(mutex.try_lock().is_none());
        }

        assert_eq!(*mutex.try_lock().unwrap(), 2);
    }

    #[test]
    fn lock_is_shared_between_threads() {
        let mutex = SpinMutex::new(0u32);

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..1000 {
                        *mutex.lock() += 1;
                    }
                });
            }
        });

        assert_eq!(*mutex.lock(), 4000);
    }
}
