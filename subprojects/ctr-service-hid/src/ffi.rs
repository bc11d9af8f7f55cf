//! C interface matching libctru's `hid.h`.
//!
//! The exported symbols are only built for the console with the `ffi` feature. Result code
//! conversion and the lock guarding the global session are plain Rust and build everywhere.

mod common;
#[cfg(all(feature = "ffi", target_os = "horizon"))]
mod hid;

pub use self::common::{
    GENERIC_ERROR, INVALID_POINTER, NOT_INITIALIZED, SpinMutex, SpinMutexGuard,
    command_error_to_rc, get_gyroscope_coefficient_error_to_rc, get_handles_error_to_rc,
    get_service_error_to_rc, get_sound_volume_error_to_rc, init_error_to_rc,
    parse_response_error_to_rc, srv_connect_error_to_rc,
};
