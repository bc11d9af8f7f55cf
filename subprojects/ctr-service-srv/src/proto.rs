//! srv protocol constants.

use core::ffi::CStr;

/// Service manager named port.
pub const SRV_PORT_NAME: &CStr = c"srv:";

/// Register client (sends PID).
pub const REGISTER_CLIENT: u16 = 0x0001;

/// Get service handle by name.
pub const GET_SERVICE_HANDLE: u16 = 0x0005;
