//! HID protocol constants.

use ctr_sf::ServiceName;

/// HID user service name.
pub const SERVICE_NAME: ServiceName = service_name("hid:USER");

/// HID system service name, used when `hid:USER` is unavailable.
pub const SPVR_SERVICE_NAME: ServiceName = service_name("hid:SPVR");

/// Default address the shared memory block is mapped at.
pub const DEFAULT_SHARED_MEMORY_ADDR: usize = 0x1000_0000;

/// Get IPC handles (shared memory block and input events).
pub const GET_IPC_HANDLES: u16 = 0x000A;

/// Enable accelerometer sampling.
pub const ENABLE_ACCELEROMETER: u16 = 0x0011;

/// Disable accelerometer sampling.
pub const DISABLE_ACCELEROMETER: u16 = 0x0012;

/// Enable gyroscope sampling.
pub const ENABLE_GYROSCOPE: u16 = 0x0013;

/// Disable gyroscope sampling.
pub const DISABLE_GYROSCOPE: u16 = 0x0014;

/// Get the raw-to-degrees-per-second gyroscope coefficient.
pub const GET_GYROSCOPE_RAW_TO_DPS_COEFFICIENT: u16 = 0x0015;

/// Get the volume slider position.
pub const GET_SOUND_VOLUME: u16 = 0x0017;

const fn service_name(name: &str) -> ServiceName {
    match ServiceName::new(name) {
        Some(name) => name,
        None => panic!("invalid service name"),
    }
}
