//! `hid.h` exports backed by a process-wide [`HidManager`].

#![allow(non_snake_case, non_upper_case_globals)]

use core::ptr;

use ctr_service_srv::SrvService;
use ctr_svc::{Horizon, raw::Handle};

use super::common::{
    INVALID_POINTER, NOT_INITIALIZED, SpinMutex, command_error_to_rc,
    get_gyroscope_coefficient_error_to_rc, get_handles_error_to_rc, get_sound_volume_error_to_rc,
    init_error_to_rc, srv_connect_error_to_rc,
};
use crate::{
    AccelVector, AngularRate, CirclePosition, HidConfig, HidEvent, HidManager, HidService,
    TouchPosition,
};

static HID: SpinMutex<HidManager<Horizon>> = SpinMutex::new(HidManager::new());

/// Shared memory block handle, or 0 before `hidInit`.
#[unsafe(no_mangle)]
pub static mut hidMemHandle: Handle = 0;

/// Mapped shared memory, or null before `hidInit`.
#[unsafe(no_mangle)]
pub static mut hidSharedMem: *mut u32 = ptr::null_mut();

/// Connects to HID and maps its shared memory.
///
/// Corresponds to `hidInit()` in libctru. Repeated calls only count references.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidInit() -> u32 {
    let mut hid = HID.lock();

    let res = hid.init(|| {
        let srv = SrvService::connect(Horizon).map_err(srv_connect_error_to_rc)?;
        let service = HidService::init(Horizon, &srv, HidConfig::default());
        srv.close();
        service.map_err(init_error_to_rc)
    });
    if let Err(rc) = res {
        log::error!("hid: hidInit failed with {rc:#010x}");
        return rc;
    }

    if let Some(service) = hid.service() {
        // SAFETY: The globals are only written with the HID lock held.
        unsafe {
            hidMemHandle = service.shared_memory_handle().to_raw();
            hidSharedMem = service.shared_memory().as_ptr().cast();
        }
    }
    0
}

/// Drops a reference to the HID session.
///
/// Corresponds to `hidExit()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidExit() {
    let mut hid = HID.lock();
    if hid.exit() {
        // SAFETY: The globals are only written with the HID lock held.
        unsafe {
            hidMemHandle = 0;
            hidSharedMem = ptr::null_mut();
        }
    }
}

/// Corresponds to `hidScanInput()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidScanInput() {
    if let Some(service) = HID.lock().service_mut() {
        service.scan_input();
    }
}

/// Corresponds to `hidKeysHeld()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidKeysHeld() -> u32 {
    HID.lock().service().map_or(0, |s| s.keys_held().bits())
}

/// Corresponds to `hidKeysDown()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidKeysDown() -> u32 {
    HID.lock().service().map_or(0, |s| s.keys_down().bits())
}

/// Corresponds to `hidKeysUp()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidKeysUp() -> u32 {
    HID.lock().service().map_or(0, |s| s.keys_up().bits())
}

/// Corresponds to `hidTouchRead()` in libctru.
///
/// # Safety
///
/// `pos` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidTouchRead(pos: *mut TouchPosition) {
    let value = HID.lock().service().map(|s| s.touch_read()).unwrap_or_default();
    // SAFETY: Caller guarantees `pos` is null or writable.
    unsafe { write_out(pos, value) };
}

/// Corresponds to `hidCircleRead()` in libctru.
///
/// # Safety
///
/// `pos` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidCircleRead(pos: *mut CirclePosition) {
    let value = HID.lock().service().map(|s| s.circle_read()).unwrap_or_default();
    // SAFETY: Caller guarantees `pos` is null or writable.
    unsafe { write_out(pos, value) };
}

/// Corresponds to `hidAccelRead()` in libctru.
///
/// # Safety
///
/// `vector` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidAccelRead(vector: *mut AccelVector) {
    let value = HID.lock().service().map(|s| s.accel_read()).unwrap_or_default();
    // SAFETY: Caller guarantees `vector` is null or writable.
    unsafe { write_out(vector, value) };
}

/// Corresponds to `hidGyroRead()` in libctru.
///
/// # Safety
///
/// `rate` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidGyroRead(rate: *mut AngularRate) {
    let value = HID.lock().service().map(|s| s.gyro_read()).unwrap_or_default();
    // SAFETY: Caller guarantees `rate` is null or writable.
    unsafe { write_out(rate, value) };
}

/// Blocks until the input event `id` is signalled.
///
/// Corresponds to `hidWaitForEvent()` in libctru. Unknown ids and calls before `hidInit`
/// return at once. The lock is released before waiting.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hidWaitForEvent(id: u32, next_event: bool) {
    let event = match HidEvent::try_from(id) {
        Ok(event) => event,
        Err(err) => {
            log::warn!("hid: {err}");
            return;
        }
    };

    let Some(handle) = HID.lock().service().map(|s| s.event(event)) else {
        return;
    };

    if let Err(err) = crate::wait_event(&Horizon, handle, next_event) {
        log::warn!("hid: waiting for {event:?} failed: {err}");
    }
}

/// Requests a fresh set of shared memory and event handles.
///
/// Corresponds to `HIDUSER_GetHandles()` in libctru. Handles whose out-pointer is null are
/// closed.
///
/// # Safety
///
/// Every pointer must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn HIDUSER_GetHandles(
    out_mem_handle: *mut Handle,
    event_pad0: *mut Handle,
    event_pad1: *mut Handle,
    event_accel: *mut Handle,
    event_gyro: *mut Handle,
    event_debug_pad: *mut Handle,
) -> u32 {
    let hid = HID.lock();
    let Some(service) = hid.service() else {
        return NOT_INITIALIZED;
    };

    let handles = match crate::ipc::get_handles(&Horizon, service.session()) {
        Ok(handles) => handles,
        Err(err) => return get_handles_error_to_rc(err),
    };

    let [pad0, pad1, accel, gyro, debug_pad] = handles.events.map(|event| event.to_raw());
    let outputs = [
        (out_mem_handle, handles.shared_memory.to_raw()),
        (event_pad0, pad0),
        (event_pad1, pad1),
        (event_accel, accel),
        (event_gyro, gyro),
        (event_debug_pad, debug_pad),
    ];

    for (out, handle) in outputs {
        if out.is_null() {
            crate::release(&Horizon, &[handle]);
        } else {
            // SAFETY: Caller guarantees non-null pointers are writable.
            unsafe { out.write(handle) };
        }
    }
    0
}

/// Corresponds to `HIDUSER_EnableAccelerometer()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn HIDUSER_EnableAccelerometer() -> u32 {
    with_service(|s| s.enable_accelerometer().map_err(|e| command_error_to_rc(e.0)))
}

/// Corresponds to `HIDUSER_DisableAccelerometer()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn HIDUSER_DisableAccelerometer() -> u32 {
    with_service(|s| s.disable_accelerometer().map_err(|e| command_error_to_rc(e.0)))
}

/// Corresponds to `HIDUSER_EnableGyroscope()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn HIDUSER_EnableGyroscope() -> u32 {
    with_service(|s| s.enable_gyroscope().map_err(|e| command_error_to_rc(e.0)))
}

/// Corresponds to `HIDUSER_DisableGyroscope()` in libctru.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn HIDUSER_DisableGyroscope() -> u32 {
    with_service(|s| s.disable_gyroscope().map_err(|e| command_error_to_rc(e.0)))
}

/// Corresponds to `HIDUSER_GetGyroscopeRawToDpsCoefficient()` in libctru.
///
/// # Safety
///
/// `coeff` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn HIDUSER_GetGyroscopeRawToDpsCoefficient(coeff: *mut f32) -> u32 {
    if coeff.is_null() {
        return INVALID_POINTER;
    }
    with_service(|s| {
        let value = s
            .gyroscope_raw_to_dps_coefficient()
            .map_err(get_gyroscope_coefficient_error_to_rc)?;
        // SAFETY: Checked non-null above; caller guarantees it is writable.
        unsafe { coeff.write(value) };
        Ok(())
    })
}

/// Corresponds to `HIDUSER_GetSoundVolume()` in libctru.
///
/// # Safety
///
/// `volume` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn HIDUSER_GetSoundVolume(volume: *mut u8) -> u32 {
    if volume.is_null() {
        return INVALID_POINTER;
    }
    with_service(|s| {
        let value = s.sound_volume().map_err(get_sound_volume_error_to_rc)?;
        // SAFETY: Checked non-null above; caller guarantees it is writable.
        unsafe { volume.write(value) };
        Ok(())
    })
}

//<editor-fold desc="libnds compatibility">

/// Alias of [`hidScanInput`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn scanKeys() {
    // SAFETY: Forwarded unchanged.
    unsafe { hidScanInput() }
}

/// Alias of [`hidKeysHeld`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn keysHeld() -> u32 {
    // SAFETY: Forwarded unchanged.
    unsafe { hidKeysHeld() }
}

/// Alias of [`hidKeysDown`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn keysDown() -> u32 {
    // SAFETY: Forwarded unchanged.
    unsafe { hidKeysDown() }
}

/// Alias of [`hidKeysUp`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn keysUp() -> u32 {
    // SAFETY: Forwarded unchanged.
    unsafe { hidKeysUp() }
}

/// Alias of [`hidTouchRead`].
///
/// # Safety
///
/// `pos` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn touchRead(pos: *mut TouchPosition) {
    // SAFETY: Same contract as `hidTouchRead`.
    unsafe { hidTouchRead(pos) }
}

/// Alias of [`hidCircleRead`].
///
/// # Safety
///
/// `pos` must be null or valid for writes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn circleRead(pos: *mut CirclePosition) {
    // SAFETY: Same contract as `hidCircleRead`.
    unsafe { hidCircleRead(pos) }
}

//</editor-fold>

/// Runs `f` on the global session, or returns [`NOT_INITIALIZED`].
fn with_service(f: impl FnOnce(&HidService<Horizon>) -> Result<(), u32>) -> u32 {
    let hid = HID.lock();
    match hid.service() {
        Some(service) => match f(service) {
            Ok(()) => 0,
            Err(rc) => rc,
        },
        None => NOT_INITIALIZED,
    }
}

/// Writes `value` through `out` unless it is null.
///
/// # Safety
///
/// `out` must be null or valid for writes.
unsafe fn write_out<T>(out: *mut T, value: T) {
    if !out.is_null() {
        // SAFETY: Non-null, and the caller guarantees it is writable.
        unsafe { out.write(value) };
    }
}
