//! HID user service commands.

use ctr_sf::{ParseResponseError, RequestBuilder, Response, parse_response};
use ctr_svc::{
    Error, Kernel,
    ipc::{CommandBuffer, SessionHandle},
    mem::MemoryBlockHandle,
    sync::EventHandle,
};

use crate::{event::HidEvent, proto};

/// Handles returned by [`get_handles`].
#[derive(Debug, Clone, Copy)]
pub struct IpcHandles {
    pub shared_memory: MemoryBlockHandle,
    /// Indexed by [`HidEvent::index`]
    pub events: [EventHandle; HidEvent::COUNT],
}

/// Sends the request in `cmdbuf` and parses the reply left in it.
fn send<'a, K: Kernel>(
    kernel: &K,
    session: SessionHandle,
    cmdbuf: &'a mut CommandBuffer,
) -> Result<Response<'a>, CommandError> {
    kernel
        .send_sync_request(session, cmdbuf)
        .map_err(CommandError::SendRequest)?;

    let cmdbuf: &'a CommandBuffer = cmdbuf;
    parse_response(cmdbuf).map_err(CommandError::ParseResponse)
}

/// Failure shared by every command: the request could not be sent or the service rejected it.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Failed to send the IPC request.
    #[error("failed to send request")]
    SendRequest(#[source] Error),
    /// Failed to parse the response.
    #[error("failed to parse response")]
    ParseResponse(#[source] ParseResponseError),
}

/// Memory block plus one event per [`HidEvent`].
const EXPECTED_HANDLES: usize = 1 + HidEvent::COUNT;

/// Gets the shared memory block and the input events.
///
/// Handles beyond the expected six are closed.
pub fn get_handles<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
) -> Result<IpcHandles, GetHandlesError> {
    let mut cmdbuf = RequestBuilder::new(proto::GET_IPC_HANDLES).build();
    let resp = send(kernel, session, &mut cmdbuf).map_err(GetHandlesError::Command)?;

    let handles = resp.handles();
    if handles.len() < EXPECTED_HANDLES {
        crate::release(kernel, handles);
        return Err(GetHandlesError::MissingHandles(handles.len()));
    }

    // Only the first six are ours to keep
    let (handles, extra) = handles.split_at(EXPECTED_HANDLES);
    if !extra.is_empty() {
        log::warn!("hid: closing {} unexpected handles in GetIPCHandles reply", extra.len());
        crate::release(kernel, extra);
    }

    // SAFETY: The service replies with the memory block followed by the events.
    unsafe {
        Ok(IpcHandles {
            shared_memory: MemoryBlockHandle::from_raw(handles[0]),
            events: core::array::from_fn(|i| EventHandle::from_raw(handles[1 + i])),
        })
    }
}

/// Error returned by [`get_handles`].
#[derive(Debug, thiserror::Error)]
pub enum GetHandlesError {
    /// The request failed.
    #[error("failed to get handles")]
    Command(#[source] CommandError),
    /// The reply carried fewer handles than expected.
    #[error("expected 6 handles in response, got {0}")]
    MissingHandles(usize),
}

/// Enables accelerometer sampling.
pub fn enable_accelerometer<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
) -> Result<(), EnableAccelerometerError> {
    let mut cmdbuf = RequestBuilder::new(proto::ENABLE_ACCELEROMETER).build();
    send(kernel, session, &mut cmdbuf)?;
    Ok(())
}

/// Error returned by [`enable_accelerometer`].
#[derive(Debug, thiserror::Error)]
#[error("failed to enable accelerometer")]
pub struct EnableAccelerometerError(#[from] pub CommandError);

/// Disables accelerometer sampling.
pub fn disable_accelerometer<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
) -> Result<(), DisableAccelerometerError> {
    let mut cmdbuf = RequestBuilder::new(proto::DISABLE_ACCELEROMETER).build();
    send(kernel, session, &mut cmdbuf)?;
    Ok(())
}

/// Error returned by [`disable_accelerometer`].
#[derive(Debug, thiserror::Error)]
#[error("failed to disable accelerometer")]
pub struct DisableAccelerometerError(#[from] pub CommandError);

/// Enables gyroscope sampling.
pub fn enable_gyroscope<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
) -> Result<(), EnableGyroscopeError> {
    let mut cmdbuf = RequestBuilder::new(proto::ENABLE_GYROSCOPE).build();
    send(kernel, session, &mut cmdbuf)?;
    Ok(())
}

/// Error returned by [`enable_gyroscope`].
#[derive(Debug, thiserror::Error)]
#[error("failed to enable gyroscope")]
pub struct EnableGyroscopeError(#[from] pub CommandError);

/// Disables gyroscope sampling.
pub fn disable_gyroscope<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
) -> Result<(), DisableGyroscopeError> {
    let mut cmdbuf = RequestBuilder::new(proto::DISABLE_GYROSCOPE).build();
    send(kernel, session, &mut cmdbuf)?;
    Ok(())
}

/// Error returned by [`disable_gyroscope`].
#[derive(Debug, thiserror::Error)]
#[error("failed to disable gyroscope")]
pub struct DisableGyroscopeError(#[from] pub CommandError);

/// Gets the factor converting raw gyroscope samples to degrees per second.
pub fn get_gyroscope_raw_to_dps_coefficient<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
) -> Result<f32, GetGyroscopeCoefficientError> {
    let mut cmdbuf = RequestBuilder::new(proto::GET_GYROSCOPE_RAW_TO_DPS_COEFFICIENT).build();
    let resp = send(kernel, session, &mut cmdbuf).map_err(GetGyroscopeCoefficientError::Command)?;

    resp.param(0)
        .map(f32::from_bits)
        .ok_or(GetGyroscopeCoefficientError::MissingValue)
}

/// Error returned by [`get_gyroscope_raw_to_dps_coefficient`].
#[derive(Debug, thiserror::Error)]
pub enum GetGyroscopeCoefficientError {
    /// The request failed.
    #[error("failed to get gyroscope coefficient")]
    Command(#[source] CommandError),
    /// The reply carried no coefficient.
    #[error("missing coefficient in response")]
    MissingValue,
}

/// Gets the volume slider position (0-63).
pub fn get_sound_volume<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
) -> Result<u8, GetSoundVolumeError> {
    let mut cmdbuf = RequestBuilder::new(proto::GET_SOUND_VOLUME).build();
    let resp = send(kernel, session, &mut cmdbuf).map_err(GetSoundVolumeError::Command)?;

    resp.param(0)
        .map(|word| (word & 0xFF) as u8)
        .ok_or(GetSoundVolumeError::MissingValue)
}

/// Error returned by [`get_sound_volume`].
#[derive(Debug, thiserror::Error)]
pub enum GetSoundVolumeError {
    /// The request failed.
    #[error("failed to get sound volume")]
    Command(#[source] CommandError),
    /// The reply carried no volume.
    #[error("missing volume in response")]
    MissingValue,
}
