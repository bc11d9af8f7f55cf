//! srv commands.

use ctr_sf::{ParseResponseError, RequestBuilder, ServiceName, parse_response};
use ctr_svc::{Error, Kernel, ipc::SessionHandle};

use crate::proto;

/// Registers the calling process with the service manager.
pub fn register_client<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
) -> Result<(), RegisterClientError> {
    let mut cmdbuf = RequestBuilder::new(proto::REGISTER_CLIENT)
        .calling_pid()
        .build();

    kernel
        .send_sync_request(session, &mut cmdbuf)
        .map_err(RegisterClientError::SendRequest)?;

    parse_response(&cmdbuf).map_err(RegisterClientError::ParseResponse)?;

    Ok(())
}

/// Error returned by [`register_client`].
#[derive(Debug, thiserror::Error)]
pub enum RegisterClientError {
    /// Failed to send the IPC request.
    #[error("failed to send request")]
    SendRequest(#[source] Error),
    /// Failed to parse the response.
    #[error("failed to parse response")]
    ParseResponse(#[source] ParseResponseError),
}

/// Opens a session to the service registered as `name`.
pub fn get_service_handle<K: Kernel>(
    kernel: &K,
    session: SessionHandle,
    name: ServiceName,
) -> Result<SessionHandle, GetServiceError> {
    let mut cmdbuf = RequestBuilder::new(proto::GET_SERVICE_HANDLE)
        .params(&name.to_words())
        .param(name.len() as u32)
        .param(0) // flags: fail instead of blocking while the service is not registered
        .build();

    kernel
        .send_sync_request(session, &mut cmdbuf)
        .map_err(GetServiceError::SendRequest)?;

    let resp = parse_response(&cmdbuf).map_err(GetServiceError::ParseResponse)?;
    let handle = resp.handle(0).ok_or(GetServiceError::MissingHandle)?;

    // SAFETY: The service manager moved a session handle into the reply.
    Ok(unsafe { SessionHandle::from_raw(handle) })
}

/// Error returned by [`get_service_handle`].
#[derive(Debug, thiserror::Error)]
pub enum GetServiceError {
    /// Failed to send the IPC request.
    #[error("failed to send request")]
    SendRequest(#[source] Error),
    /// Failed to parse the response.
    #[error("failed to parse response")]
    ParseResponse(#[source] ParseResponseError),
    /// Response did not contain the expected handle.
    #[error("missing handle in response")]
    MissingHandle,
}
