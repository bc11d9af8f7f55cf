//! Service manager (`srv:`) client.
//!
//! Every other service is reached through the service manager: the client connects to the
//! `srv:` port, registers itself, and then asks for a session to a service by name.
//!
//! [`SrvService`] owns the `srv:` session and issues these requests through a
//! [`Kernel`](ctr_svc::Kernel), so the same code runs on the console and against the mock
//! kernel in tests.

#![no_std]

#[cfg(any(test, feature = "mock"))]
extern crate std;

extern crate ctr_panic_handler; // Provide #![panic_handler]

use ctr_svc::{Error, Kernel, ipc::SessionHandle};

pub use ctr_sf::ServiceName;

mod ipc;
mod proto;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use self::{
    ipc::{GetServiceError, RegisterClientError},
    proto::SRV_PORT_NAME,
};

/// A registered session with the service manager.
#[derive(Debug)]
pub struct SrvService<K: Kernel> {
    kernel: K,
    session: SessionHandle,
}

impl<K: Kernel> SrvService<K> {
    /// Connects to `srv:` and registers the calling process.
    pub fn connect(kernel: K) -> Result<Self, ConnectError> {
        let session = kernel
            .connect_to_port(SRV_PORT_NAME)
            .map_err(ConnectError::ConnectToPort)?;

        if let Err(err) = ipc::register_client(&kernel, session) {
            let _ = kernel.close_handle(session.to_raw());
            return Err(ConnectError::RegisterClient(err));
        }

        log::debug!("srv: connected (session {:#x})", session.to_raw());
        Ok(Self { kernel, session })
    }

    /// Opens a session to the service registered as `name`.
    ///
    /// The returned session belongs to the caller, who must close it.
    pub fn get_service_handle(&self, name: ServiceName) -> Result<SessionHandle, GetServiceError> {
        let handle = ipc::get_service_handle(&self.kernel, self.session, name)?;
        log::debug!("srv: got {name} (session {:#x})", handle.to_raw());
        Ok(handle)
    }

    /// Returns the underlying session handle.
    #[inline]
    pub fn session(&self) -> SessionHandle {
        self.session
    }

    /// Returns the kernel this session was opened with.
    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Consumes and closes the session.
    pub fn close(self) {
        if let Err(err) = self.kernel.close_handle(self.session.to_raw()) {
            log::warn!("srv: failed to close session: {err}");
        }
    }
}

/// Error returned by [`SrvService::connect`].
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The `srv:` port could not be connected to.
    #[error("failed to connect to port")]
    ConnectToPort(#[source] Error),
    /// The service manager refused the client.
    #[error("failed to register client")]
    RegisterClient(#[source] RegisterClientError),
}

#[cfg(test)]
mod tests {
    use ctr_sf::desc;
    use ctr_svc::{
        mock::{Call, MockKernel, Op},
        result,
    };

    use super::*;

    fn hid_user() -> ServiceName {
        ServiceName::new("hid:USER").unwrap()
    }

    #[test]
    fn connect_registers_the_client() {
        let kernel = MockKernel::new();
        mock::install(&kernel);

        let srv = SrvService::connect(&kernel).unwrap();

        assert_eq!(kernel.commands(), [proto::REGISTER_CLIENT]);
        assert!(kernel.is_open(srv.session().to_raw()));
    }

    #[test]
    fn register_client_sends_calling_pid() {
        let kernel = MockKernel::new();
        kernel.register_port("srv:");
        kernel.on_request("srv:", |_, cmdbuf| {
            assert_eq!(cmdbuf[0], 0x0001_0002);
            assert_eq!(cmdbuf[1], desc::CALLING_PID);
            cmdbuf[0] = 0x0001_0040;
            cmdbuf[1] = 0;
            Ok(())
        });

        SrvService::connect(&kernel).unwrap();
    }

    #[test]
    fn connect_fails_without_port() {
        let kernel = MockKernel::new();

        let err = SrvService::connect(&kernel).unwrap_err();

        assert!(matches!(err, ConnectError::ConnectToPort(e) if e.code() == result::NOT_FOUND));
    }

    #[test]
    fn connect_closes_session_when_registration_fails() {
        let kernel = MockKernel::new();
        mock::install(&kernel);
        kernel.fail(Op::SendSyncRequest, result::INVALID_HANDLE);

        let err = SrvService::connect(&kernel).unwrap_err();

        assert!(matches!(err, ConnectError::RegisterClient(_)));
        assert!(kernel.open_handles().is_empty());
    }

    #[test]
    fn get_service_handle_encodes_name() {
        let kernel = MockKernel::new();
        mock::install(&kernel);
        let srv = SrvService::connect(&kernel).unwrap();
        kernel.on_request("srv:", |k, cmdbuf| {
            assert_eq!(cmdbuf[0], 0x0005_0100);
            assert_eq!(&cmdbuf.words()[1..5], &[0x3A64_6968, 0x5245_5355, 8, 0]);
            let session = k.open_session("hid:USER");
            cmdbuf.words_mut()[..5].copy_from_slice(&[
                0x0005_0042,
                0,
                desc::move_handles(1),
                session,
                0,
            ]);
            Ok(())
        });

        let session = srv.get_service_handle(hid_user()).unwrap();

        assert!(kernel.is_open(session.to_raw()));
    }

    #[test]
    fn get_service_handle_reports_unknown_service() {
        let kernel = MockKernel::new();
        mock::install(&kernel);
        let srv = SrvService::connect(&kernel).unwrap();

        let err = srv.get_service_handle(hid_user()).unwrap_err();

        let GetServiceError::ParseResponse(err) = err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(err.service_error().map(Error::code), Some(result::NOT_FOUND));
    }

    #[test]
    fn close_releases_the_session() {
        let kernel = MockKernel::new();
        mock::install(&kernel);
        let srv = SrvService::connect(&kernel).unwrap();
        let session = srv.session().to_raw();

        srv.close();

        assert!(!kernel.is_open(session));
        assert_eq!(kernel.calls().last(), Some(&Call::CloseHandle(session)));
    }
}
