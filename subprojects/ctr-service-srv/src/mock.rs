//! A fake service manager for [`MockKernel`].

use std::string::String;

use ctr_sf::{desc, make_header};
use ctr_svc::{
    ipc::CommandBuffer,
    mock::MockKernel,
    result::{self, ResultCode, description, level, module, summary},
};

use crate::proto;

/// Returned for commands the fake service manager does not implement.
const NOT_IMPLEMENTED: ResultCode = ResultCode::from_parts(
    level::PERMANENT,
    summary::NOT_SUPPORTED,
    module::SRV,
    description::NOT_IMPLEMENTED,
);

/// Registers the `srv:` port on `kernel` and answers `RegisterClient` and `GetServiceHandle`.
///
/// `GetServiceHandle` succeeds for every service that has a handler installed with
/// [`MockKernel::on_request`] and fails with `NOT_FOUND` otherwise.
pub fn install(kernel: &MockKernel) {
    kernel.register_port("srv:");
    kernel.on_request("srv:", handle_request);
}

fn handle_request(kernel: &MockKernel, cmdbuf: &mut CommandBuffer) -> ctr_svc::result::Result<()> {
    let command = (cmdbuf[0] >> 16) as u16;
    match command {
        proto::REGISTER_CLIENT => reply(cmdbuf, command, ResultCode::SUCCESS),
        proto::GET_SERVICE_HANDLE => {
            let name = requested_name(cmdbuf);
            if kernel.has_handler(&name) {
                let session = kernel.open_session(&name);
                reply(cmdbuf, command, ResultCode::SUCCESS);
                cmdbuf[0] = make_header(command, 1, 2);
                cmdbuf[2] = desc::move_handles(1);
                cmdbuf[3] = session;
            } else {
                reply(cmdbuf, command, result::NOT_FOUND);
            }
        }
        _ => reply(cmdbuf, command, NOT_IMPLEMENTED),
    }

    Ok(())
}

fn reply(cmdbuf: &mut CommandBuffer, command: u16, rc: ResultCode) {
    *cmdbuf = CommandBuffer::new();
    cmdbuf[0] = make_header(command, 1, 0);
    cmdbuf[1] = rc.to_raw();
}

fn requested_name(cmdbuf: &CommandBuffer) -> String {
    let mut bytes = [0u8; 8];
    bytes[..4].copy_from_slice(&cmdbuf[1].to_le_bytes());
    bytes[4..].copy_from_slice(&cmdbuf[2].to_le_bytes());
    let len = (cmdbuf[3] as usize).min(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}
