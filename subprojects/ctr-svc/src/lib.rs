//! # ctr-svc
//!
//! Kernel-facing primitives for 3DS (CTR) homebrew: result codes, typed kernel handles, the
//! per-thread IPC command buffer and the raw _Supervisor Calls_ (SVCs) used by the service
//! clients in this workspace.
//!
//! Service clients never issue SVCs directly. They go through the [`Kernel`] trait, which is
//! implemented by [`Horizon`] on the console (`target_os = "horizon"`) and by `MockKernel`
//! (behind the `mock` feature) on the host.
//!
//! ## References:
//! - [3dbrew: SVC](https://www.3dbrew.org/wiki/SVC)
//! - [3dbrew: Error codes](https://www.3dbrew.org/wiki/Error_codes)

#![no_std]

#[cfg(any(test, feature = "mock"))]
extern crate std;

#[macro_use]
mod handle;

pub mod code;
pub mod ipc;
pub mod kernel;
pub mod mem;
pub mod raw;
pub mod result;
pub mod sync;

#[cfg(feature = "mock")]
pub mod mock;

pub use self::{
    handle::{Waitable, is_pseudo_handle},
    kernel::Kernel,
    result::{Error, ResultCode},
};

#[cfg(target_os = "horizon")]
pub use self::kernel::Horizon;
