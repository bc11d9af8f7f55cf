//! # ctr-sf
//!
//! Service framework for 3DS (CTR) IPC: encoding requests into the thread command buffer and
//! decoding the replies.
//!
//! # Message layout
//!
//! ```text
//! Word    Field
//! ──────────────────────────────────────────────────────────────
//! 0       Header (command ID, normal param count, translate param count)
//! 1..     Normal parameters (plain words)
//! ..      Translate parameters (descriptor word + payload words)
//! ──────────────────────────────────────────────────────────────
//! ```
//!
//! In a reply the first normal parameter is always the service's result code.
//!
//! # Translate descriptors
//!
//! | Descriptor        | Payload                  | Kernel action                    |
//! |-------------------|--------------------------|----------------------------------|
//! | Copy handles      | `n` handles              | Duplicates handles into receiver |
//! | Move handles      | `n` handles              | Transfers handles to receiver    |
//! | Calling PID       | 1 word (filled by kernel)| Writes the sender's process ID   |
//! | Static buffer     | 1 address word           | Copies data to receiver's buffer |
//! | Buffer mapping    | 1 address word           | Maps the buffer into receiver    |
//!
//! # References
//!
//! - [3dbrew: IPC](https://www.3dbrew.org/wiki/IPC)

#![no_std]

pub mod desc;
pub mod header;
pub mod request;
pub mod response;
mod service_name;

pub use self::{
    header::{Header, make_header},
    request::RequestBuilder,
    response::{ParseResponseError, Response, parse_response},
    service_name::ServiceName,
};
