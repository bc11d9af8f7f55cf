//! # ctr-gpu
//!
//! Register field encodings for the 3DS GPU (PICA200).
//!
//! Each register field is a typed enum carrying its raw hardware value, or a flag set where
//! several values combine. The `const fn` helpers shift (already masked) values into their
//! field so they can be OR-ed into a register word by a command list builder.
//!
//! | Module          | Registers                                                       |
//! |-----------------|-----------------------------------------------------------------|
//! | [`texture`]     | Texture filters, wrap modes, units and pixel formats            |
//! | [`fragment`]    | Depth/alpha/stencil tests, scissor, write masks, blending, cull |
//! | [`attrib`]      | Vertex attribute formats                                        |
//! | [`tev`]         | Texture combiner (TEV) sources, operands, functions and scales  |
//! | [`lighting`]    | Fragment lighting configuration and LUTs                        |
//! | [`primitive`]   | Primitive topologies and shader stages                          |
//!
//! ## References:
//! - [3dbrew: GPU/Internal Registers](https://www.3dbrew.org/wiki/GPU/Internal_Registers)

#![no_std]

#[macro_use]
mod macros;

pub mod attrib;
pub mod fragment;
pub mod lighting;
pub mod primitive;
pub mod tev;
pub mod texture;

/// Error returned when decoding a raw register value that no variant uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid {name} value {value:#x}")]
pub struct InvalidValueError {
    /// Name of the register field type
    pub name: &'static str,
    /// The rejected raw value
    pub value: u32,
}
