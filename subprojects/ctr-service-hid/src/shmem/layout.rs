//! HID shared memory layout (0x1000 bytes).
//!
//! ```text
//! Offset  Size   Section
//! ──────────────────────────────────────────────
//! 0x000   0xA8   Pad (8 entries)
//! 0x0A8   0x60   Touch screen (8 entries)
//! 0x108   0x50   Accelerometer (8 entries)
//! 0x158   0xD8   Gyroscope (32 entries)
//! 0x230          Unused
//! ──────────────────────────────────────────────
//! ```
//!
//! Every section starts with a ring header: the tick of the latest update, the tick of the
//! update before it, and the index of the latest entry.

use core::mem::offset_of;

use static_assertions::const_assert_eq;

use super::types::{AccelVector, AngularRate, PadEntry, TouchEntry};

/// Size of the HID shared memory region.
pub const HID_SHARED_MEMORY_SIZE: usize = 0x1000;

/// Ring header at the start of each section, followed by `RESERVED` unused words.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SectionHeader<const RESERVED: usize> {
    /// Tick of the latest update
    pub tick: u64,
    /// Tick of the update before the latest
    pub prev_tick: u64,
    /// Index of the latest entry
    pub index: u32,
    pub _reserved: [u32; RESERVED],
}

/// A section of shared memory: a ring header and `N` entries.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Section<const RESERVED: usize, T, const N: usize> {
    pub header: SectionHeader<RESERVED>,
    pub entries: [T; N],
}

impl<const RESERVED: usize, T, const N: usize> Section<RESERVED, T, N> {
    /// Number of entries in the ring.
    pub const ENTRIES: usize = N;
}

/// Pad section.
pub type PadSection = Section<5, PadEntry, 8>;
/// Touch screen section.
pub type TouchSection = Section<3, TouchEntry, 8>;
/// Accelerometer section.
pub type AccelSection = Section<3, AccelVector, 8>;
/// Gyroscope section.
pub type GyroSection = Section<1, AngularRate, 32>;

/// HID shared memory structure (0x1000 bytes).
#[repr(C)]
pub struct HidSharedMemory {
    pub pad: PadSection,
    pub touch: TouchSection,
    pub accel: AccelSection,
    pub gyro: GyroSection,
    _unused: [u8; HID_SHARED_MEMORY_SIZE - 0x230],
}

const_assert_eq!(size_of::<HidSharedMemory>(), HID_SHARED_MEMORY_SIZE);

const_assert_eq!(offset_of!(HidSharedMemory, pad), 0x000);
const_assert_eq!(offset_of!(HidSharedMemory, touch), 0x0A8);
const_assert_eq!(offset_of!(HidSharedMemory, accel), 0x108);
const_assert_eq!(offset_of!(HidSharedMemory, gyro), 0x158);

const_assert_eq!(offset_of!(PadSection, entries), 0x28);
const_assert_eq!(offset_of!(TouchSection, entries), 0x20);
const_assert_eq!(offset_of!(AccelSection, entries), 0x20);
const_assert_eq!(offset_of!(GyroSection, entries), 0x18);

const_assert_eq!(size_of::<PadEntry>(), 0x10);
const_assert_eq!(size_of::<TouchEntry>(), 0x8);
const_assert_eq!(size_of::<AccelVector>(), 0x6);
const_assert_eq!(size_of::<AngularRate>(), 0x6);
