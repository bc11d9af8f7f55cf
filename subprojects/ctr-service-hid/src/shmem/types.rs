//! Input sample types.

/// Touch screen position in pixels.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchPosition {
    pub px: u16,
    pub py: u16,
}

/// Circle pad position, roughly -156..=156 on each axis.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CirclePosition {
    pub dx: i16,
    pub dy: i16,
}

/// Raw accelerometer sample.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccelVector {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

/// Raw gyroscope sample.
///
/// Multiply by the coefficient from
/// [`HidService::gyroscope_raw_to_dps_coefficient`](crate::HidService::gyroscope_raw_to_dps_coefficient)
/// to get degrees per second.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AngularRate {
    /// Roll
    pub x: i16,
    /// Yaw
    pub z: i16,
    /// Pitch
    pub y: i16,
}

/// Pad ring entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PadEntry {
    /// Keys currently held
    pub current: u32,
    /// Keys pressed since the previous entry
    pub pressed: u32,
    /// Keys released since the previous entry
    pub released: u32,
    pub circle: CirclePosition,
}

/// Touch ring entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchEntry {
    pub position: TouchPosition,
    /// Non-zero while the screen is touched
    pub flags: u32,
}

impl TouchEntry {
    /// Returns true if the screen was touched when the entry was written.
    #[inline]
    pub const fn is_touching(&self) -> bool {
        self.flags != 0
    }
}
