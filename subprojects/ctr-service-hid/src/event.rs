//! Input events signalled by the HID module.

/// Events handed out by `GetIPCHandles`, in reply order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum HidEvent {
    /// Pad state updated
    Pad0 = 0,
    /// Pad state updated (second event)
    Pad1 = 1,
    /// Accelerometer state updated
    Accel = 2,
    /// Gyroscope state updated
    Gyro = 3,
    /// Debug pad state updated
    DebugPad = 4,
}

impl HidEvent {
    /// Number of HID events.
    pub const COUNT: usize = 5;

    /// All events, in reply order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Pad0,
        Self::Pad1,
        Self::Accel,
        Self::Gyro,
        Self::DebugPad,
    ];

    /// Returns the position of the event in the reply.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u32> for HidEvent {
    type Error = InvalidEventError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(InvalidEventError(value))
    }
}

/// Error returned when converting an out-of-range event ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid HID event id {0}")]
pub struct InvalidEventError(pub u32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_valid_ids() {
        assert_eq!(HidEvent::try_from(0), Ok(HidEvent::Pad0));
        assert_eq!(HidEvent::try_from(4), Ok(HidEvent::DebugPad));
        assert_eq!(HidEvent::Gyro.index(), 3);
    }

    #[test]
    fn rejects_out_of_range_ids() {
        assert_eq!(HidEvent::try_from(5), Err(InvalidEventError(5)));
        assert_eq!(HidEvent::try_from(u32::MAX), Err(InvalidEventError(u32::MAX)));
    }
}
