//! Translate parameter descriptors.
//!
//! Every translate parameter starts with a descriptor word. The low nibble selects the kind:
//!
//! ```text
//! Handles:        (n - 1) << 26 | move << 4 | pid << 5     (bits 1-3 clear)
//! Static buffer:  size << 14 | id << 10 | 0b0010
//! Buffer mapping: size << 4 | 0b1000 | rights
//! ```

use ctr_svc::raw::Handle;

/// Flag selecting move semantics in a handle descriptor.
pub const MOVE_HANDLES_FLAG: u32 = 0x10;

/// Descriptor asking the kernel to write the caller's process ID in the next word.
pub const CALLING_PID: u32 = 0x20;

/// Largest number of handles a single descriptor can carry.
pub const MAX_HANDLES_PER_DESC: usize = 64;

/// Builds a descriptor for `count` handles the sender keeps.
///
/// `count` must be at least 1.
#[inline]
pub const fn copy_handles(count: usize) -> u32 {
    ((count.saturating_sub(1) as u32) & 0x3F) << 26
}

/// Builds a descriptor for `count` handles whose ownership goes to the receiver.
///
/// `count` must be at least 1.
#[inline]
pub const fn move_handles(count: usize) -> u32 {
    copy_handles(count) | MOVE_HANDLES_FLAG
}

/// Builds a static buffer descriptor. The buffer address follows in the next word.
#[inline]
pub const fn static_buffer(size: usize, id: u8) -> u32 {
    ((size as u32) << 14) | (((id as u32) & 0xF) << 10) | 0x2
}

/// Access granted to the receiver of a mapped buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum BufferRights {
    Read = 2,
    Write = 4,
    ReadWrite = 6,
}

/// Builds a buffer mapping descriptor. The buffer address follows in the next word.
#[inline]
pub const fn buffer(size: usize, rights: BufferRights) -> u32 {
    ((size as u32) << 4) | 0x8 | rights as u32
}

/// A decoded descriptor word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    /// Handle list, `count` words follow.
    Handles { count: usize, moved: bool },
    /// Calling process ID, one word follows.
    CallingPid,
    /// Static buffer, the address word follows.
    StaticBuffer { size: usize, id: u8 },
    /// Mapped buffer, the address word follows.
    Buffer { size: usize, rights: u32 },
}

impl Descriptor {
    /// Decodes a descriptor word, or returns `None` for an unknown kind.
    pub const fn parse(word: u32) -> Option<Self> {
        if word & 0x8 != 0 {
            return Some(Self::Buffer {
                size: (word >> 4) as usize,
                rights: word & 0x6,
            });
        }

        match word & 0xF {
            0x0 if word & CALLING_PID != 0 => Some(Self::CallingPid),
            0x0 => Some(Self::Handles {
                count: ((word >> 26) as usize) + 1,
                moved: word & MOVE_HANDLES_FLAG != 0,
            }),
            0x2 => Some(Self::StaticBuffer {
                size: (word >> 14) as usize,
                id: ((word >> 10) & 0xF) as u8,
            }),
            _ => None,
        }
    }

    /// Number of payload words following the descriptor.
    pub const fn payload_words(&self) -> usize {
        match self {
            Self::Handles { count, .. } => *count,
            Self::CallingPid | Self::StaticBuffer { .. } | Self::Buffer { .. } => 1,
        }
    }
}

/// Returns true if `handles` fits in a single handle descriptor.
#[inline]
pub fn is_valid_handle_list(handles: &[Handle]) -> bool {
    !handles.is_empty() && handles.len() <= MAX_HANDLES_PER_DESC
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_descriptors() {
        assert_eq!(copy_handles(1), 0x0000_0000);
        assert_eq!(move_handles(1), 0x0000_0010);
        assert_eq!(copy_handles(6), 0x1400_0000);
    }

    #[test]
    fn buffer_descriptors() {
        assert_eq!(static_buffer(0x10, 0), 0x0004_0002);
        assert_eq!(static_buffer(0x10, 3), 0x0004_0C02);
        assert_eq!(buffer(0x20, BufferRights::Write), 0x0000_020C);
    }

    #[test]
    fn parse_handle_descriptors() {
        assert_eq!(
            Descriptor::parse(0x1400_0000),
            Some(Descriptor::Handles { count: 6, moved: false })
        );
        assert_eq!(
            Descriptor::parse(move_handles(2)),
            Some(Descriptor::Handles { count: 2, moved: true })
        );
        assert_eq!(Descriptor::parse(CALLING_PID), Some(Descriptor::CallingPid));
    }

    #[test]
    fn parse_buffer_descriptors() {
        assert_eq!(
            Descriptor::parse(static_buffer(0x10, 3)),
            Some(Descriptor::StaticBuffer { size: 0x10, id: 3 })
        );
        assert_eq!(
            Descriptor::parse(buffer(0x20, BufferRights::ReadWrite)),
            Some(Descriptor::Buffer { size: 0x20, rights: 6 })
        );
        assert_eq!(Descriptor::parse(0x4), None);
    }

    #[test]
    fn handle_list_bounds() {
        assert!(!is_valid_handle_list(&[]));
        assert!(is_valid_handle_list(&[1, 2]));
    }
}
