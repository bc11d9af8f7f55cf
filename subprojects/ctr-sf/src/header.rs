//! The command header (word 0 of every request and reply).

use modular_bitfield::prelude::*;
use static_assertions::const_assert_eq;

/// Number of bits available for each parameter count.
const COUNT_MASK: u32 = 0x3F;

/// IPC command header.
///
/// ```text
/// Bits 0-5:   translate parameter word count
/// Bits 6-11:  normal parameter word count
/// Bits 12-15: unused
/// Bits 16-31: command ID
/// ```
#[bitfield]
#[derive(Debug, Clone, Copy)]
#[repr(u32)]
pub struct Header {
    /// Number of translate parameter words.
    pub translate_params: B6,
    /// Number of normal parameter words.
    pub normal_params: B6,
    #[skip]
    __padding: B4,
    /// Command ID.
    pub command_id: B16,
}

const_assert_eq!(size_of::<Header>(), 4);

/// Builds a command header word.
///
/// Parameter counts are masked to their 6-bit fields.
#[inline]
pub const fn make_header(command_id: u16, normal_params: u32, translate_params: u32) -> u32 {
    ((command_id as u32) << 16)
        | ((normal_params & COUNT_MASK) << 6)
        | (translate_params & COUNT_MASK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_header_matches_known_commands() {
        // srv::GetServiceHandle
        assert_eq!(make_header(0x5, 4, 0), 0x0005_0100);
        // srv::RegisterClient
        assert_eq!(make_header(0x1, 0, 2), 0x0001_0002);
        // HID::GetIPCHandles
        assert_eq!(make_header(0xA, 0, 0), 0x000A_0000);
    }

    #[test]
    fn make_header_masks_counts() {
        assert_eq!(make_header(0x1, 0x41, 0x7F), 0x0001_007F);
    }

    #[test]
    fn header_fields_decode() {
        let header = Header::from(make_header(0xA, 1, 7));

        assert_eq!(header.command_id(), 0xA);
        assert_eq!(header.normal_params(), 1);
        assert_eq!(header.translate_params(), 7);
        assert_eq!(u32::from(header), 0x000A_0047);
    }
}
