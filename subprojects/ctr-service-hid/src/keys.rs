//! Button and pad key masks.

use bitflags::bitflags;

bitflags! {
    /// Set of keys as reported in the pad section of shared memory.
    ///
    /// The circle pad and C-stick directions are reported as digital keys once the stick
    /// leaves its dead zone. [`UP`](Self::UP), [`DOWN`](Self::DOWN), [`LEFT`](Self::LEFT) and
    /// [`RIGHT`](Self::RIGHT) combine the D-pad with the circle pad.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Keys: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const SELECT = 1 << 2;
        const START = 1 << 3;
        const DRIGHT = 1 << 4;
        const DLEFT = 1 << 5;
        const DUP = 1 << 6;
        const DDOWN = 1 << 7;
        const R = 1 << 8;
        const L = 1 << 9;
        const X = 1 << 10;
        const Y = 1 << 11;
        /// New 3DS only
        const ZL = 1 << 14;
        /// New 3DS only
        const ZR = 1 << 15;
        /// Not reported by the pad section; set while the touch screen is pressed
        const TOUCH = 1 << 20;
        /// New 3DS only
        const CSTICK_RIGHT = 1 << 24;
        /// New 3DS only
        const CSTICK_LEFT = 1 << 25;
        /// New 3DS only
        const CSTICK_UP = 1 << 26;
        /// New 3DS only
        const CSTICK_DOWN = 1 << 27;
        const CPAD_RIGHT = 1 << 28;
        const CPAD_LEFT = 1 << 29;
        const CPAD_UP = 1 << 30;
        const CPAD_DOWN = 1 << 31;

        const UP = Self::DUP.bits() | Self::CPAD_UP.bits();
        const DOWN = Self::DDOWN.bits() | Self::CPAD_DOWN.bits();
        const LEFT = Self::DLEFT.bits() | Self::CPAD_LEFT.bits();
        const RIGHT = Self::DRIGHT.bits() | Self::CPAD_RIGHT.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bits_match_pad_layout() {
        assert_eq!(Keys::A.bits(), 0x1);
        assert_eq!(Keys::ZL.bits(), 0x4000);
        assert_eq!(Keys::TOUCH.bits(), 0x10_0000);
        assert_eq!(Keys::CPAD_DOWN.bits(), 0x8000_0000);
    }

    #[test]
    fn composite_directions() {
        assert!(Keys::UP.contains(Keys::DUP | Keys::CPAD_UP));
        assert!(Keys::RIGHT.intersects(Keys::CPAD_RIGHT));
        assert!(!Keys::LEFT.intersects(Keys::RIGHT));
    }

    #[test]
    fn unknown_bits_are_retained() {
        let keys = Keys::from_bits_retain(0x0000_1001);

        assert!(keys.contains(Keys::A));
        assert_eq!(keys.bits(), 0x1001);
    }
}
