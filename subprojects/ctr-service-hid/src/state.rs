//! Input snapshot taken from shared memory.

use core::ptr::{self, NonNull};

use crate::{
    keys::Keys,
    shmem::{
        AccelVector, AngularRate, CirclePosition, HidSharedMemory, TouchPosition,
        layout::Section,
    },
};

/// The input state captured by the last scan.
///
/// Sections that were stale at scan time contribute their default (zero) value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Keys held at scan time
    pub held: Keys,
    /// Keys held now but not at the previous scan
    pub down: Keys,
    /// Keys held at the previous scan but not now
    pub up: Keys,
    pub touch: TouchPosition,
    pub circle: CirclePosition,
    pub accel: AccelVector,
    pub gyro: AngularRate,
}

impl InputState {
    /// Replaces the snapshot with the latest entries from `shmem`.
    ///
    /// # Safety
    ///
    /// `shmem` must point to a readable HID shared memory block.
    pub unsafe fn scan(&mut self, shmem: NonNull<HidSharedMemory>) {
        let mem = shmem.as_ptr();
        let old = self.held;
        let mut next = Self::default();

        // SAFETY: Caller guarantees `mem` points to mapped shared memory.
        unsafe {
            if let Some(entry) = latest(&raw const (*mem).pad) {
                next.held = Keys::from_bits_retain(entry.current);
                next.circle = entry.circle;
            }

            if let Some(entry) = latest(&raw const (*mem).touch) {
                next.touch = entry.position;
                if entry.is_touching() {
                    next.held |= Keys::TOUCH;
                }
            }

            if let Some(accel) = latest(&raw const (*mem).accel) {
                next.accel = accel;
            }

            if let Some(gyro) = latest(&raw const (*mem).gyro) {
                next.gyro = gyro;
            }
        }

        // Computed on raw bits: `!` on the flag set would drop undefined bits
        next.down = Keys::from_bits_retain(!old.bits() & next.held.bits());
        next.up = Keys::from_bits_retain(old.bits() & !next.held.bits());

        *self = next;
    }
}

/// Returns the latest entry of a section, or `None` if the section has not been updated.
///
/// # Safety
///
/// `section` must be valid for reads.
unsafe fn latest<const R: usize, T: Copy, const N: usize>(
    section: *const Section<R, T, N>,
) -> Option<T> {
    // SAFETY: Caller guarantees `section` is valid for reads.
    let header = unsafe { ptr::read_volatile(&raw const (*section).header) };

    let index = (header.index as usize).min(N - 1);
    if index == 0 && is_stale(header.tick, header.prev_tick) {
        return None;
    }

    // SAFETY: `index` is within the entry array.
    Some(unsafe { ptr::read_volatile(&raw const (*section).entries[index]) })
}

/// A ring that has not wrapped yet is only valid once its ticks are sane and advancing.
const fn is_stale(tick: u64, prev_tick: u64) -> bool {
    tick == prev_tick || (tick as i64) < 0 || (prev_tick as i64) < 0
}

#[cfg(test)]
mod tests {
    use std::boxed::Box;

    use super::*;
    use crate::shmem::PadEntry;

    fn shared_memory() -> Box<HidSharedMemory> {
        // SAFETY: All-zero is a valid bit pattern for the plain integer layout.
        Box::new(unsafe { core::mem::zeroed() })
    }

    fn set_pad(mem: &mut HidSharedMemory, index: u32, keys: Keys, circle: (i16, i16)) {
        mem.pad.header.tick += 2;
        mem.pad.header.prev_tick = mem.pad.header.tick - 1;
        mem.pad.header.index = index;
        mem.pad.entries[index.min(7) as usize] = PadEntry {
            current: keys.bits(),
            circle: CirclePosition {
                dx: circle.0,
                dy: circle.1,
            },
            ..PadEntry::default()
        };
    }

    fn scan(state: &mut InputState, mem: &HidSharedMemory) {
        // SAFETY: `mem` is a live shared memory image.
        unsafe { state.scan(NonNull::from(mem)) };
    }

    #[test]
    fn reads_latest_pad_entry() {
        let mut mem = shared_memory();
        set_pad(&mut mem, 3, Keys::A | Keys::L, (40, -12));
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.held, Keys::A | Keys::L);
        assert_eq!(state.circle, CirclePosition { dx: 40, dy: -12 });
    }

    #[test]
    fn computes_down_and_up_edges() {
        let mut mem = shared_memory();
        let mut state = InputState::default();

        set_pad(&mut mem, 1, Keys::A | Keys::B, (0, 0));
        scan(&mut state, &mem);
        assert_eq!(state.down, Keys::A | Keys::B);
        assert_eq!(state.up, Keys::empty());

        set_pad(&mut mem, 2, Keys::B | Keys::X, (0, 0));
        scan(&mut state, &mem);
        assert_eq!(state.held, Keys::B | Keys::X);
        assert_eq!(state.down, Keys::X);
        assert_eq!(state.up, Keys::A);
    }

    #[test]
    fn edges_keep_undefined_bits() {
        let mut mem = shared_memory();
        let mut state = InputState::default();

        set_pad(&mut mem, 1, Keys::from_bits_retain(1 << 12), (0, 0));
        scan(&mut state, &mem);

        assert_eq!(state.down.bits(), 1 << 12);
    }

    #[test]
    fn index_zero_with_equal_ticks_is_stale() {
        let mut mem = shared_memory();
        mem.pad.header.tick = 5;
        mem.pad.header.prev_tick = 5;
        mem.pad.entries[0].current = Keys::START.bits();
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.held, Keys::empty());
    }

    #[test]
    fn index_zero_with_negative_tick_is_stale() {
        let mut mem = shared_memory();
        mem.pad.header.tick = u64::MAX;
        mem.pad.header.prev_tick = 1;
        mem.pad.entries[0].current = Keys::START.bits();
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.held, Keys::empty());
    }

    #[test]
    fn index_zero_with_negative_prev_tick_is_stale() {
        let mut mem = shared_memory();
        mem.pad.header.tick = 1;
        mem.pad.header.prev_tick = u64::MAX;
        mem.pad.entries[0].current = Keys::START.bits();
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.held, Keys::empty());
    }

    #[test]
    fn stale_touch_section_sets_no_touch_key() {
        let mut mem = shared_memory();
        mem.touch.header.tick = 9;
        mem.touch.header.prev_tick = 9;
        mem.touch.entries[0].position = TouchPosition { px: 200, py: 100 };
        mem.touch.entries[0].flags = 1;
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert!(!state.held.contains(Keys::TOUCH));
        assert_eq!(state.touch, TouchPosition::default());
    }

    #[test]
    fn index_zero_with_advancing_ticks_is_fresh() {
        let mut mem = shared_memory();
        set_pad(&mut mem, 0, Keys::START, (0, 0));
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.held, Keys::START);
    }

    #[test]
    fn out_of_range_index_is_clamped() {
        let mut mem = shared_memory();
        set_pad(&mut mem, 12, Keys::Y, (0, 0));
        mem.gyro.header.index = 99;
        mem.gyro.entries[31] = AngularRate { x: 1, z: 2, y: 3 };
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.held, Keys::Y);
        assert_eq!(state.gyro, AngularRate { x: 1, z: 2, y: 3 });
    }

    #[test]
    fn touch_adds_touch_key() {
        let mut mem = shared_memory();
        mem.touch.header.index = 2;
        mem.touch.entries[2].position = TouchPosition { px: 160, py: 120 };
        mem.touch.entries[2].flags = 1;
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.touch, TouchPosition { px: 160, py: 120 });
        assert!(state.held.contains(Keys::TOUCH));
        assert!(state.down.contains(Keys::TOUCH));
    }

    #[test]
    fn any_touch_flag_bit_counts_as_touching() {
        let mut mem = shared_memory();
        mem.touch.header.index = 3;
        mem.touch.entries[3].flags = 0x100;
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert!(state.held.contains(Keys::TOUCH));
    }

    #[test]
    fn released_touch_keeps_position_without_key() {
        let mut mem = shared_memory();
        mem.touch.header.index = 1;
        mem.touch.entries[1].position = TouchPosition { px: 10, py: 20 };
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.touch, TouchPosition { px: 10, py: 20 });
        assert!(!state.held.contains(Keys::TOUCH));
    }

    #[test]
    fn reads_accelerometer() {
        let mut mem = shared_memory();
        mem.accel.header.index = 4;
        mem.accel.entries[4] = AccelVector { x: -3, y: 512, z: 7 };
        let mut state = InputState::default();

        scan(&mut state, &mem);

        assert_eq!(state.accel, AccelVector { x: -3, y: 512, z: 7 });
    }

    #[test]
    fn stale_sections_reset_to_zero() {
        let mut mem = shared_memory();
        mem.accel.header.index = 4;
        mem.accel.entries[4] = AccelVector { x: 1, y: 1, z: 1 };
        let mut state = InputState::default();
        scan(&mut state, &mem);

        mem.accel.header.index = 0;
        scan(&mut state, &mem);

        assert_eq!(state.accel, AccelVector::default());
    }
}
