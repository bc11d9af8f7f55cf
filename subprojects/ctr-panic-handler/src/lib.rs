//! # ctr-panic-handler
//!
//! Panic handler for 3DS homebrew applications.
//!
//! On panic the message is formatted into a static buffer with Rust's standard "panicked at"
//! format, written to the debug output with `svcOutputDebugString`, and execution stops with
//! `svcBreak(PANIC)`. When no debugger is attached the kernel terminates the process.
//!
//! The handler is only installed when building for the console (`target_os = "horizon"`), so
//! crates that link it can still be tested on the host.
//!
//! ## Minimal SVC Implementation
//!
//! This crate carries its own two supervisor calls instead of depending on `ctr-svc`, so any
//! crate can link it without pulling in the rest of the SDK.

#![no_std]

/// Maximum size of the formatted panic message
#[cfg_attr(not(target_os = "horizon"), allow(dead_code))]
const MSG_BUFFER_SIZE: usize = 256;

#[cfg(all(target_os = "horizon", not(test)))]
#[panic_handler]
fn panic_handler(info: &core::panic::PanicInfo) -> ! {
    use core::fmt::Write as _;

    static mut MSG_BUFFER: [u8; MSG_BUFFER_SIZE] = [0; MSG_BUFFER_SIZE];

    // SAFETY: Panics are fatal, nothing else touches the buffer from here on.
    let buf = unsafe { &mut *(&raw mut MSG_BUFFER) };

    let mut cursor = Cursor::new(buf);
    let _ = write!(cursor, "{info}");
    let written = cursor.written();

    // SAFETY: The message lies within the static buffer.
    unsafe {
        svc::output_debug_string(written.as_ptr(), written.len() as i32);
        svc::break_execution(svc::BREAK_REASON_PANIC);
    }

    loop {
        core::hint::spin_loop();
    }
}

/// Truncating writer over a fixed byte buffer.
#[cfg_attr(not(target_os = "horizon"), allow(dead_code))]
struct Cursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

#[cfg_attr(not(target_os = "horizon"), allow(dead_code))]
impl<'a> Cursor<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl core::fmt::Write for Cursor<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let remaining = self.buf.len() - self.pos;
        let n = s.len().min(remaining);
        self.buf[self.pos..self.pos + n].copy_from_slice(&s.as_bytes()[..n]);
        self.pos += n;
        Ok(())
    }
}

#[cfg(all(target_os = "horizon", not(test)))]
mod svc {
    /// `svcOutputDebugString`
    const OUTPUT_DEBUG_STRING: u8 = 0x3D;
    /// `svcBreak`
    const BREAK: u8 = 0x3C;

    pub(super) const BREAK_REASON_PANIC: u32 = 0;

    /// # Safety
    ///
    /// `ptr` must be valid for `len` bytes.
    #[unsafe(naked)]
    pub(super) unsafe extern "C" fn output_debug_string(ptr: *const u8, len: i32) -> u32 {
        core::arch::naked_asm!(
            "svc {code}",
            "bx lr",
            code = const OUTPUT_DEBUG_STRING,
        );
    }

    /// # Safety
    ///
    /// Does not return unless a debugger resumes execution.
    #[unsafe(naked)]
    pub(super) unsafe extern "C" fn break_execution(reason: u32) -> u32 {
        core::arch::naked_asm!(
            "svc {code}",
            "bx lr",
            code = const BREAK,
        );
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Write as _;

    use super::*;

    #[test]
    fn cursor_writes_formatted_text() {
        let mut buf = [0u8; 32];
        let mut cursor = Cursor::new(&mut buf);

        write!(cursor, "panicked at {}:{}", "hid.rs", 42).unwrap();

        assert_eq!(cursor.written(), b"panicked at hid.rs:42");
    }

    #[test]
    fn cursor_truncates_at_capacity() {
        let mut buf = [0u8; 8];
        let mut cursor = Cursor::new(&mut buf);

        write!(cursor, "0123456789").unwrap();

        assert_eq!(cursor.written(), b"01234567");
    }
}
