//! Request encoding.

use ctr_svc::{ipc::CommandBuffer, raw::Handle};

use crate::{
    desc::{self, BufferRights},
    header::make_header,
};

/// Builder for an IPC request.
///
/// Normal and translate parameters are collected separately and laid out by
/// [`build`](Self::build), so they can be added in any order.
///
/// # Example
///
/// ```ignore
/// let cmdbuf = RequestBuilder::new(proto::GET_SERVICE_HANDLE)
///     .params(&name.to_words())
///     .param(name.len() as u32)
///     .param(0)
///     .build();
/// ```
#[derive(Clone)]
pub struct RequestBuilder {
    command_id: u16,
    normal: [u32; CommandBuffer::WORDS],
    normal_len: usize,
    translate: [u32; CommandBuffer::WORDS],
    translate_len: usize,
}

impl RequestBuilder {
    /// Starts a request for `command_id`.
    #[inline]
    pub const fn new(command_id: u16) -> Self {
        Self {
            command_id,
            normal: [0; CommandBuffer::WORDS],
            normal_len: 0,
            translate: [0; CommandBuffer::WORDS],
            translate_len: 0,
        }
    }

    /// Appends a normal parameter.
    ///
    /// # Panics
    ///
    /// Panics if the request no longer fits in the command buffer.
    #[inline]
    pub fn param(mut self, word: u32) -> Self {
        self.push_normal(word);
        self
    }

    /// Appends several normal parameters.
    pub fn params(mut self, words: &[u32]) -> Self {
        for &word in words {
            self.push_normal(word);
        }
        self
    }

    /// Asks the kernel to fill in the caller's process ID.
    pub fn calling_pid(mut self) -> Self {
        self.push_translate(desc::CALLING_PID);
        self.push_translate(0);
        self
    }

    /// Sends handles the caller keeps ownership of.
    pub fn copy_handles(mut self, handles: &[Handle]) -> Self {
        debug_assert!(desc::is_valid_handle_list(handles));
        self.push_translate(desc::copy_handles(handles.len()));
        for &handle in handles {
            self.push_translate(handle);
        }
        self
    }

    /// Sends handles whose ownership passes to the server.
    pub fn move_handles(mut self, handles: &[Handle]) -> Self {
        debug_assert!(desc::is_valid_handle_list(handles));
        self.push_translate(desc::move_handles(handles.len()));
        for &handle in handles {
            self.push_translate(handle);
        }
        self
    }

    /// Sends `data` through static buffer `id`.
    ///
    /// The buffer must stay alive until the request has been sent.
    pub fn static_buffer(mut self, data: &[u8], id: u8) -> Self {
        self.push_translate(desc::static_buffer(data.len(), id));
        self.push_translate(data.as_ptr() as usize as u32);
        self
    }

    /// Maps `len` bytes at `addr` into the server with `rights`.
    ///
    /// The buffer must stay alive until the reply has been received.
    pub fn buffer(mut self, addr: *const u8, len: usize, rights: BufferRights) -> Self {
        self.push_translate(desc::buffer(len, rights));
        self.push_translate(addr as usize as u32);
        self
    }

    /// Number of words the request occupies, header included.
    #[inline]
    pub const fn len(&self) -> usize {
        1 + self.normal_len + self.translate_len
    }

    /// Lays out the request in a fresh command buffer.
    pub fn build(&self) -> CommandBuffer {
        let mut cmdbuf = CommandBuffer::new();
        self.write(&mut cmdbuf);
        cmdbuf
    }

    /// Lays out the request in `cmdbuf`.
    pub fn write(&self, cmdbuf: &mut CommandBuffer) {
        let words = cmdbuf.words_mut();
        words[0] = make_header(
            self.command_id,
            self.normal_len as u32,
            self.translate_len as u32,
        );

        let normal_end = 1 + self.normal_len;
        words[1..normal_end].copy_from_slice(&self.normal[..self.normal_len]);
        words[normal_end..normal_end + self.translate_len]
            .copy_from_slice(&self.translate[..self.translate_len]);
    }

    fn push_normal(&mut self, word: u32) {
        assert!(self.len() < CommandBuffer::WORDS, "request too large");
        self.normal[self.normal_len] = word;
        self.normal_len += 1;
    }

    fn push_translate(&mut self, word: u32) {
        assert!(self.len() < CommandBuffer::WORDS, "request too large");
        self.translate[self.translate_len] = word;
        self.translate_len += 1;
    }
}

impl core::fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("command_id", &format_args!("{:#06x}", self.command_id))
            .field("normal", &&self.normal[..self.normal_len])
            .field("translate", &&self.translate[..self.translate_len])
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_request_is_header_only() {
        let cmdbuf = RequestBuilder::new(0xA).build();

        assert_eq!(cmdbuf[0], 0x000A_0000);
        assert_eq!(cmdbuf[1], 0);
    }

    #[test]
    fn normal_params_precede_translate_params() {
        let cmdbuf = RequestBuilder::new(0x1)
            .calling_pid()
            .param(0xAAAA)
            .build();

        assert_eq!(cmdbuf[0], make_header(0x1, 1, 2));
        assert_eq!(cmdbuf[1], 0xAAAA);
        assert_eq!(cmdbuf[2], desc::CALLING_PID);
        assert_eq!(cmdbuf[3], 0);
    }

    #[test]
    fn handle_lists_are_laid_out_after_their_descriptor() {
        let builder = RequestBuilder::new(0x7).move_handles(&[0x101, 0x102]);
        let cmdbuf = builder.build();

        assert_eq!(builder.len(), 4);
        assert_eq!(cmdbuf[0], make_header(0x7, 0, 3));
        assert_eq!(cmdbuf[1], desc::move_handles(2));
        assert_eq!(cmdbuf[2], 0x101);
        assert_eq!(cmdbuf[3], 0x102);
    }

    #[test]
    fn write_overwrites_previous_contents() {
        let mut cmdbuf = CommandBuffer::new();
        cmdbuf[1] = 0xDEAD;

        RequestBuilder::new(0x11).param(7).write(&mut cmdbuf);

        assert_eq!(cmdbuf[0], 0x0011_0040);
        assert_eq!(cmdbuf[1], 7);
    }

    #[test]
    #[should_panic(expected = "request too large")]
    fn oversized_request_panics() {
        let words = [0u32; CommandBuffer::WORDS];
        let _ = RequestBuilder::new(0x1).params(&words);
    }
}
