//! Reply decoding.

use ctr_svc::{Error, ResultCode, ipc::CommandBuffer, raw::Handle};

use crate::{desc::Descriptor, header::Header};

/// Maximum number of handles kept from a single reply.
pub const MAX_HANDLES: usize = 8;

/// A decoded reply.
///
/// Borrowed from the command buffer it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct Response<'a> {
    /// The reply header.
    pub header: Header,
    /// Normal parameters following the result code.
    pub params: &'a [u32],
    handles: [Handle; MAX_HANDLES],
    num_handles: usize,
}

impl<'a> Response<'a> {
    /// Decodes the reply in `cmdbuf`. See [`parse_response`].
    #[inline]
    pub fn parse(cmdbuf: &'a CommandBuffer) -> Result<Self, ParseResponseError> {
        parse_response(cmdbuf)
    }

    /// Returns the normal parameter at `index`, counted after the result code.
    #[inline]
    pub fn param(&self, index: usize) -> Option<u32> {
        self.params.get(index).copied()
    }

    /// Returns the handle at `index`, counted across all handle descriptors.
    #[inline]
    pub fn handle(&self, index: usize) -> Option<Handle> {
        self.handles().get(index).copied()
    }

    /// Returns all handles received in the reply.
    #[inline]
    pub fn handles(&self) -> &[Handle] {
        &self.handles[..self.num_handles]
    }
}

/// Decodes the reply left in `cmdbuf` by a successful request.
///
/// The service's result code (word 1) is checked first; a failure is returned as
/// [`ParseResponseError::ServiceError`].
pub fn parse_response(cmdbuf: &CommandBuffer) -> Result<Response<'_>, ParseResponseError> {
    let words = cmdbuf.words();
    let header = Header::from(words[0]);

    let normal = usize::from(header.normal_params());
    let translate = usize::from(header.translate_params());
    if normal == 0 {
        return Err(ParseResponseError::MissingResult);
    }
    if 1 + normal + translate > CommandBuffer::WORDS {
        return Err(ParseResponseError::Truncated);
    }

    let result = ResultCode::from_raw(words[1]);
    if result.is_failure() {
        return Err(ParseResponseError::ServiceError(result.into()));
    }

    let params = &words[2..1 + normal];

    let mut handles = [0; MAX_HANDLES];
    let mut num_handles = 0;

    let mut pos = 1 + normal;
    let end = pos + translate;
    while pos < end {
        let word = words[pos];
        let desc = Descriptor::parse(word).ok_or(ParseResponseError::UnknownDescriptor(word))?;
        let payload = desc.payload_words();
        if pos + 1 + payload > end {
            return Err(ParseResponseError::Truncated);
        }

        if let Descriptor::Handles { count, .. } = desc {
            for &handle in &words[pos + 1..pos + 1 + count] {
                if num_handles == MAX_HANDLES {
                    return Err(ParseResponseError::TooManyHandles);
                }
                handles[num_handles] = handle;
                num_handles += 1;
            }
        }

        pos += 1 + payload;
    }

    Ok(Response {
        header,
        params,
        handles,
        num_handles,
    })
}

/// Error returned by [`parse_response`].
#[derive(Debug, thiserror::Error)]
pub enum ParseResponseError {
    /// The service reported a failure.
    #[error("service returned an error")]
    ServiceError(#[source] Error),
    /// The reply has no result code.
    #[error("missing result code")]
    MissingResult,
    /// The header describes more words than the command buffer holds.
    #[error("truncated reply")]
    Truncated,
    /// A translate parameter has an unknown descriptor.
    #[error("unknown descriptor {0:#010x}")]
    UnknownDescriptor(u32),
    /// The reply carries more handles than can be kept.
    #[error("too many handles in reply")]
    TooManyHandles,
}

impl ParseResponseError {
    /// Returns the service's error if the service reported a failure.
    pub fn service_error(&self) -> Option<Error> {
        match self {
            Self::ServiceError(code) => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{desc, header::make_header};

    fn reply(words: &[u32]) -> CommandBuffer {
        let mut cmdbuf = CommandBuffer::new();
        cmdbuf.words_mut()[..words.len()].copy_from_slice(words);
        cmdbuf
    }

    #[test]
    fn parses_result_only_reply() {
        let cmdbuf = reply(&[make_header(0x11, 1, 0), 0]);

        let resp = parse_response(&cmdbuf).unwrap();

        assert!(resp.params.is_empty());
        assert!(resp.handles().is_empty());
        assert_eq!(resp.header.command_id(), 0x11);
    }

    #[test]
    fn parses_params_after_result() {
        let cmdbuf = reply(&[make_header(0x15, 2, 0), 0, 1.5f32.to_bits()]);

        let resp = parse_response(&cmdbuf).unwrap();

        assert_eq!(resp.param(0).map(f32::from_bits), Some(1.5));
        assert_eq!(resp.param(1), None);
    }

    #[test]
    fn collects_handles_from_descriptors() {
        let cmdbuf = reply(&[
            make_header(0xA, 1, 7),
            0,
            desc::copy_handles(6),
            0x10,
            0x11,
            0x12,
            0x13,
            0x14,
            0x15,
        ]);

        let resp = parse_response(&cmdbuf).unwrap();

        assert_eq!(resp.handles(), &[0x10, 0x11, 0x12, 0x13, 0x14, 0x15]);
        assert_eq!(resp.handle(5), Some(0x15));
        assert_eq!(resp.handle(6), None);
    }

    #[test]
    fn skips_non_handle_descriptors() {
        let cmdbuf = reply(&[
            make_header(0x5, 1, 4),
            0,
            desc::static_buffer(0x10, 0),
            0x0800_0000,
            desc::move_handles(1),
            0x42,
        ]);

        let resp = parse_response(&cmdbuf).unwrap();

        assert_eq!(resp.handles(), &[0x42]);
    }

    #[test]
    fn reports_service_failure() {
        let cmdbuf = reply(&[make_header(0x5, 1, 0), 0xD880_07FA]);

        let err = parse_response(&cmdbuf).unwrap_err();

        assert_eq!(
            err.service_error().map(Error::code),
            Some(ResultCode::from_raw(0xD880_07FA))
        );
    }

    #[test]
    fn rejects_reply_without_result() {
        let cmdbuf = reply(&[make_header(0x5, 0, 0)]);

        assert!(matches!(
            parse_response(&cmdbuf),
            Err(ParseResponseError::MissingResult)
        ));
    }

    #[test]
    fn rejects_descriptor_overrunning_translate_params() {
        let cmdbuf = reply(&[make_header(0xA, 1, 2), 0, desc::copy_handles(3), 0x10]);

        assert!(matches!(
            parse_response(&cmdbuf),
            Err(ParseResponseError::Truncated)
        ));
    }
}
