//! Result codes returned by 3DS kernel SVCs and system services.
//!
//! # Structure
//!
//! The 32-bit result code is structured as follows:
//!
//! - **Bits 0-9:** Description
//! - **Bits 10-17:** Module
//! - **Bits 18-20:** Reserved
//! - **Bits 21-26:** Summary
//! - **Bits 27-31:** Level
//!
//! A code is a failure iff it is negative when read as an `i32`, i.e. the level field has its
//! top bit set. Informational codes such as [`TIMEOUT`] are therefore not failures on their own;
//! callers that care about them compare explicitly.
//!
//! # References
//! - [3dbrew: Error codes](https://www.3dbrew.org/wiki/Error_codes)

/// Type alias for Result with [`Error`] as the error type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Mask for the description field (10 bits)
const DESCRIPTION_MASK: u32 = 0x3FF;
/// Mask for the module field (8 bits)
const MODULE_MASK: u32 = 0xFF;
/// Shift amount for the module field
const MODULE_SHIFT: u32 = 10;
/// Mask for the summary field (6 bits)
const SUMMARY_MASK: u32 = 0x3F;
/// Shift amount for the summary field
const SUMMARY_SHIFT: u32 = 21;
/// Mask for the level field (5 bits)
const LEVEL_MASK: u32 = 0x1F;
/// Shift amount for the level field
const LEVEL_SHIFT: u32 = 27;

/// Raw 3DS result code, containing either a success or an error state.
///
/// For error handling with the standard library traits, see [`Result`] and [`Error`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ResultCode(u32);

impl ResultCode {
    /// The canonical success value.
    pub const SUCCESS: Self = Self(0);

    /// Creates a new [`ResultCode`] from a raw value
    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw value of the [`ResultCode`]
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    /// Packs a result code from its four fields, masking each one to its width.
    #[inline]
    pub const fn from_parts(level: u8, summary: u8, module: u8, description: u32) -> Self {
        Self(
            ((level as u32 & LEVEL_MASK) << LEVEL_SHIFT)
                | ((summary as u32 & SUMMARY_MASK) << SUMMARY_SHIFT)
                | ((module as u32 & MODULE_MASK) << MODULE_SHIFT)
                | (description & DESCRIPTION_MASK),
        )
    }

    /// Returns true if the code does not represent a failure.
    #[inline]
    pub const fn is_success(self) -> bool {
        (self.0 as i32) >= 0
    }

    /// Returns true if the code represents a failure.
    #[inline]
    pub const fn is_failure(self) -> bool {
        !self.is_success()
    }

    /// Returns the level field.
    #[inline]
    pub const fn level(self) -> u8 {
        ((self.0 >> LEVEL_SHIFT) & LEVEL_MASK) as u8
    }

    /// Returns the summary field.
    #[inline]
    pub const fn summary(self) -> u8 {
        ((self.0 >> SUMMARY_SHIFT) & SUMMARY_MASK) as u8
    }

    /// Returns the module that produced the code.
    #[inline]
    pub const fn module(self) -> u8 {
        ((self.0 >> MODULE_SHIFT) & MODULE_MASK) as u8
    }

    /// Returns the description value.
    #[inline]
    pub const fn description(self) -> u32 {
        self.0 & DESCRIPTION_MASK
    }

    /// Converts this code into a [`core::result::Result`] carrying `ok` on success.
    #[inline]
    pub fn map<T, E>(self, ok: T, err: impl FnOnce(Error) -> E) -> core::result::Result<T, E> {
        if self.is_success() {
            Ok(ok)
        } else {
            Err(err(Error(self)))
        }
    }

    /// Converts this code into a unit [`Result`].
    #[inline]
    pub fn into_result(self) -> Result<()> {
        self.map((), |err| err)
    }
}

impl core::fmt::Debug for ResultCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ResultCode({:#010X})", self.0)
    }
}

impl From<u32> for ResultCode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// The error type for 3DS result codes.
///
/// Wraps a non-success [`ResultCode`]. The kernel's wait timeout, which is an informational
/// code, is also reported through this type by [`Kernel::wait_synchronization`].
///
/// # Formatting
///
/// ```text
/// 0xD8E007F7 (level 27, summary 7, module 1, description 1015)
/// ```
///
/// [`Kernel::wait_synchronization`]: crate::Kernel::wait_synchronization
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Error(ResultCode);

impl Error {
    /// Wraps a raw result code.
    #[inline]
    pub const fn from_code(code: ResultCode) -> Self {
        Self(code)
    }

    /// Returns the wrapped result code.
    #[inline]
    pub const fn code(self) -> ResultCode {
        self.0
    }

    /// Returns the raw value (`u32`) of this error code
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0.to_raw()
    }

    /// Returns the module that produced the error.
    #[inline]
    pub const fn module(self) -> u8 {
        self.0.module()
    }

    /// Returns the description value
    #[inline]
    pub const fn description(self) -> u32 {
        self.0.description()
    }

    /// Returns true if this is the kernel's wait timeout.
    #[inline]
    pub const fn is_timeout(self) -> bool {
        self.0.to_raw() == TIMEOUT.to_raw()
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:#010X} (level {}, summary {}, module {}, description {})",
            self.0.to_raw(),
            self.0.level(),
            self.0.summary(),
            self.0.module(),
            self.0.description()
        )
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Error")
            .field("raw", &format_args!("{:#010X}", self.0.to_raw()))
            .field("level", &self.0.level())
            .field("summary", &self.0.summary())
            .field("module", &self.0.module())
            .field("description", &self.0.description())
            .finish()
    }
}

impl core::error::Error for Error {}

impl From<ResultCode> for Error {
    fn from(value: ResultCode) -> Self {
        Self(value)
    }
}

/// Result levels.
pub mod level {
    pub const SUCCESS: u8 = 0;
    pub const INFO: u8 = 1;
    pub const STATUS: u8 = 25;
    pub const TEMPORARY: u8 = 26;
    pub const PERMANENT: u8 = 27;
    pub const USAGE: u8 = 28;
    pub const REINITIALIZE: u8 = 29;
    pub const RESET: u8 = 30;
    pub const FATAL: u8 = 31;
}

/// Result summaries.
pub mod summary {
    pub const SUCCESS: u8 = 0;
    pub const NOTHING_HAPPENED: u8 = 1;
    pub const WOULD_BLOCK: u8 = 2;
    pub const OUT_OF_RESOURCE: u8 = 3;
    pub const NOT_FOUND: u8 = 4;
    pub const INVALID_STATE: u8 = 5;
    pub const NOT_SUPPORTED: u8 = 6;
    pub const INVALID_ARGUMENT: u8 = 7;
    pub const WRONG_ARGUMENT: u8 = 8;
    pub const CANCELED: u8 = 9;
    pub const STATUS_CHANGED: u8 = 10;
    pub const INTERNAL: u8 = 11;
}

/// Result modules used in this workspace.
pub mod module {
    pub const COMMON: u8 = 0;
    pub const KERNEL: u8 = 1;
    pub const OS: u8 = 6;
    pub const HID: u8 = 19;
    pub const SRV: u8 = 25;
    pub const APPLICATION: u8 = 254;
}

/// Common result descriptions.
pub mod description {
    pub const SUCCESS: u32 = 0;
    pub const INVALID_SELECTION: u32 = 1000;
    pub const TOO_LARGE: u32 = 1001;
    pub const NOT_AUTHORIZED: u32 = 1002;
    pub const ALREADY_DONE: u32 = 1003;
    pub const INVALID_SIZE: u32 = 1004;
    pub const INVALID_ENUM_VALUE: u32 = 1005;
    pub const INVALID_COMBINATION: u32 = 1006;
    pub const NO_DATA: u32 = 1007;
    pub const BUSY: u32 = 1008;
    pub const MISALIGNED_ADDRESS: u32 = 1009;
    pub const MISALIGNED_SIZE: u32 = 1010;
    pub const OUT_OF_MEMORY: u32 = 1011;
    pub const NOT_IMPLEMENTED: u32 = 1012;
    pub const INVALID_ADDRESS: u32 = 1013;
    pub const INVALID_POINTER: u32 = 1014;
    pub const INVALID_HANDLE: u32 = 1015;
    pub const NOT_INITIALIZED: u32 = 1016;
    pub const ALREADY_INITIALIZED: u32 = 1017;
    pub const NOT_FOUND: u32 = 1018;
    pub const CANCEL_REQUESTED: u32 = 1019;
    pub const ALREADY_EXISTS: u32 = 1020;
    pub const OUT_OF_RANGE: u32 = 1021;
    pub const TIMEOUT: u32 = 1022;
    pub const INVALID_RESULT_VALUE: u32 = 1023;
}

/// Returned by the kernel when a wait times out (`0x09401BFE`).
pub const TIMEOUT: ResultCode = ResultCode::from_parts(
    level::INFO,
    summary::STATUS_CHANGED,
    module::OS,
    description::TIMEOUT,
);

/// Returned by the kernel for an invalid handle (`0xD8E007F7`).
pub const INVALID_HANDLE: ResultCode = ResultCode::from_parts(
    level::PERMANENT,
    summary::INVALID_ARGUMENT,
    module::KERNEL,
    description::INVALID_HANDLE,
);

/// Returned when a requested port or service does not exist (`0xD88007FA`).
pub const NOT_FOUND: ResultCode = ResultCode::from_parts(
    level::PERMANENT,
    summary::NOT_FOUND,
    module::KERNEL,
    description::NOT_FOUND,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_invalid_handle() {
        let rc = ResultCode::from_raw(0xD8E0_07F7);

        assert_eq!(rc, INVALID_HANDLE);
        assert_eq!(rc.level(), level::PERMANENT);
        assert_eq!(rc.summary(), summary::INVALID_ARGUMENT);
        assert_eq!(rc.module(), module::KERNEL);
        assert_eq!(rc.description(), description::INVALID_HANDLE);
        assert!(rc.is_failure());
    }

    #[test]
    fn timeout_is_not_a_failure() {
        assert_eq!(TIMEOUT.to_raw(), 0x0940_1BFE);
        assert!(TIMEOUT.is_success());
        assert!(Error::from(TIMEOUT).is_timeout());
    }

    #[test]
    fn not_found_raw_value() {
        assert_eq!(NOT_FOUND.to_raw(), 0xD880_07FA);
        assert_eq!(NOT_FOUND.summary(), summary::NOT_FOUND);
    }

    #[test]
    fn from_parts_masks_fields() {
        let rc = ResultCode::from_parts(0xFF, 0xFF, 0xFF, 0xFFFF);
        assert_eq!(rc.to_raw(), 0xFFE3_FFFF);
    }

    #[test]
    fn into_result_maps_failures() {
        assert!(ResultCode::SUCCESS.into_result().is_ok());

        let err = INVALID_HANDLE.into_result().unwrap_err();
        assert_eq!(err.code(), INVALID_HANDLE);
    }
}
