//! Typed kernel handles.
//!
//! Every kernel object is referred to by a 32-bit handle. The newtypes below only differ in the
//! object type they promise, so a session cannot be passed where an event is expected. Values
//! `0xFFFF8000` and `0xFFFF8001` are pseudo-handles for the current thread and process; they
//! are valid but never need closing.

use crate::raw::{CUR_PROCESS_HANDLE, CUR_THREAD_HANDLE, Handle};

/// Kernel objects that `WaitSynchronization` accepts.
pub trait Waitable: sealed::Sealed {
    fn raw_handle(&self) -> Handle;
}

/// Returns true for the current thread/process pseudo-handles.
#[inline]
pub const fn is_pseudo_handle(raw: Handle) -> bool {
    raw == CUR_THREAD_HANDLE || raw == CUR_PROCESS_HANDLE
}

/// Defines a `#[repr(transparent)]` handle newtype.
macro_rules! define_handle_type {
    {
        $(#[$meta:meta])* $vis:vis struct $name:ident
    } => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        $vis struct $name($crate::raw::Handle);

        impl $name {
            /// Wraps a raw handle.
            ///
            /// # Safety
            ///
            /// `raw` must name a kernel object of this type, or be the invalid handle.
            #[inline]
            pub const unsafe fn from_raw(raw: $crate::raw::Handle) -> Self {
                Self(raw)
            }

            /// Returns the raw handle.
            #[inline]
            pub const fn to_raw(&self) -> $crate::raw::Handle {
                self.0
            }

            /// Returns false for the invalid (zero) handle.
            #[inline]
            pub const fn is_valid(&self) -> bool {
                self.0 != $crate::raw::INVALID_HANDLE
            }
        }

        impl ::core::convert::From<$name> for $crate::raw::Handle {
            #[inline]
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl ::core::fmt::LowerHex for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::LowerHex::fmt(&self.0, f)
            }
        }

        impl ::core::cmp::PartialEq<$crate::raw::Handle> for $name {
            fn eq(&self, other: &$crate::raw::Handle) -> bool {
                self.0 == *other
            }
        }

        impl ::core::cmp::PartialEq<$name> for $crate::raw::Handle {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

/// Same as `define_handle_type!`, plus a [`Waitable`] impl.
macro_rules! define_waitable_handle_type {
    {
        $(#[$meta:meta])* $vis:vis struct $name:ident
    } => {
        define_handle_type! {
            $(#[$meta])* $vis struct $name
        }

        impl $crate::handle::sealed::Sealed for $name {}

        impl $crate::handle::Waitable for $name {
            #[inline]
            fn raw_handle(&self) -> $crate::raw::Handle {
                self.0
            }
        }
    };
}

pub(crate) mod sealed {
    pub trait Sealed {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::EventHandle;

    #[test]
    fn pseudo_handles() {
        assert!(is_pseudo_handle(0xFFFF_8000));
        assert!(is_pseudo_handle(0xFFFF_8001));
        assert!(!is_pseudo_handle(0xFFFF_8002));
        assert!(!is_pseudo_handle(0x100));
    }

    #[test]
    fn typed_handle_conversions() {
        // SAFETY: Test-only handle value.
        let event = unsafe { EventHandle::from_raw(0x2A) };

        assert_eq!(event, 0x2A);
        assert_eq!(Handle::from(event), 0x2A);
        assert_eq!(event.raw_handle(), 0x2A);
        assert_eq!(std::format!("{event:#x}"), "0x2a");
    }
}
