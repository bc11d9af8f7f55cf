//! Synchronization objects.

define_waitable_handle_type! {
    /// A handle to an event kernel object.
    ///
    /// Events are signalled by their owner (typically a system module) and waited on with
    /// [`Kernel::wait_synchronization`]. A sticky or one-shot reset is configured by the
    /// creator; the client clears sticky events with [`Kernel::clear_event`].
    ///
    /// [`Kernel::wait_synchronization`]: crate::Kernel::wait_synchronization
    /// [`Kernel::clear_event`]: crate::Kernel::clear_event
    pub struct EventHandle
}

/// Timeout value that makes a wait block until the object is signalled.
pub const WAIT_INFINITE: i64 = -1;

/// Timeout value that polls the object without blocking.
pub const WAIT_POLL: i64 = 0;
